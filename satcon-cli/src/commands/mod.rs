//! Resource commands.
//!
//! Each module declares the flags of one subcommand and maps its
//! `--action` onto the matching client call.

pub mod channel;
pub mod cluster;
pub mod group;
pub mod resource;
pub mod subscription;
pub mod user;
pub mod version;

use std::sync::Arc;

use clap::Args;
use satcon_client::{
    ApiKeyAuthenticator, Authenticator, BearerTokenAuthenticator, Client, DEFAULT_ENDPOINT,
    IamAuthenticator, LocalAuthenticator,
};
use tracing::debug;

use crate::error::{CliError, CliResult, required};

/// Service connection and credential flags, shared by every subcommand.
#[derive(Args, Debug, Clone)]
pub struct ConnectionArgs {
    /// Organization ID
    #[arg(short, long, env = "SATCON_ORG_ID", global = true)]
    pub org: Option<String>,

    /// GraphQL endpoint of the config service
    #[arg(short, long, env = "SATCON_ENDPOINT", global = true, default_value = DEFAULT_ENDPOINT)]
    pub endpoint: String,

    /// Bearer token sent as-is
    #[arg(short, long, env = "SATCON_TOKEN", global = true, hide_env_values = true)]
    pub token: Option<String>,

    /// API key sent in the x-api-key header
    #[arg(long, env = "SATCON_API_KEY", global = true, hide_env_values = true)]
    pub api_key: Option<String>,

    /// IBM Cloud API key exchanged for an IAM token
    #[arg(long, env = "SATCON_IAM_API_KEY", global = true, hide_env_values = true)]
    pub iam_api_key: Option<String>,

    /// Login for local sign-in
    #[arg(long, env = "SATCON_LOGIN", global = true)]
    pub login: Option<String>,

    /// Password for local sign-in
    #[arg(long, env = "SATCON_PASSWORD", global = true, hide_env_values = true)]
    pub password: Option<String>,
}

/// Flags every resource subcommand accepts.
#[derive(Args, Debug, Clone, Default)]
pub struct CommonArgs {
    /// Object name
    #[arg(short, long)]
    pub name: Option<String>,

    /// Object ID (uuid or cluster ID)
    #[arg(long)]
    pub id: Option<String>,
}

/// Client and organization shared by one command invocation.
pub struct Context {
    pub client: Client,
    org: Option<String>,
}

impl Context {
    /// Build the client from connection flags.
    ///
    /// Credentials are picked in order: `--token`, `--api-key`,
    /// `--iam-api-key`, then `--login`/`--password`.
    pub fn new(conn: &ConnectionArgs) -> CliResult<Self> {
        let client = Client::new(&conn.endpoint, None, authenticator(conn)?)?;
        debug!(endpoint = %conn.endpoint, credentials = ?client.credentials(), "Client ready");

        Ok(Self {
            client,
            org: conn.org.clone(),
        })
    }

    /// The organization ID, which almost every action needs.
    pub fn org(&self) -> CliResult<&str> {
        self.org
            .as_deref()
            .filter(|org| !org.is_empty())
            .ok_or(CliError::MissingArgument("--org"))
    }
}

fn authenticator(conn: &ConnectionArgs) -> CliResult<Option<Arc<dyn Authenticator>>> {
    if let Some(token) = &conn.token {
        return Ok(Some(Arc::new(BearerTokenAuthenticator::new(token.as_str())?)));
    }
    if let Some(key) = &conn.api_key {
        return Ok(Some(Arc::new(ApiKeyAuthenticator::new(key.as_str())?)));
    }
    if let Some(key) = &conn.iam_api_key {
        return Ok(Some(Arc::new(IamAuthenticator::new(key.as_str())?)));
    }
    if let Some(login) = &conn.login {
        let password = required(conn.password.as_deref(), "--password")?;
        let auth = LocalAuthenticator::new(conn.endpoint.as_str(), login.as_str(), password, None)?;
        return Ok(Some(Arc::new(auth)));
    }
    Ok(None)
}
