//! Satcon client implementation.

use std::sync::Arc;

use tracing::debug;
use url::Url;

use crate::actions::{
    Channels, Clusters, Groups, Operation, Resources, Subscriptions, Users, Versions,
};
use crate::auth::Authenticator;
use crate::web::{GraphQLResponse, HttpExecutor, do_query, do_query_with_token};
use crate::{ClientConfig, ClientError, Result};

/// How requests from a [`Client`] are authenticated.
#[derive(Clone, Default)]
pub enum Credentials {
    /// No credential header.
    #[default]
    Anonymous,
    /// A pluggable authentication strategy.
    Authenticator(Arc<dyn Authenticator>),
    /// A bearer token supplied by the caller, bypassing any strategy.
    Token(String),
}

impl std::fmt::Debug for Credentials {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Anonymous => write!(f, "Anonymous"),
            Self::Authenticator(_) => write!(f, "Authenticator(..)"),
            Self::Token(_) => write!(f, "Token(<redacted>)"),
        }
    }
}

/// Satellite Config GraphQL client.
///
/// Holds the endpoint, the HTTP executor and the credentials; every
/// resource client ([`Channels`], [`Clusters`], ...) wraps one of these.
#[derive(Clone)]
pub struct Client {
    endpoint: Url,
    http: Arc<dyn HttpExecutor>,
    credentials: Credentials,
}

impl Client {
    /// Create a client for `endpoint`.
    ///
    /// `http` defaults to a plain `reqwest::Client`. An empty or unparsable
    /// endpoint is rejected.
    pub fn new(
        endpoint: &str,
        http: Option<Arc<dyn HttpExecutor>>,
        auth: Option<Arc<dyn Authenticator>>,
    ) -> Result<Self> {
        if endpoint.trim().is_empty() {
            return Err(ClientError::Config("endpoint URL must not be empty".to_string()));
        }
        let endpoint = Url::parse(endpoint)
            .map_err(|e| ClientError::Config(format!("invalid endpoint URL {endpoint:?}: {e}")))?;
        let http = http.unwrap_or_else(|| Arc::new(reqwest::Client::new()));
        let credentials = auth.map_or(Credentials::Anonymous, Credentials::Authenticator);

        Ok(Self {
            endpoint,
            http,
            credentials,
        })
    }

    /// Create a client whose default executor honours `config`.
    pub fn with_config(config: &ClientConfig, auth: Option<Arc<dyn Authenticator>>) -> Result<Self> {
        let http: Arc<dyn HttpExecutor> = Arc::new(config.http_client()?);
        Self::new(&config.endpoint, Some(http), auth)
    }

    /// Copy of this client that sends `token` as a bearer credential instead
    /// of using its authentication strategy.
    pub fn with_token(&self, token: impl Into<String>) -> Self {
        Self {
            credentials: Credentials::Token(token.into()),
            ..self.clone()
        }
    }

    /// The GraphQL endpoint.
    pub fn endpoint(&self) -> &Url {
        &self.endpoint
    }

    /// The credentials attached to requests.
    pub fn credentials(&self) -> &Credentials {
        &self.credentials
    }

    /// The HTTP executor.
    pub fn http(&self) -> &Arc<dyn HttpExecutor> {
        &self.http
    }

    /// Run one operation and return its payload.
    ///
    /// `Ok(None)` means the server returned no data for the operation.
    pub async fn execute<O: Operation>(&self, operation: &O) -> Result<Option<O::Output>> {
        let query = operation.query();
        debug!(
            operation = %query.operation_name,
            kind = %query.kind,
            "Dispatching GraphQL operation"
        );

        let http = self.http.as_ref();
        let helpers = operation.helpers();
        let response: GraphQLResponse = match &self.credentials {
            Credentials::Token(token) => {
                do_query_with_token(http, &self.endpoint, token, O::TEMPLATE, operation, helpers)
                    .await?
            }
            Credentials::Authenticator(auth) => {
                do_query(
                    http,
                    &self.endpoint,
                    Some(auth.as_ref()),
                    O::TEMPLATE,
                    operation,
                    helpers,
                )
                .await?
            }
            Credentials::Anonymous => {
                do_query(http, &self.endpoint, None, O::TEMPLATE, operation, helpers).await?
            }
        };

        response.into_operation(&query.operation_name)
    }

    /// Channel operations.
    pub fn channels(&self) -> Channels {
        Channels::from(self.clone())
    }

    /// Cluster operations.
    pub fn clusters(&self) -> Clusters {
        Clusters::from(self.clone())
    }

    /// Group operations.
    pub fn groups(&self) -> Groups {
        Groups::from(self.clone())
    }

    /// Subscription operations.
    pub fn subscriptions(&self) -> Subscriptions {
        Subscriptions::from(self.clone())
    }

    /// Channel version operations.
    pub fn versions(&self) -> Versions {
        Versions::from(self.clone())
    }

    /// Resource operations.
    pub fn resources(&self) -> Resources {
        Resources::from(self.clone())
    }

    /// User operations.
    pub fn users(&self) -> Users {
        Users::from(self.clone())
    }
}

impl std::fmt::Debug for Client {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Client")
            .field("endpoint", &self.endpoint.as_str())
            .field("credentials", &self.credentials)
            .finish_non_exhaustive()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::time::Duration;

    #[test]
    fn test_client_creation() {
        let client = Client::new("http://localhost:3333/graphql", None, None).unwrap();
        assert_eq!(client.endpoint().as_str(), "http://localhost:3333/graphql");
        assert!(matches!(client.credentials(), Credentials::Anonymous));
    }

    #[test]
    fn test_empty_endpoint_rejected() {
        assert!(matches!(
            Client::new("", None, None),
            Err(ClientError::Config(_))
        ));
        assert!(matches!(
            Client::new("not a url", None, None),
            Err(ClientError::Config(_))
        ));
    }

    #[test]
    fn test_with_config() {
        let config = ClientConfig::builder()
            .endpoint("https://config.example.com/graphql")
            .timeout(Duration::from_secs(5))
            .build();
        let client = Client::with_config(&config, None).unwrap();
        assert_eq!(client.endpoint().host_str(), Some("config.example.com"));
    }

    #[test]
    fn test_with_token_redacted() {
        let client = Client::new("http://localhost/graphql", None, None)
            .unwrap()
            .with_token("secret");
        assert!(matches!(client.credentials(), Credentials::Token(t) if t == "secret"));
        assert!(!format!("{client:?}").contains("secret"));
    }
}
