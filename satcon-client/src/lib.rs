//! # Satcon Client
//!
//! A typed GraphQL client for the Satellite Config (Razee) service.
//!
//! ## Features
//!
//! - **Typed operations**: one method per schema field for channels, clusters,
//!   groups, subscriptions, versions, resources and users
//! - **Pluggable authentication**: API key, IBM Cloud IAM, local sign-in and
//!   static bearer tokens
//! - **Injectable transport**: any [`HttpExecutor`] can carry the requests
//! - **Safe request rendering**: every variable is JSON-encoded by `serde_json`
//!
//! ## Quick Start
//!
//! ```rust,ignore
//! use std::sync::Arc;
//! use satcon_client::{ApiKeyAuthenticator, Client, DEFAULT_ENDPOINT};
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let auth = Arc::new(ApiKeyAuthenticator::new("my-api-key")?);
//!     let client = Client::new(DEFAULT_ENDPOINT, None, Some(auth))?;
//!
//!     if let Some(channels) = client.channels().channels("my-org").await? {
//!         for channel in channels {
//!             println!("{} {:?}", channel.uuid, channel.name);
//!         }
//!     }
//!     Ok(())
//! }
//! ```
//!
//! ## Local sign-in
//!
//! ```rust,ignore
//! use std::sync::Arc;
//! use satcon_client::{Client, LocalAuthenticator};
//!
//! let endpoint = "http://localhost:3333/graphql";
//! let auth = Arc::new(LocalAuthenticator::new(endpoint, "admin", "secret", None)?);
//! let client = Client::new(endpoint, None, Some(auth))?;
//! let me = client.users().me().await?;
//! ```

pub mod actions;
pub mod auth;
mod client;
mod config;
mod error;
pub mod types;
pub mod web;

pub use actions::{
    Channels, Clusters, Groups, Operation, RemovalResponse, Resources, Subscriptions, Users,
    Versions,
};
pub use auth::{
    ApiKeyAuthenticator, AuthError, Authenticator, BearerTokenAuthenticator, IamAuthenticator,
    LocalAuthenticator,
};
pub use client::{Client, Credentials};
pub use config::{ClientConfig, ClientConfigBuilder, DEFAULT_ENDPOINT};
pub use error::{BoxError, ClientError, Result};
pub use types::*;
pub use web::{
    BuildError, GraphQLQuery, GraphQLResponse, GraphQLResponseError, HttpExecutor, OperationKind,
    build_request_body,
};

/// Prelude for common imports.
pub mod prelude {
    pub use crate::actions::Operation;
    pub use crate::auth::Authenticator;
    pub use crate::client::{Client, Credentials};
    pub use crate::config::{ClientConfig, DEFAULT_ENDPOINT};
    pub use crate::error::{ClientError, Result};
    pub use crate::web::HttpExecutor;
}
