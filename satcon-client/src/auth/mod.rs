//! Authentication strategies.
//!
//! An [`Authenticator`] decorates each outgoing request with a credential
//! header before it is handed to the HTTP executor:
//!
//! - [`ApiKeyAuthenticator`] - static `x-api-key` header
//! - [`IamAuthenticator`] - IBM Cloud IAM bearer token exchanged from an API key
//! - [`LocalAuthenticator`] - login/password `signIn` with a cached bearer token
//! - [`BearerTokenAuthenticator`] - caller-supplied bearer token

mod api_key;
mod bearer;
mod iam;
mod local;
mod token;

pub use api_key::{API_KEY_HEADER, ApiKeyAuthenticator};
pub use bearer::BearerTokenAuthenticator;
pub use iam::{DEFAULT_IAM_URL, IamAuthenticator, IamToken, IamTokenClient, IamTokenProvider};
pub use local::{EXPIRY_MARGIN, LocalAuthenticator, MAX_TOKEN_AGE};
pub use token::expiration_from_jwt;

use async_trait::async_trait;
use http::HeaderValue;
use http::header::InvalidHeaderValue;
use reqwest::Request;
use thiserror::Error;

use crate::{BoxError, ClientError};

/// Authentication errors.
#[derive(Debug, Error)]
pub enum AuthError {
    /// The strategy was constructed with unusable settings.
    #[error("Invalid authentication configuration: {0}")]
    Config(String),

    /// Sign-in succeeded at the transport level but returned no token.
    #[error("Sign-in for {login} at {url} returned no token")]
    SignInFailed {
        /// Login that was used.
        login: String,
        /// Endpoint the sign-in was sent to.
        url: String,
    },

    /// The sign-in request itself failed.
    #[error("Sign-in request failed: {0}")]
    SignIn(#[source] Box<ClientError>),

    /// The IAM token service rejected the exchange.
    #[error("IAM token request failed: {0}")]
    Iam(String),

    /// The IAM token service could not be reached.
    #[error("IAM token request could not be sent: {0}")]
    IamTransport(#[source] BoxError),

    /// The credential cannot be carried in an HTTP header.
    #[error("Invalid credential header value: {0}")]
    InvalidHeader(#[from] InvalidHeaderValue),
}

/// Attaches credentials to an outgoing request.
#[async_trait]
pub trait Authenticator: Send + Sync {
    /// Add whatever credential header this strategy uses to `request`.
    async fn authenticate(&self, request: &mut Request) -> Result<(), AuthError>;
}

/// Build a sensitive `Bearer <token>` header value.
pub(crate) fn bearer_header(token: &str) -> Result<HeaderValue, InvalidHeaderValue> {
    let mut value = HeaderValue::from_str(&format!("Bearer {token}"))?;
    value.set_sensitive(true);
    Ok(value)
}

pub(crate) fn require(value: &str, what: &str) -> Result<(), AuthError> {
    if value.trim().is_empty() {
        return Err(AuthError::Config(format!("{what} must not be empty")));
    }
    Ok(())
}
