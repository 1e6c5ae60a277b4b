//! Satcon client error types.

use thiserror::Error;

use crate::auth::AuthError;
use crate::web::{BuildError, GraphQLResponseError};

/// Boxed error returned by an [`HttpExecutor`](crate::HttpExecutor).
pub type BoxError = Box<dyn std::error::Error + Send + Sync + 'static>;

/// Result type for satcon client operations.
pub type Result<T> = std::result::Result<T, ClientError>;

/// Satcon client errors.
#[derive(Debug, Error)]
pub enum ClientError {
    /// Invalid client configuration (empty endpoint, bad URL).
    #[error("Configuration error: {0}")]
    Config(String),

    /// The request body could not be rendered.
    #[error("Failed to build request body: {0}")]
    Build(#[from] BuildError),

    /// The authentication strategy failed to decorate the request.
    #[error("Authentication error: {0}")]
    Auth(#[from] AuthError),

    /// The outgoing HTTP request could not be assembled.
    #[error("Invalid request: {0}")]
    InvalidRequest(String),

    /// The HTTP executor failed. The executor's error is kept as-is.
    #[error("Transport error: {0}")]
    Transport(#[source] BoxError),

    /// The response body could not be read.
    #[error("Failed to read response body: {0}")]
    BodyRead(#[source] reqwest::Error),

    /// The response body was not the expected JSON.
    #[error("Failed to deserialize response: {0}")]
    Deserialize(#[from] serde_json::Error),

    /// The server answered with GraphQL errors and no data.
    #[error("GraphQL errors: {}", format_errors(.0))]
    GraphQL(Vec<GraphQLResponseError>),
}

impl ClientError {
    /// Check if this error came from the HTTP executor.
    pub fn is_transport_error(&self) -> bool {
        matches!(self, Self::Transport(_) | Self::BodyRead(_))
    }

    /// Check if this error happened while building the request body.
    pub fn is_build_error(&self) -> bool {
        matches!(self, Self::Build(_))
    }

    /// Get the executor's error if this is a transport error.
    pub fn transport_source(&self) -> Option<&(dyn std::error::Error + Send + Sync + 'static)> {
        match self {
            Self::Transport(err) => Some(err.as_ref()),
            _ => None,
        }
    }

    /// Get GraphQL errors if this is a GraphQL error.
    pub fn graphql_errors(&self) -> Option<&[GraphQLResponseError]> {
        match self {
            Self::GraphQL(errors) => Some(errors),
            _ => None,
        }
    }
}

fn format_errors(errors: &[GraphQLResponseError]) -> String {
    errors
        .iter()
        .map(ToString::to_string)
        .collect::<Vec<_>>()
        .join("; ")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[derive(Debug, Error)]
    #[error("connection reset")]
    struct Reset;

    #[test]
    fn test_transport_source_is_preserved() {
        let err = ClientError::Transport(Box::new(Reset));
        assert!(err.is_transport_error());
        let source = err.transport_source().unwrap();
        assert!(source.downcast_ref::<Reset>().is_some());
        assert_eq!(err.to_string(), "Transport error: connection reset");
    }

    #[test]
    fn test_build_error_kind() {
        let err = ClientError::from(BuildError::UnboundArgument("orgId".into()));
        assert!(err.is_build_error());
        assert!(!err.is_transport_error());
        assert!(!ClientError::Config("empty".into()).is_build_error());
    }

    #[test]
    fn test_graphql_error_display() {
        let err = ClientError::GraphQL(vec![
            GraphQLResponseError::new("first"),
            GraphQLResponseError::new("second"),
        ]);
        assert_eq!(err.to_string(), "GraphQL errors: first; second");
        assert_eq!(err.graphql_errors().map(<[_]>::len), Some(2));
    }
}
