//! GraphQL response envelope.

use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use tracing::warn;

use crate::{ClientError, Result};

/// GraphQL response from the server.
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct GraphQLResponse<T = Map<String, Value>> {
    /// The data returned by the query/mutation.
    pub data: Option<T>,
    /// Errors returned by the server.
    #[serde(default)]
    pub errors: Option<Vec<GraphQLResponseError>>,
}

impl<T> Default for GraphQLResponse<T> {
    fn default() -> Self {
        Self {
            data: None,
            errors: None,
        }
    }
}

impl<T> GraphQLResponse<T> {
    /// Check if the response has errors.
    pub fn has_errors(&self) -> bool {
        self.errors.as_ref().is_some_and(|e| !e.is_empty())
    }
}

impl GraphQLResponse<Map<String, Value>> {
    /// Take the payload of `operation` out of the `data` object.
    ///
    /// A missing `data` object or a missing/null operation field is `Ok(None)`.
    /// GraphQL errors only fail the call when no payload came back.
    pub fn into_operation<T: DeserializeOwned>(self, operation: &str) -> Result<Option<T>> {
        let has_errors = self.has_errors();
        let payload = self
            .data
            .and_then(|mut data| data.remove(operation))
            .filter(|value| !value.is_null());

        match payload {
            Some(value) => {
                if has_errors {
                    warn!(
                        operation,
                        errors = ?self.errors,
                        "GraphQL response carried errors alongside data"
                    );
                }
                Ok(Some(serde_json::from_value(value)?))
            }
            None => match self.errors {
                Some(errors) if !errors.is_empty() => Err(ClientError::GraphQL(errors)),
                _ => Ok(None),
            },
        }
    }
}

/// A GraphQL error from the server.
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct GraphQLResponseError {
    /// Error message.
    pub message: String,
    /// Locations in the query where the error occurred.
    #[serde(default)]
    pub locations: Option<Vec<ErrorLocation>>,
    /// Path to the field that caused the error.
    #[serde(default)]
    pub path: Option<Vec<Value>>,
    /// Additional error extensions.
    #[serde(default)]
    pub extensions: Option<Value>,
}

impl GraphQLResponseError {
    /// Create an error carrying only a message.
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
            locations: None,
            path: None,
            extensions: None,
        }
    }
}

impl std::fmt::Display for GraphQLResponseError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.message)?;
        if let Some(locations) = &self.locations
            && !locations.is_empty()
        {
            write!(f, " at ")?;
            for (i, loc) in locations.iter().enumerate() {
                if i > 0 {
                    write!(f, ", ")?;
                }
                write!(f, "{}:{}", loc.line, loc.column)?;
            }
        }
        Ok(())
    }
}

/// Location in the GraphQL query.
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct ErrorLocation {
    /// Line number (1-indexed).
    pub line: u32,
    /// Column number (1-indexed).
    pub column: u32,
}
