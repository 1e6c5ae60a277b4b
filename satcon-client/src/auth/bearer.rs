//! Static bearer token authentication.

use async_trait::async_trait;
use http::HeaderValue;
use http::header::AUTHORIZATION;
use reqwest::Request;

use super::{AuthError, Authenticator, bearer_header, require};

/// Adds `Authorization: Bearer <token>` using a token obtained elsewhere.
#[derive(Clone)]
pub struct BearerTokenAuthenticator {
    value: HeaderValue,
}

impl BearerTokenAuthenticator {
    /// Create the authenticator. An empty token is rejected.
    pub fn new(token: impl AsRef<str>) -> Result<Self, AuthError> {
        let token = token.as_ref();
        require(token, "token")?;
        Ok(Self {
            value: bearer_header(token)?,
        })
    }
}

impl std::fmt::Debug for BearerTokenAuthenticator {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("BearerTokenAuthenticator").finish_non_exhaustive()
    }
}

#[async_trait]
impl Authenticator for BearerTokenAuthenticator {
    async fn authenticate(&self, request: &mut Request) -> Result<(), AuthError> {
        request
            .headers_mut()
            .insert(AUTHORIZATION, self.value.clone());
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use http::Method;

    #[test]
    fn test_adds_bearer() {
        let auth = BearerTokenAuthenticator::new("tok").unwrap();
        let mut req = Request::new(Method::POST, "http://localhost/graphql".parse().unwrap());
        tokio_test::block_on(auth.authenticate(&mut req)).unwrap();
        assert_eq!(req.headers()[AUTHORIZATION], "Bearer tok");
    }

    #[test]
    fn test_empty_token_rejected() {
        assert!(BearerTokenAuthenticator::new("").is_err());
    }
}
