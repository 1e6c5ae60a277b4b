//! Static API key authentication.

use async_trait::async_trait;
use http::{HeaderName, HeaderValue};
use reqwest::Request;

use super::{AuthError, Authenticator, require};

/// Header carrying the API key.
pub const API_KEY_HEADER: &str = "x-api-key";

/// Adds `x-api-key: <key>` to every request.
#[derive(Clone)]
pub struct ApiKeyAuthenticator {
    value: HeaderValue,
}

impl ApiKeyAuthenticator {
    /// Create the authenticator. An empty key is rejected.
    pub fn new(api_key: impl AsRef<str>) -> Result<Self, AuthError> {
        let api_key = api_key.as_ref();
        require(api_key, "API key")?;
        let mut value = HeaderValue::from_str(api_key)?;
        value.set_sensitive(true);
        Ok(Self { value })
    }
}

impl std::fmt::Debug for ApiKeyAuthenticator {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ApiKeyAuthenticator")
            .field("value", &"<redacted>")
            .finish()
    }
}

#[async_trait]
impl Authenticator for ApiKeyAuthenticator {
    async fn authenticate(&self, request: &mut Request) -> Result<(), AuthError> {
        request
            .headers_mut()
            .insert(HeaderName::from_static(API_KEY_HEADER), self.value.clone());
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use http::Method;

    fn request() -> Request {
        Request::new(Method::POST, "http://localhost/graphql".parse().unwrap())
    }

    #[tokio::test]
    async fn test_adds_header() {
        let auth = ApiKeyAuthenticator::new("secret-key").unwrap();
        let mut req = request();
        auth.authenticate(&mut req).await.unwrap();
        assert_eq!(req.headers()[API_KEY_HEADER], "secret-key");
        assert!(req.headers().get(http::header::AUTHORIZATION).is_none());
    }

    #[test]
    fn test_empty_key_rejected() {
        assert!(matches!(
            ApiKeyAuthenticator::new(""),
            Err(AuthError::Config(_))
        ));
    }

    #[test]
    fn test_debug_redacts_key() {
        let auth = ApiKeyAuthenticator::new("secret-key").unwrap();
        assert!(!format!("{auth:?}").contains("secret-key"));
    }
}
