//! IBM Cloud IAM bearer token authentication.

use std::sync::Arc;

use async_trait::async_trait;
use chrono::Utc;
use http::header::{ACCEPT, AUTHORIZATION, CONTENT_TYPE};
use http::{HeaderValue, Method};
use reqwest::Request;
use serde::Deserialize;
use tokio::sync::Mutex;
use tracing::{debug, info};
use url::Url;

use super::{AuthError, Authenticator, bearer_header, require};
use crate::web::HttpExecutor;

/// IBM Cloud IAM token endpoint.
pub const DEFAULT_IAM_URL: &str = "https://iam.cloud.ibm.com/identity/token";

const APIKEY_GRANT_TYPE: &str = "urn:ibm:params:oauth:grant-type:apikey";

/// Seconds before `expiration` at which a cached IAM token is replaced.
const REFRESH_MARGIN_SECS: i64 = 60;

/// Token returned by the IAM token service.
#[derive(Debug, Clone, Deserialize)]
pub struct IamToken {
    /// Bearer token for the config service.
    pub access_token: String,
    /// Token type, normally `Bearer`.
    #[serde(default)]
    pub token_type: Option<String>,
    /// Lifetime in seconds.
    #[serde(default)]
    pub expires_in: Option<i64>,
    /// Expiration as Unix seconds.
    #[serde(default)]
    pub expiration: Option<i64>,
}

impl IamToken {
    fn expires_at(&self, issued_at: i64) -> Option<i64> {
        self.expiration
            .or_else(|| self.expires_in.map(|secs| issued_at.saturating_add(secs)))
    }
}

/// Exchanges an API key for an IAM token.
#[async_trait]
pub trait IamTokenProvider: Send + Sync {
    /// Request a fresh token for `api_key`.
    async fn request_token(&self, api_key: &str) -> Result<IamToken, AuthError>;
}

/// [`IamTokenProvider`] talking to the IAM token endpoint over HTTP.
#[derive(Clone)]
pub struct IamTokenClient {
    url: Url,
    http: Arc<dyn HttpExecutor>,
}

impl IamTokenClient {
    /// Create a client for `url` (usually [`DEFAULT_IAM_URL`]).
    pub fn new(url: &str, http: Arc<dyn HttpExecutor>) -> Result<Self, AuthError> {
        let url = Url::parse(url).map_err(|e| AuthError::Config(format!("invalid IAM URL: {e}")))?;
        Ok(Self { url, http })
    }
}

#[async_trait]
impl IamTokenProvider for IamTokenClient {
    async fn request_token(&self, api_key: &str) -> Result<IamToken, AuthError> {
        let form = serde_urlencoded::to_string([
            ("grant_type", APIKEY_GRANT_TYPE),
            ("apikey", api_key),
        ])
        .map_err(|e| AuthError::Iam(e.to_string()))?;

        let mut request = Request::new(Method::POST, self.url.clone());
        let headers = request.headers_mut();
        headers.insert(
            CONTENT_TYPE,
            HeaderValue::from_static("application/x-www-form-urlencoded"),
        );
        headers.insert(ACCEPT, HeaderValue::from_static("application/json"));
        *request.body_mut() = Some(form.into());

        debug!(url = %self.url, "Requesting IAM token");
        let response = self
            .http
            .execute(request)
            .await
            .map_err(AuthError::IamTransport)?;
        let status = response.status();
        let body = response
            .bytes()
            .await
            .map_err(|e| AuthError::IamTransport(e.into()))?;

        if !status.is_success() {
            return Err(AuthError::Iam(format!(
                "status {status}: {}",
                String::from_utf8_lossy(&body)
            )));
        }
        serde_json::from_slice(&body).map_err(|e| AuthError::Iam(format!("invalid token response: {e}")))
    }
}

#[derive(Debug)]
struct CachedIamToken {
    value: String,
    expires_at: Option<i64>,
}

impl CachedIamToken {
    fn is_usable(&self, now: i64) -> bool {
        self.expires_at
            .is_some_and(|expires_at| expires_at.saturating_sub(now) > REFRESH_MARGIN_SECS)
    }
}

/// Adds an IAM bearer token exchanged from an IBM Cloud API key.
///
/// Tokens are cached until shortly before their expiration.
pub struct IamAuthenticator {
    api_key: String,
    provider: Arc<dyn IamTokenProvider>,
    token: Mutex<Option<CachedIamToken>>,
}

impl IamAuthenticator {
    /// Create the authenticator using the public IAM endpoint.
    pub fn new(api_key: impl Into<String>) -> Result<Self, AuthError> {
        let http: Arc<dyn HttpExecutor> = Arc::new(reqwest::Client::new());
        let provider = IamTokenClient::new(DEFAULT_IAM_URL, http)?;
        Self::with_provider(api_key, Arc::new(provider))
    }

    /// Create the authenticator with a custom token provider.
    pub fn with_provider(
        api_key: impl Into<String>,
        provider: Arc<dyn IamTokenProvider>,
    ) -> Result<Self, AuthError> {
        let api_key = api_key.into();
        require(&api_key, "IAM API key")?;
        Ok(Self {
            api_key,
            provider,
            token: Mutex::new(None),
        })
    }
}

#[async_trait]
impl Authenticator for IamAuthenticator {
    async fn authenticate(&self, request: &mut Request) -> Result<(), AuthError> {
        let mut cached = self.token.lock().await;
        let now = Utc::now().timestamp();

        let token = match cached.take() {
            Some(token) if token.is_usable(now) => token,
            _ => {
                info!("Exchanging API key for IAM token");
                let fresh = self.provider.request_token(&self.api_key).await?;
                CachedIamToken {
                    expires_at: fresh.expires_at(now),
                    value: fresh.access_token,
                }
            }
        };

        let header = bearer_header(&token.value)?;
        *cached = Some(token);
        request.headers_mut().insert(AUTHORIZATION, header);
        Ok(())
    }
}
