//! Local username/password authentication.

use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;
use chrono::Utc;
use http::header::AUTHORIZATION;
use reqwest::Request;
use tokio::sync::Mutex;
use tokio::time::Instant;
use tracing::{debug, info};

use super::{AuthError, Authenticator, bearer_header, expiration_from_jwt, require};
use crate::actions::users::Users;
use crate::web::HttpExecutor;

/// A token expiring within this window is replaced before use.
pub const EXPIRY_MARGIN: Duration = Duration::from_secs(5 * 60);

/// A token older than this is replaced regardless of its `exp` claim.
pub const MAX_TOKEN_AGE: Duration = Duration::from_secs(40 * 60);

#[derive(Debug)]
struct CachedToken {
    value: String,
    fetched_at: Instant,
    expires_at: Option<Instant>,
}

impl CachedToken {
    fn new(value: String, now: Instant) -> Self {
        // A past `exp` expires now; one beyond the clock's range leaves only the age limit.
        let expires_at = expiration_from_jwt(&value).and_then(|exp| {
            let remaining = exp.saturating_sub(Utc::now().timestamp());
            now.checked_add(Duration::from_secs(u64::try_from(remaining).unwrap_or(0)))
        });
        Self {
            value,
            fetched_at: now,
            expires_at,
        }
    }

    fn is_fresh(&self, now: Instant) -> bool {
        let expiring = self
            .expires_at
            .is_some_and(|at| at.saturating_duration_since(now) < EXPIRY_MARGIN);
        !expiring && now.saturating_duration_since(self.fetched_at) < MAX_TOKEN_AGE
    }
}

/// Signs in with a login and password and attaches the returned token.
///
/// The token is reused until it is within [`EXPIRY_MARGIN`] of its `exp`
/// claim or older than [`MAX_TOKEN_AGE`]. The check and the sign-in run under
/// one lock, so concurrent requests share a single refresh.
pub struct LocalAuthenticator {
    login: String,
    password: String,
    url: String,
    users: Users,
    token: Mutex<Option<CachedToken>>,
}

impl LocalAuthenticator {
    /// Create the authenticator for the service at `url`.
    ///
    /// `http` defaults to a plain `reqwest::Client`.
    pub fn new(
        url: impl Into<String>,
        login: impl Into<String>,
        password: impl Into<String>,
        http: Option<Arc<dyn HttpExecutor>>,
    ) -> Result<Self, AuthError> {
        let (url, login, password) = (url.into(), login.into(), password.into());
        require(&url, "URL")?;
        require(&login, "login")?;
        require(&password, "password")?;

        let users = Users::new(&url, http, None).map_err(|e| AuthError::Config(e.to_string()))?;
        Ok(Self {
            login,
            password,
            url,
            users,
            token: Mutex::new(None),
        })
    }

    async fn sign_in(&self) -> Result<String, AuthError> {
        info!(login = %self.login, url = %self.url, "Signing in for a new token");
        let response = self
            .users
            .sign_in(&self.login, &self.password)
            .await
            .map_err(|e| AuthError::SignIn(Box::new(e)))?;

        response
            .and_then(|r| r.token)
            .filter(|token| !token.is_empty())
            .ok_or_else(|| AuthError::SignInFailed {
                login: self.login.clone(),
                url: self.url.clone(),
            })
    }
}

impl std::fmt::Debug for LocalAuthenticator {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("LocalAuthenticator")
            .field("login", &self.login)
            .field("url", &self.url)
            .finish_non_exhaustive()
    }
}

#[async_trait]
impl Authenticator for LocalAuthenticator {
    async fn authenticate(&self, request: &mut Request) -> Result<(), AuthError> {
        let mut cached = self.token.lock().await;

        let token = match cached.take() {
            Some(token) if token.is_fresh(Instant::now()) => token,
            _ => {
                let value = self.sign_in().await?;
                let token = CachedToken::new(value, Instant::now());
                debug!(expires_at = ?token.expires_at, "Cached new local token");
                token
            }
        };

        let header = bearer_header(&token.value)?;
        *cached = Some(token);
        request.headers_mut().insert(AUTHORIZATION, header);
        Ok(())
    }
}
