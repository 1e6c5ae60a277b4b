//! Local sign-in token caching, driven by a paused tokio clock.

mod common;

use std::sync::Arc;
use std::time::Duration;

use chrono::Utc;
use common::{ENDPOINT, StubExecutor, jwt_with_exp};
use http::header::AUTHORIZATION;
use satcon_client::auth::MAX_TOKEN_AGE;
use satcon_client::*;
use serde_json::{Value, json};

const MINUTE: Duration = Duration::from_secs(60);

/// Executor that signs in with `token` and answers `me` for everything else.
fn service(token: String) -> Arc<StubExecutor> {
    StubExecutor::new(move |body: &Value| {
        let query = body["query"].as_str().unwrap_or_default();
        let reply = if query.contains("{ signIn") {
            json!({"data": {"signIn": {"token": token}}})
        } else {
            json!({"data": {"me": {"id": "u-1", "email": "admin@example.com"}}})
        };
        Ok(reply.to_string())
    })
}

fn client(executor: &Arc<StubExecutor>) -> Client {
    let auth = LocalAuthenticator::new(ENDPOINT, "admin", "secret", Some(executor.as_executor()))
        .unwrap();
    Client::new(ENDPOINT, Some(executor.as_executor()), Some(Arc::new(auth))).unwrap()
}

#[tokio::test(start_paused = true)]
async fn test_refresh_near_expiry() {
    let token = jwt_with_exp(Some(Utc::now().timestamp() + 30 * 60));
    let executor = service(token.clone());
    let users = client(&executor).users();

    users.me().await.unwrap();
    assert_eq!(executor.calls_to("signIn"), 1);
    assert_eq!(
        executor.last().headers[AUTHORIZATION],
        format!("Bearer {token}").as_str()
    );

    tokio::time::advance(24 * MINUTE).await;
    users.me().await.unwrap();
    assert_eq!(executor.calls_to("signIn"), 1);

    tokio::time::advance(2 * MINUTE).await;
    users.me().await.unwrap();
    assert_eq!(executor.calls_to("signIn"), 2);
    assert_eq!(executor.calls_to("me"), 3);
}

#[tokio::test(start_paused = true)]
async fn test_refresh_after_max_age() {
    let executor = service(jwt_with_exp(None));
    let users = client(&executor).users();

    users.me().await.unwrap();
    tokio::time::advance(39 * MINUTE).await;
    users.me().await.unwrap();
    assert_eq!(executor.calls_to("signIn"), 1);

    tokio::time::advance(MINUTE).await;
    users.me().await.unwrap();
    assert_eq!(executor.calls_to("signIn"), 2);
}

#[tokio::test(start_paused = true)]
async fn test_long_lived_token_still_expires_by_age() {
    let executor = service(jwt_with_exp(Some(Utc::now().timestamp() + 24 * 3600)));
    let users = client(&executor).users();

    users.me().await.unwrap();
    tokio::time::advance(MAX_TOKEN_AGE).await;
    users.me().await.unwrap();
    assert_eq!(executor.calls_to("signIn"), 2);
}

#[tokio::test]
async fn test_concurrent_callers_share_one_sign_in() {
    let executor = service(jwt_with_exp(None));
    let client = client(&executor);

    let calls = (0..8).map(|_| {
        let users = client.users();
        tokio::spawn(async move { users.me().await })
    });
    for handle in calls.collect::<Vec<_>>() {
        handle.await.unwrap().unwrap();
    }

    assert_eq!(executor.calls_to("signIn"), 1);
    assert_eq!(executor.calls_to("me"), 8);
}

#[tokio::test(start_paused = true)]
async fn test_out_of_range_exp_claims() {
    let executor = service(jwt_with_exp(Some(i64::MIN)));
    let users = client(&executor).users();
    users.me().await.unwrap();
    users.me().await.unwrap();
    assert_eq!(executor.calls_to("signIn"), 2);

    let executor = service(jwt_with_exp(Some(i64::MAX)));
    let users = client(&executor).users();
    users.me().await.unwrap();
    tokio::time::advance(39 * MINUTE).await;
    users.me().await.unwrap();
    assert_eq!(executor.calls_to("signIn"), 1);
    tokio::time::advance(MINUTE).await;
    users.me().await.unwrap();
    assert_eq!(executor.calls_to("signIn"), 2);
}

async fn assert_sign_in_failed(reply: Value) {
    let executor = StubExecutor::json(reply);
    let err = client(&executor).users().me().await.unwrap_err();

    match err {
        ClientError::Auth(AuthError::SignInFailed { login, url }) => {
            assert_eq!(login, "admin");
            assert_eq!(url, ENDPOINT);
        }
        other => panic!("unexpected error: {other:?}"),
    }
    assert_eq!(executor.calls(), 1);
}

#[tokio::test]
async fn test_sign_in_without_result_fails() {
    assert_sign_in_failed(json!({"data": {"signIn": null}})).await;
}

#[tokio::test]
async fn test_sign_in_with_null_token_fails() {
    assert_sign_in_failed(json!({"data": {"signIn": {"token": null}}})).await;
}

#[tokio::test]
async fn test_sign_in_with_missing_token_fails() {
    assert_sign_in_failed(json!({"data": {"signIn": {}}})).await;
}

#[tokio::test]
async fn test_sign_in_with_empty_token_fails() {
    assert_sign_in_failed(json!({"data": {"signIn": {"token": ""}}})).await;
}

#[tokio::test]
async fn test_sign_in_transport_failure() {
    let executor = StubExecutor::failing("refused");
    let err = client(&executor).users().me().await.unwrap_err();
    assert!(matches!(err, ClientError::Auth(AuthError::SignIn(_))));
}
