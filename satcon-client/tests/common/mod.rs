//! Shared helpers for satcon-client integration tests.

#![allow(dead_code)]

use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use base64::Engine;
use base64::engine::general_purpose::URL_SAFE_NO_PAD;
use http::HeaderMap;
use reqwest::{Request, Response};
use satcon_client::{BoxError, HttpExecutor};
use serde_json::Value;

/// Error returned by a failing [`StubExecutor`].
#[derive(Debug, PartialEq, Eq, thiserror::Error)]
#[error("stub transport failure: {0}")]
pub struct StubError(pub String);

/// A request as seen by the executor.
#[derive(Debug, Clone)]
pub struct RecordedRequest {
    pub headers: HeaderMap,
    pub body: Value,
}

impl RecordedRequest {
    pub fn operation(&self) -> &str {
        self.body["query"].as_str().unwrap_or_default()
    }
}

type Responder = Box<dyn Fn(&Value) -> Result<String, StubError> + Send + Sync>;

/// Executor that records every request and answers from a closure.
pub struct StubExecutor {
    responder: Responder,
    requests: Mutex<Vec<RecordedRequest>>,
}

impl StubExecutor {
    pub fn new<F>(responder: F) -> Arc<Self>
    where
        F: Fn(&Value) -> Result<String, StubError> + Send + Sync + 'static,
    {
        Arc::new(Self {
            responder: Box::new(responder),
            requests: Mutex::new(Vec::new()),
        })
    }

    /// Answer every request with `body`.
    pub fn json(body: Value) -> Arc<Self> {
        let body = body.to_string();
        Self::new(move |_| Ok(body.clone()))
    }

    /// Answer every request with an empty body.
    pub fn empty() -> Arc<Self> {
        Self::new(|_| Ok(String::new()))
    }

    /// Fail every request.
    pub fn failing(message: &str) -> Arc<Self> {
        let message = message.to_string();
        Self::new(move |_| Err(StubError(message.clone())))
    }

    pub fn requests(&self) -> Vec<RecordedRequest> {
        self.requests.lock().unwrap().clone()
    }

    pub fn calls(&self) -> usize {
        self.requests.lock().unwrap().len()
    }

    /// Number of requests whose query invokes `operation`.
    pub fn calls_to(&self, operation: &str) -> usize {
        let needle = format!("{{ {operation}");
        self.requests
            .lock()
            .unwrap()
            .iter()
            .filter(|r| r.operation().contains(&needle))
            .count()
    }

    pub fn last(&self) -> RecordedRequest {
        self.requests.lock().unwrap().last().cloned().unwrap()
    }

    pub fn as_executor(self: &Arc<Self>) -> Arc<dyn HttpExecutor> {
        self.clone()
    }
}

#[async_trait]
impl HttpExecutor for StubExecutor {
    async fn execute(&self, request: Request) -> Result<Response, BoxError> {
        let bytes = request.body().and_then(|b| b.as_bytes()).unwrap_or_default();
        let body: Value = serde_json::from_slice(bytes)?;
        let answer = (self.responder)(&body);
        self.requests.lock().unwrap().push(RecordedRequest {
            headers: request.headers().clone(),
            body,
        });

        let response = http::Response::builder().status(200).body(answer?)?;
        Ok(Response::from(response))
    }
}

/// Unsigned JWT whose payload carries `exp`.
pub fn jwt_with_exp(exp: Option<i64>) -> String {
    let header = URL_SAFE_NO_PAD.encode(br#"{"alg":"HS256","typ":"JWT"}"#);
    let claims = match exp {
        Some(exp) => serde_json::json!({"sub": "admin", "exp": exp}),
        None => serde_json::json!({"sub": "admin"}),
    };
    let payload = URL_SAFE_NO_PAD.encode(claims.to_string());
    format!("{header}.{payload}.signature")
}

pub const ENDPOINT: &str = "http://localhost:3333/graphql";
