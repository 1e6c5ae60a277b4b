//! HTTP transport for rendered GraphQL requests.

use async_trait::async_trait;
use http::header::{AUTHORIZATION, CONTENT_TYPE};
use http::{HeaderValue, Method};
use reqwest::{Request, Response};
use serde::Serialize;
use serde::de::DeserializeOwned;
use tracing::debug;
use url::Url;

use crate::auth::{Authenticator, bearer_header};
use crate::web::query::{ExtraHelpers, build_request_body};
use crate::web::response::GraphQLResponse;
use crate::{BoxError, ClientError, Result};

/// Anything that can perform one HTTP round trip.
///
/// `reqwest::Client` implements this; tests substitute their own executor.
/// Timeouts and connection reuse are the executor's business.
#[async_trait]
pub trait HttpExecutor: Send + Sync {
    /// Send the request and return the response.
    async fn execute(&self, request: Request) -> std::result::Result<Response, BoxError>;
}

#[async_trait]
impl HttpExecutor for reqwest::Client {
    async fn execute(&self, request: Request) -> std::result::Result<Response, BoxError> {
        reqwest::Client::execute(self, request)
            .await
            .map_err(Into::into)
    }
}

/// Render, authenticate and send a request, then decode the envelope.
pub async fn do_query<T, V>(
    executor: &dyn HttpExecutor,
    endpoint: &Url,
    auth: Option<&dyn Authenticator>,
    template: &str,
    variables: &V,
    helpers: Option<ExtraHelpers>,
) -> Result<GraphQLResponse<T>>
where
    T: DeserializeOwned,
    V: Serialize + Sync + ?Sized,
{
    let mut request = prepare_request(endpoint, template, variables, helpers)?;
    if let Some(auth) = auth {
        auth.authenticate(&mut request).await?;
    }
    send(executor, request).await
}

/// Like [`do_query`], attaching `token` as a bearer credential.
pub async fn do_query_with_token<T, V>(
    executor: &dyn HttpExecutor,
    endpoint: &Url,
    token: &str,
    template: &str,
    variables: &V,
    helpers: Option<ExtraHelpers>,
) -> Result<GraphQLResponse<T>>
where
    T: DeserializeOwned,
    V: Serialize + Sync + ?Sized,
{
    let mut request = prepare_request(endpoint, template, variables, helpers)?;
    let value = bearer_header(token).map_err(|e| ClientError::InvalidRequest(e.to_string()))?;
    request.headers_mut().insert(AUTHORIZATION, value);
    send(executor, request).await
}

fn prepare_request<V>(
    endpoint: &Url,
    template: &str,
    variables: &V,
    helpers: Option<ExtraHelpers>,
) -> Result<Request>
where
    V: Serialize + ?Sized,
{
    let body = build_request_body(template, variables, helpers)?;

    let mut request = Request::new(Method::POST, endpoint.clone());
    request
        .headers_mut()
        .insert(CONTENT_TYPE, HeaderValue::from_static("application/json"));
    *request.body_mut() = Some(body.into());
    Ok(request)
}

async fn send<T: DeserializeOwned>(
    executor: &dyn HttpExecutor,
    request: Request,
) -> Result<GraphQLResponse<T>> {
    debug!(url = %request.url(), "Executing GraphQL request");

    let response = executor
        .execute(request)
        .await
        .map_err(ClientError::Transport)?;
    let status = response.status();
    let body = response.bytes().await.map_err(ClientError::BodyRead)?;

    debug!(%status, bytes = body.len(), "Received GraphQL response");

    if body.is_empty() {
        return Ok(GraphQLResponse::default());
    }
    Ok(serde_json::from_slice(&body)?)
}
