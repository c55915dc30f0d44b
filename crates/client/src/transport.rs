//! HTTP transport shared by every endpoint facade.
//!
//! [`ApiClient`] owns the base address and the middleware pipeline. Each
//! call builds exactly one request, runs the `before` hooks, hands it to an
//! [`HttpSend`] implementation, runs the `after` hooks on the status, and
//! decodes a successful body into the expected type. Nothing is retried.

use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;
use reqwest::header::{HeaderValue, ACCEPT, CONTENT_TYPE};
use reqwest::{Client, Method, Request, StatusCode, Url};
use serde::de::DeserializeOwned;
use serde::Serialize;
use tracing::debug;

use common::{AppError, AppResult, FieldErrors};
use domain::API_PREFIX;

use crate::config::ClientConfig;
use crate::middleware::{BearerAuth, LoginRedirect, Middleware, UnauthorizedRedirect};
use crate::session::Session;

#[cfg(any(test, feature = "test-utils"))]
use mockall::automock;

/// Status and raw body of a response.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RawResponse {
    pub status: StatusCode,
    pub body: Vec<u8>,
}

impl RawResponse {
    pub fn new(status: StatusCode, body: impl Into<Vec<u8>>) -> Self {
        Self {
            status,
            body: body.into(),
        }
    }

    /// Response carrying a JSON body
    pub fn json(status: StatusCode, value: &serde_json::Value) -> Self {
        Self::new(status, value.to_string())
    }
}

/// Sends a fully built request and returns its response.
#[cfg_attr(any(test, feature = "test-utils"), automock)]
#[async_trait]
pub trait HttpSend: Send + Sync {
    async fn send(&self, request: Request) -> AppResult<RawResponse>;
}

/// [`HttpSend`] backed by a reqwest connection pool.
#[derive(Debug, Clone)]
pub struct ReqwestSender {
    client: Client,
}

impl ReqwestSender {
    pub fn new(timeout: Duration) -> AppResult<Self> {
        let client = Client::builder()
            .timeout(timeout)
            .build()
            .map_err(|e| AppError::config(format!("Failed to create HTTP client: {}", e)))?;

        Ok(Self { client })
    }
}

#[async_trait]
impl HttpSend for ReqwestSender {
    async fn send(&self, request: Request) -> AppResult<RawResponse> {
        let response = self.client.execute(request).await?;
        let status = response.status();
        let body = response.bytes().await?.to_vec();
        Ok(RawResponse { status, body })
    }
}

/// Percent-encode a value used as a single path segment.
pub fn segment(value: &str) -> String {
    urlencoding::encode(value).into_owned()
}

/// `.` and `..` in any spelling URL parsing treats as one (`%2e`, `.%2E`, ...)
fn is_dot_segment(segment: &str) -> bool {
    let decoded = segment.to_ascii_lowercase().replace("%2e", ".");
    decoded == "." || decoded == ".."
}

/// Shared HTTP client for the finance service.
pub struct ApiClient {
    base_url: String,
    sender: Arc<dyn HttpSend>,
    middleware: Vec<Arc<dyn Middleware>>,
}

impl ApiClient {
    /// Create a client without middleware.
    pub fn new(base_url: &str, sender: Arc<dyn HttpSend>) -> AppResult<Self> {
        let parsed = Url::parse(base_url)
            .map_err(|e| AppError::config(format!("Invalid API URL '{}': {}", base_url, e)))?;
        if parsed.cannot_be_a_base() {
            return Err(AppError::config(format!("Invalid API URL '{}'", base_url)));
        }

        Ok(Self {
            base_url: base_url.trim_end_matches('/').to_string(),
            sender,
            middleware: Vec::new(),
        })
    }

    /// Create a client with the standard pipeline: bearer injection, then
    /// session clearing and login redirect on 401.
    pub fn from_config(
        config: &ClientConfig,
        session: Session,
        redirect: Arc<dyn LoginRedirect>,
    ) -> AppResult<Self> {
        let sender = Arc::new(ReqwestSender::new(config.timeout())?);
        Ok(Self::new(&config.api_url, sender)?.with_standard_middleware(
            session,
            redirect,
            &config.login_path,
        ))
    }

    /// Install the bearer and 401 hooks on an existing client.
    pub fn with_standard_middleware(
        self,
        session: Session,
        redirect: Arc<dyn LoginRedirect>,
        login_path: &str,
    ) -> Self {
        self.with_middleware(Arc::new(BearerAuth::new(session.clone())))
            .with_middleware(Arc::new(UnauthorizedRedirect::new(
                session, redirect, login_path,
            )))
    }

    /// Append a middleware to the pipeline.
    pub fn with_middleware(mut self, middleware: Arc<dyn Middleware>) -> Self {
        self.middleware.push(middleware);
        self
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// Absolute URL for an API path such as `/transactions/abc`.
    ///
    /// Dot segments are refused: parsing would resolve them and the request
    /// would reach a different resource.
    pub fn url(&self, path: &str) -> AppResult<Url> {
        if let Some(dot) = path.split('/').find(|s| is_dot_segment(s)) {
            let mut errors = FieldErrors::new();
            errors.add("path", format!("'{}' is not a valid identifier", dot));
            return Err(AppError::Validation(errors));
        }

        let raw = format!("{}{}{}", self.base_url, API_PREFIX, path);
        Url::parse(&raw)
            .map_err(|e| AppError::internal(format!("Invalid request URL '{}': {}", raw, e)))
    }

    /// Absolute URL with query parameters appended.
    pub fn url_with_query(&self, path: &str, query: &[(&str, &str)]) -> AppResult<Url> {
        let mut url = self.url(path)?;
        url.query_pairs_mut().extend_pairs(query);
        Ok(url)
    }

    /// GET and decode a JSON body.
    pub async fn get<T: DeserializeOwned>(&self, url: Url) -> AppResult<T> {
        let response = self.execute(Method::GET, url, None).await?;
        decode(&response)
    }

    /// GET and return the raw body.
    pub async fn get_bytes(&self, url: Url) -> AppResult<Vec<u8>> {
        let response = self.execute(Method::GET, url, None).await?;
        Ok(response.body)
    }

    /// POST a JSON body and decode the JSON response.
    pub async fn post<B, T>(&self, url: Url, body: &B) -> AppResult<T>
    where
        B: Serialize + ?Sized,
        T: DeserializeOwned,
    {
        let response = self.execute(Method::POST, url, Some(encode(body)?)).await?;
        decode(&response)
    }

    /// POST without a body and decode the JSON response.
    pub async fn post_empty<T: DeserializeOwned>(&self, url: Url) -> AppResult<T> {
        let response = self.execute(Method::POST, url, None).await?;
        decode(&response)
    }

    /// PUT a JSON body and decode the JSON response.
    pub async fn put<B, T>(&self, url: Url, body: &B) -> AppResult<T>
    where
        B: Serialize + ?Sized,
        T: DeserializeOwned,
    {
        let response = self.execute(Method::PUT, url, Some(encode(body)?)).await?;
        decode(&response)
    }

    /// DELETE, ignoring any response body.
    pub async fn delete(&self, url: Url) -> AppResult<()> {
        self.execute(Method::DELETE, url, None).await?;
        Ok(())
    }

    /// Run one request through the pipeline.
    async fn execute(
        &self,
        method: Method,
        url: Url,
        body: Option<Vec<u8>>,
    ) -> AppResult<RawResponse> {
        let mut request = Request::new(method, url);
        let headers = request.headers_mut();
        headers.insert(CONTENT_TYPE, HeaderValue::from_static("application/json"));
        headers.insert(ACCEPT, HeaderValue::from_static("application/json"));
        if let Some(body) = body {
            *request.body_mut() = Some(body.into());
        }

        for middleware in &self.middleware {
            middleware.before(&mut request)?;
        }

        let method = request.method().clone();
        let target = request.url().path().to_string();
        debug!(%method, path = %target, "Sending request");

        let response = self.sender.send(request).await?;
        let status = response.status.as_u16();
        debug!(%method, path = %target, status, "Received response");

        for middleware in &self.middleware {
            middleware.after(response.status)?;
        }

        if !response.status.is_success() {
            return Err(AppError::from_response(response.status.as_u16(), &response.body));
        }

        Ok(response)
    }
}

impl std::fmt::Debug for ApiClient {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ApiClient")
            .field("base_url", &self.base_url)
            .field("middleware", &self.middleware.len())
            .finish()
    }
}

fn encode<B: Serialize + ?Sized>(body: &B) -> AppResult<Vec<u8>> {
    serde_json::to_vec(body)
        .map_err(|e| AppError::internal(format!("Failed to encode request body: {}", e)))
}

fn decode<T: DeserializeOwned>(response: &RawResponse) -> AppResult<T> {
    serde_json::from_slice(&response.body).map_err(AppError::from)
}
