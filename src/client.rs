//! HTTP client for the task API.
//!
//! Every request carries JSON `Content-Type`/`Accept` headers and, when a token is
//! stored, `Authorization: Bearer <token>`. Successful responses are expected in a
//! `{ "data": ... }` envelope. Failures come back as a normalized [`ApiError`].
//!
//! A 401 from any endpoint clears the stored credentials and runs the registered
//! unauthorized handler. Nothing is retried.

use std::sync::Arc;
use std::time::Duration;

use log::{debug, warn};
use reqwest::header::{HeaderMap, HeaderValue, ACCEPT, CONTENT_TYPE};
use reqwest::{Client, Method};
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::auth::Session;
use crate::config::Config;
use crate::error::{ApiError, AppError};

pub type UnauthorizedHandler = Arc<dyn Fn() + Send + Sync>;

#[derive(Deserialize)]
struct Envelope<T> {
    data: T,
}

pub struct ApiClient {
    http: Client,
    base_url: String,
    session: Session,
    on_unauthorized: Option<UnauthorizedHandler>,
}

impl ApiClient {
    pub fn new(
        base_url: impl Into<String>,
        timeout: Duration,
        session: Session,
    ) -> Result<Self, AppError> {
        let mut headers = HeaderMap::new();
        headers.insert(CONTENT_TYPE, HeaderValue::from_static("application/json"));
        headers.insert(ACCEPT, HeaderValue::from_static("application/json"));

        let http = Client::builder()
            .user_agent(concat!("taskdesk/", env!("CARGO_PKG_VERSION")))
            .default_headers(headers)
            .timeout(timeout)
            .build()
            .map_err(|e| AppError::Config(format!("failed to build HTTP client: {}", e)))?;

        Ok(Self {
            http,
            base_url: base_url.into().trim_end_matches('/').to_string(),
            session,
            on_unauthorized: None,
        })
    }

    pub fn from_config(config: &Config, session: Session) -> Result<Self, AppError> {
        Self::new(config.api_base_url.clone(), config.timeout, session)
    }

    /// Registers the callback run after a 401 has cleared the stored credentials.
    pub fn on_unauthorized(mut self, handler: impl Fn() + Send + Sync + 'static) -> Self {
        self.on_unauthorized = Some(Arc::new(handler));
        self
    }

    pub fn session(&self) -> &Session {
        &self.session
    }

    pub async fn get<T: DeserializeOwned>(&self, path: &str) -> Result<T, ApiError> {
        let body = self.send(Method::GET, path, None).await?;
        unwrap_data(body)
    }

    pub async fn post<B, T>(&self, path: &str, payload: &B) -> Result<T, ApiError>
    where
        B: Serialize + ?Sized,
        T: DeserializeOwned,
    {
        let body = self
            .send(Method::POST, path, Some(serde_json::to_value(payload)?))
            .await?;
        unwrap_data(body)
    }

    /// POST without a request body. The response body is returned as-is.
    pub async fn post_empty(&self, path: &str) -> Result<Value, ApiError> {
        self.send(Method::POST, path, None).await
    }

    pub async fn put<B, T>(&self, path: &str, payload: &B) -> Result<T, ApiError>
    where
        B: Serialize + ?Sized,
        T: DeserializeOwned,
    {
        let body = self
            .send(Method::PUT, path, Some(serde_json::to_value(payload)?))
            .await?;
        unwrap_data(body)
    }

    /// DELETE; any 2xx counts as success and the body is ignored.
    pub async fn delete(&self, path: &str) -> Result<(), ApiError> {
        self.send(Method::DELETE, path, None).await?;
        Ok(())
    }

    async fn send(&self, method: Method, path: &str, body: Option<Value>) -> Result<Value, ApiError> {
        let url = format!("{}{}", self.base_url, path);
        let mut request = self.http.request(method.clone(), &url);
        if let Some(token) = self.session.token() {
            request = request.bearer_auth(token);
        }
        if let Some(body) = body {
            request = request.json(&body);
        }

        debug!("{} {}", method, url);
        let response = request.send().await.map_err(|e| {
            warn!("{} {} failed without a response: {}", method, url, e);
            ApiError::from(e)
        })?;

        let status = response.status();
        let text = response.text().await?;
        let data = parse_body(&text);

        if status.is_success() {
            debug!("{} {} -> {}", method, url, status);
            return Ok(data);
        }

        let error = ApiError::from_response(status.as_u16(), data);
        warn!("{} {} -> {}: {}", method, url, status, error.message);
        if error.is_unauthorized() {
            self.handle_unauthorized();
        }
        Err(error)
    }

    fn handle_unauthorized(&self) {
        if let Err(e) = self.session.clear() {
            warn!("Failed to clear stored credentials after 401: {}", e);
        }
        if let Some(handler) = &self.on_unauthorized {
            handler();
        }
    }
}

/// JSON when it parses, the raw text otherwise, `null` when empty.
fn parse_body(text: &str) -> Value {
    if text.trim().is_empty() {
        return Value::Null;
    }
    serde_json::from_str(text).unwrap_or_else(|_| Value::String(text.to_string()))
}

fn unwrap_data<T: DeserializeOwned>(body: Value) -> Result<T, ApiError> {
    let envelope: Envelope<T> = serde_json::from_value(body)?;
    Ok(envelope.data)
}
