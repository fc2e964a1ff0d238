//! Request gateway for the spider backend.
//!
//! Every outbound call goes through [`Gateway::request`], which injects the
//! JSON content type and the credential token header, and normalizes every
//! failure into an [`ApiError`]. The typed per-endpoint methods live in
//! `endpoints.rs` and only fix path, method and body.

mod endpoints;
mod requests;

pub use requests::{SearchOptions, SpiderUserOptions};

use std::sync::Arc;
use std::time::Instant;

use reqwest::header::{HeaderMap, HeaderName, HeaderValue, CONTENT_TYPE};
use reqwest::{Client, Method};
use serde::de::DeserializeOwned;
use serde::Serialize;
use serde_json::Value;
use tokio::sync::RwLock;

use spider_common::{ApiError, Envelope};

use crate::token::TokenStore;

/// Header carrying the credential token.
pub const TOKEN_HEADER: &str = "x-douyin-cookie";

/// Result of every gateway call.
pub type ApiResult<T> = std::result::Result<Envelope<T>, ApiError>;

/// Method, body and extra headers for one [`Gateway::request`] call.
///
/// `Content-Type` is always overwritten with `application/json`, and the
/// token header with the gateway's current token.
#[derive(Debug, Clone, Default)]
pub struct RequestOptions {
    pub method: Method,
    pub body: Option<Value>,
    pub headers: HeaderMap,
}

impl RequestOptions {
    pub fn new(method: Method) -> Self {
        Self {
            method,
            ..Default::default()
        }
    }

    pub fn get() -> Self {
        Self::new(Method::GET)
    }

    pub fn with_body(mut self, body: Value) -> Self {
        self.body = Some(body);
        self
    }

    /// Serialize `body` as the JSON request body.
    pub fn with_json<B: Serialize + ?Sized>(self, body: &B) -> Result<Self, ApiError> {
        let value = serde_json::to_value(body).map_err(|e| ApiError::network(e.to_string()))?;
        Ok(self.with_body(value))
    }

    pub fn with_header(mut self, name: HeaderName, value: HeaderValue) -> Self {
        self.headers.insert(name, value);
        self
    }
}

/// Stateful HTTP client for the spider backend.
///
/// Holds the credential token. The token is read through to the durable
/// [`TokenStore`] while the in-memory copy is empty and written through on
/// [`Gateway::set_token`]. Build one per session and share it by reference.
pub struct Gateway {
    http_client: Client,
    base_url: String,
    token: RwLock<String>,
    store: Arc<dyn TokenStore>,
}

impl Gateway {
    pub fn new(base_url: &str, store: Arc<dyn TokenStore>) -> Self {
        Self::with_client(Client::new(), base_url, store)
    }

    pub fn with_client(http_client: Client, base_url: &str, store: Arc<dyn TokenStore>) -> Self {
        Self {
            http_client,
            base_url: base_url.trim_end_matches('/').to_string(),
            token: RwLock::new(String::new()),
            store,
        }
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// Replace the token in memory and in the durable store.
    ///
    /// Never fails: a store write error is logged and the in-memory token
    /// stays authoritative for this process.
    pub async fn set_token(&self, value: impl Into<String>) {
        let value = value.into();
        *self.token.write().await = value.clone();

        if let Err(e) = self.store.save(&value).await {
            tracing::warn!("Failed to persist token: {}", e);
        }
    }

    /// Current token, or the durably stored one when none is held in memory.
    ///
    /// An empty result is not cached; the next call consults the store again.
    pub async fn token(&self) -> String {
        {
            let token = self.token.read().await;
            if !token.is_empty() {
                return token.clone();
            }
        }

        let stored = match self.store.load().await {
            Ok(Some(stored)) if !stored.trim().is_empty() => stored.trim().to_string(),
            Ok(_) => return String::new(),
            Err(e) => {
                tracing::warn!("Failed to load stored token: {}", e);
                return String::new();
            }
        };

        let mut token = self.token.write().await;
        // A concurrent set_token wins over the stored value.
        if token.is_empty() {
            *token = stored;
        }
        token.clone()
    }

    /// Perform one HTTP call against `base_url + endpoint`.
    ///
    /// - 2xx with a JSON body: the body, decoded as an [`Envelope`].
    /// - non-2xx with a JSON body: [`ApiError::from_response`].
    /// - anything else (connection failure, unreadable or non-JSON body,
    ///   body not matching `T`): [`ApiError::network`].
    pub async fn request<T: DeserializeOwned>(
        &self,
        endpoint: &str,
        options: RequestOptions,
    ) -> ApiResult<T> {
        let RequestOptions {
            method,
            body,
            mut headers,
        } = options;

        headers.insert(CONTENT_TYPE, HeaderValue::from_static("application/json"));
        let token = self.token().await;
        let token = token.trim();
        if !token.is_empty() {
            let value = HeaderValue::from_str(token)
                .map_err(|e| ApiError::network(format!("Invalid token header: {}", e)))?;
            headers.insert(HeaderName::from_static(TOKEN_HEADER), value);
        }

        let url = format!("{}{}", self.base_url, endpoint);
        let mut builder = self.http_client.request(method.clone(), &url).headers(headers);
        if let Some(body) = &body {
            builder = builder.json(body);
        }

        tracing::debug!(method = %method, path = %endpoint, "Sending request");
        let start = Instant::now();

        let response = builder.send().await.map_err(|e| {
            tracing::warn!(method = %method, path = %endpoint, "Request failed: {}", e);
            ApiError::network(e.to_string())
        })?;

        let status = response.status();
        tracing::debug!(
            method = %method,
            path = %endpoint,
            status = %status.as_u16(),
            duration_ms = %start.elapsed().as_millis(),
            "Response received"
        );

        let bytes = response
            .bytes()
            .await
            .map_err(|e| ApiError::network(e.to_string()))?;
        let payload: Value =
            serde_json::from_slice(&bytes).map_err(|e| ApiError::network(e.to_string()))?;

        if !status.is_success() {
            let err = ApiError::from_response(status.as_u16(), &payload);
            tracing::warn!(
                method = %method,
                path = %endpoint,
                status = %err.status,
                code = %err.code,
                "Backend rejected request: {}",
                err.message
            );
            return Err(err);
        }

        serde_json::from_value(payload)
            .map_err(|e| ApiError::network(format!("Unexpected response shape: {}", e)))
    }

    /// GET an arbitrary endpoint.
    pub async fn get<T: DeserializeOwned>(&self, endpoint: &str) -> ApiResult<T> {
        self.request(endpoint, RequestOptions::get()).await
    }

    /// POST `body` as JSON to an arbitrary endpoint.
    pub async fn post<T, B>(&self, endpoint: &str, body: &B) -> ApiResult<T>
    where
        T: DeserializeOwned,
        B: Serialize + ?Sized,
    {
        let options = RequestOptions::new(Method::POST).with_json(body)?;
        self.request(endpoint, options).await
    }

    /// PUT `body` as JSON to an arbitrary endpoint.
    pub async fn put<T, B>(&self, endpoint: &str, body: &B) -> ApiResult<T>
    where
        T: DeserializeOwned,
        B: Serialize + ?Sized,
    {
        let options = RequestOptions::new(Method::PUT).with_json(body)?;
        self.request(endpoint, options).await
    }
}

/// Percent-encode a caller-supplied path segment.
fn segment(value: &str) -> std::borrow::Cow<'_, str> {
    urlencoding::encode(value)
}
