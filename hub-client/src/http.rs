// hub-client/src/http.rs
// HTTP client - network communication

use async_trait::async_trait;
use reqwest::{Client, Method, RequestBuilder, Url};
use serde::Serialize;
use serde::de::DeserializeOwned;
use serde_json::Value;
use shared::unwrap_payload;
use std::time::Duration;

use crate::session::SessionHandle;
use crate::{ClientConfig, ClientError, ClientResult};

/// HTTP client trait
///
/// Implementations unwrap the response envelope before decoding, so `T`
/// is always the payload type.
#[async_trait]
pub trait HttpClient: Send + Sync {
    async fn get<T: DeserializeOwned>(
        &self,
        path: &str,
        query: &[(&str, String)],
    ) -> ClientResult<T>;
    async fn post<T: DeserializeOwned, B: Serialize + Sync>(
        &self,
        path: &str,
        body: &B,
    ) -> ClientResult<T>;
    async fn post_empty<T: DeserializeOwned>(&self, path: &str) -> ClientResult<T>;
    async fn put<T: DeserializeOwned, B: Serialize + Sync>(
        &self,
        path: &str,
        body: &B,
    ) -> ClientResult<T>;
    async fn delete<T: DeserializeOwned>(&self, path: &str) -> ClientResult<T>;
}

/// Join `base` and `path` and append `query`
pub(crate) fn build_url(base: &str, path: &str, query: &[(&str, String)]) -> ClientResult<Url> {
    let raw = format!(
        "{}/{}",
        base.trim_end_matches('/'),
        path.trim_start_matches('/')
    );
    let url = if query.is_empty() {
        Url::parse(&raw)
    } else {
        Url::parse_with_params(&raw, query)
    };
    url.map_err(|e| ClientError::Url(format!("{}: {}", raw, e)))
}

/// Decode a successful response body into its payload
///
/// An empty body decodes as JSON `null`, which is what `()` expects.
pub(crate) fn decode_body<T: DeserializeOwned>(bytes: &[u8]) -> ClientResult<T> {
    let value = if bytes.iter().all(u8::is_ascii_whitespace) {
        Value::Null
    } else {
        serde_json::from_slice(bytes)
            .map_err(|e| ClientError::InvalidResponse(format!("JSON parse error: {}", e)))?
    };
    Ok(unwrap_payload(value)?)
}

/// Network HTTP client
#[derive(Debug, Clone)]
pub struct NetworkHttpClient {
    client: Client,
    base_url: String,
    config_token: Option<String>,
    session: SessionHandle,
}

impl NetworkHttpClient {
    pub fn new(config: &ClientConfig, session: SessionHandle) -> ClientResult<Self> {
        let client = Client::builder()
            .timeout(Duration::from_secs(config.timeout))
            .build()?;
        Ok(Self {
            client,
            base_url: config.normalized_base_url().to_string(),
            config_token: config.token.clone(),
            session,
        })
    }

    /// Get the base URL
    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    async fn auth_header(&self) -> Option<String> {
        let token = match self.session.token().await {
            Some(token) => Some(token),
            None => self.config_token.clone(),
        };
        token.map(|t| format!("Bearer {}", t))
    }

    fn request(
        &self,
        method: Method,
        path: &str,
        query: &[(&str, String)],
    ) -> ClientResult<RequestBuilder> {
        let url = build_url(&self.base_url, path, query)?;
        Ok(self.client.request(method, url))
    }

    async fn send<T: DeserializeOwned>(&self, mut request: RequestBuilder) -> ClientResult<T> {
        if let Some(auth) = self.auth_header().await {
            request = request.header(reqwest::header::AUTHORIZATION, auth);
        }
        let response = request.send().await?;
        let status = response.status();
        let bytes = response.bytes().await?;

        if !status.is_success() {
            let text = String::from_utf8_lossy(&bytes).to_string();
            tracing::debug!(status = %status, "Backend returned an error response");
            return Err(ClientError::from_response(status, text));
        }
        decode_body(&bytes)
    }
}

#[async_trait]
impl HttpClient for NetworkHttpClient {
    async fn get<T: DeserializeOwned>(
        &self,
        path: &str,
        query: &[(&str, String)],
    ) -> ClientResult<T> {
        let request = self.request(Method::GET, path, query)?;
        self.send(request).await
    }

    async fn post<T: DeserializeOwned, B: Serialize + Sync>(
        &self,
        path: &str,
        body: &B,
    ) -> ClientResult<T> {
        let request = self.request(Method::POST, path, &[])?.json(body);
        self.send(request).await
    }

    async fn post_empty<T: DeserializeOwned>(&self, path: &str) -> ClientResult<T> {
        let request = self.request(Method::POST, path, &[])?;
        self.send(request).await
    }

    async fn put<T: DeserializeOwned, B: Serialize + Sync>(
        &self,
        path: &str,
        body: &B,
    ) -> ClientResult<T> {
        let request = self.request(Method::PUT, path, &[])?.json(body);
        self.send(request).await
    }

    async fn delete<T: DeserializeOwned>(&self, path: &str) -> ClientResult<T> {
        let request = self.request(Method::DELETE, path, &[])?;
        self.send(request).await
    }
}
