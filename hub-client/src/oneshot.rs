// hub-client/src/oneshot.rs
// Oneshot HTTP client - in-process calls through an axum Router

use async_trait::async_trait;
use axum::Router;
use axum::body::Body;
use http::{Method, Request, header};
use serde::Serialize;
use serde::de::DeserializeOwned;
use tower::ServiceExt;

use crate::http::{HttpClient, build_url, decode_body};
use crate::session::SessionHandle;
use crate::{ClientError, ClientResult};

/// Only used to parse and encode paths; never contacted
const IN_PROCESS_ORIGIN: &str = "http://in-process";

/// Oneshot HTTP client (in-memory calls)
///
/// # Example
///
/// ```ignore
/// let router: Router = build_routes().with_state(state);
/// let client = OneshotHttpClient::new(router, SessionHandle::default());
/// let discounts: Vec<Discount> = client.get("/discounts/upcoming", &[]).await?;
/// ```
#[derive(Debug, Clone)]
pub struct OneshotHttpClient {
    router: Router,
    session: SessionHandle,
}

impl OneshotHttpClient {
    pub fn new(router: Router, session: SessionHandle) -> Self {
        Self { router, session }
    }

    /// Build a request with auth header and optional JSON body
    async fn build_request(
        &self,
        method: Method,
        path: &str,
        query: &[(&str, String)],
        body: Option<Vec<u8>>,
    ) -> ClientResult<Request<Body>> {
        let url = build_url(IN_PROCESS_ORIGIN, path, query)?;
        let uri = match url.query() {
            Some(q) => format!("{}?{}", url.path(), q),
            None => url.path().to_string(),
        };

        let mut builder = Request::builder()
            .method(method)
            .uri(uri)
            .header(header::CONTENT_TYPE, "application/json");

        if let Some(token) = self.session.token().await {
            builder = builder.header(header::AUTHORIZATION, format!("Bearer {}", token));
        }

        builder
            .body(body.map(Body::from).unwrap_or_else(Body::empty))
            .map_err(|e| ClientError::Internal(format!("Failed to build request: {}", e)))
    }

    /// Execute the request and handle the response
    async fn execute<T: DeserializeOwned>(&self, request: Request<Body>) -> ClientResult<T> {
        let response = self
            .router
            .clone()
            .oneshot(request)
            .await
            .map_err(|e| ClientError::Internal(format!("Oneshot call failed: {}", e)))?;

        let status = response.status();
        let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .map_err(|e| ClientError::Internal(format!("Failed to read body: {}", e)))?;

        if !status.is_success() {
            let text = String::from_utf8_lossy(&bytes).to_string();
            return Err(ClientError::from_response(status, text));
        }
        decode_body(&bytes)
    }
}

#[async_trait]
impl HttpClient for OneshotHttpClient {
    async fn get<T: DeserializeOwned>(
        &self,
        path: &str,
        query: &[(&str, String)],
    ) -> ClientResult<T> {
        let request = self.build_request(Method::GET, path, query, None).await?;
        self.execute(request).await
    }

    async fn post<T: DeserializeOwned, B: Serialize + Sync>(
        &self,
        path: &str,
        body: &B,
    ) -> ClientResult<T> {
        let bytes = serde_json::to_vec(body)?;
        let request = self
            .build_request(Method::POST, path, &[], Some(bytes))
            .await?;
        self.execute(request).await
    }

    async fn post_empty<T: DeserializeOwned>(&self, path: &str) -> ClientResult<T> {
        let request = self.build_request(Method::POST, path, &[], None).await?;
        self.execute(request).await
    }

    async fn put<T: DeserializeOwned, B: Serialize + Sync>(
        &self,
        path: &str,
        body: &B,
    ) -> ClientResult<T> {
        let bytes = serde_json::to_vec(body)?;
        let request = self
            .build_request(Method::PUT, path, &[], Some(bytes))
            .await?;
        self.execute(request).await
    }

    async fn delete<T: DeserializeOwned>(&self, path: &str) -> ClientResult<T> {
        let request = self.build_request(Method::DELETE, path, &[], None).await?;
        self.execute(request).await
    }
}
