// shop-client/src/client/http_oneshot.rs
// Oneshot HTTP client - in-memory transport
//
// Requires the "in-process" feature

use async_trait::async_trait;
use axum::Router;
use axum::body::Body;
use http::{Method, Request};
use serde::Serialize;
use serde::de::DeserializeOwned;
use tower::ServiceExt;

use super::http::{HttpClient, token_header};
use crate::error::from_status;
use crate::{ClientError, ClientResult, Session};

/// Oneshot HTTP client (in-memory calls)
///
/// Calls the Router directly through Tower's `oneshot`, so a backend
/// implemented as an axum app can be exercised without a socket.
///
/// # Example
///
/// ```ignore
/// use shop_client::{OneshotHttpClient, Session, ShopApi};
///
/// let client = OneshotHttpClient::new(backend_router(), Session::in_memory());
/// let products = ShopApi::new(client).list_products().await?;
/// ```
#[derive(Debug, Clone)]
pub struct OneshotHttpClient {
    router: Router,
    session: Session,
}

impl OneshotHttpClient {
    /// # Arguments
    /// * `router` - an initialized Router (`with_state` already applied)
    /// * `session` - the session whose token is attached to requests
    pub fn new(router: Router, session: Session) -> Self {
        Self { router, session }
    }

    async fn build_request(
        &self,
        method: Method,
        path: &str,
        body: Option<Vec<u8>>,
    ) -> ClientResult<Request<Body>> {
        let uri = format!("/{}", path.trim_start_matches('/'));
        let mut builder = Request::builder().method(method).uri(uri);

        if let Some(token) = self.session.token().await {
            builder = builder.header(http::header::AUTHORIZATION, token_header(&token));
        }

        let body = match body {
            Some(bytes) => {
                builder = builder.header(http::header::CONTENT_TYPE, "application/json");
                Body::from(bytes)
            }
            None => Body::empty(),
        };

        builder
            .body(body)
            .map_err(|e| ClientError::Internal(format!("Failed to build request: {}", e)))
    }

    /// Run the request and return the raw body of a successful response
    async fn execute(&self, request: Request<Body>) -> ClientResult<axum::body::Bytes> {
        let response = self
            .router
            .clone()
            .oneshot(request)
            .await
            .map_err(|e| ClientError::Internal(format!("Oneshot call failed: {}", e)))?;

        let status = response.status();
        let body_bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .map_err(|e| ClientError::Internal(format!("Failed to read body: {}", e)))?;

        if !status.is_success() {
            let text = String::from_utf8_lossy(&body_bytes).to_string();
            return Err(from_status(status, text));
        }
        Ok(body_bytes)
    }

    async fn execute_json<T: DeserializeOwned>(&self, request: Request<Body>) -> ClientResult<T> {
        let bytes = self.execute(request).await?;
        serde_json::from_slice(&bytes)
            .map_err(|e| ClientError::InvalidResponse(format!("JSON parse error: {}", e)))
    }
}

#[async_trait]
impl HttpClient for OneshotHttpClient {
    async fn get<T: DeserializeOwned>(&self, path: &str) -> ClientResult<T> {
        let request = self.build_request(Method::GET, path, None).await?;
        self.execute_json(request).await
    }

    async fn post<T: DeserializeOwned, B: Serialize + Sync>(
        &self,
        path: &str,
        body: &B,
    ) -> ClientResult<T> {
        let bytes = serde_json::to_vec(body)?;
        let request = self.build_request(Method::POST, path, Some(bytes)).await?;
        self.execute_json(request).await
    }

    async fn put<T: DeserializeOwned, B: Serialize + Sync>(
        &self,
        path: &str,
        body: &B,
    ) -> ClientResult<T> {
        let bytes = serde_json::to_vec(body)?;
        let request = self.build_request(Method::PUT, path, Some(bytes)).await?;
        self.execute_json(request).await
    }

    async fn delete(&self, path: &str) -> ClientResult<()> {
        let request = self.build_request(Method::DELETE, path, None).await?;
        self.execute(request).await?;
        Ok(())
    }

    fn session(&self) -> &Session {
        &self.session
    }
}
