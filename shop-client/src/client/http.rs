// shop-client/src/client/http.rs
// HTTP client - network transport

use async_trait::async_trait;
use reqwest::{Client, RequestBuilder};
use serde::Serialize;
use serde::de::DeserializeOwned;

use crate::error::from_status;
use crate::{ClientConfig, ClientResult, Session};

/// Authorization header value for a token
pub(crate) fn token_header(token: &str) -> String {
    format!("Token {}", token)
}

/// Join a base URL and an endpoint path with exactly one slash
pub(crate) fn join_url(base_url: &str, path: &str) -> String {
    format!(
        "{}/{}",
        base_url.trim_end_matches('/'),
        path.trim_start_matches('/')
    )
}

/// HTTP client trait
///
/// Every request carries `Authorization: Token <value>` while the session
/// holds a token, and no Authorization header otherwise.
#[async_trait]
pub trait HttpClient: Send + Sync {
    async fn get<T: DeserializeOwned>(&self, path: &str) -> ClientResult<T>;
    async fn post<T: DeserializeOwned, B: Serialize + Sync>(
        &self,
        path: &str,
        body: &B,
    ) -> ClientResult<T>;
    async fn put<T: DeserializeOwned, B: Serialize + Sync>(
        &self,
        path: &str,
        body: &B,
    ) -> ClientResult<T>;
    /// DELETE, ignoring any response body
    async fn delete(&self, path: &str) -> ClientResult<()>;
    fn session(&self) -> &Session;
}

/// Network HTTP client
#[derive(Debug, Clone)]
pub struct NetworkHttpClient {
    client: Client,
    base_url: String,
    session: Session,
}

impl NetworkHttpClient {
    pub fn new(config: &ClientConfig, session: Session) -> ClientResult<Self> {
        let client = Client::builder().timeout(config.timeout()).build()?;
        Ok(Self {
            client,
            base_url: config.base_url.trim_end_matches('/').to_string(),
            session,
        })
    }

    /// Base URL without trailing slash
    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    async fn authorize(&self, req: RequestBuilder) -> RequestBuilder {
        match self.session.token().await {
            Some(token) => req.header(reqwest::header::AUTHORIZATION, token_header(&token)),
            None => req,
        }
    }

    async fn send(&self, req: RequestBuilder) -> ClientResult<reqwest::Response> {
        let response = self.authorize(req).await.send().await?;
        let status = response.status();
        if !status.is_success() {
            let text = response.text().await?;
            tracing::debug!(status = %status, "Backend rejected request");
            return Err(from_status(status, text));
        }
        Ok(response)
    }

    async fn send_json<T: DeserializeOwned>(&self, req: RequestBuilder) -> ClientResult<T> {
        let response = self.send(req).await?;
        Ok(response.json().await?)
    }
}

#[async_trait]
impl HttpClient for NetworkHttpClient {
    async fn get<T: DeserializeOwned>(&self, path: &str) -> ClientResult<T> {
        let url = join_url(&self.base_url, path);
        tracing::debug!(%url, "GET");
        self.send_json(self.client.get(&url)).await
    }

    async fn post<T: DeserializeOwned, B: Serialize + Sync>(
        &self,
        path: &str,
        body: &B,
    ) -> ClientResult<T> {
        let url = join_url(&self.base_url, path);
        tracing::debug!(%url, "POST");
        self.send_json(self.client.post(&url).json(body)).await
    }

    async fn put<T: DeserializeOwned, B: Serialize + Sync>(
        &self,
        path: &str,
        body: &B,
    ) -> ClientResult<T> {
        let url = join_url(&self.base_url, path);
        tracing::debug!(%url, "PUT");
        self.send_json(self.client.put(&url).json(body)).await
    }

    async fn delete(&self, path: &str) -> ClientResult<()> {
        let url = join_url(&self.base_url, path);
        tracing::debug!(%url, "DELETE");
        self.send(self.client.delete(&url)).await?;
        Ok(())
    }

    fn session(&self) -> &Session {
        &self.session
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_join_url() {
        assert_eq!(
            join_url("http://127.0.0.1:8000/", "/shop/api/products/"),
            "http://127.0.0.1:8000/shop/api/products/"
        );
        assert_eq!(
            join_url("http://127.0.0.1:8000", "auth/token/login"),
            "http://127.0.0.1:8000/auth/token/login"
        );
    }

    #[test]
    fn test_token_header() {
        assert_eq!(token_header("abc"), "Token abc");
    }

    #[test]
    fn test_network_client_creation() {
        let config = ClientConfig::new("http://localhost:8000/");
        let client = NetworkHttpClient::new(&config, Session::in_memory()).unwrap();
        assert_eq!(client.base_url(), "http://localhost:8000");
    }
}
