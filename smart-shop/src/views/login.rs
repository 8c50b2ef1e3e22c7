//! Login form

use shop_client::{ClientError, ClientResult, HttpClient, ShopApi};

use crate::routes::Route;
use crate::scope::ViewScope;

/// Shown for any failed login, whatever the backend said
pub const LOGIN_FAILED_MESSAGE: &str = "Invalid credentials. Please try again.";

#[derive(Debug)]
pub struct LoginForm<H> {
    api: ShopApi<H>,
    scope: ViewScope,
    pub username: String,
    pub password: String,
    error: Option<&'static str>,
}

impl<H: HttpClient> LoginForm<H> {
    pub fn new(api: ShopApi<H>) -> Self {
        Self {
            api,
            scope: ViewScope::new(),
            username: String::new(),
            password: String::new(),
            error: None,
        }
    }

    pub fn with_scope(mut self, scope: ViewScope) -> Self {
        self.scope = scope;
        self
    }

    pub fn with_credentials(mut self, username: impl Into<String>, password: impl Into<String>) -> Self {
        self.username = username.into();
        self.password = password.into();
        self
    }

    /// Log in; on success the session holds the new token.
    pub async fn submit(&mut self) -> ClientResult<Route> {
        self.error = None;
        match self
            .scope
            .run(self.api.login(&self.username, &self.password))
            .await
        {
            Ok(_) => Ok(Route::Home),
            Err(ClientError::Cancelled) => Err(ClientError::Cancelled),
            Err(e) => {
                tracing::warn!(username = %self.username, error = %e, "Login failed");
                self.error = Some(LOGIN_FAILED_MESSAGE);
                Err(e)
            }
        }
    }

    pub fn error(&self) -> Option<&'static str> {
        self.error
    }
}
