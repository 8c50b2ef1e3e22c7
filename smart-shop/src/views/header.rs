//! Header: current user and navigation

use shop_client::{ClientResult, HttpClient, ShopApi};

use crate::routes::Route;
use crate::scope::ViewScope;

/// Shown when the user's name can't be fetched
pub const DEFAULT_DISPLAY_NAME: &str = "User";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct NavLink {
    pub label: &'static str,
    pub route: Route,
}

const SIGNED_IN_LINKS: [NavLink; 4] = [
    NavLink { label: "Home", route: Route::Home },
    NavLink { label: "Products", route: Route::Products },
    NavLink { label: "Sales", route: Route::Sales },
    NavLink { label: "Logout", route: Route::Login },
];

const SIGNED_OUT_LINKS: [NavLink; 1] = [NavLink { label: "Login", route: Route::Login }];

#[derive(Debug)]
pub struct Header<H> {
    api: ShopApi<H>,
    scope: ViewScope,
    display_name: Option<String>,
}

impl<H: HttpClient> Header<H> {
    pub fn new(api: ShopApi<H>) -> Self {
        Self {
            api,
            scope: ViewScope::new(),
            display_name: None,
        }
    }

    pub fn with_scope(mut self, scope: ViewScope) -> Self {
        self.scope = scope;
        self
    }

    /// Fetch the display name when a token is held
    pub async fn refresh(&mut self) {
        if !self.api.session().is_authenticated().await {
            self.display_name = None;
            return;
        }
        if let Some(name) = self.api.session().username().await {
            self.display_name = Some(name);
            return;
        }

        match self.scope.run(self.api.current_user()).await {
            Ok(user) => {
                self.api.session().set_username(user.username.clone()).await;
                self.display_name = Some(user.username);
            }
            Err(e) => {
                tracing::warn!(error = %e, "Error fetching user data");
                self.display_name = Some(DEFAULT_DISPLAY_NAME.to_string());
            }
        }
    }

    /// Name to greet, once [`Header::refresh`] found a session
    pub fn display_name(&self) -> Option<&str> {
        self.display_name.as_deref()
    }

    /// Links for the current session; token presence is all that counts
    pub async fn nav_links(&self) -> &'static [NavLink] {
        if self.api.session().is_authenticated().await {
            &SIGNED_IN_LINKS
        } else {
            &SIGNED_OUT_LINKS
        }
    }

    /// End the session and return to the login page
    pub async fn logout(&mut self) -> ClientResult<Route> {
        self.api.logout().await?;
        self.display_name = None;
        Ok(Route::Login)
    }
}
