//! Application context
//!
//! Owns the API handle and the settings every view needs, and hands out
//! views whose scopes hang off one shutdown token.

use std::sync::Arc;

use shop_client::{ClientResult, FileTokenStore, HttpClient, NetworkHttpClient, Session, ShopApi};
use tokio_util::sync::CancellationToken;

use crate::config::AppConfig;
use crate::scope::ViewScope;
use crate::views::{
    FormMode, Header, HomeView, LoginForm, ProductForm, ProductListView, SaleForm,
    SaleItemFailurePolicy, SaleListView,
};

#[derive(Debug, Clone)]
pub struct App<H> {
    api: ShopApi<H>,
    shop_id: i64,
    fallback_shop_id: i64,
    policy: SaleItemFailurePolicy,
    shutdown: CancellationToken,
}

impl App<NetworkHttpClient> {
    /// Restore the persisted session and connect to the configured backend
    pub fn from_config(config: &AppConfig) -> ClientResult<Self> {
        let store = Arc::new(FileTokenStore::new(&config.session_file));
        let session = Session::restore(store)?;
        let http = config.client_config().build_http_client(session)?;
        tracing::debug!(base_url = http.base_url(), "Client ready");

        Ok(Self::new(ShopApi::new(http))
            .with_shop_ids(config.shop_id, config.fallback_shop_id)
            .with_policy(config.failure_policy()))
    }
}

impl<H: HttpClient + Clone> App<H> {
    pub fn new(api: ShopApi<H>) -> Self {
        Self {
            api,
            shop_id: 1,
            fallback_shop_id: 1,
            policy: SaleItemFailurePolicy::default(),
            shutdown: CancellationToken::new(),
        }
    }

    pub fn with_shop_ids(mut self, shop_id: i64, fallback_shop_id: i64) -> Self {
        self.shop_id = shop_id;
        self.fallback_shop_id = fallback_shop_id;
        self
    }

    pub fn with_policy(mut self, policy: SaleItemFailurePolicy) -> Self {
        self.policy = policy;
        self
    }

    pub fn api(&self) -> &ShopApi<H> {
        &self.api
    }

    pub fn session(&self) -> &Session {
        self.api.session()
    }

    /// Cancelling this closes every view handed out
    pub fn shutdown_token(&self) -> CancellationToken {
        self.shutdown.clone()
    }

    fn scope(&self) -> ViewScope {
        ViewScope::child_of(&self.shutdown)
    }

    pub fn login_form(&self) -> LoginForm<H> {
        LoginForm::new(self.api.clone()).with_scope(self.scope())
    }

    pub fn header(&self) -> Header<H> {
        Header::new(self.api.clone()).with_scope(self.scope())
    }

    pub fn home(&self) -> HomeView<H> {
        HomeView::new(self.api.clone()).with_scope(self.scope())
    }

    pub fn products(&self) -> ProductListView<H> {
        ProductListView::new(self.api.clone()).with_scope(self.scope())
    }

    pub fn sales(&self) -> SaleListView<H> {
        SaleListView::new(self.api.clone()).with_scope(self.scope())
    }

    pub fn product_form(&self, mode: FormMode) -> ProductForm<H> {
        ProductForm::new(self.api.clone(), mode, self.shop_id).with_scope(self.scope())
    }

    pub fn sale_form(&self, mode: FormMode) -> SaleForm<H> {
        SaleForm::new(self.api.clone(), mode, self.fallback_shop_id)
            .with_policy(self.policy)
            .with_scope(self.scope())
    }
}
