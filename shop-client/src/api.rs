//! Typed shop backend endpoints
//!
//! Thin wrapper over an [`HttpClient`] that knows the backend's paths and
//! payload shapes. No retries, no caching: every call is one request.

use chrono::NaiveDate;
use shared::client::{LoginRequest, LoginResponse, UserInfo};
use shared::models::{
    Category, Product, ProductPayload, ProductSold, Sale, SaleCreate, SaleItem, SaleItemCreate,
    SaleItemUpdate, Shop,
};
use shared::util::format_day;

use crate::{ClientError, ClientResult, HttpClient, Session};

/// Endpoint paths, relative to the configured base URL
pub mod paths {
    pub const LOGIN: &str = "auth/token/login";
    pub const USERS: &str = "/auth/users/";
    pub const PRODUCTS: &str = "/shop/api/products/";
    pub const CATEGORIES: &str = "/shop/api/product-categories";
    pub const PRODUCTS_SOLD: &str = "/shop/api/products-sold/";
    pub const SALES: &str = "/shop/api/sales/";
    pub const SALE_ITEMS: &str = "/shop/api/sale-items/";
    pub const SHOPS: &str = "/shop/api/shops/";

    pub fn product(id: i64) -> String {
        format!("{}{}/", PRODUCTS, id)
    }

    pub fn sale(id: i64) -> String {
        format!("{}{}/", SALES, id)
    }

    pub fn sale_item(id: i64) -> String {
        format!("{}{}/", SALE_ITEMS, id)
    }
}

/// Shop backend API
#[derive(Debug, Clone)]
pub struct ShopApi<H> {
    http: H,
}

impl<H: HttpClient> ShopApi<H> {
    pub fn new(http: H) -> Self {
        Self { http }
    }

    pub fn http(&self) -> &H {
        &self.http
    }

    /// Session the transport reads its token from
    pub fn session(&self) -> &Session {
        self.http.session()
    }

    // ========== Auth API ==========

    /// Exchange credentials for a token and start the session with it
    pub async fn login(&self, username: &str, password: &str) -> ClientResult<String> {
        let request = LoginRequest {
            username: username.to_string(),
            password: password.to_string(),
        };
        let response: LoginResponse = self.http.post(paths::LOGIN, &request).await?;
        self.session().begin(response.auth_token.clone()).await?;
        tracing::info!(username, "Logged in");
        Ok(response.auth_token)
    }

    /// Drop the token locally; the backend is not contacted
    pub async fn logout(&self) -> ClientResult<()> {
        self.session().end().await?;
        tracing::info!("Logged out");
        Ok(())
    }

    /// First record of the users listing
    pub async fn current_user(&self) -> ClientResult<UserInfo> {
        let users: Vec<UserInfo> = self.http.get(paths::USERS).await?;
        users
            .into_iter()
            .next()
            .ok_or_else(|| ClientError::InvalidResponse("Empty users listing".into()))
    }

    // ========== Products API ==========

    pub async fn list_products(&self) -> ClientResult<Vec<Product>> {
        self.http.get(paths::PRODUCTS).await
    }

    pub async fn get_product(&self, id: i64) -> ClientResult<Product> {
        self.http.get(&paths::product(id)).await
    }

    pub async fn create_product(&self, payload: &ProductPayload) -> ClientResult<Product> {
        self.http.post(paths::PRODUCTS, payload).await
    }

    pub async fn update_product(&self, id: i64, payload: &ProductPayload) -> ClientResult<Product> {
        self.http.put(&paths::product(id), payload).await
    }

    pub async fn delete_product(&self, id: i64) -> ClientResult<()> {
        self.http.delete(&paths::product(id)).await
    }

    pub async fn list_categories(&self) -> ClientResult<Vec<Category>> {
        self.http.get(paths::CATEGORIES).await
    }

    /// Quantity of `product_id` sold between `start` and `end` (inclusive)
    ///
    /// The backend answers with a one-row list; an empty list reads as zero.
    pub async fn products_sold(
        &self,
        product_id: i64,
        start: NaiveDate,
        end: NaiveDate,
    ) -> ClientResult<ProductSold> {
        let path = format!(
            "{}?product={}&start_date={}&end_date={}",
            paths::PRODUCTS_SOLD,
            product_id,
            format_day(start),
            format_day(end)
        );
        let rows: Vec<ProductSold> = self.http.get(&path).await?;
        Ok(rows.into_iter().next().unwrap_or(ProductSold {
            product_id: Some(product_id),
            total_quantity_sold: None,
        }))
    }

    // ========== Sales API ==========

    pub async fn list_sales(&self) -> ClientResult<Vec<Sale>> {
        self.http.get(paths::SALES).await
    }

    pub async fn get_sale(&self, id: i64) -> ClientResult<Sale> {
        self.http.get(&paths::sale(id)).await
    }

    /// Create a sale shell; items are attached separately
    pub async fn create_sale(&self, payload: &SaleCreate) -> ClientResult<Sale> {
        self.http.post(paths::SALES, payload).await
    }

    pub async fn delete_sale(&self, id: i64) -> ClientResult<()> {
        self.http.delete(&paths::sale(id)).await
    }

    pub async fn list_sale_items(&self, sale_id: i64) -> ClientResult<Vec<SaleItem>> {
        self.http
            .get(&format!("{}?sale={}", paths::SALE_ITEMS, sale_id))
            .await
    }

    pub async fn create_sale_item(&self, payload: &SaleItemCreate) -> ClientResult<SaleItem> {
        self.http.post(paths::SALE_ITEMS, payload).await
    }

    pub async fn update_sale_item(
        &self,
        id: i64,
        payload: &SaleItemUpdate,
    ) -> ClientResult<SaleItem> {
        self.http.put(&paths::sale_item(id), payload).await
    }

    pub async fn list_shops(&self) -> ClientResult<Vec<Shop>> {
        self.http.get(paths::SHOPS).await
    }
}
