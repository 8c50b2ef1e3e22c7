//! In-memory shop backend for view tests
//!
//! An axum app with the backend's routes over a mutex-guarded store, plus
//! switches to make individual endpoints fail.

#![allow(dead_code)]

use std::collections::HashMap;
use std::sync::{Arc, Mutex};

use axum::extract::{Path, Query, Request, State};
use axum::http::StatusCode;
use axum::middleware::{self, Next};
use axum::response::{IntoResponse, Response};
use axum::routing::{get, post, put};
use axum::{Json, Router};
use serde_json::{Value, json};
use shared::Decimal;
use shared::models::{
    Category, Product, ProductPayload, Sale, SaleCreate, SaleItem, SaleItemCreate, SaleItemUpdate,
    Shop,
};
use shop_client::{OneshotHttpClient, Session, ShopApi};
use smart_shop::App;

pub const TOKEN: &str = "test-token";

#[derive(Debug, Default)]
pub struct Backend {
    pub products: Vec<Product>,
    pub categories: Vec<Category>,
    pub sales: Vec<Sale>,
    pub items: Vec<SaleItem>,
    pub shops: Vec<Shop>,
    /// Quantity sold per product id
    pub sold: HashMap<i64, i64>,
    pub next_id: i64,

    /// Sale-item creates for this product answer 500
    pub fail_items_for_product: Option<i64>,
    pub fail_deletes: bool,
    pub fail_users: bool,
    pub fail_categories: bool,
    pub fail_products_sold: bool,

    /// Authorization header of every request, in order
    pub auth_headers: Vec<Option<String>>,
    pub product_bodies: Vec<Value>,
    pub sale_bodies: Vec<Value>,
    pub item_updates: Vec<(i64, i64)>,
}

pub type Db = Arc<Mutex<Backend>>;

type ApiError = (StatusCode, Json<Value>);
type ApiResult<T> = Result<Json<T>, ApiError>;

fn error(status: StatusCode, detail: &str) -> ApiError {
    (status, Json(json!({ "detail": detail })))
}

impl Backend {
    fn next_id(&mut self) -> i64 {
        self.next_id += 1;
        self.next_id
    }

    fn category_name(&self, id: i64) -> Option<String> {
        self.categories.iter().find(|c| c.id == id).map(|c| c.name.clone())
    }
}

pub fn product(id: i64, name: &str, price: i64, category: Option<(i64, &str)>) -> Product {
    Product {
        id,
        name: name.into(),
        price: Decimal::from(price),
        mrp: Decimal::from(price + 5),
        description: format!("{} description", name),
        category: category.map(|(id, _)| id),
        category_name: category.map(|(_, name)| name.to_string()),
        inventory: 10 * id,
        added_at: Some(format!("2025-01-0{}T08:00:00Z", id)),
    }
}

pub fn sale(id: i64, date: &str, total: i64, profit: i64) -> Sale {
    Sale {
        id,
        sale_date: date.into(),
        receipt_number: Some(format!("R-{:04}", id)),
        total_sales: Some(Decimal::from(total)),
        total_profit: Some(Decimal::from(profit)),
        shop: Some(3),
    }
}

/// Three products in two categories, one shop, no sales
pub fn seeded() -> Db {
    let grocery = (1, "Grocery");
    let household = (2, "Household");
    Arc::new(Mutex::new(Backend {
        products: vec![
            product(1, "Basmati Rice", 10, Some(grocery)),
            product(2, "Soap", 4, Some(household)),
            product(3, "Brown rice", 25, Some(grocery)),
        ],
        categories: vec![
            Category { id: 1, name: "Grocery".into() },
            Category { id: 2, name: "Household".into() },
        ],
        shops: vec![Shop { id: 3, name: "Main Street".into() }],
        next_id: 100,
        ..Backend::default()
    }))
}

// ========== Handlers ==========

async fn auth(State(db): State<Db>, request: Request, next: Next) -> Response {
    let header = request
        .headers()
        .get("authorization")
        .and_then(|v| v.to_str().ok())
        .map(str::to_string);
    db.lock().unwrap().auth_headers.push(header.clone());

    let expected = format!("Token {}", TOKEN);
    let open = request.uri().path() == "/auth/token/login";
    if !open && header.as_deref() != Some(expected.as_str()) {
        return error(StatusCode::UNAUTHORIZED, "Authentication credentials were not provided.")
            .into_response();
    }
    next.run(request).await
}

async fn login(Json(body): Json<Value>) -> ApiResult<Value> {
    if body["username"] == "owner" && body["password"] == "secret" {
        Ok(Json(json!({ "auth_token": TOKEN })))
    } else {
        Err((
            StatusCode::BAD_REQUEST,
            Json(json!({ "non_field_errors": ["Unable to log in with provided credentials."] })),
        ))
    }
}

async fn users(State(db): State<Db>) -> ApiResult<Value> {
    if db.lock().unwrap().fail_users {
        return Err(error(StatusCode::INTERNAL_SERVER_ERROR, "users unavailable"));
    }
    Ok(Json(json!([{ "id": 1, "username": "owner", "email": "owner@shop.pk" }])))
}

async fn list_products(State(db): State<Db>) -> Json<Vec<Product>> {
    Json(db.lock().unwrap().products.clone())
}

async fn get_product(State(db): State<Db>, Path(id): Path<i64>) -> ApiResult<Product> {
    let db = db.lock().unwrap();
    db.products
        .iter()
        .find(|p| p.id == id)
        .cloned()
        .map(Json)
        .ok_or_else(|| error(StatusCode::NOT_FOUND, "No Product matches the given query."))
}

fn product_from(db: &Backend, id: i64, payload: ProductPayload) -> Product {
    Product {
        id,
        name: payload.name,
        price: payload.price,
        mrp: payload.mrp,
        description: payload.description,
        category: Some(payload.category),
        category_name: db.category_name(payload.category),
        inventory: payload.inventory,
        added_at: Some("2025-05-10T12:00:00Z".into()),
    }
}

async fn create_product(
    State(db): State<Db>,
    Json(body): Json<Value>,
) -> Result<(StatusCode, Json<Product>), ApiError> {
    let mut db = db.lock().unwrap();
    db.product_bodies.push(body.clone());
    let payload: ProductPayload = serde_json::from_value(body)
        .map_err(|e| error(StatusCode::BAD_REQUEST, &e.to_string()))?;
    let id = db.next_id();
    let product = product_from(&db, id, payload);
    db.products.push(product.clone());
    Ok((StatusCode::CREATED, Json(product)))
}

async fn update_product(
    State(db): State<Db>,
    Path(id): Path<i64>,
    Json(body): Json<Value>,
) -> ApiResult<Product> {
    let mut db = db.lock().unwrap();
    db.product_bodies.push(body.clone());
    let payload: ProductPayload = serde_json::from_value(body)
        .map_err(|e| error(StatusCode::BAD_REQUEST, &e.to_string()))?;
    let index = db
        .products
        .iter()
        .position(|p| p.id == id)
        .ok_or_else(|| error(StatusCode::NOT_FOUND, "No Product matches the given query."))?;
    let product = product_from(&db, id, payload);
    db.products[index] = product.clone();
    Ok(Json(product))
}

async fn delete_product(State(db): State<Db>, Path(id): Path<i64>) -> Result<StatusCode, ApiError> {
    let mut db = db.lock().unwrap();
    if db.fail_deletes {
        return Err(error(StatusCode::INTERNAL_SERVER_ERROR, "delete failed"));
    }
    let index = db
        .products
        .iter()
        .position(|p| p.id == id)
        .ok_or_else(|| error(StatusCode::NOT_FOUND, "No Product matches the given query."))?;
    db.products.remove(index);
    Ok(StatusCode::NO_CONTENT)
}

async fn categories(State(db): State<Db>) -> ApiResult<Vec<Category>> {
    let db = db.lock().unwrap();
    if db.fail_categories {
        return Err(error(StatusCode::INTERNAL_SERVER_ERROR, "categories unavailable"));
    }
    Ok(Json(db.categories.clone()))
}

async fn products_sold(
    State(db): State<Db>,
    Query(query): Query<HashMap<String, String>>,
) -> ApiResult<Value> {
    let db = db.lock().unwrap();
    if db.fail_products_sold {
        return Err(error(StatusCode::INTERNAL_SERVER_ERROR, "aggregation failed"));
    }
    let id: i64 = query.get("product").and_then(|v| v.parse().ok()).unwrap_or_default();
    Ok(Json(match db.sold.get(&id) {
        Some(quantity) => json!([{ "product_id": id, "total_quantity_sold": quantity }]),
        None => json!([]),
    }))
}

async fn list_sales(State(db): State<Db>) -> Json<Vec<Sale>> {
    Json(db.lock().unwrap().sales.clone())
}

async fn get_sale(State(db): State<Db>, Path(id): Path<i64>) -> ApiResult<Sale> {
    let db = db.lock().unwrap();
    db.sales
        .iter()
        .find(|s| s.id == id)
        .cloned()
        .map(Json)
        .ok_or_else(|| error(StatusCode::NOT_FOUND, "No Sale matches the given query."))
}

async fn create_sale(
    State(db): State<Db>,
    Json(body): Json<Value>,
) -> Result<(StatusCode, Json<Sale>), ApiError> {
    let mut db = db.lock().unwrap();
    db.sale_bodies.push(body.clone());
    let payload: SaleCreate = serde_json::from_value(body)
        .map_err(|e| error(StatusCode::BAD_REQUEST, &e.to_string()))?;
    let id = db.next_id();
    let mut created = sale(id, "2025-05-10", 0, 0);
    created.shop = Some(payload.shop);
    db.sales.push(created.clone());
    Ok((StatusCode::CREATED, Json(created)))
}

async fn delete_sale(State(db): State<Db>, Path(id): Path<i64>) -> Result<StatusCode, ApiError> {
    let mut db = db.lock().unwrap();
    if db.fail_deletes {
        return Err(error(StatusCode::INTERNAL_SERVER_ERROR, "delete failed"));
    }
    let before = db.sales.len();
    db.sales.retain(|s| s.id != id);
    if db.sales.len() == before {
        return Err(error(StatusCode::NOT_FOUND, "No Sale matches the given query."));
    }
    db.items.retain(|item| item.sale != id);
    Ok(StatusCode::NO_CONTENT)
}

/// Ignores `?sale=`, like a backend without the filter installed
async fn list_items(State(db): State<Db>) -> Json<Vec<SaleItem>> {
    Json(db.lock().unwrap().items.clone())
}

async fn create_item(
    State(db): State<Db>,
    Json(payload): Json<SaleItemCreate>,
) -> Result<(StatusCode, Json<SaleItem>), ApiError> {
    let mut db = db.lock().unwrap();
    if db.fail_items_for_product == Some(payload.product) {
        return Err(error(StatusCode::INTERNAL_SERVER_ERROR, "item rejected"));
    }
    let item = SaleItem {
        id: db.next_id(),
        sale: payload.sale,
        product: payload.product,
        quantity: payload.quantity,
    };
    db.items.push(item.clone());
    Ok((StatusCode::CREATED, Json(item)))
}

async fn update_item(
    State(db): State<Db>,
    Path(id): Path<i64>,
    Json(payload): Json<SaleItemUpdate>,
) -> ApiResult<SaleItem> {
    let mut db = db.lock().unwrap();
    db.item_updates.push((id, payload.quantity));
    let item = db
        .items
        .iter_mut()
        .find(|item| item.id == id)
        .ok_or_else(|| error(StatusCode::NOT_FOUND, "No SaleItem matches the given query."))?;
    item.quantity = payload.quantity;
    Ok(Json(item.clone()))
}

async fn shops(State(db): State<Db>) -> Json<Vec<Shop>> {
    Json(db.lock().unwrap().shops.clone())
}

pub fn router(db: Db) -> Router {
    Router::new()
        .route("/auth/token/login", post(login))
        .route("/auth/users/", get(users))
        .route("/shop/api/products/", get(list_products).post(create_product))
        .route(
            "/shop/api/products/{id}/",
            get(get_product).put(update_product).delete(delete_product),
        )
        .route("/shop/api/product-categories", get(categories))
        .route("/shop/api/products-sold/", get(products_sold))
        .route("/shop/api/sales/", get(list_sales).post(create_sale))
        .route("/shop/api/sales/{id}/", get(get_sale).delete(delete_sale))
        .route("/shop/api/sale-items/", get(list_items).post(create_item))
        .route("/shop/api/sale-items/{id}/", put(update_item))
        .route("/shop/api/shops/", get(shops))
        .layer(middleware::from_fn_with_state(db.clone(), auth))
        .with_state(db)
}

// ========== App ==========

pub fn app_with_session(db: &Db, session: Session) -> App<OneshotHttpClient> {
    let client = OneshotHttpClient::new(router(db.clone()), session);
    App::new(ShopApi::new(client))
}

/// Signed-out app over an in-memory session
pub fn app(db: &Db) -> App<OneshotHttpClient> {
    app_with_session(db, Session::in_memory())
}

/// App whose session already holds the backend's token
pub async fn signed_in(db: &Db) -> App<OneshotHttpClient> {
    let app = app(db);
    app.session().begin(TOKEN).await.unwrap();
    app
}
