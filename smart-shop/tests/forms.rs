// smart-shop/tests/forms.rs
// Product and sale editors against the in-memory backend

mod common;

use common::{sale, seeded, signed_in};
use serde_json::json;
use shared::Decimal;
use shared::models::SaleItem;
use shop_client::ClientError;
use smart_shop::Route;
use smart_shop::views::{FormMode, MAX_LINE_QUANTITY, SaleItemFailurePolicy};

// ========== Product form ==========

#[tokio::test]
async fn test_create_product_posts_draft_with_shop() {
    let db = seeded();
    let app = signed_in(&db).await.with_shop_ids(3, 1);

    let mut form = app.product_form(FormMode::Create);
    form.load().await.unwrap();
    assert_eq!(form.categories().len(), 2);
    assert_eq!(form.title(), "Add Product");

    for (field, value) in [
        ("name", "Green Tea"),
        ("price", "180.50"),
        ("mrp", "200"),
        ("description", "50 bags"),
        ("category", "1"),
        ("inventory", "24"),
    ] {
        form.set_field(field, value).unwrap();
    }
    assert_eq!(form.selected_category().unwrap().name, "Grocery");

    let route = form.submit().await.unwrap();
    assert_eq!(route, Route::Products);

    let backend = db.lock().unwrap();
    assert_eq!(backend.products.len(), 4);
    let body = &backend.product_bodies[0];
    assert_eq!(body["shop"], json!(3));
    assert_eq!(body["price"], json!("180.50"));
    assert_eq!(body["category"], json!(1));
    assert_eq!(body["inventory"], json!(24));
}

#[tokio::test]
async fn test_edit_product_loads_and_updates() {
    let db = seeded();
    let app = signed_in(&db).await;

    let mut form = app.product_form(FormMode::Edit(2));
    form.load().await.unwrap();
    assert_eq!(form.draft().name, "Soap");
    assert_eq!(form.draft().category, "2");

    form.set_field("inventory", "55").unwrap();
    assert_eq!(form.submit().await.unwrap(), Route::Products);

    let backend = db.lock().unwrap();
    let soap = backend.products.iter().find(|p| p.id == 2).unwrap();
    assert_eq!(soap.inventory, 55);
    assert_eq!(soap.name, "Soap");
}

#[tokio::test]
async fn test_missing_field_keeps_draft_and_sends_nothing() {
    let db = seeded();
    let app = signed_in(&db).await;

    let mut form = app.product_form(FormMode::Create);
    form.load().await.unwrap();
    form.set_field("name", "Half done").unwrap();

    let err = form.submit().await.unwrap_err();
    assert!(matches!(err, ClientError::Validation(_)));
    assert_eq!(form.draft().name, "Half done");
    assert!(db.lock().unwrap().product_bodies.is_empty());
}

#[tokio::test]
async fn test_category_failure_leaves_selector_empty() {
    let db = seeded();
    db.lock().unwrap().fail_categories = true;
    let app = signed_in(&db).await;

    let mut form = app.product_form(FormMode::Edit(1));
    form.load().await.unwrap();
    assert!(form.categories().is_empty());
    assert_eq!(form.draft().name, "Basmati Rice");
}

#[tokio::test]
async fn test_edit_unknown_product_fails_to_load() {
    let db = seeded();
    let app = signed_in(&db).await;
    let mut form = app.product_form(FormMode::Edit(404));
    assert!(matches!(form.load().await, Err(ClientError::NotFound(_))));
}

// ========== Sale form ==========

#[tokio::test]
async fn test_line_totals_follow_quantity() {
    let db = seeded();
    let app = signed_in(&db).await;

    let mut form = app.sale_form(FormMode::Create);
    form.load().await.unwrap();

    let index = form.add_item().unwrap();
    assert_eq!(form.lines()[index].quantity, 1);

    let line = form.select_product(index, 1).unwrap();
    assert_eq!(line.product_name, "Basmati Rice");
    assert_eq!(line.product_price, Decimal::from(10));

    let line = form.set_quantity(index, 2).unwrap();
    assert_eq!(line.line_total(), Decimal::from(20));

    let line = form.set_quantity(index, 3).unwrap();
    assert_eq!(line.line_total(), Decimal::from(30));
    assert_eq!(line.product_price, Decimal::from(10));

    let second = form.add_item().unwrap();
    form.select_product(second, 2).unwrap();
    assert_eq!(form.grand_total(), Decimal::from(34));
}

#[tokio::test]
async fn test_sale_with_two_lines_creates_sale_and_two_items() {
    let db = seeded();
    let app = signed_in(&db).await;

    let mut form = app.sale_form(FormMode::Create);
    form.load().await.unwrap();
    for (product, quantity) in [(1, 2), (3, 1)] {
        let index = form.add_item().unwrap();
        form.select_product(index, product).unwrap();
        form.set_quantity(index, quantity).unwrap();
    }

    assert_eq!(form.submit().await.unwrap(), Route::Sales);

    let backend = db.lock().unwrap();
    assert_eq!(backend.sales.len(), 1);
    assert_eq!(backend.sale_bodies, vec![json!({ "shop": 3 })]);
    let sale_id = backend.sales[0].id;
    let mut items: Vec<(i64, i64)> = backend
        .items
        .iter()
        .filter(|item| item.sale == sale_id)
        .map(|item| (item.product, item.quantity))
        .collect();
    items.sort();
    assert_eq!(items, vec![(1, 2), (3, 1)]);
    assert!(form.lines().iter().all(|line| line.item_id.is_some()));
}

#[tokio::test]
async fn test_failed_item_leaves_partial_sale() {
    let db = seeded();
    db.lock().unwrap().fail_items_for_product = Some(3);
    let app = signed_in(&db).await;

    let mut form = app.sale_form(FormMode::Create);
    assert_eq!(form.policy(), SaleItemFailurePolicy::LeavePartial);
    form.load().await.unwrap();
    for product in [1, 3] {
        let index = form.add_item().unwrap();
        form.select_product(index, product).unwrap();
    }

    let err = form.submit().await.unwrap_err();
    match err {
        ClientError::PartialSale { requested, created, ref failures, compensated, .. } => {
            assert_eq!((requested, created), (2, 1));
            assert_eq!(failures.len(), 1);
            assert!(!compensated);
        }
        other => panic!("expected partial sale, got {:?}", other),
    }

    // No rollback: the sale stays with fewer items than entered
    let backend = db.lock().unwrap();
    assert_eq!(backend.sales.len(), 1);
    assert_eq!(backend.items.len(), 1);
    assert_eq!(backend.items[0].product, 1);
}

#[tokio::test]
async fn test_compensation_removes_partial_sale() {
    let db = seeded();
    db.lock().unwrap().fail_items_for_product = Some(3);
    let app = signed_in(&db).await.with_policy(SaleItemFailurePolicy::Compensate);

    let mut form = app.sale_form(FormMode::Create);
    form.load().await.unwrap();
    for product in [1, 3] {
        let index = form.add_item().unwrap();
        form.select_product(index, product).unwrap();
    }

    let err = form.submit().await.unwrap_err();
    assert!(matches!(err, ClientError::PartialSale { compensated: true, .. }));
    assert!(err.to_string().contains("sale removed"));
    assert!(form.sale().is_none());

    let backend = db.lock().unwrap();
    assert!(backend.sales.is_empty());
    assert!(backend.items.is_empty());
}

#[tokio::test]
async fn test_empty_shop_listing_uses_fallback() {
    let db = seeded();
    db.lock().unwrap().shops.clear();
    let app = signed_in(&db).await.with_shop_ids(1, 7);

    let mut form = app.sale_form(FormMode::Create);
    form.load().await.unwrap();
    let index = form.add_item().unwrap();
    form.select_product(index, 2).unwrap();
    form.submit().await.unwrap();

    assert_eq!(db.lock().unwrap().sale_bodies, vec![json!({ "shop": 7 })]);
}

#[tokio::test]
async fn test_oversized_quantity_is_rejected() {
    let db = seeded();
    let app = signed_in(&db).await;

    let mut form = app.sale_form(FormMode::Create);
    form.load().await.unwrap();
    let index = form.add_item().unwrap();
    form.select_product(index, 3).unwrap();

    let err = form.set_quantity(index, i64::MAX).unwrap_err();
    assert!(matches!(err, ClientError::Validation(_)));
    assert_eq!(form.lines()[index].quantity, 1);
    assert_eq!(form.grand_total(), Decimal::from(25));

    form.set_quantity(index, MAX_LINE_QUANTITY).unwrap();
    assert_eq!(form.grand_total(), Decimal::from(25_000_000));
}

#[tokio::test]
async fn test_loaded_quantity_over_limit_is_not_submitted() {
    let db = seeded();
    seed_sale(&db);
    db.lock().unwrap().items[0].quantity = i64::MAX;
    let app = signed_in(&db).await;

    let mut form = app.sale_form(FormMode::Edit(50));
    form.load().await.unwrap();
    assert_eq!(form.grand_total(), Decimal::from(i64::MAX) * Decimal::from(10));

    assert!(matches!(form.submit().await, Err(ClientError::Validation(_))));
    assert!(db.lock().unwrap().item_updates.is_empty());
}

#[tokio::test]
async fn test_line_without_product_is_rejected() {
    let db = seeded();
    let app = signed_in(&db).await;

    let mut form = app.sale_form(FormMode::Create);
    form.load().await.unwrap();
    form.add_item().unwrap();

    assert!(matches!(form.submit().await, Err(ClientError::Validation(_))));
    assert!(db.lock().unwrap().sales.is_empty());
}

fn seed_sale(db: &common::Db) {
    let mut backend = db.lock().unwrap();
    backend.sales.push(sale(50, "2025-05-04T10:15:00Z", 45, 9));
    backend.items = vec![
        SaleItem { id: 61, sale: 50, product: 1, quantity: 2 },
        SaleItem { id: 62, sale: 50, product: 99, quantity: 1 },
        // Belongs to another sale
        SaleItem { id: 63, sale: 51, product: 2, quantity: 5 },
    ];
}

#[tokio::test]
async fn test_view_mode_loads_only_this_sales_items() {
    let db = seeded();
    seed_sale(&db);
    let app = signed_in(&db).await;

    let mut form = app.sale_form(FormMode::Edit(50));
    form.load().await.unwrap();

    assert_eq!(form.title(), "View Sale");
    assert_eq!(form.sale().unwrap().receipt_number.as_deref(), Some("R-0050"));
    assert_eq!(form.sale_date().to_string(), "2025-05-04");

    let lines = form.lines();
    assert_eq!(lines.len(), 2);
    assert_eq!(lines[0].product_name, "Basmati Rice");
    assert_eq!(lines[0].line_total(), Decimal::from(20));
    // Unknown product: blank name, zero price
    assert!(lines[1].product_name.is_empty());
    assert_eq!(lines[1].product_price, Decimal::ZERO);
}

#[tokio::test]
async fn test_view_mode_only_updates_quantities() {
    let db = seeded();
    seed_sale(&db);
    let app = signed_in(&db).await;

    let mut form = app.sale_form(FormMode::Edit(50));
    form.load().await.unwrap();

    assert!(matches!(form.add_item(), Err(ClientError::Validation(_))));
    assert!(matches!(form.select_product(0, 2), Err(ClientError::Validation(_))));

    form.set_quantity(0, 4).unwrap();
    assert_eq!(form.submit().await.unwrap(), Route::Sales);

    let backend = db.lock().unwrap();
    let mut updates = backend.item_updates.clone();
    updates.sort();
    assert_eq!(updates, vec![(61, 4), (62, 1)]);
    assert_eq!(backend.items[0].quantity, 4);
    assert!(backend.sale_bodies.is_empty());
}

#[tokio::test]
async fn test_sale_form_opens_without_products() {
    let db = seeded();
    seed_sale(&db);
    let app = signed_in(&db).await;
    db.lock().unwrap().products.clear();

    let mut form = app.sale_form(FormMode::Edit(50));
    form.load().await.unwrap();
    assert!(form.products().is_empty());
    assert_eq!(form.grand_total(), Decimal::ZERO);
}
