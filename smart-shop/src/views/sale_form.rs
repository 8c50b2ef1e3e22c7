//! Sale add/view form
//!
//! A new sale is saved in several requests: the sale shell first, then one
//! sale-item create per line. The backend offers no transaction across
//! them, so a failed item leaves a sale with fewer items than entered.
//! [`SaleItemFailurePolicy`] decides what happens to that sale.

use chrono::NaiveDate;
use futures::future::join_all;
use rust_decimal::Decimal;
use shared::models::{Product, Sale, SaleCreate, SaleItem, SaleItemCreate, SaleItemUpdate};
use shared::util::today;
use shop_client::{ClientError, ClientResult, HttpClient, ShopApi};

use crate::routes::Route;
use crate::scope::ViewScope;
use crate::views::FormMode;

/// Largest quantity accepted on one sale line
pub const MAX_LINE_QUANTITY: i64 = 1_000_000;

/// One line of the sale editor
///
/// Name and price are looked up in the product list for display only;
/// submit sends product id and quantity.
#[derive(Debug, Clone, PartialEq)]
pub struct SaleLine {
    /// Persisted sale-item id, for lines loaded from an existing sale
    pub item_id: Option<i64>,
    pub product: Option<i64>,
    pub quantity: i64,
    pub product_name: String,
    pub product_price: Decimal,
}

impl SaleLine {
    /// Line appended by "Add Item"
    pub fn blank() -> Self {
        Self {
            item_id: None,
            product: None,
            quantity: 1,
            product_name: String::new(),
            product_price: Decimal::ZERO,
        }
    }

    fn from_item(item: &SaleItem, products: &[Product]) -> Self {
        let product = products.iter().find(|p| p.id == item.product);
        Self {
            item_id: Some(item.id),
            product: Some(item.product),
            quantity: item.quantity,
            product_name: product.map(|p| p.name.clone()).unwrap_or_default(),
            product_price: product.map_or(Decimal::ZERO, |p| p.price),
        }
    }

    /// Price times quantity, saturating at the `Decimal` bounds
    pub fn line_total(&self) -> Decimal {
        self.product_price.saturating_mul(Decimal::from(self.quantity))
    }
}

/// What to do with a new sale when some of its items failed to save
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SaleItemFailurePolicy {
    /// Keep the sale and the items that were saved
    #[default]
    LeavePartial,
    /// Delete the sale again (the backend removes its items with it)
    Compensate,
}

impl SaleItemFailurePolicy {
    pub fn from_compensate(compensate: bool) -> Self {
        if compensate {
            SaleItemFailurePolicy::Compensate
        } else {
            SaleItemFailurePolicy::LeavePartial
        }
    }
}

/// Sale add/view screen
#[derive(Debug)]
pub struct SaleForm<H> {
    api: ShopApi<H>,
    scope: ViewScope,
    mode: FormMode,
    fallback_shop_id: i64,
    policy: SaleItemFailurePolicy,
    sale: Option<Sale>,
    sale_date: NaiveDate,
    lines: Vec<SaleLine>,
    products: Vec<Product>,
}

impl<H: HttpClient> SaleForm<H> {
    pub fn new(api: ShopApi<H>, mode: FormMode, fallback_shop_id: i64) -> Self {
        Self {
            api,
            scope: ViewScope::new(),
            mode,
            fallback_shop_id,
            policy: SaleItemFailurePolicy::default(),
            sale: None,
            sale_date: today(),
            lines: Vec::new(),
            products: Vec::new(),
        }
    }

    pub fn with_policy(mut self, policy: SaleItemFailurePolicy) -> Self {
        self.policy = policy;
        self
    }

    pub fn with_scope(mut self, scope: ViewScope) -> Self {
        self.scope = scope;
        self
    }

    /// Fetch products, then (for an existing sale) the sale and its items.
    ///
    /// Without products the editor still opens; lines then show no name
    /// and a zero price.
    pub async fn load(&mut self) -> ClientResult<()> {
        match self.scope.run(self.api.list_products()).await {
            Ok(products) => self.products = products,
            Err(ClientError::Cancelled) => return Err(ClientError::Cancelled),
            Err(e) => tracing::warn!(error = %e, "Failed to fetch products"),
        }

        let FormMode::Edit(id) = self.mode else {
            return Ok(());
        };

        let sale = self.scope.run(self.api.get_sale(id)).await.inspect_err(|e| {
            tracing::error!(id, error = %e, "Failed to fetch sale");
        })?;
        if let Some(day) = sale.sale_day() {
            self.sale_date = day;
        }
        self.sale = Some(sale);

        let items = self.scope.run(self.api.list_sale_items(id)).await.inspect_err(|e| {
            tracing::error!(id, error = %e, "Failed to fetch sale items");
        })?;
        self.lines = items
            .iter()
            .filter(|item| item.sale == id)
            .map(|item| SaleLine::from_item(item, &self.products))
            .collect();
        Ok(())
    }

    fn ensure_creating(&self, action: &str) -> ClientResult<()> {
        match self.mode {
            FormMode::Create => Ok(()),
            FormMode::Edit(_) => Err(ClientError::Validation(format!(
                "Cannot {} on an existing sale",
                action
            ))),
        }
    }

    fn line_mut(&mut self, index: usize) -> ClientResult<&mut SaleLine> {
        self.lines
            .get_mut(index)
            .ok_or_else(|| ClientError::Validation(format!("No sale line #{}", index + 1)))
    }

    /// Append a blank line, returning its index
    pub fn add_item(&mut self) -> ClientResult<usize> {
        self.ensure_creating("add items")?;
        self.lines.push(SaleLine::blank());
        Ok(self.lines.len() - 1)
    }

    /// Pick the product of a line; name and price come from the product list
    pub fn select_product(&mut self, index: usize, product_id: i64) -> ClientResult<&SaleLine> {
        self.ensure_creating("change products")?;
        let (name, price) = self
            .products
            .iter()
            .find(|p| p.id == product_id)
            .map_or((String::new(), Decimal::ZERO), |p| (p.name.clone(), p.price));

        let line = self.line_mut(index)?;
        line.product = Some(product_id);
        line.product_name = name;
        line.product_price = price;
        Ok(line)
    }

    pub fn set_quantity(&mut self, index: usize, quantity: i64) -> ClientResult<&SaleLine> {
        if quantity > MAX_LINE_QUANTITY {
            return Err(ClientError::Validation(format!(
                "Quantity {} exceeds the limit of {}",
                quantity, MAX_LINE_QUANTITY
            )));
        }
        let line = self.line_mut(index)?;
        line.quantity = quantity;
        Ok(line)
    }

    pub fn grand_total(&self) -> Decimal {
        self.lines
            .iter()
            .fold(Decimal::ZERO, |total, line| total.saturating_add(line.line_total()))
    }

    fn validate(&self) -> ClientResult<()> {
        for (index, line) in self.lines.iter().enumerate() {
            if line.product.is_none() {
                return Err(ClientError::Validation(format!(
                    "Line {} has no product",
                    index + 1
                )));
            }
            if line.quantity < 1 {
                return Err(ClientError::Validation(format!(
                    "Line {} needs a quantity of at least 1",
                    index + 1
                )));
            }
            if line.quantity > MAX_LINE_QUANTITY {
                return Err(ClientError::Validation(format!(
                    "Line {} exceeds the quantity limit of {}",
                    index + 1,
                    MAX_LINE_QUANTITY
                )));
            }
        }
        Ok(())
    }

    /// Save the sale; returns the route to navigate to.
    pub async fn submit(&mut self) -> ClientResult<Route> {
        self.validate()?;
        let result = match self.mode {
            FormMode::Create => self.create().await,
            FormMode::Edit(id) => self.update(id).await,
        };
        match result {
            Ok(()) => Ok(Route::Sales),
            Err(e) => {
                tracing::error!(error = %e, "Error saving sale");
                Err(e)
            }
        }
    }

    /// First shop of the listing, else the configured fallback
    async fn resolve_shop(&self) -> ClientResult<i64> {
        let shops = self.scope.run(self.api.list_shops()).await?;
        Ok(shops.first().map_or(self.fallback_shop_id, |shop| shop.id))
    }

    async fn create(&mut self) -> ClientResult<()> {
        let shop = self.resolve_shop().await?;
        let sale = self.scope.run(self.api.create_sale(&SaleCreate { shop })).await?;
        tracing::info!(sale_id = sale.id, shop, "Sale created");

        let api = &self.api;
        let creates = self.lines.iter().filter_map(|line| {
            let payload = SaleItemCreate {
                sale: sale.id,
                product: line.product?,
                quantity: line.quantity,
            };
            Some(async move { api.create_sale_item(&payload).await })
        });
        let results = self.scope.run(async { Ok(join_all(creates).await) }).await?;

        let requested = results.len();
        let mut failures = Vec::new();
        for (line, result) in self.lines.iter_mut().zip(results) {
            match result {
                Ok(item) => line.item_id = Some(item.id),
                Err(e) => {
                    tracing::warn!(sale_id = sale.id, product = ?line.product, error = %e, "Sale item failed");
                    failures.push(e);
                }
            }
        }

        let created = requested - failures.len();
        let sale_id = sale.id;
        self.sale = Some(sale);
        if failures.is_empty() {
            tracing::info!(sale_id, items = created, "Sale saved");
            return Ok(());
        }

        let compensated = match self.policy {
            SaleItemFailurePolicy::LeavePartial => false,
            SaleItemFailurePolicy::Compensate => {
                match self.scope.run(self.api.delete_sale(sale_id)).await {
                    Ok(()) => {
                        tracing::info!(sale_id, "Partial sale removed");
                        self.sale = None;
                        for line in &mut self.lines {
                            line.item_id = None;
                        }
                        true
                    }
                    Err(e) => {
                        tracing::error!(sale_id, error = %e, "Failed to remove partial sale");
                        false
                    }
                }
            }
        };

        Err(ClientError::PartialSale {
            sale_id,
            requested,
            created,
            failures,
            compensated,
        })
    }

    /// One quantity update per persisted line, awaited together
    async fn update(&mut self, sale_id: i64) -> ClientResult<()> {
        let api = &self.api;
        let updates = self.lines.iter().filter_map(|line| {
            let item_id = line.item_id?;
            let payload = SaleItemUpdate {
                quantity: line.quantity,
            };
            Some(async move { api.update_sale_item(item_id, &payload).await })
        });
        let results = self.scope.run(async { Ok(join_all(updates).await) }).await?;

        let count = results.len();
        let mut first_error = None;
        for result in results {
            if let Err(e) = result {
                tracing::warn!(sale_id, error = %e, "Sale item update failed");
                first_error.get_or_insert(e);
            }
        }
        match first_error {
            Some(e) => Err(e),
            None => {
                tracing::info!(sale_id, items = count, "Sale updated");
                Ok(())
            }
        }
    }

    pub fn mode(&self) -> FormMode {
        self.mode
    }

    pub fn title(&self) -> &'static str {
        match self.mode {
            FormMode::Create => "Add Sale",
            FormMode::Edit(_) => "View Sale",
        }
    }

    pub fn policy(&self) -> SaleItemFailurePolicy {
        self.policy
    }

    /// The loaded (or just created) sale
    pub fn sale(&self) -> Option<&Sale> {
        self.sale.as_ref()
    }

    pub fn sale_date(&self) -> NaiveDate {
        self.sale_date
    }

    pub fn lines(&self) -> &[SaleLine] {
        &self.lines
    }

    pub fn products(&self) -> &[Product] {
        &self.products
    }

    pub fn scope(&self) -> &ViewScope {
        &self.scope
    }
}
