//! Home dashboard: last month's sales figures

use chrono::NaiveDate;
use futures::future::try_join_all;
use rust_decimal::Decimal;
use serde::Serialize;
use shared::models::{Product, ProductSold, Sale};
use shared::util::{one_month_before, today};
use shop_client::{ClientResult, HttpClient, ShopApi};

use crate::scope::ViewScope;

/// Most top sellers shown
pub const TOP_SELLER_LIMIT: usize = 10;

pub const NO_TOP_SELLERS: &str = "No products sold in the last month.";

/// Chart label format, e.g. `May 03, 2025`
const CHART_LABEL_FORMAT: &str = "%b %d, %Y";

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TopSeller {
    pub product_id: i64,
    pub name: String,
    pub quantity_sold: i64,
    pub inventory: i64,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ChartPoint {
    pub label: String,
    pub value: Decimal,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct HomeMetrics {
    pub total_profit: Decimal,
    pub total_sales: Decimal,
    pub average_order_value: Decimal,
    pub sale_count: usize,
    pub top_sellers: Vec<TopSeller>,
    pub sales_trend: Vec<ChartPoint>,
}

impl HomeMetrics {
    /// Aggregate the fetched data.
    ///
    /// `sold[i]` is the products-sold row for `products[i]`. Only sales
    /// dated on or after `since` count.
    pub fn compute(products: &[Product], sold: &[ProductSold], sales: &[Sale], since: NaiveDate) -> Self {
        let mut top_sellers: Vec<TopSeller> = products
            .iter()
            .zip(sold)
            .filter(|(_, row)| row.quantity() > 0)
            .map(|(product, row)| TopSeller {
                product_id: product.id,
                name: product.name.clone(),
                quantity_sold: row.quantity(),
                inventory: product.inventory,
            })
            .collect();
        top_sellers.sort_by(|a, b| b.quantity_sold.cmp(&a.quantity_sold));
        top_sellers.truncate(TOP_SELLER_LIMIT);

        let mut recent: Vec<(NaiveDate, &Sale)> = sales
            .iter()
            .filter_map(|sale| sale.sale_day().map(|day| (day, sale)))
            .filter(|(day, _)| *day >= since)
            .collect();
        recent.sort_by_key(|(day, _)| *day);

        let total_profit: Decimal = recent
            .iter()
            .map(|(_, sale)| sale.total_profit.unwrap_or_default())
            .sum();
        let total_sales: Decimal = recent
            .iter()
            .map(|(_, sale)| sale.total_sales.unwrap_or_default())
            .sum();
        let sale_count = recent.len();
        let average_order_value = if sale_count == 0 {
            Decimal::ZERO
        } else {
            (total_sales / Decimal::from(sale_count)).round_dp(2)
        };

        let sales_trend = recent
            .iter()
            .map(|(day, sale)| ChartPoint {
                label: day.format(CHART_LABEL_FORMAT).to_string(),
                value: sale.total_sales.unwrap_or_default(),
            })
            .collect();

        Self {
            total_profit,
            total_sales,
            average_order_value,
            sale_count,
            top_sellers,
            sales_trend,
        }
    }
}

/// Home screen
#[derive(Debug)]
pub struct HomeView<H> {
    api: ShopApi<H>,
    scope: ViewScope,
    loading: bool,
    metrics: HomeMetrics,
}

impl<H: HttpClient> HomeView<H> {
    pub fn new(api: ShopApi<H>) -> Self {
        Self {
            api,
            scope: ViewScope::new(),
            loading: false,
            metrics: HomeMetrics::default(),
        }
    }

    pub fn with_scope(mut self, scope: ViewScope) -> Self {
        self.scope = scope;
        self
    }

    pub async fn load(&mut self) -> ClientResult<()> {
        self.load_for(today()).await
    }

    /// Load the month ending on `day`. On failure the metrics are zeroed.
    pub async fn load_for(&mut self, day: NaiveDate) -> ClientResult<()> {
        self.loading = true;
        let result = self.fetch(day).await;
        self.loading = false;

        match result {
            Ok(metrics) => {
                self.metrics = metrics;
                Ok(())
            }
            Err(e) => {
                tracing::error!(error = %e, "Error fetching data");
                self.metrics = HomeMetrics::default();
                Err(e)
            }
        }
    }

    async fn fetch(&self, day: NaiveDate) -> ClientResult<HomeMetrics> {
        let since = one_month_before(day);

        let products = self.scope.run(self.api.list_products()).await?;
        let sold = self
            .scope
            .run(try_join_all(
                products.iter().map(|p| self.api.products_sold(p.id, since, day)),
            ))
            .await?;
        let sales = self.scope.run(self.api.list_sales()).await?;

        Ok(HomeMetrics::compute(&products, &sold, &sales, since))
    }

    pub fn is_loading(&self) -> bool {
        self.loading
    }

    pub fn metrics(&self) -> &HomeMetrics {
        &self.metrics
    }

    pub fn scope(&self) -> &ViewScope {
        &self.scope
    }
}
