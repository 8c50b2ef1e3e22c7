//! Product Model

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// Product entity
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Product {
    pub id: i64,
    pub name: String,
    pub price: Decimal,
    /// Maximum retail price
    pub mrp: Decimal,
    #[serde(default)]
    pub description: String,
    /// Category reference
    #[serde(default)]
    pub category: Option<i64>,
    /// Category display name (read-only, joined by the backend)
    #[serde(default)]
    pub category_name: Option<String>,
    /// Units in stock
    #[serde(default)]
    pub inventory: i64,
    /// Creation time (ISO 8601)
    #[serde(default)]
    pub added_at: Option<String>,
}

/// Create/update product payload
///
/// The same body is sent to `POST products/` and `PUT products/{id}/`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ProductPayload {
    pub name: String,
    pub price: Decimal,
    pub mrp: Decimal,
    pub description: String,
    pub category: i64,
    pub inventory: i64,
    /// Owning shop
    pub shop: i64,
}

/// Sold-quantity aggregate for one product over a date range
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ProductSold {
    #[serde(default)]
    pub product_id: Option<i64>,
    /// Null when the product has no sales in the range
    #[serde(default)]
    pub total_quantity_sold: Option<i64>,
}

impl ProductSold {
    /// Quantity sold, treating a missing aggregate as zero
    pub fn quantity(&self) -> i64 {
        self.total_quantity_sold.unwrap_or(0)
    }
}
