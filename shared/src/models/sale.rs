//! Sale Model
//!
//! A sale is created as a shell (`SaleCreate`) and its line items are
//! attached afterwards through the sale-items endpoint.

use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// Sale entity
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Sale {
    pub id: i64,
    /// Sale date (ISO 8601 date or date-time)
    #[serde(default)]
    pub sale_date: String,
    #[serde(default)]
    pub receipt_number: Option<String>,
    #[serde(default)]
    pub total_sales: Option<Decimal>,
    #[serde(default)]
    pub total_profit: Option<Decimal>,
    /// Owning shop
    #[serde(default)]
    pub shop: Option<i64>,
}

impl Sale {
    /// Calendar day of the sale, if the date is parseable
    pub fn sale_day(&self) -> Option<NaiveDate> {
        crate::util::parse_day(&self.sale_date)
    }
}

/// Create sale (shell) payload
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SaleCreate {
    pub shop: i64,
}

/// Sale line item entity
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SaleItem {
    pub id: i64,
    /// Sale reference
    pub sale: i64,
    /// Product reference
    pub product: i64,
    pub quantity: i64,
}

/// Create sale item payload
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SaleItemCreate {
    pub sale: i64,
    pub product: i64,
    pub quantity: i64,
}

/// Update sale item payload (quantity is the only editable field)
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SaleItemUpdate {
    pub quantity: i64,
}
