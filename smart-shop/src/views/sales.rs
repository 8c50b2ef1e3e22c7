//! Sales list

use std::fmt;
use std::str::FromStr;

use shared::models::Sale;
use shop_client::{ClientResult, HttpClient, ShopApi};

use super::list::{ListView, Listable, Resource, SortValue};

/// Sales list screen
pub type SaleListView<H> = ListView<Sale, H>;

/// Sortable sales table columns
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SaleColumn {
    Id,
    ReceiptNumber,
    SaleDate,
    TotalSales,
}

impl SaleColumn {
    pub const ALL: [SaleColumn; 4] = [
        SaleColumn::Id,
        SaleColumn::ReceiptNumber,
        SaleColumn::SaleDate,
        SaleColumn::TotalSales,
    ];

    pub fn key(self) -> &'static str {
        match self {
            SaleColumn::Id => "id",
            SaleColumn::ReceiptNumber => "receipt_number",
            SaleColumn::SaleDate => "sale_date",
            SaleColumn::TotalSales => "total_sales",
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            SaleColumn::Id => "ID",
            SaleColumn::ReceiptNumber => "Receipt Number",
            SaleColumn::SaleDate => "Sale Date",
            SaleColumn::TotalSales => "Total Sales (PKR)",
        }
    }
}

impl FromStr for SaleColumn {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let wanted = s.trim().to_lowercase();
        SaleColumn::ALL
            .into_iter()
            .find(|c| c.key() == wanted)
            .or(match wanted.as_str() {
                "receipt" => Some(SaleColumn::ReceiptNumber),
                "date" => Some(SaleColumn::SaleDate),
                "total" => Some(SaleColumn::TotalSales),
                _ => None,
            })
            .ok_or_else(|| format!("unknown sale column '{}'", s))
    }
}

impl fmt::Display for SaleColumn {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.key())
    }
}

impl Listable for Sale {
    type Column = SaleColumn;

    fn id(&self) -> i64 {
        self.id
    }

    /// Sales are searched by receipt number
    fn search_text(&self) -> &str {
        self.receipt_number.as_deref().unwrap_or_default()
    }

    fn sort_value(&self, column: SaleColumn) -> SortValue<'_> {
        match column {
            SaleColumn::Id => SortValue::Int(self.id),
            SaleColumn::ReceiptNumber => self.receipt_number.as_deref().into(),
            SaleColumn::SaleDate => SortValue::Text(&self.sale_date),
            SaleColumn::TotalSales => self.total_sales.into(),
        }
    }
}

impl Resource for Sale {
    const LABEL: &'static str = "sale";
    const EMPTY_MESSAGE: &'static str = "No sales records available.";

    async fn fetch_all<H: HttpClient>(api: &ShopApi<H>) -> ClientResult<Vec<Self>> {
        api.list_sales().await
    }

    async fn delete<H: HttpClient>(api: &ShopApi<H>, id: i64) -> ClientResult<()> {
        api.delete_sale(id).await
    }
}
