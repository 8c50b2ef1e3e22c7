//! Products list

use std::fmt;
use std::str::FromStr;

use shared::models::Product;
use shop_client::{ClientResult, HttpClient, ShopApi};

use super::list::{ListView, Listable, Resource, SortValue};

/// Products list screen
pub type ProductListView<H> = ListView<Product, H>;

/// Sortable product table columns
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ProductColumn {
    Id,
    Name,
    Category,
    Price,
    Mrp,
    Stock,
    AddedAt,
}

impl ProductColumn {
    pub const ALL: [ProductColumn; 7] = [
        ProductColumn::Id,
        ProductColumn::Name,
        ProductColumn::Category,
        ProductColumn::Price,
        ProductColumn::Mrp,
        ProductColumn::Stock,
        ProductColumn::AddedAt,
    ];

    /// Field name the column sorts by
    pub fn key(self) -> &'static str {
        match self {
            ProductColumn::Id => "id",
            ProductColumn::Name => "name",
            ProductColumn::Category => "category_name",
            ProductColumn::Price => "price",
            ProductColumn::Mrp => "mrp",
            ProductColumn::Stock => "inventory",
            ProductColumn::AddedAt => "added_at",
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            ProductColumn::Id => "ID",
            ProductColumn::Name => "Name",
            ProductColumn::Category => "Category",
            ProductColumn::Price => "Price (PKR)",
            ProductColumn::Mrp => "MRP (PKR)",
            ProductColumn::Stock => "Stock",
            ProductColumn::AddedAt => "Added At",
        }
    }
}

impl FromStr for ProductColumn {
    type Err = String;

    /// Accepts the field key or the short header name
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let wanted = s.trim().to_lowercase();
        ProductColumn::ALL
            .into_iter()
            .find(|c| c.key() == wanted || c.label().to_lowercase() == wanted)
            .or(match wanted.as_str() {
                "category" => Some(ProductColumn::Category),
                "stock" => Some(ProductColumn::Stock),
                _ => None,
            })
            .ok_or_else(|| format!("unknown product column '{}'", s))
    }
}

impl fmt::Display for ProductColumn {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.key())
    }
}

impl Listable for Product {
    type Column = ProductColumn;

    fn id(&self) -> i64 {
        self.id
    }

    fn search_text(&self) -> &str {
        &self.name
    }

    fn category_name(&self) -> Option<&str> {
        self.category_name.as_deref()
    }

    fn sort_value(&self, column: ProductColumn) -> SortValue<'_> {
        match column {
            ProductColumn::Id => SortValue::Int(self.id),
            ProductColumn::Name => SortValue::Text(&self.name),
            ProductColumn::Category => self.category_name.as_deref().into(),
            ProductColumn::Price => SortValue::Decimal(self.price),
            ProductColumn::Mrp => SortValue::Decimal(self.mrp),
            ProductColumn::Stock => SortValue::Int(self.inventory),
            ProductColumn::AddedAt => self.added_at.as_deref().into(),
        }
    }
}

impl Resource for Product {
    const LABEL: &'static str = "product";
    const EMPTY_MESSAGE: &'static str = "No products found.";
    const LOADS_CATEGORIES: bool = true;

    async fn fetch_all<H: HttpClient>(api: &ShopApi<H>) -> ClientResult<Vec<Self>> {
        api.list_products().await
    }

    async fn delete<H: HttpClient>(api: &ShopApi<H>, id: i64) -> ClientResult<()> {
        api.delete_product(id).await
    }
}
