//! Product add/edit form

use std::str::FromStr;

use shared::models::{Category, Product, ProductPayload};
use shop_client::{ClientError, ClientResult, HttpClient, ShopApi};

use crate::routes::Route;
use crate::scope::ViewScope;

/// Whether a form creates a new record or edits an existing one
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FormMode {
    Create,
    Edit(i64),
}

impl FormMode {
    pub fn from_id(id: Option<i64>) -> Self {
        id.map_or(FormMode::Create, FormMode::Edit)
    }

    pub fn id(self) -> Option<i64> {
        match self {
            FormMode::Create => None,
            FormMode::Edit(id) => Some(id),
        }
    }
}

/// Editable product fields, as entered
///
/// Values are kept as text while editing and only parsed on submit.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ProductDraft {
    pub name: String,
    pub price: String,
    pub mrp: String,
    pub description: String,
    /// Selected category id
    pub category: String,
    pub inventory: String,
}

impl ProductDraft {
    pub const FIELDS: [&'static str; 6] =
        ["name", "price", "mrp", "description", "category", "inventory"];

    pub fn from_product(product: &Product) -> Self {
        Self {
            name: product.name.clone(),
            price: product.price.to_string(),
            mrp: product.mrp.to_string(),
            description: product.description.clone(),
            category: product.category.map(|id| id.to_string()).unwrap_or_default(),
            inventory: product.inventory.to_string(),
        }
    }

    fn slot(&mut self, field: &str) -> Option<&mut String> {
        match field {
            "name" => Some(&mut self.name),
            "price" => Some(&mut self.price),
            "mrp" => Some(&mut self.mrp),
            "description" => Some(&mut self.description),
            "category" => Some(&mut self.category),
            "inventory" => Some(&mut self.inventory),
            _ => None,
        }
    }

    pub fn get(&self, field: &str) -> Option<&str> {
        match field {
            "name" => Some(&self.name),
            "price" => Some(&self.price),
            "mrp" => Some(&self.mrp),
            "description" => Some(&self.description),
            "category" => Some(&self.category),
            "inventory" => Some(&self.inventory),
            _ => None,
        }
    }

    /// Write `value` into the field called `field`
    pub fn set(&mut self, field: &str, value: impl Into<String>) -> ClientResult<()> {
        let slot = self
            .slot(field)
            .ok_or_else(|| ClientError::Validation(format!("Unknown product field '{}'", field)))?;
        *slot = value.into();
        Ok(())
    }

    /// Required fields left blank
    pub fn missing_fields(&self) -> Vec<&'static str> {
        Self::FIELDS
            .into_iter()
            .filter(|field| self.get(field).is_none_or(|v| v.trim().is_empty()))
            .collect()
    }

    /// Submit body: the draft plus the owning shop
    pub fn to_payload(&self, shop: i64) -> ClientResult<ProductPayload> {
        let missing = self.missing_fields();
        if !missing.is_empty() {
            return Err(ClientError::Validation(format!(
                "Required fields missing: {}",
                missing.join(", ")
            )));
        }

        Ok(ProductPayload {
            name: self.name.trim().to_string(),
            price: parse_field("price", &self.price)?,
            mrp: parse_field("mrp", &self.mrp)?,
            description: self.description.clone(),
            category: parse_field("category", &self.category)?,
            inventory: parse_field("inventory", &self.inventory)?,
            shop,
        })
    }
}

fn parse_field<T: FromStr>(field: &str, value: &str) -> ClientResult<T> {
    value
        .trim()
        .parse()
        .map_err(|_| ClientError::Validation(format!("'{}' is not a valid {}", value, field)))
}

/// Product add/edit screen
#[derive(Debug)]
pub struct ProductForm<H> {
    api: ShopApi<H>,
    scope: ViewScope,
    mode: FormMode,
    shop_id: i64,
    draft: ProductDraft,
    categories: Vec<Category>,
}

impl<H: HttpClient> ProductForm<H> {
    pub fn new(api: ShopApi<H>, mode: FormMode, shop_id: i64) -> Self {
        Self {
            api,
            scope: ViewScope::new(),
            mode,
            shop_id,
            draft: ProductDraft::default(),
            categories: Vec::new(),
        }
    }

    pub fn with_scope(mut self, scope: ViewScope) -> Self {
        self.scope = scope;
        self
    }

    /// Fetch categories and, when editing, the product itself.
    ///
    /// The category fetch does not depend on the product; when it fails
    /// the selector simply stays empty.
    pub async fn load(&mut self) -> ClientResult<()> {
        match self.scope.run(self.api.list_categories()).await {
            Ok(categories) => self.categories = categories,
            Err(ClientError::Cancelled) => return Err(ClientError::Cancelled),
            Err(e) => tracing::error!(error = %e, "Failed to fetch categories"),
        }

        if let FormMode::Edit(id) = self.mode {
            let product = self.scope.run(self.api.get_product(id)).await.inspect_err(|e| {
                tracing::error!(id, error = %e, "Failed to fetch product");
            })?;
            self.draft = ProductDraft::from_product(&product);
        }
        Ok(())
    }

    pub fn set_field(&mut self, field: &str, value: impl Into<String>) -> ClientResult<()> {
        self.draft.set(field, value)
    }

    /// Save the draft. On success returns the route to navigate to; on
    /// failure the draft is kept as it is.
    pub async fn submit(&mut self) -> ClientResult<Route> {
        let payload = self.draft.to_payload(self.shop_id)?;

        let saved = match self.mode {
            FormMode::Edit(id) => self.scope.run(self.api.update_product(id, &payload)).await,
            FormMode::Create => self.scope.run(self.api.create_product(&payload)).await,
        };

        match saved {
            Ok(product) => {
                tracing::info!(id = product.id, name = %product.name, "Product saved");
                Ok(Route::Products)
            }
            Err(e) => {
                tracing::error!(error = %e, "Error saving product");
                Err(e)
            }
        }
    }

    pub fn mode(&self) -> FormMode {
        self.mode
    }

    pub fn title(&self) -> &'static str {
        match self.mode {
            FormMode::Create => "Add Product",
            FormMode::Edit(_) => "Edit Product",
        }
    }

    pub fn draft(&self) -> &ProductDraft {
        &self.draft
    }

    pub fn categories(&self) -> &[Category] {
        &self.categories
    }

    /// Name of the selected category, if it is among the loaded ones
    pub fn selected_category(&self) -> Option<&Category> {
        let id: i64 = self.draft.category.trim().parse().ok()?;
        self.categories.iter().find(|c| c.id == id)
    }

    pub fn scope(&self) -> &ViewScope {
        &self.scope
    }
}
