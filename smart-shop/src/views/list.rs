//! List views
//!
//! A list view holds the canonical collection last fetched from the
//! backend and derives the visible rows from it on demand: search filter,
//! category filter, then a stable sort on the selected column. Filtering
//! never touches the canonical list; only a confirmed remote delete does.

use std::cmp::Ordering;
use std::fmt;
use std::future::Future;

use rust_decimal::Decimal;
use shared::models::Category;
use shop_client::{ClientResult, HttpClient, ShopApi};

use crate::scope::ViewScope;

// ============================================================================
// Sorting
// ============================================================================

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SortDirection {
    #[default]
    Ascending,
    Descending,
}

impl SortDirection {
    pub fn flipped(self) -> Self {
        match self {
            SortDirection::Ascending => SortDirection::Descending,
            SortDirection::Descending => SortDirection::Ascending,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SortConfig<C> {
    pub column: C,
    pub direction: SortDirection,
}

/// Cell value used for ordering rows
///
/// Values of the same kind compare naturally. Different kinds rank
/// `Int < Decimal < Text`, and `Missing` ranks after every present value.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SortValue<'a> {
    Int(i64),
    Decimal(Decimal),
    Text(&'a str),
    Missing,
}

impl SortValue<'_> {
    pub fn is_missing(&self) -> bool {
        matches!(self, SortValue::Missing)
    }

    fn rank(&self) -> u8 {
        match self {
            SortValue::Int(_) => 0,
            SortValue::Decimal(_) => 1,
            SortValue::Text(_) => 2,
            SortValue::Missing => 3,
        }
    }
}

impl Ord for SortValue<'_> {
    fn cmp(&self, other: &Self) -> Ordering {
        match (self, other) {
            (SortValue::Int(a), SortValue::Int(b)) => a.cmp(b),
            (SortValue::Decimal(a), SortValue::Decimal(b)) => a.cmp(b),
            (SortValue::Text(a), SortValue::Text(b)) => a.cmp(b),
            _ => self.rank().cmp(&other.rank()),
        }
    }
}

impl PartialOrd for SortValue<'_> {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl<'a> From<Option<&'a str>> for SortValue<'a> {
    fn from(value: Option<&'a str>) -> Self {
        value.map_or(SortValue::Missing, SortValue::Text)
    }
}

impl From<Option<Decimal>> for SortValue<'_> {
    fn from(value: Option<Decimal>) -> Self {
        value.map_or(SortValue::Missing, SortValue::Decimal)
    }
}

// ============================================================================
// Listable
// ============================================================================

/// A record that can be shown in a list view
pub trait Listable {
    /// Sortable columns
    type Column: Copy + Eq + fmt::Debug;

    fn id(&self) -> i64;

    /// Field the search term is matched against
    fn search_text(&self) -> &str;

    /// Category display name, for records that have one
    fn category_name(&self) -> Option<&str> {
        None
    }

    fn sort_value(&self, column: Self::Column) -> SortValue<'_>;
}

/// Canonical list plus the filter/sort settings of one list view
#[derive(Debug, Clone)]
pub struct ListState<T: Listable> {
    items: Vec<T>,
    search: String,
    category: String,
    sort: Option<SortConfig<T::Column>>,
}

impl<T: Listable> Default for ListState<T> {
    fn default() -> Self {
        Self {
            items: Vec::new(),
            search: String::new(),
            category: String::new(),
            sort: None,
        }
    }
}

impl<T: Listable> ListState<T> {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_items(items: Vec<T>) -> Self {
        Self {
            items,
            ..Self::default()
        }
    }

    /// Replace the canonical list with a fresh fetch
    pub fn replace(&mut self, items: Vec<T>) {
        self.items = items;
    }

    /// Canonical list, unfiltered and in fetch order
    pub fn items(&self) -> &[T] {
        &self.items
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    pub fn search(&self) -> &str {
        &self.search
    }

    pub fn set_search(&mut self, term: impl Into<String>) {
        self.search = term.into();
    }

    pub fn category(&self) -> &str {
        &self.category
    }

    pub fn set_category(&mut self, name: impl Into<String>) {
        self.category = name.into();
    }

    pub fn sort(&self) -> Option<SortConfig<T::Column>> {
        self.sort
    }

    /// Column header click: same column flips direction, another column
    /// starts ascending.
    pub fn toggle_sort(&mut self, column: T::Column) -> SortConfig<T::Column> {
        let direction = match self.sort {
            Some(current) if current.column == column => current.direction.flipped(),
            _ => SortDirection::Ascending,
        };
        let config = SortConfig { column, direction };
        self.sort = Some(config);
        config
    }

    pub fn clear_sort(&mut self) {
        self.sort = None;
    }

    /// Rows to display for the current search, category and sort
    pub fn visible(&self) -> Vec<&T> {
        let search = self.search.to_lowercase();
        let category = self.category.to_lowercase();

        let mut rows: Vec<&T> = self
            .items
            .iter()
            .filter(|item| search.is_empty() || item.search_text().to_lowercase().contains(&search))
            .filter(|item| {
                category.is_empty()
                    || item
                        .category_name()
                        .is_some_and(|name| name.to_lowercase() == category)
            })
            .collect();

        if let Some(sort) = self.sort {
            // Stable; rows without a value stay last in either direction
            rows.sort_by(|a, b| {
                let (a, b) = (a.sort_value(sort.column), b.sort_value(sort.column));
                if a.is_missing() || b.is_missing() {
                    return a.cmp(&b);
                }
                match sort.direction {
                    SortDirection::Ascending => a.cmp(&b),
                    SortDirection::Descending => b.cmp(&a),
                }
            });
        }

        rows
    }

    /// Remove the entry with `id` from the canonical list
    pub fn remove(&mut self, id: i64) -> Option<T> {
        let index = self.items.iter().position(|item| item.id() == id)?;
        Some(self.items.remove(index))
    }
}

// ============================================================================
// List View
// ============================================================================

/// A backend collection a list view can fetch and delete from
pub trait Resource: Listable + Sized {
    /// Singular name used in log lines
    const LABEL: &'static str;

    /// Row shown when nothing is visible
    const EMPTY_MESSAGE: &'static str;

    /// Whether the view also needs the category listing (for its filter)
    const LOADS_CATEGORIES: bool = false;

    fn fetch_all<H: HttpClient>(api: &ShopApi<H>) -> impl Future<Output = ClientResult<Vec<Self>>>;

    fn delete<H: HttpClient>(api: &ShopApi<H>, id: i64) -> impl Future<Output = ClientResult<()>>;
}

/// List screen for products or sales
#[derive(Debug)]
pub struct ListView<T: Resource, H> {
    api: ShopApi<H>,
    scope: ViewScope,
    state: ListState<T>,
    categories: Vec<Category>,
}

impl<T: Resource, H: HttpClient> ListView<T, H> {
    pub fn new(api: ShopApi<H>) -> Self {
        Self {
            api,
            scope: ViewScope::new(),
            state: ListState::new(),
            categories: Vec::new(),
        }
    }

    pub fn with_scope(mut self, scope: ViewScope) -> Self {
        self.scope = scope;
        self
    }

    /// Fetch the collection (then the categories, when the view filters
    /// by category). A failed fetch leaves the previous state in place.
    pub async fn load(&mut self) -> ClientResult<()> {
        let items = match self.scope.run(T::fetch_all(&self.api)).await {
            Ok(items) => items,
            Err(e) => {
                tracing::error!(resource = T::LABEL, error = %e, "Failed to fetch list");
                return Err(e);
            }
        };
        tracing::debug!(resource = T::LABEL, count = items.len(), "List loaded");
        self.state.replace(items);

        if T::LOADS_CATEGORIES {
            match self.scope.run(self.api.list_categories()).await {
                Ok(categories) => self.categories = categories,
                Err(e) => {
                    tracing::error!(error = %e, "Failed to fetch categories");
                    return Err(e);
                }
            }
        }
        Ok(())
    }

    /// Delete remotely, then drop the row locally.
    ///
    /// The local list only changes after the backend confirmed the delete.
    pub async fn delete(&mut self, id: i64) -> ClientResult<()> {
        match self.scope.run(T::delete(&self.api, id)).await {
            Ok(()) => {
                self.state.remove(id);
                tracing::info!(resource = T::LABEL, id, "Deleted");
                Ok(())
            }
            Err(e) => {
                tracing::error!(resource = T::LABEL, id, error = %e, "Delete failed");
                Err(e)
            }
        }
    }

    pub fn state(&self) -> &ListState<T> {
        &self.state
    }

    pub fn state_mut(&mut self) -> &mut ListState<T> {
        &mut self.state
    }

    pub fn visible(&self) -> Vec<&T> {
        self.state.visible()
    }

    /// Categories for the filter selector (empty for sales)
    pub fn categories(&self) -> &[Category] {
        &self.categories
    }

    pub fn scope(&self) -> &ViewScope {
        &self.scope
    }
}
