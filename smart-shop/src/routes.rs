//! Navigable routes

use std::convert::Infallible;
use std::fmt;
use std::str::FromStr;

/// A screen of the application
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Route {
    /// `/`
    Login,
    /// `/home`
    Home,
    /// `/products`
    Products,
    /// `/products/add`
    ProductNew,
    /// `/products/{id}`
    ProductEdit(i64),
    /// `/sales`
    Sales,
    /// `/sales/add`
    SaleNew,
    /// `/sales/{id}`
    SaleView(i64),
    /// Anything else
    NotFound,
}

impl Route {
    /// Resolve a path; query string, fragment and trailing slash are ignored.
    pub fn parse(path: &str) -> Self {
        let path = path.split(['?', '#']).next().unwrap_or_default();
        let segments: Vec<&str> = path.split('/').filter(|s| !s.is_empty()).collect();

        match segments.as_slice() {
            [] => Route::Login,
            ["home"] => Route::Home,
            ["products"] => Route::Products,
            ["products", "add"] => Route::ProductNew,
            ["products", id] => id.parse().map_or(Route::NotFound, Route::ProductEdit),
            ["sales"] => Route::Sales,
            ["sales", "add"] => Route::SaleNew,
            ["sales", id] => id.parse().map_or(Route::NotFound, Route::SaleView),
            _ => Route::NotFound,
        }
    }

    /// Canonical path (NotFound renders as `/404`)
    pub fn path(&self) -> String {
        match self {
            Route::Login => "/".to_string(),
            Route::Home => "/home".to_string(),
            Route::Products => "/products".to_string(),
            Route::ProductNew => "/products/add".to_string(),
            Route::ProductEdit(id) => format!("/products/{}", id),
            Route::Sales => "/sales".to_string(),
            Route::SaleNew => "/sales/add".to_string(),
            Route::SaleView(id) => format!("/sales/{}", id),
            Route::NotFound => "/404".to_string(),
        }
    }
}

impl FromStr for Route {
    type Err = Infallible;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Ok(Route::parse(s))
    }
}

impl fmt::Display for Route {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.path())
    }
}
