//! Data models
//!
//! Shapes of the records served by the shop backend.
//! All IDs are `i64` (backend integer primary keys).
//! Money fields are `Decimal`; the backend sends them as decimal strings.

pub mod category;
pub mod product;
pub mod sale;
pub mod shop;

// Re-exports
pub use category::*;
pub use product::*;
pub use sale::*;
pub use shop::*;
