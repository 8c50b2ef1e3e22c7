//! Shared types for Smart Shop
//!
//! Wire models exchanged with the shop backend, auth DTOs and small
//! date helpers used by both the client crate and the application.

pub mod client;
pub mod models;
pub mod util;

// Re-exports
pub use rust_decimal::Decimal;
pub use serde::{Deserialize, Serialize};
