//! Smart Shop - retail management client
//!
//! Product and sale management against the shop backend: list views with
//! client-side search, filter and sort, product and sale editors, and the
//! home dashboard.

pub mod app;
pub mod config;
pub mod logger;
pub mod render;
pub mod routes;
pub mod scope;
pub mod views;

pub use app::App;
pub use config::AppConfig;
pub use logger::init_logger;
pub use routes::Route;
pub use scope::ViewScope;
