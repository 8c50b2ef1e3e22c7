//! Views
//!
//! Each view holds the state of one screen plus the API handle it loads
//! from. Rendering lives in [`crate::render`].

pub mod header;
pub mod home;
pub mod list;
pub mod login;
pub mod product_form;
pub mod products;
pub mod sale_form;
pub mod sales;

pub use header::{DEFAULT_DISPLAY_NAME, Header, NavLink};
pub use home::{ChartPoint, HomeMetrics, HomeView, NO_TOP_SELLERS, TopSeller};
pub use list::{ListState, ListView, Listable, Resource, SortConfig, SortDirection, SortValue};
pub use login::{LOGIN_FAILED_MESSAGE, LoginForm};
pub use product_form::{FormMode, ProductDraft, ProductForm};
pub use products::{ProductColumn, ProductListView};
pub use sale_form::{MAX_LINE_QUANTITY, SaleForm, SaleItemFailurePolicy, SaleLine};
pub use sales::{SaleColumn, SaleListView};
