//! Shop Client - HTTP client for the Smart Shop backend
//!
//! Token-authenticated REST calls, the explicit user session and the
//! typed endpoint wrapper used by the application views.

pub mod api;
pub mod client;
pub mod config;
pub mod error;
pub mod session;

pub use api::ShopApi;
pub use client::{HttpClient, NetworkHttpClient};
#[cfg(feature = "in-process")]
pub use client::OneshotHttpClient;
pub use config::ClientConfig;
pub use error::{ClientError, ClientResult};
pub use session::{AUTH_TOKEN_KEY, FileTokenStore, MemoryTokenStore, Session, TokenStore};

// Re-export shared types for convenience
pub use shared::client::{LoginRequest, LoginResponse, UserInfo};
