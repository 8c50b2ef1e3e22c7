//! Client module - HTTP transports.
//!
//! `NetworkHttpClient` talks to the backend over the network;
//! `OneshotHttpClient` drives an axum `Router` in-process (feature
//! `in-process`). Both read the token from the same [`Session`](crate::Session).

pub mod http;
#[cfg(feature = "in-process")]
pub mod http_oneshot;

pub use http::{HttpClient, NetworkHttpClient};
#[cfg(feature = "in-process")]
pub use http_oneshot::OneshotHttpClient;
