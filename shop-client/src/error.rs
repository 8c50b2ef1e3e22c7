//! Client error types

use http::StatusCode;
use serde::Deserialize;
use thiserror::Error;

/// Client error type
#[derive(Debug, Error)]
pub enum ClientError {
    /// HTTP request failed
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    /// Invalid response format
    #[error("Invalid response: {0}")]
    InvalidResponse(String),

    /// Authentication required
    #[error("Authentication required")]
    Unauthorized,

    /// Permission denied
    #[error("Permission denied: {0}")]
    Forbidden(String),

    /// Resource not found
    #[error("Not found: {0}")]
    NotFound(String),

    /// Validation error (server 400 or a missing required field)
    #[error("Validation error: {0}")]
    Validation(String),

    /// Internal error
    #[error("Internal error: {0}")]
    Internal(String),

    /// Serialization error
    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    /// Token store could not be read or written
    #[error("Session storage error: {0}")]
    Storage(#[from] std::io::Error),

    /// The owning view scope was closed before the call settled
    #[error("Request cancelled")]
    Cancelled,

    /// Sale shell was created but some line items were not
    #[error(
        "Sale {sale_id} saved {created} of {requested} items ({} failed{})",
        .failures.len(),
        compensation_note(.compensated)
    )]
    PartialSale {
        sale_id: i64,
        requested: usize,
        created: usize,
        failures: Vec<ClientError>,
        compensated: bool,
    },
}

impl ClientError {
    /// Whether the error came from a closed view scope
    pub fn is_cancelled(&self) -> bool {
        matches!(self, ClientError::Cancelled)
    }
}

fn compensation_note(compensated: &bool) -> &'static str {
    if *compensated { ", sale removed" } else { "" }
}

/// Result type for client operations
pub type ClientResult<T> = Result<T, ClientError>;

/// Error body returned by the backend (`{"detail": "..."}`)
#[derive(Deserialize)]
struct ApiErrorResponse {
    detail: String,
}

/// Map a non-2xx response to a client error
pub(crate) fn from_status(status: StatusCode, text: String) -> ClientError {
    let message = serde_json::from_str::<ApiErrorResponse>(&text)
        .map(|body| body.detail)
        .unwrap_or(text);

    match status {
        StatusCode::UNAUTHORIZED => ClientError::Unauthorized,
        StatusCode::FORBIDDEN => ClientError::Forbidden(message),
        StatusCode::NOT_FOUND => ClientError::NotFound(message),
        StatusCode::BAD_REQUEST => ClientError::Validation(message),
        _ => ClientError::Internal(format!("{}: {}", status, message)),
    }
}
