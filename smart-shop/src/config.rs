//! Application configuration
//!
//! Read from the environment (after `.env` is loaded by the binary):
//!
//! | variable | default |
//! |---|---|
//! | `SMART_SHOP_API_URL` | `http://127.0.0.1:8000/` |
//! | `SMART_SHOP_TIMEOUT_SECS` | `30` |
//! | `SMART_SHOP_SESSION_FILE` | `$HOME/.smart-shop/session.json` |
//! | `SMART_SHOP_SHOP_ID` | `1` |
//! | `SMART_SHOP_FALLBACK_SHOP_ID` | `1` |
//! | `SMART_SHOP_COMPENSATE_PARTIAL_SALES` | `false` |
//! | `LOG_LEVEL` | `info` |
//! | `LOG_DIR` | unset (log to stderr) |

use std::path::PathBuf;
use std::str::FromStr;

use shop_client::ClientConfig;
use shop_client::config::DEFAULT_BASE_URL;

use crate::views::SaleItemFailurePolicy;

#[derive(Debug, Clone)]
pub struct AppConfig {
    pub api_url: String,
    pub timeout_secs: u64,
    /// JSON file the auth token is persisted in
    pub session_file: PathBuf,
    /// Shop new products are assigned to
    pub shop_id: i64,
    /// Shop used for new sales when the shops listing is empty
    pub fallback_shop_id: i64,
    /// Delete a new sale again when some of its items failed
    pub compensate_partial_sales: bool,
    pub log_level: String,
    pub log_dir: Option<String>,
}

impl AppConfig {
    pub fn from_env() -> Self {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Build from any variable source
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        Self {
            api_url: lookup("SMART_SHOP_API_URL").unwrap_or_else(|| DEFAULT_BASE_URL.into()),
            timeout_secs: parsed(&lookup, "SMART_SHOP_TIMEOUT_SECS").unwrap_or(30),
            session_file: lookup("SMART_SHOP_SESSION_FILE")
                .map(PathBuf::from)
                .unwrap_or_else(|| default_session_file(lookup("HOME"))),
            shop_id: parsed(&lookup, "SMART_SHOP_SHOP_ID").unwrap_or(1),
            fallback_shop_id: parsed(&lookup, "SMART_SHOP_FALLBACK_SHOP_ID").unwrap_or(1),
            compensate_partial_sales: parsed(&lookup, "SMART_SHOP_COMPENSATE_PARTIAL_SALES")
                .unwrap_or(false),
            log_level: lookup("LOG_LEVEL").unwrap_or_else(|| "info".into()),
            log_dir: lookup("LOG_DIR").filter(|dir| !dir.trim().is_empty()),
        }
    }

    pub fn client_config(&self) -> ClientConfig {
        ClientConfig::new(self.api_url.clone()).with_timeout(self.timeout_secs)
    }

    pub fn failure_policy(&self) -> SaleItemFailurePolicy {
        SaleItemFailurePolicy::from_compensate(self.compensate_partial_sales)
    }
}

fn parsed<T: FromStr>(lookup: &impl Fn(&str) -> Option<String>, key: &str) -> Option<T> {
    lookup(key).and_then(|v| v.trim().parse().ok())
}

fn default_session_file(home: Option<String>) -> PathBuf {
    home.map(PathBuf::from)
        .unwrap_or_else(|| PathBuf::from("."))
        .join(".smart-shop")
        .join("session.json")
}
