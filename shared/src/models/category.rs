//! Category Model

use serde::{Deserialize, Serialize};

/// Product category entity (read-only for the client)
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Category {
    pub id: i64,
    pub name: String,
}
