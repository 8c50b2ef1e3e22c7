//! Shop Model

use serde::{Deserialize, Serialize};

/// Shop entity
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Shop {
    pub id: i64,
    #[serde(default)]
    pub name: String,
}
