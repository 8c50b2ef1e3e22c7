//! Client-related types shared with the backend
//!
//! Request/response bodies of the token auth endpoints.

use serde::{Deserialize, Serialize};

// =============================================================================
// Auth API DTOs
// =============================================================================

/// Login request
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoginRequest {
    pub username: String,
    pub password: String,
}

/// Token login response
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoginResponse {
    pub auth_token: String,
}

/// User record from the users listing
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UserInfo {
    #[serde(default)]
    pub id: Option<i64>,
    pub username: String,
    #[serde(default)]
    pub email: Option<String>,
}
