//! Administrator model.

use serde::{Deserialize, Serialize};

/// Role assigned to administrators created by the bootstrap.
pub const ADMIN_ROLE: &str = "admin";

/// An administrator allowed to sign in to the admin UI.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Admin {
    pub id: String,
    pub email: String,
    pub password_hash: String,
    pub full_name: String,
    pub role: String,
    pub is_active: bool,
    pub last_login: Option<String>,
    pub created_at: String,
    pub updated_at: String,
}
