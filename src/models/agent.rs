//! Sales agent model.

use serde::{Deserialize, Serialize};

/// An agent shown on the team page and linked from listings.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Agent {
    pub id: String,
    pub name: String,
    pub title: String,
    pub email: String,
    pub phone: String,
    pub bio: Option<String>,
    pub photo_url: Option<String>,
    #[serde(default)]
    pub specialties: Vec<String>,
    #[serde(default)]
    pub languages: Vec<String>,
    pub years_experience: i64,
    /// Lifetime sales in dollars
    pub sales_volume: f64,
    pub is_featured: bool,
    pub display_order: i64,
    pub created_at: String,
    pub updated_at: String,
}
