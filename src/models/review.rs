//! Client review model.

use serde::{Deserialize, Serialize};

/// A testimonial left by a vendor or buyer.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Review {
    pub id: String,
    pub author_name: String,
    /// 1 to 5 stars
    pub rating: i64,
    pub content: String,
    pub property_id: Option<String>,
    pub agent_id: Option<String>,
    pub source: Option<String>,
    pub is_published: bool,
    pub review_date: Option<String>,
    pub created_at: String,
    pub updated_at: String,
}
