//! Property listing model.

use serde::{Deserialize, Serialize};

/// A property listed for sale, or an archived sold listing.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Property {
    pub id: String,
    pub title: String,
    pub slug: String,
    pub description: Option<String>,
    pub address: String,
    pub suburb: String,
    pub state: String,
    pub postcode: String,
    pub price: f64,
    pub property_type: String,
    /// Listing status, e.g. "for_sale", "under_offer", "sold"
    pub status: String,
    pub bedrooms: i64,
    pub bathrooms: i64,
    pub car_spaces: i64,
    /// Land area in square metres
    pub land_size: Option<f64>,
    #[serde(default)]
    pub features: Vec<String>,
    #[serde(default)]
    pub images: Vec<String>,
    pub agent_id: Option<String>,
    pub is_featured: bool,
    pub listed_at: Option<String>,
    pub sold_at: Option<String>,
    pub created_at: String,
    pub updated_at: String,
}
