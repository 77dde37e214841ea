//! Site content models edited from the admin UI.

use serde::{Deserialize, Serialize};

/// A photo in the public gallery.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GalleryItem {
    pub id: String,
    pub title: String,
    pub image_url: String,
    pub category: Option<String>,
    pub caption: Option<String>,
    pub display_order: i64,
    pub created_at: String,
    pub updated_at: String,
}

/// One step of the "selling journey" timeline.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Journey {
    pub id: String,
    pub title: String,
    pub description: String,
    pub step_number: i64,
    pub icon: Option<String>,
    pub image_url: Option<String>,
    pub created_at: String,
    pub updated_at: String,
}

/// Office contact details shown in the footer and contact page.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ContactInfo {
    pub id: String,
    pub phone: String,
    pub email: String,
    pub address: String,
    pub office_hours: Option<String>,
    pub facebook_url: Option<String>,
    pub instagram_url: Option<String>,
    pub linkedin_url: Option<String>,
    pub map_embed_url: Option<String>,
    pub created_at: String,
    pub updated_at: String,
}

/// A downloadable guide offered in exchange for contact details.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FreeGuide {
    pub id: String,
    pub title: String,
    pub description: Option<String>,
    pub file_url: String,
    pub cover_image_url: Option<String>,
    #[serde(default)]
    pub topics: Vec<String>,
    pub is_active: bool,
    pub download_count: i64,
    pub created_at: String,
    pub updated_at: String,
}
