//! Lead and enquiry models captured by the public site.

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Investor {
    pub id: String,
    pub name: String,
    pub email: String,
    pub phone: Option<String>,
    pub investment_budget: Option<f64>,
    #[serde(default)]
    pub preferred_locations: Vec<String>,
    #[serde(default)]
    pub property_types: Vec<String>,
    pub notes: Option<String>,
    pub created_at: String,
    pub updated_at: String,
}

/// A message sent through the contact form.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ContactMessage {
    pub id: String,
    pub name: String,
    pub email: String,
    pub phone: Option<String>,
    pub subject: Option<String>,
    pub message: String,
    pub is_read: bool,
    pub created_at: String,
    pub updated_at: String,
}

/// A request for an in-person price appraisal.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AppraisalBooking {
    pub id: String,
    pub name: String,
    pub email: String,
    pub phone: String,
    pub property_address: String,
    pub property_type: Option<String>,
    pub preferred_date: Option<String>,
    pub preferred_time: Option<String>,
    pub estimated_value: Option<f64>,
    pub notes: Option<String>,
    pub status: String,
    pub created_at: String,
    pub updated_at: String,
}

/// A lead captured when a visitor downloads a free guide.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GuideDownload {
    pub id: String,
    pub guide_id: String,
    pub name: String,
    pub email: String,
    pub phone: Option<String>,
    pub downloaded_at: String,
    pub created_at: String,
    pub updated_at: String,
}

/// A registered buyer and their search criteria.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Buyer {
    pub id: String,
    pub name: String,
    pub email: String,
    pub phone: Option<String>,
    pub budget_min: Option<f64>,
    pub budget_max: Option<f64>,
    #[serde(default)]
    pub preferred_suburbs: Vec<String>,
    pub bedrooms_min: Option<i64>,
    pub pre_approved: bool,
    pub notes: Option<String>,
    pub created_at: String,
    pub updated_at: String,
}

/// An enquiry about a listing, optionally tied to a registered buyer.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BuyerEnquiry {
    pub id: String,
    pub buyer_id: Option<String>,
    pub property_id: Option<String>,
    pub name: String,
    pub email: String,
    pub phone: Option<String>,
    pub message: String,
    pub status: String,
    pub created_at: String,
    pub updated_at: String,
}
