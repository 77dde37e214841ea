//! Row transforms from the legacy schema to document records.
//!
//! Column names are the snake_case spelling of the record fields. Missing
//! `updated_at` values fall back to `created_at`.

use serde::Serialize;

use super::row::{RowReader, RowResult};
use crate::models::{
    Admin, Agent, AppraisalBooking, Buyer, BuyerEnquiry, ContactInfo, ContactMessage, FreeGuide,
    GalleryItem, GuideDownload, Investor, Journey, Property, Record, Review, ADMIN_ROLE,
};

/// A document model that can be built from one legacy row.
pub trait FromSourceRow: Sized {
    fn from_row(row: &RowReader<'_>) -> RowResult<Self>;
}

/// Transform one row into a document record via its typed model.
pub fn to_record<T: FromSourceRow + Serialize>(row: &RowReader<'_>) -> RowResult<Record> {
    let model = T::from_row(row)?;
    match serde_json::to_value(model) {
        Ok(serde_json::Value::Object(record)) => Ok(record),
        Ok(_) => Err("model did not serialize to an object".to_string()),
        Err(e) => Err(format!("cannot serialize record: {}", e)),
    }
}

/// `(created_at, updated_at)` for a row.
fn timestamps(row: &RowReader<'_>) -> RowResult<(String, String)> {
    let created_at = row.timestamp("created_at")?;
    let updated_at = row
        .opt_timestamp("updated_at")?
        .unwrap_or_else(|| created_at.clone());
    Ok((created_at, updated_at))
}

impl FromSourceRow for Admin {
    fn from_row(row: &RowReader<'_>) -> RowResult<Self> {
        let (created_at, updated_at) = timestamps(row)?;
        Ok(Admin {
            id: row.id("id")?,
            email: row.text("email")?,
            password_hash: row.text("password_hash")?,
            full_name: row.text("full_name")?,
            role: row
                .opt_text("role")?
                .unwrap_or_else(|| ADMIN_ROLE.to_string()),
            is_active: row.flag_or("is_active", true)?,
            last_login: row.opt_timestamp("last_login")?,
            created_at,
            updated_at,
        })
    }
}

impl FromSourceRow for Agent {
    fn from_row(row: &RowReader<'_>) -> RowResult<Self> {
        let (created_at, updated_at) = timestamps(row)?;
        Ok(Agent {
            id: row.id("id")?,
            name: row.text("name")?,
            title: row.opt_text("title")?.unwrap_or_default(),
            email: row.text("email")?,
            phone: row.text("phone")?,
            bio: row.opt_text("bio")?,
            photo_url: row.opt_text("photo_url")?,
            specialties: row.list("specialties")?,
            languages: row.list("languages")?,
            years_experience: row.integer_or("years_experience", 0)?,
            sales_volume: row.opt_number("sales_volume")?.unwrap_or(0.0),
            is_featured: row.flag_or("is_featured", false)?,
            display_order: row.integer_or("display_order", 0)?,
            created_at,
            updated_at,
        })
    }
}

impl FromSourceRow for Property {
    fn from_row(row: &RowReader<'_>) -> RowResult<Self> {
        let (created_at, updated_at) = timestamps(row)?;
        Ok(Property {
            id: row.id("id")?,
            title: row.text("title")?,
            slug: row.text("slug")?,
            description: row.opt_text("description")?,
            address: row.text("address")?,
            suburb: row.text("suburb")?,
            state: row.text("state")?,
            postcode: row.text("postcode")?,
            price: row.number("price")?,
            property_type: row.text("property_type")?,
            status: row.text("status")?,
            bedrooms: row.integer_or("bedrooms", 0)?,
            bathrooms: row.integer_or("bathrooms", 0)?,
            car_spaces: row.integer_or("car_spaces", 0)?,
            land_size: row.opt_number("land_size")?,
            features: row.list("features")?,
            images: row.list("images")?,
            agent_id: row.opt_id("agent_id")?,
            is_featured: row.flag_or("is_featured", false)?,
            listed_at: row.opt_timestamp("listed_at")?,
            sold_at: row.opt_timestamp("sold_at")?,
            created_at,
            updated_at,
        })
    }
}

impl FromSourceRow for Review {
    fn from_row(row: &RowReader<'_>) -> RowResult<Self> {
        let (created_at, updated_at) = timestamps(row)?;
        Ok(Review {
            id: row.id("id")?,
            author_name: row.text("author_name")?,
            rating: row.integer("rating")?,
            content: row.text("content")?,
            property_id: row.opt_id("property_id")?,
            agent_id: row.opt_id("agent_id")?,
            source: row.opt_text("source")?,
            is_published: row.flag_or("is_published", true)?,
            review_date: row.opt_timestamp("review_date")?,
            created_at,
            updated_at,
        })
    }
}

impl FromSourceRow for GalleryItem {
    fn from_row(row: &RowReader<'_>) -> RowResult<Self> {
        let (created_at, updated_at) = timestamps(row)?;
        Ok(GalleryItem {
            id: row.id("id")?,
            title: row.text("title")?,
            image_url: row.text("image_url")?,
            category: row.opt_text("category")?,
            caption: row.opt_text("caption")?,
            display_order: row.integer_or("display_order", 0)?,
            created_at,
            updated_at,
        })
    }
}

impl FromSourceRow for Investor {
    fn from_row(row: &RowReader<'_>) -> RowResult<Self> {
        let (created_at, updated_at) = timestamps(row)?;
        Ok(Investor {
            id: row.id("id")?,
            name: row.text("name")?,
            email: row.text("email")?,
            phone: row.opt_text("phone")?,
            investment_budget: row.opt_number("investment_budget")?,
            preferred_locations: row.list("preferred_locations")?,
            property_types: row.list("property_types")?,
            notes: row.opt_text("notes")?,
            created_at,
            updated_at,
        })
    }
}

impl FromSourceRow for Journey {
    fn from_row(row: &RowReader<'_>) -> RowResult<Self> {
        let (created_at, updated_at) = timestamps(row)?;
        Ok(Journey {
            id: row.id("id")?,
            title: row.text("title")?,
            description: row.text("description")?,
            step_number: row.integer("step_number")?,
            icon: row.opt_text("icon")?,
            image_url: row.opt_text("image_url")?,
            created_at,
            updated_at,
        })
    }
}

impl FromSourceRow for ContactInfo {
    fn from_row(row: &RowReader<'_>) -> RowResult<Self> {
        let (created_at, updated_at) = timestamps(row)?;
        Ok(ContactInfo {
            id: row.id("id")?,
            phone: row.text("phone")?,
            email: row.text("email")?,
            address: row.text("address")?,
            office_hours: row.opt_text("office_hours")?,
            facebook_url: row.opt_text("facebook_url")?,
            instagram_url: row.opt_text("instagram_url")?,
            linkedin_url: row.opt_text("linkedin_url")?,
            map_embed_url: row.opt_text("map_embed_url")?,
            created_at,
            updated_at,
        })
    }
}

impl FromSourceRow for ContactMessage {
    fn from_row(row: &RowReader<'_>) -> RowResult<Self> {
        let (created_at, updated_at) = timestamps(row)?;
        Ok(ContactMessage {
            id: row.id("id")?,
            name: row.text("name")?,
            email: row.text("email")?,
            phone: row.opt_text("phone")?,
            subject: row.opt_text("subject")?,
            message: row.text("message")?,
            is_read: row.flag_or("is_read", false)?,
            created_at,
            updated_at,
        })
    }
}

impl FromSourceRow for AppraisalBooking {
    fn from_row(row: &RowReader<'_>) -> RowResult<Self> {
        let (created_at, updated_at) = timestamps(row)?;
        Ok(AppraisalBooking {
            id: row.id("id")?,
            name: row.text("name")?,
            email: row.text("email")?,
            phone: row.text("phone")?,
            property_address: row.text("property_address")?,
            property_type: row.opt_text("property_type")?,
            preferred_date: row.opt_timestamp("preferred_date")?,
            preferred_time: row.opt_text("preferred_time")?,
            estimated_value: row.opt_number("estimated_value")?,
            notes: row.opt_text("notes")?,
            status: row
                .opt_text("status")?
                .unwrap_or_else(|| "pending".to_string()),
            created_at,
            updated_at,
        })
    }
}

impl FromSourceRow for FreeGuide {
    fn from_row(row: &RowReader<'_>) -> RowResult<Self> {
        let (created_at, updated_at) = timestamps(row)?;
        Ok(FreeGuide {
            id: row.id("id")?,
            title: row.text("title")?,
            description: row.opt_text("description")?,
            file_url: row.text("file_url")?,
            cover_image_url: row.opt_text("cover_image_url")?,
            topics: row.list("topics")?,
            is_active: row.flag_or("is_active", true)?,
            download_count: row.integer_or("download_count", 0)?,
            created_at,
            updated_at,
        })
    }
}

impl FromSourceRow for GuideDownload {
    fn from_row(row: &RowReader<'_>) -> RowResult<Self> {
        let (created_at, updated_at) = timestamps(row)?;
        Ok(GuideDownload {
            id: row.id("id")?,
            guide_id: row.id("guide_id")?,
            name: row.text("name")?,
            email: row.text("email")?,
            phone: row.opt_text("phone")?,
            downloaded_at: row
                .opt_timestamp("downloaded_at")?
                .unwrap_or_else(|| created_at.clone()),
            created_at,
            updated_at,
        })
    }
}

impl FromSourceRow for Buyer {
    fn from_row(row: &RowReader<'_>) -> RowResult<Self> {
        let (created_at, updated_at) = timestamps(row)?;
        Ok(Buyer {
            id: row.id("id")?,
            name: row.text("name")?,
            email: row.text("email")?,
            phone: row.opt_text("phone")?,
            budget_min: row.opt_number("budget_min")?,
            budget_max: row.opt_number("budget_max")?,
            preferred_suburbs: row.list("preferred_suburbs")?,
            bedrooms_min: row.opt_integer("bedrooms_min")?,
            pre_approved: row.flag_or("pre_approved", false)?,
            notes: row.opt_text("notes")?,
            created_at,
            updated_at,
        })
    }
}

impl FromSourceRow for BuyerEnquiry {
    fn from_row(row: &RowReader<'_>) -> RowResult<Self> {
        let (created_at, updated_at) = timestamps(row)?;
        Ok(BuyerEnquiry {
            id: row.id("id")?,
            buyer_id: row.opt_id("buyer_id")?,
            property_id: row.opt_id("property_id")?,
            name: row.text("name")?,
            email: row.text("email")?,
            phone: row.opt_text("phone")?,
            message: row.text("message")?,
            status: row.opt_text("status")?.unwrap_or_else(|| "new".to_string()),
            created_at,
            updated_at,
        })
    }
}
