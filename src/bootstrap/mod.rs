//! Default administrator bootstrap.
//!
//! Safe to run any number of times: the administrator is looked up by email,
//! so a second run finds the first run's record and does nothing.

use chrono::Utc;
use serde_json::Value;

use crate::config::AdminDefaults;
use crate::errors::AppError;
use crate::migrate::iso;
use crate::models::{Admin, ADMIN_ROLE};
use crate::store::DocumentStore;

/// Result of [`ensure_default_admin`].
#[derive(Debug, Clone, PartialEq)]
pub enum BootstrapOutcome {
    Created(Admin),
    AlreadyExists { id: Option<String> },
}

/// Make sure an administrator with the default email exists.
pub async fn ensure_default_admin(
    store: &DocumentStore,
    defaults: &AdminDefaults,
) -> Result<BootstrapOutcome, AppError> {
    let mut document = store.load().await?;

    let existing = document
        .admins
        .iter()
        .find(|admin| admin.get("email").and_then(Value::as_str) == Some(defaults.email.as_str()));

    if let Some(admin) = existing {
        let id = admin.get("id").and_then(Value::as_str).map(str::to_string);
        tracing::info!("Administrator {} already exists", defaults.email);
        return Ok(BootstrapOutcome::AlreadyExists { id });
    }

    let password_hash = bcrypt::hash(&defaults.password, defaults.hash_cost)?;
    let now = iso(Utc::now());
    let admin = Admin {
        id: uuid::Uuid::new_v4().to_string(),
        email: defaults.email.clone(),
        password_hash,
        full_name: defaults.full_name.clone(),
        role: ADMIN_ROLE.to_string(),
        is_active: true,
        last_login: None,
        created_at: now.clone(),
        updated_at: now,
    };

    match serde_json::to_value(&admin)? {
        Value::Object(record) => document.admins.push(record),
        _ => return Err(AppError::Serialization("admin is not an object".to_string())),
    }
    store.save(&document).await?;

    tracing::info!("Created administrator {} ({})", admin.email, admin.id);
    Ok(BootstrapOutcome::Created(admin))
}
