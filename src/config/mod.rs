//! Configuration module for the estate store.
//!
//! All configuration is loaded from environment variables with sensible defaults.

use std::env;
use std::path::PathBuf;
use std::time::Duration;

/// Environment variable holding the legacy database URL.
pub const SOURCE_URL_VAR: &str = "ESTATE_LEGACY_DATABASE_URL";

/// Application configuration loaded from environment variables.
#[derive(Debug, Clone)]
pub struct Config {
    /// Path to the JSON document store
    pub store_path: PathBuf,
    /// Legacy database URL, used as the last resolver candidate
    pub source_url: Option<String>,
    /// Bound on connecting to and querying the legacy database
    pub source_timeout: Duration,
    /// Log level (trace, debug, info, warn, error)
    pub log_level: String,
    /// Emit log lines as JSON instead of text
    pub log_json: bool,
    /// Default administrator seeded by the bootstrap
    pub admin: AdminDefaults,
}

/// Well-known values for the default administrator.
#[derive(Debug, Clone)]
pub struct AdminDefaults {
    pub email: String,
    pub password: String,
    pub full_name: String,
    /// bcrypt work factor
    pub hash_cost: u32,
}

impl Default for AdminDefaults {
    fn default() -> Self {
        Self {
            email: "admin@estate.local".to_string(),
            password: "admin123".to_string(),
            full_name: "Administrator".to_string(),
            hash_cost: bcrypt::DEFAULT_COST,
        }
    }
}

impl Config {
    /// Load configuration from environment variables.
    pub fn from_env() -> Self {
        dotenvy::dotenv().ok();

        let store_path = env::var("ESTATE_STORE_PATH")
            .unwrap_or_else(|_| "./data/db.json".to_string())
            .into();

        let source_url = env::var(SOURCE_URL_VAR)
            .ok()
            .filter(|url| !url.trim().is_empty());

        let source_timeout = env::var("ESTATE_SOURCE_TIMEOUT_SECS")
            .ok()
            .and_then(|secs| secs.parse().ok())
            .map(Duration::from_secs)
            .unwrap_or(Duration::from_secs(30));

        let log_level = env::var("ESTATE_LOG_LEVEL").unwrap_or_else(|_| "info".to_string());

        let log_json = env::var("ESTATE_LOG_FORMAT")
            .map(|format| format.eq_ignore_ascii_case("json"))
            .unwrap_or(false);

        let defaults = AdminDefaults::default();
        let admin = AdminDefaults {
            email: env::var("ESTATE_ADMIN_EMAIL").unwrap_or(defaults.email),
            password: env::var("ESTATE_ADMIN_PASSWORD").unwrap_or(defaults.password),
            full_name: env::var("ESTATE_ADMIN_NAME").unwrap_or(defaults.full_name),
            hash_cost: env::var("ESTATE_BCRYPT_COST")
                .ok()
                .and_then(|cost| cost.parse().ok())
                .unwrap_or(defaults.hash_cost),
        };

        Self {
            store_path,
            source_url,
            source_timeout,
            log_level,
            log_json,
            admin,
        }
    }
}
