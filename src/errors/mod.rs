//! Error handling module for the estate store.
//!
//! Provides a single error type with stable error codes and a mapping to process exit codes.

use std::path::PathBuf;

/// Error codes as constants to avoid stringly-typed errors.
pub mod codes {
    pub const STORE_CORRUPT: &str = "STORE_CORRUPT";
    pub const SOURCE_UNAVAILABLE: &str = "SOURCE_UNAVAILABLE";
    pub const ENTITY_MIGRATION: &str = "ENTITY_MIGRATION";
    pub const SOURCE_ERROR: &str = "SOURCE_ERROR";
    pub const IO_ERROR: &str = "IO_ERROR";
    pub const SERIALIZATION_ERROR: &str = "SERIALIZATION_ERROR";
    pub const HASH_ERROR: &str = "HASH_ERROR";
}

/// Exit code for a backing file that cannot be parsed (EX_DATAERR).
pub const EXIT_DATA_ERROR: u8 = 65;
/// Exit code for an unreachable legacy database (EX_UNAVAILABLE).
pub const EXIT_UNAVAILABLE: u8 = 69;

/// Application error type.
#[derive(Debug)]
pub enum AppError {
    /// Backing file exists but is not a well-formed document
    StoreCorrupt { path: PathBuf, reason: String },
    /// No candidate location produced a working legacy database connection
    SourceUnavailable {
        attempts: Vec<String>,
        remediation: String,
    },
    /// Extraction or transformation of one entity kind failed
    EntityMigration { entity: String, message: String },
    /// Query or connection error from the legacy database
    Source(String),
    /// Filesystem error
    Io(String),
    /// JSON encoding error
    Serialization(String),
    /// Password hashing error
    Hash(String),
}

impl AppError {
    /// Get the error code for this error.
    pub fn error_code(&self) -> &'static str {
        match self {
            AppError::StoreCorrupt { .. } => codes::STORE_CORRUPT,
            AppError::SourceUnavailable { .. } => codes::SOURCE_UNAVAILABLE,
            AppError::EntityMigration { .. } => codes::ENTITY_MIGRATION,
            AppError::Source(_) => codes::SOURCE_ERROR,
            AppError::Io(_) => codes::IO_ERROR,
            AppError::Serialization(_) => codes::SERIALIZATION_ERROR,
            AppError::Hash(_) => codes::HASH_ERROR,
        }
    }

    /// Get the error message.
    pub fn message(&self) -> String {
        match self {
            AppError::StoreCorrupt { path, reason } => {
                format!("Store file {} is corrupt: {}", path.display(), reason)
            }
            AppError::SourceUnavailable {
                attempts,
                remediation,
            } => {
                let mut message = String::from("Legacy database could not be resolved");
                for attempt in attempts {
                    message.push_str("\n  - ");
                    message.push_str(attempt);
                }
                message.push('\n');
                message.push_str(remediation);
                message
            }
            AppError::EntityMigration { entity, message } => format!("{}: {}", entity, message),
            AppError::Source(msg) => msg.clone(),
            AppError::Io(msg) => msg.clone(),
            AppError::Serialization(msg) => msg.clone(),
            AppError::Hash(msg) => msg.clone(),
        }
    }

    /// Get the process exit code for this error.
    pub fn exit_code(&self) -> u8 {
        match self {
            AppError::StoreCorrupt { .. } => EXIT_DATA_ERROR,
            AppError::SourceUnavailable { .. } => EXIT_UNAVAILABLE,
            _ => 1,
        }
    }
}

impl std::fmt::Display for AppError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}: {}", self.error_code(), self.message())
    }
}

impl std::error::Error for AppError {}

impl From<std::io::Error> for AppError {
    fn from(err: std::io::Error) -> Self {
        tracing::error!("IO error: {:?}", err);
        AppError::Io(format!("IO error: {}", err))
    }
}

impl From<serde_json::Error> for AppError {
    fn from(err: serde_json::Error) -> Self {
        tracing::error!("JSON error: {:?}", err);
        AppError::Serialization(format!("JSON error: {}", err))
    }
}

impl From<sqlx::Error> for AppError {
    fn from(err: sqlx::Error) -> Self {
        tracing::debug!("Database error: {:?}", err);
        AppError::Source(format!("Database error: {}", err))
    }
}

impl From<bcrypt::BcryptError> for AppError {
    fn from(err: bcrypt::BcryptError) -> Self {
        tracing::error!("Hash error: {:?}", err);
        AppError::Hash(format!("Hash error: {}", err))
    }
}
