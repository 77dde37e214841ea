//! Data models for the estate site.
//!
//! Typed record shapes serialize to the camelCase JSON the REST layer and admin UI expect.

mod admin;
mod agent;
mod content;
mod document;
mod enquiry;
mod property;
mod review;

pub use admin::*;
pub use agent::*;
pub use content::*;
pub use document::*;
pub use enquiry::*;
pub use property::*;
pub use review::*;
