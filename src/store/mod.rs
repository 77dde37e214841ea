//! Store module for the JSON document file.
//!
//! The document file is the source of truth for all application data.

mod document_store;

pub use document_store::*;
