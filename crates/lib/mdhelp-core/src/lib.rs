//! Core types and services for mdhelp.
//!
//! This crate owns the markdown document store: id-to-path mapping, summary
//! extraction from document content, pre-mutation validators, and the drafts
//! area that sits beside the regular documents.

pub mod drafts;
pub mod id;
pub mod models;
pub mod parser;
pub mod store;
pub mod validators;

pub use id::DocumentId;
pub use models::{DocumentListing, DocumentSummary, ReminderConfig, ValidationResult};
pub use store::{DocumentStore, StoreError, StoreResult};
