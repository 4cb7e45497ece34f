//! MCP tool modules.
//!
//! Tools are grouped by domain: regular documents (help, add, update, delete,
//! rename) and the drafts area.

pub mod documents;
pub mod drafts;
