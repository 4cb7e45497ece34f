//! Shared data model for the store, validators, and MCP layer.

use serde::{Deserialize, Serialize};

/// A document id paired with the summary taken from its first paragraph.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DocumentSummary {
    pub id: String,
    pub description: String,
}

impl DocumentSummary {
    #[must_use]
    pub fn new(id: impl Into<String>, description: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            description: description.into(),
        }
    }
}

/// Result of listing one scope of the store.
///
/// `categories` is always empty for recursive listings, since every nested
/// document is already reported with its fully-qualified id.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct DocumentListing {
    pub documents: Vec<DocumentSummary>,
    pub categories: Vec<String>,
}

impl DocumentListing {
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.documents.is_empty() && self.categories.is_empty()
    }
}

/// Outcome of a validator or of a mutating store operation.
///
/// Expected domain failures (missing document, id collision, missing
/// description) are reported here rather than as errors.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ValidationResult {
    pub success: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

impl ValidationResult {
    #[must_use]
    pub const fn ok() -> Self {
        Self {
            success: true,
            error: None,
        }
    }

    #[must_use]
    pub fn fail(error: impl Into<String>) -> Self {
        Self {
            success: false,
            error: Some(error.into()),
        }
    }

    #[must_use]
    pub const fn is_success(&self) -> bool {
        self.success
    }

    /// Error message, or an empty string for successful results.
    #[must_use]
    pub fn error_message(&self) -> &str {
        self.error.as_deref().unwrap_or_default()
    }
}

/// Reminder text appended to every tool response.
///
/// Built once at startup and shared read-only afterwards.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ReminderConfig {
    pub remind_mcp: bool,
    pub remind_organize: bool,
    pub custom_reminders: Vec<String>,
}

impl ReminderConfig {
    #[must_use]
    pub const fn new(remind_mcp: bool, remind_organize: bool, custom_reminders: Vec<String>) -> Self {
        Self {
            remind_mcp,
            remind_organize,
            custom_reminders,
        }
    }

    /// True when no reminder of any kind is configured.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        !self.remind_mcp && !self.remind_organize && self.custom_reminders.is_empty()
    }
}
