//! Document id to filesystem path mapping.
//!
//! Ids encode hierarchy with `__`: `git__workflow` is `git/workflow.md` under
//! the store root. Every translation between ids and paths goes through this
//! module.

use std::fmt;
use std::path::{Path, PathBuf};

use crate::store::StoreError;

/// Separator between hierarchy levels inside an id.
pub const ID_SEPARATOR: &str = "__";

/// File extension of stored documents, without the dot.
pub const DOCUMENT_EXTENSION: &str = "md";

/// A validated document or category id.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct DocumentId {
    raw: String,
    segments: Vec<String>,
}

impl DocumentId {
    /// Parses and validates an id.
    ///
    /// # Errors
    /// Returns `StoreError::InvalidId` when the id is empty or one of its
    /// levels is rejected by [`segment_error`].
    pub fn parse(raw: &str) -> Result<Self, StoreError> {
        if raw.is_empty() {
            return Err(invalid(raw, "id must not be empty"));
        }

        let mut segments = Vec::new();
        for segment in raw.split(ID_SEPARATOR) {
            if let Some(reason) = segment_error(segment) {
                return Err(invalid(raw, reason));
            }
            segments.push(segment.to_string());
        }

        Ok(Self {
            raw: raw.to_string(),
            segments,
        })
    }

    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.raw
    }

    /// Hierarchy levels of the id, outermost first.
    #[must_use]
    pub fn segments(&self) -> &[String] {
        &self.segments
    }

    /// Path of the markdown file this id names.
    #[must_use]
    pub fn file_path(&self, root: &Path) -> PathBuf {
        let (name, parents) = self
            .segments
            .split_last()
            .map_or(("", &[][..]), |(name, parents)| (name.as_str(), parents));
        let mut path = root.to_path_buf();
        path.extend(parents);
        path.push(format!("{name}.{DOCUMENT_EXTENSION}"));
        path
    }

    /// Path of the category directory this id names.
    #[must_use]
    pub fn dir_path(&self, root: &Path) -> PathBuf {
        let mut path = root.to_path_buf();
        path.extend(&self.segments);
        path
    }

    /// Fully-qualified id of an entry directly below this one.
    #[must_use]
    pub fn child(&self, name: &str) -> String {
        join_id(Some(self.as_str()), name)
    }
}

impl fmt::Display for DocumentId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.raw)
    }
}

/// Joins a parent id (if any) and an entry name into a fully-qualified id.
#[must_use]
pub fn join_id(parent: Option<&str>, name: &str) -> String {
    match parent {
        Some(parent) => format!("{parent}{ID_SEPARATOR}{name}"),
        None => name.to_string(),
    }
}

/// True when a directory entry name can be addressed as one id level.
///
/// Hidden names are not addressable, and neither is any name that
/// [`DocumentId::parse`] would reject or split differently.
#[must_use]
pub fn is_addressable_name(name: &str) -> bool {
    !name.starts_with('.') && !name.contains(ID_SEPARATOR) && segment_error(name).is_none()
}

/// Reason a single hierarchy level is unusable, if any.
///
/// A level may not end with `_`: joined with the separator it would read as
/// a different split (`a_` + `__` + `b` parses as `a` and `_b`).
#[must_use]
pub fn segment_error(segment: &str) -> Option<&'static str> {
    if segment.is_empty() {
        Some("hierarchy levels must not be empty")
    } else if segment == "." || segment == ".." {
        Some("relative path components are not allowed")
    } else if segment.contains(['/', '\\', '\0']) {
        Some("use '__' instead of path separators")
    } else if segment.ends_with(".md") {
        Some("omit the .md extension")
    } else if segment.ends_with('_') {
        Some("hierarchy levels must not end with '_'")
    } else {
        None
    }
}

fn invalid(raw: &str, reason: &'static str) -> StoreError {
    StoreError::InvalidId {
        id: raw.to_string(),
        reason,
    }
}
