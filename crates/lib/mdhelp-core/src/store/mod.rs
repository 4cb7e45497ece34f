//! Filesystem-backed document store.
//!
//! The store layer owns the markdown root directory. Expected outcomes such as
//! a missing document come back as values; only I/O faults and malformed ids
//! are errors.

pub mod markdown;

use std::io;
use std::path::PathBuf;

use thiserror::Error;

pub use markdown::{DocumentStore, format_document_list};

#[derive(Debug, Error)]
pub enum StoreError {
    #[error("I/O error at {}: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
    #[error("Invalid document id \"{id}\": {reason}")]
    InvalidId { id: String, reason: &'static str },
}

impl StoreError {
    pub(crate) fn io(path: impl Into<PathBuf>, source: io::Error) -> Self {
        Self::Io {
            path: path.into(),
            source,
        }
    }
}

pub type StoreResult<T> = Result<T, StoreError>;
