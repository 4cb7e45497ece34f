//! Drafts: documents staged under a reserved category until approved.
//!
//! Draft `x` lives at document id `_drafts__x`. The drafts category is hidden
//! from root listings; approving a draft moves it into the regular id space.

use tracing::debug;

use crate::id::{ID_SEPARATOR, join_id};
use crate::models::{DocumentListing, DocumentSummary, ValidationResult};
use crate::store::{DocumentStore, StoreResult};
use crate::validators::{HasDescriptionValidator, NotExistsValidator, run_validators};

/// Reserved top-level category holding drafts.
pub const DRAFTS_CATEGORY: &str = "_drafts";

/// Draft operations over a shared document store.
#[derive(Debug, Clone, Copy)]
pub struct Drafts<'a> {
    store: &'a DocumentStore,
}

impl<'a> Drafts<'a> {
    #[must_use]
    pub const fn new(store: &'a DocumentStore) -> Self {
        Self { store }
    }

    /// Document id backing the draft `id`.
    #[must_use]
    pub fn document_id(id: &str) -> String {
        join_id(Some(DRAFTS_CATEGORY), id)
    }

    /// Lists every draft, nested drafts included, with draft-relative ids.
    ///
    /// # Errors
    /// Returns `StoreError::Io` when the drafts category cannot be read.
    pub async fn list(&self) -> StoreResult<DocumentListing> {
        let listing = self
            .store
            .list_documents(Some(DRAFTS_CATEGORY), true)
            .await?;
        let prefix = format!("{DRAFTS_CATEGORY}{ID_SEPARATOR}");
        let documents = listing
            .documents
            .into_iter()
            .map(|doc| {
                let id = doc.id.strip_prefix(&prefix).unwrap_or(&doc.id).to_string();
                DocumentSummary::new(id, doc.description)
            })
            .collect();
        Ok(DocumentListing {
            documents,
            categories: Vec::new(),
        })
    }

    /// # Errors
    /// Same as [`DocumentStore::get_document_content`].
    pub async fn read(&self, id: &str) -> StoreResult<Option<String>> {
        self.store.get_document_content(&Self::document_id(id)).await
    }

    /// # Errors
    /// Same as [`DocumentStore::add_document`].
    pub async fn add(&self, id: &str, content: &str) -> StoreResult<ValidationResult> {
        let outcome = self
            .store
            .add_document(&Self::document_id(id), content)
            .await?;
        if outcome.success {
            return Ok(outcome);
        }
        Ok(ValidationResult::fail(format!(
            "Draft \"{id}\" already exists. Use the update action to modify it."
        )))
    }

    /// Returns `false` when the draft does not exist.
    ///
    /// # Errors
    /// Same as [`DocumentStore::update_document`].
    pub async fn update(&self, id: &str, content: &str) -> StoreResult<bool> {
        self.store
            .update_document(&Self::document_id(id), content)
            .await
    }

    /// # Errors
    /// Same as [`DocumentStore::delete_document`].
    pub async fn delete(&self, id: &str) -> StoreResult<ValidationResult> {
        let outcome = self.store.delete_document(&Self::document_id(id)).await?;
        if outcome.success {
            return Ok(outcome);
        }
        Ok(not_found(id))
    }

    /// Publishes a draft as the regular document `target`, or under its own
    /// id when no target is given.
    ///
    /// The draft must have a description and the target must not exist.
    ///
    /// # Errors
    /// Same as [`DocumentStore::rename_document`].
    pub async fn approve(&self, id: &str, target: Option<&str>) -> StoreResult<ValidationResult> {
        let draft_id = Self::document_id(id);
        let target = target.unwrap_or(id);

        let Some(description) = self.store.get_description(&draft_id).await? else {
            return Ok(not_found(id));
        };
        let target_exists = self.store.document_exists(target).await?;
        let outcome = run_validators(&[
            &NotExistsValidator::new(target, target_exists),
            &HasDescriptionValidator::new(description),
        ]);
        if !outcome.success {
            return Ok(outcome);
        }

        let outcome = self.store.rename_document(&draft_id, target).await?;
        if outcome.success {
            debug!(draft = id, target, "draft approved");
        }
        Ok(outcome)
    }
}

fn not_found(id: &str) -> ValidationResult {
    ValidationResult::fail(format!("Draft \"{id}\" not found."))
}
