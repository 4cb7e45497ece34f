use std::io;
use std::path::{Path, PathBuf};

use tokio::fs;
use tokio::io::AsyncWriteExt;
use tracing::{debug, warn};

use crate::drafts::DRAFTS_CATEGORY;
use crate::id::{DOCUMENT_EXTENSION, DocumentId, is_addressable_name, join_id};
use crate::models::{DocumentListing, DocumentSummary, ValidationResult};
use crate::parser::{UNREADABLE_DESCRIPTION, parse_description};
use crate::validators::{ExistsValidator, NotExistsValidator, Validator, run_validators};

use super::{StoreError, StoreResult};

const EMPTY_LISTING: &str = "No markdown documents found.";

/// Markdown documents stored as `<id>.md` files below a root directory.
///
/// Nothing is cached: every call reads the filesystem again, so changes made
/// by other processes are visible on the next call.
#[derive(Debug, Clone)]
pub struct DocumentStore {
    root: PathBuf,
}

impl DocumentStore {
    #[must_use]
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    #[must_use]
    pub fn root(&self) -> &Path {
        &self.root
    }

    /// Lists documents and sub-categories of the root or of a category.
    ///
    /// A recursive listing walks every nested category and reports documents
    /// only. Both lists are sorted by id.
    ///
    /// # Errors
    /// Returns `StoreError::InvalidId` for a malformed category id and
    /// `StoreError::Io` when a directory cannot be read.
    pub async fn list_documents(
        &self,
        category: Option<&str>,
        recursive: bool,
    ) -> StoreResult<DocumentListing> {
        let scope = category.map(DocumentId::parse).transpose()?;
        let scope_dir = scope
            .as_ref()
            .map_or_else(|| self.root.clone(), |id| id.dir_path(&self.root));
        if scope.is_some() && !is_dir(&scope_dir).await? {
            return Ok(DocumentListing::default());
        }

        let mut listing = DocumentListing::default();
        let mut pending = vec![(scope_dir, scope.map(|id| id.as_str().to_string()))];

        while let Some((dir, prefix)) = pending.pop() {
            let mut entries = fs::read_dir(&dir)
                .await
                .map_err(|err| StoreError::io(&dir, err))?;
            while let Some(entry) = entries
                .next_entry()
                .await
                .map_err(|err| StoreError::io(&dir, err))?
            {
                let path = entry.path();
                let file_name = entry.file_name();
                let Some(name) = file_name.to_str() else {
                    warn!(path = %path.display(), "skipping entry with non UTF-8 name");
                    continue;
                };
                if name.starts_with('.') {
                    continue;
                }
                let metadata = match fs::metadata(&path).await {
                    Ok(metadata) => metadata,
                    Err(err) => {
                        warn!(path = %path.display(), error = %err, "skipping unreadable entry");
                        continue;
                    }
                };

                if metadata.is_dir() {
                    if !listable_name(name, &path) {
                        continue;
                    }
                    if prefix.is_none() && name == DRAFTS_CATEGORY {
                        continue;
                    }
                    let id = join_id(prefix.as_deref(), name);
                    if recursive {
                        pending.push((path, Some(id)));
                    } else {
                        listing.categories.push(id);
                    }
                } else if metadata.is_file() {
                    let Some(stem) = document_stem(name) else {
                        continue;
                    };
                    if !listable_name(stem, &path) {
                        continue;
                    }
                    let description = read_description(&path).await;
                    listing
                        .documents
                        .push(DocumentSummary::new(join_id(prefix.as_deref(), stem), description));
                }
            }
        }

        listing.documents.sort_by(|a, b| a.id.cmp(&b.id));
        listing.categories.sort();
        Ok(listing)
    }

    /// Reads the raw content of a document.
    ///
    /// Returns `Ok(None)` when the document does not exist.
    ///
    /// # Errors
    /// Returns `StoreError::InvalidId` for a malformed id and `StoreError::Io`
    /// for any read failure other than not-found.
    pub async fn get_document_content(&self, id: &str) -> StoreResult<Option<String>> {
        let path = DocumentId::parse(id)?.file_path(&self.root);
        match fs::read_to_string(&path).await {
            Ok(content) => Ok(Some(content)),
            Err(err) if is_missing(&err) => Ok(None),
            Err(err) => Err(StoreError::io(path, err)),
        }
    }

    /// Returns the summary of a document, or `None` when it does not exist.
    ///
    /// # Errors
    /// Same as [`Self::get_document_content`].
    pub async fn get_description(&self, id: &str) -> StoreResult<Option<String>> {
        Ok(self
            .get_document_content(id)
            .await?
            .map(|content| parse_description(&content)))
    }

    /// # Errors
    /// Returns `StoreError::InvalidId` for a malformed id and `StoreError::Io`
    /// when the file metadata cannot be read.
    pub async fn document_exists(&self, id: &str) -> StoreResult<bool> {
        is_file(&DocumentId::parse(id)?.file_path(&self.root)).await
    }

    /// True when the id names a category directory.
    ///
    /// # Errors
    /// Returns `StoreError::InvalidId` for a malformed id and `StoreError::Io`
    /// when the directory metadata cannot be read.
    pub async fn is_category(&self, id: &str) -> StoreResult<bool> {
        is_dir(&DocumentId::parse(id)?.dir_path(&self.root)).await
    }

    /// Creates a new document, creating category directories as needed.
    ///
    /// # Errors
    /// Returns `StoreError::InvalidId` for a malformed id and `StoreError::Io`
    /// when the file cannot be written.
    pub async fn add_document(&self, id: &str, content: &str) -> StoreResult<ValidationResult> {
        let doc = DocumentId::parse(id)?;
        let path = doc.file_path(&self.root);

        let exists = is_file(&path).await?;
        let outcome = NotExistsValidator::new(id, exists).validate();
        if !outcome.success {
            return Ok(outcome);
        }

        self.create_parent(&path).await?;
        let mut file = match fs::OpenOptions::new()
            .write(true)
            .create_new(true)
            .open(&path)
            .await
        {
            Ok(file) => file,
            Err(err) if err.kind() == io::ErrorKind::AlreadyExists => {
                return Ok(NotExistsValidator::new(id, true).validate());
            }
            Err(err) => return Err(StoreError::io(path, err)),
        };
        file.write_all(content.as_bytes())
            .await
            .map_err(|err| StoreError::io(&path, err))?;
        file.flush().await.map_err(|err| StoreError::io(&path, err))?;

        debug!(id, path = %path.display(), "document added");
        Ok(ValidationResult::ok())
    }

    /// Replaces the content of an existing document.
    ///
    /// Returns `false` without touching the filesystem when the document does
    /// not exist.
    ///
    /// # Errors
    /// Returns `StoreError::InvalidId` for a malformed id and `StoreError::Io`
    /// when the file cannot be written.
    pub async fn update_document(&self, id: &str, content: &str) -> StoreResult<bool> {
        let path = DocumentId::parse(id)?.file_path(&self.root);
        if !is_file(&path).await? {
            return Ok(false);
        }

        fs::write(&path, content)
            .await
            .map_err(|err| StoreError::io(&path, err))?;
        debug!(id, path = %path.display(), "document updated");
        Ok(true)
    }

    /// Removes a document and prunes category directories left empty.
    ///
    /// # Errors
    /// Returns `StoreError::InvalidId` for a malformed id and `StoreError::Io`
    /// when the file cannot be removed.
    pub async fn delete_document(&self, id: &str) -> StoreResult<ValidationResult> {
        let path = DocumentId::parse(id)?.file_path(&self.root);

        let exists = is_file(&path).await?;
        let outcome = ExistsValidator::new(id, exists).validate();
        if !outcome.success {
            return Ok(outcome);
        }

        fs::remove_file(&path)
            .await
            .map_err(|err| StoreError::io(&path, err))?;
        self.prune_empty_dirs(&path).await;

        debug!(id, path = %path.display(), "document deleted");
        Ok(ValidationResult::ok())
    }

    /// Moves a document to a new id.
    ///
    /// Uses a native rename. When source and destination live on different
    /// devices, the document is copied, verified, and only then removed from
    /// its old location. The source is never removed before the destination
    /// holds identical bytes.
    ///
    /// # Errors
    /// Returns `StoreError::InvalidId` for a malformed id and `StoreError::Io`
    /// when the move fails; the source document is left in place.
    pub async fn rename_document(&self, old_id: &str, new_id: &str) -> StoreResult<ValidationResult> {
        let old_path = DocumentId::parse(old_id)?.file_path(&self.root);
        let new_path = DocumentId::parse(new_id)?.file_path(&self.root);

        let old_exists = is_file(&old_path).await?;
        let new_exists = is_file(&new_path).await?;
        let outcome = run_validators(&[
            &ExistsValidator::new(old_id, old_exists),
            &NotExistsValidator::new(new_id, new_exists),
        ]);
        if !outcome.success {
            return Ok(outcome);
        }

        self.create_parent(&new_path).await?;
        match fs::rename(&old_path, &new_path).await {
            Ok(()) => {}
            Err(err) if err.kind() == io::ErrorKind::CrossesDevices => {
                debug!(old_id, new_id, "cross-device rename, copying instead");
                self.copy_then_remove(&old_path, &new_path).await?;
            }
            Err(err) => {
                self.prune_empty_dirs(&new_path).await;
                return Err(StoreError::io(old_path, err));
            }
        }
        self.prune_empty_dirs(&old_path).await;

        debug!(old_id, new_id, "document renamed");
        Ok(ValidationResult::ok())
    }

    async fn copy_then_remove(&self, from: &Path, to: &Path) -> StoreResult<()> {
        if let Err(err) = copy_verified(from, to).await {
            if let Err(cleanup) = fs::remove_file(to).await
                && !is_missing(&cleanup)
            {
                warn!(path = %to.display(), error = %cleanup, "failed to remove partial copy");
            }
            self.prune_empty_dirs(to).await;
            return Err(StoreError::io(to, err));
        }

        fs::remove_file(from)
            .await
            .map_err(|err| StoreError::io(from, err))
    }

    async fn create_parent(&self, path: &Path) -> StoreResult<()> {
        match path.parent() {
            Some(parent) if parent != self.root => fs::create_dir_all(parent)
                .await
                .map_err(|err| StoreError::io(parent, err)),
            _ => Ok(()),
        }
    }

    /// Removes empty directories from `path`'s parent up to, not including,
    /// the root. Failures stop the walk without failing the caller.
    async fn prune_empty_dirs(&self, path: &Path) {
        let mut current = path.parent();
        while let Some(dir) = current {
            if dir == self.root || !dir.starts_with(&self.root) {
                break;
            }
            match dir_is_empty(dir).await {
                Ok(true) => {}
                Ok(false) => break,
                Err(err) => {
                    if !is_missing(&err) {
                        warn!(path = %dir.display(), error = %err, "failed to inspect category");
                    }
                    break;
                }
            }
            if let Err(err) = fs::remove_dir(dir).await {
                debug!(path = %dir.display(), error = %err, "category not pruned");
                break;
            }
            debug!(path = %dir.display(), "pruned empty category");
            current = dir.parent();
        }
    }
}

/// Renders a listing as the text returned by the `help` tool.
#[must_use]
pub fn format_document_list(documents: &[DocumentSummary], categories: &[String]) -> String {
    if documents.is_empty() && categories.is_empty() {
        return EMPTY_LISTING.to_string();
    }

    let mut lines = vec!["Available documents:".to_string(), String::new()];
    lines.extend(
        documents
            .iter()
            .map(|doc| format!("- **{}**: {}", doc.id, doc.description)),
    );

    if !categories.is_empty() {
        if !documents.is_empty() {
            lines.push(String::new());
        }
        lines.push("Categories:".to_string());
        lines.push(String::new());
        lines.extend(categories.iter().map(|category| format!("- **{category}/**")));
    }

    lines.join("\n")
}

fn document_stem(name: &str) -> Option<&str> {
    name.strip_suffix(DOCUMENT_EXTENSION)?.strip_suffix('.')
}

fn listable_name(name: &str, path: &Path) -> bool {
    if is_addressable_name(name) {
        return true;
    }
    warn!(path = %path.display(), "skipping entry whose name cannot be used as an id");
    false
}

async fn read_description(path: &Path) -> String {
    match fs::read_to_string(path).await {
        Ok(content) => parse_description(&content),
        Err(err) => {
            warn!(path = %path.display(), error = %err, "failed to read document");
            UNREADABLE_DESCRIPTION.to_string()
        }
    }
}

async fn copy_verified(from: &Path, to: &Path) -> io::Result<()> {
    fs::copy(from, to).await?;
    let source = fs::read(from).await?;
    let target = fs::read(to).await?;
    if source == target {
        Ok(())
    } else {
        Err(io::Error::other("copied document does not match its source"))
    }
}

async fn dir_is_empty(dir: &Path) -> io::Result<bool> {
    let mut entries = fs::read_dir(dir).await?;
    Ok(entries.next_entry().await?.is_none())
}

async fn is_file(path: &Path) -> StoreResult<bool> {
    match fs::metadata(path).await {
        Ok(metadata) => Ok(metadata.is_file()),
        Err(err) if is_missing(&err) => Ok(false),
        Err(err) => Err(StoreError::io(path, err)),
    }
}

async fn is_dir(path: &Path) -> StoreResult<bool> {
    match fs::metadata(path).await {
        Ok(metadata) => Ok(metadata.is_dir()),
        Err(err) if is_missing(&err) => Ok(false),
        Err(err) => Err(StoreError::io(path, err)),
    }
}

fn is_missing(err: &io::Error) -> bool {
    matches!(
        err.kind(),
        io::ErrorKind::NotFound | io::ErrorKind::NotADirectory
    )
}
