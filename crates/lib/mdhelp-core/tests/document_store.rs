use std::fs;
use std::path::PathBuf;

use mdhelp_core::parser::NO_DESCRIPTION;
use mdhelp_core::{DocumentStore, DocumentSummary, StoreError};
use tempfile::TempDir;

fn fixture_dir() -> PathBuf {
    PathBuf::from(env!("CARGO_MANIFEST_DIR"))
        .join("tests")
        .join("data")
}

fn temp_store() -> (TempDir, DocumentStore) {
    let dir = TempDir::new().expect("failed to create temp dir");
    let store = DocumentStore::new(dir.path());
    (dir, store)
}

fn write(dir: &TempDir, relative: &str, content: &str) {
    let path = dir.path().join(relative);
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent).expect("failed to create fixture dirs");
    }
    fs::write(path, content).expect("failed to write fixture");
}

#[tokio::test]
async fn lists_fixture_descriptions() {
    let store = DocumentStore::new(fixture_dir());
    let listing = store
        .list_documents(None, false)
        .await
        .expect("listing should succeed");

    assert_eq!(
        listing.documents,
        vec![
            DocumentSummary::new("no-description", NO_DESCRIPTION),
            DocumentSummary::new(
                "sample",
                "This is a sample document for testing purposes."
            ),
        ]
    );
    assert_eq!(listing.categories, vec!["git".to_string()]);
}

#[tokio::test]
async fn recursive_listing_uses_qualified_ids() {
    let store = DocumentStore::new(fixture_dir());
    let listing = store
        .list_documents(None, true)
        .await
        .expect("listing should succeed");

    let ids: Vec<&str> = listing.documents.iter().map(|doc| doc.id.as_str()).collect();
    assert_eq!(ids, ["git__workflow", "no-description", "sample"]);
    assert!(listing.categories.is_empty());
}

#[tokio::test]
async fn listing_is_sorted_regardless_of_creation_order() {
    let (dir, store) = temp_store();
    for name in ["zeta", "alpha", "Mid", "beta"] {
        write(&dir, &format!("{name}.md"), "# T\n\nBody.");
    }

    let listing = store.list_documents(None, false).await.expect("listing");
    let ids: Vec<&str> = listing.documents.iter().map(|doc| doc.id.as_str()).collect();
    assert_eq!(ids, ["Mid", "alpha", "beta", "zeta"]);
}

#[tokio::test]
async fn listing_skips_hidden_foreign_and_ambiguous_entries() {
    let (dir, store) = temp_store();
    write(&dir, "kept.md", "# Kept\n\nYes.");
    write(&dir, ".hidden.md", "# Hidden\n\nNo.");
    write(&dir, "notes.txt", "not markdown");
    write(&dir, "a__b.md", "# Ambiguous\n\nNo.");
    write(&dir, ".git/config.md", "# Hidden dir\n\nNo.");

    let listing = store.list_documents(None, true).await.expect("listing");
    let ids: Vec<&str> = listing.documents.iter().map(|doc| doc.id.as_str()).collect();
    assert_eq!(ids, ["kept"]);
}

#[tokio::test]
async fn listing_only_shows_ids_the_store_accepts() {
    let (dir, store) = temp_store();
    write(&dir, "guide.md.md", "# Guide\n\nDouble extension.");
    write(&dir, "v1.md/intro.md", "# Intro\n\nUnder a dotted category.");
    write(&dir, "back\\slash.md", "# Slash\n\nNot addressable.");
    write(&dir, "trailing_/child.md", "# Child\n\nAmbiguous parent.");
    write(&dir, "ok.md", "# Ok\n\nFine.");

    let listing = store.list_documents(None, false).await.expect("listing");
    let ids: Vec<&str> = listing.documents.iter().map(|doc| doc.id.as_str()).collect();
    assert_eq!(ids, ["ok"]);
    assert!(listing.categories.is_empty());

    let all = store.list_documents(None, true).await.expect("listing");
    for doc in &all.documents {
        let content = store
            .get_document_content(&doc.id)
            .await
            .expect("listed ids must be readable");
        assert!(content.is_some(), "{}", doc.id);
    }
}

#[tokio::test]
async fn lists_a_single_category() {
    let (dir, store) = temp_store();
    write(&dir, "top.md", "# Top\n\nRoot level.");
    write(&dir, "git/workflow.md", "# Workflow\n\nHow we branch.");
    write(&dir, "git/advanced/rebase.md", "# Rebase\n\nRewrite history.");

    let listing = store
        .list_documents(Some("git"), false)
        .await
        .expect("listing");
    assert_eq!(
        listing.documents,
        vec![DocumentSummary::new("git__workflow", "How we branch.")]
    );
    assert_eq!(listing.categories, vec!["git__advanced".to_string()]);

    let missing = store
        .list_documents(Some("nope"), false)
        .await
        .expect("listing");
    assert!(missing.is_empty());
}

#[tokio::test]
async fn root_listing_hides_drafts() {
    let (dir, store) = temp_store();
    write(&dir, "_drafts/wip.md", "# WIP\n\nNot yet.");
    write(&dir, "done.md", "# Done\n\nPublished.");

    let listing = store.list_documents(None, true).await.expect("listing");
    let ids: Vec<&str> = listing.documents.iter().map(|doc| doc.id.as_str()).collect();
    assert_eq!(ids, ["done"]);
}

#[tokio::test]
async fn reads_content_and_reports_missing_as_none() {
    let store = DocumentStore::new(fixture_dir());

    let content = store
        .get_document_content("sample")
        .await
        .expect("read should succeed")
        .expect("sample should exist");
    assert!(content.contains("# Sample Document"));
    assert!(content.contains("## Section 1"));

    let nested = store
        .get_document_content("git__workflow")
        .await
        .expect("read should succeed");
    assert!(nested.is_some_and(|text| text.contains("Branching")));

    let missing = store
        .get_document_content("non-existent")
        .await
        .expect("missing is not an error");
    assert!(missing.is_none());
}

#[tokio::test]
async fn malformed_ids_are_rejected() {
    let store = DocumentStore::new(fixture_dir());
    let err = store
        .get_document_content("../secrets")
        .await
        .expect_err("path traversal must fail");
    assert!(matches!(err, StoreError::InvalidId { .. }));
}

#[tokio::test]
async fn add_then_read_round_trips_exact_content() {
    let (_dir, store) = temp_store();
    let result = store
        .add_document("new-doc", "# New Doc\n\nNew content.")
        .await
        .expect("add should succeed");
    assert!(result.success);

    let saved = store.get_document_content("new-doc").await.expect("read");
    assert_eq!(saved.as_deref(), Some("# New Doc\n\nNew content."));
}

#[tokio::test]
async fn add_creates_category_directories() {
    let (dir, store) = temp_store();
    let result = store
        .add_document("git__advanced__rebase", "# Rebase\n\nRewrite history.")
        .await
        .expect("add");
    assert!(result.success);
    assert!(dir.path().join("git/advanced/rebase.md").is_file());
    assert!(store.is_category("git").await.expect("is_category"));
    assert!(store.is_category("git__advanced").await.expect("is_category"));
    assert!(!store.is_category("git__advanced__rebase").await.expect("is_category"));
}

#[tokio::test]
async fn add_existing_document_fails_and_keeps_content() {
    let (_dir, store) = temp_store();
    store.add_document("existing", "# First").await.expect("add");

    let result = store
        .add_document("existing", "# Second")
        .await
        .expect("add");
    assert!(!result.success);
    assert!(result.error_message().contains("already exists"));

    let content = store.get_document_content("existing").await.expect("read");
    assert_eq!(content.as_deref(), Some("# First"));
}

#[tokio::test]
async fn document_exists_reflects_filesystem() {
    let (dir, store) = temp_store();
    assert!(!store.document_exists("exists").await.expect("exists"));

    store
        .add_document("exists", "# Exists\n\nContent.")
        .await
        .expect("add");
    assert!(store.document_exists("exists").await.expect("exists"));

    fs::create_dir(dir.path().join("folder")).expect("mkdir");
    assert!(!store.document_exists("folder").await.expect("exists"));
}

#[tokio::test]
async fn update_replaces_existing_content() {
    let (_dir, store) = temp_store();
    store
        .add_document("to-update", "# Original\n\nOriginal content.")
        .await
        .expect("add");

    let updated = store
        .update_document("to-update", "# Updated\n\nUpdated content.")
        .await
        .expect("update");
    assert!(updated);

    let content = store.get_document_content("to-update").await.expect("read");
    assert_eq!(content.as_deref(), Some("# Updated\n\nUpdated content."));
}

#[tokio::test]
async fn update_missing_document_creates_nothing() {
    let (dir, store) = temp_store();
    let updated = store
        .update_document("missing", "# Content")
        .await
        .expect("update");
    assert!(!updated);
    assert!(!dir.path().join("missing.md").exists());
}

#[tokio::test]
async fn delete_removes_file_and_empty_categories() {
    let (dir, store) = temp_store();
    store
        .add_document("git__advanced__rebase", "# Rebase\n\nRewrite history.")
        .await
        .expect("add");
    store
        .add_document("git__workflow", "# Workflow\n\nBranching.")
        .await
        .expect("add");

    let result = store
        .delete_document("git__advanced__rebase")
        .await
        .expect("delete");
    assert!(result.success);
    assert!(!dir.path().join("git/advanced").exists());
    assert!(dir.path().join("git/workflow.md").is_file());
    assert!(dir.path().exists());
}

#[tokio::test]
async fn delete_missing_document_reports_not_found() {
    let (_dir, store) = temp_store();
    let result = store.delete_document("ghost").await.expect("delete");
    assert!(!result.success);
    assert!(result.error_message().contains("not found"));
}

#[tokio::test]
async fn rename_moves_document_between_categories() {
    let (dir, store) = temp_store();
    store
        .add_document("git__workflow", "# Workflow\n\nBranching.")
        .await
        .expect("add");

    let result = store
        .rename_document("git__workflow", "process__git__workflow")
        .await
        .expect("rename");
    assert!(result.success);

    assert!(!dir.path().join("git").exists());
    let moved = store
        .get_document_content("process__git__workflow")
        .await
        .expect("read");
    assert_eq!(moved.as_deref(), Some("# Workflow\n\nBranching."));
}

#[tokio::test]
async fn rename_onto_existing_document_leaves_both_untouched() {
    let (_dir, store) = temp_store();
    store.add_document("one", "# One\n\nFirst.").await.expect("add");
    store.add_document("two", "# Two\n\nSecond.").await.expect("add");

    let result = store.rename_document("one", "two").await.expect("rename");
    assert!(!result.success);
    assert!(result.error_message().contains("already exists"));

    let one = store.get_document_content("one").await.expect("read");
    let two = store.get_document_content("two").await.expect("read");
    assert_eq!(one.as_deref(), Some("# One\n\nFirst."));
    assert_eq!(two.as_deref(), Some("# Two\n\nSecond."));
}

#[tokio::test]
async fn rename_missing_document_reports_not_found() {
    let (dir, store) = temp_store();
    let result = store
        .rename_document("ghost", "nested__target")
        .await
        .expect("rename");
    assert!(!result.success);
    assert!(result.error_message().contains("not found"));
    assert!(!dir.path().join("nested").exists());
}

#[tokio::test]
async fn rename_to_same_id_is_a_collision() {
    let (_dir, store) = temp_store();
    store.add_document("same", "# Same\n\nBody.").await.expect("add");

    let result = store.rename_document("same", "same").await.expect("rename");
    assert!(!result.success);
    assert!(store.document_exists("same").await.expect("exists"));
}
