use mdhelp_core::parser::parse_description;
use mdhelp_core::store::format_document_list;
use mdhelp_core::validators::{
    ExistsValidator,
    HasDescriptionValidator,
    NotExistsValidator,
    run_validators,
};
use mdhelp_core::{DocumentListing, StoreResult};
use rmcp::{
    ErrorData,
    handler::server::wrapper::Parameters,
    model::CallToolResult,
    schemars,
    tool,
    tool_router,
};
use serde::{Deserialize, Serialize};

use crate::MdHelpMcp;
use crate::helpers::{error_result, normalize, text_result};

/// Parameters for listing documents or reading one.
#[derive(Debug, Clone, Default, Serialize, Deserialize, schemars::JsonSchema)]
pub struct HelpParams {
    /// Document or category id (filename without .md). Use '__' for hierarchy,
    /// e.g. 'git__workflow' for git/workflow.md. Omit to list all documents.
    pub id: Option<String>,
    /// List nested categories too, reporting every document with its full id.
    pub recursive: Option<bool>,
}

/// Parameters for creating or replacing a document.
#[derive(Debug, Clone, Serialize, Deserialize, schemars::JsonSchema)]
pub struct DocumentParams {
    /// Document id (filename without .md). Use '__' for hierarchy.
    pub id: String,
    /// Full markdown content of the document.
    pub content: String,
}

/// Parameters for deleting a document.
#[derive(Debug, Clone, Serialize, Deserialize, schemars::JsonSchema)]
pub struct DeleteParams {
    /// Document id to delete. Use '__' for hierarchy (e.g. 'git__workflow').
    pub id: String,
}

/// Parameters for renaming or moving a document.
#[derive(Debug, Clone, Serialize, Deserialize, schemars::JsonSchema)]
#[serde(rename_all = "camelCase")]
pub struct RenameParams {
    /// Current document id (e.g. 'git__workflow').
    pub old_id: String,
    /// New document id (e.g. 'git__advanced__workflow').
    pub new_id: String,
}

#[tool_router(router = tool_router_documents, vis = "pub")]
impl MdHelpMcp {
    #[tool(description = "List markdown documents or get content by ID. Without arguments, lists all available documents with summaries. With a document ID, returns the full content of that document; with a category ID, lists that category. Use this tool BEFORE starting any task to recall relevant instructions. When uncertain about a topic, check the summary list first to identify the relevant document, then load it to refresh your memory.")]
    pub async fn help(
        &self,
        Parameters(params): Parameters<HelpParams>,
    ) -> Result<CallToolResult, ErrorData> {
        self.finish(self.run_help(params).await)
    }

    #[tool(description = "Add a new markdown document. The ID becomes the filename (without .md extension); use '__' for hierarchy. Keep each document to ONE topic. The first paragraph after the title becomes the summary shown in the document list and is required.")]
    pub async fn add(
        &self,
        Parameters(params): Parameters<DocumentParams>,
    ) -> Result<CallToolResult, ErrorData> {
        self.finish(self.run_add(params).await)
    }

    #[tool(description = "Update an existing markdown document. Replaces the entire content. When updating, maintain the single-topic focus. The first paragraph after the title becomes the summary shown in the document list, so make it descriptive enough for AI to identify when this document is relevant.")]
    pub async fn update(
        &self,
        Parameters(params): Parameters<DocumentParams>,
    ) -> Result<CallToolResult, ErrorData> {
        self.finish(self.run_update(params).await)
    }

    #[tool(description = "Delete a markdown document. This action is irreversible. Use with caution.")]
    pub async fn delete(
        &self,
        Parameters(params): Parameters<DeleteParams>,
    ) -> Result<CallToolResult, ErrorData> {
        self.finish(self.run_delete(params).await)
    }

    #[tool(description = "Rename or move a markdown document. Changes the document ID (and file path). Use this to reorganize documents or fix naming.")]
    pub async fn rename(
        &self,
        Parameters(params): Parameters<RenameParams>,
    ) -> Result<CallToolResult, ErrorData> {
        self.finish(self.run_rename(params).await)
    }
}

impl MdHelpMcp {
    async fn run_help(&self, params: HelpParams) -> StoreResult<CallToolResult> {
        let recursive = params.recursive.unwrap_or(false);
        let Some(id) = normalize(params.id) else {
            let listing = self.store().list_documents(None, recursive).await?;
            return Ok(listing_result(&listing));
        };

        if let Some(content) = self.store().get_document_content(&id).await? {
            return Ok(text_result(content));
        }
        if self.store().is_category(&id).await? {
            let listing = self.store().list_documents(Some(&id), recursive).await?;
            return Ok(listing_result(&listing));
        }
        Ok(error_result(format!("Document \"{id}\" not found.")))
    }

    async fn run_add(&self, params: DocumentParams) -> StoreResult<CallToolResult> {
        let DocumentParams { id, content } = params;
        let exists = self.store().document_exists(&id).await?;
        let outcome = run_validators(&[
            &NotExistsValidator::new(&id, exists),
            &HasDescriptionValidator::new(parse_description(&content)),
        ]);
        if !outcome.success {
            return Ok(error_result(outcome.error_message()));
        }

        let outcome = self.store().add_document(&id, &content).await?;
        if !outcome.success {
            return Ok(error_result(outcome.error_message()));
        }
        Ok(text_result(format!("Document \"{id}\" created successfully.")))
    }

    async fn run_update(&self, params: DocumentParams) -> StoreResult<CallToolResult> {
        let DocumentParams { id, content } = params;
        let exists = self.store().document_exists(&id).await?;
        let outcome = run_validators(&[
            &ExistsValidator::new(&id, exists),
            &HasDescriptionValidator::new(parse_description(&content)),
        ]);
        if !outcome.success {
            let hint = if exists { "" } else { " Use 'add' to create it." };
            return Ok(error_result(format!("{}{hint}", outcome.error_message())));
        }

        if !self.store().update_document(&id, &content).await? {
            return Ok(error_result(format!(
                "Document \"{id}\" not found. Use 'add' to create it."
            )));
        }
        Ok(text_result(format!("Document \"{id}\" updated successfully.")))
    }

    async fn run_delete(&self, params: DeleteParams) -> StoreResult<CallToolResult> {
        let outcome = self.store().delete_document(&params.id).await?;
        if !outcome.success {
            return Ok(error_result(outcome.error_message()));
        }
        Ok(text_result(format!(
            "Document \"{}\" deleted successfully.",
            params.id
        )))
    }

    async fn run_rename(&self, params: RenameParams) -> StoreResult<CallToolResult> {
        let RenameParams { old_id, new_id } = params;
        let outcome = self.store().rename_document(&old_id, &new_id).await?;
        if !outcome.success {
            return Ok(error_result(outcome.error_message()));
        }
        Ok(text_result(format!(
            "Document renamed from \"{old_id}\" to \"{new_id}\" successfully."
        )))
    }
}

fn listing_result(listing: &DocumentListing) -> CallToolResult {
    text_result(format_document_list(&listing.documents, &listing.categories))
}
