use mdhelp_core::drafts::Drafts;
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

/// Action performed by the `draft` tool.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, schemars::JsonSchema)]
#[serde(rename_all = "lowercase")]
pub enum DraftAction {
    List,
    Read,
    Add,
    Update,
    Delete,
    Approve,
}

impl DraftAction {
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::List => "list",
            Self::Read => "read",
            Self::Add => "add",
            Self::Update => "update",
            Self::Delete => "delete",
            Self::Approve => "approve",
        }
    }
}

/// Parameters for the `draft` tool.
#[derive(Debug, Clone, Serialize, Deserialize, schemars::JsonSchema)]
#[serde(rename_all = "camelCase")]
pub struct DraftParams {
    /// One of: list, read, add, update, delete, approve.
    pub action: DraftAction,
    /// Draft id. Required for every action except list. Use '__' for hierarchy.
    pub id: Option<String>,
    /// Full markdown content. Required for add and update.
    pub content: Option<String>,
    /// Document id to publish under when approving. Defaults to the draft id.
    pub target_id: Option<String>,
}

#[tool_router(router = tool_router_drafts, vis = "pub")]
impl MdHelpMcp {
    #[tool(description = "Manage drafts: documents staged for review before they appear in the document list. Actions: list, read, add, update, delete, approve. Approving publishes the draft as a regular document (optionally under targetId); it must have a description and the target must not exist.")]
    pub async fn draft(
        &self,
        Parameters(params): Parameters<DraftParams>,
    ) -> Result<CallToolResult, ErrorData> {
        self.finish(self.run_draft(params).await)
    }
}

impl MdHelpMcp {
    async fn run_draft(&self, params: DraftParams) -> StoreResult<CallToolResult> {
        let drafts = Drafts::new(self.store());
        let action = params.action;
        let id = normalize(params.id);
        let content = params.content.filter(|content| !content.trim().is_empty());

        if action == DraftAction::List {
            return list_drafts(&drafts).await;
        }

        let Some(id) = id else {
            return Ok(error_result(format!(
                "id is required for {} action",
                action.as_str()
            )));
        };

        match (action, content) {
            (DraftAction::Read, _) => Ok(drafts.read(&id).await?.map_or_else(
                || error_result(format!("Draft \"{id}\" not found.")),
                text_result,
            )),
            (DraftAction::Delete, _) => {
                let outcome = drafts.delete(&id).await?;
                if !outcome.success {
                    return Ok(error_result(outcome.error_message()));
                }
                Ok(text_result(format!("Draft \"{id}\" deleted successfully.")))
            }
            (DraftAction::Approve, _) => {
                let target = normalize(params.target_id).unwrap_or_else(|| id.clone());
                let outcome = drafts.approve(&id, Some(&target)).await?;
                if !outcome.success {
                    return Ok(error_result(outcome.error_message()));
                }
                Ok(text_result(format!(
                    "Draft \"{id}\" approved as document \"{target}\"."
                )))
            }
            (DraftAction::Add | DraftAction::Update, None) => Ok(error_result(format!(
                "id and content are required for {} action",
                action.as_str()
            ))),
            (DraftAction::Add, Some(content)) => {
                let outcome = drafts.add(&id, &content).await?;
                if !outcome.success {
                    return Ok(error_result(outcome.error_message()));
                }
                Ok(text_result(format!("Draft \"{id}\" created successfully.")))
            }
            (DraftAction::Update, Some(content)) => {
                if !drafts.update(&id, &content).await? {
                    return Ok(error_result(format!(
                        "Draft \"{id}\" not found. Use add action to create it."
                    )));
                }
                Ok(text_result(format!("Draft \"{id}\" updated successfully.")))
            }
            (DraftAction::List, _) => list_drafts(&drafts).await,
        }
    }
}

async fn list_drafts(drafts: &Drafts<'_>) -> StoreResult<CallToolResult> {
    let listing = drafts.list().await?;
    Ok(text_result(format_draft_list(&listing)))
}

fn format_draft_list(listing: &DocumentListing) -> String {
    if listing.documents.is_empty() {
        return "No drafts found.".to_string();
    }
    let mut lines = vec!["Available drafts:".to_string(), String::new()];
    lines.extend(
        listing
            .documents
            .iter()
            .map(|doc| format!("- **{}**: {}", doc.id, doc.description)),
    );
    lines.join("\n")
}
