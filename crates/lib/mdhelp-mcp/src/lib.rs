//! MCP server implementation for mdhelp.
//!
//! This crate wires the document store into rmcp tool handlers, appends the
//! configured reminders to every tool response, and exposes runners for the
//! stdio and streamable HTTP transports.

mod helpers;
pub mod response;
pub mod server;
pub mod tools;

use std::sync::Arc;

use mdhelp_core::{DocumentStore, ReminderConfig, StoreError};
use rmcp::{ErrorData, ServerHandler, handler::server::tool::ToolRouter, tool_handler};
use rmcp::model::{CallToolResult, ServerCapabilities, ServerInfo};

use crate::response::wrap_response;

const SERVER_INSTRUCTIONS: &str = r"mdhelp serves a directory of markdown documents, one topic per document.

Workflow:
1. Before starting any task, call `help` without arguments to see every document with its summary.
2. Load the relevant documents with `help` and their `id` to refresh your memory.
3. Keep the documents current:
   - `add` creates a document, `update` replaces its whole content.
   - `rename` changes an id or moves a document to another category.
   - `delete` removes a document permanently.
   - `draft` stages documents under review before they are published.

Notes:
- Ids use `__` for hierarchy: `git__workflow` is `git/workflow.md`.
- The first paragraph after the `# Title` line is the summary shown by `help`;
  `add` and `update` reject documents without one.
- `help` with a category id lists that category; pass `recursive` to include nested categories.";

/// MCP server wrapper around the shared document store.
#[derive(Clone)]
pub struct MdHelpMcp {
    tool_router: ToolRouter<Self>,
    store: Arc<DocumentStore>,
    reminders: Arc<ReminderConfig>,
}

impl MdHelpMcp {
    /// Creates a new server owning its store and reminder configuration.
    #[must_use]
    pub fn new(store: DocumentStore, reminders: ReminderConfig) -> Self {
        Self::with_shared(Arc::new(store), Arc::new(reminders))
    }

    /// Creates a new server over handles shared with other sessions.
    #[must_use]
    pub fn with_shared(store: Arc<DocumentStore>, reminders: Arc<ReminderConfig>) -> Self {
        let tool_router = Self::tool_router_documents() + Self::tool_router_drafts();
        Self {
            tool_router,
            store,
            reminders,
        }
    }

    #[must_use]
    pub fn store(&self) -> &DocumentStore {
        &self.store
    }

    #[must_use]
    pub fn reminders(&self) -> &ReminderConfig {
        &self.reminders
    }

    /// Turns the outcome of a tool body into the response sent to the client.
    ///
    /// Malformed ids become tool errors the agent can correct; I/O faults
    /// become protocol errors.
    pub(crate) fn finish(
        &self,
        outcome: Result<CallToolResult, StoreError>,
    ) -> Result<CallToolResult, ErrorData> {
        let result = match outcome {
            Ok(result) => result,
            Err(err @ StoreError::InvalidId { .. }) => helpers::error_result(err.to_string()),
            Err(err) => return Err(helpers::map_err(&err)),
        };
        Ok(wrap_response(result, &self.reminders))
    }
}

#[tool_handler]
impl ServerHandler for MdHelpMcp {
    fn get_info(&self) -> ServerInfo {
        ServerInfo {
            instructions: Some(SERVER_INSTRUCTIONS.to_string()),
            capabilities: ServerCapabilities::builder()
                .enable_tools()
                .build(),
            ..Default::default()
        }
    }
}
