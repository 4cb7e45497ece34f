use std::borrow::Cow;

use mdhelp_core::StoreError;
use rmcp::ErrorData;
use rmcp::model::{CallToolResult, Content, ErrorCode};
use tracing::error;

pub(crate) fn mcp_err(code: ErrorCode, message: impl Into<Cow<'static, str>>) -> ErrorData {
    ErrorData {
        code,
        message: message.into(),
        data: None,
    }
}

pub(crate) fn map_err(err: &StoreError) -> ErrorData {
    error!(error = %err, "document store failure");
    mcp_err(ErrorCode::INTERNAL_ERROR, err.to_string())
}

pub(crate) fn text_result(text: impl Into<String>) -> CallToolResult {
    CallToolResult::success(vec![Content::text(text)])
}

pub(crate) fn error_result(message: impl AsRef<str>) -> CallToolResult {
    CallToolResult::error(vec![Content::text(format!(
        "Error: {}",
        message.as_ref()
    ))])
}

/// Drops blank optional arguments so they behave like absent ones.
pub(crate) fn normalize(value: Option<String>) -> Option<String> {
    value.and_then(|value| {
        let trimmed = value.trim();
        if trimmed.is_empty() {
            None
        } else {
            Some(trimmed.to_string())
        }
    })
}
