//! Reminder text appended to outgoing tool results.

use mdhelp_core::ReminderConfig;
use rmcp::model::{CallToolResult, RawContent};

pub const MCP_REMINDER: &str = "[Reminder] Always refer to this MCP to check for relevant documentation before starting any task. Use the 'help' tool to list available documents.";

pub const ORGANIZE_REMINDER: &str = "[Reminder] Review document organization: Use directory hierarchy for related topics. Each file should cover ONE topic only - don't write detailed blocks, instead link to separate topic documents.";

const BLOCK_SEPARATOR: &str = "\n\n---\n\n";
const REMINDER_SEPARATOR: &str = "\n\n";
const CUSTOM_PREFIX: &str = "[Reminder] ";

/// Builds the text appended to every content block, or `None` when no
/// reminder is configured.
///
/// Order is fixed: the MCP reminder, the organize reminder, then custom
/// reminders as supplied.
#[must_use]
pub fn build_reminder_block(config: &ReminderConfig) -> Option<String> {
    if config.is_empty() {
        return None;
    }

    let mut reminders = Vec::with_capacity(2 + config.custom_reminders.len());
    if config.remind_mcp {
        reminders.push(MCP_REMINDER.to_string());
    }
    if config.remind_organize {
        reminders.push(ORGANIZE_REMINDER.to_string());
    }
    reminders.extend(
        config
            .custom_reminders
            .iter()
            .map(|reminder| format!("{CUSTOM_PREFIX}{reminder}")),
    );

    Some(format!(
        "{BLOCK_SEPARATOR}{}",
        reminders.join(REMINDER_SEPARATOR)
    ))
}

/// Appends the reminder block to the text of every content block.
///
/// Returns the result untouched when no reminder is configured. Error
/// results are wrapped the same way as successful ones.
#[must_use]
pub fn wrap_response(mut result: CallToolResult, config: &ReminderConfig) -> CallToolResult {
    let Some(block) = build_reminder_block(config) else {
        return result;
    };
    for item in &mut result.content {
        if let RawContent::Text(text) = &mut item.raw {
            text.text.push_str(&block);
        }
    }
    result
}

#[cfg(test)]
mod tests {
    use rmcp::model::Content;

    use super::*;

    fn config(remind_mcp: bool, remind_organize: bool, custom: &[&str]) -> ReminderConfig {
        ReminderConfig::new(
            remind_mcp,
            remind_organize,
            custom.iter().map(|text| (*text).to_string()).collect(),
        )
    }

    fn texts(result: &CallToolResult) -> Vec<String> {
        result
            .content
            .iter()
            .filter_map(|item| item.raw.as_text().map(|text| text.text.clone()))
            .collect()
    }

    #[test]
    fn no_reminders_configured() {
        assert_eq!(build_reminder_block(&config(false, false, &[])), None);
    }

    #[test]
    fn reminder_block_contents() {
        let cases: [(ReminderConfig, &[&str]); 6] = [
            (config(true, false, &[]), &["Always refer to this MCP", "help"]),
            (
                config(false, true, &[]),
                &["Review document organization", "ONE topic only"],
            ),
            (
                config(true, true, &[]),
                &["Always refer to this MCP", "Review document organization"],
            ),
            (config(false, false, &["Run tests"]), &["[Reminder] Run tests"]),
            (
                config(false, false, &["First", "Second"]),
                &["[Reminder] First", "[Reminder] Second"],
            ),
            (
                config(true, true, &["Custom"]),
                &[
                    "Always refer to this MCP",
                    "Review document organization",
                    "[Reminder] Custom",
                ],
            ),
        ];

        for (config, expected) in cases {
            let block = build_reminder_block(&config).expect("reminders configured");
            for text in expected {
                assert!(block.contains(text), "{block:?} should contain {text:?}");
            }
        }
    }

    #[test]
    fn block_starts_with_separator_and_keeps_order() {
        let block = build_reminder_block(&config(true, true, &["Custom"])).expect("block");
        assert_eq!(
            block,
            format!("\n\n---\n\n{MCP_REMINDER}\n\n{ORGANIZE_REMINDER}\n\n[Reminder] Custom")
        );
    }

    #[test]
    fn wrap_without_reminders_is_identity() {
        let result = CallToolResult::success(vec![Content::text("body")]);
        let wrapped = wrap_response(result, &ReminderConfig::default());
        assert_eq!(texts(&wrapped), ["body"]);
        assert_ne!(wrapped.is_error, Some(true));
    }

    #[test]
    fn wrap_appends_to_every_block() {
        let result = CallToolResult::error(vec![Content::text("first"), Content::text("second")]);
        let wrapped = wrap_response(result, &config(false, false, &["Check"]));
        assert_eq!(
            texts(&wrapped),
            [
                "first\n\n---\n\n[Reminder] Check",
                "second\n\n---\n\n[Reminder] Check"
            ]
        );
        assert_eq!(wrapped.is_error, Some(true));
    }
}
