//! Summary extraction from markdown content.
//!
//! The summary of a document is the first paragraph after its `# ` title.
//! Lines of that paragraph are trimmed and joined with single spaces.

/// Returned when a document has no title or no paragraph after it.
pub const NO_DESCRIPTION: &str = "(No description)";

/// Returned by listings when a document exists but cannot be read.
pub const UNREADABLE_DESCRIPTION: &str = "(Unable to read file)";

/// Maximum description length in chars, ellipsis included.
pub const MAX_DESCRIPTION_CHARS: usize = 150;

const ELLIPSIS: &str = "...";

/// Extracts the one-paragraph summary of a markdown document.
///
/// Scanning starts after the first line that begins with `# ` once trimmed.
/// Blank lines before the paragraph are skipped; the paragraph ends at the
/// next blank line or at the next heading.
#[must_use]
pub fn parse_description(content: &str) -> String {
    let mut found_title = false;
    let mut lines: Vec<&str> = Vec::new();

    for line in content.lines() {
        let trimmed = line.trim_matches(is_blank);

        if !found_title {
            found_title = trimmed.starts_with("# ");
            continue;
        }

        if trimmed.is_empty() {
            if lines.is_empty() {
                continue;
            }
            break;
        }

        if trimmed.starts_with('#') {
            break;
        }

        lines.push(trimmed);
    }

    if lines.is_empty() {
        return NO_DESCRIPTION.to_string();
    }

    truncate_description(&lines.join(" "))
}

/// Whitespace as far as summaries are concerned, byte-order marks included.
fn is_blank(c: char) -> bool {
    c.is_whitespace() || c == '\u{feff}'
}

fn truncate_description(description: &str) -> String {
    if description.chars().count() <= MAX_DESCRIPTION_CHARS {
        return description.to_string();
    }
    let keep = MAX_DESCRIPTION_CHARS - ELLIPSIS.len();
    let mut truncated: String = description.chars().take(keep).collect();
    truncated.push_str(ELLIPSIS);
    truncated
}
