//! Builders for `CallToolResult` responses

use rmcp::model::{CallToolResult, Content};

/// Successful plain-text response
pub fn text_success(text: impl Into<String>) -> CallToolResult {
    CallToolResult::success(vec![Content::text(text.into())])
}

/// Failed tool call reported to the client as text.
///
/// Use this for failures the model should read and react to (item not
/// found, host application closed). Protocol-level problems belong in an
/// `McpError` instead.
pub fn text_error(text: impl Into<String>) -> CallToolResult {
    CallToolResult::error(vec![Content::text(text.into())])
}

/// Concatenated text of every text content item in a result
pub fn result_text(result: &CallToolResult) -> String {
    result
        .content
        .iter()
        .filter_map(|c| c.as_text().map(|t| t.text.as_str()))
        .collect::<Vec<_>>()
        .join("\n")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_text_success() {
        let result = text_success("created");
        assert!(!result.is_error.unwrap_or(false));
        assert_eq!(result_text(&result), "created");
    }

    #[test]
    fn test_text_error_sets_flag() {
        let result = text_error("not found");
        assert_eq!(result.is_error, Some(true));
        assert_eq!(result_text(&result), "not found");
    }
}
