//! Batch handlers
//!
//! Items run one after another. A failed item does not stop the batch; the
//! call as a whole fails only when no item succeeded.

use mcp_common::{invalid_params, text_error, text_success, CallToolResult, McpError};
use tracing::{info, warn};

use crate::omnifocus::{run_action, Action, ActionReply, BridgeError, ScriptRunner};
use crate::params::{BatchAddItem, BatchAddItemsParams, BatchRemoveItemsParams, ItemType};

/// Per-item outcome, with the error already rendered for the reply
type ItemOutcome = Result<ActionReply, String>;

async fn add_one(runner: &dyn ScriptRunner, item: &BatchAddItem) -> ItemOutcome {
    if item.name.trim().is_empty() {
        return Err("name must not be empty".to_string());
    }

    let outcome = match item.item_type {
        ItemType::Task => {
            let args = item.to_task().normalized().map_err(|e| e.to_string())?;
            run_action(runner, Action::AddTask, &args).await
        }
        ItemType::Project => {
            let args = item.to_project().normalized().map_err(|e| e.to_string())?;
            run_action(runner, Action::AddProject, &args).await
        }
    };
    outcome.map_err(|e| e.to_string())
}

fn summary(verb: &str, outcomes: &[ItemOutcome], details: Vec<String>) -> CallToolResult {
    let succeeded = outcomes.iter().filter(|o| o.is_ok()).count();
    let failed = outcomes.len() - succeeded;

    let mut message = format!("✅ Successfully {} {} items.", verb, succeeded);
    if failed > 0 {
        message.push_str(&format!(" ⚠️ Failed to {} {} items.", base_verb(verb), failed));
    }
    let text = format!("{}\n\n{}", message, details.join("\n"));

    if succeeded == 0 {
        text_error(text)
    } else {
        text_success(text)
    }
}

fn base_verb(verb: &str) -> &str {
    match verb {
        "added" => "add",
        "removed" => "remove",
        other => other,
    }
}

/// Create several tasks and projects
pub async fn batch_add_items(
    runner: &dyn ScriptRunner,
    params: BatchAddItemsParams,
) -> Result<CallToolResult, McpError> {
    if params.items.is_empty() {
        return Err(invalid_params("items must contain at least one item"));
    }

    let mut outcomes = Vec::with_capacity(params.items.len());
    for item in &params.items {
        let outcome = add_one(runner, item).await;
        if let Err(ref e) = outcome {
            warn!(name = %item.name, error = %e, "batch item failed");
        }
        outcomes.push(outcome);
    }

    let details = params
        .items
        .iter()
        .zip(&outcomes)
        .map(|(item, outcome)| match outcome {
            Ok(_) => format!("- ✅ {}: \"{}\"", item.item_type.as_str(), item.name),
            Err(e) => format!(
                "- ❌ {}: \"{}\" - Error: {}",
                item.item_type.as_str(),
                item.name,
                e
            ),
        })
        .collect();

    info!(items = outcomes.len(), "batch add finished");
    Ok(summary("added", &outcomes, details))
}

/// Delete several tasks and projects
pub async fn batch_remove_items(
    runner: &dyn ScriptRunner,
    params: BatchRemoveItemsParams,
) -> Result<CallToolResult, McpError> {
    if params.items.is_empty() {
        return Err(invalid_params("items must contain at least one item"));
    }
    if params.items.iter().any(|item| !item.has_identifier()) {
        return Err(invalid_params(
            "Each item must have either id or name provided to remove it.",
        ));
    }

    let mut outcomes = Vec::with_capacity(params.items.len());
    for item in &params.items {
        let outcome = run_action(runner, Action::RemoveItem, item)
            .await
            .map_err(|e| match e {
                BridgeError::ItemNotFound => "Item not found".to_string(),
                other => other.to_string(),
            });
        outcomes.push(outcome);
    }

    let details = params
        .items
        .iter()
        .zip(&outcomes)
        .map(|(item, outcome)| match outcome {
            Ok(reply) => format!(
                "- ✅ {}: \"{}\"",
                item.item_type.as_str(),
                reply.name.as_deref().unwrap_or_default()
            ),
            Err(e) => {
                let identifier = item
                    .id
                    .as_deref()
                    .filter(|s| !s.is_empty())
                    .or(item.name.as_deref())
                    .unwrap_or_default();
                format!(
                    "- ❌ {}: {} - Error: {}",
                    item.item_type.as_str(),
                    identifier,
                    e
                )
            }
        })
        .collect();

    info!(items = outcomes.len(), "batch remove finished");
    Ok(summary("removed", &outcomes, details))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::omnifocus::testing::FakeRunner;
    use mcp_common::result_text;
    use pretty_assertions::assert_eq;
    use serde_json::json;

    #[tokio::test]
    async fn test_batch_add_reports_each_item() {
        let runner = FakeRunner::new()
            .reply(r#"{"success":true,"id":"p1","name":"Garden"}"#)
            .reply(r#"{"success":false,"error":"Project not found: Gardn"}"#)
            .reply(r#"{"success":true,"id":"t2","name":"Water"}"#);

        let params: BatchAddItemsParams = serde_json::from_value(json!({
            "items": [
                { "type": "project", "name": "Garden" },
                { "type": "task", "name": "Buy seeds", "projectName": "Gardn" },
                { "type": "task", "name": "Water", "projectName": "Garden" }
            ]
        }))
        .unwrap();

        let result = batch_add_items(&runner, params).await.unwrap();
        assert_ne!(result.is_error, Some(true));
        assert_eq!(
            result_text(&result),
            "✅ Successfully added 2 items. ⚠️ Failed to add 1 items.\n\n\
             - ✅ project: \"Garden\"\n\
             - ❌ task: \"Buy seeds\" - Error: Project not found: Gardn\n\
             - ✅ task: \"Water\""
        );
        assert_eq!(runner.names(), vec!["add_project", "add_task", "add_task"]);
    }

    #[tokio::test]
    async fn test_batch_add_bad_date_fails_only_that_item() {
        let runner = FakeRunner::new().reply(r#"{"success":true,"id":"t1"}"#);
        let params: BatchAddItemsParams = serde_json::from_value(json!({
            "items": [
                { "type": "task", "name": "Later", "dueDate": "later" },
                { "type": "task", "name": "Now" }
            ]
        }))
        .unwrap();

        let result = batch_add_items(&runner, params).await.unwrap();
        let text = result_text(&result);
        assert!(text.contains("- ❌ task: \"Later\" - Error: invalid date 'later'"));
        assert!(text.contains("- ✅ task: \"Now\""));
        assert_eq!(runner.names(), vec!["add_task"]);
    }

    #[tokio::test]
    async fn test_batch_add_all_failed_is_error() {
        let runner = FakeRunner::new().fail(BridgeError::NotFound);
        let params: BatchAddItemsParams =
            serde_json::from_value(json!({ "items": [{ "type": "task", "name": "X" }] })).unwrap();

        let result = batch_add_items(&runner, params).await.unwrap();
        assert_eq!(result.is_error, Some(true));
        assert!(result_text(&result).starts_with("✅ Successfully added 0 items. ⚠️ Failed to add 1 items."));
    }

    #[tokio::test]
    async fn test_batch_add_empty_is_invalid() {
        let runner = FakeRunner::new();
        let params = BatchAddItemsParams { items: vec![] };
        assert!(batch_add_items(&runner, params).await.is_err());
    }

    #[tokio::test]
    async fn test_batch_remove() {
        let runner = FakeRunner::new()
            .reply(r#"{"success":true,"id":"a","name":"Old task"}"#)
            .reply(r#"{"success":false,"notFound":true,"error":"Item not found"}"#);

        let params: BatchRemoveItemsParams = serde_json::from_value(json!({
            "items": [
                { "id": "a", "itemType": "task" },
                { "name": "Gone", "itemType": "project" }
            ]
        }))
        .unwrap();

        let result = batch_remove_items(&runner, params).await.unwrap();
        assert_eq!(
            result_text(&result),
            "✅ Successfully removed 1 items. ⚠️ Failed to remove 1 items.\n\n\
             - ✅ task: \"Old task\"\n\
             - ❌ project: Gone - Error: Item not found"
        );
    }

    #[tokio::test]
    async fn test_batch_remove_requires_identifiers() {
        let runner = FakeRunner::new();
        let params: BatchRemoveItemsParams = serde_json::from_value(json!({
            "items": [{ "id": "a", "itemType": "task" }, { "itemType": "task" }]
        }))
        .unwrap();
        let err = batch_remove_items(&runner, params).await.unwrap_err();
        assert!(err.message.contains("Each item must have either id or name"));
        assert!(runner.names().is_empty());
    }
}
