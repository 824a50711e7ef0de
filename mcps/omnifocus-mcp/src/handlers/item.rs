//! Single task/project write handlers

use mcp_common::{
    invalid_params, text_error, text_success, CallToolResult, McpError, ResultExt,
};
use tracing::{info, warn};

use crate::dates::format_long_date;
use crate::omnifocus::{run_action, Action, ActionReply, BridgeError, ScriptRunner};
use crate::params::{AddProjectParams, AddTaskParams, EditItemParams, RemoveItemParams};

use super::not_found_message;

fn with_tags(tags: &Option<Vec<String>>, skipped: &[String]) -> String {
    let applied: Vec<&str> = tags
        .iter()
        .flatten()
        .filter(|t| !skipped.contains(*t))
        .map(String::as_str)
        .collect();
    if applied.is_empty() {
        String::new()
    } else {
        format!(" with tags: {}", applied.join(", "))
    }
}

fn due_on(due_date: Option<&str>) -> String {
    due_date
        .and_then(format_long_date)
        .map(|d| format!(" due on {}", d))
        .unwrap_or_default()
}

/// Success line for a new task
pub(crate) fn task_created_message(params: &AddTaskParams, reply: &ActionReply) -> String {
    let parent = params
        .parent_task_name
        .as_deref()
        .or(params.parent_task_id.as_deref())
        .filter(|s| !s.is_empty());

    let project = params.project_name.as_deref().filter(|s| !s.is_empty());

    // Replies without a location fall back to the requested placement
    let location = match (reply.location.as_deref(), parent, project) {
        (Some("inbox"), _, _) => "in your inbox".to_string(),
        (Some("parent") | None, Some(parent), _) => format!("as subtask of \"{}\"", parent),
        (Some("project") | None, _, Some(project)) => format!("in project \"{}\"", project),
        _ => "in your inbox".to_string(),
    };

    format!(
        "✅ Task \"{}\" created successfully {}{}{}.",
        params.name,
        location,
        due_on(params.due_date.as_deref()),
        with_tags(&params.tags, &reply.skipped_tags),
    )
}

/// Success line for a new project
pub(crate) fn project_created_message(params: &AddProjectParams, reply: &ActionReply) -> String {
    let location = match params.folder_name.as_deref().filter(|s| !s.is_empty()) {
        Some(folder) => format!("in folder \"{}\"", folder),
        None => "at the root level".to_string(),
    };
    let ordering = if params.sequential.unwrap_or(false) {
        "sequential"
    } else {
        "parallel"
    };

    format!(
        "✅ Project \"{}\" created successfully {}{}{} ({}).",
        params.name,
        location,
        due_on(params.due_date.as_deref()),
        with_tags(&params.tags, &reply.skipped_tags),
        ordering,
    )
}

/// Create a task in the inbox, a project or under a parent task
pub async fn add_omnifocus_task(
    runner: &dyn ScriptRunner,
    params: AddTaskParams,
) -> Result<CallToolResult, McpError> {
    if params.name.trim().is_empty() {
        return Err(invalid_params("Task name must not be empty"));
    }
    let args = params.normalized().to_mcp_err()?;

    match run_action(runner, Action::AddTask, &args).await {
        Ok(reply) => {
            info!(id = ?reply.id, "task created");
            Ok(text_success(task_created_message(&params, &reply)))
        }
        Err(e) => {
            warn!(error = %e, "task creation failed");
            Ok(text_error(format!("Failed to create task: {}", e)))
        }
    }
}

/// Create a project at the top level or inside a folder
pub async fn add_project(
    runner: &dyn ScriptRunner,
    params: AddProjectParams,
) -> Result<CallToolResult, McpError> {
    if params.name.trim().is_empty() {
        return Err(invalid_params("Project name must not be empty"));
    }
    let args = params.normalized().to_mcp_err()?;

    match run_action(runner, Action::AddProject, &args).await {
        Ok(reply) => {
            info!(id = ?reply.id, "project created");
            Ok(text_success(project_created_message(&params, &reply)))
        }
        Err(e) => {
            warn!(error = %e, "project creation failed");
            Ok(text_error(format!("Failed to create project: {}", e)))
        }
    }
}

/// Delete a task or project by id, falling back to name
pub async fn remove_item(
    runner: &dyn ScriptRunner,
    params: RemoveItemParams,
) -> Result<CallToolResult, McpError> {
    if !params.has_identifier() {
        return Err(invalid_params(
            "Either id or name must be provided to remove an item.",
        ));
    }

    match run_action(runner, Action::RemoveItem, &params).await {
        Ok(reply) => {
            let name = reply.name.as_deref().unwrap_or_default();
            Ok(text_success(format!(
                "✅ {} \"{}\" removed successfully.",
                params.item_type.label(),
                name
            )))
        }
        Err(BridgeError::ItemNotFound) => Ok(text_error(not_found_message(
            params.item_type,
            params.id.as_deref(),
            params.name.as_deref(),
        ))),
        Err(e) => {
            warn!(error = %e, "remove failed");
            Ok(text_error(format!(
                "Failed to remove {}: {}",
                params.item_type.as_str(),
                e
            )))
        }
    }
}

/// Change properties of a task or project
pub async fn edit_item(
    runner: &dyn ScriptRunner,
    params: EditItemParams,
) -> Result<CallToolResult, McpError> {
    if !params.has_identifier() {
        return Err(invalid_params(
            "Either id or name must be provided to edit an item.",
        ));
    }
    let args = params.normalized().to_mcp_err()?;

    match run_action(runner, Action::EditItem, &args).await {
        Ok(reply) => {
            let changed = if reply.changed_properties.is_empty() {
                String::new()
            } else {
                format!(" ({})", reply.changed_properties.join(", "))
            };
            let name = reply.name.as_deref().unwrap_or_default();
            Ok(text_success(format!(
                "✅ {} \"{}\" updated successfully{}.",
                params.item_type.label(),
                name,
                changed
            )))
        }
        Err(BridgeError::ItemNotFound) => Ok(text_error(not_found_message(
            params.item_type,
            params.id.as_deref(),
            params.name.as_deref(),
        ))),
        Err(e) => {
            warn!(error = %e, "edit failed");
            Ok(text_error(format!(
                "Failed to update {}: {}",
                params.item_type.as_str(),
                e
            )))
        }
    }
}
