//! Task and project write parameters

use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

use crate::dates::{normalize_input_date, DateError};

/// Which kind of item a tool call addresses
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "lowercase")]
pub enum ItemType {
    Task,
    Project,
}

impl ItemType {
    pub fn as_str(self) -> &'static str {
        match self {
            ItemType::Task => "task",
            ItemType::Project => "project",
        }
    }

    /// Capitalised form for messages
    pub fn label(self) -> &'static str {
        match self {
            ItemType::Task => "Task",
            ItemType::Project => "Project",
        }
    }
}

/// New status for a task
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "lowercase")]
pub enum TaskStatusChange {
    Incomplete,
    Completed,
    Dropped,
}

/// New status for a project
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "camelCase")]
pub enum ProjectStatusChange {
    Active,
    Completed,
    Dropped,
    OnHold,
}

fn normalize(date: &mut Option<String>) -> Result<(), DateError> {
    if let Some(value) = date.as_mut() {
        *value = normalize_input_date(value)?;
    }
    Ok(())
}

/// Like [`normalize`], but an empty string survives as "clear the date"
fn normalize_or_clear(date: &mut Option<String>) -> Result<(), DateError> {
    match date.as_deref() {
        Some("") | None => Ok(()),
        Some(_) => normalize(date),
    }
}

/// Parameters for creating a task
#[derive(Debug, Default, Clone, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "camelCase")]
pub struct AddTaskParams {
    #[schemars(description = "The name of the task")]
    pub name: String,

    #[schemars(description = "Additional notes for the task")]
    pub note: Option<String>,

    #[schemars(description = "The due date of the task in ISO format (YYYY-MM-DD or full ISO date)")]
    pub due_date: Option<String>,

    #[schemars(description = "The defer date of the task in ISO format (YYYY-MM-DD or full ISO date)")]
    pub defer_date: Option<String>,

    #[schemars(description = "Whether the task is flagged or not")]
    pub flagged: Option<bool>,

    #[schemars(description = "Estimated time to complete the task, in minutes")]
    pub estimated_minutes: Option<u32>,

    #[schemars(description = "Tags to assign to the task. Tags that do not exist are skipped")]
    pub tags: Option<Vec<String>>,

    #[schemars(description = "The name of the project to add the task to (inbox when omitted)")]
    pub project_name: Option<String>,

    #[schemars(description = "The ID of the parent task to nest this task under")]
    pub parent_task_id: Option<String>,

    #[schemars(description = "The name of the parent task to nest this task under")]
    pub parent_task_name: Option<String>,
}

impl AddTaskParams {
    /// Copy with client dates turned into RFC 3339 local timestamps
    pub fn normalized(&self) -> Result<Self, DateError> {
        let mut params = self.clone();
        normalize(&mut params.due_date)?;
        normalize(&mut params.defer_date)?;
        Ok(params)
    }
}

/// Parameters for creating a project
#[derive(Debug, Default, Clone, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "camelCase")]
pub struct AddProjectParams {
    #[schemars(description = "The name of the project")]
    pub name: String,

    #[schemars(description = "Additional notes for the project")]
    pub note: Option<String>,

    #[schemars(description = "The due date of the project in ISO format (YYYY-MM-DD or full ISO date)")]
    pub due_date: Option<String>,

    #[schemars(description = "The defer date of the project in ISO format (YYYY-MM-DD or full ISO date)")]
    pub defer_date: Option<String>,

    #[schemars(description = "Whether the project is flagged or not")]
    pub flagged: Option<bool>,

    #[schemars(description = "Estimated time to complete the project, in minutes")]
    pub estimated_minutes: Option<u32>,

    #[schemars(description = "Tags to assign to the project")]
    pub tags: Option<Vec<String>>,

    #[schemars(description = "The name of the folder to add the project to")]
    pub folder_name: Option<String>,

    #[schemars(description = "Whether tasks in the project should be sequential (default: false)")]
    pub sequential: Option<bool>,
}

impl AddProjectParams {
    /// Copy with client dates turned into RFC 3339 local timestamps
    pub fn normalized(&self) -> Result<Self, DateError> {
        let mut params = self.clone();
        normalize(&mut params.due_date)?;
        normalize(&mut params.defer_date)?;
        Ok(params)
    }
}

/// Parameters for removing a task or project
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "camelCase")]
pub struct RemoveItemParams {
    #[schemars(description = "The ID of the task or project to remove")]
    pub id: Option<String>,

    #[schemars(description = "The name of the task or project to remove (used when the ID is missing or not found)")]
    pub name: Option<String>,

    #[schemars(description = "Type of item to remove ('task' or 'project')")]
    pub item_type: ItemType,
}

impl RemoveItemParams {
    pub fn has_identifier(&self) -> bool {
        has_identifier(&self.id, &self.name)
    }
}

/// Parameters for editing a task or project
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "camelCase")]
pub struct EditItemParams {
    #[schemars(description = "The ID of the task or project to edit")]
    pub id: Option<String>,

    #[schemars(description = "The name of the task or project to edit (used when the ID is missing or not found)")]
    pub name: Option<String>,

    #[schemars(description = "Type of item to edit ('task' or 'project')")]
    pub item_type: ItemType,

    #[schemars(description = "New name for the item")]
    pub new_name: Option<String>,

    #[schemars(description = "New note for the item")]
    pub new_note: Option<String>,

    #[schemars(description = "New due date in ISO format (YYYY-MM-DD or full ISO date); empty string to clear")]
    pub new_due_date: Option<String>,

    #[schemars(description = "New defer date in ISO format (YYYY-MM-DD or full ISO date); empty string to clear")]
    pub new_defer_date: Option<String>,

    #[schemars(description = "Set flagged status (true to flag, false to unflag)")]
    pub new_flagged: Option<bool>,

    #[schemars(description = "New estimated minutes")]
    pub new_estimated_minutes: Option<u32>,

    #[schemars(description = "New status for tasks (incomplete, completed, dropped)")]
    pub new_status: Option<TaskStatusChange>,

    #[schemars(description = "Tags to add to the task; missing tags are created")]
    pub add_tags: Option<Vec<String>>,

    #[schemars(description = "Tags to remove from the task")]
    pub remove_tags: Option<Vec<String>>,

    #[schemars(description = "Tags to replace all existing tags with; wins over addTags and removeTags")]
    pub replace_tags: Option<Vec<String>>,

    #[schemars(description = "Whether the project should be sequential")]
    pub new_sequential: Option<bool>,

    #[schemars(description = "New folder to move the project to; created when missing")]
    pub new_folder_name: Option<String>,

    #[schemars(description = "New status for projects (active, completed, dropped, onHold)")]
    pub new_project_status: Option<ProjectStatusChange>,
}

impl EditItemParams {
    pub fn has_identifier(&self) -> bool {
        has_identifier(&self.id, &self.name)
    }

    /// Copy with client dates turned into RFC 3339 local timestamps.
    /// Empty strings are kept; they clear the date.
    pub fn normalized(&self) -> Result<Self, DateError> {
        let mut params = self.clone();
        normalize_or_clear(&mut params.new_due_date)?;
        normalize_or_clear(&mut params.new_defer_date)?;
        Ok(params)
    }
}

fn has_identifier(id: &Option<String>, name: &Option<String>) -> bool {
    id.as_deref().is_some_and(|s| !s.is_empty()) || name.as_deref().is_some_and(|s| !s.is_empty())
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_item_type_and_statuses_on_the_wire() {
        let params: EditItemParams = serde_json::from_value(json!({
            "id": "abc",
            "itemType": "project",
            "newProjectStatus": "onHold"
        }))
        .unwrap();
        assert_eq!(params.item_type, ItemType::Project);
        assert_eq!(params.new_project_status, Some(ProjectStatusChange::OnHold));

        let params: EditItemParams = serde_json::from_value(json!({
            "name": "Call mom",
            "itemType": "task",
            "newStatus": "completed"
        }))
        .unwrap();
        assert_eq!(params.new_status, Some(TaskStatusChange::Completed));

        let out = serde_json::to_value(&params).unwrap();
        assert_eq!(out["itemType"], "task");
        assert_eq!(out["newStatus"], "completed");
    }

    #[test]
    fn test_unknown_item_type_is_rejected() {
        let err = serde_json::from_value::<RemoveItemParams>(json!({
            "id": "abc",
            "itemType": "folder"
        }));
        assert!(err.is_err());
    }

    #[test]
    fn test_identifier_required() {
        let params: RemoveItemParams =
            serde_json::from_value(json!({ "itemType": "task", "name": "" })).unwrap();
        assert!(!params.has_identifier());

        let params: RemoveItemParams =
            serde_json::from_value(json!({ "itemType": "task", "id": "x1" })).unwrap();
        assert!(params.has_identifier());
    }

    #[test]
    fn test_normalized_dates() {
        let params = AddTaskParams {
            name: "File taxes".into(),
            due_date: Some("2025-04-15".into()),
            ..Default::default()
        };
        let normalized = params.normalized().unwrap();
        let due = normalized.due_date.unwrap();
        assert!(due.starts_with("2025-04-15T00:00:00"), "{due}");

        let bad = AddProjectParams {
            name: "Move".into(),
            defer_date: Some("soon".into()),
            ..Default::default()
        };
        assert_eq!(bad.normalized().unwrap_err(), DateError("soon".into()));
    }

    #[test]
    fn test_empty_edit_date_clears() {
        let params: EditItemParams = serde_json::from_value(json!({
            "id": "abc",
            "itemType": "task",
            "newDueDate": "",
            "newDeferDate": "2025-01-02 09:30"
        }))
        .unwrap();
        let normalized = params.normalized().unwrap();
        assert_eq!(normalized.new_due_date.as_deref(), Some(""));
        assert!(normalized
            .new_defer_date
            .unwrap()
            .starts_with("2025-01-02T09:30:00"));
    }
}
