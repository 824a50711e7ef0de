//! Batch tool parameters

use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

use super::{AddProjectParams, AddTaskParams, ItemType, RemoveItemParams};

/// One task or project to create in a batch
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "camelCase")]
pub struct BatchAddItem {
    #[serde(rename = "type")]
    #[schemars(description = "Type of item to add ('task' or 'project')")]
    pub item_type: ItemType,

    #[schemars(description = "The name of the item")]
    pub name: String,

    #[schemars(description = "Additional notes for the item")]
    pub note: Option<String>,

    #[schemars(description = "The due date in ISO format (YYYY-MM-DD or full ISO date)")]
    pub due_date: Option<String>,

    #[schemars(description = "The defer date in ISO format (YYYY-MM-DD or full ISO date)")]
    pub defer_date: Option<String>,

    #[schemars(description = "Whether the item is flagged or not")]
    pub flagged: Option<bool>,

    #[schemars(description = "Estimated time to complete the item, in minutes")]
    pub estimated_minutes: Option<u32>,

    #[schemars(description = "Tags to assign to the item")]
    pub tags: Option<Vec<String>>,

    #[schemars(description = "For tasks: The name of the project to add the task to")]
    pub project_name: Option<String>,

    #[schemars(description = "For tasks: The ID of the parent task to nest this task under")]
    pub parent_task_id: Option<String>,

    #[schemars(description = "For tasks: The name of the parent task to nest this task under")]
    pub parent_task_name: Option<String>,

    #[schemars(description = "For projects: The name of the folder to add the project to")]
    pub folder_name: Option<String>,

    #[schemars(description = "For projects: Whether tasks in the project should be sequential")]
    pub sequential: Option<bool>,
}

impl BatchAddItem {
    pub fn to_task(&self) -> AddTaskParams {
        AddTaskParams {
            name: self.name.clone(),
            note: self.note.clone(),
            due_date: self.due_date.clone(),
            defer_date: self.defer_date.clone(),
            flagged: self.flagged,
            estimated_minutes: self.estimated_minutes,
            tags: self.tags.clone(),
            project_name: self.project_name.clone(),
            parent_task_id: self.parent_task_id.clone(),
            parent_task_name: self.parent_task_name.clone(),
        }
    }

    pub fn to_project(&self) -> AddProjectParams {
        AddProjectParams {
            name: self.name.clone(),
            note: self.note.clone(),
            due_date: self.due_date.clone(),
            defer_date: self.defer_date.clone(),
            flagged: self.flagged,
            estimated_minutes: self.estimated_minutes,
            tags: self.tags.clone(),
            folder_name: self.folder_name.clone(),
            sequential: self.sequential,
        }
    }
}

/// Parameters for adding several items at once
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema)]
pub struct BatchAddItemsParams {
    #[schemars(description = "Array of items (tasks or projects) to add")]
    pub items: Vec<BatchAddItem>,
}

/// Parameters for removing several items at once
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema)]
pub struct BatchRemoveItemsParams {
    #[schemars(description = "Array of items (tasks or projects) to remove")]
    pub items: Vec<RemoveItemParams>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_batch_item_uses_type_key() {
        let params: BatchAddItemsParams = serde_json::from_value(json!({
            "items": [
                { "type": "project", "name": "Garden", "folderName": "Home", "sequential": true },
                { "type": "task", "name": "Buy seeds", "projectName": "Garden", "tags": ["errands"] }
            ]
        }))
        .unwrap();

        let project = params.items[0].to_project();
        assert_eq!(params.items[0].item_type, ItemType::Project);
        assert_eq!(project.folder_name.as_deref(), Some("Home"));
        assert_eq!(project.sequential, Some(true));

        let task = params.items[1].to_task();
        assert_eq!(task.project_name.as_deref(), Some("Garden"));
        assert_eq!(task.tags, Some(vec!["errands".to_string()]));
    }

    #[test]
    fn test_batch_remove_items() {
        let params: BatchRemoveItemsParams = serde_json::from_value(json!({
            "items": [{ "id": "a", "itemType": "task" }, { "name": "Old", "itemType": "project" }]
        }))
        .unwrap();
        assert_eq!(params.items.len(), 2);
        assert_eq!(params.items[1].item_type, ItemType::Project);
    }
}
