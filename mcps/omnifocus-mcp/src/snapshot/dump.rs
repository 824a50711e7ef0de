//! Wire format of the database export script
//!
//! Every field is optional on the wire. Conversion into [`Database`] fills
//! defaults, drops empty ids and resolves task tag ids to tag names.

use indexmap::IndexMap;
use serde::Deserialize;

use super::{
    Database, Folder, FolderStatus, Project, ProjectStatus, Tag, Task, TaskStatus,
};

const UNKNOWN_TAG: &str = "Unknown Tag";

#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct RawDump {
    pub export_date: Option<String>,
    pub tasks: Option<Vec<RawTask>>,
    pub projects: Option<IndexMap<String, RawProject>>,
    pub folders: Option<IndexMap<String, RawFolder>>,
    pub tags: Option<IndexMap<String, RawTag>>,
}

#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct RawTask {
    pub id: Option<String>,
    pub name: Option<String>,
    pub note: Option<String>,
    pub task_status: Option<TaskStatus>,
    pub flagged: Option<bool>,
    pub due_date: Option<String>,
    pub defer_date: Option<String>,
    pub estimated_minutes: Option<f64>,
    pub completed_by_children: Option<bool>,
    pub sequential: Option<bool>,
    /// Tag ids
    pub tags: Option<Vec<String>>,
    #[serde(rename = "projectID")]
    pub project_id: Option<String>,
    #[serde(rename = "parentTaskID")]
    pub parent_task_id: Option<String>,
    pub children: Option<Vec<String>>,
    pub in_inbox: Option<bool>,
}

#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct RawProject {
    pub id: Option<String>,
    pub name: Option<String>,
    pub note: Option<String>,
    pub status: Option<ProjectStatus>,
    #[serde(rename = "folderID")]
    pub folder_id: Option<String>,
    pub due_date: Option<String>,
    pub defer_date: Option<String>,
    pub flagged: Option<bool>,
    pub sequential: Option<bool>,
    pub tasks: Option<Vec<String>>,
}

#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct RawFolder {
    pub id: Option<String>,
    pub name: Option<String>,
    pub status: Option<FolderStatus>,
    #[serde(rename = "parentFolderID")]
    pub parent_folder_id: Option<String>,
    pub projects: Option<Vec<String>>,
    pub subfolders: Option<Vec<String>>,
}

#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct RawTag {
    pub id: Option<String>,
    pub name: Option<String>,
    #[serde(rename = "parentTagID")]
    pub parent_tag_id: Option<String>,
    pub active: Option<bool>,
}

fn non_empty(value: Option<String>) -> Option<String> {
    value.filter(|v| !v.is_empty())
}

impl From<RawDump> for Database {
    fn from(raw: RawDump) -> Self {
        let tags: IndexMap<String, Tag> = raw
            .tags
            .unwrap_or_default()
            .into_iter()
            .map(|(key, tag)| {
                let id = non_empty(tag.id).unwrap_or_else(|| key.clone());
                let tag = Tag {
                    id,
                    name: tag.name.unwrap_or_default(),
                    parent_tag_id: non_empty(tag.parent_tag_id),
                    active: tag.active.unwrap_or(false),
                };
                (key, tag)
            })
            .collect();

        let tasks = raw
            .tasks
            .unwrap_or_default()
            .into_iter()
            .map(|task| {
                let tag_names = task
                    .tags
                    .unwrap_or_default()
                    .iter()
                    .map(|tag_id| {
                        tags.get(tag_id)
                            .map(|t| t.name.clone())
                            .unwrap_or_else(|| UNKNOWN_TAG.to_string())
                    })
                    .collect();

                Task {
                    id: task.id.unwrap_or_default(),
                    name: task.name.unwrap_or_default(),
                    note: task.note.unwrap_or_default(),
                    status: task.task_status.unwrap_or_default(),
                    flagged: task.flagged.unwrap_or(false),
                    due_date: non_empty(task.due_date),
                    defer_date: non_empty(task.defer_date),
                    estimated_minutes: task
                        .estimated_minutes
                        .filter(|m| m.is_finite() && *m >= 0.0)
                        .map(|m| m as u32),
                    tag_names,
                    project_id: non_empty(task.project_id),
                    parent_task_id: non_empty(task.parent_task_id),
                    child_ids: task.children.unwrap_or_default(),
                    sequential: task.sequential.unwrap_or(false),
                    completed_by_children: task.completed_by_children.unwrap_or(false),
                    in_inbox: task.in_inbox.unwrap_or(false),
                }
            })
            .collect();

        let projects = raw
            .projects
            .unwrap_or_default()
            .into_iter()
            .map(|(key, project)| {
                let project = Project {
                    id: non_empty(project.id).unwrap_or_else(|| key.clone()),
                    name: project.name.unwrap_or_default(),
                    note: project.note.unwrap_or_default(),
                    status: project.status.unwrap_or_default(),
                    folder_id: non_empty(project.folder_id),
                    due_date: non_empty(project.due_date),
                    defer_date: non_empty(project.defer_date),
                    flagged: project.flagged.unwrap_or(false),
                    sequential: project.sequential.unwrap_or(false),
                    task_ids: project.tasks.unwrap_or_default(),
                };
                (key, project)
            })
            .collect();

        let folders = raw
            .folders
            .unwrap_or_default()
            .into_iter()
            .map(|(key, folder)| {
                let folder = Folder {
                    id: non_empty(folder.id).unwrap_or_else(|| key.clone()),
                    name: folder.name.unwrap_or_default(),
                    status: folder.status.unwrap_or_default(),
                    parent_folder_id: non_empty(folder.parent_folder_id),
                    project_ids: folder.projects.unwrap_or_default(),
                    subfolder_ids: folder.subfolders.unwrap_or_default(),
                };
                (key, folder)
            })
            .collect();

        Database {
            export_date: non_empty(raw.export_date),
            tasks,
            projects,
            folders,
            tags,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    const EXPORT: &str = r#"{
        "exportDate": "2024-03-01T09:00:00.000Z",
        "tasks": [
            {
                "id": "t1",
                "name": "Write report",
                "note": null,
                "taskStatus": "Next",
                "flagged": true,
                "dueDate": "2024-03-05T17:00:00.000Z",
                "deferDate": null,
                "estimatedMinutes": 45,
                "tags": ["g1", "gone"],
                "projectID": "p1",
                "parentTaskID": null,
                "children": ["t2"],
                "inInbox": false
            },
            { "id": "t2", "name": "Outline", "taskStatus": "Available", "projectID": "p1", "parentTaskID": "t1" }
        ],
        "projects": {
            "p1": { "id": "p1", "name": "Quarterly", "status": "Active", "folderID": "f1", "tasks": ["t1", "t2"] }
        },
        "folders": {
            "f1": { "id": "f1", "name": "Work", "parentFolderID": "", "status": "Active", "projects": ["p1"], "subfolders": [] }
        },
        "tags": {
            "g1": { "id": "g1", "name": "office", "parentTagID": null, "active": true }
        }
    }"#;

    #[test]
    fn test_convert_export() {
        let raw: RawDump = serde_json::from_str(EXPORT).unwrap();
        let db = Database::from(raw);

        assert_eq!(db.export_date.as_deref(), Some("2024-03-01T09:00:00.000Z"));
        assert_eq!(db.tasks.len(), 2);

        let task = &db.tasks[0];
        assert_eq!(task.note, "");
        assert_eq!(task.status, TaskStatus::Next);
        assert_eq!(task.estimated_minutes, Some(45));
        assert_eq!(task.tag_names, vec!["office", "Unknown Tag"]);
        assert_eq!(task.child_ids, vec!["t2"]);
        assert_eq!(task.parent_task_id, None);

        assert_eq!(db.tasks[1].parent_task_id.as_deref(), Some("t1"));
        assert_eq!(db.folders["f1"].parent_folder_id, None);
        assert_eq!(db.projects["p1"].folder_id.as_deref(), Some("f1"));
    }

    #[test]
    fn test_empty_export() {
        let raw: RawDump = serde_json::from_str("{}").unwrap();
        let db = Database::from(raw);
        assert!(db.is_empty());
    }

    #[test]
    fn test_keys_stand_in_for_missing_ids() {
        let raw: RawDump =
            serde_json::from_str(r#"{"projects": {"p9": {"name": "Loose"}}}"#).unwrap();
        let db = Database::from(raw);
        assert_eq!(db.projects["p9"].id, "p9");
        assert_eq!(db.projects["p9"].status, ProjectStatus::Unknown);
    }

    #[test]
    fn test_negative_estimate_dropped() {
        let raw: RawDump =
            serde_json::from_str(r#"{"tasks": [{"id": "x", "estimatedMinutes": -5}]}"#).unwrap();
        let db = Database::from(raw);
        assert_eq!(db.tasks[0].estimated_minutes, None);
    }
}
