//! In-memory snapshot of an OmniFocus database
//!
//! Entities live in flat containers keyed by id; every relationship
//! (folder parent, project folder, task parent, child lists) is an id that
//! is looked up when needed and may dangle.

mod dump;

use std::collections::HashMap;

use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

pub use dump::{RawDump, RawFolder, RawProject, RawTag, RawTask};

/// Value of `Task.Status` in Omni Automation
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum TaskStatus {
    Available,
    Blocked,
    Completed,
    Dropped,
    DueSoon,
    Next,
    Overdue,
    #[default]
    #[serde(other)]
    Unknown,
}

impl TaskStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            TaskStatus::Available => "Available",
            TaskStatus::Blocked => "Blocked",
            TaskStatus::Completed => "Completed",
            TaskStatus::Dropped => "Dropped",
            TaskStatus::DueSoon => "DueSoon",
            TaskStatus::Next => "Next",
            TaskStatus::Overdue => "Overdue",
            TaskStatus::Unknown => "Unknown",
        }
    }

    /// Completed or dropped
    pub fn is_closed(&self) -> bool {
        matches!(self, TaskStatus::Completed | TaskStatus::Dropped)
    }

    /// Short `#tag` used by the compact report, without the `#`
    pub fn report_tag(&self) -> Option<&'static str> {
        match self {
            TaskStatus::Next => Some("next"),
            TaskStatus::Available => Some("avail"),
            TaskStatus::Blocked => Some("block"),
            TaskStatus::DueSoon => Some("due"),
            TaskStatus::Overdue => Some("over"),
            TaskStatus::Completed => Some("compl"),
            TaskStatus::Dropped => Some("drop"),
            TaskStatus::Unknown => None,
        }
    }
}

/// Value of `Project.Status` in Omni Automation
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum ProjectStatus {
    Active,
    Done,
    Dropped,
    OnHold,
    #[default]
    #[serde(other)]
    Unknown,
}

impl ProjectStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            ProjectStatus::Active => "Active",
            ProjectStatus::Done => "Done",
            ProjectStatus::Dropped => "Dropped",
            ProjectStatus::OnHold => "OnHold",
            ProjectStatus::Unknown => "Unknown",
        }
    }

    /// Done or dropped
    pub fn is_closed(&self) -> bool {
        matches!(self, ProjectStatus::Done | ProjectStatus::Dropped)
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum FolderStatus {
    Active,
    Dropped,
    #[default]
    #[serde(other)]
    Unknown,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Folder {
    pub id: String,
    pub name: String,
    pub status: FolderStatus,
    pub parent_folder_id: Option<String>,
    pub project_ids: Vec<String>,
    pub subfolder_ids: Vec<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Project {
    pub id: String,
    pub name: String,
    pub note: String,
    pub status: ProjectStatus,
    pub folder_id: Option<String>,
    /// ISO 8601 timestamp as exported
    pub due_date: Option<String>,
    pub defer_date: Option<String>,
    pub flagged: bool,
    pub sequential: bool,
    pub task_ids: Vec<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Task {
    pub id: String,
    pub name: String,
    pub note: String,
    pub status: TaskStatus,
    pub flagged: bool,
    pub due_date: Option<String>,
    pub defer_date: Option<String>,
    pub estimated_minutes: Option<u32>,
    pub tag_names: Vec<String>,
    pub project_id: Option<String>,
    pub parent_task_id: Option<String>,
    pub child_ids: Vec<String>,
    pub sequential: bool,
    pub completed_by_children: bool,
    pub in_inbox: bool,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Tag {
    pub id: String,
    pub name: String,
    pub parent_tag_id: Option<String>,
    pub active: bool,
}

/// Point-in-time copy of the database
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Database {
    pub export_date: Option<String>,
    pub tasks: Vec<Task>,
    pub projects: IndexMap<String, Project>,
    pub folders: IndexMap<String, Folder>,
    pub tags: IndexMap<String, Tag>,
}

impl Database {
    pub fn is_empty(&self) -> bool {
        self.tasks.is_empty()
            && self.projects.is_empty()
            && self.folders.is_empty()
            && self.tags.is_empty()
    }

    /// Tasks keyed by id. The first task wins when ids repeat.
    pub fn task_index(&self) -> HashMap<&str, &Task> {
        let mut index = HashMap::with_capacity(self.tasks.len());
        for task in &self.tasks {
            index.entry(task.id.as_str()).or_insert(task);
        }
        index
    }

    pub fn task(&self, id: &str) -> Option<&Task> {
        self.tasks.iter().find(|t| t.id == id)
    }

    /// Every distinct tag name, from the tag map and from the tasks
    pub fn all_tag_names(&self) -> Vec<&str> {
        let mut names: Vec<&str> = self
            .tags
            .values()
            .map(|t| t.name.as_str())
            .chain(self.tasks.iter().flat_map(|t| t.tag_names.iter().map(String::as_str)))
            .collect();
        names.sort_unstable();
        names.dedup();
        names
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_unknown_status_deserializes() {
        let status: TaskStatus = serde_json::from_str("\"Deferred\"").unwrap();
        assert_eq!(status, TaskStatus::Unknown);
        assert_eq!(status.report_tag(), None);

        let status: ProjectStatus = serde_json::from_str("\"OnHold\"").unwrap();
        assert_eq!(status, ProjectStatus::OnHold);
    }

    #[test]
    fn test_closed_statuses() {
        assert!(TaskStatus::Completed.is_closed());
        assert!(TaskStatus::Dropped.is_closed());
        assert!(!TaskStatus::Overdue.is_closed());
        assert!(ProjectStatus::Done.is_closed());
        assert!(!ProjectStatus::OnHold.is_closed());
    }

    #[test]
    fn test_all_tag_names_merges_and_dedups() {
        let mut db = Database::default();
        db.tags.insert(
            "t1".into(),
            Tag {
                id: "t1".into(),
                name: "work".into(),
                ..Default::default()
            },
        );
        db.tasks.push(Task {
            id: "a".into(),
            tag_names: vec!["home".into(), "work".into()],
            ..Default::default()
        });

        assert_eq!(db.all_tag_names(), vec!["home", "work"]);
    }

    #[test]
    fn test_task_index_keeps_first_duplicate() {
        let mut db = Database::default();
        for name in ["first", "second"] {
            db.tasks.push(Task {
                id: "dup".into(),
                name: name.into(),
                ..Default::default()
            });
        }
        assert_eq!(db.task_index()["dup"].name, "first");
    }
}
