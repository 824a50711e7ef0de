//! Single-task lookup and detail view

use std::fmt::Write as _;

use thiserror::Error;

use crate::dates::format_long_date;
use crate::snapshot::{Database, Task};

const MAX_SUGGESTIONS: usize = 5;

#[derive(Debug, Error, PartialEq, Eq)]
pub enum TaskLookupError {
    #[error("Either taskId or taskName must be provided")]
    MissingIdentifier,

    #[error("Task not found with ID: {0}")]
    IdNotFound(String),

    #[error("No task found matching name: \"{0}\"")]
    NameNotFound(String),

    #[error("Multiple tasks found matching \"{query}\". Please be more specific or use task ID. Found: {candidates}")]
    Ambiguous { query: String, candidates: String },
}

/// Find a task by exact id, or else by case-insensitive name fragment.
///
/// When a fragment matches several tasks, a task whose whole name matches
/// wins; otherwise the error lists a few candidates.
pub fn find_task<'a>(
    db: &'a Database,
    id: Option<&str>,
    name: Option<&str>,
) -> Result<&'a Task, TaskLookupError> {
    let id = id.filter(|s| !s.is_empty());
    let name = name.filter(|s| !s.is_empty());

    if let Some(id) = id {
        return db
            .task(id)
            .ok_or_else(|| TaskLookupError::IdNotFound(id.to_string()));
    }

    let Some(query) = name else {
        return Err(TaskLookupError::MissingIdentifier);
    };

    let needle = query.to_lowercase();
    let matches: Vec<&Task> = db
        .tasks
        .iter()
        .filter(|t| t.name.to_lowercase().contains(&needle))
        .collect();

    match matches.as_slice() {
        [] => Err(TaskLookupError::NameNotFound(query.to_string())),
        [only] => Ok(*only),
        many => {
            if let Some(exact) = many.iter().find(|t| t.name.to_lowercase() == needle) {
                return Ok(*exact);
            }

            let mut candidates = many
                .iter()
                .take(MAX_SUGGESTIONS)
                .map(|t| format!("\"{}\" [{}]", t.name, t.id))
                .collect::<Vec<_>>()
                .join(", ");
            if many.len() > MAX_SUGGESTIONS {
                let _ = write!(candidates, " and {} more", many.len() - MAX_SUGGESTIONS);
            }

            Err(TaskLookupError::Ambiguous {
                query: query.to_string(),
                candidates,
            })
        }
    }
}

fn yes_no(value: bool) -> &'static str {
    if value {
        "Yes"
    } else {
        "No"
    }
}

fn format_estimate(minutes: u32) -> String {
    let (hours, minutes) = (minutes / 60, minutes % 60);
    match (hours, minutes) {
        (0, m) => format!("{}m", m),
        (h, 0) => format!("{}h", h),
        (h, m) => format!("{}h {}m", h, m),
    }
}

/// Markdown description of one task, with names of related items
pub fn format_task_details(db: &Database, task: &Task) -> String {
    let mut out = String::from("📋 **Task Details**\n\n");

    let _ = writeln!(out, "**Name:** {}", task.name);
    let _ = writeln!(out, "**ID:** {}", task.id);
    let _ = writeln!(out, "**Status:** {}", task.status.as_str());

    if task.flagged {
        out.push_str("**Flagged:** 🚩 Yes\n");
    }
    if task.sequential {
        out.push_str("**Sequential:** Yes\n");
    }
    if task.completed_by_children {
        out.push_str("**Completed by children:** Yes\n");
    }

    if let Some(due) = task.due_date.as_deref().and_then(format_long_date) {
        let _ = writeln!(out, "**Due Date:** {}", due);
    }
    if let Some(defer) = task.defer_date.as_deref().and_then(format_long_date) {
        let _ = writeln!(out, "**Defer Date:** {}", defer);
    }
    if let Some(minutes) = task.estimated_minutes.filter(|m| *m > 0) {
        let _ = writeln!(out, "**Estimated Time:** {}", format_estimate(minutes));
    }

    let project = task
        .project_id
        .as_deref()
        .and_then(|id| db.projects.get(id));
    if let Some(project) = project {
        let _ = write!(out, "**Project:** {}", project.name);
        if !project.task_ids.is_empty() {
            let _ = write!(out, " ({} tasks)", project.task_ids.len());
        }
        out.push('\n');
    }

    if let Some(parent_id) = task.parent_task_id.as_deref() {
        if let Some(parent) = db.task(parent_id) {
            let _ = writeln!(out, "**Parent Task:** {} [{}]", parent.name, parent.id);
        }
    }

    let children: Vec<&Task> = task.child_ids.iter().filter_map(|id| db.task(id)).collect();
    if !children.is_empty() {
        let _ = writeln!(out, "**Subtasks:** {} tasks", children.len());
        for child in &children {
            let _ = writeln!(out, "  - {} [{}]", child.name, child.id);
        }
    }

    if !task.tag_names.is_empty() {
        let _ = writeln!(out, "**Tags:** {}", task.tag_names.join(", "));
    }

    if !task.note.is_empty() {
        let _ = writeln!(out, "\n**Note:**\n{}", task.note);
    }

    out.push_str("\n**Metadata:**\n");
    let _ = writeln!(out, "- Has Children: {}", yes_no(!task.child_ids.is_empty()));
    let _ = writeln!(out, "- Active: {}", yes_no(!task.status.is_closed()));
    let _ = writeln!(out, "- In Inbox: {}", yes_no(task.in_inbox));

    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::snapshot::{Project, TaskStatus};

    fn db_with(names: &[(&str, &str)]) -> Database {
        let mut db = Database::default();
        for (id, name) in names {
            db.tasks.push(Task {
                id: id.to_string(),
                name: name.to_string(),
                ..Default::default()
            });
        }
        db
    }

    #[test]
    fn test_find_by_id() {
        let db = db_with(&[("a1", "Email Sam"), ("b2", "Email Jo")]);
        assert_eq!(find_task(&db, Some("b2"), None).unwrap().name, "Email Jo");
        assert_eq!(
            find_task(&db, Some("zz"), Some("Email Sam")),
            Err(TaskLookupError::IdNotFound("zz".into()))
        );
    }

    #[test]
    fn test_find_requires_identifier() {
        let db = db_with(&[]);
        assert_eq!(
            find_task(&db, None, Some("")),
            Err(TaskLookupError::MissingIdentifier)
        );
    }

    #[test]
    fn test_find_by_partial_name() {
        let db = db_with(&[("a1", "Renew passport"), ("b2", "Book flights")]);
        assert_eq!(find_task(&db, None, Some("PASSPORT")).unwrap().id, "a1");
        assert_eq!(
            find_task(&db, None, Some("visa")),
            Err(TaskLookupError::NameNotFound("visa".into()))
        );
    }

    #[test]
    fn test_exact_name_breaks_tie() {
        let db = db_with(&[("a1", "Call mom back"), ("b2", "call mom")]);
        assert_eq!(find_task(&db, None, Some("Call Mom")).unwrap().id, "b2");
    }

    #[test]
    fn test_ambiguous_name_lists_candidates() {
        let names: Vec<(String, String)> = (0..7)
            .map(|i| (format!("id{i}"), format!("Review PR {i}")))
            .collect();
        let refs: Vec<(&str, &str)> = names
            .iter()
            .map(|(a, b)| (a.as_str(), b.as_str()))
            .collect();
        let db = db_with(&refs);

        let err = find_task(&db, None, Some("review")).unwrap_err();
        let message = err.to_string();
        assert!(message.starts_with("Multiple tasks found matching \"review\""));
        assert!(message.contains("\"Review PR 0\" [id0]"));
        assert!(message.contains("\"Review PR 4\" [id4]"));
        assert!(!message.contains("[id5]"));
        assert!(message.ends_with(" and 2 more"));
    }

    #[test]
    fn test_estimate_format() {
        assert_eq!(format_estimate(30), "30m");
        assert_eq!(format_estimate(120), "2h");
        assert_eq!(format_estimate(95), "1h 35m");
    }

    #[test]
    fn test_details_include_relationships() {
        let mut db = Database::default();
        db.projects.insert(
            "p1".into(),
            Project {
                id: "p1".into(),
                name: "Trip".into(),
                ..Default::default()
            },
        );
        db.tasks.push(Task {
            id: "t1".into(),
            name: "Plan trip".into(),
            status: TaskStatus::Next,
            flagged: true,
            project_id: Some("p1".into()),
            child_ids: vec!["t2".into(), "ghost".into()],
            tag_names: vec!["travel".into(), "home".into()],
            note: "Check passport expiry".into(),
            estimated_minutes: Some(90),
            ..Default::default()
        });
        db.tasks.push(Task {
            id: "t2".into(),
            name: "Book hotel".into(),
            parent_task_id: Some("t1".into()),
            ..Default::default()
        });

        let details = format_task_details(&db, &db.tasks[0]);
        assert!(details.starts_with("📋 **Task Details**\n\n**Name:** Plan trip\n**ID:** t1\n**Status:** Next\n"));
        assert!(details.contains("**Flagged:** 🚩 Yes\n"));
        assert!(details.contains("**Estimated Time:** 1h 30m\n"));
        assert!(details.contains("**Project:** Trip\n"));
        assert!(details.contains("**Subtasks:** 1 tasks\n  - Book hotel [t2]\n"));
        assert!(details.contains("**Tags:** travel, home\n"));
        assert!(details.contains("\n**Note:**\nCheck passport expiry\n"));
        assert!(details.contains("- Has Children: Yes\n- Active: Yes\n- In Inbox: No\n"));

        let child = format_task_details(&db, &db.tasks[1]);
        assert!(child.contains("**Parent Task:** Plan trip [t1]\n"));
        assert!(!child.contains("**Project:**"));

        if let Some(project) = db.projects.get_mut("p1") {
            project.task_ids = vec!["t1".into(), "t3".into()];
        }
        let counted = format_task_details(&db, &db.tasks[0]);
        assert!(counted.contains("**Project:** Trip (2 tasks)\n"));
    }
}
