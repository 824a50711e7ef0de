//! Compact folder → project → task report

use std::collections::{BTreeMap, HashMap, HashSet};
use std::fmt::Write as _;

use chrono::{Local, NaiveDate};

use super::prefix::compute_minimum_unique_prefixes;
use super::ReportOptions;
use crate::dates::{format_compact_date, parse_timestamp};
use crate::snapshot::{Database, Folder, Project, ProjectStatus, Task};

const INDENT: &str = "   ";
const FLAG: &str = "🚩";

const LEGEND: &str = "FORMAT LEGEND:
F: Folder | P: Project | •: Task | 🚩: Flagged
Dates: [M/D] | Duration: (30m) or (2h) | Tags: <tag1,tag2>
Status: #next #avail #block #due #over #compl #drop
";

/// Render the report dated by the snapshot's export time, or today when the
/// snapshot carries none. Both are local dates.
pub fn format_compact_report(db: &Database, options: &ReportOptions) -> String {
    let date = db
        .export_date
        .as_deref()
        .and_then(parse_timestamp)
        .map(|exported| exported.date_naive())
        .unwrap_or_else(|| Local::now().date_naive());
    render_report(db, options, date)
}

/// Render the report with an explicit header date
pub fn render_report(db: &Database, options: &ReportOptions, today: NaiveDate) -> String {
    let mut out = format!("# OMNIFOCUS [{}]\n\n{}\n", today.format("%Y-%m-%d"), LEGEND);
    Renderer::new(db, options).render(&mut out);
    out
}

/// `(45m)` below an hour, whole hours otherwise. Zero prints nothing.
pub fn format_duration(minutes: u32) -> Option<String> {
    match minutes {
        0 => None,
        m if m < 60 => Some(format!("({}m)", m)),
        m => Some(format!("({}h)", m / 60)),
    }
}

struct Renderer<'a> {
    db: &'a Database,
    hide_completed: bool,
    tag_prefixes: BTreeMap<String, String>,
    tasks_by_id: HashMap<&'a str, &'a Task>,
    top_level_tasks: HashMap<&'a str, Vec<&'a Task>>,
    /// Ids on the current descent path, to cut cycles in declared child lists
    visiting: HashSet<&'a str>,
}

impl<'a> Renderer<'a> {
    fn new(db: &'a Database, options: &ReportOptions) -> Self {
        // hide_recurring_duplicates has nothing to act on: the snapshot
        // carries no recurrence-instance identity.
        let tasks_by_id = db.task_index();

        // A parent id missing from the snapshot counts as no parent
        let mut top_level_tasks: HashMap<&str, Vec<&Task>> = HashMap::new();
        for task in &db.tasks {
            let has_parent = task
                .parent_task_id
                .as_deref()
                .is_some_and(|parent| tasks_by_id.contains_key(parent));
            if has_parent {
                continue;
            }
            if let Some(project_id) = task.project_id.as_deref() {
                top_level_tasks.entry(project_id).or_default().push(task);
            }
        }

        Self {
            db,
            hide_completed: options.hide_completed,
            tag_prefixes: compute_minimum_unique_prefixes(db.all_tag_names()),
            tasks_by_id,
            top_level_tasks,
            visiting: HashSet::new(),
        }
    }

    fn render(&mut self, out: &mut String) {
        let db = self.db;

        let is_root = |folder: &Folder| match folder.parent_folder_id.as_deref() {
            None => true,
            Some(parent) => !db.folders.contains_key(parent),
        };
        for folder in db.folders.values().filter(|f| is_root(f)) {
            self.render_folder(folder, 0, out);
        }

        let is_rootless = |project: &Project| match project.folder_id.as_deref() {
            None => true,
            Some(folder) => !db.folders.contains_key(folder),
        };
        for project in db.projects.values().filter(|p| is_rootless(p)) {
            self.render_project(project, 0, out);
        }
    }

    fn render_folder(&mut self, folder: &'a Folder, level: usize, out: &mut String) {
        if !self.visiting.insert(folder.id.as_str()) {
            return;
        }

        let _ = writeln!(out, "{}F: {}", INDENT.repeat(level), folder.name);

        let db = self.db;
        for subfolder in folder.subfolder_ids.iter().filter_map(|id| db.folders.get(id)) {
            self.render_folder(subfolder, level + 1, out);
        }
        for project in folder.project_ids.iter().filter_map(|id| db.projects.get(id)) {
            self.render_project(project, level + 1, out);
        }

        self.visiting.remove(folder.id.as_str());
    }

    fn render_project(&mut self, project: &'a Project, level: usize, out: &mut String) {
        if self.hide_completed && project.status.is_closed() {
            return;
        }

        let mut line = format!("{}P: {}", INDENT.repeat(level), project.name);
        if project.flagged {
            line.push(' ');
            line.push_str(FLAG);
        }
        match project.status {
            ProjectStatus::OnHold => line.push_str(" [OnHold]"),
            ProjectStatus::Dropped => line.push_str(" [Dropped]"),
            _ => {}
        }
        if let Some(due) = project.due_date.as_deref().and_then(format_compact_date) {
            let _ = write!(line, " [DUE:{}]", due);
        }
        out.push_str(&line);
        out.push('\n');

        let tasks = self
            .top_level_tasks
            .get(project.id.as_str())
            .cloned()
            .unwrap_or_default();
        for task in tasks {
            self.render_task(task, level + 1, out);
        }
    }

    fn render_task(&mut self, task: &'a Task, level: usize, out: &mut String) {
        if self.hide_completed && task.status.is_closed() {
            return;
        }
        if !self.visiting.insert(task.id.as_str()) {
            return;
        }

        out.push_str(&self.task_line(task, level));
        out.push('\n');

        for child_id in &task.child_ids {
            if let Some(child) = self.tasks_by_id.get(child_id.as_str()).copied() {
                self.render_task(child, level + 1, out);
            }
        }

        self.visiting.remove(task.id.as_str());
    }

    fn task_line(&self, task: &Task, level: usize) -> String {
        let mut line = format!("{}• ", INDENT.repeat(level));
        if task.flagged {
            line.push_str(FLAG);
            line.push(' ');
        }
        line.push_str(&task.name);

        if let Some(due) = task.due_date.as_deref().and_then(format_compact_date) {
            let _ = write!(line, " [DUE:{}]", due);
        }
        if let Some(defer) = task.defer_date.as_deref().and_then(format_compact_date) {
            let _ = write!(line, " [defer:{}]", defer);
        }
        if let Some(duration) = task.estimated_minutes.and_then(format_duration) {
            let _ = write!(line, " {}", duration);
        }
        if !task.tag_names.is_empty() {
            let tags: Vec<&str> = task
                .tag_names
                .iter()
                .map(|tag| {
                    self.tag_prefixes
                        .get(tag)
                        .map(String::as_str)
                        .unwrap_or(tag.as_str())
                })
                .collect();
            let _ = write!(line, " <{}>", tags.join(","));
        }
        if let Some(status) = task.status.report_tag() {
            let _ = write!(line, " #{}", status);
        }

        line
    }
}
