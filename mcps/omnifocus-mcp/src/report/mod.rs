//! Text renderings of a database snapshot
//!
//! - [`format_compact_report`]: the folder/project/task tree used by
//!   `dump_database`
//! - [`find_task`] and [`format_task_details`]: the single-task view used by
//!   `get_task_details`

mod details;
mod prefix;
mod render;

pub use details::{find_task, format_task_details, TaskLookupError};
pub use prefix::{compute_minimum_unique_prefixes, MIN_PREFIX_LEN};
pub use render::{format_compact_report, format_duration, render_report};

/// Filters applied while rendering the compact report
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ReportOptions {
    /// Leave out completed/dropped tasks and done/dropped projects
    pub hide_completed: bool,
    /// Accepted for compatibility. Has no effect.
    pub hide_recurring_duplicates: bool,
}

impl Default for ReportOptions {
    fn default() -> Self {
        Self {
            hide_completed: true,
            hide_recurring_duplicates: true,
        }
    }
}
