//! Read-only tool parameters

use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

/// Parameters for dumping the database
#[derive(Debug, Default, Clone, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "camelCase")]
pub struct DumpDatabaseParams {
    #[schemars(description = "Set to false to show completed and dropped tasks (default: true)")]
    pub hide_completed: Option<bool>,

    #[schemars(
        description = "Set to true to hide duplicate instances of recurring tasks (default: true)"
    )]
    pub hide_recurring_duplicates: Option<bool>,
}

/// Parameters for looking up one task
#[derive(Debug, Default, Clone, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "camelCase")]
pub struct GetTaskDetailsParams {
    #[schemars(description = "The ID of the task to look up")]
    pub task_id: Option<String>,

    #[schemars(
        description = "The name of the task (case-insensitive, partial match). Used when taskId is not given"
    )]
    pub task_name: Option<String>,
}
