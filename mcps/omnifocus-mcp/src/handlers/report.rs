//! Report handler implementations

use mcp_common::{invalid_params, text_error, text_success, CallToolResult, McpError};
use tracing::{error, warn};

use crate::config::ReportConfig;
use crate::omnifocus::{fetch_database, ScriptRunner};
use crate::params::{DumpDatabaseParams, GetTaskDetailsParams};
use crate::report::{find_task, format_compact_report, format_task_details, ReportOptions};

const DUMP_FAILED: &str =
    "Error generating report. Please ensure OmniFocus is running and try again.";

/// Export the database and render it as the compact report
pub async fn dump_database(
    runner: &dyn ScriptRunner,
    defaults: &ReportConfig,
    params: DumpDatabaseParams,
) -> Result<CallToolResult, McpError> {
    let options = ReportOptions {
        hide_completed: params.hide_completed.unwrap_or(defaults.hide_completed),
        hide_recurring_duplicates: params.hide_recurring_duplicates.unwrap_or(true),
    };

    match fetch_database(runner).await {
        Ok(db) => Ok(text_success(format_compact_report(&db, &options))),
        Err(e) if e.is_unavailable() => {
            warn!(error = %e, "OmniFocus unavailable");
            Ok(text_error(DUMP_FAILED))
        }
        Err(e) => {
            error!(error = %e, "database export failed");
            Ok(text_error(DUMP_FAILED))
        }
    }
}

/// Look up one task by id or name and describe it
pub async fn get_task_details(
    runner: &dyn ScriptRunner,
    params: GetTaskDetailsParams,
) -> Result<CallToolResult, McpError> {
    let id = params.task_id.as_deref().filter(|s| !s.is_empty());
    let name = params.task_name.as_deref().filter(|s| !s.is_empty());
    if id.is_none() && name.is_none() {
        return Err(invalid_params("Either taskId or taskName must be provided"));
    }

    let db = match fetch_database(runner).await {
        Ok(db) => db,
        Err(e) => {
            warn!(error = %e, "database export failed");
            return Ok(text_error(format!("Error getting task details: {}", e)));
        }
    };

    match find_task(&db, id, name) {
        Ok(task) => Ok(text_success(format_task_details(&db, task))),
        Err(e) => Ok(text_error(format!("❌ {}", e))),
    }
}
