//! OmniFocus automation through `osascript`
//!
//! Every operation is one JXA program that asks OmniFocus to evaluate an
//! Omni Automation script and prints a single JSON reply.

mod error;
mod executor;
mod script;

#[cfg(test)]
pub(crate) use executor::testing;

pub use error::{BridgeError, BridgeResult};
pub use executor::{run_json, Osascript, ScriptRunner};
pub use script::Script;

use serde::{Deserialize, Serialize};
use tracing::{debug, info, instrument};

use crate::snapshot::{Database, RawDump};

/// Script-backed write operations
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Action {
    AddTask,
    AddProject,
    EditItem,
    RemoveItem,
}

impl Action {
    pub fn name(self) -> &'static str {
        match self {
            Action::AddTask => "add_task",
            Action::AddProject => "add_project",
            Action::EditItem => "edit_item",
            Action::RemoveItem => "remove_item",
        }
    }

    fn function(self) -> &'static str {
        match self {
            Action::AddTask => script::ADD_TASK,
            Action::AddProject => script::ADD_PROJECT,
            Action::EditItem => script::EDIT_ITEM,
            Action::RemoveItem => script::REMOVE_ITEM,
        }
    }

    pub fn script<A: Serialize + ?Sized>(self, args: &A) -> BridgeResult<Script> {
        Script::omnijs(self.name(), self.function(), args)
    }
}

/// Reply printed by the write scripts
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct ActionReply {
    pub success: bool,
    pub id: Option<String>,
    pub name: Option<String>,
    /// Where a new task landed: `inbox`, `project` or `parent`
    pub location: Option<String>,
    /// Requested tags that do not exist and were not applied
    pub skipped_tags: Vec<String>,
    pub changed_properties: Vec<String>,
    pub not_found: bool,
    pub error: Option<String>,
}

impl ActionReply {
    fn into_result(self) -> BridgeResult<Self> {
        if self.success {
            Ok(self)
        } else if self.not_found {
            Err(BridgeError::ItemNotFound)
        } else {
            Err(BridgeError::Host(
                self.error
                    .unwrap_or_else(|| "OmniFocus reported a failure".to_string()),
            ))
        }
    }
}

#[derive(Debug, Default, Deserialize)]
#[serde(default)]
struct DumpReply {
    success: bool,
    error: Option<String>,
    database: Option<RawDump>,
}

/// Run a write script; a reply with `success: false` becomes an error
#[instrument(skip(runner, args), fields(action = action.name()))]
pub async fn run_action<A: Serialize + ?Sized>(
    runner: &dyn ScriptRunner,
    action: Action,
    args: &A,
) -> BridgeResult<ActionReply> {
    let script = action.script(args)?;
    let reply: ActionReply = run_json(runner, &script).await?;
    debug!(success = reply.success, id = ?reply.id, "action finished");
    reply.into_result()
}

/// Read the whole database, completed and dropped items included
#[instrument(skip(runner))]
pub async fn fetch_database(runner: &dyn ScriptRunner) -> BridgeResult<Database> {
    let script = Script::omnijs("dump_database", script::DUMP_DATABASE, &serde_json::json!({}))?;
    let reply: DumpReply = run_json(runner, &script).await?;

    if !reply.success {
        return Err(BridgeError::Host(
            reply
                .error
                .unwrap_or_else(|| "database export failed".to_string()),
        ));
    }

    let db = Database::from(reply.database.unwrap_or_default());
    info!(
        tasks = db.tasks.len(),
        projects = db.projects.len(),
        folders = db.folders.len(),
        "database exported"
    );
    Ok(db)
}
