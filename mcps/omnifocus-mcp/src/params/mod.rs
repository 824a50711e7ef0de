//! Parameter types for OmniFocus MCP tools
//!
//! Argument names are camelCase on the wire (`taskId`, `dueDate`, ...).
//! The same structs, with dates normalised, are handed to the scripts.

mod batch;
mod item;
mod report;

pub use batch::*;
pub use item::*;
pub use report::*;
