//! Handler implementations for OmniFocus MCP tools
//!
//! Organized by domain: report (read-only), item (single writes), batch

mod batch;
mod item;
mod report;

pub use batch::*;
pub use item::*;
pub use report::*;

use crate::params::ItemType;

/// `Task not found with ID "x" or name "y".`
fn not_found_message(item_type: ItemType, id: Option<&str>, name: Option<&str>) -> String {
    let id = id.filter(|s| !s.is_empty());
    let name = name.filter(|s| !s.is_empty());

    let mut msg = format!("{} not found", item_type.label());
    if let Some(id) = id {
        msg.push_str(&format!(" with ID \"{}\"", id));
    }
    if let Some(name) = name {
        let joiner = if id.is_some() { " or" } else { " with" };
        msg.push_str(&format!("{} name \"{}\"", joiner, name));
    }
    msg.push('.');
    msg
}
