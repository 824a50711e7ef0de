//! OmniFocus MCP Library
//!
//! MCP-compatible tools for OmniFocus, driven through `osascript`.
//!
//! # Usage as Library
//!
//! ```rust,ignore
//! use omnifocus_mcp::{Config, OmniFocusMcpServer};
//!
//! let server = OmniFocusMcpServer::new(Config::load(None)?);
//! // Use with in-memory transport or serve via stdio
//! ```
//!
//! # Features
//! - Report: the whole database as a compact folder/project/task tree
//! - Lookup: details of one task by id or name
//! - Writes: add, edit and remove tasks and projects, singly or in batches
//!
//! # Requirements
//! - macOS with OmniFocus installed
//! - Automation permission for the process running `osascript`

pub mod config;
pub mod dates;
pub mod handlers;
pub mod omnifocus;
pub mod params;
pub mod report;
pub mod server;
pub mod snapshot;

// Re-export main server type
pub use config::Config;
pub use server::OmniFocusMcpServer;

// Re-export parameter types for direct API usage
pub use params::*;
