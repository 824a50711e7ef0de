//! MCP Common - helpers shared by the MCP servers in this workspace
//!
//! - **Initialization**: [`init_tracing`] routes logs to stderr so stdout stays
//!   free for the protocol
//! - **Results**: builders for successful and failed `CallToolResult`s
//! - **Errors**: conversion of library errors into `McpError`
//! - **Embeddable**: [`EmbeddableMcp`] for calling tools in-process
//!
//! # Example
//!
//! ```rust,ignore
//! use mcp_common::{text_error, text_success};
//!
//! fn reply(ok: bool) -> CallToolResult {
//!     if ok {
//!         text_success("done")
//!     } else {
//!         text_error("failed")
//!     }
//! }
//! ```

pub mod embeddable;
pub mod error;
pub mod init;
pub mod result;

pub use embeddable::{EmbeddableError, EmbeddableMcp, EmbeddableResult};
pub use error::{internal_error, invalid_params, IntoMcpError, ResultExt};
pub use init::init_tracing;
pub use result::{result_text, text_error, text_success};

pub use rmcp::{
    model::{CallToolResult, Tool},
    ErrorData as McpError,
};

pub use async_trait::async_trait;
