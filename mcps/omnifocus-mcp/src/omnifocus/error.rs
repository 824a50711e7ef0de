//! Error types for OmniFocus automation

use thiserror::Error;

/// Errors that can occur when running a script against OmniFocus
#[derive(Error, Debug)]
pub enum BridgeError {
    /// The script interpreter is not installed or not in PATH
    #[error("osascript not found - OmniFocus automation requires macOS")]
    NotFound,

    /// Failed to spawn or talk to the interpreter process
    #[error("failed to spawn osascript process: {0}")]
    Spawn(#[from] std::io::Error),

    /// The interpreter exited with a non-zero code
    #[error("osascript failed (exit code {code}): {stderr}")]
    CommandFailed {
        /// Exit code from the interpreter, -1 when killed by a signal
        code: i32,
        /// Standard error output
        stderr: String,
    },

    /// The script did not finish in time; the process was killed
    #[error("script timed out after {0} seconds")]
    Timeout(u64),

    /// The script printed something that is not the expected JSON
    #[error("failed to parse script output: {0}")]
    Parse(#[from] serde_json::Error),

    /// The task or project addressed by id/name does not exist
    #[error("Item not found")]
    ItemNotFound,

    /// The script ran but OmniFocus reported a failure
    #[error("{0}")]
    Host(String),
}

/// Result type alias for OmniFocus operations
pub type BridgeResult<T> = Result<T, BridgeError>;

impl BridgeError {
    /// Whether the failure means OmniFocus could not be reached at all
    pub fn is_unavailable(&self) -> bool {
        matches!(
            self,
            BridgeError::NotFound
                | BridgeError::Spawn(_)
                | BridgeError::CommandFailed { .. }
                | BridgeError::Timeout(_)
        )
    }
}
