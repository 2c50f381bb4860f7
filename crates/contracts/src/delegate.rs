//! Delegate trait - external delivery-tool interface
//!
//! Some channels hand delivery to an independently versioned sibling tool.
//! The subprocess contract (binary present, exit code zero) is modeled as an
//! explicit collaborator so fallback-chain logic is testable with a fake.

use thiserror::Error;

/// External tool invocation failures.
#[derive(Debug, Error)]
pub enum DelegateError {
    /// The tool binary is not installed under the tools directory.
    #[error("tool '{tool}' not installed")]
    ToolMissing { tool: String },

    /// The tool ran but reported failure.
    #[error("tool '{tool}' exited with {code:?}: {stderr}")]
    NonZeroExit {
        tool: String,
        code: Option<i32>,
        stderr: String,
    },

    /// The tool did not complete within the bounded timeout.
    #[error("tool '{tool}' timed out after {seconds}s")]
    Timeout { tool: String, seconds: u64 },

    /// The tool could not be started at all.
    #[error("failed to spawn tool '{tool}': {source}")]
    Spawn {
        tool: String,
        #[source]
        source: std::io::Error,
    },
}

/// External delivery-tool invoker.
///
/// Production resolves and runs subprocesses; tests substitute a fake.
#[trait_variant::make(Delegate: Send)]
pub trait LocalDelegate {
    /// Invoke `tool` with the given arguments, succeeding only on a clean
    /// zero exit.
    async fn invoke(&self, tool: &str, args: &[String]) -> Result<(), DelegateError>;
}
