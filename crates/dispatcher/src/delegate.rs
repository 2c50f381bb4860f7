//! CommandDelegate - subprocess-backed tool invocation

use std::path::PathBuf;
use std::time::Duration;

use contracts::{Delegate, DelegateError};
use tokio::process::Command;
use tracing::{debug, instrument};

const DEFAULT_TIMEOUT: Duration = Duration::from_secs(30);
const STDERR_EXCERPT_LEN: usize = 200;

/// Invokes delivery tools as subprocesses under a shared tools directory.
///
/// A tool named `mail-client` resolves to `<tools_dir>/mail-client`; an
/// absent binary is reported as [`DelegateError::ToolMissing`] so callers
/// can distinguish "not installed" from "ran and failed".
#[derive(Debug, Clone)]
pub struct CommandDelegate {
    tools_dir: PathBuf,
    timeout: Duration,
}

impl CommandDelegate {
    /// Create a delegate resolving tools under `tools_dir`.
    pub fn new(tools_dir: impl Into<PathBuf>) -> Self {
        Self {
            tools_dir: tools_dir.into(),
            timeout: DEFAULT_TIMEOUT,
        }
    }

    /// Override the per-invocation timeout.
    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    fn tool_path(&self, tool: &str) -> PathBuf {
        self.tools_dir.join(tool)
    }
}

impl Delegate for CommandDelegate {
    #[instrument(name = "delegate_invoke", skip(self, args), fields(tool = %tool))]
    async fn invoke(&self, tool: &str, args: &[String]) -> Result<(), DelegateError> {
        let path = self.tool_path(tool);
        if !path.exists() {
            return Err(DelegateError::ToolMissing {
                tool: tool.to_string(),
            });
        }

        let output = tokio::time::timeout(self.timeout, Command::new(&path).args(args).output())
            .await
            .map_err(|_| DelegateError::Timeout {
                tool: tool.to_string(),
                seconds: self.timeout.as_secs(),
            })?
            .map_err(|e| DelegateError::Spawn {
                tool: tool.to_string(),
                source: e,
            })?;

        if output.status.success() {
            debug!(tool, "tool completed");
            Ok(())
        } else {
            let stderr: String = String::from_utf8_lossy(&output.stderr)
                .chars()
                .take(STDERR_EXCERPT_LEN)
                .collect();
            Err(DelegateError::NonZeroExit {
                tool: tool.to_string(),
                code: output.status.code(),
                stderr,
            })
        }
    }
}
