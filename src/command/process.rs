use super::{CommandExecutor, CommandLine, RawOutput};
use crate::error::CommandError;
use std::process::Stdio;
use std::time::Duration;
use tokio::process::Command;
use tracing::error;

/// Spawns each command as a child process and waits for it, killing it if
/// it runs past the configured timeout.
#[derive(Debug, Clone)]
pub struct ProcessExecutor {
    timeout: Duration,
}

impl ProcessExecutor {
    pub fn new(timeout: Duration) -> Self {
        Self { timeout }
    }

    pub fn timeout(&self) -> Duration {
        self.timeout
    }
}

impl CommandExecutor for ProcessExecutor {
    async fn execute(&self, command: &CommandLine) -> Result<RawOutput, CommandError> {
        let child = Command::new(command.program())
            .args(command.get_args())
            .stdin(Stdio::null())
            .stdout(Stdio::piped())
            .stderr(Stdio::piped())
            .kill_on_drop(true)
            .spawn()
            .map_err(|source| CommandError::Spawn {
                program: command.program().display().to_string(),
                source,
            })?;

        // Dropping the pending future on timeout drops the child, which kills it.
        match tokio::time::timeout(self.timeout, child.wait_with_output()).await {
            Ok(Ok(output)) => Ok(RawOutput {
                stdout: output.stdout,
                stderr: output.stderr,
            }),
            Ok(Err(source)) => Err(CommandError::Wait {
                command: command.to_string(),
                source,
            }),
            Err(_) => {
                error!(command = %command, timeout = ?self.timeout, "Command timed out");
                Err(CommandError::Timeout {
                    command: command.to_string(),
                    timeout: self.timeout,
                })
            }
        }
    }
}
