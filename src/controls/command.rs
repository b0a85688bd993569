// External tool invocation with a timeout and typed failures

use std::process::{ExitStatus, Stdio};
use thiserror::Error;
use tokio::process::Command;
use tokio::time::{Duration, timeout};

#[derive(Debug, Error)]
pub enum CommandError {
    #[error("failed to start {program}: {source}")]
    Spawn {
        program: String,
        #[source]
        source: std::io::Error,
    },
    #[error("{program} timed out after {timeout:?}")]
    Timeout { program: String, timeout: Duration },
    #[error("{program} exited with {status}")]
    Status { program: String, status: ExitStatus },
    #[error("unexpected output from {program}: {output:?}")]
    Parse { program: String, output: String },
}

/// Where a launched process's stdout/stderr go.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LaunchOutput {
    /// stderr discarded, stdout inherited.
    Quiet,
    /// Both piped and never read.
    Piped,
}

#[derive(Debug, Clone)]
pub struct CommandRunner {
    timeout: Duration,
}

impl CommandRunner {
    pub fn new(timeout: Duration) -> Self {
        Self { timeout }
    }

    /// Runs to completion and returns trimmed stdout. Non-zero exit is an error.
    pub async fn output(&self, program: &str, args: &[&str]) -> Result<String, CommandError> {
        let mut cmd = Command::new(program);
        cmd.args(args)
            .stdin(Stdio::null())
            .stderr(Stdio::null())
            .kill_on_drop(true);
        let out = match timeout(self.timeout, cmd.output()).await {
            Ok(r) => r.map_err(|source| CommandError::Spawn {
                program: program.into(),
                source,
            })?,
            Err(_) => {
                return Err(CommandError::Timeout {
                    program: program.into(),
                    timeout: self.timeout,
                });
            }
        };
        if !out.status.success() {
            return Err(CommandError::Status {
                program: program.into(),
                status: out.status,
            });
        }
        Ok(String::from_utf8_lossy(&out.stdout).trim().to_string())
    }

    /// Runs to completion, output discarded. Non-zero exit is an error.
    pub async fn status(&self, program: &str, args: &[&str]) -> Result<(), CommandError> {
        let mut cmd = Command::new(program);
        cmd.args(args)
            .stdin(Stdio::null())
            .stdout(Stdio::null())
            .stderr(Stdio::null())
            .kill_on_drop(true);
        let status = match timeout(self.timeout, cmd.status()).await {
            Ok(r) => r.map_err(|source| CommandError::Spawn {
                program: program.into(),
                source,
            })?,
            Err(_) => {
                return Err(CommandError::Timeout {
                    program: program.into(),
                    timeout: self.timeout,
                });
            }
        };
        if !status.success() {
            return Err(CommandError::Status {
                program: program.into(),
                status,
            });
        }
        Ok(())
    }

    /// Starts the process and returns without waiting. Only a failed start is reported.
    pub fn launch(
        &self,
        program: &str,
        args: &[&str],
        output: LaunchOutput,
    ) -> Result<(), CommandError> {
        let mut cmd = Command::new(program);
        cmd.args(args).stdin(Stdio::null());
        match output {
            LaunchOutput::Quiet => {
                cmd.stderr(Stdio::null());
            }
            LaunchOutput::Piped => {
                cmd.stdout(Stdio::piped()).stderr(Stdio::piped());
            }
        }
        cmd.spawn()
            .map(drop)
            .map_err(|source| CommandError::Spawn {
                program: program.into(),
                source,
            })
    }
}
