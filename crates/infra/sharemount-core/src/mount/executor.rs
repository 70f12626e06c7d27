use async_trait::async_trait;
use std::process::Stdio;
use std::time::Instant;
use tracing::debug;

use crate::error::{Result, ShareMountError};

/// Exit status and captured output of an external process
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ExitResult {
    /// `None` when the process was terminated by a signal
    pub code: Option<i32>,
    pub stdout: String,
    pub stderr: String,
}

impl ExitResult {
    pub fn success() -> Self {
        Self {
            code: Some(0),
            ..Self::default()
        }
    }

    pub fn failure(code: i32, stderr: impl Into<String>) -> Self {
        Self {
            code: Some(code),
            stdout: String::new(),
            stderr: stderr.into(),
        }
    }

    pub fn with_stdout(mut self, stdout: impl Into<String>) -> Self {
        self.stdout = stdout.into();
        self
    }

    pub fn is_success(&self) -> bool {
        self.code == Some(0)
    }

    /// One-line description of a failure for logs and reports
    pub fn describe_failure(&self) -> String {
        let status = match self.code {
            Some(code) => format!("exit status {code}"),
            None => "terminated by signal".to_string(),
        };
        let stderr = self.stderr.trim();
        if stderr.is_empty() {
            status
        } else {
            format!("{status}: {stderr}")
        }
    }
}

/// Runs external programs. Every mount-table query, provisioning step and
/// mount invocation goes through this seam.
#[async_trait]
pub trait CommandExecutor: Send + Sync {
    /// Run `program` with `args` to completion.
    ///
    /// A non-zero exit is reported through [`ExitResult`], not as an error;
    /// `Err` means the process could not be started at all.
    async fn execute(&self, program: &str, args: &[String]) -> Result<ExitResult>;
}

/// Executor backed by real child processes.
///
/// Stdin is inherited so privilege escalation prompts reach the terminal.
#[derive(Debug, Clone, Copy, Default)]
pub struct SystemExecutor;

impl SystemExecutor {
    pub fn new() -> Self {
        Self
    }
}

#[async_trait]
impl CommandExecutor for SystemExecutor {
    async fn execute(&self, program: &str, args: &[String]) -> Result<ExitResult> {
        let start = Instant::now();
        let output = tokio::process::Command::new(program)
            .args(args)
            .stdin(Stdio::inherit())
            .output()
            .await
            .map_err(|source| ShareMountError::Spawn {
                program: program.to_string(),
                source,
            })?;

        debug!(
            "{} exited with {:?} in {:?}",
            program,
            output.status.code(),
            start.elapsed()
        );

        Ok(ExitResult {
            code: output.status.code(),
            stdout: String::from_utf8_lossy(&output.stdout).into_owned(),
            stderr: String::from_utf8_lossy(&output.stderr).into_owned(),
        })
    }
}
