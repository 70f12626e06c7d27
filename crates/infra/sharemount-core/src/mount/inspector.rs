use std::sync::Arc;
use tracing::debug;

use super::executor::CommandExecutor;
use super::types::MountTarget;
use crate::error::{Result, ShareMountError};
use crate::platform::{MatchMode, RuntimeEnv};

/// Answers "is this target attached?" from the live mount table.
///
/// The table is read fresh on every query. Failing to read it is an
/// environment failure and aborts the run.
pub struct MountInspector {
    executor: Arc<dyn CommandExecutor>,
    program: String,
    mode: MatchMode,
}

impl MountInspector {
    pub fn new(executor: Arc<dyn CommandExecutor>, env: &RuntimeEnv) -> Self {
        Self {
            executor,
            program: env.mount_table_program.clone(),
            mode: env.match_mode,
        }
    }

    /// Raw text of the mount table, one mount per line
    pub async fn mount_table(&self) -> Result<String> {
        let result = self
            .executor
            .execute(&self.program, &[])
            .await
            .map_err(|e| ShareMountError::MountTableUnavailable {
                message: e.to_string(),
            })?;

        if !result.is_success() {
            return Err(ShareMountError::MountTableUnavailable {
                message: format!("{} failed: {}", self.program, result.describe_failure()),
            });
        }

        Ok(result.stdout)
    }

    pub async fn is_mounted(&self, target: &MountTarget) -> Result<bool> {
        let lookup = target.as_lookup();
        let table = self.mount_table().await?;
        let mounted = table_contains(&table, &lookup, self.mode);
        debug!("{} mounted: {}", target.redacted(), mounted);
        Ok(mounted)
    }
}

/// Search a mount table for `target`. An empty target never matches.
pub fn table_contains(table: &str, target: &str, mode: MatchMode) -> bool {
    if target.is_empty() {
        return false;
    }

    match mode {
        MatchMode::Substring => table.lines().any(|line| line.contains(target)),
        MatchMode::Exact => table
            .lines()
            .any(|line| line.split_whitespace().any(|field| field == target)),
    }
}
