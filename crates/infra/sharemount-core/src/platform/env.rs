use serde::{Deserialize, Serialize};
use std::path::PathBuf;

use super::constants::{
    DEFAULT_VOLUMES_ROOT, ELEVATE_CMD, MOUNT_CMD, NFS_FSTYPE, OPEN_CMD, SMB_FSTYPE,
};

/// How the mount table is searched for a target
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MatchMode {
    /// Any line containing the target counts. `/Volumes/data` also matches
    /// a line for `/Volumes/data2`.
    #[default]
    Substring,

    /// A line matches only if one of its whitespace-separated fields equals
    /// the target.
    Exact,
}

/// Programs and paths the orchestrator runs against.
///
/// Deserialized from the `settings` section of the configuration, so every
/// field can be overridden per installation and replaced in tests.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct RuntimeEnv {
    /// Parent directory of every static mount point
    pub volumes_root: PathBuf,

    /// Program used to attach static mounts
    pub mount_program: String,

    /// Program run without arguments to print the live mount table
    pub mount_table_program: String,

    /// Program handed the connection URL of a dynamic SMB share
    pub open_program: String,

    /// Prefix for mount-point creation and ownership changes.
    /// Empty runs those steps unelevated.
    pub elevate_program: String,

    pub smb_fstype: String,
    pub nfs_fstype: String,

    pub match_mode: MatchMode,
}

impl Default for RuntimeEnv {
    fn default() -> Self {
        Self {
            volumes_root: PathBuf::from(DEFAULT_VOLUMES_ROOT),
            mount_program: MOUNT_CMD.to_string(),
            mount_table_program: MOUNT_CMD.to_string(),
            open_program: OPEN_CMD.to_string(),
            elevate_program: ELEVATE_CMD.to_string(),
            smb_fstype: SMB_FSTYPE.to_string(),
            nfs_fstype: NFS_FSTYPE.to_string(),
            match_mode: MatchMode::default(),
        }
    }
}

impl RuntimeEnv {
    pub fn with_volumes_root(mut self, root: impl Into<PathBuf>) -> Self {
        self.volumes_root = root.into();
        self
    }

    pub fn with_match_mode(mut self, mode: MatchMode) -> Self {
        self.match_mode = mode;
        self
    }

    /// External programs this environment depends on, deduplicated, in
    /// the order a run first needs them.
    pub fn required_programs(&self) -> Vec<&str> {
        let mut programs: Vec<&str> = Vec::new();
        for program in [
            self.mount_table_program.as_str(),
            self.mount_program.as_str(),
            self.open_program.as_str(),
            self.elevate_program.as_str(),
        ] {
            if !program.is_empty() && !programs.contains(&program) {
                programs.push(program);
            }
        }
        programs
    }
}
