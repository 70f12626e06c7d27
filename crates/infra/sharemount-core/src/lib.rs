pub mod config;
pub mod error;
pub mod mount;
pub mod platform;

pub use config::{Config, ConfigManager, LoadedConfig, ShareEntry};
pub use error::{ProvisionError, ProvisionStep, Result, ShareMountError};
#[cfg(test)]
pub use mount::MockExecutor;
pub use mount::{
    CommandExecutor, ExitResult, MountOrchestrator, MountOutcome, MountTarget, PlannedShare,
    RunSummary, ShareCommand, ShareDescriptor, ShareKind, ShareReport, SystemExecutor,
    build_command,
};
pub use platform::{MatchMode, Owner, PlatformInfo, RuntimeEnv, detect_platform};
