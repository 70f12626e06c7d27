pub mod builder;
mod executor;
pub mod inspector;
mod orchestrator;
mod provisioner;
mod types;

#[cfg(test)]
mod mock;

pub use builder::{build_command, resolve_target};
pub use executor::{CommandExecutor, ExitResult, SystemExecutor};
pub use inspector::MountInspector;
pub use orchestrator::MountOrchestrator;
pub use provisioner::{MountPointProvisioner, ProvisionAction};
pub use types::*;

#[cfg(test)]
pub use mock::MockExecutor;
