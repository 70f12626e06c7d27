use std::sync::Arc;
use tracing::{error, info, warn};

use super::builder::build_command;
use super::executor::CommandExecutor;
use super::inspector::MountInspector;
use super::provisioner::{MountPointProvisioner, ProvisionAction};
use super::types::{MountOutcome, PlannedShare, ShareDescriptor, ShareReport};
use crate::error::Result;
use crate::platform::RuntimeEnv;

/// Attaches declared shares one at a time, in declaration order.
///
/// Per-share failures are recorded and the batch moves on; only an
/// unreadable mount table stops a run.
pub struct MountOrchestrator {
    executor: Arc<dyn CommandExecutor>,
    env: RuntimeEnv,
    inspector: MountInspector,
    provisioner: MountPointProvisioner,
}

impl MountOrchestrator {
    pub fn new(executor: Arc<dyn CommandExecutor>, env: RuntimeEnv) -> Self {
        let inspector = MountInspector::new(Arc::clone(&executor), &env);
        let provisioner = MountPointProvisioner::new(Arc::clone(&executor), &env);
        Self {
            executor,
            env,
            inspector,
            provisioner,
        }
    }

    pub fn with_provisioner(mut self, provisioner: MountPointProvisioner) -> Self {
        self.provisioner = provisioner;
        self
    }

    pub fn env(&self) -> &RuntimeEnv {
        &self.env
    }

    pub async fn run(&self, shares: &[ShareDescriptor]) -> Result<Vec<ShareReport>> {
        if shares.is_empty() {
            info!("No shares configured");
            return Ok(Vec::new());
        }

        let mut reports = Vec::with_capacity(shares.len());
        for (index, share) in shares.iter().enumerate() {
            info!(
                "[{}/{}] {} share '{}'",
                index + 1,
                shares.len(),
                share.kind,
                share.name
            );
            reports.push(self.attach(share).await?);
        }
        Ok(reports)
    }

    /// Attach a single share. `Err` only for environment failures.
    pub async fn attach(&self, share: &ShareDescriptor) -> Result<ShareReport> {
        let command = match build_command(share, &self.env) {
            Ok(command) => command,
            Err(e) => {
                error!("Cannot build mount command for '{}': {}", share.name, e);
                return Ok(report(share, String::new(), MountOutcome::MountCommandFailed)
                    .with_detail(e.to_string()));
            }
        };
        let target = command.target.redacted();

        if self.inspector.is_mounted(&command.target).await? {
            info!("'{}' is already mounted at {}", share.name, target);
            return Ok(report(share, target, MountOutcome::AlreadyMounted));
        }

        if let Some(dir) = command.target.directory() {
            match self.provisioner.ensure_directory(dir).await {
                Ok(ProvisionAction::Existing | ProvisionAction::Created) => {}
                Err(e) => {
                    warn!("Skipping '{}': {}", share.name, e);
                    return Ok(report(share, target, MountOutcome::ProvisioningFailed)
                        .with_detail(e.to_string()));
                }
            }
        }

        info!("Mounting '{}': {}", share.name, command.display_redacted());
        let outcome = match self.executor.execute(&command.program, &command.args).await {
            Ok(result) if result.is_success() => {
                info!("Mounted '{}' at {}", share.name, target);
                report(share, target, MountOutcome::Mounted)
            }
            Ok(result) => {
                let detail = result.describe_failure();
                error!("Failed to mount '{}': {}", share.name, detail);
                report(share, target, MountOutcome::MountCommandFailed).with_detail(detail)
            }
            Err(e) => {
                error!("Failed to mount '{}': {}", share.name, e);
                report(share, target, MountOutcome::MountCommandFailed).with_detail(e.to_string())
            }
        };
        Ok(outcome)
    }

    /// Resolve every share's command and mount state without provisioning
    /// or mounting anything
    pub async fn plan(&self, shares: &[ShareDescriptor]) -> Result<Vec<PlannedShare>> {
        let mut planned = Vec::with_capacity(shares.len());
        for share in shares {
            let entry = match build_command(share, &self.env) {
                Ok(command) => {
                    let already_mounted = self.inspector.is_mounted(&command.target).await?;
                    let needs_provisioning = match command.target.directory() {
                        Some(dir) if !already_mounted => {
                            self.provisioner.needs_provisioning(dir).await
                        }
                        _ => false,
                    };
                    PlannedShare {
                        name: share.name.clone(),
                        kind: share.kind,
                        target: Some(command.target.redacted()),
                        command: Some(command.display_redacted()),
                        already_mounted,
                        needs_provisioning,
                        detail: None,
                    }
                }
                Err(e) => PlannedShare {
                    name: share.name.clone(),
                    kind: share.kind,
                    target: None,
                    command: None,
                    already_mounted: false,
                    needs_provisioning: false,
                    detail: Some(e.to_string()),
                },
            };
            planned.push(entry);
        }
        Ok(planned)
    }
}

fn report(share: &ShareDescriptor, target: String, outcome: MountOutcome) -> ShareReport {
    ShareReport {
        name: share.name.clone(),
        kind: share.kind,
        target,
        outcome,
        detail: None,
    }
}
