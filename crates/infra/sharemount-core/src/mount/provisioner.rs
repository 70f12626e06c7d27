use std::path::Path;
use std::sync::Arc;
use tracing::{debug, info};

use super::executor::CommandExecutor;
use crate::error::{ProvisionError, ProvisionStep, ShareMountError};
use crate::platform::{CHOWN_CMD, MKDIR_CMD, Owner, RuntimeEnv};

/// What `ensure_directory` had to do
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ProvisionAction {
    /// The directory was already there; nothing ran
    Existing,
    /// Created and handed to the invoking user
    Created,
}

/// Creates static mount points with the invoking user's ownership.
///
/// Only creation and the ownership change run elevated. Failures abandon
/// the share they were provisioning and leave any partial work in place.
pub struct MountPointProvisioner {
    executor: Arc<dyn CommandExecutor>,
    elevate_program: String,
    owner: Option<Owner>,
}

impl MountPointProvisioner {
    pub fn new(executor: Arc<dyn CommandExecutor>, env: &RuntimeEnv) -> Self {
        Self {
            executor,
            elevate_program: env.elevate_program.clone(),
            owner: None,
        }
    }

    /// Hand created directories to `owner` instead of the invoking user
    pub fn with_owner(mut self, owner: Owner) -> Self {
        self.owner = Some(owner);
        self
    }

    pub async fn needs_provisioning(&self, path: &Path) -> bool {
        !tokio::fs::try_exists(path).await.unwrap_or(false)
    }

    pub async fn ensure_directory(&self, path: &Path) -> Result<ProvisionAction, ProvisionError> {
        match tokio::fs::metadata(path).await {
            Ok(meta) if meta.is_dir() => {
                debug!("Mount point already exists: {}", path.display());
                return Ok(ProvisionAction::Existing);
            }
            Ok(_) => {
                return Err(ProvisionError::NotADirectory {
                    path: path.to_path_buf(),
                });
            }
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {}
            Err(e) => return Err(ShareMountError::from(e).into()),
        }

        let owner = match &self.owner {
            Some(owner) => owner.clone(),
            None => Owner::current()?,
        };

        let path_arg = path.display().to_string();
        info!("Creating mount point {}", path.display());
        self.run_step(
            ProvisionStep::Create,
            path,
            vec![MKDIR_CMD.to_string(), "-p".to_string(), path_arg.clone()],
        )
        .await?;

        self.run_step(
            ProvisionStep::Chown,
            path,
            vec![CHOWN_CMD.to_string(), owner.spec(), path_arg],
        )
        .await?;

        info!("Mount point {} owned by {}", path.display(), owner.spec());
        Ok(ProvisionAction::Created)
    }

    async fn run_step(
        &self,
        step: ProvisionStep,
        path: &Path,
        mut command: Vec<String>,
    ) -> Result<(), ProvisionError> {
        let (program, args) = if self.elevate_program.is_empty() {
            let program = command.remove(0);
            (program, command)
        } else {
            (self.elevate_program.clone(), command)
        };

        debug!("Provisioning ({}): {} {}", step, program, args.join(" "));
        let result = self.executor.execute(&program, &args).await?;

        if result.is_success() {
            Ok(())
        } else {
            Err(ProvisionError::StepFailed {
                step,
                path: path.to_path_buf(),
                message: result.describe_failure(),
            })
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::mount::mock::MockExecutor;
    use tempfile::TempDir;

    fn provisioner(executor: &Arc<MockExecutor>) -> MountPointProvisioner {
        MountPointProvisioner::new(Arc::clone(executor) as _, &RuntimeEnv::default())
            .with_owner(Owner::new("alice", "staff"))
    }

    #[tokio::test]
    async fn test_existing_directory_is_noop() {
        let temp_dir = TempDir::new().unwrap();
        let executor = Arc::new(MockExecutor::new());

        let action = provisioner(&executor)
            .ensure_directory(temp_dir.path())
            .await
            .unwrap();

        assert_eq!(action, ProvisionAction::Existing);
        assert!(executor.calls().is_empty());
    }

    #[tokio::test]
    async fn test_creates_then_chowns_elevated() {
        let temp_dir = TempDir::new().unwrap();
        let mount_point = temp_dir.path().join("work");
        let executor = Arc::new(MockExecutor::new().with_real_mkdir());

        let action = provisioner(&executor)
            .ensure_directory(&mount_point)
            .await
            .unwrap();
        assert_eq!(action, ProvisionAction::Created);

        let calls = executor.calls();
        assert_eq!(calls.len(), 2);
        assert_eq!(calls[0].program, "sudo");
        assert_eq!(
            calls[0].args,
            vec!["mkdir", "-p", mount_point.to_str().unwrap()]
        );
        assert_eq!(calls[1].program, "sudo");
        assert_eq!(
            calls[1].args,
            vec!["chown", "alice:staff", mount_point.to_str().unwrap()]
        );
    }

    #[tokio::test]
    async fn test_idempotent_second_call() {
        let temp_dir = TempDir::new().unwrap();
        let mount_point = temp_dir.path().join("work");
        let executor = Arc::new(MockExecutor::new().with_real_mkdir());
        let provisioner = provisioner(&executor);

        provisioner.ensure_directory(&mount_point).await.unwrap();
        let after_first = executor.calls().len();

        let action = provisioner.ensure_directory(&mount_point).await.unwrap();
        assert_eq!(action, ProvisionAction::Existing);
        assert_eq!(executor.calls().len(), after_first);
    }

    #[tokio::test]
    async fn test_create_failure_skips_chown() {
        let temp_dir = TempDir::new().unwrap();
        let mount_point = temp_dir.path().join("work");
        let executor =
            Arc::new(MockExecutor::new().fail_when("sudo", "mkdir", 1, "sudo: a password is required"));

        let err = provisioner(&executor)
            .ensure_directory(&mount_point)
            .await
            .unwrap_err();

        assert_eq!(err.step(), Some(ProvisionStep::Create));
        assert!(err.to_string().contains("a password is required"));
        assert_eq!(executor.calls().len(), 1);
    }

    #[tokio::test]
    async fn test_chown_failure_reported() {
        let temp_dir = TempDir::new().unwrap();
        let mount_point = temp_dir.path().join("work");
        let executor = Arc::new(
            MockExecutor::new()
                .with_real_mkdir()
                .fail_when("sudo", "chown", 1, "chown: invalid user"),
        );

        let err = provisioner(&executor)
            .ensure_directory(&mount_point)
            .await
            .unwrap_err();

        assert_eq!(err.step(), Some(ProvisionStep::Chown));
        // No rollback: the created directory stays
        assert!(mount_point.exists());
    }

    #[tokio::test]
    async fn test_file_in_the_way() {
        let temp_dir = TempDir::new().unwrap();
        let file = temp_dir.path().join("work");
        std::fs::write(&file, "not a dir").unwrap();
        let executor = Arc::new(MockExecutor::new());

        let err = provisioner(&executor).ensure_directory(&file).await.unwrap_err();
        assert!(matches!(err, ProvisionError::NotADirectory { .. }));
        assert!(executor.calls().is_empty());
    }

    #[tokio::test]
    async fn test_unelevated_when_no_elevation_program() {
        let temp_dir = TempDir::new().unwrap();
        let mount_point = temp_dir.path().join("work");
        let executor = Arc::new(MockExecutor::new());
        let env = RuntimeEnv {
            elevate_program: String::new(),
            ..RuntimeEnv::default()
        };

        MountPointProvisioner::new(Arc::clone(&executor) as _, &env)
            .with_owner(Owner::new("alice", "staff"))
            .ensure_directory(&mount_point)
            .await
            .unwrap();

        let calls = executor.calls();
        assert_eq!(calls[0].program, "mkdir");
        assert_eq!(calls[1].program, "chown");
    }

    #[tokio::test]
    async fn test_missing_elevation_program_is_provision_error() {
        let temp_dir = TempDir::new().unwrap();
        let executor = Arc::new(MockExecutor::new().without_program("sudo"));

        let err = provisioner(&executor)
            .ensure_directory(&temp_dir.path().join("work"))
            .await
            .unwrap_err();
        assert!(matches!(err, ProvisionError::Exec(ShareMountError::Spawn { .. })));
    }
}
