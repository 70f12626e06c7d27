use crate::error::ProvisionError;

/// Set by `sudo` to the real uid of the user who ran it
#[cfg(unix)]
const SUDO_UID_ENV: &str = "SUDO_UID";

/// User and primary group that provisioned mount points are handed to
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Owner {
    pub user: String,
    pub group: String,
}

impl Owner {
    pub fn new(user: impl Into<String>, group: impl Into<String>) -> Self {
        Self {
            user: user.into(),
            group: group.into(),
        }
    }

    /// `user:group`, as `chown` expects it
    pub fn spec(&self) -> String {
        format!("{}:{}", self.user, self.group)
    }

    /// Resolve the invoking user and their primary group.
    ///
    /// Under `sudo` the invoking user is the one named by `SUDO_UID`, not
    /// root. The group comes from the user's passwd entry.
    #[cfg(unix)]
    pub fn current() -> Result<Self, ProvisionError> {
        use nix::unistd::{Uid, getuid};

        let uid = std::env::var(SUDO_UID_ENV)
            .ok()
            .and_then(|v| v.trim().parse::<u32>().ok())
            .map_or_else(getuid, Uid::from_raw);

        Self::for_uid(uid)
    }

    #[cfg(unix)]
    pub fn for_uid(uid: nix::unistd::Uid) -> Result<Self, ProvisionError> {
        use nix::unistd::{Group, User};

        let user = User::from_uid(uid)
            .map_err(|e| ProvisionError::OwnerUnknown {
                message: format!("lookup of uid {uid} failed: {e}"),
            })?
            .ok_or_else(|| ProvisionError::OwnerUnknown {
                message: format!("no passwd entry for uid {uid}"),
            })?;

        // A gid without a group entry can still be handed to chown numerically
        let group = match Group::from_gid(user.gid) {
            Ok(Some(group)) => group.name,
            _ => user.gid.to_string(),
        };

        Ok(Self::new(user.name, group))
    }

    #[cfg(not(unix))]
    pub fn current() -> Result<Self, ProvisionError> {
        Err(ProvisionError::OwnerUnknown {
            message: "ownership changes are only supported on Unix".to_string(),
        })
    }
}
