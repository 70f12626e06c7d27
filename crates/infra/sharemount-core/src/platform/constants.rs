//! Defaults for the external programs and paths the orchestrator drives

/// Root directory for static mount points
pub const DEFAULT_VOLUMES_ROOT: &str = "/Volumes";

/// Mount facility, also used (without arguments) to list the mount table
pub const MOUNT_CMD: &str = "mount";

/// "Open by URL" handler used for dynamic SMB attaches
pub const OPEN_CMD: &str = "open";

/// Privilege escalation program for mount-point provisioning
pub const ELEVATE_CMD: &str = "sudo";

pub const MKDIR_CMD: &str = "mkdir";
pub const CHOWN_CMD: &str = "chown";

/// Filesystem type passed to `mount -t` for SMB shares
pub const SMB_FSTYPE: &str = "smbfs";

/// Filesystem type passed to `mount -t` for NFS shares
pub const NFS_FSTYPE: &str = "nfs";

/// URL scheme for dynamic SMB attaches
pub const SMB_URL_SCHEME: &str = "smb://";

/// Configuration lookup
pub mod config_paths {
    /// File name looked up in the working directory and the config dir
    pub const CONFIG_FILE: &str = "config.yaml";

    /// Directory under the user's config dir
    pub const CONFIG_DIR: &str = "sharemount";

    /// Explicit config path override
    pub const CONFIG_ENV: &str = "SHAREMOUNT_CONFIG";

    /// Overrides `settings.volumes_root`
    pub const VOLUMES_ROOT_ENV: &str = "SHAREMOUNT_VOLUMES_ROOT";
}
