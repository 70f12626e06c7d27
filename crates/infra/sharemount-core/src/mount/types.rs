use secrecy::SecretString;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::path::PathBuf;

/// Network filesystem protocol of a share
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ShareKind {
    Smb,
    Nfs,
}

impl fmt::Display for ShareKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Smb => write!(f, "smb"),
            Self::Nfs => write!(f, "nfs"),
        }
    }
}

/// One network share to attach.
///
/// A present `mount_point` means a static attach under the volumes root.
/// NFS shares always carry one; SMB shares without one are attached
/// dynamically by URL.
#[derive(Debug, Clone)]
pub struct ShareDescriptor {
    pub kind: ShareKind,

    /// Label used in logs and reports
    pub name: String,

    pub host: String,

    /// Remote export or share path
    pub path: String,

    pub mount_point: Option<String>,

    pub username: Option<String>,

    pub password: Option<SecretString>,

    /// Passed through to the mount facility untouched
    pub options: Option<String>,
}

impl ShareDescriptor {
    pub fn new(
        kind: ShareKind,
        name: impl Into<String>,
        host: impl Into<String>,
        path: impl Into<String>,
    ) -> Self {
        Self {
            kind,
            name: name.into(),
            host: host.into(),
            path: path.into(),
            mount_point: None,
            username: None,
            password: None,
            options: None,
        }
    }

    pub fn with_mount_point(mut self, mount_point: impl Into<String>) -> Self {
        self.mount_point = Some(mount_point.into());
        self
    }

    pub fn with_credentials(mut self, username: impl Into<String>, password: &str) -> Self {
        self.username = Some(username.into());
        self.password = Some(SecretString::from(password));
        self
    }

    pub fn with_options(mut self, options: impl Into<String>) -> Self {
        self.options = Some(options.into());
        self
    }

    /// Whether this share attaches at a caller-chosen path
    pub fn is_static(&self) -> bool {
        self.kind == ShareKind::Nfs || self.mount_point.is_some()
    }
}

/// What the mount table is searched for to decide whether a share is
/// already attached
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum MountTarget {
    /// Static mount point
    Path(PathBuf),

    /// Connection URL of a dynamic SMB attach
    Url(String),
}

impl MountTarget {
    /// The string looked up in the mount table
    pub fn as_lookup(&self) -> String {
        match self {
            Self::Path(path) => path.display().to_string(),
            Self::Url(url) => url.clone(),
        }
    }

    /// Directory that must exist before attaching, if any
    pub fn directory(&self) -> Option<&PathBuf> {
        match self {
            Self::Path(path) => Some(path),
            Self::Url(_) => None,
        }
    }

    /// Display form with any password masked
    pub fn redacted(&self) -> String {
        redact_credentials(&self.as_lookup())
    }
}

/// A fully resolved invocation that attaches one share
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ShareCommand {
    pub program: String,
    pub args: Vec<String>,
    pub target: MountTarget,
}

impl ShareCommand {
    /// Command line safe to log: passwords inside connection strings are
    /// replaced with `****`
    pub fn display_redacted(&self) -> String {
        std::iter::once(self.program.clone())
            .chain(self.args.iter().map(|a| redact_credentials(a)))
            .collect::<Vec<_>>()
            .join(" ")
    }
}

/// Mask the password of a `//user:pass@host` style connection string.
///
/// Anything without userinfo is returned unchanged.
pub fn redact_credentials(value: &str) -> String {
    let Some(start) = value.find("//") else {
        return value.to_string();
    };
    let authority_start = start + 2;
    let rest = &value[authority_start..];
    let authority_end = rest.find('/').unwrap_or(rest.len());

    // The last '@' before the path separates userinfo from host
    let Some(at) = rest[..authority_end].rfind('@') else {
        return value.to_string();
    };
    let Some(colon) = rest[..at].find(':') else {
        return value.to_string();
    };

    format!(
        "{}{}****{}",
        &value[..authority_start],
        &rest[..=colon],
        &rest[at..]
    )
}

/// Per-share result of a run
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum MountOutcome {
    AlreadyMounted,
    Mounted,
    ProvisioningFailed,
    MountCommandFailed,
}

impl MountOutcome {
    pub fn is_failure(self) -> bool {
        matches!(self, Self::ProvisioningFailed | Self::MountCommandFailed)
    }
}

impl fmt::Display for MountOutcome {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::AlreadyMounted => write!(f, "already-mounted"),
            Self::Mounted => write!(f, "mounted"),
            Self::ProvisioningFailed => write!(f, "provisioning-failed"),
            Self::MountCommandFailed => write!(f, "mount-command-failed"),
        }
    }
}

/// Outcome of one share, in a form suitable for printing or JSON output
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ShareReport {
    pub name: String,
    pub kind: ShareKind,

    /// Redacted target
    pub target: String,

    pub outcome: MountOutcome,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub detail: Option<String>,
}

impl ShareReport {
    pub fn with_detail(mut self, detail: impl Into<String>) -> Self {
        self.detail = Some(detail.into());
        self
    }
}

/// What a run would do for one share, without doing it
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PlannedShare {
    pub name: String,
    pub kind: ShareKind,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub target: Option<String>,

    /// Redacted command line
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub command: Option<String>,

    pub already_mounted: bool,
    pub needs_provisioning: bool,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub detail: Option<String>,
}

/// Tally of a run's outcomes
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct RunSummary {
    pub already_mounted: usize,
    pub mounted: usize,
    pub provisioning_failed: usize,
    pub mount_command_failed: usize,
}

impl RunSummary {
    pub fn from_reports(reports: &[ShareReport]) -> Self {
        reports.iter().fold(Self::default(), |mut acc, r| {
            match r.outcome {
                MountOutcome::AlreadyMounted => acc.already_mounted += 1,
                MountOutcome::Mounted => acc.mounted += 1,
                MountOutcome::ProvisioningFailed => acc.provisioning_failed += 1,
                MountOutcome::MountCommandFailed => acc.mount_command_failed += 1,
            }
            acc
        })
    }

    pub fn failures(&self) -> usize {
        self.provisioning_failed + self.mount_command_failed
    }
}
