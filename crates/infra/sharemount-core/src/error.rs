use std::path::PathBuf;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum ShareMountError {
    #[error("Configuration file not found at {path}")]
    ConfigNotFound { path: PathBuf },

    #[error("Invalid configuration: {message}")]
    ConfigInvalid { message: String },

    #[error("Mount table unavailable: {message}")]
    MountTableUnavailable { message: String },

    #[error("Invalid share '{name}': {message}")]
    InvalidShare { name: String, message: String },

    #[error("Failed to spawn {program}: {source}")]
    Spawn {
        program: String,
        #[source]
        source: std::io::Error,
    },

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("YAML error: {0}")]
    Yaml(#[from] serde_yaml::Error),

    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

pub type Result<T> = std::result::Result<T, ShareMountError>;

/// Which half of mount-point provisioning failed.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ProvisionStep {
    Create,
    Chown,
}

impl std::fmt::Display for ProvisionStep {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Create => write!(f, "create"),
            Self::Chown => write!(f, "chown"),
        }
    }
}

/// Per-share provisioning failure. Never fatal to a batch.
#[derive(Error, Debug)]
pub enum ProvisionError {
    #[error("{path} exists but is not a directory")]
    NotADirectory { path: PathBuf },

    #[error("{step} step failed for {path}: {message}")]
    StepFailed {
        step: ProvisionStep,
        path: PathBuf,
        message: String,
    },

    #[error("Could not determine invoking user: {message}")]
    OwnerUnknown { message: String },

    #[error(transparent)]
    Exec(#[from] ShareMountError),
}

impl ProvisionError {
    pub fn step(&self) -> Option<ProvisionStep> {
        match self {
            Self::StepFailed { step, .. } => Some(*step),
            _ => None,
        }
    }
}
