use std::fs;
use std::path::{Path, PathBuf};
use tracing::{debug, info, warn};

use super::types::Config;
use super::validation::{ValidationReport, validate_config};
use crate::error::{Result, ShareMountError};
use crate::platform::config_paths::{CONFIG_DIR, CONFIG_FILE, VOLUMES_ROOT_ENV};

/// A configuration that parsed and validated, with where it came from
#[derive(Debug, Clone)]
pub struct LoadedConfig {
    pub path: PathBuf,
    pub config: Config,
    pub warnings: Vec<String>,
}

pub struct ConfigManager {
    config_path: PathBuf,
}

impl ConfigManager {
    /// Manager for the first configuration file found by [`Self::resolve`]
    pub fn new() -> Result<Self> {
        Ok(Self::with_path(Self::resolve(None)?))
    }

    pub fn with_path(path: PathBuf) -> Self {
        Self { config_path: path }
    }

    /// Pick the configuration file: an explicit path wins, then
    /// `./config.yaml`, then `<config_dir>/sharemount/config.yaml`.
    ///
    /// The user-level path is returned even if it does not exist so the
    /// caller can report where it looked.
    pub fn resolve(explicit: Option<&Path>) -> Result<PathBuf> {
        if let Some(path) = explicit {
            return Ok(path.to_path_buf());
        }

        let local = PathBuf::from(CONFIG_FILE);
        if local.is_file() {
            return Ok(local);
        }

        let config_dir = dirs::config_dir()
            .ok_or_else(|| anyhow::anyhow!("Could not determine user config directory"))?;
        Ok(config_dir.join(CONFIG_DIR).join(CONFIG_FILE))
    }

    pub fn load(&self) -> Result<LoadedConfig> {
        if !self.config_path.exists() {
            return Err(ShareMountError::ConfigNotFound {
                path: self.config_path.clone(),
            });
        }

        debug!("Loading config from {:?}", self.config_path);
        let contents = fs::read_to_string(&self.config_path)?;
        let mut config: Config = serde_yaml::from_str(&contents)?;
        apply_env_overrides(&mut config);

        let report = self.validate(&config)?;
        for warning in &report.warnings {
            warn!("{warning}");
        }

        info!(
            "Loaded {} share(s) from {}",
            config.entries().count(),
            self.config_path.display()
        );

        Ok(LoadedConfig {
            path: self.config_path.clone(),
            config,
            warnings: report.warnings,
        })
    }

    pub fn validate(&self, config: &Config) -> Result<ValidationReport> {
        validate_config(config)
    }

    pub fn config_exists(&self) -> bool {
        self.config_path.exists()
    }

    pub fn get_config_path(&self) -> &Path {
        &self.config_path
    }
}

fn apply_env_overrides(config: &mut Config) {
    if let Some(root) = env_trimmed(VOLUMES_ROOT_ENV) {
        debug!("Using volumes root {root} from {VOLUMES_ROOT_ENV}");
        config.settings.volumes_root = PathBuf::from(root);
    }
}

fn env_trimmed(name: &str) -> Option<String> {
    std::env::var(name)
        .ok()
        .map(|v| v.trim().to_string())
        .filter(|v| !v.is_empty())
}
