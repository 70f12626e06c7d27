use std::collections::HashMap;

use super::types::{Config, ShareEntry};
use crate::error::{Result, ShareMountError};
use crate::mount::ShareKind;

/// Problems found in a configuration that do not prevent a run
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ValidationReport {
    pub warnings: Vec<String>,
}

/// Check a parsed configuration.
///
/// Every error is collected before failing so one pass over the file shows
/// everything that needs fixing.
pub fn validate_config(config: &Config) -> Result<ValidationReport> {
    let mut errors = Vec::new();
    let mut report = ValidationReport::default();

    if !config.settings.volumes_root.is_absolute() {
        errors.push(format!(
            "settings.volumes_root must be an absolute path, got '{}'",
            config.settings.volumes_root.display()
        ));
    }

    let mut seen_names: HashMap<&str, ShareKind> = HashMap::new();
    let mut seen_mount_points: HashMap<&str, &str> = HashMap::new();

    for (kind, entry) in config.entries() {
        let label = entry_label(kind, entry);

        for (field, value) in [
            ("name", &entry.name),
            ("host", &entry.host),
            ("path", &entry.path),
        ] {
            if value.trim().is_empty() {
                errors.push(format!("{label}: '{field}' must not be empty"));
            }
        }

        // Names are log labels only; repeats are warned
        if !entry.name.is_empty()
            && let Some(previous) = seen_names.insert(&entry.name, kind)
        {
            report.warnings.push(format!(
                "{label}: name '{}' is already used by a {previous} share",
                entry.name
            ));
        }

        match entry.mount_point.as_deref() {
            Some(mount_point) => {
                if let Err(message) = check_mount_point(mount_point) {
                    errors.push(format!("{label}: {message}"));
                } else if let Some(other) = seen_mount_points.insert(mount_point, &entry.name) {
                    errors.push(format!(
                        "{label}: mount_point '{mount_point}' is also used by '{other}'"
                    ));
                }
            }
            None if kind == ShareKind::Nfs => {
                errors.push(format!("{label}: NFS shares require a mount_point"));
            }
            None => {}
        }

        if kind == ShareKind::Smb {
            if entry.options.as_deref().is_some_and(|o| !o.is_empty()) {
                report
                    .warnings
                    .push(format!("{label}: 'options' are ignored for SMB shares"));
            }
            if entry.password.is_some() && entry.username.as_deref().is_none_or(str::is_empty) {
                report
                    .warnings
                    .push(format!("{label}: password is ignored without a username"));
            }
        }
    }

    if config.entries().next().is_none() {
        report.warnings.push("No shares configured".to_string());
    }

    if errors.is_empty() {
        Ok(report)
    } else {
        Err(ShareMountError::ConfigInvalid {
            message: errors.join("; "),
        })
    }
}

/// A mount point names exactly one directory directly under the volumes
/// root.
pub fn check_mount_point(mount_point: &str) -> std::result::Result<(), String> {
    if mount_point.trim().is_empty() {
        return Err("mount_point must not be empty".to_string());
    }
    if mount_point.contains('/') || mount_point.contains('\0') {
        return Err(format!(
            "mount_point '{mount_point}' must be a single directory name"
        ));
    }
    if mount_point == "." || mount_point == ".." {
        return Err(format!("mount_point '{mount_point}' is not allowed"));
    }
    Ok(())
}

fn entry_label(kind: ShareKind, entry: &ShareEntry) -> String {
    if entry.name.is_empty() {
        format!("{kind} share for {}:{}", entry.host, entry.path)
    } else {
        format!("{kind} share '{}'", entry.name)
    }
}
