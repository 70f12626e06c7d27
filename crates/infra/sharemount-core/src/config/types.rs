use secrecy::SecretString;
use serde::{Deserialize, Deserializer};

use crate::mount::{ShareDescriptor, ShareKind};
use crate::platform::RuntimeEnv;

/// Top-level configuration document
#[derive(Debug, Clone, Default, Deserialize)]
pub struct Config {
    /// Declared shares. Missing or empty means nothing to do.
    #[serde(default)]
    pub mounts: Option<MountsSection>,

    /// Programs and paths; every field falls back to its default
    #[serde(default)]
    pub settings: RuntimeEnv,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct MountsSection {
    #[serde(default)]
    pub smb: Option<Vec<ShareEntry>>,

    #[serde(default)]
    pub nfs: Option<Vec<ShareEntry>>,
}

/// One share as written in the configuration file
#[derive(Debug, Clone, Deserialize)]
pub struct ShareEntry {
    pub name: String,
    pub host: String,
    pub path: String,

    #[serde(default)]
    pub mount_point: Option<String>,

    #[serde(default)]
    pub username: Option<String>,

    #[serde(default, deserialize_with = "secret_from_str")]
    pub password: Option<SecretString>,

    #[serde(default)]
    pub options: Option<String>,
}

fn secret_from_str<'de, D>(deserializer: D) -> Result<Option<SecretString>, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(Option::<String>::deserialize(deserializer)?.map(SecretString::from))
}

impl ShareEntry {
    pub fn to_descriptor(&self, kind: ShareKind) -> ShareDescriptor {
        ShareDescriptor {
            kind,
            name: self.name.clone(),
            host: self.host.clone(),
            path: self.path.clone(),
            mount_point: self.mount_point.clone(),
            username: self.username.clone(),
            password: self.password.clone(),
            options: self.options.clone(),
        }
    }
}

impl Config {
    pub fn smb_entries(&self) -> &[ShareEntry] {
        self.mounts
            .as_ref()
            .and_then(|m| m.smb.as_deref())
            .unwrap_or_default()
    }

    pub fn nfs_entries(&self) -> &[ShareEntry] {
        self.mounts
            .as_ref()
            .and_then(|m| m.nfs.as_deref())
            .unwrap_or_default()
    }

    /// Every declared share, kind attached: the SMB list first, then NFS,
    /// each in file order
    pub fn entries(&self) -> impl Iterator<Item = (ShareKind, &ShareEntry)> {
        self.smb_entries()
            .iter()
            .map(|e| (ShareKind::Smb, e))
            .chain(self.nfs_entries().iter().map(|e| (ShareKind::Nfs, e)))
    }

    /// Descriptors in processing order
    pub fn shares(&self) -> Vec<ShareDescriptor> {
        self.entries()
            .map(|(kind, entry)| entry.to_descriptor(kind))
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use secrecy::ExposeSecret;

    const SAMPLE: &str = r"
mounts:
  smb:
    - name: work
      host: smb.local
      path: /projects
      mount_point: work
      username: u
      password: p
    - name: share
      host: smb.local
      path: /share
  nfs:
    - name: data
      host: nfs.local
      path: /export/data
      mount_point: data
      options: resvport
";

    #[test]
    fn test_parse_sample() {
        let config: Config = serde_yaml::from_str(SAMPLE).unwrap();

        assert_eq!(config.smb_entries().len(), 2);
        assert_eq!(config.nfs_entries().len(), 1);
        assert_eq!(config.settings, RuntimeEnv::default());

        let work = &config.smb_entries()[0];
        assert_eq!(
            work.password.as_ref().map(|p| p.expose_secret().to_string()),
            Some("p".to_string())
        );
        assert_eq!(config.nfs_entries()[0].options.as_deref(), Some("resvport"));
    }

    #[test]
    fn test_shares_smb_before_nfs() {
        let yaml = r"
mounts:
  nfs:
    - { name: n1, host: h, path: /a, mount_point: n1 }
  smb:
    - { name: s1, host: h, path: /b }
    - { name: s2, host: h, path: /c }
";
        let config: Config = serde_yaml::from_str(yaml).unwrap();
        let shares = config.shares();

        let order: Vec<(&str, ShareKind)> =
            shares.iter().map(|s| (s.name.as_str(), s.kind)).collect();
        assert_eq!(
            order,
            vec![
                ("s1", ShareKind::Smb),
                ("s2", ShareKind::Smb),
                ("n1", ShareKind::Nfs)
            ]
        );
    }

    #[test]
    fn test_empty_sections_allowed() {
        let config: Config = serde_yaml::from_str("mounts:\n  smb:\n  nfs:\n").unwrap();
        assert!(config.shares().is_empty());

        let config: Config = serde_yaml::from_str("settings:\n  volumes_root: /mnt\n").unwrap();
        assert!(config.shares().is_empty());
    }

    #[test]
    fn test_missing_required_field_rejected() {
        let yaml = "mounts:\n  nfs:\n    - { name: n1, path: /a }\n";
        assert!(serde_yaml::from_str::<Config>(yaml).is_err());
    }
}
