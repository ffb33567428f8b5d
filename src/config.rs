// file: src/config.rs
// description: run configuration and destination shortcut handling
// reference: https://docs.rs/config

use crate::error::{Result, SyncError};
use crate::models::BackupFolder;
use dotenvy::dotenv;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct Config {
    /// Shared source root; every backup folder lives underneath it.
    pub home: PathBuf,
    pub backup_folders: Vec<BackupFolderEntry>,
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct BackupFolderEntry {
    pub path: PathBuf,
}

impl Config {
    pub fn load(path: &Path) -> Result<Self> {
        dotenv().ok();

        let settings = config::Config::builder()
            .add_source(config::File::from(path))
            .add_source(
                config::Environment::with_prefix("DEVSYNC")
                    .separator("__")
                    .try_parsing(true),
            )
            .build()
            .map_err(|e| SyncError::Config(e.to_string()))?;

        let config: Config = settings
            .try_deserialize()
            .map_err(|e| SyncError::Config(e.to_string()))?;

        config.validate()?;
        Ok(config)
    }

    fn validate(&self) -> Result<()> {
        if !self.home.is_absolute() {
            return Err(SyncError::Config(format!(
                "home must be an absolute path, got {}",
                self.home.display()
            )));
        }

        if self.backup_folders.is_empty() {
            return Err(SyncError::Config(
                "at least one backup folder must be configured".to_string(),
            ));
        }

        for entry in &self.backup_folders {
            if entry.path.is_absolute() {
                return Err(SyncError::Config(format!(
                    "backup folder {} must be relative to home",
                    entry.path.display()
                )));
            }
        }

        Ok(())
    }

    /// Materialize the configured folders under `root` (the resolved home).
    pub fn folders_under(&self, root: &Path) -> Vec<BackupFolder> {
        self.backup_folders
            .iter()
            .map(|entry| BackupFolder::new(root, &entry.path))
            .collect()
    }
}

/// Persisted destination shortcuts: symbolic names for frequently used
/// backup targets. An absent file simply means no shortcuts are defined.
#[derive(Debug, Clone, Default, Deserialize, Serialize)]
pub struct Shortcuts {
    #[serde(default)]
    pub shortcuts: Vec<Shortcut>,
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct Shortcut {
    pub name: String,
    pub path: PathBuf,
}

impl Shortcuts {
    pub fn load(path: &Path) -> Result<Self> {
        if !path.exists() {
            return Ok(Self::default());
        }

        let settings = config::Config::builder()
            .add_source(config::File::from(path))
            .build()
            .map_err(|e| SyncError::Config(e.to_string()))?;

        settings
            .try_deserialize()
            .map_err(|e| SyncError::Config(e.to_string()))
    }

    /// A matching shortcut name wins; anything else is a literal path.
    pub fn resolve(&self, destination: &str) -> PathBuf {
        self.shortcuts
            .iter()
            .find(|shortcut| shortcut.name == destination)
            .map(|shortcut| shortcut.path.clone())
            .unwrap_or_else(|| PathBuf::from(destination))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use std::fs;
    use tempfile::TempDir;

    const CONFIG_CONTENT: &str = "\
home: /home/user
backup_folders:
  - path: Pictures
  - path: Documents
  - path: Development
";

    const SHORTCUTS_CONTENT: &str = "\
shortcuts:
  - name: usb
    path: /media/user/usbdevice
  - name: nas
    path: /mnt/nas/backups
";

    fn write_yaml(dir: &TempDir, name: &str, content: &str) -> PathBuf {
        let path = dir.path().join(name);
        fs::write(&path, content).unwrap();
        path
    }

    #[test]
    fn loads_home_and_backup_folders() {
        let temp = TempDir::new().unwrap();
        let path = write_yaml(&temp, "config.yml", CONFIG_CONTENT);

        let config = Config::load(&path).unwrap();

        assert_eq!(config.home, PathBuf::from("/home/user"));
        assert_eq!(config.backup_folders.len(), 3);

        let folders = config.folders_under(&config.home);
        assert_eq!(folders[2].path(), PathBuf::from("/home/user/Development"));
    }

    #[test]
    fn relative_home_is_rejected() {
        let temp = TempDir::new().unwrap();
        let path = write_yaml(&temp, "config.yml", "home: user\nbackup_folders:\n  - path: a\n");

        assert!(matches!(Config::load(&path), Err(SyncError::Config(_))));
    }

    #[test]
    fn absolute_backup_folder_is_rejected() {
        let temp = TempDir::new().unwrap();
        let path = write_yaml(
            &temp,
            "config.yml",
            "home: /home/user\nbackup_folders:\n  - path: /etc\n",
        );

        assert!(matches!(Config::load(&path), Err(SyncError::Config(_))));
    }

    #[test]
    fn shortcut_name_resolves_to_its_path() {
        let temp = TempDir::new().unwrap();
        let path = write_yaml(&temp, "shortcuts.yml", SHORTCUTS_CONTENT);

        let shortcuts = Shortcuts::load(&path).unwrap();

        assert_eq!(shortcuts.shortcuts.len(), 2);
        assert_eq!(shortcuts.resolve("usb"), PathBuf::from("/media/user/usbdevice"));
    }

    #[test]
    fn unknown_destination_is_a_literal_path() {
        let shortcuts = Shortcuts::default();
        assert_eq!(shortcuts.resolve("/tmp"), PathBuf::from("/tmp"));
    }

    #[test]
    fn absent_shortcuts_file_means_no_shortcuts() {
        let temp = TempDir::new().unwrap();
        let shortcuts = Shortcuts::load(&temp.path().join("missing.yml")).unwrap();
        assert!(shortcuts.shortcuts.is_empty());
    }
}
