//! Application Configuration
//!
//! Paths and launcher targets. Loaded from an optional JSON file; anything
//! missing falls back to platform defaults.

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fs;
use std::path::{Path, PathBuf};

use crate::domain::{DomainError, DomainResult};

/// Package id of the VPN client opened by the launcher
pub const DEFAULT_TARGET_APP_ID: &str = "com.neko.v2rayng";

const DEFAULT_DB_FILE: &str = "todo.db";

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct LauncherConfig {
    /// App opened by `launchNekoRay`
    pub target_app_id: String,
    /// app id -> executable path or URI
    pub apps: BTreeMap<String, String>,
}

impl Default for LauncherConfig {
    fn default() -> Self {
        Self {
            target_app_id: DEFAULT_TARGET_APP_ID.to_string(),
            apps: BTreeMap::new(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    pub data_dir: PathBuf,
    pub log_dir: PathBuf,
    pub db_file_name: String,
    pub launcher: LauncherConfig,
}

impl Default for AppConfig {
    fn default() -> Self {
        let (data_dir, log_dir) = match directories::ProjectDirs::from("com", "neko", "NekoTodo") {
            Some(dirs) => (dirs.data_dir().to_path_buf(), dirs.data_local_dir().join("logs")),
            None => (PathBuf::from("."), PathBuf::from("logs")),
        };

        Self {
            data_dir,
            log_dir,
            db_file_name: DEFAULT_DB_FILE.to_string(),
            launcher: LauncherConfig::default(),
        }
    }
}

impl AppConfig {
    /// Config rooted in one directory; used by embedders that own their sandbox
    pub fn in_dir(root: &Path) -> Self {
        Self {
            data_dir: root.to_path_buf(),
            log_dir: root.join("logs"),
            ..Self::default()
        }
    }

    /// Read a JSON config file; a missing file yields defaults
    pub fn load(path: &Path) -> DomainResult<Self> {
        if !path.exists() {
            log::info!("No config at {}, using defaults", path.display());
            return Ok(Self::default());
        }

        let raw = fs::read_to_string(path)
            .map_err(|e| DomainError::Config(format!("Failed to read {}: {}", path.display(), e)))?;
        let config: AppConfig = serde_json::from_str(&raw)
            .map_err(|e| DomainError::Config(format!("Invalid config {}: {}", path.display(), e)))?;
        config.validate()?;
        Ok(config)
    }

    pub fn save(&self, path: &Path) -> DomainResult<()> {
        let json = serde_json::to_string_pretty(self)
            .map_err(|e| DomainError::Config(e.to_string()))?;
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent)?;
        }
        fs::write(path, json)?;
        Ok(())
    }

    pub fn validate(&self) -> DomainResult<()> {
        if self.db_file_name.trim().is_empty() {
            return Err(DomainError::Config("db_file_name must not be empty".to_string()));
        }
        if self.launcher.target_app_id.trim().is_empty() {
            return Err(DomainError::Config("launcher.target_app_id must not be empty".to_string()));
        }
        Ok(())
    }

    pub fn db_path(&self) -> PathBuf {
        self.data_dir.join(&self.db_file_name)
    }
}
