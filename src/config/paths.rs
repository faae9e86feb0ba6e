//! Path management for MileMark
//!
//! Provides XDG-compliant path resolution for configuration and data files.
//!
//! ## Path Resolution Order
//!
//! 1. `MILEMARK_DATA_DIR` environment variable (if set)
//! 2. Unix (Linux/macOS): `$XDG_CONFIG_HOME/milemark` or `~/.config/milemark`
//! 3. Windows: `%APPDATA%\milemark`

use std::path::PathBuf;

use crate::error::MileMarkError;

/// Manages all paths used by MileMark
#[derive(Debug, Clone)]
pub struct MileMarkPaths {
    /// Base directory for all MileMark data
    base_dir: PathBuf,
}

impl MileMarkPaths {
    /// Create a new MileMarkPaths instance
    ///
    /// # Errors
    ///
    /// Returns an error if the home directory cannot be determined.
    pub fn new() -> Result<Self, MileMarkError> {
        let base_dir = if let Ok(custom) = std::env::var("MILEMARK_DATA_DIR") {
            PathBuf::from(custom)
        } else {
            resolve_default_path()?
        };

        Ok(Self { base_dir })
    }

    /// Create MileMarkPaths with a custom base directory (useful for testing)
    pub fn with_base_dir(base_dir: PathBuf) -> Self {
        Self { base_dir }
    }

    /// Get the base directory (~/.config/milemark/ or equivalent)
    pub fn base_dir(&self) -> &PathBuf {
        &self.base_dir
    }

    /// Get the data directory (~/.config/milemark/data/)
    pub fn data_dir(&self) -> PathBuf {
        self.base_dir.join("data")
    }

    /// Get the path to the settings file
    pub fn settings_file(&self) -> PathBuf {
        self.base_dir.join("config.json")
    }

    /// Get the path to the current session file
    pub fn session_file(&self) -> PathBuf {
        self.base_dir.join("session.json")
    }

    /// Get the path to the audit log
    pub fn audit_log(&self) -> PathBuf {
        self.base_dir.join("audit.log")
    }

    /// Get the path to cars.json (cars with their history and custom types)
    pub fn cars_file(&self) -> PathBuf {
        self.data_dir().join("cars.json")
    }

    /// Get the path to catalog.json (shared default maintenance types)
    pub fn catalog_file(&self) -> PathBuf {
        self.data_dir().join("catalog.json")
    }

    /// Get the path to users.json
    pub fn users_file(&self) -> PathBuf {
        self.data_dir().join("users.json")
    }

    /// Get the path to reminders.json
    pub fn reminders_file(&self) -> PathBuf {
        self.data_dir().join("reminders.json")
    }

    /// Ensure the base and data directories exist
    pub fn ensure_directories(&self) -> Result<(), MileMarkError> {
        std::fs::create_dir_all(&self.base_dir)
            .map_err(|e| MileMarkError::Io(format!("Failed to create base directory: {}", e)))?;

        std::fs::create_dir_all(self.data_dir())
            .map_err(|e| MileMarkError::Io(format!("Failed to create data directory: {}", e)))?;

        Ok(())
    }

    /// Check if MileMark has been initialized (config file exists)
    pub fn is_initialized(&self) -> bool {
        self.settings_file().exists()
    }
}

/// Resolve the default data directory path based on platform
#[cfg(not(windows))]
fn resolve_default_path() -> Result<PathBuf, MileMarkError> {
    if let Ok(xdg) = std::env::var("XDG_CONFIG_HOME") {
        return Ok(PathBuf::from(xdg).join("milemark"));
    }
    let home = std::env::var("HOME")
        .map_err(|_| MileMarkError::Config("HOME environment variable not set".into()))?;
    Ok(PathBuf::from(home).join(".config").join("milemark"))
}

/// Resolve the default data directory path based on platform
#[cfg(windows)]
fn resolve_default_path() -> Result<PathBuf, MileMarkError> {
    let appdata = std::env::var("APPDATA")
        .map_err(|_| MileMarkError::Config("Could not determine APPDATA directory".into()))?;
    Ok(PathBuf::from(appdata).join("milemark"))
}
