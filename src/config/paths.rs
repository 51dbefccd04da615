//! Path management for Debt Drainer
//!
//! ## Path Resolution Order
//!
//! 1. `DEBT_DRAINER_DATA_DIR` environment variable (if set)
//! 2. Unix (Linux/macOS): `$XDG_CONFIG_HOME/debt-drainer` or `~/.config/debt-drainer`
//! 3. Windows: `%APPDATA%\debt-drainer`

use std::path::PathBuf;

use crate::error::DrainerError;

pub const DATA_DIR_ENV: &str = "DEBT_DRAINER_DATA_DIR";

/// All paths used by Debt Drainer
#[derive(Debug, Clone)]
pub struct DrainerPaths {
    base_dir: PathBuf,
}

impl DrainerPaths {
    /// Resolve the base directory from the environment
    ///
    /// # Errors
    ///
    /// Returns an error if no home/config directory can be determined.
    pub fn new() -> Result<Self, DrainerError> {
        let base_dir = match std::env::var(DATA_DIR_ENV) {
            Ok(custom) if !custom.trim().is_empty() => PathBuf::from(custom),
            _ => resolve_default_path()?,
        };

        Ok(Self { base_dir })
    }

    /// Use an explicit base directory
    pub fn with_base_dir(base_dir: PathBuf) -> Self {
        Self { base_dir }
    }

    pub fn base_dir(&self) -> &PathBuf {
        &self.base_dir
    }

    pub fn data_dir(&self) -> PathBuf {
        self.base_dir.join("data")
    }

    pub fn settings_file(&self) -> PathBuf {
        self.base_dir.join("config.json")
    }

    pub fn audit_log(&self) -> PathBuf {
        self.base_dir.join("audit.log")
    }

    pub fn expenses_file(&self) -> PathBuf {
        self.data_dir().join("expenses.json")
    }

    pub fn debts_file(&self) -> PathBuf {
        self.data_dir().join("debts.json")
    }

    pub fn budget_file(&self) -> PathBuf {
        self.data_dir().join("budget.json")
    }

    pub fn micropayments_file(&self) -> PathBuf {
        self.data_dir().join("micropayments.json")
    }

    /// Create the base and data directories
    pub fn ensure_directories(&self) -> Result<(), DrainerError> {
        std::fs::create_dir_all(&self.base_dir)
            .map_err(|e| DrainerError::Io(format!("Failed to create base directory: {}", e)))?;

        std::fs::create_dir_all(self.data_dir())
            .map_err(|e| DrainerError::Io(format!("Failed to create data directory: {}", e)))?;

        Ok(())
    }

    /// Initialized once a settings file has been written
    pub fn is_initialized(&self) -> bool {
        self.settings_file().exists()
    }
}

#[cfg(not(windows))]
fn resolve_default_path() -> Result<PathBuf, DrainerError> {
    let config_base = match std::env::var("XDG_CONFIG_HOME") {
        Ok(xdg) if !xdg.is_empty() => PathBuf::from(xdg),
        _ => {
            let home = std::env::var("HOME")
                .map_err(|_| DrainerError::Config("HOME environment variable not set".into()))?;
            PathBuf::from(home).join(".config")
        }
    };
    Ok(config_base.join("debt-drainer"))
}

#[cfg(windows)]
fn resolve_default_path() -> Result<PathBuf, DrainerError> {
    let appdata = std::env::var("APPDATA")
        .map_err(|_| DrainerError::Config("Could not determine APPDATA directory".into()))?;
    Ok(PathBuf::from(appdata).join("debt-drainer"))
}
