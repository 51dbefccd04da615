//! User settings for Debt Drainer
//!
//! Holds the identity of the current user, display preferences, the
//! due-soon window and the credit bureau reporting subscription flag.

use serde::{Deserialize, Serialize};

use super::paths::DrainerPaths;
use crate::error::DrainerError;
use crate::models::{CreditScore, UserId};

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Settings {
    /// Schema version for migration support
    #[serde(default = "default_schema_version")]
    pub schema_version: u32,

    /// Identity-provider key of the person using this install
    #[serde(default = "default_user_id")]
    pub current_user_id: UserId,

    #[serde(default = "default_user_name")]
    pub current_user_name: String,

    #[serde(default = "default_currency")]
    pub currency_symbol: String,

    /// strftime format for dates in listings
    #[serde(default = "default_date_format")]
    pub date_format: String,

    /// A due date this many days ahead or closer counts as "due soon"
    #[serde(default = "default_due_soon_days")]
    pub due_soon_days: u32,

    /// Credit bureau reporting add-on is active
    #[serde(default)]
    pub subscribed: bool,

    #[serde(default)]
    pub credit: CreditScore,
}

fn default_schema_version() -> u32 {
    1
}

fn default_user_id() -> UserId {
    UserId::from("me")
}

fn default_user_name() -> String {
    "You".to_string()
}

fn default_currency() -> String {
    "$".to_string()
}

fn default_date_format() -> String {
    "%Y-%m-%d".to_string()
}

fn default_due_soon_days() -> u32 {
    7
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            schema_version: default_schema_version(),
            current_user_id: default_user_id(),
            current_user_name: default_user_name(),
            currency_symbol: default_currency(),
            date_format: default_date_format(),
            due_soon_days: default_due_soon_days(),
            subscribed: false,
            credit: CreditScore::default(),
        }
    }
}

impl Settings {
    /// Load settings from disk, or defaults if the file doesn't exist
    pub fn load_or_create(paths: &DrainerPaths) -> Result<Self, DrainerError> {
        let settings_path = paths.settings_file();

        if !settings_path.exists() {
            // Not persisted until the caller decides to
            return Ok(Settings::default());
        }

        let contents = std::fs::read_to_string(&settings_path)
            .map_err(|e| DrainerError::Io(format!("Failed to read settings file: {}", e)))?;

        serde_json::from_str(&contents)
            .map_err(|e| DrainerError::Config(format!("Failed to parse settings file: {}", e)))
    }

    pub fn save(&self, paths: &DrainerPaths) -> Result<(), DrainerError> {
        paths.ensure_directories()?;

        let contents = serde_json::to_string_pretty(self)
            .map_err(|e| DrainerError::Config(format!("Failed to serialize settings: {}", e)))?;

        std::fs::write(paths.settings_file(), contents)
            .map_err(|e| DrainerError::Io(format!("Failed to write settings file: {}", e)))?;

        Ok(())
    }
}
