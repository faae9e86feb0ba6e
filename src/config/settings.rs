//! User settings for MileMark
//!
//! Manages user preferences: reminder behaviour and display formatting.

use chrono::format::{Item, StrftimeItems};
use serde::{Deserialize, Serialize};

use super::paths::MileMarkPaths;
use crate::error::MileMarkError;

/// User settings for MileMark
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Settings {
    /// Schema version for migration support
    #[serde(default = "default_schema_version")]
    pub schema_version: u32,

    /// Whether mileage reminders may be scheduled at all
    #[serde(default = "default_notifications_enabled")]
    pub notifications_enabled: bool,

    /// Days between a mileage change and the "log your mileage" reminder
    #[serde(default = "default_reminder_delay_days")]
    pub reminder_delay_days: u32,

    /// Date format preference (strftime format)
    #[serde(default = "default_date_format")]
    pub date_format: String,

    /// Unit label shown next to distances
    #[serde(default = "default_distance_unit")]
    pub distance_unit: String,
}

/// Longest reminder delay accepted, in days
pub const MAX_REMINDER_DELAY_DAYS: u32 = 3650;

fn default_schema_version() -> u32 {
    1
}

fn default_notifications_enabled() -> bool {
    true
}

fn default_reminder_delay_days() -> u32 {
    7
}

fn default_date_format() -> String {
    "%Y-%m-%d".to_string()
}

fn default_distance_unit() -> String {
    "mi".to_string()
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            schema_version: default_schema_version(),
            notifications_enabled: default_notifications_enabled(),
            reminder_delay_days: default_reminder_delay_days(),
            date_format: default_date_format(),
            distance_unit: default_distance_unit(),
        }
    }
}

impl Settings {
    /// Load settings from disk, or create default settings if file doesn't exist
    pub fn load_or_create(paths: &MileMarkPaths) -> Result<Self, MileMarkError> {
        let settings_path = paths.settings_file();

        if settings_path.exists() {
            let contents = std::fs::read_to_string(&settings_path).map_err(|e| {
                MileMarkError::Io(format!("Failed to read settings file: {}", e))
            })?;

            let settings: Settings = serde_json::from_str(&contents).map_err(|e| {
                MileMarkError::Config(format!("Failed to parse settings file: {}", e))
            })?;
            settings.validate()?;

            Ok(settings)
        } else {
            // Don't save yet - let caller decide when to persist
            Ok(Settings::default())
        }
    }

    /// Check values that would otherwise fail later, at display or
    /// scheduling time
    pub fn validate(&self) -> Result<(), MileMarkError> {
        if StrftimeItems::new(&self.date_format).any(|item| matches!(item, Item::Error)) {
            return Err(MileMarkError::Config(format!(
                "Invalid date format: '{}'",
                self.date_format
            )));
        }

        if self.reminder_delay_days > MAX_REMINDER_DELAY_DAYS {
            return Err(MileMarkError::Config(format!(
                "Reminder delay of {} days exceeds the maximum of {}",
                self.reminder_delay_days, MAX_REMINDER_DELAY_DAYS
            )));
        }

        Ok(())
    }

    /// Save settings to disk
    pub fn save(&self, paths: &MileMarkPaths) -> Result<(), MileMarkError> {
        self.validate()?;
        paths.ensure_directories()?;

        let contents = serde_json::to_string_pretty(self).map_err(|e| {
            MileMarkError::Config(format!("Failed to serialize settings: {}", e))
        })?;

        std::fs::write(paths.settings_file(), contents).map_err(|e| {
            MileMarkError::Io(format!("Failed to write settings file: {}", e))
        })?;

        Ok(())
    }

    /// Reminder delay as a chrono duration
    pub fn reminder_delay(&self) -> chrono::Duration {
        chrono::Duration::days(i64::from(self.reminder_delay_days))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_default_settings() {
        let settings = Settings::default();
        assert!(settings.notifications_enabled);
        assert_eq!(settings.reminder_delay_days, 7);
        assert_eq!(settings.distance_unit, "mi");
        assert_eq!(settings.reminder_delay(), chrono::Duration::days(7));
    }

    #[test]
    fn test_save_and_load() {
        let temp_dir = TempDir::new().unwrap();
        let paths = MileMarkPaths::with_base_dir(temp_dir.path().to_path_buf());

        let mut settings = Settings::default();
        settings.notifications_enabled = false;
        settings.reminder_delay_days = 3;
        settings.save(&paths).unwrap();

        let loaded = Settings::load_or_create(&paths).unwrap();
        assert!(!loaded.notifications_enabled);
        assert_eq!(loaded.reminder_delay_days, 3);
    }

    #[test]
    fn test_missing_fields_use_defaults() {
        let settings: Settings = serde_json::from_str(r#"{"reminder_delay_days": 14}"#).unwrap();
        assert_eq!(settings.reminder_delay_days, 14);
        assert!(settings.notifications_enabled);
        assert_eq!(settings.date_format, "%Y-%m-%d");
    }

    #[test]
    fn test_invalid_date_format_is_rejected_on_load() {
        let temp_dir = TempDir::new().unwrap();
        let paths = MileMarkPaths::with_base_dir(temp_dir.path().to_path_buf());
        std::fs::write(paths.settings_file(), r#"{"date_format": "%Q"}"#).unwrap();

        let err = Settings::load_or_create(&paths).unwrap_err();
        assert!(matches!(err, MileMarkError::Config(_)));
        assert!(err.to_string().contains("%Q"));
    }

    #[test]
    fn test_reminder_delay_is_capped() {
        let temp_dir = TempDir::new().unwrap();
        let paths = MileMarkPaths::with_base_dir(temp_dir.path().to_path_buf());
        std::fs::write(
            paths.settings_file(),
            format!(r#"{{"reminder_delay_days": {}}}"#, u32::MAX),
        )
        .unwrap();
        assert!(matches!(
            Settings::load_or_create(&paths),
            Err(MileMarkError::Config(_))
        ));

        let settings = Settings {
            reminder_delay_days: MAX_REMINDER_DELAY_DAYS,
            ..Settings::default()
        };
        assert!(settings.validate().is_ok());
        assert!(Settings {
            reminder_delay_days: MAX_REMINDER_DELAY_DAYS + 1,
            ..Settings::default()
        }
        .save(&paths)
        .is_err());
    }
}
