//! Application settings loading from config.toml
//!
//! This module provides functionality to load the application configuration
//! from a TOML file: the rooms to seed the database with on first run, and
//! the tuning knobs of the rent-reminder scan.

use crate::errors::{Error, Result};
use serde::Deserialize;
use std::path::Path;

/// Configuration structure representing the entire config.toml file
#[derive(Debug, Default, Deserialize)]
pub struct Settings {
    /// List of room configurations to seed
    #[serde(default)]
    pub rooms: Vec<RoomConfig>,
    /// Reminder scan tuning
    #[serde(default)]
    pub reminder: ReminderConfig,
}

/// Configuration for a single seed room
#[derive(Debug, Deserialize, Clone)]
pub struct RoomConfig {
    /// Room number or label
    pub number: String,
    /// Maximum number of tenants
    pub capacity: i32,
    /// Total monthly rent for the room
    pub rent: f64,
}

/// Tuning knobs for the rent-reminder scan
#[derive(Debug, Deserialize, Clone)]
pub struct ReminderConfig {
    /// Minimum hours between two reminder scans
    #[serde(default = "default_scan_interval_hours")]
    pub scan_interval_hours: i64,
    /// How many days before the due date an "upcoming rent" reminder fires
    #[serde(default = "default_upcoming_window_days")]
    pub upcoming_window_days: i64,
}

const fn default_scan_interval_hours() -> i64 {
    6
}

const fn default_upcoming_window_days() -> i64 {
    3
}

impl Default for ReminderConfig {
    fn default() -> Self {
        Self {
            scan_interval_hours: default_scan_interval_hours(),
            upcoming_window_days: default_upcoming_window_days(),
        }
    }
}

/// Loads application settings from a TOML file
///
/// # Errors
/// Returns an error if:
/// - The file cannot be read
/// - The TOML syntax is invalid
/// - Required fields are missing
pub fn load_settings<P: AsRef<Path>>(path: P) -> Result<Settings> {
    let contents = std::fs::read_to_string(path.as_ref()).map_err(|e| Error::Config {
        message: format!("Failed to read config file: {e}"),
    })?;

    toml::from_str(&contents).map_err(|e| Error::Config {
        message: format!("Failed to parse config.toml: {e}"),
    })
}

/// Loads application settings from the default location (./config.toml)
pub fn load_default_settings() -> Result<Settings> {
    load_settings("config.toml")
}

#[cfg(test)]
mod tests {
    #![allow(clippy::unwrap_used)]
    #![allow(clippy::float_cmp)]
    use super::*;

    #[test]
    fn test_parse_settings() {
        let toml_str = r#"
            [[rooms]]
            number = "101"
            capacity = 2
            rent = 8000.0

            [[rooms]]
            number = "102"
            capacity = 3
            rent = 10500.0

            [reminder]
            scan_interval_hours = 12
            upcoming_window_days = 5
        "#;

        let settings: Settings = toml::from_str(toml_str).unwrap();
        assert_eq!(settings.rooms.len(), 2);
        assert_eq!(settings.rooms[0].number, "101");
        assert_eq!(settings.rooms[0].capacity, 2);
        assert_eq!(settings.rooms[0].rent, 8000.0);
        assert_eq!(settings.rooms[1].number, "102");
        assert_eq!(settings.reminder.scan_interval_hours, 12);
        assert_eq!(settings.reminder.upcoming_window_days, 5);
    }

    #[test]
    fn test_reminder_defaults() {
        let toml_str = r#"
            [[rooms]]
            number = "201"
            capacity = 1
            rent = 6000.0
        "#;

        let settings: Settings = toml::from_str(toml_str).unwrap();
        assert_eq!(settings.reminder.scan_interval_hours, 6);
        assert_eq!(settings.reminder.upcoming_window_days, 3);
    }

    #[test]
    fn test_empty_settings() {
        let settings: Settings = toml::from_str("").unwrap();
        assert!(settings.rooms.is_empty());
        assert_eq!(settings.reminder.scan_interval_hours, 6);
    }

    #[test]
    fn test_load_settings_missing_file() {
        let result = load_settings("definitely/not/a/real/config.toml");
        assert!(matches!(result, Err(Error::Config { message: _ })));
    }
}
