//! User settings for the expense tracker
//!
//! Holds the month and people enumerations offered to the user, the
//! currency symbol used when printing totals, and the backup retention.

use serde::{Deserialize, Serialize};

use super::paths::TrackerPaths;
use crate::error::TrackerError;

/// Backup retention settings
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BackupRetention {
    /// Number of backups to keep
    pub count: usize,
}

impl Default for BackupRetention {
    fn default() -> Self {
        Self { count: 10 }
    }
}

/// User settings
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Settings {
    /// Schema version for migration support
    #[serde(default = "default_schema_version")]
    pub schema_version: u32,

    /// Month labels an expense can belong to
    #[serde(default = "default_months")]
    pub months: Vec<String>,

    /// People an event can be assigned to
    #[serde(default = "default_people")]
    pub people: Vec<String>,

    /// Currency symbol appended to amounts
    #[serde(default = "default_currency")]
    pub currency_symbol: String,

    /// Backup retention policy
    #[serde(default)]
    pub backup_retention: BackupRetention,
}

fn default_schema_version() -> u32 {
    1
}

fn default_months() -> Vec<String> {
    ["Octubre 2024", "Noviembre 2024", "Diciembre 2024"]
        .iter()
        .map(|m| m.to_string())
        .collect()
}

fn default_people() -> Vec<String> {
    ["Yo", "Pareja", "Familia"]
        .iter()
        .map(|p| p.to_string())
        .collect()
}

fn default_currency() -> String {
    "€".to_string()
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            schema_version: default_schema_version(),
            months: default_months(),
            people: default_people(),
            currency_symbol: default_currency(),
            backup_retention: BackupRetention::default(),
        }
    }
}

impl Settings {
    /// Load settings from disk, or use defaults if the file doesn't exist
    pub fn load_or_create(paths: &TrackerPaths) -> Result<Self, TrackerError> {
        let settings_path = paths.settings_file();

        if !settings_path.exists() {
            // Don't save yet - let caller decide when to persist
            return Ok(Settings::default());
        }

        let contents = std::fs::read_to_string(&settings_path)
            .map_err(|e| TrackerError::Io(format!("Failed to read settings file: {}", e)))?;

        serde_json::from_str(&contents)
            .map_err(|e| TrackerError::Config(format!("Failed to parse settings file: {}", e)))
    }

    /// Save settings to disk
    pub fn save(&self, paths: &TrackerPaths) -> Result<(), TrackerError> {
        paths.ensure_directories()?;

        let contents = serde_json::to_string_pretty(self)
            .map_err(|e| TrackerError::Config(format!("Failed to serialize settings: {}", e)))?;

        std::fs::write(paths.settings_file(), contents)
            .map_err(|e| TrackerError::Io(format!("Failed to write settings file: {}", e)))?;

        Ok(())
    }

    /// Resolve a user-supplied month label against the configured months
    ///
    /// Matching ignores case and surrounding whitespace; the configured
    /// spelling is returned.
    pub fn resolve_month(&self, input: &str) -> Result<String, TrackerError> {
        resolve_label(&self.months, input).ok_or_else(|| {
            TrackerError::Validation(format!(
                "Unknown month '{}'. Expected one of: {}",
                input.trim(),
                self.months.join(", ")
            ))
        })
    }

    /// Resolve a user-supplied person against the configured people
    pub fn resolve_person(&self, input: &str) -> Result<String, TrackerError> {
        resolve_label(&self.people, input).ok_or_else(|| {
            TrackerError::Validation(format!(
                "Unknown person '{}'. Expected one of: {}",
                input.trim(),
                self.people.join(", ")
            ))
        })
    }
}

fn resolve_label(options: &[String], input: &str) -> Option<String> {
    let needle = input.trim().to_lowercase();
    options
        .iter()
        .find(|option| option.to_lowercase() == needle)
        .cloned()
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_default_settings() {
        let settings = Settings::default();
        assert_eq!(settings.months.len(), 3);
        assert_eq!(settings.months[0], "Octubre 2024");
        assert_eq!(settings.currency_symbol, "€");
        assert_eq!(settings.backup_retention.count, 10);
    }

    #[test]
    fn test_save_and_load() {
        let temp_dir = TempDir::new().unwrap();
        let paths = TrackerPaths::with_base_dir(temp_dir.path().to_path_buf());

        let mut settings = Settings::default();
        settings.currency_symbol = "$".into();
        settings.months.push("Enero 2025".into());
        settings.save(&paths).unwrap();

        let loaded = Settings::load_or_create(&paths).unwrap();
        assert_eq!(loaded.currency_symbol, "$");
        assert_eq!(loaded.months.len(), 4);
    }

    #[test]
    fn test_missing_fields_take_defaults() {
        let temp_dir = TempDir::new().unwrap();
        let paths = TrackerPaths::with_base_dir(temp_dir.path().to_path_buf());
        std::fs::write(paths.settings_file(), r#"{"currency_symbol": "£"}"#).unwrap();

        let loaded = Settings::load_or_create(&paths).unwrap();
        assert_eq!(loaded.currency_symbol, "£");
        assert_eq!(loaded.people, default_people());
    }

    #[test]
    fn test_unparseable_settings_is_config_error() {
        let temp_dir = TempDir::new().unwrap();
        let paths = TrackerPaths::with_base_dir(temp_dir.path().to_path_buf());
        std::fs::write(paths.settings_file(), "{ nope").unwrap();

        let result = Settings::load_or_create(&paths);
        assert!(matches!(result, Err(TrackerError::Config(_))));
    }

    #[test]
    fn test_resolve_month_is_case_insensitive() {
        let settings = Settings::default();
        assert_eq!(
            settings.resolve_month("  noviembre 2024 ").unwrap(),
            "Noviembre 2024"
        );
        assert!(settings.resolve_month("Marzo 2024").unwrap_err().is_validation());
    }

    #[test]
    fn test_resolve_person() {
        let settings = Settings::default();
        assert_eq!(settings.resolve_person("pareja").unwrap(), "Pareja");
        assert!(settings.resolve_person("Nadie").is_err());
    }
}
