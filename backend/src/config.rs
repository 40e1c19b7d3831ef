//! Loading and saving date picker configuration files.
//!
//! Files ending in `.json` are read as JSON; everything else is read as YAML.
//! Missing fields fall back to their defaults and the result is normalized.

use anyhow::{Context, Result};
use shared::DatePickerConfig;
use std::fs;
use std::path::Path;
use tracing::{debug, info, warn};

pub struct ConfigService;

impl ConfigService {
    pub fn load_config(config_path: &Path) -> Result<DatePickerConfig> {
        let config_content = fs::read_to_string(config_path)
            .with_context(|| format!("Failed to read date picker config file: {:?}", config_path))?;

        let config: DatePickerConfig = if is_json(config_path) {
            serde_json::from_str(&config_content)
                .with_context(|| format!("Failed to parse date picker config JSON: {:?}", config_path))?
        } else {
            serde_yaml::from_str(&config_content)
                .with_context(|| format!("Failed to parse date picker config YAML: {:?}", config_path))?
        };

        debug!("Loaded date picker config from {:?}", config_path);
        Ok(config.normalized())
    }

    pub fn load_config_or_default(config_path: &Path) -> DatePickerConfig {
        match Self::load_config(config_path) {
            Ok(config) => config,
            Err(e) => {
                warn!("Failed to load date picker config from {:?}: {:#}", config_path, e);
                info!("Using default date picker config");
                DatePickerConfig::default()
            }
        }
    }

    /// Write `config` in the format implied by the extension
    pub fn save_config(config_path: &Path, config: &DatePickerConfig) -> Result<()> {
        let content = if is_json(config_path) {
            serde_json::to_string_pretty(config)?
        } else {
            serde_yaml::to_string(config)?
        };

        // Write to a temp file, then rename over the target
        let temp_path = config_path.with_extension("tmp");
        fs::write(&temp_path, content)
            .with_context(|| format!("Failed to write date picker config: {:?}", temp_path))?;
        fs::rename(&temp_path, config_path)
            .with_context(|| format!("Failed to move date picker config into place: {:?}", config_path))?;

        debug!("Saved date picker config to {:?}", config_path);
        Ok(())
    }
}

fn is_json(path: &Path) -> bool {
    path.extension()
        .and_then(|ext| ext.to_str())
        .is_some_and(|ext| ext.eq_ignore_ascii_case("json"))
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_load_yaml_config() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("picker.yaml");
        fs::write(&path, "first_day_of_week: 1\nmonths_to_display: 3\nshow_outside_days: true\n").unwrap();

        let config = ConfigService::load_config(&path).unwrap();
        assert_eq!(config.first_day_of_week, 1);
        assert_eq!(config.months_to_display, 3);
        assert!(config.show_outside_days);
        assert_eq!(config.date_format, "YYYY-MM-DD");
    }

    #[test]
    fn test_load_json_config_is_normalized() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("picker.json");
        fs::write(&path, r#"{"first_day_of_week": 8, "months_to_display": 0}"#).unwrap();

        let config = ConfigService::load_config(&path).unwrap();
        assert_eq!(config.first_day_of_week, 1);
        assert_eq!(config.months_to_display, 1);
    }

    #[test]
    fn test_load_missing_file_fails_with_context() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("missing.yaml");

        let error = ConfigService::load_config(&path).unwrap_err();
        assert!(error.to_string().contains("Failed to read date picker config file"));
        assert_eq!(ConfigService::load_config_or_default(&path), DatePickerConfig::default());
    }

    #[test]
    fn test_load_malformed_file_fails() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("picker.json");
        fs::write(&path, "{ not json").unwrap();
        assert!(ConfigService::load_config(&path).is_err());
    }

    #[test]
    fn test_save_then_load() {
        let temp_dir = TempDir::new().unwrap();
        for name in ["picker.yaml", "picker.json"] {
            let path = temp_dir.path().join(name);
            let config = DatePickerConfig {
                first_day_of_week: 1,
                ..DatePickerConfig::range()
            };
            ConfigService::save_config(&path, &config).unwrap();
            assert!(!path.with_extension("tmp").exists());
            assert_eq!(ConfigService::load_config(&path).unwrap(), config);
        }
    }
}
