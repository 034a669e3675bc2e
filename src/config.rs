use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::chart::ChartOptions;
use crate::data::columns::AxisDefaults;

/// Environment variable naming an explicit config file.
pub const CONFIG_ENV: &str = "VEHICLE_DASHBOARD_CONFIG";
/// Config file picked up from the working directory when present.
pub const DEFAULT_CONFIG_FILE: &str = "dashboard.json";

// ---------------------------------------------------------------------------
// Errors
// ---------------------------------------------------------------------------

#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("reading config {}: {source}", .path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("parsing config {}: {source}", .path.display())]
    Parse {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },

    #[error("invalid config: {0}")]
    Invalid(String),
}

// ---------------------------------------------------------------------------
// Dashboard configuration
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum Theme {
    #[default]
    Light,
    Dark,
}

/// Every field has a default, so a partial `dashboard.json` is fine.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct DashboardConfig {
    pub data_path: PathBuf,
    pub sample_path: PathBuf,
    pub preview_rows: usize,
    pub histogram_bins: usize,
    pub x_column: String,
    pub x_aliases: Vec<String>,
    pub y_column: String,
    pub y_aliases: Vec<String>,
    pub hover_columns: Vec<String>,
    pub theme: Theme,
    pub accent_hue: f32,
}

impl Default for DashboardConfig {
    fn default() -> Self {
        let axes = AxisDefaults::default();
        let chart = ChartOptions::default();
        Self {
            data_path: PathBuf::from("vehicles_us.csv"),
            sample_path: PathBuf::from("vehicles_clean_sample.csv"),
            preview_rows: 10,
            histogram_bins: chart.histogram_bins,
            x_column: axes.x,
            x_aliases: axes.x_aliases,
            y_column: axes.y,
            y_aliases: axes.y_aliases,
            hover_columns: chart.hover_columns,
            theme: Theme::default(),
            accent_hue: 210.0,
        }
    }
}

impl DashboardConfig {
    /// Read and validate a JSON config file.
    pub fn load_from(path: &Path) -> Result<Self, ConfigError> {
        let text = std::fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        let config: Self = serde_json::from_str(&text).map_err(|source| ConfigError::Parse {
            path: path.to_path_buf(),
            source,
        })?;
        config.validate()?;
        Ok(config)
    }

    /// `$VEHICLE_DASHBOARD_CONFIG` if set, else `./dashboard.json` if it
    /// exists, else the built-in defaults.
    pub fn discover() -> Result<Self, ConfigError> {
        let explicit = std::env::var_os(CONFIG_ENV).map(PathBuf::from);
        Self::discover_in(explicit.as_deref(), Path::new(DEFAULT_CONFIG_FILE))
    }

    fn discover_in(explicit: Option<&Path>, fallback: &Path) -> Result<Self, ConfigError> {
        match explicit {
            Some(path) => {
                log::info!("Using config {}", path.display());
                Self::load_from(path)
            }
            None if fallback.is_file() => {
                log::info!("Using config {}", fallback.display());
                Self::load_from(fallback)
            }
            None => {
                log::debug!("No config file found, using defaults");
                Ok(Self::default())
            }
        }
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if !(1..=500).contains(&self.histogram_bins) {
            return Err(ConfigError::Invalid(format!(
                "histogram_bins must be between 1 and 500, got {}",
                self.histogram_bins
            )));
        }
        if self.preview_rows == 0 {
            return Err(ConfigError::Invalid("preview_rows must be at least 1".into()));
        }
        if !(0.0..360.0).contains(&self.accent_hue) {
            return Err(ConfigError::Invalid(format!(
                "accent_hue must be in [0, 360), got {}",
                self.accent_hue
            )));
        }
        Ok(())
    }

    pub fn axis_defaults(&self) -> AxisDefaults {
        AxisDefaults {
            x: self.x_column.clone(),
            x_aliases: self.x_aliases.clone(),
            y: self.y_column.clone(),
            y_aliases: self.y_aliases.clone(),
        }
    }

    pub fn chart_options(&self) -> ChartOptions {
        ChartOptions {
            histogram_bins: self.histogram_bins,
            hover_columns: self.hover_columns.clone(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    #[test]
    fn partial_file_keeps_defaults() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("dashboard.json");
        std::fs::write(&path, r#"{ "histogram_bins": 45, "theme": "dark" }"#).unwrap();

        let config = DashboardConfig::load_from(&path).unwrap();
        assert_eq!(config.histogram_bins, 45);
        assert_eq!(config.theme, Theme::Dark);
        assert_eq!(config.x_column, "odometer");
        assert_eq!(config.data_path, PathBuf::from("vehicles_us.csv"));
    }

    #[test]
    fn zero_bins_rejected() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("dashboard.json");
        std::fs::write(&path, r#"{ "histogram_bins": 0 }"#).unwrap();

        let err = DashboardConfig::load_from(&path).unwrap_err();
        assert!(matches!(err, ConfigError::Invalid(_)));
    }

    #[test]
    fn malformed_json_is_parse_error() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("dashboard.json");
        std::fs::write(&path, "{ histogram_bins: }").unwrap();

        let err = DashboardConfig::load_from(&path).unwrap_err();
        assert!(matches!(err, ConfigError::Parse { .. }));
    }

    #[test]
    fn discovery_falls_back_to_defaults() {
        let dir = tempdir().unwrap();
        let config = DashboardConfig::discover_in(None, &dir.path().join("dashboard.json")).unwrap();
        assert_eq!(config, DashboardConfig::default());
    }

    #[test]
    fn explicit_missing_file_is_an_error() {
        let dir = tempdir().unwrap();
        let missing = dir.path().join("nope.json");
        let err = DashboardConfig::discover_in(Some(&missing), Path::new("unused.json")).unwrap_err();
        assert!(matches!(err, ConfigError::Io { .. }));
    }
}
