//! Server Settings

use crate::ApiError;
use data_validator::ValidationConfig;
use market_analysis::AnalysisConfig;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

/// Base name of the optional configuration file in the working directory
pub const DEFAULT_CONFIG_NAME: &str = "rent-estimator";

/// Application configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    /// Address the HTTP server binds to
    pub bind_addr: String,
    /// Listings CSV shown on the dashboard
    pub listings_path: PathBuf,
    /// Training features CSV; the listings file is used when unset
    pub reference_path: Option<PathBuf>,
    /// CSV field delimiter
    pub csv_delimiter: String,
    /// Linear model JSON
    pub model_path: PathBuf,
    /// Max log level (trace, debug, info, warn, error)
    pub log_level: String,
    /// Dashboard settings
    pub analysis: AnalysisConfig,
    /// Prediction input ranges
    pub validation: ValidationConfig,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            bind_addr: "0.0.0.0:8080".to_string(),
            listings_path: PathBuf::from("datos_limpios.csv"),
            reference_path: None,
            csv_delimiter: ",".to_string(),
            model_path: PathBuf::from("model.json"),
            log_level: "info".to_string(),
            analysis: AnalysisConfig::default(),
            validation: ValidationConfig::default(),
        }
    }
}

impl AppConfig {
    /// Delimiter as a single byte
    pub fn delimiter(&self) -> Result<u8, ApiError> {
        match self.csv_delimiter.as_bytes() {
            [byte] => Ok(*byte),
            _ => Err(ApiError::InvalidConfig(format!(
                "csv_delimiter must be one ASCII character, got {:?}",
                self.csv_delimiter
            ))),
        }
    }

    /// CSV the reference frame is read from
    pub fn reference_source(&self) -> &Path {
        self.reference_path.as_deref().unwrap_or(&self.listings_path)
    }
}

/// Load configuration from defaults, a TOML file and `RENT_*` environment
/// variables (nested keys use `__`, e.g. `RENT_ANALYSIS__HISTOGRAM_BINS`).
///
/// Without an explicit path, `rent-estimator.toml` is read if present.
pub fn load_config(path: Option<&Path>) -> Result<AppConfig, config::ConfigError> {
    let file = match path {
        Some(path) => config::File::from(path),
        None => config::File::with_name(DEFAULT_CONFIG_NAME).required(false),
    };

    let settings = config::Config::builder()
        .add_source(file)
        .add_source(
            config::Environment::with_prefix("RENT")
                .prefix_separator("_")
                .separator("__")
                .try_parsing(true),
        )
        .build()?;

    settings.try_deserialize()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = AppConfig::default();
        assert_eq!(config.delimiter().unwrap(), b',');
        assert_eq!(config.analysis.histogram_bins, 50);
        assert_eq!(config.reference_source(), Path::new("datos_limpios.csv"));
    }

    #[test]
    fn test_bad_delimiter() {
        let config = AppConfig {
            csv_delimiter: ";;".to_string(),
            ..Default::default()
        };
        assert!(config.delimiter().is_err());
    }

    #[test]
    fn test_load_from_file() {
        let path = std::env::temp_dir().join(format!("rent-estimator-test-{}.toml", std::process::id()));
        std::fs::write(
            &path,
            "bind_addr = \"127.0.0.1:9000\"\ncsv_delimiter = \";\"\nreference_path = \"train.csv\"\n\n[analysis]\nhistogram_bins = 20\n",
        )
        .unwrap();

        let config = load_config(Some(&path)).unwrap();
        std::fs::remove_file(&path).ok();

        assert_eq!(config.bind_addr, "127.0.0.1:9000");
        assert_eq!(config.delimiter().unwrap(), b';');
        assert_eq!(config.analysis.histogram_bins, 20);
        assert_eq!(config.reference_source(), Path::new("train.csv"));
        // untouched sections keep their defaults
        assert_eq!(config.model_path, PathBuf::from("model.json"));
        assert_eq!(config.validation, ValidationConfig::default());
    }
}
