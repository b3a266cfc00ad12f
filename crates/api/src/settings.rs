//! Server Settings
//!
//! Layered from `config/default.toml` (optional) and `CARPRICE__*`
//! environment variables, e.g. `CARPRICE__SERVER__PORT=9000`.

use data_validator::ValidationConfig;
use model_store::DEFAULT_MODEL_PATH;
use serde::Deserialize;
use std::str::FromStr;
use tracing::Level;

/// HTTP listener
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default)]
pub struct ServerSettings {
    pub host: String,
    pub port: u16,
}

impl Default for ServerSettings {
    fn default() -> Self {
        Self {
            host: "0.0.0.0".to_string(),
            port: 8000,
        }
    }
}

impl ServerSettings {
    /// `host:port` to bind
    pub fn addr(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }
}

/// Model artifact loading
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default)]
pub struct ModelSettings {
    /// Artifact written by `train-price-model`
    pub path: String,
    /// Refuse to start without a model; otherwise serve "not loaded"
    pub require_loaded: bool,
}

impl Default for ModelSettings {
    fn default() -> Self {
        Self {
            path: DEFAULT_MODEL_PATH.to_string(),
            require_loaded: true,
        }
    }
}

/// Prediction responses
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default)]
pub struct PredictionSettings {
    /// Label returned next to every price
    pub currency: String,
    /// Reference year for `age` on raw listings; current year when unset
    pub current_year: Option<i32>,
}

impl Default for PredictionSettings {
    fn default() -> Self {
        Self {
            currency: "Lakhs".to_string(),
            current_year: None,
        }
    }
}

/// Log output
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default)]
pub struct LoggingSettings {
    pub level: String,
    pub json: bool,
}

impl LoggingSettings {
    /// Parsed `level`
    pub fn max_level(&self) -> anyhow::Result<Level> {
        Level::from_str(&self.level)
            .map_err(|e| anyhow::anyhow!("Invalid log level {:?}: {}", self.level, e))
    }
}

impl Default for LoggingSettings {
    fn default() -> Self {
        Self {
            level: "info".to_string(),
            json: false,
        }
    }
}

/// All server settings
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(default)]
pub struct Settings {
    pub server: ServerSettings,
    pub model: ModelSettings,
    pub prediction: PredictionSettings,
    pub logging: LoggingSettings,
    pub validation: ValidationConfig,
}

impl Settings {
    /// Load from `config/default.toml` and the environment
    pub fn load() -> Result<Self, config::ConfigError> {
        Self::load_from("config/default")
    }

    /// Load from a config file (any format `config` understands, extension
    /// optional) overlaid with `CARPRICE__*` environment variables
    pub fn load_from(file: &str) -> Result<Self, config::ConfigError> {
        config::Config::builder()
            .add_source(config::File::with_name(file).required(false))
            .add_source(
                config::Environment::with_prefix("CARPRICE")
                    .separator("__")
                    .try_parsing(true),
            )
            .build()?
            .try_deserialize()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_without_file() {
        let settings = Settings::load_from("/nonexistent/carprice").unwrap();
        assert_eq!(settings.server.port, 8000);
        assert_eq!(settings.model.path, "models/car_price_model.bin");
        assert!(settings.model.require_loaded);
        assert_eq!(settings.prediction.currency, "Lakhs");
        assert_eq!(settings.validation, ValidationConfig::default());
    }

    #[test]
    fn test_file_overrides() {
        let dir = std::env::temp_dir().join("api-settings-test");
        std::fs::create_dir_all(&dir).unwrap();
        let path = dir.join("server.toml");
        std::fs::write(
            &path,
            "[server]\nport = 9100\n\n[prediction]\ncurrency = \"INR\"\ncurrent_year = 2025\n\n[model]\nrequire_loaded = false\n",
        )
        .unwrap();

        let settings = Settings::load_from(path.to_str().unwrap()).unwrap();
        assert_eq!(settings.server.addr(), "0.0.0.0:9100");
        assert_eq!(settings.prediction.currency, "INR");
        assert_eq!(settings.prediction.current_year, Some(2025));
        assert!(!settings.model.require_loaded);
        assert_eq!(settings.logging.level, "info");
    }

    #[test]
    fn test_log_level_parsing() {
        let mut logging = LoggingSettings::default();
        assert_eq!(logging.max_level().unwrap(), Level::INFO);

        logging.level = "DEBUG".to_string();
        assert_eq!(logging.max_level().unwrap(), Level::DEBUG);

        logging.level = "chatty".to_string();
        assert!(logging.max_level().is_err());
    }
}
