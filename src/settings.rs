use config::{Config, ConfigError, File, FileFormat};
use serde::Deserialize;
use tracing::{error, info};

const DEFAULT_CONFIG_PATH: &str = "config/default.toml";
const CONFIG_PATH_ENV: &str = "KINEFIT_CONFIG";

/// Reference acceleration run, used when no configuration overrides it.
const REFERENCE_TIMES: [f64; 6] = [0.0, 0.1, 0.2, 0.3, 0.4, 0.5];
const REFERENCE_VALUES: [f64; 6] = [2.704, 2.755, 2.646, 1.721, 0.640, 0.379];
const REFERENCE_DEGREE: usize = 3;

/// Startup settings for the fit.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default)]
pub struct Settings {
    /// Degree of the fitted acceleration polynomial.
    pub degree: usize,
    pub samples: Samples,
}

/// Raw `(time, acceleration)` samples as read from configuration.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default)]
pub struct Samples {
    pub times: Vec<f64>,
    pub values: Vec<f64>,
}

impl Default for Settings {
    fn default() -> Self {
        Settings {
            degree: REFERENCE_DEGREE,
            samples: Samples::default(),
        }
    }
}

impl Default for Samples {
    fn default() -> Self {
        Samples {
            times: REFERENCE_TIMES.to_vec(),
            values: REFERENCE_VALUES.to_vec(),
        }
    }
}

/// Path of the configuration file, `$KINEFIT_CONFIG` or `config/default.toml`.
pub fn config_path() -> String {
    std::env::var(CONFIG_PATH_ENV).unwrap_or_else(|_| DEFAULT_CONFIG_PATH.to_string())
}

/// Loads settings from the TOML file at `path`.
///
/// A missing file is not an error; every field falls back to the reference run.
pub fn load_settings(path: &str) -> Result<Settings, ConfigError> {
    info!("Attempting to load configuration from {}", path);

    let settings = Config::builder()
        .add_source(File::new(path, FileFormat::Toml).required(false))
        .build()
        .and_then(|config| config.try_deserialize::<Settings>());

    match settings {
        Ok(settings) => {
            info!(?settings, "Successfully loaded configuration");
            Ok(settings)
        }
        Err(e) => {
            error!("Failed to load configuration: {}", e);
            Err(e)
        }
    }
}

#[cfg(test)]
fn parse_settings(source: &str) -> Result<Settings, ConfigError> {
    Config::builder()
        .add_source(File::from_str(source, FileFormat::Toml))
        .build()?
        .try_deserialize()
}
