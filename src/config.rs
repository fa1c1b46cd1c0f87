//! # Configuration
//!
//! TOML settings for the steganography shell. Every field has a default, so
//! an empty file (or no file) is a valid configuration.
//!
//! ```toml
//! [output]
//! path = "encryptedImage.png"
//!
//! [logging]
//! level = "info"
//! ```

use log::LevelFilter;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::PathBuf;

use crate::error::{Result, StegoError};
use crate::imaging::lossless_format_for;

/// Default file the hidden-message image is written to.
pub const DEFAULT_OUTPUT_PATH: &str = "encryptedImage.png";

/// Load a TOML configuration file and deserialize it into the specified type.
///
/// # Example
/// ```ignore
/// let config: StegoConfig = load_config("config/stego.toml")?;
/// ```
pub fn load_config<T>(path: &str) -> Result<T>
where
    T: for<'de> Deserialize<'de>,
{
    let content = fs::read_to_string(path)?;
    let config: T =
        toml::from_str(&content).map_err(|e| StegoError::Config(format!("{}: {}", path, e)))?;
    Ok(config)
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct StegoConfig {
    pub output: OutputConfig,
    pub logging: LoggingConfig,
}

/// Where hidden-message images are saved.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct OutputConfig {
    /// Fixed output path; its extension must name a lossless format
    pub path: PathBuf,
}

impl Default for OutputConfig {
    fn default() -> Self {
        Self {
            path: PathBuf::from(DEFAULT_OUTPUT_PATH),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct LoggingConfig {
    /// One of `off`, `error`, `warn`, `info`, `debug`, `trace`
    pub level: String,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: "info".to_string(),
        }
    }
}

impl LoggingConfig {
    pub fn level_filter(&self) -> Result<LevelFilter> {
        self.level
            .parse()
            .map_err(|_| StegoError::Config(format!("unknown log level '{}'", self.level)))
    }
}

impl StegoConfig {
    pub fn from_file(path: &str) -> Result<Self> {
        let config: StegoConfig = load_config(path)?;
        config.validate()?;
        Ok(config)
    }

    /// Reject settings that could only fail later.
    pub fn validate(&self) -> Result<()> {
        lossless_format_for(&self.output.path)?;
        self.logging.level_filter()?;
        Ok(())
    }
}
