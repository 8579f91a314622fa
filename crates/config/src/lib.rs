//! Bulk Configuration
//!
//! TOML-based configuration loading with defaults for every field. An empty
//! file is a valid configuration.
//!
//! # Parsing
//!
//! Use the `FromStr` trait to parse configuration:
//!
//! ```
//! use bulk_config::Config;
//! use std::str::FromStr;
//!
//! let config = Config::from_str("[session]\nbulk_size = 5").unwrap();
//! assert_eq!(config.session.bulk_size, 5);
//! ```
//!
//! # Example Full Config
//!
//! ```toml
//! [log]
//! level = "debug"
//!
//! [session]
//! bulk_size = 3
//!
//! [sinks.console]
//! color = true
//!
//! [sinks.file]
//! path = "logs/"
//! ```

mod error;
mod logging;
mod session;
mod sinks;
mod validation;

use std::fs;
use std::path::Path;
use std::str::FromStr;

pub use error::{ConfigError, Result};
pub use logging::{LogConfig, LogLevel};
pub use session::{DEFAULT_BULK_SIZE, SessionConfig};
pub use sinks::{ConsoleSinkConfig, FileSinkConfig, SinksConfig};

use serde::Deserialize;

/// Main configuration structure
///
/// All sections are optional with sensible defaults.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct Config {
    /// Logging configuration
    pub log: LogConfig,

    /// Batching settings applied to every session
    pub session: SessionConfig,

    /// Console and dual-file sink settings
    pub sinks: SinksConfig,
}

impl Config {
    /// Load configuration from a TOML file
    ///
    /// # Errors
    ///
    /// Returns error if file cannot be read, contains invalid TOML, or fails
    /// validation.
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        let contents = fs::read_to_string(path).map_err(|e| ConfigError::IoError {
            path: path.display().to_string(),
            source: e,
        })?;

        Self::from_str(&contents)
    }

    fn parse(s: &str) -> Result<Self> {
        let config: Config = toml::from_str(s).map_err(ConfigError::ParseError)?;
        config.validate()?;
        Ok(config)
    }

    fn validate(&self) -> Result<()> {
        validation::validate_config(self)
    }
}

impl FromStr for Config {
    type Err = ConfigError;

    fn from_str(s: &str) -> Result<Self> {
        Self::parse(s)
    }
}
