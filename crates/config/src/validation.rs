//! Configuration validation
//!
//! Serde covers shape and types; this covers ranges:
//! - `session.bulk_size` is at least 1
//! - `sinks.file.path` is not empty

use crate::Config;
use crate::error::{ConfigError, Result};

/// Validate the entire configuration
pub fn validate_config(config: &Config) -> Result<()> {
    validate_session(config)?;
    validate_sinks(config)?;
    Ok(())
}

fn validate_session(config: &Config) -> Result<()> {
    if config.session.bulk_size == 0 {
        return Err(ConfigError::invalid_value(
            "session",
            "bulk_size",
            "must be at least 1",
        ));
    }
    Ok(())
}

fn validate_sinks(config: &Config) -> Result<()> {
    if config.sinks.file.path.as_os_str().is_empty() {
        return Err(ConfigError::invalid_value(
            "sinks.file",
            "path",
            "must not be empty",
        ));
    }
    Ok(())
}
