//! Sink configuration
//!
//! Each session always gets the same three sinks; these sections only tune
//! them.
//!
//! ```toml
//! [sinks.console]
//! color = false
//!
//! [sinks.file]
//! path = "logs/"
//! ```

use std::path::PathBuf;

use serde::Deserialize;

/// All sink sections
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct SinksConfig {
    /// Console sink settings
    pub console: ConsoleSinkConfig,

    /// Dual-file sink settings
    pub file: FileSinkConfig,
}

/// Console sink settings
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct ConsoleSinkConfig {
    /// Highlight the `bulk:` prefix
    /// Default: false
    pub color: bool,
}

/// Dual-file sink settings
#[derive(Debug, Clone, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct FileSinkConfig {
    /// Directory receiving `bulk_*.log` files
    /// Default: current directory
    pub path: PathBuf,
}

impl Default for FileSinkConfig {
    fn default() -> Self {
        Self {
            path: PathBuf::from("."),
        }
    }
}
