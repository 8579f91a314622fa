//! Session configuration

use serde::Deserialize;

/// Commands per bulk when nothing else is configured
pub const DEFAULT_BULK_SIZE: usize = 3;

/// Per-session batching settings
///
/// ```toml
/// [session]
/// bulk_size = 3
/// ```
#[derive(Debug, Clone, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct SessionConfig {
    /// Commands collected before a sized bulk is committed
    pub bulk_size: usize,
}

impl Default for SessionConfig {
    fn default() -> Self {
        Self {
            bulk_size: DEFAULT_BULK_SIZE,
        }
    }
}
