//! CLI command implementations
//!
//! This module contains all CLI command implementations. Commands return the
//! process exit code: 0 success, 2 configuration, 3 credentials unavailable,
//! 4 authentication, 5 fetch or other failure.

pub mod init;
pub mod key;
pub mod report;
pub mod sanitize;
pub mod validate;

use crate::config::{load_config, AegisConfig};
use crate::domain::Result;
use std::path::Path;

/// Load the configuration file, or build one from the environment when the
/// file does not exist
pub(crate) fn load_or_env(config_path: &str) -> Result<AegisConfig> {
    if Path::new(config_path).exists() {
        load_config(config_path)
    } else {
        tracing::debug!(
            config_path = %config_path,
            "Configuration file not found, using defaults and environment"
        );
        AegisConfig::from_env()
    }
}
