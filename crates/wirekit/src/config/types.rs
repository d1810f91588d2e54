//! Configuration types

use std::path::PathBuf;

use serde::{Deserialize, Serialize};

use crate::constants::{DEFAULT_LOG_LEVEL, DEFAULT_MAX_BUILD_DEPTH};

/// Top-level configuration
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct ContainerConfig {
    /// Resolution engine settings
    pub resolution: ResolutionSettings,

    /// Logging settings
    pub logging: LoggingConfig,
}

/// Resolution engine settings
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ResolutionSettings {
    /// Maximum number of nested resolutions in one call chain
    pub max_build_depth: usize,

    /// Fail fast when a concrete is requested while already under construction
    pub detect_circular: bool,
}

impl Default for ResolutionSettings {
    fn default() -> Self {
        Self {
            max_build_depth: DEFAULT_MAX_BUILD_DEPTH,
            detect_circular: true,
        }
    }
}

/// Logging configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct LoggingConfig {
    /// Log level (trace, debug, info, warn, error)
    pub level: String,

    /// Enable JSON output format
    pub json_format: bool,

    /// Log to a daily rolling file in addition to stdout
    pub file_output: Option<PathBuf>,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: DEFAULT_LOG_LEVEL.to_string(),
            json_format: false,
            file_output: None,
        }
    }
}
