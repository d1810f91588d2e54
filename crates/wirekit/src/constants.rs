//! Infrastructure layer constants
//!
//! Domain-specific constants are defined in `wirekit_domain::constants`.

// ============================================================================
// CONFIGURATION CONSTANTS
// ============================================================================

/// Default configuration file name
pub const DEFAULT_CONFIG_FILENAME: &str = "wirekit.toml";

/// Default configuration directory name
pub const DEFAULT_CONFIG_DIR: &str = "wirekit";

/// Environment variable prefix for configuration (nested keys split on `__`)
pub const CONFIG_ENV_PREFIX: &str = "WIREKIT__";

/// Separator for nested keys in environment variables
pub const CONFIG_ENV_SEPARATOR: &str = "__";

// ============================================================================
// LOGGING CONSTANTS
// ============================================================================

/// Default log level
pub const DEFAULT_LOG_LEVEL: &str = "info";

/// Environment variable overriding the log filter
pub const LOG_FILTER_ENV: &str = "WIREKIT_LOG";

/// Default log file stem when file output is enabled
pub const DEFAULT_LOG_FILE_STEM: &str = "wirekit";

// ============================================================================
// RESOLUTION CONSTANTS
// ============================================================================

pub use wirekit_domain::constants::DEFAULT_MAX_BUILD_DEPTH;
