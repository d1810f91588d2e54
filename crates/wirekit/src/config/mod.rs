//! Configuration
//!
//! Container settings and logging settings, loaded through Figment from
//! defaults, an optional TOML file and `WIREKIT__` environment variables.

pub mod loader;
pub mod types;

pub use loader::ConfigLoader;
pub use types::{ContainerConfig, LoggingConfig, ResolutionSettings};
