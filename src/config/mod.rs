//! Configuration module for moodle-fetch.
//!
//! This module handles:
//! - Loading configuration from TOML files
//! - Worker pool mode settings
//! - Configuration validation

pub mod loader;
pub mod modes;
pub mod validation;

pub use loader::{AuthConfig, Config, OptionsConfig, DEFAULT_DOWNLOAD_DIRECTORY};
pub use modes::{PoolModeSetting, PoolScopeSetting};
pub use validation::validate_config;
