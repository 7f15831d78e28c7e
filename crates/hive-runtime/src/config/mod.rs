//! Configuration for the hive.
//!
//! Covers logging and the persisted list of bee instances. Files are layered
//! with figment; see [`loader`] for search order and environment overrides.

pub mod error;
pub mod loader;
pub mod schema;
pub mod validation;

pub use error::{ConfigError, ConfigResult};
pub use loader::{ConfigLoader, Profile, load_config, load_config_from_file};
pub use schema::{
    BeeConfig, HiveConfig, LogFormat, LogLevel, LogOutput, LogRotation, LoggingConfig,
    SpanEventConfig,
};
pub use validation::validate_config;
