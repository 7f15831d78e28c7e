//! Configuration validation utilities.
//!
//! These checks cover the shape of the configuration file itself.  Whether a
//! bee's options satisfy its factory is checked later, when the hive starts
//! the bee, because that needs the factory registry.

use std::collections::HashSet;

use super::error::{ConfigError, ConfigResult};
use super::schema::{BeeConfig, HiveConfig, LogOutput, LoggingConfig};

/// Validates the entire configuration.
pub fn validate_config(config: &HiveConfig) -> ConfigResult<()> {
    validate_logging_config(&config.logging)?;
    validate_bees_config(&config.bees)?;
    Ok(())
}

/// Validates logging settings.
fn validate_logging_config(logging: &LoggingConfig) -> ConfigResult<()> {
    if logging.output == LogOutput::File && logging.file_path.is_none() {
        return Err(ConfigError::missing_field("logging.file_path"));
    }

    if logging.filters.keys().any(|module| module.trim().is_empty()) {
        return Err(ConfigError::validation(
            "Logging filter module names cannot be empty",
        ));
    }

    Ok(())
}

/// Validates all bee configurations.
fn validate_bees_config(bees: &[BeeConfig]) -> ConfigResult<()> {
    let mut seen_names = HashSet::new();

    for bee in bees {
        validate_bee_config(bee)?;

        if !seen_names.insert(&bee.name) {
            return Err(ConfigError::DuplicateBeeName(bee.name.clone()));
        }
    }

    Ok(())
}

/// Validates a single bee configuration.
fn validate_bee_config(bee: &BeeConfig) -> ConfigResult<()> {
    if bee.name.is_empty() {
        return Err(ConfigError::missing_field("bees.name"));
    }

    if bee.name.contains(char::is_whitespace) {
        return Err(ConfigError::validation(format!(
            "Bee name '{}' cannot contain whitespace",
            bee.name
        )));
    }

    if bee.class.is_empty() {
        return Err(ConfigError::missing_field(format!("bees.{}.class", bee.name)));
    }

    let mut seen_options = HashSet::new();
    for name in bee.options.names() {
        if !seen_options.insert(name) {
            return Err(ConfigError::validation(format!(
                "Bee '{}' sets option '{}' more than once",
                bee.name, name
            )));
        }
    }

    Ok(())
}
