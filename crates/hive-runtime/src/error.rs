//! Runtime error types.

use hive_core::{BeeError, HiveError};
use thiserror::Error;

use crate::config::ConfigError;

/// Errors that can occur during runtime operations.
#[derive(Error, Debug)]
pub enum RuntimeError {
    /// Registry or validation error.
    #[error(transparent)]
    Hive(#[from] HiveError),

    /// Configuration could not be loaded.
    #[error(transparent)]
    Config(#[from] ConfigError),

    /// No running bee has this name.
    #[error("Bee not found: {0}")]
    BeeNotFound(String),

    /// A bee with this name is already running.
    #[error("Bee already exists: {0}")]
    BeeExists(String),

    /// A bee rejected an operation.
    #[error(transparent)]
    Bee(#[from] BeeError),
}

/// Result type for runtime operations.
pub type RuntimeResult<T> = Result<T, RuntimeError>;
