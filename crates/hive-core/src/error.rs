//! Unified error types for the Hive core.
//!
//! Structural problems (duplicate factories, malformed descriptors) are
//! reported through [`HiveError`] and are meant to abort start-up.  Problems
//! local to a single bee (bad options, unknown actions, bridge failures) are
//! reported through [`BeeError`] and never take the process down.

use std::fmt;

use thiserror::Error;

// =============================================================================
// Schema Violations
// =============================================================================

/// One way a value map can disagree with its descriptors.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SchemaViolation {
    /// A mandatory value is absent (or `null`).
    Missing {
        /// Name of the missing option or placeholder.
        name: String,
    },

    /// A value does not match its declared type.
    WrongType {
        /// Name of the offending option or placeholder.
        name: String,
        /// Declared type tag.
        expected: &'static str,
    },

    /// A value was supplied that no descriptor declares.
    Unknown {
        /// Name of the undeclared option or placeholder.
        name: String,
    },
}

impl SchemaViolation {
    /// Returns the name of the value this violation refers to.
    pub fn name(&self) -> &str {
        match self {
            Self::Missing { name } | Self::WrongType { name, .. } | Self::Unknown { name } => name,
        }
    }
}

impl fmt::Display for SchemaViolation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Missing { name } => write!(f, "'{name}' is mandatory but missing"),
            Self::WrongType { name, expected } => {
                write!(f, "'{name}' must be of type '{expected}'")
            }
            Self::Unknown { name } => write!(f, "'{name}' is not declared"),
        }
    }
}

/// A set of [`SchemaViolation`]s found while validating one value map.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("{context}: {}", join_violations(.violations))]
pub struct SchemaError {
    /// What was being validated (e.g. `options of 'huebee'`).
    pub context: String,
    /// Every violation, in descriptor declaration order.
    pub violations: Vec<SchemaViolation>,
}

impl SchemaError {
    /// Returns `true` if `name` is reported as missing.
    pub fn is_missing(&self, name: &str) -> bool {
        self.violations
            .iter()
            .any(|v| matches!(v, SchemaViolation::Missing { name: n } if n == name))
    }
}

fn join_violations(violations: &[SchemaViolation]) -> String {
    violations
        .iter()
        .map(ToString::to_string)
        .collect::<Vec<_>>()
        .join(", ")
}

// =============================================================================
// Bee Errors
// =============================================================================

/// Errors raised by a single bee instance.
#[derive(Debug, Clone, Error)]
pub enum BeeError {
    /// An option is present but cannot be used.
    #[error("invalid option '{name}': {reason}")]
    InvalidOption {
        /// Option name.
        name: String,
        /// Reason for rejection.
        reason: String,
    },

    /// A required option is absent.
    #[error("missing option '{0}'")]
    MissingOption(String),

    /// The bee does not implement the requested action.
    #[error("unknown action '{0}'")]
    UnknownAction(String),

    /// An action or event parameter cannot be used.
    #[error("invalid placeholder '{name}': {reason}")]
    InvalidPlaceholder {
        /// Placeholder name.
        name: String,
        /// Reason for rejection.
        reason: String,
    },

    /// The device collaborator failed.
    #[error("bridge error: {0}")]
    Bridge(String),

    /// The host stopped listening for events.
    #[error("event channel closed")]
    EventChannelClosed,

    /// Internal bee error.
    #[error("bee error: {0}")]
    Internal(String),
}

impl BeeError {
    /// Creates an invalid option error.
    pub fn invalid_option(name: impl Into<String>, reason: impl Into<String>) -> Self {
        Self::InvalidOption {
            name: name.into(),
            reason: reason.into(),
        }
    }

    /// Creates an invalid placeholder error.
    pub fn invalid_placeholder(name: impl Into<String>, reason: impl Into<String>) -> Self {
        Self::InvalidPlaceholder {
            name: name.into(),
            reason: reason.into(),
        }
    }
}

// =============================================================================
// Hive Errors
// =============================================================================

/// Errors raised by the registry and the host-facing core API.
#[derive(Debug, Clone, Error)]
pub enum HiveError {
    /// A factory with the same identifier is already registered.
    #[error("factory '{0}' is already registered")]
    DuplicateFactory(String),

    /// An action `(namespace, name)` pair is already claimed by another factory.
    #[error("action '{namespace}/{name}' of factory '{factory}' is already provided by '{owner}'")]
    DuplicateAction {
        /// Action namespace.
        namespace: String,
        /// Action name.
        name: String,
        /// Factory attempting the registration.
        factory: String,
        /// Factory that already owns the action.
        owner: String,
    },

    /// A factory's descriptors are structurally malformed.
    #[error("invalid descriptor in factory '{factory}': {reason}")]
    InvalidDescriptor {
        /// Offending factory identifier.
        factory: String,
        /// What is wrong.
        reason: String,
    },

    /// No factory is registered under the identifier.
    #[error("factory '{0}' not found")]
    FactoryNotFound(String),

    /// A value map failed validation against its descriptors.
    #[error(transparent)]
    Schema(#[from] SchemaError),

    /// A bee reported an error.
    #[error(transparent)]
    Bee(#[from] BeeError),
}

impl HiveError {
    /// Creates an invalid descriptor error.
    pub fn invalid_descriptor(factory: impl Into<String>, reason: impl Into<String>) -> Self {
        Self::InvalidDescriptor {
            factory: factory.into(),
            reason: reason.into(),
        }
    }
}

// =============================================================================
// Result Type Aliases
// =============================================================================

/// Result type for registry and host-facing operations.
pub type HiveResult<T> = Result<T, HiveError>;

/// Result type for bee operations.
pub type BeeResult<T> = Result<T, BeeError>;
