//! Configuration schema definitions.

use std::collections::BTreeMap;
use std::path::PathBuf;

use hive_core::BeeOptions;
use serde::{Deserialize, Serialize};

/// Root configuration structure.
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct HiveConfig {
    /// Logging settings.
    #[serde(default)]
    pub logging: LoggingConfig,

    /// Persisted bee instances.
    #[serde(default)]
    pub bees: Vec<BeeConfig>,
}

impl HiveConfig {
    /// Returns the configuration of the bee called `name`.
    pub fn bee(&self, name: &str) -> Option<&BeeConfig> {
        self.bees.iter().find(|b| b.name == name)
    }
}

// =============================================================================
// Bees
// =============================================================================

/// Persisted configuration of one bee instance.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BeeConfig {
    /// Unique instance name.
    pub name: String,

    /// Identifier of the factory that builds this bee (e.g. `huebee`).
    pub class: String,

    /// Free-text description.
    #[serde(default)]
    pub description: String,

    /// Whether the bee is started with the hive.
    #[serde(default = "default_enabled")]
    pub enabled: bool,

    /// Option values, validated against the factory's option descriptors.
    #[serde(default)]
    pub options: BeeOptions,
}

impl BeeConfig {
    /// Creates an enabled bee configuration.
    pub fn new(name: impl Into<String>, class: impl Into<String>, options: BeeOptions) -> Self {
        Self {
            name: name.into(),
            class: class.into(),
            description: String::new(),
            enabled: true,
            options,
        }
    }

    /// Sets the description.
    pub fn description(mut self, description: impl Into<String>) -> Self {
        self.description = description.into();
        self
    }
}

fn default_enabled() -> bool {
    true
}

// =============================================================================
// Logging
// =============================================================================

/// Log verbosity.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LogLevel {
    Trace,
    Debug,
    #[default]
    Info,
    Warn,
    Error,
}

impl LogLevel {
    /// Returns the level as a lowercase filter string.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Trace => "trace",
            Self::Debug => "debug",
            Self::Info => "info",
            Self::Warn => "warn",
            Self::Error => "error",
        }
    }

    /// Converts to the equivalent `tracing` level.
    pub fn to_tracing_level(self) -> tracing::Level {
        match self {
            Self::Trace => tracing::Level::TRACE,
            Self::Debug => tracing::Level::DEBUG,
            Self::Info => tracing::Level::INFO,
            Self::Warn => tracing::Level::WARN,
            Self::Error => tracing::Level::ERROR,
        }
    }
}

impl std::fmt::Display for LogLevel {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Log line format.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LogFormat {
    #[default]
    Compact,
    Full,
    Pretty,
    /// Requires the `json-log` feature.
    Json,
}

/// Log destination.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LogOutput {
    #[default]
    Stdout,
    Stderr,
    File,
}

/// When a log file is rolled over.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LogRotation {
    #[default]
    Never,
    Hourly,
    Daily,
}

/// Which span lifecycle events are logged.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct SpanEventConfig {
    pub new: bool,
    pub enter: bool,
    pub exit: bool,
    pub close: bool,
}

/// Logging configuration.
///
/// ```toml
/// [logging]
/// level = "debug"
/// format = "pretty"
/// output = "file"
/// file_path = "logs/hive.log"
/// rotation = "daily"
///
/// [logging.filters]
/// hive_bee_hue = "trace"
/// ```
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct LoggingConfig {
    /// Global log level; `RUST_LOG` takes precedence.
    pub level: LogLevel,
    pub format: LogFormat,
    pub output: LogOutput,
    pub span_events: SpanEventConfig,
    /// Include thread IDs.
    pub thread_ids: bool,
    /// Include source file and line.
    pub file_location: bool,
    /// Log file, required when `output = "file"`.
    pub file_path: Option<PathBuf>,
    pub rotation: LogRotation,
    /// Per-module levels, e.g. `hive_runtime = "debug"`.
    pub filters: BTreeMap<String, LogLevel>,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: LogLevel::Info,
            format: LogFormat::Compact,
            output: LogOutput::Stdout,
            span_events: SpanEventConfig::default(),
            thread_ids: false,
            file_location: false,
            file_path: None,
            rotation: LogRotation::Never,
            filters: BTreeMap::new(),
        }
    }
}
