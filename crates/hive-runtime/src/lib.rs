//! Hive Runtime - host side of the Hive automation engine.
//!
//! This crate provides:
//! - The [`Hive`] host: factory registration at start-up, bee lifecycle,
//!   action dispatch and event intake
//! - Layered configuration loading (`hive.toml` / `hive.yaml`, `HIVE_*`)
//! - Logging configuration
//!
//! ```ignore
//! use hive_runtime::Hive;
//!
//! #[tokio::main]
//! async fn main() -> anyhow::Result<()> {
//!     let hive = Hive::builder()
//!         .factory(Arc::new(HueBeeFactory::new()))
//!         .config_file("hive.toml")
//!         .build()?;
//!
//!     // Run until Ctrl+C
//!     hive.run().await?;
//!     Ok(())
//! }
//! ```

pub mod config;
pub mod error;
pub mod hive;
pub mod logging;

// Re-exports
pub use config::{BeeConfig, ConfigError, ConfigLoader, ConfigResult, HiveConfig, LoggingConfig};
pub use error::{RuntimeError, RuntimeResult};
pub use hive::{EventHandler, Hive, HiveBuilder};
pub use logging::{LoggingBuilder, SpanEvents};

// Re-export tracing for use by other crates
pub use tracing;
pub use tracing_subscriber;

/// Prelude module for convenient imports.
///
/// Provides the commonly used logging macros and the `instrument` attribute.
pub mod prelude {
    pub use tracing::{Level, debug, error, info, instrument, span, trace, warn};
}
