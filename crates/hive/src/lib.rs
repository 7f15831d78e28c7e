//! # Hive
//!
//! An automation engine built from self-describing integration units called
//! *bees*.
//!
//! ## Architecture
//!
//! ```text
//! ┌───────────────────┐ register ┌─────────────────┐
//! │ builtin_factories │─────────▶│ FactoryRegistry │
//! └───────────────────┘          └────────┬────────┘
//!                                         │ lookup / new_bee
//!                ┌────────────────────────▼───────────────────────┐
//!                │ Hive (instances, action dispatch, event intake) │
//!                └──────┬──────────────────────────────▲──────────┘
//!                       │ action                       │ events
//!                       ▼                              │
//!                    ┌──────┐                       ┌──────┐
//!                    │ Bee  │ ...                   │ Bee  │
//!                    └──────┘                       └──────┘
//! ```
//!
//! - **Factories** describe one kind of bee: identity, option schema, the
//!   events it emits and the actions it executes.
//! - **Bees** are configured instances built by a factory.
//! - **The hive** owns the registry and the bees, validates every value
//!   against the descriptors before a bee sees it, and routes actions and
//!   events.
//!
//! ## Quick Start
//!
//! ```rust,ignore
//! use hive::prelude::*;
//!
//! #[tokio::main]
//! async fn main() -> anyhow::Result<()> {
//!     let hive = Hive::builder()
//!         .factories(hive::builtin_factories())
//!         .config_file("hive.toml")
//!         .build()?;
//!
//!     hive.run().await?;
//!     Ok(())
//! }
//! ```
//!
//! ## Features
//!
//! - `huebee`: Philips Hue bee (default)
//! - `toml-config`: TOML configuration files (default)
//! - `yaml-config`: YAML configuration files
//! - `json-log`: JSON log format

pub use hive_core as core;
pub use hive_runtime as runtime;

/// Built-in bees.
pub mod bees {
    #[cfg(feature = "huebee")]
    pub use hive_bee_hue as hue;
}

use hive_core::BoxedFactory;

/// Constructs every built-in factory enabled by cargo features.
///
/// Hand the result to [`HiveBuilder::factories`](hive_runtime::HiveBuilder::factories)
/// or [`FactoryRegistry::register_all`](hive_core::FactoryRegistry::register_all).
#[allow(unused_mut)]
pub fn builtin_factories() -> Vec<BoxedFactory> {
    let mut factories: Vec<BoxedFactory> = Vec::new();

    #[cfg(feature = "huebee")]
    factories.push(std::sync::Arc::new(hive_bee_hue::HueBeeFactory::new()));

    factories
}

/// Prelude module for convenient imports.
///
/// ```rust,ignore
/// use hive::prelude::*;
/// ```
pub mod prelude {
    // Host
    pub use hive_runtime::{BeeConfig, Hive, HiveBuilder, HiveConfig, RuntimeError};

    // Writing bees
    pub use hive_core::prelude::*;
    pub use hive_core::{BoxedFactory, FactoryInfo, FactoryRegistry, Placeholder};

    pub use super::builtin_factories;
}

#[cfg(test)]
mod tests {
    use hive_core::BeeFactory;

    use super::*;

    #[cfg(feature = "huebee")]
    #[test]
    fn test_builtin_factories() {
        let ids: Vec<_> = builtin_factories()
            .iter()
            .map(|f| f.id().to_string())
            .collect();
        assert_eq!(ids, ["huebee"]);
    }

    #[test]
    fn test_builtin_factories_register_cleanly() {
        let mut registry = hive_core::FactoryRegistry::new();
        registry.register_all(builtin_factories()).unwrap();
        assert_eq!(registry.len(), builtin_factories().len());
    }
}
