//! Philips Hue bee for the Hive automation engine.
//!
//! Exposes two actions in the `Philips Hue` namespace:
//!
//! | action     | parameters                                                  |
//! |------------|-------------------------------------------------------------|
//! | `switch`   | `light` (int, mandatory), `state` (bool, mandatory)         |
//! | `setcolor` | `light` (int, mandatory), `color`, `brightness`, `alert`    |
//!
//! and emits no events.
//!
//! ```rust,ignore
//! let mut registry = FactoryRegistry::new();
//! registry.register(Arc::new(HueBeeFactory::new()))?;
//! ```

pub mod bee;
pub mod bridge;
pub mod config;
pub mod factory;
pub mod light;

pub use bee::HueBee;
pub use bridge::{DryRunBridge, HueBridge};
pub use config::HueSettings;
pub use factory::{HUEBEE_ID, HueBeeFactory};
pub use light::{Alert, LightState};
