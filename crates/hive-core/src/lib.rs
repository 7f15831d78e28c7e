//! # Hive Core
//!
//! The descriptor model and factory registry of the Hive automation engine.
//!
//! A *bee* is a self-describing integration unit.  Each bee kind is described
//! by a [`BeeFactory`], which reports:
//!
//! - identity: [`id`](BeeFactory::id), display name, description, logo color
//!   and image,
//! - schema: [`OptionDescriptor`]s for configuration, [`EventDescriptor`]s for
//!   what the bee emits and [`ActionDescriptor`]s for what it executes,
//!
//! and builds configured [`Bee`] instances through
//! [`new_bee`](BeeFactory::new_bee).
//!
//! ```text
//! ┌──────────────┐ register ┌─────────────────┐ lookup  ┌──────────┐
//! │  start-up    │─────────▶│ FactoryRegistry │◀────────│   Hive   │
//! │  routine     │          │  id → factory   │         │  (host)  │
//! └──────────────┘          └─────────────────┘         └────┬─────┘
//!                                                            │ new_bee / reload / action
//!                                                            ▼
//!                                                        ┌────────┐
//!                                                        │  Bee   │──▶ events
//!                                                        └────────┘
//! ```
//!
//! Values are checked by the host with the functions in [`validation`]
//! before they reach a bee.

pub mod bee;
pub mod descriptor;
pub mod error;
pub mod event;
pub mod factory;
pub mod registry;
pub mod validation;
pub mod value;

pub use bee::{Bee, BeeBase, BoxedBee};
pub use descriptor::{
    ActionDescriptor, EventDescriptor, OptionDescriptor, PlaceholderDescriptor, ValueType,
};
pub use error::{BeeError, BeeResult, HiveError, HiveResult, SchemaError, SchemaViolation};
pub use event::{Action, Event, EventSink};
pub use factory::{BeeFactory, BoxedFactory, FactoryInfo};
pub use registry::FactoryRegistry;
pub use validation::{validate_action, validate_event, validate_options, validate_placeholders};
pub use value::{BeeOption, BeeOptions, Placeholder, Placeholders};

/// Prelude for bee implementations.
pub mod prelude {
    pub use super::{
        Action, ActionDescriptor, Bee, BeeBase, BeeError, BeeFactory, BeeOptions, BeeResult,
        BoxedBee, Event, EventDescriptor, EventSink, OptionDescriptor, PlaceholderDescriptor,
        Placeholders, ValueType,
    };
}
