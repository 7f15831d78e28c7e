//! The bee factory abstraction.
//!
//! A factory is the static, stateless handle to one bee kind.  It reports
//! identity and descriptors, and builds configured bees on demand.
//!
//! ```rust,ignore
//! struct EchoFactory;
//!
//! impl BeeFactory for EchoFactory {
//!     fn id(&self) -> &str { "echobee" }
//!     fn name(&self) -> &str { "Echo" }
//!     fn description(&self) -> &str { "Echoes every action back" }
//!     fn logo_color(&self) -> &str { "#336699" }
//!
//!     fn new_bee(&self, name: &str, description: &str, options: BeeOptions) -> BeeResult<BoxedBee> {
//!         Ok(Arc::new(EchoBee::new(name, self.id(), description, options)?))
//!     }
//! }
//! ```

use std::sync::Arc;

use serde::{Deserialize, Serialize};

use crate::bee::BoxedBee;
use crate::descriptor::{ActionDescriptor, EventDescriptor, OptionDescriptor};
use crate::error::BeeResult;
use crate::value::BeeOptions;

/// Describes one bee kind and builds its instances.
///
/// Implementations hold no per-user state; all of it lives in the bees they
/// create.  [`id`](BeeFactory::id) is persisted in user configuration and
/// must never change once a bee kind ships.
pub trait BeeFactory: Send + Sync {
    /// Globally unique identifier, used as the registry key.
    fn id(&self) -> &str;

    /// Display name.
    fn name(&self) -> &str;

    fn description(&self) -> &str;

    /// Preferred logo background color for the admin interface, e.g. `#212727`.
    fn logo_color(&self) -> &str;

    /// Image file name, derived from the identifier.
    fn image(&self) -> String {
        format!("{}.png", self.id())
    }

    /// Options needed to configure a bee of this kind.
    fn options(&self) -> Vec<OptionDescriptor> {
        Vec::new()
    }

    /// Events bees of this kind can emit.
    fn events(&self) -> Vec<EventDescriptor> {
        Vec::new()
    }

    /// Actions bees of this kind can execute.
    fn actions(&self) -> Vec<ActionDescriptor> {
        Vec::new()
    }

    /// Builds a bee and applies `options` to it before returning.
    ///
    /// `options` is expected to have been validated against
    /// [`options`](BeeFactory::options) by the caller.
    fn new_bee(&self, name: &str, description: &str, options: BeeOptions) -> BeeResult<BoxedBee>;
}

/// A shared factory trait object.
pub type BoxedFactory = Arc<dyn BeeFactory>;

/// Serialisable snapshot of a factory, as presented to an admin interface.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FactoryInfo {
    pub id: String,
    pub name: String,
    pub description: String,
    pub image: String,
    #[serde(rename = "logocolor")]
    pub logo_color: String,
    pub options: Vec<OptionDescriptor>,
    pub events: Vec<EventDescriptor>,
    pub actions: Vec<ActionDescriptor>,
}

impl FactoryInfo {
    /// Captures the metadata and descriptors of `factory`.
    pub fn from_factory(factory: &dyn BeeFactory) -> Self {
        Self {
            id: factory.id().to_string(),
            name: factory.name().to_string(),
            description: factory.description().to_string(),
            image: factory.image(),
            logo_color: factory.logo_color().to_string(),
            options: factory.options(),
            events: factory.events(),
            actions: factory.actions(),
        }
    }
}
