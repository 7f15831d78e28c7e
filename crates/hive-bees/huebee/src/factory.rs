//! Factory for Hue bees.

use std::sync::Arc;

use hive_core::{
    ActionDescriptor, BeeFactory, BeeOptions, BeeResult, BoxedBee, OptionDescriptor,
    PlaceholderDescriptor, ValueType,
};

use crate::bee::HueBee;
use crate::bridge::{DryRunBridge, HueBridge};

/// Factory identifier, persisted in user configuration.
pub const HUEBEE_ID: &str = "huebee";

/// Describes and builds [`HueBee`]s.
///
/// The bridge client is shared by every bee the factory builds; it carries
/// no per-user state (address and key live in each bee's settings).
#[derive(Clone)]
pub struct HueBeeFactory {
    bridge: Arc<dyn HueBridge>,
}

impl HueBeeFactory {
    /// Creates a factory whose bees only log their requests.
    pub fn new() -> Self {
        Self::with_bridge(Arc::new(DryRunBridge))
    }

    /// Creates a factory whose bees deliver requests through `bridge`.
    pub fn with_bridge(bridge: Arc<dyn HueBridge>) -> Self {
        Self { bridge }
    }
}

impl Default for HueBeeFactory {
    fn default() -> Self {
        Self::new()
    }
}

impl BeeFactory for HueBeeFactory {
    fn id(&self) -> &str {
        HUEBEE_ID
    }

    fn name(&self) -> &str {
        "Philips Hue"
    }

    fn description(&self) -> &str {
        "Controls Philips Hue lighting systems"
    }

    fn logo_color(&self) -> &str {
        "#212727"
    }

    fn options(&self) -> Vec<OptionDescriptor> {
        vec![
            OptionDescriptor::new(
                "address",
                "Address of the Hue bridge, eg: 192.168.0.1",
                ValueType::Address,
            )
            .mandatory(),
            OptionDescriptor::new("key", "Key used for auth with the bridge", ValueType::String)
                .mandatory(),
        ]
    }

    fn actions(&self) -> Vec<ActionDescriptor> {
        let light = PlaceholderDescriptor::new(
            "light",
            "ID of the light you want to switch on or off",
            ValueType::Int,
        )
        .mandatory();

        vec![
            ActionDescriptor::new(self.name(), "switch", "Switches on/off a Hue light")
                .placeholder(light.clone())
                .placeholder(
                    PlaceholderDescriptor::new(
                        "state",
                        "New state of the light, true for turning it on",
                        ValueType::Bool,
                    )
                    .mandatory(),
                ),
            ActionDescriptor::new(self.name(), "setcolor", "Changes the color of a Hue light")
                .placeholder(light)
                .placeholder(PlaceholderDescriptor::new(
                    "color",
                    "New color of the light you want to change",
                    ValueType::String,
                ))
                .placeholder(PlaceholderDescriptor::new(
                    "brightness",
                    "New brightness of the light you want to change",
                    ValueType::Int,
                ))
                .placeholder(PlaceholderDescriptor::new(
                    "alert",
                    "0: no alert, 1: short alert, 2: long alert",
                    ValueType::Int,
                )),
        ]
    }

    fn new_bee(&self, name: &str, description: &str, options: BeeOptions) -> BeeResult<BoxedBee> {
        let bee = HueBee::new(name, self.id(), description, options, Arc::clone(&self.bridge))?;
        Ok(Arc::new(bee))
    }
}
