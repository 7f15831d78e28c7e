//! Registers the Hue factory, builds a bee from configuration and drives it
//! through the hive.

#![cfg(feature = "huebee")]

use std::sync::Arc;

use async_trait::async_trait;
use hive::bees::hue::{HueBeeFactory, HueBridge, HueSettings, LightState};
use hive::core::{HiveError, validate_options};
use hive::prelude::*;
use parking_lot::Mutex;

#[derive(Default)]
struct RecordingBridge {
    sent: Mutex<Vec<(String, u32, LightState)>>,
}

#[async_trait]
impl HueBridge for RecordingBridge {
    async fn set_light_state(
        &self,
        target: &HueSettings,
        light: u32,
        state: &LightState,
    ) -> BeeResult<()> {
        self.sent
            .lock()
            .push((target.address.clone(), light, state.clone()));
        Ok(())
    }
}

fn bridge_options() -> BeeOptions {
    BeeOptions::new()
        .with("address", "192.168.0.1")
        .with("key", "abc")
}

#[test]
fn registry_lookup_and_instantiation() {
    let mut registry = FactoryRegistry::new();
    registry.register_all(builtin_factories()).unwrap();

    let factory = registry.lookup("huebee").unwrap();
    assert_eq!(factory.id(), "huebee");
    assert!(matches!(
        registry.lookup("nosuchbee"),
        Err(HiveError::FactoryNotFound(_))
    ));

    let options = factory.options();
    let declared: Vec<_> = options
        .iter()
        .map(|o| (o.name.as_str(), o.mandatory))
        .collect();
    assert_eq!(declared, [("address", true), ("key", true)]);

    let setcolor = factory
        .actions()
        .into_iter()
        .find(|a| a.name == "setcolor")
        .unwrap();
    let placeholders: Vec<_> = setcolor
        .options
        .iter()
        .map(|p| (p.name.as_str(), p.value_type, p.mandatory))
        .collect();
    assert_eq!(
        placeholders,
        [
            ("light", ValueType::Int, true),
            ("color", ValueType::String, false),
            ("brightness", ValueType::Int, false),
            ("alert", ValueType::Int, false),
        ]
    );

    validate_options(&options, &bridge_options()).unwrap();
    let bee = factory
        .new_bee("living-room", "", bridge_options())
        .unwrap();
    assert_eq!(bee.options(), bridge_options());

    let without_key = BeeOptions::new().with("address", "192.168.0.1");
    let err = validate_options(&options, &without_key).unwrap_err();
    assert!(err.is_missing("key"));
}

#[test]
fn duplicate_registration_is_rejected() {
    let mut registry = FactoryRegistry::new();
    registry.register_all(builtin_factories()).unwrap();

    assert!(matches!(
        registry.register(Arc::new(HueBeeFactory::new())),
        Err(HiveError::DuplicateFactory(id)) if id == "huebee"
    ));
    assert_eq!(registry.len(), 1);
}

#[tokio::test]
async fn hive_drives_hue_bee() {
    let bridge = Arc::new(RecordingBridge::default());
    let config = HiveConfig {
        bees: vec![BeeConfig::new("living-room", "huebee", bridge_options())
            .description("Living room lights")],
        ..Default::default()
    };

    let hive = Hive::builder()
        .init_logging(false)
        .factory(Arc::new(HueBeeFactory::with_bridge(bridge.clone())))
        .config(config)
        .build()
        .unwrap();

    assert_eq!(hive.start_bees().await, 1);
    let bee = hive.bee("living-room").unwrap();
    assert_eq!(bee.description(), "Living room lights");
    assert_eq!(bee.options(), bridge_options());

    hive.dispatch(Action::new(
        "living-room",
        "Philips Hue",
        "setcolor",
        Placeholders::new()
            .with("light", ValueType::Int, 2)
            .with("color", ValueType::String, "#0000ff")
            .with("brightness", ValueType::Int, 128),
    ))
    .await
    .unwrap();

    // `light` is mandatory
    let missing_light = Action::new(
        "living-room",
        "Philips Hue",
        "switch",
        Placeholders::new().with("state", ValueType::Bool, true),
    );
    match hive.dispatch(missing_light).await {
        Err(RuntimeError::Hive(HiveError::Schema(e))) => assert!(e.is_missing("light")),
        other => panic!("unexpected result: {other:?}"),
    }

    {
        let sent = bridge.sent.lock();
        assert_eq!(sent.len(), 1);
        let (address, light, state) = &sent[0];
        assert_eq!(address, "192.168.0.1");
        assert_eq!(*light, 2);
        assert_eq!(state.bri, Some(128));
        assert!(state.xy.is_some());
    }

    let blank_key = BeeOptions::new()
        .with("address", "10.0.0.7")
        .with("key", "");
    assert!(hive.reload_bee("living-room", blank_key).is_err());
    assert_eq!(bee.options(), bridge_options());

    let moved = BeeOptions::new()
        .with("address", "10.0.0.7")
        .with("key", "abc");
    hive.reload_bee("living-room", moved.clone()).unwrap();
    assert_eq!(bee.options(), moved);

    hive.dispatch(Action::new(
        "living-room",
        "Philips Hue",
        "switch",
        Placeholders::new()
            .with("light", ValueType::Int, 2)
            .with("state", ValueType::Bool, false),
    ))
    .await
    .unwrap();
    assert_eq!(bridge.sent.lock()[1].0, "10.0.0.7");
}
