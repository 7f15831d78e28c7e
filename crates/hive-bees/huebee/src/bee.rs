//! The live Hue bee.

use std::sync::Arc;

use async_trait::async_trait;
use tracing::{debug, instrument};

use hive_core::{Action, Bee, BeeBase, BeeError, BeeOptions, BeeResult, Placeholders};

use crate::bridge::HueBridge;
use crate::config::HueSettings;
use crate::light::{Alert, LightState, clamp_brightness, parse_color, rgb_to_xy};

/// A Hue bridge bound to one user's settings.
pub struct HueBee {
    base: BeeBase<HueSettings>,
    bridge: Arc<dyn HueBridge>,
}

impl HueBee {
    pub(crate) fn new(
        name: &str,
        namespace: &str,
        description: &str,
        options: BeeOptions,
        bridge: Arc<dyn HueBridge>,
    ) -> BeeResult<Self> {
        let base = BeeBase::configure(
            name,
            namespace,
            description,
            options,
            HueSettings::from_options,
        )?;
        Ok(Self { base, bridge })
    }

    /// Returns the currently applied bridge settings.
    pub fn settings(&self) -> HueSettings {
        self.base.settings()
    }

    async fn send(&self, light: u32, state: LightState) -> BeeResult<()> {
        if state.is_empty() {
            debug!(bee = %self.base.name(), light, "Nothing to change");
            return Ok(());
        }
        self.bridge
            .set_light_state(&self.settings(), light, &state)
            .await
    }
}

/// Translates a `switch` action.
pub fn switch_state(params: &Placeholders) -> BeeResult<(u32, LightState)> {
    let light = params.bind("light")?;
    let on = params.bind("state")?;
    Ok((
        light,
        LightState {
            on: Some(on),
            ..Default::default()
        },
    ))
}

/// Translates a `setcolor` action.
pub fn color_state(params: &Placeholders) -> BeeResult<(u32, LightState)> {
    let light = params.bind("light")?;
    let mut state = LightState::default();

    if let Some(color) = params.bind_optional::<String>("color")? {
        state.xy = Some(rgb_to_xy(parse_color(&color)?));
    }
    if let Some(brightness) = params.bind_optional::<i64>("brightness")? {
        state.bri = Some(clamp_brightness(brightness));
    }
    if let Some(level) = params.bind_optional::<i64>("alert")? {
        state.alert = Some(Alert::from_level(level)?);
    }

    Ok((light, state))
}

#[async_trait]
impl Bee for HueBee {
    fn name(&self) -> &str {
        self.base.name()
    }

    fn namespace(&self) -> &str {
        self.base.namespace()
    }

    fn description(&self) -> &str {
        self.base.description()
    }

    fn options(&self) -> BeeOptions {
        self.base.options()
    }

    fn reload_options(&self, options: BeeOptions) -> BeeResult<()> {
        self.base.reload_with(options, HueSettings::from_options)
    }

    #[instrument(skip_all, fields(bee = %self.base.name(), action = %action.name))]
    async fn action(&self, action: &Action) -> BeeResult<Placeholders> {
        let (light, state) = match action.name.as_str() {
            "switch" => switch_state(&action.options)?,
            "setcolor" => color_state(&action.options)?,
            other => return Err(BeeError::UnknownAction(other.to_string())),
        };
        self.send(light, state).await?;
        Ok(Placeholders::new())
    }
}
