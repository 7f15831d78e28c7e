//! Boundary to the Hue bridge.
//!
//! The bee translates actions into [`LightState`] requests; an implementation
//! of [`HueBridge`] delivers them.  The wire protocol lives outside this
//! crate, so the only implementation shipped here is [`DryRunBridge`].

use async_trait::async_trait;
use tracing::info;

use hive_core::{BeeError, BeeResult};

use crate::config::HueSettings;
use crate::light::LightState;

/// Delivers light-state requests to a bridge.
#[async_trait]
pub trait HueBridge: Send + Sync {
    /// Applies `state` to light `light` on the bridge described by `target`.
    async fn set_light_state(
        &self,
        target: &HueSettings,
        light: u32,
        state: &LightState,
    ) -> BeeResult<()>;
}

/// Logs the request each call would send instead of sending it.
#[derive(Debug, Clone, Copy, Default)]
pub struct DryRunBridge;

#[async_trait]
impl HueBridge for DryRunBridge {
    async fn set_light_state(
        &self,
        target: &HueSettings,
        light: u32,
        state: &LightState,
    ) -> BeeResult<()> {
        let body = serde_json::to_string(state).map_err(|e| BeeError::Bridge(e.to_string()))?;
        info!(
            bridge = %target.address,
            light,
            body = %body,
            "Dry run: light state not sent"
        );
        Ok(())
    }
}
