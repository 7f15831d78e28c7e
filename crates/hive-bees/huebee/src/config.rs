//! Typed settings of a Hue bee.
//!
//! # Example Configuration
//!
//! ```toml
//! [[bees]]
//! name = "living-room"
//! class = "huebee"
//! description = "Lights in the living room"
//!
//! [[bees.options]]
//! name = "address"
//! value = "192.168.0.1"
//!
//! [[bees.options]]
//! name = "key"
//! value = "${HUE_KEY}"
//! ```

use serde::{Deserialize, Serialize};

use hive_core::{BeeError, BeeOptions, BeeResult};

/// Connection settings bound from a bee's `address` and `key` options.
#[derive(Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct HueSettings {
    /// Bridge address, e.g. `192.168.0.1`.
    pub address: String,
    /// Username / API key registered with the bridge.
    pub key: String,
}

impl HueSettings {
    /// Binds the settings from `options`.
    ///
    /// Both values must be present, strings, and not blank.
    pub fn from_options(options: &BeeOptions) -> BeeResult<Self> {
        Ok(Self {
            address: non_blank(options, "address")?,
            key: non_blank(options, "key")?,
        })
    }

    /// Base URL of the bridge's REST API.
    pub fn api_base(&self) -> String {
        format!("http://{}/api/{}", self.address, self.key)
    }
}

impl std::fmt::Debug for HueSettings {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("HueSettings")
            .field("address", &self.address)
            .field("key", &"<redacted>")
            .finish()
    }
}

fn non_blank(options: &BeeOptions, name: &str) -> BeeResult<String> {
    let value: String = options.bind(name)?;
    let value = value.trim();
    if value.is_empty() {
        return Err(BeeError::invalid_option(name, "must not be blank"));
    }
    Ok(value.to_string())
}
