//! Light-state requests sent to a Hue bridge.
//!
//! This module only builds the request body; delivering it is the job of a
//! [`HueBridge`](crate::HueBridge).

use serde::{Deserialize, Serialize};

use hive_core::{BeeError, BeeResult};

/// Highest brightness value a Hue light accepts.
pub const MAX_BRIGHTNESS: u8 = 254;

/// Alert effect of a light.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Alert {
    /// Stop any running alert.
    None,
    /// One breathe cycle.
    Select,
    /// Breathe cycles for 15 seconds.
    Lselect,
}

impl Alert {
    /// Maps the action parameter (0 none, 1 short, 2 long) to an alert.
    pub fn from_level(level: i64) -> BeeResult<Self> {
        match level {
            0 => Ok(Self::None),
            1 => Ok(Self::Select),
            2 => Ok(Self::Lselect),
            other => Err(BeeError::invalid_placeholder(
                "alert",
                format!("expected 0, 1 or 2, got {other}"),
            )),
        }
    }
}

/// Body of a `PUT /api/<key>/lights/<id>/state` request.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct LightState {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub on: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub bri: Option<u8>,
    /// CIE 1931 colour coordinates.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub xy: Option<[f64; 2]>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub alert: Option<Alert>,
}

impl LightState {
    /// Returns `true` if the request would change nothing.
    pub fn is_empty(&self) -> bool {
        self.on.is_none() && self.bri.is_none() && self.xy.is_none() && self.alert.is_none()
    }
}

/// Clamps a requested brightness into the range the bridge accepts.
pub fn clamp_brightness(value: i64) -> u8 {
    value.clamp(0, i64::from(MAX_BRIGHTNESS)) as u8
}

const NAMED_COLORS: &[(&str, [u8; 3])] = &[
    ("red", [255, 0, 0]),
    ("orange", [255, 165, 0]),
    ("yellow", [255, 255, 0]),
    ("green", [0, 255, 0]),
    ("cyan", [0, 255, 255]),
    ("blue", [0, 0, 255]),
    ("purple", [128, 0, 128]),
    ("pink", [255, 192, 203]),
    ("white", [255, 255, 255]),
];

/// Parses `#rrggbb`, `rrggbb` or a colour name into RGB.
pub fn parse_color(input: &str) -> BeeResult<[u8; 3]> {
    let trimmed = input.trim();
    let lower = trimmed.to_ascii_lowercase();
    if let Some((_, rgb)) = NAMED_COLORS.iter().find(|(name, _)| *name == lower) {
        return Ok(*rgb);
    }

    let hex = trimmed.strip_prefix('#').unwrap_or(trimmed);
    if hex.len() != 6 || !hex.is_ascii() {
        return Err(BeeError::invalid_placeholder(
            "color",
            format!("unrecognised color '{input}'"),
        ));
    }

    let mut rgb = [0u8; 3];
    for (i, channel) in rgb.iter_mut().enumerate() {
        *channel = u8::from_str_radix(&hex[i * 2..i * 2 + 2], 16).map_err(|_| {
            BeeError::invalid_placeholder("color", format!("unrecognised color '{input}'"))
        })?;
    }
    Ok(rgb)
}

/// Converts sRGB to the CIE xy coordinates used by Hue lights.
///
/// Black has no chromaticity and maps to `[0.0, 0.0]`.
pub fn rgb_to_xy([r, g, b]: [u8; 3]) -> [f64; 2] {
    fn linear(channel: u8) -> f64 {
        let v = f64::from(channel) / 255.0;
        if v > 0.04045 {
            ((v + 0.055) / 1.055).powf(2.4)
        } else {
            v / 12.92
        }
    }

    let (r, g, b) = (linear(r), linear(g), linear(b));
    let x = r * 0.664_511 + g * 0.154_324 + b * 0.162_028;
    let y = r * 0.283_881 + g * 0.668_433 + b * 0.047_685;
    let z = r * 0.000_088 + g * 0.072_310 + b * 0.986_039;

    let sum = x + y + z;
    if sum == 0.0 {
        return [0.0, 0.0];
    }
    [round4(x / sum), round4(y / sum)]
}

fn round4(v: f64) -> f64 {
    (v * 10_000.0).round() / 10_000.0
}
