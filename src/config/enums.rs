//! Configuration enum types.

use crate::draw::Color;
use log::warn;
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

/// Color specification - either a hex string or RGB values.
///
/// # Examples
/// ```toml
/// # Hex color (3 or 6 digits)
/// color = "#101010"
///
/// # RGB color (0-255 per component)
/// color = [29, 78, 216]
/// ```
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq, JsonSchema)]
#[serde(untagged)]
pub enum ColorSpec {
    /// Hex color such as "#fefcf8" or "#fff"
    Hex(String),
    /// RGB color as [red, green, blue] where each component is 0-255
    Rgb([u8; 3]),
}

impl ColorSpec {
    /// Converts the specification to an opaque [`Color`], if it is valid.
    pub fn try_to_color(&self) -> Option<Color> {
        match self {
            ColorSpec::Hex(hex) => Color::from_hex(hex).ok(),
            ColorSpec::Rgb(rgb) => Some(Color::from_rgb8(*rgb)),
        }
    }

    /// Converts the specification to a [`Color`], using `fallback` for invalid hex.
    pub fn to_color_or(&self, fallback: Color) -> Color {
        self.try_to_color().unwrap_or_else(|| {
            warn!("Invalid color {:?}, using {}", self, fallback.to_hex());
            fallback
        })
    }
}
