//! Pen style presets.

use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

/// How a pen style modifies the base pen size and ink opacity.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PenStyleProfile {
    /// Added to the pen size before stroking
    pub width_boost: f64,
    /// Ink opacity (0.0 - 1.0)
    pub alpha: f64,
}

/// Named pen presets.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "lowercase")]
pub enum PenStyle {
    /// Crisp, fully opaque line
    #[default]
    Fine,
    /// Wide, translucent line
    Marker,
    /// Slightly wider, mostly opaque line
    Brush,
}

impl PenStyle {
    pub const ALL: [PenStyle; 3] = [PenStyle::Fine, PenStyle::Marker, PenStyle::Brush];

    pub fn profile(&self) -> PenStyleProfile {
        match self {
            Self::Fine => PenStyleProfile {
                width_boost: 0.0,
                alpha: 1.0,
            },
            Self::Marker => PenStyleProfile {
                width_boost: 3.0,
                alpha: 0.75,
            },
            Self::Brush => PenStyleProfile {
                width_boost: 1.0,
                alpha: 0.9,
            },
        }
    }

    pub fn name(&self) -> &'static str {
        match self {
            Self::Fine => "fine",
            Self::Marker => "marker",
            Self::Brush => "brush",
        }
    }

    /// Parses a style name, falling back to [`PenStyle::Fine`] for unknown names.
    pub fn from_name_or_default(name: &str) -> Self {
        name.parse().unwrap_or_else(|_| {
            log::warn!("Unknown pen style '{}', using fine", name);
            Self::Fine
        })
    }
}

impl std::str::FromStr for PenStyle {
    type Err = ();

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "fine" => Ok(Self::Fine),
            "marker" => Ok(Self::Marker),
            "brush" => Ok(Self::Brush),
            _ => Err(()),
        }
    }
}
