//! Configuration type definitions.

use super::enums::ColorSpec;
use crate::draw::color::{DEFAULT_INK_HEX, PAPER_BASE_HEX};
use crate::input::drawing::{DEFAULT_ERASER_SIZE, DEFAULT_PEN_SIZE};
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

/// Drawing-related settings.
///
/// Controls the tool state the notepad starts with. Users can change every
/// value at runtime.
#[derive(Debug, Serialize, Deserialize, JsonSchema)]
pub struct DrawingSettings {
    /// Initial tool: "pen" or "eraser"
    #[serde(default = "default_tool")]
    pub tool: String,

    /// Initial pen style: "fine", "marker" or "brush"
    /// Unknown names fall back to "fine"
    #[serde(default = "default_pen_style")]
    pub pen_style: String,

    /// Initial ink color - a hex string like "#101010" or an RGB array
    #[serde(default = "default_ink")]
    pub color: ColorSpec,

    /// Pen size in logical units (valid range: 1.0 - 40.0)
    #[serde(default = "default_pen_size")]
    pub pen_size: f64,

    /// Eraser size in logical units (valid range: 4.0 - 120.0)
    #[serde(default = "default_eraser_size")]
    pub eraser_size: f64,
}

impl Default for DrawingSettings {
    fn default() -> Self {
        Self {
            tool: default_tool(),
            pen_style: default_pen_style(),
            color: default_ink(),
            pen_size: default_pen_size(),
            eraser_size: default_eraser_size(),
        }
    }
}

/// Paper background settings.
#[derive(Debug, Serialize, Deserialize, JsonSchema)]
pub struct PaperSettings {
    /// Initial paper: "blank", "lined" or "squared"
    #[serde(default = "default_paper_mode")]
    pub mode: String,

    /// Opaque base fill beneath the rules
    #[serde(default = "default_paper_base")]
    pub base_color: ColorSpec,
}

impl Default for PaperSettings {
    fn default() -> Self {
        Self {
            mode: default_paper_mode(),
            base_color: default_paper_base(),
        }
    }
}

/// Export settings.
#[derive(Debug, Serialize, Deserialize, JsonSchema)]
pub struct ExportSettings {
    /// Directory for the file fallback (supports `~/`)
    /// Empty means the system download directory
    #[serde(default)]
    pub download_directory: String,

    /// Try the clipboard before writing a file
    #[serde(default = "default_prefer_clipboard")]
    pub prefer_clipboard: bool,
}

impl Default for ExportSettings {
    fn default() -> Self {
        Self {
            download_directory: String::new(),
            prefer_clipboard: default_prefer_clipboard(),
        }
    }
}

// =============================================================================
// Default value functions
// =============================================================================

fn default_tool() -> String {
    "pen".to_string()
}

fn default_pen_style() -> String {
    "fine".to_string()
}

fn default_ink() -> ColorSpec {
    ColorSpec::Hex(DEFAULT_INK_HEX.to_string())
}

fn default_pen_size() -> f64 {
    DEFAULT_PEN_SIZE
}

fn default_eraser_size() -> f64 {
    DEFAULT_ERASER_SIZE
}

fn default_paper_mode() -> String {
    "blank".to_string()
}

fn default_paper_base() -> ColorSpec {
    ColorSpec::Hex(PAPER_BASE_HEX.to_string())
}

fn default_prefer_clipboard() -> bool {
    true
}
