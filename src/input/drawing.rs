//! Value-type drawing settings passed to every input call.

use crate::draw::color::DEFAULT_INK_HEX;
use crate::draw::{Color, PenStyle, StrokeParams};
use crate::input::ToolMode;
use std::ops::RangeInclusive;

/// Valid pen sizes in logical units.
pub const PEN_SIZE_RANGE: RangeInclusive<f64> = 1.0..=40.0;

/// Valid eraser sizes in logical units.
pub const ERASER_SIZE_RANGE: RangeInclusive<f64> = 4.0..=120.0;

pub const DEFAULT_PEN_SIZE: f64 = 3.0;
pub const DEFAULT_ERASER_SIZE: f64 = 24.0;

/// Current tool, style, color and sizes.
///
/// This is a plain `Copy` value: the owner replaces it wholesale when a
/// setting changes and hands it to the router with each event.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct DrawingConfig {
    pub tool: ToolMode,
    pub pen_style: PenStyle,
    /// Opaque ink color; the pen style supplies the alpha
    pub color: Color,
    pub pen_size: f64,
    pub eraser_size: f64,
}

impl Default for DrawingConfig {
    fn default() -> Self {
        Self {
            tool: ToolMode::Pen,
            pen_style: PenStyle::Fine,
            color: Color::from_hex(DEFAULT_INK_HEX).unwrap_or(crate::draw::color::BLACK),
            pen_size: DEFAULT_PEN_SIZE,
            eraser_size: DEFAULT_ERASER_SIZE,
        }
    }
}

impl DrawingConfig {
    /// Parameters for the next segment under these settings.
    pub fn stroke_params(&self) -> StrokeParams {
        let size = match self.tool {
            ToolMode::Pen => self.pen_size,
            ToolMode::Eraser => self.eraser_size,
        };
        StrokeParams {
            tool: self.tool,
            profile: self.pen_style.profile(),
            color: self.color,
            size,
        }
    }

    pub fn with_tool(self, tool: ToolMode) -> Self {
        Self { tool, ..self }
    }

    pub fn with_pen_style(self, pen_style: PenStyle) -> Self {
        Self { pen_style, ..self }
    }

    pub fn with_color(self, color: Color) -> Self {
        Self {
            color: color.with_alpha(1.0),
            ..self
        }
    }

    /// Sets the pen size, clamped to [`PEN_SIZE_RANGE`].
    pub fn with_pen_size(self, pen_size: f64) -> Self {
        Self {
            pen_size: clamp_to(pen_size, &PEN_SIZE_RANGE),
            ..self
        }
    }

    /// Sets the eraser size, clamped to [`ERASER_SIZE_RANGE`].
    pub fn with_eraser_size(self, eraser_size: f64) -> Self {
        Self {
            eraser_size: clamp_to(eraser_size, &ERASER_SIZE_RANGE),
            ..self
        }
    }

    pub fn pen_size_label(&self) -> String {
        format!("Pen size: {}", self.pen_size)
    }

    pub fn eraser_size_label(&self) -> String {
        format!("Eraser size: {}", self.eraser_size)
    }
}

pub(crate) fn clamp_to(value: f64, range: &RangeInclusive<f64>) -> f64 {
    if value.is_nan() {
        *range.start()
    } else {
        value.clamp(*range.start(), *range.end())
    }
}
