//! Replay scripts: a TOML list of user actions applied to a [`Notepad`].
//!
//! Lets the whole drawing path run without a window system.
//!
//! ```toml
//! [viewport]
//! width = 320.0
//! height = 200.0
//! pixel_density = 2.0
//!
//! [[steps]]
//! action = "pen-style"
//! style = "marker"
//!
//! [[steps]]
//! action = "down"
//! x = 20.0
//! y = 40.0
//!
//! [[steps]]
//! action = "move"
//! x = 120.0
//! y = 60.0
//!
//! [[steps]]
//! action = "up"
//! x = 120.0
//! y = 60.0
//! ```

use std::fs;
use std::path::Path;

use anyhow::{Context, Result};
use serde::Deserialize;

use crate::draw::{PaperMode, PenStyle, Viewport};
use crate::input::{PointerEvent, PointerId, PointerPhase, ToolMode};
use crate::notepad::Notepad;

/// Viewport used when a script does not declare one.
pub const DEFAULT_VIEWPORT: ViewportSpec = ViewportSpec {
    width: 800.0,
    height: 600.0,
    pixel_density: 1.0,
};

#[derive(Debug, Clone, Copy, PartialEq, Deserialize)]
pub struct ViewportSpec {
    pub width: f64,
    pub height: f64,
    #[serde(default = "default_density")]
    pub pixel_density: f64,
}

impl ViewportSpec {
    pub fn to_viewport(self) -> Viewport {
        Viewport::new(self.width, self.height, self.pixel_density)
    }
}

impl Default for ViewportSpec {
    fn default() -> Self {
        DEFAULT_VIEWPORT
    }
}

/// A single user action.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(tag = "action", rename_all = "kebab-case")]
pub enum Step {
    Down {
        x: f64,
        y: f64,
        #[serde(default = "default_pointer")]
        pointer: PointerId,
    },
    Move {
        x: f64,
        y: f64,
        #[serde(default = "default_pointer")]
        pointer: PointerId,
    },
    Up {
        x: f64,
        y: f64,
        #[serde(default = "default_pointer")]
        pointer: PointerId,
    },
    Cancel {
        #[serde(default = "default_pointer")]
        pointer: PointerId,
    },
    Leave {
        #[serde(default = "default_pointer")]
        pointer: PointerId,
    },
    Tool {
        tool: ToolMode,
    },
    PenStyle {
        style: PenStyle,
    },
    PenSize {
        size: f64,
    },
    EraserSize {
        size: f64,
    },
    Color {
        hex: String,
    },
    Paper {
        mode: PaperMode,
    },
    Resize(ViewportSpec),
    Clear,
}

/// A parsed replay script.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
pub struct ReplayScript {
    #[serde(default)]
    pub viewport: ViewportSpec,
    #[serde(default)]
    pub steps: Vec<Step>,
}

impl ReplayScript {
    pub fn parse(source: &str) -> Result<Self> {
        toml::from_str(source).context("Failed to parse replay script")
    }

    pub fn load(path: &Path) -> Result<Self> {
        let source = fs::read_to_string(path)
            .with_context(|| format!("Failed to read script {}", path.display()))?;
        Self::parse(&source).with_context(|| format!("Invalid script {}", path.display()))
    }

    /// Applies every step in order. Stops at the first step that fails.
    pub fn apply(&self, notepad: &mut Notepad) -> Result<()> {
        for (index, step) in self.steps.iter().enumerate() {
            apply_step(notepad, step).with_context(|| format!("Step {} ({:?})", index + 1, step))?;
        }
        log::info!("Replayed {} steps", self.steps.len());
        Ok(())
    }
}

/// Applies one action to the notepad.
pub fn apply_step(notepad: &mut Notepad, step: &Step) -> Result<()> {
    match step {
        Step::Down { x, y, pointer } => {
            notepad.pointer(PointerEvent::down(*pointer, *x, *y));
        }
        Step::Move { x, y, pointer } => {
            notepad.pointer(PointerEvent::moved(*pointer, *x, *y));
        }
        Step::Up { x, y, pointer } => {
            notepad.pointer(PointerEvent::up(*pointer, *x, *y));
        }
        Step::Cancel { pointer } => {
            notepad.pointer(PointerEvent::new(*pointer, PointerPhase::Cancel, 0.0, 0.0));
        }
        Step::Leave { pointer } => {
            notepad.pointer(PointerEvent::new(*pointer, PointerPhase::Leave, 0.0, 0.0));
        }
        Step::Tool { tool } => notepad.set_tool(*tool),
        Step::PenStyle { style } => notepad.set_pen_style(*style),
        Step::PenSize { size } => {
            let label = notepad.set_pen_size(*size);
            log::debug!("{}", label);
        }
        Step::EraserSize { size } => {
            let label = notepad.set_eraser_size(*size);
            log::debug!("{}", label);
        }
        Step::Color { hex } => notepad
            .set_color(hex)
            .with_context(|| format!("Invalid color '{}'", hex))?,
        Step::Paper { mode } => notepad.set_paper_mode(*mode)?,
        Step::Resize(spec) => notepad.resize(spec.to_viewport())?,
        Step::Clear => notepad.clear()?,
    }
    Ok(())
}

fn default_density() -> f64 {
    1.0
}

fn default_pointer() -> PointerId {
    1
}
