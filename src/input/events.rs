//! Pointer event types delivered by the host.

use crate::draw::Point;

/// Identifier the host assigns to each pointer (mouse, pen, finger).
pub type PointerId = u32;

/// Pointer event phase.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PointerPhase {
    /// Button or contact pressed
    Down,
    /// Pointer moved
    Move,
    /// Button or contact released
    Up,
    /// The platform aborted the interaction
    Cancel,
    /// Pointer left the drawing region
    Leave,
}

impl PointerPhase {
    /// Whether this phase finishes an active stroke.
    pub fn ends_stroke(&self) -> bool {
        matches!(self, Self::Up | Self::Cancel | Self::Leave)
    }
}

/// A single pointer event in logical coordinates relative to the drawing region.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PointerEvent {
    pub pointer: PointerId,
    pub phase: PointerPhase,
    pub position: Point,
}

impl PointerEvent {
    pub fn new(pointer: PointerId, phase: PointerPhase, x: f64, y: f64) -> Self {
        Self {
            pointer,
            phase,
            position: Point::new(x, y),
        }
    }

    pub fn down(pointer: PointerId, x: f64, y: f64) -> Self {
        Self::new(pointer, PointerPhase::Down, x, y)
    }

    pub fn moved(pointer: PointerId, x: f64, y: f64) -> Self {
        Self::new(pointer, PointerPhase::Move, x, y)
    }

    pub fn up(pointer: PointerId, x: f64, y: f64) -> Self {
        Self::new(pointer, PointerPhase::Up, x, y)
    }
}
