//! Input handling and the stroke state machine.
//!
//! This module translates host pointer events into stroke segments. It holds the
//! tool selection, the value-type [`DrawingConfig`], and the [`InputRouter`] that
//! tracks which pointer currently owns the stroke.

pub mod drawing;
pub mod events;
pub mod router;
pub mod tool;

// Re-export commonly used types at module level
pub use drawing::DrawingConfig;
pub use events::{PointerEvent, PointerId, PointerPhase};
pub use router::{InputRouter, RouteOutcome, StrokeState};
pub use tool::ToolMode;
