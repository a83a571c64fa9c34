//! Rendering primitives for the two stacked surfaces (Cairo-based).
//!
//! - [`PaperLayer`]: opaque background texture, repainted on every change
//! - [`AnnotationSurface`]: transparent layer that strokes are composited onto
//! - [`Color`]: RGBA color with hex parsing
//! - [`Viewport`]: logical size plus pixel density driving both buffers

pub mod color;
pub mod paper;
pub mod pen;
pub mod surface;
pub mod viewport;

// Re-export commonly used types at module level
pub use color::{Color, ColorError, PALETTE};
pub use paper::{PaperLayer, PaperMode, RuleSegment, paper_rules, render_paper};
pub use pen::{PenStyle, PenStyleProfile};
pub use surface::{AnnotationSurface, Compositor, PixelSnapshot, StrokeParams, SurfaceError};
pub use viewport::{Point, Viewport};
