//! Viewport geometry shared by both drawing surfaces.

/// A point in logical (CSS-pixel-like) units.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Point {
    pub x: f64,
    pub y: f64,
}

impl Point {
    pub const fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }

    /// Returns this point shifted by `(dx, dy)`.
    pub fn offset(self, dx: f64, dy: f64) -> Self {
        Self {
            x: self.x + dx,
            y: self.y + dy,
        }
    }
}

/// Size of the drawing region plus the device scale factor.
///
/// Both the paper and annotation surfaces derive their backing-pixel
/// dimensions from this value on every resize.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Viewport {
    /// Logical width
    pub width: f64,
    /// Logical height
    pub height: f64,
    /// Device pixels per logical unit (never below 1.0)
    pub pixel_density: f64,
}

impl Viewport {
    /// Creates a viewport, normalising negative or non-finite sizes to zero and
    /// density to at least 1.
    pub fn new(width: f64, height: f64, pixel_density: f64) -> Self {
        let density = if pixel_density.is_finite() {
            pixel_density.max(1.0)
        } else {
            1.0
        };
        Self {
            width: logical_len(width),
            height: logical_len(height),
            pixel_density: density,
        }
    }

    /// Backing-pixel width: `max(1, floor(width * density))`.
    pub fn pixel_width(&self) -> i32 {
        backing_len(self.width, self.pixel_density)
    }

    /// Backing-pixel height: `max(1, floor(height * density))`.
    pub fn pixel_height(&self) -> i32 {
        backing_len(self.height, self.pixel_density)
    }
}

fn logical_len(value: f64) -> f64 {
    if value.is_finite() {
        value.max(0.0)
    } else {
        0.0
    }
}

fn backing_len(logical: f64, density: f64) -> i32 {
    let scaled = (logical * density).floor();
    if scaled.is_finite() {
        (scaled as i32).max(1)
    } else {
        1
    }
}
