//! Transparent annotation layer that strokes are rasterized onto.
//!
//! The layer keeps no stroke history: its pixels are the only record of what
//! was drawn. Resizing therefore resamples the existing buffer instead of
//! replaying strokes.

use super::color::{BLACK, Color};
use super::pen::PenStyleProfile;
use super::viewport::{Point, Viewport};
use crate::input::ToolMode;
use thiserror::Error;

/// Errors raised by the drawing surfaces.
#[derive(Debug, Error)]
pub enum SurfaceError {
    #[error("Cairo error: {0}")]
    Cairo(#[from] cairo::Error),

    #[error("Surface pixels are in use: {0}")]
    Borrow(#[from] cairo::BorrowError),

    #[error("PNG encoding failed: {0}")]
    Png(#[from] cairo::IoError),
}

/// Everything needed to draw one segment.
///
/// Built from the current drawing settings at composite time, so a setting
/// changed mid-stroke applies to the very next segment.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct StrokeParams {
    pub tool: ToolMode,
    pub profile: PenStyleProfile,
    /// Ink color; ignored by the eraser
    pub color: Color,
    /// Pen size or eraser size, depending on `tool`
    pub size: f64,
}

impl StrokeParams {
    /// Effective line width in logical units.
    pub fn line_width(&self) -> f64 {
        match self.tool {
            ToolMode::Pen => (self.size + self.profile.width_boost).max(1.0),
            ToolMode::Eraser => self.size,
        }
    }

    /// Source color for the segment: styled ink for the pen, opaque black for the eraser.
    pub fn source_color(&self) -> Color {
        match self.tool {
            ToolMode::Pen => self.color.with_alpha(self.profile.alpha),
            ToolMode::Eraser => BLACK,
        }
    }

    fn operator(&self) -> cairo::Operator {
        match self.tool {
            ToolMode::Pen => cairo::Operator::Over,
            ToolMode::Eraser => cairo::Operator::DestOut,
        }
    }
}

/// Anything that can rasterize stroke segments.
///
/// [`AnnotationSurface`] is the real implementation; tests substitute a
/// recorder so the input router can be exercised without pixels.
pub trait Compositor {
    fn composite_segment(
        &mut self,
        from: Point,
        to: Point,
        stroke: &StrokeParams,
    ) -> Result<(), SurfaceError>;
}

/// Persistent, initially transparent ARGB buffer sized to the viewport.
pub struct AnnotationSurface {
    surface: cairo::ImageSurface,
    viewport: Viewport,
}

impl AnnotationSurface {
    /// Creates a fully transparent surface at the viewport's backing size.
    pub fn new(viewport: Viewport) -> Result<Self, SurfaceError> {
        let surface = cairo::ImageSurface::create(
            cairo::Format::ARgb32,
            viewport.pixel_width(),
            viewport.pixel_height(),
        )?;
        Ok(Self { surface, viewport })
    }

    pub fn viewport(&self) -> Viewport {
        self.viewport
    }

    /// Backing-pixel width.
    pub fn width(&self) -> i32 {
        self.surface.width()
    }

    /// Backing-pixel height.
    pub fn height(&self) -> i32 {
        self.surface.height()
    }

    pub fn surface(&self) -> &cairo::ImageSurface {
        &self.surface
    }

    /// Moves to a new viewport, stretching the current pixels to the new backing size.
    pub fn resize(&mut self, viewport: Viewport) -> Result<(), SurfaceError> {
        let (old_w, old_h) = (self.surface.width(), self.surface.height());
        let (new_w, new_h) = (viewport.pixel_width(), viewport.pixel_height());

        let next = cairo::ImageSurface::create(cairo::Format::ARgb32, new_w, new_h)?;
        {
            let ctx = cairo::Context::new(&next)?;
            ctx.scale(
                f64::from(new_w) / f64::from(old_w),
                f64::from(new_h) / f64::from(old_h),
            );
            self.surface.flush();
            ctx.set_source_surface(&self.surface, 0.0, 0.0)?;
            ctx.source().set_filter(cairo::Filter::Bilinear);
            ctx.paint()?;
        }
        next.flush();

        log::debug!(
            "Resampled annotation layer {}x{} -> {}x{} px",
            old_w,
            old_h,
            new_w,
            new_h
        );

        self.surface = next;
        self.viewport = viewport;
        Ok(())
    }

    /// Resets every pixel to fully transparent.
    pub fn clear(&mut self) -> Result<(), SurfaceError> {
        {
            let ctx = cairo::Context::new(&self.surface)?;
            ctx.set_operator(cairo::Operator::Clear);
            ctx.paint()?;
        }
        self.surface.flush();
        Ok(())
    }

    /// Premultiplied ARGB pixels, row-major.
    pub fn pixels(&mut self) -> Result<Vec<u32>, SurfaceError> {
        read_argb_pixels(&mut self.surface)
    }

    /// Alpha of a backing pixel; 0 outside the buffer.
    pub fn alpha_at(&mut self, x: i32, y: i32) -> Result<u8, SurfaceError> {
        let (w, h) = (self.width(), self.height());
        if x < 0 || y < 0 || x >= w || y >= h {
            return Ok(0);
        }
        self.surface.flush();
        let offset = (y * self.surface.stride() + x * 4) as usize;
        let data = self.surface.data()?;
        Ok(alpha_of(u32::from_ne_bytes([
            data[offset],
            data[offset + 1],
            data[offset + 2],
            data[offset + 3],
        ])))
    }

    /// Number of pixels carrying any ink (non-zero alpha).
    pub fn opaque_pixel_count(&mut self) -> Result<usize, SurfaceError> {
        Ok(self
            .pixels()?
            .into_iter()
            .filter(|px| alpha_of(*px) > 0)
            .count())
    }

    /// True when every pixel is fully transparent.
    pub fn is_blank(&mut self) -> Result<bool, SurfaceError> {
        Ok(self.opaque_pixel_count()? == 0)
    }

    /// Copies the pixels into an owned value that can be encoded on another thread.
    pub fn snapshot(&mut self) -> Result<PixelSnapshot, SurfaceError> {
        self.surface.flush();
        let width = self.surface.width();
        let height = self.surface.height();
        let stride = self.surface.stride();
        let data = self.surface.data()?.to_vec();
        Ok(PixelSnapshot {
            data,
            width,
            height,
            stride,
        })
    }
}

impl Compositor for AnnotationSurface {
    /// Draws a round-capped, round-joined line from `from` to `to`.
    ///
    /// The pen blends source-over; the eraser removes alpha wherever the
    /// line covers, whatever the ink color.
    fn composite_segment(
        &mut self,
        from: Point,
        to: Point,
        stroke: &StrokeParams,
    ) -> Result<(), SurfaceError> {
        {
            let ctx = cairo::Context::new(&self.surface)?;
            let density = self.viewport.pixel_density;
            ctx.scale(density, density);
            ctx.set_line_cap(cairo::LineCap::Round);
            ctx.set_line_join(cairo::LineJoin::Round);
            ctx.set_operator(stroke.operator());
            stroke.source_color().set_source(&ctx);
            ctx.set_line_width(stroke.line_width());

            ctx.move_to(from.x, from.y);
            ctx.line_to(to.x, to.y);
            ctx.stroke()?;
        }
        self.surface.flush();
        Ok(())
    }
}

/// Owned copy of an ARGB32 buffer.
#[derive(Debug, Clone)]
pub struct PixelSnapshot {
    data: Vec<u8>,
    width: i32,
    height: i32,
    stride: i32,
}

impl PixelSnapshot {
    pub fn width(&self) -> i32 {
        self.width
    }

    pub fn height(&self) -> i32 {
        self.height
    }

    /// Encodes the pixels as an RGBA PNG, keeping transparency.
    pub fn encode_png(self) -> Result<Vec<u8>, SurfaceError> {
        let surface = cairo::ImageSurface::create_for_data(
            self.data,
            cairo::Format::ARgb32,
            self.width,
            self.height,
            self.stride,
        )?;
        let mut png = Vec::new();
        surface.write_to_png(&mut png)?;
        Ok(png)
    }
}

/// Extracts the alpha byte of a premultiplied ARGB32 pixel.
pub fn alpha_of(pixel: u32) -> u8 {
    (pixel >> 24) as u8
}

/// Reads an ARGB32 surface into one `u32` per pixel, dropping row padding.
pub(crate) fn read_argb_pixels(surface: &mut cairo::ImageSurface) -> Result<Vec<u32>, SurfaceError> {
    surface.flush();
    let width = surface.width() as usize;
    let height = surface.height() as usize;
    let stride = surface.stride() as usize;
    let data = surface.data()?;

    let mut pixels = Vec::with_capacity(width * height);
    for row in data.chunks(stride).take(height) {
        pixels.extend(
            row[..width * 4]
                .chunks_exact(4)
                .map(|px| u32::from_ne_bytes([px[0], px[1], px[2], px[3]])),
        );
    }
    Ok(pixels)
}
