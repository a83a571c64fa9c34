//! The notepad controller: owns both surfaces, the router and the current settings.
//!
//! Hosts call the `set_*` methods when a control changes, forward pointer events
//! to [`Notepad::pointer`], and composite [`Notepad::paper`] beneath
//! [`Notepad::annotations`] when presenting.

use std::sync::Arc;

use crate::config::Config;
use crate::draw::{
    AnnotationSurface, Color, ColorError, Compositor, PaperLayer, PaperMode, PenStyle,
    SurfaceError, Viewport,
};
use crate::export::types::ENCODE_FAILED_STATUS;
use crate::export::{ExportDependencies, ExportOutcome, ExportRequest, export_transparent_image};
use crate::input::{
    DrawingConfig, InputRouter, PointerEvent, PointerPhase, RouteOutcome, ToolMode,
};

/// Status shown after the annotation layer is cleared.
pub const CLEARED_STATUS: &str = "Writing cleared.";

pub struct Notepad {
    viewport: Viewport,
    paper: PaperLayer,
    annotations: AnnotationSurface,
    router: InputRouter,
    drawing: DrawingConfig,
    prefer_clipboard: bool,
    status: String,
}

impl Notepad {
    /// Builds a notepad with the starting settings from `config`.
    pub fn new(viewport: Viewport, config: &Config) -> Result<Self, SurfaceError> {
        let paper = PaperLayer::new(viewport, config.paper_mode(), config.paper_base())?;
        let annotations = AnnotationSurface::new(viewport)?;
        log::info!(
            "Notepad ready: {}x{} px, {} paper",
            viewport.pixel_width(),
            viewport.pixel_height(),
            paper.mode().name()
        );
        Ok(Self {
            viewport,
            paper,
            annotations,
            router: InputRouter::new(),
            drawing: config.drawing_config(),
            prefer_clipboard: config.export.prefer_clipboard,
            status: String::new(),
        })
    }

    pub fn viewport(&self) -> Viewport {
        self.viewport
    }

    pub fn drawing(&self) -> DrawingConfig {
        self.drawing
    }

    pub fn paper_mode(&self) -> PaperMode {
        self.paper.mode()
    }

    pub fn paper(&self) -> &PaperLayer {
        &self.paper
    }

    pub fn paper_mut(&mut self) -> &mut PaperLayer {
        &mut self.paper
    }

    pub fn annotations(&self) -> &AnnotationSurface {
        &self.annotations
    }

    pub fn annotations_mut(&mut self) -> &mut AnnotationSurface {
        &mut self.annotations
    }

    pub fn router(&self) -> &InputRouter {
        &self.router
    }

    /// Latest status line. Empty until something reports.
    pub fn status(&self) -> &str {
        &self.status
    }

    pub fn set_prefer_clipboard(&mut self, prefer: bool) {
        self.prefer_clipboard = prefer;
    }

    /// Adopts a new viewport.
    ///
    /// An active stroke is interrupted, the paper is repainted, and the existing
    /// writing is resampled onto the new backing size.
    pub fn resize(&mut self, viewport: Viewport) -> Result<(), SurfaceError> {
        self.router.interrupt();
        self.paper.repaint(viewport, self.paper.mode())?;
        self.annotations.resize(viewport)?;
        self.viewport = viewport;
        Ok(())
    }

    pub fn set_paper_mode(&mut self, mode: PaperMode) -> Result<(), SurfaceError> {
        if mode == self.paper.mode() {
            return Ok(());
        }
        log::info!("Paper mode: {}", mode.name());
        self.paper.repaint(self.viewport, mode)
    }

    pub fn set_pen_style(&mut self, style: PenStyle) {
        self.drawing = self.drawing.with_pen_style(style);
        log::debug!("Pen style: {}", style.name());
    }

    pub fn set_tool(&mut self, tool: ToolMode) {
        self.drawing = self.drawing.with_tool(tool);
        log::debug!("Tool: {}", tool.name());
    }

    /// Sets the pen size and returns its label, e.g. "Pen size: 6".
    pub fn set_pen_size(&mut self, size: f64) -> String {
        self.drawing = self.drawing.with_pen_size(size);
        self.drawing.pen_size_label()
    }

    /// Sets the eraser size and returns its label.
    pub fn set_eraser_size(&mut self, size: f64) -> String {
        self.drawing = self.drawing.with_eraser_size(size);
        self.drawing.eraser_size_label()
    }

    /// Sets the ink color from a hex string. The previous color stays on error.
    pub fn set_color(&mut self, hex: &str) -> Result<(), ColorError> {
        let color = Color::from_hex(hex)?;
        self.drawing = self.drawing.with_color(color);
        log::debug!("Ink color: {}", color.to_hex());
        Ok(())
    }

    /// Routes one pointer event onto the annotation surface.
    ///
    /// A failed composite is logged and the stroke continues with the next event.
    pub fn pointer(&mut self, event: PointerEvent) -> RouteOutcome {
        route_logged(
            &mut self.router,
            event,
            &self.drawing,
            &mut self.annotations,
        )
    }

    /// Erases all writing. The paper is left alone.
    pub fn clear(&mut self) -> Result<(), SurfaceError> {
        self.router.interrupt();
        self.annotations.clear()?;
        self.status = CLEARED_STATUS.to_string();
        log::info!("Annotation layer cleared");
        Ok(())
    }

    /// Exports the writing (never the paper) and records the resulting status.
    pub async fn export(&mut self, dependencies: Arc<ExportDependencies>) -> ExportOutcome {
        let outcome = match self.annotations.snapshot() {
            Ok(snapshot) => {
                let request = ExportRequest::new(snapshot, self.prefer_clipboard);
                export_transparent_image(request, dependencies).await
            }
            Err(err) => {
                log::error!("Failed to read annotation layer: {}", err);
                ExportOutcome::failed(ENCODE_FAILED_STATUS)
            }
        };
        self.status = outcome.status.clone();
        outcome
    }
}

/// Routes `event` and reports the transition the router made, even when the
/// segment failed to draw. Only a captured down or move composites, so those
/// are the only phases a failure can come from.
fn route_logged<C: Compositor + ?Sized>(
    router: &mut InputRouter,
    event: PointerEvent,
    drawing: &DrawingConfig,
    target: &mut C,
) -> RouteOutcome {
    match router.handle(event, drawing, target) {
        Ok(outcome) => outcome,
        Err(err) => {
            log::warn!("Dropped stroke segment: {}", err);
            match event.phase {
                PointerPhase::Down => RouteOutcome::StrokeStarted,
                _ => RouteOutcome::StrokeExtended,
            }
        }
    }
}
