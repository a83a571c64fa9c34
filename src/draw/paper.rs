//! Paper backgrounds (blank, lined, squared).

use super::color::{Color, PAPER_BASE_HEX};
use super::surface::{SurfaceError, read_argb_pixels};
use super::viewport::Viewport;
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

/// Spacing between lined-paper rules in logical units.
pub const LINED_GAP: f64 = 30.0;

/// Grid cell size for squared paper in logical units.
pub const SQUARED_CELL: f64 = 24.0;

/// Paper texture drawn beneath the annotation layer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "lowercase")]
pub enum PaperMode {
    /// Base fill only
    #[default]
    Blank,
    /// Horizontal rules
    Lined,
    /// Square grid
    Squared,
}

impl PaperMode {
    pub const ALL: [PaperMode; 3] = [PaperMode::Blank, PaperMode::Lined, PaperMode::Squared];

    /// Stroke color for the rules, or `None` when the mode draws no rules.
    pub fn rule_color(&self) -> Option<Color> {
        match self {
            Self::Blank => None,
            Self::Lined => Some(Color::from_rgb8([38, 83, 127]).with_alpha(0.30)),
            Self::Squared => Some(Color::from_rgb8([25, 108, 81]).with_alpha(0.22)),
        }
    }

    pub fn name(&self) -> &'static str {
        match self {
            Self::Blank => "blank",
            Self::Lined => "lined",
            Self::Squared => "squared",
        }
    }
}

impl std::str::FromStr for PaperMode {
    type Err = ();

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "blank" => Ok(Self::Blank),
            "lined" => Ok(Self::Lined),
            "squared" => Ok(Self::Squared),
            _ => Err(()),
        }
    }
}

/// One straight rule on the paper, in logical units.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RuleSegment {
    pub x1: f64,
    pub y1: f64,
    pub x2: f64,
    pub y2: f64,
}

/// Computes the rules for `mode` at the given viewport size.
///
/// Rules sit on half-unit offsets so a 1-unit stroke covers exactly one
/// pixel row or column instead of smearing across two.
pub fn paper_rules(mode: PaperMode, viewport: &Viewport) -> Vec<RuleSegment> {
    let (w, h) = (viewport.width, viewport.height);
    match mode {
        PaperMode::Blank => Vec::new(),
        PaperMode::Lined => horizontal_rules(LINED_GAP, w, h).collect(),
        PaperMode::Squared => vertical_rules(SQUARED_CELL, w, h)
            .chain(horizontal_rules(SQUARED_CELL, w, h))
            .collect(),
    }
}

fn steps(gap: f64, limit: f64) -> impl Iterator<Item = f64> {
    // A non-finite limit would never end the iteration
    let limit = if limit.is_finite() { limit } else { 0.0 };
    (1..)
        .map(move |i: u32| f64::from(i) * gap)
        .take_while(move |v| *v < limit)
}

fn horizontal_rules(gap: f64, w: f64, h: f64) -> impl Iterator<Item = RuleSegment> {
    steps(gap, h).map(move |y| RuleSegment {
        x1: 0.0,
        y1: y + 0.5,
        x2: w,
        y2: y + 0.5,
    })
}

fn vertical_rules(gap: f64, w: f64, h: f64) -> impl Iterator<Item = RuleSegment> {
    steps(gap, w).map(move |x| RuleSegment {
        x1: x + 0.5,
        y1: 0.0,
        x2: x + 0.5,
        y2: h,
    })
}

/// Paints the paper into `ctx`, which must already be in logical units.
///
/// Always starts with an opaque base fill, then strokes every rule in a
/// single path.
pub fn render_paper(ctx: &cairo::Context, viewport: &Viewport, mode: PaperMode, base: Color) {
    let _ = ctx.save();

    ctx.set_operator(cairo::Operator::Source);
    base.with_alpha(1.0).set_source(ctx);
    let _ = ctx.paint(); // Ignore errors - a failed fill leaves the previous paper visible

    if let Some(rule_color) = mode.rule_color() {
        ctx.set_operator(cairo::Operator::Over);
        rule_color.set_source(ctx);
        ctx.set_line_width(1.0);
        for rule in paper_rules(mode, viewport) {
            ctx.move_to(rule.x1, rule.y1);
            ctx.line_to(rule.x2, rule.y2);
        }
        let _ = ctx.stroke();
    }

    let _ = ctx.restore();
}

/// Background surface. Recomputed from scratch on every repaint.
pub struct PaperLayer {
    surface: cairo::ImageSurface,
    viewport: Viewport,
    mode: PaperMode,
    base: Color,
}

impl PaperLayer {
    /// Creates and paints a paper layer.
    pub fn new(viewport: Viewport, mode: PaperMode, base: Color) -> Result<Self, SurfaceError> {
        let surface = paint_surface(&viewport, mode, base)?;
        Ok(Self {
            surface,
            viewport,
            mode,
            base,
        })
    }

    /// Fully repaints the background for a new viewport and/or mode.
    pub fn repaint(&mut self, viewport: Viewport, mode: PaperMode) -> Result<(), SurfaceError> {
        self.surface = paint_surface(&viewport, mode, self.base)?;
        self.viewport = viewport;
        self.mode = mode;
        log::debug!(
            "Repainted {} paper at {}x{} px",
            mode.name(),
            viewport.pixel_width(),
            viewport.pixel_height()
        );
        Ok(())
    }

    pub fn mode(&self) -> PaperMode {
        self.mode
    }

    pub fn viewport(&self) -> Viewport {
        self.viewport
    }

    pub fn surface(&self) -> &cairo::ImageSurface {
        &self.surface
    }

    /// Premultiplied ARGB pixels, row-major.
    pub fn pixels(&mut self) -> Result<Vec<u32>, SurfaceError> {
        read_argb_pixels(&mut self.surface)
    }

    /// Writes the background as PNG.
    pub fn write_png<W: std::io::Write>(&self, out: &mut W) -> Result<(), SurfaceError> {
        self.surface.write_to_png(out)?;
        Ok(())
    }
}

fn paint_surface(
    viewport: &Viewport,
    mode: PaperMode,
    base: Color,
) -> Result<cairo::ImageSurface, SurfaceError> {
    let surface = cairo::ImageSurface::create(
        cairo::Format::ARgb32,
        viewport.pixel_width(),
        viewport.pixel_height(),
    )?;
    {
        let ctx = cairo::Context::new(&surface)?;
        ctx.scale(viewport.pixel_density, viewport.pixel_density);
        render_paper(&ctx, viewport, mode, base);
    }
    surface.flush();
    Ok(surface)
}

/// Default base fill for every paper mode.
pub fn default_paper_base() -> Color {
    Color::from_hex(PAPER_BASE_HEX).unwrap_or(Color::new(1.0, 1.0, 1.0, 1.0))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn viewport(w: f64, h: f64) -> Viewport {
        Viewport::new(w, h, 1.0)
    }

    #[test]
    fn blank_has_no_rules() {
        assert!(paper_rules(PaperMode::Blank, &viewport(800.0, 600.0)).is_empty());
    }

    #[test]
    fn lined_rules_every_thirty_units_with_half_pixel_offset() {
        let rules = paper_rules(PaperMode::Lined, &viewport(200.0, 100.0));
        let ys: Vec<f64> = rules.iter().map(|r| r.y1).collect();
        assert_eq!(ys, vec![30.5, 60.5, 90.5]);
        assert!(rules.iter().all(|r| r.x1 == 0.0 && r.x2 == 200.0 && r.y1 == r.y2));
    }

    #[test]
    fn lined_rule_is_skipped_at_exact_height() {
        let rules = paper_rules(PaperMode::Lined, &viewport(100.0, 90.0));
        assert_eq!(rules.len(), 2);
    }

    #[test]
    fn unbounded_viewport_yields_no_rules() {
        // Bypasses Viewport::new normalisation
        let unbounded = Viewport {
            width: f64::INFINITY,
            height: f64::INFINITY,
            pixel_density: 1.0,
        };
        assert!(paper_rules(PaperMode::Squared, &unbounded).is_empty());
        assert!(paper_rules(PaperMode::Lined, &unbounded).is_empty());
    }

    #[test]
    fn squared_rules_cover_both_axes() {
        let rules = paper_rules(PaperMode::Squared, &viewport(100.0, 50.0));
        let vertical: Vec<f64> = rules
            .iter()
            .filter(|r| r.x1 == r.x2)
            .map(|r| r.x1)
            .collect();
        let horizontal: Vec<f64> = rules
            .iter()
            .filter(|r| r.y1 == r.y2)
            .map(|r| r.y1)
            .collect();
        assert_eq!(vertical, vec![24.5, 48.5, 72.5, 96.5]);
        assert_eq!(horizontal, vec![24.5, 48.5]);
    }

    #[test]
    fn rule_colors_are_translucent() {
        assert!(PaperMode::Blank.rule_color().is_none());
        let lined = PaperMode::Lined.rule_color().unwrap();
        assert_eq!(lined.to_rgb8(), [38, 83, 127]);
        assert_eq!(lined.a, 0.30);
        let squared = PaperMode::Squared.rule_color().unwrap();
        assert_eq!(squared.to_rgb8(), [25, 108, 81]);
        assert_eq!(squared.a, 0.22);
    }

    #[test]
    fn from_str_is_case_insensitive() {
        assert_eq!("Lined".parse::<PaperMode>(), Ok(PaperMode::Lined));
        assert_eq!("SQUARED".parse::<PaperMode>(), Ok(PaperMode::Squared));
        assert!("dotted".parse::<PaperMode>().is_err());
    }

    #[test]
    fn repaint_replaces_buffer_at_new_size() {
        let mut layer =
            PaperLayer::new(viewport(40.0, 40.0), PaperMode::Lined, default_paper_base()).unwrap();
        layer
            .repaint(Viewport::new(50.0, 20.0, 2.0), PaperMode::Squared)
            .unwrap();
        assert_eq!(layer.surface().width(), 100);
        assert_eq!(layer.surface().height(), 40);
        assert_eq!(layer.mode(), PaperMode::Squared);
    }
}
