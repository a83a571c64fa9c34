//! RGBA color type, hex parsing, and the swatch palette.

use thiserror::Error;

/// Represents an RGBA color with floating-point components.
///
/// All components are in the range 0.0 (minimum) to 1.0 (maximum).
///
/// # Examples
///
/// ```
/// use paperpad::draw::Color;
/// let ink = Color::from_hex("#101010").unwrap();
/// let marker = ink.with_alpha(0.75);
/// assert_eq!(marker.a, 0.75);
/// ```
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Color {
    /// Red component (0.0 = no red, 1.0 = full red)
    pub r: f64,
    /// Green component (0.0 = no green, 1.0 = full green)
    pub g: f64,
    /// Blue component (0.0 = no blue, 1.0 = full blue)
    pub b: f64,
    /// Alpha/transparency (0.0 = fully transparent, 1.0 = fully opaque)
    pub a: f64,
}

/// Errors produced while parsing hex color strings.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum ColorError {
    #[error("color '{0}' must have 3 or 6 hex digits")]
    InvalidLength(String),

    #[error("color '{0}' contains non-hex characters")]
    InvalidDigit(String),
}

impl Color {
    /// Creates a new color from RGBA components.
    pub const fn new(r: f64, g: f64, b: f64, a: f64) -> Self {
        Self { r, g, b, a }
    }

    /// Creates an opaque color from 8-bit channels.
    pub fn from_rgb8([r, g, b]: [u8; 3]) -> Self {
        Self {
            r: f64::from(r) / 255.0,
            g: f64::from(g) / 255.0,
            b: f64::from(b) / 255.0,
            a: 1.0,
        }
    }

    /// Parses `#rgb`, `#rrggbb` (the `#` is optional) into an opaque color.
    pub fn from_hex(hex: &str) -> Result<Self, ColorError> {
        parse_hex_rgb(hex).map(Self::from_rgb8)
    }

    /// Returns the same color with its alpha replaced.
    pub fn with_alpha(self, alpha: f64) -> Self {
        Self {
            a: alpha.clamp(0.0, 1.0),
            ..self
        }
    }

    /// 8-bit channels, rounded.
    pub fn to_rgb8(&self) -> [u8; 3] {
        let channel = |v: f64| (v.clamp(0.0, 1.0) * 255.0).round() as u8;
        [channel(self.r), channel(self.g), channel(self.b)]
    }

    /// Lowercase `#rrggbb` form, ignoring alpha.
    pub fn to_hex(&self) -> String {
        let [r, g, b] = self.to_rgb8();
        format!("#{r:02x}{g:02x}{b:02x}")
    }

    /// CSS-style `rgba(r, g, b, a)` string.
    pub fn to_css_rgba(&self) -> String {
        let [r, g, b] = self.to_rgb8();
        format!("rgba({}, {}, {}, {})", r, g, b, self.a)
    }

    pub(crate) fn set_source(&self, ctx: &cairo::Context) {
        ctx.set_source_rgba(self.r, self.g, self.b, self.a);
    }
}

/// Parses a 3- or 6-digit hex RGB string into 8-bit channels.
///
/// Shorthand digits are doubled, so `#fa0` reads as `#ffaa00`.
pub fn parse_hex_rgb(hex: &str) -> Result<[u8; 3], ColorError> {
    let digits = hex.trim().trim_start_matches('#');
    let full: String = match digits.len() {
        3 => digits.chars().flat_map(|c| [c, c]).collect(),
        6 => digits.to_string(),
        _ => return Err(ColorError::InvalidLength(hex.to_string())),
    };

    // from_str_radix tolerates a leading '+', so check digits explicitly.
    if !full.chars().all(|c| c.is_ascii_hexdigit()) {
        return Err(ColorError::InvalidDigit(hex.to_string()));
    }
    let value =
        u32::from_str_radix(&full, 16).map_err(|_| ColorError::InvalidDigit(hex.to_string()))?;

    Ok([
        ((value >> 16) & 0xff) as u8,
        ((value >> 8) & 0xff) as u8,
        (value & 0xff) as u8,
    ])
}

/// Converts a hex color plus alpha into a CSS `rgba(...)` string.
///
/// ```
/// use paperpad::draw::color::hex_to_rgba;
/// assert_eq!(hex_to_rgba("#101010", 0.75).unwrap(), "rgba(16, 16, 16, 0.75)");
/// ```
pub fn hex_to_rgba(hex: &str, alpha: f64) -> Result<String, ColorError> {
    let [r, g, b] = parse_hex_rgb(hex)?;
    Ok(format!("rgba({}, {}, {}, {})", r, g, b, alpha))
}

// ============================================================================
// Palette
// ============================================================================

/// Default ink color.
pub const DEFAULT_INK_HEX: &str = "#101010";

/// Default paper base fill.
pub const PAPER_BASE_HEX: &str = "#fefcf8";

/// Swatches offered next to the free-form color picker.
pub const PALETTE: [&str; 6] = [
    DEFAULT_INK_HEX,
    "#1d4ed8",
    "#b91c1c",
    "#15803d",
    "#7c3aed",
    "#ea580c",
];

/// Fully transparent color.
pub const TRANSPARENT: Color = Color::new(0.0, 0.0, 0.0, 0.0);

/// Opaque black, used as the eraser source.
pub const BLACK: Color = Color::new(0.0, 0.0, 0.0, 1.0);
