//! Configuration file support for paperpad.
//!
//! This module handles loading and validating user settings from the configuration file
//! located at `~/.config/paperpad/config.toml`. Settings include the starting tool state,
//! paper style, and export preferences.
//!
//! If no config file exists, sensible defaults are used automatically.

pub mod enums;
pub mod types;

// Re-export commonly used types at module level
pub use enums::ColorSpec;
pub use types::{DrawingSettings, ExportSettings, PaperSettings};

use crate::draw::color::{DEFAULT_INK_HEX, PAPER_BASE_HEX};
use crate::draw::{Color, PaperMode, PenStyle};
use crate::export::download::{default_download_directory, expand_tilde};
use crate::input::drawing::{ERASER_SIZE_RANGE, PEN_SIZE_RANGE, clamp_to};
use crate::input::{DrawingConfig, ToolMode};
use anyhow::{Context, Result};
use log::{debug, info};
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

/// Main configuration structure containing all user settings.
///
/// # Example TOML
/// ```toml
/// [drawing]
/// tool = "pen"
/// pen_style = "marker"
/// color = "#1d4ed8"
/// pen_size = 4.0
/// eraser_size = 24.0
///
/// [paper]
/// mode = "lined"
/// base_color = "#fefcf8"
///
/// [export]
/// download_directory = "~/Pictures/Notes"
/// prefer_clipboard = true
/// ```
#[derive(Debug, Serialize, Deserialize, Default, JsonSchema)]
pub struct Config {
    /// Starting tool state (tool, style, color, sizes)
    #[serde(default)]
    pub drawing: DrawingSettings,

    /// Paper background
    #[serde(default)]
    pub paper: PaperSettings,

    /// Export destinations
    #[serde(default)]
    pub export: ExportSettings,
}

impl Config {
    /// Validates and clamps all configuration values to acceptable ranges.
    ///
    /// Invalid values are clamped or replaced with defaults and a warning is logged.
    ///
    /// Validated ranges:
    /// - `pen_size`: 1.0 - 40.0
    /// - `eraser_size`: 4.0 - 120.0
    fn validate_and_clamp(&mut self) {
        if !PEN_SIZE_RANGE.contains(&self.drawing.pen_size) {
            log::warn!(
                "Invalid pen_size {:.1}, clamping to 1.0-40.0 range",
                self.drawing.pen_size
            );
            self.drawing.pen_size = clamp_to(self.drawing.pen_size, &PEN_SIZE_RANGE);
        }

        if !ERASER_SIZE_RANGE.contains(&self.drawing.eraser_size) {
            log::warn!(
                "Invalid eraser_size {:.1}, clamping to 4.0-120.0 range",
                self.drawing.eraser_size
            );
            self.drawing.eraser_size = clamp_to(self.drawing.eraser_size, &ERASER_SIZE_RANGE);
        }

        if self.drawing.tool.parse::<ToolMode>().is_err() {
            log::warn!(
                "Invalid tool '{}', falling back to 'pen'",
                self.drawing.tool
            );
            self.drawing.tool = "pen".to_string();
        }

        if self.drawing.pen_style.parse::<PenStyle>().is_err() {
            log::warn!(
                "Invalid pen_style '{}', falling back to 'fine'",
                self.drawing.pen_style
            );
            self.drawing.pen_style = "fine".to_string();
        }

        if self.paper.mode.parse::<PaperMode>().is_err() {
            log::warn!(
                "Invalid paper mode '{}', falling back to 'blank'",
                self.paper.mode
            );
            self.paper.mode = "blank".to_string();
        }

        if self.drawing.color.try_to_color().is_none() {
            log::warn!(
                "Invalid drawing color {:?}, falling back to '{}'",
                self.drawing.color,
                DEFAULT_INK_HEX
            );
            self.drawing.color = ColorSpec::Hex(DEFAULT_INK_HEX.to_string());
        }

        if self.paper.base_color.try_to_color().is_none() {
            log::warn!(
                "Invalid paper base_color {:?}, falling back to '{}'",
                self.paper.base_color,
                PAPER_BASE_HEX
            );
            self.paper.base_color = ColorSpec::Hex(PAPER_BASE_HEX.to_string());
        }
    }

    /// Starting drawing settings.
    pub fn drawing_config(&self) -> DrawingConfig {
        let defaults = DrawingConfig::default();
        DrawingConfig {
            tool: self.drawing.tool.parse().unwrap_or_default(),
            pen_style: PenStyle::from_name_or_default(&self.drawing.pen_style),
            color: self.drawing.color.to_color_or(defaults.color),
            ..defaults
        }
        .with_pen_size(self.drawing.pen_size)
        .with_eraser_size(self.drawing.eraser_size)
    }

    /// Starting paper mode.
    pub fn paper_mode(&self) -> PaperMode {
        self.paper.mode.parse().unwrap_or_default()
    }

    /// Opaque paper base fill.
    pub fn paper_base(&self) -> Color {
        self.paper
            .base_color
            .to_color_or(crate::draw::paper::default_paper_base())
    }

    /// Directory used by the file fallback.
    pub fn download_directory(&self) -> PathBuf {
        let configured = self.export.download_directory.trim();
        if configured.is_empty() {
            default_download_directory()
        } else {
            expand_tilde(configured)
        }
    }

    /// Returns the path to the configuration file.
    ///
    /// The config file is located at `~/.config/paperpad/config.toml`.
    ///
    /// # Errors
    /// Returns an error if the config directory cannot be determined (e.g., HOME not set).
    pub fn get_config_path() -> Result<PathBuf> {
        let config_dir = dirs::config_dir()
            .context("Could not find config directory")?
            .join("paperpad");

        Ok(config_dir.join("config.toml"))
    }

    /// Loads configuration from the default path, or returns defaults if not found.
    ///
    /// # Errors
    /// Returns an error if:
    /// - The config directory path cannot be determined
    /// - The file exists but cannot be read
    /// - The file exists but contains invalid TOML syntax
    pub fn load() -> Result<Self> {
        let config_path = Self::get_config_path()?;

        if !config_path.exists() {
            info!("Config file not found, using defaults");
            debug!("Expected config at: {}", config_path.display());
            return Ok(Self::default());
        }

        Self::load_from(&config_path)
    }

    /// Loads and validates configuration from an explicit path.
    pub fn load_from(config_path: &Path) -> Result<Self> {
        let config_str = fs::read_to_string(config_path)
            .with_context(|| format!("Failed to read config from {}", config_path.display()))?;

        let mut config: Config = toml::from_str(&config_str)
            .with_context(|| format!("Failed to parse config from {}", config_path.display()))?;

        config.validate_and_clamp();

        info!("Loaded config from {}", config_path.display());
        debug!("Config: {:?}", config);

        Ok(config)
    }

    /// Saves the configuration to the default path, creating the directory if needed.
    ///
    /// # Errors
    /// Returns an error if:
    /// - The config directory cannot be created
    /// - The config cannot be serialized to TOML
    /// - The file cannot be written
    pub fn save(&self) -> Result<()> {
        self.save_to(&Self::get_config_path()?)
    }

    /// Saves the configuration to an explicit path.
    pub fn save_to(&self, config_path: &Path) -> Result<()> {
        if let Some(parent) = config_path.parent() {
            fs::create_dir_all(parent).context("Failed to create config directory")?;
        }

        let config_str = toml::to_string_pretty(self).context("Failed to serialize config")?;

        fs::write(config_path, config_str)
            .with_context(|| format!("Failed to write config to {}", config_path.display()))?;

        info!("Saved config to {}", config_path.display());
        Ok(())
    }

    /// JSON schema describing the config file.
    pub fn json_schema() -> schemars::Schema {
        schemars::schema_for!(Config)
    }
}
