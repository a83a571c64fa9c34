//! Data types for exporting the annotation layer.

use crate::draw::SurfaceError;
use std::path::PathBuf;
use thiserror::Error;

/// Status shown after a successful clipboard copy.
pub const COPIED_STATUS: &str = "Copied: transparent PNG of your writing.";

/// Status shown when no image could be produced from the annotation layer.
pub const ENCODE_FAILED_STATUS: &str = "Could not create an image from the canvas.";

/// Status shown when both the clipboard and the file fallback failed.
pub const EXPORT_FAILED_STATUS: &str = "Copy failed. Could not save the image either.";

/// Status shown when the clipboard was skipped or refused and the file fallback worked.
pub fn saved_instead_status(path: &std::path::Path) -> String {
    format!(
        "Image clipboard copy is unavailable. Saved transparent PNG to {} instead.",
        path.display()
    )
}

/// Encoded annotation layer ready for delivery.
#[derive(Debug, Clone)]
pub struct ImageArtifact {
    /// PNG bytes with a real alpha channel
    pub png: Vec<u8>,
    /// Width in backing pixels
    pub width: i32,
    /// Height in backing pixels
    pub height: i32,
    /// Name used when the artifact is written to disk
    pub filename: String,
}

/// Where an artifact ended up.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ExportDelivery {
    /// Placed on the system clipboard as `image/png`
    Clipboard,
    /// Written to a file
    Saved(PathBuf),
}

/// Result of an export request. Always produced, even on failure.
#[derive(Debug, Clone)]
pub struct ExportOutcome {
    /// User-facing status line
    pub status: String,
    /// Delivery target, or `None` when nothing was delivered
    pub delivery: Option<ExportDelivery>,
}

impl ExportOutcome {
    pub fn delivered(status: impl Into<String>, delivery: ExportDelivery) -> Self {
        Self {
            status: status.into(),
            delivery: Some(delivery),
        }
    }

    pub fn failed(status: impl Into<String>) -> Self {
        Self {
            status: status.into(),
            delivery: None,
        }
    }

    pub fn is_delivered(&self) -> bool {
        self.delivery.is_some()
    }
}

/// Errors that can occur while exporting.
#[derive(Debug, Error)]
pub enum ExportError {
    #[error("{0} is not available")]
    Unavailable(String),

    #[error("Clipboard operation failed: {0}")]
    ClipboardError(String),

    #[error("Failed to save image: {0}")]
    SaveError(#[from] std::io::Error),

    #[error("Image encoding error: {0}")]
    EncodeError(String),

    #[error("Export task failed: {0}")]
    TaskFailed(String),
}

impl From<SurfaceError> for ExportError {
    fn from(err: SurfaceError) -> Self {
        Self::EncodeError(err.to_string())
    }
}
