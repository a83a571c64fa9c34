//! Export of the annotation layer as a transparent PNG.
//!
//! This module provides:
//! - PNG encoding of the annotation buffer only (never the paper)
//! - Clipboard delivery as `image/png`
//! - A file "download" fallback with timestamped filenames
//! - A status line for every outcome; exports never fail loudly

pub mod clipboard;
pub mod download;
pub mod pipeline;
pub mod sink;
pub mod types;

#[cfg(test)]
mod tests;

pub use clipboard::ClipboardSink;
pub use download::{DownloadSink, download_filename};
pub use pipeline::{ExportRequest, export_transparent_image};
pub use sink::{ArtifactEncoder, ExportDependencies, ExportSink, PngEncoder};
pub use types::{ExportDelivery, ExportError, ExportOutcome, ImageArtifact};
