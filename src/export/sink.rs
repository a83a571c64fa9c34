use std::sync::Arc;

use async_trait::async_trait;
use tokio::task;

use crate::draw::PixelSnapshot;
use crate::export::{
    clipboard::ClipboardSink,
    download::DownloadSink,
    types::{ExportDelivery, ExportError, ImageArtifact},
};

/// A destination for exported images.
///
/// `is_available` is the capability probe; the pipeline skips sinks that
/// report `false` without calling `deliver`.
pub trait ExportSink: Send + Sync {
    fn name(&self) -> &str;
    fn is_available(&self) -> bool;
    fn deliver(&self, artifact: &ImageArtifact) -> Result<ExportDelivery, ExportError>;
}

/// Turns a pixel snapshot into image bytes.
#[async_trait]
pub trait ArtifactEncoder: Send + Sync {
    async fn encode(&self, snapshot: PixelSnapshot) -> Result<Vec<u8>, ExportError>;
}

/// PNG encoder running on the blocking pool.
#[derive(Debug, Clone, Copy, Default)]
pub struct PngEncoder;

#[async_trait]
impl ArtifactEncoder for PngEncoder {
    async fn encode(&self, snapshot: PixelSnapshot) -> Result<Vec<u8>, ExportError> {
        task::spawn_blocking(move || snapshot.encode_png())
            .await
            .map_err(|e| ExportError::TaskFailed(format!("Encode task failed: {}", e)))?
            .map_err(ExportError::from)
    }
}

/// Bundle of collaborators used by the export pipeline. Each can be mocked in tests.
#[derive(Clone)]
pub struct ExportDependencies {
    pub encoder: Arc<dyn ArtifactEncoder>,
    pub clipboard: Arc<dyn ExportSink>,
    pub download: Arc<dyn ExportSink>,
}

impl ExportDependencies {
    /// Real encoder and clipboard, with downloads written to `download_dir`.
    pub fn with_download_dir(download_dir: impl Into<std::path::PathBuf>) -> Self {
        Self {
            download: Arc::new(DownloadSink::new(download_dir)),
            ..Self::default()
        }
    }
}

impl Default for ExportDependencies {
    fn default() -> Self {
        Self {
            encoder: Arc::new(PngEncoder),
            clipboard: Arc::new(ClipboardSink),
            download: Arc::new(DownloadSink::default()),
        }
    }
}
