use std::{fmt, sync::Arc};

use chrono::{DateTime, Utc};
use tokio::task;

use crate::draw::PixelSnapshot;
use crate::export::{
    download::download_filename,
    sink::{ExportDependencies, ExportSink},
    types::{
        COPIED_STATUS, ENCODE_FAILED_STATUS, EXPORT_FAILED_STATUS, ExportDelivery, ExportError,
        ExportOutcome, ImageArtifact, saved_instead_status,
    },
};

/// One export of the annotation layer.
#[derive(Clone)]
pub struct ExportRequest {
    pub snapshot: PixelSnapshot,
    /// Try the clipboard before falling back to a file
    pub use_clipboard: bool,
    /// Timestamp used for the fallback filename
    pub requested_at: DateTime<Utc>,
}

impl ExportRequest {
    pub fn new(snapshot: PixelSnapshot, use_clipboard: bool) -> Self {
        Self {
            snapshot,
            use_clipboard,
            requested_at: Utc::now(),
        }
    }
}

impl fmt::Debug for ExportRequest {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ExportRequest")
            .field("width", &self.snapshot.width())
            .field("height", &self.snapshot.height())
            .field("use_clipboard", &self.use_clipboard)
            .field("requested_at", &self.requested_at)
            .finish()
    }
}

/// Encodes the annotation layer and delivers it: clipboard first, file second.
///
/// Never returns an error. Every failure ends in a status line, and the
/// drawing surface is untouched either way. The clipboard write follows the
/// encode directly, with no other await in between.
pub async fn export_transparent_image(
    request: ExportRequest,
    dependencies: Arc<ExportDependencies>,
) -> ExportOutcome {
    log::info!("Starting export: {:?}", request);

    let (width, height) = (request.snapshot.width(), request.snapshot.height());
    let png = match dependencies.encoder.encode(request.snapshot).await {
        Ok(png) => png,
        Err(err) => {
            log::error!("Failed to encode annotation layer: {}", err);
            return ExportOutcome::failed(ENCODE_FAILED_STATUS);
        }
    };

    let artifact = ImageArtifact {
        png,
        width,
        height,
        filename: download_filename(request.requested_at),
    };
    log::debug!(
        "Encoded {}x{} PNG ({} bytes)",
        width,
        height,
        artifact.png.len()
    );

    if request.use_clipboard {
        match deliver(Arc::clone(&dependencies.clipboard), artifact.clone()).await {
            Ok(delivery) => {
                log::info!("Export copied to clipboard");
                return ExportOutcome::delivered(COPIED_STATUS, delivery);
            }
            Err(err) => {
                log::warn!("Clipboard export failed ({}); falling back to download", err);
            }
        }
    } else {
        log::debug!("Clipboard export disabled; going straight to download");
    }

    match deliver(Arc::clone(&dependencies.download), artifact).await {
        Ok(delivery) => {
            let status = match &delivery {
                ExportDelivery::Saved(path) => saved_instead_status(path),
                ExportDelivery::Clipboard => COPIED_STATUS.to_string(),
            };
            log::info!("Export delivered via {}", dependencies.download.name());
            ExportOutcome::delivered(status, delivery)
        }
        Err(err) => {
            log::error!("Download fallback failed: {}", err);
            ExportOutcome::failed(EXPORT_FAILED_STATUS)
        }
    }
}

/// Probes and delivers on the blocking pool; both may spawn processes or touch disk.
async fn deliver(
    sink: Arc<dyn ExportSink>,
    artifact: ImageArtifact,
) -> Result<ExportDelivery, ExportError> {
    task::spawn_blocking(move || {
        if !sink.is_available() {
            return Err(ExportError::Unavailable(sink.name().to_string()));
        }
        sink.deliver(&artifact)
    })
    .await
    .map_err(|e| ExportError::TaskFailed(format!("Delivery task failed: {}", e)))?
}
