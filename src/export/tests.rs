use std::{
    path::PathBuf,
    sync::{Arc, Mutex},
};

use async_trait::async_trait;
use chrono::{TimeZone, Utc};

use super::{
    download::DownloadSink,
    pipeline::{ExportRequest, export_transparent_image},
    sink::{ArtifactEncoder, ExportDependencies, ExportSink, PngEncoder},
    types::{
        COPIED_STATUS, ENCODE_FAILED_STATUS, EXPORT_FAILED_STATUS, ExportDelivery, ExportError,
        ImageArtifact,
    },
};
use crate::draw::{AnnotationSurface, Compositor, PixelSnapshot, Point, Viewport};
use crate::input::DrawingConfig;

const PNG_SIGNATURE: [u8; 8] = [137, 80, 78, 71, 13, 10, 26, 10];

#[derive(Clone)]
struct MemorySink {
    available: bool,
    should_fail: bool,
    delivery: ExportDelivery,
    received: Arc<Mutex<Vec<ImageArtifact>>>,
}

impl MemorySink {
    fn clipboard(available: bool, should_fail: bool) -> Self {
        Self {
            available,
            should_fail,
            delivery: ExportDelivery::Clipboard,
            received: Arc::new(Mutex::new(Vec::new())),
        }
    }

    fn download(should_fail: bool) -> Self {
        Self {
            available: true,
            should_fail,
            delivery: ExportDelivery::Saved(PathBuf::from("/tmp/memory/writing.png")),
            received: Arc::new(Mutex::new(Vec::new())),
        }
    }

    fn calls(&self) -> usize {
        self.received.lock().unwrap().len()
    }
}

impl ExportSink for MemorySink {
    fn name(&self) -> &str {
        "memory"
    }

    fn is_available(&self) -> bool {
        self.available
    }

    fn deliver(&self, artifact: &ImageArtifact) -> Result<ExportDelivery, ExportError> {
        self.received.lock().unwrap().push(artifact.clone());
        if self.should_fail {
            Err(ExportError::ClipboardError("memory sink refused".to_string()))
        } else {
            Ok(self.delivery.clone())
        }
    }
}

struct FailingEncoder;

#[async_trait]
impl ArtifactEncoder for FailingEncoder {
    async fn encode(&self, _snapshot: PixelSnapshot) -> Result<Vec<u8>, ExportError> {
        Err(ExportError::EncodeError("no blob".to_string()))
    }
}

fn inked_snapshot() -> PixelSnapshot {
    let mut surface = AnnotationSurface::new(Viewport::new(40.0, 20.0, 1.0)).unwrap();
    let params = DrawingConfig::default().with_pen_size(6.0).stroke_params();
    surface
        .composite_segment(Point::new(10.0, 10.0), Point::new(30.0, 10.0), &params)
        .unwrap();
    surface.snapshot().unwrap()
}

fn deps(clipboard: &MemorySink, download: &MemorySink) -> Arc<ExportDependencies> {
    Arc::new(ExportDependencies {
        encoder: Arc::new(PngEncoder),
        clipboard: Arc::new(clipboard.clone()),
        download: Arc::new(download.clone()),
    })
}

#[tokio::test]
async fn clipboard_success_skips_download() {
    let clipboard = MemorySink::clipboard(true, false);
    let download = MemorySink::download(false);

    let outcome = export_transparent_image(
        ExportRequest::new(inked_snapshot(), true),
        deps(&clipboard, &download),
    )
    .await;

    assert_eq!(outcome.status, COPIED_STATUS);
    assert_eq!(outcome.delivery, Some(ExportDelivery::Clipboard));
    assert_eq!(clipboard.calls(), 1);
    assert_eq!(download.calls(), 0);

    let received = clipboard.received.lock().unwrap();
    assert_eq!(&received[0].png[0..8], &PNG_SIGNATURE);
    assert_eq!((received[0].width, received[0].height), (40, 20));
}

#[tokio::test]
async fn unavailable_clipboard_falls_back_to_download() {
    let clipboard = MemorySink::clipboard(false, false);
    let download = MemorySink::download(false);

    let outcome = export_transparent_image(
        ExportRequest::new(inked_snapshot(), true),
        deps(&clipboard, &download),
    )
    .await;

    assert_eq!(clipboard.calls(), 0, "unavailable sink must not be called");
    assert_eq!(download.calls(), 1);
    assert!(outcome.is_delivered());
    assert!(
        outcome
            .status
            .starts_with("Image clipboard copy is unavailable."),
        "unexpected status: {}",
        outcome.status
    );
    assert!(outcome.status.contains("/tmp/memory/writing.png"));
}

#[tokio::test]
async fn rejected_clipboard_falls_back_to_download() {
    let clipboard = MemorySink::clipboard(true, true);
    let download = MemorySink::download(false);

    let outcome = export_transparent_image(
        ExportRequest::new(inked_snapshot(), true),
        deps(&clipboard, &download),
    )
    .await;

    assert_eq!(clipboard.calls(), 1);
    assert_eq!(download.calls(), 1);
    assert_eq!(
        outcome.delivery,
        Some(ExportDelivery::Saved(PathBuf::from("/tmp/memory/writing.png")))
    );
    // Both sinks saw the same bytes
    assert_eq!(
        clipboard.received.lock().unwrap()[0].png,
        download.received.lock().unwrap()[0].png
    );
}

#[tokio::test]
async fn encode_failure_reports_status_without_delivery() {
    let clipboard = MemorySink::clipboard(true, false);
    let download = MemorySink::download(false);
    let dependencies = Arc::new(ExportDependencies {
        encoder: Arc::new(FailingEncoder),
        clipboard: Arc::new(clipboard.clone()),
        download: Arc::new(download.clone()),
    });

    let outcome =
        export_transparent_image(ExportRequest::new(inked_snapshot(), true), dependencies).await;

    assert_eq!(outcome.status, ENCODE_FAILED_STATUS);
    assert!(outcome.delivery.is_none());
    assert_eq!(clipboard.calls(), 0);
    assert_eq!(download.calls(), 0);
}

#[tokio::test]
async fn double_failure_reports_status() {
    let clipboard = MemorySink::clipboard(true, true);
    let download = MemorySink::download(true);

    let outcome = export_transparent_image(
        ExportRequest::new(inked_snapshot(), true),
        deps(&clipboard, &download),
    )
    .await;

    assert_eq!(outcome.status, EXPORT_FAILED_STATUS);
    assert!(!outcome.is_delivered());
}

#[tokio::test]
async fn clipboard_can_be_skipped() {
    let clipboard = MemorySink::clipboard(true, false);
    let download = MemorySink::download(false);

    let outcome = export_transparent_image(
        ExportRequest::new(inked_snapshot(), false),
        deps(&clipboard, &download),
    )
    .await;

    assert_eq!(clipboard.calls(), 0);
    assert_eq!(download.calls(), 1);
    assert!(outcome.is_delivered());
}

#[tokio::test]
async fn artifact_is_named_from_request_time() {
    let clipboard = MemorySink::clipboard(false, false);
    let download = MemorySink::download(false);
    let request = ExportRequest {
        snapshot: inked_snapshot(),
        use_clipboard: true,
        requested_at: Utc.with_ymd_and_hms(2026, 10, 17, 9, 0, 1).unwrap(),
    };

    export_transparent_image(request, deps(&clipboard, &download)).await;

    assert_eq!(
        download.received.lock().unwrap()[0].filename,
        "writing-2026-10-17T09-00-01-000Z.png"
    );
}

#[tokio::test]
async fn saved_png_keeps_transparency_outside_strokes() {
    let temp = tempfile::tempdir().unwrap();
    let clipboard = MemorySink::clipboard(false, false);
    let dependencies = Arc::new(ExportDependencies {
        encoder: Arc::new(PngEncoder),
        clipboard: Arc::new(clipboard),
        download: Arc::new(DownloadSink::new(temp.path())),
    });

    let outcome =
        export_transparent_image(ExportRequest::new(inked_snapshot(), true), dependencies).await;

    let Some(ExportDelivery::Saved(path)) = outcome.delivery else {
        panic!("expected a saved file, got {:?}", outcome.status);
    };
    let mut file = std::fs::File::open(&path).unwrap();
    let mut decoded = cairo::ImageSurface::create_from_png(&mut file).unwrap();
    assert_eq!((decoded.width(), decoded.height()), (40, 20));

    let stride = decoded.stride() as usize;
    let data = decoded.data().unwrap();
    let alpha = |x: usize, y: usize| {
        let offset = y * stride + x * 4;
        let px = u32::from_ne_bytes([
            data[offset],
            data[offset + 1],
            data[offset + 2],
            data[offset + 3],
        ]);
        (px >> 24) as u8
    };
    assert_eq!(alpha(1, 1), 0, "corner must stay transparent");
    assert_eq!(alpha(20, 10), 255, "stroke must be opaque");
}
