//! Clipboard sink for exported PNGs.

use super::sink::ExportSink;
use super::types::{ExportDelivery, ExportError, ImageArtifact};
use std::process::{Command, Stdio};
use wl_clipboard_rs::copy::{MimeType, Options, Source};

const PNG_MIME: &str = "image/png";

/// Places artifacts on the Wayland clipboard.
#[derive(Debug, Clone, Copy, Default)]
pub struct ClipboardSink;

impl ExportSink for ClipboardSink {
    fn name(&self) -> &str {
        "clipboard"
    }

    fn is_available(&self) -> bool {
        is_clipboard_available()
    }

    fn deliver(&self, artifact: &ImageArtifact) -> Result<ExportDelivery, ExportError> {
        copy_to_clipboard(&artifact.png)?;
        Ok(ExportDelivery::Clipboard)
    }
}

/// Copy PNG bytes to the Wayland clipboard.
///
/// Prefers the `wl-copy` command (from the wl-clipboard package) and falls
/// back to wl-clipboard-rs when the command cannot be used.
pub fn copy_to_clipboard(png: &[u8]) -> Result<(), ExportError> {
    log::debug!("Attempting to copy image to clipboard ({} bytes)", png.len());

    match copy_via_command(png) {
        Ok(()) => {
            log::info!("Copied image to clipboard via wl-copy");
            Ok(())
        }
        Err(cmd_err) => {
            log::warn!(
                "wl-copy command path failed ({}). Falling back to wl-clipboard-rs",
                cmd_err
            );
            copy_via_library(png).map_err(|lib_err| {
                ExportError::ClipboardError(format!(
                    "wl-copy failed: {} ; wl-clipboard-rs failed: {}",
                    cmd_err, lib_err
                ))
            })?;
            log::info!("Copied image to clipboard via wl-clipboard-rs");
            Ok(())
        }
    }
}

fn copy_via_library(png: &[u8]) -> Result<(), ExportError> {
    use wl_clipboard_rs::copy::ServeRequests;

    let mut opts = Options::new();
    // Serve one paste, then exit; keeps the data alive after the copy call returns
    opts.serve_requests(ServeRequests::Only(1));

    opts.copy(
        Source::Bytes(png.into()),
        MimeType::Specific(PNG_MIME.to_string()),
    )
    .map_err(|e| ExportError::ClipboardError(format!("wl-clipboard-rs error: {}", e)))?;

    Ok(())
}

fn copy_via_command(png: &[u8]) -> Result<(), ExportError> {
    use std::io::Write;

    let mut child = Command::new("wl-copy")
        .arg("--type")
        .arg(PNG_MIME)
        .stdin(Stdio::piped())
        .stdout(Stdio::null())
        .stderr(Stdio::piped())
        .spawn()
        .map_err(|e| {
            ExportError::ClipboardError(format!(
                "Failed to spawn wl-copy (is it installed?): {}",
                e
            ))
        })?;

    if let Some(mut stdin) = child.stdin.take() {
        stdin.write_all(png).map_err(|e| {
            ExportError::ClipboardError(format!("Failed to write to wl-copy stdin: {}", e))
        })?;
    }

    let output = child
        .wait_with_output()
        .map_err(|e| ExportError::ClipboardError(format!("Failed to wait for wl-copy: {}", e)))?;

    if !output.status.success() {
        let stderr = String::from_utf8_lossy(&output.stderr);
        return Err(ExportError::ClipboardError(format!(
            "wl-copy failed: {}",
            stderr.trim()
        )));
    }

    Ok(())
}

/// Capability probe: both copy paths need a Wayland session.
pub fn is_clipboard_available() -> bool {
    std::env::var_os("WAYLAND_DISPLAY").is_some_and(|display| !display.is_empty())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn sink_reports_its_name() {
        assert_eq!(ClipboardSink.name(), "clipboard");
    }

    #[test]
    fn availability_probe_does_not_panic() {
        // Depends on the session; only checks the probe is safe to call
        let _available = ClipboardSink.is_available();
    }
}
