//! File "download" sink used when the clipboard cannot take the image.

use super::sink::ExportSink;
use super::types::{ExportDelivery, ExportError, ImageArtifact};
use chrono::{DateTime, Utc};
use std::fs;
use std::path::{Path, PathBuf};

/// Writes artifacts into a directory, creating it on demand.
#[derive(Debug, Clone)]
pub struct DownloadSink {
    directory: PathBuf,
}

impl DownloadSink {
    pub fn new(directory: impl Into<PathBuf>) -> Self {
        Self {
            directory: directory.into(),
        }
    }

    pub fn directory(&self) -> &Path {
        &self.directory
    }
}

impl Default for DownloadSink {
    fn default() -> Self {
        Self::new(default_download_directory())
    }
}

impl ExportSink for DownloadSink {
    fn name(&self) -> &str {
        "download"
    }

    fn is_available(&self) -> bool {
        !self.directory.as_os_str().is_empty()
    }

    fn deliver(&self, artifact: &ImageArtifact) -> Result<ExportDelivery, ExportError> {
        save_artifact(artifact, &self.directory).map(ExportDelivery::Saved)
    }
}

/// The user's download directory, or the current directory when unknown.
pub fn default_download_directory() -> PathBuf {
    dirs::download_dir().unwrap_or_else(|| PathBuf::from("."))
}

/// Builds `writing-<timestamp>.png` from an ISO-8601 UTC timestamp with
/// `:` and `.` replaced by `-` so the name is valid on every filesystem.
pub fn download_filename(now: DateTime<Utc>) -> String {
    let stamp = now
        .format("%Y-%m-%dT%H:%M:%S%.3fZ")
        .to_string()
        .replace([':', '.'], "-");
    format!("writing-{}.png", stamp)
}

/// Ensure the target directory exists, creating it if necessary.
pub fn ensure_directory_exists(directory: &Path) -> Result<PathBuf, ExportError> {
    if !directory.exists() {
        log::info!("Creating export directory: {}", directory.display());
        fs::create_dir_all(directory)?;
    }

    let canonical = directory
        .canonicalize()
        .unwrap_or_else(|_| directory.to_path_buf());

    Ok(canonical)
}

/// Write the artifact into `directory` under its own filename.
pub fn save_artifact(artifact: &ImageArtifact, directory: &Path) -> Result<PathBuf, ExportError> {
    let directory = ensure_directory_exists(directory)?;
    let file_path = directory.join(&artifact.filename);

    log::info!(
        "Saving transparent PNG to: {} ({} bytes)",
        file_path.display(),
        artifact.png.len()
    );

    fs::write(&file_path, &artifact.png)?;

    // User read/write only
    #[cfg(unix)]
    {
        use std::fs::Permissions;
        use std::os::unix::fs::PermissionsExt;
        fs::set_permissions(&file_path, Permissions::from_mode(0o600))?;
    }

    Ok(file_path)
}

/// Expand tilde (~) in path strings.
pub fn expand_tilde(path: &str) -> PathBuf {
    if let Some(stripped) = path.strip_prefix("~/")
        && let Some(home) = dirs::home_dir()
    {
        return home.join(stripped);
    }
    PathBuf::from(path)
}
