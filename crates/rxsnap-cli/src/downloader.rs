//! Bulk download of a month/pharmacy folder into a local mirror.
//!
//! Mirrors the upload path's folder resolution, read-only: an absent month
//! or pharmacy folder is a user-facing error, never created. Files are
//! fetched sequentially, overwriting same-named local files; progress is
//! reported per file and as a terminal count. There is no partial-resume.

use std::path::{Path, PathBuf};
use std::sync::Arc;

use rxsnap_core::naming::sanitize_filename;
use rxsnap_core::AppError;
use rxsnap_drive::{Drive, FolderResolver};

/// Outcome of a bulk download.
#[derive(Debug, Clone)]
pub struct DownloadReport {
    pub files_written: usize,
    pub dest: PathBuf,
}

/// Download every photo under `<root>/<month>/<pharmacy>` into
/// `<dest>/<month>/<pharmacy>/`, returning the number of files written.
pub async fn download_all(
    drive: Arc<dyn Drive>,
    root_id: &str,
    month: &str,
    pharmacy: &str,
    dest: &Path,
) -> Result<DownloadReport, AppError> {
    let resolver = FolderResolver::new(drive.clone());

    let month_id = resolver
        .resolve_existing(root_id, month)
        .await
        .map_err(AppError::from)?
        .ok_or_else(|| AppError::NotFound(format!("Month folder '{}' not found on drive", month)))?;

    let pharmacy_id = resolver
        .resolve_existing(&month_id, pharmacy)
        .await
        .map_err(AppError::from)?
        .ok_or_else(|| {
            AppError::NotFound(format!(
                "Pharmacy folder '{}' not found under '{}'",
                pharmacy, month
            ))
        })?;

    let files = drive.list_files(&pharmacy_id).await.map_err(AppError::from)?;
    let total = files.len();

    let mirror = dest.join(month).join(pharmacy);
    tokio::fs::create_dir_all(&mirror).await?;

    let mut files_written = 0;
    for entry in files {
        let data = drive.download_file(&entry.id).await.map_err(AppError::from)?;
        let local = mirror.join(sanitize_filename(&entry.name));
        tokio::fs::write(&local, data).await?;
        files_written += 1;
        tracing::info!(
            file = %entry.name,
            progress = format!("{}/{}", files_written, total),
            "Downloaded"
        );
    }

    tracing::info!(
        month = %month,
        pharmacy = %pharmacy,
        files_written,
        dest = %mirror.display(),
        "Download complete"
    );

    Ok(DownloadReport {
        files_written,
        dest: mirror,
    })
}
