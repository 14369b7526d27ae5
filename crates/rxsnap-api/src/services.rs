//! Upload pipeline: stage locally, resolve folders, push to the drive.
//!
//! Effect order matches the delivery flow: the photo is staged to the local
//! upload directory first, then the month and pharmacy folders are resolved
//! (created lazily), then the staged file is uploaded under the pharmacy
//! folder. The staged copy is deleted only after the remote upload is
//! confirmed; on remote failure it stays behind for manual recovery.

use rxsnap_core::{AppError, DeliveryPhoto};

use crate::state::AppState;

/// Where a photo ended up, for the confirmation message.
#[derive(Debug, Clone)]
pub struct UploadOutcome {
    pub month: String,
    pub pharmacy: String,
    pub filename: String,
    pub file_id: String,
}

impl UploadOutcome {
    /// Plain-text confirmation shown by the form's alert.
    pub fn confirmation(&self) -> String {
        format!(
            "File successfully uploaded to {}/{} as {}",
            self.month, self.pharmacy, self.filename
        )
    }
}

pub struct UploadService<'a> {
    state: &'a AppState,
}

impl<'a> UploadService<'a> {
    pub fn new(state: &'a AppState) -> Self {
        UploadService { state }
    }

    /// Stage and upload a validated delivery photo.
    pub async fn store(&self, photo: DeliveryPhoto) -> Result<UploadOutcome, AppError> {
        let filename = photo.filename();
        let month = photo.month_name();

        tokio::fs::create_dir_all(&self.state.config.upload_dir).await?;
        let staged_path = self.state.config.upload_dir.join(&filename);
        tokio::fs::write(&staged_path, &photo.data).await?;

        tracing::debug!(path = %staged_path.display(), "Photo staged locally");

        let root = &self.state.config.root_folder_id;
        let month_id = self
            .state
            .resolver
            .resolve_or_create(root, month)
            .await
            .map_err(AppError::from)?;
        let pharmacy_id = self
            .state
            .resolver
            .resolve_or_create(&month_id, photo.pharmacy.as_str())
            .await
            .map_err(AppError::from)?;

        let staged = tokio::fs::read(&staged_path).await?;
        let file_id = self
            .state
            .drive
            .upload_file(&pharmacy_id, &filename, "image/jpeg", staged)
            .await
            .map_err(AppError::from)?;

        // Remote copy confirmed; the staged file has served its purpose.
        if let Err(e) = tokio::fs::remove_file(&staged_path).await {
            tracing::warn!(path = %staged_path.display(), error = %e, "Failed to remove staged photo");
        }

        tracing::info!(
            month = %month,
            pharmacy = %photo.pharmacy,
            filename = %filename,
            file_id = %file_id,
            size_bytes = photo.data.len(),
            "Delivery photo uploaded"
        );

        Ok(UploadOutcome {
            month: month.to_string(),
            pharmacy: photo.pharmacy.to_string(),
            filename,
            file_id,
        })
    }
}
