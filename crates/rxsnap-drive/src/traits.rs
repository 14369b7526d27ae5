//! Drive abstraction trait
//!
//! This module defines the `Drive` trait all remote-drive backends implement.
//! The web service and the bulk downloader take the drive as an injected
//! `Arc<dyn Drive>`, so tests can substitute the in-memory backend.

use async_trait::async_trait;
use rxsnap_core::AppError;
use thiserror::Error;

/// Drive operation errors
#[derive(Debug, Error)]
pub enum DriveError {
    #[error("Authentication failed: {0}")]
    Auth(String),

    #[error("Drive API error: {0}")]
    Api(String),

    #[error("Not found: {0}")]
    NotFound(String),

    #[error("Unexpected response: {0}")]
    InvalidResponse(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

/// Result type for drive operations
pub type DriveResult<T> = Result<T, DriveError>;

/// Single place for the drive-to-application error mapping, shared by the
/// web service and the downloader.
impl From<DriveError> for AppError {
    fn from(err: DriveError) -> Self {
        match err {
            DriveError::NotFound(msg) => AppError::NotFound(msg),
            DriveError::Io(err) => AppError::Io(err),
            other => AppError::Drive(other.to_string()),
        }
    }
}

/// A folder or file entry as listed by the drive.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DriveEntry {
    /// Opaque identifier assigned by the drive.
    pub id: String,
    /// Display name (folder name or original filename).
    pub name: String,
}

/// Remote drive abstraction.
///
/// Identifiers are opaque strings; listings exclude trashed entries. Errors
/// propagate uninterpreted, with no retry layered on top.
#[async_trait]
pub trait Drive: Send + Sync {
    /// List the folder-type children of a folder.
    async fn list_child_folders(&self, parent_id: &str) -> DriveResult<Vec<DriveEntry>>;

    /// Create a folder under a parent and return its id.
    async fn create_folder(&self, parent_id: &str, name: &str) -> DriveResult<String>;

    /// Upload a file under a parent folder and return its id.
    async fn upload_file(
        &self,
        parent_id: &str,
        name: &str,
        content_type: &str,
        data: Vec<u8>,
    ) -> DriveResult<String>;

    /// List the non-folder children of a folder.
    async fn list_files(&self, parent_id: &str) -> DriveResult<Vec<DriveEntry>>;

    /// Download a file's content by id.
    async fn download_file(&self, file_id: &str) -> DriveResult<Vec<u8>>;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn not_found_maps_to_app_not_found() {
        let app = AppError::from(DriveError::NotFound("folder June".into()));
        assert!(matches!(app, AppError::NotFound(_)));
        assert_eq!(app.http_status_code(), 404);
    }

    #[test]
    fn auth_and_api_failures_map_to_drive_error() {
        let app = AppError::from(DriveError::Auth("expired".into()));
        assert!(matches!(app, AppError::Drive(_)));
        assert_eq!(app.http_status_code(), 502);

        let app = AppError::from(DriveError::Api("rate limited".into()));
        assert!(matches!(app, AppError::Drive(_)));
    }

    #[test]
    fn io_failures_keep_their_source() {
        let io = std::io::Error::new(std::io::ErrorKind::Other, "disk full");
        let app = AppError::from(DriveError::Io(io));
        assert!(matches!(app, AppError::Io(_)));
        assert_eq!(app.http_status_code(), 500);
    }
}
