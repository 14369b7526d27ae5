//! Compile-time constants shared across the workspace.

/// Drive folder that roots the `<Month>/<Pharmacy>` hierarchy.
pub const ROOT_FOLDER_ID: &str = "1tveP4qft85NmTwqJZGzHZcHhtSqHWyuW";

/// Hard cap on upload request bodies (32 MiB).
pub const MAX_UPLOAD_BYTES: usize = 32 * 1024 * 1024;

/// MIME type Google Drive uses to mark folders.
pub const FOLDER_MIME_TYPE: &str = "application/vnd.google-apps.folder";
