//! Drive backend construction from configuration.

use std::sync::Arc;

use rxsnap_core::{Config, DriveBackend};

use crate::auth::TokenManager;
use crate::google::GoogleDrive;
use crate::memory::MemoryDrive;
use crate::traits::{Drive, DriveResult};

/// Create a drive backend based on configuration.
pub fn create_drive(config: &Config) -> DriveResult<Arc<dyn Drive>> {
    match config.drive_backend {
        DriveBackend::Google => {
            let tokens =
                TokenManager::from_files(&config.client_secrets_path, &config.drive_token_path)?;
            Ok(Arc::new(GoogleDrive::new(tokens)))
        }
        DriveBackend::Memory => {
            tracing::warn!("Using in-memory drive backend; uploads will not persist");
            Ok(Arc::new(MemoryDrive::new()))
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn memory_backend_needs_no_credentials() {
        let config = Config::for_memory_backend("uploads");
        assert!(create_drive(&config).is_ok());
    }

    #[test]
    fn google_backend_requires_secret_files() {
        let dir = tempfile::tempdir().unwrap();
        let mut config = Config::for_memory_backend("uploads");
        config.drive_backend = DriveBackend::Google;
        config.client_secrets_path = dir.path().join("client_secrets.json");
        config.drive_token_path = dir.path().join("drive_token.json");

        assert!(create_drive(&config).is_err());
    }
}
