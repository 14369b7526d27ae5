//! Application state.
//!
//! The drive client is constructor-injected here rather than held as a
//! module-level global, so tests can substitute the memory backend.

use std::sync::Arc;

use rxsnap_core::Config;
use rxsnap_drive::{Drive, FolderResolver};

pub struct AppState {
    pub config: Config,
    pub drive: Arc<dyn Drive>,
    pub resolver: FolderResolver,
}

impl AppState {
    pub fn new(config: Config, drive: Arc<dyn Drive>) -> Self {
        let resolver = FolderResolver::new(drive.clone());
        AppState {
            config,
            drive,
            resolver,
        }
    }
}
