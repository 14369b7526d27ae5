//! Get-or-create resolution for the `<Month>/<Pharmacy>` folder taxonomy.
//!
//! Folder names are matched case-sensitively against the parent's listed
//! children; a miss creates the folder. The check-then-create sequence is
//! serialized per `(parent, name)` key so two concurrent first uploads for
//! the same month or pharmacy cannot create duplicate folders. Drive errors
//! propagate uninterpreted; there is no retry layer.

use std::collections::HashMap;
use std::sync::Arc;

use tokio::sync::Mutex;

use crate::traits::{Drive, DriveResult};

/// Resolves child folders by name under a parent, creating them lazily.
pub struct FolderResolver {
    drive: Arc<dyn Drive>,
    locks: Mutex<HashMap<(String, String), Arc<Mutex<()>>>>,
}

impl FolderResolver {
    pub fn new(drive: Arc<dyn Drive>) -> Self {
        FolderResolver {
            drive,
            locks: Mutex::new(HashMap::new()),
        }
    }

    /// Lock guarding the check-then-create sequence for one `(parent, name)`.
    /// Entries are never evicted; the key space is bounded by twelve months
    /// times the pharmacy list.
    async fn lock_for(&self, parent_id: &str, name: &str) -> Arc<Mutex<()>> {
        let mut locks = self.locks.lock().await;
        locks
            .entry((parent_id.to_string(), name.to_string()))
            .or_insert_with(|| Arc::new(Mutex::new(())))
            .clone()
    }

    /// Return the id of the named child folder, creating it if absent.
    ///
    /// Idempotent: repeated calls with the same arguments converge on the
    /// same folder id and perform at most one create in total.
    pub async fn resolve_or_create(&self, parent_id: &str, name: &str) -> DriveResult<String> {
        let lock = self.lock_for(parent_id, name).await;
        let _guard = lock.lock().await;

        if let Some(id) = self.find_by_name(parent_id, name).await? {
            return Ok(id);
        }

        let id = self.drive.create_folder(parent_id, name).await?;
        tracing::debug!(parent_id = %parent_id, name = %name, folder_id = %id, "Created missing folder");
        Ok(id)
    }

    /// Read-only lookup for the download path; absent folders are the
    /// caller's error to report.
    pub async fn resolve_existing(
        &self,
        parent_id: &str,
        name: &str,
    ) -> DriveResult<Option<String>> {
        self.find_by_name(parent_id, name).await
    }

    async fn find_by_name(&self, parent_id: &str, name: &str) -> DriveResult<Option<String>> {
        let children = self.drive.list_child_folders(parent_id).await?;
        Ok(children
            .into_iter()
            .find(|entry| entry.name == name)
            .map(|entry| entry.id))
    }
}
