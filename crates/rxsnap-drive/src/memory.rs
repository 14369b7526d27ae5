//! In-memory drive backend.
//!
//! Backs tests and `DRIVE_BACKEND=memory` local runs. Any parent id is
//! accepted as a container, mirroring how the remote drive treats the
//! configured root id as opaque. Uploading a name that already exists under
//! a parent overwrites it, which is the collision behavior the naming policy
//! relies on.

use std::collections::HashMap;
use std::sync::atomic::{AtomicUsize, Ordering};

use async_trait::async_trait;
use tokio::sync::Mutex;
use uuid::Uuid;

use crate::traits::{Drive, DriveEntry, DriveError, DriveResult};

#[derive(Debug, Clone)]
struct Node {
    parent_id: String,
    name: String,
    // None for folders.
    data: Option<Vec<u8>>,
}

impl Node {
    fn is_folder(&self) -> bool {
        self.data.is_none()
    }
}

/// In-memory `Drive` implementation with call counters for test assertions.
#[derive(Default)]
pub struct MemoryDrive {
    nodes: Mutex<HashMap<String, Node>>,
    create_folder_calls: AtomicUsize,
    upload_calls: AtomicUsize,
    list_calls: AtomicUsize,
}

impl MemoryDrive {
    pub fn new() -> Self {
        Self::default()
    }

    /// Total `create_folder` invocations.
    pub fn create_folder_calls(&self) -> usize {
        self.create_folder_calls.load(Ordering::SeqCst)
    }

    /// Total `upload_file` invocations.
    pub fn upload_calls(&self) -> usize {
        self.upload_calls.load(Ordering::SeqCst)
    }

    /// Total listing invocations (folders and files combined).
    pub fn list_calls(&self) -> usize {
        self.list_calls.load(Ordering::SeqCst)
    }

    /// Count of remote calls of any kind; used to assert "zero remote calls".
    pub fn total_calls(&self) -> usize {
        self.create_folder_calls() + self.upload_calls() + self.list_calls()
    }

    /// Look up a child by name under a parent (test helper).
    pub async fn find_child(&self, parent_id: &str, name: &str) -> Option<DriveEntry> {
        let nodes = self.nodes.lock().await;
        nodes
            .iter()
            .find(|(_, node)| node.parent_id == parent_id && node.name == name)
            .map(|(id, node)| DriveEntry {
                id: id.clone(),
                name: node.name.clone(),
            })
    }

    async fn list_children(&self, parent_id: &str, folders: bool) -> Vec<DriveEntry> {
        let nodes = self.nodes.lock().await;
        let mut entries: Vec<DriveEntry> = nodes
            .iter()
            .filter(|(_, node)| node.parent_id == parent_id && node.is_folder() == folders)
            .map(|(id, node)| DriveEntry {
                id: id.clone(),
                name: node.name.clone(),
            })
            .collect();
        // Deterministic order for tests.
        entries.sort_by(|a, b| a.name.cmp(&b.name));
        entries
    }
}

#[async_trait]
impl Drive for MemoryDrive {
    async fn list_child_folders(&self, parent_id: &str) -> DriveResult<Vec<DriveEntry>> {
        self.list_calls.fetch_add(1, Ordering::SeqCst);
        Ok(self.list_children(parent_id, true).await)
    }

    async fn create_folder(&self, parent_id: &str, name: &str) -> DriveResult<String> {
        self.create_folder_calls.fetch_add(1, Ordering::SeqCst);
        let id = Uuid::new_v4().to_string();
        let mut nodes = self.nodes.lock().await;
        nodes.insert(
            id.clone(),
            Node {
                parent_id: parent_id.to_string(),
                name: name.to_string(),
                data: None,
            },
        );
        Ok(id)
    }

    async fn upload_file(
        &self,
        parent_id: &str,
        name: &str,
        _content_type: &str,
        data: Vec<u8>,
    ) -> DriveResult<String> {
        self.upload_calls.fetch_add(1, Ordering::SeqCst);
        let mut nodes = self.nodes.lock().await;

        // Same name under the same parent overwrites.
        let existing = nodes
            .iter()
            .find(|(_, node)| {
                node.parent_id == parent_id && node.name == name && !node.is_folder()
            })
            .map(|(id, _)| id.clone());

        let id = existing.unwrap_or_else(|| Uuid::new_v4().to_string());
        nodes.insert(
            id.clone(),
            Node {
                parent_id: parent_id.to_string(),
                name: name.to_string(),
                data: Some(data),
            },
        );
        Ok(id)
    }

    async fn list_files(&self, parent_id: &str) -> DriveResult<Vec<DriveEntry>> {
        self.list_calls.fetch_add(1, Ordering::SeqCst);
        Ok(self.list_children(parent_id, false).await)
    }

    async fn download_file(&self, file_id: &str) -> DriveResult<Vec<u8>> {
        let nodes = self.nodes.lock().await;
        match nodes.get(file_id) {
            Some(node) => node
                .data
                .clone()
                .ok_or_else(|| DriveError::NotFound(format!("{} is a folder", file_id))),
            None => Err(DriveError::NotFound(file_id.to_string())),
        }
    }
}
