//! Drive abstraction for rxsnap.
//!
//! Defines the `Drive` trait the upload service and downloader work against,
//! with two backends: Google Drive over the v3 REST API and an in-process
//! memory store for tests and local development. The `resolver` module
//! implements the get-or-create policy for the `<Month>/<Pharmacy>` folder
//! hierarchy.

pub mod auth;
pub mod factory;
pub mod google;
pub mod memory;
pub mod resolver;
pub mod traits;

pub use factory::create_drive;
pub use google::GoogleDrive;
pub use memory::MemoryDrive;
pub use resolver::FolderResolver;
pub use traits::{Drive, DriveEntry, DriveError, DriveResult};
