//! Bulk photo downloader library.

pub mod downloader;

pub use downloader::{download_all, DownloadReport};
