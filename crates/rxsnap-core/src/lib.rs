//! Core domain types for rxsnap.
//!
//! This crate holds the pieces shared by the web service and the downloader:
//! the pharmacy/rate enumerations, the photo naming policy, application
//! configuration, and the unified `AppError` type.

pub mod config;
pub mod constants;
pub mod error;
pub mod models;
pub mod naming;

pub use config::{Config, DriveBackend};
pub use error::{AppError, LogLevel};
pub use models::{DeliveryPhoto, Pharmacy, Rate};
