//! Error types module
//!
//! All errors are unified under the `AppError` enum, which can represent
//! drive, validation, configuration, and IO failures. The HTTP layer maps
//! these to status codes through `http_status_code()`.

use std::io;

/// Log level for error reporting
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LogLevel {
    /// Debug level - for expected errors like validation failures
    Debug,
    /// Warning level - for recoverable issues
    Warn,
    /// Error level - for unexpected failures
    Error,
}

#[derive(Debug, thiserror::Error)]
pub enum AppError {
    #[error("Drive error: {0}")]
    Drive(String),

    #[error("Invalid input: {0}")]
    InvalidInput(String),

    #[error("Not found: {0}")]
    NotFound(String),

    #[error("File too large: {0}")]
    PayloadTooLarge(String),

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("IO error: {0}")]
    Io(#[from] io::Error),

    #[error("Internal error: {0}")]
    Internal(String),
}

impl AppError {
    /// HTTP status code this error maps to.
    pub fn http_status_code(&self) -> u16 {
        match self {
            AppError::Drive(_) => 502,
            AppError::InvalidInput(_) => 400,
            AppError::NotFound(_) => 404,
            AppError::PayloadTooLarge(_) => 413,
            AppError::Config(_) | AppError::Io(_) | AppError::Internal(_) => 500,
        }
    }

    /// Client-facing message. Internal failures are not echoed verbatim.
    pub fn client_message(&self) -> String {
        match self {
            AppError::InvalidInput(msg) => msg.clone(),
            AppError::NotFound(msg) => format!("Not found: {}", msg),
            AppError::PayloadTooLarge(msg) => format!("File too large: {}", msg),
            AppError::Drive(_) => "Upload to drive failed".to_string(),
            AppError::Config(_) | AppError::Io(_) | AppError::Internal(_) => {
                "Internal server error".to_string()
            }
        }
    }

    /// Log level appropriate for this error.
    pub fn log_level(&self) -> LogLevel {
        match self {
            AppError::InvalidInput(_) | AppError::NotFound(_) => LogLevel::Debug,
            AppError::PayloadTooLarge(_) => LogLevel::Warn,
            AppError::Drive(_) | AppError::Config(_) | AppError::Io(_) | AppError::Internal(_) => {
                LogLevel::Error
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn validation_errors_are_client_errors() {
        let err = AppError::InvalidInput("missing pharmacy".to_string());
        assert_eq!(err.http_status_code(), 400);
        assert_eq!(err.client_message(), "missing pharmacy");
        assert_eq!(err.log_level(), LogLevel::Debug);
    }

    #[test]
    fn oversize_payloads_map_to_413_and_warn() {
        let err = AppError::PayloadTooLarge("Upload exceeds the 32 MiB limit".to_string());
        assert_eq!(err.http_status_code(), 413);
        assert!(err.client_message().starts_with("File too large"));
        assert_eq!(err.log_level(), LogLevel::Warn);
    }

    #[test]
    fn drive_errors_do_not_leak_details() {
        let err = AppError::Drive("token refresh failed: secret".to_string());
        assert_eq!(err.http_status_code(), 502);
        assert!(!err.client_message().contains("secret"));
        assert_eq!(err.log_level(), LogLevel::Error);
    }
}
