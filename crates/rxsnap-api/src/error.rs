//! HTTP error response conversion
//!
//! Wraps `AppError` so it can implement `IntoResponse` (orphan rule: the
//! error type lives in rxsnap-core). Responses are plain text by design;
//! the form's submit script alerts the body verbatim.

use axum::extract::multipart::MultipartError;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use rxsnap_core::{AppError, LogLevel};
use rxsnap_drive::DriveError;

#[derive(Debug)]
pub struct HttpAppError(pub AppError);

impl From<AppError> for HttpAppError {
    fn from(err: AppError) -> Self {
        HttpAppError(err)
    }
}

impl From<DriveError> for HttpAppError {
    fn from(err: DriveError) -> Self {
        HttpAppError(err.into())
    }
}

impl From<MultipartError> for HttpAppError {
    fn from(err: MultipartError) -> Self {
        // A body that trips the request size limit surfaces as a multipart
        // read failure; axum reports it with a 413 status.
        let app = if err.status() == StatusCode::PAYLOAD_TOO_LARGE {
            AppError::PayloadTooLarge("Upload exceeds the 32 MiB limit".into())
        } else {
            AppError::InvalidInput(format!("Malformed multipart body: {}", err))
        };
        HttpAppError(app)
    }
}

fn log_error(error: &AppError) {
    match error.log_level() {
        LogLevel::Debug => tracing::debug!(error = %error, "Request failed"),
        LogLevel::Warn => tracing::warn!(error = %error, "Request failed"),
        LogLevel::Error => tracing::error!(error = %error, "Request failed"),
    }
}

impl IntoResponse for HttpAppError {
    fn into_response(self) -> Response {
        let error = &self.0;
        log_error(error);

        let status = StatusCode::from_u16(error.http_status_code())
            .unwrap_or(StatusCode::INTERNAL_SERVER_ERROR);

        (status, error.client_message()).into_response()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn drive_not_found_maps_to_not_found() {
        let HttpAppError(app) = DriveError::NotFound("folder June".into()).into();
        assert!(matches!(app, AppError::NotFound(_)));
        assert_eq!(app.http_status_code(), 404);
    }

    #[test]
    fn drive_auth_failure_maps_to_drive_error() {
        let HttpAppError(app) = DriveError::Auth("expired".into()).into();
        assert!(matches!(app, AppError::Drive(_)));
        assert_eq!(app.http_status_code(), 502);
    }
}
