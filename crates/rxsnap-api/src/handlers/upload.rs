//! Delivery photo upload handler.
//!
//! Accepts `multipart/form-data` with `file`, `pharmacy`, and `rate` fields.
//! All three are validated before any drive call is made: the file must have
//! a name and content, and pharmacy/rate must parse against the enumerated
//! sets. The capture date is the server clock, never client-supplied.

use std::sync::Arc;

use axum::extract::{Multipart, State};
use chrono::Local;
use rxsnap_core::{AppError, DeliveryPhoto, Pharmacy, Rate};

use crate::error::HttpAppError;
use crate::services::UploadService;
use crate::state::AppState;

#[derive(Debug, Default)]
struct Submission {
    file_name: Option<String>,
    file_data: Option<Vec<u8>>,
    pharmacy: Option<String>,
    rate: Option<String>,
}

impl Submission {
    /// Check presence and enumeration membership; no drive calls happen
    /// until this returns Ok.
    fn validate(self) -> Result<(Vec<u8>, Pharmacy, Rate), AppError> {
        let (Some(data), Some(pharmacy), Some(rate)) = (self.file_data, self.pharmacy, self.rate)
        else {
            return Err(AppError::InvalidInput("Missing required fields".into()));
        };

        if self.file_name.unwrap_or_default().is_empty() {
            return Err(AppError::InvalidInput("No selected file".into()));
        }
        if data.is_empty() {
            return Err(AppError::InvalidInput("Empty file".into()));
        }

        let pharmacy: Pharmacy = pharmacy.parse()?;
        let rate: Rate = rate.parse()?;
        Ok((data, pharmacy, rate))
    }
}

#[tracing::instrument(skip(state, multipart), fields(operation = "upload_photo"))]
pub async fn upload(
    State(state): State<Arc<AppState>>,
    mut multipart: Multipart,
) -> Result<String, HttpAppError> {
    let mut submission = Submission::default();

    while let Some(field) = multipart.next_field().await.map_err(HttpAppError::from)? {
        match field.name() {
            Some("file") => {
                submission.file_name = field.file_name().map(str::to_string);
                let bytes = field.bytes().await.map_err(HttpAppError::from)?;
                submission.file_data = Some(bytes.to_vec());
            }
            Some("pharmacy") => {
                submission.pharmacy = Some(field.text().await.map_err(HttpAppError::from)?);
            }
            Some("rate") => {
                submission.rate = Some(field.text().await.map_err(HttpAppError::from)?);
            }
            _ => {}
        }
    }

    let (data, pharmacy, rate) = submission.validate()?;

    let photo = DeliveryPhoto {
        data,
        pharmacy,
        rate,
        captured_on: Local::now().date_naive(),
    };

    let outcome = UploadService::new(&state).store(photo).await?;
    Ok(outcome.confirmation())
}
