//! Google Drive backend over the v3 REST API.
//!
//! Covers the small slice of the API this system needs: filtered listings,
//! folder creation, multipart upload, and `alt=media` download. Requests
//! carry a bearer token served by [`TokenManager`].

use async_trait::async_trait;
use serde::Deserialize;
use serde_json::json;

use rxsnap_core::constants::FOLDER_MIME_TYPE;

use crate::auth::TokenManager;
use crate::traits::{Drive, DriveEntry, DriveError, DriveResult};

const FILES_URL: &str = "https://www.googleapis.com/drive/v3/files";
const UPLOAD_URL: &str = "https://www.googleapis.com/upload/drive/v3/files?uploadType=multipart";
const PAGE_SIZE: u32 = 1000;
const MULTIPART_BOUNDARY: &str = "rxsnap_boundary";

#[derive(Debug, Deserialize)]
struct FileResource {
    id: String,
    name: String,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct FileList {
    #[serde(default)]
    files: Vec<FileResource>,
    next_page_token: Option<String>,
}

/// Google Drive client.
pub struct GoogleDrive {
    http: reqwest::Client,
    tokens: TokenManager,
}

impl GoogleDrive {
    pub fn new(tokens: TokenManager) -> Self {
        GoogleDrive {
            http: reqwest::Client::new(),
            tokens,
        }
    }

    /// Map an error-status response to a `DriveError`, consuming the body for
    /// the message.
    async fn error_from_response(context: &str, response: reqwest::Response) -> DriveError {
        let status = response.status();
        let body = response.text().await.unwrap_or_default();
        match status.as_u16() {
            401 | 403 => DriveError::Auth(format!("{} rejected ({}): {}", context, status, body)),
            404 => DriveError::NotFound(format!("{}: {}", context, body)),
            _ => DriveError::Api(format!("{} failed ({}): {}", context, status, body)),
        }
    }

    /// Run a filtered listing, following pagination.
    async fn list_with_query(&self, query: &str) -> DriveResult<Vec<DriveEntry>> {
        let mut entries = Vec::new();
        let mut page_token: Option<String> = None;

        loop {
            let token = self.tokens.access_token().await?;
            let page_size = PAGE_SIZE.to_string();
            let mut request = self
                .http
                .get(FILES_URL)
                .bearer_auth(token)
                .query(&[
                    ("q", query),
                    ("fields", "nextPageToken, files(id, name)"),
                    ("pageSize", page_size.as_str()),
                ]);
            if let Some(ref next) = page_token {
                request = request.query(&[("pageToken", next.as_str())]);
            }

            let response = request
                .send()
                .await
                .map_err(|e| DriveError::Api(format!("List request failed: {}", e)))?;

            if !response.status().is_success() {
                return Err(Self::error_from_response("List", response).await);
            }

            let page: FileList = response
                .json()
                .await
                .map_err(|e| DriveError::InvalidResponse(format!("List response: {}", e)))?;

            entries.extend(
                page.files
                    .into_iter()
                    .map(|f| DriveEntry { id: f.id, name: f.name }),
            );

            match page.next_page_token {
                Some(next) => page_token = Some(next),
                None => break,
            }
        }

        Ok(entries)
    }

    /// Build the `multipart/related` body for a metadata + media upload.
    fn multipart_body(metadata: &serde_json::Value, content_type: &str, data: &[u8]) -> Vec<u8> {
        let mut body = Vec::with_capacity(data.len() + 512);
        body.extend_from_slice(format!("--{}\r\n", MULTIPART_BOUNDARY).as_bytes());
        body.extend_from_slice(b"Content-Type: application/json; charset=UTF-8\r\n\r\n");
        body.extend_from_slice(metadata.to_string().as_bytes());
        body.extend_from_slice(format!("\r\n--{}\r\n", MULTIPART_BOUNDARY).as_bytes());
        body.extend_from_slice(format!("Content-Type: {}\r\n\r\n", content_type).as_bytes());
        body.extend_from_slice(data);
        body.extend_from_slice(format!("\r\n--{}--\r\n", MULTIPART_BOUNDARY).as_bytes());
        body
    }

    /// Escape single quotes for embedding in a `q` filter string.
    fn escape_query_value(value: &str) -> String {
        value.replace('\\', "\\\\").replace('\'', "\\'")
    }
}

#[async_trait]
impl Drive for GoogleDrive {
    async fn list_child_folders(&self, parent_id: &str) -> DriveResult<Vec<DriveEntry>> {
        let query = format!(
            "'{}' in parents and mimeType='{}' and trashed=false",
            Self::escape_query_value(parent_id),
            FOLDER_MIME_TYPE
        );
        self.list_with_query(&query).await
    }

    async fn create_folder(&self, parent_id: &str, name: &str) -> DriveResult<String> {
        let token = self.tokens.access_token().await?;
        let metadata = json!({
            "name": name,
            "mimeType": FOLDER_MIME_TYPE,
            "parents": [parent_id],
        });

        let response = self
            .http
            .post(FILES_URL)
            .bearer_auth(token)
            .json(&metadata)
            .send()
            .await
            .map_err(|e| DriveError::Api(format!("Create folder request failed: {}", e)))?;

        if !response.status().is_success() {
            return Err(Self::error_from_response("Create folder", response).await);
        }

        let created: FileResource = response
            .json()
            .await
            .map_err(|e| DriveError::InvalidResponse(format!("Create folder response: {}", e)))?;

        tracing::info!(parent_id = %parent_id, name = %name, folder_id = %created.id, "Created drive folder");

        Ok(created.id)
    }

    async fn upload_file(
        &self,
        parent_id: &str,
        name: &str,
        content_type: &str,
        data: Vec<u8>,
    ) -> DriveResult<String> {
        let token = self.tokens.access_token().await?;
        let metadata = json!({
            "name": name,
            "parents": [parent_id],
        });
        let size = data.len();
        let body = Self::multipart_body(&metadata, content_type, &data);

        let start = std::time::Instant::now();

        let response = self
            .http
            .post(UPLOAD_URL)
            .bearer_auth(token)
            .header(
                "Content-Type",
                format!("multipart/related; boundary={}", MULTIPART_BOUNDARY),
            )
            .body(body)
            .send()
            .await
            .map_err(|e| DriveError::Api(format!("Upload request failed: {}", e)))?;

        if !response.status().is_success() {
            return Err(Self::error_from_response("Upload", response).await);
        }

        let uploaded: FileResource = response
            .json()
            .await
            .map_err(|e| DriveError::InvalidResponse(format!("Upload response: {}", e)))?;

        tracing::info!(
            parent_id = %parent_id,
            name = %name,
            file_id = %uploaded.id,
            size_bytes = size,
            duration_ms = start.elapsed().as_secs_f64() * 1000.0,
            "Drive upload successful"
        );

        Ok(uploaded.id)
    }

    async fn list_files(&self, parent_id: &str) -> DriveResult<Vec<DriveEntry>> {
        let query = format!(
            "'{}' in parents and mimeType!='{}' and trashed=false",
            Self::escape_query_value(parent_id),
            FOLDER_MIME_TYPE
        );
        self.list_with_query(&query).await
    }

    async fn download_file(&self, file_id: &str) -> DriveResult<Vec<u8>> {
        let token = self.tokens.access_token().await?;
        let url = format!("{}/{}", FILES_URL, urlencoding::encode(file_id));

        let response = self
            .http
            .get(&url)
            .bearer_auth(token)
            .query(&[("alt", "media")])
            .send()
            .await
            .map_err(|e| DriveError::Api(format!("Download request failed: {}", e)))?;

        if !response.status().is_success() {
            return Err(Self::error_from_response("Download", response).await);
        }

        let bytes = response
            .bytes()
            .await
            .map_err(|e| DriveError::Api(format!("Download body failed: {}", e)))?;

        Ok(bytes.to_vec())
    }
}
