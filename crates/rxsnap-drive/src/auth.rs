//! OAuth2 credentials for the Google Drive backend.
//!
//! Secrets are materialized to local files at startup by the config layer
//! (`client_secrets.json`, `drive_token.json`). This module loads them,
//! serves a bearer access token, and refreshes it against the token endpoint
//! when it nears expiry. The refreshed token is written back so the next
//! process start picks it up.

use std::path::{Path, PathBuf};

use chrono::{DateTime, Duration, Utc};
use serde::{Deserialize, Serialize};
use tokio::sync::Mutex;

use crate::traits::{DriveError, DriveResult};

/// Refresh this long before the recorded expiry to absorb clock skew.
const EXPIRY_SKEW_SECS: i64 = 60;

/// OAuth client application credentials, in Google's download format.
/// Both the `installed` and `web` wrappers are accepted.
#[derive(Debug, Clone, Deserialize)]
pub struct ClientSecrets {
    pub client_id: String,
    pub client_secret: String,
    #[serde(default = "default_token_uri")]
    pub token_uri: String,
}

fn default_token_uri() -> String {
    "https://oauth2.googleapis.com/token".to_string()
}

#[derive(Debug, Deserialize)]
struct ClientSecretsFile {
    installed: Option<ClientSecrets>,
    web: Option<ClientSecrets>,
}

impl ClientSecrets {
    pub fn load(path: &Path) -> DriveResult<Self> {
        let raw = std::fs::read_to_string(path)?;
        let file: ClientSecretsFile = serde_json::from_str(&raw)
            .map_err(|e| DriveError::Auth(format!("Malformed client secrets: {}", e)))?;
        file.installed
            .or(file.web)
            .ok_or_else(|| DriveError::Auth("Client secrets missing installed/web section".into()))
    }
}

/// Stored token state, persisted between runs.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StoredToken {
    pub access_token: String,
    pub refresh_token: String,
    /// Absolute expiry of the access token.
    pub expiry: DateTime<Utc>,
}

impl StoredToken {
    pub fn load(path: &Path) -> DriveResult<Self> {
        let raw = std::fs::read_to_string(path)?;
        serde_json::from_str(&raw)
            .map_err(|e| DriveError::Auth(format!("Malformed token file: {}", e)))
    }

    fn save(&self, path: &Path) -> DriveResult<()> {
        let raw = serde_json::to_string_pretty(self)
            .map_err(|e| DriveError::Auth(format!("Failed to serialize token: {}", e)))?;
        std::fs::write(path, raw)?;
        Ok(())
    }

    fn is_expired(&self, now: DateTime<Utc>) -> bool {
        self.expiry - Duration::seconds(EXPIRY_SKEW_SECS) <= now
    }
}

#[derive(Debug, Deserialize)]
struct RefreshResponse {
    access_token: String,
    expires_in: i64,
}

/// Serves bearer tokens for Drive API calls, refreshing transparently.
pub struct TokenManager {
    http: reqwest::Client,
    secrets: ClientSecrets,
    token_path: PathBuf,
    state: Mutex<StoredToken>,
}

impl TokenManager {
    /// Load credentials from the materialized secret files.
    pub fn from_files(secrets_path: &Path, token_path: &Path) -> DriveResult<Self> {
        let secrets = ClientSecrets::load(secrets_path)?;
        let token = StoredToken::load(token_path)?;
        Ok(TokenManager {
            http: reqwest::Client::new(),
            secrets,
            token_path: token_path.to_path_buf(),
            state: Mutex::new(token),
        })
    }

    /// Current access token, refreshed if expired. Callers hold no lock; the
    /// refresh is serialized internally.
    pub async fn access_token(&self) -> DriveResult<String> {
        let mut token = self.state.lock().await;
        if token.is_expired(Utc::now()) {
            *token = self.refresh(&token).await?;
            if let Err(e) = token.save(&self.token_path) {
                // Refresh succeeded; a failed write only costs a refresh next start.
                tracing::warn!(error = %e, path = %self.token_path.display(), "Failed to persist refreshed token");
            }
        }
        Ok(token.access_token.clone())
    }

    async fn refresh(&self, current: &StoredToken) -> DriveResult<StoredToken> {
        tracing::debug!("Refreshing drive access token");

        let params = [
            ("client_id", self.secrets.client_id.as_str()),
            ("client_secret", self.secrets.client_secret.as_str()),
            ("refresh_token", current.refresh_token.as_str()),
            ("grant_type", "refresh_token"),
        ];

        let response = self
            .http
            .post(&self.secrets.token_uri)
            .form(&params)
            .send()
            .await
            .map_err(|e| DriveError::Auth(format!("Token refresh request failed: {}", e)))?;

        if !response.status().is_success() {
            let status = response.status();
            let body = response.text().await.unwrap_or_default();
            return Err(DriveError::Auth(format!(
                "Token refresh rejected ({}): {}",
                status, body
            )));
        }

        let refreshed: RefreshResponse = response
            .json()
            .await
            .map_err(|e| DriveError::Auth(format!("Malformed token response: {}", e)))?;

        Ok(StoredToken {
            access_token: refreshed.access_token,
            refresh_token: current.refresh_token.clone(),
            expiry: Utc::now() + Duration::seconds(refreshed.expires_in),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn client_secrets_accepts_installed_section() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("client_secrets.json");
        std::fs::write(
            &path,
            r#"{"installed":{"client_id":"id","client_secret":"secret","token_uri":"https://example.com/token"}}"#,
        )
        .unwrap();

        let secrets = ClientSecrets::load(&path).unwrap();
        assert_eq!(secrets.client_id, "id");
        assert_eq!(secrets.token_uri, "https://example.com/token");
    }

    #[test]
    fn client_secrets_defaults_token_uri() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("client_secrets.json");
        std::fs::write(
            &path,
            r#"{"web":{"client_id":"id","client_secret":"secret"}}"#,
        )
        .unwrap();

        let secrets = ClientSecrets::load(&path).unwrap();
        assert_eq!(secrets.token_uri, "https://oauth2.googleapis.com/token");
    }

    #[test]
    fn client_secrets_rejects_empty_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("client_secrets.json");
        std::fs::write(&path, "{}").unwrap();
        assert!(matches!(
            ClientSecrets::load(&path),
            Err(DriveError::Auth(_))
        ));
    }

    #[test]
    fn token_expiry_applies_skew() {
        let now = Utc::now();
        let token = StoredToken {
            access_token: "a".into(),
            refresh_token: "r".into(),
            expiry: now + Duration::seconds(30),
        };
        // Within the 60s skew window counts as expired.
        assert!(token.is_expired(now));

        let token = StoredToken {
            expiry: now + Duration::seconds(120),
            ..token
        };
        assert!(!token.is_expired(now));
    }

    #[test]
    fn stored_token_round_trips_through_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("drive_token.json");
        let token = StoredToken {
            access_token: "access".into(),
            refresh_token: "refresh".into(),
            expiry: Utc::now(),
        };
        token.save(&path).unwrap();
        let loaded = StoredToken::load(&path).unwrap();
        assert_eq!(loaded.access_token, "access");
        assert_eq!(loaded.refresh_token, "refresh");
    }
}
