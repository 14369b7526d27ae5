//! Configuration module
//!
//! Reads process configuration from the environment (with `.env` support via
//! dotenvy) and materializes the drive credential blobs into local files the
//! drive client consumes. Missing secrets for the google backend are fatal at
//! startup; there is no degraded mode.

use std::env;
use std::path::{Path, PathBuf};
use std::str::FromStr;

use anyhow::{bail, Context};

use crate::constants::ROOT_FOLDER_ID;

const DEFAULT_PORT: u16 = 10000;
const DEFAULT_UPLOAD_DIR: &str = "uploads";
const DEFAULT_KEEPALIVE_INTERVAL_SECS: u64 = 600;
const CLIENT_SECRETS_FILE: &str = "client_secrets.json";
const DRIVE_TOKEN_FILE: &str = "drive_token.json";

/// Which drive backend to run against.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DriveBackend {
    /// Google Drive over the v3 REST API.
    Google,
    /// In-process store, for tests and local development.
    Memory,
}

impl FromStr for DriveBackend {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "google" => Ok(DriveBackend::Google),
            "memory" => Ok(DriveBackend::Memory),
            other => bail!("Unknown DRIVE_BACKEND '{}' (expected google or memory)", other),
        }
    }
}

/// Application configuration.
#[derive(Debug, Clone)]
pub struct Config {
    pub server_port: u16,
    pub upload_dir: PathBuf,
    pub root_folder_id: String,
    pub drive_backend: DriveBackend,
    pub client_secrets_path: PathBuf,
    pub drive_token_path: PathBuf,
    pub keepalive_url: Option<String>,
    pub keepalive_interval_secs: u64,
}

impl Config {
    /// Load configuration from the environment.
    ///
    /// For the google backend this also writes `CLIENT_SECRETS_JSON` and
    /// `DRIVE_TOKEN_JSON` out to their files when the variables are set, and
    /// fails if neither the variables nor previously materialized files
    /// exist.
    pub fn from_env() -> Result<Self, anyhow::Error> {
        // Best effort .env; absent file is fine.
        let _ = dotenvy::dotenv();

        let server_port = match env::var("PORT") {
            Ok(raw) => raw
                .parse::<u16>()
                .with_context(|| format!("Invalid PORT value '{}'", raw))?,
            Err(_) => DEFAULT_PORT,
        };

        let upload_dir =
            PathBuf::from(env::var("UPLOAD_DIR").unwrap_or_else(|_| DEFAULT_UPLOAD_DIR.into()));

        let drive_backend = match env::var("DRIVE_BACKEND") {
            Ok(raw) => raw.parse()?,
            Err(_) => DriveBackend::Google,
        };

        let client_secrets_path = PathBuf::from(CLIENT_SECRETS_FILE);
        let drive_token_path = PathBuf::from(DRIVE_TOKEN_FILE);

        if drive_backend == DriveBackend::Google {
            materialize_secret("CLIENT_SECRETS_JSON", &client_secrets_path)?;
            materialize_secret("DRIVE_TOKEN_JSON", &drive_token_path)?;
        }

        let keepalive_url = env::var("KEEPALIVE_URL").ok().filter(|s| !s.is_empty());
        let keepalive_interval_secs = match env::var("KEEPALIVE_INTERVAL_SECS") {
            Ok(raw) => raw
                .parse::<u64>()
                .with_context(|| format!("Invalid KEEPALIVE_INTERVAL_SECS value '{}'", raw))?,
            Err(_) => DEFAULT_KEEPALIVE_INTERVAL_SECS,
        };

        Ok(Config {
            server_port,
            upload_dir,
            root_folder_id: ROOT_FOLDER_ID.to_string(),
            drive_backend,
            client_secrets_path,
            drive_token_path,
            keepalive_url,
            keepalive_interval_secs,
        })
    }

    /// Configuration for tests and the memory backend; no secrets required.
    pub fn for_memory_backend(upload_dir: impl Into<PathBuf>) -> Self {
        Config {
            server_port: 0,
            upload_dir: upload_dir.into(),
            root_folder_id: ROOT_FOLDER_ID.to_string(),
            drive_backend: DriveBackend::Memory,
            client_secrets_path: PathBuf::from(CLIENT_SECRETS_FILE),
            drive_token_path: PathBuf::from(DRIVE_TOKEN_FILE),
            keepalive_url: None,
            keepalive_interval_secs: DEFAULT_KEEPALIVE_INTERVAL_SECS,
        }
    }
}

/// Write an environment-provided secret blob to its file. If the variable is
/// unset, a file left by a previous run is accepted; otherwise startup fails.
fn materialize_secret(var: &str, path: &Path) -> Result<(), anyhow::Error> {
    match env::var(var) {
        Ok(content) if !content.is_empty() => {
            std::fs::write(path, content)
                .with_context(|| format!("Failed to write {} to {}", var, path.display()))?;
            Ok(())
        }
        _ if path.exists() => Ok(()),
        _ => bail!(
            "Missing required secret {} and no existing {}",
            var,
            path.display()
        ),
    }
}
