//! Configuration module
//!
//! Environment-driven configuration for the API service and the attendee
//! client. Binaries load `.env` via dotenvy before calling `from_env()`.

use std::env;
use std::path::PathBuf;

use anyhow::{Context, Result};

use crate::validation::{UploadLimits, DEFAULT_MAX_IMAGE_BYTES, DEFAULT_MAX_VIDEO_BYTES};

const DEFAULT_SERVER_PORT: u16 = 3000;
const DEFAULT_DB_MAX_CONNECTIONS: u32 = 5;
const DEFAULT_DB_TIMEOUT_SECS: u64 = 30;

fn env_parse<T: std::str::FromStr>(key: &str, default: T) -> Result<T>
where
    T::Err: std::error::Error + Send + Sync + 'static,
{
    match env::var(key) {
        Ok(raw) => raw
            .parse::<T>()
            .with_context(|| format!("Invalid value for {}", key)),
        Err(_) => Ok(default),
    }
}

/// Configuration for the upload-log API service.
#[derive(Clone, Debug)]
pub struct ApiConfig {
    pub server_port: u16,
    pub database_url: String,
    pub db_max_connections: u32,
    pub db_timeout_seconds: u64,
    /// Allowed CORS origins; empty means allow any origin (the upload form
    /// is a public page).
    pub cors_origins: Vec<String>,
    pub environment: String,
}

impl ApiConfig {
    pub fn from_env() -> Result<Self> {
        let database_url = env::var("DATABASE_URL").context("DATABASE_URL must be set")?;

        let cors_origins = env::var("CORS_ORIGINS")
            .unwrap_or_default()
            .split(',')
            .map(|s| s.trim().to_string())
            .filter(|s| !s.is_empty())
            .collect();

        Ok(Self {
            server_port: env_parse("SERVER_PORT", DEFAULT_SERVER_PORT)?,
            database_url,
            db_max_connections: env_parse("DB_MAX_CONNECTIONS", DEFAULT_DB_MAX_CONNECTIONS)?,
            db_timeout_seconds: env_parse("DB_TIMEOUT_SECONDS", DEFAULT_DB_TIMEOUT_SECS)?,
            cors_origins,
            environment: env::var("ENVIRONMENT").unwrap_or_else(|_| "development".to_string()),
        })
    }

    pub fn is_production(&self) -> bool {
        let env = self.environment.to_lowercase();
        env == "production" || env == "prod"
    }

    pub fn validate(&self) -> Result<()> {
        anyhow::ensure!(
            !self.database_url.is_empty(),
            "DATABASE_URL must not be empty"
        );
        anyhow::ensure!(self.db_max_connections > 0, "DB_MAX_CONNECTIONS must be > 0");
        Ok(())
    }
}

/// Configuration for the attendee-side client and CLI.
#[derive(Clone, Debug)]
pub struct ClientConfig {
    /// Base URL of the upload-log API.
    pub api_base_url: String,
    pub cloudinary_cloud_name: String,
    /// Public unsigned-upload preset; this is the only media-host credential
    /// the client carries.
    pub cloudinary_upload_preset: String,
    /// Path of the persisted session file.
    pub session_file: PathBuf,
    pub limits: UploadLimits,
    pub google_client_id: Option<String>,
    pub facebook_app_id: Option<String>,
}

impl ClientConfig {
    pub fn from_env() -> Result<Self> {
        let api_base_url = env::var("ENCORE_API_URL")
            .or_else(|_| env::var("API_URL"))
            .unwrap_or_else(|_| "http://localhost:3000".to_string());

        let cloudinary_cloud_name =
            env::var("CLOUDINARY_CLOUD_NAME").context("CLOUDINARY_CLOUD_NAME must be set")?;
        let cloudinary_upload_preset =
            env::var("CLOUDINARY_UPLOAD_PRESET").context("CLOUDINARY_UPLOAD_PRESET must be set")?;

        let session_file = env::var("ENCORE_SESSION_FILE")
            .map(PathBuf::from)
            .unwrap_or_else(|_| default_session_file());

        let limits = UploadLimits::new(
            env_parse("MAX_IMAGE_SIZE_BYTES", DEFAULT_MAX_IMAGE_BYTES)?,
            env_parse("MAX_VIDEO_SIZE_BYTES", DEFAULT_MAX_VIDEO_BYTES)?,
        );

        Ok(Self {
            api_base_url: api_base_url.trim_end_matches('/').to_string(),
            cloudinary_cloud_name,
            cloudinary_upload_preset,
            session_file,
            limits,
            google_client_id: env::var("GOOGLE_CLIENT_ID").ok(),
            facebook_app_id: env::var("FACEBOOK_APP_ID").ok(),
        })
    }
}

/// `$HOME/.encore/session.json`, or a relative `.encore/session.json` when
/// HOME is unset.
fn default_session_file() -> PathBuf {
    let mut path = env::var("HOME").map(PathBuf::from).unwrap_or_default();
    path.push(".encore");
    path.push("session.json");
    path
}
