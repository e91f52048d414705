//! Configuration module
//!
//! Configuration is read from the environment exactly once, at startup, and handed to
//! the application as a value. Storage credentials are validated separately through
//! [`StorageConfig::validate`] so a missing credential can be reported per request
//! instead of preventing the service from starting.

use std::env;
use std::time::Duration;

use crate::constants::DEFAULT_ADMIN_SESSION_COOKIE;
use crate::error::AppError;
use crate::models::{FailurePolicy, OwnerRoutingPolicy};
use crate::storage_types::StorageBackend;

// Common constants
const SERVER_PORT: u16 = 4000;
const UPLOAD_REQUEST_TIMEOUT_SECS: u64 = 60;
const MAX_UPLOAD_BODY_MB: usize = 100;
const DEFAULT_S3_REGION: &str = "us-east-1";

/// Server-level settings
#[derive(Clone, Debug)]
pub struct BaseConfig {
    pub server_port: u16,
    pub environment: String,
    pub cors_origins: Vec<String>,
    pub log_format: String,
}

/// Settings for the object storage backend
#[derive(Clone, Debug, Default)]
pub struct StorageConfig {
    pub backend: Option<StorageBackend>,
    pub s3_bucket: Option<String>,
    pub s3_region: Option<String>,
    pub s3_endpoint: Option<String>, // Custom endpoint for S3-compatible providers (MinIO, R2, ...)
    pub aws_access_key_id: Option<String>,
    pub aws_secret_access_key: Option<String>,
    pub local_storage_path: Option<String>,
    pub local_storage_base_url: Option<String>,
}

/// Settings for the upload endpoint
#[derive(Clone, Debug)]
pub struct UploadConfig {
    pub admin_session_cookie: String,
    pub failure_policy: FailurePolicy,
    pub owner_routing: OwnerRoutingPolicy,
    pub request_timeout_secs: u64,
    pub max_body_bytes: usize,
}

impl Default for UploadConfig {
    fn default() -> Self {
        Self {
            admin_session_cookie: DEFAULT_ADMIN_SESSION_COOKIE.to_string(),
            failure_policy: FailurePolicy::default(),
            owner_routing: OwnerRoutingPolicy::default(),
            request_timeout_secs: UPLOAD_REQUEST_TIMEOUT_SECS,
            max_body_bytes: MAX_UPLOAD_BODY_MB * 1024 * 1024,
        }
    }
}

impl UploadConfig {
    pub fn request_timeout(&self) -> Duration {
        Duration::from_secs(self.request_timeout_secs)
    }
}

/// Application configuration
#[derive(Clone, Debug)]
pub struct Config {
    pub base: BaseConfig,
    pub storage: StorageConfig,
    pub upload: UploadConfig,
}

impl Config {
    /// Load configuration from the process environment (and `.env`, when present).
    pub fn from_env() -> Result<Self, anyhow::Error> {
        let _ = dotenvy::dotenv();
        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Load configuration through an arbitrary key lookup.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, anyhow::Error>
    where
        F: Fn(&str) -> Option<String>,
    {
        let var = |key: &str| lookup(key).filter(|s| !s.trim().is_empty());

        let environment = var("ENVIRONMENT")
            .or_else(|| var("APP_ENV"))
            .unwrap_or_else(|| "development".to_string());

        let cors_origins_str = var("CORS_ORIGINS").unwrap_or_else(|| "*".to_string());
        let is_production =
            environment.to_lowercase() == "production" || environment.to_lowercase() == "prod";
        if is_production && cors_origins_str.trim() == "*" {
            return Err(anyhow::anyhow!(
                "CORS_ORIGINS cannot be '*' in production. Please specify explicit origins."
            ));
        }

        let base = BaseConfig {
            server_port: var("PORT")
                .unwrap_or_else(|| SERVER_PORT.to_string())
                .parse()
                .map_err(|_| anyhow::anyhow!("PORT must be a valid number"))?,
            environment,
            cors_origins: cors_origins_str
                .split(',')
                .map(|s| s.trim().to_string())
                .collect(),
            log_format: var("LOG_FORMAT")
                .unwrap_or_else(|| "compact".to_string())
                .to_lowercase(),
        };

        let backend = match var("STORAGE_BACKEND") {
            Some(value) => Some(value.parse::<StorageBackend>()?),
            None => None,
        };

        let storage = StorageConfig {
            backend,
            s3_bucket: var("S3_BUCKET"),
            s3_region: var("S3_REGION").or_else(|| var("AWS_REGION")),
            s3_endpoint: var("S3_ENDPOINT"),
            aws_access_key_id: var("AWS_ACCESS_KEY_ID"),
            aws_secret_access_key: var("AWS_SECRET_ACCESS_KEY"),
            local_storage_path: var("LOCAL_STORAGE_PATH"),
            local_storage_base_url: var("LOCAL_STORAGE_BASE_URL"),
        };

        let upload = UploadConfig {
            admin_session_cookie: var("ADMIN_SESSION_COOKIE")
                .unwrap_or_else(|| DEFAULT_ADMIN_SESSION_COOKIE.to_string()),
            failure_policy: match var("UPLOAD_FAILURE_POLICY") {
                Some(value) => value.parse()?,
                None => FailurePolicy::default(),
            },
            owner_routing: match var("UPLOAD_OWNER_ROUTING") {
                Some(value) => value.parse()?,
                None => OwnerRoutingPolicy::default(),
            },
            request_timeout_secs: var("UPLOAD_REQUEST_TIMEOUT_SECS")
                .unwrap_or_else(|| UPLOAD_REQUEST_TIMEOUT_SECS.to_string())
                .parse::<u64>()
                .map_err(|_| anyhow::anyhow!("UPLOAD_REQUEST_TIMEOUT_SECS must be a valid number"))?
                .max(1),
            max_body_bytes: var("MAX_UPLOAD_BODY_MB")
                .unwrap_or_else(|| MAX_UPLOAD_BODY_MB.to_string())
                .parse::<usize>()
                .map_err(|_| anyhow::anyhow!("MAX_UPLOAD_BODY_MB must be a valid number"))?
                .max(1)
                * 1024
                * 1024,
        };

        Ok(Config {
            base,
            storage,
            upload,
        })
    }

    /// Check if the application is running in production mode
    pub fn is_production(&self) -> bool {
        let environment = self.base.environment.to_lowercase();
        environment == "production" || environment == "prod"
    }

    pub fn server_port(&self) -> u16 {
        self.base.server_port
    }

    pub fn environment(&self) -> &str {
        &self.base.environment
    }

    pub fn cors_origins(&self) -> &[String] {
        &self.base.cors_origins
    }
}

impl StorageConfig {
    pub fn backend(&self) -> StorageBackend {
        self.backend.unwrap_or(StorageBackend::S3)
    }

    pub fn s3_region(&self) -> &str {
        self.s3_region.as_deref().unwrap_or(DEFAULT_S3_REGION)
    }

    /// Check that every setting the selected backend needs is present.
    ///
    /// All missing settings are reported together as one `Misconfigured` error.
    pub fn validate(&self) -> Result<(), AppError> {
        let missing: Vec<&str> = match self.backend() {
            StorageBackend::S3 => [
                ("S3_BUCKET", self.s3_bucket.is_some()),
                ("AWS_ACCESS_KEY_ID", self.aws_access_key_id.is_some()),
                ("AWS_SECRET_ACCESS_KEY", self.aws_secret_access_key.is_some()),
            ]
            .into_iter()
            .filter(|(_, present)| !present)
            .map(|(name, _)| name)
            .collect(),
            StorageBackend::Local => [
                ("LOCAL_STORAGE_PATH", self.local_storage_path.is_some()),
                ("LOCAL_STORAGE_BASE_URL", self.local_storage_base_url.is_some()),
            ]
            .into_iter()
            .filter(|(_, present)| !present)
            .map(|(name, _)| name)
            .collect(),
        };

        if missing.is_empty() {
            return Ok(());
        }

        Err(AppError::Misconfigured(format!(
            "Storage credentials are missing. Please set {} for the {} storage backend.",
            missing.join(", "),
            self.backend()
        )))
    }
}
