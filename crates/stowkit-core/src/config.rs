//! Configuration module
//!
//! This module provides the configuration structure for the upload gateway
//! and the mailer, loaded from environment variables with sensible defaults.
//! There is no framework wiring here: components take `&Config` (or explicit
//! parts) at construction time.

use std::env;

use crate::storage_types::StorageBackend;

// Default limits and cache policy
const MAX_FILE_SIZE_MB: usize = 20;
const MAX_FILES_PER_BATCH: usize = 20;
const UPLOAD_CACHE_TTL_SECS: u64 = 86_400;
const UPLOAD_CACHE_CHECK_INTERVAL_SECS: u64 = 600;
const SMTP_DEFAULT_PORT: u16 = 587;

/// Application configuration.
#[derive(Clone, Debug)]
pub struct Config {
    pub environment: String,
    // Storage configuration
    pub storage_backend: Option<StorageBackend>,
    pub s3_bucket: Option<String>,
    pub s3_region: Option<String>,
    pub s3_endpoint: Option<String>, // Custom endpoint for S3-compatible providers (MinIO, DigitalOcean Spaces, etc.)
    pub aws_region: Option<String>,
    pub local_storage_path: Option<String>,
    pub local_storage_base_url: Option<String>,
    // Upload limits
    pub max_file_size_bytes: usize,
    pub max_files_per_batch: usize,
    // Deduplication cache
    pub upload_cache_enabled: bool,
    pub upload_cache_ttl_secs: u64,
    pub upload_cache_check_interval_secs: u64,
    pub upload_single_flight: bool,
    // Mailer
    pub mailer_enabled: bool,
    pub smtp_host: Option<String>,
    pub smtp_port: Option<u16>,
    pub smtp_user: Option<String>,
    pub smtp_password: Option<String>,
    pub smtp_from: Option<String>,
    pub smtp_tls: bool,
}

impl Config {
    /// Check if the application is running in production mode
    pub fn is_production(&self) -> bool {
        self.environment.to_lowercase().eq("production") || self.environment.to_lowercase().eq("prod")
    }

    pub fn from_env() -> Result<Self, anyhow::Error> {
        dotenvy::dotenv().ok();

        let environment = env::var("ENVIRONMENT")
            .or_else(|_| env::var("APP_ENV"))
            .unwrap_or_else(|_| "development".to_string());

        let storage_backend = env::var("STORAGE_BACKEND")
            .ok()
            .and_then(|s| s.parse::<StorageBackend>().ok());

        let max_file_size_mb = env::var("MAX_FILE_SIZE_MB")
            .unwrap_or_else(|_| MAX_FILE_SIZE_MB.to_string())
            .parse::<usize>()
            .unwrap_or(MAX_FILE_SIZE_MB);

        let config = Config {
            environment,
            storage_backend,
            s3_bucket: env::var("S3_BUCKET").ok(),
            s3_region: env::var("S3_REGION").ok(),
            s3_endpoint: env::var("S3_ENDPOINT").ok(),
            aws_region: env::var("AWS_REGION").ok(),
            local_storage_path: env::var("LOCAL_STORAGE_PATH").ok(),
            local_storage_base_url: env::var("LOCAL_STORAGE_BASE_URL").ok(),
            max_file_size_bytes: max_file_size_mb * 1024 * 1024,
            max_files_per_batch: env::var("MAX_FILES_PER_BATCH")
                .unwrap_or_else(|_| MAX_FILES_PER_BATCH.to_string())
                .parse()
                .unwrap_or(MAX_FILES_PER_BATCH),
            upload_cache_enabled: env::var("UPLOAD_CACHE_ENABLED")
                .unwrap_or_else(|_| "true".to_string())
                .to_lowercase()
                .parse()
                .unwrap_or(true),
            upload_cache_ttl_secs: env::var("UPLOAD_CACHE_TTL_SECS")
                .unwrap_or_else(|_| UPLOAD_CACHE_TTL_SECS.to_string())
                .parse()
                .unwrap_or(UPLOAD_CACHE_TTL_SECS),
            upload_cache_check_interval_secs: env::var("UPLOAD_CACHE_CHECK_INTERVAL_SECS")
                .unwrap_or_else(|_| UPLOAD_CACHE_CHECK_INTERVAL_SECS.to_string())
                .parse()
                .unwrap_or(UPLOAD_CACHE_CHECK_INTERVAL_SECS),
            upload_single_flight: env::var("UPLOAD_SINGLE_FLIGHT")
                .unwrap_or_else(|_| "false".to_string())
                .to_lowercase()
                .parse()
                .unwrap_or(false),
            mailer_enabled: env::var("MAILER_ENABLED")
                .unwrap_or_else(|_| "false".to_string())
                .to_lowercase()
                .parse()
                .unwrap_or(false),
            smtp_host: env::var("SMTP_HOST").ok().filter(|s| !s.is_empty()),
            smtp_port: env::var("SMTP_PORT")
                .ok()
                .and_then(|s| s.parse().ok())
                .filter(|&p| p > 0),
            smtp_user: env::var("SMTP_USER").ok().filter(|s| !s.is_empty()),
            smtp_password: env::var("SMTP_PASSWORD").ok().filter(|s| !s.is_empty()),
            smtp_from: env::var("SMTP_FROM").ok().filter(|s| !s.is_empty()),
            smtp_tls: env::var("SMTP_TLS")
                .unwrap_or_else(|_| "true".to_string())
                .to_lowercase()
                .parse()
                .unwrap_or(true),
        };

        config.validate()?;
        Ok(config)
    }

    /// SMTP port, defaulting to the submission port when unset.
    pub fn smtp_port_or_default(&self) -> u16 {
        self.smtp_port.unwrap_or(SMTP_DEFAULT_PORT)
    }

    pub fn validate(&self) -> Result<(), anyhow::Error> {
        if self.max_file_size_bytes == 0 {
            return Err(anyhow::anyhow!("MAX_FILE_SIZE_MB must be greater than 0"));
        }

        if self.max_files_per_batch == 0 {
            return Err(anyhow::anyhow!("MAX_FILES_PER_BATCH must be greater than 0"));
        }

        if self.upload_cache_enabled && self.upload_cache_ttl_secs == 0 {
            return Err(anyhow::anyhow!(
                "UPLOAD_CACHE_TTL_SECS must be greater than 0 when the upload cache is enabled"
            ));
        }

        if self.mailer_enabled && (self.smtp_host.is_none() || self.smtp_from.is_none()) {
            return Err(anyhow::anyhow!(
                "MAILER_ENABLED=true requires SMTP_HOST and SMTP_FROM to be set"
            ));
        }

        // Validate storage backend configuration
        let backend = self.storage_backend.unwrap_or(StorageBackend::S3);
        match backend {
            StorageBackend::S3 => {
                if self.s3_bucket.is_none() {
                    return Err(anyhow::anyhow!(
                        "S3_BUCKET must be set when using S3 storage backend"
                    ));
                }
                if self.s3_region.is_none() && self.aws_region.is_none() {
                    return Err(anyhow::anyhow!(
                        "S3_REGION or AWS_REGION must be set when using S3 storage backend"
                    ));
                }
            }
            StorageBackend::Local => {
                if self.local_storage_path.is_none() {
                    return Err(anyhow::anyhow!(
                        "LOCAL_STORAGE_PATH must be set when using local storage backend"
                    ));
                }
                if self.local_storage_base_url.is_none() {
                    return Err(anyhow::anyhow!(
                        "LOCAL_STORAGE_BASE_URL must be set when using local storage backend"
                    ));
                }
            }
        }

        Ok(())
    }
}
