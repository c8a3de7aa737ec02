use std::path::PathBuf;

use paddock_core::countdown::Locale;
use paddock_core::tracker::{RecheckPolicy, DEFAULT_COW_GROWTH_KG, DEFAULT_GOAT_GROWTH_KG};

use crate::auth::jwt::JwtConfig;

/// Default request body limit for photo uploads (50 MiB).
const DEFAULT_MAX_UPLOAD_BYTES: usize = 50 * 1024 * 1024;

/// Server configuration loaded from environment variables.
///
/// All fields have sensible defaults suitable for local development.
/// In production, override via environment variables.
#[derive(Debug, Clone)]
pub struct ServerConfig {
    /// Bind address (default: `0.0.0.0`).
    pub host: String,
    /// Bind port (default: `3000`).
    pub port: u16,
    /// Allowed CORS origins, parsed from comma-separated `CORS_ORIGINS` env var.
    pub cors_origins: Vec<String>,
    /// HTTP request timeout in seconds (default: `30`).
    pub request_timeout_secs: u64,
    /// Directory photo uploads are written to and served from.
    pub upload_dir: PathBuf,
    /// Maximum accepted request body size in bytes.
    pub max_upload_bytes: usize,
    /// Language of the midnight countdown labels.
    pub locale: Locale,
    /// Growth allowance applied at periodic re-checks.
    pub recheck: RecheckPolicy,
    /// JWT token configuration (secret, expiry).
    pub jwt: JwtConfig,
}

impl ServerConfig {
    /// Load configuration from environment variables with defaults.
    ///
    /// | Env Var                    | Default                    |
    /// |----------------------------|----------------------------|
    /// | `HOST`                     | `0.0.0.0`                  |
    /// | `PORT`                     | `3000`                     |
    /// | `CORS_ORIGINS`             | `http://localhost:5173`    |
    /// | `REQUEST_TIMEOUT_SECS`     | `30`                       |
    /// | `UPLOAD_DIR`               | `static/uploads`           |
    /// | `MAX_UPLOAD_BYTES`         | `52428800`                 |
    /// | `DISPLAY_LOCALE`           | `bn`                       |
    /// | `COW_GROWTH_ALLOWANCE_KG`  | `30`                       |
    /// | `GOAT_GROWTH_ALLOWANCE_KG` | `0`                        |
    pub fn from_env() -> Self {
        let host = std::env::var("HOST").unwrap_or_else(|_| "0.0.0.0".into());

        let port: u16 = std::env::var("PORT")
            .unwrap_or_else(|_| "3000".into())
            .parse()
            .expect("PORT must be a valid u16");

        let cors_origins: Vec<String> = std::env::var("CORS_ORIGINS")
            .unwrap_or_else(|_| "http://localhost:5173".into())
            .split(',')
            .map(|s| s.trim().to_string())
            .filter(|s| !s.is_empty())
            .collect();

        let request_timeout_secs: u64 = std::env::var("REQUEST_TIMEOUT_SECS")
            .unwrap_or_else(|_| "30".into())
            .parse()
            .expect("REQUEST_TIMEOUT_SECS must be a valid u64");

        let upload_dir = PathBuf::from(
            std::env::var("UPLOAD_DIR").unwrap_or_else(|_| "static/uploads".into()),
        );

        let max_upload_bytes: usize = std::env::var("MAX_UPLOAD_BYTES")
            .unwrap_or_else(|_| DEFAULT_MAX_UPLOAD_BYTES.to_string())
            .parse()
            .expect("MAX_UPLOAD_BYTES must be a valid usize");

        let locale: Locale = std::env::var("DISPLAY_LOCALE")
            .unwrap_or_else(|_| "bn".into())
            .parse()
            .expect("DISPLAY_LOCALE must be `bn` or `en`");

        let cow_growth_kg: f64 = std::env::var("COW_GROWTH_ALLOWANCE_KG")
            .unwrap_or_else(|_| DEFAULT_COW_GROWTH_KG.to_string())
            .parse()
            .expect("COW_GROWTH_ALLOWANCE_KG must be a number");

        let goat_growth_kg: f64 = std::env::var("GOAT_GROWTH_ALLOWANCE_KG")
            .unwrap_or_else(|_| DEFAULT_GOAT_GROWTH_KG.to_string())
            .parse()
            .expect("GOAT_GROWTH_ALLOWANCE_KG must be a number");

        let jwt = JwtConfig::from_env();

        Self {
            host,
            port,
            cors_origins,
            request_timeout_secs,
            upload_dir,
            max_upload_bytes,
            locale,
            recheck: RecheckPolicy {
                cow_growth_kg,
                goat_growth_kg,
            },
            jwt,
        }
    }
}
