//! Provider configuration
//!
//! Endpoint, project and credentials are read from the environment. The API
//! key is only needed by the provisioning binary; client-side code runs on a
//! user session instead.

use crate::error::{AppError, AppResult};
use log::{info, warn};
use url::Url;

pub const ENDPOINT_VAR: &str = "PUBLIC_APPWRITE_ENDPOINT";
pub const PROJECT_ID_VAR: &str = "PUBLIC_APPWRITE_PROJECT_ID";
pub const API_KEY_VAR: &str = "APPWRITE_API_KEY";
pub const DATABASE_ID_VAR: &str = "APPWRITE_DATABASE_ID";

pub const DEFAULT_ENDPOINT: &str = "https://cloud.appwrite.io/v1";
pub const DEFAULT_DATABASE_ID: &str = "focusflow-db";

#[derive(Debug, Clone)]
pub struct AppwriteConfig {
    pub endpoint: Url,
    pub project_id: String,
    pub api_key: Option<String>,
    pub database_id: String,
}

impl AppwriteConfig {
    /// Reads configuration from the process environment.
    pub fn from_env() -> AppResult<Self> {
        Self::from_lookup(|name| std::env::var(name).ok())
    }

    /// Reads configuration through `lookup`, treating blank values as unset.
    pub fn from_lookup<F>(lookup: F) -> AppResult<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let read = |name: &str| {
            lookup(name)
                .map(|value| value.trim().to_string())
                .filter(|value| !value.is_empty())
        };

        let raw_endpoint = read(ENDPOINT_VAR).unwrap_or_else(|| DEFAULT_ENDPOINT.to_string());
        let endpoint = Url::parse(&raw_endpoint).map_err(|e| {
            AppError::config(format!("{} is not a valid URL ({}): {}", ENDPOINT_VAR, raw_endpoint, e))
        })?;

        let config = Self {
            endpoint,
            project_id: read(PROJECT_ID_VAR).unwrap_or_default(),
            api_key: read(API_KEY_VAR),
            database_id: read(DATABASE_ID_VAR).unwrap_or_else(|| DEFAULT_DATABASE_ID.to_string()),
        };

        validate_config(&config)?;
        Ok(config)
    }

    /// The API key, or a configuration error naming the missing variable.
    pub fn require_api_key(&self) -> AppResult<&str> {
        self.api_key
            .as_deref()
            .ok_or_else(|| AppError::config(format!("{} environment variable is required", API_KEY_VAR)))
    }

    /// Endpoint without a trailing slash, ready for path concatenation.
    pub fn endpoint_base(&self) -> String {
        self.endpoint.as_str().trim_end_matches('/').to_string()
    }
}

/// Validates provider configuration
///
/// # Returns
///
/// * `Ok(())` - endpoint is http(s) and a project id is present
/// * `Err(AppError::Config)` - otherwise
pub fn validate_config(config: &AppwriteConfig) -> AppResult<()> {
    match config.endpoint.scheme() {
        "https" => {}
        "http" => warn!("Provider endpoint {} is not using HTTPS", config.endpoint),
        other => {
            return Err(AppError::config(format!(
                "{} must use http or https, got '{}'",
                ENDPOINT_VAR, other
            )))
        }
    }

    if config.project_id.is_empty() {
        return Err(AppError::config(format!("{} environment variable is required", PROJECT_ID_VAR)));
    }

    info!(
        "Configuration: endpoint={} project={} database={}",
        config.endpoint, config.project_id, config.database_id
    );
    Ok(())
}
