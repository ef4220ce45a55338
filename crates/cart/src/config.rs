//! Cart configuration loaded from environment variables.
//!
//! # Environment Variables
//!
//! ## Required
//! - `BRAMBLE_CATALOG_URL` - Base URL of the catalog service
//!
//! ## Optional
//! - `BRAMBLE_CATALOG_TOKEN` - Bearer token for the catalog service
//! - `BRAMBLE_CATALOG_TIMEOUT_SECS` - Request timeout (default: 10)
//! - `BRAMBLE_STORAGE_DIR` - Directory for persisted cart slots (default: ./data)
//! - `BRAMBLE_NAMESPACE` - Prefix for slot keys (default: bramble)

use std::path::PathBuf;
use std::time::Duration;

use secrecy::SecretString;
use thiserror::Error;
use url::Url;

const DEFAULT_TIMEOUT_SECS: &str = "10";
const DEFAULT_STORAGE_DIR: &str = "./data";
const DEFAULT_NAMESPACE: &str = "bramble";

/// Configuration errors that can occur during loading.
#[derive(Debug, Error)]
pub enum ConfigError {
    /// A required environment variable is not set.
    #[error("Missing environment variable: {0}")]
    MissingEnvVar(String),
    /// An environment variable is set but cannot be parsed.
    #[error("Invalid environment variable {0}: {1}")]
    InvalidEnvVar(String, String),
}

/// Cart application configuration.
#[derive(Debug, Clone)]
pub struct CartConfig {
    /// Catalog service configuration.
    pub catalog: CatalogConfig,
    /// Directory holding persisted cart slots.
    pub storage_dir: PathBuf,
    /// Namespace prefixed to every slot key.
    pub namespace: String,
}

/// Catalog service configuration.
///
/// Implements `Debug` manually to redact the access token.
#[derive(Clone)]
pub struct CatalogConfig {
    /// Base URL of the catalog service, without a trailing slash.
    pub base_url: String,
    /// Optional bearer token sent with every request.
    pub token: Option<SecretString>,
    /// Per-request timeout.
    pub timeout: Duration,
}

impl std::fmt::Debug for CatalogConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("CatalogConfig")
            .field("base_url", &self.base_url)
            .field("token", &self.token.as_ref().map(|_| "[REDACTED]"))
            .field("timeout", &self.timeout)
            .finish()
    }
}

impl CartConfig {
    /// Load configuration from environment variables.
    ///
    /// Calls `dotenvy::dotenv()` to load from `.env` file if present.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError` if required variables are missing or invalid.
    pub fn from_env() -> Result<Self, ConfigError> {
        // Load .env file if present (ignore errors if not found)
        let _ = dotenvy::dotenv();

        let catalog = CatalogConfig::from_env()?;
        let storage_dir = PathBuf::from(get_env_or_default(
            "BRAMBLE_STORAGE_DIR",
            DEFAULT_STORAGE_DIR,
        ));
        let namespace = get_env_or_default("BRAMBLE_NAMESPACE", DEFAULT_NAMESPACE);

        Ok(Self {
            catalog,
            storage_dir,
            namespace,
        })
    }

    /// The key of the persistence slot holding the cart.
    #[must_use]
    pub fn slot_key(&self) -> String {
        format!("{}:cart", self.namespace)
    }
}

impl CatalogConfig {
    fn from_env() -> Result<Self, ConfigError> {
        let base_url = validate_base_url(
            "BRAMBLE_CATALOG_URL",
            &get_required_env("BRAMBLE_CATALOG_URL")?,
        )?;
        let token = get_optional_env("BRAMBLE_CATALOG_TOKEN").map(SecretString::from);
        let timeout_secs = get_env_or_default("BRAMBLE_CATALOG_TIMEOUT_SECS", DEFAULT_TIMEOUT_SECS)
            .parse::<u64>()
            .map_err(|e| {
                ConfigError::InvalidEnvVar("BRAMBLE_CATALOG_TIMEOUT_SECS".to_string(), e.to_string())
            })?;

        Ok(Self {
            base_url,
            token,
            timeout: Duration::from_secs(timeout_secs),
        })
    }
}

// =============================================================================
// Helper Functions
// =============================================================================

/// Get a required environment variable.
fn get_required_env(key: &str) -> Result<String, ConfigError> {
    std::env::var(key).map_err(|_| ConfigError::MissingEnvVar(key.to_string()))
}

/// Get an optional environment variable.
fn get_optional_env(key: &str) -> Option<String> {
    std::env::var(key).ok()
}

/// Get an environment variable with a default value.
fn get_env_or_default(key: &str, default: &str) -> String {
    std::env::var(key).unwrap_or_else(|_| default.to_string())
}

/// Validate a base URL and normalize it (no trailing slash).
fn validate_base_url(var_name: &str, raw: &str) -> Result<String, ConfigError> {
    let url = Url::parse(raw)
        .map_err(|e| ConfigError::InvalidEnvVar(var_name.to_string(), e.to_string()))?;

    if url.host_str().is_none() {
        return Err(ConfigError::InvalidEnvVar(
            var_name.to_string(),
            "URL must have a host".to_string(),
        ));
    }

    Ok(raw.trim_end_matches('/').to_string())
}
