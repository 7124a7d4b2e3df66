//! Application settings loaded from `config.toml`.
//!
//! Every field has a default, so the file is optional: a missing file yields
//! [`AppConfig::default`], while a file that exists but cannot be parsed or fails
//! validation is a configuration error.

use crate::errors::{Error, Result};
use serde::Deserialize;
use std::path::Path;
use url::Url;

/// Smallest accepted number of random bytes per coupon code (16 hex characters).
pub const MIN_CODE_BYTES: usize = 8;

/// Configuration structure representing the entire config.toml file
#[derive(Debug, Clone, Deserialize, Default)]
#[serde(default)]
pub struct AppConfig {
    /// HTTP listener and public URL settings
    pub server: ServerConfig,
    /// Coupon issuance settings
    pub issuance: IssuanceConfig,
    /// QR image settings
    pub qr: QrConfig,
}

/// `[server]` section
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct ServerConfig {
    /// Socket address the HTTP server binds to
    pub bind_address: String,
    /// Absolute base URL that redemption links and QR payloads are built from
    pub public_base_url: String,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            bind_address: "0.0.0.0:8000".to_string(),
            public_base_url: "http://127.0.0.1:8000/".to_string(),
        }
    }
}

/// `[issuance]` section
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct IssuanceConfig {
    /// How many freshly generated codes to try before giving up
    pub max_attempts: u32,
    /// Random bytes per code; the code is their hex encoding
    pub code_bytes: usize,
}

impl Default for IssuanceConfig {
    fn default() -> Self {
        Self {
            max_attempts: 5,
            code_bytes: MIN_CODE_BYTES,
        }
    }
}

/// `[qr]` section
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct QrConfig {
    /// Minimum width and height of rendered QR images, in pixels
    pub min_dimension: u32,
}

impl Default for QrConfig {
    fn default() -> Self {
        Self { min_dimension: 256 }
    }
}

impl AppConfig {
    /// Checks cross-field constraints that serde cannot express.
    ///
    /// # Errors
    /// Returns [`Error::Config`] if the public base URL is not an absolute http(s) URL,
    /// if `max_attempts` is zero, or if `code_bytes` is below [`MIN_CODE_BYTES`].
    pub fn validate(&self) -> Result<()> {
        self.public_base_url()?;

        if self.issuance.max_attempts == 0 {
            return Err(Error::config("issuance.max_attempts must be at least 1"));
        }
        if self.issuance.code_bytes < MIN_CODE_BYTES {
            return Err(Error::config(format!(
                "issuance.code_bytes must be at least {MIN_CODE_BYTES}"
            )));
        }
        Ok(())
    }

    /// Parses the configured public base URL, normalised to end with `/` so that
    /// relative joins append to it instead of replacing its last segment.
    pub fn public_base_url(&self) -> Result<Url> {
        let mut raw = self.server.public_base_url.trim().to_string();
        if !raw.ends_with('/') {
            raw.push('/');
        }
        let url = Url::parse(&raw)?;
        if !matches!(url.scheme(), "http" | "https") {
            return Err(Error::config(format!(
                "server.public_base_url must be http or https, got {}",
                url.scheme()
            )));
        }
        Ok(url)
    }
}

/// Loads application configuration from a TOML file.
///
/// # Errors
/// Returns an error if:
/// - The file exists but cannot be read
/// - The TOML syntax is invalid
/// - The values fail [`AppConfig::validate`]
pub fn load_config<P: AsRef<Path>>(path: P) -> Result<AppConfig> {
    let path = path.as_ref();
    if !path.exists() {
        tracing::info!("No config file at {:?}, using defaults", path);
        let config = AppConfig::default();
        config.validate()?;
        return Ok(config);
    }

    tracing::debug!("Loading configuration from: {:?}", path);
    let contents = std::fs::read_to_string(path)
        .map_err(|e| Error::config(format!("Failed to read config file {path:?}: {e}")))?;
    let config: AppConfig = toml::from_str(&contents)
        .map_err(|e| Error::config(format!("Failed to parse TOML from {path:?}: {e}")))?;
    config.validate()?;
    Ok(config)
}

/// Loads configuration from `COUPON_CONFIG` if set, otherwise from `./config.toml`.
pub fn load_default_config() -> Result<AppConfig> {
    let path = std::env::var("COUPON_CONFIG").unwrap_or_else(|_| "config.toml".to_string());
    load_config(path)
}
