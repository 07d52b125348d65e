//! Configuration loading for cf-ddns.

use crate::error::{DdnsError, Result};
use serde::{Deserialize, Deserializer};
use std::path::Path;
use std::time::Duration;

/// Default IP echo service.
pub const DEFAULT_IP_SERVICE: &str = "http://ifconfig.me/ip";

/// Default Cloudflare API base.
pub const DEFAULT_API_BASE_URL: &str = "https://api.cloudflare.com/client/v4";

/// Configuration read from the JSON file given on the command line.
#[derive(Debug, Clone, Deserialize)]
pub struct Config {
    /// DNS record name (e.g., "vpn.example.com").
    #[serde(default, deserialize_with = "null_as_default")]
    pub name: String,

    /// Cloudflare API token, sent as a bearer token.
    #[serde(default, deserialize_with = "null_as_default")]
    pub api_token: String,

    /// Zone ID.
    #[serde(default, deserialize_with = "null_as_default")]
    pub zone_id: String,

    /// ID of the DNS record to overwrite.
    #[serde(default, deserialize_with = "null_as_default")]
    pub dns_record_id: String,

    /// URL returning the caller's public IP as plain text.
    #[serde(default = "default_ip_service")]
    pub ip_service: String,

    /// Cloudflare API base URL.
    #[serde(default = "default_api_base_url")]
    pub api_base_url: String,

    /// Per-request timeout in seconds (default: 2, also used for 0).
    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u64,
}

/// Deserialize an explicit `null` as the type's default value.
pub(crate) fn null_as_default<'de, D, T>(deserializer: D) -> std::result::Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: Default + Deserialize<'de>,
{
    Option::<T>::deserialize(deserializer).map(Option::unwrap_or_default)
}

fn default_ip_service() -> String {
    DEFAULT_IP_SERVICE.to_string()
}

fn default_api_base_url() -> String {
    DEFAULT_API_BASE_URL.to_string()
}

fn default_timeout_secs() -> u64 {
    2
}

impl Config {
    /// Load configuration from a specific path.
    ///
    /// Unlike a daemon config there is no fallback: a missing or malformed
    /// file is always an error.
    pub fn load_from(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path).map_err(|e| {
            DdnsError::Config(format!("error reading file {}: {}", path.display(), e))
        })?;

        Self::from_json(&content).map_err(|e| match e {
            DdnsError::Decode(msg) => {
                DdnsError::Config(format!("error parsing file {}: {}", path.display(), msg))
            }
            other => other,
        })
    }

    /// Parse configuration from a JSON string.
    pub fn from_json(content: &str) -> Result<Self> {
        let config: Config = serde_json::from_str(content)?;
        Ok(config)
    }

    /// Client-side timeout applied to every request.
    pub fn timeout(&self) -> Duration {
        match self.timeout_secs {
            0 => Duration::from_secs(default_timeout_secs()),
            secs => Duration::from_secs(secs),
        }
    }
}
