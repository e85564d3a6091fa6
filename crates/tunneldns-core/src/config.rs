//! Configuration for a synchronization run
//!
//! [`SyncConfig`] is read once at startup from environment-style key/value
//! pairs and passed by reference to the tunnel source and DNS provider.
//! Only presence of required values is checked, plus the numeric settings
//! that have to parse.

use crate::error::{Error, Result};
use crate::record::DEFAULT_TTL;
use std::fmt;
use std::time::Duration;

/// Cloudflare API token (required)
pub const ENV_API_TOKEN: &str = "CLOUDFLARE_API_TOKEN";
/// Cloudflare zone ID (required)
pub const ENV_ZONE_ID: &str = "CLOUDFLARE_ZONE_ID";
/// Cloudflare DNS record ID to overwrite (required)
pub const ENV_RECORD_ID: &str = "CLOUDFLARE_RECORD_ID";
/// Local ngrok agent API URL (required)
pub const ENV_TUNNEL_API_ENDPOINT: &str = "NGROK_API_ENDPOINT";
/// DNS record name
pub const ENV_RECORD_NAME: &str = "CLOUDFLARE_RECORD_NAME";
/// SRV service label
pub const ENV_SERVICE_NAME: &str = "CLOUDFLARE_SERVICE_NAME";
/// Record TTL in seconds
pub const ENV_RECORD_TTL: &str = "CLOUDFLARE_RECORD_TTL";
/// Timeout applied to every HTTP request, in seconds
pub const ENV_HTTP_TIMEOUT_SECS: &str = "TUNNELDNS_HTTP_TIMEOUT_SECS";
/// `live` or `dry-run`
pub const ENV_MODE: &str = "TUNNELDNS_MODE";

pub const DEFAULT_RECORD_NAME: &str = "default_record_name";
pub const DEFAULT_SERVICE_NAME: &str = "_minecraft";
pub const DEFAULT_HTTP_TIMEOUT: Duration = Duration::from_secs(10);

const MAX_HTTP_TIMEOUT_SECS: u64 = 300;

/// Whether the DNS provider actually writes the record
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Mode {
    #[default]
    Live,
    /// Build and log the update without sending it
    DryRun,
}

impl Mode {
    fn parse(value: &str) -> Result<Self> {
        match value.to_lowercase().as_str() {
            "live" => Ok(Mode::Live),
            "dry-run" | "dry_run" | "dryrun" => Ok(Mode::DryRun),
            other => Err(Error::config(format!(
                "{ENV_MODE} '{other}' is not valid. Valid modes: live, dry-run"
            ))),
        }
    }

    pub fn is_dry_run(self) -> bool {
        self == Mode::DryRun
    }
}

/// Immutable settings for one run
#[derive(Clone)]
pub struct SyncConfig {
    /// ⚠️ NEVER log this value
    pub api_token: String,
    pub zone_id: String,
    pub record_id: String,
    pub tunnel_api_endpoint: String,
    pub record_name: String,
    pub service_name: String,
    pub ttl: u32,
    pub http_timeout: Duration,
    pub mode: Mode,
}

impl fmt::Debug for SyncConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("SyncConfig")
            .field("api_token", &"<REDACTED>")
            .field("zone_id", &self.zone_id)
            .field("record_id", &self.record_id)
            .field("tunnel_api_endpoint", &self.tunnel_api_endpoint)
            .field("record_name", &self.record_name)
            .field("service_name", &self.service_name)
            .field("ttl", &self.ttl)
            .field("http_timeout", &self.http_timeout)
            .field("mode", &self.mode)
            .finish()
    }
}

impl SyncConfig {
    /// Load configuration from the process environment
    pub fn from_env() -> Result<Self> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Load configuration through an arbitrary key lookup
    ///
    /// Empty values are treated as missing; whitespace is kept as given.
    /// Every missing required key is reported in a single [`Error::Config`].
    pub fn from_lookup<F>(lookup: F) -> Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let get = |key: &str| lookup(key).filter(|v| !v.is_empty());

        let mut missing = Vec::new();
        let mut required = |key: &'static str| {
            get(key).unwrap_or_else(|| {
                missing.push(key);
                String::new()
            })
        };

        let api_token = required(ENV_API_TOKEN);
        let zone_id = required(ENV_ZONE_ID);
        let record_id = required(ENV_RECORD_ID);
        let tunnel_api_endpoint = required(ENV_TUNNEL_API_ENDPOINT);

        if !missing.is_empty() {
            return Err(Error::config(format!(
                "Missing one or more required environment variables: {}",
                missing.join(", ")
            )));
        }

        let ttl = match get(ENV_RECORD_TTL) {
            Some(raw) => match raw.trim().parse::<u32>() {
                Ok(ttl) if ttl > 0 => ttl,
                _ => {
                    return Err(Error::config(format!(
                        "{ENV_RECORD_TTL} must be a positive integer. Got: {raw}"
                    )));
                }
            },
            None => DEFAULT_TTL,
        };

        let http_timeout = match get(ENV_HTTP_TIMEOUT_SECS) {
            Some(raw) => match raw.trim().parse::<u64>() {
                Ok(secs) if (1..=MAX_HTTP_TIMEOUT_SECS).contains(&secs) => {
                    Duration::from_secs(secs)
                }
                _ => {
                    return Err(Error::config(format!(
                        "{ENV_HTTP_TIMEOUT_SECS} must be between 1 and {MAX_HTTP_TIMEOUT_SECS} seconds. Got: {raw}"
                    )));
                }
            },
            None => DEFAULT_HTTP_TIMEOUT,
        };

        let mode = match get(ENV_MODE) {
            Some(raw) => Mode::parse(raw.trim())?,
            None => Mode::default(),
        };

        Ok(Self {
            api_token,
            zone_id,
            record_id,
            tunnel_api_endpoint,
            record_name: get(ENV_RECORD_NAME).unwrap_or_else(|| DEFAULT_RECORD_NAME.to_string()),
            service_name: get(ENV_SERVICE_NAME)
                .unwrap_or_else(|| DEFAULT_SERVICE_NAME.to_string()),
            ttl,
            http_timeout,
            mode,
        })
    }
}
