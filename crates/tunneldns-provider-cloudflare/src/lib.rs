// # Cloudflare DNS Provider
//
// This crate provides a Cloudflare SRV record provider for tunneldns.
//
// - One PUT per update, full record replacement
// - Errors returned to the caller, no retry or backoff
// - HTTP timeout taken from the run configuration
// - Status codes mapped to specific errors (401/403, 404, 429, 5xx)
// - Dry-run mode logs the payload instead of sending it
//
// ## Security Requirements
//
// - API token NEVER appears in logs
// - Provider MUST fail fast if token is empty
//
// ## API Reference
//
// - Cloudflare API v4: https://developers.cloudflare.com/api/
// - Update DNS Record: PUT `/zones/:zone_id/dns_records/:record_id`

use async_trait::async_trait;
use serde_json::Value;
use std::time::Duration;
use tunneldns_core::config::SyncConfig;
use tunneldns_core::traits::DnsProvider;
use tunneldns_core::{Error, Result, SrvRecordUpdate};

/// Cloudflare API base URL
pub const CLOUDFLARE_API_BASE: &str = "https://api.cloudflare.com/client/v4";

/// Cloudflare SRV record provider
///
/// # Dry-Run Mode
///
/// When `dry_run` is true the provider logs the target URL and the payload
/// and answers with a synthetic success envelope. Nothing is sent.
///
/// # Security
///
/// The Debug implementation intentionally does NOT expose the API token.
pub struct CloudflareProvider {
    /// Cloudflare API token
    /// ⚠️ NEVER log this value
    api_token: String,

    /// Zone containing the record
    zone_id: String,

    /// Record to overwrite
    record_id: String,

    /// API base URL (overridable for tests)
    base_url: String,

    /// HTTP client for API requests
    client: reqwest::Client,

    /// Dry-run mode: if true, skip the PUT
    dry_run: bool,
}

// Custom Debug implementation that hides the API token
impl std::fmt::Debug for CloudflareProvider {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("CloudflareProvider")
            .field("api_token", &"<REDACTED>")
            .field("zone_id", &self.zone_id)
            .field("record_id", &self.record_id)
            .field("base_url", &self.base_url)
            .field("dry_run", &self.dry_run)
            .finish()
    }
}

impl CloudflareProvider {
    /// Create a new Cloudflare provider
    ///
    /// # Parameters
    ///
    /// - `api_token`: Cloudflare API token with Zone:DNS:Edit permissions
    /// - `zone_id`: Zone containing the record
    /// - `record_id`: Record to overwrite
    /// - `timeout`: Upper bound for each request
    /// - `dry_run`: If true, log the update instead of sending it
    pub fn new(
        api_token: impl Into<String>,
        zone_id: impl Into<String>,
        record_id: impl Into<String>,
        timeout: Duration,
        dry_run: bool,
    ) -> Result<Self> {
        let api_token = api_token.into();
        if api_token.is_empty() {
            return Err(Error::config("Cloudflare API token cannot be empty"));
        }

        let zone_id = zone_id.into();
        let record_id = record_id.into();
        if zone_id.is_empty() || record_id.is_empty() {
            return Err(Error::config("Cloudflare zone ID and record ID are required"));
        }

        let client = reqwest::Client::builder()
            .timeout(timeout)
            .build()
            .unwrap_or_default();

        Ok(Self {
            api_token,
            zone_id,
            record_id,
            base_url: CLOUDFLARE_API_BASE.to_string(),
            client,
            dry_run,
        })
    }

    /// Create a provider from the run configuration
    pub fn from_config(config: &SyncConfig) -> Result<Self> {
        if config.mode.is_dry_run() {
            tracing::warn!("Cloudflare provider running in DRY-RUN mode - no changes will be made");
        }

        Self::new(
            config.api_token.clone(),
            config.zone_id.clone(),
            config.record_id.clone(),
            config.http_timeout,
            config.mode.is_dry_run(),
        )
    }

    /// Point the provider at a different API base URL
    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = base_url.into().trim_end_matches('/').to_string();
        self
    }

    /// Whether updates are only logged
    pub fn is_dry_run(&self) -> bool {
        self.dry_run
    }

    /// URL of the managed record
    pub fn record_url(&self) -> String {
        format!(
            "{}/zones/{}/dns_records/{}",
            self.base_url, self.zone_id, self.record_id
        )
    }

    /// Map a non-200 status to an error, logging the provider's body
    fn status_error(status: reqwest::StatusCode, error_text: &str) -> Error {
        tracing::error!("Error updating Cloudflare DNS: HTTP {}", status.as_u16());
        match serde_json::from_str::<Value>(error_text) {
            Ok(body) => tracing::error!("{}", body),
            Err(_) => tracing::error!("{}", error_text),
        }

        match status.as_u16() {
            401 | 403 => Error::auth(format!(
                "Invalid API token or insufficient permissions. Status: {} - {}",
                status, error_text
            )),
            404 => Error::not_found(format!("DNS record not found. Status: {}", status)),
            429 => Error::rate_limited(format!(
                "Rate limit exceeded. Please retry later. Status: {}",
                status
            )),
            500..=599 => Error::provider(
                "cloudflare",
                format!("Cloudflare server error (transient): {} - {}", status, error_text),
            ),
            _ => Error::provider(
                "cloudflare",
                format!("Failed to update record: {} - {}", status, error_text),
            ),
        }
    }
}

#[async_trait]
impl DnsProvider for CloudflareProvider {
    /// Overwrite the SRV record
    ///
    /// # API Call
    ///
    /// ```http
    /// PUT /zones/:zone_id/dns_records/:record_id
    /// Authorization: Bearer <token>
    /// Content-Type: application/json
    /// ```
    async fn update_srv_record(&self, update: &SrvRecordUpdate) -> Result<Value> {
        let url = self.record_url();
        let payload = serde_json::to_value(update)?;

        tracing::info!(
            "Updating Cloudflare SRV record: {} -> {} [mode: {}]",
            update.name(),
            update.content(),
            if self.dry_run { "DRY-RUN" } else { "LIVE" }
        );

        if self.dry_run {
            tracing::info!(
                "[DRY-RUN] Would send PUT request to {} with payload: {}",
                url,
                payload
            );
            return Ok(serde_json::json!({
                "success": true,
                "dry_run": true,
                "errors": [],
                "messages": [],
                "result": payload,
            }));
        }

        let response = self
            .client
            .put(&url)
            .bearer_auth(&self.api_token)
            .header("Content-Type", "application/json")
            .json(&payload)
            .send()
            .await
            .map_err(|e| {
                tracing::error!("Network error occurred: {}", e);
                Error::http(format!("HTTP request failed: {}", e))
            })?;

        let status = response.status();
        let body_text = response
            .text()
            .await
            .map_err(|e| Error::http(format!("Failed to read response: {}", e)))?;

        if status != reqwest::StatusCode::OK {
            return Err(Self::status_error(status, &body_text));
        }

        let body: Value = serde_json::from_str(&body_text).map_err(|e| {
            tracing::error!("Unexpected error: {}", e);
            Error::provider("cloudflare", format!("Failed to parse response: {}", e))
        })?;

        if body["success"] == Value::Bool(false) {
            tracing::warn!("Cloudflare answered 200 with success=false: {}", body["errors"]);
        }

        tracing::info!("DNS record updated successfully: {} -> {}", update.name(), update.content());
        Ok(body)
    }

    fn provider_name(&self) -> &'static str {
        "cloudflare"
    }
}
