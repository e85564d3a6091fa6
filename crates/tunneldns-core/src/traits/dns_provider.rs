// # DNS Provider Trait
//
// Defines the interface for writing an SRV record via a provider API.
//
// ## Implementations
//
// - Cloudflare: `tunneldns-provider-cloudflare` crate
//
// ## Usage
//
// ```rust,ignore
// use tunneldns_core::{DnsProvider, SrvRecordUpdate, TunnelEndpoint};
//
// let provider = /* DnsProvider implementation */;
// let endpoint = TunnelEndpoint::new("0.tcp.ngrok.io", 12345)?;
// let update = SrvRecordUpdate::new("mc.example.com", "_minecraft", "_tcp", &endpoint, 60);
// let response = provider.update_srv_record(&update).await?;
// ```

use crate::record::SrvRecordUpdate;
use async_trait::async_trait;

/// Trait for DNS provider implementations
///
/// Providers are stateless and single-shot: one call performs at most one
/// write request. They carry no retry or backoff logic; a failed request is
/// returned as an error.
///
/// Implementations must never log their credentials.
#[async_trait]
pub trait DnsProvider: Send + Sync {
    /// Overwrite the configured record with `update`
    ///
    /// # Returns
    ///
    /// - `Ok(Value)`: the provider's parsed JSON response
    /// - `Err(Error)`: if the request failed or was rejected
    async fn update_srv_record(
        &self,
        update: &SrvRecordUpdate,
    ) -> Result<serde_json::Value, crate::Error>;

    /// Get the provider name (for logging/debugging)
    ///
    /// A static string identifying the provider (e.g., "cloudflare")
    fn provider_name(&self) -> &'static str;
}
