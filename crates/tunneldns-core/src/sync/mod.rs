//! One-shot tunnel → SRV record synchronization
//!
//! The [`Synchronizer`] runs the resolve → publish sequence exactly once:
//!
//! ```text
//! ┌──────────────┐  TunnelEndpoint  ┌──────────────┐  SrvRecordUpdate  ┌─────────────┐
//! │ TunnelSource │ ───────────────▶ │ Synchronizer │ ────────────────▶ │ DnsProvider │
//! └──────────────┘                  └──────────────┘                   └─────────────┘
//! ```
//!
//! ## Flow
//!
//! 1. Ask the tunnel source for the public TCP endpoint
//! 2. If that fails, stop; the provider is never called
//! 3. Build a fresh SRV update from the endpoint and the configured record
//! 4. Send it through the provider and return its response

use crate::config::SyncConfig;
use crate::endpoint::TunnelEndpoint;
use crate::error::Error;
use crate::record::{PROTO_TCP, SrvRecordUpdate};
use crate::traits::{DnsProvider, TunnelSource};
use tracing::{debug, error, info};

/// Stage at which a run failed
#[derive(thiserror::Error, Debug)]
pub enum SyncError {
    /// The tunnel endpoint could not be resolved; nothing was published
    #[error("Failed to retrieve tunnel endpoint: {0}")]
    Resolve(#[source] Error),

    /// The endpoint was resolved but the record update failed
    #[error("Failed to update DNS record to {endpoint}: {source}")]
    Publish {
        endpoint: TunnelEndpoint,
        #[source]
        source: Error,
    },
}

impl SyncError {
    /// The underlying component error
    pub fn inner(&self) -> &Error {
        match self {
            SyncError::Resolve(e) => e,
            SyncError::Publish { source, .. } => source,
        }
    }
}

/// Result of a successful run
#[derive(Debug, Clone)]
pub struct SyncOutcome {
    /// Endpoint reported by the tunnel source
    pub endpoint: TunnelEndpoint,
    /// Body that was sent to the provider
    pub update: SrvRecordUpdate,
    /// Parsed provider response
    pub response: serde_json::Value,
}

/// Runs one resolve → publish sequence
pub struct Synchronizer {
    source: Box<dyn TunnelSource>,
    provider: Box<dyn DnsProvider>,
    record_name: String,
    service_name: String,
    ttl: u32,
}

impl Synchronizer {
    /// Create a synchronizer for the record described by `config`
    pub fn new(
        source: Box<dyn TunnelSource>,
        provider: Box<dyn DnsProvider>,
        config: &SyncConfig,
    ) -> Self {
        Self {
            source,
            provider,
            record_name: config.record_name.clone(),
            service_name: config.service_name.clone(),
            ttl: config.ttl,
        }
    }

    /// Resolve the tunnel endpoint
    pub async fn resolve(&self) -> Result<TunnelEndpoint, SyncError> {
        debug!("Resolving tunnel endpoint via {}", self.source.source_name());

        match self.source.lookup().await {
            Ok(endpoint) => {
                info!(
                    "Tunnel host: {}, port: {}",
                    endpoint.host(),
                    endpoint.port()
                );
                Ok(endpoint)
            }
            Err(e) => {
                error!("Failed to retrieve tunnel endpoint: {}", e);
                Err(SyncError::Resolve(e))
            }
        }
    }

    /// Build the SRV update for `endpoint`
    pub fn build_update(&self, endpoint: &TunnelEndpoint) -> SrvRecordUpdate {
        SrvRecordUpdate::new(
            self.record_name.as_str(),
            self.service_name.as_str(),
            PROTO_TCP,
            endpoint,
            self.ttl,
        )
    }

    /// Publish `endpoint` through the provider
    pub async fn publish(&self, endpoint: TunnelEndpoint) -> Result<SyncOutcome, SyncError> {
        let update = self.build_update(&endpoint);

        info!(
            "Publishing {} SRV record {} -> {} via {}",
            update.data().service,
            update.name(),
            update.content(),
            self.provider.provider_name()
        );

        match self.provider.update_srv_record(&update).await {
            Ok(response) => Ok(SyncOutcome {
                endpoint,
                update,
                response,
            }),
            Err(e) => {
                error!("Failed to update DNS record {}: {}", update.name(), e);
                Err(SyncError::Publish {
                    endpoint,
                    source: e,
                })
            }
        }
    }

    /// Run the full sequence once
    pub async fn run(&self) -> Result<SyncOutcome, SyncError> {
        let endpoint = self.resolve().await?;
        self.publish(endpoint).await
    }
}
