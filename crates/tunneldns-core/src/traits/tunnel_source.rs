// # Tunnel Source Trait
//
// Defines the interface for discovering the public endpoint of a tunnel.
//
// ## Implementations
//
// - ngrok agent API: `tunneldns-source-ngrok` crate
//
// ## Usage
//
// ```rust,ignore
// use tunneldns_core::TunnelSource;
//
// let source = /* TunnelSource implementation */;
// let endpoint = source.lookup().await?;
// println!("{}:{}", endpoint.host(), endpoint.port());
// ```

use crate::endpoint::TunnelEndpoint;
use async_trait::async_trait;

/// Trait for tunnel agent integrations
///
/// A source performs exactly one lookup per call and keeps no state between
/// calls. Every failure (transport, non-success status, malformed body, no
/// TCP tunnel, unparsable public URL) is returned as an error; the caller
/// never sees a partially filled endpoint.
#[async_trait]
pub trait TunnelSource: Send + Sync {
    /// Fetch the public endpoint of the first TCP tunnel
    ///
    /// # Returns
    ///
    /// - `Ok(TunnelEndpoint)`: host and port of the tunnel
    /// - `Err(Error)`: if the agent could not be queried or exposes no usable tunnel
    async fn lookup(&self) -> Result<TunnelEndpoint, crate::Error>;

    /// Get the source name (for logging/debugging)
    fn source_name(&self) -> &'static str;
}
