// # ngrok Tunnel Source
//
// This crate provides a tunnel source backed by the local ngrok agent API.
//
// ## API Reference
//
// - Agent API: GET `http://127.0.0.1:4040/api/tunnels`
//
// ```json
// {
//   "tunnels": [
//     { "name": "minecraft", "proto": "tcp", "public_url": "tcp://0.tcp.ngrok.io:12345" },
//     { "name": "web", "proto": "https", "public_url": "https://abcd.ngrok.app" }
//   ]
// }
// ```
//
// The first entry with `proto == "tcp"` wins; its `public_url` is parsed into
// a [`TunnelEndpoint`].

use serde::Deserialize;
use serde_json::Value;
use std::time::Duration;
use tunneldns_core::config::SyncConfig;
use tunneldns_core::traits::TunnelSource;
use tunneldns_core::{Error, Result, TunnelEndpoint};

/// Protocol value of TCP tunnels in the agent response
const TCP_PROTO: &str = "tcp";

/// Response of `GET /api/tunnels`
///
/// Entries stay untyped: only the first tcp entry is read, so a half-filled
/// entry further down the list does not fail the lookup.
#[derive(Debug, Deserialize)]
struct TunnelList {
    tunnels: Vec<Value>,
}

/// Tunnel source that queries the ngrok agent API
pub struct NgrokTunnelSource {
    /// Agent API URL (usually `http://127.0.0.1:4040/api/tunnels`)
    url: String,

    /// HTTP client
    client: reqwest::Client,
}

impl NgrokTunnelSource {
    /// Create a new ngrok tunnel source
    ///
    /// # Parameters
    ///
    /// - `url`: Agent API tunnels URL
    /// - `timeout`: Upper bound for the whole request
    pub fn new(url: impl Into<String>, timeout: Duration) -> Self {
        Self {
            url: url.into(),
            client: reqwest::Client::builder()
                .timeout(timeout)
                .build()
                .unwrap_or_default(),
        }
    }

    /// Create a source from the run configuration
    pub fn from_config(config: &SyncConfig) -> Self {
        Self::new(config.tunnel_api_endpoint.clone(), config.http_timeout)
    }

    /// Agent API URL this source queries
    pub fn url(&self) -> &str {
        &self.url
    }

    /// Fetch and decode the tunnel list
    async fn fetch_tunnels(&self) -> Result<TunnelList> {
        let response = self
            .client
            .get(&self.url)
            .send()
            .await
            .map_err(|e| Error::http(format!("Request to {} failed: {}", self.url, e)))?;

        let status = response.status();
        if status != reqwest::StatusCode::OK {
            tracing::warn!("Error fetching ngrok URL: HTTP {}", status.as_u16());
            return Err(Error::tunnel_source(format!(
                "HTTP {} from {}",
                status.as_u16(),
                self.url
            )));
        }

        let body = response
            .text()
            .await
            .map_err(|e| Error::http(format!("Failed to read response: {}", e)))?;

        let tunnels: TunnelList = serde_json::from_str(&body)?;
        Ok(tunnels)
    }

    /// Pick the first tcp tunnel and parse its public URL
    fn first_tcp_endpoint(&self, list: &TunnelList) -> Result<TunnelEndpoint> {
        let tunnel = list
            .tunnels
            .iter()
            .find(|t| t["proto"].as_str() == Some(TCP_PROTO))
            .ok_or_else(|| Error::NoTcpTunnel(self.url.clone()))?;

        let public_url = tunnel["public_url"].as_str().ok_or_else(|| {
            Error::tunnel_source(format!("tcp tunnel without public_url: {}", tunnel))
        })?;

        tracing::debug!("Found tcp tunnel: {}", public_url);
        TunnelEndpoint::from_public_url(public_url)
    }
}

#[async_trait::async_trait]
impl TunnelSource for NgrokTunnelSource {
    async fn lookup(&self) -> Result<TunnelEndpoint> {
        tracing::debug!("Querying ngrok agent at {}", self.url);

        let result = match self.fetch_tunnels().await {
            Ok(list) => self.first_tcp_endpoint(&list),
            Err(e) => Err(e),
        };

        if let Err(ref e) = result {
            match e {
                Error::Http(_) => tracing::warn!("Network error occurred: {}", e),
                _ => tracing::warn!("Error: {}", e),
            }
        }

        result
    }

    fn source_name(&self) -> &'static str {
        "ngrok"
    }
}
