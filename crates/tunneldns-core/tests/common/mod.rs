//! Test doubles and common utilities for synchronization contract tests
//!
//! The doubles count their calls and record what they receive so tests can
//! assert on ordering and on calls that must never happen.

#![allow(dead_code)]

use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};
use tunneldns_core::error::{Error, Result};
use tunneldns_core::traits::{DnsProvider, TunnelSource};
use tunneldns_core::{SrvRecordUpdate, SyncConfig, TunnelEndpoint};

/// A tunnel source that answers from a fixed public URL
pub struct StaticTunnelSource {
    public_url: Option<String>,
    lookup_call_count: Arc<AtomicUsize>,
}

impl StaticTunnelSource {
    /// Source that reports `public_url` (parsed on every lookup)
    pub fn new(public_url: &str) -> Self {
        Self {
            public_url: Some(public_url.to_string()),
            lookup_call_count: Arc::new(AtomicUsize::new(0)),
        }
    }

    /// Source whose agent exposes no tcp tunnel
    pub fn without_tcp_tunnel() -> Self {
        Self {
            public_url: None,
            lookup_call_count: Arc::new(AtomicUsize::new(0)),
        }
    }

    /// Shared handle on the lookup counter
    pub fn counter(&self) -> Arc<AtomicUsize> {
        self.lookup_call_count.clone()
    }
}

#[async_trait::async_trait]
impl TunnelSource for StaticTunnelSource {
    async fn lookup(&self) -> Result<TunnelEndpoint> {
        self.lookup_call_count.fetch_add(1, Ordering::SeqCst);
        match &self.public_url {
            Some(url) => TunnelEndpoint::from_public_url(url),
            None => Err(Error::NoTcpTunnel("static source".to_string())),
        }
    }

    fn source_name(&self) -> &'static str {
        "static"
    }
}

/// A mock DnsProvider that records every update it receives
pub struct MockDnsProvider {
    updates: Arc<Mutex<Vec<SrvRecordUpdate>>>,
    fail_with_status: Option<u16>,
}

impl MockDnsProvider {
    pub fn new() -> Self {
        Self {
            updates: Arc::new(Mutex::new(Vec::new())),
            fail_with_status: None,
        }
    }

    /// Provider that rejects every update with `status`
    pub fn failing(status: u16) -> Self {
        Self {
            updates: Arc::new(Mutex::new(Vec::new())),
            fail_with_status: Some(status),
        }
    }

    /// Shared handle on the recorded updates
    pub fn recorded(&self) -> Arc<Mutex<Vec<SrvRecordUpdate>>> {
        self.updates.clone()
    }
}

#[async_trait::async_trait]
impl DnsProvider for MockDnsProvider {
    async fn update_srv_record(&self, update: &SrvRecordUpdate) -> Result<serde_json::Value> {
        self.updates.lock().unwrap().push(update.clone());

        match self.fail_with_status {
            Some(status) => Err(Error::provider("mock", format!("HTTP {}", status))),
            None => Ok(serde_json::json!({
                "success": true,
                "errors": [],
                "result": serde_json::to_value(update)?,
            })),
        }
    }

    fn provider_name(&self) -> &'static str {
        "mock"
    }
}

/// Config with every required key set
pub fn minimal_config() -> SyncConfig {
    SyncConfig::from_lookup(|key| match key {
        "CLOUDFLARE_API_TOKEN" => Some("test_token".to_string()),
        "CLOUDFLARE_ZONE_ID" => Some("zone123".to_string()),
        "CLOUDFLARE_RECORD_ID" => Some("record456".to_string()),
        "NGROK_API_ENDPOINT" => Some("http://127.0.0.1:4040/api/tunnels".to_string()),
        "CLOUDFLARE_RECORD_NAME" => Some("mc.example.com".to_string()),
        _ => None,
    })
    .expect("minimal config is complete")
}
