//! SRV record update payload
//!
//! [`SrvRecordUpdate`] serializes to the body of a Cloudflare
//! `PUT /zones/:zone_id/dns_records/:record_id` request:
//!
//! ```json
//! {
//!   "type": "SRV",
//!   "name": "mc.example.com",
//!   "content": "0.tcp.ngrok.io:12345",
//!   "data": {
//!     "service": "_minecraft", "proto": "_tcp", "name": "mc.example.com",
//!     "priority": 0, "weight": 0, "port": 12345, "target": "0.tcp.ngrok.io"
//!   },
//!   "ttl": 60
//! }
//! ```

use crate::endpoint::TunnelEndpoint;
use crate::error::Result;
use serde::Serialize;

/// Default record TTL in seconds
pub const DEFAULT_TTL: u32 = 60;

/// SRV protocol label for TCP tunnels
pub const PROTO_TCP: &str = "_tcp";

/// Full replacement body for one SRV record
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SrvRecordUpdate {
    #[serde(rename = "type")]
    record_type: &'static str,
    name: String,
    content: String,
    data: SrvData,
    ttl: u32,
}

/// SRV-specific sub-fields
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SrvData {
    pub service: String,
    pub proto: String,
    pub name: String,
    pub priority: u16,
    pub weight: u16,
    pub port: u16,
    pub target: String,
}

impl SrvRecordUpdate {
    /// Build the update for `endpoint`; priority and weight are always 0
    pub fn new(
        name: impl Into<String>,
        service: impl Into<String>,
        proto: impl Into<String>,
        endpoint: &TunnelEndpoint,
        ttl: u32,
    ) -> Self {
        let name = name.into();
        Self {
            record_type: "SRV",
            content: endpoint.content(),
            data: SrvData {
                service: service.into(),
                proto: proto.into(),
                name: name.clone(),
                priority: 0,
                weight: 0,
                port: endpoint.port(),
                target: endpoint.host().to_string(),
            },
            name,
            ttl,
        }
    }

    /// Build the update from a `host:port` content string
    pub fn from_content(
        name: impl Into<String>,
        content: &str,
        service: impl Into<String>,
        proto: impl Into<String>,
        ttl: u32,
    ) -> Result<Self> {
        let endpoint: TunnelEndpoint = content.parse()?;
        Ok(Self::new(name, service, proto, &endpoint, ttl))
    }

    pub fn record_type(&self) -> &str {
        self.record_type
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn content(&self) -> &str {
        &self.content
    }

    pub fn data(&self) -> &SrvData {
        &self.data
    }

    pub fn ttl(&self) -> u32 {
        self.ttl
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_payload_shape() {
        let update =
            SrvRecordUpdate::from_content("mc.example.com", "1.2.3.4:5555", "_minecraft", PROTO_TCP, DEFAULT_TTL)
                .unwrap();

        assert_eq!(update.record_type(), "SRV");

        let body = serde_json::to_value(&update).unwrap();
        assert_eq!(
            body,
            json!({
                "type": "SRV",
                "name": "mc.example.com",
                "content": "1.2.3.4:5555",
                "data": {
                    "service": "_minecraft",
                    "proto": "_tcp",
                    "name": "mc.example.com",
                    "priority": 0,
                    "weight": 0,
                    "port": 5555,
                    "target": "1.2.3.4"
                },
                "ttl": 60
            })
        );
        assert!(body["data"]["port"].is_u64());
    }

    #[test]
    fn test_non_numeric_port_is_an_error() {
        let result = SrvRecordUpdate::from_content("mc", "1.2.3.4:port", "_minecraft", PROTO_TCP, 60);
        assert!(result.is_err());
    }

    #[test]
    fn test_same_arguments_same_body() {
        let endpoint = TunnelEndpoint::new("1.2.3.4", 5555).unwrap();
        let first = SrvRecordUpdate::new("mc", "_minecraft", PROTO_TCP, &endpoint, 120);
        let second = SrvRecordUpdate::new("mc", "_minecraft", PROTO_TCP, &endpoint, 120);

        assert_eq!(first, second);
        assert_eq!(
            serde_json::to_string(&first).unwrap(),
            serde_json::to_string(&second).unwrap()
        );
        assert_eq!(first.ttl(), 120);
    }
}
