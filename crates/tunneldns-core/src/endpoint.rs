//! Tunnel endpoint model and `host:port` parsing
//!
//! A [`TunnelEndpoint`] is only ever built through the parser, so a value in
//! hand always has a non-empty host and a non-zero port.

use crate::error::{Error, Result};
use std::fmt;
use std::str::FromStr;

/// Scheme prefix the tunnel agent puts in front of TCP public URLs
pub const TCP_SCHEME: &str = "tcp://";

/// Public host and port of a TCP tunnel
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct TunnelEndpoint {
    host: String,
    port: u16,
}

impl TunnelEndpoint {
    /// Create an endpoint, rejecting an empty host or port 0
    pub fn new(host: impl Into<String>, port: u16) -> Result<Self> {
        let host = host.into();
        if host.is_empty() {
            return Err(Error::invalid_endpoint("host is empty"));
        }
        if port == 0 {
            return Err(Error::invalid_endpoint(format!("port must be positive ({host}:0)")));
        }
        Ok(Self { host, port })
    }

    /// Parse a tunnel public URL such as `tcp://0.tcp.ngrok.io:12345`
    ///
    /// The `tcp://` prefix is optional; what remains must be `host:port`.
    pub fn from_public_url(public_url: &str) -> Result<Self> {
        let rest = public_url.strip_prefix(TCP_SCHEME).unwrap_or(public_url);
        rest.parse()
    }

    /// Public host name or address
    pub fn host(&self) -> &str {
        &self.host
    }

    /// Public port
    pub fn port(&self) -> u16 {
        self.port
    }

    /// `host:port` form used as the record content
    pub fn content(&self) -> String {
        self.to_string()
    }
}

impl FromStr for TunnelEndpoint {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        let parts: Vec<&str> = s.split(':').collect();
        let [host, port] = parts.as_slice() else {
            return Err(Error::invalid_endpoint(format!(
                "expected host:port, got '{s}'"
            )));
        };

        let port: u16 = port
            .parse()
            .map_err(|_| Error::invalid_endpoint(format!("port '{port}' is not a valid number")))?;

        Self::new(*host, port)
    }
}

impl fmt::Display for TunnelEndpoint {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:{}", self.host, self.port)
    }
}
