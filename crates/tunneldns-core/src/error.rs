//! Error types for tunneldns
//!
//! Every fallible operation in the workspace returns [`Result`]. Failures are
//! contained in the component that produced them and surfaced as one of the
//! variants below; nothing panics on bad input or a failed request.

use thiserror::Error;

/// Result type alias for tunneldns operations
pub type Result<T> = std::result::Result<T, Error>;

/// Core error type for tunneldns
#[derive(Error, Debug)]
pub enum Error {
    /// Missing or invalid configuration
    #[error("Configuration error: {0}")]
    Config(String),

    /// Tunnel agent API errors (bad status, unreadable response)
    #[error("Tunnel source error: {0}")]
    TunnelSource(String),

    /// The agent answered but exposes no tunnel with protocol "tcp"
    #[error("No tcp tunnel found in {0}")]
    NoTcpTunnel(String),

    /// A public URL or `host:port` value that does not parse
    #[error("Invalid endpoint: {0}")]
    InvalidEndpoint(String),

    /// Transport-level failures (connect, timeout, DNS resolution)
    #[error("HTTP error: {0}")]
    Http(String),

    /// JSON serialization/deserialization errors
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// Authentication errors
    #[error("Authentication failed: {0}")]
    Authentication(String),

    /// Rate limiting errors
    #[error("Rate limited: {0}")]
    RateLimited(String),

    /// Record not found
    #[error("Record not found: {0}")]
    NotFound(String),

    /// Provider-specific error
    #[error("Provider error ({provider}): {message}")]
    Provider {
        /// Provider name
        provider: String,
        /// Error message
        message: String,
    },
}

impl Error {
    /// Create a configuration error
    pub fn config(msg: impl Into<String>) -> Self {
        Self::Config(msg.into())
    }

    /// Create a tunnel source error
    pub fn tunnel_source(msg: impl Into<String>) -> Self {
        Self::TunnelSource(msg.into())
    }

    /// Create an invalid endpoint error
    pub fn invalid_endpoint(msg: impl Into<String>) -> Self {
        Self::InvalidEndpoint(msg.into())
    }

    /// Create an HTTP error
    pub fn http(msg: impl Into<String>) -> Self {
        Self::Http(msg.into())
    }

    /// Create an authentication error
    pub fn auth(msg: impl Into<String>) -> Self {
        Self::Authentication(msg.into())
    }

    /// Create a rate limit error
    pub fn rate_limited(msg: impl Into<String>) -> Self {
        Self::RateLimited(msg.into())
    }

    /// Create a "not found" error
    pub fn not_found(msg: impl Into<String>) -> Self {
        Self::NotFound(msg.into())
    }

    /// Create a provider-specific error
    pub fn provider(provider: impl Into<String>, message: impl Into<String>) -> Self {
        Self::Provider {
            provider: provider.into(),
            message: message.into(),
        }
    }

    /// Whether this error was raised before any network call was attempted
    pub fn is_config(&self) -> bool {
        matches!(self, Self::Config(_))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_only_config_errors_are_config() {
        assert!(Error::config("missing").is_config());
        assert!(!Error::tunnel_source("HTTP 502").is_config());
        assert!(!Error::provider("cloudflare", "boom").is_config());
    }

    #[test]
    fn test_provider_error_display() {
        let err = Error::provider("cloudflare", "HTTP 500");
        assert_eq!(err.to_string(), "Provider error (cloudflare): HTTP 500");
    }
}
