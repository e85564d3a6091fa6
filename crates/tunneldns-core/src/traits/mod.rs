//! Core traits for tunneldns
//!
//! This module defines the two seams of a synchronization run.
//!
//! - [`TunnelSource`]: Discover the public endpoint of a TCP tunnel
//! - [`DnsProvider`]: Overwrite an SRV record with that endpoint

pub mod tunnel_source;
pub mod dns_provider;

pub use tunnel_source::TunnelSource;
pub use dns_provider::DnsProvider;
