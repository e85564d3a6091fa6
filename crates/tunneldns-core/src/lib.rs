// # tunneldns-core
//
// Core library for publishing a tunnel's public endpoint as an SRV record.
//
// ## Architecture Overview
//
// - **TunnelSource**: Trait for discovering the public endpoint of a TCP tunnel
// - **DnsProvider**: Trait for overwriting an SRV record via a provider API
// - **Synchronizer**: Runs the resolve → publish sequence once
// - **SyncConfig**: Settings read once from the environment
//
// ## Design Principles
//
// 1. **Separation of Concerns**: Core logic is separate from HTTP integrations
// 2. **Single-Shot**: One lookup and at most one write per run, no retries
// 3. **Contained Failures**: Every component returns a typed error, never panics
// 4. **Library-First**: The daemon is a thin wrapper over this crate

pub mod traits;
pub mod sync;
pub mod config;
pub mod endpoint;
pub mod record;
pub mod error;

// Re-export core types for convenience
pub use traits::{TunnelSource, DnsProvider};
pub use sync::{Synchronizer, SyncOutcome, SyncError};
pub use config::{SyncConfig, Mode};
pub use endpoint::TunnelEndpoint;
pub use record::{SrvRecordUpdate, SrvData};
pub use error::{Error, Result};
