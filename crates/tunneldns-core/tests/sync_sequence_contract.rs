//! Contract Test: Resolve → Publish Sequence
//!
//! Constraints verified:
//! - The provider is only called after a successful lookup
//! - A failed lookup never reaches the provider
//! - Missing configuration stops the run before any component is called
//! - The update body is derived only from its inputs (no hidden state)

mod common;

use common::*;
use std::sync::atomic::Ordering;
use tunneldns_core::{Error, SyncError, Synchronizer};

#[tokio::test]
async fn successful_run_publishes_resolved_endpoint() {
    let source = StaticTunnelSource::new("tcp://1.2.3.4:5555");
    let lookups = source.counter();
    let provider = MockDnsProvider::new();
    let recorded = provider.recorded();

    let sync = Synchronizer::new(Box::new(source), Box::new(provider), &minimal_config());
    let outcome = sync.run().await.expect("run succeeds");

    assert_eq!(lookups.load(Ordering::SeqCst), 1);
    assert_eq!(outcome.endpoint.host(), "1.2.3.4");
    assert_eq!(outcome.endpoint.port(), 5555);
    assert_eq!(outcome.response["success"], true);

    let updates = recorded.lock().unwrap();
    assert_eq!(updates.len(), 1);
    let body = serde_json::to_value(&updates[0]).unwrap();
    assert_eq!(body["type"], "SRV");
    assert_eq!(body["name"], "mc.example.com");
    assert_eq!(body["content"], "1.2.3.4:5555");
    assert_eq!(body["data"]["service"], "_minecraft");
    assert_eq!(body["data"]["proto"], "_tcp");
    assert_eq!(body["data"]["port"], 5555);
    assert_eq!(body["data"]["target"], "1.2.3.4");
    assert_eq!(body["ttl"], 60);
}

#[tokio::test]
async fn failed_lookup_never_reaches_provider() {
    let provider = MockDnsProvider::new();
    let recorded = provider.recorded();

    let sync = Synchronizer::new(
        Box::new(StaticTunnelSource::without_tcp_tunnel()),
        Box::new(provider),
        &minimal_config(),
    );

    let err = sync.run().await.unwrap_err();
    assert!(matches!(err, SyncError::Resolve(Error::NoTcpTunnel(_))));
    assert!(recorded.lock().unwrap().is_empty());
}

#[tokio::test]
async fn unparsable_public_url_is_a_resolve_failure() {
    let provider = MockDnsProvider::new();
    let recorded = provider.recorded();

    let sync = Synchronizer::new(
        Box::new(StaticTunnelSource::new("tcp://1.2.3.4:notaport")),
        Box::new(provider),
        &minimal_config(),
    );

    let err = sync.run().await.unwrap_err();
    assert!(matches!(err.inner(), Error::InvalidEndpoint(_)));
    assert!(recorded.lock().unwrap().is_empty());
}

#[tokio::test]
async fn provider_failure_keeps_resolved_endpoint() {
    let sync = Synchronizer::new(
        Box::new(StaticTunnelSource::new("tcp://1.2.3.4:5555")),
        Box::new(MockDnsProvider::failing(403)),
        &minimal_config(),
    );

    match sync.run().await {
        Err(SyncError::Publish { endpoint, source }) => {
            assert_eq!(endpoint.to_string(), "1.2.3.4:5555");
            assert!(source.to_string().contains("403"));
        }
        other => panic!("expected publish failure, got {:?}", other),
    }
}

#[tokio::test]
async fn repeated_runs_send_identical_bodies() {
    let provider = MockDnsProvider::new();
    let recorded = provider.recorded();

    let sync = Synchronizer::new(
        Box::new(StaticTunnelSource::new("tcp://1.2.3.4:5555")),
        Box::new(provider),
        &minimal_config(),
    );

    sync.run().await.expect("first run succeeds");
    sync.run().await.expect("second run succeeds");

    let updates = recorded.lock().unwrap();
    assert_eq!(updates.len(), 2);
    assert_eq!(updates[0], updates[1]);
    assert_eq!(
        serde_json::to_string(&updates[0]).unwrap(),
        serde_json::to_string(&updates[1]).unwrap()
    );
}
