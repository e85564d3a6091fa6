// # tunneldnsd - Tunnel endpoint publisher
//
// Reads the public endpoint of the first TCP tunnel from the local ngrok
// agent and writes it into a Cloudflare SRV record, then exits.
//
// This is a thin integration layer: all resolve/publish logic lives in
// tunneldns-core and the two adapter crates.
//
// ## Configuration
//
// A `.env` file in the working directory is loaded first and overrides the
// process environment.
//
// ### Required
// - `CLOUDFLARE_API_TOKEN`: API token with Zone:DNS:Edit permission
// - `CLOUDFLARE_ZONE_ID`: Zone containing the record
// - `CLOUDFLARE_RECORD_ID`: SRV record to overwrite
// - `NGROK_API_ENDPOINT`: Agent API URL, e.g. http://127.0.0.1:4040/api/tunnels
//
// ### Optional
// - `CLOUDFLARE_RECORD_NAME`: Record name (default: default_record_name)
// - `CLOUDFLARE_SERVICE_NAME`: SRV service label (default: _minecraft)
// - `CLOUDFLARE_RECORD_TTL`: TTL in seconds (default: 60)
// - `TUNNELDNS_HTTP_TIMEOUT_SECS`: Request timeout (default: 10)
// - `TUNNELDNS_MODE`: live or dry-run (default: live)
// - `TUNNELDNS_LOG_LEVEL`: trace, debug, info, warn, error (default: info)
//
// ## Example
//
// ```bash
// export CLOUDFLARE_API_TOKEN=your_token
// export CLOUDFLARE_ZONE_ID=023e105f4ecef8ad9ca31a8372d0c353
// export CLOUDFLARE_RECORD_ID=372e67954025e0ba6aaa6d586b9e0b59
// export NGROK_API_ENDPOINT=http://127.0.0.1:4040/api/tunnels
// export CLOUDFLARE_RECORD_NAME=mc.example.com
//
// tunneldnsd
// ```

use anyhow::Result;
use std::env;
use std::fmt::Write as _;
use std::process::ExitCode;
use tracing::{Level, debug, error, info, warn};
use tracing_subscriber::FmtSubscriber;
use tunneldns_core::{SyncConfig, SyncError, SyncOutcome, Synchronizer, TunnelEndpoint};
use tunneldns_provider_cloudflare::CloudflareProvider;
use tunneldns_source_ngrok::NgrokTunnelSource;

/// Log level variable
const ENV_LOG_LEVEL: &str = "TUNNELDNS_LOG_LEVEL";

/// Exit codes for different termination scenarios
///
/// - 0: Record updated
/// - 1: Configuration error, nothing was attempted
/// - 2: Tunnel lookup or record update failed
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum TunnelDnsExitCode {
    Success = 0,
    ConfigError = 1,
    RuntimeError = 2,
}

impl From<TunnelDnsExitCode> for ExitCode {
    fn from(code: TunnelDnsExitCode) -> Self {
        ExitCode::from(code as u8)
    }
}

/// Parse the log level setting
fn parse_log_level(value: &str) -> Result<Level> {
    match value.to_lowercase().as_str() {
        "trace" => Ok(Level::TRACE),
        "debug" => Ok(Level::DEBUG),
        "info" => Ok(Level::INFO),
        "warn" => Ok(Level::WARN),
        "error" => Ok(Level::ERROR),
        _ => anyhow::bail!(
            "{} '{}' is not valid. \
            Valid levels: trace, debug, info, warn, error",
            ENV_LOG_LEVEL,
            value
        ),
    }
}

/// Install the stdout subscriber
fn init_tracing(level: Level) -> Result<()> {
    let subscriber = FmtSubscriber::builder()
        .with_max_level(level)
        .with_target(false)
        .finish();

    tracing::subscriber::set_global_default(subscriber)
        .map_err(|e| anyhow::anyhow!("Failed to set tracing subscriber: {}", e))
}

fn main() -> ExitCode {
    // A missing .env file is fine; the environment may already be complete
    let dotenv_result = dotenvy::dotenv_override();

    let log_level = match parse_log_level(
        &env::var(ENV_LOG_LEVEL).unwrap_or_else(|_| "info".to_string()),
    ) {
        Ok(level) => level,
        Err(e) => {
            println!("Configuration error: {}", e);
            return TunnelDnsExitCode::ConfigError.into();
        }
    };

    if let Err(e) = init_tracing(log_level) {
        println!("{}", e);
        return TunnelDnsExitCode::ConfigError.into();
    }

    match dotenv_result {
        Ok(path) => debug!("Loaded environment from {}", path.display()),
        Err(e) if e.not_found() => debug!("No .env file found"),
        Err(e) => warn!("Ignoring unreadable .env file: {}", e),
    }

    let config = match load_config(|key| env::var(key).ok()) {
        Ok(cfg) => cfg,
        Err(code) => return code.into(),
    };

    let rt = match tokio::runtime::Builder::new_current_thread()
        .enable_all()
        .build()
    {
        Ok(runtime) => runtime,
        Err(e) => {
            error!("Failed to create tokio runtime: {}", e);
            return TunnelDnsExitCode::RuntimeError.into();
        }
    };

    rt.block_on(run(config)).into()
}

/// Read the configuration; nothing touches the network before this succeeds
fn load_config<F>(lookup: F) -> std::result::Result<SyncConfig, TunnelDnsExitCode>
where
    F: Fn(&str) -> Option<String>,
{
    match SyncConfig::from_lookup(lookup) {
        Ok(config) => {
            debug!("Configuration loaded: {:?}", config);
            Ok(config)
        }
        Err(e) => {
            error!("{}", e);
            Err(TunnelDnsExitCode::ConfigError)
        }
    }
}

/// Build the components and run one synchronization
async fn run(config: SyncConfig) -> TunnelDnsExitCode {
    let provider = match CloudflareProvider::from_config(&config) {
        Ok(provider) => provider,
        Err(e) => {
            error!("{}", e);
            return TunnelDnsExitCode::ConfigError;
        }
    };
    let source = NgrokTunnelSource::from_config(&config);

    info!(
        "Publishing tunnel from {} to record {}",
        source.url(),
        config.record_name
    );

    let synchronizer = Synchronizer::new(Box::new(source), Box::new(provider), &config);
    execute(&synchronizer).await
}

/// Run the synchronizer, print the result and pick the exit code
async fn execute(synchronizer: &Synchronizer) -> TunnelDnsExitCode {
    let result = synchronizer.run().await;
    print!("{}", render(&result));
    exit_code(&result)
}

fn exit_code(result: &std::result::Result<SyncOutcome, SyncError>) -> TunnelDnsExitCode {
    match result {
        Ok(_) => TunnelDnsExitCode::Success,
        Err(_) => TunnelDnsExitCode::RuntimeError,
    }
}

/// Standard output for a finished run
fn render(result: &std::result::Result<SyncOutcome, SyncError>) -> String {
    let mut out = String::new();
    match result {
        Ok(outcome) => {
            let json = serde_json::to_string_pretty(&outcome.response)
                .unwrap_or_else(|_| outcome.response.to_string());
            let _ = writeln!(out, "{}", endpoint_line(&outcome.endpoint));
            let _ = writeln!(out, "{}", json);
        }
        Err(SyncError::Resolve(_)) => {
            out.push_str("Failed to retrieve tunnel host and port.\n");
        }
        Err(SyncError::Publish { endpoint, .. }) => {
            let _ = writeln!(out, "{}", endpoint_line(endpoint));
            out.push_str("null\n");
        }
    }
    out
}

fn endpoint_line(endpoint: &TunnelEndpoint) -> String {
    format!("Tunnel Host: {}, Port: {}", endpoint.host(), endpoint.port())
}
