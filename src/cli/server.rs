//! Server mode CLI logic
//!
//! Contains the core logic for running the HTTP server.

use crate::{
    Settings,
    config::ConfigSource,
    server::{self, app},
    utils::version,
};
use std::net::{IpAddr, Ipv4Addr, Ipv6Addr, SocketAddr};
use std::path::Path;
use tokio::net::TcpListener;
use tracing_subscriber::{EnvFilter, layer::SubscriberExt, util::SubscriberInitExt};

/// Arguments for server mode
#[derive(Debug, Default)]
pub struct ServerArgs {
    pub port: Option<u16>,
    pub host: Option<String>,
    pub config: Option<String>,
    pub verbose: bool,
}

impl ServerArgs {
    /// Configuration source selected by these arguments
    pub fn config_source(&self) -> ConfigSource {
        ConfigSource::locate(self.config.as_deref().map(Path::new))
    }
}

/// Resolve settings from config file, environment and CLI arguments
///
/// Configuration precedence:
/// 1. Command line arguments (highest priority)
/// 2. Environment variables
/// 3. Configuration file (from --config, PROFILE_API_CONFIG or default location)
/// 4. Default values (lowest priority)
///
/// Any unreadable, unparsable or invalid configuration is an error.
pub fn resolve_settings(args: &ServerArgs, source: &ConfigSource) -> crate::Result<Settings> {
    let mut settings = source.load()?;

    if let Some(host) = &args.host {
        settings.server.host = host.clone();
    }
    if let Some(port) = args.port {
        settings.server.port = port;
    }
    if args.verbose {
        settings.logging.verbose = true;
    }

    settings.validate()?;
    Ok(settings)
}

/// Build the log filter
///
/// 1. verbose flag (highest priority) -> debug level
/// 2. RUST_LOG environment variable
/// 3. Config file logging.level
pub fn build_env_filter(settings: &Settings) -> EnvFilter {
    if settings.logging.verbose {
        EnvFilter::new("debug")
    } else if std::env::var("RUST_LOG").is_ok() {
        EnvFilter::from_default_env()
    } else {
        EnvFilter::new(&settings.logging.level)
    }
}

/// Run server mode with the given arguments
///
/// Returns once a shutdown signal has been handled. Errors (invalid
/// configuration, bind failure) are fatal to the process.
pub async fn run_server_mode(args: ServerArgs) -> anyhow::Result<()> {
    // Settings pick the log filter, so they are resolved before logging exists
    let source = args.config_source();
    let settings = resolve_settings(&args, &source)?;

    tracing_subscriber::registry()
        .with(build_env_filter(&settings))
        .with(tracing_subscriber::fmt::layer())
        .try_init()?;

    tracing::info!("Starting profile API v{}", version::get_version());
    tracing::info!("Configuration loaded from {}", source);
    tracing::debug!("Final configuration: {:?}", settings);

    let app = app::create_app(&settings);
    let listener = bind_listener(&settings.server.host, settings.server.port).await?;

    tracing::info!(
        "Profile API v{} listening on {} (read timeout {}s, write timeout {}s, idle timeout {}s)",
        version::get_version(),
        listener.local_addr()?,
        settings.server.read_timeout.as_secs(),
        settings.server.write_timeout.as_secs(),
        settings.server.idle_timeout.as_secs(),
    );

    server::serve(
        listener,
        app,
        settings.server.idle_timeout,
        server::shutdown_signal(),
    )
    .await?;

    Ok(())
}

/// Parse the host string into the address to listen on
///
/// Accepts IP literals plus `::` and `0.0.0.0`. Host names are rejected.
pub fn parse_address(host: &str, port: u16) -> crate::Result<SocketAddr> {
    let ip = host.parse::<IpAddr>().map_err(|_| {
        crate::Error::config(
            "host",
            format!(
                "Invalid host address: {}. Use '::' for IPv6 or '0.0.0.0' for IPv4",
                host
            ),
        )
    })?;
    Ok(SocketAddr::new(ip, port))
}

/// Bind a listener for `host:port`
///
/// When `host` is the IPv6 wildcard and IPv6 is unavailable, falls back to
/// the IPv4 wildcard.
pub async fn bind_listener(host: &str, port: u16) -> crate::Result<TcpListener> {
    let addr = parse_address(host, port)?;

    match TcpListener::bind(addr).await {
        Ok(listener) => Ok(listener),
        Err(e) if addr.ip() == IpAddr::V6(Ipv6Addr::UNSPECIFIED) => {
            tracing::warn!(
                "Could not listen on [::]:{} (Caused by {}), falling back to 0.0.0.0",
                port,
                e
            );
            let fallback = SocketAddr::new(IpAddr::V4(Ipv4Addr::UNSPECIFIED), port);
            TcpListener::bind(fallback)
                .await
                .map_err(|source| crate::Error::Bind {
                    addr: fallback,
                    source,
                })
        }
        Err(source) => Err(crate::Error::Bind { addr, source }),
    }
}
