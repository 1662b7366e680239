//! Site Router (v1)
//!
//! An HTTP front door built with Tokio and Axum.
//!
//! # Architecture Overview
//!
//! ```text
//!                         ┌──────────────────────────────────────────────┐
//!                         │                 SITE ROUTER                  │
//!                         │                                              │
//!     Client Request      │  ┌─────────┐    ┌─────────┐    ┌──────────┐  │
//!     ────────────────────┼─▶│listener │───▶│  http   │───▶│ routing  │  │
//!                         │  │(+ TLS)  │    │ server  │    │  table   │  │
//!                         │  └─────────┘    └─────────┘    └────┬─────┘  │
//!                         │                       first match   │        │
//!                         │                   ┌─────────────────┴──┐     │
//!                         │                   ▼                    ▼     │
//!                         │            ┌────────────┐      ┌───────────┐ │
//!                         │            │ admin site │      │  health   │ │
//!                         │            │  /admin/   │      │  / (all)  │ │
//!                         │            └────────────┘      └───────────┘ │
//!                         │                                              │
//!                         │  config · observability · lifecycle          │
//!                         └──────────────────────────────────────────────┘
//! ```

use std::error::Error;
use std::net::SocketAddr;
use std::path::PathBuf;

use clap::Parser;
use tokio::net::TcpListener;

use site_router::config::{self, SiteConfig};
use site_router::lifecycle::{build_route_table, signals, StartupError};
use site_router::observability::{logging, metrics};
use site_router::{HttpServer, Shutdown};

#[derive(Parser)]
#[command(name = "site-router")]
#[command(about = "Serve the site route table (admin site + health catch-all)", long_about = None)]
struct Args {
    /// TOML configuration file. Built-in defaults are used when omitted.
    #[arg(short, long, env = "SITE_ROUTER_CONFIG")]
    config: Option<PathBuf>,

    /// Override listener.bind_address.
    #[arg(short, long, env = "SITE_ROUTER_BIND")]
    bind: Option<String>,

    /// Override only the listener port, keeping the configured host.
    #[arg(short, long, env = "PORT")]
    port: Option<u16>,

    /// Override admin.api_key.
    #[arg(long, env = "SITE_ADMIN_KEY", hide_env_values = true)]
    admin_key: Option<String>,

    /// Validate configuration, print the route table and exit.
    #[arg(long)]
    check: bool,
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn Error>> {
    let args = Args::parse();

    let mut config = match &args.config {
        Some(path) => config::read_config(path)?,
        None => SiteConfig::default(),
    };
    if let Some(bind) = args.bind {
        config.listener.bind_address = bind;
    }
    if let Some(port) = args.port {
        config.listener.set_port(port);
    }
    if let Some(key) = args.admin_key {
        config.admin.api_key = key;
    }

    logging::init_logging(&config.observability);
    tracing::info!("site-router v{} starting", env!("CARGO_PKG_VERSION"));
    config::check_config(&config)?;

    let table = build_route_table(&config)?;

    if args.check {
        for route in table.routes() {
            println!("{}", route);
        }
        return Ok(());
    }

    tracing::info!(
        bind_address = %config.listener.bind_address,
        tls = config.listener.tls.is_some(),
        request_timeout_secs = config.timeouts.request_secs,
        "Configuration loaded"
    );

    if config.observability.metrics_enabled {
        let addr = config
            .observability
            .metrics_address
            .parse::<SocketAddr>()
            .map_err(|e| StartupError::Metrics(e.to_string()))?;
        metrics::init_metrics(addr).map_err(|e| StartupError::Metrics(e.to_string()))?;
    }

    let listener = TcpListener::bind(&config.listener.bind_address).await?;
    tracing::info!(address = %listener.local_addr()?, "Listening for connections");

    let shutdown = Shutdown::new();
    signals::spawn_signal_listener(shutdown.clone());

    let server = HttpServer::new(config, table);
    server.run(listener, shutdown.subscribe()).await?;

    tracing::info!("Shutdown complete");
    Ok(())
}
