//! Rendezvous lobby server
//!
//! # Usage
//!
//! ```bash
//! # Defaults: 0.0.0.0:7070, 60s heartbeat timeout, 30s background sweep
//! rendezvous-server
//!
//! # Hosting platforms inject PORT
//! PORT=10000 rendezvous-server
//!
//! # Sweep only on listing
//! rendezvous-server --sweep-interval-secs 0
//! ```

use std::net::{IpAddr, Ipv4Addr, SocketAddr};
use std::time::Duration;

use clap::Parser;
use rendezvous::{DEFAULT_PORT, RegistryConfig, RendezvousServer};
use tracing::{Level, error, info};
use tracing_subscriber::{EnvFilter, fmt, prelude::*};

#[derive(Parser, Debug)]
#[command(name = "rendezvous-server")]
#[command(about = "Lobby directory for peer-to-peer game sessions")]
#[command(version)]
struct Args {
    /// Port to listen on
    #[arg(short, long, env = "PORT", default_value_t = DEFAULT_PORT)]
    port: u16,

    /// IP address to bind (IPv4 or IPv6)
    #[arg(short, long, env = "BIND_ADDR", default_value_t = IpAddr::V4(Ipv4Addr::UNSPECIFIED))]
    bind: IpAddr,

    /// Seconds without a heartbeat before a room is evicted
    #[arg(long, default_value_t = 60)]
    heartbeat_timeout_secs: u64,

    /// Seconds between background sweeps (0 disables the background sweeper)
    #[arg(long, default_value_t = 30)]
    sweep_interval_secs: u64,
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    tracing_subscriber::registry()
        .with(fmt::layer())
        .with(
            EnvFilter::builder()
                .with_default_directive(Level::INFO.into())
                .from_env_lossy(),
        )
        .init();

    let args = Args::parse();

    let addr = SocketAddr::new(args.bind, args.port);

    let server = RendezvousServer::builder()
        .bind(&addr.to_string())
        .registry_config(RegistryConfig {
            heartbeat_timeout: Duration::from_secs(args.heartbeat_timeout_secs),
            ..RegistryConfig::default()
        })
        .sweep_interval(Some(Duration::from_secs(args.sweep_interval_secs)))
        .build()
        .await?;

    info!("Lobby server listening on {}", server.local_addr()?);

    server.run_until(shutdown_signal()).await?;

    Ok(())
}

/// Resolves on Ctrl-C. If the handler can't be installed, never resolves,
/// so the server keeps running until it is killed.
async fn shutdown_signal() {
    wait_for_signal(tokio::signal::ctrl_c()).await;
}

async fn wait_for_signal<F>(signal: F)
where
    F: Future<Output = std::io::Result<()>>,
{
    match signal.await {
        Ok(()) => info!("shutdown signal received"),
        Err(e) => {
            error!("failed to listen for Ctrl-C: {}", e);
            std::future::pending::<()>().await;
        }
    }
}
