//! `RendezvousServer` builder and serve loop.
//!
//! Ties the layers together: a `TcpListener`, the axum
//! [`router`](crate::router), one shared [`RoomRegistry`], and the
//! periodic sweeper that keeps it trimmed.

use std::future::Future;
use std::net::SocketAddr;
use std::sync::Arc;
use std::time::Duration;

use rendezvous_registry::{RegistryConfig, RoomRegistry, spawn_sweeper};
use tokio::net::TcpListener;

use crate::handler::{AppState, router};
use crate::{DEFAULT_PORT, RendezvousError};

/// How often the background sweeper runs unless configured otherwise.
pub const DEFAULT_SWEEP_INTERVAL: Duration = Duration::from_secs(30);

/// Builder for configuring and starting a Rendezvous server.
///
/// # Example
///
/// ```rust,ignore
/// let server = RendezvousServer::builder()
///     .bind("0.0.0.0:7070")
///     .sweep_interval(Some(Duration::from_secs(10)))
///     .build()
///     .await?;
/// server.run().await
/// ```
pub struct RendezvousServerBuilder {
    bind_addr: String,
    registry_config: RegistryConfig,
    sweep_interval: Option<Duration>,
}

impl RendezvousServerBuilder {
    /// Creates a new builder with default settings.
    pub fn new() -> Self {
        Self {
            bind_addr: format!("127.0.0.1:{DEFAULT_PORT}"),
            registry_config: RegistryConfig::default(),
            sweep_interval: Some(DEFAULT_SWEEP_INTERVAL),
        }
    }

    /// Sets the address to bind the server to.
    pub fn bind(mut self, addr: &str) -> Self {
        self.bind_addr = addr.to_string();
        self
    }

    /// Sets the registry configuration (heartbeat timeout, hashing cost).
    pub fn registry_config(mut self, config: RegistryConfig) -> Self {
        self.registry_config = config;
        self
    }

    /// Sets how often stale rooms are swept in the background.
    ///
    /// `None` (or a zero duration) disables the background sweeper. Rooms
    /// are still swept on every listing.
    pub fn sweep_interval(mut self, interval: Option<Duration>) -> Self {
        self.sweep_interval = interval.filter(|d| !d.is_zero());
        self
    }

    /// Binds the listener and creates the registry.
    pub async fn build(self) -> Result<RendezvousServer, RendezvousError> {
        let listener = TcpListener::bind(&self.bind_addr).await?;
        tracing::info!(addr = %self.bind_addr, "lobby listener bound");

        Ok(RendezvousServer {
            listener,
            registry: Arc::new(RoomRegistry::new(self.registry_config)),
            sweep_interval: self.sweep_interval,
        })
    }
}

impl Default for RendezvousServerBuilder {
    fn default() -> Self {
        Self::new()
    }
}

/// A bound, not-yet-running Rendezvous server.
///
/// Call [`run()`](Self::run) or [`run_until()`](Self::run_until) to start
/// serving requests.
pub struct RendezvousServer {
    listener: TcpListener,
    registry: Arc<RoomRegistry>,
    sweep_interval: Option<Duration>,
}

impl RendezvousServer {
    /// Creates a new builder.
    pub fn builder() -> RendezvousServerBuilder {
        RendezvousServerBuilder::new()
    }

    /// Returns the local address the server is bound to.
    pub fn local_addr(&self) -> std::io::Result<SocketAddr> {
        self.listener.local_addr()
    }

    /// The registry this server serves. Useful for inspection in tests
    /// and for embedding the lobby next to other services.
    pub fn registry(&self) -> &Arc<RoomRegistry> {
        &self.registry
    }

    /// Serves requests until the process is terminated.
    pub async fn run(self) -> Result<(), RendezvousError> {
        self.run_until(std::future::pending()).await
    }

    /// Serves requests until `shutdown` completes, then drains in-flight
    /// requests and returns. The background sweeper stops with it.
    pub async fn run_until<F>(self, shutdown: F) -> Result<(), RendezvousError>
    where
        F: Future<Output = ()> + Send + 'static,
    {
        let _sweeper = self
            .sweep_interval
            .map(|interval| spawn_sweeper(Arc::clone(&self.registry), interval));

        let app = router(AppState {
            registry: Arc::clone(&self.registry),
        });

        tracing::info!(
            heartbeat_timeout = ?self.registry.config().heartbeat_timeout,
            sweep_interval = ?self.sweep_interval,
            "Rendezvous server running"
        );

        axum::serve(self.listener, app)
            .with_graceful_shutdown(shutdown)
            .await?;

        tracing::info!("Rendezvous server stopped");
        Ok(())
    }
}
