//! # Rendezvous
//!
//! Lobby directory for peer-to-peer game sessions.
//!
//! Hosts register a room (address, port, capacity, optional password),
//! clients browse and join rooms, and hosts send heartbeats to stay listed.
//! Rooms whose host stops heartbeating are evicted after a minute.
//!
//! This crate is the HTTP face of the [`RoomRegistry`]. The registry does
//! all the work; the handlers here only translate requests and map errors
//! to status codes.
//!
//! ## Quick Start
//!
//! ```rust,no_run
//! use rendezvous::prelude::*;
//!
//! # async fn run() -> Result<(), RendezvousError> {
//! let server = RendezvousServer::builder()
//!     .bind("0.0.0.0:7070")
//!     .build()
//!     .await?;
//! server.run().await
//! # }
//! ```

mod error;
mod handler;
mod server;

pub use error::RendezvousError;
pub use handler::{AppState, router};
pub use server::{RendezvousServer, RendezvousServerBuilder};

pub use rendezvous_credential::KdfParams;
pub use rendezvous_protocol::{ConnectionInfo, ErrorBody, JoinRequest, RoomDescriptor, RoomView};
pub use rendezvous_registry::{RegistryConfig, RegistryError, RoomRegistry};

/// Port the server listens on when none is configured.
pub const DEFAULT_PORT: u16 = 7070;

/// The types most users need, in one import.
pub mod prelude {
    pub use crate::{
        ConnectionInfo, KdfParams, RegistryConfig, RendezvousError, RendezvousServer,
        RendezvousServerBuilder, RoomDescriptor, RoomRegistry, RoomView,
    };
}
