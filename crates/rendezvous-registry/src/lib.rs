//! The room registry: Rendezvous' data store and policy engine.
//!
//! Hosts register rooms, clients list and join them, hosts keep them alive
//! with heartbeats, and an eviction sweep drops any room whose host has
//! gone quiet for longer than the heartbeat timeout.
//!
//! # Key types
//!
//! - [`RoomRegistry`] — register / list / join / heartbeat / remove / sweep
//! - [`RegistryConfig`] — heartbeat timeout and password hashing cost
//! - [`SweeperHandle`] — a background task that sweeps on a timer

mod config;
mod entry;
mod error;
mod registry;
mod sweeper;

pub use config::RegistryConfig;
pub use error::RegistryError;
pub use registry::RoomRegistry;
pub use sweeper::{SweeperHandle, spawn_sweeper};
