//! Wire protocol for Rendezvous.
//!
//! This crate defines the shapes that hosts and clients exchange with the
//! lobby directory:
//!
//! - **Types** ([`RoomDescriptor`], [`RoomView`], [`ConnectionInfo`], etc.) —
//!   the JSON bodies of the HTTP API. Field names are camelCase because
//!   the game clients that talk to the lobby expect them that way.
//! - **Codec** ([`Codec`] trait, [`JsonCodec`]) — how request bodies are
//!   turned into those types.
//! - **Errors** ([`ProtocolError`]) — what can go wrong while decoding.
//!
//! # Architecture
//!
//! The protocol layer knows nothing about rooms being alive or dead, or
//! about passwords being checked. It only describes what travels on the
//! wire.
//!
//! ```text
//! HTTP (bytes) → Protocol (RoomDescriptor) → Registry (RoomEntry)
//! ```

mod codec;
mod error;
mod types;

pub use codec::{Codec, JsonCodec};
pub use error::ProtocolError;
pub use types::{ConnectionInfo, ErrorBody, JoinRequest, RoomDescriptor, RoomView};
