//! A single registered room.

use std::time::Duration;

use rendezvous_credential::Credential;
use rendezvous_protocol::{ConnectionInfo, RoomDescriptor, RoomView};
use serde_json::Value;
use tokio::time::Instant;

/// Player count assumed when the host doesn't report one (the host itself).
pub(crate) const DEFAULT_CURRENT_PLAYERS: u32 = 1;

/// The registry's record of one room.
///
/// Only the registry ever holds these. Everything handed to callers is a
/// projection ([`RoomView`] or [`ConnectionInfo`]) built from it, so the
/// credential and `last_seen` never leave this crate.
#[derive(Debug, Clone)]
pub(crate) struct RoomEntry {
    pub(crate) room_id: String,
    pub(crate) room_name: Option<Value>,
    pub(crate) host_player: Option<Value>,
    pub(crate) external_address: Option<Value>,
    pub(crate) external_port: Option<Value>,
    pub(crate) max_players: Option<Value>,
    pub(crate) current_players: Value,
    pub(crate) upnp_succeeded: Value,
    /// Present iff the room was registered with a non-empty password.
    pub(crate) credential: Option<Credential>,
    /// Last create or heartbeat. Reads never touch this.
    pub(crate) last_seen: Instant,
}

impl RoomEntry {
    /// Builds a fresh entry from a host's descriptor.
    ///
    /// The descriptor's plaintext password is dropped here; the caller has
    /// already turned it into `credential` (or decided there is none).
    /// Defaults fill in missing keys only. An explicit `null` is kept.
    pub(crate) fn new(
        room_id: String,
        descriptor: RoomDescriptor,
        credential: Option<Credential>,
        now: Instant,
    ) -> Self {
        let RoomDescriptor {
            room_name,
            host_player,
            external_address,
            external_port,
            max_players,
            current_players,
            upnp_succeeded,
            ..
        } = descriptor;

        Self {
            room_id,
            room_name,
            host_player,
            external_address,
            external_port,
            max_players,
            current_players: current_players.unwrap_or_else(|| DEFAULT_CURRENT_PLAYERS.into()),
            upnp_succeeded: upnp_succeeded.unwrap_or(Value::Bool(false)),
            credential,
            last_seen: now,
        }
    }

    /// Refreshes the liveness timestamp.
    pub(crate) fn touch(&mut self, now: Instant) {
        self.last_seen = now;
    }

    /// Returns `true` once strictly more than `timeout` has passed since
    /// the last create or heartbeat.
    pub(crate) fn is_stale(&self, now: Instant, timeout: Duration) -> bool {
        now.saturating_duration_since(self.last_seen) > timeout
    }

    pub(crate) fn requires_password(&self) -> bool {
        self.credential.is_some()
    }

    /// The public listing projection.
    pub(crate) fn view(&self) -> RoomView {
        RoomView {
            room_id: self.room_id.clone(),
            room_name: self.room_name.clone(),
            host_player: self.host_player.clone(),
            external_address: self.external_address.clone(),
            external_port: self.external_port.clone(),
            max_players: self.max_players.clone(),
            current_players: self.current_players.clone(),
            upnp_succeeded: self.upnp_succeeded.clone(),
            requires_password: self.requires_password(),
        }
    }

    /// What a successful joiner gets back.
    pub(crate) fn connection_info(&self) -> ConnectionInfo {
        ConnectionInfo {
            room_id: self.room_id.clone(),
            room_name: self.room_name.clone(),
            host_player: self.host_player.clone(),
            external_address: self.external_address.clone(),
            external_port: self.external_port.clone(),
            upnp_succeeded: self.upnp_succeeded.clone(),
        }
    }
}
