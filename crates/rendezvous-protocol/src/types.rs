//! Core protocol types for the lobby's HTTP API.
//!
//! Every type here is a JSON body. Optional fields that are `None` are left
//! out of the output entirely rather than written as `null`, so a room that
//! never reported a name simply has no `roomName` key.

use std::fmt;

use serde::{Deserialize, Deserializer, Serialize};
use serde_json::Value;

/// Deserializes a field that was present in the body, keeping an explicit
/// `null` as `Some(Value::Null)`. Only a missing key becomes `None`.
fn present<'de, D>(deserializer: D) -> Result<Option<Value>, D::Error>
where
    D: Deserializer<'de>,
{
    Value::deserialize(deserializer).map(Some)
}

// ---------------------------------------------------------------------------
// RoomDescriptor — what a host registers
// ---------------------------------------------------------------------------

/// The body a host sends to register (or re-register) a room.
///
/// Every field is optional at this level, including `room_id`. A body of
/// `{}` decodes fine; it's the registry that rejects it for lacking an id.
/// Keeping the check there means a missing id is reported the same way no
/// matter which transport delivered the descriptor.
///
/// Apart from the id and the password, fields are kept as raw JSON and
/// echoed back exactly as the host sent them. A port of `"7777"` or a
/// player count of `-1` is stored as is; the host is trusted to describe
/// its own room.
#[derive(Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RoomDescriptor {
    /// Host-chosen unique key for the room.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub room_id: Option<String>,

    /// Display name shown in room browsers.
    #[serde(default, deserialize_with = "present", skip_serializing_if = "Option::is_none")]
    pub room_name: Option<Value>,

    /// Display name of the hosting player.
    #[serde(default, deserialize_with = "present", skip_serializing_if = "Option::is_none")]
    pub host_player: Option<Value>,

    /// Public address joiners should connect to.
    #[serde(default, deserialize_with = "present", skip_serializing_if = "Option::is_none")]
    pub external_address: Option<Value>,

    /// Public port joiners should connect to.
    #[serde(default, deserialize_with = "present", skip_serializing_if = "Option::is_none")]
    pub external_port: Option<Value>,

    #[serde(default, deserialize_with = "present", skip_serializing_if = "Option::is_none")]
    pub max_players: Option<Value>,

    /// Defaults to 1 (the host) when absent.
    #[serde(default, deserialize_with = "present", skip_serializing_if = "Option::is_none")]
    pub current_players: Option<Value>,

    /// Whether the host managed to open its port via UPnP. Defaults to false
    /// when absent.
    #[serde(default, deserialize_with = "present", skip_serializing_if = "Option::is_none")]
    pub upnp_succeeded: Option<Value>,

    /// Plaintext room password. Empty or absent means an open room.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub password: Option<String>,
}

// Hand-written so a stray `{:?}` in a log line can't print a password.
impl fmt::Debug for RoomDescriptor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("RoomDescriptor")
            .field("room_id", &self.room_id)
            .field("room_name", &self.room_name)
            .field("host_player", &self.host_player)
            .field("external_address", &self.external_address)
            .field("external_port", &self.external_port)
            .field("max_players", &self.max_players)
            .field("current_players", &self.current_players)
            .field("upnp_succeeded", &self.upnp_succeeded)
            .field("password", &self.password.as_ref().map(|_| "<redacted>"))
            .finish()
    }
}

// ---------------------------------------------------------------------------
// RoomView — what a browsing client sees
// ---------------------------------------------------------------------------

/// A public summary of one live room, as returned by the room listing.
///
/// This is the projection of a registry entry with the liveness timestamp
/// and all password material removed. The only trace of a password is the
/// `requires_password` flag.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RoomView {
    pub room_id: String,
    #[serde(default, deserialize_with = "present", skip_serializing_if = "Option::is_none")]
    pub room_name: Option<Value>,
    #[serde(default, deserialize_with = "present", skip_serializing_if = "Option::is_none")]
    pub host_player: Option<Value>,
    #[serde(default, deserialize_with = "present", skip_serializing_if = "Option::is_none")]
    pub external_address: Option<Value>,
    #[serde(default, deserialize_with = "present", skip_serializing_if = "Option::is_none")]
    pub external_port: Option<Value>,
    #[serde(default, deserialize_with = "present", skip_serializing_if = "Option::is_none")]
    pub max_players: Option<Value>,
    pub current_players: Value,
    pub upnp_succeeded: Value,
    pub requires_password: bool,
}

// ---------------------------------------------------------------------------
// Join
// ---------------------------------------------------------------------------

/// The (optional) body of a join request.
#[derive(Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct JoinRequest {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub password: Option<String>,
}

impl fmt::Debug for JoinRequest {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("JoinRequest")
            .field("password", &self.password.as_ref().map(|_| "<redacted>"))
            .finish()
    }
}

/// Everything a client needs to connect to a host after a successful join.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ConnectionInfo {
    pub room_id: String,
    #[serde(default, deserialize_with = "present", skip_serializing_if = "Option::is_none")]
    pub room_name: Option<Value>,
    #[serde(default, deserialize_with = "present", skip_serializing_if = "Option::is_none")]
    pub host_player: Option<Value>,
    #[serde(default, deserialize_with = "present", skip_serializing_if = "Option::is_none")]
    pub external_address: Option<Value>,
    #[serde(default, deserialize_with = "present", skip_serializing_if = "Option::is_none")]
    pub external_port: Option<Value>,
    pub upnp_succeeded: Value,
}

// ---------------------------------------------------------------------------
// Errors on the wire
// ---------------------------------------------------------------------------

/// JSON error payload: `{ "error": "roomId required" }`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ErrorBody {
    pub error: String,
}

impl ErrorBody {
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            error: message.into(),
        }
    }
}

// =========================================================================
// Tests
// =========================================================================
