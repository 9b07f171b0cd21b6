//! Codec trait and implementations for decoding request bodies.
//!
//! The HTTP layer hands us request bodies as bytes and doesn't care which
//! format they're in. It just needs something that implements [`Codec`].
//! Responses are written by the HTTP layer itself.

use serde::de::DeserializeOwned;

use crate::ProtocolError;

/// A codec that turns request bytes into typed values.
///
/// `Send + Sync + 'static` because a codec is shared by every request
/// handler for the lifetime of the server.
pub trait Codec: Send + Sync + 'static {
    /// Deserializes bytes back into a value.
    ///
    /// # Errors
    /// Returns `ProtocolError::Decode` if the bytes are malformed or don't
    /// match the expected type.
    fn decode<T: DeserializeOwned>(&self, data: &[u8]) -> Result<T, ProtocolError>;

    /// Like [`decode`](Self::decode), but an empty (or all-whitespace) body
    /// yields `T::default()`.
    ///
    /// Used for requests whose body is optional, such as joining a room
    /// that has no password.
    fn decode_or_default<T: DeserializeOwned + Default>(
        &self,
        data: &[u8],
    ) -> Result<T, ProtocolError> {
        if data.iter().all(u8::is_ascii_whitespace) {
            return Ok(T::default());
        }
        self.decode(data)
    }
}

// ---------------------------------------------------------------------------
// JsonCodec
// ---------------------------------------------------------------------------

/// A [`Codec`] that uses JSON (via `serde_json`).
///
/// ## Example
///
/// ```rust
/// use rendezvous_protocol::{Codec, JoinRequest, JsonCodec};
///
/// let codec = JsonCodec;
///
/// let req: JoinRequest = codec.decode(br#"{"password":"hunter2"}"#).unwrap();
/// assert_eq!(req.password.as_deref(), Some("hunter2"));
///
/// let empty: JoinRequest = codec.decode_or_default(b"").unwrap();
/// assert_eq!(empty.password, None);
/// ```
#[derive(Debug, Clone, Copy, Default)]
pub struct JsonCodec;

impl Codec for JsonCodec {
    fn decode<T: DeserializeOwned>(&self, data: &[u8]) -> Result<T, ProtocolError> {
        serde_json::from_slice(data).map_err(ProtocolError::Decode)
    }
}
