//! Error types for the protocol layer.
//!
//! Each crate in Rendezvous defines its own error enum. When you see a
//! `ProtocolError`, the problem is in the shape of the bytes, not in the
//! room registry or the network.

/// Errors that can occur in the protocol layer.
#[derive(Debug, thiserror::Error)]
pub enum ProtocolError {
    /// Deserialization failed (turning bytes into a Rust type).
    ///
    /// Common causes: malformed JSON, a body that isn't an object, or a
    /// non-string `roomId` or `password`.
    #[error("decode failed: {0}")]
    Decode(#[source] serde_json::Error),
}
