//! Error types for the credential layer.

/// Errors that can occur while deriving or verifying a credential.
///
/// None of these are the caller's fault. A wrong password is not an error
/// here — [`Credential::verify`](crate::Credential::verify) returns
/// `Ok(false)` for that.
#[derive(Debug, thiserror::Error)]
pub enum CredentialError {
    /// The derivation parameters can't produce a usable hash
    /// (zero iterations or zero output length).
    #[error("invalid key-derivation parameters: {0}")]
    InvalidParams(String),

    /// The underlying PRF rejected its input.
    #[error("key derivation failed: {0}")]
    Derivation(String),
}
