//! Error types for the registry layer.

use rendezvous_credential::CredentialError;

/// Errors that can occur during registry operations.
#[derive(Debug, thiserror::Error)]
pub enum RegistryError {
    /// The descriptor is missing a required field. Only `roomId` is required.
    #[error("{0}")]
    Validation(String),

    /// No live room has this id.
    #[error("room {0} not found")]
    NotFound(String),

    /// The room is password-protected and the password didn't match.
    #[error("wrong password for room {0}")]
    Unauthorized(String),

    /// Deriving or checking a password credential failed.
    #[error(transparent)]
    Credential(#[from] CredentialError),

    /// A thread panicked while holding the registry lock.
    #[error("registry lock poisoned")]
    LockPoisoned,
}
