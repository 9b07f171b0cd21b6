//! Unified error type for the Rendezvous server.

use axum::Json;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use rendezvous_protocol::{ErrorBody, ProtocolError};
use rendezvous_registry::RegistryError;

/// Top-level error that wraps all crate-specific errors.
///
/// The `#[from]` attribute on each variant auto-generates `From` impls,
/// so the `?` operator converts sub-crate errors automatically.
#[derive(Debug, thiserror::Error)]
pub enum RendezvousError {
    /// A registry-level error (validation, not found, wrong password, ...).
    #[error(transparent)]
    Registry(#[from] RegistryError),

    /// A request body couldn't be decoded.
    #[error(transparent)]
    Protocol(#[from] ProtocolError),

    /// Binding or serving the socket failed.
    #[error("io error: {0}")]
    Io(#[from] std::io::Error),

    /// A blocking task (password hashing) panicked or was cancelled.
    #[error("background task failed: {0}")]
    Task(#[from] tokio::task::JoinError),
}

impl RendezvousError {
    /// The HTTP status this error is reported with.
    pub fn status_code(&self) -> StatusCode {
        match self {
            Self::Registry(RegistryError::Validation(_)) => StatusCode::BAD_REQUEST,
            Self::Registry(RegistryError::NotFound(_)) => StatusCode::NOT_FOUND,
            Self::Registry(RegistryError::Unauthorized(_)) => StatusCode::UNAUTHORIZED,
            Self::Protocol(_) => StatusCode::BAD_REQUEST,
            Self::Registry(_) | Self::Io(_) | Self::Task(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl IntoResponse for RendezvousError {
    fn into_response(self) -> Response {
        let status = self.status_code();
        if status.is_server_error() {
            tracing::error!(error = %self, "request failed");
        } else {
            tracing::debug!(error = %self, %status, "request rejected");
        }
        (status, Json(ErrorBody::new(self.to_string()))).into_response()
    }
}
