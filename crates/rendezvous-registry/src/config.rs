//! Registry configuration.

use std::time::Duration;

use rendezvous_credential::KdfParams;

/// Configuration for a [`RoomRegistry`](crate::RoomRegistry).
#[derive(Debug, Clone)]
pub struct RegistryConfig {
    /// How long a room may go without a create or heartbeat before the
    /// eviction sweep removes it. A room is stale once strictly more than
    /// this much time has passed.
    pub heartbeat_timeout: Duration,

    /// Cost settings for hashing room passwords.
    pub kdf: KdfParams,
}

impl RegistryConfig {
    /// The liveness window hosts are expected to heartbeat within.
    pub const DEFAULT_HEARTBEAT_TIMEOUT: Duration = Duration::from_secs(60);
}

impl Default for RegistryConfig {
    fn default() -> Self {
        Self {
            heartbeat_timeout: Self::DEFAULT_HEARTBEAT_TIMEOUT,
            kdf: KdfParams::default(),
        }
    }
}
