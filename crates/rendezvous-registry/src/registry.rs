//! Room registry: registers, lists, joins, and expires rooms.

use std::collections::HashMap;
use std::sync::{Mutex, MutexGuard};

use rendezvous_credential::Credential;
use rendezvous_protocol::{ConnectionInfo, RoomDescriptor, RoomView};
use tokio::time::Instant;

use crate::entry::RoomEntry;
use crate::{RegistryConfig, RegistryError};

/// Message returned when a descriptor has no usable `roomId`.
const ROOM_ID_REQUIRED: &str = "roomId required";

/// Owns every live room, keyed by room id.
///
/// All operations take `&self`: the map sits behind a single coarse
/// `Mutex`, so one `RoomRegistry` can be shared across request handlers
/// through an `Arc`. Every compound step (sweep-then-read in
/// [`list`](Self::list), insert-or-replace in [`register`](Self::register))
/// happens under one lock acquisition.
///
/// The lock is never held while a password is being hashed. Key derivation
/// is deliberately slow, and holding the lock through it would stall every
/// other host and client.
///
/// ## Lifecycle of an entry
///
/// ```text
/// register() ──→ [live] ──heartbeat()──→ [live]
///                  │
///                  ├──remove()─────────────→ gone
///                  └──sweep() after timeout─→ gone
/// ```
pub struct RoomRegistry {
    rooms: Mutex<HashMap<String, RoomEntry>>,
    config: RegistryConfig,
}

impl RoomRegistry {
    /// Creates an empty registry.
    pub fn new(config: RegistryConfig) -> Self {
        Self {
            rooms: Mutex::new(HashMap::new()),
            config,
        }
    }

    pub fn config(&self) -> &RegistryConfig {
        &self.config
    }

    /// Registers a room, fully replacing any existing room with the same id.
    ///
    /// Fields missing from the descriptor take their defaults
    /// (`currentPlayers` = 1, `upnpSucceeded` = false). A non-empty password
    /// is turned into a salted [`Credential`]; the plaintext is not kept.
    ///
    /// # Errors
    /// - [`RegistryError::Validation`] — `roomId` missing or empty
    /// - [`RegistryError::Credential`] — password hashing failed
    pub fn register(&self, mut descriptor: RoomDescriptor) -> Result<(), RegistryError> {
        let room_id = match descriptor.room_id.take() {
            Some(id) if !id.is_empty() => id,
            _ => return Err(RegistryError::Validation(ROOM_ID_REQUIRED.into())),
        };

        let credential = match descriptor.password.take() {
            Some(password) if !password.is_empty() => {
                Some(Credential::derive(&password, &self.config.kdf)?)
            }
            _ => None,
        };
        let protected = credential.is_some();

        let entry = RoomEntry::new(room_id.clone(), descriptor, credential, Instant::now());

        let replaced = self.lock()?.insert(room_id.clone(), entry).is_some();

        tracing::info!(%room_id, protected, replaced, "room registered");
        Ok(())
    }

    /// Lists every live room.
    ///
    /// Runs an eviction sweep first, so a stale room is never returned no
    /// matter how long it's been since the last sweep. The result is an
    /// owned snapshot; iteration order is unspecified.
    pub fn list(&self) -> Result<Vec<RoomView>, RegistryError> {
        let mut rooms = self.lock()?;
        self.evict_stale(&mut rooms, Instant::now());
        Ok(rooms.values().map(RoomEntry::view).collect())
    }

    /// Attempts to join a room.
    ///
    /// Rooms without a password accept any `password`, including `None`.
    /// For protected rooms, `None` is checked as the empty string. Joining
    /// doesn't count as liveness: `last_seen` is left alone.
    ///
    /// # Errors
    /// - [`RegistryError::NotFound`] — no such room
    /// - [`RegistryError::Unauthorized`] — password mismatch
    /// - [`RegistryError::Credential`] — password hashing failed
    pub fn join(
        &self,
        room_id: &str,
        password: Option<&str>,
    ) -> Result<ConnectionInfo, RegistryError> {
        // Copy out what we need and release the lock before verifying.
        let (credential, info) = {
            let rooms = self.lock()?;
            let entry = rooms
                .get(room_id)
                .ok_or_else(|| RegistryError::NotFound(room_id.to_string()))?;
            (entry.credential.clone(), entry.connection_info())
        };

        if let Some(credential) = credential {
            if !credential.verify(password.unwrap_or(""))? {
                tracing::info!(%room_id, "join rejected: wrong password");
                return Err(RegistryError::Unauthorized(room_id.to_string()));
            }
        }

        tracing::debug!(%room_id, "join accepted");
        Ok(info)
    }

    /// Marks a room as alive.
    ///
    /// # Errors
    /// [`RegistryError::NotFound`] if the room doesn't exist (never
    /// registered, removed, or already evicted).
    pub fn heartbeat(&self, room_id: &str) -> Result<(), RegistryError> {
        let mut rooms = self.lock()?;
        let entry = rooms
            .get_mut(room_id)
            .ok_or_else(|| RegistryError::NotFound(room_id.to_string()))?;
        entry.touch(Instant::now());
        tracing::trace!(%room_id, "heartbeat");
        Ok(())
    }

    /// Removes a room. Removing a room that doesn't exist is not an error.
    pub fn remove(&self, room_id: &str) -> Result<(), RegistryError> {
        if self.lock()?.remove(room_id).is_some() {
            tracing::info!(%room_id, "room removed");
        } else {
            tracing::debug!(%room_id, "remove of unknown room ignored");
        }
        Ok(())
    }

    /// Evicts every room whose heartbeat timeout has elapsed.
    ///
    /// Returns the ids of the evicted rooms.
    pub fn sweep(&self) -> Result<Vec<String>, RegistryError> {
        let mut rooms = self.lock()?;
        Ok(self.evict_stale(&mut rooms, Instant::now()))
    }

    /// Number of rooms currently held, stale or not.
    pub fn room_count(&self) -> Result<usize, RegistryError> {
        Ok(self.lock()?.len())
    }

    /// The one sweep implementation, shared by [`list`](Self::list) and
    /// [`sweep`](Self::sweep). The caller holds the lock.
    fn evict_stale(&self, rooms: &mut HashMap<String, RoomEntry>, now: Instant) -> Vec<String> {
        let timeout = self.config.heartbeat_timeout;
        let mut evicted = Vec::new();

        rooms.retain(|room_id, entry| {
            if entry.is_stale(now, timeout) {
                evicted.push(room_id.clone());
                false
            } else {
                true
            }
        });

        for room_id in &evicted {
            tracing::info!(%room_id, "room evicted (heartbeat timeout)");
        }
        evicted
    }

    fn lock(&self) -> Result<MutexGuard<'_, HashMap<String, RoomEntry>>, RegistryError> {
        self.rooms.lock().map_err(|_| RegistryError::LockPoisoned)
    }

    /// Poisons the lock by panicking on another thread while holding it.
    #[cfg(test)]
    pub(crate) fn poison_lock(&self) {
        let _ = std::thread::scope(|scope| {
            scope
                .spawn(|| {
                    let _guard = self.rooms.lock();
                    panic!("panic while holding the registry lock");
                })
                .join()
        });
    }
}

impl Default for RoomRegistry {
    fn default() -> Self {
        Self::new(RegistryConfig::default())
    }
}

// =========================================================================
// Tests
// =========================================================================
