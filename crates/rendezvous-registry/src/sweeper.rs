//! Periodic eviction sweep.
//!
//! [`RoomRegistry::list`] always sweeps before reading, so the sweeper is
//! never needed for correctness. It exists to free memory held by rooms
//! whose hosts vanished while nobody was browsing.

use std::sync::Arc;
use std::time::Duration;

use tokio::task::JoinHandle;
use tokio::time::{self, MissedTickBehavior};

use crate::RoomRegistry;

/// Handle to a running sweeper task. Dropping it stops the task.
#[derive(Debug)]
pub struct SweeperHandle {
    task: JoinHandle<()>,
}

impl SweeperHandle {
    /// Stops the sweeper. Equivalent to dropping the handle.
    pub fn stop(self) {}

    /// Returns `true` if the task has exited.
    pub fn is_finished(&self) -> bool {
        self.task.is_finished()
    }
}

impl Drop for SweeperHandle {
    fn drop(&mut self) {
        self.task.abort();
    }
}

/// Spawns a task that calls [`RoomRegistry::sweep`] every `interval`.
///
/// The first sweep happens one full `interval` after spawning. If the
/// runtime falls behind, missed sweeps are skipped rather than run back to
/// back. A poisoned registry lock ends the task.
///
/// Must be called from within a Tokio runtime.
///
/// # Panics
/// If `interval` is zero.
pub fn spawn_sweeper(registry: Arc<RoomRegistry>, interval: Duration) -> SweeperHandle {
    assert!(!interval.is_zero(), "sweep interval must be non-zero");

    let task = tokio::spawn(async move {
        let mut ticker = time::interval_at(time::Instant::now() + interval, interval);
        ticker.set_missed_tick_behavior(MissedTickBehavior::Skip);

        tracing::debug!(?interval, "room sweeper started");

        loop {
            ticker.tick().await;
            match registry.sweep() {
                Ok(evicted) if !evicted.is_empty() => {
                    tracing::debug!(count = evicted.len(), "periodic sweep evicted rooms");
                }
                Ok(_) => {}
                Err(e) => {
                    tracing::error!(error = %e, "periodic sweep failed, stopping sweeper");
                    break;
                }
            }
        }
    });

    SweeperHandle { task }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::RegistryConfig;
    use rendezvous_protocol::RoomDescriptor;

    fn room(id: &str) -> RoomDescriptor {
        RoomDescriptor {
            room_id: Some(id.into()),
            ..RoomDescriptor::default()
        }
    }

    #[tokio::test(start_paused = true)]
    async fn test_sweeper_evicts_without_list() {
        let registry = Arc::new(RoomRegistry::new(RegistryConfig::default()));
        registry.register(room("a")).unwrap();

        let _sweeper = spawn_sweeper(Arc::clone(&registry), Duration::from_secs(10));

        // Auto-advance lets the sweeper's ticks fire while we sleep.
        time::sleep(Duration::from_secs(75)).await;

        assert_eq!(registry.room_count().unwrap(), 0);
    }

    #[tokio::test(start_paused = true)]
    async fn test_sweeper_leaves_live_rooms() {
        let registry = Arc::new(RoomRegistry::new(RegistryConfig::default()));
        registry.register(room("a")).unwrap();

        let _sweeper = spawn_sweeper(Arc::clone(&registry), Duration::from_secs(10));

        time::sleep(Duration::from_secs(45)).await;

        assert_eq!(registry.room_count().unwrap(), 1);
    }

    #[tokio::test(start_paused = true)]
    async fn test_dropped_sweeper_stops_sweeping() {
        let registry = Arc::new(RoomRegistry::new(RegistryConfig::default()));
        registry.register(room("a")).unwrap();

        let sweeper = spawn_sweeper(Arc::clone(&registry), Duration::from_secs(10));
        sweeper.stop();

        time::sleep(Duration::from_secs(120)).await;

        // Still in the map: nobody swept. list() would evict it.
        assert_eq!(registry.room_count().unwrap(), 1);
        assert!(registry.list().unwrap().is_empty());
    }

    #[tokio::test(start_paused = true)]
    async fn test_sweeper_exits_on_poisoned_lock() {
        let registry = Arc::new(RoomRegistry::new(RegistryConfig::default()));
        registry.register(room("a")).unwrap();

        let sweeper = spawn_sweeper(Arc::clone(&registry), Duration::from_secs(10));
        assert!(!sweeper.is_finished());

        registry.poison_lock();
        time::sleep(Duration::from_secs(15)).await;
        tokio::task::yield_now().await;

        assert!(sweeper.is_finished());
        assert!(matches!(registry.list(), Err(crate::RegistryError::LockPoisoned)));
    }
}
