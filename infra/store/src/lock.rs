use crate::error::StoreError;
use fxhash::FxHashMap;
use parking_lot::Mutex;
use std::sync::Arc;
use std::time::Duration;
use tokio::sync::{Mutex as AsyncMutex, OwnedMutexGuard};
use tracing::debug;

type Slot = Arc<AsyncMutex<()>>;
type Slots = Arc<Mutex<FxHashMap<String, Slot>>>;

/// Per-key exclusive locks.
///
/// Slots are created on first use and dropped again once nobody holds or awaits them,
/// so the table only ever contains keys that are currently contended.
#[derive(Debug, Default, Clone)]
pub struct LockTable {
    slots: Slots,
}

impl LockTable {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Waits for the exclusive lock on `key` for at most `timeout`.
    ///
    /// # Errors
    ///
    /// Returns [`StoreError::LockTimeout`] when the holder does not release in time.
    pub async fn acquire(&self, key: &str, timeout: Duration) -> Result<KeyGuard, StoreError> {
        let slot = Arc::clone(self.slots.lock().entry(key.to_owned()).or_default());

        match tokio::time::timeout(timeout, Arc::clone(&slot).lock_owned()).await {
            Ok(guard) => Ok(KeyGuard {
                key: key.to_owned(),
                guard: Some(guard),
                slot,
                slots: Arc::clone(&self.slots),
            }),
            Err(_) => {
                release(&self.slots, key, &slot);
                debug!(serial = %key, ?timeout, "Drone lock wait timed out");
                Err(StoreError::LockTimeout { serial: key.to_owned(), context: None })
            },
        }
    }

    /// Number of keys currently held or awaited.
    #[must_use]
    pub fn len(&self) -> usize {
        self.slots.lock().len()
    }
}

/// Exclusive hold on one key. Released on drop.
#[derive(Debug)]
pub struct KeyGuard {
    key: String,
    guard: Option<OwnedMutexGuard<()>>,
    slot: Slot,
    slots: Slots,
}

impl KeyGuard {
    #[must_use]
    pub fn key(&self) -> &str {
        &self.key
    }
}

impl Drop for KeyGuard {
    fn drop(&mut self) {
        drop(self.guard.take());
        release(&self.slots, &self.key, &self.slot);
    }
}

// Removes the slot when only the table and the caller still reference it. New waiters
// clone under the same map lock, so the count cannot grow underneath us.
fn release(slots: &Slots, key: &str, slot: &Slot) {
    let mut slots = slots.lock();
    if Arc::strong_count(slot) == 2 {
        slots.remove(key);
    }
}
