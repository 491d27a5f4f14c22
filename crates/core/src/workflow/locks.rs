//! Per-ticket mutual exclusion.

use std::collections::HashMap;
use std::sync::{Arc, Mutex as StdMutex};

use tokio::sync::{Mutex, OwnedMutexGuard};

type LockMap = Arc<StdMutex<HashMap<i64, Arc<Mutex<()>>>>>;

/// Async locks keyed by ticket id. Entries are removed once nobody holds or
/// waits on them.
#[derive(Debug, Default)]
pub(crate) struct TicketLocks {
    locks: LockMap,
}

/// Held while a ticket is being translated.
#[derive(Debug)]
pub(crate) struct TicketLockGuard {
    // Field order matters: the mutex is released before the entry is dropped.
    _guard: OwnedMutexGuard<()>,
    _entry: LockEntry,
}

/// One registration in the lock map, owned by a waiter and later by its guard.
#[derive(Debug)]
struct LockEntry {
    id: i64,
    lock: Arc<Mutex<()>>,
    locks: LockMap,
}

impl LockEntry {
    fn register(locks: &LockMap, id: i64) -> Self {
        let mut map = locks.lock().unwrap_or_else(|e| e.into_inner());
        let lock = Arc::clone(map.entry(id).or_default());
        Self {
            id,
            lock,
            locks: Arc::clone(locks),
        }
    }

    async fn wait(&self) -> OwnedMutexGuard<()> {
        Arc::clone(&self.lock).lock_owned().await
    }
}

impl Drop for LockEntry {
    fn drop(&mut self) {
        let mut map = self.locks.lock().unwrap_or_else(|e| e.into_inner());
        // Only the map and this entry still reference the lock.
        if map
            .get(&self.id)
            .is_some_and(|lock| Arc::strong_count(lock) == 2)
        {
            map.remove(&self.id);
        }
    }
}

impl TicketLocks {
    pub(crate) async fn acquire(&self, id: i64) -> TicketLockGuard {
        let entry = LockEntry::register(&self.locks, id);
        // The wait future borrows the entry, so it is always dropped first,
        // including when this future is cancelled.
        let guard = entry.wait().await;

        TicketLockGuard {
            _guard: guard,
            _entry: entry,
        }
    }

    #[cfg(test)]
    pub(crate) fn len(&self) -> usize {
        self.locks.lock().unwrap_or_else(|e| e.into_inner()).len()
    }
}
