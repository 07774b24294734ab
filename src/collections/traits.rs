//! Collection Capability Traits
//!
//! The narrow surface a thread-safe collection must offer to be decorated.
//! Decorators are composed over these capabilities rather than conforming
//! to a broad collection interface; a decorator only exposes the monitoring
//! attributes its wrapped collection's capability set supports.

use std::time::Duration;

/// Capability surface of a thread-safe map.
///
/// Implementations are expected to be internally synchronized; all methods
/// take `&self`. Reads hand out clones, never references into the map.
pub trait ConcurrentMap<K, V>: Send + Sync {
    /// Insert a key/value pair, returning the previous value if any.
    fn insert(&self, key: K, value: V) -> Option<V>;

    /// Current value for `key`, if present.
    fn get(&self, key: &K) -> Option<V>;

    /// Remove `key`, returning its value if it was present.
    fn remove(&self, key: &K) -> Option<V>;

    /// Whether `key` is currently present.
    fn contains_key(&self, key: &K) -> bool;

    /// Remove all entries.
    fn clear(&self);

    /// Current number of entries.
    fn len(&self) -> usize;

    /// Whether the map holds no entries.
    fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Point-in-time copy of all entries, not a live view.
    fn entries(&self) -> Vec<(K, V)>;
}

/// Capability surface of a thread-safe FIFO queue with blocking insertion
/// and removal.
///
/// Blocking calls suspend the calling thread inside the wrapped queue; the
/// decorator layer adds no waiting or cancellation of its own.
pub trait BlockingQueue<T>: Send + Sync {
    /// Insert without blocking. On a full queue the item is handed back.
    fn offer(&self, item: T) -> Result<(), T>;

    /// Wait up to `timeout` for space. On timeout the item is handed back.
    fn offer_timeout(&self, item: T, timeout: Duration) -> Result<(), T>;

    /// Block until space is available, then insert.
    fn put(&self, item: T);

    /// Remove the head without blocking, if there is one.
    fn poll(&self) -> Option<T>;

    /// Wait up to `timeout` for an item.
    fn poll_timeout(&self, timeout: Duration) -> Option<T>;

    /// Block until an item is available, then remove it.
    fn take(&self) -> T;

    /// Remove up to `max` items without blocking.
    fn drain(&self, max: usize) -> Vec<T>;

    /// Free slots left, or `None` for an unbounded queue.
    fn remaining_capacity(&self) -> Option<usize>;

    /// Current number of queued items.
    fn len(&self) -> usize;

    /// Whether the queue holds no items.
    fn is_empty(&self) -> bool {
        self.len() == 0
    }
}
