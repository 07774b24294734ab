//! Collection Capability Backends
//!
//! Capability impls for the concurrent collections this crate decorates
//! out of the box: `dashmap::DashMap` for the map capability and a
//! crossbeam-channel adapter for the blocking-queue capability. The
//! concurrency semantics are entirely the backing structure's; nothing
//! here adds locking or ordering.

use std::hash::Hash;
use std::time::Duration;

use crossbeam::channel::{self, Receiver, Sender};
use dashmap::DashMap;

use super::traits::{BlockingQueue, ConcurrentMap};

// =============================================================================
// DashMap
// =============================================================================

impl<K, V> ConcurrentMap<K, V> for DashMap<K, V>
where
    K: Eq + Hash + Clone + Send + Sync,
    V: Clone + Send + Sync,
{
    fn insert(&self, key: K, value: V) -> Option<V> {
        DashMap::insert(self, key, value)
    }

    fn get(&self, key: &K) -> Option<V> {
        DashMap::get(self, key).map(|entry| entry.value().clone())
    }

    fn remove(&self, key: &K) -> Option<V> {
        DashMap::remove(self, key).map(|(_, value)| value)
    }

    fn contains_key(&self, key: &K) -> bool {
        DashMap::contains_key(self, key)
    }

    fn clear(&self) {
        DashMap::clear(self)
    }

    fn len(&self) -> usize {
        DashMap::len(self)
    }

    fn entries(&self) -> Vec<(K, V)> {
        self.iter()
            .map(|entry| (entry.key().clone(), entry.value().clone()))
            .collect()
    }
}

// =============================================================================
// ChannelQueue
// =============================================================================

/// FIFO blocking queue over a crossbeam channel.
///
/// The queue owns both halves of the channel, so sends and receives can
/// never observe a disconnect. Blocking, timeout, and FIFO semantics are
/// the channel's own.
pub struct ChannelQueue<T> {
    tx: Sender<T>,
    rx: Receiver<T>,
}

impl<T: Send> ChannelQueue<T> {
    /// Create a queue holding at most `capacity` items.
    pub fn bounded(capacity: usize) -> Self {
        let (tx, rx) = channel::bounded(capacity);
        Self { tx, rx }
    }

    /// Create a queue with no capacity bound.
    pub fn unbounded() -> Self {
        let (tx, rx) = channel::unbounded();
        Self { tx, rx }
    }

    /// Total capacity, or `None` if unbounded.
    pub fn capacity(&self) -> Option<usize> {
        self.tx.capacity()
    }
}

impl<T: Send> BlockingQueue<T> for ChannelQueue<T> {
    fn offer(&self, item: T) -> Result<(), T> {
        self.tx.try_send(item).map_err(|error| error.into_inner())
    }

    fn offer_timeout(&self, item: T, timeout: Duration) -> Result<(), T> {
        self.tx
            .send_timeout(item, timeout)
            .map_err(|error| error.into_inner())
    }

    fn put(&self, item: T) {
        // The queue owns the receiving half, so the send can't disconnect.
        let _ = self.tx.send(item);
    }

    fn poll(&self) -> Option<T> {
        self.rx.try_recv().ok()
    }

    fn poll_timeout(&self, timeout: Duration) -> Option<T> {
        self.rx.recv_timeout(timeout).ok()
    }

    fn take(&self) -> T {
        match self.rx.recv() {
            Ok(item) => item,
            // recv only fails on disconnect; the queue owns the sending half.
            Err(_) => unreachable!("channel queue owns its sending half"),
        }
    }

    fn drain(&self, max: usize) -> Vec<T> {
        let mut items = Vec::new();
        while items.len() < max {
            match self.rx.try_recv() {
                Ok(item) => items.push(item),
                Err(_) => break,
            }
        }
        items
    }

    fn remaining_capacity(&self) -> Option<usize> {
        self.tx
            .capacity()
            .map(|capacity| capacity.saturating_sub(self.tx.len()))
    }

    fn len(&self) -> usize {
        self.rx.len()
    }
}

// =============================================================================
// Tests
// =============================================================================
