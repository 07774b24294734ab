//! Monitored Queue Decorator

use std::marker::PhantomData;
use std::sync::Arc;
use std::time::Duration;

use tracing::debug;

use super::traits::BlockingQueue;
use super::{COLLECTIONS_GROUPING, SIZE_ATTRIBUTE};
use crate::domain::ports::{AttributeValue, Managed};
use crate::error::Error;
use crate::name::{ManagedName, NameBuilder};
use crate::registry::Registry;

/// Monitoring decorator around a thread-safe blocking queue.
///
/// Construction registers the decorator with the registry; from then on an
/// external monitoring client can read the wrapped queue's `size` by name.
/// Every queue operation, including the blocking ones, is a pure
/// delegation: suspension, timeout, and ordering semantics are exactly the
/// wrapped queue's own.
pub struct MonitoredQueue<T, Q>
where
    Q: BlockingQueue<T>,
{
    inner: Arc<Q>,
    name: ManagedName,
    _items: PhantomData<fn(T)>,
}

impl<T, Q> std::fmt::Debug for MonitoredQueue<T, Q>
where
    Q: BlockingQueue<T>,
{
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("MonitoredQueue")
            .field("name", &self.name)
            .finish()
    }
}

/// Live attribute view bound on the management server.
struct QueueAttributes<T, Q>
where
    Q: BlockingQueue<T>,
{
    inner: Arc<Q>,
    _items: PhantomData<fn(T)>,
}

impl<T, Q> Managed for QueueAttributes<T, Q>
where
    Q: BlockingQueue<T> + 'static,
    T: 'static,
{
    fn kind(&self) -> String {
        "MonitoredQueue".to_string()
    }

    fn grouping(&self) -> String {
        COLLECTIONS_GROUPING.to_string()
    }

    fn attribute_names(&self) -> Vec<String> {
        vec![SIZE_ATTRIBUTE.to_string()]
    }

    fn attribute(&self, key: &str) -> Option<AttributeValue> {
        match key {
            SIZE_ATTRIBUTE => Some(AttributeValue::Count(self.inner.len() as u64)),
            _ => None,
        }
    }
}

impl<T, Q> MonitoredQueue<T, Q>
where
    Q: BlockingQueue<T> + 'static,
    T: 'static,
{
    /// Decorate `queue` under the default naming rules.
    ///
    /// Registration is part of construction: if the resolved name is
    /// already bound, construction fails and no decorator is produced.
    pub fn new(registry: &Registry, queue: Arc<Q>) -> Result<Self, Error> {
        let view = Self::view(&queue);
        Self::register(registry, queue, NameBuilder::for_target(view))
    }

    /// Decorate `queue` under a caller-customized name.
    pub fn with_builder(
        registry: &Registry,
        queue: Arc<Q>,
        builder: NameBuilder,
    ) -> Result<Self, Error> {
        let view = Self::view(&queue);
        Self::register(registry, queue, builder.target(view))
    }

    fn view(queue: &Arc<Q>) -> Arc<dyn Managed> {
        Arc::new(QueueAttributes {
            inner: Arc::clone(queue),
            _items: PhantomData,
        })
    }

    fn register(registry: &Registry, queue: Arc<Q>, builder: NameBuilder) -> Result<Self, Error> {
        let name = registry.register_with(&builder)?;
        debug!(name = %name, "Queue decorator registered");
        Ok(Self {
            inner: queue,
            name,
            _items: PhantomData,
        })
    }

    /// The name this decorator was registered under; immutable for the
    /// decorator's lifetime.
    pub fn name(&self) -> &ManagedName {
        &self.name
    }
}

impl<T, Q> BlockingQueue<T> for MonitoredQueue<T, Q>
where
    Q: BlockingQueue<T> + 'static,
    T: 'static,
{
    fn offer(&self, item: T) -> Result<(), T> {
        self.inner.offer(item)
    }

    fn offer_timeout(&self, item: T, timeout: Duration) -> Result<(), T> {
        self.inner.offer_timeout(item, timeout)
    }

    fn put(&self, item: T) {
        self.inner.put(item)
    }

    fn poll(&self) -> Option<T> {
        self.inner.poll()
    }

    fn poll_timeout(&self, timeout: Duration) -> Option<T> {
        self.inner.poll_timeout(timeout)
    }

    fn take(&self) -> T {
        self.inner.take()
    }

    fn drain(&self, max: usize) -> Vec<T> {
        self.inner.drain(max)
    }

    fn remaining_capacity(&self) -> Option<usize> {
        self.inner.remaining_capacity()
    }

    fn len(&self) -> usize {
        self.inner.len()
    }
}

// =============================================================================
// Tests
// =============================================================================
