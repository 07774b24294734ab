//! Monitored Map Decorator

use std::fmt::Display;
use std::marker::PhantomData;
use std::sync::Arc;

use tracing::debug;

use super::traits::ConcurrentMap;
use super::{COLLECTIONS_GROUPING, ITEMS_ATTRIBUTE, SIZE_ATTRIBUTE};
use crate::domain::ports::{AttributeValue, Managed};
use crate::error::Result;
use crate::name::{ManagedName, NameBuilder};
use crate::registry::Registry;

/// Monitoring decorator around a thread-safe map.
///
/// Construction registers the decorator with the registry; from then on an
/// external monitoring client can read the wrapped map's `size` and an
/// `items` snapshot by name. Every map operation is a pure delegation to
/// the wrapped collection, so monitoring can never diverge from content.
///
/// The decorator stays registered until the caller routes an unregister
/// call through the registry; a new decorator instance is required to
/// re-expose the same map afterwards.
pub struct MonitoredMap<K, V, M>
where
    M: ConcurrentMap<K, V>,
{
    inner: Arc<M>,
    name: ManagedName,
    _entries: PhantomData<fn(K, V)>,
}

impl<K, V, M> std::fmt::Debug for MonitoredMap<K, V, M>
where
    M: ConcurrentMap<K, V>,
{
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("MonitoredMap")
            .field("name", &self.name)
            .finish()
    }
}

/// Live attribute view bound on the management server.
///
/// Shares the wrapped map with the decorator, so attribute reads always
/// reflect the current content.
struct MapAttributes<K, V, M>
where
    M: ConcurrentMap<K, V>,
{
    inner: Arc<M>,
    _entries: PhantomData<fn(K, V)>,
}

impl<K, V, M> Managed for MapAttributes<K, V, M>
where
    M: ConcurrentMap<K, V> + 'static,
    K: Display + 'static,
    V: Display + 'static,
{
    fn kind(&self) -> String {
        "MonitoredMap".to_string()
    }

    fn grouping(&self) -> String {
        COLLECTIONS_GROUPING.to_string()
    }

    fn attribute_names(&self) -> Vec<String> {
        vec![SIZE_ATTRIBUTE.to_string(), ITEMS_ATTRIBUTE.to_string()]
    }

    fn attribute(&self, key: &str) -> Option<AttributeValue> {
        match key {
            SIZE_ATTRIBUTE => Some(AttributeValue::Count(self.inner.len() as u64)),
            ITEMS_ATTRIBUTE => Some(AttributeValue::Entries(render_entries(self.inner.as_ref()))),
            _ => None,
        }
    }
}

fn render_entries<K, V, M>(map: &M) -> Vec<(String, String)>
where
    M: ConcurrentMap<K, V>,
    K: Display,
    V: Display,
{
    map.entries()
        .into_iter()
        .map(|(key, value)| (key.to_string(), value.to_string()))
        .collect()
}

impl<K, V, M> MonitoredMap<K, V, M>
where
    M: ConcurrentMap<K, V> + 'static,
    K: Display + 'static,
    V: Display + 'static,
{
    /// Decorate `map` under the default naming rules.
    ///
    /// Registration is part of construction: if the resolved name is
    /// already bound, construction fails and no decorator is produced.
    pub fn new(registry: &Registry, map: Arc<M>) -> Result<Self> {
        let view = Self::view(&map);
        Self::register(registry, map, NameBuilder::for_target(view))
    }

    /// Decorate `map` under a caller-customized name.
    ///
    /// The builder's target is replaced by the decorator's attribute view;
    /// namespace, type, and property overrides are kept.
    pub fn with_builder(registry: &Registry, map: Arc<M>, builder: NameBuilder) -> Result<Self> {
        let view = Self::view(&map);
        Self::register(registry, map, builder.target(view))
    }

    fn view(map: &Arc<M>) -> Arc<dyn Managed> {
        Arc::new(MapAttributes {
            inner: Arc::clone(map),
            _entries: PhantomData,
        })
    }

    fn register(registry: &Registry, map: Arc<M>, builder: NameBuilder) -> Result<Self> {
        let name = registry.register_with(&builder)?;
        debug!(name = %name, "Map decorator registered");
        Ok(Self {
            inner: map,
            name,
            _entries: PhantomData,
        })
    }

    /// The name this decorator was registered under; immutable for the
    /// decorator's lifetime.
    pub fn name(&self) -> &ManagedName {
        &self.name
    }

    /// Point-in-time snapshot of the wrapped map's content, rendered as
    /// strings; later mutation of the map is not reflected in it.
    pub fn items(&self) -> Vec<(String, String)> {
        render_entries(self.inner.as_ref())
    }
}

impl<K, V, M> ConcurrentMap<K, V> for MonitoredMap<K, V, M>
where
    M: ConcurrentMap<K, V> + 'static,
    K: Display + 'static,
    V: Display + 'static,
{
    fn insert(&self, key: K, value: V) -> Option<V> {
        self.inner.insert(key, value)
    }

    fn get(&self, key: &K) -> Option<V> {
        self.inner.get(key)
    }

    fn remove(&self, key: &K) -> Option<V> {
        self.inner.remove(key)
    }

    fn contains_key(&self, key: &K) -> bool {
        self.inner.contains_key(key)
    }

    fn clear(&self) {
        self.inner.clear()
    }

    fn len(&self) -> usize {
        self.inner.len()
    }

    fn entries(&self) -> Vec<(K, V)> {
        self.inner.entries()
    }
}

// =============================================================================
// Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use assert_matches::assert_matches;
    use dashmap::DashMap;

    use super::*;
    use crate::adapters::InMemoryManagementServer;
    use crate::error::Error;

    fn registry() -> Registry {
        Registry::new(Arc::new(InMemoryManagementServer::new()))
    }

    fn sample_map() -> Arc<DashMap<String, i32>> {
        Arc::new(DashMap::new())
    }

    #[test]
    fn test_decorator_behaves_like_the_map_it_wraps() {
        let registry = registry();
        let map = sample_map();
        let monitored = MonitoredMap::new(&registry, Arc::clone(&map)).unwrap();

        monitored.insert("A".to_string(), 1);
        monitored.insert("B".to_string(), 2);
        monitored.insert("C".to_string(), 3);

        assert_eq!(monitored.get(&"A".to_string()), map.get("A").map(|v| *v));
        assert_eq!(monitored.get(&"B".to_string()), map.get("B").map(|v| *v));
        assert_eq!(monitored.get(&"C".to_string()), map.get("C").map(|v| *v));
        assert_eq!(monitored.len(), 3);

        assert_eq!(monitored.remove(&"B".to_string()), Some(2));
        assert_eq!(map.len(), 2);
        assert!(!monitored.contains_key(&"B".to_string()));

        monitored.clear();
        assert!(map.is_empty());
    }

    #[test]
    fn test_default_name_uses_collections_grouping() {
        let registry = registry();
        let monitored = MonitoredMap::new(&registry, sample_map()).unwrap();

        assert_eq!(
            monitored.name().canonical(),
            "vantage.collections:type=MonitoredMap"
        );
        assert!(registry.is_registered(monitored.name()));
    }

    #[test]
    fn test_builder_overrides_are_kept() {
        let registry = registry();
        let builder = NameBuilder::new()
            .namespace("my.custom.namespace")
            .unwrap()
            .property("name", "session-cache")
            .unwrap();
        let monitored =
            MonitoredMap::with_builder(&registry, sample_map(), builder).unwrap();

        assert_eq!(
            monitored.name().canonical(),
            "my.custom.namespace:type=MonitoredMap,name=session-cache"
        );
    }

    #[test]
    fn test_size_and_items_attributes_via_server() {
        let registry = registry();
        let server = registry.server();
        let monitored = MonitoredMap::new(&registry, sample_map()).unwrap();

        monitored.insert("A".to_string(), 1);
        monitored.insert("B".to_string(), 2);
        monitored.insert("C".to_string(), 3);

        let size = server.query_attribute(monitored.name(), SIZE_ATTRIBUTE).unwrap();
        assert_eq!(size.as_count(), Some(3));

        let items = server.query_attribute(monitored.name(), ITEMS_ATTRIBUTE).unwrap();
        let mut rows = items.as_entries().unwrap().to_vec();
        rows.sort();
        assert_eq!(
            rows,
            vec![
                ("A".to_string(), "1".to_string()),
                ("B".to_string(), "2".to_string()),
                ("C".to_string(), "3".to_string()),
            ]
        );

        let mut names = server.attribute_names(monitored.name()).unwrap();
        names.sort();
        assert_eq!(names, vec!["items", "size"]);
    }

    #[test]
    fn test_items_is_a_snapshot_not_a_live_view() {
        let registry = registry();
        let monitored = MonitoredMap::new(&registry, sample_map()).unwrap();

        monitored.insert("A".to_string(), 1);
        let snapshot = monitored.items();

        monitored.insert("B".to_string(), 2);
        monitored.remove(&"A".to_string());

        assert_eq!(snapshot, vec![("A".to_string(), "1".to_string())]);
    }

    #[test]
    fn test_name_collision_fails_construction_without_side_effects() {
        let registry = registry();
        let _first = MonitoredMap::new(&registry, sample_map()).unwrap();
        assert_eq!(registry.len(), 1);

        let second = MonitoredMap::new(&registry, sample_map());
        assert_matches!(second, Err(Error::DuplicateName { .. }));
        assert_eq!(registry.len(), 1);
    }

    #[test]
    fn test_unregistered_decorator_frees_the_name() {
        let registry = registry();
        let first = MonitoredMap::new(&registry, sample_map()).unwrap();
        let name = first.name().clone();

        registry.unregister(&name);
        assert!(!registry.is_registered(&name));

        // A fresh decorator can claim the name again.
        let second = MonitoredMap::new(&registry, sample_map()).unwrap();
        assert_eq!(second.name(), &name);
    }
}
