//! Process-Wide Registration Registry
//!
//! Bookkeeping of which [`ManagedName`]s are currently bound on the
//! management server. Registration computes the name, binds the object on
//! the collaborator, and records the name, all under a single critical
//! section so two concurrent registrations can never race to claim the same
//! name inconsistently. Unregistration is best-effort and idempotent;
//! bulk teardown attempts every tracked entry and reports each outcome.
//!
//! The registry is an injectable instance with an explicit lifecycle
//! (`new` / `shutdown`); there is no implicit static global state, so tests
//! and embedded deployments can run independent registries side by side.
//!
//! # Usage
//!
//! ```ignore
//! use std::sync::Arc;
//! use vantage::adapters::InMemoryManagementServer;
//! use vantage::{NameBuilder, Registry};
//!
//! let registry = Registry::new(Arc::new(InMemoryManagementServer::new()));
//! let name = registry.register(resource)?;
//! // ... later, typically at process shutdown:
//! let report = registry.shutdown();
//! assert!(report.is_clean());
//! ```

use std::sync::Arc;

use dashmap::DashSet;
use parking_lot::Mutex;
use tracing::{info, warn};

use crate::domain::ports::{Managed, ManagementServer};
use crate::error::{Error, Result};
use crate::name::{ManagedName, NameBuilder};

// =============================================================================
// Teardown Outcomes
// =============================================================================

/// Outcome of unregistering a single tracked name.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TeardownStatus {
    /// The binding was removed from the management server
    Unbound,
    /// The name was no longer bound (removed out-of-band); idempotent success
    AlreadyUnbound,
    /// The management server failed to remove the binding
    Failed(String),
}

impl TeardownStatus {
    /// Whether this outcome counts as a successful removal.
    pub fn is_success(&self) -> bool {
        !matches!(self, TeardownStatus::Failed(_))
    }
}

/// Per-entry outcomes of a bulk unregistration sweep.
///
/// A failure on one entry never prevents attempts on the remaining entries;
/// the report lets callers introspect what happened instead of relying on
/// log output.
#[derive(Debug, Default)]
pub struct TeardownReport {
    outcomes: Vec<(ManagedName, TeardownStatus)>,
}

impl TeardownReport {
    /// All per-entry outcomes, in sweep order.
    pub fn outcomes(&self) -> &[(ManagedName, TeardownStatus)] {
        &self.outcomes
    }

    /// Number of entries attempted.
    pub fn len(&self) -> usize {
        self.outcomes.len()
    }

    /// Whether the sweep attempted no entries.
    pub fn is_empty(&self) -> bool {
        self.outcomes.is_empty()
    }

    /// Whether every attempted entry was removed (or already gone).
    pub fn is_clean(&self) -> bool {
        self.outcomes.iter().all(|(_, status)| status.is_success())
    }

    /// The entries the management server failed to remove.
    pub fn failures(&self) -> Vec<&ManagedName> {
        self.outcomes
            .iter()
            .filter(|(_, status)| !status.is_success())
            .map(|(name, _)| name)
            .collect()
    }

    /// Outcome for one specific name, if it was part of the sweep.
    pub fn status(&self, name: &ManagedName) -> Option<&TeardownStatus> {
        self.outcomes
            .iter()
            .find(|(entry, _)| entry == name)
            .map(|(_, status)| status)
    }
}

// =============================================================================
// Registry
// =============================================================================

/// Process-wide bookkeeping of currently bound names.
///
/// Mutation (register / unregister / bulk teardown) is serialized under one
/// critical section; diagnostic reads go through a lock-free concurrent set
/// and never block registrations.
pub struct Registry {
    server: Arc<dyn ManagementServer>,
    /// Serializes name computation, bind, and bookkeeping together.
    lifecycle: Mutex<()>,
    /// Names currently registered through this instance.
    tracked: DashSet<ManagedName>,
}

impl Registry {
    /// Create a registry backed by the given management server.
    pub fn new(server: Arc<dyn ManagementServer>) -> Self {
        Self {
            server,
            lifecycle: Mutex::new(()),
            tracked: DashSet::new(),
        }
    }

    /// Handle on the management server this registry binds against.
    ///
    /// Monitoring clients use it to query attributes of registered objects.
    pub fn server(&self) -> Arc<dyn ManagementServer> {
        Arc::clone(&self.server)
    }

    /// Register `object` under the default naming rules (namespace from its
    /// grouping, `type` from its kind).
    pub fn register(&self, object: Arc<dyn Managed>) -> Result<ManagedName> {
        self.register_with(&NameBuilder::for_target(object))
    }

    /// Finalize `builder` and register its target object under the built
    /// name.
    ///
    /// The builder must carry a target. Fails with
    /// [`Error::DuplicateName`] if the name is already bound; nothing is
    /// recorded in that case.
    pub fn register_with(&self, builder: &NameBuilder) -> Result<ManagedName> {
        let target = builder
            .target_object()
            .ok_or_else(|| Error::invalid("Builder has no target object to register"))?;

        let _guard = self.lifecycle.lock();
        let name = builder.build();
        self.server.bind(&name, target)?;
        self.tracked.insert(name.clone());
        info!(name = %name, "Registered object");
        Ok(name)
    }

    /// Unregister one name, best-effort.
    ///
    /// A name the server no longer knows is logged and reported as
    /// [`TeardownStatus::AlreadyUnbound`], not an error. The name leaves
    /// the tracked set regardless of the server outcome.
    pub fn unregister(&self, name: &ManagedName) -> TeardownStatus {
        let _guard = self.lifecycle.lock();
        let status = self.try_unbind(name);
        self.tracked.remove(name);
        status
    }

    /// Unregister every tracked name, continuing past individual failures.
    ///
    /// Afterwards the tracked set is empty. Consider calling this (or
    /// [`shutdown`](Registry::shutdown)) before terminating the process:
    /// stale bindings can break re-registration under the same names.
    pub fn unregister_all(&self) -> TeardownReport {
        let _guard = self.lifecycle.lock();
        let names: Vec<ManagedName> = self.tracked.iter().map(|name| name.key().clone()).collect();

        let mut report = TeardownReport::default();
        for name in names {
            let status = self.try_unbind(&name);
            report.outcomes.push((name, status));
        }
        self.tracked.clear();
        report
    }

    /// Explicit lifecycle teardown: unregister everything and report.
    pub fn shutdown(&self) -> TeardownReport {
        info!("Shutting down registry");
        self.unregister_all()
    }

    /// Whether `name` is currently tracked by this registry.
    pub fn is_registered(&self, name: &ManagedName) -> bool {
        self.tracked.contains(name)
    }

    /// Snapshot of all tracked names.
    pub fn names(&self) -> Vec<ManagedName> {
        self.tracked.iter().map(|name| name.key().clone()).collect()
    }

    /// Number of tracked names.
    pub fn len(&self) -> usize {
        self.tracked.len()
    }

    /// Whether no names are tracked.
    pub fn is_empty(&self) -> bool {
        self.tracked.is_empty()
    }

    fn try_unbind(&self, name: &ManagedName) -> TeardownStatus {
        match self.server.unbind(name) {
            Ok(()) => {
                info!(name = %name, "Unregistered object");
                TeardownStatus::Unbound
            }
            Err(Error::NotBound { .. }) => {
                info!(name = %name, "Object doesn't exist or has already been unregistered");
                TeardownStatus::AlreadyUnbound
            }
            Err(error) => {
                warn!(name = %name, error = %error, "Failed to unregister object");
                TeardownStatus::Failed(error.to_string())
            }
        }
    }
}

// =============================================================================
// Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use assert_matches::assert_matches;

    use super::*;
    use crate::adapters::InMemoryManagementServer;
    use crate::domain::ports::AttributeValue;

    struct CacheResource {
        name: String,
    }

    impl CacheResource {
        fn new(name: &str) -> Arc<Self> {
            Arc::new(Self {
                name: name.to_string(),
            })
        }
    }

    impl Managed for CacheResource {
        fn kind(&self) -> String {
            "CacheResource".to_string()
        }

        fn grouping(&self) -> String {
            "vantage.tests".to_string()
        }

        fn attribute_names(&self) -> Vec<String> {
            vec!["name".to_string()]
        }

        fn attribute(&self, key: &str) -> Option<AttributeValue> {
            (key == "name").then(|| AttributeValue::Text(self.name.clone()))
        }
    }

    /// Server double whose unbind always fails with a non-NotBound error.
    struct StuckServer {
        inner: InMemoryManagementServer,
    }

    impl ManagementServer for StuckServer {
        fn bind(&self, name: &ManagedName, object: Arc<dyn Managed>) -> Result<()> {
            self.inner.bind(name, object)
        }

        fn unbind(&self, _name: &ManagedName) -> Result<()> {
            Err(Error::invalid("server stuck"))
        }

        fn query_attribute(&self, name: &ManagedName, attribute: &str) -> Result<AttributeValue> {
            self.inner.query_attribute(name, attribute)
        }

        fn attribute_names(&self, name: &ManagedName) -> Result<Vec<String>> {
            self.inner.attribute_names(name)
        }
    }

    fn registry() -> Registry {
        Registry::new(Arc::new(InMemoryManagementServer::new()))
    }

    #[test]
    fn test_register_uses_default_naming_rules() {
        let registry = registry();
        let name = registry.register(CacheResource::new("FirstLevelCache")).unwrap();

        assert_eq!(name.canonical(), "vantage.tests:type=CacheResource");
        assert!(registry.is_registered(&name));
        assert_eq!(registry.len(), 1);

        let value = registry.server().query_attribute(&name, "name").unwrap();
        assert_eq!(value.as_text(), Some("FirstLevelCache"));
    }

    #[test]
    fn test_register_with_builder_overrides() {
        let registry = registry();
        let builder = NameBuilder::for_target(CacheResource::new("FirstLevelCache"))
            .namespace("my.custom.namespace")
            .unwrap()
            .property("name", "1stLevel")
            .unwrap();
        let name = registry.register_with(&builder).unwrap();

        assert_eq!(
            name.canonical(),
            "my.custom.namespace:type=CacheResource,name=1stLevel"
        );
        assert!(registry.is_registered(&name));
    }

    #[test]
    fn test_register_without_target_is_rejected() {
        let registry = registry();
        let builder = NameBuilder::new().property("name", "unbound").unwrap();

        assert_matches!(
            registry.register_with(&builder),
            Err(Error::InvalidArgument(_))
        );
        assert!(registry.is_empty());
    }

    #[test]
    fn test_duplicate_name_is_rejected_and_tracked_once() {
        let registry = registry();
        let first = registry.register(CacheResource::new("FirstLevelCache")).unwrap();

        let result = registry.register(CacheResource::new("AnotherCache"));
        assert_matches!(result, Err(Error::DuplicateName { .. }));

        // The first registration is unaffected by the collision.
        assert!(registry.is_registered(&first));
        assert_eq!(registry.len(), 1);
        let value = registry.server().query_attribute(&first, "name").unwrap();
        assert_eq!(value.as_text(), Some("FirstLevelCache"));
    }

    #[test]
    fn test_unregister_frees_the_name_for_reuse() {
        let registry = registry();
        let name = registry.register(CacheResource::new("FirstLevelCache")).unwrap();

        assert_eq!(registry.unregister(&name), TeardownStatus::Unbound);
        assert!(!registry.is_registered(&name));

        registry.register(CacheResource::new("FirstLevelCache")).unwrap();
    }

    #[test]
    fn test_unregister_unknown_name_is_idempotent() {
        let registry = registry();
        let tracked = registry.register(CacheResource::new("FirstLevelCache")).unwrap();

        let unknown = NameBuilder::new().property("name", "ghost").unwrap().build();
        assert_eq!(registry.unregister(&unknown), TeardownStatus::AlreadyUnbound);

        // The tracked set is unchanged.
        assert!(registry.is_registered(&tracked));
        assert_eq!(registry.len(), 1);
    }

    #[test]
    fn test_unregister_all_sweeps_every_entry() {
        let registry = registry();
        let mut names = Vec::new();
        for i in 1..=3 {
            let builder = NameBuilder::for_target(CacheResource::new("Cache"))
                .property("name", format!("cache-{}", i))
                .unwrap();
            names.push(registry.register_with(&builder).unwrap());
        }

        // One entry disappears out-of-band before the sweep.
        registry.server().unbind(&names[1]).unwrap();

        let report = registry.unregister_all();
        assert_eq!(report.len(), 3);
        assert!(report.is_clean());
        assert_eq!(report.status(&names[0]), Some(&TeardownStatus::Unbound));
        assert_eq!(
            report.status(&names[1]),
            Some(&TeardownStatus::AlreadyUnbound)
        );
        assert_eq!(report.status(&names[2]), Some(&TeardownStatus::Unbound));

        assert!(registry.is_empty());

        // Everything can be registered again after the sweep.
        for i in 1..=3 {
            let builder = NameBuilder::for_target(CacheResource::new("Cache"))
                .property("name", format!("cache-{}", i))
                .unwrap();
            registry.register_with(&builder).unwrap();
        }
    }

    #[test]
    fn test_unregister_all_continues_past_failures() {
        let registry = Registry::new(Arc::new(StuckServer {
            inner: InMemoryManagementServer::new(),
        }));
        for i in 1..=3 {
            let builder = NameBuilder::for_target(CacheResource::new("Cache"))
                .property("name", format!("cache-{}", i))
                .unwrap();
            registry.register_with(&builder).unwrap();
        }

        let report = registry.unregister_all();
        assert_eq!(report.len(), 3);
        assert!(!report.is_clean());
        assert_eq!(report.failures().len(), 3);
        for (_, status) in report.outcomes() {
            assert_matches!(status, TeardownStatus::Failed(_));
        }

        // Bookkeeping is cleared even when the server refuses.
        assert!(registry.is_empty());
    }

    #[test]
    fn test_shutdown_reports_like_unregister_all() {
        let registry = registry();
        registry.register(CacheResource::new("FirstLevelCache")).unwrap();

        let report = registry.shutdown();
        assert_eq!(report.len(), 1);
        assert!(report.is_clean());
        assert!(registry.is_empty());
    }
}
