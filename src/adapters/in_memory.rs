//! In-Memory Management Server Adapter
//!
//! Implements the `ManagementServer` port with a concurrent in-process map.

use std::sync::Arc;

use dashmap::mapref::entry::Entry;
use dashmap::DashMap;
use tracing::debug;

use crate::domain::ports::{AttributeValue, Managed, ManagementServer};
use crate::error::{Error, Result};
use crate::name::ManagedName;

/// In-process management server.
///
/// Stores name -> object bindings in a concurrent map and answers attribute
/// queries by delegating to the bound object. Deployments that need remote
/// access put a transport in front of this port; the registry never knows
/// the difference.
#[derive(Default)]
pub struct InMemoryManagementServer {
    bindings: DashMap<ManagedName, Arc<dyn Managed>>,
}

impl InMemoryManagementServer {
    /// Create an empty server.
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of current bindings.
    pub fn len(&self) -> usize {
        self.bindings.len()
    }

    /// Whether no object is bound.
    pub fn is_empty(&self) -> bool {
        self.bindings.is_empty()
    }

    /// Whether `name` currently has a binding.
    pub fn is_bound(&self, name: &ManagedName) -> bool {
        self.bindings.contains_key(name)
    }
}

impl ManagementServer for InMemoryManagementServer {
    fn bind(&self, name: &ManagedName, object: Arc<dyn Managed>) -> Result<()> {
        // Entry-level atomicity: two concurrent binds of the same name can
        // never both succeed.
        match self.bindings.entry(name.clone()) {
            Entry::Occupied(_) => Err(Error::DuplicateName {
                name: name.canonical(),
            }),
            Entry::Vacant(slot) => {
                slot.insert(object);
                debug!(name = %name, "Bound object");
                Ok(())
            }
        }
    }

    fn unbind(&self, name: &ManagedName) -> Result<()> {
        match self.bindings.remove(name) {
            Some(_) => {
                debug!(name = %name, "Unbound object");
                Ok(())
            }
            None => Err(Error::NotBound {
                name: name.canonical(),
            }),
        }
    }

    fn query_attribute(&self, name: &ManagedName, attribute: &str) -> Result<AttributeValue> {
        let object = self.bindings.get(name).ok_or_else(|| Error::NotBound {
            name: name.canonical(),
        })?;
        object
            .attribute(attribute)
            .ok_or_else(|| Error::UnknownAttribute {
                name: name.canonical(),
                attribute: attribute.to_string(),
            })
    }

    fn attribute_names(&self, name: &ManagedName) -> Result<Vec<String>> {
        let object = self.bindings.get(name).ok_or_else(|| Error::NotBound {
            name: name.canonical(),
        })?;
        Ok(object.attribute_names())
    }
}

// =============================================================================
// Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use assert_matches::assert_matches;

    use super::*;
    use crate::name::NameBuilder;

    struct StaticGauge {
        value: u64,
    }

    impl Managed for StaticGauge {
        fn kind(&self) -> String {
            "StaticGauge".to_string()
        }

        fn grouping(&self) -> String {
            "vantage.tests".to_string()
        }

        fn attribute_names(&self) -> Vec<String> {
            vec!["size".to_string()]
        }

        fn attribute(&self, key: &str) -> Option<AttributeValue> {
            (key == "size").then(|| AttributeValue::Count(self.value))
        }
    }

    fn gauge(value: u64) -> Arc<dyn Managed> {
        Arc::new(StaticGauge { value })
    }

    fn name(suffix: &str) -> ManagedName {
        NameBuilder::new().property("name", suffix).unwrap().build()
    }

    #[test]
    fn test_bind_and_query() {
        let server = InMemoryManagementServer::new();
        let name = name("gauge-1");

        server.bind(&name, gauge(7)).unwrap();
        assert!(server.is_bound(&name));
        assert_eq!(server.len(), 1);

        let value = server.query_attribute(&name, "size").unwrap();
        assert_eq!(value.as_count(), Some(7));
        assert_eq!(server.attribute_names(&name).unwrap(), vec!["size"]);
    }

    #[test]
    fn test_double_bind_is_rejected() {
        let server = InMemoryManagementServer::new();
        let name = name("gauge-1");

        server.bind(&name, gauge(1)).unwrap();
        let result = server.bind(&name, gauge(2));
        assert_matches!(result, Err(Error::DuplicateName { .. }));

        // The original binding is untouched.
        let value = server.query_attribute(&name, "size").unwrap();
        assert_eq!(value.as_count(), Some(1));
    }

    #[test]
    fn test_unbind_unknown_name_is_an_error() {
        let server = InMemoryManagementServer::new();
        assert_matches!(
            server.unbind(&name("ghost")),
            Err(Error::NotBound { .. })
        );
    }

    #[test]
    fn test_unbind_frees_the_name() {
        let server = InMemoryManagementServer::new();
        let name = name("gauge-1");

        server.bind(&name, gauge(1)).unwrap();
        server.unbind(&name).unwrap();
        assert!(!server.is_bound(&name));
        assert!(server.is_empty());

        server.bind(&name, gauge(2)).unwrap();
    }

    #[test]
    fn test_unknown_attribute_is_an_error() {
        let server = InMemoryManagementServer::new();
        let name = name("gauge-1");
        server.bind(&name, gauge(1)).unwrap();

        assert_matches!(
            server.query_attribute(&name, "items"),
            Err(Error::UnknownAttribute { .. })
        );
        assert_matches!(
            server.query_attribute(&self::name("ghost"), "size"),
            Err(Error::NotBound { .. })
        );
    }
}
