//! Name Builder
//!
//! Chained, reusable construction of [`ManagedName`] values with the
//! validation and override rules the registry relies on:
//!
//! - the reserved `type` property is seeded first and tracks the target's
//!   declared kind until overridden or disabled
//! - properties render in the order their keys were first introduced;
//!   re-setting a key updates the value in place
//! - the namespace defaults to the target's declared grouping, then to
//!   [`DEFAULT_NAMESPACE`](super::DEFAULT_NAMESPACE)

use std::sync::Arc;

use indexmap::IndexMap;

use crate::domain::ports::Managed;
use crate::error::{Error, Result};
use crate::name::{ManagedName, DEFAULT_KIND, DEFAULT_NAMESPACE, TYPE_PROPERTY};

/// Builder for [`ManagedName`] values.
///
/// Configuration calls consume and return the builder so they chain with
/// `?`; [`build`](NameBuilder::build) borrows, so a configured builder can
/// produce the same name repeatedly.
#[derive(Clone)]
pub struct NameBuilder {
    target: Option<Arc<dyn Managed>>,
    namespace: Option<String>,
    properties: IndexMap<String, String>,
    type_disabled: bool,
}

impl std::fmt::Debug for NameBuilder {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("NameBuilder")
            .field("target", &self.target.as_ref().map(|_| "<managed>"))
            .field("namespace", &self.namespace)
            .field("properties", &self.properties)
            .field("type_disabled", &self.type_disabled)
            .finish()
    }
}

impl Default for NameBuilder {
    fn default() -> Self {
        Self::new()
    }
}

impl NameBuilder {
    /// Create a builder with the `type` property seeded to
    /// [`DEFAULT_KIND`](super::DEFAULT_KIND).
    pub fn new() -> Self {
        let mut properties = IndexMap::new();
        properties.insert(TYPE_PROPERTY.to_string(), DEFAULT_KIND.to_string());
        Self {
            target: None,
            namespace: None,
            properties,
            type_disabled: false,
        }
    }

    /// Create a builder seeded from `target`'s declared kind and grouping.
    pub fn for_target(target: Arc<dyn Managed>) -> Self {
        Self::new().target(target)
    }

    /// Set the object this name is being built for.
    ///
    /// Unless `type` has been disabled, the `type` property is updated in
    /// place to the target's declared kind; the target's grouping becomes
    /// the namespace fallback at build time.
    pub fn target(mut self, target: Arc<dyn Managed>) -> Self {
        if !self.type_disabled {
            let kind = target.kind();
            let kind = if kind.is_empty() {
                DEFAULT_KIND.to_string()
            } else {
                kind
            };
            self.properties.insert(TYPE_PROPERTY.to_string(), kind);
        }
        self.target = Some(target);
        self
    }

    /// Override the namespace.
    pub fn namespace(mut self, namespace: impl Into<String>) -> Result<Self> {
        let namespace = namespace.into();
        if namespace.is_empty() {
            return Err(Error::invalid("Namespace must not be empty"));
        }
        self.namespace = Some(namespace);
        Ok(self)
    }

    /// Override the value of the reserved `type` property.
    pub fn type_name(mut self, type_name: impl Into<String>) -> Result<Self> {
        let type_name = type_name.into();
        if type_name.is_empty() {
            return Err(Error::invalid("Type must not be empty"));
        }
        if self.type_disabled {
            return Err(Error::TypeDisabled);
        }
        self.properties.insert(TYPE_PROPERTY.to_string(), type_name);
        Ok(self)
    }

    /// Append a property, or update it in place if the key already exists.
    pub fn property(mut self, key: impl Into<String>, value: impl Into<String>) -> Result<Self> {
        let key = key.into();
        if key.is_empty() {
            return Err(Error::invalid("Property key must not be empty"));
        }
        let value = value.into();
        if value.is_empty() {
            return Err(Error::invalid(format!(
                "Value for property '{}' must not be empty",
                key
            )));
        }
        if self.type_disabled && key == TYPE_PROPERTY {
            return Err(Error::TypeDisabled);
        }
        self.properties.insert(key, value);
        Ok(self)
    }

    /// Remove the reserved `type` property for good.
    ///
    /// At least one other property must already be present, otherwise the
    /// resulting name would have an empty property list. A failed call
    /// leaves the builder unchanged.
    pub fn disable_type(mut self) -> Result<Self> {
        let remaining = self
            .properties
            .keys()
            .filter(|key| *key != TYPE_PROPERTY)
            .count();
        if remaining == 0 {
            return Err(Error::invalid(
                "Add other properties before disabling 'type'",
            ));
        }
        // shift_remove keeps the insertion order of the other properties.
        self.properties.shift_remove(TYPE_PROPERTY);
        self.type_disabled = true;
        Ok(self)
    }

    /// The target object, for the registry to bind under the built name.
    pub fn target_object(&self) -> Option<Arc<dyn Managed>> {
        self.target.clone()
    }

    /// Produce the name for the current configuration.
    ///
    /// Deterministic: the same sequence of configuration calls always
    /// yields the same name. The builder stays usable afterwards.
    pub fn build(&self) -> ManagedName {
        let namespace = match (&self.namespace, &self.target) {
            (Some(namespace), _) => namespace.clone(),
            (None, Some(target)) => {
                let grouping = target.grouping();
                if grouping.is_empty() {
                    DEFAULT_NAMESPACE.to_string()
                } else {
                    grouping
                }
            }
            (None, None) => DEFAULT_NAMESPACE.to_string(),
        };

        let properties = self
            .properties
            .iter()
            .map(|(key, value)| (key.clone(), value.clone()))
            .collect();

        ManagedName::new(namespace, properties)
    }
}

// =============================================================================
// Tests
// =============================================================================
