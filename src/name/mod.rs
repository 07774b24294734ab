//! Canonical Name Construction
//!
//! Builds hierarchical, human-readable names for runtime objects. A name is
//! a namespace plus an ordered list of key/value properties, rendered as:
//!
//! ```text
//! <namespace>:<key1>=<value1>,<key2>=<value2>,...
//! ```
//!
//! # Components
//!
//! - **ManagedName** (this module): immutable value object with the
//!   canonical textual form
//! - **NameBuilder** (`builder.rs`): chained, reusable construction with
//!   validation and override rules
//!
//! # Usage
//!
//! ```ignore
//! use vantage::name::NameBuilder;
//!
//! let name = NameBuilder::new()
//!     .namespace("my.custom.namespace")?
//!     .type_name("Cache")?
//!     .property("name", "FirstLevelCache")?
//!     .build();
//!
//! assert_eq!(
//!     name.canonical(),
//!     "my.custom.namespace:type=Cache,name=FirstLevelCache"
//! );
//! ```

use std::fmt;

mod builder;
mod proptest;

pub use builder::NameBuilder;

/// Namespace used when no target and no override provide one.
pub const DEFAULT_NAMESPACE: &str = "default";

/// Value of the reserved `type` property when no target and no override
/// provide one.
pub const DEFAULT_KIND: &str = "Object";

/// The reserved property key, conventionally rendered first.
pub const TYPE_PROPERTY: &str = "type";

/// Canonical namespace + ordered-properties identifier used to bind an
/// object for external inspection.
///
/// Names compare, hash, and render deterministically: properties keep the
/// order in which their keys were first introduced on the builder.
///
/// # Limitation
///
/// No escaping is defined for keys or values containing `,` or `=`; such
/// names render ambiguously and callers must avoid these characters.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct ManagedName {
    namespace: String,
    properties: Vec<(String, String)>,
}

impl ManagedName {
    /// Assembled only by [`NameBuilder`], which enforces the invariants
    /// (non-empty namespace, keys, and values; at least one property).
    pub(crate) fn new(namespace: String, properties: Vec<(String, String)>) -> Self {
        Self {
            namespace,
            properties,
        }
    }

    /// The namespace part of the name.
    pub fn namespace(&self) -> &str {
        &self.namespace
    }

    /// The ordered key/value properties.
    pub fn properties(&self) -> &[(String, String)] {
        &self.properties
    }

    /// Look up a single property value by key.
    pub fn property(&self, key: &str) -> Option<&str> {
        self.properties
            .iter()
            .find(|(k, _)| k == key)
            .map(|(_, v)| v.as_str())
    }

    /// The canonical textual form, `namespace:key1=value1,key2=value2,...`.
    pub fn canonical(&self) -> String {
        self.to_string()
    }
}

impl fmt::Display for ManagedName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:", self.namespace)?;
        for (i, (key, value)) in self.properties.iter().enumerate() {
            if i > 0 {
                write!(f, ",")?;
            }
            write!(f, "{}={}", key, value)?;
        }
        Ok(())
    }
}

// =============================================================================
// Tests
// =============================================================================
