//! Domain Ports (Port/Adapter Pattern)
//!
//! This module defines the core abstractions (ports) that the registry
//! depends on. Infrastructure adapters implement these traits to provide
//! concrete implementations.
//!
//! # Architecture
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────────┐
//! │                      Domain Layer                            │
//! │  ┌─────────────────────────────────────────────────────┐    │
//! │  │                  Ports (Traits)                      │    │
//! │  │        Managed        │       ManagementServer      │    │
//! │  └─────────────────────────────────────────────────────┘    │
//! └─────────────────────────────────────────────────────────────┘
//!                              │
//!                              ▼
//! ┌─────────────────────────────────────────────────────────────┐
//! │                   Infrastructure Layer                       │
//! │  ┌─────────────────────────────────────────────────────┐    │
//! │  │                  Adapters (Impls)                    │    │
//! │  │              InMemoryManagementServer                │    │
//! │  └─────────────────────────────────────────────────────┘    │
//! └─────────────────────────────────────────────────────────────┘
//! ```

use std::sync::Arc;

use crate::error::Result;
use crate::name::ManagedName;

// =============================================================================
// Value Objects
// =============================================================================

/// A monitoring attribute value read from a managed object.
///
/// This is the unit of data the external monitoring client consumes: a
/// point-in-time reading, never a live view of the underlying object.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AttributeValue {
    /// Scalar count, e.g. a collection size
    Count(u64),
    /// Scalar text
    Text(String),
    /// Ordered key/value rows, e.g. a map content snapshot
    Entries(Vec<(String, String)>),
}

impl AttributeValue {
    /// Return the scalar count, if this value is one.
    pub fn as_count(&self) -> Option<u64> {
        match self {
            AttributeValue::Count(n) => Some(*n),
            _ => None,
        }
    }

    /// Return the scalar text, if this value is one.
    pub fn as_text(&self) -> Option<&str> {
        match self {
            AttributeValue::Text(s) => Some(s),
            _ => None,
        }
    }

    /// Return the key/value rows, if this value is a snapshot.
    pub fn as_entries(&self) -> Option<&[(String, String)]> {
        match self {
            AttributeValue::Entries(rows) => Some(rows),
            _ => None,
        }
    }
}

// =============================================================================
// Ports
// =============================================================================

/// Capability supplied by any object that can be registered for monitoring.
///
/// Implementors declare their own identity explicitly: a concrete `kind`
/// (seeds the reserved `type` name property) and a `grouping` (the default
/// namespace). There is no runtime type inspection anywhere in the crate.
pub trait Managed: Send + Sync {
    /// Concrete kind of the object, e.g. `"MonitoredMap"`.
    fn kind(&self) -> String;

    /// Declared grouping the object belongs to, e.g. `"vantage.collections"`.
    fn grouping(&self) -> String;

    /// Names of the monitoring attributes this object exposes.
    fn attribute_names(&self) -> Vec<String>;

    /// Read a single monitoring attribute, or `None` if not exposed.
    fn attribute(&self, key: &str) -> Option<AttributeValue>;
}

/// Management server collaborator: stores name -> object bindings and
/// answers attribute queries on behalf of external monitoring clients.
///
/// The registry depends only on this surface; the transport (if any) behind
/// it is out of scope for this crate.
pub trait ManagementServer: Send + Sync {
    /// Bind `object` under `name`.
    ///
    /// Fails with [`Error::DuplicateName`](crate::Error::DuplicateName) if
    /// the name is already bound.
    fn bind(&self, name: &ManagedName, object: Arc<dyn Managed>) -> Result<()>;

    /// Remove the binding for `name`.
    ///
    /// Fails with [`Error::NotBound`](crate::Error::NotBound) if the name
    /// is unknown.
    fn unbind(&self, name: &ManagedName) -> Result<()>;

    /// Read one attribute of the object bound under `name`.
    fn query_attribute(&self, name: &ManagedName, attribute: &str) -> Result<AttributeValue>;

    /// Enumerate the attribute names the object bound under `name` exposes.
    fn attribute_names(&self, name: &ManagedName) -> Result<Vec<String>>;
}

// =============================================================================
// Tests
// =============================================================================
