//! Vantage - Management Name Registry for Concurrent Collections
//!
//! A library for making otherwise-opaque concurrent data structures
//! observable by an external monitoring client: deterministic, hierarchical
//! name construction, a process-wide registration registry with best-effort
//! teardown, and transparent decorators that expose monitoring attributes
//! (size, contents) without altering the wrapped collection's concurrency
//! semantics.
//!
//! # Architecture
//!
//! ```text
//! ┌──────────────────────────────────────────────────────────────────────┐
//! │                              Vantage                                  │
//! ├──────────────────────────────────────────────────────────────────────┤
//! │  ┌───────────────────┐   ┌──────────────┐   ┌────────────────────┐   │
//! │  │   NameBuilder     │──▶│   Registry   │──▶│  ManagementServer  │   │
//! │  │  (canonical name) │   │ (bookkeeping)│   │   (collaborator)   │   │
//! │  └───────────────────┘   └──────────────┘   └────────────────────┘   │
//! │            ▲                     ▲                     ▲             │
//! │            │                     │                     │ attribute   │
//! │  ┌─────────┴─────────────────────┴───────┐             │ queries     │
//! │  │   MonitoredMap / MonitoredQueue       │      monitoring client    │
//! │  │   (register at construction,          │                           │
//! │  │    delegate everything else)          │                           │
//! │  └───────────────────────────────────────┘                           │
//! └──────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! # Name format
//!
//! ```text
//! <namespace>:<key1>=<value1>,<key2>=<value2>,...
//! ```
//!
//! Properties render in the order their keys were first introduced; the
//! reserved `type` property conventionally comes first. No escaping is
//! defined for `,` or `=` inside keys or values.
//!
//! # Modules
//!
//! - [`adapters`] - Infrastructure adapters implementing domain ports
//! - [`collections`] - Monitored decorators over thread-safe collections
//! - [`domain`] - Domain layer with ports (DDD)
//! - [`error`] - Error types
//! - [`name`] - Canonical name construction
//! - [`registry`] - Process-wide registration bookkeeping
//!
//! # Usage
//!
//! ```ignore
//! use std::sync::Arc;
//! use dashmap::DashMap;
//! use vantage::adapters::InMemoryManagementServer;
//! use vantage::collections::MonitoredMap;
//! use vantage::Registry;
//!
//! let registry = Registry::new(Arc::new(InMemoryManagementServer::new()));
//!
//! let sessions = Arc::new(DashMap::new());
//! let monitored = MonitoredMap::new(&registry, sessions)?;
//! // ... the monitoring client can now read `size` and `items` by name.
//!
//! let report = registry.shutdown();
//! assert!(report.is_clean());
//! ```

pub mod adapters;
pub mod collections;
pub mod domain;
pub mod error;
pub mod name;
pub mod registry;

// Re-export commonly used types
pub use collections::{ChannelQueue, MonitoredMap, MonitoredQueue};
pub use domain::ports::{AttributeValue, Managed, ManagementServer};
pub use error::{Error, Result};
pub use name::{ManagedName, NameBuilder};
pub use registry::{Registry, TeardownReport, TeardownStatus};
