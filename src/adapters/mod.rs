//! Infrastructure Adapters
//!
//! This module contains adapter implementations for the domain ports,
//! following the Port/Adapter (Hexagonal) architecture pattern.
//!
//! # Architecture
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────────────┐
//! │                        Domain Layer                              │
//! │  ┌────────────────────────────────────────────────────────────┐ │
//! │  │                    Ports (Traits)                           │ │
//! │  │           Managed      │      ManagementServer             │ │
//! │  └────────────────────────────────────────────────────────────┘ │
//! └─────────────────────────────────────────────────────────────────┘
//!                               │
//!                               ▼
//! ┌─────────────────────────────────────────────────────────────────┐
//! │                     Adapters (This Module)                       │
//! │  ┌────────────────────────────────────────────────────────────┐ │
//! │  │                InMemoryManagementServer                     │ │
//! │  └────────────────────────────────────────────────────────────┘ │
//! └─────────────────────────────────────────────────────────────────┘
//! ```
//!
//! # Usage
//!
//! ```ignore
//! use std::sync::Arc;
//! use vantage::adapters::InMemoryManagementServer;
//! use vantage::Registry;
//!
//! let server = Arc::new(InMemoryManagementServer::new());
//! let registry = Registry::new(server.clone());
//!
//! // Monitoring clients read attributes through the ManagementServer port
//! let size = server.query_attribute(&name, "size")?;
//! ```

mod in_memory;

pub use in_memory::InMemoryManagementServer;
