//! Monitored Collection Decorators
//!
//! Transparent decorators that make a pre-existing thread-safe collection's
//! size (and, for maps, a point-in-time content snapshot) observable by
//! name through the registry, with zero change to the collection's own
//! concurrency or ordering guarantees.
//!
//! # Architecture
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────┐
//! │                      Monitored Collections                           │
//! ├─────────────────────────────────────────────────────────────────────┤
//! │  ┌──────────────────┐              ┌──────────────────┐             │
//! │  │   MonitoredMap   │              │  MonitoredQueue  │             │
//! │  │  (size, items)   │              │      (size)      │             │
//! │  └──────────────────┘              └──────────────────┘             │
//! │           │   delegation                    │   delegation          │
//! │           ▼                                 ▼                       │
//! │  ┌──────────────────┐              ┌──────────────────┐             │
//! │  │ ConcurrentMap    │              │ BlockingQueue    │             │
//! │  │ (e.g. DashMap)   │              │ (e.g. channel)   │             │
//! │  └──────────────────┘              └──────────────────┘             │
//! └─────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! # Components
//!
//! - **Capability traits** (`traits.rs`): the narrow surface a collection
//!   must offer to be decorated ([`ConcurrentMap`], [`BlockingQueue`])
//! - **Backends** (`backends.rs`): capability impls for `dashmap::DashMap`
//!   and the crossbeam-channel-backed [`ChannelQueue`]
//! - **Decorators** (`map.rs`, `queue.rs`): register themselves at
//!   construction and delegate every collection operation unchanged

mod backends;
mod map;
mod queue;
mod traits;

pub use backends::ChannelQueue;
pub use map::MonitoredMap;
pub use queue::MonitoredQueue;
pub use traits::{BlockingQueue, ConcurrentMap};

/// Default namespace for collection decorators.
pub const COLLECTIONS_GROUPING: &str = "vantage.collections";

/// Attribute exposing the wrapped collection's current size.
pub const SIZE_ATTRIBUTE: &str = "size";

/// Attribute exposing a map's content snapshot.
pub const ITEMS_ATTRIBUTE: &str = "items";
