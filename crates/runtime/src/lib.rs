//! Runtime orchestration for a real-time autobattler match.
//!
//! This crate wires the battle-core reducer, the content oracles and a tokio
//! worker task into a cohesive runtime API. Consumers embed [`Runtime`] to run
//! a match, subscribe to events, and issue player commands through
//! [`RuntimeHandle`].
//!
//! Modules are organized by responsibility:
//! - [`runtime`] hosts the orchestrator and builder
//! - [`api`] exposes the types downstream clients interact with
//! - [`events`] provides topic-based event bus for flexible event routing
//! - [`oracle`] adapts loaded content into battle-core environments
//! - `workers` keeps background tasks internal to the crate
pub mod api;
pub mod events;
pub mod oracle;
pub mod runtime;

mod workers;

pub use api::{Result, RuntimeError, RuntimeHandle};
pub use events::{Event, EventBus, MatchEvent, Topic};
pub use oracle::OracleManager;
pub use runtime::{Runtime, RuntimeBuilder, RuntimeConfig};
