//! Session persistence port.
//!
//! Durable persistence is delegated to an external data store; the core
//! only requires that protocol-number uniqueness and the state-machine
//! invariants survive persistence and reload. The in-memory backend is
//! the reference implementation, used by tests and simple embeddings.

pub mod memory;
pub mod traits;

pub use memory::MemorySessionStore;
pub use traits::SessionStore;
