//! Persistent storage for the HR workflow engine.
//!
//! The workflow layer consumes persistence through a narrow interface:
//! typed lookups, inserts guarded by uniqueness constraints, and an
//! all-or-nothing [`MemoryStore::transaction`] primitive that commits a
//! multi-record write as a single atomic unit.

mod memory;

pub use memory::{MemoryStore, Tables};
