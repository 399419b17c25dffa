//! In-memory backend for the Dialectic argument store.
//!
//! Keeps every argument in process memory. Intended for tests and development
//! setups that should not need a database; nothing survives a restart.

mod store;

pub use store::MemoryStore;

#[cfg(test)]
mod tests;
