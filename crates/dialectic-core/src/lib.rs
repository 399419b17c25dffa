//! Core types and trait definitions for the Dialectic argument store.
//!
//! This crate is deliberately free of database and runtime dependencies.
//! Storage backends implement [`store::ArgumentStore`]; everything else
//! depends on that abstraction.

// We intentionally use native `async fn` in traits (stabilised in Rust 1.75).
// Suppress the advisory lint about `Send` bounds on the returned futures.
#![allow(async_fn_in_trait)]

pub mod argument;
pub mod claim;
pub mod error;
pub mod store;

pub use argument::{Argument, ArgumentId, NewArgument, VersionNumber};
pub use claim::Claim;
pub use error::{Error, Result, StoreError, ValidationError};
pub use store::{ArgumentStore, FetchSomeOptions};
