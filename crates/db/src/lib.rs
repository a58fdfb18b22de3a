//! Persistence layer for the music-store backend.
//!
//! Exposes the [`store::Store`] contract with two backends: PostgreSQL for
//! production and an in-memory store for tests and database-less runs. The
//! deactivation guard walk lives in [`guard`] and consults the store.

pub mod guard;
pub mod models;
pub mod store;

pub use store::{MemoryStore, PostgresStore, Store, StoreError};
