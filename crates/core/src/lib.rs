//! Domain types and pure lifecycle logic for the music-store backend.
//!
//! This crate performs no I/O. It defines the entity registry (which entity
//! kinds exist, which dependents block their deactivation, and how each kind
//! is read), the guard decision type, and the domain error shared by every
//! layer above.

pub mod error;
pub mod lifecycle;
pub mod registry;
pub mod types;
