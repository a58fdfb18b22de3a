//! HTTP API for the music-store inventory service.

pub mod config;
pub mod error;
pub mod handlers;
pub mod routes;
pub mod state;
