//! Shared type aliases used across the workspace.

/// Database primary-key type. Keys are caller-supplied, never generated.
pub type DbId = i64;

/// UTC timestamp type used for all temporal columns.
pub type Timestamp = chrono::DateTime<chrono::Utc>;
