//! Two-valued lifecycle status stored as a single-letter code.

use serde::{Deserialize, Serialize};

/// Entity lifecycle status, persisted and serialized as `"A"` / `"I"`.
///
/// Rows are never deleted; they only move between these two states.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum Status {
    #[default]
    #[serde(rename = "A")]
    Active,
    #[serde(rename = "I")]
    Inactive,
}

impl Status {
    /// One-letter storage code.
    pub fn code(self) -> &'static str {
        match self {
            Status::Active => "A",
            Status::Inactive => "I",
        }
    }

    pub fn is_active(self) -> bool {
        matches!(self, Status::Active)
    }
}

/// Error for status codes other than `"A"` / `"I"`.
#[derive(Debug, thiserror::Error)]
#[error("invalid status code: {0:?}")]
pub struct InvalidStatus(pub String);

impl TryFrom<String> for Status {
    type Error = InvalidStatus;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        match value.as_str() {
            "A" => Ok(Status::Active),
            "I" => Ok(Status::Inactive),
            _ => Err(InvalidStatus(value)),
        }
    }
}

impl std::fmt::Display for Status {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.code())
    }
}
