//! Guard decision type for the deactivation lifecycle.

use crate::registry::{DependentLink, EntityKind};

/// Outcome of a deactivation guard check.
///
/// `Blocked` carries the reason shown to the caller. The guard never
/// mutates anything; callers flip the status only after `Allowed`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum GuardDecision {
    Allowed,
    Blocked { reason: String },
}

impl GuardDecision {
    /// Build the blocked decision for a link that matched `count` active
    /// dependents.
    pub fn blocked(kind: EntityKind, link: &DependentLink, count: i64) -> Self {
        let mut reason = format!(
            "Cannot deactivate {}: {} active {} record(s) reference it",
            kind.display(),
            count,
            link.dependent.display(),
        );
        if let Some(hop) = &link.via {
            reason.push_str(" via ");
            reason.push_str(hop.through.display());
        }
        GuardDecision::Blocked { reason }
    }

    /// True when the transition may proceed.
    pub fn is_allowed(&self) -> bool {
        matches!(self, GuardDecision::Allowed)
    }
}
