//! Lifecycle orchestration: the dependency guard in front of deactivation,
//! and the always-permitted activation.
//!
//! The walk itself is backend-agnostic. It reads the registered dependent
//! links for a kind and asks the store how many active rows hold each
//! reference; the first link with a live dependent blocks the transition.

use musicstore_core::error::CoreError;
use musicstore_core::lifecycle::GuardDecision;
use musicstore_core::registry::{self, EntityKind};
use musicstore_core::types::DbId;

use crate::models::Status;
use crate::store::{Store, StoreResult};

/// Decides whether `kind`/`id` may be deactivated.
///
/// Fails with [`CoreError::NotFound`] when the row does not exist; the
/// existence check runs before any dependent is consulted. Transitive links
/// first collect the intermediate ids (of any status), then count active
/// dependents against that set.
pub async fn can_deactivate(
    store: &(impl Store + ?Sized),
    kind: EntityKind,
    id: DbId,
) -> StoreResult<GuardDecision> {
    if !store.exists(kind, id).await? {
        return Err(CoreError::NotFound {
            entity: kind.display(),
            id,
        }
        .into());
    }

    for link in registry::dependents_of(kind) {
        let count = match &link.via {
            None => {
                store
                    .count_active_referencing(link.dependent, link.foreign_key, &[id])
                    .await?
            }
            Some(hop) => {
                let through_ids = store
                    .referencing_ids(hop.through, hop.foreign_key, id)
                    .await?;
                if through_ids.is_empty() {
                    continue;
                }
                store
                    .count_active_referencing(link.dependent, link.foreign_key, &through_ids)
                    .await?
            }
        };
        if count > 0 {
            return Ok(GuardDecision::blocked(kind, link, count));
        }
    }

    Ok(GuardDecision::Allowed)
}

/// Deactivates `kind`/`id` behind the dependency guard.
///
/// With `transactional` set the backend decides and flips in one step;
/// otherwise the guard walk and the status write run separately, which is
/// cheaper but can race concurrent dependent creation.
pub async fn deactivate(
    store: &(impl Store + ?Sized),
    kind: EntityKind,
    id: DbId,
    transactional: bool,
) -> StoreResult<()> {
    if transactional {
        store.deactivate_guarded(kind, id).await?;
    } else {
        match can_deactivate(store, kind, id).await? {
            GuardDecision::Allowed => {}
            GuardDecision::Blocked { reason } => {
                return Err(CoreError::DependencyBlocked { reason }.into());
            }
        }
        if !store.set_status(kind, id, Status::Inactive).await? {
            return Err(CoreError::NotFound {
                entity: kind.display(),
                id,
            }
            .into());
        }
    }
    tracing::info!(kind = kind.display(), id, "entity deactivated");
    Ok(())
}

/// Reactivates `kind`/`id`. Activation is never guarded, so the only
/// failure mode is a missing row.
pub async fn activate(
    store: &(impl Store + ?Sized),
    kind: EntityKind,
    id: DbId,
) -> StoreResult<()> {
    if !store.set_status(kind, id, Status::Active).await? {
        return Err(CoreError::NotFound {
            entity: kind.display(),
            id,
        }
        .into());
    }
    tracing::info!(kind = kind.display(), id, "entity activated");
    Ok(())
}
