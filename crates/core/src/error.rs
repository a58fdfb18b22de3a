use crate::types::DbId;

#[derive(Debug, thiserror::Error)]
pub enum CoreError {
    #[error("Entity not found: {entity} with id {id}")]
    NotFound { entity: &'static str, id: DbId },

    #[error("{entity} with id {id} already exists")]
    DuplicateId { entity: &'static str, id: DbId },

    #[error("{reason}")]
    DependencyBlocked { reason: String },

    #[error("No {entity} records exist")]
    EmptyCollection { entity: &'static str },

    #[error("Internal error: {0}")]
    Internal(String),
}
