use error_common::RehabDeskError;
use thiserror::Error;
use uuid::Uuid;

#[derive(Error, Debug)]
pub enum StoreError {
    #[error("{entity} {id} not found")]
    NotFound { entity: &'static str, id: Uuid },

    #[error("conflict: {0}")]
    Conflict(String),

    #[error("storage error: {0}")]
    Storage(String),
}

impl StoreError {
    pub fn not_found(entity: &'static str, id: Uuid) -> Self {
        Self::NotFound { entity, id }
    }
}

impl From<StoreError> for RehabDeskError {
    fn from(err: StoreError) -> Self {
        match err {
            StoreError::NotFound { entity, id } => RehabDeskError::not_found(entity, id),
            StoreError::Conflict(msg) => RehabDeskError::Conflict(msg),
            StoreError::Storage(msg) => RehabDeskError::Storage(msg),
        }
    }
}

pub type StoreResult<T> = std::result::Result<T, StoreError>;
