use error_common::RehabDeskError;
use record_store::StoreError;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum PayrollError {
    #[error("Validation error: {0}")]
    Validation(String),

    #[error("Invalid state transition: {0}")]
    InvalidTransition(String),

    #[error("Store error: {0}")]
    Store(#[from] StoreError),
}

impl From<PayrollError> for RehabDeskError {
    fn from(err: PayrollError) -> Self {
        match err {
            PayrollError::Validation(msg) => RehabDeskError::Validation(msg),
            PayrollError::InvalidTransition(msg) => RehabDeskError::Conflict(msg),
            PayrollError::Store(store) => store.into(),
        }
    }
}

pub type PayrollResult<T> = Result<T, PayrollError>;
