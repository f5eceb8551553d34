use error_common::RehabDeskError;
use record_store::StoreError;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum AllowanceError {
    #[error("Store error: {0}")]
    Store(#[from] StoreError),
}

impl From<AllowanceError> for RehabDeskError {
    fn from(err: AllowanceError) -> Self {
        match err {
            AllowanceError::Store(store) => store.into(),
        }
    }
}

pub type AllowanceResult<T> = Result<T, AllowanceError>;
