use error_common::RehabDeskError;
use record_store::StoreError;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum AccountsError {
    #[error("Validation error: {0}")]
    Validation(String),

    #[error("Store error: {0}")]
    Store(#[from] StoreError),
}

impl From<AccountsError> for RehabDeskError {
    fn from(err: AccountsError) -> Self {
        match err {
            AccountsError::Validation(msg) => RehabDeskError::Validation(msg),
            AccountsError::Store(store) => store.into(),
        }
    }
}

pub type AccountsResult<T> = Result<T, AccountsError>;
