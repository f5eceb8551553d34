use error_common::RehabDeskError;
use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum AccessError {
    #[error("no authenticated caller")]
    Unauthorized,

    #[error("missing required permission: {required}")]
    Forbidden { required: String },
}

impl From<AccessError> for RehabDeskError {
    fn from(err: AccessError) -> Self {
        match err {
            AccessError::Unauthorized => {
                RehabDeskError::Unauthorized("no authenticated caller".to_string())
            }
            AccessError::Forbidden { required } => {
                RehabDeskError::Forbidden(format!("missing required permission: {}", required))
            }
        }
    }
}

pub type AccessResult = std::result::Result<(), AccessError>;
