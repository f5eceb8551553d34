use thiserror::Error;

/// Shared error enum for RehabDesk Engine crates
#[derive(Error, Debug)]
pub enum RehabDeskError {
    /// No valid caller identity on the request
    #[error("Unauthorized: {0}")]
    Unauthorized(String),

    /// Identified caller lacks the required permission
    #[error("Forbidden: {0}")]
    Forbidden(String),

    /// Referenced entity does not exist
    #[error("Not found: {0}")]
    NotFound(String),

    /// Input fails schema constraints
    #[error("Validation error: {0}")]
    Validation(String),

    /// Uniqueness or state-transition violation
    #[error("Conflict: {0}")]
    Conflict(String),

    /// Record store failure
    #[error("Storage error: {0}")]
    Storage(String),

    /// Configuration errors
    #[error("Configuration error: {0}")]
    Config(String),

    /// Internal system errors
    #[error("Internal error: {0}")]
    Internal(String),

    /// Wrapped external errors
    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

impl RehabDeskError {
    /// Stable machine-readable code for API payloads and log correlation
    pub fn code(&self) -> &'static str {
        match self {
            Self::Unauthorized(_) => crate::codes::auth::UNAUTHENTICATED,
            Self::Forbidden(_) => crate::codes::auth::INSUFFICIENT_PERMISSIONS,
            Self::NotFound(_) => crate::codes::store::RECORD_NOT_FOUND,
            Self::Validation(_) => crate::codes::validation::INVALID_INPUT,
            Self::Conflict(_) => crate::codes::store::CONSTRAINT_VIOLATION,
            Self::Storage(_) => crate::codes::store::OPERATION_FAILED,
            Self::Config(_) => crate::codes::system::CONFIG_INVALID,
            Self::Internal(_) | Self::Other(_) => crate::codes::system::INTERNAL,
        }
    }

    /// Convenience constructor for not-found conditions
    pub fn not_found(entity: &str, id: impl std::fmt::Display) -> Self {
        Self::NotFound(format!("{} {} does not exist", entity, id))
    }

    /// Convenience constructor for validation failures on a named field
    pub fn invalid_field(field: &str, message: &str) -> Self {
        Self::Validation(format!("{}: {}", field, message))
    }
}

/// Result type alias for RehabDesk operations
pub type RehabDeskResult<T> = std::result::Result<T, RehabDeskError>;

/// Log an error with its stable code at the failure boundary
pub fn log_error(context: &str, error: &RehabDeskError) {
    tracing::error!(
        context = context,
        code = error.code(),
        error = %error,
        "RehabDesk error occurred"
    );
}
