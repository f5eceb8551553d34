//! API error and response envelope types
//!
//! Every handler returns `Result<Json<ApiResponse<T>>, ApiError>`; the error
//! half maps onto distinct HTTP statuses so clients can tell an unidentified
//! caller (401) from a denied one (403), and a missing record (404) from a
//! rejected payload (422).

use auth_rbac::AccessError;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use error_common::RehabDeskError;
use serde::Serialize;
use thiserror::Error;

/// API-level error with an HTTP status mapping
#[derive(Error, Debug)]
pub enum ApiError {
    #[error("Unauthorized: {0}")]
    Unauthorized(String),

    #[error("Forbidden: {0}")]
    Forbidden(String),

    #[error("Not found: {0}")]
    NotFound(String),

    #[error("Validation error: {0}")]
    Validation(String),

    #[error("Conflict: {0}")]
    Conflict(String),

    #[error("Internal error: {0}")]
    Internal(String),
}

impl ApiError {
    pub fn unauthorized(message: impl Into<String>) -> Self {
        Self::Unauthorized(message.into())
    }

    pub fn forbidden(message: impl Into<String>) -> Self {
        Self::Forbidden(message.into())
    }

    pub fn not_found(message: impl Into<String>) -> Self {
        Self::NotFound(message.into())
    }

    pub fn validation(message: impl Into<String>) -> Self {
        Self::Validation(message.into())
    }

    pub fn internal(message: impl Into<String>) -> Self {
        Self::Internal(message.into())
    }

    fn status(&self) -> StatusCode {
        match self {
            Self::Unauthorized(_) => StatusCode::UNAUTHORIZED,
            Self::Forbidden(_) => StatusCode::FORBIDDEN,
            Self::NotFound(_) => StatusCode::NOT_FOUND,
            Self::Validation(_) => StatusCode::UNPROCESSABLE_ENTITY,
            Self::Conflict(_) => StatusCode::CONFLICT,
            Self::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    fn code(&self) -> &'static str {
        match self {
            Self::Unauthorized(_) => error_common::codes::auth::UNAUTHENTICATED,
            Self::Forbidden(_) => error_common::codes::auth::INSUFFICIENT_PERMISSIONS,
            Self::NotFound(_) => error_common::codes::store::RECORD_NOT_FOUND,
            Self::Validation(_) => error_common::codes::validation::INVALID_INPUT,
            Self::Conflict(_) => error_common::codes::store::CONSTRAINT_VIOLATION,
            Self::Internal(_) => error_common::codes::system::INTERNAL,
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = self.status();
        if status.is_server_error() {
            tracing::error!(code = self.code(), error = %self, "request failed");
        }
        let body = ApiResponse::<()> {
            success: false,
            data: None,
            error: Some(ErrorBody {
                code: self.code().to_string(),
                message: self.to_string(),
            }),
        };
        (status, Json(body)).into_response()
    }
}

impl From<RehabDeskError> for ApiError {
    fn from(err: RehabDeskError) -> Self {
        match err {
            RehabDeskError::Unauthorized(msg) => Self::Unauthorized(msg),
            RehabDeskError::Forbidden(msg) => Self::Forbidden(msg),
            RehabDeskError::NotFound(msg) => Self::NotFound(msg),
            RehabDeskError::Validation(msg) => Self::Validation(msg),
            RehabDeskError::Conflict(msg) => Self::Conflict(msg),
            RehabDeskError::Storage(msg)
            | RehabDeskError::Config(msg)
            | RehabDeskError::Internal(msg) => Self::Internal(msg),
            RehabDeskError::Other(err) => Self::Internal(err.to_string()),
        }
    }
}

impl From<AccessError> for ApiError {
    fn from(err: AccessError) -> Self {
        RehabDeskError::from(err).into()
    }
}

impl From<record_store::StoreError> for ApiError {
    fn from(err: record_store::StoreError) -> Self {
        RehabDeskError::from(err).into()
    }
}

impl From<accounts_service::AccountsError> for ApiError {
    fn from(err: accounts_service::AccountsError) -> Self {
        RehabDeskError::from(err).into()
    }
}

impl From<payroll_service::PayrollError> for ApiError {
    fn from(err: payroll_service::PayrollError) -> Self {
        RehabDeskError::from(err).into()
    }
}

impl From<allowance_service::AllowanceError> for ApiError {
    fn from(err: allowance_service::AllowanceError) -> Self {
        RehabDeskError::from(err).into()
    }
}

/// Error payload inside the response envelope
#[derive(Debug, Serialize)]
pub struct ErrorBody {
    pub code: String,
    pub message: String,
}

/// Uniform response envelope
#[derive(Debug, Serialize)]
pub struct ApiResponse<T> {
    pub success: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub data: Option<T>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<ErrorBody>,
}

/// Wrap payload data in a success envelope
pub fn api_success<T>(data: T) -> ApiResponse<T> {
    ApiResponse {
        success: true,
        data: Some(data),
        error: None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn statuses_keep_the_taxonomy_distinct() {
        assert_eq!(
            ApiError::unauthorized("x").status(),
            StatusCode::UNAUTHORIZED
        );
        assert_eq!(ApiError::forbidden("x").status(), StatusCode::FORBIDDEN);
        assert_eq!(ApiError::not_found("x").status(), StatusCode::NOT_FOUND);
        assert_eq!(
            ApiError::validation("x").status(),
            StatusCode::UNPROCESSABLE_ENTITY
        );
    }

    #[test]
    fn access_errors_map_onto_the_right_statuses() {
        let unauthenticated: ApiError = AccessError::Unauthorized.into();
        assert_eq!(unauthenticated.status(), StatusCode::UNAUTHORIZED);

        let denied: ApiError = AccessError::Forbidden {
            required: "manage_patients".to_string(),
        }
        .into();
        assert_eq!(denied.status(), StatusCode::FORBIDDEN);
    }
}
