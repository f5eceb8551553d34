//! Authentication context extraction
//!
//! Identity is established by a fronting gateway which forwards the caller's
//! user id as a bearer token; this extractor resolves it against the user
//! store and builds the guard-facing caller identity. Token issuance and
//! credential handling live outside this service.

use crate::error::ApiError;
use crate::server::RehabDeskServer;
use auth_rbac::CallerIdentity;
use axum::async_trait;
use axum::extract::FromRequestParts;
use axum::http::header::AUTHORIZATION;
use axum::http::request::Parts;
use record_store::{User, UserRepository};
use tracing::debug;
use uuid::Uuid;

/// Authenticated caller attached to a request
///
/// Extraction fails with 401 when the header is missing or malformed, the
/// user is unknown, or the account is inactive, all before any handler
/// logic runs.
#[derive(Debug, Clone)]
pub struct AuthContext {
    pub user: User,
    pub caller: CallerIdentity,
}

impl AuthContext {
    pub fn caller(&self) -> Option<&CallerIdentity> {
        Some(&self.caller)
    }
}

#[async_trait]
impl FromRequestParts<RehabDeskServer> for AuthContext {
    type Rejection = ApiError;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &RehabDeskServer,
    ) -> Result<Self, Self::Rejection> {
        let header = parts
            .headers
            .get(AUTHORIZATION)
            .and_then(|value| value.to_str().ok())
            .ok_or_else(|| ApiError::unauthorized("missing Authorization header"))?;

        let token = header
            .strip_prefix("Bearer ")
            .ok_or_else(|| ApiError::unauthorized("Authorization header is not a bearer token"))?;

        let user_id = Uuid::parse_str(token.trim())
            .map_err(|_| ApiError::unauthorized("malformed bearer token"))?;

        let user = state
            .store
            .get_user(user_id)
            .await
            .map_err(|_| ApiError::unauthorized("unknown caller"))?;

        if !user.is_active {
            return Err(ApiError::unauthorized("account is inactive"));
        }

        debug!(user_id = %user.id, role = %user.role, "caller authenticated");
        let caller = user.caller_identity();
        Ok(Self { user, caller })
    }
}
