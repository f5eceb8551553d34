//! User administration handlers
//!
//! Roles come from the static authorization table; the stored permission
//! set holds per-user grants layered on top. Reading one's own record is
//! allowed without `view_users` (self-or-permission).

use axum::extract::{Path, State};
use axum::Json;
use chrono::Utc;
use serde::Deserialize;
use std::collections::HashSet;
use utoipa::ToSchema;
use uuid::Uuid;

use auth_rbac::{Permission, Role};
use record_store::{User, UserRepository};

use crate::error::{api_success, ApiError, ApiResponse};
use crate::middleware::AuthContext;
use crate::server::RehabDeskServer;
use crate::validation::RequestValidation;
use crate::{validate_field, validate_required};

/// Request to provision a user
#[derive(Debug, Deserialize, ToSchema)]
pub struct CreateUserRequest {
    pub username: String,
    pub display_name: String,
    #[schema(value_type = String)]
    pub role: Role,
    #[serde(default)]
    pub permissions: Vec<String>,
}

impl RequestValidation for CreateUserRequest {
    fn validate(&self) -> Result<(), ApiError> {
        validate_required!(self.username, "Username is required");
        validate_required!(self.display_name, "Display name is required");
        validate_field!(
            self.username,
            self.username.chars().all(|c| c.is_ascii_alphanumeric() || c == '_' || c == '.'),
            "Username may only contain letters, digits, underscores, and dots"
        );
        Ok(())
    }
}

/// Partial update to a user record
#[derive(Debug, Deserialize, Default, ToSchema)]
pub struct UpdateUserRequest {
    pub display_name: Option<String>,
    #[schema(value_type = Option<String>)]
    pub role: Option<Role>,
    pub permissions: Option<Vec<String>>,
    pub is_active: Option<bool>,
}

impl RequestValidation for UpdateUserRequest {
    fn validate(&self) -> Result<(), ApiError> {
        if let Some(ref name) = self.display_name {
            validate_required!(name, "Display name must not be empty");
        }
        Ok(())
    }
}

fn parse_permissions(tokens: &[String]) -> Result<HashSet<Permission>, ApiError> {
    tokens
        .iter()
        .map(|token| {
            Permission::parse(token)
                .ok_or_else(|| ApiError::validation(format!("unknown permission: {}", token)))
        })
        .collect()
}

/// List all users
#[utoipa::path(
    get,
    path = "/api/users",
    tag = "Users",
    responses(
        (status = 200, description = "All user records"),
        (status = 401, description = "Unauthorized"),
        (status = 403, description = "Forbidden"),
    ),
    security(("bearer_auth" = []))
)]
pub async fn list_users(
    State(server): State<RehabDeskServer>,
    ctx: AuthContext,
) -> Result<Json<ApiResponse<Vec<User>>>, ApiError> {
    server.guard.check(ctx.caller(), Permission::ViewUsers)?;
    Ok(Json(api_success(server.store.list_users().await?)))
}

/// Get a user; own record is readable without `view_users`
#[utoipa::path(
    get,
    path = "/api/users/{id}",
    tag = "Users",
    responses(
        (status = 200, description = "User record"),
        (status = 404, description = "User not found"),
    ),
    security(("bearer_auth" = []))
)]
pub async fn get_user(
    State(server): State<RehabDeskServer>,
    ctx: AuthContext,
    Path(id): Path<Uuid>,
) -> Result<Json<ApiResponse<User>>, ApiError> {
    server
        .guard
        .check_self_or(ctx.caller(), id, Permission::ViewUsers)?;
    Ok(Json(api_success(server.store.get_user(id).await?)))
}

/// Provision a user
#[utoipa::path(
    post,
    path = "/api/users",
    tag = "Users",
    responses(
        (status = 200, description = "User created"),
        (status = 409, description = "Username already taken"),
        (status = 422, description = "Invalid payload"),
    ),
    security(("bearer_auth" = []))
)]
pub async fn create_user(
    State(server): State<RehabDeskServer>,
    ctx: AuthContext,
    Json(req): Json<CreateUserRequest>,
) -> Result<Json<ApiResponse<User>>, ApiError> {
    req.validate()?;
    server.guard.check(ctx.caller(), Permission::ManageUsers)?;

    let permissions = parse_permissions(&req.permissions)?;
    let now = Utc::now();
    let user = User {
        id: Uuid::new_v4(),
        username: req.username,
        display_name: req.display_name,
        role: req.role,
        permissions,
        is_active: true,
        created_at: now,
        updated_at: now,
    };
    Ok(Json(api_success(server.store.create_user(user).await?)))
}

/// Update a user record
#[utoipa::path(
    put,
    path = "/api/users/{id}",
    tag = "Users",
    responses(
        (status = 200, description = "User updated"),
        (status = 404, description = "User not found"),
        (status = 422, description = "Invalid payload"),
    ),
    security(("bearer_auth" = []))
)]
pub async fn update_user(
    State(server): State<RehabDeskServer>,
    ctx: AuthContext,
    Path(id): Path<Uuid>,
    Json(req): Json<UpdateUserRequest>,
) -> Result<Json<ApiResponse<User>>, ApiError> {
    req.validate()?;
    server.guard.check(ctx.caller(), Permission::ManageUsers)?;

    let mut user = server.store.get_user(id).await?;
    if let Some(display_name) = req.display_name {
        user.display_name = display_name;
    }
    if let Some(role) = req.role {
        user.role = role;
    }
    if let Some(ref tokens) = req.permissions {
        user.permissions = parse_permissions(tokens)?;
    }
    if let Some(is_active) = req.is_active {
        user.is_active = is_active;
    }
    user.updated_at = Utc::now();
    Ok(Json(api_success(server.store.update_user(user).await?)))
}

/// Delete a user record
#[utoipa::path(
    delete,
    path = "/api/users/{id}",
    tag = "Users",
    responses(
        (status = 200, description = "User deleted"),
        (status = 404, description = "User not found"),
    ),
    security(("bearer_auth" = []))
)]
pub async fn delete_user(
    State(server): State<RehabDeskServer>,
    ctx: AuthContext,
    Path(id): Path<Uuid>,
) -> Result<Json<ApiResponse<()>>, ApiError> {
    server.guard.check(ctx.caller(), Permission::ManageUsers)?;
    if ctx.user.id == id {
        return Err(ApiError::Conflict(
            "cannot delete the account making the request".to_string(),
        ));
    }
    server.store.delete_user(id).await?;
    Ok(Json(api_success(())))
}
