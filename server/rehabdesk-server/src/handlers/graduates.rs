//! Graduate roster handlers
//!
//! Graduates left the program but can stay on the daily allowance list;
//! the roster feeds the allowance report alongside patients and staff.

use axum::extract::{Path, State};
use axum::Json;
use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::Deserialize;
use utoipa::ToSchema;
use uuid::Uuid;

use auth_rbac::Permission;
use record_store::{CigaretteType, Graduate, GraduateRepository};

use crate::error::{api_success, ApiError, ApiResponse};
use crate::middleware::AuthContext;
use crate::server::RehabDeskServer;
use crate::validation::RequestValidation;
use crate::{validate_field, validate_non_negative, validate_required};

/// Request to add a graduate to the roster
#[derive(Debug, Deserialize, ToSchema)]
pub struct CreateGraduateRequest {
    pub full_name: String,
    #[serde(default)]
    #[schema(value_type = String)]
    pub cigarette_type: CigaretteType,
    pub daily_cigarette_cost: Option<Decimal>,
    pub graduated_at: Option<DateTime<Utc>>,
}

impl RequestValidation for CreateGraduateRequest {
    fn validate(&self) -> Result<(), ApiError> {
        validate_required!(self.full_name, "Full name is required");
        if let Some(cost) = self.daily_cigarette_cost {
            validate_non_negative!(cost, "Daily cigarette cost must not be negative");
        }
        Ok(())
    }
}

/// Partial update to a graduate record
#[derive(Debug, Deserialize, Default, ToSchema)]
pub struct UpdateGraduateRequest {
    pub full_name: Option<String>,
    #[schema(value_type = Option<String>)]
    pub cigarette_type: Option<CigaretteType>,
    pub daily_cigarette_cost: Option<Decimal>,
    pub is_active: Option<bool>,
}

impl RequestValidation for UpdateGraduateRequest {
    fn validate(&self) -> Result<(), ApiError> {
        if let Some(ref name) = self.full_name {
            validate_required!(name, "Full name must not be empty");
        }
        if let Some(cost) = self.daily_cigarette_cost {
            validate_non_negative!(cost, "Daily cigarette cost must not be negative");
        }
        Ok(())
    }
}

/// List all graduates
#[utoipa::path(
    get,
    path = "/api/graduates",
    tag = "Graduates",
    responses(
        (status = 200, description = "All graduate records"),
        (status = 401, description = "Unauthorized"),
        (status = 403, description = "Forbidden"),
    ),
    security(("bearer_auth" = []))
)]
pub async fn list_graduates(
    State(server): State<RehabDeskServer>,
    ctx: AuthContext,
) -> Result<Json<ApiResponse<Vec<Graduate>>>, ApiError> {
    server.guard.check(ctx.caller(), Permission::ViewPatients)?;
    Ok(Json(api_success(server.store.list_graduates().await?)))
}

/// List graduates still drawing an allowance
#[utoipa::path(
    get,
    path = "/api/graduates/active",
    tag = "Graduates",
    responses(
        (status = 200, description = "Active graduate records"),
    ),
    security(("bearer_auth" = []))
)]
pub async fn list_active_graduates(
    State(server): State<RehabDeskServer>,
    ctx: AuthContext,
) -> Result<Json<ApiResponse<Vec<Graduate>>>, ApiError> {
    server.guard.check(ctx.caller(), Permission::ViewPatients)?;
    Ok(Json(api_success(
        server.store.list_active_graduates().await?,
    )))
}

/// Add a graduate to the roster
#[utoipa::path(
    post,
    path = "/api/graduates",
    tag = "Graduates",
    responses(
        (status = 200, description = "Graduate added"),
        (status = 422, description = "Invalid payload"),
    ),
    security(("bearer_auth" = []))
)]
pub async fn create_graduate(
    State(server): State<RehabDeskServer>,
    ctx: AuthContext,
    Json(req): Json<CreateGraduateRequest>,
) -> Result<Json<ApiResponse<Graduate>>, ApiError> {
    req.validate()?;
    server.guard.check(ctx.caller(), Permission::ManagePatients)?;

    let now = Utc::now();
    let graduate = Graduate {
        id: Uuid::new_v4(),
        full_name: req.full_name,
        cigarette_type: req.cigarette_type,
        daily_cigarette_cost: req.daily_cigarette_cost,
        graduated_at: req.graduated_at.unwrap_or(now),
        is_active: true,
        created_at: now,
        updated_at: now,
    };
    Ok(Json(api_success(
        server.store.create_graduate(graduate).await?,
    )))
}

/// Update a graduate record
#[utoipa::path(
    put,
    path = "/api/graduates/{id}",
    tag = "Graduates",
    responses(
        (status = 200, description = "Graduate updated"),
        (status = 404, description = "Graduate not found"),
        (status = 422, description = "Invalid payload"),
    ),
    security(("bearer_auth" = []))
)]
pub async fn update_graduate(
    State(server): State<RehabDeskServer>,
    ctx: AuthContext,
    Path(id): Path<Uuid>,
    Json(req): Json<UpdateGraduateRequest>,
) -> Result<Json<ApiResponse<Graduate>>, ApiError> {
    req.validate()?;
    server.guard.check(ctx.caller(), Permission::ManagePatients)?;

    let mut graduate = server.store.get_graduate(id).await?;
    if let Some(full_name) = req.full_name {
        graduate.full_name = full_name;
    }
    if let Some(cigarette_type) = req.cigarette_type {
        graduate.cigarette_type = cigarette_type;
    }
    if let Some(cost) = req.daily_cigarette_cost {
        graduate.daily_cigarette_cost = Some(cost);
    }
    if let Some(is_active) = req.is_active {
        graduate.is_active = is_active;
    }
    graduate.updated_at = Utc::now();
    Ok(Json(api_success(
        server.store.update_graduate(graduate).await?,
    )))
}

/// Delete a graduate record
#[utoipa::path(
    delete,
    path = "/api/graduates/{id}",
    tag = "Graduates",
    responses(
        (status = 200, description = "Graduate deleted"),
        (status = 404, description = "Graduate not found"),
    ),
    security(("bearer_auth" = []))
)]
pub async fn delete_graduate(
    State(server): State<RehabDeskServer>,
    ctx: AuthContext,
    Path(id): Path<Uuid>,
) -> Result<Json<ApiResponse<()>>, ApiError> {
    server.guard.check(ctx.caller(), Permission::ManagePatients)?;
    server.store.delete_graduate(id).await?;
    Ok(Json(api_success(())))
}
