//! Staff management handlers

use axum::extract::{Path, State};
use axum::Json;
use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::Deserialize;
use utoipa::ToSchema;
use uuid::Uuid;

use auth_rbac::Permission;
use record_store::{CigaretteType, Staff, StaffRepository};

use crate::error::{api_success, ApiError, ApiResponse};
use crate::middleware::AuthContext;
use crate::server::RehabDeskServer;
use crate::validation::RequestValidation;
use crate::{validate_field, validate_non_negative, validate_required};

/// Request to hire a staff member
#[derive(Debug, Deserialize, ToSchema)]
pub struct CreateStaffRequest {
    pub full_name: String,
    pub position: String,
    pub monthly_salary: Decimal,
    #[serde(default)]
    #[schema(value_type = String)]
    pub cigarette_type: CigaretteType,
    pub daily_cigarette_cost: Option<Decimal>,
    pub hired_at: Option<DateTime<Utc>>,
}

impl RequestValidation for CreateStaffRequest {
    fn validate(&self) -> Result<(), ApiError> {
        validate_required!(self.full_name, "Full name is required");
        validate_required!(self.position, "Position is required");
        validate_non_negative!(self.monthly_salary, "Monthly salary must not be negative");
        if let Some(cost) = self.daily_cigarette_cost {
            validate_non_negative!(cost, "Daily cigarette cost must not be negative");
        }
        Ok(())
    }
}

/// Partial update to a staff record
#[derive(Debug, Deserialize, Default, ToSchema)]
pub struct UpdateStaffRequest {
    pub full_name: Option<String>,
    pub position: Option<String>,
    pub monthly_salary: Option<Decimal>,
    #[schema(value_type = Option<String>)]
    pub cigarette_type: Option<CigaretteType>,
    pub daily_cigarette_cost: Option<Decimal>,
    pub is_active: Option<bool>,
}

impl RequestValidation for UpdateStaffRequest {
    fn validate(&self) -> Result<(), ApiError> {
        if let Some(ref name) = self.full_name {
            validate_required!(name, "Full name must not be empty");
        }
        if let Some(salary) = self.monthly_salary {
            validate_non_negative!(salary, "Monthly salary must not be negative");
        }
        if let Some(cost) = self.daily_cigarette_cost {
            validate_non_negative!(cost, "Daily cigarette cost must not be negative");
        }
        Ok(())
    }
}

/// List all staff
#[utoipa::path(
    get,
    path = "/api/staff",
    tag = "Staff",
    responses(
        (status = 200, description = "All staff records"),
        (status = 401, description = "Unauthorized"),
        (status = 403, description = "Forbidden"),
    ),
    security(("bearer_auth" = []))
)]
pub async fn list_staff(
    State(server): State<RehabDeskServer>,
    ctx: AuthContext,
) -> Result<Json<ApiResponse<Vec<Staff>>>, ApiError> {
    server.guard.check(ctx.caller(), Permission::ViewStaff)?;
    Ok(Json(api_success(server.store.list_staff().await?)))
}

/// List active staff
#[utoipa::path(
    get,
    path = "/api/staff/active",
    tag = "Staff",
    responses(
        (status = 200, description = "Active staff records"),
    ),
    security(("bearer_auth" = []))
)]
pub async fn list_active_staff(
    State(server): State<RehabDeskServer>,
    ctx: AuthContext,
) -> Result<Json<ApiResponse<Vec<Staff>>>, ApiError> {
    server.guard.check(ctx.caller(), Permission::ViewStaff)?;
    Ok(Json(api_success(server.store.list_active_staff().await?)))
}

/// Get a single staff member
#[utoipa::path(
    get,
    path = "/api/staff/{id}",
    tag = "Staff",
    responses(
        (status = 200, description = "Staff record"),
        (status = 404, description = "Staff member not found"),
    ),
    security(("bearer_auth" = []))
)]
pub async fn get_staff(
    State(server): State<RehabDeskServer>,
    ctx: AuthContext,
    Path(id): Path<Uuid>,
) -> Result<Json<ApiResponse<Staff>>, ApiError> {
    server.guard.check(ctx.caller(), Permission::ViewStaff)?;
    Ok(Json(api_success(server.store.get_staff(id).await?)))
}

/// Hire a staff member
#[utoipa::path(
    post,
    path = "/api/staff",
    tag = "Staff",
    responses(
        (status = 200, description = "Staff member hired"),
        (status = 422, description = "Invalid payload"),
    ),
    security(("bearer_auth" = []))
)]
pub async fn create_staff(
    State(server): State<RehabDeskServer>,
    ctx: AuthContext,
    Json(req): Json<CreateStaffRequest>,
) -> Result<Json<ApiResponse<Staff>>, ApiError> {
    req.validate()?;
    server.guard.check(ctx.caller(), Permission::ManageStaff)?;

    let now = Utc::now();
    let staff = Staff {
        id: Uuid::new_v4(),
        full_name: req.full_name,
        position: req.position,
        monthly_salary: req.monthly_salary,
        cigarette_type: req.cigarette_type,
        daily_cigarette_cost: req.daily_cigarette_cost,
        hired_at: req.hired_at.unwrap_or(now),
        is_active: true,
        created_at: now,
        updated_at: now,
    };
    Ok(Json(api_success(server.store.create_staff(staff).await?)))
}

/// Update a staff record
#[utoipa::path(
    put,
    path = "/api/staff/{id}",
    tag = "Staff",
    responses(
        (status = 200, description = "Staff record updated"),
        (status = 404, description = "Staff member not found"),
        (status = 422, description = "Invalid payload"),
    ),
    security(("bearer_auth" = []))
)]
pub async fn update_staff(
    State(server): State<RehabDeskServer>,
    ctx: AuthContext,
    Path(id): Path<Uuid>,
    Json(req): Json<UpdateStaffRequest>,
) -> Result<Json<ApiResponse<Staff>>, ApiError> {
    req.validate()?;
    server.guard.check(ctx.caller(), Permission::ManageStaff)?;

    let mut staff = server.store.get_staff(id).await?;
    if let Some(full_name) = req.full_name {
        staff.full_name = full_name;
    }
    if let Some(position) = req.position {
        staff.position = position;
    }
    if let Some(monthly_salary) = req.monthly_salary {
        staff.monthly_salary = monthly_salary;
    }
    if let Some(cigarette_type) = req.cigarette_type {
        staff.cigarette_type = cigarette_type;
    }
    if let Some(cost) = req.daily_cigarette_cost {
        staff.daily_cigarette_cost = Some(cost);
    }
    if let Some(is_active) = req.is_active {
        staff.is_active = is_active;
    }
    staff.updated_at = Utc::now();
    Ok(Json(api_success(server.store.update_staff(staff).await?)))
}

/// Delete a staff record
#[utoipa::path(
    delete,
    path = "/api/staff/{id}",
    tag = "Staff",
    responses(
        (status = 200, description = "Staff record deleted"),
        (status = 404, description = "Staff member not found"),
    ),
    security(("bearer_auth" = []))
)]
pub async fn delete_staff(
    State(server): State<RehabDeskServer>,
    ctx: AuthContext,
    Path(id): Path<Uuid>,
) -> Result<Json<ApiResponse<()>>, ApiError> {
    server.guard.check(ctx.caller(), Permission::ManageStaff)?;
    server.store.delete_staff(id).await?;
    Ok(Json(api_success(())))
}
