//! Payroll, advance, bonus, and deduction handlers
//!
//! Derived figures never come from the wire: net salary and advance
//! installments are computed by the payroll services, and the stored values
//! are whatever those services derived.

use axum::extract::{Path, State};
use axum::Json;
use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::Deserialize;
use utoipa::ToSchema;
use uuid::Uuid;

use auth_rbac::Permission;
use payroll_service::{
    NewAdjustment, NewAdvance, NewPayroll, PayrollUpdate, MAX_REPAYMENT_MONTHS,
    MIN_REPAYMENT_MONTHS,
};
use record_store::{
    Advance, AdvanceRepository, Bonus, BonusRepository, Deduction, DeductionRepository, Payroll,
    PayrollRepository,
};

use crate::error::{api_success, ApiError, ApiResponse};
use crate::middleware::AuthContext;
use crate::server::RehabDeskServer;
use crate::validation::RequestValidation;
use crate::{validate_field, validate_non_negative, validate_positive, validate_range, validate_required};

/// Request to open a payroll record
#[derive(Debug, Deserialize, ToSchema)]
pub struct CreatePayrollRequest {
    pub staff_id: Uuid,
    pub period: String,
    pub base_salary: Decimal,
    #[serde(default)]
    pub bonuses: Decimal,
    #[serde(default)]
    pub advances: Decimal,
    #[serde(default)]
    pub deductions: Decimal,
}

impl RequestValidation for CreatePayrollRequest {
    fn validate(&self) -> Result<(), ApiError> {
        validate_field!(self.staff_id, !self.staff_id.is_nil(), "Staff reference is required");
        validate_required!(self.period, "Period is required");
        validate_non_negative!(self.base_salary, "Base salary must not be negative");
        validate_non_negative!(self.bonuses, "Bonuses must not be negative");
        validate_non_negative!(self.advances, "Advances must not be negative");
        validate_non_negative!(self.deductions, "Deductions must not be negative");
        Ok(())
    }
}

/// Partial update to a pending payroll record
#[derive(Debug, Deserialize, Default, ToSchema)]
pub struct UpdatePayrollRequest {
    pub base_salary: Option<Decimal>,
    pub bonuses: Option<Decimal>,
    pub advances: Option<Decimal>,
    pub deductions: Option<Decimal>,
}

impl RequestValidation for UpdatePayrollRequest {
    fn validate(&self) -> Result<(), ApiError> {
        for (value, label) in [
            (self.base_salary, "Base salary"),
            (self.bonuses, "Bonuses"),
            (self.advances, "Advances"),
            (self.deductions, "Deductions"),
        ] {
            if let Some(value) = value {
                validate_non_negative!(value, format!("{} must not be negative", label));
            }
        }
        Ok(())
    }
}

/// Request for a salary advance
#[derive(Debug, Deserialize, ToSchema)]
pub struct CreateAdvanceRequest {
    pub staff_id: Uuid,
    pub amount: Decimal,
    pub repayment_months: u32,
}

impl RequestValidation for CreateAdvanceRequest {
    fn validate(&self) -> Result<(), ApiError> {
        validate_field!(self.staff_id, !self.staff_id.is_nil(), "Staff reference is required");
        validate_positive!(self.amount, "Amount must be greater than zero");
        validate_range!(
            self.repayment_months,
            MIN_REPAYMENT_MONTHS,
            MAX_REPAYMENT_MONTHS,
            "Repayment months must be between 1 and 24"
        );
        Ok(())
    }
}

/// Request for a one-off bonus or deduction
#[derive(Debug, Deserialize, ToSchema)]
pub struct CreateAdjustmentRequest {
    pub staff_id: Uuid,
    pub amount: Decimal,
    pub reason: String,
    pub date: Option<DateTime<Utc>>,
}

impl RequestValidation for CreateAdjustmentRequest {
    fn validate(&self) -> Result<(), ApiError> {
        validate_field!(self.staff_id, !self.staff_id.is_nil(), "Staff reference is required");
        validate_positive!(self.amount, "Amount must be greater than zero");
        validate_required!(self.reason, "Reason is required");
        Ok(())
    }
}

impl CreateAdjustmentRequest {
    fn into_adjustment(self) -> NewAdjustment {
        NewAdjustment {
            staff_id: self.staff_id,
            amount: self.amount,
            reason: self.reason,
            date: self.date.unwrap_or_else(Utc::now),
        }
    }
}

/// List every payroll record
#[utoipa::path(
    get,
    path = "/api/payroll",
    tag = "Payroll",
    responses(
        (status = 200, description = "All payroll records"),
        (status = 401, description = "Unauthorized"),
        (status = 403, description = "Forbidden"),
    ),
    security(("bearer_auth" = []))
)]
pub async fn list_payrolls(
    State(server): State<RehabDeskServer>,
    ctx: AuthContext,
) -> Result<Json<ApiResponse<Vec<Payroll>>>, ApiError> {
    server.guard.check(ctx.caller(), Permission::ViewPayroll)?;
    Ok(Json(api_success(server.store.list_payrolls().await?)))
}

/// List payroll records for one staff member
#[utoipa::path(
    get,
    path = "/api/staff/{id}/payroll",
    tag = "Payroll",
    responses(
        (status = 200, description = "Payroll records for the staff member"),
    ),
    security(("bearer_auth" = []))
)]
pub async fn list_staff_payrolls(
    State(server): State<RehabDeskServer>,
    ctx: AuthContext,
    Path(id): Path<Uuid>,
) -> Result<Json<ApiResponse<Vec<Payroll>>>, ApiError> {
    server.guard.check(ctx.caller(), Permission::ViewPayroll)?;
    Ok(Json(api_success(
        server.store.list_payrolls_by_staff(id).await?,
    )))
}

/// Open a payroll record with a derived net salary
#[utoipa::path(
    post,
    path = "/api/payroll",
    tag = "Payroll",
    responses(
        (status = 200, description = "Payroll record created"),
        (status = 422, description = "Invalid payload"),
    ),
    security(("bearer_auth" = []))
)]
pub async fn create_payroll(
    State(server): State<RehabDeskServer>,
    ctx: AuthContext,
    Json(req): Json<CreatePayrollRequest>,
) -> Result<Json<ApiResponse<Payroll>>, ApiError> {
    req.validate()?;
    server.guard.check(ctx.caller(), Permission::ManagePayroll)?;

    let payroll = server
        .payroll
        .create(NewPayroll {
            staff_id: req.staff_id,
            period: req.period,
            base_salary: req.base_salary,
            bonuses: req.bonuses,
            advances: req.advances,
            deductions: req.deductions,
        })
        .await?;
    Ok(Json(api_success(payroll)))
}

/// Update a pending payroll record, recomputing its net salary
#[utoipa::path(
    put,
    path = "/api/payroll/{id}",
    tag = "Payroll",
    responses(
        (status = 200, description = "Payroll record updated"),
        (status = 404, description = "Payroll record not found"),
        (status = 409, description = "Record is not pending"),
    ),
    security(("bearer_auth" = []))
)]
pub async fn update_payroll(
    State(server): State<RehabDeskServer>,
    ctx: AuthContext,
    Path(id): Path<Uuid>,
    Json(req): Json<UpdatePayrollRequest>,
) -> Result<Json<ApiResponse<Payroll>>, ApiError> {
    req.validate()?;
    server.guard.check(ctx.caller(), Permission::ManagePayroll)?;

    let payroll = server
        .payroll
        .update(
            id,
            PayrollUpdate {
                base_salary: req.base_salary,
                bonuses: req.bonuses,
                advances: req.advances,
                deductions: req.deductions,
            },
        )
        .await?;
    Ok(Json(api_success(payroll)))
}

/// Mark a pending payroll record as paid
#[utoipa::path(
    post,
    path = "/api/payroll/{id}/mark-paid",
    tag = "Payroll",
    responses(
        (status = 200, description = "Payroll record paid"),
        (status = 409, description = "Record is not pending"),
    ),
    security(("bearer_auth" = []))
)]
pub async fn mark_payroll_paid(
    State(server): State<RehabDeskServer>,
    ctx: AuthContext,
    Path(id): Path<Uuid>,
) -> Result<Json<ApiResponse<Payroll>>, ApiError> {
    server.guard.check(ctx.caller(), Permission::ManagePayroll)?;
    Ok(Json(api_success(server.payroll.mark_paid(id).await?)))
}

/// Cancel a pending payroll record
#[utoipa::path(
    post,
    path = "/api/payroll/{id}/cancel",
    tag = "Payroll",
    responses(
        (status = 200, description = "Payroll record cancelled"),
        (status = 409, description = "Record is not pending"),
    ),
    security(("bearer_auth" = []))
)]
pub async fn cancel_payroll(
    State(server): State<RehabDeskServer>,
    ctx: AuthContext,
    Path(id): Path<Uuid>,
) -> Result<Json<ApiResponse<Payroll>>, ApiError> {
    server.guard.check(ctx.caller(), Permission::ManagePayroll)?;
    Ok(Json(api_success(server.payroll.cancel(id).await?)))
}

/// List advances for one staff member
#[utoipa::path(
    get,
    path = "/api/staff/{id}/advances",
    tag = "Advances",
    responses(
        (status = 200, description = "Advances for the staff member"),
    ),
    security(("bearer_auth" = []))
)]
pub async fn list_staff_advances(
    State(server): State<RehabDeskServer>,
    ctx: AuthContext,
    Path(id): Path<Uuid>,
) -> Result<Json<ApiResponse<Vec<Advance>>>, ApiError> {
    server.guard.check(ctx.caller(), Permission::ViewPayroll)?;
    Ok(Json(api_success(
        server.store.list_advances_by_staff(id).await?,
    )))
}

/// Request a salary advance
#[utoipa::path(
    post,
    path = "/api/advances",
    tag = "Advances",
    responses(
        (status = 200, description = "Advance requested"),
        (status = 422, description = "Invalid payload"),
    ),
    security(("bearer_auth" = []))
)]
pub async fn request_advance(
    State(server): State<RehabDeskServer>,
    ctx: AuthContext,
    Json(req): Json<CreateAdvanceRequest>,
) -> Result<Json<ApiResponse<Advance>>, ApiError> {
    req.validate()?;
    server.guard.check(ctx.caller(), Permission::ManagePayroll)?;

    let advance = server
        .advances
        .request(NewAdvance {
            staff_id: req.staff_id,
            amount: req.amount,
            repayment_months: req.repayment_months,
        })
        .await?;
    Ok(Json(api_success(advance)))
}

/// Approve a pending advance
#[utoipa::path(
    post,
    path = "/api/advances/{id}/approve",
    tag = "Advances",
    responses(
        (status = 200, description = "Advance approved"),
        (status = 409, description = "Advance is not pending"),
    ),
    security(("bearer_auth" = []))
)]
pub async fn approve_advance(
    State(server): State<RehabDeskServer>,
    ctx: AuthContext,
    Path(id): Path<Uuid>,
) -> Result<Json<ApiResponse<Advance>>, ApiError> {
    server.guard.check(ctx.caller(), Permission::ManagePayroll)?;
    Ok(Json(api_success(server.advances.approve(id).await?)))
}

/// Reject a pending advance
#[utoipa::path(
    post,
    path = "/api/advances/{id}/reject",
    tag = "Advances",
    responses(
        (status = 200, description = "Advance rejected"),
        (status = 409, description = "Advance is not pending"),
    ),
    security(("bearer_auth" = []))
)]
pub async fn reject_advance(
    State(server): State<RehabDeskServer>,
    ctx: AuthContext,
    Path(id): Path<Uuid>,
) -> Result<Json<ApiResponse<Advance>>, ApiError> {
    server.guard.check(ctx.caller(), Permission::ManagePayroll)?;
    Ok(Json(api_success(server.advances.reject(id).await?)))
}

/// List bonuses for one staff member
#[utoipa::path(
    get,
    path = "/api/staff/{id}/bonuses",
    tag = "Adjustments",
    responses(
        (status = 200, description = "Bonuses for the staff member"),
    ),
    security(("bearer_auth" = []))
)]
pub async fn list_staff_bonuses(
    State(server): State<RehabDeskServer>,
    ctx: AuthContext,
    Path(id): Path<Uuid>,
) -> Result<Json<ApiResponse<Vec<Bonus>>>, ApiError> {
    server.guard.check(ctx.caller(), Permission::ViewPayroll)?;
    Ok(Json(api_success(
        server.store.list_bonuses_by_staff(id).await?,
    )))
}

/// List deductions for one staff member
#[utoipa::path(
    get,
    path = "/api/staff/{id}/deductions",
    tag = "Adjustments",
    responses(
        (status = 200, description = "Deductions for the staff member"),
    ),
    security(("bearer_auth" = []))
)]
pub async fn list_staff_deductions(
    State(server): State<RehabDeskServer>,
    ctx: AuthContext,
    Path(id): Path<Uuid>,
) -> Result<Json<ApiResponse<Vec<Deduction>>>, ApiError> {
    server.guard.check(ctx.caller(), Permission::ViewPayroll)?;
    Ok(Json(api_success(
        server.store.list_deductions_by_staff(id).await?,
    )))
}

/// Grant a one-off bonus
#[utoipa::path(
    post,
    path = "/api/bonuses",
    tag = "Adjustments",
    responses(
        (status = 200, description = "Bonus granted"),
        (status = 422, description = "Invalid payload"),
    ),
    security(("bearer_auth" = []))
)]
pub async fn grant_bonus(
    State(server): State<RehabDeskServer>,
    ctx: AuthContext,
    Json(req): Json<CreateAdjustmentRequest>,
) -> Result<Json<ApiResponse<Bonus>>, ApiError> {
    req.validate()?;
    server.guard.check(ctx.caller(), Permission::ManagePayroll)?;
    Ok(Json(api_success(
        server.compensation.grant_bonus(req.into_adjustment()).await?,
    )))
}

/// Record a one-off deduction
#[utoipa::path(
    post,
    path = "/api/deductions",
    tag = "Adjustments",
    responses(
        (status = 200, description = "Deduction recorded"),
        (status = 422, description = "Invalid payload"),
    ),
    security(("bearer_auth" = []))
)]
pub async fn record_deduction(
    State(server): State<RehabDeskServer>,
    ctx: AuthContext,
    Json(req): Json<CreateAdjustmentRequest>,
) -> Result<Json<ApiResponse<Deduction>>, ApiError> {
    req.validate()?;
    server.guard.check(ctx.caller(), Permission::ManagePayroll)?;
    Ok(Json(api_success(
        server
            .compensation
            .record_deduction(req.into_adjustment())
            .await?,
    )))
}

/// Delete a bonus record
#[utoipa::path(
    delete,
    path = "/api/bonuses/{id}",
    tag = "Adjustments",
    responses(
        (status = 200, description = "Bonus deleted"),
        (status = 404, description = "Bonus not found"),
    ),
    security(("bearer_auth" = []))
)]
pub async fn delete_bonus(
    State(server): State<RehabDeskServer>,
    ctx: AuthContext,
    Path(id): Path<Uuid>,
) -> Result<Json<ApiResponse<()>>, ApiError> {
    server.guard.check(ctx.caller(), Permission::ManagePayroll)?;
    server.store.delete_bonus(id).await?;
    Ok(Json(api_success(())))
}

/// Delete a deduction record
#[utoipa::path(
    delete,
    path = "/api/deductions/{id}",
    tag = "Adjustments",
    responses(
        (status = 200, description = "Deduction deleted"),
        (status = 404, description = "Deduction not found"),
    ),
    security(("bearer_auth" = []))
)]
pub async fn delete_deduction(
    State(server): State<RehabDeskServer>,
    ctx: AuthContext,
    Path(id): Path<Uuid>,
) -> Result<Json<ApiResponse<()>>, ApiError> {
    server.guard.check(ctx.caller(), Permission::ManagePayroll)?;
    server.store.delete_deduction(id).await?;
    Ok(Json(api_success(())))
}
