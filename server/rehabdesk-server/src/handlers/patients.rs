//! Patient admission handlers
//!
//! Admission, discharge, and the financial account view of a stay. Every
//! route validates its payload, then clears the guard, then touches the
//! store; denial short-circuits before any record is read.

use axum::extract::{Path, State};
use axum::Json;
use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::Deserialize;
use utoipa::ToSchema;
use uuid::Uuid;

use accounts_service::AccountSummary;
use auth_rbac::Permission;
use record_store::{CigaretteType, Patient, PatientRepository, PatientStatus};

use crate::error::{api_success, ApiError, ApiResponse};
use crate::middleware::AuthContext;
use crate::server::RehabDeskServer;
use crate::validation::RequestValidation;
use crate::{validate_field, validate_non_negative, validate_required};

/// Request to admit a new patient
#[derive(Debug, Deserialize, ToSchema)]
pub struct CreatePatientRequest {
    pub full_name: String,
    pub admission_date: Option<DateTime<Utc>>,
    pub daily_cost: Decimal,
    #[serde(default)]
    #[schema(value_type = String)]
    pub cigarette_type: CigaretteType,
    pub daily_cigarette_cost: Option<Decimal>,
    pub notes: Option<String>,
}

impl RequestValidation for CreatePatientRequest {
    fn validate(&self) -> Result<(), ApiError> {
        validate_required!(self.full_name, "Full name is required");
        validate_non_negative!(self.daily_cost, "Daily cost must not be negative");
        if let Some(cost) = self.daily_cigarette_cost {
            validate_non_negative!(cost, "Daily cigarette cost must not be negative");
        }
        Ok(())
    }
}

/// Partial update to a patient record
#[derive(Debug, Deserialize, Default, ToSchema)]
pub struct UpdatePatientRequest {
    pub full_name: Option<String>,
    pub admission_date: Option<DateTime<Utc>>,
    pub daily_cost: Option<Decimal>,
    #[schema(value_type = Option<String>)]
    pub cigarette_type: Option<CigaretteType>,
    pub daily_cigarette_cost: Option<Decimal>,
    pub notes: Option<String>,
}

impl RequestValidation for UpdatePatientRequest {
    fn validate(&self) -> Result<(), ApiError> {
        if let Some(ref name) = self.full_name {
            validate_required!(name, "Full name must not be empty");
        }
        if let Some(cost) = self.daily_cost {
            validate_non_negative!(cost, "Daily cost must not be negative");
        }
        if let Some(cost) = self.daily_cigarette_cost {
            validate_non_negative!(cost, "Daily cigarette cost must not be negative");
        }
        Ok(())
    }
}

/// Optional discharge parameters
#[derive(Debug, Deserialize, Default, ToSchema)]
pub struct DischargeRequest {
    pub discharge_date: Option<DateTime<Utc>>,
}

/// List all patients
#[utoipa::path(
    get,
    path = "/api/patients",
    tag = "Patients",
    responses(
        (status = 200, description = "All patient records"),
        (status = 401, description = "Unauthorized"),
        (status = 403, description = "Forbidden"),
    ),
    security(("bearer_auth" = []))
)]
pub async fn list_patients(
    State(server): State<RehabDeskServer>,
    ctx: AuthContext,
) -> Result<Json<ApiResponse<Vec<Patient>>>, ApiError> {
    server.guard.check(ctx.caller(), Permission::ViewPatients)?;
    Ok(Json(api_success(server.store.list_patients().await?)))
}

/// List currently admitted patients
#[utoipa::path(
    get,
    path = "/api/patients/active",
    tag = "Patients",
    responses(
        (status = 200, description = "Active patient records"),
        (status = 401, description = "Unauthorized"),
        (status = 403, description = "Forbidden"),
    ),
    security(("bearer_auth" = []))
)]
pub async fn list_active_patients(
    State(server): State<RehabDeskServer>,
    ctx: AuthContext,
) -> Result<Json<ApiResponse<Vec<Patient>>>, ApiError> {
    server.guard.check(ctx.caller(), Permission::ViewPatients)?;
    Ok(Json(api_success(server.store.list_active_patients().await?)))
}

/// Get a single patient
#[utoipa::path(
    get,
    path = "/api/patients/{id}",
    tag = "Patients",
    responses(
        (status = 200, description = "Patient record"),
        (status = 404, description = "Patient not found"),
    ),
    security(("bearer_auth" = []))
)]
pub async fn get_patient(
    State(server): State<RehabDeskServer>,
    ctx: AuthContext,
    Path(id): Path<Uuid>,
) -> Result<Json<ApiResponse<Patient>>, ApiError> {
    server.guard.check(ctx.caller(), Permission::ViewPatients)?;
    Ok(Json(api_success(server.store.get_patient(id).await?)))
}

/// Admit a patient
#[utoipa::path(
    post,
    path = "/api/patients",
    tag = "Patients",
    responses(
        (status = 200, description = "Patient admitted"),
        (status = 422, description = "Invalid payload"),
    ),
    security(("bearer_auth" = []))
)]
pub async fn create_patient(
    State(server): State<RehabDeskServer>,
    ctx: AuthContext,
    Json(req): Json<CreatePatientRequest>,
) -> Result<Json<ApiResponse<Patient>>, ApiError> {
    req.validate()?;
    server.guard.check(ctx.caller(), Permission::ManagePatients)?;

    let now = Utc::now();
    let patient = Patient {
        id: Uuid::new_v4(),
        full_name: req.full_name,
        admission_date: req.admission_date.unwrap_or(now),
        discharge_date: None,
        daily_cost: req.daily_cost,
        cigarette_type: req.cigarette_type,
        daily_cigarette_cost: req.daily_cigarette_cost,
        status: PatientStatus::Active,
        total_paid: Decimal::ZERO,
        notes: req.notes,
        created_at: now,
        updated_at: now,
    };
    Ok(Json(api_success(server.store.create_patient(patient).await?)))
}

/// Update a patient record
#[utoipa::path(
    put,
    path = "/api/patients/{id}",
    tag = "Patients",
    responses(
        (status = 200, description = "Patient updated"),
        (status = 404, description = "Patient not found"),
        (status = 422, description = "Invalid payload"),
    ),
    security(("bearer_auth" = []))
)]
pub async fn update_patient(
    State(server): State<RehabDeskServer>,
    ctx: AuthContext,
    Path(id): Path<Uuid>,
    Json(req): Json<UpdatePatientRequest>,
) -> Result<Json<ApiResponse<Patient>>, ApiError> {
    req.validate()?;
    server.guard.check(ctx.caller(), Permission::ManagePatients)?;

    let mut patient = server.store.get_patient(id).await?;
    if let Some(full_name) = req.full_name {
        patient.full_name = full_name;
    }
    if let Some(admission_date) = req.admission_date {
        patient.admission_date = admission_date;
    }
    if let Some(daily_cost) = req.daily_cost {
        patient.daily_cost = daily_cost;
    }
    if let Some(cigarette_type) = req.cigarette_type {
        patient.cigarette_type = cigarette_type;
    }
    if let Some(cost) = req.daily_cigarette_cost {
        patient.daily_cigarette_cost = Some(cost);
    }
    if let Some(notes) = req.notes {
        patient.notes = Some(notes);
    }
    patient.updated_at = Utc::now();
    Ok(Json(api_success(server.store.update_patient(patient).await?)))
}

/// Discharge a patient, freezing the account at the discharge instant
#[utoipa::path(
    post,
    path = "/api/patients/{id}/discharge",
    tag = "Patients",
    responses(
        (status = 200, description = "Patient discharged"),
        (status = 404, description = "Patient not found"),
    ),
    security(("bearer_auth" = []))
)]
pub async fn discharge_patient(
    State(server): State<RehabDeskServer>,
    ctx: AuthContext,
    Path(id): Path<Uuid>,
    req: Option<Json<DischargeRequest>>,
) -> Result<Json<ApiResponse<Patient>>, ApiError> {
    server.guard.check(ctx.caller(), Permission::ManagePatients)?;

    let mut patient = server.store.get_patient(id).await?;
    if patient.status == PatientStatus::Discharged {
        return Err(ApiError::Conflict(format!(
            "patient {} is already discharged",
            id
        )));
    }
    let discharge_date = req
        .and_then(|Json(body)| body.discharge_date)
        .unwrap_or_else(Utc::now);
    patient.discharge_date = Some(discharge_date);
    patient.status = PatientStatus::Discharged;
    patient.updated_at = Utc::now();
    Ok(Json(api_success(server.store.update_patient(patient).await?)))
}

/// Delete a patient record
#[utoipa::path(
    delete,
    path = "/api/patients/{id}",
    tag = "Patients",
    responses(
        (status = 200, description = "Patient deleted"),
        (status = 404, description = "Patient not found"),
    ),
    security(("bearer_auth" = []))
)]
pub async fn delete_patient(
    State(server): State<RehabDeskServer>,
    ctx: AuthContext,
    Path(id): Path<Uuid>,
) -> Result<Json<ApiResponse<()>>, ApiError> {
    server.guard.check(ctx.caller(), Permission::ManagePatients)?;
    server.store.delete_patient(id).await?;
    Ok(Json(api_success(())))
}

/// Financial account summary for a patient's stay
#[utoipa::path(
    get,
    path = "/api/patients/{id}/account",
    tag = "Patients",
    responses(
        (status = 200, description = "Account summary with balance and standing"),
        (status = 404, description = "Patient not found"),
    ),
    security(("bearer_auth" = []))
)]
pub async fn patient_account(
    State(server): State<RehabDeskServer>,
    ctx: AuthContext,
    Path(id): Path<Uuid>,
) -> Result<Json<ApiResponse<AccountSummary>>, ApiError> {
    server.guard.check(ctx.caller(), Permission::ViewFinance)?;
    Ok(Json(api_success(server.finance.account_summary(id).await?)))
}
