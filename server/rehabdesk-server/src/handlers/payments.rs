//! Payment collection handlers
//!
//! All financial writes run through the posting service so the patient's
//! running total stays in step with the payment list.

use axum::extract::{Path, State};
use axum::Json;
use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::Deserialize;
use utoipa::ToSchema;
use uuid::Uuid;

use accounts_service::NewPayment;
use auth_rbac::Permission;
use record_store::{Payment, PaymentMethod, PaymentRepository};

use crate::error::{api_success, ApiError, ApiResponse};
use crate::middleware::AuthContext;
use crate::server::RehabDeskServer;
use crate::validation::RequestValidation;
use crate::{validate_field, validate_positive};

/// Request to record a collected payment
#[derive(Debug, Deserialize, ToSchema)]
pub struct CreatePaymentRequest {
    pub patient_id: Uuid,
    pub amount: Decimal,
    pub payment_date: Option<DateTime<Utc>>,
    #[schema(value_type = String)]
    pub method: PaymentMethod,
    pub reference: Option<String>,
}

impl RequestValidation for CreatePaymentRequest {
    fn validate(&self) -> Result<(), ApiError> {
        validate_field!(self.patient_id, !self.patient_id.is_nil(), "Patient reference is required");
        validate_positive!(self.amount, "Amount must be greater than zero");
        Ok(())
    }
}

/// Partial update to a payment
#[derive(Debug, Deserialize, Default, ToSchema)]
pub struct UpdatePaymentRequest {
    pub amount: Option<Decimal>,
    pub payment_date: Option<DateTime<Utc>>,
    #[schema(value_type = Option<String>)]
    pub method: Option<PaymentMethod>,
    pub reference: Option<String>,
}

impl RequestValidation for UpdatePaymentRequest {
    fn validate(&self) -> Result<(), ApiError> {
        if let Some(amount) = self.amount {
            validate_positive!(amount, "Amount must be greater than zero");
        }
        Ok(())
    }
}

/// List payments collected for a patient
#[utoipa::path(
    get,
    path = "/api/patients/{id}/payments",
    tag = "Payments",
    responses(
        (status = 200, description = "Payments referencing the patient"),
        (status = 401, description = "Unauthorized"),
        (status = 403, description = "Forbidden"),
    ),
    security(("bearer_auth" = []))
)]
pub async fn list_patient_payments(
    State(server): State<RehabDeskServer>,
    ctx: AuthContext,
    Path(id): Path<Uuid>,
) -> Result<Json<ApiResponse<Vec<Payment>>>, ApiError> {
    server.guard.check(ctx.caller(), Permission::ViewFinance)?;
    Ok(Json(api_success(
        server.store.list_payments_by_patient(id).await?,
    )))
}

/// Record a payment and credit the patient's running total
#[utoipa::path(
    post,
    path = "/api/payments",
    tag = "Payments",
    responses(
        (status = 200, description = "Payment recorded"),
        (status = 422, description = "Invalid payload"),
    ),
    security(("bearer_auth" = []))
)]
pub async fn create_payment(
    State(server): State<RehabDeskServer>,
    ctx: AuthContext,
    Json(req): Json<CreatePaymentRequest>,
) -> Result<Json<ApiResponse<Payment>>, ApiError> {
    req.validate()?;
    server.guard.check(ctx.caller(), Permission::ManageFinance)?;

    let payment = server
        .posting
        .post_payment(NewPayment {
            patient_id: req.patient_id,
            amount: req.amount,
            payment_date: req.payment_date.unwrap_or_else(Utc::now),
            method: req.method,
            reference: req.reference,
            recorded_by: ctx.user.id,
        })
        .await?;
    Ok(Json(api_success(payment)))
}

/// Update a payment; amount changes adjust the patient's running total
#[utoipa::path(
    put,
    path = "/api/payments/{id}",
    tag = "Payments",
    responses(
        (status = 200, description = "Payment updated"),
        (status = 404, description = "Payment not found"),
        (status = 422, description = "Invalid payload"),
    ),
    security(("bearer_auth" = []))
)]
pub async fn update_payment(
    State(server): State<RehabDeskServer>,
    ctx: AuthContext,
    Path(id): Path<Uuid>,
    Json(req): Json<UpdatePaymentRequest>,
) -> Result<Json<ApiResponse<Payment>>, ApiError> {
    req.validate()?;
    server.guard.check(ctx.caller(), Permission::ManageFinance)?;

    // The amount goes through posting so the counter sees the difference
    if let Some(amount) = req.amount {
        server.posting.update_amount(id, amount).await?;
    }

    let mut payment = server.store.get_payment(id).await?;
    if let Some(payment_date) = req.payment_date {
        payment.payment_date = payment_date;
    }
    if let Some(method) = req.method {
        payment.method = method;
    }
    if let Some(reference) = req.reference {
        payment.reference = Some(reference);
    }
    payment.updated_at = Utc::now();
    Ok(Json(api_success(server.store.update_payment(payment).await?)))
}

/// Delete a payment, reversing its amount from the running total
#[utoipa::path(
    delete,
    path = "/api/payments/{id}",
    tag = "Payments",
    responses(
        (status = 200, description = "Payment deleted"),
        (status = 404, description = "Payment not found"),
    ),
    security(("bearer_auth" = []))
)]
pub async fn delete_payment(
    State(server): State<RehabDeskServer>,
    ctx: AuthContext,
    Path(id): Path<Uuid>,
) -> Result<Json<ApiResponse<()>>, ApiError> {
    server.guard.check(ctx.caller(), Permission::ManageFinance)?;
    server.posting.void_payment(id).await?;
    Ok(Json(api_success(())))
}
