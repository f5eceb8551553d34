//! Reporting handlers

use axum::extract::{Query, State};
use axum::Json;
use serde::Deserialize;

use accounts_service::FinanceSummary;
use allowance_service::AllowanceReport;
use auth_rbac::Permission;

use crate::error::{api_success, ApiError, ApiResponse};
use crate::middleware::AuthContext;
use crate::server::RehabDeskServer;

/// Scope selector for the finance report
#[derive(Debug, Deserialize, Default)]
pub struct FinanceReportParams {
    /// `active` (default) restricts to admitted patients; `all` covers
    /// discharged stays as well
    pub scope: Option<String>,
}

/// Daily cigarette allowance report, grouped and combined
#[utoipa::path(
    get,
    path = "/api/reports/allowance",
    tag = "Reports",
    responses(
        (status = 200, description = "Allowance statistics per group plus combined totals"),
        (status = 401, description = "Unauthorized"),
        (status = 403, description = "Forbidden"),
    ),
    security(("bearer_auth" = []))
)]
pub async fn allowance_report(
    State(server): State<RehabDeskServer>,
    ctx: AuthContext,
) -> Result<Json<ApiResponse<AllowanceReport>>, ApiError> {
    server.guard.check(ctx.caller(), Permission::ViewReports)?;
    Ok(Json(api_success(server.allowance.daily_report().await?)))
}

/// Facility-wide finance summary over patient accounts
#[utoipa::path(
    get,
    path = "/api/reports/finance",
    tag = "Reports",
    responses(
        (status = 200, description = "Billed, collected, and outstanding totals"),
        (status = 401, description = "Unauthorized"),
        (status = 403, description = "Forbidden"),
    ),
    security(("bearer_auth" = []))
)]
pub async fn finance_report(
    State(server): State<RehabDeskServer>,
    ctx: AuthContext,
    Query(params): Query<FinanceReportParams>,
) -> Result<Json<ApiResponse<FinanceSummary>>, ApiError> {
    server.guard.check(ctx.caller(), Permission::ViewReports)?;

    let active_only = match params.scope.as_deref() {
        None | Some("active") => true,
        Some("all") => false,
        Some(other) => {
            return Err(ApiError::validation(format!(
                "unknown scope: {} (expected active or all)",
                other
            )))
        }
    };
    Ok(Json(api_success(
        server.finance.facility_summary(active_only).await?,
    )))
}
