//! Facility settings handlers

use axum::extract::State;
use axum::Json;
use chrono::Utc;
use serde::Deserialize;

use auth_rbac::Permission;
use record_store::{Settings, SettingsRepository};

use crate::error::{api_success, ApiError, ApiResponse};
use crate::middleware::AuthContext;
use crate::server::RehabDeskServer;
use crate::validation::RequestValidation;
use crate::{validate_field, validate_required};

/// Partial update to the settings singleton
#[derive(Debug, Deserialize, Default, ToSchema)]
pub struct UpdateSettingsRequest {
    pub facility_name: Option<String>,
    pub currency_code: Option<String>,
    pub currency_scale: Option<u32>,
}

impl RequestValidation for UpdateSettingsRequest {
    fn validate(&self) -> Result<(), ApiError> {
        if let Some(ref name) = self.facility_name {
            validate_required!(name, "Facility name must not be empty");
        }
        if let Some(ref code) = self.currency_code {
            validate_field!(code, code.len() == 3, "Currency code must be three letters");
        }
        if let Some(scale) = self.currency_scale {
            validate_field!(scale, scale <= 4, "Currency scale must be at most 4");
        }
        Ok(())
    }
}

/// Read facility settings; any authenticated caller may look
#[utoipa::path(
    get,
    path = "/api/settings",
    tag = "Settings",
    responses(
        (status = 200, description = "Facility settings"),
        (status = 401, description = "Unauthorized"),
    ),
    security(("bearer_auth" = []))
)]
pub async fn get_settings(
    State(server): State<RehabDeskServer>,
    ctx: AuthContext,
) -> Result<Json<ApiResponse<Settings>>, ApiError> {
    server.guard.check_authenticated(ctx.caller())?;
    Ok(Json(api_success(server.store.get_settings().await?)))
}

/// Update facility settings
#[utoipa::path(
    put,
    path = "/api/settings",
    tag = "Settings",
    responses(
        (status = 200, description = "Settings updated"),
        (status = 403, description = "Forbidden"),
        (status = 422, description = "Invalid payload"),
    ),
    security(("bearer_auth" = []))
)]
pub async fn update_settings(
    State(server): State<RehabDeskServer>,
    ctx: AuthContext,
    Json(req): Json<UpdateSettingsRequest>,
) -> Result<Json<ApiResponse<Settings>>, ApiError> {
    req.validate()?;
    server.guard.check(ctx.caller(), Permission::ManageSettings)?;

    let mut settings = server.store.get_settings().await?;
    if let Some(facility_name) = req.facility_name {
        settings.facility_name = facility_name;
    }
    if let Some(currency_code) = req.currency_code {
        settings.currency_code = currency_code;
    }
    if let Some(currency_scale) = req.currency_scale {
        settings.currency_scale = currency_scale;
    }
    settings.updated_at = Utc::now();
    Ok(Json(api_success(
        server.store.update_settings(settings).await?,
    )))
}
