//! OpenAPI documentation assembly

use utoipa::openapi::security::{HttpAuthScheme, HttpBuilder, SecurityScheme};
use utoipa::{Modify, OpenApi};

use crate::handlers::{graduates, health, patients, payments, payroll, reports, settings, staff, users};

#[derive(OpenApi)]
#[openapi(
    paths(
        health::health_check,
        health::version_info,
        patients::list_patients,
        patients::list_active_patients,
        patients::get_patient,
        patients::create_patient,
        patients::update_patient,
        patients::discharge_patient,
        patients::delete_patient,
        patients::patient_account,
        payments::list_patient_payments,
        payments::create_payment,
        payments::update_payment,
        payments::delete_payment,
        staff::list_staff,
        staff::list_active_staff,
        staff::get_staff,
        staff::create_staff,
        staff::update_staff,
        staff::delete_staff,
        payroll::list_payrolls,
        payroll::list_staff_payrolls,
        payroll::create_payroll,
        payroll::update_payroll,
        payroll::mark_payroll_paid,
        payroll::cancel_payroll,
        payroll::list_staff_advances,
        payroll::request_advance,
        payroll::approve_advance,
        payroll::reject_advance,
        payroll::list_staff_bonuses,
        payroll::list_staff_deductions,
        payroll::grant_bonus,
        payroll::record_deduction,
        payroll::delete_bonus,
        payroll::delete_deduction,
        graduates::list_graduates,
        graduates::list_active_graduates,
        graduates::create_graduate,
        graduates::update_graduate,
        graduates::delete_graduate,
        users::list_users,
        users::get_user,
        users::create_user,
        users::update_user,
        users::delete_user,
        settings::get_settings,
        settings::update_settings,
        reports::allowance_report,
        reports::finance_report,
    ),
    tags(
        (name = "Health", description = "Liveness and version probes"),
        (name = "Patients", description = "Admissions, discharges, and account balances"),
        (name = "Payments", description = "Payment collection against patient accounts"),
        (name = "Staff", description = "Staff roster management"),
        (name = "Payroll", description = "Monthly payroll records"),
        (name = "Advances", description = "Salary advances and repayment schedules"),
        (name = "Adjustments", description = "One-off bonuses and deductions"),
        (name = "Graduates", description = "Graduate roster for the allowance list"),
        (name = "Users", description = "User accounts, roles, and grants"),
        (name = "Settings", description = "Facility-wide settings"),
        (name = "Reports", description = "Allowance and finance rollups"),
    ),
    modifiers(&SecurityAddon)
)]
pub struct ApiDoc;

struct SecurityAddon;

impl Modify for SecurityAddon {
    fn modify(&self, openapi: &mut utoipa::openapi::OpenApi) {
        let components = openapi.components.get_or_insert_with(Default::default);
        components.add_security_scheme(
            "bearer_auth",
            SecurityScheme::Http(
                HttpBuilder::new()
                    .scheme(HttpAuthScheme::Bearer)
                    .build(),
            ),
        );
    }
}
