use axum::{
    routing::{delete, get, post, put},
    Router,
};

use crate::handlers::{
    graduates, health, patients, payments, payroll, reports, settings, staff, users,
};
use crate::server::RehabDeskServer;

/// Route path constants, grouped by API area
pub mod paths {
    pub mod health {
        pub const HEALTH: &str = "/health";
        pub const VERSION: &str = "/version";
    }

    pub mod patients {
        pub const COLLECTION: &str = "/api/patients";
        pub const ACTIVE: &str = "/api/patients/active";
        pub const BY_ID: &str = "/api/patients/:id";
        pub const DISCHARGE: &str = "/api/patients/:id/discharge";
        pub const ACCOUNT: &str = "/api/patients/:id/account";
        pub const PAYMENTS: &str = "/api/patients/:id/payments";
    }

    pub mod payments {
        pub const COLLECTION: &str = "/api/payments";
        pub const BY_ID: &str = "/api/payments/:id";
    }

    pub mod staff {
        pub const COLLECTION: &str = "/api/staff";
        pub const ACTIVE: &str = "/api/staff/active";
        pub const BY_ID: &str = "/api/staff/:id";
        pub const PAYROLL: &str = "/api/staff/:id/payroll";
        pub const ADVANCES: &str = "/api/staff/:id/advances";
        pub const BONUSES: &str = "/api/staff/:id/bonuses";
        pub const DEDUCTIONS: &str = "/api/staff/:id/deductions";
    }

    pub mod payroll {
        pub const COLLECTION: &str = "/api/payroll";
        pub const BY_ID: &str = "/api/payroll/:id";
        pub const MARK_PAID: &str = "/api/payroll/:id/mark-paid";
        pub const CANCEL: &str = "/api/payroll/:id/cancel";
    }

    pub mod advances {
        pub const COLLECTION: &str = "/api/advances";
        pub const APPROVE: &str = "/api/advances/:id/approve";
        pub const REJECT: &str = "/api/advances/:id/reject";
    }

    pub mod adjustments {
        pub const BONUSES: &str = "/api/bonuses";
        pub const BONUS_BY_ID: &str = "/api/bonuses/:id";
        pub const DEDUCTIONS: &str = "/api/deductions";
        pub const DEDUCTION_BY_ID: &str = "/api/deductions/:id";
    }

    pub mod graduates {
        pub const COLLECTION: &str = "/api/graduates";
        pub const ACTIVE: &str = "/api/graduates/active";
        pub const BY_ID: &str = "/api/graduates/:id";
    }

    pub mod users {
        pub const COLLECTION: &str = "/api/users";
        pub const BY_ID: &str = "/api/users/:id";
    }

    pub mod settings {
        pub const ROOT: &str = "/api/settings";
    }

    pub mod reports {
        pub const ALLOWANCE: &str = "/api/reports/allowance";
        pub const FINANCE: &str = "/api/reports/finance";
    }
}

/// Create health check routes
pub fn health_routes() -> Router<RehabDeskServer> {
    Router::new()
        .route(paths::health::HEALTH, get(health::health_check))
        .route(paths::health::VERSION, get(health::version_info))
}

/// Create patient management routes
pub fn patient_routes() -> Router<RehabDeskServer> {
    Router::new()
        .route(paths::patients::COLLECTION, get(patients::list_patients))
        .route(paths::patients::COLLECTION, post(patients::create_patient))
        .route(paths::patients::ACTIVE, get(patients::list_active_patients))
        .route(paths::patients::BY_ID, get(patients::get_patient))
        .route(paths::patients::BY_ID, put(patients::update_patient))
        .route(paths::patients::BY_ID, delete(patients::delete_patient))
        .route(
            paths::patients::DISCHARGE,
            post(patients::discharge_patient),
        )
        .route(paths::patients::ACCOUNT, get(patients::patient_account))
        .route(paths::patients::PAYMENTS, get(payments::list_patient_payments))
}

/// Create payment collection routes
pub fn payment_routes() -> Router<RehabDeskServer> {
    Router::new()
        .route(paths::payments::COLLECTION, post(payments::create_payment))
        .route(paths::payments::BY_ID, put(payments::update_payment))
        .route(paths::payments::BY_ID, delete(payments::delete_payment))
}

/// Create staff management routes
pub fn staff_routes() -> Router<RehabDeskServer> {
    Router::new()
        .route(paths::staff::COLLECTION, get(staff::list_staff))
        .route(paths::staff::COLLECTION, post(staff::create_staff))
        .route(paths::staff::ACTIVE, get(staff::list_active_staff))
        .route(paths::staff::BY_ID, get(staff::get_staff))
        .route(paths::staff::BY_ID, put(staff::update_staff))
        .route(paths::staff::BY_ID, delete(staff::delete_staff))
        .route(paths::staff::PAYROLL, get(payroll::list_staff_payrolls))
        .route(paths::staff::ADVANCES, get(payroll::list_staff_advances))
        .route(paths::staff::BONUSES, get(payroll::list_staff_bonuses))
        .route(paths::staff::DEDUCTIONS, get(payroll::list_staff_deductions))
}

/// Create payroll, advance, bonus, and deduction routes
pub fn payroll_routes() -> Router<RehabDeskServer> {
    Router::new()
        .route(paths::payroll::COLLECTION, get(payroll::list_payrolls))
        .route(paths::payroll::COLLECTION, post(payroll::create_payroll))
        .route(paths::payroll::BY_ID, put(payroll::update_payroll))
        .route(paths::payroll::MARK_PAID, post(payroll::mark_payroll_paid))
        .route(paths::payroll::CANCEL, post(payroll::cancel_payroll))
        .route(paths::advances::COLLECTION, post(payroll::request_advance))
        .route(paths::advances::APPROVE, post(payroll::approve_advance))
        .route(paths::advances::REJECT, post(payroll::reject_advance))
        .route(paths::adjustments::BONUSES, post(payroll::grant_bonus))
        .route(paths::adjustments::BONUS_BY_ID, delete(payroll::delete_bonus))
        .route(paths::adjustments::DEDUCTIONS, post(payroll::record_deduction))
        .route(
            paths::adjustments::DEDUCTION_BY_ID,
            delete(payroll::delete_deduction),
        )
}

/// Create graduate management routes
pub fn graduate_routes() -> Router<RehabDeskServer> {
    Router::new()
        .route(paths::graduates::COLLECTION, get(graduates::list_graduates))
        .route(paths::graduates::COLLECTION, post(graduates::create_graduate))
        .route(
            paths::graduates::ACTIVE,
            get(graduates::list_active_graduates),
        )
        .route(paths::graduates::BY_ID, put(graduates::update_graduate))
        .route(paths::graduates::BY_ID, delete(graduates::delete_graduate))
}

/// Create user administration routes
pub fn user_routes() -> Router<RehabDeskServer> {
    Router::new()
        .route(paths::users::COLLECTION, get(users::list_users))
        .route(paths::users::COLLECTION, post(users::create_user))
        .route(paths::users::BY_ID, get(users::get_user))
        .route(paths::users::BY_ID, put(users::update_user))
        .route(paths::users::BY_ID, delete(users::delete_user))
}

/// Create settings routes
pub fn settings_routes() -> Router<RehabDeskServer> {
    Router::new()
        .route(paths::settings::ROOT, get(settings::get_settings))
        .route(paths::settings::ROOT, put(settings::update_settings))
}

/// Create reporting routes
pub fn report_routes() -> Router<RehabDeskServer> {
    Router::new()
        .route(paths::reports::ALLOWANCE, get(reports::allowance_report))
        .route(paths::reports::FINANCE, get(reports::finance_report))
}

/// Assemble every route group into the API router
pub fn create_routes() -> Router<RehabDeskServer> {
    Router::new()
        .merge(health_routes())
        .merge(patient_routes())
        .merge(payment_routes())
        .merge(staff_routes())
        .merge(payroll_routes())
        .merge(graduate_routes())
        .merge(user_routes())
        .merge(settings_routes())
        .merge(report_routes())
}
