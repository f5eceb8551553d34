//! Repository traits the services are written against
//!
//! Update methods take the full entity and replace the stored record; the
//! HTTP layer folds partial payloads into a fetched entity before calling
//! update. Delete is physical. `None`-returning lookups are surfaced as
//! `StoreError::NotFound` by `get`, while `find_*` variants return options.

use crate::error::StoreResult;
use crate::models::*;
use async_trait::async_trait;
use rust_decimal::Decimal;
use uuid::Uuid;

#[async_trait]
pub trait PatientRepository: Send + Sync {
    async fn list_patients(&self) -> StoreResult<Vec<Patient>>;
    async fn list_active_patients(&self) -> StoreResult<Vec<Patient>>;
    async fn get_patient(&self, id: Uuid) -> StoreResult<Patient>;
    async fn create_patient(&self, patient: Patient) -> StoreResult<Patient>;
    async fn update_patient(&self, patient: Patient) -> StoreResult<Patient>;
    async fn delete_patient(&self, id: Uuid) -> StoreResult<()>;

    /// Atomically adjust the patient's running `total_paid` by `delta`,
    /// clamping the result at zero. Returns whether the patient existed.
    ///
    /// This is the lost-update-sensitive operation: implementations must
    /// perform the read-modify-write under a per-key lock or an equivalent
    /// atomic primitive, never as separate get and update calls.
    async fn adjust_total_paid(&self, patient_id: Uuid, delta: Decimal) -> StoreResult<bool>;
}

#[async_trait]
pub trait PaymentRepository: Send + Sync {
    async fn list_payments(&self) -> StoreResult<Vec<Payment>>;
    async fn list_payments_by_patient(&self, patient_id: Uuid) -> StoreResult<Vec<Payment>>;
    async fn get_payment(&self, id: Uuid) -> StoreResult<Payment>;
    async fn create_payment(&self, payment: Payment) -> StoreResult<Payment>;
    async fn update_payment(&self, payment: Payment) -> StoreResult<Payment>;
    async fn delete_payment(&self, id: Uuid) -> StoreResult<()>;
}

#[async_trait]
pub trait StaffRepository: Send + Sync {
    async fn list_staff(&self) -> StoreResult<Vec<Staff>>;
    async fn list_active_staff(&self) -> StoreResult<Vec<Staff>>;
    async fn get_staff(&self, id: Uuid) -> StoreResult<Staff>;
    async fn create_staff(&self, staff: Staff) -> StoreResult<Staff>;
    async fn update_staff(&self, staff: Staff) -> StoreResult<Staff>;
    async fn delete_staff(&self, id: Uuid) -> StoreResult<()>;
}

#[async_trait]
pub trait PayrollRepository: Send + Sync {
    async fn list_payrolls(&self) -> StoreResult<Vec<Payroll>>;
    async fn list_payrolls_by_staff(&self, staff_id: Uuid) -> StoreResult<Vec<Payroll>>;
    async fn get_payroll(&self, id: Uuid) -> StoreResult<Payroll>;
    async fn create_payroll(&self, payroll: Payroll) -> StoreResult<Payroll>;
    async fn update_payroll(&self, payroll: Payroll) -> StoreResult<Payroll>;
    async fn delete_payroll(&self, id: Uuid) -> StoreResult<()>;
}

#[async_trait]
pub trait AdvanceRepository: Send + Sync {
    async fn list_advances(&self) -> StoreResult<Vec<Advance>>;
    async fn list_advances_by_staff(&self, staff_id: Uuid) -> StoreResult<Vec<Advance>>;
    async fn get_advance(&self, id: Uuid) -> StoreResult<Advance>;
    async fn create_advance(&self, advance: Advance) -> StoreResult<Advance>;
    async fn update_advance(&self, advance: Advance) -> StoreResult<Advance>;
    async fn delete_advance(&self, id: Uuid) -> StoreResult<()>;
}

#[async_trait]
pub trait BonusRepository: Send + Sync {
    async fn list_bonuses(&self) -> StoreResult<Vec<Bonus>>;
    async fn list_bonuses_by_staff(&self, staff_id: Uuid) -> StoreResult<Vec<Bonus>>;
    async fn get_bonus(&self, id: Uuid) -> StoreResult<Bonus>;
    async fn create_bonus(&self, bonus: Bonus) -> StoreResult<Bonus>;
    async fn update_bonus(&self, bonus: Bonus) -> StoreResult<Bonus>;
    async fn delete_bonus(&self, id: Uuid) -> StoreResult<()>;
}

#[async_trait]
pub trait DeductionRepository: Send + Sync {
    async fn list_deductions(&self) -> StoreResult<Vec<Deduction>>;
    async fn list_deductions_by_staff(&self, staff_id: Uuid) -> StoreResult<Vec<Deduction>>;
    async fn get_deduction(&self, id: Uuid) -> StoreResult<Deduction>;
    async fn create_deduction(&self, deduction: Deduction) -> StoreResult<Deduction>;
    async fn update_deduction(&self, deduction: Deduction) -> StoreResult<Deduction>;
    async fn delete_deduction(&self, id: Uuid) -> StoreResult<()>;
}

#[async_trait]
pub trait GraduateRepository: Send + Sync {
    async fn list_graduates(&self) -> StoreResult<Vec<Graduate>>;
    async fn list_active_graduates(&self) -> StoreResult<Vec<Graduate>>;
    async fn get_graduate(&self, id: Uuid) -> StoreResult<Graduate>;
    async fn create_graduate(&self, graduate: Graduate) -> StoreResult<Graduate>;
    async fn update_graduate(&self, graduate: Graduate) -> StoreResult<Graduate>;
    async fn delete_graduate(&self, id: Uuid) -> StoreResult<()>;
}

#[async_trait]
pub trait UserRepository: Send + Sync {
    async fn list_users(&self) -> StoreResult<Vec<User>>;
    async fn get_user(&self, id: Uuid) -> StoreResult<User>;
    async fn find_user_by_username(&self, username: &str) -> StoreResult<Option<User>>;
    async fn create_user(&self, user: User) -> StoreResult<User>;
    async fn update_user(&self, user: User) -> StoreResult<User>;
    async fn delete_user(&self, id: Uuid) -> StoreResult<()>;
}

#[async_trait]
pub trait SettingsRepository: Send + Sync {
    async fn get_settings(&self) -> StoreResult<Settings>;
    async fn update_settings(&self, settings: Settings) -> StoreResult<Settings>;
}
