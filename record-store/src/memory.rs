use crate::error::{StoreError, StoreResult};
use crate::models::*;
use crate::repository::*;
use async_trait::async_trait;
use chrono::Utc;
use dashmap::DashMap;
use parking_lot::RwLock;
use rust_decimal::Decimal;
use tracing::debug;
use uuid::Uuid;

/// In-memory record store on concurrent maps
///
/// Map iteration order is unspecified, so every list method sorts by
/// creation time before returning. `adjust_total_paid` mutates the patient
/// entry in place under its shard lock, which makes the read-modify-write
/// atomic with respect to concurrent postings.
pub struct InMemoryStore {
    patients: DashMap<Uuid, Patient>,
    payments: DashMap<Uuid, Payment>,
    staff: DashMap<Uuid, Staff>,
    payrolls: DashMap<Uuid, Payroll>,
    advances: DashMap<Uuid, Advance>,
    bonuses: DashMap<Uuid, Bonus>,
    deductions: DashMap<Uuid, Deduction>,
    graduates: DashMap<Uuid, Graduate>,
    users: DashMap<Uuid, User>,
    settings: RwLock<Settings>,
}

impl InMemoryStore {
    pub fn new() -> Self {
        Self {
            patients: DashMap::new(),
            payments: DashMap::new(),
            staff: DashMap::new(),
            payrolls: DashMap::new(),
            advances: DashMap::new(),
            bonuses: DashMap::new(),
            deductions: DashMap::new(),
            graduates: DashMap::new(),
            users: DashMap::new(),
            settings: RwLock::new(Settings::default()),
        }
    }

    fn sorted_by_created<T, F>(map: &DashMap<Uuid, T>, created_at: F) -> Vec<T>
    where
        T: Clone,
        F: Fn(&T) -> chrono::DateTime<Utc>,
    {
        let mut items: Vec<T> = map.iter().map(|entry| entry.value().clone()).collect();
        items.sort_by_key(|item| created_at(item));
        items
    }
}

impl Default for InMemoryStore {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl PatientRepository for InMemoryStore {
    async fn list_patients(&self) -> StoreResult<Vec<Patient>> {
        Ok(Self::sorted_by_created(&self.patients, |p| p.created_at))
    }

    async fn list_active_patients(&self) -> StoreResult<Vec<Patient>> {
        let mut active = Self::sorted_by_created(&self.patients, |p| p.created_at);
        active.retain(|p| p.status == PatientStatus::Active);
        Ok(active)
    }

    async fn get_patient(&self, id: Uuid) -> StoreResult<Patient> {
        self.patients
            .get(&id)
            .map(|entry| entry.value().clone())
            .ok_or_else(|| StoreError::not_found("patient", id))
    }

    async fn create_patient(&self, patient: Patient) -> StoreResult<Patient> {
        self.patients.insert(patient.id, patient.clone());
        Ok(patient)
    }

    async fn update_patient(&self, patient: Patient) -> StoreResult<Patient> {
        if !self.patients.contains_key(&patient.id) {
            return Err(StoreError::not_found("patient", patient.id));
        }
        self.patients.insert(patient.id, patient.clone());
        Ok(patient)
    }

    async fn delete_patient(&self, id: Uuid) -> StoreResult<()> {
        self.patients
            .remove(&id)
            .map(|_| ())
            .ok_or_else(|| StoreError::not_found("patient", id))
    }

    async fn adjust_total_paid(&self, patient_id: Uuid, delta: Decimal) -> StoreResult<bool> {
        match self.patients.get_mut(&patient_id) {
            Some(mut entry) => {
                let patient = entry.value_mut();
                let adjusted = patient.total_paid + delta;
                if adjusted < Decimal::ZERO {
                    debug!(patient_id = %patient_id, %adjusted, "running total clamped at zero");
                }
                patient.total_paid = adjusted.max(Decimal::ZERO);
                patient.updated_at = Utc::now();
                Ok(true)
            }
            None => Ok(false),
        }
    }
}

#[async_trait]
impl PaymentRepository for InMemoryStore {
    async fn list_payments(&self) -> StoreResult<Vec<Payment>> {
        Ok(Self::sorted_by_created(&self.payments, |p| p.created_at))
    }

    async fn list_payments_by_patient(&self, patient_id: Uuid) -> StoreResult<Vec<Payment>> {
        let mut payments = Self::sorted_by_created(&self.payments, |p| p.created_at);
        payments.retain(|p| p.patient_id == patient_id);
        Ok(payments)
    }

    async fn get_payment(&self, id: Uuid) -> StoreResult<Payment> {
        self.payments
            .get(&id)
            .map(|entry| entry.value().clone())
            .ok_or_else(|| StoreError::not_found("payment", id))
    }

    async fn create_payment(&self, payment: Payment) -> StoreResult<Payment> {
        self.payments.insert(payment.id, payment.clone());
        Ok(payment)
    }

    async fn update_payment(&self, payment: Payment) -> StoreResult<Payment> {
        if !self.payments.contains_key(&payment.id) {
            return Err(StoreError::not_found("payment", payment.id));
        }
        self.payments.insert(payment.id, payment.clone());
        Ok(payment)
    }

    async fn delete_payment(&self, id: Uuid) -> StoreResult<()> {
        self.payments
            .remove(&id)
            .map(|_| ())
            .ok_or_else(|| StoreError::not_found("payment", id))
    }
}

#[async_trait]
impl StaffRepository for InMemoryStore {
    async fn list_staff(&self) -> StoreResult<Vec<Staff>> {
        Ok(Self::sorted_by_created(&self.staff, |s| s.created_at))
    }

    async fn list_active_staff(&self) -> StoreResult<Vec<Staff>> {
        let mut active = Self::sorted_by_created(&self.staff, |s| s.created_at);
        active.retain(|s| s.is_active);
        Ok(active)
    }

    async fn get_staff(&self, id: Uuid) -> StoreResult<Staff> {
        self.staff
            .get(&id)
            .map(|entry| entry.value().clone())
            .ok_or_else(|| StoreError::not_found("staff", id))
    }

    async fn create_staff(&self, staff: Staff) -> StoreResult<Staff> {
        self.staff.insert(staff.id, staff.clone());
        Ok(staff)
    }

    async fn update_staff(&self, staff: Staff) -> StoreResult<Staff> {
        if !self.staff.contains_key(&staff.id) {
            return Err(StoreError::not_found("staff", staff.id));
        }
        self.staff.insert(staff.id, staff.clone());
        Ok(staff)
    }

    async fn delete_staff(&self, id: Uuid) -> StoreResult<()> {
        self.staff
            .remove(&id)
            .map(|_| ())
            .ok_or_else(|| StoreError::not_found("staff", id))
    }
}

#[async_trait]
impl PayrollRepository for InMemoryStore {
    async fn list_payrolls(&self) -> StoreResult<Vec<Payroll>> {
        Ok(Self::sorted_by_created(&self.payrolls, |p| p.created_at))
    }

    async fn list_payrolls_by_staff(&self, staff_id: Uuid) -> StoreResult<Vec<Payroll>> {
        let mut payrolls = Self::sorted_by_created(&self.payrolls, |p| p.created_at);
        payrolls.retain(|p| p.staff_id == staff_id);
        Ok(payrolls)
    }

    async fn get_payroll(&self, id: Uuid) -> StoreResult<Payroll> {
        self.payrolls
            .get(&id)
            .map(|entry| entry.value().clone())
            .ok_or_else(|| StoreError::not_found("payroll", id))
    }

    async fn create_payroll(&self, payroll: Payroll) -> StoreResult<Payroll> {
        self.payrolls.insert(payroll.id, payroll.clone());
        Ok(payroll)
    }

    async fn update_payroll(&self, payroll: Payroll) -> StoreResult<Payroll> {
        if !self.payrolls.contains_key(&payroll.id) {
            return Err(StoreError::not_found("payroll", payroll.id));
        }
        self.payrolls.insert(payroll.id, payroll.clone());
        Ok(payroll)
    }

    async fn delete_payroll(&self, id: Uuid) -> StoreResult<()> {
        self.payrolls
            .remove(&id)
            .map(|_| ())
            .ok_or_else(|| StoreError::not_found("payroll", id))
    }
}

#[async_trait]
impl AdvanceRepository for InMemoryStore {
    async fn list_advances(&self) -> StoreResult<Vec<Advance>> {
        Ok(Self::sorted_by_created(&self.advances, |a| a.created_at))
    }

    async fn list_advances_by_staff(&self, staff_id: Uuid) -> StoreResult<Vec<Advance>> {
        let mut advances = Self::sorted_by_created(&self.advances, |a| a.created_at);
        advances.retain(|a| a.staff_id == staff_id);
        Ok(advances)
    }

    async fn get_advance(&self, id: Uuid) -> StoreResult<Advance> {
        self.advances
            .get(&id)
            .map(|entry| entry.value().clone())
            .ok_or_else(|| StoreError::not_found("advance", id))
    }

    async fn create_advance(&self, advance: Advance) -> StoreResult<Advance> {
        self.advances.insert(advance.id, advance.clone());
        Ok(advance)
    }

    async fn update_advance(&self, advance: Advance) -> StoreResult<Advance> {
        if !self.advances.contains_key(&advance.id) {
            return Err(StoreError::not_found("advance", advance.id));
        }
        self.advances.insert(advance.id, advance.clone());
        Ok(advance)
    }

    async fn delete_advance(&self, id: Uuid) -> StoreResult<()> {
        self.advances
            .remove(&id)
            .map(|_| ())
            .ok_or_else(|| StoreError::not_found("advance", id))
    }
}

#[async_trait]
impl BonusRepository for InMemoryStore {
    async fn list_bonuses(&self) -> StoreResult<Vec<Bonus>> {
        Ok(Self::sorted_by_created(&self.bonuses, |b| b.created_at))
    }

    async fn list_bonuses_by_staff(&self, staff_id: Uuid) -> StoreResult<Vec<Bonus>> {
        let mut bonuses = Self::sorted_by_created(&self.bonuses, |b| b.created_at);
        bonuses.retain(|b| b.staff_id == staff_id);
        Ok(bonuses)
    }

    async fn get_bonus(&self, id: Uuid) -> StoreResult<Bonus> {
        self.bonuses
            .get(&id)
            .map(|entry| entry.value().clone())
            .ok_or_else(|| StoreError::not_found("bonus", id))
    }

    async fn create_bonus(&self, bonus: Bonus) -> StoreResult<Bonus> {
        self.bonuses.insert(bonus.id, bonus.clone());
        Ok(bonus)
    }

    async fn update_bonus(&self, bonus: Bonus) -> StoreResult<Bonus> {
        if !self.bonuses.contains_key(&bonus.id) {
            return Err(StoreError::not_found("bonus", bonus.id));
        }
        self.bonuses.insert(bonus.id, bonus.clone());
        Ok(bonus)
    }

    async fn delete_bonus(&self, id: Uuid) -> StoreResult<()> {
        self.bonuses
            .remove(&id)
            .map(|_| ())
            .ok_or_else(|| StoreError::not_found("bonus", id))
    }
}

#[async_trait]
impl DeductionRepository for InMemoryStore {
    async fn list_deductions(&self) -> StoreResult<Vec<Deduction>> {
        Ok(Self::sorted_by_created(&self.deductions, |d| d.created_at))
    }

    async fn list_deductions_by_staff(&self, staff_id: Uuid) -> StoreResult<Vec<Deduction>> {
        let mut deductions = Self::sorted_by_created(&self.deductions, |d| d.created_at);
        deductions.retain(|d| d.staff_id == staff_id);
        Ok(deductions)
    }

    async fn get_deduction(&self, id: Uuid) -> StoreResult<Deduction> {
        self.deductions
            .get(&id)
            .map(|entry| entry.value().clone())
            .ok_or_else(|| StoreError::not_found("deduction", id))
    }

    async fn create_deduction(&self, deduction: Deduction) -> StoreResult<Deduction> {
        self.deductions.insert(deduction.id, deduction.clone());
        Ok(deduction)
    }

    async fn update_deduction(&self, deduction: Deduction) -> StoreResult<Deduction> {
        if !self.deductions.contains_key(&deduction.id) {
            return Err(StoreError::not_found("deduction", deduction.id));
        }
        self.deductions.insert(deduction.id, deduction.clone());
        Ok(deduction)
    }

    async fn delete_deduction(&self, id: Uuid) -> StoreResult<()> {
        self.deductions
            .remove(&id)
            .map(|_| ())
            .ok_or_else(|| StoreError::not_found("deduction", id))
    }
}

#[async_trait]
impl GraduateRepository for InMemoryStore {
    async fn list_graduates(&self) -> StoreResult<Vec<Graduate>> {
        Ok(Self::sorted_by_created(&self.graduates, |g| g.created_at))
    }

    async fn list_active_graduates(&self) -> StoreResult<Vec<Graduate>> {
        let mut active = Self::sorted_by_created(&self.graduates, |g| g.created_at);
        active.retain(|g| g.is_active);
        Ok(active)
    }

    async fn get_graduate(&self, id: Uuid) -> StoreResult<Graduate> {
        self.graduates
            .get(&id)
            .map(|entry| entry.value().clone())
            .ok_or_else(|| StoreError::not_found("graduate", id))
    }

    async fn create_graduate(&self, graduate: Graduate) -> StoreResult<Graduate> {
        self.graduates.insert(graduate.id, graduate.clone());
        Ok(graduate)
    }

    async fn update_graduate(&self, graduate: Graduate) -> StoreResult<Graduate> {
        if !self.graduates.contains_key(&graduate.id) {
            return Err(StoreError::not_found("graduate", graduate.id));
        }
        self.graduates.insert(graduate.id, graduate.clone());
        Ok(graduate)
    }

    async fn delete_graduate(&self, id: Uuid) -> StoreResult<()> {
        self.graduates
            .remove(&id)
            .map(|_| ())
            .ok_or_else(|| StoreError::not_found("graduate", id))
    }
}

#[async_trait]
impl UserRepository for InMemoryStore {
    async fn list_users(&self) -> StoreResult<Vec<User>> {
        Ok(Self::sorted_by_created(&self.users, |u| u.created_at))
    }

    async fn get_user(&self, id: Uuid) -> StoreResult<User> {
        self.users
            .get(&id)
            .map(|entry| entry.value().clone())
            .ok_or_else(|| StoreError::not_found("user", id))
    }

    async fn find_user_by_username(&self, username: &str) -> StoreResult<Option<User>> {
        Ok(self
            .users
            .iter()
            .find(|entry| entry.value().username == username)
            .map(|entry| entry.value().clone()))
    }

    async fn create_user(&self, user: User) -> StoreResult<User> {
        let taken = self
            .users
            .iter()
            .any(|entry| entry.value().username == user.username);
        if taken {
            return Err(StoreError::Conflict(format!(
                "username {} is already taken",
                user.username
            )));
        }
        self.users.insert(user.id, user.clone());
        Ok(user)
    }

    async fn update_user(&self, user: User) -> StoreResult<User> {
        if !self.users.contains_key(&user.id) {
            return Err(StoreError::not_found("user", user.id));
        }
        let taken = self
            .users
            .iter()
            .any(|entry| entry.value().username == user.username && *entry.key() != user.id);
        if taken {
            return Err(StoreError::Conflict(format!(
                "username {} is already taken",
                user.username
            )));
        }
        self.users.insert(user.id, user.clone());
        Ok(user)
    }

    async fn delete_user(&self, id: Uuid) -> StoreResult<()> {
        self.users
            .remove(&id)
            .map(|_| ())
            .ok_or_else(|| StoreError::not_found("user", id))
    }
}

#[async_trait]
impl SettingsRepository for InMemoryStore {
    async fn get_settings(&self) -> StoreResult<Settings> {
        Ok(self.settings.read().clone())
    }

    async fn update_settings(&self, settings: Settings) -> StoreResult<Settings> {
        *self.settings.write() = settings.clone();
        Ok(settings)
    }
}
