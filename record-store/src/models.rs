use auth_rbac::{Permission, Role};
use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use uuid::Uuid;

/// Daily cigarette allowance granted to a patient, staff member, or graduate
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum CigaretteType {
    #[default]
    None,
    HalfPack,
    FullPack,
}

impl CigaretteType {
    /// Daily cost of the allowance type, in facility currency
    pub fn daily_cost(&self) -> Decimal {
        match self {
            Self::None => Decimal::ZERO,
            Self::HalfPack => dec!(25),
            Self::FullPack => dec!(50),
        }
    }
}

/// Admission status of a patient
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PatientStatus {
    Active,
    Discharged,
}

/// Patient admission record
///
/// `total_paid` is a denormalized running sum over the non-deleted payments
/// referencing the patient, maintained incrementally by payment posting.
/// `daily_cigarette_cost` is an explicit per-patient override; when absent
/// the cost derives from `cigarette_type`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Patient {
    pub id: Uuid,
    pub full_name: String,
    pub admission_date: DateTime<Utc>,
    pub discharge_date: Option<DateTime<Utc>>,
    pub daily_cost: Decimal,
    pub cigarette_type: CigaretteType,
    pub daily_cigarette_cost: Option<Decimal>,
    pub status: PatientStatus,
    pub total_paid: Decimal,
    pub notes: Option<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Patient {
    /// Stored override if present, otherwise the cost derived from the type
    pub fn effective_daily_cigarette_cost(&self) -> Decimal {
        self.daily_cigarette_cost
            .unwrap_or_else(|| self.cigarette_type.daily_cost())
    }
}

/// How a payment was collected
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PaymentMethod {
    Cash,
    Card,
    Transfer,
    Check,
}

/// Payment collected against a patient account
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Payment {
    pub id: Uuid,
    pub patient_id: Uuid,
    pub amount: Decimal,
    pub payment_date: DateTime<Utc>,
    pub method: PaymentMethod,
    pub reference: Option<String>,
    pub recorded_by: Uuid,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Staff member record
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Staff {
    pub id: Uuid,
    pub full_name: String,
    pub position: String,
    pub monthly_salary: Decimal,
    pub cigarette_type: CigaretteType,
    pub daily_cigarette_cost: Option<Decimal>,
    pub hired_at: DateTime<Utc>,
    pub is_active: bool,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Staff {
    pub fn effective_daily_cigarette_cost(&self) -> Decimal {
        self.daily_cigarette_cost
            .unwrap_or_else(|| self.cigarette_type.daily_cost())
    }
}

/// Payroll record status
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PayrollStatus {
    Pending,
    Paid,
    Cancelled,
}

/// Monthly payroll record for a staff member
///
/// `net_salary` always equals `base_salary + bonuses - advances - deductions`;
/// the payroll service recomputes it on every write touching an input.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Payroll {
    pub id: Uuid,
    pub staff_id: Uuid,
    pub period: String,
    pub base_salary: Decimal,
    pub bonuses: Decimal,
    pub advances: Decimal,
    pub deductions: Decimal,
    pub net_salary: Decimal,
    pub status: PayrollStatus,
    pub paid_at: Option<DateTime<Utc>>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Salary advance status
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum AdvanceStatus {
    Pending,
    Approved,
    Rejected,
}

/// Salary advance repaid in monthly installments
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Advance {
    pub id: Uuid,
    pub staff_id: Uuid,
    pub amount: Decimal,
    pub repayment_months: u32,
    pub monthly_deduction: Decimal,
    pub remaining_amount: Decimal,
    pub status: AdvanceStatus,
    pub requested_at: DateTime<Utc>,
    pub decided_at: Option<DateTime<Utc>>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// One-off bonus granted to a staff member
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Bonus {
    pub id: Uuid,
    pub staff_id: Uuid,
    pub amount: Decimal,
    pub reason: String,
    pub date: DateTime<Utc>,
    pub created_at: DateTime<Utc>,
}

/// One-off deduction applied to a staff member
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Deduction {
    pub id: Uuid,
    pub staff_id: Uuid,
    pub amount: Decimal,
    pub reason: String,
    pub date: DateTime<Utc>,
    pub created_at: DateTime<Utc>,
}

/// Program graduate still drawing a cigarette allowance
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Graduate {
    pub id: Uuid,
    pub full_name: String,
    pub cigarette_type: CigaretteType,
    pub daily_cigarette_cost: Option<Decimal>,
    pub graduated_at: DateTime<Utc>,
    pub is_active: bool,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Graduate {
    pub fn effective_daily_cigarette_cost(&self) -> Decimal {
        self.daily_cigarette_cost
            .unwrap_or_else(|| self.cigarette_type.daily_cost())
    }
}

/// Application user
///
/// `permissions` holds per-user grants on top of the role defaults; the
/// guard unions both. The admin role passes every check regardless of the
/// stored set.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct User {
    pub id: Uuid,
    pub username: String,
    pub display_name: String,
    pub role: Role,
    pub permissions: HashSet<Permission>,
    pub is_active: bool,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl User {
    /// Caller identity for the guard: role defaults plus stored grants
    pub fn caller_identity(&self) -> auth_rbac::CallerIdentity {
        auth_rbac::CallerIdentity::new(self.id, self.role, self.permissions.iter().copied())
    }
}

/// Facility-wide settings singleton
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Settings {
    pub facility_name: String,
    pub currency_code: String,
    pub currency_scale: u32,
    pub updated_at: DateTime<Utc>,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            facility_name: "RehabDesk Facility".to_string(),
            currency_code: "USD".to_string(),
            currency_scale: 2,
            updated_at: Utc::now(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn cigarette_cost_lookup() {
        assert_eq!(CigaretteType::None.daily_cost(), Decimal::ZERO);
        assert_eq!(CigaretteType::HalfPack.daily_cost(), dec!(25));
        assert_eq!(CigaretteType::FullPack.daily_cost(), dec!(50));
    }

    #[test]
    fn stored_cost_override_takes_precedence() {
        let mut staff = Staff {
            id: Uuid::new_v4(),
            full_name: "A. Orderly".to_string(),
            position: "orderly".to_string(),
            monthly_salary: dec!(6000),
            cigarette_type: CigaretteType::FullPack,
            daily_cigarette_cost: None,
            hired_at: Utc::now(),
            is_active: true,
            created_at: Utc::now(),
            updated_at: Utc::now(),
        };
        assert_eq!(staff.effective_daily_cigarette_cost(), dec!(50));

        staff.daily_cigarette_cost = Some(dec!(42));
        assert_eq!(staff.effective_daily_cigarette_cost(), dec!(42));
    }

    #[test]
    fn missing_cigarette_type_defaults_to_none() {
        // Explicit default rather than randomized backfill for legacy records
        assert_eq!(CigaretteType::default(), CigaretteType::None);
    }
}
