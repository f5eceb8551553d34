use crate::error::{PayrollError, PayrollResult};
use chrono::Utc;
use record_store::{Payroll, PayrollRepository, PayrollStatus, StaffRepository};
use rust_decimal::Decimal;
use std::sync::Arc;
use tracing::debug;
use uuid::Uuid;

/// Net salary for one pay period
///
/// No floor at zero: callers get the arithmetic result even when the
/// deduction side exceeds base plus bonuses.
pub fn net_salary(
    base_salary: Decimal,
    bonuses: Decimal,
    advances: Decimal,
    deductions: Decimal,
) -> Decimal {
    base_salary + bonuses - advances - deductions
}

/// Input for creating a payroll record
#[derive(Debug, Clone)]
pub struct NewPayroll {
    pub staff_id: Uuid,
    pub period: String,
    pub base_salary: Decimal,
    pub bonuses: Decimal,
    pub advances: Decimal,
    pub deductions: Decimal,
}

/// Partial update to a pending payroll record
#[derive(Debug, Clone, Default)]
pub struct PayrollUpdate {
    pub base_salary: Option<Decimal>,
    pub bonuses: Option<Decimal>,
    pub advances: Option<Decimal>,
    pub deductions: Option<Decimal>,
}

/// Payroll record service
///
/// The stored `net_salary` is never accepted from the caller; it is derived
/// here on create and re-derived on every input update, which keeps the
/// invariant `net == base + bonuses - advances - deductions` true after
/// every write.
pub struct PayrollService {
    staff: Arc<dyn StaffRepository>,
    payrolls: Arc<dyn PayrollRepository>,
}

impl PayrollService {
    pub fn new(staff: Arc<dyn StaffRepository>, payrolls: Arc<dyn PayrollRepository>) -> Self {
        Self { staff, payrolls }
    }

    pub async fn create(&self, input: NewPayroll) -> PayrollResult<Payroll> {
        Self::require_non_negative("base_salary", input.base_salary)?;
        Self::require_non_negative("bonuses", input.bonuses)?;
        Self::require_non_negative("advances", input.advances)?;
        Self::require_non_negative("deductions", input.deductions)?;
        if input.period.trim().is_empty() {
            return Err(PayrollError::Validation(
                "period must not be empty".to_string(),
            ));
        }
        // Payroll always references an existing staff member
        self.staff.get_staff(input.staff_id).await?;

        let now = Utc::now();
        let payroll = Payroll {
            id: Uuid::new_v4(),
            staff_id: input.staff_id,
            period: input.period,
            base_salary: input.base_salary,
            bonuses: input.bonuses,
            advances: input.advances,
            deductions: input.deductions,
            net_salary: net_salary(
                input.base_salary,
                input.bonuses,
                input.advances,
                input.deductions,
            ),
            status: PayrollStatus::Pending,
            paid_at: None,
            created_at: now,
            updated_at: now,
        };
        debug!(payroll_id = %payroll.id, staff_id = %payroll.staff_id, net = %payroll.net_salary, "payroll created");
        Ok(self.payrolls.create_payroll(payroll).await?)
    }

    pub async fn update(&self, id: Uuid, changes: PayrollUpdate) -> PayrollResult<Payroll> {
        let mut payroll = self.payrolls.get_payroll(id).await?;
        if payroll.status != PayrollStatus::Pending {
            return Err(PayrollError::InvalidTransition(format!(
                "payroll {} is not pending",
                id
            )));
        }

        if let Some(base_salary) = changes.base_salary {
            Self::require_non_negative("base_salary", base_salary)?;
            payroll.base_salary = base_salary;
        }
        if let Some(bonuses) = changes.bonuses {
            Self::require_non_negative("bonuses", bonuses)?;
            payroll.bonuses = bonuses;
        }
        if let Some(advances) = changes.advances {
            Self::require_non_negative("advances", advances)?;
            payroll.advances = advances;
        }
        if let Some(deductions) = changes.deductions {
            Self::require_non_negative("deductions", deductions)?;
            payroll.deductions = deductions;
        }

        payroll.net_salary = net_salary(
            payroll.base_salary,
            payroll.bonuses,
            payroll.advances,
            payroll.deductions,
        );
        payroll.updated_at = Utc::now();
        Ok(self.payrolls.update_payroll(payroll).await?)
    }

    /// Pending → paid, stamping the payout instant
    pub async fn mark_paid(&self, id: Uuid) -> PayrollResult<Payroll> {
        let mut payroll = self.payrolls.get_payroll(id).await?;
        if payroll.status != PayrollStatus::Pending {
            return Err(PayrollError::InvalidTransition(format!(
                "payroll {} is not pending",
                id
            )));
        }
        payroll.status = PayrollStatus::Paid;
        payroll.paid_at = Some(Utc::now());
        payroll.updated_at = Utc::now();
        Ok(self.payrolls.update_payroll(payroll).await?)
    }

    /// Pending → cancelled; paid and cancelled are terminal
    pub async fn cancel(&self, id: Uuid) -> PayrollResult<Payroll> {
        let mut payroll = self.payrolls.get_payroll(id).await?;
        if payroll.status != PayrollStatus::Pending {
            return Err(PayrollError::InvalidTransition(format!(
                "payroll {} is not pending",
                id
            )));
        }
        payroll.status = PayrollStatus::Cancelled;
        payroll.updated_at = Utc::now();
        Ok(self.payrolls.update_payroll(payroll).await?)
    }

    fn require_non_negative(field: &str, value: Decimal) -> PayrollResult<()> {
        if value < Decimal::ZERO {
            return Err(PayrollError::Validation(format!(
                "{} must not be negative",
                field
            )));
        }
        Ok(())
    }
}
