use crate::error::{PayrollError, PayrollResult};
use chrono::Utc;
use record_store::{Advance, AdvanceRepository, AdvanceStatus, StaffRepository};
use rust_decimal::Decimal;
use std::sync::Arc;
use tracing::debug;
use uuid::Uuid;

/// Repayment window bounds, inclusive
pub const MIN_REPAYMENT_MONTHS: u32 = 1;
pub const MAX_REPAYMENT_MONTHS: u32 = 24;

/// Fixed monthly installment for an advance
///
/// Exact decimal division rounded to the currency scale, so the installment
/// times the month count lands within one rounding unit per installment of
/// the advanced amount.
pub fn monthly_deduction(amount: Decimal, repayment_months: u32, scale: u32) -> Decimal {
    (amount / Decimal::from(repayment_months)).round_dp(scale)
}

/// Input for requesting a salary advance
#[derive(Debug, Clone)]
pub struct NewAdvance {
    pub staff_id: Uuid,
    pub amount: Decimal,
    pub repayment_months: u32,
}

/// Salary advance service
pub struct AdvanceService {
    staff: Arc<dyn StaffRepository>,
    advances: Arc<dyn AdvanceRepository>,
    currency_scale: u32,
}

impl AdvanceService {
    pub fn new(
        staff: Arc<dyn StaffRepository>,
        advances: Arc<dyn AdvanceRepository>,
        currency_scale: u32,
    ) -> Self {
        Self {
            staff,
            advances,
            currency_scale,
        }
    }

    pub async fn request(&self, input: NewAdvance) -> PayrollResult<Advance> {
        if input.amount <= Decimal::ZERO {
            return Err(PayrollError::Validation(
                "advance amount must be greater than zero".to_string(),
            ));
        }
        if !(MIN_REPAYMENT_MONTHS..=MAX_REPAYMENT_MONTHS).contains(&input.repayment_months) {
            return Err(PayrollError::Validation(format!(
                "repayment_months must be between {} and {}",
                MIN_REPAYMENT_MONTHS, MAX_REPAYMENT_MONTHS
            )));
        }
        self.staff.get_staff(input.staff_id).await?;

        let now = Utc::now();
        let advance = Advance {
            id: Uuid::new_v4(),
            staff_id: input.staff_id,
            amount: input.amount,
            repayment_months: input.repayment_months,
            monthly_deduction: monthly_deduction(
                input.amount,
                input.repayment_months,
                self.currency_scale,
            ),
            remaining_amount: input.amount,
            status: AdvanceStatus::Pending,
            requested_at: now,
            decided_at: None,
            created_at: now,
            updated_at: now,
        };
        debug!(advance_id = %advance.id, staff_id = %advance.staff_id, installment = %advance.monthly_deduction, "advance requested");
        Ok(self.advances.create_advance(advance).await?)
    }

    pub async fn approve(&self, id: Uuid) -> PayrollResult<Advance> {
        self.decide(id, AdvanceStatus::Approved).await
    }

    pub async fn reject(&self, id: Uuid) -> PayrollResult<Advance> {
        self.decide(id, AdvanceStatus::Rejected).await
    }

    /// Knock one installment off an approved advance
    ///
    /// The final installment takes whatever remains, absorbing the rounding
    /// drift the division left behind, so the remaining amount lands on zero
    /// and never goes negative.
    pub async fn apply_installment(&self, id: Uuid) -> PayrollResult<Advance> {
        let mut advance = self.advances.get_advance(id).await?;
        if advance.status != AdvanceStatus::Approved {
            return Err(PayrollError::InvalidTransition(format!(
                "advance {} is not approved",
                id
            )));
        }
        let two_installments = advance.monthly_deduction * Decimal::from(2u32);
        // A sub-cent advance rounds to a zero installment; close it out whole
        let installment = if advance.monthly_deduction.is_zero()
            || advance.remaining_amount < two_installments
        {
            advance.remaining_amount
        } else {
            advance.monthly_deduction
        };
        advance.remaining_amount -= installment;
        advance.updated_at = Utc::now();
        Ok(self.advances.update_advance(advance).await?)
    }

    async fn decide(&self, id: Uuid, status: AdvanceStatus) -> PayrollResult<Advance> {
        let mut advance = self.advances.get_advance(id).await?;
        if advance.status != AdvanceStatus::Pending {
            return Err(PayrollError::InvalidTransition(format!(
                "advance {} is not pending",
                id
            )));
        }
        advance.status = status;
        advance.decided_at = Some(Utc::now());
        advance.updated_at = Utc::now();
        Ok(self.advances.update_advance(advance).await?)
    }
}
