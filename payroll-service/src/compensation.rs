use crate::error::{PayrollError, PayrollResult};
use chrono::{DateTime, Utc};
use record_store::{Bonus, BonusRepository, Deduction, DeductionRepository, StaffRepository};
use rust_decimal::Decimal;
use std::sync::Arc;
use uuid::Uuid;

/// Input for granting a bonus or recording a deduction
#[derive(Debug, Clone)]
pub struct NewAdjustment {
    pub staff_id: Uuid,
    pub amount: Decimal,
    pub reason: String,
    pub date: DateTime<Utc>,
}

/// One-off bonus and deduction records
pub struct CompensationService {
    staff: Arc<dyn StaffRepository>,
    bonuses: Arc<dyn BonusRepository>,
    deductions: Arc<dyn DeductionRepository>,
}

impl CompensationService {
    pub fn new(
        staff: Arc<dyn StaffRepository>,
        bonuses: Arc<dyn BonusRepository>,
        deductions: Arc<dyn DeductionRepository>,
    ) -> Self {
        Self {
            staff,
            bonuses,
            deductions,
        }
    }

    pub async fn grant_bonus(&self, input: NewAdjustment) -> PayrollResult<Bonus> {
        self.validate(&input).await?;
        let bonus = Bonus {
            id: Uuid::new_v4(),
            staff_id: input.staff_id,
            amount: input.amount,
            reason: input.reason,
            date: input.date,
            created_at: Utc::now(),
        };
        Ok(self.bonuses.create_bonus(bonus).await?)
    }

    pub async fn record_deduction(&self, input: NewAdjustment) -> PayrollResult<Deduction> {
        self.validate(&input).await?;
        let deduction = Deduction {
            id: Uuid::new_v4(),
            staff_id: input.staff_id,
            amount: input.amount,
            reason: input.reason,
            date: input.date,
            created_at: Utc::now(),
        };
        Ok(self.deductions.create_deduction(deduction).await?)
    }

    async fn validate(&self, input: &NewAdjustment) -> PayrollResult<()> {
        if input.amount <= Decimal::ZERO {
            return Err(PayrollError::Validation(
                "amount must be greater than zero".to_string(),
            ));
        }
        self.staff.get_staff(input.staff_id).await?;
        Ok(())
    }
}
