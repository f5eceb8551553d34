use crate::account::{summarize_account, AccountStanding, AccountSummary};
use crate::error::AccountsResult;
use chrono::{DateTime, Utc};
use record_store::{PatientRepository, PaymentRepository};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::sync::Arc;

/// Facility-wide finance figures rolled up from patient accounts
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FinanceSummary {
    pub as_of: DateTime<Utc>,
    pub patient_count: usize,
    pub total_billed: Decimal,
    pub total_collected: Decimal,
    pub total_outstanding: Decimal,
    pub total_overpaid: Decimal,
    pub owing_count: usize,
    pub settled_count: usize,
    pub overpaid_count: usize,
}

/// Roll a set of account summaries up into one finance summary
///
/// Addition is the only operation involved, so per-group summaries combine
/// into the same figures as one summary over the union.
pub fn combine_summaries(summaries: &[AccountSummary], as_of: DateTime<Utc>) -> FinanceSummary {
    let mut combined = FinanceSummary {
        as_of,
        patient_count: summaries.len(),
        total_billed: Decimal::ZERO,
        total_collected: Decimal::ZERO,
        total_outstanding: Decimal::ZERO,
        total_overpaid: Decimal::ZERO,
        owing_count: 0,
        settled_count: 0,
        overpaid_count: 0,
    };
    for summary in summaries {
        combined.total_billed += summary.grand_total;
        combined.total_collected += summary.total_paid;
        match summary.standing {
            AccountStanding::Owing => {
                combined.owing_count += 1;
                combined.total_outstanding += summary.balance;
            }
            AccountStanding::Settled => combined.settled_count += 1,
            AccountStanding::Overpaid => {
                combined.overpaid_count += 1;
                combined.total_overpaid += -summary.balance;
            }
        }
    }
    combined
}

/// Builds per-patient summaries and facility rollups from the store
pub struct FinanceReporter {
    patients: Arc<dyn PatientRepository>,
    payments: Arc<dyn PaymentRepository>,
}

impl FinanceReporter {
    pub fn new(patients: Arc<dyn PatientRepository>, payments: Arc<dyn PaymentRepository>) -> Self {
        Self { patients, payments }
    }

    /// Account summary for one patient, recomputed from the payment list
    pub async fn account_summary(&self, patient_id: uuid::Uuid) -> AccountsResult<AccountSummary> {
        let patient = self.patients.get_patient(patient_id).await?;
        let payments = self.payments.list_payments_by_patient(patient_id).await?;
        Ok(summarize_account(&patient, &payments, Utc::now()))
    }

    /// Facility summary over active patients, or all when `active_only` is
    /// false
    pub async fn facility_summary(&self, active_only: bool) -> AccountsResult<FinanceSummary> {
        let now = Utc::now();
        let patients = if active_only {
            self.patients.list_active_patients().await?
        } else {
            self.patients.list_patients().await?
        };

        let mut summaries = Vec::with_capacity(patients.len());
        for patient in &patients {
            let payments = self.payments.list_payments_by_patient(patient.id).await?;
            summaries.push(summarize_account(patient, &payments, now));
        }
        Ok(combine_summaries(&summaries, now))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;
    use record_store::{CigaretteType, Patient, Payment, PaymentMethod, PatientStatus};
    use rust_decimal_macros::dec;
    use uuid::Uuid;

    fn discharged_patient(daily_cost: Decimal, days: i64) -> Patient {
        let admission = Utc.with_ymd_and_hms(2024, 2, 1, 0, 0, 0).unwrap();
        Patient {
            id: Uuid::new_v4(),
            full_name: "R. Ollup".to_string(),
            admission_date: admission,
            discharge_date: Some(admission + chrono::Duration::days(days)),
            daily_cost,
            cigarette_type: CigaretteType::None,
            daily_cigarette_cost: None,
            status: PatientStatus::Discharged,
            total_paid: Decimal::ZERO,
            notes: None,
            created_at: Utc::now(),
            updated_at: Utc::now(),
        }
    }

    fn payment(patient_id: Uuid, amount: Decimal) -> Payment {
        Payment {
            id: Uuid::new_v4(),
            patient_id,
            amount,
            payment_date: Utc::now(),
            method: PaymentMethod::Transfer,
            reference: None,
            recorded_by: Uuid::new_v4(),
            created_at: Utc::now(),
            updated_at: Utc::now(),
        }
    }

    #[test]
    fn grand_totals_equal_the_sum_of_group_totals() {
        let now = Utc::now();
        let patients: Vec<Patient> = (1..=4)
            .map(|i| discharged_patient(Decimal::from(100 * i), 10))
            .collect();
        let summaries: Vec<AccountSummary> = patients
            .iter()
            .map(|p| {
                let paid = payment(p.id, dec!(600));
                summarize_account(p, std::slice::from_ref(&paid), now)
            })
            .collect();

        let whole = combine_summaries(&summaries, now);
        let first_group = combine_summaries(&summaries[..2], now);
        let second_group = combine_summaries(&summaries[2..], now);

        assert_eq!(
            whole.total_billed,
            first_group.total_billed + second_group.total_billed
        );
        assert_eq!(
            whole.total_collected,
            first_group.total_collected + second_group.total_collected
        );
        assert_eq!(
            whole.total_outstanding,
            first_group.total_outstanding + second_group.total_outstanding
        );
        assert_eq!(
            whole.owing_count,
            first_group.owing_count + second_group.owing_count
        );
    }

    #[test]
    fn standing_counts_partition_the_population() {
        let now = Utc::now();
        let owing = discharged_patient(dec!(500), 10); // bills 5000
        let settled = discharged_patient(dec!(100), 10); // bills 1000
        let overpaid = discharged_patient(dec!(100), 10); // bills 1000

        let summaries = vec![
            summarize_account(&owing, &[payment(owing.id, dec!(1000))], now),
            summarize_account(&settled, &[payment(settled.id, dec!(1000))], now),
            summarize_account(&overpaid, &[payment(overpaid.id, dec!(1500))], now),
        ];
        let combined = combine_summaries(&summaries, now);

        assert_eq!(combined.patient_count, 3);
        assert_eq!(combined.owing_count, 1);
        assert_eq!(combined.settled_count, 1);
        assert_eq!(combined.overpaid_count, 1);
        assert_eq!(combined.total_outstanding, dec!(4000));
        assert_eq!(combined.total_overpaid, dec!(500));
    }
}
