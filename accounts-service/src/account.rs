use chrono::{DateTime, Utc};
use record_store::{Patient, Payment};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

const SECONDS_PER_DAY: i64 = 86_400;

/// Three-state standing derived from the balance sign
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum AccountStanding {
    Owing,
    Settled,
    Overpaid,
}

impl AccountStanding {
    pub fn from_balance(balance: Decimal) -> Self {
        if balance > Decimal::ZERO {
            Self::Owing
        } else if balance < Decimal::ZERO {
            Self::Overpaid
        } else {
            Self::Settled
        }
    }
}

/// Financial summary of one patient's stay
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AccountSummary {
    pub patient_id: Uuid,
    pub days: i64,
    pub daily_cost: Decimal,
    pub daily_cigarette_cost: Decimal,
    pub total_treatment_cost: Decimal,
    pub total_cigarette_cost: Decimal,
    pub grand_total: Decimal,
    pub total_paid: Decimal,
    pub balance: Decimal,
    pub standing: AccountStanding,
    pub as_of: DateTime<Utc>,
}

/// Whole days of stay between admission and the as-of instant
///
/// Any started day counts in full (ceiling), and a discharge before
/// admission yields zero rather than a negative count.
pub fn stay_days(admission: DateTime<Utc>, as_of: DateTime<Utc>) -> i64 {
    let seconds = (as_of - admission).num_seconds();
    if seconds <= 0 {
        return 0;
    }
    (seconds + SECONDS_PER_DAY - 1) / SECONDS_PER_DAY
}

/// Aggregate a patient account from its payment list
///
/// `now` is only consulted for patients without a discharge date; a
/// discharged patient's account is frozen at the discharge instant. The
/// summary recomputes `total_paid` from the payment list rather than
/// trusting the stored counter, so a desynchronized counter never skews a
/// reported balance.
pub fn summarize_account(patient: &Patient, payments: &[Payment], now: DateTime<Utc>) -> AccountSummary {
    let as_of = patient.discharge_date.unwrap_or(now);
    let days = stay_days(patient.admission_date, as_of);
    let day_count = Decimal::from(days);

    let daily_cigarette_cost = patient.effective_daily_cigarette_cost();
    let total_treatment_cost = day_count * patient.daily_cost;
    let total_cigarette_cost = day_count * daily_cigarette_cost;
    let grand_total = total_treatment_cost + total_cigarette_cost;
    let total_paid: Decimal = payments.iter().map(|p| p.amount).sum();
    let balance = grand_total - total_paid;

    AccountSummary {
        patient_id: patient.id,
        days,
        daily_cost: patient.daily_cost,
        daily_cigarette_cost,
        total_treatment_cost,
        total_cigarette_cost,
        grand_total,
        total_paid,
        balance,
        standing: AccountStanding::from_balance(balance),
        as_of,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;
    use record_store::{CigaretteType, PatientStatus, PaymentMethod};
    use rust_decimal_macros::dec;

    fn patient_admitted_jan_2024() -> Patient {
        Patient {
            id: Uuid::new_v4(),
            full_name: "T. Resident".to_string(),
            admission_date: Utc.with_ymd_and_hms(2024, 1, 1, 0, 0, 0).unwrap(),
            discharge_date: Some(Utc.with_ymd_and_hms(2024, 1, 11, 0, 0, 0).unwrap()),
            daily_cost: dec!(500),
            cigarette_type: CigaretteType::FullPack,
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
            method: PaymentMethod::Cash,
            reference: None,
            recorded_by: Uuid::new_v4(),
            created_at: Utc::now(),
            updated_at: Utc::now(),
        }
    }

    #[test]
    fn ten_day_stay_with_partial_payments_is_owing() {
        let patient = patient_admitted_jan_2024();
        let payments = vec![
            payment(patient.id, dec!(2000)),
            payment(patient.id, dec!(1000)),
        ];

        let summary = summarize_account(&patient, &payments, Utc::now());
        assert_eq!(summary.days, 10);
        assert_eq!(summary.total_treatment_cost, dec!(5000));
        assert_eq!(summary.total_cigarette_cost, dec!(500));
        assert_eq!(summary.grand_total, dec!(5500));
        assert_eq!(summary.total_paid, dec!(3000));
        assert_eq!(summary.balance, dec!(2500));
        assert_eq!(summary.standing, AccountStanding::Owing);
    }

    #[test]
    fn exact_payment_is_settled_at_the_zero_boundary() {
        let patient = patient_admitted_jan_2024();
        let payments = vec![payment(patient.id, dec!(5500))];

        let summary = summarize_account(&patient, &payments, Utc::now());
        assert_eq!(summary.balance, Decimal::ZERO);
        assert_eq!(summary.standing, AccountStanding::Settled);
    }

    #[test]
    fn overpayment_goes_negative() {
        let patient = patient_admitted_jan_2024();
        let payments = vec![payment(patient.id, dec!(6000))];

        let summary = summarize_account(&patient, &payments, Utc::now());
        assert_eq!(summary.balance, dec!(-500));
        assert_eq!(summary.standing, AccountStanding::Overpaid);
    }

    #[test]
    fn started_day_counts_in_full() {
        let admission = Utc.with_ymd_and_hms(2024, 3, 1, 8, 0, 0).unwrap();
        let same_evening = Utc.with_ymd_and_hms(2024, 3, 1, 20, 0, 0).unwrap();
        assert_eq!(stay_days(admission, same_evening), 1);

        let next_morning = Utc.with_ymd_and_hms(2024, 3, 2, 8, 0, 1).unwrap();
        assert_eq!(stay_days(admission, next_morning), 2);
    }

    #[test]
    fn discharge_before_admission_clamps_to_zero_days() {
        let admission = Utc.with_ymd_and_hms(2024, 3, 10, 0, 0, 0).unwrap();
        let earlier = Utc.with_ymd_and_hms(2024, 3, 1, 0, 0, 0).unwrap();
        assert_eq!(stay_days(admission, earlier), 0);
    }

    #[test]
    fn active_patient_uses_the_supplied_now() {
        let mut patient = patient_admitted_jan_2024();
        patient.discharge_date = None;
        patient.status = PatientStatus::Active;

        let now = Utc.with_ymd_and_hms(2024, 1, 6, 0, 0, 0).unwrap();
        let summary = summarize_account(&patient, &[], now);
        assert_eq!(summary.days, 5);
        assert_eq!(summary.as_of, now);
    }

    #[test]
    fn aggregation_is_idempotent() {
        let patient = patient_admitted_jan_2024();
        let payments = vec![payment(patient.id, dec!(1234.56))];
        let now = Utc::now();

        let first = summarize_account(&patient, &payments, now);
        let second = summarize_account(&patient, &payments, now);
        assert_eq!(first.balance, second.balance);
        assert_eq!(first.grand_total, second.grand_total);
        assert_eq!(first.standing, second.standing);
    }
}
