//! Property tests over the account arithmetic

use accounts_service::{summarize_account, AccountStanding};
use chrono::{Duration, TimeZone, Utc};
use proptest::prelude::*;
use record_store::{CigaretteType, Patient, PatientStatus, Payment, PaymentMethod};
use rust_decimal::Decimal;
use uuid::Uuid;

fn patient(daily_cost_cents: i64, cigarette_cents: i64, days: i64) -> Patient {
    let admission = Utc.with_ymd_and_hms(2024, 1, 1, 0, 0, 0).unwrap();
    Patient {
        id: Uuid::new_v4(),
        full_name: "P. Roptest".to_string(),
        admission_date: admission,
        discharge_date: Some(admission + Duration::days(days)),
        daily_cost: Decimal::new(daily_cost_cents, 2),
        cigarette_type: CigaretteType::None,
        daily_cigarette_cost: Some(Decimal::new(cigarette_cents, 2)),
        status: PatientStatus::Discharged,
        total_paid: Decimal::ZERO,
        notes: None,
        created_at: Utc::now(),
        updated_at: Utc::now(),
    }
}

fn payments_of(patient_id: Uuid, amounts_cents: &[i64]) -> Vec<Payment> {
    amounts_cents
        .iter()
        .map(|cents| Payment {
            id: Uuid::new_v4(),
            patient_id,
            amount: Decimal::new(*cents, 2),
            payment_date: Utc::now(),
            method: PaymentMethod::Card,
            reference: None,
            recorded_by: Uuid::new_v4(),
            created_at: Utc::now(),
            updated_at: Utc::now(),
        })
        .collect()
}

proptest! {
    #[test]
    fn balance_is_grand_total_minus_payment_sum(
        daily_cost_cents in 0i64..5_000_00,
        cigarette_cents in 0i64..100_00,
        days in 0i64..365,
        amounts_cents in prop::collection::vec(1i64..10_000_00, 0..12),
    ) {
        let p = patient(daily_cost_cents, cigarette_cents, days);
        let payments = payments_of(p.id, &amounts_cents);
        let summary = summarize_account(&p, &payments, Utc::now());

        let paid: Decimal = amounts_cents.iter().map(|c| Decimal::new(*c, 2)).sum();
        prop_assert_eq!(summary.total_paid, paid);
        prop_assert_eq!(summary.balance, summary.grand_total - paid);
        prop_assert_eq!(
            summary.grand_total,
            summary.total_treatment_cost + summary.total_cigarette_cost
        );
    }

    #[test]
    fn standing_tracks_the_balance_sign_exactly(
        daily_cost_cents in 0i64..5_000_00,
        days in 0i64..365,
        amounts_cents in prop::collection::vec(1i64..10_000_00, 0..12),
    ) {
        let p = patient(daily_cost_cents, 0, days);
        let payments = payments_of(p.id, &amounts_cents);
        let summary = summarize_account(&p, &payments, Utc::now());

        let expected = if summary.balance > Decimal::ZERO {
            AccountStanding::Owing
        } else if summary.balance < Decimal::ZERO {
            AccountStanding::Overpaid
        } else {
            AccountStanding::Settled
        };
        prop_assert_eq!(summary.standing, expected);
    }
}
