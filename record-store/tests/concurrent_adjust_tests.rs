//! Lost-update test for the patient running-total adjustment
//!
//! The classic hazard: two postings read the same counter value, both add
//! their amount, and one addition disappears. The store contract requires
//! the adjust to be atomic per patient, so N concurrent adjustments of A
//! must land on exactly N * A.

use chrono::Utc;
use record_store::*;
use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use std::sync::Arc;
use uuid::Uuid;

fn admitted_patient() -> Patient {
    Patient {
        id: Uuid::new_v4(),
        full_name: "Concurrent C.".to_string(),
        admission_date: Utc::now(),
        discharge_date: None,
        daily_cost: dec!(500),
        cigarette_type: CigaretteType::None,
        daily_cigarette_cost: None,
        status: PatientStatus::Active,
        total_paid: Decimal::ZERO,
        notes: None,
        created_at: Utc::now(),
        updated_at: Utc::now(),
    }
}

#[tokio::test(flavor = "multi_thread", worker_threads = 8)]
async fn concurrent_adjustments_do_not_lose_updates() {
    let store = Arc::new(InMemoryStore::new());
    let patient = admitted_patient();
    let patient_id = patient.id;
    store.create_patient(patient).await.unwrap();

    const TASKS: u32 = 64;
    let amount = dec!(250);

    let mut handles = Vec::new();
    for _ in 0..TASKS {
        let store = Arc::clone(&store);
        handles.push(tokio::spawn(async move {
            store.adjust_total_paid(patient_id, amount).await
        }));
    }
    for handle in handles {
        assert!(handle.await.unwrap().unwrap());
    }

    let patient = store.get_patient(patient_id).await.unwrap();
    assert_eq!(patient.total_paid, amount * Decimal::from(TASKS));
}

#[tokio::test(flavor = "multi_thread", worker_threads = 8)]
async fn interleaved_credits_and_reversals_balance_out() {
    let store = Arc::new(InMemoryStore::new());
    let patient = admitted_patient();
    let patient_id = patient.id;
    store.create_patient(patient).await.unwrap();

    // Seed enough balance that reversals never hit the zero clamp
    store
        .adjust_total_paid(patient_id, dec!(100000))
        .await
        .unwrap();

    let mut handles = Vec::new();
    for i in 0..40u32 {
        let store = Arc::clone(&store);
        let delta = if i % 2 == 0 { dec!(75) } else { dec!(-75) };
        handles.push(tokio::spawn(async move {
            store.adjust_total_paid(patient_id, delta).await
        }));
    }
    for handle in handles {
        assert!(handle.await.unwrap().unwrap());
    }

    let patient = store.get_patient(patient_id).await.unwrap();
    assert_eq!(patient.total_paid, dec!(100000));
}
