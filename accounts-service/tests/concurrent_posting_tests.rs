//! Concurrent payment posting against a single patient
//!
//! N tasks each post one payment of amount A; the final running total must
//! be exactly N * A.

use accounts_service::{NewPayment, PaymentPostingService};
use chrono::Utc;
use record_store::{
    CigaretteType, InMemoryStore, Patient, PatientRepository, PatientStatus, PaymentMethod,
    PaymentRepository,
};
use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use std::sync::Arc;
use uuid::Uuid;

#[tokio::test(flavor = "multi_thread", worker_threads = 8)]
async fn concurrent_posting_preserves_the_running_total() {
    let store = Arc::new(InMemoryStore::new());
    let service = Arc::new(PaymentPostingService::new(
        Arc::clone(&store) as Arc<dyn PatientRepository>,
        Arc::clone(&store) as Arc<dyn PaymentRepository>,
    ));

    let now = Utc::now();
    let patient = Patient {
        id: Uuid::new_v4(),
        full_name: "N. Tasks".to_string(),
        admission_date: now,
        discharge_date: None,
        daily_cost: dec!(500),
        cigarette_type: CigaretteType::None,
        daily_cigarette_cost: None,
        status: PatientStatus::Active,
        total_paid: Decimal::ZERO,
        notes: None,
        created_at: now,
        updated_at: now,
    };
    let patient_id = patient.id;
    store.create_patient(patient).await.unwrap();

    const TASKS: u32 = 50;
    let amount = dec!(120);

    let mut handles = Vec::new();
    for _ in 0..TASKS {
        let service = Arc::clone(&service);
        handles.push(tokio::spawn(async move {
            service
                .post_payment(NewPayment {
                    patient_id,
                    amount,
                    payment_date: Utc::now(),
                    method: PaymentMethod::Cash,
                    reference: None,
                    recorded_by: Uuid::new_v4(),
                })
                .await
        }));
    }
    for handle in handles {
        handle.await.unwrap().unwrap();
    }

    let patient = store.get_patient(patient_id).await.unwrap();
    assert_eq!(patient.total_paid, amount * Decimal::from(TASKS));

    // Stored counter and the recomputed payment sum agree
    let payments = store.list_payments_by_patient(patient_id).await.unwrap();
    let recomputed: Decimal = payments.iter().map(|p| p.amount).sum();
    assert_eq!(patient.total_paid, recomputed);
}
