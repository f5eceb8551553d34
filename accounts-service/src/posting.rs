use crate::error::{AccountsError, AccountsResult};
use chrono::{DateTime, Utc};
use record_store::{PatientRepository, Payment, PaymentMethod, PaymentRepository};
use rust_decimal::Decimal;
use std::sync::Arc;
use tracing::{debug, warn};
use uuid::Uuid;

/// Input for posting a new payment
#[derive(Debug, Clone)]
pub struct NewPayment {
    pub patient_id: Uuid,
    pub amount: Decimal,
    pub payment_date: DateTime<Utc>,
    pub method: PaymentMethod,
    pub reference: Option<String>,
    pub recorded_by: Uuid,
}

/// Payment posting service
///
/// Every write goes through here so the patient's running `total_paid`
/// stays in step with the payment list:
/// - post: counter += amount
/// - amount change: counter += (new - old)
/// - void: counter -= amount
/// The counter adjustment is atomic at the store (per-key), which is what
/// keeps concurrent postings against one patient from losing updates.
pub struct PaymentPostingService {
    patients: Arc<dyn PatientRepository>,
    payments: Arc<dyn PaymentRepository>,
}

impl PaymentPostingService {
    pub fn new(patients: Arc<dyn PatientRepository>, payments: Arc<dyn PaymentRepository>) -> Self {
        Self { patients, payments }
    }

    /// Post a new payment and credit the patient's running total
    ///
    /// The payment write succeeds even when the referenced patient is gone;
    /// the counter adjustment is best-effort and a miss is logged as an
    /// integrity warning rather than failing the collection.
    pub async fn post_payment(&self, input: NewPayment) -> AccountsResult<Payment> {
        if input.amount <= Decimal::ZERO {
            return Err(AccountsError::Validation(
                "payment amount must be greater than zero".to_string(),
            ));
        }

        let now = Utc::now();
        let payment = Payment {
            id: Uuid::new_v4(),
            patient_id: input.patient_id,
            amount: input.amount,
            payment_date: input.payment_date,
            method: input.method,
            reference: input.reference,
            recorded_by: input.recorded_by,
            created_at: now,
            updated_at: now,
        };
        let payment = self.payments.create_payment(payment).await?;
        debug!(payment_id = %payment.id, patient_id = %payment.patient_id, amount = %payment.amount, "payment posted");

        self.credit(payment.patient_id, payment.amount, payment.id)
            .await?;
        Ok(payment)
    }

    /// Change a payment's amount and apply the difference to the counter
    pub async fn update_amount(&self, payment_id: Uuid, new_amount: Decimal) -> AccountsResult<Payment> {
        if new_amount <= Decimal::ZERO {
            return Err(AccountsError::Validation(
                "payment amount must be greater than zero".to_string(),
            ));
        }

        let mut payment = self.payments.get_payment(payment_id).await?;
        let delta = new_amount - payment.amount;
        payment.amount = new_amount;
        payment.updated_at = Utc::now();
        let payment = self.payments.update_payment(payment).await?;

        if !delta.is_zero() {
            self.credit(payment.patient_id, delta, payment.id).await?;
        }
        Ok(payment)
    }

    /// Delete a payment and reverse its amount from the counter
    pub async fn void_payment(&self, payment_id: Uuid) -> AccountsResult<()> {
        let payment = self.payments.get_payment(payment_id).await?;
        self.payments.delete_payment(payment_id).await?;
        self.credit(payment.patient_id, -payment.amount, payment.id)
            .await?;
        Ok(())
    }

    async fn credit(&self, patient_id: Uuid, delta: Decimal, payment_id: Uuid) -> AccountsResult<()> {
        let existed = self.patients.adjust_total_paid(patient_id, delta).await?;
        if !existed {
            warn!(
                payment_id = %payment_id,
                patient_id = %patient_id,
                delta = %delta,
                "payment references a missing patient; running total not adjusted"
            );
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use record_store::{CigaretteType, InMemoryStore, Patient, PatientStatus};
    use rust_decimal_macros::dec;

    fn service_with_store() -> (PaymentPostingService, Arc<InMemoryStore>) {
        let store = Arc::new(InMemoryStore::new());
        let service = PaymentPostingService::new(
            Arc::clone(&store) as Arc<dyn PatientRepository>,
            Arc::clone(&store) as Arc<dyn PaymentRepository>,
        );
        (service, store)
    }

    async fn admit(store: &InMemoryStore) -> Patient {
        let now = Utc::now();
        let patient = Patient {
            id: Uuid::new_v4(),
            full_name: "P. Ostee".to_string(),
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
        store.create_patient(patient.clone()).await.unwrap();
        patient
    }

    fn new_payment(patient_id: Uuid, amount: Decimal) -> NewPayment {
        NewPayment {
            patient_id,
            amount,
            payment_date: Utc::now(),
            method: PaymentMethod::Cash,
            reference: None,
            recorded_by: Uuid::new_v4(),
        }
    }

    #[tokio::test]
    async fn posting_credits_the_running_total() {
        let (service, store) = service_with_store();
        let patient = admit(&store).await;

        service
            .post_payment(new_payment(patient.id, dec!(2000)))
            .await
            .unwrap();
        service
            .post_payment(new_payment(patient.id, dec!(1000)))
            .await
            .unwrap();

        let patient = store.get_patient(patient.id).await.unwrap();
        assert_eq!(patient.total_paid, dec!(3000));
    }

    #[tokio::test]
    async fn amount_update_applies_only_the_difference() {
        let (service, store) = service_with_store();
        let patient = admit(&store).await;

        let payment = service
            .post_payment(new_payment(patient.id, dec!(2000)))
            .await
            .unwrap();
        service
            .update_amount(payment.id, dec!(1500))
            .await
            .unwrap();

        let patient = store.get_patient(patient.id).await.unwrap();
        assert_eq!(patient.total_paid, dec!(1500));
    }

    #[tokio::test]
    async fn void_reverses_the_amount_with_zero_clamp() {
        let (service, store) = service_with_store();
        let patient = admit(&store).await;

        let payment = service
            .post_payment(new_payment(patient.id, dec!(800)))
            .await
            .unwrap();
        service.void_payment(payment.id).await.unwrap();

        let patient = store.get_patient(patient.id).await.unwrap();
        assert_eq!(patient.total_paid, Decimal::ZERO);
        assert!(store.get_payment(payment.id).await.is_err());
    }

    #[tokio::test]
    async fn non_positive_amounts_are_rejected() {
        let (service, store) = service_with_store();
        let patient = admit(&store).await;

        assert!(matches!(
            service
                .post_payment(new_payment(patient.id, Decimal::ZERO))
                .await,
            Err(AccountsError::Validation(_))
        ));
        assert!(matches!(
            service
                .post_payment(new_payment(patient.id, dec!(-10)))
                .await,
            Err(AccountsError::Validation(_))
        ));
    }

    #[tokio::test]
    async fn missing_patient_does_not_fail_the_payment_write() {
        let (service, store) = service_with_store();
        let orphan_patient_id = Uuid::new_v4();

        let payment = service
            .post_payment(new_payment(orphan_patient_id, dec!(500)))
            .await
            .unwrap();

        // The payment exists even though no counter could be adjusted
        let stored = store.get_payment(payment.id).await.unwrap();
        assert_eq!(stored.amount, dec!(500));
    }
}
