use crate::error::AllowanceResult;
use crate::stats::{aggregate, AllowanceStats};
use record_store::{GraduateRepository, PatientRepository, StaffRepository};
use serde::{Deserialize, Serialize};
use std::sync::Arc;

/// Allowance report grouped by participant kind, plus the combined totals
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AllowanceReport {
    pub patients: AllowanceStats,
    pub staff: AllowanceStats,
    pub graduates: AllowanceStats,
    pub combined: AllowanceStats,
}

/// Builds the daily allowance report over active participants
pub struct AllowanceReporter {
    patients: Arc<dyn PatientRepository>,
    staff: Arc<dyn StaffRepository>,
    graduates: Arc<dyn GraduateRepository>,
}

impl AllowanceReporter {
    pub fn new(
        patients: Arc<dyn PatientRepository>,
        staff: Arc<dyn StaffRepository>,
        graduates: Arc<dyn GraduateRepository>,
    ) -> Self {
        Self {
            patients,
            staff,
            graduates,
        }
    }

    pub async fn daily_report(&self) -> AllowanceResult<AllowanceReport> {
        let patients = aggregate(&self.patients.list_active_patients().await?);
        let staff = aggregate(&self.staff.list_active_staff().await?);
        let graduates = aggregate(&self.graduates.list_active_graduates().await?);
        let combined = patients.merge(&staff).merge(&graduates);

        Ok(AllowanceReport {
            patients,
            staff,
            graduates,
            combined,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Utc;
    use record_store::*;
    use rust_decimal::Decimal;
    use rust_decimal_macros::dec;
    use uuid::Uuid;

    async fn seed(store: &InMemoryStore) {
        let now = Utc::now();
        store
            .create_patient(Patient {
                id: Uuid::new_v4(),
                full_name: "Smoker P.".to_string(),
                admission_date: now,
                discharge_date: None,
                daily_cost: dec!(500),
                cigarette_type: CigaretteType::FullPack,
                daily_cigarette_cost: None,
                status: PatientStatus::Active,
                total_paid: Decimal::ZERO,
                notes: None,
                created_at: now,
                updated_at: now,
            })
            .await
            .unwrap();
        store
            .create_staff(Staff {
                id: Uuid::new_v4(),
                full_name: "Half-pack H.".to_string(),
                position: "guard".to_string(),
                monthly_salary: dec!(4500),
                cigarette_type: CigaretteType::HalfPack,
                daily_cigarette_cost: None,
                hired_at: now,
                is_active: true,
                created_at: now,
                updated_at: now,
            })
            .await
            .unwrap();
        // Inactive staff never reach the report
        store
            .create_staff(Staff {
                id: Uuid::new_v4(),
                full_name: "Former F.".to_string(),
                position: "cook".to_string(),
                monthly_salary: dec!(4000),
                cigarette_type: CigaretteType::FullPack,
                daily_cigarette_cost: None,
                hired_at: now,
                is_active: false,
                created_at: now,
                updated_at: now,
            })
            .await
            .unwrap();
        store
            .create_graduate(Graduate {
                id: Uuid::new_v4(),
                full_name: "Grad G.".to_string(),
                cigarette_type: CigaretteType::None,
                daily_cigarette_cost: None,
                graduated_at: now,
                is_active: true,
                created_at: now,
                updated_at: now,
            })
            .await
            .unwrap();
    }

    #[tokio::test]
    async fn report_groups_and_combined_totals_agree() {
        let store = Arc::new(InMemoryStore::new());
        seed(&store).await;

        let reporter = AllowanceReporter::new(
            Arc::clone(&store) as Arc<dyn PatientRepository>,
            Arc::clone(&store) as Arc<dyn StaffRepository>,
            Arc::clone(&store) as Arc<dyn GraduateRepository>,
        );
        let report = reporter.daily_report().await.unwrap();

        assert_eq!(report.patients.full_pack_count, 1);
        assert_eq!(report.staff.half_pack_count, 1);
        assert_eq!(report.graduates.inactive_count, 1);

        // Inactive staff excluded
        assert_eq!(report.staff.participant_count, 1);

        assert_eq!(report.combined.total_daily_cost, dec!(75));
        assert_eq!(report.combined.total_packs_requested, dec!(1.5));
        assert_eq!(
            report.combined.participant_count,
            report.patients.participant_count
                + report.staff.participant_count
                + report.graduates.participant_count
        );
    }
}
