use record_store::{CigaretteType, Graduate, Patient, Staff};
use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use serde::{Deserialize, Serialize};

/// Anything that draws a daily cigarette allowance
///
/// The stored cost is an override; when absent the cost derives from the
/// allowance type. All three participant kinds resolve their cost through
/// this one rule.
pub trait AllowanceParticipant {
    fn cigarette_type(&self) -> CigaretteType;
    fn stored_daily_cost(&self) -> Option<Decimal>;

    fn effective_daily_cost(&self) -> Decimal {
        self.stored_daily_cost()
            .unwrap_or_else(|| self.cigarette_type().daily_cost())
    }
}

impl AllowanceParticipant for Patient {
    fn cigarette_type(&self) -> CigaretteType {
        self.cigarette_type
    }
    fn stored_daily_cost(&self) -> Option<Decimal> {
        self.daily_cigarette_cost
    }
}

impl AllowanceParticipant for Staff {
    fn cigarette_type(&self) -> CigaretteType {
        self.cigarette_type
    }
    fn stored_daily_cost(&self) -> Option<Decimal> {
        self.daily_cigarette_cost
    }
}

impl AllowanceParticipant for Graduate {
    fn cigarette_type(&self) -> CigaretteType {
        self.cigarette_type
    }
    fn stored_daily_cost(&self) -> Option<Decimal> {
        self.daily_cigarette_cost
    }
}

/// Purchasing statistics over a collection of allowance participants
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AllowanceStats {
    pub participant_count: usize,
    pub total_daily_cost: Decimal,
    pub full_pack_count: usize,
    pub half_pack_count: usize,
    pub total_packs_requested: Decimal,
    pub active_count: usize,
    pub inactive_count: usize,
}

impl AllowanceStats {
    pub fn empty() -> Self {
        Self {
            participant_count: 0,
            total_daily_cost: Decimal::ZERO,
            full_pack_count: 0,
            half_pack_count: 0,
            total_packs_requested: Decimal::ZERO,
            active_count: 0,
            inactive_count: 0,
        }
    }

    /// Combine two group aggregates; addition only, so merging per-group
    /// stats equals aggregating over the union
    pub fn merge(&self, other: &Self) -> Self {
        Self {
            participant_count: self.participant_count + other.participant_count,
            total_daily_cost: self.total_daily_cost + other.total_daily_cost,
            full_pack_count: self.full_pack_count + other.full_pack_count,
            half_pack_count: self.half_pack_count + other.half_pack_count,
            total_packs_requested: self.total_packs_requested + other.total_packs_requested,
            active_count: self.active_count + other.active_count,
            inactive_count: self.inactive_count + other.inactive_count,
        }
    }
}

/// Aggregate allowance statistics over any participant collection
pub fn aggregate<'a, T, I>(participants: I) -> AllowanceStats
where
    T: AllowanceParticipant + 'a,
    I: IntoIterator<Item = &'a T>,
{
    let mut stats = AllowanceStats::empty();
    for participant in participants {
        stats.participant_count += 1;
        stats.total_daily_cost += participant.effective_daily_cost();
        match participant.cigarette_type() {
            CigaretteType::FullPack => {
                stats.full_pack_count += 1;
                stats.active_count += 1;
                stats.total_packs_requested += Decimal::ONE;
            }
            CigaretteType::HalfPack => {
                stats.half_pack_count += 1;
                stats.active_count += 1;
                stats.total_packs_requested += dec!(0.5);
            }
            CigaretteType::None => stats.inactive_count += 1,
        }
    }
    stats
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Utc;
    use uuid::Uuid;

    fn graduate(cigarette_type: CigaretteType, override_cost: Option<Decimal>) -> Graduate {
        Graduate {
            id: Uuid::new_v4(),
            full_name: "G. Rad".to_string(),
            cigarette_type,
            daily_cigarette_cost: override_cost,
            graduated_at: Utc::now(),
            is_active: true,
            created_at: Utc::now(),
            updated_at: Utc::now(),
        }
    }

    #[test]
    fn counts_costs_and_packs() {
        let group = vec![
            graduate(CigaretteType::FullPack, None),
            graduate(CigaretteType::FullPack, None),
            graduate(CigaretteType::HalfPack, None),
            graduate(CigaretteType::None, None),
        ];
        let stats = aggregate(&group);

        assert_eq!(stats.participant_count, 4);
        assert_eq!(stats.total_daily_cost, dec!(125));
        assert_eq!(stats.full_pack_count, 2);
        assert_eq!(stats.half_pack_count, 1);
        assert_eq!(stats.total_packs_requested, dec!(2.5));
        assert_eq!(stats.active_count, 3);
        assert_eq!(stats.inactive_count, 1);
    }

    #[test]
    fn stored_override_feeds_the_cost_but_not_the_pack_counts() {
        let group = vec![graduate(CigaretteType::FullPack, Some(dec!(60)))];
        let stats = aggregate(&group);

        assert_eq!(stats.total_daily_cost, dec!(60));
        assert_eq!(stats.full_pack_count, 1);
        assert_eq!(stats.total_packs_requested, Decimal::ONE);
    }

    #[test]
    fn merged_groups_equal_the_aggregate_of_the_union() {
        let first: Vec<Graduate> = vec![
            graduate(CigaretteType::FullPack, None),
            graduate(CigaretteType::None, None),
        ];
        let second: Vec<Graduate> = vec![
            graduate(CigaretteType::HalfPack, None),
            graduate(CigaretteType::HalfPack, Some(dec!(30))),
        ];

        let merged = aggregate(&first).merge(&aggregate(&second));
        let union: Vec<Graduate> = first.into_iter().chain(second).collect();
        assert_eq!(merged, aggregate(&union));
    }
}
