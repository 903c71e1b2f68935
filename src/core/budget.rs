//! Budget allocation shared by every strategy.
//!
//! Flight and activity costs arrive pre-scaled by traveler count; the hotel
//! cost is already a room total. With budget left over, food and misc split
//! the remainder 60/40. On a shortfall the two historical policies diverge
//! and are kept as explicit modes rather than unified, because each one's
//! outputs are pinned by the strategies that use it.

use crate::catalog;
use crate::types::{CostBreakdown, HotelTier};

/// What to charge for food and misc when the chosen components already meet
/// or exceed the total budget.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum ShortfallMode {
    /// Tier-based daily food rate plus a flat per-day misc rate, the
    /// monolithic planner's heritage.
    DailyRates { duration_days: u32, tier: HotelTier },
    /// Fixed share of the total budget: food 15%, misc 10%, the
    /// specialist/toolkit heritage.
    BudgetShare,
}

/// Split a trip budget into the five fixed cost categories.
pub fn allocate(
    total_budget: f64,
    flight_cost: f64,
    hotel_cost: f64,
    activities_cost: f64,
    mode: ShortfallMode,
) -> CostBreakdown {
    let remaining = total_budget - (flight_cost + hotel_cost + activities_cost);

    let (food, misc) = if remaining > 0.0 {
        (remaining * 0.60, remaining * 0.40)
    } else {
        match mode {
            ShortfallMode::DailyRates {
                duration_days,
                tier,
            } => (
                catalog::daily_food_budget(duration_days, tier),
                catalog::misc_costs(duration_days),
            ),
            ShortfallMode::BudgetShare => (total_budget * 0.15, total_budget * 0.10),
        }
    };

    CostBreakdown {
        flights: flight_cost,
        accommodation: hotel_cost,
        activities: activities_cost,
        food,
        misc,
    }
}

/// Non-strict budget check: landing exactly on budget counts as within.
pub fn within_budget(actual_cost: f64, total_budget: f64) -> bool {
    actual_cost <= total_budget
}

#[cfg(test)]
mod tests {
    use super::*;

    const EPSILON: f64 = 1e-9;

    #[test]
    fn positive_remainder_splits_sixty_forty() {
        let breakdown = allocate(3000.0, 1300.0, 600.0, 230.0, ShortfallMode::BudgetShare);
        let remaining = 3000.0 - 2130.0;
        assert!((breakdown.food + breakdown.misc - remaining).abs() < EPSILON);
        assert!((breakdown.food / breakdown.misc - 1.5).abs() < 1e-6);
        assert!((breakdown.total() - 3000.0).abs() < EPSILON);
    }

    #[test]
    fn both_modes_split_the_same_with_budget_left() {
        let share = allocate(2000.0, 500.0, 400.0, 100.0, ShortfallMode::BudgetShare);
        let daily = allocate(
            2000.0,
            500.0,
            400.0,
            100.0,
            ShortfallMode::DailyRates {
                duration_days: 5,
                tier: HotelTier::MidRange,
            },
        );
        assert!((share.food - daily.food).abs() < EPSILON);
        assert!((share.misc - daily.misc).abs() < EPSILON);
    }

    #[test]
    fn shortfall_budget_share_uses_fixed_percentages() {
        let breakdown = allocate(1000.0, 800.0, 300.0, 100.0, ShortfallMode::BudgetShare);
        assert!((breakdown.food - 150.0).abs() < EPSILON);
        assert!((breakdown.misc - 100.0).abs() < EPSILON);
        assert!(breakdown.food >= 0.0 && breakdown.misc >= 0.0);
        assert!(!within_budget(breakdown.total(), 1000.0));
    }

    #[test]
    fn shortfall_daily_rates_uses_catalog_helpers() {
        let breakdown = allocate(
            1000.0,
            900.0,
            300.0,
            0.0,
            ShortfallMode::DailyRates {
                duration_days: 4,
                tier: HotelTier::Luxury,
            },
        );
        assert!((breakdown.food - 480.0).abs() < EPSILON);
        assert!((breakdown.misc - 100.0).abs() < EPSILON);
    }

    #[test]
    fn zero_remainder_counts_as_shortfall() {
        let breakdown = allocate(1000.0, 600.0, 300.0, 100.0, ShortfallMode::BudgetShare);
        assert!((breakdown.food - 150.0).abs() < EPSILON);
        assert!((breakdown.misc - 100.0).abs() < EPSILON);
    }

    #[test]
    fn exact_budget_is_within() {
        assert!(within_budget(1000.0, 1000.0));
        assert!(within_budget(999.99, 1000.0));
        assert!(!within_budget(1000.01, 1000.0));
    }
}
