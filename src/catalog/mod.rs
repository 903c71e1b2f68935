//! Canned travel inventory with preference-tier filtering.
//!
//! Destination matching is case-insensitive and keyed on the text before the
//! first comma; unknown destinations resolve to the default destination's
//! data instead of failing, which keeps the demo pipelines total.

mod data;

use crate::types::{ActivityOption, FlightOption, HotelOption, HotelTier};
use once_cell::sync::Lazy;
use std::collections::HashMap;
use std::sync::Arc;
use tracing::debug;

const DEFAULT_DESTINATION: &str = "tokyo";

/// Maximum activities contributed by a single interest category.
const PER_INTEREST_LIMIT: usize = 2;

static SHARED: Lazy<Arc<Catalog>> = Lazy::new(|| Arc::new(Catalog::seeded()));

/// In-memory travel inventory. Read-only after construction; one shared
/// instance serves the whole process, but strategies accept an
/// `Arc<Catalog>` so tests can inject their own.
#[derive(Debug)]
pub struct Catalog {
    flights: HashMap<String, Vec<FlightOption>>,
    hotels: HashMap<String, Vec<HotelOption>>,
    activities: HashMap<String, HashMap<String, Vec<ActivityOption>>>,
}

impl Catalog {
    /// Build a catalog from the seeded demo tables.
    pub fn seeded() -> Self {
        Self {
            flights: data::seed_flights(),
            hotels: data::seed_hotels(),
            activities: data::seed_activities(),
        }
    }

    /// Process-wide lazily-initialized instance.
    pub fn shared() -> Arc<Catalog> {
        Arc::clone(&SHARED)
    }

    /// Flight candidates for a destination, filtered by preference tier.
    ///
    /// budget → cheapest 2, luxury → most expensive 2, mid-range → the full
    /// table in its seeded order.
    pub fn flights(&self, destination: &str, tier: HotelTier) -> Vec<FlightOption> {
        let key = destination_key(destination);
        let table = self
            .flights
            .get(&key)
            .unwrap_or_else(|| &self.flights[DEFAULT_DESTINATION]);

        match tier {
            HotelTier::Budget => cheapest(table, |f| f.price, 2),
            HotelTier::Luxury => priciest(table, |f| f.price, 2),
            HotelTier::MidRange => table.clone(),
        }
    }

    /// Hotel candidates with `total_price` recomputed for the requested
    /// number of nights.
    ///
    /// budget → cheapest 2, luxury → most expensive 2, mid-range → the
    /// price-sorted middle slice (second and third cheapest).
    pub fn hotels(&self, destination: &str, nights: u32, tier: HotelTier) -> Vec<HotelOption> {
        let key = destination_key(destination);
        let table = self
            .hotels
            .get(&key)
            .unwrap_or_else(|| &self.hotels[DEFAULT_DESTINATION]);

        let mut priced: Vec<HotelOption> = table
            .iter()
            .cloned()
            .map(|mut hotel| {
                hotel.total_price = hotel.price_per_night * f64::from(nights);
                hotel
            })
            .collect();

        match tier {
            HotelTier::Budget => {
                priced.sort_by(|a, b| a.price_per_night.total_cmp(&b.price_per_night));
                priced.truncate(2);
            }
            HotelTier::Luxury => {
                priced.sort_by(|a, b| b.price_per_night.total_cmp(&a.price_per_night));
                priced.truncate(2);
            }
            HotelTier::MidRange => {
                priced.sort_by(|a, b| a.price_per_night.total_cmp(&b.price_per_night));
                priced = priced.into_iter().skip(1).take(2).collect();
            }
        }

        priced
    }

    /// Activity candidates: iterate the interests in order, take at most two
    /// per category, concatenate, truncate to `max_count`. Interests with no
    /// matching category contribute nothing.
    pub fn activities(
        &self,
        destination: &str,
        interests: &[String],
        max_count: usize,
    ) -> Vec<ActivityOption> {
        let key = destination_key(destination);
        let table = self
            .activities
            .get(&key)
            .unwrap_or_else(|| &self.activities[DEFAULT_DESTINATION]);

        let mut selected = Vec::new();
        for interest in interests {
            if let Some(options) = table.get(&interest.to_lowercase()) {
                selected.extend(options.iter().take(PER_INTEREST_LIMIT).cloned());
            } else {
                debug!(interest = %interest, destination = %key, "no activities for interest");
            }
        }
        selected.truncate(max_count);
        selected
    }
}

/// Estimated food spend for the whole trip at a preference tier's daily rate.
pub fn daily_food_budget(duration_days: u32, tier: HotelTier) -> f64 {
    let daily_rate = match tier {
        HotelTier::Budget => 30.00,
        HotelTier::MidRange => 60.00,
        HotelTier::Luxury => 120.00,
    };
    daily_rate * f64::from(duration_days)
}

/// Flat per-day allowance for local transport, tips, and sundries.
pub fn misc_costs(duration_days: u32) -> f64 {
    f64::from(duration_days) * 25.00
}

fn destination_key(destination: &str) -> String {
    destination
        .split(',')
        .next()
        .unwrap_or(destination)
        .trim()
        .to_lowercase()
}

fn cheapest<T: Clone>(items: &[T], price: impl Fn(&T) -> f64, count: usize) -> Vec<T> {
    let mut sorted = items.to_vec();
    sorted.sort_by(|a, b| price(a).total_cmp(&price(b)));
    sorted.truncate(count);
    sorted
}

fn priciest<T: Clone>(items: &[T], price: impl Fn(&T) -> f64, count: usize) -> Vec<T> {
    let mut sorted = items.to_vec();
    sorted.sort_by(|a, b| price(b).total_cmp(&price(a)));
    sorted.truncate(count);
    sorted
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn destination_key_strips_country_and_case() {
        assert_eq!(destination_key("Tokyo, Japan"), "tokyo");
        assert_eq!(destination_key("  London "), "london");
        assert_eq!(destination_key("paris"), "paris");
    }

    #[test]
    fn unknown_destination_falls_back_to_default() {
        let catalog = Catalog::seeded();
        let flights = catalog.flights("Nowhereville", HotelTier::MidRange);
        assert!(!flights.is_empty());
        assert_eq!(flights[0].airline, "Japan Airlines");
    }

    #[test]
    fn budget_tier_returns_two_cheapest_flights() {
        let catalog = Catalog::seeded();
        let flights = catalog.flights("Tokyo, Japan", HotelTier::Budget);
        assert_eq!(flights.len(), 2);
        assert_eq!(flights[0].airline, "United Airlines");
        assert_eq!(flights[1].airline, "Japan Airlines");
    }

    #[test]
    fn luxury_tier_returns_two_priciest_flights() {
        let catalog = Catalog::seeded();
        let flights = catalog.flights("Tokyo", HotelTier::Luxury);
        assert_eq!(flights.len(), 2);
        assert_eq!(flights[0].airline, "Premium Business Class - ANA");
        assert_eq!(flights[1].airline, "ANA");
    }

    #[test]
    fn mid_range_hotels_are_the_middle_slice() {
        let catalog = Catalog::seeded();
        let hotels = catalog.hotels("Tokyo", 3, HotelTier::MidRange);
        assert_eq!(hotels.len(), 2);
        // Price-sorted: Shinjuku 85, Shibuya 120, Asakusa 150, ...
        assert_eq!(hotels[0].name, "Shibuya Grand Hotel");
        assert_eq!(hotels[1].name, "Asakusa Traditional Ryokan");
    }

    #[test]
    fn hotel_total_price_scales_with_nights() {
        let catalog = Catalog::seeded();
        let three = catalog.hotels("Tokyo", 3, HotelTier::MidRange);
        let five = catalog.hotels("Tokyo", 5, HotelTier::MidRange);
        for (a, b) in three.iter().zip(&five) {
            assert_eq!(a.name, b.name);
            assert!((a.total_price * 5.0 - b.total_price * 3.0).abs() < 1e-9);
        }
    }

    #[test]
    fn short_table_mid_range_slice_does_not_panic() {
        let catalog = Catalog::seeded();
        // Paris has a single hotel; skip(1) leaves nothing.
        let hotels = catalog.hotels("Paris, France", 2, HotelTier::MidRange);
        assert!(hotels.is_empty());
    }

    #[test]
    fn activities_take_two_per_interest_in_order() {
        let catalog = Catalog::seeded();
        let interests = vec!["food".to_string(), "tech".to_string()];
        let activities = catalog.activities("Tokyo", &interests, 10);
        assert_eq!(activities.len(), 4);
        assert_eq!(activities[0].name, "Tsukiji Outer Market Food Tour");
        assert_eq!(activities[1].name, "Ramen Making Class");
        assert_eq!(activities[2].name, "Akihabara Tech District Tour");
    }

    #[test]
    fn unmatched_interest_contributes_nothing() {
        let catalog = Catalog::seeded();
        let interests = vec!["scuba".to_string(), "tech".to_string()];
        let activities = catalog.activities("Tokyo", &interests, 10);
        assert_eq!(activities.len(), 2);
        assert_eq!(activities[0].category, "tech");
    }

    #[test]
    fn max_count_truncates() {
        let catalog = Catalog::seeded();
        let interests = vec!["food".to_string(), "tech".to_string(), "nature".to_string()];
        let activities = catalog.activities("Tokyo", &interests, 3);
        assert_eq!(activities.len(), 3);
    }

    #[test]
    fn daily_rates_follow_tier() {
        assert_eq!(daily_food_budget(5, HotelTier::Budget), 150.0);
        assert_eq!(daily_food_budget(5, HotelTier::MidRange), 300.0);
        assert_eq!(daily_food_budget(5, HotelTier::Luxury), 600.0);
        assert_eq!(misc_costs(4), 100.0);
    }
}
