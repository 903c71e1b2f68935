use serde::{Deserialize, Serialize};

/// A candidate flight. `price` is per traveler.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FlightOption {
    pub airline: String,
    pub departure_time: String,
    pub arrival_time: String,
    pub duration: String,
    pub price: f64,
    #[serde(default)]
    pub stops: u32,
}

/// A candidate hotel. `total_price` is derived from `price_per_night` and the
/// requested number of nights at lookup time, never cached across requests.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct HotelOption {
    pub name: String,
    pub location: String,
    pub price_per_night: f64,
    pub total_price: f64,
    pub rating: f64,
    pub amenities: Vec<String>,
}

/// A candidate activity. `cost` is per traveler.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ActivityOption {
    pub name: String,
    pub description: String,
    pub cost: f64,
    pub duration: String,
    pub category: String,
}

/// Fixed five-category cost breakdown. The component sum is the trip's
/// actual cost by definition.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct CostBreakdown {
    pub flights: f64,
    pub accommodation: f64,
    pub activities: f64,
    pub food: f64,
    pub misc: f64,
}

impl CostBreakdown {
    pub fn total(&self) -> f64 {
        self.flights + self.accommodation + self.activities + self.food + self.misc
    }
}

/// Complete priced travel itinerary returned by every strategy.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Itinerary {
    pub destination: String,
    pub duration_days: u32,
    pub total_budget: f64,
    pub actual_cost: f64,
    pub within_budget: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub flight: Option<FlightOption>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub hotel: Option<HotelOption>,
    #[serde(default)]
    pub activities: Vec<ActivityOption>,
    pub cost_breakdown: CostBreakdown,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn breakdown_total_sums_all_categories() {
        let breakdown = CostBreakdown {
            flights: 1300.0,
            accommodation: 600.0,
            activities: 230.0,
            food: 522.0,
            misc: 348.0,
        };
        assert!((breakdown.total() - 3000.0).abs() < 1e-9);
    }

    #[test]
    fn empty_breakdown_is_zero() {
        assert_eq!(CostBreakdown::default().total(), 0.0);
    }
}
