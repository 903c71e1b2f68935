use serde::{Deserialize, Serialize};

/// Coarse hotel/budget preference tier used to filter catalog results.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize, schemars::JsonSchema)]
#[serde(rename_all = "kebab-case")]
pub enum HotelTier {
    Budget,
    #[default]
    MidRange,
    Luxury,
}

impl HotelTier {
    pub fn as_str(&self) -> &'static str {
        match self {
            HotelTier::Budget => "budget",
            HotelTier::MidRange => "mid-range",
            HotelTier::Luxury => "luxury",
        }
    }
}

impl std::fmt::Display for HotelTier {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// How packed the traveler wants each day to be.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ActivityLevel {
    Relaxed,
    #[default]
    Moderate,
    Active,
}

impl ActivityLevel {
    pub fn as_str(&self) -> &'static str {
        match self {
            ActivityLevel::Relaxed => "relaxed",
            ActivityLevel::Moderate => "moderate",
            ActivityLevel::Active => "active",
        }
    }
}

impl std::fmt::Display for ActivityLevel {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

fn default_travelers() -> u32 {
    1
}

/// A structured trip request. Immutable once constructed; every strategy
/// consumes the same shape.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TripRequest {
    /// Travel destination, e.g. "Tokyo, Japan"
    pub destination: String,
    /// Trip duration in days (1..=30)
    pub duration_days: u32,
    /// Total budget in USD, must be positive
    pub budget: f64,
    /// Number of travelers (1..=10)
    #[serde(default = "default_travelers")]
    pub travelers: u32,
    /// Preferred departure date (YYYY-MM-DD), informational only
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub departure_date: Option<String>,
    /// Ordered travel interests, e.g. "food", "tech", "temples"
    #[serde(default)]
    pub interests: Vec<String>,
    /// Hotel category preference
    #[serde(default)]
    pub hotel_preference: HotelTier,
    /// Desired pace of the itinerary
    #[serde(default)]
    pub activity_level: ActivityLevel,
}

impl TripRequest {
    /// Validate all request invariants, collecting every violation.
    pub fn validate(&self) -> Vec<String> {
        let mut errors = Vec::new();

        if self.destination.trim().is_empty() {
            errors.push("destination must not be empty".to_string());
        }
        if !(1..=30).contains(&self.duration_days) {
            errors.push(format!(
                "duration_days must be between 1 and 30, got {}",
                self.duration_days
            ));
        }
        if self.budget <= 0.0 {
            errors.push(format!("budget must be positive, got {}", self.budget));
        }
        if !(1..=10).contains(&self.travelers) {
            errors.push(format!(
                "travelers must be between 1 and 10, got {}",
                self.travelers
            ));
        }

        errors
    }

    /// Interests with the documented default: an empty list behaves as a
    /// single generic "sightseeing" interest.
    pub fn effective_interests(&self) -> Vec<String> {
        if self.interests.is_empty() {
            vec!["sightseeing".to_string()]
        } else {
            self.interests.clone()
        }
    }

    /// Interests rendered for prompt text ("food, tech, temples").
    pub fn interests_label(&self) -> String {
        self.effective_interests().join(", ")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn valid_request() -> TripRequest {
        TripRequest {
            destination: "Tokyo, Japan".to_string(),
            duration_days: 5,
            budget: 3000.0,
            travelers: 2,
            departure_date: None,
            interests: vec!["food".to_string(), "tech".to_string()],
            hotel_preference: HotelTier::MidRange,
            activity_level: ActivityLevel::Moderate,
        }
    }

    #[test]
    fn valid_request_passes() {
        assert!(valid_request().validate().is_empty());
    }

    #[test]
    fn invalid_fields_are_all_reported() {
        let request = TripRequest {
            destination: "  ".to_string(),
            duration_days: 0,
            budget: -10.0,
            travelers: 11,
            ..valid_request()
        };

        let errors = request.validate();
        assert_eq!(errors.len(), 4);
    }

    #[test]
    fn empty_interests_default_to_sightseeing() {
        let request = TripRequest {
            interests: vec![],
            ..valid_request()
        };
        assert_eq!(request.effective_interests(), vec!["sightseeing"]);
        assert_eq!(request.interests_label(), "sightseeing");
    }

    #[test]
    fn tier_serializes_kebab_case() {
        let json = serde_json::to_string(&HotelTier::MidRange).unwrap();
        assert_eq!(json, "\"mid-range\"");
        let parsed: HotelTier = serde_json::from_str("\"luxury\"").unwrap();
        assert_eq!(parsed, HotelTier::Luxury);
    }
}
