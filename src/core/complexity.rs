//! Trip-complexity scoring used by the toolkit planner to pick an
//! orchestration strategy before any reasoning call is made.

use crate::types::TripRequest;
use serde::{Deserialize, Serialize};

/// How the toolkit planner intends to drive its tools.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OrchestrationStrategy {
    Sequential,
    Swarm,
}

impl OrchestrationStrategy {
    pub fn as_str(&self) -> &'static str {
        match self {
            OrchestrationStrategy::Sequential => "sequential",
            OrchestrationStrategy::Swarm => "swarm",
        }
    }
}

/// Outcome of scoring a request's complexity.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ComplexityReport {
    pub score: u32,
    pub strategy: OrchestrationStrategy,
    pub tool_count: u32,
    pub description: String,
    pub reasons: Vec<String>,
}

/// Score a request on duration, group size, interest diversity, and budget
/// pressure.
pub fn analyze_complexity(request: &TripRequest) -> ComplexityReport {
    let mut score = 0;
    let mut reasons = Vec::new();

    if request.duration_days > 7 {
        score += 2;
        reasons.push(format!("{}-day trip (long duration)", request.duration_days));
    } else if request.duration_days > 4 {
        score += 1;
        reasons.push(format!("{}-day trip", request.duration_days));
    }

    if request.travelers > 4 {
        score += 2;
        reasons.push(format!("{} travelers (large group)", request.travelers));
    } else if request.travelers > 2 {
        score += 1;
        reasons.push(format!("{} travelers", request.travelers));
    }

    let interests_count = request.interests.len();
    if interests_count > 3 {
        score += 2;
        reasons.push(format!("{} different interests", interests_count));
    } else if interests_count > 1 {
        score += 1;
        reasons.push(format!("{} interests", interests_count));
    }

    if request.budget < 2000.0 {
        score += 1;
        reasons.push("tight budget (requires optimization)".to_string());
    }

    let (strategy, tool_count, description) = if score >= 5 {
        (
            OrchestrationStrategy::Swarm,
            8,
            "Complex trip - deploying full toolset",
        )
    } else if score >= 3 {
        (
            OrchestrationStrategy::Swarm,
            6,
            "Moderate complexity - deploying comprehensive tools",
        )
    } else {
        (
            OrchestrationStrategy::Sequential,
            4,
            "Simple trip - standard toolset",
        )
    };

    ComplexityReport {
        score,
        strategy,
        tool_count,
        description: description.to_string(),
        reasons,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::{ActivityLevel, HotelTier};

    fn request(days: u32, travelers: u32, interests: &[&str], budget: f64) -> TripRequest {
        TripRequest {
            destination: "Tokyo".to_string(),
            duration_days: days,
            budget,
            travelers,
            departure_date: None,
            interests: interests.iter().map(|i| i.to_string()).collect(),
            hotel_preference: HotelTier::MidRange,
            activity_level: ActivityLevel::Moderate,
        }
    }

    #[test]
    fn simple_trip_runs_sequential() {
        let report = analyze_complexity(&request(3, 1, &["food"], 5000.0));
        assert_eq!(report.score, 0);
        assert_eq!(report.strategy, OrchestrationStrategy::Sequential);
        assert_eq!(report.tool_count, 4);
    }

    #[test]
    fn complex_trip_activates_swarm() {
        let report = analyze_complexity(&request(10, 6, &["food", "tech", "nature", "temples"], 1500.0));
        assert_eq!(report.score, 7);
        assert_eq!(report.strategy, OrchestrationStrategy::Swarm);
        assert_eq!(report.tool_count, 8);
        assert_eq!(report.reasons.len(), 4);
    }

    #[test]
    fn moderate_trip_uses_comprehensive_tools() {
        let report = analyze_complexity(&request(5, 3, &["food", "tech"], 2500.0));
        assert_eq!(report.score, 3);
        assert_eq!(report.strategy, OrchestrationStrategy::Swarm);
        assert_eq!(report.tool_count, 6);
    }
}
