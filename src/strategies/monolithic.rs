//! One prompt, one completion, everything parsed from a single reply.

use std::sync::Arc;
use std::time::Instant;

use tracing::{info, warn};

use super::{assemble_itinerary, elapsed_ms, validation_message};
use crate::catalog::Catalog;
use crate::core::budget::ShortfallMode;
use crate::core::{prompts, selection};
use crate::events::{event_channel, EventStream, PlanEvent};
use crate::reasoning::ReasoningClient;
use crate::types::{PlanResponse, TripRequest};

const CANDIDATE_ACTIVITIES: usize = 10;

/// The single-agent baseline: every concern goes into one big prompt and the
/// whole plan is recovered from one free-text reply.
#[derive(Clone)]
pub struct MonolithicPlanner {
    catalog: Arc<Catalog>,
    reasoner: Arc<dyn ReasoningClient>,
}

impl MonolithicPlanner {
    pub fn new(reasoner: Arc<dyn ReasoningClient>) -> Self {
        Self {
            catalog: Catalog::shared(),
            reasoner,
        }
    }

    pub fn with_catalog(mut self, catalog: Arc<Catalog>) -> Self {
        self.catalog = catalog;
        self
    }

    pub async fn plan(&self, request: &TripRequest) -> PlanResponse {
        let start = Instant::now();

        let violations = request.validate();
        if !violations.is_empty() {
            warn!(?violations, "rejecting invalid request");
            return PlanResponse::from_error(validation_message(&violations), elapsed_ms(start));
        }

        let tier = request.hotel_preference;
        let flights = self.catalog.flights(&request.destination, tier);
        let hotels = self
            .catalog
            .hotels(&request.destination, request.duration_days, tier);
        let activities = self.catalog.activities(
            &request.destination,
            &request.effective_interests(),
            CANDIDATE_ACTIVITIES,
        );

        let prompt = prompts::monolithic_prompt(request, &flights, &hotels, &activities);
        info!(destination = %request.destination, "monolithic planning call");

        let response_text = match self.reasoner.complete(&prompt, None).await {
            Ok(text) => text,
            Err(err) => {
                return PlanResponse::from_error(
                    format!("Monolithic planning failed: {err}"),
                    elapsed_ms(start),
                );
            }
        };

        let selected_flight = selection::select_flight(&response_text, &flights).cloned();
        let selected_hotel = selection::select_hotel(&response_text, &hotels).cloned();
        let selected_activities: Vec<_> = selection::select_activities(&response_text, &activities)
            .into_iter()
            .cloned()
            .collect();

        let plan = assemble_itinerary(
            request,
            selected_flight,
            selected_hotel,
            selected_activities,
            ShortfallMode::DailyRates {
                duration_days: request.duration_days,
                tier,
            },
        );

        PlanResponse {
            success: true,
            message: "Monolithic planner completed trip planning (with limitations)".to_string(),
            execution_time_ms: elapsed_ms(start),
            status: plan.status,
            itinerary: Some(plan.itinerary),
            errors: plan.errors,
            warnings: plan.warnings,
            agent_logs: Vec::new(),
            agents_used: Vec::new(),
            collaboration_count: 0,
        }
    }

    /// Streamed variant: a couple of progress logs framing the single call,
    /// then one terminal event.
    pub fn plan_stream(&self, request: TripRequest) -> EventStream {
        let planner = self.clone();
        let (sink, stream) = event_channel(32);

        tokio::spawn(async move {
            if !sink
                .log(
                    "Planner",
                    format!("Planning a trip to {} in one pass...", request.destination),
                )
                .await
            {
                return;
            }

            let response = planner.plan(&request).await;
            let event = match serde_json::to_value(&response) {
                Ok(data) if response.success => PlanEvent::result(data),
                Ok(_) => PlanEvent::error(response.message.clone()),
                Err(err) => PlanEvent::error(format!("Failed to encode response: {err}")),
            };
            sink.emit(event).await;
        });

        stream
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::reasoning::ScriptedReasoner;
    use crate::types::{ActivityLevel, HotelTier, PlanStatus};

    fn request() -> TripRequest {
        TripRequest {
            destination: "Tokyo, Japan".to_string(),
            duration_days: 5,
            budget: 5000.0,
            travelers: 2,
            departure_date: None,
            interests: vec!["food".to_string(), "tech".to_string()],
            hotel_preference: HotelTier::MidRange,
            activity_level: ActivityLevel::Moderate,
        }
    }

    #[tokio::test]
    async fn named_selections_are_honored() {
        let reasoner = ScriptedReasoner::always(
            "Fly United Airlines, stay at the Asakusa Traditional Ryokan, \
             and book the Ramen Making Class.",
        );
        let planner = MonolithicPlanner::new(Arc::new(reasoner));

        let response = planner.plan(&request()).await;
        assert!(response.success);
        let itinerary = response.itinerary.unwrap();
        assert_eq!(itinerary.flight.unwrap().airline, "United Airlines");
        assert_eq!(itinerary.hotel.unwrap().name, "Asakusa Traditional Ryokan");
        assert_eq!(itinerary.activities.len(), 1);
        assert_eq!(itinerary.activities[0].name, "Ramen Making Class");
    }

    #[tokio::test]
    async fn invalid_request_short_circuits() {
        let reasoner = ScriptedReasoner::new(Vec::new());
        let planner = MonolithicPlanner::new(Arc::new(reasoner));

        let response = planner
            .plan(&TripRequest {
                budget: -5.0,
                ..request()
            })
            .await;
        assert!(!response.success);
        assert_eq!(response.status, PlanStatus::Error);
        assert!(response.message.contains("Invalid trip request"));
    }

    #[tokio::test]
    async fn reasoning_failure_is_terminal() {
        // Empty script: the first completion call errors.
        let reasoner = ScriptedReasoner::new(Vec::new());
        let planner = MonolithicPlanner::new(Arc::new(reasoner));

        let response = planner.plan(&request()).await;
        assert!(!response.success);
        assert_eq!(response.status, PlanStatus::Error);
        assert!(response.message.contains("Monolithic planning failed"));
    }
}
