//! Role-scoped sequential calls: one specialist per concern, then a budget
//! verification pass.

use std::sync::Arc;
use std::time::Instant;

use serde_json::json;
use tracing::{info, warn};

use super::{assemble_itinerary, elapsed_ms, validation_message};
use crate::catalog::Catalog;
use crate::core::budget::{self, ShortfallMode};
use crate::core::{prompts, selection};
use crate::events::{event_channel, EventStream, PlanEvent};
use crate::reasoning::ReasoningClient;
use crate::types::{AgentLog, HotelTier, PlanResponse, TripRequest};

const CANDIDATE_ACTIVITIES: usize = 10;

/// Routes each concern to a named specialist in sequence: FlightExpert,
/// HotelExpert, ActivityExpert, then BudgetCoordinator. Each step appends to
/// the run's agent log.
#[derive(Clone)]
pub struct SpecialistPlanner {
    catalog: Arc<Catalog>,
    reasoner: Arc<dyn ReasoningClient>,
}

impl SpecialistPlanner {
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
        let mut logs: Vec<AgentLog> = Vec::new();
        let mut agents_used: Vec<String> = Vec::new();

        let violations = request.validate();
        if !violations.is_empty() {
            warn!(?violations, "rejecting invalid request");
            return PlanResponse::from_error(validation_message(&violations), elapsed_ms(start));
        }

        logs.push(
            AgentLog::new(
                "System",
                format!(
                    "Multi-agent orchestration started for {}...",
                    request.destination
                ),
            )
            .with_data(json!({"step": "initialization", "agents": 4})),
        );

        // Flights always search the mid-range table; the specialists weigh
        // price themselves.
        let flights = self.catalog.flights(&request.destination, HotelTier::MidRange);
        let hotels = self.catalog.hotels(
            &request.destination,
            request.duration_days,
            request.hotel_preference,
        );
        let activities = self.catalog.activities(
            &request.destination,
            &request.effective_interests(),
            CANDIDATE_ACTIVITIES,
        );

        macro_rules! specialist_call {
            ($prompt:expr, $agent:expr) => {
                match self.reasoner.complete(&$prompt, None).await {
                    Ok(text) => {
                        agents_used.push($agent.to_string());
                        text
                    }
                    Err(err) => {
                        let message = format!("Specialist orchestration failed: {err}");
                        let mut response =
                            PlanResponse::from_error(message, elapsed_ms(start));
                        logs.push(AgentLog::new("Supervisor", format!("Error: {err}")));
                        response.collaboration_count = logs.len();
                        response.agent_logs = logs;
                        return response;
                    }
                }
            };
        }

        // Step 1: flights
        logs.push(
            AgentLog::new(
                "FlightExpert",
                format!(
                    "FlightExpert analyzing flight options to {}...",
                    request.destination
                ),
            )
            .with_data(json!({"step": "flight_analysis", "options_count": flights.len()})),
        );
        let flight_text = specialist_call!(prompts::flight_prompt(request, &flights), "FlightExpert");
        let selected_flight = selection::select_flight(&flight_text, &flights).cloned();
        if let Some(flight) = &selected_flight {
            let total = flight.price * f64::from(request.travelers);
            logs.push(
                AgentLog::new(
                    "FlightExpert",
                    format!("Selected {} - ${} total", flight.airline, total),
                )
                .with_data(json!({"flight": flight.airline, "cost": total})),
            );
        }

        // Step 2: hotel
        logs.push(
            AgentLog::new(
                "HotelExpert",
                format!(
                    "HotelExpert finding best {} accommodation...",
                    request.hotel_preference
                ),
            )
            .with_data(json!({"step": "hotel_analysis", "options_count": hotels.len()})),
        );
        let hotel_text = specialist_call!(prompts::hotel_prompt(request, &hotels), "HotelExpert");
        let selected_hotel = selection::select_hotel(&hotel_text, &hotels).cloned();
        if let Some(hotel) = &selected_hotel {
            logs.push(
                AgentLog::new(
                    "HotelExpert",
                    format!(
                        "Selected {} - ${} for {} nights",
                        hotel.name, hotel.total_price, request.duration_days
                    ),
                )
                .with_data(json!({"hotel": hotel.name, "cost": hotel.total_price})),
            );
        }

        // Step 3: activities
        logs.push(
            AgentLog::new(
                "ActivityExpert",
                format!(
                    "ActivityExpert curating experiences for interests: {}...",
                    request.interests_label()
                ),
            )
            .with_data(json!({"step": "activity_curation", "options_count": activities.len()})),
        );
        let activity_text =
            specialist_call!(prompts::activity_prompt(request, &activities), "ActivityExpert");
        let selected_activities: Vec<_> = selection::select_activities(&activity_text, &activities)
            .into_iter()
            .cloned()
            .collect();
        logs.push(
            AgentLog::new(
                "ActivityExpert",
                format!(
                    "Curated {} activities matching your interests",
                    selected_activities.len()
                ),
            )
            .with_data(json!({
                "activities_count": selected_activities.len(),
                "activities": selected_activities.iter().map(|a| a.name.clone()).collect::<Vec<_>>()
            })),
        );

        // Step 4: budget verification
        let plan = assemble_itinerary(
            request,
            selected_flight,
            selected_hotel,
            selected_activities,
            ShortfallMode::BudgetShare,
        );
        let total_cost = plan.itinerary.actual_cost;
        logs.push(
            AgentLog::new(
                "BudgetCoordinator",
                format!(
                    "BudgetCoordinator verifying total cost against ${} budget...",
                    request.budget
                ),
            )
            .with_data(json!({
                "step": "budget_verification",
                "total_cost": total_cost,
                "budget": request.budget
            })),
        );
        let _review = specialist_call!(
            prompts::budget_review_prompt(request, &plan.itinerary.cost_breakdown),
            "BudgetCoordinator"
        );

        let within = budget::within_budget(total_cost, request.budget);
        let verdict = if within {
            format!("Budget approved! Trip within ${}", request.budget)
        } else {
            format!("Over budget by ${:.2}", total_cost - request.budget)
        };
        logs.push(AgentLog::new("BudgetCoordinator", verdict).with_data(json!({
            "total_cost": total_cost,
            "within_budget": within,
            "variance": total_cost - request.budget
        })));

        agents_used.dedup();
        let execution_time_ms = elapsed_ms(start);
        logs.push(
            AgentLog::new(
                "System",
                format!(
                    "Multi-agent collaboration complete! {} specialist agents coordinated.",
                    agents_used.len()
                ),
            )
            .with_data(json!({
                "execution_time_ms": execution_time_ms,
                "step": "final",
                "agents_used": agents_used
            })),
        );
        info!(
            agents = agents_used.len(),
            within_budget = within,
            "specialist run complete"
        );

        PlanResponse {
            success: true,
            message: format!(
                "Multi-agent orchestration successful - {} specialists collaborated",
                agents_used.len()
            ),
            execution_time_ms,
            status: plan.status,
            itinerary: Some(plan.itinerary),
            errors: plan.errors,
            warnings: plan.warnings,
            collaboration_count: logs.len(),
            agent_logs: logs,
            agents_used,
        }
    }

    /// Streamed variant: per-step progress logs, the supervisor's reasoning
    /// relayed sentence by sentence, then one terminal event.
    pub fn plan_stream(&self, request: TripRequest) -> EventStream {
        let planner = self.clone();
        let (sink, stream) = event_channel(64);

        tokio::spawn(async move {
            let start = Instant::now();

            let violations = request.validate();
            if !violations.is_empty() {
                sink.emit(PlanEvent::error(validation_message(&violations)))
                    .await;
                return;
            }

            macro_rules! step_log {
                ($agent:expr, $message:expr) => {
                    if !sink.log($agent, $message).await {
                        return;
                    }
                };
            }

            step_log!(
                "System",
                format!(
                    "Analyzing your travel requirements for {}...",
                    request.destination
                )
            );

            step_log!(
                "FlightAgent",
                format!("Searching for best flights to {}...", request.destination)
            );
            let flights = planner
                .catalog
                .flights(&request.destination, request.hotel_preference);
            step_log!(
                "FlightAgent",
                format!(
                    "Found {} flight options, analyzing for best value...",
                    flights.len()
                )
            );

            step_log!(
                "HotelAgent",
                format!(
                    "Finding {} hotels for {} nights...",
                    request.hotel_preference, request.duration_days
                )
            );
            let hotels = planner.catalog.hotels(
                &request.destination,
                request.duration_days,
                request.hotel_preference,
            );
            step_log!(
                "HotelAgent",
                format!("Located {} hotels matching your preferences...", hotels.len())
            );

            step_log!(
                "ActivityAgent",
                format!(
                    "Curating activities for interests: {}...",
                    request.interests_label()
                )
            );
            let activities = planner.catalog.activities(
                &request.destination,
                &request.effective_interests(),
                CANDIDATE_ACTIVITIES,
            );
            step_log!(
                "ActivityAgent",
                format!("Curated {} unique experiences...", activities.len())
            );

            step_log!(
                "BudgetAgent",
                format!(
                    "Optimizing ${} budget across all categories...",
                    request.budget
                )
            );
            step_log!("TravelSupervisor", "AI Travel Supervisor analyzing options...");

            let prompt = prompts::supervisor_prompt(&request, &flights, &hotels, &activities);
            let mut fragments = match planner.reasoner.stream(&prompt).await {
                Ok(fragments) => fragments,
                Err(err) => {
                    sink.emit(PlanEvent::error(err.to_string())).await;
                    return;
                }
            };

            use futures::StreamExt;
            let mut response_text = String::new();
            while let Some(fragment) = fragments.next().await {
                match fragment {
                    Ok(text) => {
                        response_text.push_str(&text);
                        response_text.push(' ');
                        step_log!("TravelSupervisor", text);
                    }
                    Err(err) => {
                        sink.emit(PlanEvent::error(err.to_string())).await;
                        return;
                    }
                }
            }
            step_log!("TravelSupervisor", "Analysis complete!");

            let selected_flight = selection::select_flight(&response_text, &flights).cloned();
            let selected_hotel = selection::select_hotel(&response_text, &hotels).cloned();
            let selected_activities: Vec<_> =
                selection::select_activities(&response_text, &activities)
                    .into_iter()
                    .cloned()
                    .collect();
            step_log!(
                "TravelSupervisor",
                format!(
                    "Selected {} flight, 1 hotel, and {} activities",
                    if selected_flight.is_some() { 1 } else { 0 },
                    selected_activities.len()
                )
            );

            let plan = assemble_itinerary(
                &request,
                selected_flight,
                selected_hotel,
                selected_activities,
                ShortfallMode::BudgetShare,
            );
            step_log!(
                "BudgetAgent",
                if plan.itinerary.within_budget {
                    "Perfect! Your trip is within budget!"
                } else {
                    "Trip over budget - review the breakdown"
                }
            );
            step_log!("System", "Your personalized travel plan is ready!");

            let response = PlanResponse {
                success: true,
                message: "Specialist orchestration completed successfully".to_string(),
                execution_time_ms: elapsed_ms(start),
                status: plan.status,
                itinerary: Some(plan.itinerary),
                errors: plan.errors,
                warnings: plan.warnings,
                agent_logs: Vec::new(),
                agents_used: vec!["TravelSupervisor".to_string()],
                collaboration_count: 9,
            };
            match serde_json::to_value(&response) {
                Ok(data) => {
                    sink.emit(PlanEvent::result(data)).await;
                }
                Err(err) => {
                    sink.emit(PlanEvent::error(format!("Failed to encode response: {err}")))
                        .await;
                }
            }
        });

        stream
    }
}
