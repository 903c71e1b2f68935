//! Autonomous tool loop: the model drives catalog searches and budget math
//! through function calls until it produces a plain final answer.

use std::sync::Arc;
use std::time::Instant;

use serde_json::{json, Value};
use tracing::{debug, info, warn};

use super::{assemble_itinerary, elapsed_ms, validation_message};
use crate::catalog::Catalog;
use crate::core::budget::ShortfallMode;
use crate::core::complexity::{analyze_complexity, OrchestrationStrategy};
use crate::core::{prompts, selection};
use crate::error::Result;
use crate::events::{event_channel, EventSink, EventStream, PlanEvent};
use crate::reasoning::ReasoningClient;
use crate::tools::{travel_registry, ToolRegistry};
use crate::types::{PlanResponse, TripRequest};
use crate::PlannerError;

const CANDIDATE_ACTIVITIES: usize = 10;

/// Upper bound on assistant turns before the loop is abandoned.
const MAX_TOOL_ITERATIONS: usize = 8;

/// Tool-driven coordinator. Scores the request's complexity first, then lets
/// the model iterate tool calls until it answers in plain text.
#[derive(Clone)]
pub struct ToolkitPlanner {
    catalog: Arc<Catalog>,
    reasoner: Arc<dyn ReasoningClient>,
}

impl ToolkitPlanner {
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

    /// Drive the function-calling conversation to a final plain-text answer.
    /// Returns the answer and the number of tool calls made.
    async fn run_tool_loop(
        &self,
        request: &TripRequest,
        registry: &ToolRegistry,
        sink: Option<&EventSink>,
    ) -> Result<(String, usize)> {
        let tools = registry.to_function_schemas();
        let mut messages = vec![
            json!({
                "role": "system",
                "content": prompts::toolkit_system_prompt(request, &registry.describe_all())
            }),
            json!({"role": "user", "content": prompts::toolkit_query(request)}),
        ];
        let mut tool_call_count = 0;

        for iteration in 0..MAX_TOOL_ITERATIONS {
            let assistant = self.reasoner.chat(&messages, &tools).await?;
            messages.push(assistant.clone());

            let calls = assistant
                .get("tool_calls")
                .and_then(|calls| calls.as_array())
                .filter(|calls| !calls.is_empty());

            let Some(calls) = calls else {
                let answer = assistant
                    .get("content")
                    .and_then(|content| content.as_str())
                    .unwrap_or("")
                    .trim()
                    .to_string();
                debug!(iteration, tool_call_count, "coordinator answered");
                return Ok((answer, tool_call_count));
            };

            for call in calls {
                let tool_call_id = call
                    .get("id")
                    .and_then(|id| id.as_str())
                    .unwrap_or("call_0")
                    .to_string();
                let name = call
                    .pointer("/function/name")
                    .and_then(|name| name.as_str())
                    .ok_or_else(|| {
                        PlannerError::InvalidToolCall(
                            "assistant tool call is missing a function name".to_string(),
                        )
                    })?
                    .to_string();
                let arguments: Value = call
                    .pointer("/function/arguments")
                    .and_then(|args| args.as_str())
                    .and_then(|args| serde_json::from_str(args).ok())
                    .unwrap_or_else(|| json!({}));

                tool_call_count += 1;
                if let Some(sink) = sink {
                    let sent = sink
                        .log_with_data(
                            tool_agent_label(&name),
                            format!("Invoking {name}..."),
                            arguments.clone(),
                        )
                        .await;
                    if !sent {
                        return Err(PlannerError::Unknown(
                            "stream consumer disconnected".to_string(),
                        ));
                    }
                }

                let content = match registry.execute(&name, arguments).await {
                    Ok(result) => result.to_string(),
                    Err(err) => {
                        warn!(tool = %name, %err, "tool call failed");
                        err.to_error_payload().to_string()
                    }
                };
                messages.push(json!({
                    "role": "tool",
                    "tool_call_id": tool_call_id,
                    "content": content
                }));
            }
        }

        Err(PlannerError::MaxIterations(MAX_TOOL_ITERATIONS))
    }

    fn parse_and_assemble(&self, request: &TripRequest, answer: &str) -> super::AssembledPlan {
        let flights = self
            .catalog
            .flights(&request.destination, request.hotel_preference);
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

        let selected_flight = selection::select_flight(answer, &flights).cloned();
        let selected_hotel = selection::select_hotel(answer, &hotels).cloned();
        let selected_activities: Vec<_> = selection::select_activities(answer, &activities)
            .into_iter()
            .cloned()
            .collect();

        assemble_itinerary(
            request,
            selected_flight,
            selected_hotel,
            selected_activities,
            ShortfallMode::BudgetShare,
        )
    }

    pub async fn plan(&self, request: &TripRequest) -> PlanResponse {
        let start = Instant::now();

        let violations = request.validate();
        if !violations.is_empty() {
            warn!(?violations, "rejecting invalid request");
            return PlanResponse::from_error(validation_message(&violations), elapsed_ms(start));
        }

        let report = analyze_complexity(request);
        info!(
            score = report.score,
            strategy = report.strategy.as_str(),
            "complexity analyzed"
        );

        let registry = travel_registry(Arc::clone(&self.catalog));
        let (answer, tool_call_count) = match self.run_tool_loop(request, &registry, None).await {
            Ok(outcome) => outcome,
            Err(err) => {
                return PlanResponse::from_error(
                    format!("Tool orchestration failed: {err}"),
                    elapsed_ms(start),
                );
            }
        };

        let plan = self.parse_and_assemble(request, &answer);

        PlanResponse {
            success: true,
            message: "Tool-based orchestration completed successfully".to_string(),
            execution_time_ms: elapsed_ms(start),
            status: plan.status,
            itinerary: Some(plan.itinerary),
            errors: plan.errors,
            warnings: plan.warnings,
            agent_logs: Vec::new(),
            agents_used: vec!["TravelCoordinator".to_string()],
            collaboration_count: tool_call_count + 1,
        }
    }

    /// Streamed variant: complexity report, per-tool-call progress, one
    /// terminal event.
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
                "MetaAgent",
                "Analyzing trip complexity to determine orchestration strategy..."
            );
            let report = analyze_complexity(&request);
            if !sink
                .log_with_data(
                    "MetaAgent",
                    format!(
                        "Complexity: {} (Strategy: {})",
                        report.description,
                        report.strategy.as_str()
                    ),
                    json!({
                        "score": report.score,
                        "strategy": report.strategy.as_str(),
                        "reasons": report.reasons
                    }),
                )
                .await
            {
                return;
            }
            step_log!(
                "MetaAgent",
                format!("Preparing {} specialized tools...", report.tool_count)
            );
            if report.strategy == OrchestrationStrategy::Swarm {
                step_log!(
                    "MetaAgent",
                    format!(
                        "Swarm mode activated - {} agents ready for parallel execution",
                        report.tool_count
                    )
                );
            }
            step_log!(
                "Coordinator",
                "Coordinator analyzing requirements and planning autonomous execution..."
            );

            let registry = travel_registry(Arc::clone(&planner.catalog));
            let (answer, tool_call_count) =
                match planner.run_tool_loop(&request, &registry, Some(&sink)).await {
                    Ok(outcome) => outcome,
                    Err(err) => {
                        sink.emit(PlanEvent::error(format!(
                            "Tool orchestration failed: {err}"
                        )))
                        .await;
                        return;
                    }
                };
            step_log!("Coordinator", "Autonomous planning complete!");

            let plan = planner.parse_and_assemble(&request, &answer);
            step_log!(
                "BudgetOptimizer",
                if plan.itinerary.within_budget {
                    "Perfect! Trip is within budget!"
                } else {
                    "Budget exceeded"
                }
            );

            let response = PlanResponse {
                success: true,
                message: "Tool-based orchestration completed successfully".to_string(),
                execution_time_ms: elapsed_ms(start),
                status: plan.status,
                itinerary: Some(plan.itinerary),
                errors: plan.errors,
                warnings: plan.warnings,
                agent_logs: Vec::new(),
                agents_used: vec!["TravelCoordinator".to_string()],
                collaboration_count: tool_call_count + 1,
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

fn tool_agent_label(tool_name: &str) -> &'static str {
    match tool_name {
        "search_flights" => "FlightTool",
        "search_hotels" => "HotelTool",
        "search_activities" => "ActivityTool",
        "allocate_budget" => "BudgetTool",
        _ => "Coordinator",
    }
}
