use std::sync::Arc;

use tripwright::{
    strategies::{MandatePlanner, MonolithicPlanner, SpecialistPlanner, ToolkitPlanner},
    types::{ActivityLevel, HotelTier, TripRequest},
    PlanEvent, PlanStatus, ScriptedReasoner,
};

fn tokyo_request() -> TripRequest {
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

fn specialist_script() -> ScriptedReasoner {
    ScriptedReasoner::new(vec![
        "Japan Airlines offers the best balance of price and convenience.".to_string(),
        "Go with the Shibuya Grand Hotel.".to_string(),
        "Book the Tsukiji Outer Market Food Tour and the Akihabara Tech District Tour.".to_string(),
        "The allocation is reasonable and within budget.".to_string(),
    ])
}

#[tokio::test]
async fn tokyo_scenario_costs_add_up() {
    let planner = SpecialistPlanner::new(Arc::new(specialist_script()));
    let response = planner.plan(&tokyo_request()).await;

    assert!(response.success);
    let itinerary = response.itinerary.expect("itinerary");

    let flight = itinerary.flight.expect("flight");
    let hotel = itinerary.hotel.expect("hotel");
    assert!(!itinerary.activities.is_empty());

    // Flights and activities scale per traveler, the hotel total does not.
    let activities_cost: f64 = itinerary.activities.iter().map(|a| a.cost).sum::<f64>() * 2.0;
    let expected = flight.price * 2.0
        + hotel.total_price
        + activities_cost
        + itinerary.cost_breakdown.food
        + itinerary.cost_breakdown.misc;
    assert!((itinerary.actual_cost - expected).abs() < 1e-9);

    let breakdown_sum = itinerary.cost_breakdown.flights
        + itinerary.cost_breakdown.accommodation
        + itinerary.cost_breakdown.activities
        + itinerary.cost_breakdown.food
        + itinerary.cost_breakdown.misc;
    assert!((itinerary.actual_cost - breakdown_sum).abs() < 1e-9);
}

#[tokio::test]
async fn sixty_forty_split_when_budget_remains() {
    let planner = SpecialistPlanner::new(Arc::new(specialist_script()));
    let response = planner.plan(&tokyo_request()).await;
    let breakdown = response.itinerary.unwrap().cost_breakdown;

    if breakdown.food > 0.0 && breakdown.misc > 0.0 {
        assert!((breakdown.food / breakdown.misc - 1.5).abs() < 1e-6);
    }
}

#[tokio::test]
async fn unknown_destination_falls_back_without_failing() {
    let reasoner = ScriptedReasoner::always("Whatever you think is best.");
    let planner = MonolithicPlanner::new(Arc::new(reasoner));

    let response = planner
        .plan(&TripRequest {
            destination: "Nowhereville".to_string(),
            ..tokyo_request()
        })
        .await;

    assert!(response.success);
    let itinerary = response.itinerary.unwrap();
    // Default-destination inventory, positional-fallback selections.
    assert!(itinerary.flight.is_some());
    assert!(itinerary.hotel.is_some());
    assert!(!itinerary.activities.is_empty());
}

#[tokio::test]
async fn tight_budget_is_a_failure_status_not_a_crash() {
    let reasoner = ScriptedReasoner::always("Pick anything.");
    let planner = MonolithicPlanner::new(Arc::new(reasoner));

    let response = planner
        .plan(&TripRequest {
            budget: 300.0,
            ..tokyo_request()
        })
        .await;

    assert!(response.success);
    assert_eq!(response.status, PlanStatus::Failure);
    assert!(response.errors.iter().any(|e| e.starts_with("Budget exceeded!")));

    let itinerary = response.itinerary.unwrap();
    assert!(!itinerary.within_budget);
    assert!(itinerary.cost_breakdown.food >= 0.0);
    assert!(itinerary.cost_breakdown.misc >= 0.0);
}

#[tokio::test]
async fn every_stream_ends_with_exactly_one_terminal_event() {
    let specialist = SpecialistPlanner::new(Arc::new(ScriptedReasoner::always(
        "Take ANA and the Shibuya Grand Hotel.",
    )));
    let monolithic = MonolithicPlanner::new(Arc::new(ScriptedReasoner::always(
        "Take ANA and the Shibuya Grand Hotel.",
    )));
    let mandate = MandatePlanner::with_balance(10_000.0);

    for events in [
        specialist.plan_stream(tokyo_request()).collect_all().await,
        monolithic.plan_stream(tokyo_request()).collect_all().await,
        mandate.plan_stream(tokyo_request()).collect_all().await,
    ] {
        let terminal_count = events.iter().filter(|e| e.is_terminal()).count();
        assert_eq!(terminal_count, 1);
        assert!(events.last().unwrap().is_terminal());
        for event in &events[..events.len() - 1] {
            assert!(matches!(event, PlanEvent::Log { .. }));
        }
    }
}

#[tokio::test]
async fn toolkit_strategy_reaches_a_result_through_tools() {
    let tool_turn = serde_json::json!({
        "role": "assistant",
        "content": null,
        "tool_calls": [
            {
                "id": "call_1",
                "type": "function",
                "function": {
                    "name": "search_flights",
                    "arguments": "{\"destination\": \"Tokyo, Japan\"}"
                }
            },
            {
                "id": "call_2",
                "type": "function",
                "function": {
                    "name": "allocate_budget",
                    "arguments": "{\"total_budget\": 3000.0, \"flight_cost\": 1160.0, \"hotel_cost\": 600.0, \"activities_cost\": 280.0}"
                }
            }
        ]
    })
    .to_string();

    let reasoner = ScriptedReasoner::new(vec![
        tool_turn,
        "Fly Japan Airlines, stay at the Shibuya Grand Hotel, take the Ramen Making Class."
            .to_string(),
    ]);
    let planner = ToolkitPlanner::new(Arc::new(reasoner));

    let events = planner.plan_stream(tokyo_request()).collect_all().await;
    let terminal: Vec<_> = events.iter().filter(|e| e.is_terminal()).collect();
    assert_eq!(terminal.len(), 1);

    match terminal[0] {
        PlanEvent::Result { data, .. } => {
            assert_eq!(data["success"], true);
            assert_eq!(
                data["itinerary"]["flight"]["airline"],
                "Japan Airlines"
            );
        }
        other => panic!("expected result event, got {other:?}"),
    }
}

#[tokio::test]
async fn mandate_flow_produces_consistent_totals() {
    let planner = MandatePlanner::with_balance(10_000.0);
    let payload = planner.run(&tokyo_request()).unwrap();

    // 85% of budget itemized, then 8% tax and a flat 25.00 fee.
    let subtotal = 3000.0 * 0.85;
    let expected_total = subtotal + subtotal * 0.08 + 25.0;
    let total = payload["trip_details"]["total_cost"].as_f64().unwrap();
    assert!((total - expected_total).abs() < 1e-9);

    let balance = payload["wallet_balance"].as_f64().unwrap();
    assert!((balance - (10_000.0 - expected_total)).abs() < 1e-9);

    let intent_id = payload["mandates"]["intent_mandate"]["intent_id"]
        .as_str()
        .unwrap();
    assert_eq!(
        payload["mandates"]["cart_mandate"]["intent_id"],
        intent_id
    );
}

#[tokio::test]
async fn validation_rejects_before_any_pipeline_step() {
    // No scripted replies: any reasoning call would error, so a clean
    // validation message proves the pipeline never started.
    let planner = SpecialistPlanner::new(Arc::new(ScriptedReasoner::new(Vec::new())));

    let response = planner
        .plan(&TripRequest {
            duration_days: 45,
            travelers: 0,
            ..tokyo_request()
        })
        .await;

    assert!(!response.success);
    assert_eq!(response.status, PlanStatus::Error);
    assert!(response.message.contains("duration_days"));
    assert!(response.message.contains("travelers"));
}
