//! The four planning pipelines.
//!
//! Every strategy runs the same backbone: validate, look up catalog
//! candidates, talk to the reasoning service, parse its free text into
//! selections, allocate the budget, assemble the itinerary. They differ only
//! in how the reasoning conversation is shaped: one big prompt
//! ([`MonolithicPlanner`]), role-scoped sequential calls
//! ([`SpecialistPlanner`]), an autonomous tool loop ([`ToolkitPlanner`]), or
//! a payment-authorization audit trail ([`MandatePlanner`]).

mod mandate;
mod monolithic;
mod specialist;
mod toolkit;

pub use mandate::{
    CartItem, CartMandate, IntentMandate, MandatePlanner, PaymentMandate, TransactionReceipt,
};
pub use monolithic::MonolithicPlanner;
pub use specialist::SpecialistPlanner;
pub use toolkit::ToolkitPlanner;

use crate::core::budget::{self, ShortfallMode};
use crate::types::{
    ActivityOption, FlightOption, HotelOption, Itinerary, PlanStatus, TripRequest,
};
use std::time::Instant;

/// Elapsed wall time in milliseconds, as reported in every response.
pub(crate) fn elapsed_ms(start: Instant) -> f64 {
    start.elapsed().as_secs_f64() * 1000.0
}

/// Validation failures rendered as one error message for terminal responses.
pub(crate) fn validation_message(errors: &[String]) -> String {
    format!("Invalid trip request: {}", errors.join("; "))
}

pub(crate) struct AssembledPlan {
    pub itinerary: Itinerary,
    pub status: PlanStatus,
    pub errors: Vec<String>,
    pub warnings: Vec<String>,
}

/// Turn parsed selections into a priced itinerary.
///
/// Flight and activity costs scale by traveler count; the hotel total is a
/// room price and does not. Budget overrun is an error string plus
/// `within_budget = false`, not a failure of the pipeline itself.
pub(crate) fn assemble_itinerary(
    request: &TripRequest,
    flight: Option<FlightOption>,
    hotel: Option<HotelOption>,
    activities: Vec<ActivityOption>,
    mode: ShortfallMode,
) -> AssembledPlan {
    let travelers = f64::from(request.travelers);
    let flight_cost = flight.as_ref().map_or(0.0, |f| f.price * travelers);
    let hotel_cost = hotel.as_ref().map_or(0.0, |h| h.total_price);
    let activities_cost: f64 = activities.iter().map(|a| a.cost).sum::<f64>() * travelers;

    let breakdown = budget::allocate(
        request.budget,
        flight_cost,
        hotel_cost,
        activities_cost,
        mode,
    );
    let actual_cost = breakdown.total();
    let within_budget = budget::within_budget(actual_cost, request.budget);

    let mut errors = Vec::new();
    let mut warnings = Vec::new();

    if !within_budget {
        errors.push(format!(
            "Budget exceeded! Planned ${:.2} but budget was ${:.2}",
            actual_cost, request.budget
        ));
    }
    if flight.is_none() {
        errors.push("Failed to find suitable flights".to_string());
    }
    if hotel.is_none() {
        errors.push("Failed to find suitable accommodation".to_string());
    }
    if activities.is_empty() {
        warnings.push("No activities planned - generic itinerary".to_string());
    }

    let status = if !errors.is_empty() {
        PlanStatus::Failure
    } else if !warnings.is_empty() {
        PlanStatus::Partial
    } else {
        PlanStatus::Success
    };

    let itinerary = Itinerary {
        destination: request.destination.clone(),
        duration_days: request.duration_days,
        total_budget: request.budget,
        actual_cost,
        within_budget,
        flight,
        hotel,
        activities,
        cost_breakdown: breakdown,
    };

    AssembledPlan {
        itinerary,
        status,
        errors,
        warnings,
    }
}
