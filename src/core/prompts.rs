//! Prompt construction for the reasoning calls.
//!
//! Every strategy talks to the model in plain text: candidates are rendered
//! as numbered lists with per-traveler and group totals, then the strategy
//! frames them with its own instructions.

use crate::types::{ActivityOption, CostBreakdown, FlightOption, HotelOption, TripRequest};

/// Render flight candidates for a prompt.
pub fn format_flights(flights: &[FlightOption], travelers: u32) -> String {
    flights
        .iter()
        .enumerate()
        .map(|(i, f)| {
            format!(
                "{}. {}: ${}/person (${} total for {} travelers)\n   Duration: {}, Stops: {}",
                i + 1,
                f.airline,
                f.price,
                f.price * f64::from(travelers),
                travelers,
                f.duration,
                f.stops
            )
        })
        .collect::<Vec<_>>()
        .join("\n")
}

/// Render hotel candidates for a prompt.
pub fn format_hotels(hotels: &[HotelOption]) -> String {
    hotels
        .iter()
        .enumerate()
        .map(|(i, h)| {
            format!(
                "{}. {}: ${}/night (${} total)\n   Location: {}, Rating: {}/5\n   Amenities: {}",
                i + 1,
                h.name,
                h.price_per_night,
                h.total_price,
                h.location,
                h.rating,
                h.amenities
                    .iter()
                    .take(3)
                    .cloned()
                    .collect::<Vec<_>>()
                    .join(", ")
            )
        })
        .collect::<Vec<_>>()
        .join("\n")
}

/// Render activity candidates for a prompt.
pub fn format_activities(activities: &[ActivityOption], travelers: u32) -> String {
    activities
        .iter()
        .enumerate()
        .map(|(i, a)| {
            format!(
                "{}. {} ({}): ${}/person (${} total)\n   Duration: {}, Description: {}",
                i + 1,
                a.name,
                a.category,
                a.cost,
                a.cost * f64::from(travelers),
                a.duration,
                a.description
            )
        })
        .collect::<Vec<_>>()
        .join("\n")
}

/// One big prompt covering flights, hotel, activities, and budget at once.
pub fn monolithic_prompt(
    request: &TripRequest,
    flights: &[FlightOption],
    hotels: &[HotelOption],
    activities: &[ActivityOption],
) -> String {
    format!(
        "You are a travel planning agent. Plan a complete trip with ALL of the following:\n\n\
         REQUIREMENTS:\n\
         - Destination: {destination}\n\
         - Duration: {days} days\n\
         - Budget: ${budget} USD (TOTAL for everything)\n\
         - Travelers: {travelers}\n\
         - Interests: {interests}\n\
         - Hotel preference: {tier}\n\n\
         AVAILABLE FLIGHTS (select the best one):\n{flight_list}\n\n\
         AVAILABLE HOTELS (select the best one):\n{hotel_list}\n\n\
         AVAILABLE ACTIVITIES (select up to 6 that match interests):\n{activity_list}\n\n\
         YOUR TASK:\n\
         1. Select ONE flight, ONE hotel, and up to 6 activities by name\n\
         2. Keep the total cost within ${budget}\n\
         3. Explain your reasoning briefly, naming each selection exactly",
        destination = request.destination,
        days = request.duration_days,
        budget = request.budget,
        travelers = request.travelers,
        interests = request.interests_label(),
        tier = request.hotel_preference,
        flight_list = format_flights(flights, request.travelers),
        hotel_list = format_hotels(hotels),
        activity_list = format_activities(activities, request.travelers),
    )
}

/// Role-scoped prompt for the flight specialist (30% budget guidance).
pub fn flight_prompt(request: &TripRequest, flights: &[FlightOption]) -> String {
    format!(
        "You are the Flight Specialist. Select the BEST flight option for this trip:\n\n\
         TRIP DETAILS:\n\
         - Destination: {destination}\n\
         - Travelers: {travelers}\n\
         - Suggested Flight Budget: ${flight_budget:.2} (30% of ${budget} total)\n\n\
         AVAILABLE FLIGHTS:\n{flight_list}\n\n\
         Select the flight that offers the best value - balancing cost, duration, and convenience.\n\
         Respond with ONLY the airline name of your chosen flight and brief reasoning.",
        destination = request.destination,
        travelers = request.travelers,
        flight_budget = request.budget * 0.30,
        budget = request.budget,
        flight_list = format_flights(flights, request.travelers),
    )
}

/// Role-scoped prompt for the hotel specialist (25% budget guidance).
pub fn hotel_prompt(request: &TripRequest, hotels: &[HotelOption]) -> String {
    format!(
        "You are the Hotel Specialist. Select the BEST hotel option for this trip:\n\n\
         TRIP DETAILS:\n\
         - Destination: {destination}\n\
         - Duration: {days} nights\n\
         - Preference: {tier}\n\
         - Suggested Hotel Budget: ${hotel_budget:.2} (25% of ${budget} total)\n\n\
         AVAILABLE HOTELS:\n{hotel_list}\n\n\
         Select the hotel that best matches the {tier} preference while providing good value.\n\
         Respond with ONLY the hotel name of your choice and brief reasoning.",
        destination = request.destination,
        days = request.duration_days,
        tier = request.hotel_preference,
        hotel_budget = request.budget * 0.25,
        budget = request.budget,
        hotel_list = format_hotels(hotels),
    )
}

/// Role-scoped prompt for the activity specialist (20% budget guidance).
pub fn activity_prompt(request: &TripRequest, activities: &[ActivityOption]) -> String {
    format!(
        "You are the Activity Specialist. Select 4-6 BEST activities for this trip:\n\n\
         TRIP DETAILS:\n\
         - Destination: {destination}\n\
         - Interests: {interests}\n\
         - Travelers: {travelers}\n\
         - Suggested Activity Budget: ${activity_budget:.2} (20% of ${budget} total)\n\n\
         AVAILABLE ACTIVITIES:\n{activity_list}\n\n\
         Select 4-6 activities that:\n\
         1. Match the traveler's interests: {interests}\n\
         2. Provide variety and unique experiences\n\
         3. Fit within the activity budget\n\n\
         Respond with ONLY the activity names (comma-separated) and brief reasoning.",
        destination = request.destination,
        interests = request.interests_label(),
        travelers = request.travelers,
        activity_budget = request.budget * 0.20,
        budget = request.budget,
        activity_list = format_activities(activities, request.travelers),
    )
}

/// Verification prompt for the budget coordinator.
pub fn budget_review_prompt(request: &TripRequest, breakdown: &CostBreakdown) -> String {
    let budget = request.budget;
    let total = breakdown.total();
    let share = |cost: f64| cost / budget * 100.0;
    format!(
        "You are the Budget Coordinator. Verify this travel plan's budget:\n\n\
         TOTAL BUDGET: ${budget}\n\n\
         COMPONENT COSTS:\n\
         - Flights: ${flights} ({flights_pct:.1}%)\n\
         - Hotel: ${hotel} ({hotel_pct:.1}%)\n\
         - Activities: ${activities} ({activities_pct:.1}%)\n\
         - Food: ${food} ({food_pct:.1}%)\n\
         - Miscellaneous: ${misc} ({misc_pct:.1}%)\n\n\
         TOTAL COST: ${total}\n\
         WITHIN BUDGET: {within}\n\n\
         Provide a brief assessment of the budget allocation. Is it reasonable? Any concerns?",
        flights = breakdown.flights,
        flights_pct = share(breakdown.flights),
        hotel = breakdown.accommodation,
        hotel_pct = share(breakdown.accommodation),
        activities = breakdown.activities,
        activities_pct = share(breakdown.activities),
        food = breakdown.food,
        food_pct = share(breakdown.food),
        misc = breakdown.misc,
        misc_pct = share(breakdown.misc),
        within = if total <= budget { "YES" } else { "NO" },
    )
}

/// Prompt the streaming supervisor with all candidates at once.
pub fn supervisor_prompt(
    request: &TripRequest,
    flights: &[FlightOption],
    hotels: &[HotelOption],
    activities: &[ActivityOption],
) -> String {
    format!(
        "Plan a {days}-day trip to {destination} for {travelers} travelers\n\
         with a total budget of ${budget}.\n\n\
         TRAVELER PREFERENCES:\n\
         - Interests: {interests}\n\
         - Hotel Preference: {tier}\n\
         - Activity Level: {level}\n\n\
         AVAILABLE FLIGHTS (select the best one):\n{flight_list}\n\n\
         AVAILABLE HOTELS (select the best one):\n{hotel_list}\n\n\
         AVAILABLE ACTIVITIES (select up to 6 that match interests):\n{activity_list}\n\n\
         YOUR TASK:\n\
         1. Allocate the ${budget} budget intelligently across categories\n\
         2. Select the BEST flight, hotel, and activities\n\
         3. Calculate total cost and confirm it's within ${budget}\n\
         4. Provide your recommendations with reasoning\n\n\
         Think step by step and explain your reasoning briefly.",
        days = request.duration_days,
        destination = request.destination,
        travelers = request.travelers,
        budget = request.budget,
        interests = request.interests_label(),
        tier = request.hotel_preference,
        level = request.activity_level,
        flight_list = format_flights(flights, request.travelers),
        hotel_list = format_hotels(hotels),
        activity_list = format_activities(activities, request.travelers),
    )
}

/// System prompt for the tool-using coordinator. `tool_summary` is the
/// registry's one-line-per-tool listing.
pub fn toolkit_system_prompt(request: &TripRequest, tool_summary: &str) -> String {
    format!(
        "You are an intelligent travel planning coordinator.\n\n\
         You have access to specialized tools to plan the perfect trip:\n{tools}\n\n\
         Your task is to:\n\
         1. Search for flights to {destination}\n\
         2. Find suitable {tier} hotels for {days} nights\n\
         3. Curate activities matching interests: {interests}\n\
         4. Calculate the budget breakdown to ensure total stays within ${budget}\n\n\
         IMPORTANT:\n\
         - Select the BEST options based on price and quality\n\
         - For {travelers} travelers\n\
         - Ensure total cost is within budget\n\
         - Be intelligent about trade-offs\n\n\
         Use the tools autonomously to gather information, then answer in plain text\n\
         naming your chosen flight, hotel, and activities exactly.",
        destination = request.destination,
        tier = request.hotel_preference,
        days = request.duration_days,
        interests = request.interests_label(),
        budget = request.budget,
        travelers = request.travelers,
        tools = tool_summary,
    )
}

/// User query for the tool-using coordinator.
pub fn toolkit_query(request: &TripRequest) -> String {
    format!(
        "Plan a {days}-day trip to {destination} for {travelers} travelers with a ${budget} budget.\n\n\
         Preferences:\n\
         - Hotel: {tier}\n\
         - Interests: {interests}\n\
         - Activity level: {level}\n\n\
         Use your tools to:\n\
         1. Find flights\n\
         2. Find hotels\n\
         3. Find activities\n\
         4. Calculate total budget\n\n\
         Return a summary of your selections and confirm if it's within budget.",
        days = request.duration_days,
        destination = request.destination,
        travelers = request.travelers,
        budget = request.budget,
        tier = request.hotel_preference,
        interests = request.interests_label(),
        level = request.activity_level,
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::{ActivityLevel, HotelTier};

    fn request() -> TripRequest {
        TripRequest {
            destination: "Tokyo, Japan".to_string(),
            duration_days: 5,
            budget: 3000.0,
            travelers: 2,
            departure_date: None,
            interests: vec!["food".to_string()],
            hotel_preference: HotelTier::MidRange,
            activity_level: ActivityLevel::Moderate,
        }
    }

    fn flights() -> Vec<FlightOption> {
        vec![FlightOption {
            airline: "ANA".to_string(),
            departure_time: "2025-02-01 14:00".to_string(),
            arrival_time: "2025-02-01 18:00".to_string(),
            duration: "10h 00m".to_string(),
            price: 720.0,
            stops: 0,
        }]
    }

    #[test]
    fn flight_list_shows_group_total() {
        let rendered = format_flights(&flights(), 2);
        assert!(rendered.contains("1. ANA"));
        assert!(rendered.contains("$720/person"));
        assert!(rendered.contains("$1440 total for 2 travelers"));
    }

    #[test]
    fn flight_prompt_carries_budget_guidance() {
        let prompt = flight_prompt(&request(), &flights());
        assert!(prompt.contains("Flight Specialist"));
        assert!(prompt.contains("$900.00 (30% of $3000 total)"));
        assert!(prompt.contains("ONLY the airline name"));
    }

    #[test]
    fn monolithic_prompt_lists_every_section() {
        let prompt = monolithic_prompt(&request(), &flights(), &[], &[]);
        assert!(prompt.contains("REQUIREMENTS:"));
        assert!(prompt.contains("Destination: Tokyo, Japan"));
        assert!(prompt.contains("AVAILABLE FLIGHTS"));
        assert!(prompt.contains("AVAILABLE HOTELS"));
        assert!(prompt.contains("AVAILABLE ACTIVITIES"));
    }

    #[test]
    fn budget_review_reports_within_flag() {
        let breakdown = CostBreakdown {
            flights: 1440.0,
            accommodation: 600.0,
            activities: 230.0,
            food: 438.0,
            misc: 292.0,
        };
        let prompt = budget_review_prompt(&request(), &breakdown);
        assert!(prompt.contains("WITHIN BUDGET: YES"));
        assert!(prompt.contains("TOTAL BUDGET: $3000"));
    }
}
