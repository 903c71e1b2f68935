use crate::{
    reasoning::{HttpReasoner, ReasoningClient, ScriptedReasoner},
    strategies::{MandatePlanner, MonolithicPlanner, SpecialistPlanner, ToolkitPlanner},
    types::{ActivityLevel, HotelTier, PlanResponse, TripRequest},
    EventStream, PlanEvent,
};
use clap::{Arg, ArgAction, Command};
use futures::StreamExt;
use std::sync::Arc;
use std::time::Duration;
use tracing::{error, info};

/// CLI entry point for the tripwright demo
pub async fn run() -> Result<(), Box<dyn std::error::Error>> {
    // Load environment variables from .env file
    dotenvy::dotenv().ok();
    tracing_subscriber::fmt::init();

    let matches = Command::new("tripwright")
        .version("0.1.0")
        .about("Compare LLM travel-planning strategies over a demo catalog")
        .arg(
            Arg::new("destination")
                .help("Travel destination, e.g. \"Tokyo, Japan\"")
                .required(true)
                .index(1),
        )
        .arg(
            Arg::new("strategy")
                .short('s')
                .long("strategy")
                .value_name("NAME")
                .help("Planning strategy: monolithic, specialist, toolkit, or mandate")
                .default_value("specialist"),
        )
        .arg(
            Arg::new("days")
                .short('d')
                .long("days")
                .value_name("COUNT")
                .help("Trip duration in days")
                .default_value("5"),
        )
        .arg(
            Arg::new("budget")
                .short('b')
                .long("budget")
                .value_name("USD")
                .help("Total trip budget")
                .default_value("3000"),
        )
        .arg(
            Arg::new("travelers")
                .short('t')
                .long("travelers")
                .value_name("COUNT")
                .help("Number of travelers")
                .default_value("2"),
        )
        .arg(
            Arg::new("interests")
                .short('i')
                .long("interests")
                .value_name("LIST")
                .help("Comma-separated interests, e.g. food,tech,temples"),
        )
        .arg(
            Arg::new("hotel")
                .long("hotel")
                .value_name("TIER")
                .help("Hotel preference: budget, mid-range, or luxury")
                .default_value("mid-range"),
        )
        .arg(
            Arg::new("model")
                .short('m')
                .long("model")
                .value_name("MODEL")
                .help("Reasoning model id (or set REASONING_MODEL)"),
        )
        .arg(
            Arg::new("timeout")
                .long("timeout")
                .value_name("SECONDS")
                .help("Reasoning request timeout in seconds")
                .default_value("120"),
        )
        .arg(
            Arg::new("offline")
                .long("offline")
                .help("Use a canned reasoner instead of the HTTP service")
                .action(ArgAction::SetTrue),
        )
        .arg(
            Arg::new("stream")
                .long("stream")
                .help("Print progress events as they arrive")
                .action(ArgAction::SetTrue),
        )
        .get_matches();

    let request = TripRequest {
        destination: matches.get_one::<String>("destination").unwrap().clone(),
        duration_days: matches.get_one::<String>("days").unwrap().parse()?,
        budget: matches.get_one::<String>("budget").unwrap().parse()?,
        travelers: matches.get_one::<String>("travelers").unwrap().parse()?,
        departure_date: None,
        interests: matches
            .get_one::<String>("interests")
            .map(|list| {
                list.split(',')
                    .map(|i| i.trim().to_string())
                    .filter(|i| !i.is_empty())
                    .collect()
            })
            .unwrap_or_default(),
        hotel_preference: parse_tier(matches.get_one::<String>("hotel").unwrap())?,
        activity_level: ActivityLevel::default(),
    };

    let violations = request.validate();
    if !violations.is_empty() {
        error!("invalid request: {}", violations.join("; "));
        return Err(violations.join("; ").into());
    }

    let strategy = matches.get_one::<String>("strategy").unwrap().as_str();
    let stream_mode = matches.get_flag("stream");
    info!(strategy, destination = %request.destination, "planning trip");

    // The mandate flow needs no reasoner.
    if strategy == "mandate" {
        let planner = MandatePlanner::new();
        if stream_mode {
            print_stream(planner.plan_stream(request)).await;
        } else {
            match planner.run(&request) {
                Ok(payload) => println!("{}", serde_json::to_string_pretty(&payload)?),
                Err(err) => {
                    error!("mandate flow failed: {}", err);
                    return Err(err.into());
                }
            }
        }
        return Ok(());
    }

    let reasoner = build_reasoner(&matches)?;

    if stream_mode {
        let events = match strategy {
            "monolithic" => MonolithicPlanner::new(reasoner).plan_stream(request),
            "specialist" => SpecialistPlanner::new(reasoner).plan_stream(request),
            "toolkit" => ToolkitPlanner::new(reasoner).plan_stream(request),
            other => return Err(format!("unknown strategy: {other}").into()),
        };
        print_stream(events).await;
        return Ok(());
    }

    let response = match strategy {
        "monolithic" => MonolithicPlanner::new(reasoner).plan(&request).await,
        "specialist" => SpecialistPlanner::new(reasoner).plan(&request).await,
        "toolkit" => ToolkitPlanner::new(reasoner).plan(&request).await,
        other => return Err(format!("unknown strategy: {other}").into()),
    };
    print_response(&response);

    if !response.success {
        return Err(response.message.into());
    }
    Ok(())
}

fn build_reasoner(
    matches: &clap::ArgMatches,
) -> Result<Arc<dyn ReasoningClient>, Box<dyn std::error::Error>> {
    if matches.get_flag("offline") {
        return Ok(Arc::new(ScriptedReasoner::always(
            "Considering price and convenience, the first options look best. \
             Book the cheapest flight, the best-rated hotel, and a mix of activities.",
        )));
    }

    let timeout_seconds: u64 = matches.get_one::<String>("timeout").unwrap().parse()?;
    let mut reasoner = HttpReasoner::from_env()?;
    if let Some(model) = matches.get_one::<String>("model") {
        reasoner = reasoner.with_model(model.as_str());
    }
    Ok(Arc::new(
        reasoner.with_timeout(Duration::from_secs(timeout_seconds)),
    ))
}

fn parse_tier(value: &str) -> Result<HotelTier, Box<dyn std::error::Error>> {
    match value {
        "budget" => Ok(HotelTier::Budget),
        "mid-range" => Ok(HotelTier::MidRange),
        "luxury" => Ok(HotelTier::Luxury),
        other => Err(format!("unknown hotel tier: {other}").into()),
    }
}

async fn print_stream(mut events: EventStream) {
    while let Some(event) = events.next().await {
        match event {
            PlanEvent::Log {
                agent_name,
                message,
                ..
            } => println!("[{agent_name}] {message}"),
            PlanEvent::Result { data, .. } => {
                println!(
                    "\n{}",
                    serde_json::to_string_pretty(&data).unwrap_or_else(|_| data.to_string())
                );
            }
            PlanEvent::Error { message, .. } => println!("error: {message}"),
        }
    }
}

fn print_response(response: &PlanResponse) {
    println!("\n{} ({:.0}ms)", response.message, response.execution_time_ms);

    if let Some(itinerary) = &response.itinerary {
        println!(
            "\n{} for {} days - budget ${:.2}",
            itinerary.destination, itinerary.duration_days, itinerary.total_budget
        );
        if let Some(flight) = &itinerary.flight {
            println!(
                "  Flight:     {} (${:.2}/person, {} stops)",
                flight.airline, flight.price, flight.stops
            );
        }
        if let Some(hotel) = &itinerary.hotel {
            println!(
                "  Hotel:      {} (${:.2} total, {}/5)",
                hotel.name, hotel.total_price, hotel.rating
            );
        }
        for activity in &itinerary.activities {
            println!("  Activity:   {} (${:.2}/person)", activity.name, activity.cost);
        }

        let breakdown = &itinerary.cost_breakdown;
        println!("\n  Cost breakdown:");
        println!("    Flights:       ${:>10.2}", breakdown.flights);
        println!("    Accommodation: ${:>10.2}", breakdown.accommodation);
        println!("    Activities:    ${:>10.2}", breakdown.activities);
        println!("    Food:          ${:>10.2}", breakdown.food);
        println!("    Misc:          ${:>10.2}", breakdown.misc);
        println!("    Total:         ${:>10.2}", itinerary.actual_cost);
        println!(
            "    Within budget: {}",
            if itinerary.within_budget { "yes" } else { "no" }
        );
    }

    for warning in &response.warnings {
        println!("  warning: {warning}");
    }
    for error in &response.errors {
        println!("  error: {error}");
    }
}
