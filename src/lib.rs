//! tripwright: a demo backend core comparing four LLM travel-planning
//! strategies over the same catalog, parser, and budget pipeline.
//!
//! The strategies share one backbone (catalog lookup, free-text selection
//! parsing, fixed-ratio budget allocation, itinerary assembly) and differ in
//! how they shape the reasoning conversation: one monolithic prompt,
//! role-scoped specialist calls, an autonomous tool loop, or a
//! payment-mandate audit trail.
//!
//! # Quick Start
//!
//! ```rust,no_run
//! use std::sync::Arc;
//! use tripwright::reasoning::HttpReasoner;
//! use tripwright::strategies::SpecialistPlanner;
//! use tripwright::types::TripRequest;
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let reasoner = Arc::new(HttpReasoner::from_env()?);
//!     let planner = SpecialistPlanner::new(reasoner);
//!
//!     let request = TripRequest {
//!         destination: "Tokyo, Japan".to_string(),
//!         duration_days: 5,
//!         budget: 3000.0,
//!         travelers: 2,
//!         departure_date: None,
//!         interests: vec!["food".to_string(), "tech".to_string()],
//!         hotel_preference: Default::default(),
//!         activity_level: Default::default(),
//!     };
//!
//!     let response = planner.plan(&request).await;
//!     println!("{}", serde_json::to_string_pretty(&response)?);
//!     Ok(())
//! }
//! ```

pub mod catalog;
pub mod core;
pub mod error;
pub mod events;
pub mod reasoning;
pub mod strategies;
pub mod tools;
pub mod types;

pub use catalog::Catalog;
pub use error::{PlannerError, Result};
pub use events::{event_channel, EventSink, EventStream, PlanEvent};
pub use reasoning::{HttpReasoner, ReasoningClient, ScriptedReasoner};
pub use strategies::{MandatePlanner, MonolithicPlanner, SpecialistPlanner, ToolkitPlanner};
pub use types::{Itinerary, PlanResponse, PlanStatus, TripRequest};

#[cfg(feature = "cli")]
pub mod cli;
