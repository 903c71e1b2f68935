//! Value records shared by every planning strategy

pub mod itinerary;
pub mod request;
pub mod response;

pub use itinerary::{ActivityOption, CostBreakdown, FlightOption, HotelOption, Itinerary};
pub use request::{ActivityLevel, HotelTier, TripRequest};
pub use response::{AgentLog, PlanResponse, PlanStatus};
