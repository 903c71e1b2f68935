//! Pure-logic core shared by all four planning strategies: selection
//! parsing, budget allocation, prompt construction, and complexity scoring.

pub mod budget;
pub mod complexity;
pub mod prompts;
pub mod selection;

pub use budget::{allocate, within_budget, ShortfallMode};
pub use complexity::{analyze_complexity, ComplexityReport, OrchestrationStrategy};
pub use selection::{
    select_activities, select_flight, select_hotel, select_multiple, select_single,
    MAX_ACTIVITY_SELECTIONS,
};
