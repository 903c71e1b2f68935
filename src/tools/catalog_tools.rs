use std::pin::Pin;
use std::sync::Arc;

use serde::{Deserialize, Serialize};
use tracing::info;

use super::Tool;
use crate::catalog::Catalog;
use crate::core::budget::{self, ShortfallMode};
use crate::types::HotelTier;
use crate::PlannerError;

/// Parameters for flight searches
#[derive(Debug, Serialize, Deserialize, schemars::JsonSchema)]
pub struct SearchFlightsParams {
    pub destination: String,
    pub hotel_preference: Option<HotelTier>,
}

/// Parameters for hotel searches
#[derive(Debug, Serialize, Deserialize, schemars::JsonSchema)]
pub struct SearchHotelsParams {
    pub destination: String,
    pub duration_days: u32,
    pub preference: Option<HotelTier>,
}

/// Parameters for activity searches
#[derive(Debug, Serialize, Deserialize, schemars::JsonSchema)]
pub struct SearchActivitiesParams {
    pub destination: String,
    /// Comma-separated list of interests
    pub interests: String,
}

/// Parameters for budget allocation
#[derive(Debug, Serialize, Deserialize, schemars::JsonSchema)]
pub struct AllocateBudgetParams {
    pub total_budget: f64,
    pub flight_cost: f64,
    pub hotel_cost: f64,
    pub activities_cost: f64,
}

/// Flight search over the seeded catalog
#[derive(Debug)]
pub struct SearchFlightsTool {
    catalog: Arc<Catalog>,
}

impl SearchFlightsTool {
    pub fn new(catalog: Arc<Catalog>) -> Self {
        Self { catalog }
    }
}

impl Tool for SearchFlightsTool {
    fn name(&self) -> &'static str {
        "search_flights"
    }

    fn description(&self) -> &'static str {
        "Search for available flights to a destination, filtered by preference tier"
    }

    fn parameters_schema(&self) -> serde_json::Value {
        serde_json::json!({
            "type": "object",
            "properties": {
                "destination": {"type": "string"},
                "hotel_preference": {
                    "type": "string",
                    "enum": ["budget", "mid-range", "luxury"]
                }
            },
            "required": ["destination"]
        })
    }

    fn execute(
        &self,
        parameters: serde_json::Value,
    ) -> Pin<
        Box<dyn std::future::Future<Output = Result<serde_json::Value, PlannerError>> + Send + '_>,
    > {
        Box::pin(async move {
            let params: SearchFlightsParams = serde_json::from_value(parameters)
                .map_err(|e| PlannerError::ToolExecution(format!("Invalid parameters: {}", e)))?;

            let tier = params.hotel_preference.unwrap_or_default();
            let flights = self.catalog.flights(&params.destination, tier);
            info!(
                destination = %params.destination,
                count = flights.len(),
                "flight search"
            );

            serde_json::to_value(flights).map_err(|e| {
                PlannerError::ToolExecution(format!("Failed to serialize result: {}", e))
            })
        })
    }
}

/// Hotel search over the seeded catalog
#[derive(Debug)]
pub struct SearchHotelsTool {
    catalog: Arc<Catalog>,
}

impl SearchHotelsTool {
    pub fn new(catalog: Arc<Catalog>) -> Self {
        Self { catalog }
    }
}

impl Tool for SearchHotelsTool {
    fn name(&self) -> &'static str {
        "search_hotels"
    }

    fn description(&self) -> &'static str {
        "Search for available hotels in a destination for a number of nights"
    }

    fn parameters_schema(&self) -> serde_json::Value {
        serde_json::json!({
            "type": "object",
            "properties": {
                "destination": {"type": "string"},
                "duration_days": {"type": "integer", "minimum": 1},
                "preference": {
                    "type": "string",
                    "enum": ["budget", "mid-range", "luxury"]
                }
            },
            "required": ["destination", "duration_days"]
        })
    }

    fn execute(
        &self,
        parameters: serde_json::Value,
    ) -> Pin<
        Box<dyn std::future::Future<Output = Result<serde_json::Value, PlannerError>> + Send + '_>,
    > {
        Box::pin(async move {
            let params: SearchHotelsParams = serde_json::from_value(parameters)
                .map_err(|e| PlannerError::ToolExecution(format!("Invalid parameters: {}", e)))?;

            let tier = params.preference.unwrap_or_default();
            let hotels = self
                .catalog
                .hotels(&params.destination, params.duration_days, tier);
            info!(
                destination = %params.destination,
                nights = params.duration_days,
                count = hotels.len(),
                "hotel search"
            );

            serde_json::to_value(hotels).map_err(|e| {
                PlannerError::ToolExecution(format!("Failed to serialize result: {}", e))
            })
        })
    }
}

/// Activity search over the seeded catalog
#[derive(Debug)]
pub struct SearchActivitiesTool {
    catalog: Arc<Catalog>,
}

impl SearchActivitiesTool {
    pub fn new(catalog: Arc<Catalog>) -> Self {
        Self { catalog }
    }
}

impl Tool for SearchActivitiesTool {
    fn name(&self) -> &'static str {
        "search_activities"
    }

    fn description(&self) -> &'static str {
        "Search for activities and attractions matching a comma-separated interest list"
    }

    fn parameters_schema(&self) -> serde_json::Value {
        serde_json::json!({
            "type": "object",
            "properties": {
                "destination": {"type": "string"},
                "interests": {"type": "string"}
            },
            "required": ["destination", "interests"]
        })
    }

    fn execute(
        &self,
        parameters: serde_json::Value,
    ) -> Pin<
        Box<dyn std::future::Future<Output = Result<serde_json::Value, PlannerError>> + Send + '_>,
    > {
        Box::pin(async move {
            let params: SearchActivitiesParams = serde_json::from_value(parameters)
                .map_err(|e| PlannerError::ToolExecution(format!("Invalid parameters: {}", e)))?;

            let interests: Vec<String> = params
                .interests
                .split(',')
                .map(|i| i.trim().to_string())
                .filter(|i| !i.is_empty())
                .collect();
            let activities = self.catalog.activities(&params.destination, &interests, 10);
            info!(
                destination = %params.destination,
                count = activities.len(),
                "activity search"
            );

            serde_json::to_value(activities).map_err(|e| {
                PlannerError::ToolExecution(format!("Failed to serialize result: {}", e))
            })
        })
    }
}

/// Budget breakdown over the shared allocator
#[derive(Debug, Default)]
pub struct AllocateBudgetTool;

impl AllocateBudgetTool {
    pub fn new() -> Self {
        Self
    }
}

impl Tool for AllocateBudgetTool {
    fn name(&self) -> &'static str {
        "allocate_budget"
    }

    fn description(&self) -> &'static str {
        "Split the remaining trip budget into food and misc and report within-budget status"
    }

    fn parameters_schema(&self) -> serde_json::Value {
        serde_json::json!({
            "type": "object",
            "properties": {
                "total_budget": {"type": "number", "exclusiveMinimum": 0},
                "flight_cost": {"type": "number", "minimum": 0},
                "hotel_cost": {"type": "number", "minimum": 0},
                "activities_cost": {"type": "number", "minimum": 0}
            },
            "required": ["total_budget", "flight_cost", "hotel_cost", "activities_cost"]
        })
    }

    fn execute(
        &self,
        parameters: serde_json::Value,
    ) -> Pin<
        Box<dyn std::future::Future<Output = Result<serde_json::Value, PlannerError>> + Send + '_>,
    > {
        Box::pin(async move {
            let params: AllocateBudgetParams = serde_json::from_value(parameters)
                .map_err(|e| PlannerError::ToolExecution(format!("Invalid parameters: {}", e)))?;

            let breakdown = budget::allocate(
                params.total_budget,
                params.flight_cost,
                params.hotel_cost,
                params.activities_cost,
                ShortfallMode::BudgetShare,
            );
            let total_cost = breakdown.total();
            let within = budget::within_budget(total_cost, params.total_budget);
            info!(total_cost, within_budget = within, "budget allocation");

            Ok(serde_json::json!({
                "flights": breakdown.flights,
                "accommodation": breakdown.accommodation,
                "activities": breakdown.activities,
                "food": breakdown.food,
                "misc": breakdown.misc,
                "total_cost": total_cost,
                "within_budget": within
            }))
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn flight_search_returns_catalog_rows() {
        let tool = SearchFlightsTool::new(Catalog::shared());
        let result = tool
            .execute(serde_json::json!({"destination": "Tokyo, Japan"}))
            .await
            .unwrap();
        let rows = result.as_array().unwrap();
        assert_eq!(rows.len(), 4);
        assert_eq!(rows[0]["airline"], "Japan Airlines");
    }

    #[tokio::test]
    async fn hotel_search_recomputes_total_price() {
        let tool = SearchHotelsTool::new(Catalog::shared());
        let result = tool
            .execute(serde_json::json!({
                "destination": "Tokyo",
                "duration_days": 4,
                "preference": "budget"
            }))
            .await
            .unwrap();
        let rows = result.as_array().unwrap();
        assert_eq!(rows.len(), 2);
        let per_night = rows[0]["price_per_night"].as_f64().unwrap();
        let total = rows[0]["total_price"].as_f64().unwrap();
        assert!((total - per_night * 4.0).abs() < 1e-9);
    }

    #[tokio::test]
    async fn activity_search_splits_interest_csv() {
        let tool = SearchActivitiesTool::new(Catalog::shared());
        let result = tool
            .execute(serde_json::json!({
                "destination": "Tokyo",
                "interests": "food, tech"
            }))
            .await
            .unwrap();
        assert_eq!(result.as_array().unwrap().len(), 4);
    }

    #[tokio::test]
    async fn budget_tool_reports_within_budget() {
        let tool = AllocateBudgetTool::new();
        let result = tool
            .execute(serde_json::json!({
                "total_budget": 3000.0,
                "flight_cost": 1300.0,
                "hotel_cost": 600.0,
                "activities_cost": 200.0
            }))
            .await
            .unwrap();
        assert_eq!(result["within_budget"], true);
        let total = result["total_cost"].as_f64().unwrap();
        assert!((total - 3000.0).abs() < 1e-9);
    }

    #[tokio::test]
    async fn invalid_parameters_are_tool_errors() {
        let tool = SearchHotelsTool::new(Catalog::shared());
        let err = tool
            .execute(serde_json::json!({"destination": "Tokyo"}))
            .await
            .unwrap_err();
        assert!(matches!(err, PlannerError::ToolExecution(_)));
    }
}
