//! Tools module containing the tool abstraction and the catalog-backed tools
//! used by the tool-driven planning strategy.

pub mod catalog_tools;
pub mod tool;

pub use catalog_tools::{
    AllocateBudgetTool, SearchActivitiesTool, SearchFlightsTool, SearchHotelsTool,
};
pub use tool::{Tool, ToolRegistry};

use crate::catalog::Catalog;
use std::sync::Arc;

/// Registry preloaded with the travel-planning toolset.
pub fn travel_registry(catalog: Arc<Catalog>) -> ToolRegistry {
    let mut registry = ToolRegistry::new();
    registry.register(SearchFlightsTool::new(Arc::clone(&catalog)));
    registry.register(SearchHotelsTool::new(Arc::clone(&catalog)));
    registry.register(SearchActivitiesTool::new(catalog));
    registry.register(AllocateBudgetTool::new());
    registry
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn travel_registry_has_all_four_tools() {
        let registry = travel_registry(Catalog::shared());
        for name in [
            "search_flights",
            "search_hotels",
            "search_activities",
            "allocate_budget",
        ] {
            assert!(registry.contains(name), "missing tool {name}");
        }
        assert_eq!(registry.to_function_schemas().len(), 4);
    }
}
