use super::itinerary::Itinerary;
use serde::{Deserialize, Serialize};
use serde_json::Value;

/// Terminal status of a planning run.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PlanStatus {
    Success,
    Failure,
    Partial,
    Error,
}

/// One entry of the per-run agent activity log.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AgentLog {
    pub agent_name: String,
    pub timestamp: String,
    pub message: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub data: Option<Value>,
}

impl AgentLog {
    pub fn new(agent_name: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            agent_name: agent_name.into(),
            timestamp: chrono::Utc::now().to_rfc3339(),
            message: message.into(),
            data: None,
        }
    }

    pub fn with_data(mut self, data: Value) -> Self {
        self.data = Some(data);
        self
    }
}

/// Synchronous response envelope shared by every strategy. The multi-agent
/// bookkeeping fields stay empty for strategies that do not use them.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PlanResponse {
    pub success: bool,
    pub message: String,
    pub execution_time_ms: f64,
    pub status: PlanStatus,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub itinerary: Option<Itinerary>,
    #[serde(default)]
    pub errors: Vec<String>,
    #[serde(default)]
    pub warnings: Vec<String>,
    #[serde(default)]
    pub agent_logs: Vec<AgentLog>,
    #[serde(default)]
    pub agents_used: Vec<String>,
    #[serde(default)]
    pub collaboration_count: usize,
}

impl PlanResponse {
    /// Build a terminal error response carrying the failure message.
    pub fn from_error(message: impl Into<String>, execution_time_ms: f64) -> Self {
        let message = message.into();
        Self {
            success: false,
            message: message.clone(),
            execution_time_ms,
            status: PlanStatus::Error,
            itinerary: None,
            errors: vec![message],
            warnings: Vec::new(),
            agent_logs: Vec::new(),
            agents_used: Vec::new(),
            collaboration_count: 0,
        }
    }
}
