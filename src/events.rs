//! Ordered progress events for streaming planners.
//!
//! A planning stream is a finite, ordered sequence: zero or more `log`
//! events followed by exactly one terminal `result` or `error`. Consumers
//! that drop the stream cancel the producing task: the next send fails and
//! the pipeline stops without emitting further events.

use chrono::Utc;
use futures::Stream;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::pin::Pin;
use std::task::{Context, Poll};
use tokio::sync::mpsc;

/// One event in a planning stream.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "lowercase")]
pub enum PlanEvent {
    /// Progress message attributed to a named agent.
    Log {
        agent_name: String,
        message: String,
        #[serde(default, skip_serializing_if = "Option::is_none")]
        data: Option<Value>,
        timestamp: String,
    },
    /// Terminal success event carrying the full response object.
    Result { data: Value, timestamp: String },
    /// Terminal failure event carrying the error message.
    Error { message: String, timestamp: String },
}

impl PlanEvent {
    pub fn log(agent_name: impl Into<String>, message: impl Into<String>) -> Self {
        PlanEvent::Log {
            agent_name: agent_name.into(),
            message: message.into(),
            data: None,
            timestamp: Utc::now().to_rfc3339(),
        }
    }

    pub fn log_with_data(
        agent_name: impl Into<String>,
        message: impl Into<String>,
        data: Value,
    ) -> Self {
        PlanEvent::Log {
            agent_name: agent_name.into(),
            message: message.into(),
            data: Some(data),
            timestamp: Utc::now().to_rfc3339(),
        }
    }

    pub fn result(data: Value) -> Self {
        PlanEvent::Result {
            data,
            timestamp: Utc::now().to_rfc3339(),
        }
    }

    pub fn error(message: impl Into<String>) -> Self {
        PlanEvent::Error {
            message: message.into(),
            timestamp: Utc::now().to_rfc3339(),
        }
    }

    /// True for the terminal `result` and `error` variants.
    pub fn is_terminal(&self) -> bool {
        matches!(self, PlanEvent::Result { .. } | PlanEvent::Error { .. })
    }
}

/// Sending half handed to the producing task.
#[derive(Debug, Clone)]
pub struct EventSink {
    tx: mpsc::Sender<PlanEvent>,
}

impl EventSink {
    /// Send an event; `false` means the consumer went away and the producer
    /// should stop.
    pub async fn emit(&self, event: PlanEvent) -> bool {
        self.tx.send(event).await.is_ok()
    }

    pub async fn log(&self, agent_name: &str, message: impl Into<String>) -> bool {
        self.emit(PlanEvent::log(agent_name, message)).await
    }

    pub async fn log_with_data(
        &self,
        agent_name: &str,
        message: impl Into<String>,
        data: Value,
    ) -> bool {
        self.emit(PlanEvent::log_with_data(agent_name, message, data))
            .await
    }
}

/// Receiving half exposed to consumers as a `futures::Stream`.
#[derive(Debug)]
pub struct EventStream {
    rx: mpsc::Receiver<PlanEvent>,
}

impl EventStream {
    /// Collect the remaining events; mainly for tests and the CLI.
    pub async fn collect_all(mut self) -> Vec<PlanEvent> {
        let mut events = Vec::new();
        while let Some(event) = self.rx.recv().await {
            events.push(event);
        }
        events
    }
}

impl Stream for EventStream {
    type Item = PlanEvent;

    fn poll_next(mut self: Pin<&mut Self>, cx: &mut Context<'_>) -> Poll<Option<Self::Item>> {
        self.rx.poll_recv(cx)
    }
}

/// Create a bounded event channel.
pub fn event_channel(capacity: usize) -> (EventSink, EventStream) {
    let (tx, rx) = mpsc::channel(capacity);
    (EventSink { tx }, EventStream { rx })
}
