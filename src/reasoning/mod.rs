//! The external reasoning collaborator.
//!
//! Strategies treat the model as an opaque text producer: a single-shot
//! `complete` call and a `stream` call yielding ordered text fragments.
//! [`HttpReasoner`] talks to a chat-completions endpoint;
//! [`ScriptedReasoner`] replays canned responses for tests and offline runs.

mod http;

pub use http::HttpReasoner;

use crate::error::{PlannerError, Result};
use async_trait::async_trait;
use futures::Stream;
use serde_json::{json, Value};
use std::collections::VecDeque;
use std::pin::Pin;
use std::sync::Mutex;

/// Ordered text fragments from a streaming reasoning call.
pub type TextStream = Pin<Box<dyn Stream<Item = Result<String>> + Send>>;

/// Opaque text-producing reasoning service.
#[async_trait]
pub trait ReasoningClient: Send + Sync {
    /// Single-shot completion.
    async fn complete(&self, prompt: &str, system_prompt: Option<&str>) -> Result<String>;

    /// Streaming completion yielding text fragments in order.
    async fn stream(&self, prompt: &str) -> Result<TextStream>;

    /// One chat turn with function-calling tools available. Returns the raw
    /// assistant message so callers can inspect `tool_calls`.
    async fn chat(&self, messages: &[Value], tools: &[Value]) -> Result<Value>;
}

/// Canned reasoner replaying a fixed queue of replies.
#[derive(Debug)]
pub struct ScriptedReasoner {
    replies: Mutex<VecDeque<String>>,
    fallback: Option<String>,
}

impl ScriptedReasoner {
    /// Replay the given replies in order; erroring once exhausted.
    pub fn new(replies: Vec<String>) -> Self {
        Self {
            replies: Mutex::new(replies.into()),
            fallback: None,
        }
    }

    /// Repeat a single reply forever.
    pub fn always(reply: impl Into<String>) -> Self {
        Self {
            replies: Mutex::new(VecDeque::new()),
            fallback: Some(reply.into()),
        }
    }

    fn next_reply(&self) -> Result<String> {
        let mut replies = self
            .replies
            .lock()
            .map_err(|_| PlannerError::Unknown("scripted reasoner lock poisoned".to_string()))?;
        replies
            .pop_front()
            .or_else(|| self.fallback.clone())
            .ok_or_else(|| {
                PlannerError::Reasoning("scripted reasoner has no replies left".to_string())
            })
    }
}

#[async_trait]
impl ReasoningClient for ScriptedReasoner {
    async fn complete(&self, _prompt: &str, _system_prompt: Option<&str>) -> Result<String> {
        self.next_reply()
    }

    async fn stream(&self, _prompt: &str) -> Result<TextStream> {
        let reply = self.next_reply()?;
        let fragments = sentence_fragments(&reply);
        Ok(Box::pin(futures::stream::iter(
            fragments.into_iter().map(Ok),
        )))
    }

    async fn chat(&self, _messages: &[Value], _tools: &[Value]) -> Result<Value> {
        let reply = self.next_reply()?;
        // A reply that parses as a message object is replayed verbatim, which
        // lets tests script tool-calling turns.
        if let Ok(message) = serde_json::from_str::<Value>(&reply) {
            if message.get("tool_calls").is_some() || message.get("role").is_some() {
                return Ok(message);
            }
        }
        Ok(json!({"role": "assistant", "content": reply}))
    }
}

/// Split reasoning text into sentence-sized fragments for streaming.
pub fn sentence_fragments(text: &str) -> Vec<String> {
    let mut fragments = Vec::new();
    let mut current = String::new();

    for ch in text.chars() {
        current.push(ch);
        if matches!(ch, '.' | '!' | '?' | '\n') {
            let trimmed = current.trim();
            if !trimmed.is_empty() {
                fragments.push(trimmed.to_string());
            }
            current.clear();
        }
    }
    let trimmed = current.trim();
    if !trimmed.is_empty() {
        fragments.push(trimmed.to_string());
    }

    fragments
}

#[cfg(test)]
mod tests {
    use super::*;
    use futures::StreamExt;

    #[tokio::test]
    async fn scripted_replies_come_back_in_order() {
        let reasoner = ScriptedReasoner::new(vec!["first".to_string(), "second".to_string()]);
        assert_eq!(reasoner.complete("p", None).await.unwrap(), "first");
        assert_eq!(reasoner.complete("p", None).await.unwrap(), "second");
        assert!(reasoner.complete("p", None).await.is_err());
    }

    #[tokio::test]
    async fn always_never_exhausts() {
        let reasoner = ScriptedReasoner::always("same answer");
        for _ in 0..3 {
            assert_eq!(reasoner.complete("p", None).await.unwrap(), "same answer");
        }
    }

    #[tokio::test]
    async fn stream_yields_sentence_fragments() {
        let reasoner = ScriptedReasoner::new(vec![
            "I recommend ANA. The hotel should be the Ryokan! Done".to_string(),
        ]);
        let stream = reasoner.stream("p").await.unwrap();
        let fragments: Vec<String> = stream.map(|f| f.unwrap()).collect().await;
        assert_eq!(
            fragments,
            vec!["I recommend ANA.", "The hotel should be the Ryokan!", "Done"]
        );
    }

    #[test]
    fn fragments_skip_blank_runs() {
        assert_eq!(
            sentence_fragments("One.\n\nTwo."),
            vec!["One.", "Two."]
        );
        assert!(sentence_fragments("   ").is_empty());
    }
}
