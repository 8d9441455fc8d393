//! Reply Oracle Module
//!
//! Abstracts the generative-text collaborator that produces the agent's
//! follow-up questions. Oracle failures never cross the engine boundary:
//! the engine substitutes a canned fallback and the conversation continues.

pub mod cache;
pub mod ollama;

use crate::session::{ConversationTurn, SessionContext};
use anyhow::Result;
use async_trait::async_trait;
use std::sync::atomic::{AtomicUsize, Ordering};

pub use ollama::OllamaOracle;

/// Canned follow-ups used when reply generation fails.
///
/// Rotated deterministically by agent-turn count so a flaky oracle still
/// produces a varied, reproducible conversation.
pub const FALLBACK_REPLIES: &[&str] = &[
    "That's interesting. Could you tell me more about that?",
    "I see. What would you say was the most challenging part?",
    "Thank you. How did that experience shape the way you work today?",
    "Understood. Can you walk me through a concrete example?",
];

/// Deterministic fallback for the given agent-turn count
pub fn fallback_reply(agent_turns: usize) -> &'static str {
    FALLBACK_REPLIES[agent_turns % FALLBACK_REPLIES.len()]
}

/// Trait for reply oracles
#[async_trait]
pub trait ReplyOracle: Send + Sync {
    /// Generate the agent's next turn from the candidate's latest answer
    async fn generate_reply(
        &self,
        human_text: &str,
        history: &[ConversationTurn],
        context: &SessionContext,
    ) -> Result<String>;

    /// Get the oracle name
    fn name(&self) -> &str;
}

/// Offline oracle that walks a fixed question list in order.
///
/// Used by the console demo when Ollama is disabled; deterministic by
/// construction.
pub struct ScriptedOracle {
    questions: Vec<String>,
    next: AtomicUsize,
}

impl ScriptedOracle {
    pub fn new(questions: Vec<String>) -> Self {
        Self {
            questions,
            next: AtomicUsize::new(0),
        }
    }

    /// A general-purpose interviewer script for the given role
    pub fn for_role(role: &str) -> Self {
        Self::new(vec![
            format!("What attracted you to this {} position?", role),
            "Tell me about a project you are particularly proud of.".to_string(),
            "What was the hardest technical problem you solved recently?".to_string(),
            "How do you approach disagreements within your team?".to_string(),
            "Where do you want to grow over the next few years?".to_string(),
        ])
    }
}

#[async_trait]
impl ReplyOracle for ScriptedOracle {
    async fn generate_reply(
        &self,
        _human_text: &str,
        _history: &[ConversationTurn],
        _context: &SessionContext,
    ) -> Result<String> {
        let idx = self.next.fetch_add(1, Ordering::SeqCst);
        match self.questions.get(idx) {
            Some(q) => Ok(q.clone()),
            None => Ok("Thank you, that covers everything I wanted to ask.".to_string()),
        }
    }

    fn name(&self) -> &str {
        "scripted"
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_fallback_rotation_is_deterministic() {
        assert_eq!(fallback_reply(0), FALLBACK_REPLIES[0]);
        assert_eq!(fallback_reply(1), FALLBACK_REPLIES[1]);
        assert_eq!(fallback_reply(FALLBACK_REPLIES.len()), FALLBACK_REPLIES[0]);
    }

    #[tokio::test]
    async fn test_scripted_oracle_walks_questions_in_order() {
        let oracle = ScriptedOracle::new(vec!["one".to_string(), "two".to_string()]);
        let ctx = SessionContext {
            role: "Engineer".to_string(),
            candidate_name: "".to_string(),
        };
        assert_eq!(oracle.generate_reply("a", &[], &ctx).await.unwrap(), "one");
        assert_eq!(oracle.generate_reply("b", &[], &ctx).await.unwrap(), "two");
        // Exhausted scripts close the interview politely
        assert!(oracle
            .generate_reply("c", &[], &ctx)
            .await
            .unwrap()
            .contains("Thank you"));
    }
}
