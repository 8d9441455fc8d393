//! Ollama Reply Oracle
//!
//! Generates contextual interviewer follow-ups through a local Ollama
//! instance. Failures are surfaced as errors for the engine to recover
//! from; nothing here panics or retries.

use super::cache::TtlCache;
use super::ReplyOracle;
use crate::config::Config;
use crate::session::{ConversationTurn, SessionContext, Speaker};
use anyhow::{anyhow, Result};
use async_trait::async_trait;
use serde::Deserialize;
use std::sync::Mutex;
use std::time::Duration;
use tracing::{debug, warn};

/// Ollama API response
#[derive(Debug, Deserialize)]
struct OllamaResponse {
    response: String,
}

pub struct OllamaOracle {
    url: String,
    model: String,
    timeout: Duration,
    /// Injected response cache keyed by request shape
    cache: Mutex<TtlCache>,
}

impl OllamaOracle {
    /// Create a new Ollama oracle from config
    pub fn new(config: &Config) -> Self {
        Self {
            url: config.ollama_url.clone(),
            model: config.ollama_model.clone(),
            timeout: Duration::from_secs(config.ollama_timeout_secs),
            cache: Mutex::new(TtlCache::new(
                Duration::from_secs(config.oracle_cache_ttl_secs),
                config.oracle_cache_capacity,
            )),
        }
    }

    /// Health check - verify Ollama is reachable
    pub async fn health_check(&self) -> bool {
        let client = reqwest::Client::new();
        match client
            .get(format!("{}/api/tags", self.url))
            .timeout(Duration::from_secs(2))
            .send()
            .await
        {
            Ok(resp) => resp.status().is_success(),
            Err(_) => false,
        }
    }

    fn cache_key(human_text: &str, history_len: usize, role: &str) -> String {
        format!("{}|{}|{}", role, history_len, human_text)
    }

    fn build_prompt(
        human_text: &str,
        history: &[ConversationTurn],
        context: &SessionContext,
    ) -> String {
        let mut transcript = String::new();
        // A short tail of history is enough context for a follow-up
        for turn in history.iter().rev().take(8).rev() {
            let speaker = match turn.speaker {
                Speaker::Human => "Candidate",
                Speaker::Agent => "Interviewer",
            };
            transcript.push_str(&format!("{}: {}\n", speaker, turn.text));
        }

        format!(
            r#"You are a professional interviewer conducting a {} interview.
Conversation so far:
{}
The candidate just said: "{}"

Reply with ONE short, natural follow-up question. No preamble, no quotes."#,
            context.role, transcript, human_text
        )
    }
}

#[async_trait]
impl ReplyOracle for OllamaOracle {
    async fn generate_reply(
        &self,
        human_text: &str,
        history: &[ConversationTurn],
        context: &SessionContext,
    ) -> Result<String> {
        let key = Self::cache_key(human_text, history.len(), &context.role);
        if let Ok(mut cache) = self.cache.lock() {
            if let Some(hit) = cache.get(&key) {
                debug!("🗃️ Oracle cache hit");
                return Ok(hit);
            }
        }

        let prompt = Self::build_prompt(human_text, history, context);

        let client = reqwest::Client::new();
        let response = client
            .post(format!("{}/api/generate", self.url))
            .json(&serde_json::json!({
                "model": self.model,
                "prompt": prompt,
                "stream": false,
                "options": {
                    "temperature": 0.6,
                    "num_predict": 120
                }
            }))
            .timeout(self.timeout)
            .send()
            .await?;

        let status = response.status();
        let body_text = response.text().await?;

        if !status.is_success() {
            warn!("❌ Ollama API error ({}): {}", status, body_text);
            return Err(anyhow!("Ollama API returned {}", status));
        }

        let ollama_resp: OllamaResponse = serde_json::from_str(&body_text)
            .map_err(|e| anyhow!("Malformed Ollama response: {} - body: {}", e, body_text))?;

        let reply = ollama_resp.response.trim().trim_matches('"').to_string();
        if reply.is_empty() {
            return Err(anyhow!("Ollama returned an empty reply"));
        }

        if let Ok(mut cache) = self.cache.lock() {
            cache.put(key, reply.clone());
        }
        Ok(reply)
    }

    fn name(&self) -> &str {
        "ollama"
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Utc;

    fn turn(speaker: Speaker, text: &str) -> ConversationTurn {
        ConversationTurn {
            speaker,
            text: text.to_string(),
            at: Utc::now(),
        }
    }

    #[test]
    fn test_prompt_includes_role_and_history() {
        let history = vec![
            turn(Speaker::Agent, "Tell me about yourself."),
            turn(Speaker::Human, "I build storage engines."),
        ];
        let ctx = SessionContext {
            role: "Database Engineer".to_string(),
            candidate_name: "".to_string(),
        };
        let prompt = OllamaOracle::build_prompt("I build storage engines.", &history, &ctx);
        assert!(prompt.contains("Database Engineer"));
        assert!(prompt.contains("Interviewer: Tell me about yourself."));
        assert!(prompt.contains("Candidate: I build storage engines."));
    }

    #[test]
    fn test_cache_key_depends_on_history_length() {
        let a = OllamaOracle::cache_key("same answer", 2, "Engineer");
        let b = OllamaOracle::cache_key("same answer", 4, "Engineer");
        assert_ne!(a, b);
    }
}
