//! Echo Suppression
//!
//! The microphone stays hot shortly after the agent finishes speaking, so
//! the recognizer can hand us back a transcription of the system's own
//! synthesized voice. This filter decides whether a candidate utterance is
//! that feedback loop or genuine human speech.
//!
//! Single-word overlaps are normal in conversation; the combination of
//! match ratio, token adjacency and recency keeps short genuine replies
//! ("Yes it was") alive while catching true echoes.

use crate::config::Config;
use std::time::{Duration, Instant};
use tracing::debug;

/// Tunable thresholds for echo detection
#[derive(Debug, Clone)]
pub struct EchoConfig {
    /// Window after agent speech during which echo is suspected
    pub window: Duration,
    /// Reject when this fraction of candidate tokens match the agent text
    pub match_ratio_high: f64,
    /// Reject at this lower ratio when an adjacent pair also matches
    pub match_ratio_sequence: f64,
    /// Candidate token count below which match_count > 1 is suspicious
    pub short_utterance_tokens: usize,
}

impl Default for EchoConfig {
    fn default() -> Self {
        Self {
            window: Duration::from_millis(2000),
            match_ratio_high: 0.55,
            match_ratio_sequence: 0.3,
            short_utterance_tokens: 4,
        }
    }
}

impl EchoConfig {
    pub fn from_config(config: &Config) -> Self {
        Self {
            window: Duration::from_millis(config.echo_window_ms),
            match_ratio_high: config.echo_match_ratio_high,
            match_ratio_sequence: config.echo_match_ratio_sequence,
            short_utterance_tokens: config.echo_short_utterance_tokens,
        }
    }
}

/// Why the filter rejected an utterance
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Rejection {
    Echo,
    Duplicate,
}

/// Decides whether incoming utterances are echoes of the agent's own voice
/// or duplicates from repeated recognizer firing.
pub struct EchoFilter {
    config: EchoConfig,
    /// Text most recently spoken by the agent, set when synthesis starts
    last_agent_text: Option<String>,
    /// When the agent finished speaking that text
    last_agent_done: Option<Instant>,
    /// Previous accepted utterance, for duplicate suppression
    last_accepted: Option<String>,
}

impl EchoFilter {
    pub fn new(config: EchoConfig) -> Self {
        Self {
            config,
            last_agent_text: None,
            last_agent_done: None,
            last_accepted: None,
        }
    }

    /// Record the text the agent is about to speak
    pub fn agent_started(&mut self, text: &str) {
        self.last_agent_text = Some(text.to_string());
    }

    /// Record that agent playback finished; the echo window starts here
    pub fn agent_finished(&mut self) {
        self.last_agent_done = Some(Instant::now());
    }

    /// Accept or reject a normalized candidate utterance captured at `now`
    pub fn check(&mut self, candidate: &str, now: Instant) -> Result<(), Rejection> {
        // Duplicate suppression is independent of echo recency
        if self.last_accepted.as_deref() == Some(candidate) {
            debug!("🔁 Dropping duplicate utterance: '{}'", candidate);
            return Err(Rejection::Duplicate);
        }

        if self.is_echo(candidate, now) {
            debug!("🔇 Dropping echo of agent speech: '{}'", candidate);
            return Err(Rejection::Echo);
        }

        self.last_accepted = Some(candidate.to_string());
        Ok(())
    }

    fn is_echo(&self, candidate: &str, now: Instant) -> bool {
        let (agent_text, done_at) = match (&self.last_agent_text, self.last_agent_done) {
            (Some(text), Some(at)) => (text, at),
            _ => return false,
        };

        // Past the echo window the risk is negligible even on full overlap
        if now.duration_since(done_at) > self.config.window {
            return false;
        }

        let candidate_tokens = significant_tokens(candidate);
        if candidate_tokens.is_empty() {
            return false;
        }
        let agent_tokens = significant_tokens(agent_text);

        let match_count = candidate_tokens
            .iter()
            .filter(|t| agent_tokens.contains(t))
            .count();
        let match_ratio = match_count as f64 / candidate_tokens.len() as f64;

        let agent_joined = agent_tokens.join(" ");
        let sequence_match = candidate_tokens
            .windows(2)
            .any(|pair| agent_joined.contains(&format!("{} {}", pair[0], pair[1])));

        if match_ratio > self.config.match_ratio_high {
            return true;
        }
        if sequence_match && match_ratio > self.config.match_ratio_sequence {
            return true;
        }
        if match_count > 1 && candidate_tokens.len() < self.config.short_utterance_tokens {
            return true;
        }
        false
    }
}

/// Lowercased tokens with punctuation stripped; tokens of length <= 2 are
/// dropped since they match accidentally in any pair of sentences.
fn significant_tokens(text: &str) -> Vec<String> {
    text.to_lowercase()
        .split_whitespace()
        .map(|t| {
            t.chars()
                .filter(|c| c.is_alphanumeric())
                .collect::<String>()
        })
        .filter(|t| t.len() > 2)
        .collect()
}
