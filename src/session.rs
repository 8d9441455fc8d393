//! Session State
//!
//! In-memory state for one interview: the append-only conversation log and
//! the emotion-sample buffer. There is exactly one `SessionState` per
//! interview and nothing here is persisted.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Who produced a conversation turn
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Speaker {
    Human,
    Agent,
}

/// One attributed contribution to the conversation log.
///
/// Turns are append-only and never mutated after creation.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ConversationTurn {
    pub speaker: Speaker,
    pub text: String,
    pub at: DateTime<Utc>,
}

/// One facial-emotion reading from the external emotion source.
///
/// Samples arrive on their own cadence, unordered relative to utterances.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EmotionSample {
    pub label: String,
    /// Detector confidence in [0, 1]
    pub score: f64,
    pub at: DateTime<Utc>,
}

impl EmotionSample {
    pub fn new(label: impl Into<String>, score: f64) -> Self {
        Self {
            label: label.into(),
            score: score.clamp(0.0, 1.0),
            at: Utc::now(),
        }
    }
}

/// Static context handed to the reply oracle with every request
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SessionContext {
    pub role: String,
    pub candidate_name: String,
}

/// Aggregate state for one interview session
#[derive(Debug, Clone)]
pub struct SessionState {
    turns: Vec<ConversationTurn>,
    emotions: Vec<EmotionSample>,
    pub started_at: DateTime<Utc>,
}

impl SessionState {
    pub fn new() -> Self {
        Self {
            turns: Vec::new(),
            emotions: Vec::new(),
            started_at: Utc::now(),
        }
    }

    /// Append a human turn in acceptance order
    pub fn push_human(&mut self, text: impl Into<String>) {
        self.turns.push(ConversationTurn {
            speaker: Speaker::Human,
            text: text.into(),
            at: Utc::now(),
        });
    }

    /// Append an agent turn in spoken order
    pub fn push_agent(&mut self, text: impl Into<String>) {
        self.turns.push(ConversationTurn {
            speaker: Speaker::Agent,
            text: text.into(),
            at: Utc::now(),
        });
    }

    pub fn push_emotion(&mut self, sample: EmotionSample) {
        self.emotions.push(sample);
    }

    pub fn turns(&self) -> &[ConversationTurn] {
        &self.turns
    }

    pub fn emotions(&self) -> &[EmotionSample] {
        &self.emotions
    }

    /// All accepted human speech joined into one text block
    pub fn human_text(&self) -> String {
        self.turns
            .iter()
            .filter(|t| t.speaker == Speaker::Human)
            .map(|t| t.text.as_str())
            .collect::<Vec<_>>()
            .join(" ")
    }

    /// Number of agent turns spoken so far
    pub fn agent_turn_count(&self) -> usize {
        self.turns
            .iter()
            .filter(|t| t.speaker == Speaker::Agent)
            .count()
    }

    pub fn is_empty(&self) -> bool {
        self.turns.is_empty() && self.emotions.is_empty()
    }

    pub fn elapsed_secs(&self) -> i64 {
        (Utc::now() - self.started_at).num_seconds()
    }
}

impl Default for SessionState {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_turn_log_is_append_only_ordered() {
        let mut state = SessionState::new();
        state.push_agent("Tell me about yourself.");
        state.push_human("I am a backend engineer.");
        state.push_human("I work mostly with databases.");

        let turns = state.turns();
        assert_eq!(turns.len(), 3);
        assert_eq!(turns[0].speaker, Speaker::Agent);
        assert_eq!(turns[1].speaker, Speaker::Human);
        assert_eq!(state.agent_turn_count(), 1);
    }

    #[test]
    fn test_human_text_excludes_agent_turns() {
        let mut state = SessionState::new();
        state.push_agent("What interests you?");
        state.push_human("Distributed systems.");
        assert_eq!(state.human_text(), "Distributed systems.");
    }

    #[test]
    fn test_emotion_score_clamped() {
        let sample = EmotionSample::new("happy", 1.7);
        assert_eq!(sample.score, 1.0);
        let sample = EmotionSample::new("sad", -0.2);
        assert_eq!(sample.score, 0.0);
    }

    #[test]
    fn test_empty_state() {
        let state = SessionState::new();
        assert!(state.is_empty());
        assert_eq!(state.human_text(), "");
    }
}
