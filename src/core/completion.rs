//! Completion Detection
//!
//! Decides how long to wait after an accepted utterance before the agent
//! replies. Too eager and we cut the candidate off mid-thought; too patient
//! and the interview drags. Classification is content-based: terminal
//! punctuation and closing phrases fire fast, trailing connectives wait.

use crate::config::Config;
use std::time::Duration;

/// Phrases that explicitly signal the candidate is done with an answer
const CLOSING_PHRASES: &[&str] = &[
    "thank you",
    "that's all",
    "that is all",
    "i'm done",
    "i am done",
    "to conclude",
    "in conclusion",
];

/// Medial connectives that suggest a sentence is substantial enough to answer
const CONNECTIVES: &[&str] = &[" and ", " so ", " but ", " because "];

/// How confident we are that the candidate has finished speaking
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Completion {
    Definite,
    Probable,
    Tentative,
}

/// Tunable thresholds and delays for completion detection
#[derive(Debug, Clone)]
pub struct CompletionConfig {
    /// Texts shorter than this never schedule a reply
    pub min_chars: usize,
    /// Length past which a text counts as a probable completion
    pub probable_chars: usize,
    pub definite_delay: Duration,
    pub probable_delay: Duration,
    pub tentative_delay: Duration,
}

impl Default for CompletionConfig {
    fn default() -> Self {
        Self {
            min_chars: 10,
            probable_chars: 25,
            definite_delay: Duration::from_millis(300),
            probable_delay: Duration::from_millis(800),
            tentative_delay: Duration::from_millis(1400),
        }
    }
}

impl CompletionConfig {
    pub fn from_config(config: &Config) -> Self {
        Self {
            min_chars: config.completion_min_chars,
            probable_chars: config.completion_probable_chars,
            definite_delay: Duration::from_millis(config.completion_definite_delay_ms),
            probable_delay: Duration::from_millis(config.completion_probable_delay_ms),
            tentative_delay: Duration::from_millis(config.completion_tentative_delay_ms),
        }
    }

    /// Classify accumulated speech; `None` means wait for more
    pub fn classify(&self, text: &str) -> Option<Completion> {
        let trimmed = text.trim();
        if trimmed.len() < self.min_chars {
            return None;
        }

        let lower = trimmed.to_lowercase();
        let terminal = trimmed.ends_with('.') || trimmed.ends_with('!') || trimmed.ends_with('?');
        if terminal || CLOSING_PHRASES.iter().any(|p| lower.contains(p)) {
            return Some(Completion::Definite);
        }

        if trimmed.len() > self.probable_chars || CONNECTIVES.iter().any(|c| lower.contains(c)) {
            return Some(Completion::Probable);
        }

        Some(Completion::Tentative)
    }

    /// Reply delay for a classification
    pub fn delay(&self, completion: Completion) -> Duration {
        match completion {
            Completion::Definite => self.definite_delay,
            Completion::Probable => self.probable_delay,
            Completion::Tentative => self.tentative_delay,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_below_floor_never_schedules() {
        let config = CompletionConfig::default();
        // Terminal punctuation alone does not override the minimal floor
        assert_eq!(config.classify("Yes."), None);
        assert_eq!(config.classify(""), None);
        assert_eq!(config.classify("   ok   "), None);
    }

    #[test]
    fn test_terminal_punctuation_is_definite() {
        let config = CompletionConfig::default();
        let text = "I believe my background in backend systems and distributed databases \
                    makes me a strong fit, and I also led a team of five engineers.";
        assert_eq!(config.classify(text), Some(Completion::Definite));
        assert_eq!(
            config.delay(Completion::Definite),
            Duration::from_millis(300)
        );
    }

    #[test]
    fn test_closing_phrase_is_definite() {
        let config = CompletionConfig::default();
        assert_eq!(
            config.classify("so that's all from my side"),
            Some(Completion::Definite)
        );
        assert_eq!(
            config.classify("thank you for asking"),
            Some(Completion::Definite)
        );
    }

    #[test]
    fn test_length_or_connective_is_probable() {
        let config = CompletionConfig::default();
        assert_eq!(
            config.classify("I worked on the payments platform for years"),
            Some(Completion::Probable)
        );
        assert_eq!(
            config.classify("yes and maybe"),
            Some(Completion::Probable)
        );
    }

    #[test]
    fn test_short_plain_text_is_tentative() {
        let config = CompletionConfig::default();
        assert_eq!(config.classify("mostly python"), Some(Completion::Tentative));
    }

    #[test]
    fn test_delays_are_ordered() {
        let config = CompletionConfig::default();
        assert!(config.delay(Completion::Definite) < config.delay(Completion::Probable));
        assert!(config.delay(Completion::Probable) < config.delay(Completion::Tentative));
    }
}
