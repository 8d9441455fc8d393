//! Speech Source Module
//!
//! Abstracts the speech-to-text collaborator. A source produces final
//! [`Utterance`]s on the engine's event channel and exposes start/stop so
//! the turn-taking machine can mute the microphone while the agent speaks.
//!
//! Real recognizer backends are out of scope; the crate ships a stdin
//! source for console interviews and tests bring their own mocks.

pub mod stdin;

use anyhow::Result;
use async_trait::async_trait;
use chrono::{DateTime, Utc};

pub use stdin::StdinSource;

/// Minimum confidence threshold (below this, utterances are discarded)
pub const MIN_CONFIDENCE: f32 = 0.5;

/// One unit of recognized speech
#[derive(Debug, Clone)]
pub struct Utterance {
    pub text: String,
    pub is_final: bool,
    pub confidence: f32,
    pub captured_at: DateTime<Utc>,
}

impl Utterance {
    /// A final utterance captured now
    pub fn final_text(text: impl Into<String>, confidence: f32) -> Self {
        Self {
            text: text.into(),
            is_final: true,
            confidence,
            captured_at: Utc::now(),
        }
    }
}

/// Trait for speech sources
///
/// The turn-taking engine is the only caller of `start`/`stop`; both must
/// be safe to call redundantly.
#[async_trait]
pub trait SpeechSource: Send + Sync {
    /// Begin (or resume) delivering utterances
    async fn start(&self) -> Result<()>;

    /// Stop delivering utterances; incoming audio is discarded
    async fn stop(&self) -> Result<()>;

    /// Whether the source is currently delivering utterances
    fn is_capturing(&self) -> bool;

    /// Get the source name
    fn name(&self) -> &str;
}
