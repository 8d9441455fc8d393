//! Speech Sink Module
//!
//! Abstracts the text-to-speech collaborator. A sink speaks one agent turn
//! at a time and resolves exactly once when playback finishes (or fails);
//! the engine treats both outcomes identically to guarantee forward
//! progress.

pub mod console;

use anyhow::Result;
use async_trait::async_trait;

pub use console::ConsoleSink;

/// Trait for speech sinks
#[async_trait]
pub trait SpeechSink: Send + Sync {
    /// Speak the given text, resolving when playback ends
    async fn speak(&self, text: &str) -> Result<()>;

    /// Immediately cancel any in-flight playback
    async fn cancel_all(&self);

    /// Get the sink name
    fn name(&self) -> &str;
}
