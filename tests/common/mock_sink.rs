//! Mock Speech Sink for Testing
//!
//! Records all spoken text for verification.

use anyhow::Result;
use async_trait::async_trait;
use std::sync::{Arc, Mutex};
use vivavoce::tts::SpeechSink;

/// Mock sink that records spoken text
pub struct MockSink {
    /// All text that was "spoken"
    pub spoken: Arc<Mutex<Vec<String>>>,
    /// Simulate failure on every speak
    pub should_fail: Arc<Mutex<bool>>,
}

impl MockSink {
    pub fn new() -> Self {
        Self {
            spoken: Arc::new(Mutex::new(Vec::new())),
            should_fail: Arc::new(Mutex::new(false)),
        }
    }

    pub fn failing() -> Self {
        let sink = Self::new();
        *sink.should_fail.lock().unwrap() = true;
        sink
    }

    /// Get all spoken phrases
    pub fn get_spoken(&self) -> Vec<String> {
        self.spoken.lock().unwrap().clone()
    }

    /// Check if a phrase was spoken
    pub fn was_spoken(&self, text: &str) -> bool {
        self.spoken.lock().unwrap().iter().any(|s| s.contains(text))
    }
}

impl Default for MockSink {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl SpeechSink for MockSink {
    async fn speak(&self, text: &str) -> Result<()> {
        if *self.should_fail.lock().unwrap() {
            return Err(anyhow::anyhow!("Mock sink failure"));
        }
        self.spoken.lock().unwrap().push(text.to_string());
        Ok(())
    }

    async fn cancel_all(&self) {}

    fn name(&self) -> &str {
        "mock"
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_mock_sink_records_speech() {
        let mock = MockSink::new();
        mock.speak("hello").await.unwrap();
        mock.speak("world").await.unwrap();

        assert!(mock.was_spoken("hello"));
        assert!(mock.was_spoken("world"));
        assert_eq!(mock.get_spoken().len(), 2);
    }

    #[tokio::test]
    async fn test_mock_sink_failure() {
        let mock = MockSink::failing();
        assert!(mock.speak("hello").await.is_err());
        assert!(mock.get_spoken().is_empty());
    }
}
