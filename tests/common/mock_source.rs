//! Mock Speech Source for Testing
//!
//! Tracks mute/unmute calls so tests can verify the engine is the sole
//! microphone mutator and that stop is redundant-safe.

use anyhow::Result;
use async_trait::async_trait;
use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};
use vivavoce::asr::SpeechSource;

pub struct MockSource {
    capturing: AtomicBool,
    pub starts: AtomicUsize,
    pub stops: AtomicUsize,
}

impl MockSource {
    pub fn new() -> Self {
        Self {
            capturing: AtomicBool::new(false),
            starts: AtomicUsize::new(0),
            stops: AtomicUsize::new(0),
        }
    }

    pub fn start_count(&self) -> usize {
        self.starts.load(Ordering::SeqCst)
    }

    pub fn stop_count(&self) -> usize {
        self.stops.load(Ordering::SeqCst)
    }
}

impl Default for MockSource {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl SpeechSource for MockSource {
    async fn start(&self) -> Result<()> {
        self.starts.fetch_add(1, Ordering::SeqCst);
        self.capturing.store(true, Ordering::SeqCst);
        Ok(())
    }

    async fn stop(&self) -> Result<()> {
        self.stops.fetch_add(1, Ordering::SeqCst);
        self.capturing.store(false, Ordering::SeqCst);
        Ok(())
    }

    fn is_capturing(&self) -> bool {
        self.capturing.load(Ordering::SeqCst)
    }

    fn name(&self) -> &str {
        "mock"
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_stop_is_redundant_safe() {
        let source = MockSource::new();
        source.start().await.unwrap();
        source.stop().await.unwrap();
        source.stop().await.unwrap();
        assert!(!source.is_capturing());
        assert_eq!(source.stop_count(), 2);
    }
}
