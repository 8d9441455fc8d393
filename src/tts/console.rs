//! Console Speech Sink
//!
//! Prints agent turns to stdout and simulates playback time so the
//! turn-taking machine exercises its real Speaking and MuteCooldown paths
//! in a console session.

use super::SpeechSink;
use anyhow::Result;
use async_trait::async_trait;
use std::time::Duration;
use tokio::sync::Notify;

/// Simulated playback pace; roughly conversational reading speed
const MS_PER_WORD: u64 = 150;
const MAX_PLAYBACK_MS: u64 = 6000;

pub struct ConsoleSink {
    cancel: Notify,
}

impl ConsoleSink {
    pub fn new() -> Self {
        Self {
            cancel: Notify::new(),
        }
    }
}

impl Default for ConsoleSink {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl SpeechSink for ConsoleSink {
    async fn speak(&self, text: &str) -> Result<()> {
        println!("🤖 Agent: {}", text);

        let words = text.split_whitespace().count() as u64;
        let playback = Duration::from_millis((words * MS_PER_WORD).min(MAX_PLAYBACK_MS));

        tokio::select! {
            _ = tokio::time::sleep(playback) => Ok(()),
            _ = self.cancel.notified() => Ok(()),
        }
    }

    async fn cancel_all(&self) {
        self.cancel.notify_waiters();
    }

    fn name(&self) -> &str {
        "console"
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tokio_test::assert_ok;

    #[tokio::test]
    async fn test_speak_resolves() {
        let sink = ConsoleSink::new();
        assert_ok!(sink.speak("short reply").await);
    }

    #[tokio::test]
    async fn test_cancel_all_unblocks_playback() {
        let sink = std::sync::Arc::new(ConsoleSink::new());
        let speaking = {
            let sink = sink.clone();
            tokio::spawn(async move {
                sink.speak("a very long reply that would otherwise play for several seconds")
                    .await
            })
        };
        tokio::time::sleep(Duration::from_millis(50)).await;
        sink.cancel_all().await;
        speaking.await.unwrap().unwrap();
    }
}
