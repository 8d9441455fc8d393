//! Stdin Speech Source
//!
//! Console stand-in for a real recognizer: every line typed on stdin is
//! delivered as one final utterance with full confidence. Lines typed while
//! the source is stopped are discarded, which mirrors a muted microphone.

use super::{SpeechSource, Utterance};
use crate::engine::SessionEvent;
use anyhow::Result;
use async_trait::async_trait;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use tokio::io::{AsyncBufReadExt, BufReader};
use tokio::sync::mpsc::UnboundedSender;
use tracing::debug;

pub struct StdinSource {
    capturing: Arc<AtomicBool>,
}

impl StdinSource {
    /// Spawn the stdin reader task; it runs until stdin closes
    pub fn spawn(events: UnboundedSender<SessionEvent>) -> Self {
        let capturing = Arc::new(AtomicBool::new(false));
        let flag = capturing.clone();

        tokio::spawn(async move {
            let mut lines = BufReader::new(tokio::io::stdin()).lines();
            while let Ok(Some(line)) = lines.next_line().await {
                let line = line.trim().to_string();
                if line.is_empty() {
                    continue;
                }
                if !flag.load(Ordering::SeqCst) {
                    debug!("🎙️ Microphone muted, discarding: '{}'", line);
                    continue;
                }
                if events
                    .send(SessionEvent::Heard(Utterance::final_text(line, 1.0)))
                    .is_err()
                {
                    break;
                }
            }
            // Stdin closed; tell the engine the interview is over
            let _ = events.send(SessionEvent::Stop);
        });

        Self { capturing }
    }
}

#[async_trait]
impl SpeechSource for StdinSource {
    async fn start(&self) -> Result<()> {
        self.capturing.store(true, Ordering::SeqCst);
        Ok(())
    }

    async fn stop(&self) -> Result<()> {
        // Redundant stops are fine; this only clears the flag
        self.capturing.store(false, Ordering::SeqCst);
        Ok(())
    }

    fn is_capturing(&self) -> bool {
        self.capturing.load(Ordering::SeqCst)
    }

    fn name(&self) -> &str {
        "stdin"
    }
}
