//! Emotion Source Module
//!
//! Abstracts the facial-emotion collaborator. Samples arrive on their own
//! cadence, completely decoupled from the speech source, and are appended
//! to the session buffer through the engine's event channel so they never
//! block a turn-taking transition.

use crate::engine::SessionEvent;
use crate::session::EmotionSample;
use anyhow::Result;
use async_trait::async_trait;
use std::time::Duration;
use tokio::sync::mpsc::UnboundedSender;

/// Trait for emotion sources
#[async_trait]
pub trait EmotionSource: Send + Sync {
    /// Begin emitting samples
    async fn start(&self) -> Result<()>;

    /// Stop emitting samples
    async fn stop(&self) -> Result<()>;

    /// Get the source name
    fn name(&self) -> &str;
}

/// Replays a fixed list of samples at a fixed interval.
///
/// Stands in for a camera-based detector in console sessions and tests.
pub struct ScriptedEmotionFeed {
    samples: Vec<(String, f64)>,
    interval: Duration,
    events: UnboundedSender<SessionEvent>,
}

impl ScriptedEmotionFeed {
    pub fn new(
        samples: Vec<(String, f64)>,
        interval: Duration,
        events: UnboundedSender<SessionEvent>,
    ) -> Self {
        Self {
            samples,
            interval,
            events,
        }
    }
}

#[async_trait]
impl EmotionSource for ScriptedEmotionFeed {
    async fn start(&self) -> Result<()> {
        let samples = self.samples.clone();
        let interval = self.interval;
        let events = self.events.clone();

        tokio::spawn(async move {
            for (label, score) in samples {
                tokio::time::sleep(interval).await;
                if events
                    .send(SessionEvent::Felt(EmotionSample::new(label, score)))
                    .is_err()
                {
                    break;
                }
            }
        });
        Ok(())
    }

    async fn stop(&self) -> Result<()> {
        Ok(())
    }

    fn name(&self) -> &str {
        "scripted"
    }
}
