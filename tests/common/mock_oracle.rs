//! Mock Reply Oracle for Testing
//!
//! Counts invocations and tracks overlapping lifetimes so tests can assert
//! the engine's mutual-exclusion property directly.

use anyhow::Result;
use async_trait::async_trait;
use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};
use std::time::Duration;
use vivavoce::oracle::ReplyOracle;
use vivavoce::session::{ConversationTurn, SessionContext};

pub struct MockOracle {
    /// Total completed + in-flight invocations
    pub calls: AtomicUsize,
    /// Currently in-flight invocations
    in_flight: AtomicUsize,
    /// High-water mark of concurrent invocations
    pub max_in_flight: AtomicUsize,
    /// Simulated generation latency
    pub delay: Duration,
    /// Fail every request
    pub should_fail: AtomicBool,
}

impl MockOracle {
    pub fn new() -> Self {
        Self {
            calls: AtomicUsize::new(0),
            in_flight: AtomicUsize::new(0),
            max_in_flight: AtomicUsize::new(0),
            delay: Duration::ZERO,
            should_fail: AtomicBool::new(false),
        }
    }

    pub fn with_delay(delay: Duration) -> Self {
        Self {
            delay,
            ..Self::new()
        }
    }

    pub fn failing() -> Self {
        let oracle = Self::new();
        oracle.should_fail.store(true, Ordering::SeqCst);
        oracle
    }

    pub fn call_count(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }

    pub fn max_concurrency(&self) -> usize {
        self.max_in_flight.load(Ordering::SeqCst)
    }
}

impl Default for MockOracle {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl ReplyOracle for MockOracle {
    async fn generate_reply(
        &self,
        _human_text: &str,
        _history: &[ConversationTurn],
        _context: &SessionContext,
    ) -> Result<String> {
        let n = self.calls.fetch_add(1, Ordering::SeqCst) + 1;
        let now = self.in_flight.fetch_add(1, Ordering::SeqCst) + 1;
        self.max_in_flight.fetch_max(now, Ordering::SeqCst);

        if !self.delay.is_zero() {
            tokio::time::sleep(self.delay).await;
        }
        self.in_flight.fetch_sub(1, Ordering::SeqCst);

        if self.should_fail.load(Ordering::SeqCst) {
            return Err(anyhow::anyhow!("Mock oracle failure"));
        }
        Ok(format!("Follow-up question number {}?", n))
    }

    fn name(&self) -> &str {
        "mock"
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_mock_oracle_counts_calls() {
        let oracle = MockOracle::new();
        let ctx = SessionContext {
            role: "Engineer".to_string(),
            candidate_name: "".to_string(),
        };
        let reply = oracle.generate_reply("hello", &[], &ctx).await.unwrap();
        assert!(reply.contains("number 1"));
        assert_eq!(oracle.call_count(), 1);
        assert_eq!(oracle.max_concurrency(), 1);
    }
}
