//! Bounded TTL Response Cache
//!
//! Owned by the Ollama oracle, keyed by request shape. Keeps repeated
//! identical requests from hitting the model twice in quick succession
//! without introducing any process-wide mutable state.

use std::collections::HashMap;
use std::time::{Duration, Instant};

pub struct TtlCache {
    entries: HashMap<String, (Instant, String)>,
    ttl: Duration,
    capacity: usize,
}

impl TtlCache {
    pub fn new(ttl: Duration, capacity: usize) -> Self {
        Self {
            entries: HashMap::new(),
            ttl,
            capacity,
        }
    }

    pub fn get(&mut self, key: &str) -> Option<String> {
        match self.entries.get(key) {
            Some((inserted, value)) if inserted.elapsed() <= self.ttl => Some(value.clone()),
            Some(_) => {
                self.entries.remove(key);
                None
            }
            None => None,
        }
    }

    pub fn put(&mut self, key: String, value: String) {
        if self.entries.len() >= self.capacity && !self.entries.contains_key(&key) {
            self.evict_one();
        }
        self.entries.insert(key, (Instant::now(), value));
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Drop expired entries first, otherwise the oldest entry
    fn evict_one(&mut self) {
        let expired: Vec<String> = self
            .entries
            .iter()
            .filter(|(_, (at, _))| at.elapsed() > self.ttl)
            .map(|(k, _)| k.clone())
            .collect();

        if !expired.is_empty() {
            for key in expired {
                self.entries.remove(&key);
            }
            return;
        }

        if let Some(oldest) = self
            .entries
            .iter()
            .min_by_key(|(_, (at, _))| *at)
            .map(|(k, _)| k.clone())
        {
            self.entries.remove(&oldest);
        }
    }
}
