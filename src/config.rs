use anyhow::Result;
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// Main application configuration
///
/// Every timing window and detection threshold the engine uses lives here.
/// The numeric defaults are heuristic tuning values, not sacred numbers.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    // Interview
    pub role: String,
    pub candidate_name: String,

    // Echo filter
    /// Window after agent speech during which echo is suspected (ms)
    pub echo_window_ms: u64,
    /// Reject when this fraction of candidate tokens match the agent text
    pub echo_match_ratio_high: f64,
    /// Reject at this lower ratio when an adjacent token pair also matches
    pub echo_match_ratio_sequence: f64,
    /// Token count below which more than one match is already suspicious
    pub echo_short_utterance_tokens: usize,

    // Completion heuristic
    /// Utterances shorter than this never schedule a reply (chars)
    pub completion_min_chars: usize,
    /// Length past which an utterance counts as a probable completion
    pub completion_probable_chars: usize,
    pub completion_definite_delay_ms: u64,
    pub completion_probable_delay_ms: u64,
    pub completion_tentative_delay_ms: u64,

    // Turn taking
    /// Post-speech grace period before transcription resumes (ms)
    pub mute_cooldown_ms: u64,

    // AI
    pub ollama_enabled: bool,
    pub ollama_url: String,
    pub ollama_model: String,
    pub ollama_timeout_secs: u64,
    /// TTL for cached oracle responses (secs)
    pub oracle_cache_ttl_secs: u64,
    /// Maximum entries held by the oracle response cache
    pub oracle_cache_capacity: usize,

    // Meta
    pub log_level: String,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            role: "Software Engineer".to_string(),
            candidate_name: "".to_string(),

            echo_window_ms: 2000,
            echo_match_ratio_high: 0.55,
            echo_match_ratio_sequence: 0.3,
            echo_short_utterance_tokens: 4,

            completion_min_chars: 10,
            completion_probable_chars: 25,
            completion_definite_delay_ms: 300,
            completion_probable_delay_ms: 800,
            completion_tentative_delay_ms: 1400,

            mute_cooldown_ms: 1500,

            ollama_enabled: false,
            ollama_url: "http://localhost:11434".to_string(),
            ollama_model: "llama2".to_string(),
            ollama_timeout_secs: 10,
            oracle_cache_ttl_secs: 300,
            oracle_cache_capacity: 64,

            log_level: "INFO".to_string(),
        }
    }
}

impl Config {
    /// Load config from file or create default
    pub fn load() -> Result<Self> {
        let config_path = config_path();

        if config_path.exists() {
            let content = std::fs::read_to_string(&config_path)?;
            match serde_json::from_str(&content) {
                Ok(config) => Ok(config),
                Err(e) => {
                    // Graceful degradation: log warning and use defaults
                    tracing::warn!("⚠️ Config file corrupted or invalid, using defaults: {}", e);
                    // Backup corrupt file for debugging
                    let backup_path = config_path.with_extension("json.corrupt");
                    let _ = std::fs::rename(&config_path, &backup_path);
                    Ok(Self::default())
                }
            }
        } else {
            Ok(Self::default())
        }
    }

    /// Save config to file
    pub fn save(&self) -> Result<()> {
        let config_path = config_path();

        if let Some(parent) = config_path.parent() {
            std::fs::create_dir_all(parent)?;
        }

        let content = serde_json::to_string_pretty(self)?;
        std::fs::write(&config_path, content)?;
        Ok(())
    }
}

pub fn config_path() -> PathBuf {
    dirs::config_dir()
        .unwrap_or_else(|| PathBuf::from("."))
        .join("vivavoce")
        .join("config.json")
}
