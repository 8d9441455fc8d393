//! Streaming Multi-Factor Scoring Engine
//!
//! Computes an on-demand composite interview score from the session's
//! transcript and emotion buffers. Each computation produces a fresh
//! immutable [`ScoreSnapshot`]; nothing here mutates session state or
//! blocks the turn-taking machine.
//!
//! Scoring is keyword-list based by design: identical buffers always
//! produce identical snapshots.

pub mod insights;
pub mod keywords;

use crate::session::{EmotionSample, SessionState};
use self::keywords::*;
use serde::{Deserialize, Serialize};

/// Fixed composite weights
const W_COMMUNICATION: f64 = 0.25;
const W_CONFIDENCE: f64 = 0.20;
const W_TECHNICAL: f64 = 0.20;
const W_PROBLEM_SOLVING: f64 = 0.15;
const W_EMOTIONAL: f64 = 0.10;
const W_ARTICULATION: f64 = 0.10;

/// Hiring recommendation derived from the overall score
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum RecommendationTier {
    StrongHire,
    Hire,
    LeanHire,
    NoHire,
}

/// The six independently computed sub-scores, each in [0, 100]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct SubScores {
    pub communication: u8,
    pub confidence: u8,
    pub technical_knowledge: u8,
    pub problem_solving: u8,
    pub emotional_intelligence: u8,
    pub articulation: u8,
}

/// Immutable point-in-time score derived from the session buffers
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ScoreSnapshot {
    pub overall: u8,
    pub subscores: SubScores,
    pub insights: Vec<String>,
    pub recommendations: Vec<String>,
    pub tier: RecommendationTier,
}

impl ScoreSnapshot {
    fn no_data() -> Self {
        Self {
            overall: 0,
            subscores: SubScores {
                communication: 0,
                confidence: 0,
                technical_knowledge: 0,
                problem_solving: 0,
                emotional_intelligence: 0,
                articulation: 0,
            },
            insights: vec!["No interview data captured yet.".to_string()],
            recommendations: Vec::new(),
            tier: RecommendationTier::NoHire,
        }
    }
}

/// Compute a snapshot from the current session buffers
pub fn compute(state: &SessionState) -> ScoreSnapshot {
    let text = state.human_text();
    let emotions = state.emotions();

    if text.is_empty() && emotions.is_empty() {
        return ScoreSnapshot::no_data();
    }

    let words = word_list(&text);
    let fillers = filler_count(&words);
    let has_speech = !words.is_empty();

    let subscores = SubScores {
        communication: communication(&text, &words, fillers),
        confidence: confidence(emotions, has_speech),
        technical_knowledge: technical_knowledge(&text),
        problem_solving: problem_solving(&text),
        emotional_intelligence: emotional_intelligence(emotions, has_speech),
        articulation: articulation(&words, fillers),
    };

    let overall = clamp(
        W_COMMUNICATION * subscores.communication as f64
            + W_CONFIDENCE * subscores.confidence as f64
            + W_TECHNICAL * subscores.technical_knowledge as f64
            + W_PROBLEM_SOLVING * subscores.problem_solving as f64
            + W_EMOTIONAL * subscores.emotional_intelligence as f64
            + W_ARTICULATION * subscores.articulation as f64,
    );

    ScoreSnapshot {
        overall,
        insights: insights::insights(&subscores, fillers),
        recommendations: insights::recommendations(&subscores, overall),
        tier: insights::tier(overall),
        subscores,
    }
}

/// Lowercased words with punctuation stripped
fn word_list(text: &str) -> Vec<String> {
    text.to_lowercase()
        .split_whitespace()
        .map(|w| {
            w.chars()
                .filter(|c| c.is_alphanumeric() || *c == '\'')
                .collect::<String>()
        })
        .filter(|w| !w.is_empty())
        .collect()
}

fn filler_count(words: &[String]) -> usize {
    words
        .iter()
        .filter(|w| FILLER_WORDS.contains(&w.as_str()))
        .count()
}

/// Word-volume band, sentence regularity, lexical diversity, filler penalty
fn communication(text: &str, words: &[String], fillers: usize) -> u8 {
    let n = words.len();
    if n == 0 {
        return 0;
    }

    let volume_pts = if (50..=300).contains(&n) {
        45.0
    } else if n > 300 {
        35.0
    } else {
        n as f64 / 50.0 * 45.0
    };

    let sentences = text
        .split(['.', '!', '?'])
        .filter(|s| !s.trim().is_empty())
        .count()
        .max(1);
    let words_per_sentence = n as f64 / sentences as f64;
    let regularity_pts = if (8.0..=20.0).contains(&words_per_sentence) {
        20.0
    } else {
        8.0
    };

    let unique: std::collections::HashSet<&str> = words.iter().map(|w| w.as_str()).collect();
    let diversity = unique.len() as f64 / n as f64;
    let diversity_pts = (diversity / 0.7).min(1.0) * 25.0;

    let filler_pen = (fillers as f64 * 3.0).min(18.0);

    clamp(volume_pts + regularity_pts + diversity_pts - filler_pen)
}

/// Mean emotion score with confident-label bonus and nervous-label penalty
fn confidence(samples: &[EmotionSample], has_speech: bool) -> u8 {
    if samples.is_empty() {
        return if has_speech { 50 } else { 0 };
    }

    let n = samples.len() as f64;
    let mean = samples.iter().map(|s| s.score).sum::<f64>() / n;
    let confident = label_ratio(samples, CONFIDENT_LABELS);
    let nervous = label_ratio(samples, NERVOUS_LABELS);

    clamp(mean * 70.0 + confident * 20.0 - nervous * 25.0)
}

/// Capped keyword hits across three independent vocabularies
fn technical_knowledge(text: &str) -> u8 {
    let lower = text.to_lowercase();
    let tech = (hit_count(&lower, TECHNICAL_TERMS) as f64 * 8.0).min(50.0);
    let methodology = (hit_count(&lower, METHODOLOGY_TERMS) as f64 * 10.0).min(25.0);
    let collaboration = (hit_count(&lower, COLLABORATION_TERMS) as f64 * 7.0).min(25.0);
    clamp(tech + methodology + collaboration)
}

/// Problem-solving indicators plus structured discourse and example bonuses
fn problem_solving(text: &str) -> u8 {
    let lower = text.to_lowercase();
    let indicators = (hit_count(&lower, PROBLEM_SOLVING_TERMS) as f64 * 8.0).min(60.0);
    let structure = (hit_count(&lower, STRUCTURE_CONNECTIVES) as f64 * 5.0).min(20.0);
    let examples = (hit_count(&lower, EXAMPLE_PHRASES) as f64 * 10.0).min(20.0);
    clamp(indicators + structure + examples)
}

/// Emotion stability (inverse variance) plus positive-label proportion
fn emotional_intelligence(samples: &[EmotionSample], has_speech: bool) -> u8 {
    if samples.is_empty() {
        return if has_speech { 40 } else { 0 };
    }

    let n = samples.len() as f64;
    let mean = samples.iter().map(|s| s.score).sum::<f64>() / n;
    let variance = samples.iter().map(|s| (s.score - mean).powi(2)).sum::<f64>() / n;
    let stability_pts = 50.0 / (1.0 + 20.0 * variance);
    let positive_pts = label_ratio(samples, POSITIVE_LABELS) * 50.0;

    clamp(stability_pts + positive_pts)
}

/// Base score minus filler density and single-word repetition penalties
fn articulation(words: &[String], fillers: usize) -> u8 {
    let n = words.len();
    if n == 0 {
        return 0;
    }

    let density_pen = (fillers as f64 / n as f64 * 300.0).min(30.0);

    let mut counts: std::collections::HashMap<&str, usize> = std::collections::HashMap::new();
    for word in words.iter().filter(|w| w.len() > 3) {
        *counts.entry(word.as_str()).or_default() += 1;
    }
    let repeated = counts.values().filter(|&&c| c > 5).count();
    let repeat_pen = (repeated as f64 * 5.0).min(20.0);

    clamp(85.0 - density_pen - repeat_pen)
}

fn hit_count(lower_text: &str, vocabulary: &[&str]) -> usize {
    vocabulary.iter().filter(|kw| lower_text.contains(*kw)).count()
}

fn label_ratio(samples: &[EmotionSample], labels: &[&str]) -> f64 {
    let hits = samples
        .iter()
        .filter(|s| labels.contains(&s.label.to_lowercase().as_str()))
        .count();
    hits as f64 / samples.len() as f64
}

fn clamp(value: f64) -> u8 {
    value.round().clamp(0.0, 100.0) as u8
}
