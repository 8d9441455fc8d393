//! Scoring Vocabularies
//!
//! Fixed keyword lists driving the deterministic sub-scores. These are
//! intentionally keyword-based rather than model-based so scoring stays
//! testable.

/// Filler words that drag down communication and articulation
pub const FILLER_WORDS: &[&str] = &[
    "um", "uh", "umm", "uhh", "like", "basically", "actually", "literally",
];

/// Core technical vocabulary
pub const TECHNICAL_TERMS: &[&str] = &[
    "algorithm",
    "architecture",
    "api",
    "backend",
    "frontend",
    "cache",
    "cloud",
    "database",
    "deployment",
    "distributed",
    "framework",
    "infrastructure",
    "latency",
    "microservice",
    "performance",
    "scalability",
    "security",
    "testing",
];

/// Process and methodology vocabulary
pub const METHODOLOGY_TERMS: &[&str] = &[
    "agile",
    "scrum",
    "sprint",
    "kanban",
    "continuous integration",
    "code review",
    "pair programming",
    "retrospective",
    "test driven",
];

/// Collaboration and leadership vocabulary
pub const COLLABORATION_TERMS: &[&str] = &[
    "team",
    "leadership",
    "mentor",
    "collaborate",
    "collaboration",
    "stakeholder",
    "communicate",
    "cross functional",
];

/// Indicators of structured problem solving
pub const PROBLEM_SOLVING_TERMS: &[&str] = &[
    "analyze",
    "analyzed",
    "approach",
    "debug",
    "evaluate",
    "investigate",
    "optimize",
    "prioritize",
    "root cause",
    "solution",
    "trade-off",
    "tradeoff",
];

/// Discourse connectives that signal structured narration
pub const STRUCTURE_CONNECTIVES: &[&str] = &[
    "first", "then", "next", "finally", "therefore", "as a result",
];

/// Phrases that introduce concrete examples
pub const EXAMPLE_PHRASES: &[&str] = &["for example", "for instance", "such as"];

/// Emotion labels read as confident presence
pub const CONFIDENT_LABELS: &[&str] = &["happy", "calm", "confident", "neutral"];

/// Emotion labels read as nervousness
pub const NERVOUS_LABELS: &[&str] = &["fearful", "nervous", "anxious", "sad", "disgusted"];

/// Emotion labels counted as positive for emotional intelligence
pub const POSITIVE_LABELS: &[&str] = &["happy", "calm", "confident", "surprised"];
