//! Insight and Recommendation Templates
//!
//! Turns sub-score thresholds into natural-language feedback. Everything
//! here is deterministic: identical sub-scores always produce identical
//! strings, in a fixed order.

use super::{RecommendationTier, SubScores};

pub fn insights(scores: &SubScores, filler_count: usize) -> Vec<String> {
    let mut out = Vec::new();

    if scores.communication >= 75 {
        out.push("Clear, well-developed answers throughout the conversation.".to_string());
    } else if scores.communication < 50 {
        out.push(
            "Answers were brief or uneven; fuller responses would showcase experience better."
                .to_string(),
        );
    }

    if scores.confidence >= 70 {
        out.push("The candidate presented with steady confidence.".to_string());
    } else if scores.confidence < 50 {
        out.push("Signs of nervousness were visible during the session.".to_string());
    }

    if scores.technical_knowledge >= 70 {
        out.push("Strong command of technical vocabulary and concepts.".to_string());
    } else if scores.technical_knowledge < 40 {
        out.push("Few technical specifics came up in the answers.".to_string());
    }

    if scores.problem_solving >= 70 {
        out.push("Answers showed a structured, analytical approach to problems.".to_string());
    }

    if filler_count > 5 {
        out.push(format!(
            "Frequent filler words ({} occurrences) interrupted the delivery.",
            filler_count
        ));
    }

    if out.is_empty() {
        out.push("Performance was steady across all evaluated dimensions.".to_string());
    }
    out
}

pub fn recommendations(scores: &SubScores, overall: u8) -> Vec<String> {
    let mut out = Vec::new();

    if scores.confidence < 50 {
        out.push(
            "Practice relaxation techniques before interviews to project more confidence."
                .to_string(),
        );
    }
    if scores.communication < 50 {
        out.push(
            "Structure answers with a short setup, concrete detail, and a closing summary."
                .to_string(),
        );
    }
    if scores.technical_knowledge < 40 {
        out.push("Review the core concepts for the target role and name them explicitly.".to_string());
    }
    if scores.problem_solving < 40 {
        out.push(
            "Walk through problems step by step and mention concrete examples.".to_string(),
        );
    }
    if scores.articulation < 50 {
        out.push("Reduce filler words by pausing briefly instead of vocalizing.".to_string());
    }
    if out.is_empty() && overall >= 65 {
        out.push("Ready to proceed to the next interview round.".to_string());
    }
    if out.is_empty() {
        out.push("Keep practicing with mock interviews to sharpen delivery.".to_string());
    }
    out
}

pub fn tier(overall: u8) -> RecommendationTier {
    match overall {
        80..=100 => RecommendationTier::StrongHire,
        65..=79 => RecommendationTier::Hire,
        50..=64 => RecommendationTier::LeanHire,
        _ => RecommendationTier::NoHire,
    }
}
