//! Interview Report Rendering
//!
//! Read-only consumers that turn a score snapshot plus the session buffers
//! into a human-readable document.

use crate::scoring::{RecommendationTier, ScoreSnapshot};
use crate::session::{SessionState, Speaker};

/// Trait for report renderers
pub trait ReportRenderer: Send + Sync {
    /// Render a complete report from a snapshot and the session it came from
    fn render(&self, snapshot: &ScoreSnapshot, state: &SessionState) -> String;
}

/// Plain-text report for console sessions
pub struct TextReport;

impl TextReport {
    fn tier_label(tier: RecommendationTier) -> &'static str {
        match tier {
            RecommendationTier::StrongHire => "STRONG HIRE",
            RecommendationTier::Hire => "HIRE",
            RecommendationTier::LeanHire => "LEAN HIRE",
            RecommendationTier::NoHire => "NO HIRE",
        }
    }
}

impl ReportRenderer for TextReport {
    fn render(&self, snapshot: &ScoreSnapshot, state: &SessionState) -> String {
        let s = &snapshot.subscores;
        let mut out = String::new();

        out.push_str("==================== INTERVIEW REPORT ====================\n");
        out.push_str(&format!(
            "Overall score: {}/100   Recommendation: {}\n",
            snapshot.overall,
            Self::tier_label(snapshot.tier)
        ));
        out.push_str(&format!(
            "Duration: {}s   Turns: {}   Emotion samples: {}\n\n",
            state.elapsed_secs(),
            state.turns().len(),
            state.emotions().len()
        ));

        out.push_str("Sub-scores\n");
        out.push_str(&format!("  Communication............ {:>3}\n", s.communication));
        out.push_str(&format!("  Confidence............... {:>3}\n", s.confidence));
        out.push_str(&format!("  Technical knowledge...... {:>3}\n", s.technical_knowledge));
        out.push_str(&format!("  Problem solving.......... {:>3}\n", s.problem_solving));
        out.push_str(&format!("  Emotional intelligence... {:>3}\n", s.emotional_intelligence));
        out.push_str(&format!("  Articulation............. {:>3}\n\n", s.articulation));

        if !snapshot.insights.is_empty() {
            out.push_str("Insights\n");
            for insight in &snapshot.insights {
                out.push_str(&format!("  - {}\n", insight));
            }
            out.push('\n');
        }

        if !snapshot.recommendations.is_empty() {
            out.push_str("Recommendations\n");
            for rec in &snapshot.recommendations {
                out.push_str(&format!("  - {}\n", rec));
            }
            out.push('\n');
        }

        out.push_str("Transcript\n");
        for turn in state.turns() {
            let speaker = match turn.speaker {
                Speaker::Human => "Candidate",
                Speaker::Agent => "Interviewer",
            };
            out.push_str(&format!(
                "  [{}] {}: {}\n",
                turn.at.format("%H:%M:%S"),
                speaker,
                turn.text
            ));
        }
        out.push_str("==========================================================\n");
        out
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::scoring;

    #[test]
    fn test_report_contains_scores_and_transcript() {
        let mut state = SessionState::new();
        state.push_agent("Tell me about your experience.");
        state.push_human("I designed a distributed cache with careful testing.");

        let snapshot = scoring::compute(&state);
        let report = TextReport.render(&snapshot, &state);

        assert!(report.contains("INTERVIEW REPORT"));
        assert!(report.contains("Communication"));
        assert!(report.contains("Interviewer: Tell me about your experience."));
        assert!(report.contains("Candidate: I designed a distributed cache"));
    }

    #[test]
    fn test_report_on_empty_session_shows_no_data() {
        let state = SessionState::new();
        let snapshot = scoring::compute(&state);
        let report = TextReport.render(&snapshot, &state);
        assert!(report.contains("No interview data"));
        assert!(report.contains("NO HIRE"));
    }
}
