//! Question planning: which follow-up questions a session gets.

use crate::analysis::PreliminaryAnalysis;

use super::model::Question;

/// Produces the follow-up question batch for a completed analysis.
///
/// The default planner is deterministic and ignores the analysis
/// content; the trait exists so a future planner can vary questions by
/// legal area or urgency.
pub trait QuestionPlanner: Send + Sync {
    fn plan(&self, analysis: &PreliminaryAnalysis) -> Vec<Question>;
}

/// Fixed three-question intake set: incident timing, document
/// availability, prior legal consultation.
#[derive(Debug, Clone, Copy, Default)]
pub struct IntakeQuestionPlanner;

impl QuestionPlanner for IntakeQuestionPlanner {
    fn plan(&self, _analysis: &PreliminaryAnalysis) -> Vec<Question> {
        vec![
            Question::new(
                "incident_timing",
                "How long ago did the incident occur?",
                [
                    "Within the last 30 days",
                    "1 to 6 months ago",
                    "6 months to 1 year ago",
                    "More than a year ago",
                ],
            ),
            Question::new(
                "documentation",
                "Do you have documents related to the case (contracts, receipts, messages)?",
                [
                    "Yes, organized and available",
                    "Yes, but incomplete",
                    "No documents",
                ],
            ),
            Question::new(
                "prior_consultation",
                "Have you consulted a lawyer about this matter before?",
                ["Yes", "No", "Currently represented"],
            ),
        ]
    }
}
