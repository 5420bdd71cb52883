//! Dynamic questionnaire engine.
//!
//! When the preliminary analysis completes, a planner produces a batch of
//! follow-up questions. Answers are recorded one at a time; the flow may
//! advance to synthesis only once every question has exactly one answer.

pub mod engine;
pub mod model;
pub mod planner;

pub use engine::{Questionnaire, QuestionnairePhase};
pub use model::{AnswerSet, Question};
pub use planner::{IntakeQuestionPlanner, QuestionPlanner};
