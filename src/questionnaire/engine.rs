//! Questionnaire state: recorded answers over a generated question batch.

use serde::{Deserialize, Serialize};

use crate::error::QuestionnaireError;

use super::model::{AnswerSet, Question};

/// Sub-state of the questionnaire flow, derived from the answer set.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum QuestionnairePhase {
    /// No answers recorded yet.
    Pending,
    /// Some, but not all, questions answered.
    Answering,
    /// Every question has an answer.
    Complete,
}

/// A session's questionnaire: the generated question batch plus the
/// answers recorded so far.
///
/// Questions are generated exactly once per session and never removed.
/// The answer set is frozen when synthesis begins; any later
/// `record_answer` call is rejected.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Questionnaire {
    questions: Vec<Question>,
    answers: AnswerSet,
    frozen: bool,
}

impl Questionnaire {
    pub fn new(questions: Vec<Question>) -> Self {
        Self {
            questions,
            answers: AnswerSet::new(),
            frozen: false,
        }
    }

    pub fn questions(&self) -> &[Question] {
        &self.questions
    }

    pub fn answers(&self) -> &AnswerSet {
        &self.answers
    }

    /// Look up a question by id.
    pub fn question(&self, question_id: &str) -> Option<&Question> {
        self.questions.iter().find(|q| q.id == question_id)
    }

    /// Record an answer for a question.
    ///
    /// Re-answering overwrites the prior answer. Fails without touching
    /// the answer set if the question is unknown, the option is not one
    /// of that question's options, or the set is frozen.
    pub fn record_answer(
        &mut self,
        question_id: &str,
        option: &str,
    ) -> Result<(), QuestionnaireError> {
        if self.frozen {
            return Err(QuestionnaireError::Frozen);
        }

        let question = self.question(question_id).ok_or_else(|| {
            QuestionnaireError::UnknownQuestion {
                question_id: question_id.to_string(),
            }
        })?;

        if !question.accepts(option) {
            return Err(QuestionnaireError::InvalidOption {
                question_id: question_id.to_string(),
                option: option.to_string(),
            });
        }

        self.answers.record(question_id, option);
        Ok(())
    }

    /// True iff every generated question has a recorded answer.
    pub fn is_complete(&self) -> bool {
        self.questions.iter().all(|q| self.answers.contains(&q.id))
    }

    pub fn phase(&self) -> QuestionnairePhase {
        if self.is_complete() {
            QuestionnairePhase::Complete
        } else if self.answers.is_empty() {
            QuestionnairePhase::Pending
        } else {
            QuestionnairePhase::Answering
        }
    }

    /// Freeze the answer set. Called when synthesis begins; idempotent.
    pub fn freeze(&mut self) {
        self.frozen = true;
    }

    pub fn is_frozen(&self) -> bool {
        self.frozen
    }
}
