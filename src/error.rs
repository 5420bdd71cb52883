//! Error types for the triage core.

use std::time::Duration;

use uuid::Uuid;

/// Top-level error type for the triage core.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error("Validation error: {0}")]
    Validation(#[from] ValidationError),

    #[error("Session error: {0}")]
    Session(#[from] SessionError),

    #[error("Analysis error: {0}")]
    Analysis(#[from] AnalysisError),

    #[error("Questionnaire error: {0}")]
    Questionnaire(#[from] QuestionnaireError),

    #[error("Synthesis error: {0}")]
    Synthesis(#[from] SynthesisError),

    #[error("Handoff error: {0}")]
    Handoff(#[from] HandoffError),
}

/// Intake validation failures. Surfaced immediately to the caller;
/// no session is created when validation fails.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("Invalid {field}: {reason}")]
pub struct ValidationError {
    /// Which intake field failed ("name", "email", "description").
    pub field: String,
    /// Why it failed ("required", "malformed").
    pub reason: String,
}

impl ValidationError {
    pub fn new(field: impl Into<String>, reason: impl Into<String>) -> Self {
        Self {
            field: field.into(),
            reason: reason.into(),
        }
    }
}

/// Session lifecycle errors.
#[derive(Debug, thiserror::Error)]
pub enum SessionError {
    #[error("Session not found: {id}")]
    NotFound { id: Uuid },

    #[error("Session {id} cannot transition from {from} to {to}")]
    InvalidTransition {
        id: Uuid,
        from: String,
        to: String,
    },

    #[error("Session {id} already has an analysis; at most one analyze call per session")]
    AnalysisAlreadyPresent { id: Uuid },

    #[error("Session {id} has no generated questionnaire")]
    QuestionnaireNotGenerated { id: Uuid },

    #[error("Session {id} is already completed")]
    AlreadyCompleted { id: Uuid },
}

/// Failures from the external AI analysis collaborator.
///
/// Every variant parks the session in `Failed` with reason
/// `AnalysisUnavailable`; recovery is a user-initiated retry with the
/// same submission.
#[derive(Debug, thiserror::Error)]
pub enum AnalysisError {
    #[error("Analysis service unavailable: {reason}")]
    Unavailable { reason: String },

    #[error("Analysis timed out after {waited:?}")]
    Timeout { waited: Duration },

    #[error("Invalid analysis response: {reason}")]
    InvalidResponse { reason: String },
}

/// Questionnaire operation errors. Fatal to the call, never to the
/// session; the answer set is left untouched.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum QuestionnaireError {
    #[error("Unknown question: {question_id}")]
    UnknownQuestion { question_id: String },

    #[error("Option '{option}' is not valid for question {question_id}")]
    InvalidOption {
        question_id: String,
        option: String,
    },

    #[error("Answer set is frozen; synthesis has already begun")]
    Frozen,
}

/// Synthesis failures.
#[derive(Debug, thiserror::Error)]
pub enum SynthesisError {
    /// Preconditions not met. Rejects the call without mutating the session.
    #[error("Session is not ready for synthesis: {reason}")]
    NotReady { reason: String },

    #[error("Protocol number allocation failed: {0}")]
    Allocation(String),

    #[error("Synthesis generation failed: {0}")]
    Generation(String),
}

/// Handoff failures.
#[derive(Debug, thiserror::Error)]
pub enum HandoffError {
    #[error("Session has no completed synthesis to hand off")]
    NotCompleted,

    #[error("Case assignment rejected protocol {protocol_number}: {reason}")]
    Rejected {
        protocol_number: String,
        reason: String,
    },
}

/// Result type alias for the triage core.
pub type Result<T> = std::result::Result<T, Error>;
