//! Triage session aggregate root.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::analysis::{PreliminaryAnalysis, Urgency};
use crate::error::SessionError;
use crate::intake::IntakeSubmission;
use crate::questionnaire::Questionnaire;
use crate::synthesis::SynthesisRecord;

use super::state::{FailureReason, SessionState};

/// Aggregate root for one end-to-end triage flow.
///
/// Owns the submission, the analysis, the questionnaire, and the
/// synthesis record. All mutation goes through methods that enforce the
/// state machine; the flow layer persists the aggregate after each
/// accepted operation.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TriageSession {
    pub id: Uuid,
    pub submission: IntakeSubmission,
    pub analysis: Option<PreliminaryAnalysis>,
    pub questionnaire: Option<Questionnaire>,
    pub synthesis: Option<SynthesisRecord>,
    pub state: SessionState,
    /// Set while parked in `Failed`; cleared on retry.
    pub failure: Option<FailureReason>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl TriageSession {
    /// Create a fresh session in `Collecting` for a validated submission.
    pub fn new(submission: IntakeSubmission) -> Self {
        let now = Utc::now();
        Self {
            id: Uuid::new_v4(),
            submission,
            analysis: None,
            questionnaire: None,
            synthesis: None,
            state: SessionState::Collecting,
            failure: None,
            created_at: now,
            updated_at: now,
        }
    }

    /// Validate and apply a state transition.
    ///
    /// Leaving `Failed` is only permitted toward the state recorded in
    /// the failure reason, and clears it.
    pub fn transition_to(&mut self, target: SessionState) -> Result<(), SessionError> {
        if !self.state.can_transition_to(target) {
            return Err(self.invalid_transition(target));
        }

        if self.state == SessionState::Failed {
            match self.failure {
                Some(reason) if reason.retry_state() == target => {
                    self.failure = None;
                }
                _ => return Err(self.invalid_transition(target)),
            }
        }

        tracing::info!(
            session_id = %self.id,
            from = %self.state,
            to = %target,
            "Session state transition"
        );
        self.state = target;
        self.touch();
        Ok(())
    }

    /// Park the session in `Failed` with a reason. Valid only from the
    /// async stages (`Analyzing`, `Synthesizing`).
    pub fn fail(&mut self, reason: FailureReason) -> Result<(), SessionError> {
        self.transition_to(SessionState::Failed)?;
        self.failure = Some(reason);
        tracing::warn!(session_id = %self.id, reason = %reason, "Session failed");
        Ok(())
    }

    /// Return a failed session to the state its failure came from.
    pub fn retry(&mut self) -> Result<SessionState, SessionError> {
        let reason = match (self.state, self.failure) {
            (SessionState::Failed, Some(reason)) => reason,
            _ => return Err(self.invalid_transition(self.state)),
        };
        let target = reason.retry_state();
        self.transition_to(target)?;
        Ok(target)
    }

    /// Whether `synthesize` may run: the questionnaire exists and is
    /// complete, an analysis is present, and the session is at (or
    /// returning to) the synthesis stage.
    pub fn is_ready_for_synthesis(&self) -> bool {
        let stage_ok = matches!(
            self.state,
            SessionState::Questioning | SessionState::Synthesizing
        );
        stage_ok
            && self.analysis.is_some()
            && self
                .questionnaire
                .as_ref()
                .is_some_and(|q| q.is_complete())
    }

    /// Snapshot for the UI layer.
    pub fn status(&self) -> SessionStatus {
        let (question_count, answered_count) = self
            .questionnaire
            .as_ref()
            .map(|q| (q.questions().len(), q.answers().len()))
            .unwrap_or((0, 0));

        SessionStatus {
            id: self.id,
            state: self.state,
            failure: self.failure,
            legal_area: self.analysis.as_ref().map(|a| a.legal_area.clone()),
            urgency: self.analysis.as_ref().map(|a| a.urgency),
            question_count,
            answered_count,
            protocol_number: self.synthesis.as_ref().map(|s| s.protocol_number.clone()),
        }
    }

    fn invalid_transition(&self, target: SessionState) -> SessionError {
        SessionError::InvalidTransition {
            id: self.id,
            from: self.state.to_string(),
            to: target.to_string(),
        }
    }

    fn touch(&mut self) {
        self.updated_at = Utc::now();
    }
}

/// Read-only session snapshot for status endpoints and UI navigation.
#[derive(Debug, Clone, Serialize)]
pub struct SessionStatus {
    pub id: Uuid,
    pub state: SessionState,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub failure: Option<FailureReason>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub legal_area: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub urgency: Option<Urgency>,
    pub question_count: usize,
    pub answered_count: usize,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub protocol_number: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::intake::IntakeForm;

    fn session() -> TriageSession {
        let submission = IntakeForm::new("Maria", "maria@example.com", "A contract dispute")
            .submit()
            .unwrap();
        TriageSession::new(submission)
    }

    #[test]
    fn new_session_starts_collecting() {
        let s = session();
        assert_eq!(s.state, SessionState::Collecting);
        assert!(s.failure.is_none());
        assert!(s.analysis.is_none());
        assert!(s.questionnaire.is_none());
        assert!(s.synthesis.is_none());
    }

    #[test]
    fn happy_path_transitions() {
        let mut s = session();
        s.transition_to(SessionState::Analyzing).unwrap();
        s.transition_to(SessionState::Questioning).unwrap();
        s.transition_to(SessionState::Synthesizing).unwrap();
        s.transition_to(SessionState::Completed).unwrap();
        assert!(s.state.is_terminal());
    }

    #[test]
    fn invalid_transition_rejected_and_state_unchanged() {
        let mut s = session();
        let err = s.transition_to(SessionState::Questioning).unwrap_err();
        assert!(matches!(err, SessionError::InvalidTransition { .. }));
        assert_eq!(s.state, SessionState::Collecting);
    }

    #[test]
    fn fail_from_analyzing_and_retry() {
        let mut s = session();
        s.transition_to(SessionState::Analyzing).unwrap();
        s.fail(FailureReason::AnalysisUnavailable).unwrap();
        assert_eq!(s.state, SessionState::Failed);
        assert_eq!(s.failure, Some(FailureReason::AnalysisUnavailable));

        let restored = s.retry().unwrap();
        assert_eq!(restored, SessionState::Analyzing);
        assert_eq!(s.state, SessionState::Analyzing);
        assert!(s.failure.is_none());
    }

    #[test]
    fn fail_from_synthesizing_retries_to_synthesizing() {
        let mut s = session();
        s.transition_to(SessionState::Analyzing).unwrap();
        s.transition_to(SessionState::Questioning).unwrap();
        s.transition_to(SessionState::Synthesizing).unwrap();
        s.fail(FailureReason::SynthesisFailed).unwrap();

        let restored = s.retry().unwrap();
        assert_eq!(restored, SessionState::Synthesizing);
    }

    #[test]
    fn retry_target_must_match_failure_reason() {
        let mut s = session();
        s.transition_to(SessionState::Analyzing).unwrap();
        s.fail(FailureReason::AnalysisUnavailable).unwrap();
        // Cannot jump from an analysis failure straight to synthesizing.
        let err = s.transition_to(SessionState::Synthesizing).unwrap_err();
        assert!(matches!(err, SessionError::InvalidTransition { .. }));
        assert_eq!(s.state, SessionState::Failed);
        assert_eq!(s.failure, Some(FailureReason::AnalysisUnavailable));
    }

    #[test]
    fn fail_from_collecting_rejected() {
        let mut s = session();
        let err = s.fail(FailureReason::AnalysisUnavailable).unwrap_err();
        assert!(matches!(err, SessionError::InvalidTransition { .. }));
        assert!(s.failure.is_none());
    }

    #[test]
    fn retry_without_failure_rejected() {
        let mut s = session();
        s.transition_to(SessionState::Analyzing).unwrap();
        assert!(s.retry().is_err());
    }

    #[test]
    fn status_snapshot_reflects_progress() {
        let mut s = session();
        let status = s.status();
        assert_eq!(status.state, SessionState::Collecting);
        assert_eq!(status.question_count, 0);
        assert!(status.legal_area.is_none());
        assert!(status.protocol_number.is_none());

        s.analysis = Some(PreliminaryAnalysis {
            legal_area: "Civil Law".into(),
            urgency: Urgency::Medium,
            summary: "Summary.".into(),
        });
        let status = s.status();
        assert_eq!(status.legal_area.as_deref(), Some("Civil Law"));
        assert_eq!(status.urgency, Some(Urgency::Medium));
    }

    #[test]
    fn session_serde_roundtrip() {
        let mut s = session();
        s.transition_to(SessionState::Analyzing).unwrap();
        let json = serde_json::to_string(&s).unwrap();
        let parsed: TriageSession = serde_json::from_str(&json).unwrap();
        assert_eq!(parsed.id, s.id);
        assert_eq!(parsed.state, SessionState::Analyzing);
        assert_eq!(parsed.submission, s.submission);
    }
}
