//! Triage flow coordinator: wires intake, analysis, questionnaire,
//! synthesis, and handoff together and enforces their ordering.
//!
//! Within one session: question generation strictly follows analysis
//! success, synthesis strictly follows questionnaire completion, and
//! handoff strictly follows synthesis success. Each operation loads the
//! session, checks the state it requires, and persists the session only
//! after the operation is accepted.

use std::sync::Arc;

use tracing::{info, warn};
use uuid::Uuid;

use crate::analysis::AnalysisClient;
use crate::config::TriageConfig;
use crate::error::{Result, SessionError, SynthesisError};
use crate::handoff::{CaseAssignment, HandoffDispatcher, HandoffReceipt};
use crate::intake::IntakeForm;
use crate::questionnaire::{AnswerSet, Question, QuestionPlanner, Questionnaire};
use crate::session::{FailureReason, SessionState, SessionStatus, TriageSession};
use crate::store::SessionStore;
use crate::synthesis::{ProtocolAllocator, SynthesisGenerator, SynthesisRecord};

/// Coordinates the full intake-to-handoff workflow.
///
/// One logical session per user interaction; the only state shared
/// across sessions is the protocol-number allocator and the handoff
/// dedup map.
pub struct TriageFlow {
    store: Arc<dyn SessionStore>,
    analysis: Arc<dyn AnalysisClient>,
    planner: Arc<dyn QuestionPlanner>,
    generator: SynthesisGenerator,
    dispatcher: HandoffDispatcher,
}

impl TriageFlow {
    /// Build a flow with a fresh protocol allocator from configuration.
    pub fn new(
        store: Arc<dyn SessionStore>,
        analysis: Arc<dyn AnalysisClient>,
        planner: Arc<dyn QuestionPlanner>,
        assignment: Arc<dyn CaseAssignment>,
        config: &TriageConfig,
    ) -> Self {
        let allocator = Arc::new(ProtocolAllocator::new(config.protocol_prefix.clone()));
        Self::with_allocator(store, analysis, planner, assignment, allocator)
    }

    /// Build a flow around an existing allocator (reload path: seed the
    /// allocator above the persisted high-water mark first).
    pub fn with_allocator(
        store: Arc<dyn SessionStore>,
        analysis: Arc<dyn AnalysisClient>,
        planner: Arc<dyn QuestionPlanner>,
        assignment: Arc<dyn CaseAssignment>,
        allocator: Arc<ProtocolAllocator>,
    ) -> Self {
        Self {
            store,
            analysis,
            planner,
            generator: SynthesisGenerator::new(allocator),
            dispatcher: HandoffDispatcher::new(assignment),
        }
    }

    /// Validate an intake form and open a session awaiting analysis.
    ///
    /// A validation failure never creates a session.
    pub async fn submit(&self, form: IntakeForm) -> Result<Uuid> {
        let submission = form.submit()?;
        let mut session = TriageSession::new(submission);
        session.transition_to(SessionState::Analyzing)?;
        let id = session.id;
        self.store.insert(session).await?;
        info!(session_id = %id, "Intake accepted; session awaiting analysis");
        Ok(id)
    }

    /// Run (or retry) the external analysis for a session.
    ///
    /// Requires `Analyzing` with no analysis yet, or `Failed` with
    /// reason `AnalysisUnavailable`. On success the questionnaire is
    /// generated and the session moves to `Questioning`; on failure the
    /// session parks in `Failed` and the error is returned.
    pub async fn run_analysis(&self, session_id: Uuid) -> Result<()> {
        let mut session = self.store.get(session_id).await?;

        match (session.state, session.failure) {
            (SessionState::Analyzing, _) if session.analysis.is_some() => {
                return Err(SessionError::AnalysisAlreadyPresent { id: session_id }.into());
            }
            (SessionState::Analyzing, _) => {}
            (SessionState::Failed, Some(FailureReason::AnalysisUnavailable)) => {
                session.retry()?;
            }
            (from, _) => {
                return Err(SessionError::InvalidTransition {
                    id: session_id,
                    from: from.to_string(),
                    to: SessionState::Questioning.to_string(),
                }
                .into());
            }
        }

        match self.analysis.analyze(&session.submission).await {
            Ok(analysis) => {
                let questions = self.planner.plan(&analysis);
                info!(
                    session_id = %session_id,
                    legal_area = %analysis.legal_area,
                    urgency = %analysis.urgency,
                    questions = questions.len(),
                    "Analysis complete; questionnaire generated"
                );
                session.questionnaire = Some(Questionnaire::new(questions));
                session.analysis = Some(analysis);
                session.transition_to(SessionState::Questioning)?;
                self.store.update(session).await?;
                Ok(())
            }
            Err(e) => {
                warn!(session_id = %session_id, error = %e, "Analysis failed");
                session.fail(FailureReason::AnalysisUnavailable)?;
                self.store.update(session).await?;
                Err(e.into())
            }
        }
    }

    /// The generated question batch, for display.
    pub async fn questions(&self, session_id: Uuid) -> Result<Vec<Question>> {
        let session = self.store.get(session_id).await?;
        let questionnaire = session
            .questionnaire
            .as_ref()
            .ok_or(SessionError::QuestionnaireNotGenerated { id: session_id })?;
        Ok(questionnaire.questions().to_vec())
    }

    /// Record an answer for a question. Returns the updated answer set.
    pub async fn record_answer(
        &self,
        session_id: Uuid,
        question_id: &str,
        option: &str,
    ) -> Result<AnswerSet> {
        let mut session = self.store.get(session_id).await?;
        if session.state != SessionState::Questioning {
            return Err(SessionError::InvalidTransition {
                id: session_id,
                from: session.state.to_string(),
                to: SessionState::Questioning.to_string(),
            }
            .into());
        }

        let questionnaire = session
            .questionnaire
            .as_mut()
            .ok_or(SessionError::QuestionnaireNotGenerated { id: session_id })?;
        questionnaire.record_answer(question_id, option)?;
        let answers = questionnaire.answers().clone();

        self.store.update(session).await?;
        Ok(answers)
    }

    /// True iff every generated question has a recorded answer.
    pub async fn is_complete(&self, session_id: Uuid) -> Result<bool> {
        let session = self.store.get(session_id).await?;
        let questionnaire = session
            .questionnaire
            .as_ref()
            .ok_or(SessionError::QuestionnaireNotGenerated { id: session_id })?;
        Ok(questionnaire.is_complete())
    }

    /// Generate the synthesis record for a completed questionnaire.
    ///
    /// Requires `Questioning` with a complete answer set, or `Failed`
    /// with reason `SynthesisFailed` for a retry. Calling earlier fails
    /// deterministically without mutating the stored session.
    pub async fn synthesize(&self, session_id: Uuid) -> Result<SynthesisRecord> {
        let mut session = self.store.get(session_id).await?;

        if session.state == SessionState::Failed {
            match session.failure {
                Some(FailureReason::SynthesisFailed) => {
                    session.retry()?;
                }
                _ => {
                    return Err(SessionError::InvalidTransition {
                        id: session_id,
                        from: session.state.to_string(),
                        to: SessionState::Synthesizing.to_string(),
                    }
                    .into());
                }
            }
        }

        if !session.is_ready_for_synthesis() {
            return Err(SynthesisError::NotReady {
                reason: format!(
                    "session {session_id} in state {} with an incomplete questionnaire",
                    session.state
                ),
            }
            .into());
        }

        if session.state == SessionState::Questioning {
            session.transition_to(SessionState::Synthesizing)?;
        }
        if let Some(questionnaire) = session.questionnaire.as_mut() {
            questionnaire.freeze();
        }

        match self.generator.synthesize(&session) {
            Ok(record) => {
                session.synthesis = Some(record.clone());
                session.transition_to(SessionState::Completed)?;
                self.store.update(session).await?;
                Ok(record)
            }
            Err(e) => {
                warn!(session_id = %session_id, error = %e, "Synthesis failed");
                session.fail(FailureReason::SynthesisFailed)?;
                self.store.update(session).await?;
                Err(e.into())
            }
        }
    }

    /// Hand the completed synthesis to case assignment. Idempotent per
    /// protocol number.
    pub async fn handoff(&self, session_id: Uuid) -> Result<HandoffReceipt> {
        let session = self.store.get(session_id).await?;
        let receipt = self.dispatcher.handoff(&session).await?;
        Ok(receipt)
    }

    /// Abandon a session before completion. Discards all session state
    /// with no downstream side effects.
    pub async fn abandon(&self, session_id: Uuid) -> Result<()> {
        let session = self.store.get(session_id).await?;
        if session.state.is_terminal() {
            return Err(SessionError::AlreadyCompleted { id: session_id }.into());
        }
        self.store.remove(session_id).await?;
        info!(session_id = %session_id, state = %session.state, "Session abandoned");
        Ok(())
    }

    /// Read-only snapshot for the UI layer.
    pub async fn status(&self, session_id: Uuid) -> Result<SessionStatus> {
        Ok(self.store.get(session_id).await?.status())
    }
}
