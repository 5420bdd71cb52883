//! End-to-end tests for the triage flow.
//!
//! Each test wires a `TriageFlow` against the in-memory store and mock
//! external collaborators, then exercises the real public contract from
//! intake submission through handoff.

use std::sync::Arc;
use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};
use std::time::Duration;

use async_trait::async_trait;
use uuid::Uuid;

use litgo_triage::analysis::{AnalysisClient, PreliminaryAnalysis, Urgency};
use litgo_triage::config::TriageConfig;
use litgo_triage::error::{AnalysisError, Error, HandoffError};
use litgo_triage::flow::TriageFlow;
use litgo_triage::handoff::CaseAssignment;
use litgo_triage::intake::{IntakeForm, IntakeSubmission};
use litgo_triage::questionnaire::IntakeQuestionPlanner;
use litgo_triage::session::{FailureReason, SessionState};
use litgo_triage::store::MemorySessionStore;
use litgo_triage::synthesis::SynthesisRecord;

/// Mock analysis service: classifies everything as Civil Law unless the
/// outage flag is set, in which case it times out.
struct MockAnalysisService {
    down: AtomicBool,
    calls: AtomicUsize,
}

impl MockAnalysisService {
    fn up() -> Arc<Self> {
        Arc::new(Self {
            down: AtomicBool::new(false),
            calls: AtomicUsize::new(0),
        })
    }

    fn down() -> Arc<Self> {
        Arc::new(Self {
            down: AtomicBool::new(true),
            calls: AtomicUsize::new(0),
        })
    }

    fn restore(&self) {
        self.down.store(false, Ordering::SeqCst);
    }
}

#[async_trait]
impl AnalysisClient for MockAnalysisService {
    async fn analyze(
        &self,
        submission: &IntakeSubmission,
    ) -> Result<PreliminaryAnalysis, AnalysisError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        if self.down.load(Ordering::SeqCst) {
            return Err(AnalysisError::Timeout {
                waited: Duration::from_secs(30),
            });
        }
        Ok(PreliminaryAnalysis {
            legal_area: "Civil Law".into(),
            urgency: Urgency::Medium,
            summary: format!("Preliminary classification of: {}", submission.case_description),
        })
    }
}

/// Mock case-assignment collaborator counting downstream effects.
struct MockCaseAssignment {
    assignments: AtomicUsize,
}

impl MockCaseAssignment {
    fn new() -> Arc<Self> {
        Arc::new(Self {
            assignments: AtomicUsize::new(0),
        })
    }
}

#[async_trait]
impl CaseAssignment for MockCaseAssignment {
    async fn assign(
        &self,
        record: &SynthesisRecord,
        _session_id: Uuid,
        _client_email: &str,
    ) -> Result<String, HandoffError> {
        self.assignments.fetch_add(1, Ordering::SeqCst);
        Ok(format!("assignment-{}", record.protocol_number))
    }
}

fn build_flow(
    analysis: Arc<MockAnalysisService>,
    assignment: Arc<MockCaseAssignment>,
) -> Arc<TriageFlow> {
    Arc::new(TriageFlow::new(
        Arc::new(MemorySessionStore::new()),
        analysis,
        Arc::new(IntakeQuestionPlanner),
        assignment,
        &TriageConfig::default(),
    ))
}

fn maria() -> IntakeForm {
    IntakeForm::new(
        "Maria Silva",
        "maria@example.com",
        "Contract dispute with a contractor",
    )
}

async fn answer_all(flow: &TriageFlow, id: Uuid) {
    for question in flow.questions(id).await.unwrap() {
        flow.record_answer(id, &question.id, &question.options[0])
            .await
            .unwrap();
    }
}

#[tokio::test]
async fn full_flow_from_intake_to_handoff() {
    let analysis = MockAnalysisService::up();
    let assignment = MockCaseAssignment::new();
    let flow = build_flow(analysis, assignment.clone());

    // Intake
    let id = flow.submit(maria()).await.unwrap();
    assert_eq!(flow.status(id).await.unwrap().state, SessionState::Analyzing);

    // Analysis generates a non-empty question batch
    flow.run_analysis(id).await.unwrap();
    let questions = flow.questions(id).await.unwrap();
    assert!(!questions.is_empty());
    assert_eq!(flow.status(id).await.unwrap().state, SessionState::Questioning);

    // Answer everything
    assert!(!flow.is_complete(id).await.unwrap());
    answer_all(&flow, id).await;
    assert!(flow.is_complete(id).await.unwrap());

    // Synthesis
    let record = flow.synthesize(id).await.unwrap();
    assert!(record.protocol_number.starts_with("LITGO-"));
    assert_eq!(record.legal_area, "Civil Law");
    assert_eq!(record.urgency, Urgency::Medium);
    assert!(record.full_analysis_text.contains("Contract dispute with a contractor"));
    assert!(!record.disclaimer.is_empty());
    assert_eq!(flow.status(id).await.unwrap().state, SessionState::Completed);

    // Handoff
    let receipt = flow.handoff(id).await.unwrap();
    assert_eq!(receipt.protocol_number, record.protocol_number);
    assert_eq!(assignment.assignments.load(Ordering::SeqCst), 1);
}

#[tokio::test]
async fn protocol_number_matches_expected_format() {
    let flow = build_flow(MockAnalysisService::up(), MockCaseAssignment::new());
    let id = flow.submit(maria()).await.unwrap();
    flow.run_analysis(id).await.unwrap();
    answer_all(&flow, id).await;

    let record = flow.synthesize(id).await.unwrap();
    // LITGO-{year}-{zero-padded sequence}
    let parts: Vec<&str> = record.protocol_number.split('-').collect();
    assert_eq!(parts.len(), 3);
    assert_eq!(parts[0], "LITGO");
    assert_eq!(parts[1].len(), 4);
    assert!(parts[1].chars().all(|c| c.is_ascii_digit()));
    assert_eq!(parts[2], "0001");
}

#[tokio::test]
async fn empty_email_rejected_before_any_session_exists() {
    let flow = build_flow(MockAnalysisService::up(), MockCaseAssignment::new());
    let err = flow
        .submit(IntakeForm::new("Maria Silva", "", "Contract dispute"))
        .await
        .unwrap_err();

    match err {
        Error::Validation(v) => {
            assert_eq!(v.field, "email");
            assert_eq!(v.reason, "required");
        }
        other => panic!("expected validation error, got {other:?}"),
    }
}

#[tokio::test]
async fn analysis_timeout_then_retry_proceeds_normally() {
    let analysis = MockAnalysisService::down();
    let flow = build_flow(analysis.clone(), MockCaseAssignment::new());

    let id = flow.submit(maria()).await.unwrap();
    let err = flow.run_analysis(id).await.unwrap_err();
    assert!(matches!(err, Error::Analysis(AnalysisError::Timeout { .. })));

    let status = flow.status(id).await.unwrap();
    assert_eq!(status.state, SessionState::Failed);
    assert_eq!(status.failure, Some(FailureReason::AnalysisUnavailable));

    // Retry with the identical submission succeeds and the flow
    // continues to completion.
    analysis.restore();
    flow.run_analysis(id).await.unwrap();
    assert_eq!(flow.status(id).await.unwrap().state, SessionState::Questioning);

    answer_all(&flow, id).await;
    let record = flow.synthesize(id).await.unwrap();
    assert!(record.protocol_number.starts_with("LITGO-"));
    assert_eq!(analysis.calls.load(Ordering::SeqCst), 2);
}

#[tokio::test]
async fn unknown_question_leaves_answers_unchanged() {
    let flow = build_flow(MockAnalysisService::up(), MockCaseAssignment::new());
    let id = flow.submit(maria()).await.unwrap();
    flow.run_analysis(id).await.unwrap();

    let answers = flow
        .record_answer(id, "incident_timing", "Within the last 30 days")
        .await
        .unwrap();
    assert_eq!(answers.len(), 1);

    let err = flow
        .record_answer(id, "not_a_question", "Whatever")
        .await
        .unwrap_err();
    assert!(matches!(err, Error::Questionnaire(_)));

    let status = flow.status(id).await.unwrap();
    assert_eq!(status.answered_count, 1);
}

#[tokio::test]
async fn reanswering_keeps_only_latest_answer() {
    let flow = build_flow(MockAnalysisService::up(), MockCaseAssignment::new());
    let id = flow.submit(maria()).await.unwrap();
    flow.run_analysis(id).await.unwrap();

    flow.record_answer(id, "documentation", "Yes, organized and available")
        .await
        .unwrap();
    let answers = flow
        .record_answer(id, "documentation", "No documents")
        .await
        .unwrap();

    assert_eq!(answers.len(), 1);
    assert_eq!(answers.get("documentation"), Some("No documents"));
}

#[tokio::test]
async fn concurrent_sessions_get_distinct_protocol_numbers() {
    let flow = build_flow(MockAnalysisService::up(), MockCaseAssignment::new());

    // Drive several sessions to the brink of synthesis.
    let mut ids = Vec::new();
    for i in 0..8 {
        let id = flow
            .submit(IntakeForm::new(
                format!("Client {i}"),
                format!("client{i}@example.com"),
                "A dispute needing triage",
            ))
            .await
            .unwrap();
        flow.run_analysis(id).await.unwrap();
        answer_all(&flow, id).await;
        ids.push(id);
    }

    // Synthesize them all concurrently.
    let mut handles = Vec::new();
    for id in ids {
        let flow = flow.clone();
        handles.push(tokio::spawn(async move {
            flow.synthesize(id).await.unwrap().protocol_number
        }));
    }

    let mut protocols = Vec::new();
    for handle in handles {
        protocols.push(handle.await.unwrap());
    }
    let before = protocols.len();
    protocols.sort();
    protocols.dedup();
    assert_eq!(protocols.len(), before, "protocol numbers must be unique");
}

#[tokio::test]
async fn duplicate_handoff_has_one_downstream_effect() {
    let assignment = MockCaseAssignment::new();
    let flow = build_flow(MockAnalysisService::up(), assignment.clone());

    let id = flow.submit(maria()).await.unwrap();
    flow.run_analysis(id).await.unwrap();
    answer_all(&flow, id).await;
    flow.synthesize(id).await.unwrap();

    let first = flow.handoff(id).await.unwrap();
    let second = flow.handoff(id).await.unwrap();

    assert_eq!(first.receipt_token, second.receipt_token);
    assert_eq!(assignment.assignments.load(Ordering::SeqCst), 1);
}

#[tokio::test]
async fn abandonment_has_no_downstream_effects() {
    let assignment = MockCaseAssignment::new();
    let flow = build_flow(MockAnalysisService::up(), assignment.clone());

    let id = flow.submit(maria()).await.unwrap();
    flow.run_analysis(id).await.unwrap();
    answer_all(&flow, id).await;

    flow.abandon(id).await.unwrap();

    assert!(flow.synthesize(id).await.is_err());
    assert!(flow.handoff(id).await.is_err());
    assert_eq!(assignment.assignments.load(Ordering::SeqCst), 0);
}
