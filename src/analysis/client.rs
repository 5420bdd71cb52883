//! Analysis client trait: the seam between the triage flow and the
//! external classification service.

use async_trait::async_trait;

use crate::error::AnalysisError;
use crate::intake::IntakeSubmission;

use super::model::PreliminaryAnalysis;

/// External analysis collaborator.
///
/// One call per session; the session stays in `Analyzing` until the call
/// resolves. Implementations must not retry internally: the caller owns
/// the retry decision.
#[async_trait]
pub trait AnalysisClient: Send + Sync {
    /// Classify a case description into a preliminary analysis.
    async fn analyze(
        &self,
        submission: &IntakeSubmission,
    ) -> Result<PreliminaryAnalysis, AnalysisError>;
}
