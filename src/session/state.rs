//! Session state machine: which stage of the triage flow a session is in.

use serde::{Deserialize, Serialize};

/// The states of a triage session.
///
/// Progresses forward only: Collecting → Analyzing → Questioning →
/// Synthesizing → Completed. `Failed` is reachable from `Analyzing` and
/// `Synthesizing`; a retry returns to whichever of those the failure
/// came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SessionState {
    Collecting,
    Analyzing,
    Questioning,
    Synthesizing,
    Completed,
    Failed,
}

impl SessionState {
    /// Check if a transition from `self` to `target` is valid.
    ///
    /// `Failed → Analyzing` and `Failed → Synthesizing` are listed here;
    /// the aggregate additionally checks that the retry target matches
    /// the recorded failure reason.
    pub fn can_transition_to(&self, target: SessionState) -> bool {
        use SessionState::*;
        matches!(
            (self, target),
            (Collecting, Analyzing)
                | (Analyzing, Questioning)
                | (Questioning, Synthesizing)
                | (Synthesizing, Completed)
                | (Analyzing, Failed)
                | (Synthesizing, Failed)
                | (Failed, Analyzing)
                | (Failed, Synthesizing)
        )
    }

    /// Whether this state is terminal.
    pub fn is_terminal(&self) -> bool {
        matches!(self, Self::Completed)
    }

    /// The next state on the happy path, if any.
    pub fn next(&self) -> Option<SessionState> {
        use SessionState::*;
        match self {
            Collecting => Some(Analyzing),
            Analyzing => Some(Questioning),
            Questioning => Some(Synthesizing),
            Synthesizing => Some(Completed),
            Completed | Failed => None,
        }
    }
}

impl std::fmt::Display for SessionState {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let s = match self {
            Self::Collecting => "collecting",
            Self::Analyzing => "analyzing",
            Self::Questioning => "questioning",
            Self::Synthesizing => "synthesizing",
            Self::Completed => "completed",
            Self::Failed => "failed",
        };
        write!(f, "{s}")
    }
}

/// Why a session is parked in `Failed`, and where a retry returns it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FailureReason {
    /// The external analysis call failed or timed out.
    AnalysisUnavailable,
    /// Protocol allocation or narrative generation failed.
    SynthesisFailed,
}

impl FailureReason {
    /// The state a retry returns the session to.
    pub fn retry_state(&self) -> SessionState {
        match self {
            Self::AnalysisUnavailable => SessionState::Analyzing,
            Self::SynthesisFailed => SessionState::Synthesizing,
        }
    }
}

impl std::fmt::Display for FailureReason {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let s = match self {
            Self::AnalysisUnavailable => "analysis_unavailable",
            Self::SynthesisFailed => "synthesis_failed",
        };
        write!(f, "{s}")
    }
}
