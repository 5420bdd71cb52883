//! Synthesis generator: turns a ready session into a synthesis record.

use std::sync::Arc;

use chrono::Utc;
use tracing::info;

use crate::error::SynthesisError;
use crate::session::TriageSession;

use super::model::SynthesisRecord;
use super::narrative::{self, DISCLAIMER};
use super::protocol::ProtocolAllocator;

/// Builds synthesis records for completed questionnaires.
///
/// Generation is deterministic apart from the allocated protocol number
/// and timestamp; it never mutates the session. State transitions are
/// owned by the flow layer.
pub struct SynthesisGenerator {
    allocator: Arc<ProtocolAllocator>,
}

impl SynthesisGenerator {
    pub fn new(allocator: Arc<ProtocolAllocator>) -> Self {
        Self { allocator }
    }

    /// Produce the synthesis record for a session.
    ///
    /// Preconditions: analysis present, questionnaire generated and
    /// complete, session at the synthesis stage. Violations return
    /// `SynthesisError::NotReady` without any side effect.
    pub fn synthesize(
        &self,
        session: &TriageSession,
    ) -> Result<SynthesisRecord, SynthesisError> {
        if !session.is_ready_for_synthesis() {
            return Err(SynthesisError::NotReady {
                reason: format!(
                    "session {} in state {} with incomplete questionnaire or missing analysis",
                    session.id, session.state
                ),
            });
        }

        // is_ready_for_synthesis guarantees both are present.
        let analysis = session.analysis.as_ref().ok_or_else(|| {
            SynthesisError::Generation("analysis missing on ready session".into())
        })?;
        let questionnaire = session.questionnaire.as_ref().ok_or_else(|| {
            SynthesisError::Generation("questionnaire missing on ready session".into())
        })?;

        let protocol_number = self.allocator.allocate();
        let full_analysis_text =
            narrative::build_full_analysis(&session.submission, analysis, questionnaire);

        info!(
            session_id = %session.id,
            protocol = %protocol_number,
            legal_area = %analysis.legal_area,
            "Synthesis record generated"
        );

        Ok(SynthesisRecord {
            protocol_number,
            generated_at: Utc::now(),
            legal_area: analysis.legal_area.clone(),
            urgency: analysis.urgency,
            summary: analysis.summary.clone(),
            full_analysis_text,
            disclaimer: DISCLAIMER.to_string(),
        })
    }
}
