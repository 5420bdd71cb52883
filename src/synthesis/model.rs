//! Synthesis record data model.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::analysis::Urgency;

/// The final structured output of the triage flow.
///
/// Created once, when the answer set is complete and synthesis is
/// requested; immutable afterward; handed off to the external
/// case-assignment collaborator.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SynthesisRecord {
    /// Unique per session, human-readable, e.g. `LITGO-2025-0001`.
    pub protocol_number: String,
    pub generated_at: DateTime<Utc>,
    pub legal_area: String,
    pub urgency: Urgency,
    pub summary: String,
    /// Structured narrative: facts, identified rights, required
    /// documents, next steps.
    pub full_analysis_text: String,
    /// Fixed legal disclaimer text.
    pub disclaimer: String,
}
