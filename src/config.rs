//! Configuration types.

use std::time::Duration;

/// Triage core configuration.
#[derive(Debug, Clone)]
pub struct TriageConfig {
    /// Bounded wait for the external analysis call. Exceeding it surfaces
    /// `AnalysisError::Timeout` rather than blocking indefinitely.
    pub analysis_timeout: Duration,
    /// Case descriptions are truncated to this many characters before being
    /// sent to the analysis service.
    pub analysis_max_chars: usize,
    /// Prefix for generated protocol numbers (`{prefix}-{year}-{seq}`).
    pub protocol_prefix: String,
}

impl Default for TriageConfig {
    fn default() -> Self {
        Self {
            analysis_timeout: Duration::from_secs(30),
            analysis_max_chars: 4_000,
            protocol_prefix: "LITGO".to_string(),
        }
    }
}
