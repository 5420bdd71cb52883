//! Preliminary analysis data model.

use serde::{Deserialize, Serialize};

use crate::error::AnalysisError;

/// Urgency classification assigned by the analysis service.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Urgency {
    Low,
    Medium,
    High,
}

impl Default for Urgency {
    fn default() -> Self {
        Self::Medium
    }
}

impl std::fmt::Display for Urgency {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let s = match self {
            Self::Low => "low",
            Self::Medium => "medium",
            Self::High => "high",
        };
        write!(f, "{s}")
    }
}

impl std::str::FromStr for Urgency {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "low" => Ok(Self::Low),
            "medium" => Ok(Self::Medium),
            "high" => Ok(Self::High),
            other => Err(format!("unknown urgency: '{other}'")),
        }
    }
}

/// AI-produced classification of a case. Produced only from a completed
/// intake submission; never mutated after creation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PreliminaryAnalysis {
    /// Classification label, e.g. "Civil Law".
    pub legal_area: String,
    pub urgency: Urgency,
    /// One-paragraph synthesis of the case.
    pub summary: String,
}

impl PreliminaryAnalysis {
    /// Build an analysis from raw boundary fields, validating the parts
    /// the rest of the flow depends on.
    ///
    /// An unrecognized urgency string degrades to `Medium` rather than
    /// failing the whole analysis; empty `legal_area`/`summary` are
    /// rejected.
    pub fn from_parts(
        legal_area: &str,
        urgency: &str,
        summary: &str,
    ) -> Result<Self, AnalysisError> {
        let legal_area = legal_area.trim();
        if legal_area.is_empty() {
            return Err(AnalysisError::InvalidResponse {
                reason: "missing legal_area".into(),
            });
        }

        let summary = summary.trim();
        if summary.is_empty() {
            return Err(AnalysisError::InvalidResponse {
                reason: "missing summary".into(),
            });
        }

        let urgency = urgency.parse().unwrap_or_else(|e| {
            tracing::warn!(error = %e, "Unrecognized urgency, defaulting to medium");
            Urgency::default()
        });

        Ok(Self {
            legal_area: legal_area.to_string(),
            urgency,
            summary: summary.to_string(),
        })
    }
}
