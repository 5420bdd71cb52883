//! HTTP implementation of the analysis client.
//!
//! Posts `{"case_description": ...}` to the configured endpoint and
//! expects `{"legal_area": ..., "urgency": ..., "summary": ...}` back.
//! The whole round trip runs under a bounded wait; exceeding it surfaces
//! `AnalysisError::Timeout` rather than blocking the session.

use std::time::Duration;

use async_trait::async_trait;
use secrecy::{ExposeSecret, SecretString};
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::config::TriageConfig;
use crate::error::AnalysisError;
use crate::intake::IntakeSubmission;

use super::client::AnalysisClient;
use super::model::PreliminaryAnalysis;

/// Request body sent to the analysis service.
#[derive(Debug, Serialize)]
struct AnalysisRequest<'a> {
    case_description: &'a str,
}

/// Response body expected from the analysis service.
#[derive(Debug, Deserialize)]
struct AnalysisResponse {
    #[serde(default)]
    legal_area: String,
    #[serde(default)]
    urgency: String,
    #[serde(default)]
    summary: String,
}

/// Parse and validate a raw analysis service response body.
fn parse_analysis_response(raw: &str) -> Result<PreliminaryAnalysis, AnalysisError> {
    let response: AnalysisResponse =
        serde_json::from_str(raw).map_err(|e| AnalysisError::InvalidResponse {
            reason: format!("JSON parse error: {e}"),
        })?;
    PreliminaryAnalysis::from_parts(&response.legal_area, &response.urgency, &response.summary)
}

/// `reqwest`-backed analysis client.
pub struct HttpAnalysisClient {
    http: reqwest::Client,
    endpoint: String,
    api_key: SecretString,
    timeout: Duration,
    max_chars: usize,
}

impl HttpAnalysisClient {
    pub fn new(
        endpoint: impl Into<String>,
        api_key: SecretString,
        config: &TriageConfig,
    ) -> Self {
        Self {
            http: reqwest::Client::new(),
            endpoint: endpoint.into(),
            api_key,
            timeout: config.analysis_timeout,
            max_chars: config.analysis_max_chars,
        }
    }

    async fn request(&self, description: &str) -> Result<PreliminaryAnalysis, AnalysisError> {
        let request = AnalysisRequest {
            case_description: description,
        };

        let response = self
            .http
            .post(&self.endpoint)
            .bearer_auth(self.api_key.expose_secret())
            .json(&request)
            .send()
            .await
            .map_err(|e| AnalysisError::Unavailable {
                reason: format!("request failed: {e}"),
            })?;

        let status = response.status();
        if !status.is_success() {
            return Err(AnalysisError::Unavailable {
                reason: format!("service returned HTTP {status}"),
            });
        }

        let body = response
            .text()
            .await
            .map_err(|e| AnalysisError::Unavailable {
                reason: format!("failed to read response body: {e}"),
            })?;

        parse_analysis_response(&body)
    }
}

#[async_trait]
impl AnalysisClient for HttpAnalysisClient {
    async fn analyze(
        &self,
        submission: &IntakeSubmission,
    ) -> Result<PreliminaryAnalysis, AnalysisError> {
        // Truncated for transport; the session keeps the full description.
        let description: String = submission
            .case_description
            .chars()
            .take(self.max_chars)
            .collect();

        debug!(
            endpoint = %self.endpoint,
            chars = description.len(),
            "Sending case description for analysis"
        );

        match tokio::time::timeout(self.timeout, self.request(&description)).await {
            Ok(result) => result,
            Err(_) => Err(AnalysisError::Timeout {
                waited: self.timeout,
            }),
        }
    }
}
