//! Handoff of completed syntheses to the case-assignment collaborator.
//!
//! The dispatcher publishes a synthesis record downstream exactly once
//! per protocol number: repeat calls return the original receipt
//! without re-publishing.

use std::collections::HashMap;
use std::sync::Arc;

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use tokio::sync::RwLock;
use tracing::{debug, info};
use uuid::Uuid;

use crate::error::HandoffError;
use crate::session::{SessionState, TriageSession};
use crate::synthesis::SynthesisRecord;

/// External case-assignment collaborator.
///
/// Receives a completed synthesis plus session/client identifiers and
/// returns an acknowledgment token.
#[async_trait]
pub trait CaseAssignment: Send + Sync {
    async fn assign(
        &self,
        record: &SynthesisRecord,
        session_id: Uuid,
        client_email: &str,
    ) -> Result<String, HandoffError>;
}

/// Receipt returned to the UI layer after a successful handoff.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct HandoffReceipt {
    pub protocol_number: String,
    /// Acknowledgment token from the case-assignment collaborator.
    pub receipt_token: String,
    pub dispatched_at: DateTime<Utc>,
}

/// Publishes synthesis records downstream, deduplicating by protocol
/// number.
pub struct HandoffDispatcher {
    assignment: Arc<dyn CaseAssignment>,
    /// Receipts issued so far, keyed by protocol number. The write lock
    /// is held across the assign call so a duplicate protocol number can
    /// never produce two downstream assignments.
    receipts: RwLock<HashMap<String, HandoffReceipt>>,
}

impl HandoffDispatcher {
    pub fn new(assignment: Arc<dyn CaseAssignment>) -> Self {
        Self {
            assignment,
            receipts: RwLock::new(HashMap::new()),
        }
    }

    /// Hand a completed session's synthesis to case assignment.
    ///
    /// Precondition: the session is `Completed` and carries a synthesis
    /// record. Idempotent per protocol number.
    pub async fn handoff(
        &self,
        session: &TriageSession,
    ) -> Result<HandoffReceipt, HandoffError> {
        let record = match (&session.state, &session.synthesis) {
            (SessionState::Completed, Some(record)) => record,
            _ => return Err(HandoffError::NotCompleted),
        };

        let mut receipts = self.receipts.write().await;
        if let Some(existing) = receipts.get(&record.protocol_number) {
            debug!(
                protocol = %record.protocol_number,
                "Duplicate handoff; returning original receipt"
            );
            return Ok(existing.clone());
        }

        let token = self
            .assignment
            .assign(record, session.id, &session.submission.client_email)
            .await?;

        let receipt = HandoffReceipt {
            protocol_number: record.protocol_number.clone(),
            receipt_token: token,
            dispatched_at: Utc::now(),
        };
        receipts.insert(record.protocol_number.clone(), receipt.clone());

        info!(
            session_id = %session.id,
            protocol = %receipt.protocol_number,
            "Synthesis handed off for case assignment"
        );
        Ok(receipt)
    }
}
