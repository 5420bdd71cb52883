//! Intake form and validated submission types.

use std::sync::OnceLock;

use regex::Regex;
use serde::{Deserialize, Serialize};

use crate::error::ValidationError;

/// Pragmatic email syntax check: local part, one `@`, dotted domain.
fn email_regex() -> &'static Regex {
    static EMAIL: OnceLock<Regex> = OnceLock::new();
    EMAIL.get_or_init(|| {
        Regex::new(r"^[A-Za-z0-9._%+\-]+@[A-Za-z0-9.\-]+\.[A-Za-z]{2,}$").unwrap()
    })
}

/// Raw intake form input, as typed by the client. Unvalidated.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct IntakeForm {
    pub name: String,
    pub email: String,
    pub description: String,
}

impl IntakeForm {
    pub fn new(
        name: impl Into<String>,
        email: impl Into<String>,
        description: impl Into<String>,
    ) -> Self {
        Self {
            name: name.into(),
            email: email.into(),
            description: description.into(),
        }
    }

    /// Validate the form and produce an immutable submission.
    ///
    /// Fields are checked in declaration order; the first failure wins.
    /// Inputs are trimmed before validation and storage.
    pub fn submit(self) -> Result<IntakeSubmission, ValidationError> {
        let name = self.name.trim();
        if name.is_empty() {
            return Err(ValidationError::new("name", "required"));
        }

        let email = self.email.trim();
        if email.is_empty() {
            return Err(ValidationError::new("email", "required"));
        }
        if !email_regex().is_match(email) {
            return Err(ValidationError::new("email", "malformed"));
        }

        let description = self.description.trim();
        if description.is_empty() {
            return Err(ValidationError::new("description", "required"));
        }

        Ok(IntakeSubmission {
            client_name: name.to_string(),
            client_email: email.to_lowercase(),
            case_description: description.to_string(),
        })
    }
}

/// A validated intake submission. Immutable once created; consumed
/// exactly once by the analysis client.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct IntakeSubmission {
    pub client_name: String,
    pub client_email: String,
    pub case_description: String,
}
