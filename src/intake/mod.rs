//! Intake form collection and validation.
//!
//! The intake form is the entry point of the triage flow. Raw user input
//! is validated here; only validated submissions ever reach a session.

pub mod form;

pub use form::{IntakeForm, IntakeSubmission};
