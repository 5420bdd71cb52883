//! AI analysis boundary.
//!
//! The analysis service is an external collaborator: it receives a case
//! description and returns a preliminary classification (legal area,
//! urgency, summary). Only the request/response contract is owned here;
//! transport lives behind the [`AnalysisClient`] trait, with an HTTP
//! implementation in [`http`].

pub mod client;
pub mod http;
pub mod model;

pub use client::AnalysisClient;
pub use http::HttpAnalysisClient;
pub use model::{PreliminaryAnalysis, Urgency};
