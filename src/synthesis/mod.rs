//! Synthesis generation.
//!
//! Combines the intake submission, the preliminary analysis, and the
//! completed questionnaire into the final structured legal synthesis:
//! a protocol number, the identified area and urgency, and a narrative
//! analysis with rights, documents, and next steps.

pub mod generator;
pub mod model;
pub mod narrative;
pub mod protocol;

pub use generator::SynthesisGenerator;
pub use model::SynthesisRecord;
pub use protocol::ProtocolAllocator;
