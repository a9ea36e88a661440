//! Domain models for the clinical inference engine
//!
//! These are the values that flow between the normalizer, the classifiers
//! and the orchestrator. All of them are immutable once built.

pub mod diagnosis;
pub mod finding;
pub mod protocol;
pub mod vitals;

// Re-export commonly used types
pub use diagnosis::{DiagnosisRule, ScoredDiagnosis};
pub use finding::{ConsciousnessState, Finding, Severity, TriageResult, VitalCheck};
pub use protocol::{Protocol, ResolvedProtocol, ResolvedProtocols};
pub use vitals::{VitalField, VitalsSnapshot};
