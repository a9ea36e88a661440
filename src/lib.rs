//! Clinical inference engine for ambulance telemetry.
//!
//! Normalizes raw vital-sign records, classifies them into triage tiers,
//! ranks differential diagnoses from a static knowledge base and resolves
//! the care protocols to show. Every assessment is a pure function of one
//! snapshot plus read-only tables.

pub mod algorithm;
pub mod config;
pub mod crypto;
pub mod error;
pub mod inference;
pub mod models;
pub mod normalize;
pub mod schema;
pub mod utils;

// Re-export the most common types for easier use
// Core types
pub use config::{EngineConfig, MissingVitalsPolicy, ReferenceVitals};
pub use error::{CdsError, InferenceError, Result};
pub use models::{
    ConsciousnessState, DiagnosisRule, Finding, Protocol, ResolvedProtocol, ResolvedProtocols,
    ScoredDiagnosis, Severity, TriageResult, VitalCheck, VitalField, VitalsSnapshot,
};

// Components
pub use algorithm::diagnosis::{KnowledgeBase, score_diagnoses};
pub use algorithm::protocol::{ProtocolLibrary, resolve_protocols};
pub use algorithm::triage::classify;
pub use normalize::{Normalizer, RawRecord, normalize_record, normalize_records};
pub use schema::ColumnMapping;

// Orchestration
pub use inference::classifier::{
    RiskClassifier, RiskFeatures, RiskTier, TreatmentClassifier, TreatmentFeatures,
};
pub use inference::reference::{KnowledgeBaseTreatmentClassifier, ThresholdRiskClassifier};
pub use inference::{ClinicalAssessment, InferenceEngine, VitalDeltas, assess_batch, rank_by_priority};

// Encryption box
pub use crypto::{AesGcmCipher, ComplaintCipher};

// Arrow types
pub use arrow::record_batch::RecordBatch;
