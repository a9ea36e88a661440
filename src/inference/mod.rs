//! Inference orchestrator
//!
//! Composes triage, diagnosis scoring, the two external classifiers and the
//! protocol resolver into one per-patient assessment. A classifier failure
//! is kept in the assessment as an `InferenceError` next to the results that
//! do not depend on it.

pub mod batch;
pub mod classifier;
pub mod reference;

use crate::algorithm::diagnosis::{KnowledgeBase, score_diagnoses};
use crate::algorithm::protocol::{ProtocolLibrary, resolve_protocols};
use crate::algorithm::triage::classify;
use crate::config::{EngineConfig, ReferenceVitals};
use crate::error::InferenceError;
use crate::models::{ResolvedProtocols, ScoredDiagnosis, Severity, TriageResult, VitalsSnapshot};
use chrono::NaiveDateTime;
use classifier::{
    RISK_FEATURES, RiskClassifier, RiskFeatures, RiskTier, TREATMENT_FEATURES,
    TreatmentClassifier, TreatmentFeatures, check_feature_schema,
};
use log::warn;
use reference::{KnowledgeBaseTreatmentClassifier, ThresholdRiskClassifier};
use serde::Serialize;
use std::sync::Arc;

pub use batch::{assess_batch, rank_by_priority};

/// Difference between the current vitals and the reference baselines
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct VitalDeltas {
    pub heart_rate_bpm: f64,
    pub spo2_percent: f64,
    pub temperature_c: f64,
}

impl VitalDeltas {
    #[must_use]
    pub fn from_snapshot(snapshot: &VitalsSnapshot, reference: &ReferenceVitals) -> Self {
        Self {
            heart_rate_bpm: snapshot.heart_rate_bpm - reference.heart_rate_bpm,
            spo2_percent: snapshot.spo2_percent - reference.spo2_percent,
            temperature_c: snapshot.temperature_c - reference.temperature_c,
        }
    }
}

/// Everything the engine concluded about one snapshot
#[derive(Debug, Clone)]
pub struct ClinicalAssessment {
    pub patient_id: String,
    pub recorded_at: Option<NaiveDateTime>,
    /// Deterministic triage; the displayed severity
    pub triage: TriageResult,
    /// Ranked differential diagnoses
    pub diagnoses: Vec<ScoredDiagnosis>,
    /// Predicted treatment label, or why there is none
    pub treatment: Result<String, InferenceError>,
    /// Advisory risk tier from the risk classifier
    pub risk: Result<RiskTier, InferenceError>,
    pub protocols: ResolvedProtocols,
    pub deltas: VitalDeltas,
}

impl ClinicalAssessment {
    /// Live-feed priority, 0 (Normal) to 2 (Critical)
    #[must_use]
    pub const fn priority(&self) -> u8 {
        self.triage.priority()
    }

    #[must_use]
    pub const fn severity(&self) -> Severity {
        self.triage.severity
    }

    /// The predicted treatment label, if the classifier produced one
    #[must_use]
    pub fn treatment_label(&self) -> Option<&str> {
        self.treatment.as_deref().ok()
    }
}

/// Stateless orchestrator over shared read-only tables and two classifiers
pub struct InferenceEngine {
    config: EngineConfig,
    knowledge_base: Arc<KnowledgeBase>,
    protocols: Arc<ProtocolLibrary>,
    treatment: Box<dyn TreatmentClassifier>,
    risk: Box<dyn RiskClassifier>,
}

impl std::fmt::Debug for InferenceEngine {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("InferenceEngine")
            .field("config", &self.config)
            .field("rules", &self.knowledge_base.len())
            .field("protocols", &self.protocols.len())
            .finish_non_exhaustive()
    }
}

impl InferenceEngine {
    /// Engine over the built-in tables with the given classifiers
    pub fn new(
        config: EngineConfig,
        treatment: impl TreatmentClassifier + 'static,
        risk: impl RiskClassifier + 'static,
    ) -> Self {
        Self {
            config,
            knowledge_base: KnowledgeBase::builtin_shared(),
            protocols: ProtocolLibrary::builtin_shared(),
            treatment: Box::new(treatment),
            risk: Box::new(risk),
        }
    }

    /// Engine using the deterministic reference classifiers
    #[must_use]
    pub fn with_reference_classifiers(config: EngineConfig) -> Self {
        Self::new(
            config,
            KnowledgeBaseTreatmentClassifier::default(),
            ThresholdRiskClassifier,
        )
    }

    /// Score against a custom knowledge base
    #[must_use]
    pub fn with_knowledge_base(mut self, knowledge_base: Arc<KnowledgeBase>) -> Self {
        self.knowledge_base = knowledge_base;
        self
    }

    /// Resolve against a custom protocol library
    #[must_use]
    pub fn with_protocol_library(mut self, protocols: Arc<ProtocolLibrary>) -> Self {
        self.protocols = protocols;
        self
    }

    #[must_use]
    pub const fn config(&self) -> &EngineConfig {
        &self.config
    }

    #[must_use]
    pub fn knowledge_base(&self) -> &KnowledgeBase {
        &self.knowledge_base
    }

    /// Assess one snapshot; never fails as a whole
    #[must_use]
    pub fn assess(&self, snapshot: &VitalsSnapshot) -> ClinicalAssessment {
        let triage = classify(snapshot, self.config.missing_vitals);
        let diagnoses = score_diagnoses(snapshot, &self.knowledge_base, &self.config);

        let treatment = self.predict_treatment(snapshot);
        if let Err(err) = &treatment {
            warn!(
                "Treatment prediction failed for patient '{}': {err}",
                snapshot.patient_id
            );
        }
        let risk = self.predict_risk(snapshot);
        if let Err(err) = &risk {
            warn!(
                "Risk prediction failed for patient '{}': {err}",
                snapshot.patient_id
            );
        }

        let protocols = resolve_protocols(
            &snapshot.chief_complaint,
            treatment.as_deref().ok(),
            &self.protocols,
        );

        ClinicalAssessment {
            patient_id: snapshot.patient_id.clone(),
            recorded_at: snapshot.recorded_at,
            triage,
            diagnoses,
            treatment,
            risk,
            protocols,
            deltas: VitalDeltas::from_snapshot(snapshot, &self.config.reference_vitals),
        }
    }

    fn predict_treatment(&self, snapshot: &VitalsSnapshot) -> Result<String, InferenceError> {
        check_feature_schema(&self.treatment.feature_names(), &TREATMENT_FEATURES)?;
        let label = self
            .treatment
            .predict(&TreatmentFeatures::from_snapshot(snapshot))?;
        if label.trim().is_empty() {
            return Err(InferenceError::InvalidPrediction(
                "empty treatment label".to_string(),
            ));
        }
        Ok(label)
    }

    fn predict_risk(&self, snapshot: &VitalsSnapshot) -> Result<RiskTier, InferenceError> {
        check_feature_schema(&self.risk.feature_names(), &RISK_FEATURES)?;
        self.risk.predict(&RiskFeatures::from_snapshot(snapshot))
    }
}
