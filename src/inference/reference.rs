//! Deterministic reference classifiers
//!
//! Stand-ins for the fitted models, usable by hosts without a model server
//! and by tests. Neither needs fitting.

use crate::algorithm::diagnosis::{KnowledgeBase, score_diagnoses};
use crate::config::EngineConfig;
use crate::error::InferenceError;
use crate::inference::classifier::{
    RiskClassifier, RiskFeatures, RiskTier, TreatmentClassifier, TreatmentFeatures,
};
use crate::models::VitalsSnapshot;
use std::sync::Arc;

/// Label predicted when no knowledge-base rule matches
pub const DEFAULT_TREATMENT_LABEL: &str = "Primary Survey";

/// Predicts the treatment label of the best-scoring knowledge-base rule
#[derive(Debug, Clone)]
pub struct KnowledgeBaseTreatmentClassifier {
    knowledge_base: Arc<KnowledgeBase>,
    fallback_label: String,
}

impl Default for KnowledgeBaseTreatmentClassifier {
    fn default() -> Self {
        Self::new(KnowledgeBase::builtin_shared())
    }
}

impl KnowledgeBaseTreatmentClassifier {
    #[must_use]
    pub fn new(knowledge_base: Arc<KnowledgeBase>) -> Self {
        Self {
            knowledge_base,
            fallback_label: DEFAULT_TREATMENT_LABEL.to_string(),
        }
    }

    /// Override the label predicted when nothing matches
    #[must_use]
    pub fn with_fallback_label(mut self, label: impl Into<String>) -> Self {
        self.fallback_label = label.into();
        self
    }
}

impl TreatmentClassifier for KnowledgeBaseTreatmentClassifier {
    fn predict(&self, features: &TreatmentFeatures) -> Result<String, InferenceError> {
        // the feature vector carries no consciousness or GCS; score as alert
        let vitals = &features.vitals;
        let snapshot = VitalsSnapshot {
            heart_rate_bpm: vitals.heart_rate_bpm,
            systolic_bp_mmhg: vitals.systolic_bp_mmhg,
            diastolic_bp_mmhg: vitals.diastolic_bp_mmhg,
            respiratory_rate_bpm: vitals.respiratory_rate_bpm,
            spo2_percent: vitals.spo2_percent,
            temperature_c: vitals.temperature_c,
            chief_complaint: features.chief_complaint.clone(),
            ..VitalsSnapshot::default()
        };
        let config = EngineConfig {
            top_n: 1,
            ..EngineConfig::default()
        };

        let label = score_diagnoses(&snapshot, &self.knowledge_base, &config)
            .into_iter()
            .next()
            .map(|top| top.rule.treatment_label)
            .filter(|label| !label.trim().is_empty())
            .unwrap_or_else(|| self.fallback_label.clone());
        Ok(label)
    }
}

const HIGH_RISK_SPO2: f64 = 90.0;
const HIGH_RISK_HEART_RATE: f64 = 130.0;
const HIGH_RISK_SYSTOLIC_BP: f64 = 90.0;
const ELEVATED_RISK_SPO2: f64 = 94.0;
const ELEVATED_RISK_HEART_RATE: f64 = 110.0;

/// Threshold rule the risk model was trained to reproduce
#[derive(Debug, Clone, Copy, Default)]
pub struct ThresholdRiskClassifier;

impl RiskClassifier for ThresholdRiskClassifier {
    fn predict(&self, features: &RiskFeatures) -> Result<RiskTier, InferenceError> {
        let tier = if features.spo2_percent < HIGH_RISK_SPO2
            || features.heart_rate_bpm > HIGH_RISK_HEART_RATE
            || features.systolic_bp_mmhg < HIGH_RISK_SYSTOLIC_BP
        {
            RiskTier::High
        } else if features.spo2_percent < ELEVATED_RISK_SPO2
            || features.heart_rate_bpm > ELEVATED_RISK_HEART_RATE
        {
            RiskTier::Elevated
        } else {
            RiskTier::Low
        };
        Ok(tier)
    }
}
