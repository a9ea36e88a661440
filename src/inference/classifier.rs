//! Contracts for the external treatment and risk classifiers
//!
//! The engine treats both models as black boxes behind these traits. Each
//! model declares the ordered feature names it was fitted on; the engine
//! compares them with the layout it supplies before calling `predict`.

use crate::error::InferenceError;
use crate::models::VitalsSnapshot;
use serde::Serialize;
use std::fmt;

/// Feature layout supplied to the treatment classifier, in order
pub const TREATMENT_FEATURES: [&str; 8] = [
    "age",
    "heart_rate_bpm",
    "systolic_bp_mmHg",
    "diastolic_bp_mmHg",
    "respiratory_rate_bpm",
    "spo2_percent",
    "temperature_c",
    "chief_complaint",
];

/// Feature layout supplied to the risk classifier: the numeric treatment features
pub const RISK_FEATURES: [&str; 7] = [
    "age",
    "heart_rate_bpm",
    "systolic_bp_mmHg",
    "diastolic_bp_mmHg",
    "respiratory_rate_bpm",
    "spo2_percent",
    "temperature_c",
];

/// Numeric part of the feature vector, shared by both classifiers
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct RiskFeatures {
    pub age: f64,
    pub heart_rate_bpm: f64,
    pub systolic_bp_mmhg: f64,
    pub diastolic_bp_mmhg: f64,
    pub respiratory_rate_bpm: f64,
    pub spo2_percent: f64,
    pub temperature_c: f64,
}

impl RiskFeatures {
    /// Defaults are already applied by the normalizer
    #[must_use]
    pub fn from_snapshot(snapshot: &VitalsSnapshot) -> Self {
        Self {
            age: f64::from(snapshot.age),
            heart_rate_bpm: snapshot.heart_rate_bpm,
            systolic_bp_mmhg: snapshot.systolic_bp_mmhg,
            diastolic_bp_mmhg: snapshot.diastolic_bp_mmhg,
            respiratory_rate_bpm: snapshot.respiratory_rate_bpm,
            spo2_percent: snapshot.spo2_percent,
            temperature_c: snapshot.temperature_c,
        }
    }

    /// Values in [`RISK_FEATURES`] order
    #[must_use]
    pub const fn to_array(&self) -> [f64; 7] {
        [
            self.age,
            self.heart_rate_bpm,
            self.systolic_bp_mmhg,
            self.diastolic_bp_mmhg,
            self.respiratory_rate_bpm,
            self.spo2_percent,
            self.temperature_c,
        ]
    }
}

/// Full feature vector for the treatment classifier
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TreatmentFeatures {
    pub vitals: RiskFeatures,
    /// Decrypted chief complaint
    pub chief_complaint: String,
}

impl TreatmentFeatures {
    #[must_use]
    pub fn from_snapshot(snapshot: &VitalsSnapshot) -> Self {
        Self {
            vitals: RiskFeatures::from_snapshot(snapshot),
            chief_complaint: snapshot.chief_complaint.clone(),
        }
    }
}

/// Coarse ordinal risk from the risk classifier; advisory only
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
pub enum RiskTier {
    Low = 0,
    Elevated = 1,
    High = 2,
}

impl RiskTier {
    /// Convert a numeric class (0-2) to `RiskTier`
    #[must_use]
    pub const fn from_u8(level: u8) -> Option<Self> {
        match level {
            0 => Some(Self::Low),
            1 => Some(Self::Elevated),
            2 => Some(Self::High),
            _ => None,
        }
    }

    #[must_use]
    pub const fn as_u8(self) -> u8 {
        self as u8
    }

    #[must_use]
    pub const fn description(self) -> &'static str {
        match self {
            Self::Low => "Low",
            Self::Elevated => "Elevated",
            Self::High => "High",
        }
    }
}

impl fmt::Display for RiskTier {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.description())
    }
}

/// A fitted model mapping the full feature vector to a treatment label
pub trait TreatmentClassifier: Send + Sync {
    /// Ordered feature names the model was fitted on
    fn feature_names(&self) -> Vec<String> {
        TREATMENT_FEATURES.iter().map(|name| (*name).to_string()).collect()
    }

    fn predict(&self, features: &TreatmentFeatures) -> Result<String, InferenceError>;
}

/// A fitted model mapping the numeric features to a risk tier
pub trait RiskClassifier: Send + Sync {
    /// Ordered feature names the model was fitted on
    fn feature_names(&self) -> Vec<String> {
        RISK_FEATURES.iter().map(|name| (*name).to_string()).collect()
    }

    fn predict(&self, features: &RiskFeatures) -> Result<RiskTier, InferenceError>;
}

/// Reject a model fitted on a different feature layout
pub fn check_feature_schema(expected: &[String], supplied: &[&str]) -> Result<(), InferenceError> {
    if expected.iter().map(String::as_str).eq(supplied.iter().copied()) {
        Ok(())
    } else {
        Err(InferenceError::FeatureMismatch {
            expected: expected.to_vec(),
            supplied: supplied.iter().map(|name| (*name).to_string()).collect(),
        })
    }
}
