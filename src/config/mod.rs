//! Configuration for the clinical inference engine.

use crate::error::{CdsError, Result};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::path::Path;

/// How numeric vitals that the normalizer had to default are treated
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MissingVitalsPolicy {
    /// Defaulted values are real zeros: they take part in every threshold,
    /// and a defaulted GCS counts as `<= 8`
    #[default]
    TreatAsZero,
    /// A check whose inputs were all defaulted produces no finding, and a
    /// defaulted GCS never marks the patient unconscious
    SkipDefaulted,
}

/// Baselines the vital deltas are measured against
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ReferenceVitals {
    pub heart_rate_bpm: f64,
    pub spo2_percent: f64,
    pub temperature_c: f64,
}

impl Default for ReferenceVitals {
    fn default() -> Self {
        Self {
            heart_rate_bpm: 80.0,
            spo2_percent: 97.0,
            temperature_c: 37.0,
        }
    }
}

/// Configuration for the inference engine
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct EngineConfig {
    /// Number of ranked diagnoses to keep
    pub top_n: usize,
    /// Bonus for root-cause rules matched by a root-cause complaint
    pub root_cause_bonus: u32,
    /// Treatment of defaulted numeric vitals
    pub missing_vitals: MissingVitalsPolicy,
    /// Baselines for heart-rate, SpO2 and temperature deltas
    pub reference_vitals: ReferenceVitals,
    /// Assess batches on the rayon thread pool
    pub parallel_batches: bool,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            top_n: 3,
            root_cause_bonus: 50,
            missing_vitals: MissingVitalsPolicy::TreatAsZero,
            reference_vitals: ReferenceVitals::default(),
            parallel_batches: true,
        }
    }
}

impl EngineConfig {
    /// Parse and validate a configuration from JSON; absent keys take defaults
    pub fn from_json_str(json: &str) -> Result<Self> {
        let config: Self = serde_json::from_str(json)?;
        config.validate()?;
        Ok(config)
    }

    /// Read, parse and validate a JSON configuration file
    pub fn from_json_file(path: &Path) -> Result<Self> {
        let contents = std::fs::read_to_string(path)?;
        let config = Self::from_json_str(&contents)?;
        log::info!("Loaded engine configuration from {}", path.display());
        Ok(config)
    }

    /// Check invariants the engine relies on
    pub fn validate(&self) -> Result<()> {
        if self.top_n == 0 {
            return Err(CdsError::Config("top_n must be at least 1".to_string()));
        }
        Ok(())
    }
}

impl fmt::Display for EngineConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "Engine Configuration:")?;
        writeln!(f, "  Top N Diagnoses: {}", self.top_n)?;
        writeln!(f, "  Root-Cause Bonus: {}", self.root_cause_bonus)?;
        writeln!(f, "  Missing Vitals: {:?}", self.missing_vitals)?;
        writeln!(
            f,
            "  Reference Vitals: HR {} / SpO2 {} / Temp {}",
            self.reference_vitals.heart_rate_bpm,
            self.reference_vitals.spo2_percent,
            self.reference_vitals.temperature_c
        )?;
        writeln!(f, "  Parallel Batches: {}", self.parallel_batches)?;
        Ok(())
    }
}
