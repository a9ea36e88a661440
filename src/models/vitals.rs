//! Vitals snapshot model
//!
//! A `VitalsSnapshot` is one point-in-time measurement for one patient, built
//! by the normalizer from a raw record and never mutated afterwards.

use chrono::NaiveDateTime;
use serde::Serialize;
use smallvec::SmallVec;
use std::fmt;

/// Numeric fields of a snapshot
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
pub enum VitalField {
    /// Age in years
    Age,
    /// Heart rate (bpm)
    HeartRate,
    /// Systolic blood pressure (mmHg)
    SystolicBp,
    /// Diastolic blood pressure (mmHg)
    DiastolicBp,
    /// Respiratory rate (breaths per minute)
    RespiratoryRate,
    /// Peripheral oxygen saturation (%)
    Spo2,
    /// Body temperature (°C)
    Temperature,
    /// Glasgow Coma Scale
    Gcs,
}

impl VitalField {
    /// The seven numeric columns every vitals schema must carry
    pub const REQUIRED: [Self; 7] = [
        Self::Age,
        Self::HeartRate,
        Self::SystolicBp,
        Self::DiastolicBp,
        Self::RespiratoryRate,
        Self::Spo2,
        Self::Temperature,
    ];

    /// Canonical column name
    #[must_use]
    pub const fn column_name(self) -> &'static str {
        match self {
            Self::Age => "age",
            Self::HeartRate => "heart_rate_bpm",
            Self::SystolicBp => "systolic_bp_mmHg",
            Self::DiastolicBp => "diastolic_bp_mmHg",
            Self::RespiratoryRate => "respiratory_rate_bpm",
            Self::Spo2 => "spo2_percent",
            Self::Temperature => "temperature_c",
            Self::Gcs => "gcs",
        }
    }
}

impl fmt::Display for VitalField {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.column_name())
    }
}

/// One normalized vitals record
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct VitalsSnapshot {
    /// Patient identifier, stable across the patient's history
    pub patient_id: String,
    /// When the record was taken, if the source carried a timestamp
    pub recorded_at: Option<NaiveDateTime>,
    /// Age in years
    pub age: u32,
    /// Gender as recorded
    pub gender: String,
    pub heart_rate_bpm: f64,
    pub systolic_bp_mmhg: f64,
    pub diastolic_bp_mmhg: f64,
    pub respiratory_rate_bpm: f64,
    pub spo2_percent: f64,
    pub temperature_c: f64,
    /// Free-text consciousness descriptor ("Alert", "Unresponsive", ...)
    pub consciousness: String,
    /// Glasgow Coma Scale as recorded, `0` when absent
    pub gcs: f64,
    /// Chief complaint, already decrypted
    pub chief_complaint: String,
    /// Numeric fields that were absent or unparseable and hold `0`
    pub defaulted: SmallVec<[VitalField; 4]>,
}

impl Default for VitalsSnapshot {
    /// A stable adult with every vital inside its normal band
    fn default() -> Self {
        Self {
            patient_id: String::new(),
            recorded_at: None,
            age: 40,
            gender: String::new(),
            heart_rate_bpm: 80.0,
            systolic_bp_mmhg: 120.0,
            diastolic_bp_mmhg: 80.0,
            respiratory_rate_bpm: 16.0,
            spo2_percent: 98.0,
            temperature_c: 37.0,
            consciousness: "Alert".to_string(),
            gcs: 15.0,
            chief_complaint: String::new(),
            defaulted: SmallVec::new(),
        }
    }
}

impl VitalsSnapshot {
    /// Numeric value of a field
    #[must_use]
    pub fn value(&self, field: VitalField) -> f64 {
        match field {
            VitalField::Age => f64::from(self.age),
            VitalField::HeartRate => self.heart_rate_bpm,
            VitalField::SystolicBp => self.systolic_bp_mmhg,
            VitalField::DiastolicBp => self.diastolic_bp_mmhg,
            VitalField::RespiratoryRate => self.respiratory_rate_bpm,
            VitalField::Spo2 => self.spo2_percent,
            VitalField::Temperature => self.temperature_c,
            VitalField::Gcs => self.gcs,
        }
    }

    /// Whether a field was substituted with its default by the normalizer
    #[must_use]
    pub fn is_defaulted(&self, field: VitalField) -> bool {
        self.defaulted.contains(&field)
    }

    /// Lower-cased chief complaint, the form every keyword match runs against
    #[must_use]
    pub fn complaint_lower(&self) -> String {
        self.chief_complaint.to_lowercase()
    }

    /// Lower-cased consciousness descriptor
    #[must_use]
    pub fn consciousness_lower(&self) -> String {
        self.consciousness.to_lowercase()
    }
}
