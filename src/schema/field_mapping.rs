//! Column-name aliases
//!
//! Source tables spell the vitals columns in several ways. Headers are trimmed
//! and lower-cased before lookup, so the keys here are lower-case.

use crate::models::VitalField;
use rustc_hash::FxHashMap;
use std::sync::LazyLock;

/// A column the normalizer knows how to read
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Column {
    PatientId,
    Gender,
    Consciousness,
    ChiefComplaint,
    Timestamp,
    Vital(VitalField),
}

impl Column {
    /// Every known column
    pub const ALL: [Self; 13] = [
        Self::PatientId,
        Self::Gender,
        Self::Consciousness,
        Self::ChiefComplaint,
        Self::Timestamp,
        Self::Vital(VitalField::Age),
        Self::Vital(VitalField::HeartRate),
        Self::Vital(VitalField::SystolicBp),
        Self::Vital(VitalField::DiastolicBp),
        Self::Vital(VitalField::RespiratoryRate),
        Self::Vital(VitalField::Spo2),
        Self::Vital(VitalField::Temperature),
        Self::Vital(VitalField::Gcs),
    ];

    /// Canonical column name
    #[must_use]
    pub const fn canonical_name(self) -> &'static str {
        match self {
            Self::PatientId => "p_id",
            Self::Gender => "gender",
            Self::Consciousness => "consciousness",
            Self::ChiefComplaint => "chief_complaint",
            Self::Timestamp => "timestamp",
            Self::Vital(field) => field.column_name(),
        }
    }
}

/// Alternative spellings, lower-case, mapped to their column
static ALIASES: LazyLock<FxHashMap<&'static str, Column>> = LazyLock::new(|| {
    let mut aliases = FxHashMap::default();
    aliases.insert("heart_rate", Column::Vital(VitalField::HeartRate));
    aliases.insert("spo2", Column::Vital(VitalField::Spo2));
    aliases.insert("systolic_bp_reading", Column::Vital(VitalField::SystolicBp));
    aliases.insert("diastolic_bp_reading", Column::Vital(VitalField::DiastolicBp));
    aliases.insert("respiratory_rate", Column::Vital(VitalField::RespiratoryRate));
    aliases.insert("temp", Column::Vital(VitalField::Temperature));
    aliases.insert("patient_id", Column::PatientId);
    aliases.insert("pid", Column::PatientId);
    aliases.insert("id", Column::PatientId);
    aliases.insert("recorded_at", Column::Timestamp);
    for column in Column::ALL {
        aliases.insert(canonical_lower(column), column);
    }
    aliases
});

// canonical names are ASCII; only the BP columns carry upper case
const fn canonical_lower(column: Column) -> &'static str {
    match column {
        Column::Vital(VitalField::SystolicBp) => "systolic_bp_mmhg",
        Column::Vital(VitalField::DiastolicBp) => "diastolic_bp_mmhg",
        other => other.canonical_name(),
    }
}

/// Resolve a raw header to a known column
#[must_use]
pub fn lookup_column(header: &str) -> Option<Column> {
    let key = header.trim().to_lowercase();
    ALIASES.get(key.as_str()).copied()
}
