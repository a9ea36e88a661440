//! Vitals normalizer
//!
//! Turns a raw record (field name to raw value, keys possibly missing, values
//! possibly non-numeric) into a `VitalsSnapshot`. Schema problems are fatal and
//! raised once per source through [`ColumnMapping`]; a bad value in a single
//! cell only degrades that cell to its default (`0` for numbers, empty string
//! for text) and is recorded in `VitalsSnapshot::defaulted`.

pub mod arrow_ingest;

use crate::error::Result;
use crate::models::{VitalField, VitalsSnapshot};
use crate::schema::{Column, ColumnMapping};
use chrono::{DateTime, NaiveDate, NaiveDateTime};
use log::debug;
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use smallvec::SmallVec;

const TIMESTAMP_FORMATS: [&str; 3] = ["%Y-%m-%d %H:%M:%S", "%Y-%m-%dT%H:%M:%S", "%d/%m/%Y %H:%M"];

/// One raw input row
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct RawRecord {
    fields: Map<String, Value>,
}

impl RawRecord {
    /// Create an empty record
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Builder-style insert
    #[must_use]
    pub fn with(mut self, key: impl Into<String>, value: impl Into<Value>) -> Self {
        self.insert(key, value);
        self
    }

    /// Insert or replace a field
    pub fn insert(&mut self, key: impl Into<String>, value: impl Into<Value>) {
        self.fields.insert(key.into(), value.into());
    }

    /// Raw value of a field
    #[must_use]
    pub fn get(&self, key: &str) -> Option<&Value> {
        self.fields.get(key)
    }

    /// Field names present in this record
    pub fn headers(&self) -> impl Iterator<Item = &str> {
        self.fields.keys().map(String::as_str)
    }

    /// Parse a single JSON object
    pub fn from_json_str(json: &str) -> Result<Self> {
        Ok(serde_json::from_str(json)?)
    }

    /// Parse a JSON array of objects
    pub fn many_from_json_str(json: &str) -> Result<Vec<Self>> {
        Ok(serde_json::from_str(json)?)
    }
}

impl<K: Into<String>, V: Into<Value>> FromIterator<(K, V)> for RawRecord {
    fn from_iter<T: IntoIterator<Item = (K, V)>>(iter: T) -> Self {
        let mut record = Self::new();
        for (key, value) in iter {
            record.insert(key, value);
        }
        record
    }
}

/// Normalizes records that share one resolved schema
#[derive(Debug, Clone)]
pub struct Normalizer {
    mapping: ColumnMapping,
}

impl Normalizer {
    /// Use an already-resolved column mapping
    #[must_use]
    pub const fn new(mapping: ColumnMapping) -> Self {
        Self { mapping }
    }

    /// Resolve the schema from header names, failing if required vitals are absent
    pub fn for_headers<'a, I>(headers: I) -> Result<Self>
    where
        I: IntoIterator<Item = &'a str>,
    {
        Ok(Self::new(ColumnMapping::resolve(headers)?))
    }

    /// The column mapping in use
    #[must_use]
    pub const fn mapping(&self) -> &ColumnMapping {
        &self.mapping
    }

    /// Normalize one record; never fails
    #[must_use]
    pub fn normalize(&self, record: &RawRecord) -> VitalsSnapshot {
        let mut defaulted: SmallVec<[VitalField; 4]> = SmallVec::new();

        let mut number = |field: VitalField| -> f64 {
            match coerce_number(self.cell(record, Column::Vital(field))) {
                Some(value) => value,
                None => {
                    defaulted.push(field);
                    0.0
                }
            }
        };

        let heart_rate_bpm = number(VitalField::HeartRate);
        let systolic_bp_mmhg = number(VitalField::SystolicBp);
        let diastolic_bp_mmhg = number(VitalField::DiastolicBp);
        let respiratory_rate_bpm = number(VitalField::RespiratoryRate);
        let spo2_percent = number(VitalField::Spo2);
        let temperature_c = number(VitalField::Temperature);
        // kept as recorded so the <= 8 cut-off sees the raw score
        let gcs = number(VitalField::Gcs);

        let age = coerce_age(self.cell(record, Column::Vital(VitalField::Age)));
        if age.is_none() {
            defaulted.push(VitalField::Age);
        }

        let snapshot = VitalsSnapshot {
            patient_id: coerce_text(self.cell(record, Column::PatientId)),
            recorded_at: coerce_timestamp(self.cell(record, Column::Timestamp)),
            age: age.unwrap_or(0),
            gender: coerce_text(self.cell(record, Column::Gender)),
            heart_rate_bpm,
            systolic_bp_mmhg,
            diastolic_bp_mmhg,
            respiratory_rate_bpm,
            spo2_percent,
            temperature_c,
            consciousness: coerce_text(self.cell(record, Column::Consciousness)),
            gcs,
            chief_complaint: coerce_text(self.cell(record, Column::ChiefComplaint)),
            defaulted,
        };

        if !snapshot.defaulted.is_empty() {
            debug!(
                "Patient '{}': defaulted {:?} to 0",
                snapshot.patient_id, snapshot.defaulted
            );
        }
        snapshot
    }

    fn cell<'r>(&self, record: &'r RawRecord, column: Column) -> Option<&'r Value> {
        self.mapping
            .source_name(column)
            .and_then(|name| record.get(name))
    }
}

/// Normalize a single record, resolving the schema from its own keys
pub fn normalize_record(record: &RawRecord) -> Result<VitalsSnapshot> {
    let normalizer = Normalizer::for_headers(record.headers())?;
    Ok(normalizer.normalize(record))
}

/// Normalize a table of records; the schema is the union of all keys
pub fn normalize_records(records: &[RawRecord]) -> Result<Vec<VitalsSnapshot>> {
    let normalizer = Normalizer::for_headers(records.iter().flat_map(RawRecord::headers))?;
    Ok(records
        .iter()
        .map(|record| normalizer.normalize(record))
        .collect())
}

/// Coerce a raw value to a finite number
#[must_use]
pub fn coerce_number(value: Option<&Value>) -> Option<f64> {
    let number = match value? {
        Value::Number(number) => number.as_f64()?,
        Value::String(text) => text.trim().parse::<f64>().ok()?,
        _ => return None,
    };
    number.is_finite().then_some(number)
}

/// Coerce a raw value to a non-negative whole number no larger than `max`
fn coerce_age(value: Option<&Value>) -> Option<u32> {
    let number = coerce_number(value)?;
    if number < 0.0 || number > f64::from(u32::MAX) {
        return None;
    }
    // fractional ages truncate
    Some(number.trunc() as u32)
}

/// Coerce a raw value to text, empty when absent
#[must_use]
pub fn coerce_text(value: Option<&Value>) -> String {
    match value {
        Some(Value::String(text)) => text.clone(),
        Some(Value::Number(number)) => number.to_string(),
        Some(Value::Bool(flag)) => flag.to_string(),
        _ => String::new(),
    }
}

fn coerce_timestamp(value: Option<&Value>) -> Option<NaiveDateTime> {
    let Some(Value::String(text)) = value else {
        return None;
    };
    let text = text.trim();
    if let Ok(parsed) = DateTime::parse_from_rfc3339(text) {
        return Some(parsed.naive_utc());
    }
    TIMESTAMP_FORMATS
        .iter()
        .find_map(|format| NaiveDateTime::parse_from_str(text, format).ok())
        .or_else(|| {
            NaiveDate::parse_from_str(text, "%Y-%m-%d")
                .ok()
                .and_then(|date| date.and_hms_opt(0, 0, 0))
        })
}
