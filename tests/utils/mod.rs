use std::sync::Arc;

use ambulance_cds::{RawRecord, VitalsSnapshot};
use arrow::array::{ArrayRef, Float64Array, Int32Array, StringArray};
use arrow::datatypes::{DataType, Field, Schema};
use arrow::record_batch::RecordBatch;
use serde_json::json;

/// A stable adult with the given complaint
#[must_use]
pub fn normal_snapshot(complaint: &str) -> VitalsSnapshot {
    VitalsSnapshot {
        patient_id: "1001".to_string(),
        chief_complaint: complaint.to_string(),
        ..VitalsSnapshot::default()
    }
}

/// Snapshot built from explicit vitals
#[allow(clippy::too_many_arguments)]
#[must_use]
pub fn snapshot(
    heart_rate_bpm: f64,
    spo2_percent: f64,
    systolic_bp_mmhg: f64,
    diastolic_bp_mmhg: f64,
    respiratory_rate_bpm: f64,
    temperature_c: f64,
    consciousness: &str,
    gcs: u8,
    complaint: &str,
) -> VitalsSnapshot {
    VitalsSnapshot {
        patient_id: "1001".to_string(),
        heart_rate_bpm,
        spo2_percent,
        systolic_bp_mmhg,
        diastolic_bp_mmhg,
        respiratory_rate_bpm,
        temperature_c,
        consciousness: consciousness.to_string(),
        gcs: f64::from(gcs),
        chief_complaint: complaint.to_string(),
        ..VitalsSnapshot::default()
    }
}

/// Raw record using the canonical column names
#[must_use]
pub fn canonical_record(patient_id: &str, heart_rate_bpm: f64, complaint: &str) -> RawRecord {
    RawRecord::new()
        .with("p_id", patient_id)
        .with("age", 54)
        .with("gender", "F")
        .with("heart_rate_bpm", heart_rate_bpm)
        .with("systolic_bp_mmHg", 118)
        .with("diastolic_bp_mmHg", 76)
        .with("respiratory_rate_bpm", 18)
        .with("spo2_percent", 97)
        .with("temperature_c", 36.9)
        .with("consciousness", "Alert")
        .with("gcs", 15)
        .with("chief_complaint", complaint)
        .with("timestamp", json!("2024-05-01 10:30:00"))
}

/// Two-row vitals batch with aliased headers and one unusable cell
pub fn vitals_batch() -> RecordBatch {
    let schema = Schema::new(vec![
        Field::new("pid", DataType::Utf8, false),
        Field::new("age", DataType::Int32, true),
        Field::new("heart_rate", DataType::Float64, true),
        Field::new("systolic_bp_reading", DataType::Int32, true),
        Field::new("diastolic_bp_reading", DataType::Int32, true),
        Field::new("respiratory_rate", DataType::Int32, true),
        Field::new("spo2", DataType::Float64, true),
        Field::new("temp", DataType::Utf8, true),
        Field::new("consciousness", DataType::Utf8, true),
        Field::new("chief_complaint", DataType::Utf8, true),
    ]);

    let columns: Vec<ArrayRef> = vec![
        Arc::new(StringArray::from(vec!["2001", "2002"])),
        Arc::new(Int32Array::from(vec![Some(67), Some(23)])),
        Arc::new(Float64Array::from(vec![Some(160.0), None])),
        Arc::new(Int32Array::from(vec![120, 85])),
        Arc::new(Int32Array::from(vec![80, 60])),
        Arc::new(Int32Array::from(vec![16, 24])),
        Arc::new(Float64Array::from(vec![99.0, 91.0])),
        Arc::new(StringArray::from(vec![Some("37.0"), Some("n/a")])),
        Arc::new(StringArray::from(vec![Some("Alert"), None])),
        Arc::new(StringArray::from(vec![Some("chest pain"), Some("severe bleeding from leg")])),
    ];

    RecordBatch::try_new(Arc::new(schema), columns).unwrap()
}
