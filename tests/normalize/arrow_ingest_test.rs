#[cfg(test)]
mod tests {
    use crate::utils::vitals_batch;
    use ambulance_cds::normalize::arrow_ingest::{snapshots_from_batch, snapshots_from_batches};
    use ambulance_cds::{MissingVitalsPolicy, Severity, VitalCheck, VitalField, classify};
    use arrow::array::{ArrayRef, Float64Array, StringArray};
    use arrow::datatypes::{DataType, Field, Schema};
    use arrow::record_batch::RecordBatch;
    use std::sync::Arc;

    #[test]
    fn test_batch_rows_normalize_in_order() {
        let snapshots = snapshots_from_batch(&vitals_batch()).unwrap();
        assert_eq!(snapshots.len(), 2);

        let first = &snapshots[0];
        assert_eq!(first.patient_id, "2001");
        assert_eq!(first.age, 67);
        assert_eq!(first.heart_rate_bpm, 160.0);
        assert_eq!(first.systolic_bp_mmhg, 120.0);
        assert_eq!(first.diastolic_bp_mmhg, 80.0);
        assert_eq!(first.temperature_c, 37.0);
        assert_eq!(first.consciousness, "Alert");
        assert_eq!(first.chief_complaint, "chest pain");
        // the batch has no gcs column
        assert_eq!(first.defaulted.as_slice(), &[VitalField::Gcs]);

        let second = &snapshots[1];
        assert_eq!(second.patient_id, "2002");
        assert_eq!(second.heart_rate_bpm, 0.0);
        assert_eq!(second.temperature_c, 0.0);
        assert_eq!(second.consciousness, "");
        assert!(second.is_defaulted(VitalField::HeartRate));
        assert!(second.is_defaulted(VitalField::Temperature));
        assert!(!second.is_defaulted(VitalField::Spo2));
    }

    #[test]
    fn test_defaulted_cells_under_each_policy() {
        let snapshots = snapshots_from_batch(&vitals_batch()).unwrap();
        let second = &snapshots[1];

        // as zeros, the missing heart rate and temperature raise findings
        let as_zero = classify(second, MissingVitalsPolicy::TreatAsZero);
        assert_eq!(as_zero.severity, Severity::Critical);
        assert!(as_zero.has_check(VitalCheck::HeartRate));
        assert!(as_zero.has_check(VitalCheck::TemperatureLow));

        // skipped, only the measured vitals are judged
        let skipped = classify(second, MissingVitalsPolicy::SkipDefaulted);
        assert_eq!(skipped.severity, Severity::Critical);
        assert!(!skipped.has_check(VitalCheck::HeartRate));
        assert!(!skipped.has_check(VitalCheck::TemperatureLow));
        assert!(skipped.has_check(VitalCheck::BloodPressureLow));
        assert!(skipped.has_check(VitalCheck::Spo2));
        assert!(skipped.has_check(VitalCheck::RespiratoryRate));
    }

    #[test]
    fn test_missing_columns_rejected() {
        let schema = Schema::new(vec![
            Field::new("pid", DataType::Utf8, false),
            Field::new("heart_rate", DataType::Float64, true),
        ]);
        let columns: Vec<ArrayRef> = vec![
            Arc::new(StringArray::from(vec!["1"])),
            Arc::new(Float64Array::from(vec![80.0])),
        ];
        let batch = RecordBatch::try_new(Arc::new(schema), columns).unwrap();

        let err = snapshots_from_batch(&batch).unwrap_err();
        assert!(err.is_schema_error());
    }

    #[test]
    fn test_several_batches_concatenate() {
        let snapshots = snapshots_from_batches(&[vitals_batch(), vitals_batch()]).unwrap();
        let ids: Vec<&str> = snapshots.iter().map(|s| s.patient_id.as_str()).collect();
        assert_eq!(ids, vec!["2001", "2002", "2001", "2002"]);
    }
}
