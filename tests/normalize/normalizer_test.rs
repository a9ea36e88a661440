#[cfg(test)]
mod tests {
    use crate::utils::canonical_record;
    use ambulance_cds::{
        ColumnMapping, Normalizer, RawRecord, VitalField, normalize_record, normalize_records,
    };
    use chrono::NaiveDate;

    #[test]
    fn test_canonical_record_normalizes_cleanly() {
        let snapshot = normalize_record(&canonical_record("1001", 72.0, "headache")).unwrap();

        assert_eq!(snapshot.patient_id, "1001");
        assert_eq!(snapshot.age, 54);
        assert_eq!(snapshot.gender, "F");
        assert_eq!(snapshot.heart_rate_bpm, 72.0);
        assert_eq!(snapshot.systolic_bp_mmhg, 118.0);
        assert_eq!(snapshot.diastolic_bp_mmhg, 76.0);
        assert_eq!(snapshot.respiratory_rate_bpm, 18.0);
        assert_eq!(snapshot.spo2_percent, 97.0);
        assert_eq!(snapshot.temperature_c, 36.9);
        assert_eq!(snapshot.consciousness, "Alert");
        assert_eq!(snapshot.gcs, 15.0);
        assert_eq!(snapshot.chief_complaint, "headache");
        assert!(snapshot.defaulted.is_empty());

        let expected = NaiveDate::from_ymd_opt(2024, 5, 1)
            .unwrap()
            .and_hms_opt(10, 30, 0)
            .unwrap();
        assert_eq!(snapshot.recorded_at, Some(expected));
    }

    #[test]
    fn test_aliased_headers_are_read() {
        let record = RawRecord::new()
            .with("patient_id", "3001")
            .with("age", 30)
            .with("Heart_Rate", 95)
            .with("systolic_bp_reading", 130)
            .with("diastolic_bp_reading", 85)
            .with("respiratory_rate", 20)
            .with("SpO2", 96)
            .with("temp", "38.4")
            .with("chief_complaint", "fever");

        let snapshot = normalize_record(&record).unwrap();
        assert_eq!(snapshot.patient_id, "3001");
        assert_eq!(snapshot.heart_rate_bpm, 95.0);
        assert_eq!(snapshot.systolic_bp_mmhg, 130.0);
        assert_eq!(snapshot.spo2_percent, 96.0);
        assert_eq!(snapshot.temperature_c, 38.4);
        // gcs is optional: absent, so defaulted
        assert_eq!(snapshot.gcs, 0.0);
        assert_eq!(snapshot.defaulted.as_slice(), &[VitalField::Gcs]);
    }

    #[test]
    fn test_missing_required_columns_is_schema_error() {
        let record = RawRecord::new()
            .with("p_id", "1001")
            .with("heart_rate_bpm", 80)
            .with("chief_complaint", "chest pain");

        let err = normalize_record(&record).unwrap_err();
        assert!(err.is_schema_error());
        let message = err.to_string();
        assert!(message.contains("spo2_percent"));
        assert!(message.contains("systolic_bp_mmHg"));
        assert!(!message.contains("heart_rate_bpm"));
    }

    #[test]
    fn test_bad_cells_default_to_zero() {
        let mut record = canonical_record("1001", 80.0, "chest pain");
        record.insert("heart_rate_bpm", "n/a");
        record.insert("spo2_percent", serde_json::Value::Null);
        record.insert("age", -4);

        let snapshot = normalize_record(&record).unwrap();
        assert_eq!(snapshot.heart_rate_bpm, 0.0);
        assert_eq!(snapshot.spo2_percent, 0.0);
        assert_eq!(snapshot.age, 0);
        assert!(snapshot.is_defaulted(VitalField::HeartRate));
        assert!(snapshot.is_defaulted(VitalField::Spo2));
        assert!(snapshot.is_defaulted(VitalField::Age));
        assert!(!snapshot.is_defaulted(VitalField::Temperature));
    }

    #[test]
    fn test_table_schema_is_union_of_keys() {
        let full = canonical_record("1001", 80.0, "chest pain");
        let mut partial = RawRecord::new();
        for key in ["p_id", "age", "systolic_bp_mmHg", "diastolic_bp_mmHg"] {
            partial.insert(key, full.get(key).cloned().unwrap());
        }
        // a lone partial record is rejected...
        assert!(normalize_record(&partial).unwrap_err().is_schema_error());

        // ...but in a table its missing keys are covered by the other row
        let snapshots = normalize_records(&[full, partial]).unwrap();
        assert_eq!(snapshots.len(), 2);
        assert!(snapshots[0].defaulted.is_empty());
        assert!(snapshots[1].is_defaulted(VitalField::HeartRate));
        assert!(snapshots[1].is_defaulted(VitalField::Temperature));
        assert_eq!(snapshots[1].systolic_bp_mmhg, 118.0);
    }

    #[test]
    fn test_records_from_json() {
        let json = r#"[
            {"p_id": 1, "age": 70, "heart_rate_bpm": 35, "systolic_bp_mmHg": 100,
             "diastolic_bp_mmHg": 60, "respiratory_rate_bpm": 12, "spo2_percent": 93,
             "temperature_c": 36.1, "consciousness": "Drowsy", "gcs": 12,
             "chief_complaint": "dizziness"}
        ]"#;
        let records = RawRecord::many_from_json_str(json).unwrap();
        let snapshots = normalize_records(&records).unwrap();
        assert_eq!(snapshots[0].patient_id, "1");
        assert_eq!(snapshots[0].heart_rate_bpm, 35.0);
        assert_eq!(snapshots[0].gcs, 12.0);
        assert_eq!(snapshots[0].recorded_at, None);
    }

    #[test]
    fn test_normalizer_reuses_mapping() {
        let record = canonical_record("1001", 80.0, "");
        let mapping = ColumnMapping::resolve(record.headers()).unwrap();
        let normalizer = Normalizer::new(mapping);
        assert!(normalizer.mapping().missing_required().is_empty());

        let other = canonical_record("1002", 130.0, "palpitations");
        let snapshot = normalizer.normalize(&other);
        assert_eq!(snapshot.patient_id, "1002");
        assert_eq!(snapshot.heart_rate_bpm, 130.0);
    }
}
