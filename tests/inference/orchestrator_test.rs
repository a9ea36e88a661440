#[cfg(test)]
mod tests {
    use crate::utils::{normal_snapshot, snapshot};
    use ambulance_cds::algorithm::protocol::DEFAULT_PROTOCOL;
    use ambulance_cds::inference::classifier::TREATMENT_FEATURES;
    use ambulance_cds::{
        ConsciousnessState, EngineConfig, InferenceEngine, InferenceError, KnowledgeBase,
        KnowledgeBaseTreatmentClassifier, MissingVitalsPolicy, ProtocolLibrary, RiskClassifier,
        RiskFeatures, RiskTier, Severity, ThresholdRiskClassifier, TreatmentClassifier,
        TreatmentFeatures, VitalField, assess_batch, rank_by_priority,
    };
    use std::sync::Arc;

    /// A treatment model fitted with two features swapped
    struct SwappedFeatures;

    impl TreatmentClassifier for SwappedFeatures {
        fn feature_names(&self) -> Vec<String> {
            let mut names: Vec<String> =
                TREATMENT_FEATURES.iter().map(|s| (*s).to_string()).collect();
            names.swap(0, 1);
            names
        }

        fn predict(&self, _features: &TreatmentFeatures) -> Result<String, InferenceError> {
            Ok("Myocardial Infarction (MI)".to_string())
        }
    }

    /// A treatment model that answers with nothing
    struct BlankLabel;

    impl TreatmentClassifier for BlankLabel {
        fn predict(&self, _features: &TreatmentFeatures) -> Result<String, InferenceError> {
            Ok("  ".to_string())
        }
    }

    /// A risk model whose serving backend is unreachable
    struct OfflineRisk;

    impl RiskClassifier for OfflineRisk {
        fn predict(&self, _features: &RiskFeatures) -> Result<RiskTier, InferenceError> {
            Err(InferenceError::Backend("model server unreachable".to_string()))
        }
    }

    fn engine() -> InferenceEngine {
        InferenceEngine::with_reference_classifiers(EngineConfig::default())
    }

    #[test]
    fn test_tachycardic_chest_pain() {
        let assessment = engine().assess(&snapshot(
            160.0, 99.0, 120.0, 80.0, 16.0, 37.0, "Alert", 15, "chest pain",
        ));

        assert_eq!(assessment.severity(), Severity::Critical);
        assert_eq!(assessment.priority(), 2);
        assert_eq!(assessment.triage.labels, vec!["Critically High HR"]);
        assert!(
            assessment
                .diagnoses
                .iter()
                .any(|d| d.cause() == "Chest Pain - MI" || d.cause() == "Acute Coronary Syndrome")
        );
        assert_eq!(
            assessment.treatment_label(),
            Some("Myocardial Infarction (MI)")
        );
        assert_eq!(assessment.risk, Ok(RiskTier::High));
        assert!(assessment.protocols.contains("Administer Medication"));
        assert_eq!(assessment.deltas.heart_rate_bpm, 80.0);
    }

    #[test]
    fn test_cardiac_arrest_is_unconscious_and_critical() {
        let assessment = engine().assess(&snapshot(
            0.0,
            20.0,
            120.0,
            80.0,
            0.0,
            37.0,
            "Unresponsive",
            3,
            "cardiac arrest",
        ));

        assert_eq!(assessment.severity(), Severity::Critical);
        assert!(assessment.triage.findings.len() >= 3);
        assert!(
            assessment
                .triage
                .findings
                .iter()
                .all(|f| f.severity == Severity::Critical)
        );
        assert_eq!(
            assessment.triage.consciousness,
            ConsciousnessState::Unconscious
        );
        assert!(!assessment.protocols.used_default);
    }

    #[test]
    fn test_stable_patient_without_complaint() {
        let assessment = engine().assess(&normal_snapshot(""));

        assert_eq!(assessment.severity(), Severity::Normal);
        assert!(assessment.triage.findings.is_empty());
        assert!(assessment.diagnoses.is_empty());
        assert_eq!(assessment.risk, Ok(RiskTier::Low));
        // the fallback treatment label names the primary-survey protocol
        assert_eq!(assessment.treatment_label(), Some("Primary Survey"));
        assert!(!assessment.protocols.used_default);
        assert_eq!(assessment.protocols.names(), vec!["Primary Survey"]);
        assert_eq!(
            assessment.protocols.expanded().map(|p| p.name.as_str()),
            Some("Primary Survey")
        );
    }

    #[test]
    fn test_unknown_treatment_without_complaint_uses_default() {
        let treatment = KnowledgeBaseTreatmentClassifier::default()
            .with_fallback_label("Observation Only");
        let engine =
            InferenceEngine::new(EngineConfig::default(), treatment, ThresholdRiskClassifier);
        let assessment = engine.assess(&normal_snapshot(""));

        assert_eq!(assessment.treatment_label(), Some("Observation Only"));
        assert!(assessment.protocols.used_default);
        assert_eq!(assessment.protocols.names(), vec![DEFAULT_PROTOCOL]);
    }

    #[test]
    fn test_engines_share_builtin_tables() {
        let first = engine();
        let second = engine();
        assert!(std::ptr::eq(first.knowledge_base(), second.knowledge_base()));
        assert!(std::ptr::eq(first.knowledge_base(), KnowledgeBase::builtin()));
    }

    #[test]
    fn test_custom_protocol_library() {
        let json = r#"{
            "protocols": {
                "Standby": "**Standby**\n- Monitor and reassess.",
                "Splint": "**Splint**\n- Immobilize above and below the injury."
            },
            "complaint_map": [{"keyword": "fracture", "protocol": "Splint"}],
            "default_protocol": "Standby"
        }"#;
        let library = Arc::new(ProtocolLibrary::from_json_str(json).unwrap());
        let engine = engine().with_protocol_library(library);

        let fracture = engine.assess(&normal_snapshot("open fracture of forearm"));
        assert_eq!(fracture.protocols.names(), vec!["Splint"]);
        assert_eq!(fracture.protocols.entries[0].title, "**Splint**");

        let quiet = engine.assess(&normal_snapshot(""));
        assert!(quiet.protocols.used_default);
        assert_eq!(quiet.protocols.names(), vec!["Standby"]);
    }

    #[test]
    fn test_risk_backend_failure_is_reported() {
        let engine = InferenceEngine::new(
            EngineConfig::default(),
            KnowledgeBaseTreatmentClassifier::default(),
            OfflineRisk,
        );
        let assessment = engine.assess(&normal_snapshot("chest pain"));

        assert!(matches!(assessment.risk, Err(InferenceError::Backend(_))));
        assert_eq!(
            assessment.treatment_label(),
            Some("Myocardial Infarction (MI)")
        );
        assert_eq!(assessment.severity(), Severity::Normal);
    }

    #[test]
    fn test_feature_mismatch_is_reported_not_fatal() {
        let engine = InferenceEngine::new(
            EngineConfig::default(),
            SwappedFeatures,
            ThresholdRiskClassifier,
        );
        let assessment = engine.assess(&normal_snapshot("severe bleeding from leg"));

        assert!(matches!(
            assessment.treatment,
            Err(InferenceError::FeatureMismatch { .. })
        ));
        assert_eq!(assessment.treatment_label(), None);
        assert!(assessment.protocols.contains("Direct Pressure"));
        assert!(assessment.protocols.expanded().is_none());
        assert!(!assessment.diagnoses.is_empty());
    }

    #[test]
    fn test_blank_prediction_is_invalid() {
        let engine =
            InferenceEngine::new(EngineConfig::default(), BlankLabel, ThresholdRiskClassifier);
        let assessment = engine.assess(&normal_snapshot("chest pain"));
        assert!(matches!(
            assessment.treatment,
            Err(InferenceError::InvalidPrediction(_))
        ));
    }

    #[test]
    fn test_custom_knowledge_base() {
        let json = r#"[{
            "primary_complaints": ["Snake Bite"],
            "secondary_signs": ["swelling"],
            "cause": "Envenomation",
            "action": "Immobilize the limb.",
            "complications": "Coagulopathy",
            "treatment_label": "Administer Medication"
        }]"#;
        let knowledge_base = Arc::new(KnowledgeBase::from_json_str(json).unwrap());
        let engine = InferenceEngine::with_reference_classifiers(EngineConfig::default())
            .with_knowledge_base(knowledge_base);

        let assessment = engine.assess(&normal_snapshot("snake bite on ankle"));
        assert_eq!(engine.knowledge_base().len(), 1);
        assert_eq!(assessment.diagnoses.len(), 1);
        assert_eq!(assessment.diagnoses[0].cause(), "Envenomation");
    }

    #[test]
    fn test_skip_defaulted_policy() {
        let config = EngineConfig {
            missing_vitals: MissingVitalsPolicy::SkipDefaulted,
            ..EngineConfig::default()
        };
        let engine = InferenceEngine::with_reference_classifiers(config);

        let mut missing_hr = normal_snapshot("");
        missing_hr.heart_rate_bpm = 0.0;
        missing_hr.defaulted.push(VitalField::HeartRate);

        assert_eq!(engine.assess(&missing_hr).severity(), Severity::Normal);
        assert_eq!(
            InferenceEngine::with_reference_classifiers(EngineConfig::default())
                .assess(&missing_hr)
                .severity(),
            Severity::Critical
        );
    }

    #[test]
    fn test_live_feed_ranking() {
        let engine = engine();
        let mut warning = normal_snapshot("");
        warning.patient_id = "warning".to_string();
        warning.spo2_percent = 90.0;
        let mut critical = normal_snapshot("");
        critical.patient_id = "critical".to_string();
        critical.systolic_bp_mmhg = 200.0;
        let mut normal = normal_snapshot("");
        normal.patient_id = "normal".to_string();

        let mut assessments = assess_batch(&engine, &[normal, warning, critical]);
        let before: Vec<&str> = assessments.iter().map(|a| a.patient_id.as_str()).collect();
        assert_eq!(before, vec!["normal", "warning", "critical"]);

        rank_by_priority(&mut assessments);
        let after: Vec<&str> = assessments.iter().map(|a| a.patient_id.as_str()).collect();
        assert_eq!(after, vec!["critical", "warning", "normal"]);
    }
}
