#[cfg(test)]
mod tests {
    use crate::utils::{normal_snapshot, snapshot};
    use ambulance_cds::algorithm::triage::{THRESHOLD_RULES, classify, evaluate_findings};
    use ambulance_cds::models::finding::STABLE_VITALS_MESSAGE;
    use ambulance_cds::{ConsciousnessState, MissingVitalsPolicy, Severity, VitalCheck};

    #[test]
    fn test_extreme_tachycardia_scenario() {
        let vitals = snapshot(160.0, 99.0, 120.0, 80.0, 16.0, 37.0, "Alert", 15, "chest pain");
        let result = classify(&vitals, MissingVitalsPolicy::TreatAsZero);

        assert_eq!(result.findings.len(), 1);
        assert_eq!(result.findings[0].message, "Critical: Extreme Tachycardia (HR > 150)");
        assert_eq!(result.severity, Severity::Critical);
        assert_eq!(result.labels, vec!["Critically High HR"]);
        assert_eq!(result.status_color, "#D9534F");
        assert_eq!(result.consciousness, ConsciousnessState::Conscious);
    }

    #[test]
    fn test_cardiac_arrest_scenario() {
        let vitals = snapshot(0.0, 20.0, 120.0, 80.0, 0.0, 37.0, "Unresponsive", 3, "cardiac arrest");
        let result = classify(&vitals, MissingVitalsPolicy::TreatAsZero);

        assert_eq!(result.severity, Severity::Critical);
        assert!(result.findings.len() >= 3);
        assert!(result.findings.iter().all(|f| f.severity == Severity::Critical));
        for check in [VitalCheck::HeartRate, VitalCheck::Spo2, VitalCheck::RespiratoryRate] {
            assert!(result.has_check(check), "missing {check:?}");
        }
        assert_eq!(result.consciousness, ConsciousnessState::Unconscious);
        assert_eq!(result.consciousness_color, "#D9534F");
    }

    #[test]
    fn test_stable_patient_has_no_findings() {
        let result = classify(&normal_snapshot(""), MissingVitalsPolicy::TreatAsZero);
        assert!(result.findings.is_empty());
        assert_eq!(result.severity, Severity::Normal);
        assert_eq!(result.alert, STABLE_VITALS_MESSAGE);
        assert!(result.labels.is_empty());
    }

    #[test]
    fn test_spo2_below_85_is_a_single_critical_finding() {
        for spo2 in [0.0, 40.0, 84.9] {
            let mut vitals = normal_snapshot("");
            vitals.spo2_percent = spo2;
            let spo2_findings: Vec<_> = evaluate_findings(&vitals, MissingVitalsPolicy::TreatAsZero)
                .into_iter()
                .filter(|f| f.check == VitalCheck::Spo2)
                .collect();
            assert_eq!(spo2_findings.len(), 1);
            assert_eq!(spo2_findings[0].severity, Severity::Critical);
        }
    }

    #[test]
    fn test_overall_severity_is_max_of_findings() {
        let cases = [
            (normal_snapshot(""), Severity::Normal),
            (snapshot(120.0, 98.0, 120.0, 80.0, 16.0, 37.0, "Alert", 15, ""), Severity::Warning),
            (snapshot(120.0, 80.0, 120.0, 80.0, 16.0, 37.0, "Alert", 15, ""), Severity::Critical),
            (snapshot(45.0, 90.0, 95.0, 60.0, 10.0, 39.0, "Alert", 15, ""), Severity::Warning),
        ];
        for (vitals, expected) in cases {
            let result = classify(&vitals, MissingVitalsPolicy::TreatAsZero);
            let max = result.findings.iter().map(|f| f.severity).max().unwrap_or_default();
            assert_eq!(result.severity, max);
            assert_eq!(result.severity, expected);
            assert_eq!(result.priority(), expected.as_u8());
        }
    }

    #[test]
    fn test_alert_orders_by_severity_then_rule_order() {
        // warning HR, critical SpO2, warning temperature, critical hypotension
        let vitals = snapshot(115.0, 80.0, 85.0, 60.0, 16.0, 39.0, "Alert", 15, "");
        let result = classify(&vitals, MissingVitalsPolicy::TreatAsZero);
        assert_eq!(
            result.labels,
            vec!["Critically Low SpO₂", "Critically Low BP", "High HR", "High Temp"]
        );
        assert_eq!(
            result.alert,
            "Critical: Severe Hypoxia (SpO₂ < 85%) | Critical: Severe Hypotension (SBP < 90) | \
             Warning: Tachycardia (HR > 110) | Warning: High Fever (Temp > 38.5°C)"
        );
    }

    #[test]
    fn test_at_most_one_finding_per_rule() {
        let vitals = snapshot(0.0, 0.0, 0.0, 0.0, 0.0, 0.0, "", 0, "");
        let findings = evaluate_findings(&vitals, MissingVitalsPolicy::TreatAsZero);
        assert!(findings.len() <= THRESHOLD_RULES.len());
        assert!(findings.iter().all(|f| f.severity == Severity::Critical));
    }
}
