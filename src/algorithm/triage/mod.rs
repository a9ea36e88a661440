//! Rule-based triage classifier
//!
//! Applies two-level threshold rules per vital sign. Within one rule the
//! critical tier is checked before the warning tier and only the first match
//! is kept. Rules are independent of each other, so a snapshot yields at most
//! one finding per rule.

pub mod consciousness;

use crate::config::MissingVitalsPolicy;
use crate::models::{Finding, Severity, TriageResult, VitalCheck, VitalField, VitalsSnapshot};
use consciousness::assess_consciousness;
use smallvec::SmallVec;

/// Comparison against a threshold (strict)
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Bound {
    Below(f64),
    Above(f64),
}

impl Bound {
    /// Whether `value` lies beyond the bound
    #[must_use]
    pub fn breached_by(self, value: f64) -> bool {
        match self {
            Self::Below(limit) => value < limit,
            Self::Above(limit) => value > limit,
        }
    }
}

/// One severity level of a threshold rule; matches if any condition holds
#[derive(Debug)]
pub struct Tier {
    pub severity: Severity,
    pub conditions: &'static [(VitalField, Bound)],
    pub message: &'static str,
    pub label: &'static str,
}

/// Threshold rule for one vital sign, tiers ordered most severe first
#[derive(Debug)]
pub struct ThresholdRule {
    pub check: VitalCheck,
    pub tiers: &'static [Tier],
}

impl ThresholdRule {
    /// First tier the snapshot breaches
    #[must_use]
    pub fn evaluate(&self, snapshot: &VitalsSnapshot) -> Option<Finding> {
        self.tiers
            .iter()
            .find(|tier| {
                tier.conditions
                    .iter()
                    .any(|(field, bound)| bound.breached_by(snapshot.value(*field)))
            })
            .map(|tier| Finding {
                check: self.check,
                severity: tier.severity,
                message: tier.message,
                label: tier.label,
            })
    }

    /// Whether every field this rule reads was defaulted by the normalizer
    #[must_use]
    pub fn reads_only_defaulted(&self, snapshot: &VitalsSnapshot) -> bool {
        self.tiers
            .iter()
            .flat_map(|tier| tier.conditions.iter())
            .all(|(field, _)| snapshot.is_defaulted(*field))
    }
}

/// Threshold rules in evaluation order
pub static THRESHOLD_RULES: [ThresholdRule; 9] = [
    ThresholdRule {
        check: VitalCheck::HeartRate,
        tiers: &[
            Tier {
                severity: Severity::Critical,
                conditions: &[(VitalField::HeartRate, Bound::Below(40.0))],
                message: "Critical: Severe Bradycardia (HR < 40)",
                label: "Critically Low HR",
            },
            Tier {
                severity: Severity::Warning,
                conditions: &[(VitalField::HeartRate, Bound::Below(50.0))],
                message: "Warning: Bradycardia (HR < 50)",
                label: "Low HR",
            },
        ],
    },
    ThresholdRule {
        check: VitalCheck::HeartRate,
        tiers: &[
            Tier {
                severity: Severity::Critical,
                conditions: &[(VitalField::HeartRate, Bound::Above(150.0))],
                message: "Critical: Extreme Tachycardia (HR > 150)",
                label: "Critically High HR",
            },
            Tier {
                severity: Severity::Warning,
                conditions: &[(VitalField::HeartRate, Bound::Above(110.0))],
                message: "Warning: Tachycardia (HR > 110)",
                label: "High HR",
            },
        ],
    },
    ThresholdRule {
        check: VitalCheck::Spo2,
        tiers: &[
            Tier {
                severity: Severity::Critical,
                conditions: &[(VitalField::Spo2, Bound::Below(85.0))],
                message: "Critical: Severe Hypoxia (SpO₂ < 85%)",
                label: "Critically Low SpO₂",
            },
            Tier {
                severity: Severity::Warning,
                conditions: &[(VitalField::Spo2, Bound::Below(92.0))],
                message: "Warning: Hypoxia (SpO₂ < 92%)",
                label: "Low SpO₂",
            },
        ],
    },
    ThresholdRule {
        check: VitalCheck::BloodPressureHigh,
        tiers: &[
            Tier {
                severity: Severity::Critical,
                conditions: &[
                    (VitalField::SystolicBp, Bound::Above(180.0)),
                    (VitalField::DiastolicBp, Bound::Above(120.0)),
                ],
                message: "Critical: Hypertensive Crisis (BP > 180/120)",
                label: "Hypertensive Crisis",
            },
            Tier {
                severity: Severity::Warning,
                conditions: &[
                    (VitalField::SystolicBp, Bound::Above(160.0)),
                    (VitalField::DiastolicBp, Bound::Above(100.0)),
                ],
                message: "Warning: Severe Hypertension",
                label: "High BP",
            },
        ],
    },
    ThresholdRule {
        check: VitalCheck::BloodPressureLow,
        tiers: &[
            Tier {
                severity: Severity::Critical,
                conditions: &[(VitalField::SystolicBp, Bound::Below(90.0))],
                message: "Critical: Severe Hypotension (SBP < 90)",
                label: "Critically Low BP",
            },
            Tier {
                severity: Severity::Warning,
                conditions: &[(VitalField::SystolicBp, Bound::Below(100.0))],
                message: "Warning: Hypotension (SBP < 100)",
                label: "Low BP",
            },
        ],
    },
    ThresholdRule {
        check: VitalCheck::RespiratoryRate,
        tiers: &[
            Tier {
                severity: Severity::Critical,
                conditions: &[(VitalField::RespiratoryRate, Bound::Below(8.0))],
                message: "Critical: Severe Bradypnea (RR < 8)",
                label: "Low Resp. Rate",
            },
            Tier {
                severity: Severity::Warning,
                conditions: &[(VitalField::RespiratoryRate, Bound::Below(12.0))],
                message: "Warning: Bradypnea (RR < 12)",
                label: "Low Resp. Rate",
            },
        ],
    },
    ThresholdRule {
        check: VitalCheck::RespiratoryRate,
        tiers: &[
            Tier {
                severity: Severity::Critical,
                conditions: &[(VitalField::RespiratoryRate, Bound::Above(30.0))],
                message: "Critical: Severe Tachypnea (RR > 30)",
                label: "High Resp. Rate",
            },
            Tier {
                severity: Severity::Warning,
                conditions: &[(VitalField::RespiratoryRate, Bound::Above(22.0))],
                message: "Warning: Tachypnea (RR > 22)",
                label: "High Resp. Rate",
            },
        ],
    },
    ThresholdRule {
        check: VitalCheck::TemperatureHigh,
        tiers: &[
            Tier {
                severity: Severity::Critical,
                conditions: &[(VitalField::Temperature, Bound::Above(40.0))],
                message: "Critical: Hyperpyrexia (Temp > 40°C)",
                label: "Critically High Temp",
            },
            Tier {
                severity: Severity::Warning,
                conditions: &[(VitalField::Temperature, Bound::Above(38.5))],
                message: "Warning: High Fever (Temp > 38.5°C)",
                label: "High Temp",
            },
        ],
    },
    ThresholdRule {
        check: VitalCheck::TemperatureLow,
        tiers: &[Tier {
            severity: Severity::Critical,
            conditions: &[(VitalField::Temperature, Bound::Below(35.0))],
            message: "Critical: Hypothermia (Temp < 35°C)",
            label: "Low Temp",
        }],
    },
];

/// Findings in rule evaluation order
#[must_use]
pub fn evaluate_findings(
    snapshot: &VitalsSnapshot,
    policy: MissingVitalsPolicy,
) -> SmallVec<[Finding; 4]> {
    THRESHOLD_RULES
        .iter()
        .filter(|rule| {
            policy == MissingVitalsPolicy::TreatAsZero || !rule.reads_only_defaulted(snapshot)
        })
        .filter_map(|rule| rule.evaluate(snapshot))
        .collect()
}

/// Classify a snapshot into a triage result
#[must_use]
pub fn classify(snapshot: &VitalsSnapshot, policy: MissingVitalsPolicy) -> TriageResult {
    let findings = evaluate_findings(snapshot, policy);
    TriageResult::from_findings(findings, assess_consciousness(snapshot, policy))
}
