//! Triage findings and their aggregate
//!
//! Severity and consciousness are closed enums. Colors are a presentation
//! lookup on top of them and never drive any decision.

use serde::Serialize;
use smallvec::SmallVec;
use std::fmt;

/// Message used when a snapshot produces no findings
pub const STABLE_VITALS_MESSAGE: &str = "All vitals stable.";

/// Triage tier of a finding or of a whole snapshot
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default, Serialize)]
pub enum Severity {
    /// Inside normal bands
    #[default]
    Normal = 0,
    /// Needs attention
    Warning = 1,
    /// Immediately life-threatening
    Critical = 2,
}

impl Severity {
    /// Convert a numeric tier (0-2) to `Severity`
    #[must_use]
    pub const fn from_u8(level: u8) -> Self {
        match level {
            0 => Self::Normal,
            1 => Self::Warning,
            _ => Self::Critical,
        }
    }

    /// Numeric tier, also the live-feed priority
    #[must_use]
    pub const fn as_u8(self) -> u8 {
        self as u8
    }

    /// Display name for this tier
    #[must_use]
    pub const fn description(self) -> &'static str {
        match self {
            Self::Normal => "Normal",
            Self::Warning => "Warning",
            Self::Critical => "Critical",
        }
    }

    /// Presentation color token
    #[must_use]
    pub const fn color(self) -> &'static str {
        match self {
            Self::Normal => "#5CB85C",
            Self::Warning => "#F0AD4E",
            Self::Critical => "#D9534F",
        }
    }
}

impl fmt::Display for Severity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.description())
    }
}

/// Whether the patient responds
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub enum ConsciousnessState {
    Conscious,
    Unconscious,
}

impl ConsciousnessState {
    /// Display name
    #[must_use]
    pub const fn description(self) -> &'static str {
        match self {
            Self::Conscious => "Conscious",
            Self::Unconscious => "Unconscious",
        }
    }

    /// Presentation color token
    #[must_use]
    pub const fn color(self) -> &'static str {
        match self {
            Self::Conscious => "#5CB85C",
            Self::Unconscious => "#D9534F",
        }
    }
}

impl fmt::Display for ConsciousnessState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.description())
    }
}

/// The threshold check that produced a finding
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub enum VitalCheck {
    HeartRate,
    Spo2,
    BloodPressureHigh,
    BloodPressureLow,
    RespiratoryRate,
    TemperatureHigh,
    TemperatureLow,
}

/// One abnormal-vitals observation
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct Finding {
    /// Check that fired
    pub check: VitalCheck,
    pub severity: Severity,
    /// Long-form message for the audit text
    pub message: &'static str,
    /// Short label for cards and report columns
    pub label: &'static str,
}

/// Aggregate of all findings for one snapshot
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TriageResult {
    /// Maximum finding severity, `Normal` when there are none
    pub severity: Severity,
    /// Findings sorted by descending severity, evaluation order within a tier
    pub findings: SmallVec<[Finding; 4]>,
    /// Finding messages joined with `" | "`, or the stable-vitals message
    pub alert: String,
    /// Short labels in the same order as `findings`
    pub labels: Vec<&'static str>,
    pub status_color: &'static str,
    pub consciousness: ConsciousnessState,
    pub consciousness_color: &'static str,
}

impl TriageResult {
    /// Build the aggregate from findings in evaluation order
    #[must_use]
    pub fn from_findings(
        mut findings: SmallVec<[Finding; 4]>,
        consciousness: ConsciousnessState,
    ) -> Self {
        // stable: ties keep evaluation order
        findings.sort_by(|a, b| b.severity.cmp(&a.severity));

        let severity = findings
            .iter()
            .map(|finding| finding.severity)
            .max()
            .unwrap_or_default();

        let alert = if findings.is_empty() {
            STABLE_VITALS_MESSAGE.to_string()
        } else {
            findings
                .iter()
                .map(|finding| finding.message)
                .collect::<Vec<_>>()
                .join(" | ")
        };
        let labels = findings.iter().map(|finding| finding.label).collect();

        Self {
            severity,
            findings,
            alert,
            labels,
            status_color: severity.color(),
            consciousness,
            consciousness_color: consciousness.color(),
        }
    }

    /// Live-feed priority (numeric severity)
    #[must_use]
    pub const fn priority(&self) -> u8 {
        self.severity.as_u8()
    }

    /// Whether any finding came from the given check
    #[must_use]
    pub fn has_check(&self, check: VitalCheck) -> bool {
        self.findings.iter().any(|finding| finding.check == check)
    }
}
