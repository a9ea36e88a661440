//! Differential-diagnosis rule and scored-match models

use serde::{Deserialize, Serialize};

/// Label shown when a rule was selected without any discrete keyword hit
pub const FALLBACK_MATCH_LABEL: &str = "Based on Chief Complaint";

/// One row of the condition knowledge base
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DiagnosisRule {
    /// Primary-complaint keywords, lower-case
    pub primary_complaints: Vec<String>,
    /// Secondary-sign keywords, lower-case
    pub secondary_signs: Vec<String>,
    /// Possible medical cause
    pub cause: String,
    /// Immediate action for the crew / receiving doctor
    pub action: String,
    /// What might happen next
    pub complications: String,
    /// Treatment label the treatment classifier is trained to emit for this condition
    #[serde(default)]
    pub treatment_label: String,
}

impl DiagnosisRule {
    /// Whether the rule lists any of the given secondary signs verbatim
    #[must_use]
    pub fn lists_any_sign(&self, signs: &[&str]) -> bool {
        self.secondary_signs
            .iter()
            .any(|sign| signs.contains(&sign.as_str()))
    }
}

/// A rule matched against one snapshot
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ScoredDiagnosis {
    pub rule: DiagnosisRule,
    /// Relevance score, always > 0
    pub score: u32,
    /// Title-cased, de-duplicated keyword matches, or the fallback label
    pub matched_symptoms: Vec<String>,
    /// Vital-sign signals that added to the score ("Low BP", "High HR", ...)
    pub vital_signals: Vec<&'static str>,
}

impl ScoredDiagnosis {
    /// Possible cause, the headline of the match
    #[must_use]
    pub fn cause(&self) -> &str {
        &self.rule.cause
    }

    /// Matched symptoms joined for display
    #[must_use]
    pub fn matched_display(&self) -> String {
        self.matched_symptoms.join(", ")
    }
}
