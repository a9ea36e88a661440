//! Differential-diagnosis scorer
//!
//! Scores every knowledge-base rule against one snapshot and keeps the
//! best `top_n`. Scoring per rule:
//!
//! - +10 per primary keyword found in the complaint
//! - +2 per secondary sign found in the complaint
//! - +3 per vital-sign signal the rule lists (unconscious, low BP, fast HR, fever)
//! - a root-cause bonus when the complaint names an etiology and the rule's
//!   own primary keywords include an etiological one that matched
//!
//! Rules that score 0 are dropped. Ranking is by descending score, ties kept
//! in knowledge-base order.

pub mod knowledge_base;
pub mod root_cause;

use crate::algorithm::triage::consciousness::{has_low_gcs, has_unresponsive_marker};
use crate::config::{EngineConfig, MissingVitalsPolicy};
use crate::models::diagnosis::FALLBACK_MATCH_LABEL;
use crate::models::{DiagnosisRule, ScoredDiagnosis, VitalField, VitalsSnapshot};
use itertools::Itertools;
use std::cmp::Reverse;

pub use knowledge_base::KnowledgeBase;
pub use root_cause::{ROOT_CAUSE_KEYWORDS, is_root_cause_keyword, mentions_root_cause};

const PRIMARY_KEYWORD_SCORE: u32 = 10;
const SECONDARY_SIGN_SCORE: u32 = 2;
const VITAL_SIGNAL_SCORE: u32 = 3;

/// Complaint phrases that flag an unconscious or confused patient
const UNCONSCIOUS_COMPLAINTS: [&str; 3] = ["unconscious", "confusion", "no response"];
const LOW_BP_SIGNS: [&str; 1] = ["low bp"];
const FAST_HR_SIGNS: [&str; 2] = ["fast hr", "rapid pulse"];
const FEVER_SIGNS: [&str; 2] = ["fever", "high temp"];

const LOW_SYSTOLIC_BP: f64 = 90.0;
const HIGH_HEART_RATE: f64 = 100.0;
const FEVER_TEMPERATURE: f64 = 38.0;

/// Per-snapshot facts every rule is scored against
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PatientSignals {
    /// Lower-cased chief complaint
    pub complaint: String,
    pub unconscious: bool,
    pub low_bp: bool,
    pub high_hr: bool,
    pub fever: bool,
    /// Complaint names a root cause
    pub root_cause: bool,
}

impl PatientSignals {
    /// Derive the signals from a snapshot
    #[must_use]
    pub fn from_snapshot(snapshot: &VitalsSnapshot, policy: MissingVitalsPolicy) -> Self {
        let complaint = snapshot.complaint_lower();
        let measured = |field: VitalField| {
            policy == MissingVitalsPolicy::TreatAsZero || !snapshot.is_defaulted(field)
        };

        let unconscious = has_unresponsive_marker(snapshot)
            || UNCONSCIOUS_COMPLAINTS
                .iter()
                .any(|phrase| complaint.contains(phrase))
            || has_low_gcs(snapshot, policy);

        Self {
            unconscious,
            low_bp: measured(VitalField::SystolicBp) && snapshot.systolic_bp_mmhg < LOW_SYSTOLIC_BP,
            high_hr: measured(VitalField::HeartRate) && snapshot.heart_rate_bpm > HIGH_HEART_RATE,
            fever: measured(VitalField::Temperature) && snapshot.temperature_c > FEVER_TEMPERATURE,
            root_cause: mentions_root_cause(&complaint),
            complaint,
        }
    }

    /// Vital-sign signals as (active, signs a rule must list, display label)
    fn vital_signals(&self) -> [(bool, &'static [&'static str], &'static str); 4] {
        [
            (self.unconscious, &UNCONSCIOUS_COMPLAINTS[..], "Unconscious/Confused"),
            (self.low_bp, &LOW_BP_SIGNS[..], "Low BP"),
            (self.high_hr, &FAST_HR_SIGNS[..], "High HR"),
            (self.fever, &FEVER_SIGNS[..], "Fever"),
        ]
    }
}

/// Score one rule; `None` when nothing matched
#[must_use]
pub fn score_rule(
    rule: &DiagnosisRule,
    signals: &PatientSignals,
    root_cause_bonus: u32,
) -> Option<ScoredDiagnosis> {
    let mut keyword_hits: Vec<&str> = Vec::new();

    let mut primary_score = 0;
    for keyword in &rule.primary_complaints {
        if signals.complaint.contains(keyword.as_str()) {
            primary_score += PRIMARY_KEYWORD_SCORE;
            keyword_hits.push(keyword);
        }
    }

    let mut secondary_score = 0;
    for sign in &rule.secondary_signs {
        if signals.complaint.contains(sign.as_str()) {
            secondary_score += SECONDARY_SIGN_SCORE;
            keyword_hits.push(sign);
        }
    }

    let vital_signals: Vec<&'static str> = signals
        .vital_signals()
        .into_iter()
        .filter(|(active, signs, _)| *active && rule.lists_any_sign(signs))
        .map(|(_, _, label)| label)
        .collect();
    let vital_score = VITAL_SIGNAL_SCORE * vital_signals.len() as u32;

    let bonus = if signals.root_cause
        && primary_score > 0
        && rule
            .primary_complaints
            .iter()
            .any(|keyword| is_root_cause_keyword(keyword))
    {
        root_cause_bonus
    } else {
        0
    };

    // the bonus is configurable; saturate rather than wrap
    let score = (primary_score + secondary_score + vital_score).saturating_add(bonus);
    if score == 0 {
        return None;
    }

    let mut matched_symptoms: Vec<String> =
        keyword_hits.into_iter().unique().map(title_case).collect();
    if matched_symptoms.is_empty() {
        matched_symptoms.push(FALLBACK_MATCH_LABEL.to_string());
    }

    Some(ScoredDiagnosis {
        rule: rule.clone(),
        score,
        matched_symptoms,
        vital_signals,
    })
}

/// Rank the knowledge base against a snapshot, best `config.top_n` first
#[must_use]
pub fn score_diagnoses(
    snapshot: &VitalsSnapshot,
    knowledge_base: &KnowledgeBase,
    config: &EngineConfig,
) -> Vec<ScoredDiagnosis> {
    let signals = PatientSignals::from_snapshot(snapshot, config.missing_vitals);
    knowledge_base
        .iter()
        .filter_map(|rule| score_rule(rule, &signals, config.root_cause_bonus))
        .sorted_by_key(|diagnosis| Reverse(diagnosis.score))
        .take(config.top_n)
        .collect()
}

/// Capitalize the first letter of every alphabetic run, lower-case the rest
fn title_case(text: &str) -> String {
    let mut previous_alphabetic = false;
    text.chars()
        .flat_map(|c| {
            let mapped: Vec<char> = if !c.is_alphabetic() {
                vec![c]
            } else if previous_alphabetic {
                c.to_lowercase().collect()
            } else {
                c.to_uppercase().collect()
            };
            previous_alphabetic = c.is_alphabetic();
            mapped
        })
        .collect()
}
