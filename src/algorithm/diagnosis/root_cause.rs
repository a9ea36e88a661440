//! Root-cause vocabulary
//!
//! Complaints naming an etiology (trauma, bleeding, cardiac events, ...) bias
//! the ranking toward rules whose own primary keywords are etiological.

/// Keywords that name a root cause rather than a symptom
pub const ROOT_CAUSE_KEYWORDS: [&str; 16] = [
    "bleeding",
    "hemorrhage",
    "trauma",
    "fracture",
    "accident",
    "chest pain",
    "mi",
    "heart attack",
    "cardiac arrest",
    "burn",
    "seizure",
    "stroke",
    "poisoning",
    "overdose",
    "pregnancy",
    "allergy",
];

/// Whether a lower-cased complaint contains any root-cause keyword
#[must_use]
pub fn mentions_root_cause(complaint: &str) -> bool {
    ROOT_CAUSE_KEYWORDS
        .iter()
        .any(|keyword| complaint.contains(keyword))
}

/// Whether a rule keyword is itself in the root-cause vocabulary (exact match)
#[must_use]
pub fn is_root_cause_keyword(keyword: &str) -> bool {
    ROOT_CAUSE_KEYWORDS.contains(&keyword)
}
