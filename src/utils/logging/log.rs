//! Standardized log lines for hosts driving the engine

use crate::inference::ClinicalAssessment;
use std::path::Path;
use std::time::Duration;

/// Log an operation start with consistent format
///
/// # Arguments
/// * `operation` - Description of the operation
/// * `path` - Path of the file being operated on
pub fn log_operation_start(operation: &str, path: &Path) {
    log::info!("{} {}", operation, path.display());
}

/// Log a loaded record source
///
/// # Arguments
/// * `path` - Source file
/// * `records` - Number of raw records read
/// * `patients` - Number of distinct patients among them
/// * `elapsed` - Time spent reading and normalizing
pub fn log_records_loaded(path: &Path, records: usize, patients: usize, elapsed: Duration) {
    log::info!(
        "Loaded {} records for {} patients from {} in {:?}",
        records,
        patients,
        path.display(),
        elapsed
    );
}

/// Log one assessment as a single live-feed line
///
/// Only the triage outcome and the treatment label are logged; the chief
/// complaint stays out of `info` output.
pub fn log_assessment(step: usize, assessment: &ClinicalAssessment) {
    let treatment = assessment
        .treatment
        .as_ref()
        .map_or_else(|err| format!("unavailable ({err})"), Clone::clone);
    log::info!(
        "[step {}] patient {} | {} | {} | treatment: {}",
        step,
        assessment.patient_id,
        assessment.severity().description(),
        assessment.triage.alert,
        treatment
    );
    if let Some(top) = assessment.diagnoses.first() {
        log::debug!(
            "[step {}] patient {} | top cause: {} (score {}, matched: {})",
            step,
            assessment.patient_id,
            top.cause(),
            top.score,
            top.matched_display()
        );
    }
}
