//! Batch assessment and live-feed ordering
//!
//! Assessments are independent, so a batch is spread over the rayon pool
//! when `parallel_batches` is set. Output order always matches input order.

use crate::inference::{ClinicalAssessment, InferenceEngine};
use crate::models::{Severity, VitalsSnapshot};
use itertools::Itertools;
use log::info;
use rayon::prelude::*;
use std::cmp::Reverse;
use std::time::Instant;

/// Assess many snapshots, one assessment per snapshot in input order
#[must_use]
pub fn assess_batch(
    engine: &InferenceEngine,
    snapshots: &[VitalsSnapshot],
) -> Vec<ClinicalAssessment> {
    let start = Instant::now();

    let assessments: Vec<ClinicalAssessment> = if engine.config().parallel_batches {
        info!(
            "Assessing {} snapshots with {} threads",
            snapshots.len(),
            rayon::current_num_threads()
        );
        snapshots
            .par_iter()
            .map(|snapshot| engine.assess(snapshot))
            .collect()
    } else {
        snapshots
            .iter()
            .map(|snapshot| engine.assess(snapshot))
            .collect()
    };

    let counts = assessments.iter().counts_by(ClinicalAssessment::severity);
    let count = |severity: Severity| counts.get(&severity).copied().unwrap_or(0);
    info!(
        "Assessed {} snapshots in {:?}: {} critical, {} warning, {} normal",
        assessments.len(),
        start.elapsed(),
        count(Severity::Critical),
        count(Severity::Warning),
        count(Severity::Normal)
    );

    assessments
}

/// Order by descending priority; equal priorities keep their input order
pub fn rank_by_priority(assessments: &mut [ClinicalAssessment]) {
    assessments.sort_by_key(|assessment| Reverse(assessment.priority()));
}
