//! Consciousness assessment shared by triage and diagnosis scoring

use crate::config::MissingVitalsPolicy;
use crate::models::{ConsciousnessState, VitalField, VitalsSnapshot};

/// Consciousness descriptors that mean the patient does not respond
pub const UNRESPONSIVE_MARKERS: [&str; 2] = ["unresponsive", "unconscious"];

/// GCS at or below this is treated as unconscious
pub const UNCONSCIOUS_GCS: f64 = 8.0;

/// Whether the consciousness descriptor carries an unresponsive marker
#[must_use]
pub fn has_unresponsive_marker(snapshot: &VitalsSnapshot) -> bool {
    let consciousness = snapshot.consciousness_lower();
    UNRESPONSIVE_MARKERS
        .iter()
        .any(|marker| consciousness.contains(marker))
}

/// Whether the GCS counts as low under the given policy
#[must_use]
pub fn has_low_gcs(snapshot: &VitalsSnapshot, policy: MissingVitalsPolicy) -> bool {
    if policy == MissingVitalsPolicy::SkipDefaulted && snapshot.is_defaulted(VitalField::Gcs) {
        return false;
    }
    snapshot.gcs <= UNCONSCIOUS_GCS
}

/// Derive the consciousness state for display
#[must_use]
pub fn assess_consciousness(
    snapshot: &VitalsSnapshot,
    policy: MissingVitalsPolicy,
) -> ConsciousnessState {
    if has_unresponsive_marker(snapshot) || has_low_gcs(snapshot, policy) {
        ConsciousnessState::Unconscious
    } else {
        ConsciousnessState::Conscious
    }
}
