//! Decision logic of the clinical inference engine
//!
//! Each submodule is a pure function of one snapshot plus read-only static
//! tables: threshold triage, differential-diagnosis scoring and protocol
//! resolution.

pub mod diagnosis;
pub mod protocol;
pub mod triage;
