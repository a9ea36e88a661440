//! Protocol resolver
//!
//! Maps a chief complaint and a predicted treatment label to the care
//! protocols worth showing. Entries come back in alphabetical order; the
//! protocol named after the predicted treatment is flagged `expanded`.

pub mod library;

use crate::models::{Protocol, ResolvedProtocol, ResolvedProtocols};
use std::collections::BTreeSet;

pub use library::{ComplaintMapping, DEFAULT_PROTOCOL, ProtocolLibrary};

/// Resolve the protocols for one complaint and (optional) treatment label
///
/// `treatment` is `None` when the treatment classifier failed; the complaint
/// keywords still resolve on their own.
#[must_use]
pub fn resolve_protocols(
    complaint: &str,
    treatment: Option<&str>,
    library: &ProtocolLibrary,
) -> ResolvedProtocols {
    let complaint = complaint.to_lowercase();

    let mut names: BTreeSet<&str> = library
        .complaint_map()
        .iter()
        .filter(|mapping| complaint.contains(mapping.keyword.as_str()))
        .map(|mapping| mapping.protocol.as_str())
        .collect();

    let treatment = treatment.filter(|label| library.contains(label));
    if let Some(label) = treatment {
        names.insert(label);
    }

    if names.is_empty() {
        // shown on its own, so it is displayed open
        let entries = library
            .get(library.default_protocol())
            .map(|protocol| resolved(protocol, true))
            .into_iter()
            .collect();
        return ResolvedProtocols {
            entries,
            used_default: true,
        };
    }

    let entries = names
        .into_iter()
        .filter_map(|name| library.get(name))
        .map(|protocol| resolved(protocol, treatment == Some(protocol.name.as_str())))
        .collect();

    ResolvedProtocols {
        entries,
        used_default: false,
    }
}

fn resolved(protocol: &Protocol, expanded: bool) -> ResolvedProtocol {
    ResolvedProtocol {
        name: protocol.name.clone(),
        title: protocol.title().to_string(),
        document: protocol.document.clone(),
        expanded,
    }
}
