//! Care-protocol documents and resolver output

use serde::{Deserialize, Serialize};

/// A named emergency-care procedure document (markdown-like text)
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Protocol {
    pub name: String,
    pub document: String,
}

impl Protocol {
    /// Create a protocol from a name and its document
    pub fn new(name: impl Into<String>, document: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            document: document.into(),
        }
    }

    /// First non-empty line of the document, falling back to the name
    #[must_use]
    pub fn title(&self) -> &str {
        self.document
            .lines()
            .map(str::trim)
            .find(|line| !line.is_empty())
            .unwrap_or(&self.name)
    }
}

/// One protocol selected for display
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ResolvedProtocol {
    pub name: String,
    pub title: String,
    pub document: String,
    /// Presentation hint: this entry is named after the predicted treatment
    pub expanded: bool,
}

/// Protocols to display for one patient, in alphabetical order
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ResolvedProtocols {
    pub entries: Vec<ResolvedProtocol>,
    /// Nothing matched and the default "ongoing care" protocol was substituted
    pub used_default: bool,
}

impl ResolvedProtocols {
    /// Names of the resolved protocols, in display order
    #[must_use]
    pub fn names(&self) -> Vec<&str> {
        self.entries.iter().map(|entry| entry.name.as_str()).collect()
    }

    /// Whether a protocol with this name was resolved
    #[must_use]
    pub fn contains(&self, name: &str) -> bool {
        self.entries.iter().any(|entry| entry.name == name)
    }

    /// The entry flagged for default expansion, if any
    #[must_use]
    pub fn expanded(&self) -> Option<&ResolvedProtocol> {
        self.entries.iter().find(|entry| entry.expanded)
    }
}
