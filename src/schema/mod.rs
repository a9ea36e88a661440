//! Vitals schema resolution
//!
//! Maps the headers of a source table (or the keys of a raw record) to the
//! columns the normalizer reads, and rejects schemas that lack the required
//! numeric vitals. A missing column is a caller-configuration problem; a bad
//! value in a present column is not, and is handled per cell by the
//! normalizer.

pub mod field_mapping;

use crate::error::{CdsError, Result};
use crate::models::VitalField;
use log::{debug, warn};
use rustc_hash::FxHashMap;

pub use field_mapping::{Column, lookup_column};

/// Resolved mapping from known columns to the header names used by a source
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ColumnMapping {
    sources: FxHashMap<Column, String>,
}

impl ColumnMapping {
    /// Resolve headers and validate that every required vitals column is present
    pub fn resolve<'a, I>(headers: I) -> Result<Self>
    where
        I: IntoIterator<Item = &'a str>,
    {
        let mapping = Self::resolve_lenient(headers);
        let missing = mapping.missing_required();
        if !missing.is_empty() {
            return Err(CdsError::schema(
                missing.iter().map(|field| field.column_name()),
            ));
        }
        Ok(mapping)
    }

    /// Resolve headers without validating required columns
    pub fn resolve_lenient<'a, I>(headers: I) -> Self
    where
        I: IntoIterator<Item = &'a str>,
    {
        let mut sources: FxHashMap<Column, String> = FxHashMap::default();
        for header in headers {
            let Some(column) = lookup_column(header) else {
                continue;
            };
            if let Some(existing) = sources.get(&column) {
                warn!(
                    "Columns '{existing}' and '{header}' both map to {}, keeping '{existing}'",
                    column.canonical_name()
                );
                continue;
            }
            if header != column.canonical_name() {
                debug!("Column '{header}' read as {}", column.canonical_name());
            }
            sources.insert(column, header.to_string());
        }
        Self { sources }
    }

    /// Header name a column is read from, if the source has it
    #[must_use]
    pub fn source_name(&self, column: Column) -> Option<&str> {
        self.sources.get(&column).map(String::as_str)
    }

    /// Whether the source carries a column
    #[must_use]
    pub fn has(&self, column: Column) -> bool {
        self.sources.contains_key(&column)
    }

    /// Required vitals columns the source lacks, in canonical order
    #[must_use]
    pub fn missing_required(&self) -> Vec<VitalField> {
        VitalField::REQUIRED
            .into_iter()
            .filter(|field| !self.has(Column::Vital(*field)))
            .collect()
    }
}
