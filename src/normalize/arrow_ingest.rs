//! Normalize rows of an Arrow `RecordBatch`
//!
//! The batch schema is resolved once; each row is then read cell by cell into
//! a raw record and normalized with the same per-cell degradation as JSON
//! input.

use crate::error::Result;
use crate::models::VitalsSnapshot;
use crate::normalize::{Normalizer, RawRecord};
use crate::schema::{Column, ColumnMapping};
use crate::utils::arrow_utils::arrow_cell_to_json;
use arrow::record_batch::RecordBatch;
use log::info;

/// Normalize every row of a batch
pub fn snapshots_from_batch(batch: &RecordBatch) -> Result<Vec<VitalsSnapshot>> {
    let schema = batch.schema();
    let mapping = ColumnMapping::resolve(schema.fields().iter().map(|field| field.name().as_str()))?;

    // (source column name, column index) for every mapped column
    let columns: Vec<(&str, usize)> = Column::ALL
        .into_iter()
        .filter_map(|column| mapping.source_name(column))
        .filter_map(|name| schema.index_of(name).ok().map(|idx| (name, idx)))
        .collect();

    let normalizer = Normalizer::new(mapping.clone());
    let snapshots = (0..batch.num_rows())
        .map(|row| {
            let record: RawRecord = columns
                .iter()
                .map(|(name, idx)| (*name, arrow_cell_to_json(batch.column(*idx), row)))
                .collect();
            normalizer.normalize(&record)
        })
        .collect::<Vec<_>>();

    Ok(snapshots)
}

/// Normalize every row of several batches, preserving order
pub fn snapshots_from_batches(batches: &[RecordBatch]) -> Result<Vec<VitalsSnapshot>> {
    let mut snapshots = Vec::with_capacity(batches.iter().map(RecordBatch::num_rows).sum());
    for batch in batches {
        snapshots.extend(snapshots_from_batch(batch)?);
    }
    info!(
        "Normalized {} vitals rows from {} record batches",
        snapshots.len(),
        batches.len()
    );
    Ok(snapshots)
}
