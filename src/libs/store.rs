//! The reference tables, loaded once and shared read-only by every query.

use crate::libs::error::StoreError;
use crate::libs::genes::{GeneRecord, GeneTable};
use crate::libs::loops::LoopRecord;
use crate::libs::schema::Selection;
use indexmap::IndexSet;
use std::path::Path;

#[derive(Debug)]
pub struct ReferenceStore {
    genes: GeneTable,
    loops: Vec<LoopRecord>,
}

impl ReferenceStore {
    /// Loads both tables. Either one missing is a configuration error.
    pub fn open<P: AsRef<Path>>(genes_path: P, loops_path: P) -> Result<Self, StoreError> {
        let genes_path = genes_path.as_ref();
        let loops_path = loops_path.as_ref();
        for path in [genes_path, loops_path] {
            if !path.is_file() {
                return Err(StoreError::MissingTable(path.to_path_buf()));
            }
        }

        let genes = read_table(genes_path, GeneRecord::from_fields)?;
        let loops = read_table(loops_path, LoopRecord::from_fields)?;
        tracing::info!(
            genes = genes.len(),
            loops = loops.len(),
            "reference tables loaded"
        );

        Ok(Self::from_records(genes, loops))
    }

    pub fn from_records(genes: Vec<GeneRecord>, loops: Vec<LoopRecord>) -> Self {
        Self {
            genes: GeneTable::from_records(genes),
            loops,
        }
    }

    pub fn genes(&self) -> &GeneTable {
        &self.genes
    }

    pub fn loops(&self) -> &[LoopRecord] {
        &self.loops
    }

    /// Loops of one cohort/resolution partition, in table order.
    ///
    /// The pooled merged-10kb view drops exact duplicate rows. Rows that
    /// differ only in their subtype tag are distinct and both kept.
    pub fn partition(&self, selection: &Selection) -> Vec<&LoopRecord> {
        let rows = self.loops.iter().filter(|lp| selection.includes(lp.subtype));

        let rows: Vec<&LoopRecord> = if selection.is_pooled() {
            rows.collect::<IndexSet<_>>().into_iter().collect()
        } else {
            rows.collect()
        };
        tracing::debug!(tag = %selection.tag, rows = rows.len(), "partition selected");

        rows
    }
}

/// Tab-separated table with a header line. Line numbers in errors are 1-based
/// file lines.
fn read_table<T, F>(path: &Path, parse: F) -> Result<Vec<T>, StoreError>
where
    F: Fn(&[&str]) -> Result<T, String>,
{
    let input = path.to_string_lossy();
    let mut rdr = csv::ReaderBuilder::new()
        .delimiter(b'\t')
        .has_headers(true)
        .flexible(true)
        .quoting(false)
        .from_reader(crate::reader(&input)?);

    let mut rows = vec![];
    for result in rdr.records() {
        let record = result?;
        let line = record.position().map(|p| p.line() as usize).unwrap_or(0);
        let fields: Vec<&str> = record.iter().collect();
        if fields.iter().all(|f| f.trim().is_empty()) {
            continue;
        }
        let row = parse(&fields).map_err(|message| StoreError::Malformed {
            path: path.to_path_buf(),
            line,
            message,
        })?;
        rows.push(row);
    }

    Ok(rows)
}
