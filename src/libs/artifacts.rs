//! Files handed to the renderer and the tabular exports.

use crate::libs::genes::{GeneRecord, GeneTable, HIGHLIGHT_RGB};
use crate::libs::loops::Link;
use crate::libs::signal::{write_bedgraph, SignalInterval};
use anyhow::Context;
use serde::Serialize;
use std::collections::BTreeSet;
use std::io::Write;
use std::path::{Path, PathBuf};

/// Deterministic names for one query's files: `<dir>/<prefix>_<suffix>`.
#[derive(Debug, Clone)]
pub struct Artifacts {
    dir: PathBuf,
    prefix: String,
}

impl Artifacts {
    pub fn new<P: AsRef<Path>>(dir: P, prefix: &str) -> Self {
        Self {
            dir: dir.as_ref().to_path_buf(),
            prefix: prefix.to_string(),
        }
    }

    pub fn path(&self, suffix: &str) -> PathBuf {
        self.dir.join(format!("{}_{}", self.prefix, suffix))
    }

    pub fn links(&self) -> PathBuf {
        self.path("links.tab")
    }

    pub fn target_gene(&self) -> PathBuf {
        self.path("target_gene.bed")
    }

    pub fn genes(&self) -> PathBuf {
        self.path("genes.bed")
    }

    pub fn signal(&self, name: &str) -> PathBuf {
        self.path(&format!("{}.bedGraph", name))
    }

    pub fn tracks(&self) -> PathBuf {
        self.path("tracks.ini")
    }

    pub fn image(&self) -> PathBuf {
        self.path("genome_track.png")
    }
}

fn create(path: &Path) -> anyhow::Result<Box<dyn Write>> {
    crate::writer(&path.to_string_lossy()).with_context(|| format!("Failed to create {}", path.display()))
}

/// Comma-separated export with a header row taken from the field names.
pub fn write_csv<T: Serialize>(path: &Path, rows: &[T]) -> anyhow::Result<()> {
    let mut wtr = csv::Writer::from_writer(create(path)?);
    for row in rows {
        wtr.serialize(row)?;
    }
    wtr.flush()?;
    tracing::info!(path = %path.display(), rows = rows.len(), "export written");
    Ok(())
}

pub fn write_links(path: &Path, links: &[Link]) -> anyhow::Result<()> {
    let mut writer = create(path)?;
    for link in links {
        writeln!(writer, "{}", link.to_links_line())?;
    }
    writer.flush()?;
    Ok(())
}

pub fn write_target_gene(path: &Path, gene: &GeneRecord) -> anyhow::Result<()> {
    let mut writer = create(path)?;
    writeln!(writer, "{}", gene.to_bed6())?;
    writer.flush()?;
    Ok(())
}

/// Every gene as BED9, in table order. Symbols in `highlight` are recoloured.
pub fn write_genes(path: &Path, genes: &GeneTable, highlight: &BTreeSet<String>) -> anyhow::Result<()> {
    let mut writer = create(path)?;
    for gene in genes.records() {
        let color = highlight.contains(&gene.symbol).then_some(HIGHLIGHT_RGB);
        writeln!(writer, "{}", gene.to_bed9(color))?;
    }
    writer.flush()?;
    Ok(())
}

pub fn write_signal(path: &Path, chrom: &str, intervals: &[SignalInterval]) -> anyhow::Result<()> {
    let mut writer = create(path)?;
    write_bedgraph(&mut writer, chrom, intervals)?;
    writer.flush()?;
    Ok(())
}
