//! Per-window signal segments for the epigenetic layers.

use crate::libs::loops::ucsc_chrom;
use std::io::{BufRead, Write};
use std::path::{Path, PathBuf};

#[derive(Debug, Clone, PartialEq)]
pub struct SignalInterval {
    pub start: i64,
    pub end: i64,
    pub value: f64,
}

/// Anything that can hand out the signal intervals overlapping a window.
pub trait SignalSource {
    fn intervals(&self, chrom: &str, start: i64, end: i64) -> anyhow::Result<Vec<SignalInterval>>;
}

/// A bedGraph file, plain or gzipped, scanned on every lookup.
#[derive(Debug, Clone)]
pub struct BedGraphSource {
    path: PathBuf,
}

impl BedGraphSource {
    pub fn new<P: AsRef<Path>>(path: P) -> Self {
        Self {
            path: path.as_ref().to_path_buf(),
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn exists(&self) -> bool {
        self.path.is_file()
    }
}

impl SignalSource for BedGraphSource {
    /// Chromosome names match with or without a `chr` prefix.
    fn intervals(&self, chrom: &str, start: i64, end: i64) -> anyhow::Result<Vec<SignalInterval>> {
        let wanted = ucsc_chrom(chrom);
        let reader = crate::reader(&self.path.to_string_lossy())?;

        let mut out = vec![];
        for line in reader.lines() {
            let line = line?;
            if line.is_empty()
                || line.starts_with('#')
                || line.starts_with("track")
                || line.starts_with("browser")
            {
                continue;
            }
            let fields: Vec<&str> = line.split('\t').collect();
            if fields.len() < 4 {
                anyhow::bail!("Invalid bedGraph line in {}: {}", self.path.display(), line);
            }
            if ucsc_chrom(fields[0]) != wanted {
                continue;
            }

            let iv = SignalInterval {
                start: fields[1].parse()?,
                end: fields[2].parse()?,
                value: fields[3].trim().parse()?,
            };
            if iv.end > start && iv.start < end {
                out.push(iv);
            }
        }

        Ok(out)
    }
}

/// Writes intervals as a four-column bedGraph under `chrom`.
pub fn write_bedgraph<W: Write>(writer: &mut W, chrom: &str, intervals: &[SignalInterval]) -> std::io::Result<()> {
    for iv in intervals {
        writeln!(writer, "{}\t{}\t{}\t{}", chrom, iv.start, iv.end, iv.value)?;
    }
    Ok(())
}
