use std::collections::HashMap;
use std::fmt;

/// Display-only thick region injected into every gene row of the full track.
pub const THICK_START: i64 = 1000;
pub const THICK_END: i64 = 2000;

/// Item colour given to highlighted genes.
pub const HIGHLIGHT_RGB: &str = "255,0,0";

/// A protein-coding gene, one row of the annotation table.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GeneRecord {
    pub chrom: String,
    pub start: i64,
    pub end: i64,
    pub symbol: String,
    pub score: String,
    pub strand: String,
    pub color: String,
}

impl GeneRecord {
    pub fn from_fields(fields: &[&str]) -> Result<Self, String> {
        if fields.len() < 7 {
            return Err(format!("expected 7 columns, found {}", fields.len()));
        }
        let coord = |s: &str| {
            s.trim()
                .parse::<i64>()
                .map_err(|_| format!("invalid coordinate {:?}", s))
        };

        Ok(Self {
            chrom: fields[0].to_string(),
            start: coord(fields[1])?,
            end: coord(fields[2])?,
            symbol: fields[3].to_string(),
            score: fields[4].to_string(),
            strand: fields[5].to_string(),
            color: fields[6].to_string(),
        })
    }

    /// BED6 line of the gene.
    ///
    /// ```
    /// # use crelink::libs::genes::GeneRecord;
    /// let gene = GeneRecord::from_fields(&["chr12", "25205246", "25250929", "KRAS", "0", "-", "0,0,255"]).unwrap();
    /// assert_eq!(gene.to_bed6(), "chr12\t25205246\t25250929\tKRAS\t0\t-");
    /// ```
    pub fn to_bed6(&self) -> String {
        format!(
            "{}\t{}\t{}\t{}\t{}\t{}",
            self.chrom, self.start, self.end, self.symbol, self.score, self.strand
        )
    }

    /// BED9 line with the injected thick region and an optional colour override.
    ///
    /// ```
    /// # use crelink::libs::genes::GeneRecord;
    /// let gene = GeneRecord::from_fields(&["chr12", "100", "200", "KRAS", "0", "-", "0,0,255"]).unwrap();
    /// assert_eq!(gene.to_bed9(None), "chr12\t100\t200\tKRAS\t0\t-\t1000\t2000\t0,0,255");
    /// assert_eq!(gene.to_bed9(Some("255,0,0")), "chr12\t100\t200\tKRAS\t0\t-\t1000\t2000\t255,0,0");
    /// ```
    pub fn to_bed9(&self, color: Option<&str>) -> String {
        format!(
            "{}\t{}\t{}\t{}\t{}\t{}\t{}\t{}\t{}",
            self.chrom,
            self.start,
            self.end,
            self.symbol,
            self.score,
            self.strand,
            THICK_START,
            THICK_END,
            color.unwrap_or(&self.color)
        )
    }
}

impl fmt::Display for GeneRecord {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "{}", self.to_bed6())
    }
}

/// Gene rows in file order plus a symbol index.
#[derive(Debug, Default)]
pub struct GeneTable {
    records: Vec<GeneRecord>,
    index: HashMap<String, usize>,
}

impl GeneTable {
    /// Later rows with an already-seen symbol are kept for display but the
    /// lookup resolves to the first one.
    pub fn from_records(records: Vec<GeneRecord>) -> Self {
        let mut index = HashMap::with_capacity(records.len());
        for (i, rec) in records.iter().enumerate() {
            if index.contains_key(&rec.symbol) {
                tracing::warn!(symbol = %rec.symbol, "duplicate gene symbol, keeping first row");
                continue;
            }
            index.insert(rec.symbol.clone(), i);
        }

        Self { records, index }
    }

    pub fn records(&self) -> &[GeneRecord] {
        &self.records
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    pub fn get(&self, symbol: &str) -> Option<&GeneRecord> {
        self.index.get(symbol).map(|&i| &self.records[i])
    }

    pub fn contains(&self, symbol: &str) -> bool {
        self.index.contains_key(symbol)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn gene(symbol: &str, start: i64) -> GeneRecord {
        GeneRecord::from_fields(&["chr1", &start.to_string(), &(start + 100).to_string(), symbol, "0", "+", "0,0,0"])
            .unwrap()
    }

    #[test]
    fn lookup_by_symbol() {
        let table = GeneTable::from_records(vec![gene("A", 10), gene("B", 20), gene("A", 30)]);
        assert_eq!(table.len(), 3);
        assert!(table.contains("B"));
        assert!(!table.contains("b"));
        assert_eq!(table.get("A").unwrap().start, 10);
    }

    #[test]
    fn reject_short_rows() {
        assert!(GeneRecord::from_fields(&["chr1", "1", "2", "A"]).is_err());
        assert!(GeneRecord::from_fields(&["chr1", "x", "2", "A", "0", "+", "0,0,0"]).is_err());
    }
}
