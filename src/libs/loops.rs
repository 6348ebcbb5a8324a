use crate::libs::schema::{column, PromoterMode, SubtypeTag, CRE_TYPE, NO_TARGET};
use std::fmt;
use std::str::FromStr;

//----------------------------
// Anchor
//----------------------------
/// One side of a loop. Coordinates are kept signed so that padded windows
/// derived from them may run past the chromosome start.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Anchor {
    pub chrom: String,
    pub start: i64,
    pub end: i64,
}

impl Anchor {
    pub fn new(chrom: &str, start: i64, end: i64) -> Self {
        Self {
            chrom: chrom.to_string(),
            start,
            end,
        }
    }

    /// Whole-interval containment, both endpoints inclusive.
    ///
    /// ```
    /// # use crelink::libs::loops::Anchor;
    /// let anchor = Anchor::new("1", 100, 200);
    /// assert!(anchor.is_within("1", 100, 200));
    /// assert!(!anchor.is_within("1", 150, 300));
    /// assert!(!anchor.is_within("2", 0, 1000));
    /// ```
    pub fn is_within(&self, chrom: &str, start: i64, end: i64) -> bool {
        self.chrom == chrom && self.start >= start && self.end <= end
    }

    /// `chr`-prefixed form, as used in region strings and signal lookups.
    pub fn ucsc_chrom(&self) -> String {
        ucsc_chrom(&self.chrom)
    }
}

impl fmt::Display for Anchor {
    /// ```
    /// # use crelink::libs::loops::Anchor;
    /// assert_eq!(Anchor::new("X", 10, 20).to_string(), "X:10-20");
    /// ```
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "{}:{}-{}", self.chrom, self.start, self.end)
    }
}

/// ```
/// # use crelink::libs::loops::ucsc_chrom;
/// assert_eq!(ucsc_chrom("7"), "chr7");
/// assert_eq!(ucsc_chrom("chr7"), "chr7");
/// ```
pub fn ucsc_chrom(chrom: &str) -> String {
    if chrom.starts_with("chr") {
        chrom.to_string()
    } else {
        format!("chr{}", chrom)
    }
}

//----------------------------
// LoopRecord
//----------------------------
#[derive(Debug, Clone, PartialEq, Eq, Hash, Default)]
pub struct PerMode {
    pub all: String,
    pub canonical: String,
}

impl PerMode {
    pub fn get(&self, mode: PromoterMode) -> &str {
        match mode {
            PromoterMode::All => &self.all,
            PromoterMode::Canonical => &self.canonical,
        }
    }
}

/// A row of the loop table.
///
/// Equality and hashing cover every field, so deduplication is always on the
/// full tuple.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct LoopRecord {
    pub anchor_a: Anchor,
    pub anchor_b: Anchor,
    pub annotation: PerMode,
    pub targets: PerMode,
    pub subtype: SubtypeTag,
}

impl LoopRecord {
    pub fn annotation_type(&self, mode: PromoterMode) -> &str {
        self.annotation.get(mode)
    }

    pub fn target_field(&self, mode: PromoterMode) -> &str {
        self.targets.get(mode)
    }

    /// Gene symbols of the target field. The sentinel yields nothing.
    pub fn target_genes(&self, mode: PromoterMode) -> impl Iterator<Item = &str> {
        let field = self.target_field(mode);
        let field = if field == NO_TARGET { "" } else { field };
        field.split(',').map(str::trim).filter(|g| !g.is_empty())
    }

    /// Exact token match, never a substring match.
    ///
    /// ```
    /// # use crelink::libs::loops::LoopRecord;
    /// # use crelink::libs::schema::PromoterMode;
    /// # use std::str::FromStr;
    /// let lp = LoopRecord::from_str("1\t100\t200\t1\t900\t1000\tCRE\tCRE\tKRAS\tKRAS2,MYC\tmerged_10k").unwrap();
    /// assert!(lp.targets_gene(PromoterMode::All, "MYC"));
    /// assert!(!lp.targets_gene(PromoterMode::All, "KRAS"));
    /// assert!(lp.targets_gene(PromoterMode::Canonical, "KRAS"));
    /// ```
    pub fn targets_gene(&self, mode: PromoterMode, symbol: &str) -> bool {
        self.target_genes(mode).any(|g| g == symbol)
    }

    pub fn has_assigned_target(&self, mode: PromoterMode) -> bool {
        self.target_field(mode) != NO_TARGET
    }

    /// A regulatory anchor with at least one assigned gene.
    pub fn is_cre_linked(&self, mode: PromoterMode) -> bool {
        self.annotation_type(mode) == CRE_TYPE && self.has_assigned_target(mode)
    }

    /// Either anchor lies entirely inside `chrom:start-end`.
    pub fn touches(&self, chrom: &str, start: i64, end: i64) -> bool {
        self.anchor_a.is_within(chrom, start, end) || self.anchor_b.is_within(chrom, start, end)
    }

    /// Orientation-free identity of the interaction: both anchor labels,
    /// lexicographically ordered.
    pub fn canonical_pair(&self) -> (String, String) {
        canonical_pair(&self.anchor_a, &self.anchor_b)
    }

    pub fn from_fields(fields: &[&str]) -> Result<Self, String> {
        if fields.len() < column::COUNT {
            return Err(format!(
                "expected {} columns, found {}",
                column::COUNT,
                fields.len()
            ));
        }

        let anchor_a = Anchor {
            chrom: fields[column::CHROM_A].to_string(),
            start: parse_coordinate(fields[column::START_A])?,
            end: parse_coordinate(fields[column::END_A])?,
        };
        let anchor_b = Anchor {
            chrom: fields[column::CHROM_B].to_string(),
            start: parse_coordinate(fields[column::START_B])?,
            end: parse_coordinate(fields[column::END_B])?,
        };
        for anchor in [&anchor_a, &anchor_b] {
            if anchor.start >= anchor.end {
                return Err(format!("empty anchor interval {}", anchor));
            }
        }

        let subtype = SubtypeTag::from_str(fields[column::LOOP_SOURCE]).map_err(|e| e.to_string())?;

        Ok(Self {
            anchor_a,
            anchor_b,
            annotation: PerMode {
                all: fields[column::TYPE_ALL].to_string(),
                canonical: fields[column::TYPE_CANONICAL].to_string(),
            },
            targets: PerMode {
                all: fields[column::TARGETS_ALL].to_string(),
                canonical: fields[column::TARGETS_CANONICAL].to_string(),
            },
            subtype,
        })
    }
}

impl FromStr for LoopRecord {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let fields: Vec<&str> = s.trim_end_matches(['\r', '\n']).split('\t').collect();
        Self::from_fields(&fields).map_err(|e| anyhow::anyhow!("Invalid loop line: {}", e))
    }
}

//----------------------------
// Link
//----------------------------
/// A matched loop oriented for display: `anchor` is the side the result is
/// reported on, `inter` its interacting partner.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Link {
    pub anchor: Anchor,
    pub inter: Anchor,
}

impl Link {
    pub fn new(anchor: &Anchor, inter: &Anchor) -> Self {
        Self {
            anchor: anchor.clone(),
            inter: inter.clone(),
        }
    }

    /// Seven-column links record with a constant weight.
    ///
    /// ```
    /// # use crelink::libs::loops::{Anchor, Link};
    /// let link = Link::new(&Anchor::new("12", 100, 200), &Anchor::new("12", 900, 1000));
    /// assert_eq!(link.to_links_line(), "12\t100\t200\t12\t900\t1000\t1.0");
    /// ```
    pub fn to_links_line(&self) -> String {
        format!(
            "{}\t{}\t{}\t{}\t{}\t{}\t1.0",
            self.anchor.chrom,
            self.anchor.start,
            self.anchor.end,
            self.inter.chrom,
            self.inter.start,
            self.inter.end
        )
    }
}

/// ```
/// # use crelink::libs::loops::{canonical_pair, Anchor};
/// let a = Anchor::new("1", 500, 600);
/// let b = Anchor::new("1", 100, 200);
/// assert_eq!(canonical_pair(&a, &b), canonical_pair(&b, &a));
/// assert_eq!(canonical_pair(&a, &b).0, "1:100-200");
/// ```
pub fn canonical_pair(a: &Anchor, b: &Anchor) -> (String, String) {
    let (a, b) = (a.to_string(), b.to_string());
    if a <= b {
        (a, b)
    } else {
        (b, a)
    }
}

/// Integer coordinates, tolerating the `1000.0` form of float-typed exports.
fn parse_coordinate(s: &str) -> Result<i64, String> {
    let s = s.trim();
    if let Ok(v) = s.parse::<i64>() {
        return Ok(v);
    }
    match s.parse::<f64>() {
        Ok(v) if v.is_finite() && v.fract() == 0.0 => Ok(v as i64),
        _ => Err(format!("invalid coordinate {:?}", s)),
    }
}
