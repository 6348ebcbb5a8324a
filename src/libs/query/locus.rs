use crate::libs::error::ValidationError;
use crate::libs::loops::{Anchor, Link, LoopRecord};
use crate::libs::region::GenomicWindow;
use crate::libs::schema::{PromoterMode, Selection};
use crate::libs::store::ReferenceStore;
use indexmap::{IndexMap, IndexSet};
use itertools::Itertools;
use lazy_static::lazy_static;
use regex::Regex;
use serde::Serialize;
use std::collections::BTreeSet;

/// Widest locus accepted, in bp.
pub const MAX_SPAN: i64 = 1_000_000;

lazy_static! {
    static ref RE_REGION: Regex =
        Regex::new(r"^\s*(?i:chr)?([0-9A-Za-z]+)\s*:\s*([^-\s]+)\s*-\s*(\S+)\s*$").unwrap();
}

//----------------------------
// LocusRequest
//----------------------------
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LocusRequest {
    pub selection: Selection,
    /// Chromosome as named in the loop table, without a `chr` prefix.
    pub chrom: String,
    pub start: i64,
    pub end: i64,
    pub mode: PromoterMode,
}

impl LocusRequest {
    /// Validates raw user input. Thousands separators are accepted.
    ///
    /// ```
    /// # use crelink::libs::query::LocusRequest;
    /// # use crelink::libs::schema::{Cohort, PromoterMode, Resolution, Selection};
    /// let sel = Selection::new(Cohort::Merged, Resolution::TenKb).unwrap();
    /// let req = LocusRequest::new(sel, "chr1", "1,000,000", "1500000", PromoterMode::All).unwrap();
    /// assert_eq!(req.chrom, "1");
    /// assert_eq!(req.start, 1_000_000);
    /// assert!(LocusRequest::new(sel, "1", "0", "1000001", PromoterMode::All).is_err());
    /// ```
    pub fn new(
        selection: Selection,
        chrom: &str,
        start: &str,
        end: &str,
        mode: PromoterMode,
    ) -> Result<Self, ValidationError> {
        let chrom = normalize_chrom(chrom)?;
        let start = parse_position(start)?;
        let end = parse_position(end)?;

        if start >= end {
            return Err(ValidationError::StartNotBeforeEnd);
        }
        if end - start > MAX_SPAN {
            return Err(ValidationError::RangeTooLarge);
        }

        Ok(Self {
            selection,
            chrom,
            start,
            end,
            mode,
        })
    }

    /// Parses `chr1:1,000,000-1,500,000`.
    pub fn from_region(selection: Selection, region: &str, mode: PromoterMode) -> Result<Self, ValidationError> {
        let caps = RE_REGION
            .captures(region)
            .ok_or_else(|| ValidationError::MalformedRegion(region.to_string()))?;
        Self::new(selection, &caps[1], &caps[2], &caps[3], mode)
    }

    /// `<chr>_<start>_<end>_<cohort>_<res>_<allTX|canonTX>_enhancer_results.csv`
    pub fn export_name(&self) -> String {
        format!(
            "{}_{}_{}_{}_{}_{}_enhancer_results.csv",
            self.chrom,
            self.start,
            self.end,
            self.selection.cohort.label(),
            self.selection.resolution,
            self.mode.tag()
        )
    }
}

/// Accepts `1`..`22`, `X`, `Y`, with or without a `chr` prefix.
fn normalize_chrom(s: &str) -> Result<String, ValidationError> {
    let trimmed = s.trim();
    // byte slicing is only safe once the prefix is known to be ASCII
    let bare = match trimmed.get(..3) {
        Some(prefix) if trimmed.len() > 3 && prefix.eq_ignore_ascii_case("chr") => &trimmed[3..],
        _ => trimmed,
    };
    let bare = bare.to_ascii_uppercase();

    let valid = match bare.as_str() {
        "X" | "Y" => true,
        n => {
            n.bytes().all(|b| b.is_ascii_digit())
                && !n.starts_with('0')
                && matches!(n.parse::<u8>(), Ok(1..=22))
        }
    };
    if valid {
        Ok(bare)
    } else {
        Err(ValidationError::UnknownChromosome(s.to_string()))
    }
}

fn parse_position(s: &str) -> Result<i64, ValidationError> {
    let digits: String = s.trim().chars().filter(|c| *c != ',' && *c != '_').collect();
    if digits.is_empty() || !digits.chars().all(|c| c.is_ascii_digit()) {
        return Err(ValidationError::NonNumeric);
    }
    digits.parse::<i64>().map_err(|_| ValidationError::NonNumeric)
}

//----------------------------
// Matching
//----------------------------
/// Every loop touching the locus, split into two disjoint groups.
#[derive(Debug, Clone, Default)]
pub struct LocusPartition {
    /// CRE-annotated with an assigned target gene.
    pub cre_linked: Vec<LoopRecord>,
    /// Everything else that matched.
    pub other: Vec<LoopRecord>,
}

impl LocusPartition {
    pub fn len(&self) -> usize {
        self.cre_linked.len() + self.other.len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

pub fn match_locus(store: &ReferenceStore, req: &LocusRequest) -> LocusPartition {
    let (cre_linked, other): (Vec<LoopRecord>, Vec<LoopRecord>) = store
        .partition(&req.selection)
        .into_iter()
        .filter(|lp| lp.touches(&req.chrom, req.start, req.end))
        .cloned()
        .partition(|lp| lp.is_cre_linked(req.mode));

    LocusPartition { cre_linked, other }
}

//----------------------------
// Results
//----------------------------
/// A distinct CRE anchor and every gene it was linked to.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Enhancer {
    pub region: Anchor,
    /// Sorted, deduplicated.
    pub genes: Vec<String>,
}

impl Enhancer {
    pub fn describe(&self) -> String {
        format!("CRE on {} regulates: {}", self.region, self.genes.join(", "))
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct EnhancerExportRow {
    pub chr: String,
    pub start: i64,
    pub end: i64,
    pub target: String,
}

#[derive(Debug, Clone)]
pub struct LocusMatches {
    pub partition: LocusPartition,
    pub enhancers: Vec<Enhancer>,
    /// Links of the CRE-linked loops, CRE side first.
    pub links: Vec<Link>,
    /// Other loops collapsed to orientation-free anchor pairs.
    pub other_pairs: Vec<(String, String)>,
}

impl LocusMatches {
    pub fn rows(&self) -> Vec<EnhancerExportRow> {
        self.enhancers
            .iter()
            .map(|e| EnhancerExportRow {
                chr: e.region.chrom.clone(),
                start: e.region.start,
                end: e.region.end,
                target: e.genes.join(", "),
            })
            .collect()
    }

    /// Union of the genes regulated by any enhancer found.
    pub fn regulated_genes(&self) -> BTreeSet<String> {
        self.enhancers
            .iter()
            .flat_map(|e| e.genes.iter().cloned())
            .collect()
    }

    pub fn window(&self) -> Option<GenomicWindow> {
        GenomicWindow::from_links(&self.links)
    }
}

#[derive(Debug, Clone)]
pub enum LocusOutcome {
    NoPredictedEnhancers,
    Found(LocusMatches),
}

impl LocusOutcome {
    pub const NO_ENHANCERS: &'static str = "No predicted enhancers were found for this location";
}

pub fn query_locus(store: &ReferenceStore, req: &LocusRequest) -> LocusOutcome {
    let partition = match_locus(store, req);
    tracing::info!(
        locus = %format!("{}:{}-{}", req.chrom, req.start, req.end),
        cre_linked = partition.cre_linked.len(),
        other = partition.other.len(),
        "locus query"
    );

    if partition.cre_linked.is_empty() {
        return LocusOutcome::NoPredictedEnhancers;
    }

    // region -> genes, first-seen region order
    let mut genes_of: IndexMap<&Anchor, BTreeSet<&str>> = IndexMap::new();
    let mut links: IndexSet<Link> = IndexSet::new();
    for lp in &partition.cre_linked {
        genes_of
            .entry(&lp.anchor_a)
            .or_default()
            .extend(lp.target_genes(req.mode));
        links.insert(Link::new(&lp.anchor_a, &lp.anchor_b));
    }
    let enhancers = genes_of
        .into_iter()
        .map(|(region, genes)| Enhancer {
            region: region.clone(),
            genes: genes.into_iter().map(str::to_string).collect(),
        })
        .collect();

    let other_pairs = partition
        .other
        .iter()
        .map(|lp| lp.canonical_pair())
        .unique()
        .collect();

    LocusOutcome::Found(LocusMatches {
        enhancers,
        links: links.into_iter().collect(),
        other_pairs,
        partition,
    })
}
