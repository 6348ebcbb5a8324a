use crate::libs::error::ValidationError;
use crate::libs::loops::{Anchor, Link};
use crate::libs::region::GenomicWindow;
use crate::libs::schema::{PromoterMode, Selection};
use crate::libs::store::ReferenceStore;
use indexmap::IndexSet;
use serde::Serialize;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GeneRequest {
    pub selection: Selection,
    pub symbol: String,
    pub mode: PromoterMode,
}

impl GeneRequest {
    /// Symbols are trimmed and upper-cased before lookup.
    pub fn new(selection: Selection, symbol: &str, mode: PromoterMode) -> Result<Self, ValidationError> {
        let symbol = symbol.trim().to_uppercase();
        if symbol.is_empty() {
            return Err(ValidationError::EmptySymbol);
        }
        Ok(Self {
            selection,
            symbol,
            mode,
        })
    }

    /// `<GENE>_<allTX|canonTX>_<res>_<tag>_enhancer_results.csv`
    pub fn export_name(&self) -> String {
        format!(
            "{}_{}_{}_{}_enhancer_results.csv",
            self.symbol,
            self.mode.tag(),
            self.selection.resolution,
            self.selection.tag
        )
    }
}

/// One line of the gene export: promoter-side anchor, then the regulatory
/// anchor it loops to.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct GeneExportRow {
    pub chr: String,
    pub start: i64,
    pub end: i64,
    #[serde(rename = "interChr")]
    pub inter_chr: String,
    #[serde(rename = "interStart")]
    pub inter_start: i64,
    #[serde(rename = "interEnd")]
    pub inter_end: i64,
    pub target: String,
}

#[derive(Debug, Clone)]
pub struct GeneMatches {
    pub symbol: String,
    /// Distinct regulatory-side anchors, first-seen order.
    pub regions: Vec<Anchor>,
    /// Distinct matched loops, promoter side first.
    pub links: Vec<Link>,
}

impl GeneMatches {
    pub fn rows(&self) -> Vec<GeneExportRow> {
        self.links
            .iter()
            .map(|l| GeneExportRow {
                chr: l.anchor.chrom.clone(),
                start: l.anchor.start,
                end: l.anchor.end,
                inter_chr: l.inter.chrom.clone(),
                inter_start: l.inter.start,
                inter_end: l.inter.end,
                target: self.symbol.clone(),
            })
            .collect()
    }

    /// `chr`-prefixed labels of [`Self::regions`].
    pub fn region_labels(&self) -> Vec<String> {
        self.regions
            .iter()
            .map(|a| format!("{}:{}-{}", a.ucsc_chrom(), a.start, a.end))
            .collect()
    }

    pub fn window(&self) -> Option<GenomicWindow> {
        GenomicWindow::from_links(&self.links)
    }
}

#[derive(Debug, Clone)]
pub enum GeneOutcome {
    GeneNotFound,
    NoRegulatoryElements,
    Found(GeneMatches),
}

impl GeneOutcome {
    pub fn message(&self) -> &'static str {
        match self {
            GeneOutcome::GeneNotFound => "No protein coding genes with the given name were found.",
            GeneOutcome::NoRegulatoryElements => "No regulatory elements were identified for this gene",
            GeneOutcome::Found(_) => {
                "Putative enhancers for this gene were found in the following regions:"
            }
        }
    }
}

/// Loops whose target list, under the request's promoter mode, names the gene.
pub fn query_gene(store: &ReferenceStore, req: &GeneRequest) -> GeneOutcome {
    if !store.genes().contains(&req.symbol) {
        return GeneOutcome::GeneNotFound;
    }

    let mut regions: IndexSet<Anchor> = IndexSet::new();
    let mut links: IndexSet<Link> = IndexSet::new();
    for lp in store.partition(&req.selection) {
        if !lp.targets_gene(req.mode, &req.symbol) {
            continue;
        }
        regions.insert(lp.anchor_a.clone());
        links.insert(Link::new(&lp.anchor_b, &lp.anchor_a));
    }
    tracing::info!(gene = %req.symbol, loops = links.len(), regions = regions.len(), "gene query");

    if links.is_empty() {
        return GeneOutcome::NoRegulatoryElements;
    }

    GeneOutcome::Found(GeneMatches {
        symbol: req.symbol.clone(),
        regions: regions.into_iter().collect(),
        links: links.into_iter().collect(),
    })
}
