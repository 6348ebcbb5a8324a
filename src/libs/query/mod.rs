//! Gene-centric and locus-centric lookups over the loop table.

pub mod gene;
pub mod locus;

pub use gene::{query_gene, GeneMatches, GeneOutcome, GeneRequest};
pub use locus::{match_locus, query_locus, LocusMatches, LocusOutcome, LocusPartition, LocusRequest};
