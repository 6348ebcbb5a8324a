//! Selectors and the named column layout of the loop table.

use crate::libs::error::{StoreError, ValidationError};
use std::fmt;
use std::str::FromStr;

//----------------------------
// Loop table columns
//----------------------------
/// Column positions of the loop table.
///
/// Regulatory annotations exist twice, once computed against all transcripts
/// and once against canonical transcripts only. The two promoter modes never
/// read each other's columns.
pub mod column {
    pub const CHROM_A: usize = 0;
    pub const START_A: usize = 1;
    pub const END_A: usize = 2;
    pub const CHROM_B: usize = 3;
    pub const START_B: usize = 4;
    pub const END_B: usize = 5;
    pub const TYPE_CANONICAL: usize = 6;
    pub const TYPE_ALL: usize = 7;
    pub const TARGETS_CANONICAL: usize = 8;
    pub const TARGETS_ALL: usize = 9;
    pub const LOOP_SOURCE: usize = 10;

    pub const COUNT: usize = 11;
}

/// Value of the annotation column for anchors classified as regulatory.
pub const CRE_TYPE: &str = "CRE";

/// Value of the target column for anchors without an assigned gene.
pub const NO_TARGET: &str = "no";

//----------------------------
// PromoterMode
//----------------------------
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PromoterMode {
    All,
    Canonical,
}

impl PromoterMode {
    /// ```
    /// # use crelink::libs::schema::{column, PromoterMode};
    /// assert_eq!(PromoterMode::All.type_column(), column::TYPE_ALL);
    /// assert_eq!(PromoterMode::Canonical.targets_column(), column::TARGETS_CANONICAL);
    /// ```
    pub fn type_column(&self) -> usize {
        match self {
            PromoterMode::All => column::TYPE_ALL,
            PromoterMode::Canonical => column::TYPE_CANONICAL,
        }
    }

    pub fn targets_column(&self) -> usize {
        match self {
            PromoterMode::All => column::TARGETS_ALL,
            PromoterMode::Canonical => column::TARGETS_CANONICAL,
        }
    }

    /// Short tag used in export file names.
    pub fn tag(&self) -> &'static str {
        match self {
            PromoterMode::All => "allTX",
            PromoterMode::Canonical => "canonTX",
        }
    }
}

impl FromStr for PromoterMode {
    type Err = ValidationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "all" | "alltx" => Ok(PromoterMode::All),
            "canonical" | "canon" | "canontx" => Ok(PromoterMode::Canonical),
            _ => Err(ValidationError::UnknownPromoterMode(s.to_string())),
        }
    }
}

//----------------------------
// Resolution
//----------------------------
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Resolution {
    OneKb,
    TenKb,
}

impl Resolution {
    pub fn as_str(&self) -> &'static str {
        match self {
            Resolution::OneKb => "1k",
            Resolution::TenKb => "10k",
        }
    }
}

impl fmt::Display for Resolution {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl FromStr for Resolution {
    type Err = ValidationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "1k" | "1kb" => Ok(Resolution::OneKb),
            "10k" | "10kb" => Ok(Resolution::TenKb),
            _ => Err(ValidationError::UnknownResolution(s.to_string())),
        }
    }
}

//----------------------------
// SubtypeTag
//----------------------------
/// The closed set of `loopSource` values a loop record may carry.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum SubtypeTag {
    Merged1k,
    Merged10k,
    HeH10k,
    Er10k,
    Ba10k,
    Dux4r10k,
    Tp10k,
    Kmt2ar10k,
    Iamp10k,
    NearHaploid10k,
}

impl SubtypeTag {
    pub const ALL: [SubtypeTag; 10] = [
        SubtypeTag::Merged1k,
        SubtypeTag::Merged10k,
        SubtypeTag::HeH10k,
        SubtypeTag::Er10k,
        SubtypeTag::Ba10k,
        SubtypeTag::Dux4r10k,
        SubtypeTag::Tp10k,
        SubtypeTag::Kmt2ar10k,
        SubtypeTag::Iamp10k,
        SubtypeTag::NearHaploid10k,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            SubtypeTag::Merged1k => "merged_1k",
            SubtypeTag::Merged10k => "merged_10k",
            SubtypeTag::HeH10k => "HeH_10k",
            SubtypeTag::Er10k => "ER_10k",
            SubtypeTag::Ba10k => "BA_10k",
            SubtypeTag::Dux4r10k => "DUX4r_10k",
            SubtypeTag::Tp10k => "TP_10k",
            SubtypeTag::Kmt2ar10k => "KMT2Ar_10k",
            SubtypeTag::Iamp10k => "iAMP_10k",
            SubtypeTag::NearHaploid10k => "nearHaploid_10k",
        }
    }
}

impl fmt::Display for SubtypeTag {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl FromStr for SubtypeTag {
    type Err = StoreError;

    /// ```
    /// # use crelink::libs::schema::SubtypeTag;
    /// # use std::str::FromStr;
    /// assert_eq!(SubtypeTag::from_str("iAMP_10k").unwrap(), SubtypeTag::Iamp10k);
    /// assert!(SubtypeTag::from_str("iamp_10k").is_err());
    /// ```
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        SubtypeTag::ALL
            .iter()
            .find(|t| t.as_str() == s)
            .copied()
            .ok_or_else(|| StoreError::UnknownSubtype(s.to_string()))
    }
}

//----------------------------
// Cohort
//----------------------------
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Cohort {
    Merged,
    HeH,
    Er,
    Ba,
    Dux4r,
    Tp,
    Kmt2ar,
    Iamp21,
    NearHaploid,
}

impl Cohort {
    pub const ALL: [Cohort; 9] = [
        Cohort::Merged,
        Cohort::HeH,
        Cohort::Er,
        Cohort::Ba,
        Cohort::Dux4r,
        Cohort::Tp,
        Cohort::Kmt2ar,
        Cohort::Iamp21,
        Cohort::NearHaploid,
    ];

    /// Value accepted on the command line.
    pub fn key(&self) -> &'static str {
        match self {
            Cohort::Merged => "merged",
            Cohort::HeH => "heh",
            Cohort::Er => "er",
            Cohort::Ba => "ba",
            Cohort::Dux4r => "dux4r",
            Cohort::Tp => "tp",
            Cohort::Kmt2ar => "kmt2ar",
            Cohort::Iamp21 => "iamp21",
            Cohort::NearHaploid => "nearhaploid",
        }
    }

    /// Short label used in export file names.
    pub fn label(&self) -> &'static str {
        match self {
            Cohort::Merged => "merged",
            Cohort::HeH => "HeH",
            Cohort::Er => "ER",
            Cohort::Ba => "BA",
            Cohort::Dux4r => "DUX4r",
            Cohort::Tp => "TP",
            Cohort::Kmt2ar => "KMT2Ar",
            Cohort::Iamp21 => "iAMP21",
            Cohort::NearHaploid => "nearHaploid",
        }
    }

    pub fn description(&self) -> &'static str {
        match self {
            Cohort::Merged => "General (Including all BCP-ALL cases)",
            Cohort::HeH => "High Hyperdiploidy",
            Cohort::Er => "ETV6::RUNX1",
            Cohort::Ba => "BCR::ABL1",
            Cohort::Dux4r => "DUX4r",
            Cohort::Tp => "TCF3::PBX1",
            Cohort::Kmt2ar => "KMT2Ar",
            Cohort::Iamp21 => "iAMP21",
            Cohort::NearHaploid => "nearHaploid",
        }
    }

    /// Subtype-specific cohorts were only called at 10kb.
    pub fn resolutions(&self) -> &'static [Resolution] {
        match self {
            Cohort::Merged => &[Resolution::OneKb, Resolution::TenKb],
            _ => &[Resolution::TenKb],
        }
    }

    /// The partition tag that holds this cohort's loops at `res`.
    pub fn subtype_tag(&self, res: Resolution) -> Result<SubtypeTag, ValidationError> {
        let tag = match (self, res) {
            (Cohort::Merged, Resolution::OneKb) => SubtypeTag::Merged1k,
            (Cohort::Merged, Resolution::TenKb) => SubtypeTag::Merged10k,
            (Cohort::HeH, Resolution::TenKb) => SubtypeTag::HeH10k,
            (Cohort::Er, Resolution::TenKb) => SubtypeTag::Er10k,
            (Cohort::Ba, Resolution::TenKb) => SubtypeTag::Ba10k,
            (Cohort::Dux4r, Resolution::TenKb) => SubtypeTag::Dux4r10k,
            (Cohort::Tp, Resolution::TenKb) => SubtypeTag::Tp10k,
            (Cohort::Kmt2ar, Resolution::TenKb) => SubtypeTag::Kmt2ar10k,
            (Cohort::Iamp21, Resolution::TenKb) => SubtypeTag::Iamp10k,
            (Cohort::NearHaploid, Resolution::TenKb) => SubtypeTag::NearHaploid10k,
            (_, Resolution::OneKb) => {
                return Err(ValidationError::ResolutionUnavailable {
                    cohort: self.label().to_string(),
                    resolution: res.to_string(),
                })
            }
        };
        Ok(tag)
    }
}

impl FromStr for Cohort {
    type Err = ValidationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let lower = s.to_ascii_lowercase();
        Cohort::ALL
            .iter()
            .find(|c| c.key() == lower)
            .copied()
            .ok_or_else(|| ValidationError::UnknownCohort(s.to_string()))
    }
}

/// A validated cohort/resolution pair.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Selection {
    pub cohort: Cohort,
    pub resolution: Resolution,
    pub tag: SubtypeTag,
}

impl Selection {
    pub fn new(cohort: Cohort, resolution: Resolution) -> Result<Self, ValidationError> {
        let tag = cohort.subtype_tag(resolution)?;
        Ok(Self {
            cohort,
            resolution,
            tag,
        })
    }

    /// The merged cohort at 10kb pools every partition except the 1kb-only one.
    pub fn is_pooled(&self) -> bool {
        self.cohort == Cohort::Merged && self.resolution == Resolution::TenKb
    }

    pub fn includes(&self, tag: SubtypeTag) -> bool {
        if self.is_pooled() {
            tag != SubtypeTag::Merged1k
        } else {
            tag == self.tag
        }
    }
}
