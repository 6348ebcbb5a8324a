use crate::libs::loops::{ucsc_chrom, Link};
use std::fmt;

/// Margin added on both sides of the matched loops' bounding interval.
pub const PADDING: i64 = 100_000;

/// The display window around a set of matched loops.
///
/// The window is never clipped: a loop near the chromosome start yields a
/// negative `start`, and `end` may pass the chromosome length.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GenomicWindow {
    pub chrom: String,
    pub start: i64,
    pub end: i64,
}

impl GenomicWindow {
    /// Pads the bounding interval of every anchor of `links` by [`PADDING`].
    /// The chromosome is the reported anchor's of the first link.
    ///
    /// ```
    /// # use crelink::libs::loops::{Anchor, Link};
    /// # use crelink::libs::region::GenomicWindow;
    /// let links = vec![
    ///     Link::new(&Anchor::new("12", 500_000, 510_000), &Anchor::new("12", 300_000, 310_000)),
    ///     Link::new(&Anchor::new("12", 700_000, 710_000), &Anchor::new("12", 400_000, 410_000)),
    /// ];
    /// let window = GenomicWindow::from_links(&links).unwrap();
    /// assert_eq!(window.start, 200_000);
    /// assert_eq!(window.end, 810_000);
    /// assert_eq!(window.region(), "chr12:200000-810000");
    /// ```
    pub fn from_links(links: &[Link]) -> Option<Self> {
        let first = links.first()?;
        let anchors = || links.iter().flat_map(|l| [&l.anchor, &l.inter]);

        let min_start = anchors().map(|a| a.start).min()?;
        let max_end = anchors().map(|a| a.end).max()?;

        Some(Self {
            chrom: first.anchor.chrom.clone(),
            start: min_start - PADDING,
            end: max_end + PADDING,
        })
    }

    pub fn ucsc_chrom(&self) -> String {
        ucsc_chrom(&self.chrom)
    }

    /// Region string handed to the renderer.
    pub fn region(&self) -> String {
        format!("{}:{}-{}", self.ucsc_chrom(), self.start, self.end)
    }
}

impl fmt::Display for GenomicWindow {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "{}", self.region())
    }
}
