//! Renderer track file: one `[section]` of `key = value` lines per layer.

use crate::libs::config::SignalTrack;
use std::fmt;
use std::path::{Path, PathBuf};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TrackKind {
    Axis,
    Links,
    Bed,
    BedGraph,
}

impl TrackKind {
    /// Value of the `file_type` key. The axis has none.
    pub fn file_type(&self) -> Option<&'static str> {
        match self {
            TrackKind::Axis => None,
            TrackKind::Links => Some("links"),
            TrackKind::Bed => Some("bed"),
            TrackKind::BedGraph => Some("bedgraph"),
        }
    }
}

/// One visual layer. Style keys keep their insertion order.
#[derive(Debug, Clone, PartialEq)]
pub struct TrackDescriptor {
    pub name: String,
    pub source: Option<PathBuf>,
    pub kind: TrackKind,
    pub style: Vec<(String, String)>,
}

impl TrackDescriptor {
    pub fn new(name: &str, kind: TrackKind, source: Option<&Path>) -> Self {
        Self {
            name: name.to_string(),
            source: source.map(Path::to_path_buf),
            kind,
            style: vec![],
        }
    }

    pub fn with(mut self, key: &str, value: impl ToString) -> Self {
        self.style.push((key.to_string(), value.to_string()));
        self
    }

    pub fn get(&self, key: &str) -> Option<&str> {
        self.style
            .iter()
            .find(|(k, _)| k == key)
            .map(|(_, v)| v.as_str())
    }
}

impl fmt::Display for TrackDescriptor {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        writeln!(f, "[{}]", self.name)?;
        if let Some(source) = &self.source {
            writeln!(f, "file = {}", source.display())?;
        }
        if let Some(file_type) = self.kind.file_type() {
            writeln!(f, "file_type = {}", file_type)?;
        }
        for (key, value) in &self.style {
            if value.is_empty() {
                writeln!(f, "{} =", key)?;
            } else {
                writeln!(f, "{} = {}", key, value)?;
            }
        }
        Ok(())
    }
}

/// Ordered layers; the order is the stacking order of the image.
#[derive(Debug, Clone, PartialEq)]
pub struct TrackConfig {
    pub tracks: Vec<TrackDescriptor>,
}

impl TrackConfig {
    pub fn names(&self) -> Vec<&str> {
        self.tracks.iter().map(|t| t.name.as_str()).collect()
    }

    pub fn get(&self, name: &str) -> Option<&TrackDescriptor> {
        self.tracks.iter().find(|t| t.name == name)
    }
}

impl fmt::Display for TrackConfig {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        for (i, track) in self.tracks.iter().enumerate() {
            if i > 0 {
                writeln!(f)?;
            }
            write!(f, "{}", track)?;
        }
        Ok(())
    }
}

/// Collects the layer sources and emits them in the fixed order
/// axis, links, highlighted gene, genes, promoters, signals.
#[derive(Debug, Clone)]
pub struct TrackConfigBuilder {
    links: PathBuf,
    genes: PathBuf,
    target_gene: Option<PathBuf>,
    promoters: Option<PathBuf>,
    signals: Vec<(SignalTrack, PathBuf)>,
}

impl TrackConfigBuilder {
    pub fn new<P: AsRef<Path>>(links: P, genes: P) -> Self {
        Self {
            links: links.as_ref().to_path_buf(),
            genes: genes.as_ref().to_path_buf(),
            target_gene: None,
            promoters: None,
            signals: vec![],
        }
    }

    /// BED6 of the queried gene, drawn alone above the full gene layer.
    pub fn target_gene<P: AsRef<Path>>(mut self, path: P) -> Self {
        self.target_gene = Some(path.as_ref().to_path_buf());
        self
    }

    pub fn promoters<P: AsRef<Path>>(mut self, path: P) -> Self {
        self.promoters = Some(path.as_ref().to_path_buf());
        self
    }

    /// Signal layers stack in the order they are added.
    pub fn signal<P: AsRef<Path>>(mut self, track: &SignalTrack, segments: P) -> Self {
        self.signals.push((track.clone(), segments.as_ref().to_path_buf()));
        self
    }

    pub fn build(self) -> TrackConfig {
        let mut tracks = vec![];

        tracks.push(
            TrackDescriptor::new("x-axis", TrackKind::Axis, None)
                .with("height", 4)
                .with("fontsize", 14)
                .with("title", "hg38"),
        );

        tracks.push(
            TrackDescriptor::new("enhancer_links", TrackKind::Links, Some(self.links.as_path()))
                .with("line_width", 3)
                .with("color", "red")
                .with("title", "Enhancer Links")
                .with("height", 5),
        );

        if let Some(target) = &self.target_gene {
            tracks.push(
                TrackDescriptor::new("genes2", TrackKind::Bed, Some(target.as_path()))
                    .with("color", "red")
                    .with("height", 2)
                    .with("title", "")
                    .with("fontsize", 12)
                    .with("arrow_interval", 5)
                    .with("gene_rows", 1),
            );
        }

        tracks.push(
            TrackDescriptor::new("genes", TrackKind::Bed, Some(self.genes.as_path()))
                .with("color", "red")
                .with("height", 2)
                .with("max_labels", 20)
                .with("overlay_previous", "no")
                .with("title", "Genes")
                .with("fontsize", 12)
                .with("arrow_interval", 5),
        );

        if let Some(promoters) = &self.promoters {
            tracks.push(
                TrackDescriptor::new("promoters", TrackKind::Bed, Some(promoters.as_path()))
                    .with("color", "red")
                    .with("height", 2)
                    .with("merge_overlapping_exons", "true")
                    .with("title", "Promoters")
                    .with("display", "collapsed")
                    .with("labels", "false")
                    .with("merge_transcripts", "true"),
            );
        }

        for (signal, segments) in &self.signals {
            tracks.push(
                TrackDescriptor::new(&signal.name, TrackKind::BedGraph, Some(segments.as_path()))
                    .with("color", &signal.color)
                    .with("height", 4)
                    .with("title", &signal.title)
                    .with("min_value", signal.min_value)
                    .with("max_value", signal.max_value),
            );
        }

        TrackConfig { tracks }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn signal(name: &str, max: f64) -> SignalTrack {
        SignalTrack {
            name: name.to_string(),
            title: name.to_uppercase(),
            file: PathBuf::from(format!("{}.bedGraph", name)),
            color: "green".to_string(),
            min_value: 0.0,
            max_value: max,
        }
    }

    #[test]
    fn layer_order_is_fixed() {
        // setters called out of display order on purpose
        let config = TrackConfigBuilder::new("out/links.tab", "out/genes.bed")
            .signal(&signal("dnase", 1.0), "out/dnase.bedGraph")
            .promoters("data/promoters.bed")
            .target_gene("out/target.bed")
            .signal(&signal("h3k27ac", 30.0), "out/h3k27ac.bedGraph")
            .build();
        assert_eq!(
            config.names(),
            vec!["x-axis", "enhancer_links", "genes2", "genes", "promoters", "dnase", "h3k27ac"]
        );
    }

    #[test]
    fn locus_layers_skip_highlight() {
        let config = TrackConfigBuilder::new("l.tab", "g.bed").build();
        assert_eq!(config.names(), vec!["x-axis", "enhancer_links", "genes"]);
    }

    #[test]
    fn ini_sections() {
        let config = TrackConfigBuilder::new("out/links.tab", "out/genes.bed")
            .target_gene("out/target.bed")
            .signal(&signal("dnase", 1.0), "out/dnase.bedGraph")
            .build();
        let text = config.to_string();

        assert!(text.starts_with("[x-axis]\nheight = 4\nfontsize = 14\ntitle = hg38\n\n[enhancer_links]\n"));
        assert!(text.contains(
            "[enhancer_links]\nfile = out/links.tab\nfile_type = links\nline_width = 3\ncolor = red\ntitle = Enhancer Links\nheight = 5\n"
        ));
        assert!(text.contains("[genes2]\nfile = out/target.bed\nfile_type = bed\ncolor = red\nheight = 2\ntitle =\n"));
        assert!(text.ends_with(
            "[dnase]\nfile = out/dnase.bedGraph\nfile_type = bedgraph\ncolor = green\nheight = 4\ntitle = DNASE\nmin_value = 0\nmax_value = 1\n"
        ));
        assert_eq!(config.get("dnase").unwrap().get("max_value"), Some("1"));
    }
}
