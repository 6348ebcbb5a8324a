//! Query, report, write the track files, render.

use crate::libs::artifacts::{self, Artifacts};
use crate::libs::config::{Config, SignalTrack};
use crate::libs::query::{query_gene, query_locus, GeneOutcome, GeneRequest, LocusOutcome, LocusRequest};
use crate::libs::region::GenomicWindow;
use crate::libs::render::Renderer;
use crate::libs::session::Session;
use crate::libs::signal::{BedGraphSource, SignalSource};
use crate::libs::store::ReferenceStore;
use crate::libs::tracks::{TrackConfig, TrackConfigBuilder};
use std::collections::BTreeSet;
use std::io::Write;
use std::path::{Path, PathBuf};

/// A signal track paired with where its values come from.
pub struct SignalLayer {
    pub track: SignalTrack,
    pub source: Box<dyn SignalSource>,
}

impl SignalLayer {
    /// Configured layers whose file exists, in configured order.
    pub fn from_config(config: &Config) -> Vec<SignalLayer> {
        let mut layers = vec![];
        for track in &config.signals {
            let source = BedGraphSource::new(config.signal_path(track));
            if !source.exists() {
                tracing::warn!(
                    layer = %track.name,
                    path = %source.path().display(),
                    "signal file not found, layer skipped"
                );
                continue;
            }
            layers.push(SignalLayer {
                track: track.clone(),
                source: Box::new(source),
            });
        }
        layers
    }
}

/// Drives one query from the store to the image on disk.
pub struct Explorer<'a> {
    store: &'a ReferenceStore,
    outdir: PathBuf,
    promoters: Option<PathBuf>,
    signals: Vec<SignalLayer>,
    renderer: Option<Box<dyn Renderer>>,
}

impl<'a> Explorer<'a> {
    pub fn new<P: AsRef<Path>>(store: &'a ReferenceStore, outdir: P) -> anyhow::Result<Self> {
        let outdir = outdir.as_ref().to_path_buf();
        std::fs::create_dir_all(&outdir)?;
        Ok(Self {
            store,
            outdir,
            promoters: None,
            signals: vec![],
            renderer: None,
        })
    }

    /// Drawn only when the file exists.
    pub fn with_promoters(mut self, path: Option<PathBuf>) -> Self {
        self.promoters = path.filter(|p| {
            let found = p.is_file();
            if !found {
                tracing::debug!(path = %p.display(), "no promoter annotation");
            }
            found
        });
        self
    }

    pub fn with_signals(mut self, signals: Vec<SignalLayer>) -> Self {
        self.signals = signals;
        self
    }

    /// Without a renderer the track files are written but nothing is drawn.
    pub fn with_renderer(mut self, renderer: Option<Box<dyn Renderer>>) -> Self {
        self.renderer = renderer;
        self
    }

    //----------------------------
    // Gene
    //----------------------------
    pub fn run_gene<W: Write>(
        &self,
        session: &mut Session,
        req: &GeneRequest,
        out: &mut W,
    ) -> anyhow::Result<GeneOutcome> {
        let outcome = query_gene(self.store, req);
        writeln!(out, "{}", outcome.message())?;

        let GeneOutcome::Found(matches) = &outcome else {
            return Ok(outcome);
        };
        for label in matches.region_labels() {
            writeln!(out, "{}", label)?;
        }
        artifacts::write_csv(&self.outdir.join(req.export_name()), &matches.rows())?;

        let window = matches
            .window()
            .ok_or_else(|| anyhow::anyhow!("No loops to place a window around"))?;
        let files = Artifacts::new(&self.outdir, &format!("gene_{}", matches.symbol));

        artifacts::write_links(&files.links(), &matches.links)?;
        artifacts::write_genes(
            &files.genes(),
            self.store.genes(),
            &BTreeSet::from([matches.symbol.clone()]),
        )?;
        let mut builder = TrackConfigBuilder::new(files.links(), files.genes());
        if let Some(gene) = self.store.genes().get(&matches.symbol) {
            artifacts::write_target_gene(&files.target_gene(), gene)?;
            builder = builder.target_gene(files.target_gene());
        }

        let config = self.finish_tracks(builder, &window, &files)?;
        self.draw(session, &window, &config, &files, out)?;

        Ok(outcome)
    }

    //----------------------------
    // Locus
    //----------------------------
    pub fn run_locus<W: Write>(
        &self,
        session: &mut Session,
        req: &LocusRequest,
        out: &mut W,
    ) -> anyhow::Result<LocusOutcome> {
        let outcome = query_locus(self.store, req);

        let LocusOutcome::Found(matches) = &outcome else {
            writeln!(out, "{}", LocusOutcome::NO_ENHANCERS)?;
            return Ok(outcome);
        };
        writeln!(out, "There are {} enhancers found in this region", matches.enhancers.len())?;

        if session.show_enhancers {
            writeln!(out, "Enhancer details:")?;
            for enhancer in &matches.enhancers {
                writeln!(out, "{}", enhancer.describe())?;
            }
            artifacts::write_csv(&self.outdir.join(req.export_name()), &matches.rows())?;
        }

        if session.show_loops {
            if matches.other_pairs.is_empty() {
                writeln!(out, "No additional loops were found in this region")?;
            } else {
                writeln!(out, "The following additional loop interactions were also found:")?;
                for (a, b) in &matches.other_pairs {
                    writeln!(out, "{}    {}", a, b)?;
                }
            }
        }

        let window = matches
            .window()
            .ok_or_else(|| anyhow::anyhow!("No loops to place a window around"))?;
        let files = Artifacts::new(
            &self.outdir,
            &format!("locus_{}_{}_{}", req.chrom, req.start, req.end),
        );

        artifacts::write_links(&files.links(), &matches.links)?;
        artifacts::write_genes(&files.genes(), self.store.genes(), &matches.regulated_genes())?;
        let builder = TrackConfigBuilder::new(files.links(), files.genes());

        let config = self.finish_tracks(builder, &window, &files)?;
        self.draw(session, &window, &config, &files, out)?;

        Ok(outcome)
    }

    //----------------------------
    // Shared tail
    //----------------------------
    /// Adds the static and signal layers, then writes the track file.
    fn finish_tracks(
        &self,
        mut builder: TrackConfigBuilder,
        window: &GenomicWindow,
        files: &Artifacts,
    ) -> anyhow::Result<TrackConfig> {
        tracing::info!(region = %window, "display window");

        if let Some(promoters) = &self.promoters {
            builder = builder.promoters(promoters);
        }

        for layer in &self.signals {
            let intervals = match layer.source.intervals(&window.chrom, window.start, window.end) {
                Ok(v) => v,
                Err(e) => {
                    tracing::warn!(layer = %layer.track.name, error = %e, "signal layer skipped");
                    continue;
                }
            };
            let path = files.signal(&layer.track.name);
            artifacts::write_signal(&path, &window.ucsc_chrom(), &intervals)?;
            builder = builder.signal(&layer.track, &path);
        }

        let config = builder.build();
        std::fs::write(files.tracks(), config.to_string())?;
        tracing::info!(path = %files.tracks().display(), layers = config.tracks.len(), "track file written");

        Ok(config)
    }

    /// Renderer failures are reported on `out` and swallowed.
    fn draw<W: Write>(
        &self,
        session: &mut Session,
        window: &GenomicWindow,
        config: &TrackConfig,
        files: &Artifacts,
        out: &mut W,
    ) -> anyhow::Result<Option<PathBuf>> {
        let Some(renderer) = &self.renderer else {
            return Ok(None);
        };

        let region = window.region();
        let text = config.to_string();
        if let Some(image) = session.cached_image(&region, &text) {
            tracing::info!(image = %image.display(), "region unchanged, reusing image");
            writeln!(out, "Genome track: {}", image.display())?;
            return Ok(Some(image.to_path_buf()));
        }

        match renderer.render(&files.tracks(), &region, &files.image()) {
            Ok(image) => {
                session.remember(&region, &text, &image);
                writeln!(out, "Genome track: {}", image.display())?;
                Ok(Some(image))
            }
            Err(e) => {
                tracing::warn!(error = %e, "render failed");
                writeln!(out, "Error generating genome track: {}", e)?;
                Ok(None)
            }
        }
    }
}
