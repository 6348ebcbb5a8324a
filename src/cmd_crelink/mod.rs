//! Subcommand modules for the `crelink` binary.

pub mod batch;
pub mod cohorts;
pub mod gene;
pub mod locus;

use clap::*;
use crelink::libs::config::{load_config, Config};
use crelink::libs::explore::{Explorer, SignalLayer};
use crelink::libs::render::{PyGenomeTracks, Renderer};
use crelink::libs::schema::{Cohort, PromoterMode, Resolution, Selection};
use crelink::libs::session::Session;
use crelink::libs::store::ReferenceStore;
use std::path::{Path, PathBuf};
use std::str::FromStr;

/// Options shared by every query subcommand.
pub fn query_args() -> Vec<Arg> {
    vec![
        Arg::new("cohort")
            .long("cohort")
            .short('c')
            .num_args(1)
            .default_value("merged")
            .value_parser(Cohort::ALL.iter().map(|c| c.key()).collect::<Vec<_>>())
            .help("Patient cohort"),
        Arg::new("res")
            .long("res")
            .short('r')
            .num_args(1)
            .default_value("10k")
            .value_parser(["1k", "10k"])
            .help("Loop-calling resolution; 1k exists only for the merged cohort"),
        Arg::new("promoters")
            .long("promoters")
            .short('p')
            .num_args(1)
            .default_value("all")
            .value_parser(["all", "canonical"])
            .help("Promoter definition: all transcripts or canonical only"),
        Arg::new("config")
            .long("config")
            .num_args(1)
            .help("TOML settings file. Defaults to ./crelink.toml when present"),
        Arg::new("data")
            .long("data")
            .short('d')
            .num_args(1)
            .help("Directory of the reference tables; overrides `data_dir`"),
        Arg::new("outdir")
            .long("outdir")
            .short('o')
            .num_args(1)
            .default_value(".")
            .help("Directory for exports, track files and images"),
        Arg::new("no_render")
            .long("no-render")
            .action(ArgAction::SetTrue)
            .help("Write the track files but do not invoke the renderer"),
        Arg::new("renderer")
            .long("renderer")
            .num_args(1)
            .help("Renderer executable; overrides `renderer.executable`"),
        Arg::new("details")
            .long("details")
            .action(ArgAction::SetTrue)
            .help("Show enhancer details and export them (locus queries)"),
        Arg::new("loops")
            .long("loops")
            .action(ArgAction::SetTrue)
            .help("Show the additional non-enhancer loops (locus queries)"),
    ]
}

/// Everything a query subcommand needs, resolved from the command line.
pub struct Setup {
    pub config: Config,
    pub store: ReferenceStore,
    pub selection: Selection,
    pub mode: PromoterMode,
    pub outdir: PathBuf,
    pub render: bool,
}

impl Setup {
    /// Loads settings and the reference tables. Missing tables are fatal.
    pub fn from_matches(args: &ArgMatches) -> anyhow::Result<Self> {
        let mut config = load_config(args.get_one::<String>("config").map(Path::new))?;
        if let Some(dir) = args.get_one::<String>("data") {
            config.data_dir = PathBuf::from(dir);
        }
        if let Some(exe) = args.get_one::<String>("renderer") {
            config.renderer.executable = exe.to_string();
        }

        let cohort = Cohort::from_str(args.get_one::<String>("cohort").unwrap())?;
        let resolution = Resolution::from_str(args.get_one::<String>("res").unwrap())?;
        let selection = Selection::new(cohort, resolution)?;
        let mode = PromoterMode::from_str(args.get_one::<String>("promoters").unwrap())?;

        let store = ReferenceStore::open(config.genes_path(), config.loops_path())?;

        Ok(Self {
            config,
            store,
            selection,
            mode,
            outdir: PathBuf::from(args.get_one::<String>("outdir").unwrap()),
            render: !args.get_flag("no_render"),
        })
    }

    pub fn explorer(&self) -> anyhow::Result<Explorer<'_>> {
        let renderer: Option<Box<dyn Renderer>> = if self.render {
            Some(Box::new(PyGenomeTracks::new(
                &self.config.renderer.executable,
                self.config.renderer.dpi,
            )))
        } else {
            None
        };

        Ok(Explorer::new(&self.store, &self.outdir)?
            .with_promoters(self.config.promoters_path())
            .with_signals(SignalLayer::from_config(&self.config))
            .with_renderer(renderer))
    }
}

pub fn session(args: &ArgMatches) -> Session {
    Session::new(args.get_flag("details"), args.get_flag("loops"))
}
