//! Layered settings: defaults, then `crelink.toml`, then `CRELINK_*` variables.

use anyhow::Context;
use figment::{
    providers::{Env, Format, Serialized, Toml},
    Figment,
};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

pub const LOCAL_CONFIG: &str = "crelink.toml";

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    /// Directory holding the reference tables
    pub data_dir: PathBuf,
    pub genes_file: String,
    pub loops_file: String,
    /// Static promoter annotation, drawn when present
    pub promoters_file: Option<String>,

    #[serde(default)]
    pub renderer: RendererConfig,

    /// Signal layers in display order
    #[serde(default = "default_signals")]
    pub signals: Vec<SignalTrack>,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            data_dir: PathBuf::from("data"),
            genes_file: "coding_genes2".to_string(),
            loops_file: "concat_loops.tab".to_string(),
            promoters_file: Some("promoters.bed".to_string()),
            renderer: RendererConfig::default(),
            signals: default_signals(),
        }
    }
}

impl Config {
    pub fn genes_path(&self) -> PathBuf {
        self.data_dir.join(&self.genes_file)
    }

    pub fn loops_path(&self) -> PathBuf {
        self.data_dir.join(&self.loops_file)
    }

    pub fn promoters_path(&self) -> Option<PathBuf> {
        self.promoters_file.as_ref().map(|f| self.data_dir.join(f))
    }

    /// Relative signal files live under `data_dir`.
    pub fn signal_path(&self, track: &SignalTrack) -> PathBuf {
        if track.file.is_absolute() {
            track.file.clone()
        } else {
            self.data_dir.join(&track.file)
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RendererConfig {
    pub executable: String,
    pub dpi: u32,
}

impl Default for RendererConfig {
    fn default() -> Self {
        Self {
            executable: "pyGenomeTracks".to_string(),
            dpi: 100,
        }
    }
}

/// One epigenetic or accessibility layer.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SignalTrack {
    /// Section name in the track file
    pub name: String,
    pub title: String,
    /// bedGraph, plain or gzipped; relative to `data_dir`
    pub file: PathBuf,
    pub color: String,
    pub min_value: f64,
    pub max_value: f64,
}

impl SignalTrack {
    fn histone(name: &str, title: &str) -> Self {
        Self {
            name: name.to_string(),
            title: title.to_string(),
            file: PathBuf::from(format!("tracks/{}.bedGraph", name)),
            color: "green".to_string(),
            min_value: 0.0,
            max_value: 30.0,
        }
    }
}

fn default_signals() -> Vec<SignalTrack> {
    vec![
        SignalTrack::histone("h3k4me1", "H3K4me1"),
        SignalTrack::histone("h3k4me3", "H3K4me3"),
        SignalTrack::histone("h3k27ac", "H3K27ac"),
        SignalTrack::histone("h3k27me3", "H3K27me3"),
        SignalTrack {
            name: "dnase".to_string(),
            title: "DNase".to_string(),
            file: PathBuf::from("tracks/dnase.bedGraph"),
            color: "grey".to_string(),
            min_value: 0.0,
            max_value: 1.0,
        },
    ]
}

/// An explicit `path` must exist; otherwise `crelink.toml` in the working
/// directory is used when present.
pub fn load_config(path: Option<&Path>) -> anyhow::Result<Config> {
    let mut figment = Figment::from(Serialized::defaults(Config::default()));

    match path {
        Some(p) => {
            if !p.is_file() {
                anyhow::bail!("Config file not found: {}", p.display());
            }
            figment = figment.merge(Toml::file(p));
        }
        None => {
            if Path::new(LOCAL_CONFIG).is_file() {
                figment = figment.merge(Toml::file(LOCAL_CONFIG));
            }
        }
    }

    figment = figment.merge(Env::prefixed("CRELINK_").split("__"));

    let config: Config = figment.extract().context("Failed to load configuration")?;
    tracing::debug!(?config, "configuration loaded");

    Ok(config)
}
