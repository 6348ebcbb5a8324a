//! External genome-track renderer.

use crate::libs::error::RenderError;
use std::path::{Path, PathBuf};
use std::process::Command;

/// Turns a track file and a region into an image on disk.
pub trait Renderer {
    fn render(&self, config: &Path, region: &str, output: &Path) -> Result<PathBuf, RenderError>;
}

/// A pyGenomeTracks-compatible executable.
#[derive(Debug, Clone)]
pub struct PyGenomeTracks {
    executable: String,
    dpi: u32,
}

impl PyGenomeTracks {
    pub fn new(executable: &str, dpi: u32) -> Self {
        Self {
            executable: executable.to_string(),
            dpi,
        }
    }

    pub fn executable(&self) -> &str {
        &self.executable
    }

    /// The argument list after the program name.
    pub fn args(&self, config: &Path, region: &str, output: &Path) -> Vec<String> {
        vec![
            "--tracks".to_string(),
            config.display().to_string(),
            "--region".to_string(),
            region.to_string(),
            "--dpi".to_string(),
            self.dpi.to_string(),
            "-o".to_string(),
            output.display().to_string(),
        ]
    }
}

impl Renderer for PyGenomeTracks {
    fn render(&self, config: &Path, region: &str, output: &Path) -> Result<PathBuf, RenderError> {
        let bin = which::which(&self.executable).map_err(|_| RenderError::NotFound(self.executable.clone()))?;

        let args = self.args(config, region, output);
        tracing::debug!(bin = %bin.display(), ?args, "invoking renderer");

        // The tool chatters on stdout, which belongs to the reports
        let result = Command::new(bin).args(&args).output()?;
        if !result.status.success() {
            tracing::warn!(
                stderr = %String::from_utf8_lossy(&result.stderr).trim(),
                "renderer failed"
            );
            return Err(RenderError::Failed(result.status));
        }
        if !output.is_file() {
            return Err(RenderError::NoImage(output.to_path_buf()));
        }

        tracing::info!(image = %output.display(), "genome track rendered");
        Ok(output.to_path_buf())
    }
}
