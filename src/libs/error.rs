use std::path::PathBuf;
use thiserror::Error;

/// Problems with the reference tables. All of them are fatal at startup.
#[derive(Debug, Error)]
pub enum StoreError {
    #[error("Required input file not found: {}", .0.display())]
    MissingTable(PathBuf),

    #[error("{}:{line}: {message}", path.display())]
    Malformed {
        path: PathBuf,
        line: usize,
        message: String,
    },

    #[error("Unknown loop source tag: {0}")]
    UnknownSubtype(String),

    #[error(transparent)]
    Csv(#[from] csv::Error),

    #[error(transparent)]
    Io(#[from] std::io::Error),
}

/// Rejected user input. The query is not executed.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ValidationError {
    #[error("Only numeric values are allowed for start and end positions.")]
    NonNumeric,

    #[error("Start position cannot be larger than or equal to the end position.")]
    StartNotBeforeEnd,

    #[error("Maximum range allowed is 1 Mb.")]
    RangeTooLarge,

    #[error("Unknown chromosome: {0}")]
    UnknownChromosome(String),

    #[error("Malformed region: {0}")]
    MalformedRegion(String),

    #[error("Resolution {resolution} is not available for cohort {cohort}")]
    ResolutionUnavailable { cohort: String, resolution: String },

    #[error("Unknown cohort: {0}")]
    UnknownCohort(String),

    #[error("Unknown resolution: {0}")]
    UnknownResolution(String),

    #[error("Unknown promoter mode: {0}")]
    UnknownPromoterMode(String),

    #[error("Gene symbol is empty")]
    EmptySymbol,
}

/// Failures of the external renderer. Reported, never fatal.
#[derive(Debug, Error)]
pub enum RenderError {
    #[error("renderer `{0}` not found in PATH")]
    NotFound(String),

    #[error("renderer exited with {0}")]
    Failed(std::process::ExitStatus),

    #[error("renderer reported success but wrote no image at {}", .0.display())]
    NoImage(PathBuf),

    #[error(transparent)]
    Io(#[from] std::io::Error),
}
