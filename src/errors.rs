use std::io;
use std::path::PathBuf;

use thiserror::Error;

/// Error type for configuration, CSV parsing, and filesystem failures.
#[derive(Debug, Error)]
pub enum PrepError {
    #[error(transparent)]
    Io(#[from] io::Error),
    #[error(transparent)]
    Csv(#[from] csv::Error),
    #[error("file '{}' has no header row", .path.display())]
    MissingHeader { path: PathBuf },
    #[error("configuration error: {0}")]
    Configuration(String),
}
