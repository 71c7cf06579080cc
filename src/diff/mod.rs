//! Diff engine: patch file reading, unified diff parsing, path exclusions.

pub mod exclusions;
pub mod parser;

use std::path::Path;
use thiserror::Error;

pub use exclusions::Exclusions;
pub use parser::parse_patch;

/// Errors from the diff engine.
#[derive(Error, Debug)]
pub enum DiffError {
    #[error("failed to read diff file: {0}")]
    FileReadError(#[from] std::io::Error),

    #[error("diff file not found: {0}")]
    PathNotFound(String),

    #[error("invalid exclusion pattern: {0}")]
    PatternError(#[from] ignore::Error),
}

/// Read a unified diff from a file path.
pub async fn read_diff_file(path: &Path) -> Result<String, DiffError> {
    if !path.exists() {
        return Err(DiffError::PathNotFound(path.display().to_string()));
    }

    tokio::fs::read_to_string(path)
        .await
        .map_err(DiffError::FileReadError)
}
