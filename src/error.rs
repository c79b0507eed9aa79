//! File-level diagnostics.
//!
//! Every variant here is recovered at the driver boundary and surfaced as a
//! user-visible message; the inference pipeline itself cannot fail on a
//! well-formed sequence of values.

use std::path::PathBuf;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum Error {
    #[error("failed to parse {} as JSON: {source}", path.display())]
    Parse {
        path: PathBuf,
        source: serde_json::Error,
    },

    #[error("{}: expected a JSON array of records", path.display())]
    NotAnArray { path: PathBuf },

    #[error("{}: array is empty, nothing to infer", path.display())]
    EmptyArray { path: PathBuf },

    #[error("{}: JSON pointer {pointer} matched nothing", path.display())]
    PointerNotFound { path: PathBuf, pointer: String },

    #[error("no input file given")]
    Usage { candidates: Vec<String> },
}

pub type Result<T> = std::result::Result<T, Error>;
