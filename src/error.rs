//! Per-document conversion failures.
//!
//! A [`ConvertError`] never aborts a batch: the runner records it against the
//! source path and moves on to the next document.

use serde::{Deserialize, Serialize};
use std::path::PathBuf;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum ConvertError {
    /// The file could not be opened or parsed as a PDF.
    #[error("cannot open PDF '{}': {detail}", path.display())]
    Open { path: PathBuf, detail: String },

    /// Text or table extraction failed on a specific page.
    #[error("extraction failed on page {page} of '{}': {detail}", path.display())]
    Extract {
        path: PathBuf,
        page: u32,
        detail: String,
    },

    /// The Markdown output (or its directory) could not be written.
    #[error("cannot write '{}': {source}", path.display())]
    Write {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FailureKind {
    Open,
    Extract,
    Write,
}

impl ConvertError {
    pub fn kind(&self) -> FailureKind {
        match self {
            ConvertError::Open { .. } => FailureKind::Open,
            ConvertError::Extract { .. } => FailureKind::Extract,
            ConvertError::Write { .. } => FailureKind::Write,
        }
    }
}
