use anyhow::{Context, Result, bail};
use std::path::{Path, PathBuf};
use tracing::{debug, warn};
use walkdir::WalkDir;

/// Recursively collects every file (or symlink to a file) under `root` whose
/// name ends in `.pdf` (ASCII case-insensitive). Entries are visited
/// depth-first, sorted by file name within each directory.
pub fn find_pdf_files(root: &Path) -> Result<Vec<PathBuf>> {
    let meta = std::fs::metadata(root)
        .with_context(|| format!("reading input directory: {}", root.display()))?;
    if !meta.is_dir() {
        bail!("input path is not a directory: {}", root.display());
    }

    let mut out = Vec::new();
    for entry in WalkDir::new(root).sort_by_file_name() {
        let entry = match entry {
            Ok(e) => e,
            Err(err) => {
                warn!("skipping unreadable entry: {err}");
                continue;
            }
        };
        // Links are not followed into directories, but a link to a file counts.
        let is_file = entry.file_type().is_file()
            || (entry.path_is_symlink() && entry.path().is_file());
        if !is_file {
            continue;
        }
        if is_pdf_name(entry.file_name().to_string_lossy().as_ref()) {
            out.push(entry.into_path());
        }
    }

    debug!("discovered {} PDF files under {}", out.len(), root.display());
    Ok(out)
}

pub fn is_pdf_name(name: &str) -> bool {
    let n = name.len();
    n >= 4 && name.is_char_boundary(n - 4) && name[n - 4..].eq_ignore_ascii_case(".pdf")
}
