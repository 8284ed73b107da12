//! Utilities for input path collection and size formatting.

use globset::{GlobBuilder, GlobMatcher};
use std::path::{Path, PathBuf};
use walkdir::WalkDir;

use crate::{PdfSpliceError, Result};

/// Expand merge inputs into concrete file paths, keeping argument order.
///
/// Each input is handled on its own:
/// - a directory contributes its `*.pdf` files (any case, recursively),
///   sorted by path
/// - an existing file is kept as given, even if its name contains glob
///   characters
/// - a pattern containing `*`, `?` or `[` is expanded with `glob`, sorted
/// - anything else is kept as given, so a missing file is reported when
///   it is loaded
///
/// # Errors
///
/// Returns [`PatternMatchedNothing`](PdfSpliceError::PatternMatchedNothing)
/// for a pattern without matches,
/// [`NoInputs`](PdfSpliceError::NoInputs) if nothing is left after
/// expansion, and a config error for a malformed pattern.
pub fn expand_inputs<T>(inputs: T) -> Result<Vec<PathBuf>>
where
    T: IntoIterator,
    T::Item: AsRef<Path>,
{
    let matcher = pdf_matcher()?;
    let mut resolved = Vec::new();

    for input in inputs {
        let input = input.as_ref();
        if input.is_dir() {
            let found = collect_pdfs_in_dir(input, &matcher);
            if found.is_empty() {
                tracing::warn!(dir = %input.display(), "directory holds no pdf files");
            }
            tracing::debug!(dir = %input.display(), found = found.len(), "expanded directory");
            resolved.extend(found);
        } else if !input.exists() && is_pattern(input) {
            let found = collect_paths_for_pattern(input)?;
            if found.is_empty() {
                return Err(PdfSpliceError::PatternMatchedNothing {
                    pattern: input.to_string_lossy().into_owned(),
                });
            }
            resolved.extend(found);
        } else {
            resolved.push(input.to_path_buf());
        }
    }

    if resolved.is_empty() {
        return Err(PdfSpliceError::NoInputs);
    }

    Ok(resolved)
}

/// Read input paths from a list file, one per line.
///
/// Blank lines and lines starting with `#` are skipped.
pub async fn read_input_list(path: &Path) -> Result<Vec<PathBuf>> {
    let text = tokio::fs::read_to_string(path).await.map_err(|e| {
        if e.kind() == std::io::ErrorKind::NotFound {
            PdfSpliceError::file_not_found(path.to_path_buf())
        } else {
            PdfSpliceError::FileNotAccessible {
                path: path.to_path_buf(),
                source: e,
            }
        }
    })?;

    Ok(text
        .lines()
        .map(str::trim)
        .filter(|line| !line.is_empty() && !line.starts_with('#'))
        .map(PathBuf::from)
        .collect())
}

fn pdf_matcher() -> Result<GlobMatcher> {
    GlobBuilder::new("*.pdf")
        .case_insensitive(true)
        .build()
        .map(|glob| glob.compile_matcher())
        .map_err(|e| PdfSpliceError::other(e.to_string()))
}

fn is_pattern(path: &Path) -> bool {
    path.to_string_lossy().contains(['*', '?', '['])
}

fn collect_pdfs_in_dir(dir: &Path, matcher: &GlobMatcher) -> Vec<PathBuf> {
    WalkDir::new(dir)
        .sort_by_file_name()
        .into_iter()
        .filter_map(|entry| match entry {
            Ok(entry) => Some(entry),
            Err(err) => {
                tracing::warn!(error = %err, "skipping unreadable directory entry");
                None
            }
        })
        .filter(|entry| entry.file_type().is_file())
        .filter(|entry| matcher.is_match(entry.file_name()))
        .map(|entry| entry.into_path())
        .collect()
}

/// Expand a single glob pattern into filesystem paths.
///
/// Pattern examples:
/// - `"**/*.pdf"`
/// - `"./docs/*.pdf"`
fn collect_paths_for_pattern(pattern: &Path) -> Result<Vec<PathBuf>> {
    let pattern = pattern.to_string_lossy();
    let paths = glob::glob(&pattern).map_err(|err| {
        PdfSpliceError::invalid_config(format!("Invalid pattern {pattern}: {err}"))
    })?;

    let mut resolved = Vec::new();
    for entry in paths {
        let path = entry.map_err(|err| PdfSpliceError::FileNotAccessible {
            path: err.path().to_path_buf(),
            source: std::io::Error::new(err.error().kind(), err.to_string()),
        })?;
        if path.is_file() {
            resolved.push(path);
        }
    }
    resolved.sort();

    Ok(resolved)
}

/// Format file size as human-readable string.
pub fn format_file_size(size: u64) -> String {
    const KB: u64 = 1024;
    const MB: u64 = KB * 1024;
    const GB: u64 = MB * 1024;

    if size >= GB {
        format!("{:.2} GB", size as f64 / GB as f64)
    } else if size >= MB {
        format!("{:.2} MB", size as f64 / MB as f64)
    } else if size >= KB {
        format!("{:.2} KB", size as f64 / KB as f64)
    } else {
        format!("{} bytes", size)
    }
}
