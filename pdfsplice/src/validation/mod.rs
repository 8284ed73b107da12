//! Inspecting input documents without changing them.
//!
//! Backs the `info` command: each file is loaded, and either its page
//! count, version and first-page size are reported, or the reason it could
//! not be read.
//!
//! # Examples
//!
//! ```no_run
//! use pdfsplice::validation::Validator;
//! use std::path::PathBuf;
//!
//! # async fn example() -> Result<(), Box<dyn std::error::Error>> {
//! let validator = Validator::new();
//! let result = validator.validate_file(&PathBuf::from("test.pdf")).await?;
//! println!("PDF has {} pages", result.page_count);
//! # Ok(())
//! # }
//! ```

use lopdf::{Document, Object};
use serde::Serialize;
use std::path::{Path, PathBuf};

use crate::error::{ErrorKind, PdfSpliceError, Result};
use crate::io::{LoadedPdf, PdfReader};
use crate::utils::format_file_size;

/// Result of validating a single PDF file.
#[derive(Debug, Clone, Serialize)]
pub struct ValidationResult {
    /// Path to the validated file.
    pub path: PathBuf,

    /// Number of pages in the PDF.
    pub page_count: u32,

    /// PDF header version, e.g. `1.7`.
    pub version: String,

    /// Size of the file in bytes.
    pub file_size: u64,

    /// Number of objects in the PDF.
    pub object_count: usize,

    /// First page size (width, height) in points, if available.
    pub page_dimensions: Option<(f32, f32)>,
}

impl ValidationResult {
    fn from_loaded(loaded: &LoadedPdf) -> Self {
        Self {
            path: loaded.path.clone(),
            page_count: loaded.page_count,
            version: loaded.document.version.clone(),
            file_size: loaded.file_size,
            object_count: loaded.document.objects.len(),
            page_dimensions: first_page_size(&loaded.document),
        }
    }
}

fn first_page_size(doc: &Document) -> Option<(f32, f32)> {
    let page_id = *doc.get_pages().values().next()?;
    let page = doc.get_dictionary(page_id).ok()?;
    let media_box = page.get(b"MediaBox").and_then(Object::as_array).ok()?;
    if media_box.len() < 4 {
        return None;
    }
    let width = media_box[2].as_float().ok()? - media_box[0].as_float().ok()?;
    let height = media_box[3].as_float().ok()? - media_box[1].as_float().ok()?;
    Some((width, height))
}

/// A file that could not be validated.
#[derive(Debug, Clone, Serialize)]
pub struct ValidationFailure {
    /// Path to the file.
    pub path: PathBuf,

    /// Error category.
    pub kind: ErrorKind,

    /// Human-readable reason.
    pub error: String,
}

/// Summary of validation results for multiple files.
#[derive(Debug, Clone, Serialize)]
pub struct ValidationSummary {
    /// Files that loaded, in input order.
    pub results: Vec<ValidationResult>,

    /// Files that did not, in input order.
    pub failures: Vec<ValidationFailure>,

    /// Total number of pages across valid files.
    pub total_pages: u64,

    /// Total size of valid files in bytes.
    pub total_size: u64,
}

impl ValidationSummary {
    /// Create a summary from validation results.
    pub fn from_results(results: Vec<ValidationResult>, failures: Vec<ValidationFailure>) -> Self {
        let total_pages = results.iter().map(|r| u64::from(r.page_count)).sum();
        let total_size = results.iter().map(|r| r.file_size).sum();

        Self {
            results,
            failures,
            total_pages,
            total_size,
        }
    }

    /// Whether every file validated.
    pub fn all_valid(&self) -> bool {
        self.failures.is_empty()
    }

    /// Format the total file size as a human-readable string.
    pub fn format_total_size(&self) -> String {
        format_file_size(self.total_size)
    }
}

/// Validator for PDF files.
#[derive(Debug, Clone, Default)]
pub struct Validator {
    reader: PdfReader,
}

impl Validator {
    /// Create a new validator with default settings.
    pub fn new() -> Self {
        Self::default()
    }

    /// Validate a single PDF file.
    ///
    /// # Errors
    ///
    /// Returns an error if:
    /// - File does not exist or is not a regular file
    /// - File is not a valid PDF
    /// - File is encrypted
    /// - PDF has no pages
    pub async fn validate_file(&self, path: &Path) -> Result<ValidationResult> {
        let loaded = self.reader.load(path).await?;
        Ok(ValidationResult::from_loaded(&loaded))
    }

    /// Validate several files, loading up to `jobs` at once.
    ///
    /// Per-file problems are collected as failures so one bad file does not
    /// hide the rest.
    ///
    /// # Errors
    ///
    /// Returns [`NoInputs`](PdfSpliceError::NoInputs) for an empty list, and
    /// stops at the first error that is not specific to one file.
    pub async fn validate_files(&self, paths: &[PathBuf], jobs: usize) -> Result<ValidationSummary> {
        if paths.is_empty() {
            return Err(PdfSpliceError::NoInputs);
        }

        let mut results = Vec::new();
        let mut failures = Vec::new();

        for (path, outcome) in paths.iter().zip(self.reader.load_each(paths, jobs).await) {
            match outcome {
                Ok(loaded) => results.push(ValidationResult::from_loaded(&loaded)),
                Err(err) if err.is_recoverable() => {
                    tracing::debug!(path = %path.display(), error = %err, "invalid pdf");
                    failures.push(ValidationFailure {
                        path: path.clone(),
                        kind: err.kind(),
                        error: err.to_string(),
                    });
                }
                Err(err) => return Err(err),
            }
        }

        Ok(ValidationSummary::from_results(results, failures))
    }
}
