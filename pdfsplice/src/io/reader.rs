//! PDF reading and loading operations.
//!
//! Parsing is delegated to `lopdf` and runs on the blocking thread pool so the
//! async caller is never stalled by a large file.
//!
//! # Examples
//!
//! ```no_run
//! use pdfsplice::io::reader::PdfReader;
//! use std::path::PathBuf;
//!
//! # async fn example() -> Result<(), Box<dyn std::error::Error>> {
//! let reader = PdfReader::new();
//! let paths = vec![PathBuf::from("a.pdf"), PathBuf::from("b.pdf")];
//! let loaded = reader.load_in_order(&paths, 4).await?;
//! # Ok(())
//! # }
//! ```

use futures::stream::{self, StreamExt, TryStreamExt};
use lopdf::Document;
use std::path::{Path, PathBuf};
use std::time::{Duration, Instant};
use tokio::task;

use crate::error::{PdfSpliceError, Result};

/// A loaded source document.
///
/// Owned by the operation that opened it and dropped when that operation
/// finishes.
#[derive(Debug)]
pub struct LoadedPdf {
    /// The PDF document.
    pub document: Document,

    /// Path to the source file.
    pub path: PathBuf,

    /// Number of pages in the document.
    pub page_count: u32,

    /// Time taken to load the document.
    pub load_time: Duration,

    /// File size in bytes.
    pub file_size: u64,
}

/// PDF reader. Documents without pages are rejected.
#[derive(Debug, Clone, Copy)]
pub struct PdfReader;

impl PdfReader {
    /// Create a new PDF reader.
    pub fn new() -> Self {
        Self
    }

    /// Load a single PDF document.
    ///
    /// # Errors
    ///
    /// Returns an error if:
    /// - The path does not exist or is not a regular file
    /// - lopdf cannot parse the file
    /// - The PDF is encrypted
    /// - The PDF has no pages
    pub async fn load(&self, path: &Path) -> Result<LoadedPdf> {
        let path_buf = path.to_path_buf();

        let metadata = match tokio::fs::metadata(&path_buf).await {
            Ok(metadata) => metadata,
            Err(err) if err.kind() == std::io::ErrorKind::NotFound => {
                return Err(PdfSpliceError::file_not_found(path_buf));
            }
            Err(err) => {
                return Err(PdfSpliceError::FileNotAccessible {
                    path: path_buf,
                    source: err,
                });
            }
        };

        if !metadata.is_file() {
            return Err(PdfSpliceError::not_a_file(path_buf));
        }

        let start = Instant::now();
        let load_path = path_buf.clone();
        let document = task::spawn_blocking(move || Document::load(&load_path))
            .await
            .map_err(|e| PdfSpliceError::other(format!("Load task failed: {e}")))?
            .map_err(|e| {
                let err_msg = e.to_string();
                if err_msg.contains("encrypt") || err_msg.contains("password") {
                    PdfSpliceError::encrypted_pdf(path_buf.clone())
                } else {
                    PdfSpliceError::failed_to_load_pdf(path_buf.clone(), err_msg)
                }
            })?;

        let page_count = u32::try_from(document.get_pages().len())
            .map_err(|_| PdfSpliceError::corrupted_pdf(path_buf.clone(), "too many pages"))?;

        if page_count == 0 {
            return Err(PdfSpliceError::corrupted_pdf(path_buf, "PDF has no pages"));
        }

        let load_time = start.elapsed();
        tracing::debug!(
            path = %path_buf.display(),
            pages = page_count,
            elapsed_ms = load_time.as_millis() as u64,
            "loaded pdf"
        );

        Ok(LoadedPdf {
            document,
            path: path_buf,
            page_count,
            load_time,
            file_size: metadata.len(),
        })
    }

    /// Load several documents, returning them in input order.
    ///
    /// Up to `workers` files are parsed at once, but results are consumed in
    /// input order: the error returned is the one for the earliest input that
    /// failed, and no later document is handed back.
    pub async fn load_in_order(&self, paths: &[PathBuf], workers: usize) -> Result<Vec<LoadedPdf>> {
        let reader = *self;

        stream::iter(paths.iter().cloned())
            .map(|path| async move { reader.load(&path).await })
            .buffered(workers.max(1))
            .try_collect()
            .await
    }

    /// Load several documents, keeping every outcome.
    ///
    /// Used where one bad file should not hide the others (`info`).
    pub async fn load_each(&self, paths: &[PathBuf], workers: usize) -> Vec<Result<LoadedPdf>> {
        let reader = *self;

        stream::iter(paths.iter().cloned())
            .map(|path| async move { reader.load(&path).await })
            .buffered(workers.max(1))
            .collect()
            .await
    }
}

impl Default for PdfReader {
    fn default() -> Self {
        Self::new()
    }
}
