//! PDF writing and saving operations.
//!
//! This module provides safe PDF writing with:
//! - Atomic writes (write to a sibling temp file, then rename)
//! - Compression support
//! - Output directory creation
//! - Write statistics
//!
//! # Examples
//!
//! ```no_run
//! use pdfsplice::io::writer::PdfWriter;
//! use lopdf::Document;
//! use std::path::Path;
//!
//! # async fn example(doc: Document) -> Result<(), Box<dyn std::error::Error>> {
//! let writer = PdfWriter::new();
//! writer.save(doc, Path::new("output.pdf")).await?;
//! # Ok(())
//! # }
//! ```

use lopdf::Document;
use serde::Serialize;
use std::io::Write;
use std::path::{Path, PathBuf};
use std::time::{Duration, Instant};
use tokio::task;

use crate::config::CompressionLevel;
use crate::error::{PdfSpliceError, Result};
use crate::utils::format_file_size;

/// Options for writing PDF files.
#[derive(Debug, Clone)]
pub struct WriteOptions {
    /// Use atomic writes (write to temp file, then rename).
    pub atomic: bool,

    /// Compression applied before writing.
    pub compression: CompressionLevel,

    /// Renumber objects so the output has a compact cross-reference table.
    pub optimize: bool,

    /// Buffer size for writing (in bytes).
    pub buffer_size: usize,
}

impl Default for WriteOptions {
    fn default() -> Self {
        Self {
            atomic: true,
            compression: CompressionLevel::Standard,
            optimize: true,
            buffer_size: 8192,
        }
    }
}

/// Statistics about a write operation.
#[derive(Debug, Clone, Serialize)]
pub struct WriteStatistics {
    /// Time taken to write the file.
    #[serde(skip)]
    pub write_time: Duration,

    /// Size of the written file in bytes.
    pub file_size: u64,

    /// Path where the file was written.
    pub output_path: PathBuf,

    /// Whether compression was applied.
    pub compressed: bool,
}

impl WriteStatistics {
    /// Format file size as human-readable string.
    pub fn format_file_size(&self) -> String {
        format_file_size(self.file_size)
    }
}

/// PDF writer with configurable behavior.
#[derive(Debug, Clone, Default)]
pub struct PdfWriter {
    options: WriteOptions,
}

impl PdfWriter {
    /// Create a new PDF writer with default options.
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a writer with custom options.
    pub fn with_options(options: WriteOptions) -> Self {
        Self { options }
    }

    /// Create a writer using the given compression level.
    pub fn with_compression(compression: CompressionLevel) -> Self {
        Self {
            options: WriteOptions {
                compression,
                ..Default::default()
            },
        }
    }

    /// Save a PDF document to a file.
    ///
    /// # Errors
    ///
    /// Returns a [`Write`](crate::error::ErrorKind::Write) error if the file
    /// cannot be created, written or moved into place.
    pub async fn save(&self, doc: Document, path: &Path) -> Result<()> {
        self.save_with_stats(doc, path).await.map(|_| ())
    }

    /// Save a PDF and return statistics about the operation.
    ///
    /// With atomic writes the document is written to `.<name>.partial` in the
    /// same directory and renamed over `path` only once complete, so a failed
    /// write never leaves a truncated PDF behind.
    pub async fn save_with_stats(&self, doc: Document, path: &Path) -> Result<WriteStatistics> {
        let path_buf = path.to_path_buf();
        let options = self.options.clone();

        let stats = task::spawn_blocking(move || write_document(doc, path_buf, &options))
            .await
            .map_err(|e| PdfSpliceError::other(format!("Write task failed: {e}")))??;

        tracing::debug!(
            output = %stats.output_path.display(),
            bytes = stats.file_size,
            "wrote pdf"
        );

        Ok(stats)
    }

    /// Create `dir` and its parents if they do not exist yet.
    pub async fn ensure_dir(&self, dir: &Path) -> Result<()> {
        if dir.as_os_str().is_empty() {
            return Ok(());
        }
        tokio::fs::create_dir_all(dir)
            .await
            .map_err(|e| PdfSpliceError::FailedToCreateOutput {
                path: dir.to_path_buf(),
                source: e,
            })
    }

    /// Check that the parent directory of `path` exists and is writable.
    ///
    /// Performs pre-flight checks without actually writing.
    pub async fn can_write(&self, path: &Path) -> Result<()> {
        let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) else {
            return Ok(());
        };

        let metadata =
            tokio::fs::metadata(parent)
                .await
                .map_err(|e| PdfSpliceError::FailedToCreateOutput {
                    path: path.to_path_buf(),
                    source: e,
                })?;

        if !metadata.is_dir() {
            return Err(PdfSpliceError::invalid_config(format!(
                "Output location is not a directory: {}",
                parent.display()
            )));
        }

        if metadata.permissions().readonly() {
            return Err(PdfSpliceError::FailedToCreateOutput {
                path: path.to_path_buf(),
                source: std::io::Error::new(
                    std::io::ErrorKind::PermissionDenied,
                    "output directory is read-only",
                ),
            });
        }

        Ok(())
    }

    /// Check if output file exists.
    pub async fn exists(&self, path: &Path) -> bool {
        tokio::fs::metadata(path).await.is_ok()
    }
}

fn write_document(
    mut doc: Document,
    path: PathBuf,
    options: &WriteOptions,
) -> Result<WriteStatistics> {
    let start = Instant::now();

    match options.compression {
        CompressionLevel::None => {}
        CompressionLevel::Standard => doc.compress(),
        CompressionLevel::Maximum => {
            doc.prune_objects();
            doc.compress();
        }
    }

    if options.optimize {
        doc.renumber_objects();
    }

    let write_path = if options.atomic {
        partial_path(&path)
    } else {
        path.clone()
    };

    let result = write_to(&mut doc, &write_path, options.buffer_size).and_then(|()| {
        if options.atomic {
            std::fs::rename(&write_path, &path).map_err(|e| PdfSpliceError::FailedToWrite {
                path: path.clone(),
                source: e,
            })
        } else {
            Ok(())
        }
    });

    if let Err(err) = result {
        if options.atomic {
            let _ = std::fs::remove_file(&write_path);
        }
        return Err(err);
    }

    let file_size = std::fs::metadata(&path).map(|m| m.len()).unwrap_or(0);

    Ok(WriteStatistics {
        write_time: start.elapsed(),
        file_size,
        output_path: path,
        compressed: options.compression != CompressionLevel::None,
    })
}

fn write_to(doc: &mut Document, path: &Path, buffer_size: usize) -> Result<()> {
    let file = std::fs::File::create(path).map_err(|e| PdfSpliceError::FailedToCreateOutput {
        path: path.to_path_buf(),
        source: e,
    })?;

    let mut writer = std::io::BufWriter::with_capacity(buffer_size, file);

    doc.save_to(&mut writer)
        .map_err(|e| PdfSpliceError::FailedToWrite {
            path: path.to_path_buf(),
            source: std::io::Error::other(e),
        })?;

    writer.flush().map_err(|e| PdfSpliceError::FailedToWrite {
        path: path.to_path_buf(),
        source: e,
    })
}

/// Sibling temp path used for atomic writes.
fn partial_path(path: &Path) -> PathBuf {
    let name = path
        .file_name()
        .map(|n| n.to_string_lossy().into_owned())
        .unwrap_or_else(|| "output.pdf".to_string());
    path.with_file_name(format!(".{name}.partial"))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ErrorKind;
    use crate::test_support::numbered_document;
    use tempfile::TempDir;

    #[tokio::test]
    async fn test_save_pdf() {
        let temp_dir = TempDir::new().unwrap();
        let output_path = temp_dir.path().join("output.pdf");

        PdfWriter::new()
            .save(numbered_document(2), &output_path)
            .await
            .unwrap();

        assert!(output_path.exists());
        let reloaded = Document::load(&output_path).unwrap();
        assert_eq!(reloaded.get_pages().len(), 2);
    }

    #[tokio::test]
    async fn test_atomic_write_leaves_no_partial_file() {
        let temp_dir = TempDir::new().unwrap();
        let output_path = temp_dir.path().join("output.pdf");

        PdfWriter::new()
            .save(numbered_document(1), &output_path)
            .await
            .unwrap();

        assert!(!partial_path(&output_path).exists());
    }

    #[tokio::test]
    async fn test_save_with_stats() {
        let temp_dir = TempDir::new().unwrap();
        let output_path = temp_dir.path().join("output.pdf");

        let stats = PdfWriter::new()
            .save_with_stats(numbered_document(1), &output_path)
            .await
            .unwrap();

        assert!(stats.file_size > 0);
        assert_eq!(stats.output_path, output_path);
        assert!(stats.compressed);
    }

    #[tokio::test]
    async fn test_custom_options() {
        let temp_dir = TempDir::new().unwrap();
        let output_path = temp_dir.path().join("output.pdf");

        let writer = PdfWriter::with_options(WriteOptions {
            atomic: false,
            compression: CompressionLevel::None,
            optimize: false,
            buffer_size: 4096,
        });

        let stats = writer
            .save_with_stats(numbered_document(1), &output_path)
            .await
            .unwrap();
        assert!(!stats.compressed);
        assert!(output_path.exists());
    }

    #[tokio::test]
    async fn test_save_into_missing_directory_is_write_error() {
        let temp_dir = TempDir::new().unwrap();
        let output_path = temp_dir.path().join("missing").join("output.pdf");

        let err = PdfWriter::new()
            .save(numbered_document(1), &output_path)
            .await
            .unwrap_err();

        assert_eq!(err.kind(), ErrorKind::Write);
        assert!(!output_path.exists());
    }

    #[tokio::test]
    async fn test_ensure_dir_creates_parents() {
        let temp_dir = TempDir::new().unwrap();
        let nested = temp_dir.path().join("a").join("b");

        PdfWriter::new().ensure_dir(&nested).await.unwrap();
        assert!(nested.is_dir());
    }

    #[tokio::test]
    async fn test_can_write() {
        let temp_dir = TempDir::new().unwrap();
        let writer = PdfWriter::new();

        assert!(writer.can_write(&temp_dir.path().join("out.pdf")).await.is_ok());
        assert!(
            writer
                .can_write(Path::new("/nonexistent/dir/out.pdf"))
                .await
                .is_err()
        );
    }

    #[tokio::test]
    async fn test_exists() {
        let temp_dir = TempDir::new().unwrap();
        let existing_path = temp_dir.path().join("existing.pdf");
        std::fs::File::create(&existing_path).unwrap();

        let writer = PdfWriter::new();

        assert!(writer.exists(&existing_path).await);
        assert!(!writer.exists(&temp_dir.path().join("nonexistent.pdf")).await);
    }

    #[test]
    fn test_partial_path() {
        assert_eq!(
            partial_path(Path::new("/out/a.pdf")),
            PathBuf::from("/out/.a.pdf.partial")
        );
    }
}
