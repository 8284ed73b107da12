//! Concatenating documents into one.
//!
//! Every input is loaded before the output is assembled, so an unreadable
//! input aborts the merge without writing anything.

use lopdf::Document;
use std::time::{Duration, Instant};

use crate::assemble::builder::DocumentBuilder;
use crate::config::{MergeConfig, OverwriteMode};
use crate::error::{PdfSpliceError, Result};
use crate::io::{PdfReader, PdfWriter};
use crate::report::{InputSummary, MergeReport};
use crate::utils::format_file_size;

/// Statistics about a merge operation.
#[derive(Debug, Clone)]
pub struct MergeStatistics {
    /// Number of PDFs merged.
    pub files_merged: usize,

    /// Total number of pages in merged document.
    pub total_pages: usize,

    /// Total time taken for merge.
    pub merge_time: Duration,

    /// Time taken to load all PDFs.
    pub load_time: Duration,

    /// Total size of input files.
    pub input_size: u64,
}

impl MergeStatistics {
    /// Format input size as human-readable string.
    pub fn format_input_size(&self) -> String {
        format_file_size(self.input_size)
    }
}

/// Result of a merge operation.
#[derive(Debug)]
pub struct MergeResult {
    /// The merged PDF document.
    pub document: Document,

    /// Statistics about the merge.
    pub statistics: MergeStatistics,

    /// Per-input page counts, in merge order.
    pub inputs: Vec<InputSummary>,
}

/// PDF merger that combines multiple documents.
#[derive(Debug, Clone, Default)]
pub struct Merger {
    reader: PdfReader,
}

impl Merger {
    /// Create a new merger with default settings.
    pub fn new() -> Self {
        Self::default()
    }

    /// Build the merged document in memory.
    ///
    /// # Errors
    ///
    /// Returns an error if:
    /// - The config is invalid
    /// - Any input cannot be loaded (the earliest failing input is reported)
    /// - The page selection passes the end of an input
    ///
    /// # Examples
    ///
    /// ```no_run
    /// # use pdfsplice::assemble::merger::Merger;
    /// # use pdfsplice::config::MergeConfig;
    /// # async fn example(config: MergeConfig) -> Result<(), Box<dyn std::error::Error>> {
    /// let result = Merger::new().merge(&config).await?;
    /// println!("Merged {} files into {} pages",
    ///          result.statistics.files_merged,
    ///          result.statistics.total_pages);
    /// # Ok(())
    /// # }
    /// ```
    pub async fn merge(&self, config: &MergeConfig) -> Result<MergeResult> {
        config
            .validate()
            .map_err(|e| PdfSpliceError::invalid_config(e.to_string()))?;

        let merge_start = Instant::now();
        let loaded = self
            .reader
            .load_in_order(config.inputs(), config.effective_jobs())
            .await?;
        let load_time = merge_start.elapsed();

        let mut builder = DocumentBuilder::for_sources(loaded.iter().map(|l| &l.document));
        let mut inputs = Vec::with_capacity(loaded.len());

        for source in &loaded {
            let pages = match &config.page_range {
                Some(ranges) => {
                    ranges.check_bounds(source.page_count)?;
                    ranges.page_numbers()
                }
                None => (1..=source.page_count).collect(),
            };

            builder.append_pages(&source.document, &pages, config.rotation)?;
            tracing::debug!(
                input = %source.path.display(),
                pages = pages.len(),
                "appended input"
            );

            inputs.push(InputSummary {
                path: source.path.clone(),
                total_pages: source.page_count,
                pages_taken: u32::try_from(pages.len()).unwrap_or(u32::MAX),
            });
        }

        let document = builder.finish();

        let statistics = MergeStatistics {
            files_merged: loaded.len(),
            total_pages: document.get_pages().len(),
            merge_time: merge_start.elapsed(),
            load_time,
            input_size: loaded.iter().map(|l| l.file_size).sum(),
        };

        Ok(MergeResult {
            document,
            statistics,
            inputs,
        })
    }

    /// Merge and write the result to `config.output`.
    ///
    /// An existing output is only replaced in [`OverwriteMode::Force`]. A dry
    /// run loads and assembles everything but writes nothing.
    pub async fn merge_to_file(&self, config: &MergeConfig) -> Result<MergeReport> {
        let result = self.merge(config).await?;

        let output_bytes = if config.dry_run {
            None
        } else {
            let writer = PdfWriter::with_compression(config.compression);
            if config.overwrite_mode != OverwriteMode::Force && writer.exists(&config.output).await {
                return Err(PdfSpliceError::output_exists(config.output.clone()));
            }
            writer.can_write(&config.output).await?;

            let stats = writer
                .save_with_stats(result.document, &config.output)
                .await?;
            tracing::info!(
                output = %config.output.display(),
                pages = result.statistics.total_pages,
                size = %stats.format_file_size(),
                "wrote merged pdf"
            );
            Some(stats.file_size)
        };

        Ok(MergeReport {
            output: config.output.clone(),
            dry_run: config.dry_run,
            inputs: result.inputs,
            total_pages: result.statistics.total_pages,
            input_bytes: result.statistics.input_size,
            output_bytes,
            load_time: result.statistics.load_time,
            merge_time: result.statistics.merge_time,
        })
    }
}
