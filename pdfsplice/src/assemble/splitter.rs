//! Splitting one document into one output per page range.
//!
//! A split runs in two phases. [`Splitter::prepare`] loads the source and
//! plans every output file name, so range, naming and duplicate errors
//! surface before anything is written. [`Splitter::execute`] then writes
//! the outputs in range order. The first failed write stops the split:
//! outputs already written stay on disk and later ones are not attempted.

use serde::Serialize;
use std::collections::HashSet;
use std::path::{Path, PathBuf};

use crate::assemble::builder::DocumentBuilder;
use crate::config::{OverwriteMode, SplitConfig};
use crate::error::{PdfSpliceError, Result};
use crate::io::{LoadedPdf, PdfReader, PdfWriter, WriteStatistics};
use crate::range::PageRange;
use crate::report::{OutputSummary, SplitReport, write_split_log};

/// One output file of a split.
#[derive(Debug, Clone, Serialize)]
pub struct PlannedOutput {
    /// Source pages copied into the output.
    pub range: PageRange,
    /// File name inside the output directory.
    pub file_name: String,
    /// Full output path.
    pub path: PathBuf,
}

/// Every output a split will produce, in range order.
#[derive(Debug, Clone, Serialize)]
pub struct SplitPlan {
    /// Source document.
    pub source: PathBuf,
    /// Page count of the source.
    pub total_pages: u32,
    /// Directory the outputs go to.
    pub output_dir: PathBuf,
    /// Planned outputs.
    pub outputs: Vec<PlannedOutput>,
}

impl SplitPlan {
    /// Plan the outputs of `config` for a source of `total_pages` pages.
    ///
    /// # Errors
    ///
    /// Returns [`PageOutOfRange`](PdfSpliceError::PageOutOfRange) if a range
    /// passes the end of the source, and
    /// [`DuplicateOutputName`](PdfSpliceError::DuplicateOutputName) if two
    /// user-given names resolve to the same file (compared
    /// case-insensitively). Repeated default names get a `_2`, `_3`, ...
    /// suffix instead.
    pub fn new(config: &SplitConfig, total_pages: u32) -> Result<Self> {
        config.ranges.check_bounds(total_pages)?;

        let output_dir = config.effective_output_dir();
        let stem = config.input_stem();
        let stamp = config.date_stamp.as_deref();

        // Names the user gave are claimed first; only they can clash.
        let mut taken = HashSet::new();
        for (index, range) in config.ranges.iter().enumerate() {
            if let Some(name) = config.names.get(index).map(|n| n.trim()) {
                let file_name = output_file_name(&stem, range, Some(name), stamp);
                if !taken.insert(file_name.to_lowercase()) {
                    return Err(PdfSpliceError::DuplicateOutputName { name: file_name });
                }
            }
        }

        let mut outputs = Vec::with_capacity(config.ranges.len());
        for (index, range) in config.ranges.iter().enumerate() {
            let file_name = match config.names.get(index).map(|n| n.trim()) {
                Some(name) => output_file_name(&stem, range, Some(name), stamp),
                None => default_file_name(&stem, range, stamp, &mut taken),
            };

            outputs.push(PlannedOutput {
                range: *range,
                path: output_dir.join(&file_name),
                file_name,
            });
        }

        Ok(Self {
            source: config.input.clone(),
            total_pages,
            output_dir,
            outputs,
        })
    }

    /// Planned outputs that already exist on disk.
    pub fn existing_outputs(&self) -> Vec<&Path> {
        self.outputs
            .iter()
            .map(|output| output.path.as_path())
            .filter(|path| path.exists())
            .collect()
    }
}

/// File name for one split output.
///
/// A given name is used as is, with any `.pdf` extension normalized.
/// Otherwise the name is `<stem>_<range>`. A date stamp is appended as
/// `_<DDMMYYYY>` in both cases.
pub fn output_file_name(
    stem: &str,
    range: &PageRange,
    name: Option<&str>,
    date_stamp: Option<&str>,
) -> String {
    let base = match name {
        Some(name) => strip_pdf_extension(name).to_string(),
        None => format!("{stem}_{range}"),
    };

    match date_stamp {
        Some(stamp) => format!("{base}_{stamp}.pdf"),
        None => format!("{base}.pdf"),
    }
}

/// Default name for `range`, suffixed with a counter when an earlier
/// output already took it.
fn default_file_name(
    stem: &str,
    range: &PageRange,
    date_stamp: Option<&str>,
    taken: &mut HashSet<String>,
) -> String {
    let base = format!("{stem}_{range}");
    let mut file_name = output_file_name(stem, range, None, date_stamp);
    let mut copy = 1;
    while !taken.insert(file_name.to_lowercase()) {
        copy += 1;
        file_name = output_file_name(stem, range, Some(&format!("{base}_{copy}")), date_stamp);
    }
    file_name
}

fn strip_pdf_extension(name: &str) -> &str {
    let split = name.len().saturating_sub(4);
    match name.get(split..) {
        Some(ext) if ext.eq_ignore_ascii_case(".pdf") => &name[..split],
        _ => name,
    }
}

/// A loaded source together with its output plan.
#[derive(Debug)]
pub struct PreparedSplit {
    /// The source document.
    pub source: LoadedPdf,
    /// Outputs to produce.
    pub plan: SplitPlan,
}

/// Splits documents according to a [`SplitConfig`].
#[derive(Debug, Clone, Default)]
pub struct Splitter {
    reader: PdfReader,
}

impl Splitter {
    /// Create a splitter with default settings.
    pub fn new() -> Self {
        Self::default()
    }

    /// Validate the config, load the source and plan the outputs.
    ///
    /// # Errors
    ///
    /// Config errors for invalid options, read errors for the source, parse
    /// errors for out-of-bounds ranges, and clashing user-given names.
    pub async fn prepare(&self, config: &SplitConfig) -> Result<PreparedSplit> {
        config
            .validate()
            .map_err(|e| PdfSpliceError::invalid_config(e.to_string()))?;

        let source = self.reader.load(&config.input).await?;
        let plan = SplitPlan::new(config, source.page_count)?;

        tracing::debug!(
            source = %plan.source.display(),
            outputs = plan.outputs.len(),
            dir = %plan.output_dir.display(),
            "planned split"
        );

        Ok(PreparedSplit { source, plan })
    }

    /// Write the outputs of a prepared split.
    ///
    /// Existing outputs are only replaced in [`OverwriteMode::Force`]; any
    /// other mode refuses before the first write.
    ///
    /// # Errors
    ///
    /// [`OutputExists`](PdfSpliceError::OutputExists) when an output exists
    /// and overwriting is not allowed, and
    /// [`SplitAborted`](PdfSpliceError::SplitAborted) when a write fails
    /// part-way.
    pub async fn execute(&self, prepared: PreparedSplit, config: &SplitConfig) -> Result<SplitReport> {
        let PreparedSplit { source, plan } = prepared;

        if config.dry_run {
            return Ok(SplitReport::planned(&plan));
        }

        if config.overwrite_mode != OverwriteMode::Force
            && let Some(existing) = plan.existing_outputs().first()
        {
            return Err(PdfSpliceError::output_exists(existing.to_path_buf()));
        }

        let writer = PdfWriter::with_compression(config.compression);
        writer.ensure_dir(&plan.output_dir).await?;

        let mut written = Vec::with_capacity(plan.outputs.len());
        let mut failure = None;
        for output in &plan.outputs {
            match self.write_output(&source, output, &writer).await {
                Ok(stats) => {
                    tracing::info!(
                        output = %output.path.display(),
                        range = %output.range,
                        "wrote split output"
                    );
                    written.push(OutputSummary {
                        path: output.path.clone(),
                        range: output.range,
                        pages: output.range.len(),
                        bytes: Some(stats.file_size),
                    });
                }
                Err(err) => {
                    tracing::error!(output = %output.path.display(), error = %err, "split output failed");
                    failure = Some((output, err));
                    break;
                }
            }
        }

        let log_file = if config.write_log {
            let note = failure
                .as_ref()
                .map(|(output, err)| format!("{}: {err}", output.file_name));
            match write_split_log(&plan, note.as_deref()).await {
                Ok(path) => Some(path),
                Err(err) => {
                    tracing::warn!(error = %err, "could not write split log");
                    None
                }
            }
        } else {
            None
        };

        if let Some((output, err)) = failure {
            return Err(PdfSpliceError::SplitAborted {
                failed: output.path.clone(),
                written: written.into_iter().map(|o| o.path).collect(),
                source: Box::new(err),
            });
        }

        Ok(SplitReport {
            source: plan.source,
            total_pages: plan.total_pages,
            output_dir: plan.output_dir,
            dry_run: false,
            outputs: written,
            log_file,
        })
    }

    /// Prepare and execute in one step.
    pub async fn split(&self, config: &SplitConfig) -> Result<SplitReport> {
        let prepared = self.prepare(config).await?;
        self.execute(prepared, config).await
    }

    async fn write_output(
        &self,
        source: &LoadedPdf,
        output: &PlannedOutput,
        writer: &PdfWriter,
    ) -> Result<WriteStatistics> {
        let pages: Vec<u32> = output.range.pages().collect();

        let mut builder = DocumentBuilder::for_sources([&source.document]);
        builder.append_pages(&source.document, &pages, None)?;

        writer.save_with_stats(builder.finish(), &output.path).await
    }
}
