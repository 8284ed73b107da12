//! Outcome reports for split and merge, and the split log file.
//!
//! Reports are plain data: the CLI renders them as text or serializes them
//! with `--json`.

use serde::Serialize;
use std::path::{Path, PathBuf};
use std::time::Duration;
use time::OffsetDateTime;
use time::macros::format_description;

use crate::assemble::splitter::SplitPlan;
use crate::error::{PdfSpliceError, Result};
use crate::range::{PageRange, RangeSet};

/// File name of the log written next to split outputs.
pub const SPLIT_LOG_NAME: &str = "split_log.txt";

/// One output of a split.
#[derive(Debug, Clone, Serialize)]
pub struct OutputSummary {
    /// Where the output was (or would be) written.
    pub path: PathBuf,
    /// Source pages it holds.
    pub range: PageRange,
    /// Number of pages in the output.
    pub pages: u32,
    /// Size on disk. `None` for a dry run.
    pub bytes: Option<u64>,
}

/// Result of a split.
#[derive(Debug, Clone, Serialize)]
pub struct SplitReport {
    /// Source document.
    pub source: PathBuf,
    /// Page count of the source.
    pub total_pages: u32,
    /// Directory holding the outputs.
    pub output_dir: PathBuf,
    /// Nothing was written.
    pub dry_run: bool,
    /// Outputs in range order.
    pub outputs: Vec<OutputSummary>,
    /// Split log, if one was written.
    pub log_file: Option<PathBuf>,
}

impl SplitReport {
    /// Report for a plan that was not executed.
    pub fn planned(plan: &SplitPlan) -> Self {
        Self {
            source: plan.source.clone(),
            total_pages: plan.total_pages,
            output_dir: plan.output_dir.clone(),
            dry_run: true,
            outputs: plan
                .outputs
                .iter()
                .map(|output| OutputSummary {
                    path: output.path.clone(),
                    range: output.range,
                    pages: output.range.len(),
                    bytes: None,
                })
                .collect(),
            log_file: None,
        }
    }
}

/// Per-input line of a merge report.
#[derive(Debug, Clone, Serialize)]
pub struct InputSummary {
    /// Input document.
    pub path: PathBuf,
    /// Pages the input has.
    pub total_pages: u32,
    /// Pages taken from it.
    pub pages_taken: u32,
}

/// Result of a merge.
#[derive(Debug, Clone, Serialize)]
pub struct MergeReport {
    /// Output document.
    pub output: PathBuf,
    /// Nothing was written.
    pub dry_run: bool,
    /// Inputs in merge order.
    pub inputs: Vec<InputSummary>,
    /// Pages in the merged document.
    pub total_pages: usize,
    /// Combined size of the inputs.
    pub input_bytes: u64,
    /// Size of the written output. `None` for a dry run.
    pub output_bytes: Option<u64>,
    /// Time spent loading inputs.
    #[serde(skip)]
    pub load_time: Duration,
    /// Time spent from first load to finished document.
    #[serde(skip)]
    pub merge_time: Duration,
}

fn now() -> OffsetDateTime {
    OffsetDateTime::now_local().unwrap_or_else(|_| OffsetDateTime::now_utc())
}

/// Today's date as `DDMMYYYY`, used for date-stamped output names.
pub fn today_stamp() -> String {
    now()
        .format(format_description!("[day][month][year]"))
        .unwrap_or_default()
}

fn log_timestamp() -> String {
    now()
        .format(format_description!(
            "[year]-[month]-[day] [hour]:[minute]:[second]"
        ))
        .unwrap_or_default()
}

/// Text of the split log.
///
/// Lists every planned output with its source pages. When the split
/// stopped early, `failure` is recorded at the end.
pub fn render_split_log(plan: &SplitPlan, timestamp: &str, failure: Option<&str>) -> String {
    let source_name = plan
        .source
        .file_name()
        .map(|n| n.to_string_lossy().into_owned())
        .unwrap_or_default();

    let mut log = format!(
        "Split Log for: {source_name}\nTotal Pages: {}\nSplit Time: {timestamp}\n\n",
        plan.total_pages
    );
    for output in &plan.outputs {
        log.push_str(&format!(
            "Pages {}-{} -> {}\n",
            output.range.start(),
            output.range.end(),
            output.file_name
        ));
    }
    if let Some(failure) = failure {
        log.push_str(&format!("\nStopped: {failure}\n"));
    }
    log
}

/// Write the split log into the plan's output directory.
pub async fn write_split_log(plan: &SplitPlan, failure: Option<&str>) -> Result<PathBuf> {
    let path = plan.output_dir.join(SPLIT_LOG_NAME);
    let text = render_split_log(plan, &log_timestamp(), failure);

    tokio::fs::write(&path, text)
        .await
        .map_err(|e| PdfSpliceError::FailedToWrite {
            path: path.clone(),
            source: e,
        })?;
    Ok(path)
}

/// Describe the ranges of a set for display: `1-3, 5`.
pub fn describe_ranges(ranges: &RangeSet) -> String {
    ranges
        .iter()
        .map(ToString::to_string)
        .collect::<Vec<_>>()
        .join(", ")
}

/// Display name of a path for report lines.
pub fn display_name(path: &Path) -> String {
    path.file_name()
        .map(|n| n.to_string_lossy().into_owned())
        .unwrap_or_else(|| path.display().to_string())
}
