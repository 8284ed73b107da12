//! Configuration for split and merge operations.
//!
//! The CLI turns its arguments into a [`SplitConfig`] or [`MergeConfig`];
//! library callers can build them directly. Both are checked with
//! `validate()` before any file is touched. This module handles:
//! - Validation of option combinations
//! - Defaults (output directory, compression)
//! - Output naming inputs (per-range names, date stamp)

use anyhow::{Result, bail};

use crate::PdfSpliceError;
use crate::range::RangeSet;
use std::path::{Path, PathBuf};
use std::str::FromStr;

/// Directory created next to the source when no output directory is given.
pub const DEFAULT_SPLIT_DIR: &str = "split_output";

/// Compression level for output PDFs.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, serde::Serialize)]
#[serde(rename_all = "lowercase")]
pub enum CompressionLevel {
    /// No compression - streams are written as they are.
    None,
    /// Compress uncompressed streams.
    #[default]
    Standard,
    /// Compress and drop unreachable objects.
    Maximum,
}

impl FromStr for CompressionLevel {
    type Err = PdfSpliceError;

    /// Parse compression level from "none", "standard" or "maximum" (any case).
    fn from_str(s: &str) -> crate::Result<Self> {
        match s.to_lowercase().as_str() {
            "none" => Ok(Self::None),
            "standard" => Ok(Self::Standard),
            "maximum" => Ok(Self::Maximum),
            _ => Err(PdfSpliceError::invalid_config(format!(
                "Invalid compression level: {s}. Must be one of: none, standard, maximum"
            ))),
        }
    }
}

/// Clockwise page rotation applied while assembling.
#[derive(Debug, Clone, Copy, PartialEq, Eq, serde::Serialize)]
pub enum Rotation {
    /// Rotate 90 degrees clockwise.
    Clockwise90,
    /// Rotate 180 degrees.
    Rotate180,
    /// Rotate 270 degrees clockwise (90 counter-clockwise).
    Clockwise270,
}

impl Rotation {
    /// Parse rotation from degrees: 90, 180 or 270.
    pub fn from_degrees(degrees: u16) -> crate::Result<Self> {
        match degrees {
            90 => Ok(Self::Clockwise90),
            180 => Ok(Self::Rotate180),
            270 => Ok(Self::Clockwise270),
            _ => Err(PdfSpliceError::invalid_config(format!(
                "Invalid rotation: {degrees}. Must be 90, 180, or 270"
            ))),
        }
    }

    /// Get rotation as degrees.
    pub fn as_degrees(&self) -> i64 {
        match self {
            Self::Clockwise90 => 90,
            Self::Rotate180 => 180,
            Self::Clockwise270 => 270,
        }
    }
}

/// What to do when an output file already exists.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum OverwriteMode {
    /// Ask before overwriting (default).
    #[default]
    Prompt,
    /// Always overwrite.
    Force,
    /// Never overwrite, error if the file exists.
    NoClobber,
}

/// Settings for splitting one document into several.
#[derive(Debug, Clone)]
pub struct SplitConfig {
    /// Source PDF.
    pub input: PathBuf,

    /// Ranges to extract, one output per range. Bounds are checked once the
    /// source is loaded.
    pub ranges: RangeSet,

    /// Output names matched to ranges by position. Ranges without a name get
    /// `<stem>_<range>.pdf`.
    pub names: Vec<String>,

    /// Output directory. Defaults to `split_output` next to the source.
    pub output_dir: Option<PathBuf>,

    /// `DDMMYYYY` stamp appended to named outputs.
    pub date_stamp: Option<String>,

    /// File overwrite behavior.
    pub overwrite_mode: OverwriteMode,

    /// Compression level for every output.
    pub compression: CompressionLevel,

    /// Plan outputs without writing anything.
    pub dry_run: bool,

    /// Write `split_log.txt` into the output directory.
    pub write_log: bool,
}

impl SplitConfig {
    /// Config with defaults for everything but the source and ranges.
    pub fn new(input: impl Into<PathBuf>, ranges: RangeSet) -> Self {
        Self {
            input: input.into(),
            ranges,
            names: Vec::new(),
            output_dir: None,
            date_stamp: None,
            overwrite_mode: OverwriteMode::default(),
            compression: CompressionLevel::default(),
            dry_run: false,
            write_log: true,
        }
    }

    /// Validate the configuration.
    ///
    /// # Errors
    ///
    /// Returns an error if:
    /// - More names than ranges are given
    /// - A name is blank or contains a path separator
    /// - The date stamp is not eight digits
    pub fn validate(&self) -> Result<()> {
        if self.names.len() > self.ranges.len() {
            bail!(
                "{} output name(s) given for {} range(s)",
                self.names.len(),
                self.ranges.len()
            );
        }

        for name in &self.names {
            let name = name.trim();
            if name.is_empty() {
                bail!("Output names cannot be empty");
            }
            if name.contains('/') || name.contains('\\') {
                bail!("Output name must be a file name, not a path: {name}");
            }
        }

        if let Some(stamp) = &self.date_stamp
            && (stamp.len() != 8 || !stamp.bytes().all(|b| b.is_ascii_digit()))
        {
            bail!("Date stamp must be eight digits (DDMMYYYY): {stamp}");
        }

        Ok(())
    }

    /// Directory the outputs go to.
    pub fn effective_output_dir(&self) -> PathBuf {
        match &self.output_dir {
            Some(dir) => dir.clone(),
            None => self
                .input
                .parent()
                .unwrap_or_else(|| Path::new(""))
                .join(DEFAULT_SPLIT_DIR),
        }
    }

    /// File stem of the source, used for unnamed outputs.
    pub fn input_stem(&self) -> String {
        self.input
            .file_stem()
            .map(|s| s.to_string_lossy().into_owned())
            .unwrap_or_else(|| "document".to_string())
    }
}

/// Settings for concatenating documents.
#[derive(Debug, Clone)]
pub struct MergeConfig {
    /// Input PDF file paths, in merge order.
    pub inputs: Vec<PathBuf>,

    /// Output PDF file path.
    pub output: PathBuf,

    /// Pages to take from each input. `None` takes every page.
    pub page_range: Option<RangeSet>,

    /// Rotation added to every merged page.
    pub rotation: Option<Rotation>,

    /// File overwrite behavior.
    pub overwrite_mode: OverwriteMode,

    /// Compression level for the output.
    pub compression: CompressionLevel,

    /// Load and check inputs without writing.
    pub dry_run: bool,

    /// Number of inputs loaded concurrently (None = auto-detect).
    pub jobs: Option<usize>,
}

impl MergeConfig {
    /// Config with defaults for everything but inputs and output.
    pub fn new(inputs: Vec<PathBuf>, output: impl Into<PathBuf>) -> Self {
        Self {
            inputs,
            output: output.into(),
            page_range: None,
            rotation: None,
            overwrite_mode: OverwriteMode::default(),
            compression: CompressionLevel::default(),
            dry_run: false,
            jobs: None,
        }
    }

    /// Returns a reference to inputs.
    pub fn inputs(&self) -> &[PathBuf] {
        self.inputs.as_ref()
    }

    /// Validate the configuration.
    ///
    /// # Errors
    ///
    /// Returns an error if:
    /// - No input files are specified
    /// - Jobs count is zero
    /// - The output path is also an input
    pub fn validate(&self) -> Result<()> {
        if self.inputs.is_empty() {
            bail!("No input files specified");
        }

        if let Some(jobs) = self.jobs
            && jobs == 0
        {
            bail!("Number of jobs must be at least 1");
        }

        if self.inputs.iter().any(|input| input == &self.output) {
            bail!(
                "Output file cannot be the same as an input file: {}",
                self.output.display()
            );
        }

        Ok(())
    }

    /// Get the effective number of concurrent loads.
    ///
    /// Returns the configured job count, or the number of CPU cores if auto-detect.
    pub fn effective_jobs(&self) -> usize {
        self.jobs.unwrap_or_else(|| {
            std::thread::available_parallelism()
                .map(|n| n.get())
                .unwrap_or(1)
        })
    }
}
