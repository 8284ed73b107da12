//! CLI argument parsing for pdfsplice.
//!
//! This module defines the command-line interface structure using `clap`.
//! It is also compiled by the build script to render the man page, so it
//! only depends on `clap`, `std` and the `pdfsplice` library.

use clap::{Args, Parser, Subcommand};
use std::path::PathBuf;
use std::str::FromStr;

use pdfsplice::config::{CompressionLevel, MergeConfig, OverwriteMode, Rotation, SplitConfig};
use pdfsplice::error::{PdfSpliceError, Result};
use pdfsplice::range::RangeSet;
use pdfsplice::report::today_stamp;
use pdfsplice::utils::{expand_inputs, read_input_list};

/// Split PDF documents by page range and merge them together.
#[derive(Parser, Debug)]
#[command(name = "pdfsplice")]
#[command(version)]
#[command(about = "Split PDF documents by page range and merge them together", long_about = None)]
#[command(author)]
#[command(arg_required_else_help = true)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,

    /// Verbose output - show per-file details and debug logging
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Suppress all non-error output
    #[arg(short, long, global = true, conflicts_with = "verbose")]
    pub quiet: bool,

    /// Print the result as JSON on stdout
    #[arg(long, global = true)]
    pub json: bool,
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Split one PDF into one file per page range
    ///
    /// Examples:
    ///   pdfsplice split report.pdf --ranges 1-3,5
    ///   pdfsplice split report.pdf -r 1-2,3-9 --name Cover --name Body --stamp-date
    Split(SplitArgs),

    /// Concatenate PDFs, in the order given, into one file
    ///
    /// Examples:
    ///   pdfsplice merge a.pdf b.pdf -o merged.pdf
    ///   pdfsplice merge scans/ -o all.pdf --pages 1 --rotate 90
    Merge(MergeArgs),

    /// Show page count, version and size of PDF files
    Info(InfoArgs),
}

/// Options shared by commands that write files.
#[derive(Args, Debug, Clone)]
pub struct WriteArgs {
    /// Overwrite existing output files without confirmation
    #[arg(short, long)]
    pub force: bool,

    /// Never overwrite existing output files
    #[arg(long, conflicts_with = "force")]
    pub no_clobber: bool,

    /// Compression level for written PDFs
    ///
    /// - none: streams are written as they are
    /// - standard: compress uncompressed streams (default)
    /// - maximum: also drop unreachable objects
    #[arg(short, long, value_name = "LEVEL", default_value = "standard")]
    #[arg(value_parser = ["none", "standard", "maximum"])]
    pub compression: String,

    /// Check inputs and show what would be written, without writing
    #[arg(short = 'n', long)]
    pub dry_run: bool,
}

impl WriteArgs {
    /// Overwrite mode selected by the flags.
    pub fn overwrite_mode(&self) -> OverwriteMode {
        if self.force {
            OverwriteMode::Force
        } else if self.no_clobber {
            OverwriteMode::NoClobber
        } else {
            OverwriteMode::Prompt
        }
    }

    /// Parsed compression level.
    pub fn compression(&self) -> Result<CompressionLevel> {
        CompressionLevel::from_str(&self.compression)
    }
}

#[derive(Args, Debug, Clone)]
pub struct SplitArgs {
    /// PDF file to split
    #[arg(value_name = "FILE")]
    pub input: PathBuf,

    /// Comma-separated page ranges, one output per range (e.g. "1-3,5,7-9")
    #[arg(short, long, value_name = "RANGES")]
    pub ranges: String,

    /// Output directory [default: split_output next to the input]
    #[arg(short, long, value_name = "DIR")]
    pub output_dir: Option<PathBuf>,

    /// Name for an output, matched to ranges in order (repeatable)
    #[arg(long = "name", value_name = "NAME")]
    pub names: Vec<String>,

    /// Append today's date (DDMMYYYY) to output names
    #[arg(long, conflicts_with = "date")]
    pub stamp_date: bool,

    /// Append the given DDMMYYYY date to output names
    #[arg(long, value_name = "DDMMYYYY")]
    pub date: Option<String>,

    /// Do not write split_log.txt
    #[arg(long)]
    pub no_log: bool,

    #[command(flatten)]
    pub write: WriteArgs,
}

impl SplitArgs {
    /// Convert the arguments into a [`SplitConfig`].
    ///
    /// # Errors
    ///
    /// Returns a parse error for malformed ranges and a config error for an
    /// invalid compression level or inconsistent naming options.
    pub fn to_config(&self) -> Result<SplitConfig> {
        let ranges = RangeSet::parse_syntax(&self.ranges)?;

        let date_stamp = match (&self.date, self.stamp_date) {
            (Some(date), _) => Some(date.clone()),
            (None, true) => Some(today_stamp()),
            (None, false) => None,
        };

        let mut config = SplitConfig::new(&self.input, ranges);
        config.names = self.names.clone();
        config.output_dir = self.output_dir.clone();
        config.date_stamp = date_stamp;
        config.overwrite_mode = self.write.overwrite_mode();
        config.compression = self.write.compression()?;
        config.dry_run = self.write.dry_run;
        config.write_log = !self.no_log;

        config
            .validate()
            .map_err(|e| PdfSpliceError::invalid_config(e.to_string()))?;

        Ok(config)
    }
}

#[derive(Args, Debug, Clone)]
pub struct MergeArgs {
    /// Input PDF files, directories or glob patterns, in merge order
    #[arg(value_name = "FILE", required_unless_present = "input_list")]
    pub inputs: Vec<PathBuf>,

    /// Output PDF file path
    #[arg(short, long, value_name = "FILE")]
    pub output: PathBuf,

    /// Read more inputs from a file (one path per line, '#' starts a comment)
    ///
    /// Paths from the file are appended after the direct inputs.
    #[arg(long, value_name = "FILE")]
    pub input_list: Option<PathBuf>,

    /// Pages to take from every input (e.g. "1-5,10")
    #[arg(long, value_name = "RANGES")]
    pub pages: Option<String>,

    /// Rotate every merged page clockwise by 90, 180 or 270 degrees
    #[arg(long, value_name = "DEGREES")]
    #[arg(value_parser = ["90", "180", "270"])]
    pub rotate: Option<String>,

    /// Number of inputs loaded concurrently [default: number of CPUs]
    #[arg(short, long, value_name = "N")]
    pub jobs: Option<usize>,

    #[command(flatten)]
    pub write: WriteArgs,
}

impl MergeArgs {
    /// All inputs in order: direct arguments, then the input list, with
    /// directories and patterns expanded.
    pub async fn all_inputs(&self) -> Result<Vec<PathBuf>> {
        let mut inputs = self.inputs.clone();

        if let Some(list) = &self.input_list {
            inputs.extend(read_input_list(list).await?);
        }

        expand_inputs(&inputs)
    }

    /// Convert the arguments into a [`MergeConfig`] for `inputs`.
    pub fn to_config(&self, inputs: Vec<PathBuf>) -> Result<MergeConfig> {
        let page_range = self
            .pages
            .as_deref()
            .map(RangeSet::parse_syntax)
            .transpose()?;

        let rotation = match &self.rotate {
            Some(degrees) => {
                let degrees: u16 = degrees
                    .parse()
                    .map_err(|_| PdfSpliceError::invalid_config("Invalid rotation degrees"))?;
                Some(Rotation::from_degrees(degrees)?)
            }
            None => None,
        };

        let mut config = MergeConfig::new(inputs, &self.output);
        config.page_range = page_range;
        config.rotation = rotation;
        config.overwrite_mode = self.write.overwrite_mode();
        config.compression = self.write.compression()?;
        config.dry_run = self.write.dry_run;
        config.jobs = self.jobs;

        config
            .validate()
            .map_err(|e| PdfSpliceError::invalid_config(e.to_string()))?;

        Ok(config)
    }
}

#[derive(Args, Debug, Clone)]
pub struct InfoArgs {
    /// PDF files, directories or glob patterns to inspect
    #[arg(value_name = "FILE", required = true)]
    pub files: Vec<PathBuf>,

    /// Number of files loaded concurrently
    #[arg(short, long, value_name = "N", default_value_t = 4)]
    pub jobs: usize,
}
