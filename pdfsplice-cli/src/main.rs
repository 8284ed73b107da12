//! pdfsplice - Split PDF documents by page range and merge them together.

mod cli;

use clap::Parser;
use serde::Serialize;
use std::io::{self, IsTerminal, Write};
use std::path::{Path, PathBuf};
use std::process;
use tracing_subscriber::EnvFilter;

use crate::cli::{Cli, Command, InfoArgs, MergeArgs, SplitArgs};
use pdfsplice::assemble::{Merger, Splitter};
use pdfsplice::config::OverwriteMode;
use pdfsplice::error::PdfSpliceError;
use pdfsplice::output::{
    OutputFormatter, describe_split, display_merge_report, display_split_report,
    display_validation_summary,
};
use pdfsplice::utils::expand_inputs;
use pdfsplice::validation::Validator;

/// Environment variable holding a tracing filter, e.g. `pdfsplice=trace`.
const LOG_ENV: &str = "PDFSPLICE_LOG";

/// Exit code of `info` when some files could not be read.
const EXIT_INVALID_INPUT: i32 = 3;

#[tokio::main]
async fn main() {
    let cli = Cli::parse();
    init_tracing(cli.verbose, cli.quiet);
    tracing::debug!(command = ?cli.command, "parsed arguments");

    let formatter = OutputFormatter::new(cli.quiet || cli.json, cli.verbose);

    match run(&cli, &formatter).await {
        Ok(0) => {}
        Ok(code) => process::exit(code),
        Err(err) => {
            report_error(&err, &formatter, cli.json);
            process::exit(err.exit_code());
        }
    }
}

fn init_tracing(verbose: bool, quiet: bool) {
    let default_filter = if verbose {
        "pdfsplice=debug"
    } else if quiet {
        "error"
    } else {
        "warn"
    };
    let filter =
        EnvFilter::try_from_env(LOG_ENV).unwrap_or_else(|_| EnvFilter::new(default_filter));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(io::stderr)
        .with_target(false)
        .init();
}

/// Dispatch a subcommand. Returns the process exit code.
async fn run(cli: &Cli, formatter: &OutputFormatter) -> Result<i32, PdfSpliceError> {
    match &cli.command {
        Command::Split(args) => run_split(args, cli.json, formatter).await,
        Command::Merge(args) => run_merge(args, cli.json, formatter).await,
        Command::Info(args) => run_info(args, cli.json, formatter).await,
    }
}

async fn run_split(
    args: &SplitArgs,
    json: bool,
    formatter: &OutputFormatter,
) -> Result<i32, PdfSpliceError> {
    let mut config = args.to_config()?;
    formatter.debug(&format!(
        "Splitting {} ({})",
        config.input.display(),
        describe_split(&config.ranges)
    ));

    let splitter = Splitter::new();
    let prepared = splitter.prepare(&config).await?;

    if !config.dry_run && config.overwrite_mode == OverwriteMode::Prompt {
        let existing: Vec<PathBuf> = prepared
            .plan
            .existing_outputs()
            .into_iter()
            .map(Path::to_path_buf)
            .collect();
        if !existing.is_empty() {
            confirm_overwrite(&existing, formatter, json)?;
            config.overwrite_mode = OverwriteMode::Force;
        }
    }

    let report = splitter.execute(prepared, &config).await?;

    if json {
        print_json(&report)?;
    } else {
        display_split_report(formatter, &report);
    }
    Ok(0)
}

async fn run_merge(
    args: &MergeArgs,
    json: bool,
    formatter: &OutputFormatter,
) -> Result<i32, PdfSpliceError> {
    let inputs = args.all_inputs().await?;
    let mut config = args.to_config(inputs)?;

    if !config.dry_run && config.overwrite_mode == OverwriteMode::Prompt && config.output.exists()
    {
        confirm_overwrite(std::slice::from_ref(&config.output), formatter, json)?;
        config.overwrite_mode = OverwriteMode::Force;
    }

    formatter.info(&format!("Merging {} file(s)...", config.inputs.len()));
    let report = Merger::new().merge_to_file(&config).await?;

    if json {
        print_json(&report)?;
    } else {
        display_merge_report(formatter, &report);
    }
    Ok(0)
}

async fn run_info(
    args: &InfoArgs,
    json: bool,
    formatter: &OutputFormatter,
) -> Result<i32, PdfSpliceError> {
    let paths = expand_inputs(&args.files)?;
    let summary = Validator::new().validate_files(&paths, args.jobs).await?;

    if json {
        print_json(&summary)?;
    } else {
        display_validation_summary(formatter, &summary);
    }

    Ok(if summary.all_valid() {
        0
    } else {
        EXIT_INVALID_INPUT
    })
}

/// Ask before replacing existing outputs.
///
/// Without an interactive terminal (or in quiet/JSON mode) nothing is asked
/// and the existing file is reported as an error.
fn confirm_overwrite(
    existing: &[PathBuf],
    formatter: &OutputFormatter,
    json: bool,
) -> Result<(), PdfSpliceError> {
    let Some(first) = existing.first() else {
        return Ok(());
    };

    if json || formatter.is_quiet() || !io::stdin().is_terminal() {
        return Err(PdfSpliceError::output_exists(first.clone()));
    }

    for path in existing {
        formatter.warning(&format!("Output file already exists: {}", path.display()));
    }

    print!("Overwrite? [y/N]: ");
    io::stdout().flush().ok();

    let mut response = String::new();
    io::stdin()
        .read_line(&mut response)
        .map_err(|err| PdfSpliceError::other(format!("Failed to read input: {err}")))?;

    if is_yes(&response) {
        Ok(())
    } else {
        Err(PdfSpliceError::Cancelled)
    }
}

fn is_yes(response: &str) -> bool {
    matches!(response.trim().to_lowercase().as_str(), "y" | "yes")
}

fn print_json<T: Serialize>(value: &T) -> Result<(), PdfSpliceError> {
    let text = serde_json::to_string_pretty(value)
        .map_err(|err| PdfSpliceError::other(format!("Failed to serialize report: {err}")))?;
    println!("{text}");
    Ok(())
}

#[derive(Serialize)]
struct ErrorReport<'a> {
    kind: pdfsplice::error::ErrorKind,
    message: String,
    exit_code: i32,
    written: &'a [PathBuf],
}

fn report_error(err: &PdfSpliceError, formatter: &OutputFormatter, json: bool) {
    let written: &[PathBuf] = match err {
        PdfSpliceError::SplitAborted { written, .. } => written.as_slice(),
        _ => &[][..],
    };

    formatter.error(&format!("Error: {err}"));
    for path in written {
        formatter.warning(&format!("Kept: {}", path.display()));
    }

    if json {
        let report = ErrorReport {
            kind: err.kind(),
            message: err.to_string(),
            exit_code: err.exit_code(),
            written,
        };
        if let Ok(text) = serde_json::to_string_pretty(&report) {
            println!("{text}");
        }
    }
}
