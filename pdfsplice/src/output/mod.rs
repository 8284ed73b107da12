//! Human-readable rendering of reports.
//!
//! The CLI prints reports through these helpers unless `--json` is given.

pub mod formatter;

pub use formatter::{MessageLevel, OutputFormatter};

use crate::report::{MergeReport, SplitReport, describe_ranges, display_name};
use crate::utils::format_file_size;
use crate::validation::ValidationSummary;

/// Display the outcome of a split.
pub fn display_split_report(formatter: &OutputFormatter, report: &SplitReport) {
    let verb = if report.dry_run { "Would write" } else { "Wrote" };

    formatter.section(&format!(
        "{} ({} pages) -> {}",
        display_name(&report.source),
        report.total_pages,
        report.output_dir.display()
    ));
    for (index, output) in report.outputs.iter().enumerate() {
        let size = output
            .bytes
            .map(|b| format!(", {}", format_file_size(b)))
            .unwrap_or_default();
        formatter.list_item(
            index + 1,
            &format!(
                "{} (pages {}{size})",
                display_name(&output.path),
                output.range
            ),
        );
    }
    if let Some(log) = &report.log_file {
        formatter.detail("Log", &log.display().to_string());
    }
    formatter.success(&format!("{verb} {} file(s)", report.outputs.len()));
}

/// Display the outcome of a merge.
pub fn display_merge_report(formatter: &OutputFormatter, report: &MergeReport) {
    for (index, input) in report.inputs.iter().enumerate() {
        formatter.list_item(
            index + 1,
            &format!(
                "{} ({} of {} pages)",
                display_name(&input.path),
                input.pages_taken,
                input.total_pages
            ),
        );
    }

    formatter.detail("Load time", &format!("{:.2}s", report.load_time.as_secs_f64()));
    formatter.detail("Merge time", &format!("{:.2}s", report.merge_time.as_secs_f64()));
    formatter.detail("Input size", &format_file_size(report.input_bytes));

    match report.output_bytes {
        Some(bytes) => formatter.success(&format!(
            "Merged {} file(s) into {} ({} pages, {})",
            report.inputs.len(),
            report.output.display(),
            report.total_pages,
            format_file_size(bytes)
        )),
        None => formatter.success(&format!(
            "Dry run: would merge {} file(s) into {} ({} pages)",
            report.inputs.len(),
            report.output.display(),
            report.total_pages
        )),
    }
}

/// Display validation summary to the user.
pub fn display_validation_summary(formatter: &OutputFormatter, summary: &ValidationSummary) {
    for result in &summary.results {
        let size = result
            .page_dimensions
            .map(|(w, h)| format!(", {w:.0}x{h:.0} pt"))
            .unwrap_or_default();
        formatter.info(&format!(
            "{}: {} pages, PDF {}, {}{size}",
            result.path.display(),
            result.page_count,
            result.version,
            format_file_size(result.file_size)
        ));
        formatter.detail("Objects", &result.object_count.to_string());
    }

    for failure in &summary.failures {
        formatter.error(&format!("{}: {}", failure.path.display(), failure.error));
    }

    if summary.results.len() + summary.failures.len() > 1 {
        formatter.section(&format!(
            "{} valid, {} invalid: {} pages, {}",
            summary.results.len(),
            summary.failures.len(),
            summary.total_pages,
            summary.format_total_size()
        ));
    }
}

/// One-line description of a split request, shown before it runs.
pub fn describe_split(ranges: &crate::range::RangeSet) -> String {
    format!("ranges {}", describe_ranges(ranges))
}
