//! Splitting real files end to end.

use pdfsplice::assemble::{Splitter, split_pdf};
use pdfsplice::config::{OverwriteMode, SplitConfig};
use pdfsplice::range::RangeSet;
use pdfsplice::report::SPLIT_LOG_NAME;
use tempfile::TempDir;

use crate::common::{page_markers, write_pdf};

fn config_for(input: &std::path::Path, ranges: &str, out: &std::path::Path) -> SplitConfig {
    let mut config = SplitConfig::new(input, RangeSet::parse_syntax(ranges).unwrap());
    config.output_dir = Some(out.to_path_buf());
    config
}

#[tokio::test]
async fn test_split_whole_document_into_one_file() {
    let temp_dir = TempDir::new().unwrap();
    let input = write_pdf(temp_dir.path(), "book.pdf", 10, 1);
    let out = temp_dir.path().join("out");

    let report = split_pdf(&config_for(&input, "1-10", &out)).await.unwrap();

    assert_eq!(report.outputs.len(), 1);
    let output = &report.outputs[0].path;
    assert_eq!(output, &out.join("book_1-10.pdf"));
    assert_eq!(page_markers(output), (1..=10).collect::<Vec<_>>());
}

#[tokio::test]
async fn test_split_ranges_and_single_page() {
    let temp_dir = TempDir::new().unwrap();
    let input = write_pdf(temp_dir.path(), "book.pdf", 6, 1);
    let out = temp_dir.path().join("out");

    let report = split_pdf(&config_for(&input, "1-3,5", &out)).await.unwrap();

    assert_eq!(report.outputs.len(), 2);
    assert_eq!(page_markers(&out.join("book_1-3.pdf")), vec![1, 2, 3]);
    assert_eq!(page_markers(&out.join("book_5.pdf")), vec![5]);
    assert_eq!(page_markers(&input).len(), 6, "source must be untouched");
}

#[tokio::test]
async fn test_split_overlapping_ranges_copy_pages_twice() {
    let temp_dir = TempDir::new().unwrap();
    let input = write_pdf(temp_dir.path(), "book.pdf", 5, 1);
    let out = temp_dir.path().join("out");

    split_pdf(&config_for(&input, "1-3,2-4", &out)).await.unwrap();

    assert_eq!(page_markers(&out.join("book_1-3.pdf")), vec![1, 2, 3]);
    assert_eq!(page_markers(&out.join("book_2-4.pdf")), vec![2, 3, 4]);
}

#[tokio::test]
async fn test_split_custom_names_and_log() {
    let temp_dir = TempDir::new().unwrap();
    let input = write_pdf(temp_dir.path(), "book.pdf", 4, 1);
    let out = temp_dir.path().join("out");

    let mut config = config_for(&input, "1-2,3-4", &out);
    config.names = vec!["intro.pdf".to_string()];
    config.date_stamp = Some("17102026".to_string());

    let report = split_pdf(&config).await.unwrap();

    assert!(out.join("intro_17102026.pdf").exists());
    assert!(out.join("book_3-4_17102026.pdf").exists());

    let log_path = report.log_file.expect("log written");
    assert_eq!(log_path, out.join(SPLIT_LOG_NAME));
    let log = std::fs::read_to_string(log_path).unwrap();
    assert!(log.starts_with("Split Log for: book.pdf\nTotal Pages: 4\n"));
    assert!(log.contains("Pages 1-2 -> intro_17102026.pdf"));
    assert!(log.contains("Pages 3-4 -> book_3-4_17102026.pdf"));
}

#[tokio::test]
async fn test_split_dry_run_writes_nothing() {
    let temp_dir = TempDir::new().unwrap();
    let input = write_pdf(temp_dir.path(), "book.pdf", 4, 1);
    let out = temp_dir.path().join("out");

    let mut config = config_for(&input, "1,2-4", &out);
    config.dry_run = true;

    let report = split_pdf(&config).await.unwrap();

    assert!(report.dry_run);
    assert_eq!(report.outputs.len(), 2);
    assert!(report.outputs.iter().all(|o| o.bytes.is_none()));
    assert!(!out.exists());
}

#[tokio::test]
async fn test_split_existing_output_requires_force() {
    let temp_dir = TempDir::new().unwrap();
    let input = write_pdf(temp_dir.path(), "book.pdf", 3, 1);
    let out = temp_dir.path().join("out");

    let mut config = config_for(&input, "1-3", &out);
    split_pdf(&config).await.unwrap();

    config.overwrite_mode = OverwriteMode::NoClobber;
    let err = split_pdf(&config).await.unwrap_err();
    assert_eq!(err.exit_code(), 4);

    config.overwrite_mode = OverwriteMode::Force;
    let report = Splitter::new().split(&config).await.unwrap();
    assert_eq!(report.outputs.len(), 1);
}

#[tokio::test]
async fn test_split_identical_ranges_write_separate_files() {
    let temp_dir = TempDir::new().unwrap();
    let input = write_pdf(temp_dir.path(), "report.pdf", 10, 1);
    let out = temp_dir.path().join("out");

    let ranges = RangeSet::parse("1-3,1-3", 10).unwrap();
    let mut config = SplitConfig::new(&input, ranges);
    config.output_dir = Some(out.clone());

    let report = Splitter::new().split(&config).await.unwrap();

    let paths: Vec<_> = report.outputs.iter().map(|o| o.path.clone()).collect();
    assert_eq!(paths, vec![out.join("report_1-3.pdf"), out.join("report_1-3_2.pdf")]);
    assert_eq!(page_markers(&paths[0]), vec![1, 2, 3]);
    assert_eq!(page_markers(&paths[1]), vec![1, 2, 3]);
}
