//! Failures: bad ranges, unreadable inputs, and writes that stop part-way.

use pdfsplice::assemble::{merge_pdfs, split_pdf};
use pdfsplice::config::{MergeConfig, OverwriteMode, SplitConfig};
use pdfsplice::error::{ErrorKind, PdfSpliceError};
use pdfsplice::range::RangeSet;
use pdfsplice::report::SPLIT_LOG_NAME;
use rstest::rstest;
use std::path::PathBuf;
use tempfile::TempDir;

use crate::common::{page_markers, write_garbage, write_pdf};

#[rstest]
#[case("")]
#[case("1-")]
#[case("3-1")]
#[case("0")]
#[case("a-b")]
#[case("1,,2")]
fn test_invalid_range_syntax(#[case] text: &str) {
    let err = RangeSet::parse_syntax(text).unwrap_err();
    assert_eq!(err.kind(), ErrorKind::Parse);
    assert_eq!(err.exit_code(), 1);
}

#[tokio::test]
async fn test_split_range_past_last_page_writes_nothing() {
    let temp_dir = TempDir::new().unwrap();
    let input = write_pdf(temp_dir.path(), "book.pdf", 5, 1);
    let out = temp_dir.path().join("out");

    let mut config = SplitConfig::new(&input, RangeSet::parse_syntax("1-2,4-9").unwrap());
    config.output_dir = Some(out.clone());

    let err = split_pdf(&config).await.unwrap_err();

    assert!(matches!(err, PdfSpliceError::PageOutOfRange { total_pages: 5, .. }));
    assert!(!out.exists());
}

#[tokio::test]
async fn test_split_missing_input() {
    let temp_dir = TempDir::new().unwrap();
    let config = SplitConfig::new(
        temp_dir.path().join("missing.pdf"),
        RangeSet::parse_syntax("1").unwrap(),
    );

    let err = split_pdf(&config).await.unwrap_err();
    assert!(matches!(err, PdfSpliceError::FileNotFound { .. }));
    assert_eq!(err.exit_code(), 2);
}

#[tokio::test]
async fn test_split_duplicate_names_rejected_before_writing() {
    let temp_dir = TempDir::new().unwrap();
    let input = write_pdf(temp_dir.path(), "book.pdf", 4, 1);
    let out = temp_dir.path().join("out");

    let mut config = SplitConfig::new(&input, RangeSet::parse_syntax("1-2,3-4").unwrap());
    config.output_dir = Some(out.clone());
    config.names = vec!["Part".to_string(), "part.pdf".to_string()];

    let err = split_pdf(&config).await.unwrap_err();
    assert!(matches!(err, PdfSpliceError::DuplicateOutputName { .. }));
    assert!(!out.exists());
}

#[tokio::test]
async fn test_split_stops_at_failed_write_and_keeps_earlier_outputs() {
    let temp_dir = TempDir::new().unwrap();
    let input = write_pdf(temp_dir.path(), "book.pdf", 4, 1);
    let out = temp_dir.path().join("out");

    // A directory where the third output should go makes that write fail.
    let blocker = out.join("book_3.pdf");
    std::fs::create_dir_all(&blocker).unwrap();
    std::fs::write(blocker.join("keep"), "x").unwrap();

    let mut config = SplitConfig::new(&input, RangeSet::parse_syntax("1,2,3,4").unwrap());
    config.output_dir = Some(out.clone());
    config.overwrite_mode = OverwriteMode::Force;

    let err = split_pdf(&config).await.unwrap_err();

    let PdfSpliceError::SplitAborted { failed, written, .. } = &err else {
        panic!("expected SplitAborted, got {err:?}");
    };
    assert_eq!(failed, &blocker);
    assert_eq!(written, &vec![out.join("book_1.pdf"), out.join("book_2.pdf")]);
    assert_eq!(err.kind(), ErrorKind::Write);

    assert_eq!(page_markers(&out.join("book_1.pdf")), vec![1]);
    assert_eq!(page_markers(&out.join("book_2.pdf")), vec![2]);
    assert!(!out.join("book_4.pdf").exists());

    let log = std::fs::read_to_string(out.join(SPLIT_LOG_NAME)).unwrap();
    assert!(log.contains("\nStopped: book_3.pdf"));
}

#[tokio::test]
async fn test_merge_unreadable_input_writes_nothing() {
    let temp_dir = TempDir::new().unwrap();
    let good = write_pdf(temp_dir.path(), "good.pdf", 2, 1);
    let bad = write_garbage(temp_dir.path(), "bad.pdf");
    let output = temp_dir.path().join("merged.pdf");

    let err = merge_pdfs(&MergeConfig::new(vec![good, bad], &output))
        .await
        .unwrap_err();

    assert_eq!(err.kind(), ErrorKind::Read);
    assert_eq!(err.exit_code(), 3);
    assert!(!output.exists());
}

#[tokio::test]
async fn test_merge_missing_input_writes_nothing() {
    let temp_dir = TempDir::new().unwrap();
    let good = write_pdf(temp_dir.path(), "good.pdf", 2, 1);
    let output = temp_dir.path().join("merged.pdf");

    let config = MergeConfig::new(vec![good, PathBuf::from("/nonexistent/file.pdf")], &output);
    let err = merge_pdfs(&config).await.unwrap_err();

    assert!(matches!(err, PdfSpliceError::FileNotFound { .. }));
    assert!(!output.exists());
}

#[tokio::test]
async fn test_merge_empty_input_list() {
    let temp_dir = TempDir::new().unwrap();
    let config = MergeConfig::new(Vec::new(), temp_dir.path().join("merged.pdf"));

    let err = merge_pdfs(&config).await.unwrap_err();
    assert_eq!(err.kind(), ErrorKind::Config);
}

#[tokio::test]
async fn test_merge_page_selection_out_of_bounds() {
    let temp_dir = TempDir::new().unwrap();
    let long = write_pdf(temp_dir.path(), "long.pdf", 5, 1);
    let short = write_pdf(temp_dir.path(), "short.pdf", 2, 11);
    let output = temp_dir.path().join("merged.pdf");

    let mut config = MergeConfig::new(vec![long, short], &output);
    config.page_range = Some(RangeSet::parse_syntax("1-3").unwrap());

    let err = merge_pdfs(&config).await.unwrap_err();
    assert!(matches!(err, PdfSpliceError::PageOutOfRange { total_pages: 2, .. }));
    assert!(!output.exists());
}
