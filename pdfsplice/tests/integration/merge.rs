//! Merging real files end to end.

use pdfsplice::assemble::{Merger, merge_pdfs};
use pdfsplice::config::{MergeConfig, OverwriteMode, Rotation};
use pdfsplice::range::RangeSet;
use pdfsplice::utils::expand_inputs;
use tempfile::TempDir;

use crate::common::{page_markers, write_pdf};

#[tokio::test]
async fn test_merge_preserves_order_and_count() {
    let temp_dir = TempDir::new().unwrap();
    let a = write_pdf(temp_dir.path(), "a.pdf", 2, 1);
    let b = write_pdf(temp_dir.path(), "b.pdf", 3, 11);
    let c = write_pdf(temp_dir.path(), "c.pdf", 1, 21);
    let output = temp_dir.path().join("merged.pdf");

    let report = merge_pdfs(&MergeConfig::new(vec![b, a, c], &output))
        .await
        .unwrap();

    assert_eq!(report.total_pages, 6);
    assert_eq!(report.inputs.len(), 3);
    assert!(report.output_bytes.is_some_and(|bytes| bytes > 0));
    assert_eq!(page_markers(&output), vec![11, 12, 13, 1, 2, 21]);
}

#[tokio::test]
async fn test_merge_same_file_twice() {
    let temp_dir = TempDir::new().unwrap();
    let a = write_pdf(temp_dir.path(), "a.pdf", 2, 1);
    let output = temp_dir.path().join("merged.pdf");

    merge_pdfs(&MergeConfig::new(vec![a.clone(), a], &output))
        .await
        .unwrap();

    assert_eq!(page_markers(&output), vec![1, 2, 1, 2]);
}

#[tokio::test]
async fn test_merge_page_selection_applies_to_each_input() {
    let temp_dir = TempDir::new().unwrap();
    let a = write_pdf(temp_dir.path(), "a.pdf", 4, 1);
    let b = write_pdf(temp_dir.path(), "b.pdf", 4, 11);
    let output = temp_dir.path().join("merged.pdf");

    let mut config = MergeConfig::new(vec![a, b], &output);
    config.page_range = Some(RangeSet::parse_syntax("1,3-4").unwrap());
    config.rotation = Some(Rotation::Clockwise90);

    let report = merge_pdfs(&config).await.unwrap();

    assert_eq!(report.total_pages, 6);
    assert_eq!(page_markers(&output), vec![1, 3, 4, 11, 13, 14]);
}

#[tokio::test]
async fn test_merge_directory_input_sorted_by_name() {
    let temp_dir = TempDir::new().unwrap();
    let scans = temp_dir.path().join("scans");
    std::fs::create_dir(&scans).unwrap();
    write_pdf(&scans, "02.pdf", 1, 2);
    write_pdf(&scans, "01.pdf", 1, 1);
    write_pdf(&scans, "03.PDF", 1, 3);
    std::fs::write(scans.join("notes.txt"), "skip me").unwrap();

    let inputs = expand_inputs(&[scans]).unwrap();
    let output = temp_dir.path().join("merged.pdf");
    merge_pdfs(&MergeConfig::new(inputs, &output)).await.unwrap();

    assert_eq!(page_markers(&output), vec![1, 2, 3]);
}

#[tokio::test]
async fn test_merge_dry_run_and_overwrite() {
    let temp_dir = TempDir::new().unwrap();
    let a = write_pdf(temp_dir.path(), "a.pdf", 2, 1);
    let output = temp_dir.path().join("merged.pdf");

    let mut config = MergeConfig::new(vec![a], &output);
    config.dry_run = true;
    let report = Merger::new().merge_to_file(&config).await.unwrap();
    assert!(report.dry_run);
    assert_eq!(report.total_pages, 2);
    assert!(!output.exists());

    config.dry_run = false;
    merge_pdfs(&config).await.unwrap();
    assert!(output.exists());

    config.overwrite_mode = OverwriteMode::NoClobber;
    assert!(merge_pdfs(&config).await.is_err());

    config.overwrite_mode = OverwriteMode::Force;
    assert!(merge_pdfs(&config).await.is_ok());
}

#[tokio::test]
async fn test_merge_file_with_glob_characters_in_name() {
    let temp_dir = TempDir::new().unwrap();
    let a = write_pdf(temp_dir.path(), "a.pdf", 1, 1);
    let scan = write_pdf(temp_dir.path(), "scan [1].pdf", 2, 11);
    let output = temp_dir.path().join("merged.pdf");

    let inputs = expand_inputs([&a, &scan]).unwrap();
    assert_eq!(inputs, vec![a, scan]);

    merge_pdfs(&MergeConfig::new(inputs, &output)).await.unwrap();
    assert_eq!(page_markers(&output), vec![1, 11, 12]);
}
