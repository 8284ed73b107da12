//! Page assembly: splitting one document and merging several.
//!
//! Both operations copy pages from loaded sources into freshly built
//! documents through [`DocumentBuilder`]; neither ever modifies a source.

pub mod builder;
pub mod merger;
pub mod splitter;

pub use builder::DocumentBuilder;
pub use merger::{MergeResult, MergeStatistics, Merger};
pub use splitter::{PlannedOutput, PreparedSplit, SplitPlan, Splitter};

use crate::config::{MergeConfig, SplitConfig};
use crate::error::Result;
use crate::report::{MergeReport, SplitReport};

/// Split a document with default settings.
///
/// This is a convenience function that creates a [`Splitter`] and runs it.
pub async fn split_pdf(config: &SplitConfig) -> Result<SplitReport> {
    Splitter::new().split(config).await
}

/// Merge documents with default settings and write the result.
///
/// This is a convenience function that creates a [`Merger`] and runs it.
pub async fn merge_pdfs(config: &MergeConfig) -> Result<MergeReport> {
    Merger::new().merge_to_file(config).await
}
