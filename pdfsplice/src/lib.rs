//! pdfsplice - Split PDF documents by page range and merge them back together.
//!
//! The library covers the two document-assembly operations and what they
//! need around them:
//!
//! - Page-range parsing (`"1-3,5"`) with bounds checking
//! - Splitting one document into one output per range
//! - Merging several documents in order, optionally selecting and rotating pages
//! - Input inspection
//!
//! Source documents are never modified; outputs are built from copies of
//! their pages.
//!
//! # Examples
//!
//! ## Split
//!
//! ```no_run
//! use pdfsplice::assemble;
//! use pdfsplice::config::SplitConfig;
//! use pdfsplice::range::RangeSet;
//!
//! # async fn example() -> Result<(), Box<dyn std::error::Error>> {
//! let config = SplitConfig::new("report.pdf", RangeSet::parse_syntax("1-3,5")?);
//! let report = assemble::split_pdf(&config).await?;
//! println!("Wrote {} files", report.outputs.len());
//! # Ok(())
//! # }
//! ```
//!
//! ## Merge
//!
//! ```no_run
//! use pdfsplice::assemble;
//! use pdfsplice::config::MergeConfig;
//! use std::path::PathBuf;
//!
//! # async fn example() -> Result<(), Box<dyn std::error::Error>> {
//! let config = MergeConfig::new(
//!     vec![PathBuf::from("a.pdf"), PathBuf::from("b.pdf")],
//!     "merged.pdf",
//! );
//! let report = assemble::merge_pdfs(&config).await?;
//! println!("Created {} page document", report.total_pages);
//! # Ok(())
//! # }
//! ```

#![warn(missing_docs)]
#![warn(clippy::all)]

pub mod assemble;
pub mod config;
pub mod error;
pub mod io;
pub mod output;
pub mod range;
pub mod report;
pub mod utils;
pub mod validation;

#[cfg(test)]
pub(crate) mod test_support;

// Re-export commonly used types
pub use config::{MergeConfig, SplitConfig};
pub use error::{PdfSpliceError, Result};
pub use range::{PageRange, RangeSet};

/// Library version.
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Library name.
pub const NAME: &str = env!("CARGO_PKG_NAME");
