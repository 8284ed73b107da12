//! File I/O for pdfsplice.
//!
//! - [`reader`]: loading source PDFs (one at a time or several in order)
//! - [`writer`]: writing assembled PDFs, atomically by default

pub mod reader;
pub mod writer;

pub use reader::{LoadedPdf, PdfReader};
pub use writer::{PdfWriter, WriteOptions, WriteStatistics};

use crate::error::Result;
use std::path::Path;

/// Load a PDF document from a file.
///
/// Convenience wrapper around [`PdfReader::load`] with default settings.
///
/// # Examples
///
/// ```no_run
/// use pdfsplice::io::load_pdf;
/// use std::path::Path;
///
/// # async fn example() -> Result<(), Box<dyn std::error::Error>> {
/// let loaded = load_pdf(Path::new("document.pdf")).await?;
/// println!("Loaded PDF with {} pages", loaded.page_count);
/// # Ok(())
/// # }
/// ```
pub async fn load_pdf(path: &Path) -> Result<LoadedPdf> {
    PdfReader::new().load(path).await
}
