//! Error types for pdfsplice.
//!
//! Every failure the library can report is a variant of [`PdfSpliceError`].
//! Variants carry the path or range they concern so that the message shown to
//! the user says what went wrong and where.
//!
//! # Error Categories
//!
//! Each variant belongs to exactly one [`ErrorKind`]:
//!
//! - **Parse**: a page-range specification is malformed or out of bounds
//! - **Read**: a source PDF is missing, unreadable or structurally invalid
//! - **Write**: an output PDF cannot be created or written
//! - **Config**: the requested operation is inconsistent (no inputs, duplicate names)
//! - **Cancelled**: the user declined to continue

use std::io;
use std::path::PathBuf;

/// Result type alias for pdfsplice operations.
pub type Result<T> = std::result::Result<T, PdfSpliceError>;

/// Broad category of a [`PdfSpliceError`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, serde::Serialize)]
#[serde(rename_all = "lowercase")]
pub enum ErrorKind {
    /// Bad page-range syntax or a page outside the document.
    Parse,
    /// Unreadable or corrupt source document.
    Read,
    /// Unwritable destination.
    Write,
    /// Inconsistent request.
    Config,
    /// Operation cancelled by the user.
    Cancelled,
    /// Anything else.
    Internal,
}

/// Main error type for pdfsplice operations.
#[derive(Debug, thiserror::Error)]
pub enum PdfSpliceError {
    /// A page-range specification could not be parsed.
    #[error("Invalid page range '{range}': {reason}")]
    InvalidRange {
        /// The offending text (a single token or the whole input).
        range: String,
        /// What is wrong with it.
        reason: String,
    },

    /// A page range refers to pages the document does not have.
    #[error(
        "Page range '{range}' is out of bounds\n  \
         Document has {total_pages} page(s). Page numbers must be between 1 and {total_pages}"
    )]
    PageOutOfRange {
        /// The offending range.
        range: String,
        /// Number of pages in the document.
        total_pages: u32,
    },

    /// Input file was not found.
    #[error("File not found: {}", path.display())]
    FileNotFound {
        /// Path to the missing file.
        path: PathBuf,
    },

    /// Input file exists but cannot be accessed.
    #[error("Cannot access file: {}\n  Reason: {source}", path.display())]
    FileNotAccessible {
        /// Path to the inaccessible file.
        path: PathBuf,
        /// Underlying I/O error.
        source: io::Error,
    },

    /// Input path is not a regular file.
    #[error("Not a file: {}", path.display())]
    NotAFile {
        /// Offending path.
        path: PathBuf,
    },

    /// lopdf refused to load the file.
    #[error("Failed to load PDF: {}\n  Reason: {reason}", path.display())]
    FailedToLoadPdf {
        /// Path to the PDF file.
        path: PathBuf,
        /// Reason reported by the parser.
        reason: String,
    },

    /// The file loaded but its structure is unusable.
    #[error("Corrupted or invalid PDF: {}\n  Details: {details}", path.display())]
    CorruptedPdf {
        /// Path to the PDF file.
        path: PathBuf,
        /// What is broken.
        details: String,
    },

    /// The file is encrypted.
    #[error(
        "PDF is encrypted and cannot be processed: {}\n  \
         Hint: Decrypt the PDF first using 'qpdf --decrypt' or similar tools",
        path.display()
    )]
    EncryptedPdf {
        /// Path to the encrypted PDF.
        path: PathBuf,
    },

    /// Page copying failed inside a loaded document.
    #[error("Failed to assemble document: {reason}")]
    AssemblyFailed {
        /// What went wrong.
        reason: String,
    },

    /// No input documents were given.
    #[error("No input PDF files to process")]
    NoInputs,

    /// An input pattern matched no files.
    #[error("No files match pattern: {pattern}")]
    PatternMatchedNothing {
        /// The pattern as given.
        pattern: String,
    },

    /// Two split outputs would land on the same file.
    #[error("Duplicate output file name: {name}")]
    DuplicateOutputName {
        /// The clashing file name.
        name: String,
    },

    /// Output exists and overwriting is not allowed.
    #[error(
        "Output file already exists: {}\n  \
         Use --force to overwrite or choose a different output path",
        path.display()
    )]
    OutputExists {
        /// Path to the existing output.
        path: PathBuf,
    },

    /// Failed to create an output file or directory.
    #[error("Failed to create output: {}\n  Reason: {source}", path.display())]
    FailedToCreateOutput {
        /// Path that could not be created.
        path: PathBuf,
        /// Underlying I/O error.
        source: io::Error,
    },

    /// Failed while writing an output file.
    #[error("Failed to write output file: {}\n  Reason: {source}", path.display())]
    FailedToWrite {
        /// Path being written.
        path: PathBuf,
        /// Underlying I/O error.
        source: io::Error,
    },

    /// A split stopped part-way. Outputs listed in `written` remain on disk.
    #[error(
        "Split stopped at {}: {source}\n  \
         {} earlier output(s) were written and kept; later outputs were not attempted",
        failed.display(),
        written.len()
    )]
    SplitAborted {
        /// Output whose write failed.
        failed: PathBuf,
        /// Outputs completed before the failure, in order.
        written: Vec<PathBuf>,
        /// The write failure.
        source: Box<PdfSpliceError>,
    },

    /// Invalid configuration.
    #[error("Invalid configuration: {message}")]
    InvalidConfig {
        /// What is wrong.
        message: String,
    },

    /// User cancelled the operation.
    #[error("Operation cancelled by user")]
    Cancelled,

    /// Generic I/O error.
    #[error("I/O error: {source}")]
    Io {
        /// Underlying I/O error.
        #[from]
        source: io::Error,
    },

    /// Generic error with a custom message.
    #[error("{message}")]
    Other {
        /// Error message.
        message: String,
    },
}

impl From<lopdf::Error> for PdfSpliceError {
    fn from(err: lopdf::Error) -> Self {
        Self::AssemblyFailed {
            reason: err.to_string(),
        }
    }
}

impl PdfSpliceError {
    /// Create an InvalidRange error.
    pub fn invalid_range(range: impl Into<String>, reason: impl Into<String>) -> Self {
        Self::InvalidRange {
            range: range.into(),
            reason: reason.into(),
        }
    }

    /// Create a PageOutOfRange error.
    pub fn page_out_of_range(range: impl Into<String>, total_pages: u32) -> Self {
        Self::PageOutOfRange {
            range: range.into(),
            total_pages,
        }
    }

    /// Create a FileNotFound error.
    pub fn file_not_found(path: PathBuf) -> Self {
        Self::FileNotFound { path }
    }

    /// Create a NotAFile error.
    pub fn not_a_file(path: PathBuf) -> Self {
        Self::NotAFile { path }
    }

    /// Create a FailedToLoadPdf error.
    pub fn failed_to_load_pdf(path: PathBuf, reason: impl Into<String>) -> Self {
        Self::FailedToLoadPdf {
            path,
            reason: reason.into(),
        }
    }

    /// Create a CorruptedPdf error.
    pub fn corrupted_pdf(path: PathBuf, details: impl Into<String>) -> Self {
        Self::CorruptedPdf {
            path,
            details: details.into(),
        }
    }

    /// Create an EncryptedPdf error.
    pub fn encrypted_pdf(path: PathBuf) -> Self {
        Self::EncryptedPdf { path }
    }

    /// Create an OutputExists error.
    pub fn output_exists(path: PathBuf) -> Self {
        Self::OutputExists { path }
    }

    /// Create an InvalidConfig error.
    pub fn invalid_config(message: impl Into<String>) -> Self {
        Self::InvalidConfig {
            message: message.into(),
        }
    }

    /// Create an Other error with a custom message.
    pub fn other(message: impl Into<String>) -> Self {
        Self::Other {
            message: message.into(),
        }
    }

    /// Category of this error.
    pub fn kind(&self) -> ErrorKind {
        match self {
            Self::InvalidRange { .. } | Self::PageOutOfRange { .. } => ErrorKind::Parse,
            Self::FileNotFound { .. }
            | Self::FileNotAccessible { .. }
            | Self::NotAFile { .. }
            | Self::PatternMatchedNothing { .. }
            | Self::FailedToLoadPdf { .. }
            | Self::CorruptedPdf { .. }
            | Self::EncryptedPdf { .. }
            | Self::AssemblyFailed { .. } => ErrorKind::Read,
            Self::OutputExists { .. }
            | Self::FailedToCreateOutput { .. }
            | Self::FailedToWrite { .. }
            | Self::Io { .. } => ErrorKind::Write,
            Self::SplitAborted { source, .. } => source.kind(),
            Self::NoInputs | Self::DuplicateOutputName { .. } | Self::InvalidConfig { .. } => {
                ErrorKind::Config
            }
            Self::Cancelled => ErrorKind::Cancelled,
            Self::Other { .. } => ErrorKind::Internal,
        }
    }

    /// Check if this error only concerns one input and the rest may still be processed.
    ///
    /// `info` uses this to keep validating the remaining files.
    pub fn is_recoverable(&self) -> bool {
        matches!(
            self,
            Self::FileNotFound { .. }
                | Self::NotAFile { .. }
                | Self::FailedToLoadPdf { .. }
                | Self::CorruptedPdf { .. }
                | Self::EncryptedPdf { .. }
        )
    }

    /// Get the process exit code for this error.
    pub fn exit_code(&self) -> i32 {
        match self {
            Self::FileNotFound { .. }
            | Self::FileNotAccessible { .. }
            | Self::NotAFile { .. }
            | Self::PatternMatchedNothing { .. } => 2,
            Self::OutputExists { .. } => 4,
            Self::SplitAborted { source, .. } => source.exit_code(),
            Self::Cancelled => 130,
            _ => match self.kind() {
                ErrorKind::Read => 3,
                ErrorKind::Write => 5,
                ErrorKind::Parse | ErrorKind::Config | ErrorKind::Internal => 1,
                ErrorKind::Cancelled => 130,
            },
        }
    }
}
