//! Page range parsing.
//!
//! A range specification is a comma-separated list of tokens, each either a
//! single page (`"5"`) or an inclusive span (`"1-3"`). Pages are 1-indexed.
//!
//! Ranges keep the order they were written in and are never merged or
//! deduplicated: `"1-3,2"` is two ranges, and splitting on it produces two
//! outputs.
//!
//! # Examples
//!
//! ```
//! use pdfsplice::range::RangeSet;
//!
//! let set = RangeSet::parse("1-3, 5", 10).unwrap();
//! assert_eq!(set.len(), 2);
//! assert_eq!(set.to_string(), "1-3,5");
//! assert_eq!(set.page_count(), 4);
//!
//! assert!(RangeSet::parse("0-2", 10).is_err());
//! assert!(RangeSet::parse("5-3", 10).is_err());
//! assert!(RangeSet::parse("9-11", 10).is_err());
//! ```

use serde::Serialize;
use std::fmt;
use std::ops::RangeInclusive;
use std::str::FromStr;

use crate::error::{PdfSpliceError, Result};

/// An inclusive span of 1-based page numbers with `start <= end`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
pub struct PageRange {
    start: u32,
    end: u32,
}

impl PageRange {
    /// Create a range from its bounds.
    ///
    /// # Errors
    ///
    /// Returns [`PdfSpliceError::InvalidRange`] if either bound is zero or
    /// `start > end`.
    pub fn new(start: u32, end: u32) -> Result<Self> {
        let text = format!("{start}-{end}");
        if start == 0 || end == 0 {
            return Err(PdfSpliceError::invalid_range(
                text,
                "page numbers start at 1",
            ));
        }
        if start > end {
            return Err(PdfSpliceError::invalid_range(
                text,
                "start page is after end page",
            ));
        }
        Ok(Self { start, end })
    }

    /// A range covering one page.
    pub fn single(page: u32) -> Result<Self> {
        Self::new(page, page)
    }

    /// First page (1-based).
    pub fn start(&self) -> u32 {
        self.start
    }

    /// Last page (1-based, inclusive).
    pub fn end(&self) -> u32 {
        self.end
    }

    /// Number of pages covered.
    #[allow(clippy::len_without_is_empty)]
    pub fn len(&self) -> u32 {
        self.end - self.start + 1
    }

    /// Whether the range covers a single page.
    pub fn is_single(&self) -> bool {
        self.start == self.end
    }

    /// Page numbers in order.
    pub fn pages(&self) -> RangeInclusive<u32> {
        self.start..=self.end
    }

    /// Whether `page` falls inside the range.
    pub fn contains(&self, page: u32) -> bool {
        self.pages().contains(&page)
    }

    /// Check that the range fits a document of `total_pages` pages.
    pub fn check_bounds(&self, total_pages: u32) -> Result<()> {
        if self.end > total_pages {
            return Err(PdfSpliceError::page_out_of_range(
                self.to_string(),
                total_pages,
            ));
        }
        Ok(())
    }
}

impl fmt::Display for PageRange {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.is_single() {
            write!(f, "{}", self.start)
        } else {
            write!(f, "{}-{}", self.start, self.end)
        }
    }
}

impl FromStr for PageRange {
    type Err = PdfSpliceError;

    fn from_str(token: &str) -> Result<Self> {
        let token = token.trim();
        if token.is_empty() {
            return Err(PdfSpliceError::invalid_range(token, "empty entry"));
        }

        match token.split_once('-') {
            Some((start, end)) => {
                let start = parse_page_number(token, start)?;
                let end = parse_page_number(token, end)?;
                Self::new(start, end).map_err(|err| match err {
                    PdfSpliceError::InvalidRange { reason, .. } => {
                        PdfSpliceError::invalid_range(token, reason)
                    }
                    other => other,
                })
            }
            None => {
                let page = parse_page_number(token, token)?;
                if page == 0 {
                    return Err(PdfSpliceError::invalid_range(
                        token,
                        "page numbers start at 1",
                    ));
                }
                Ok(Self {
                    start: page,
                    end: page,
                })
            }
        }
    }
}

/// Parse one side of a token. Only ASCII digits are accepted, so signs,
/// nested dashes and stray characters are all rejected here.
fn parse_page_number(token: &str, part: &str) -> Result<u32> {
    let part = part.trim();
    if part.is_empty() {
        return Err(PdfSpliceError::invalid_range(
            token,
            "expected a page number or a range like '1-5'",
        ));
    }
    if !part.bytes().all(|b| b.is_ascii_digit()) {
        return Err(PdfSpliceError::invalid_range(
            token,
            format!("'{part}' is not a page number"),
        ));
    }
    part.parse::<u32>()
        .map_err(|_| PdfSpliceError::invalid_range(token, format!("'{part}' is too large")))
}

/// Ordered sequence of page ranges, as the user wrote them.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct RangeSet {
    ranges: Vec<PageRange>,
}

impl RangeSet {
    /// Parse `text` and check every range against a document of
    /// `total_pages` pages.
    ///
    /// # Errors
    ///
    /// Returns a [`Parse`](crate::error::ErrorKind::Parse) error if a token
    /// is malformed, a span runs backwards, a bound is outside
    /// `[1, total_pages]`, or the text holds no tokens at all.
    pub fn parse(text: &str, total_pages: u32) -> Result<Self> {
        let set = Self::parse_syntax(text)?;
        set.check_bounds(total_pages)?;
        Ok(set)
    }

    /// Parse `text` without knowing the document length.
    ///
    /// Useful for rejecting bad input before any file is opened; call
    /// [`RangeSet::check_bounds`] once the page count is known.
    pub fn parse_syntax(text: &str) -> Result<Self> {
        if text.trim().is_empty() {
            return Err(PdfSpliceError::invalid_range(
                text,
                "page range cannot be empty",
            ));
        }

        let ranges = text
            .split(',')
            .map(PageRange::from_str)
            .collect::<Result<Vec<_>>>()?;

        Ok(Self { ranges })
    }

    /// A set holding one range that covers the whole document.
    pub fn full(total_pages: u32) -> Result<Self> {
        Ok(Self {
            ranges: vec![PageRange::new(1, total_pages)?],
        })
    }

    /// Build a set from already validated ranges.
    pub fn from_ranges(ranges: Vec<PageRange>) -> Result<Self> {
        if ranges.is_empty() {
            return Err(PdfSpliceError::invalid_range(
                "",
                "page range cannot be empty",
            ));
        }
        Ok(Self { ranges })
    }

    /// Check every range against a document of `total_pages` pages.
    pub fn check_bounds(&self, total_pages: u32) -> Result<()> {
        self.ranges
            .iter()
            .try_for_each(|range| range.check_bounds(total_pages))
    }

    /// Number of ranges.
    pub fn len(&self) -> usize {
        self.ranges.len()
    }

    /// Always false for a parsed set; kept for API symmetry with `len`.
    pub fn is_empty(&self) -> bool {
        self.ranges.is_empty()
    }

    /// Iterate over the ranges in user order.
    pub fn iter(&self) -> std::slice::Iter<'_, PageRange> {
        self.ranges.iter()
    }

    /// The ranges as a slice.
    pub fn as_slice(&self) -> &[PageRange] {
        &self.ranges
    }

    /// Total pages selected, counting overlaps once per occurrence.
    pub fn page_count(&self) -> u32 {
        self.ranges.iter().map(PageRange::len).sum()
    }

    /// Every selected page number in order, overlaps repeated.
    pub fn page_numbers(&self) -> Vec<u32> {
        self.ranges.iter().flat_map(PageRange::pages).collect()
    }
}

impl fmt::Display for RangeSet {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (idx, range) in self.ranges.iter().enumerate() {
            if idx > 0 {
                f.write_str(",")?;
            }
            write!(f, "{range}")?;
        }
        Ok(())
    }
}

impl FromStr for RangeSet {
    type Err = PdfSpliceError;

    fn from_str(s: &str) -> Result<Self> {
        Self::parse_syntax(s)
    }
}

impl<'a> IntoIterator for &'a RangeSet {
    type Item = &'a PageRange;
    type IntoIter = std::slice::Iter<'a, PageRange>;

    fn into_iter(self) -> Self::IntoIter {
        self.ranges.iter()
    }
}
