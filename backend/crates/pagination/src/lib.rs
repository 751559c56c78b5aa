//! Offset pagination primitives shared by backend list endpoints.
//!
//! A [`PageRequest`] carries a one-based page number and a page size, and
//! knows how to turn itself into the `LIMIT`/`OFFSET` pair storage adapters
//! need. A [`Page`] is the envelope returned to clients: the total number of
//! matching records plus the records on the requested page.
//!
//! # Examples
//! ```
//! use pagination::{Page, PageRequest};
//!
//! let request = PageRequest::new(3, 20).expect("valid page request");
//! assert_eq!(request.offset(), 40);
//!
//! let page = Page::new(41, vec!["only-one-left"]);
//! assert_eq!(page.total(), 41);
//! ```

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Page size used when a client does not ask for one.
pub const DEFAULT_PAGE_SIZE: u32 = 10;

/// Largest page size a client may request.
pub const MAX_PAGE_SIZE: u32 = 500;

/// Validation failures raised when constructing a [`PageRequest`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum PageRequestError {
    /// Page numbers are one-based.
    #[error("page must be at least 1")]
    ZeroPage,
    /// A page must hold at least one record.
    #[error("page size must be at least 1")]
    ZeroPageSize,
    /// The requested page size exceeds [`MAX_PAGE_SIZE`].
    #[error("page size {requested} exceeds the maximum of {max}")]
    PageSizeTooLarge {
        /// Size the client asked for.
        requested: u32,
        /// Configured upper bound.
        max: u32,
    },
}

/// One-based page selector.
///
/// ## Invariants
/// - `page >= 1`
/// - `1 <= page_size <= MAX_PAGE_SIZE`
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PageRequest {
    page: u32,
    page_size: u32,
}

impl PageRequest {
    /// Validate and build a page request.
    ///
    /// # Errors
    /// Returns [`PageRequestError`] when the page or page size falls outside
    /// the documented invariants.
    pub const fn new(page: u32, page_size: u32) -> Result<Self, PageRequestError> {
        if page == 0 {
            return Err(PageRequestError::ZeroPage);
        }
        if page_size == 0 {
            return Err(PageRequestError::ZeroPageSize);
        }
        if page_size > MAX_PAGE_SIZE {
            return Err(PageRequestError::PageSizeTooLarge {
                requested: page_size,
                max: MAX_PAGE_SIZE,
            });
        }
        Ok(Self { page, page_size })
    }

    /// Build a request from optional client input, substituting the first
    /// page and [`DEFAULT_PAGE_SIZE`] for missing values.
    ///
    /// # Errors
    /// Propagates the validation failures of [`PageRequest::new`].
    pub fn from_optional(
        page: Option<u32>,
        page_size: Option<u32>,
    ) -> Result<Self, PageRequestError> {
        Self::new(page.unwrap_or(1), page_size.unwrap_or(DEFAULT_PAGE_SIZE))
    }

    /// One-based page number.
    pub const fn page(&self) -> u32 {
        self.page
    }

    /// Maximum number of records on the page.
    pub const fn page_size(&self) -> u32 {
        self.page_size
    }

    /// Number of records to skip before the page starts.
    pub const fn offset(&self) -> u64 {
        (self.page as u64 - 1) * self.page_size as u64
    }

    /// Alias for [`PageRequest::page_size`] matching SQL vocabulary.
    pub const fn limit(&self) -> u64 {
        self.page_size as u64
    }
}

impl Default for PageRequest {
    fn default() -> Self {
        Self {
            page: 1,
            page_size: DEFAULT_PAGE_SIZE,
        }
    }
}

/// A single page of records together with the total match count.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Page<T> {
    total: u64,
    records: Vec<T>,
}

impl<T> Page<T> {
    /// Assemble a page.
    pub const fn new(total: u64, records: Vec<T>) -> Self {
        Self { total, records }
    }

    /// An empty result set.
    pub const fn empty() -> Self {
        Self {
            total: 0,
            records: Vec::new(),
        }
    }

    /// Total number of records matching the query across all pages.
    pub const fn total(&self) -> u64 {
        self.total
    }

    /// Records on this page.
    pub fn records(&self) -> &[T] {
        &self.records
    }

    /// Consume the page, returning its records.
    pub fn into_records(self) -> Vec<T> {
        self.records
    }

    /// Convert each record while keeping the total.
    pub fn map<U>(self, f: impl FnMut(T) -> U) -> Page<U> {
        Page {
            total: self.total,
            records: self.records.into_iter().map(f).collect(),
        }
    }
}
