//! Offset/limit pagination state
//!
//! [`Pager`] tracks the position of a paginated view over a server-side
//! collection. The offset is always a non-negative multiple of the page size,
//! Prev is disabled exactly on the first page and Next is disabled once the
//! current page reaches the end of the collection.

use serde::{Deserialize, Serialize};
use std::fmt;

use crate::error::EatRateLoveError;

/// The fixed set of page sizes offered by the views.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(try_from = "u32", into = "u32")]
pub enum PageSize {
    Five,
    #[default]
    Ten,
    TwentyFive,
}

impl PageSize {
    /// All selectable page sizes, smallest first.
    pub const ALL: [PageSize; 3] = [PageSize::Five, PageSize::Ten, PageSize::TwentyFive];

    pub fn get(self) -> u32 {
        match self {
            PageSize::Five => 5,
            PageSize::Ten => 10,
            PageSize::TwentyFive => 25,
        }
    }
}

impl TryFrom<u32> for PageSize {
    type Error = EatRateLoveError;

    fn try_from(value: u32) -> Result<Self, Self::Error> {
        match value {
            5 => Ok(PageSize::Five),
            10 => Ok(PageSize::Ten),
            25 => Ok(PageSize::TwentyFive),
            other => Err(EatRateLoveError::Validation(format!(
                "page size must be one of 5, 10, 25 (got {})",
                other
            ))),
        }
    }
}

impl From<PageSize> for u32 {
    fn from(size: PageSize) -> Self {
        size.get()
    }
}

impl fmt::Display for PageSize {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.get())
    }
}

impl std::str::FromStr for PageSize {
    type Err = EatRateLoveError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let value: u32 = s.trim().parse().map_err(|_| {
            EatRateLoveError::Validation(format!("page size must be a number (got {:?})", s))
        })?;
        PageSize::try_from(value)
    }
}

/// Position within a paginated collection.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Pager {
    limit: PageSize,
    offset: u64,
    total: u64,
}

impl Pager {
    /// Create a pager on the first page with an unknown (zero) total.
    pub fn new(limit: PageSize) -> Self {
        Self {
            limit,
            offset: 0,
            total: 0,
        }
    }

    /// Create a pager at an arbitrary offset, snapped down to a page boundary.
    pub fn at(limit: PageSize, offset: u64) -> Self {
        let step = u64::from(limit.get());
        Self {
            limit,
            offset: offset - offset % step,
            total: 0,
        }
    }

    pub fn limit(&self) -> PageSize {
        self.limit
    }

    pub fn offset(&self) -> u64 {
        self.offset
    }

    pub fn total(&self) -> u64 {
        self.total
    }

    /// Record the collection size reported by the server.
    pub fn set_total(&mut self, total: u64) {
        self.total = total;
    }

    /// Change the page size and return to the first page.
    pub fn set_limit(&mut self, limit: PageSize) {
        self.limit = limit;
        self.offset = 0;
    }

    /// Return to the first page, keeping the page size.
    pub fn reset(&mut self) {
        self.offset = 0;
    }

    pub fn prev_disabled(&self) -> bool {
        self.offset == 0
    }

    pub fn next_disabled(&self) -> bool {
        self.offset.saturating_add(self.step()) >= self.total
    }

    /// Offset of the previous page, or `None` on the first page.
    pub fn prev_offset(&self) -> Option<u64> {
        if self.prev_disabled() {
            None
        } else {
            Some(self.offset.saturating_sub(self.step()))
        }
    }

    /// Offset of the next page, or `None` when it would start past the end.
    pub fn next_offset(&self) -> Option<u64> {
        if self.next_disabled() {
            None
        } else {
            self.offset.checked_add(self.step())
        }
    }

    /// Step back one page. Returns `false` when already on the first page.
    pub fn prev(&mut self) -> bool {
        match self.prev_offset() {
            Some(offset) => {
                self.offset = offset;
                true
            }
            None => false,
        }
    }

    /// Step forward one page. Returns `false` when already on the last page.
    pub fn next(&mut self) -> bool {
        match self.next_offset() {
            Some(offset) => {
                self.offset = offset;
                true
            }
            None => false,
        }
    }

    /// 1-based number of the current page.
    pub fn page_number(&self) -> u64 {
        self.offset / self.step() + 1
    }

    /// Number of pages, never less than one.
    pub fn page_count(&self) -> u64 {
        self.total.div_ceil(self.step()).max(1)
    }

    fn step(&self) -> u64 {
        u64::from(self.limit.get())
    }
}

impl fmt::Display for Pager {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Page {} / {}", self.page_number(), self.page_count())
    }
}
