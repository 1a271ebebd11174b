//! Page selection for result queries.

use crate::error::{Error, Result};

/// Page number that selects every page.
pub const ALL_PAGES: i64 = -1;

/// Which page a query is restricted to.
///
/// Page numbers are 1-indexed. `From<i64>` maps [`ALL_PAGES`] (`-1`) to
/// [`PageFilter::All`] and any other number to [`PageFilter::Page`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum PageFilter {
    /// All pages, unfiltered
    #[default]
    All,
    /// A single page number
    Page(i64),
}

impl PageFilter {
    /// Check whether an element on `page` passes the filter.
    pub fn matches(&self, page: u32) -> bool {
        match self {
            PageFilter::All => true,
            PageFilter::Page(n) => *n == i64::from(page),
        }
    }

    /// Like [`matches`](Self::matches), for elements whose page comes from an
    /// optional bounding region. An element without a region only passes `All`.
    pub fn matches_region(&self, page: Option<u32>) -> bool {
        match self {
            PageFilter::All => true,
            PageFilter::Page(_) => page.is_some_and(|p| self.matches(p)),
        }
    }

    /// Check that a specific page lies in `1..=max`.
    pub fn validate(&self, max: u32) -> Result<()> {
        match *self {
            PageFilter::All => Ok(()),
            PageFilter::Page(n) if n >= 1 && n <= i64::from(max) => Ok(()),
            PageFilter::Page(n) => Err(Error::PageOutOfRange { page: n, max }),
        }
    }
}

impl From<i64> for PageFilter {
    fn from(page: i64) -> Self {
        if page == ALL_PAGES {
            PageFilter::All
        } else {
            PageFilter::Page(page)
        }
    }
}

impl From<Option<u32>> for PageFilter {
    fn from(page: Option<u32>) -> Self {
        page.map_or(PageFilter::All, |p| PageFilter::Page(i64::from(p)))
    }
}
