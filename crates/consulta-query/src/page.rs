//! Page requests and pagination math.

use std::ops::Range;

use serde::{Deserialize, Serialize};

/// A 1-based page request.
///
/// A `size` of zero disables pagination: the whole filtered sequence is one
/// page.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct PageRequest {
    /// 1-based page index as requested by the caller.
    pub index: usize,
    /// Items per page, or 0 for "no pagination".
    pub size: usize,
}

impl PageRequest {
    /// Creates a page request.
    pub fn new(index: usize, size: usize) -> Self {
        PageRequest { index, size }
    }

    /// A request for everything on a single page.
    pub fn all() -> Self {
        PageRequest { index: 1, size: 0 }
    }

    /// Returns `true` when pagination is disabled.
    pub fn is_unbounded(&self) -> bool {
        self.size == 0
    }

    /// `max(1, ceil(total / size))`, or 1 when pagination is disabled.
    pub fn page_count(&self, total: usize) -> usize {
        if self.size == 0 {
            1
        } else {
            total.div_ceil(self.size).max(1)
        }
    }

    /// Index range of the requested page within `total` items.
    ///
    /// An index of 0 is read as page 1. An index past the last page yields an
    /// empty range; it is never an error.
    pub fn bounds(&self, total: usize) -> Range<usize> {
        if self.size == 0 {
            return 0..total;
        }
        let index = self.index.max(1);
        if index > self.page_count(total) {
            return total..total;
        }
        let start = (index - 1).saturating_mul(self.size).min(total);
        let end = start.saturating_add(self.size).min(total);
        start..end
    }
}

impl Default for PageRequest {
    fn default() -> Self {
        PageRequest::all()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn page_count_minimum_is_one() {
        assert_eq!(PageRequest::new(1, 10).page_count(0), 1);
        assert_eq!(PageRequest::new(1, 10).page_count(10), 1);
        assert_eq!(PageRequest::new(1, 10).page_count(11), 2);
        assert_eq!(PageRequest::new(1, 3).page_count(5), 2);
        assert_eq!(PageRequest::all().page_count(500), 1);
    }

    #[test]
    fn bounds_first_and_last_page() {
        assert_eq!(PageRequest::new(1, 3).bounds(5), 0..3);
        assert_eq!(PageRequest::new(2, 3).bounds(5), 3..5);
    }

    #[test]
    fn bounds_past_last_page_is_empty() {
        assert!(PageRequest::new(3, 3).bounds(5).is_empty());
        assert!(PageRequest::new(99, 10).bounds(12).is_empty());
        assert!(PageRequest::new(usize::MAX, 10).bounds(12).is_empty());
    }

    #[test]
    fn bounds_index_zero_reads_as_first_page() {
        assert_eq!(PageRequest::new(0, 4).bounds(10), 0..4);
    }

    #[test]
    fn bounds_unbounded_returns_everything() {
        assert_eq!(PageRequest::new(7, 0).bounds(12), 0..12);
    }

    #[test]
    fn bounds_empty_collection() {
        assert!(PageRequest::new(1, 10).bounds(0).is_empty());
    }
}
