//! Page slicing.

use serde::{Deserialize, Serialize};

/// Pagination state reported alongside a page of rows.
///
/// `page` and `limit` are caller-controlled; `total` is the size of the full
/// filtered list, recomputed on every query.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Pagination {
    /// 1-based page number.
    pub page: usize,
    /// Page size.
    pub limit: usize,
    pub total: usize,
}

impl Pagination {
    /// Number of pages needed to show `total` rows (0 when there are none).
    pub fn total_pages(&self) -> usize {
        if self.limit == 0 {
            return 0;
        }
        self.total.div_ceil(self.limit)
    }

    pub fn has_next(&self) -> bool {
        self.page < self.total_pages()
    }

    pub fn has_previous(&self) -> bool {
        self.page > 1
    }

    /// 1-based index of the first row on this page, 0 for an empty page.
    pub fn first_row(&self) -> usize {
        let start = self.page.saturating_sub(1).saturating_mul(self.limit);
        if start >= self.total {
            0
        } else {
            start + 1
        }
    }

    /// 1-based index of the last row on this page, 0 for an empty page.
    pub fn last_row(&self) -> usize {
        if self.first_row() == 0 {
            return 0;
        }
        self.page.saturating_mul(self.limit).min(self.total)
    }
}

/// One page cut out of a longer list.
#[derive(Debug, Clone, PartialEq)]
pub struct PageSlice<T> {
    pub items: Vec<T>,
    /// Length of the list before slicing.
    pub total: usize,
}

/// Slice `items` to the half-open window `[(page-1)*limit, page*limit)`.
///
/// Pages past the end yield an empty slice. Page 0 is treated as page 1.
pub fn paginate<T>(items: Vec<T>, page: usize, limit: usize) -> PageSlice<T> {
    let total = items.len();
    let start = page.max(1).saturating_sub(1).saturating_mul(limit);
    let items = items.into_iter().skip(start).take(limit).collect();
    PageSlice { items, total }
}
