//! Page arithmetic for listings.

use serde::{Deserialize, Serialize};

/// A 1-based page request.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PageRequest {
    pub page: u32,
    pub per_page: u32,
}

impl PageRequest {
    /// `page` and `per_page` are raised to at least 1.
    pub fn new(page: u32, per_page: u32) -> Self {
        Self {
            page: page.max(1),
            per_page: per_page.max(1),
        }
    }

    /// Row offset of the first item on this page.
    pub fn offset(&self) -> u64 {
        u64::from(self.page - 1) * u64::from(self.per_page)
    }

    pub fn limit(&self) -> u64 {
        u64::from(self.per_page)
    }
}

/// One page of results plus the totals needed for navigation.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Page<T> {
    pub items: Vec<T>,
    pub page: u32,
    pub per_page: u32,
    pub total: u64,
    pub page_count: u32,
}

impl<T> Page<T> {
    pub fn new(items: Vec<T>, request: PageRequest, total: u64) -> Self {
        Self {
            items,
            page: request.page,
            per_page: request.per_page,
            total,
            page_count: page_count(total, request.per_page),
        }
    }

    /// The page to redirect to when the requested page is past the end.
    pub fn overflow_target(&self) -> Option<u32> {
        (self.page > self.page_count).then_some(self.page_count)
    }

    pub fn map<U, F: FnMut(T) -> U>(self, f: F) -> Page<U> {
        Page {
            items: self.items.into_iter().map(f).collect(),
            page: self.page,
            per_page: self.per_page,
            total: self.total,
            page_count: self.page_count,
        }
    }
}

/// Number of pages for `total` items; an empty listing still has one page.
pub fn page_count(total: u64, per_page: u32) -> u32 {
    let per_page = u64::from(per_page.max(1));
    let pages = total.div_ceil(per_page).max(1);
    u32::try_from(pages).unwrap_or(u32::MAX)
}

/// Clamp a raw requested page number into `1..=page_count`.
pub fn clamp_page(requested: i64, page_count: u32) -> u32 {
    if requested < 1 {
        return 1;
    }
    u32::try_from(requested).unwrap_or(u32::MAX).min(page_count.max(1))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_listing_has_one_page() {
        assert_eq!(page_count(0, 10), 1);
    }

    #[test]
    fn partial_last_page_counts() {
        assert_eq!(page_count(10, 10), 1);
        assert_eq!(page_count(11, 10), 2);
        assert_eq!(page_count(25, 10), 3);
    }

    #[test]
    fn offset_is_zero_based() {
        assert_eq!(PageRequest::new(1, 10).offset(), 0);
        assert_eq!(PageRequest::new(3, 10).offset(), 20);
        assert_eq!(PageRequest::new(0, 10).page, 1);
    }

    #[test]
    fn clamp_handles_both_ends() {
        assert_eq!(clamp_page(-4, 3), 1);
        assert_eq!(clamp_page(0, 3), 1);
        assert_eq!(clamp_page(2, 3), 2);
        assert_eq!(clamp_page(99, 3), 3);
    }

    #[test]
    fn overflow_target_points_at_last_page() {
        let page: Page<u8> = Page::new(vec![], PageRequest::new(7, 10), 25);
        assert_eq!(page.overflow_target(), Some(3));
        let page: Page<u8> = Page::new(vec![1], PageRequest::new(3, 10), 25);
        assert_eq!(page.overflow_target(), None);
    }
}
