//! Shared pagination utilities
//!
//! ```rust,ignore
//! let params = PaginationParams::new(Some(2), Some(20));
//! let (items, total) = store.list_dashboards(author, params.offset(), params.per_page()).await?;
//! let page = Paginated::from_items(items, &params, total);
//! ```

use serde::{Deserialize, Serialize};

pub const DEFAULT_PER_PAGE: i64 = 20;
pub const MAX_PER_PAGE: i64 = 100;
/// Upper bound on `?page=`; keeps `offset()` far from `i64::MAX`
pub const MAX_PAGE: i64 = 1_000_000;

/// `?page=&per_page=` query parameters (1-indexed pages)
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct PaginationParams {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub page: Option<i64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub per_page: Option<i64>,
}

impl PaginationParams {
    pub fn new(page: Option<i64>, per_page: Option<i64>) -> Self {
        Self { page, per_page }
    }

    pub fn page(&self) -> i64 {
        self.page.unwrap_or(1).max(1)
    }

    pub fn per_page(&self) -> i64 {
        self.per_page.unwrap_or(DEFAULT_PER_PAGE).clamp(1, MAX_PER_PAGE)
    }

    pub fn offset(&self) -> i64 {
        self.page()
            .saturating_sub(1)
            .saturating_mul(self.per_page())
    }

    /// Reject explicit out-of-range values instead of silently clamping them
    pub fn validate(&self) -> Result<(), &'static str> {
        if self.page.is_some_and(|page| page < 1) {
            return Err("Page must be greater than 0");
        }
        if self.page.is_some_and(|page| page > MAX_PAGE) {
            return Err("Page must be at most 1000000");
        }
        if self
            .per_page
            .is_some_and(|per_page| !(1..=MAX_PER_PAGE).contains(&per_page))
        {
            return Err("Per page must be between 1 and 100");
        }
        Ok(())
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PaginationMetadata {
    pub page: i64,
    pub per_page: i64,
    pub total: i64,
    pub pages: i64,
    pub has_next: bool,
    pub has_prev: bool,
}

impl PaginationMetadata {
    pub fn new(page: i64, per_page: i64, total: i64) -> Self {
        let pages = if total <= 0 {
            0
        } else {
            (total + per_page - 1) / per_page
        };

        Self {
            page,
            per_page,
            total,
            pages,
            has_next: page < pages,
            has_prev: page > 1,
        }
    }
}

/// One page of list results
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Paginated<T> {
    pub items: Vec<T>,
    pub pagination: PaginationMetadata,
}

impl<T> Paginated<T> {
    pub fn from_items(items: Vec<T>, params: &PaginationParams, total: i64) -> Self {
        Self {
            items,
            pagination: PaginationMetadata::new(params.page(), params.per_page(), total),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_and_offset() {
        let params = PaginationParams::default();
        assert_eq!(params.page(), 1);
        assert_eq!(params.per_page(), DEFAULT_PER_PAGE);
        assert_eq!(params.offset(), 0);

        let params = PaginationParams::new(Some(3), Some(10));
        assert_eq!(params.offset(), 20);
    }

    #[test]
    fn test_validation() {
        assert!(PaginationParams::new(Some(1), Some(100)).validate().is_ok());
        assert_eq!(
            PaginationParams::new(Some(0), None).validate(),
            Err("Page must be greater than 0")
        );
        assert!(PaginationParams::new(None, Some(101)).validate().is_err());
        assert!(PaginationParams::new(Some(MAX_PAGE), None).validate().is_ok());
        assert_eq!(
            PaginationParams::new(Some(MAX_PAGE + 1), None).validate(),
            Err("Page must be at most 1000000")
        );
    }

    #[test]
    fn test_offset_saturates_on_huge_page() {
        let params = PaginationParams::new(Some(i64::MAX), Some(MAX_PER_PAGE));
        assert!(params.validate().is_err());
        assert_eq!(params.offset(), i64::MAX);

        let params = PaginationParams::new(Some(MAX_PAGE), Some(MAX_PER_PAGE));
        assert_eq!(params.offset(), (MAX_PAGE - 1) * MAX_PER_PAGE);
    }

    #[test]
    fn test_metadata_pages() {
        let meta = PaginationMetadata::new(2, 10, 25);
        assert_eq!(meta.pages, 3);
        assert!(meta.has_next && meta.has_prev);

        let empty = PaginationMetadata::new(1, 10, 0);
        assert_eq!(empty.pages, 0);
        assert!(!empty.has_next && !empty.has_prev);
    }
}
