// ABOUTME: Offset/limit pagination helpers shared by all list endpoints
// ABOUTME: Normalizes client query parameters and computes page math
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Foodies

//! Offset/limit pagination for list endpoints.

use crate::constants::limits;
use serde::Deserialize;

/// Raw pagination query parameters as sent by clients
#[derive(Debug, Clone, Copy, Deserialize, Default)]
pub struct PageQuery {
    /// 1-based page number
    pub page: Option<i64>,
    /// Items per page
    pub limit: Option<i64>,
}

/// Normalized pagination window
#[derive(Debug, Clone, Copy)]
pub struct Pagination {
    /// 1-based page number, at least 1
    pub page: i64,
    /// Items per page, clamped to `limits::MAX_PAGE_SIZE`
    pub limit: i64,
}

impl Pagination {
    /// Normalize raw query parameters: page defaults to 1, limit to
    /// `limits::DEFAULT_PAGE_SIZE`, both clamped to sane bounds.
    #[must_use]
    pub fn from_query(query: PageQuery) -> Self {
        let page = query.page.unwrap_or(1).max(1);
        let limit = query
            .limit
            .unwrap_or(limits::DEFAULT_PAGE_SIZE)
            .clamp(1, limits::MAX_PAGE_SIZE);
        Self { page, limit }
    }

    /// Row offset for the current window
    #[must_use]
    pub const fn offset(&self) -> i64 {
        (self.page - 1) * self.limit
    }

    /// Number of pages needed for `total` items at this window's limit
    #[must_use]
    pub const fn total_pages(&self, total: i64) -> i64 {
        if total <= 0 {
            0
        } else {
            (total + self.limit - 1) / self.limit
        }
    }
}

impl Default for Pagination {
    fn default() -> Self {
        Self::from_query(PageQuery::default())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let p = Pagination::from_query(PageQuery::default());
        assert_eq!(p.page, 1);
        assert_eq!(p.limit, limits::DEFAULT_PAGE_SIZE);
        assert_eq!(p.offset(), 0);
    }

    #[test]
    fn test_offset_math() {
        let p = Pagination::from_query(PageQuery {
            page: Some(3),
            limit: Some(20),
        });
        assert_eq!(p.offset(), 40);
    }

    #[test]
    fn test_clamping() {
        let p = Pagination::from_query(PageQuery {
            page: Some(0),
            limit: Some(10_000),
        });
        assert_eq!(p.page, 1);
        assert_eq!(p.limit, limits::MAX_PAGE_SIZE);

        let p = Pagination::from_query(PageQuery {
            page: Some(-5),
            limit: Some(0),
        });
        assert_eq!(p.page, 1);
        assert_eq!(p.limit, 1);
    }

    #[test]
    fn test_total_pages() {
        let p = Pagination::from_query(PageQuery {
            page: Some(1),
            limit: Some(10),
        });
        assert_eq!(p.total_pages(0), 0);
        assert_eq!(p.total_pages(1), 1);
        assert_eq!(p.total_pages(10), 1);
        assert_eq!(p.total_pages(11), 2);
    }
}
