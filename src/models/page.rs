//! One page of a remote collection, as returned by a fetch.

use serde::{Deserialize, Serialize};

/// `{data, total, page, limit, totalPages}`. `page` is 1-based.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Page<R> {
    pub data: Vec<R>,
    pub total: u64,
    pub page: u32,
    pub limit: u32,
    pub total_pages: u32,
}

impl<R> Page<R> {
    /// Build a page, deriving `total_pages` from `total` and `limit`.
    pub fn new(data: Vec<R>, total: u64, page: u32, limit: u32) -> Self {
        Self {
            data,
            total,
            page: page.max(1),
            limit: limit.max(1),
            total_pages: total_pages(total, limit),
        }
    }

    pub fn empty(limit: u32) -> Self {
        Self::new(Vec::new(), 0, 1, limit)
    }
}

/// `ceil(total / limit)`, with a zero limit treated as one.
pub fn total_pages(total: u64, limit: u32) -> u32 {
    let limit = u64::from(limit.max(1));
    u32::try_from(total.div_ceil(limit)).unwrap_or(u32::MAX)
}
