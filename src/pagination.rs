//! Page arithmetic shared by the admin and user word listings.

use serde::Serialize;

pub const ADMIN_PAGE_SIZE: u64 = 100;
pub const USER_PAGE_SIZE: u64 = 10;

/// A clamped page request ready to be turned into `LIMIT`/`OFFSET`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct Page {
    pub page: u64,
    pub total_pages: u64,
    pub offset: u64,
    pub limit: u64,
}

/// Clamp `requested_page` into `[1, total_pages]` and compute the offset.
///
/// An empty listing still has one (empty) page.
pub fn paginate(total_count: u64, requested_page: i64, page_size: u64) -> Page {
    let page_size = page_size.max(1);
    let total_pages = if total_count == 0 {
        1
    } else {
        total_count.div_ceil(page_size)
    };

    let last = i64::try_from(total_pages).unwrap_or(i64::MAX);
    let page = requested_page.clamp(1, last) as u64;

    Page {
        page,
        total_pages,
        offset: (page - 1) * page_size,
        limit: page_size,
    }
}
