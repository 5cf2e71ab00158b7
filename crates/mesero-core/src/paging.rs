//! # Page Windows
//!
//! Page-window arithmetic shared by every `get_*_for_page` query in the
//! store. Centralized so the boundary behavior (short last page, empty
//! out-of-range page) is decided exactly once.

use std::ops::Range;

/// Returns the index range of page `page_index` over a collection of
/// `len` items, `page_size` items per page.
///
/// - the last page may be shorter than `page_size`
/// - a page past the end is the empty range, never a panic
/// - `page_size == 0` always yields the empty range
pub fn page_window(len: usize, page_index: usize, page_size: usize) -> Range<usize> {
    let start = page_index.saturating_mul(page_size);
    if start >= len {
        return 0..0;
    }
    let end = start.saturating_add(page_size).min(len);
    start..end
}
