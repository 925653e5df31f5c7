//! Ordering and partitioning helpers shared by the generator.
//!
//! - [`sort_by_lastmod`]: newest-first ordering used for both URL lists and
//!   the index
//! - [`chunk_urls`]: splits a sorted URL list into size-bounded groups

use crate::models::Lastmod;
use std::cmp::Reverse;

/// Sort items by last modification time, newest first.
///
/// Items without a timestamp count as `0` and end up last. The sort is
/// stable, so items with equal effective timestamps keep their input order
/// and identical input produces identical output.
pub fn sort_by_lastmod<T: Lastmod>(items: &mut [T]) {
    items.sort_by_key(|item| Reverse(item.effective_timestamp()));
}

/// Split `urls` into consecutive groups of at most `max` items.
///
/// A `max` of `0` means unbounded: the whole list is returned as a single
/// group. The last group may be shorter than `max`. Concatenating the groups
/// gives back the input in its original order.
pub fn chunk_urls<T>(urls: &[T], max: usize) -> Vec<&[T]> {
    if max == 0 {
        return vec![urls];
    }
    urls.chunks(max).collect()
}

/// Truncate a string for logging purposes.
///
/// Long strings are cut to `max` bytes (backing off to a char boundary) with
/// an ellipsis and the number of dropped bytes appended.
pub fn truncate_for_log(s: &str, max: usize) -> String {
    if s.len() <= max {
        return s.to_string();
    }
    let mut end = max;
    while !s.is_char_boundary(end) {
        end -= 1;
    }
    format!("{}…(+{} bytes)", &s[..end], s.len() - end)
}
