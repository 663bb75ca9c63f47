//! # Listing
//!
//! Deterministic ordering and paging of entry listings.

use crate::domain::{EntryList, HtlcEntry};

/// Sort by expiration time, ties broken by id bytes.
pub fn sort_entries(entries: &mut [HtlcEntry]) {
    entries.sort_by(|a, b| {
        a.expiration_time
            .cmp(&b.expiration_time)
            .then_with(|| a.id.cmp(&b.id))
    });
}

/// Sort `entries` and cut page `page_index` of `page_size` entries.
///
/// Pages past the end are empty; `count` is always the full total.
pub fn paginate(mut entries: Vec<HtlcEntry>, page_index: u32, page_size: u32) -> EntryList {
    sort_entries(&mut entries);

    let count = entries.len();
    let start = (page_index as usize)
        .saturating_mul(page_size as usize)
        .min(count);
    let end = start.saturating_add(page_size as usize).min(count);

    EntryList {
        count,
        list: entries.drain(start..end).collect(),
    }
}
