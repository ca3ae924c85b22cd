use std::collections::HashSet;

use crate::record::{CamId, CamRecord};

/// Outcome of merging one raw page into the tracker.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MergeSummary {
    /// How many records of the batch were new and got appended.
    pub added: usize,
    /// Whether the raw batch looked full, i.e. another page may exist.
    pub has_more: bool,
}

/// Deduplicating accumulator for paginated cam listings.
///
/// Collects page-sized batches into one duplicate-free list while keeping
/// arrival order, and tracks the page cursor plus a "has more" estimate.
/// Invariants: `ordered` never holds two records with the same id, and
/// `seen` is exactly the id-set of `ordered`.
///
/// `has_more` is judged from the *raw* batch length against the requested
/// page size, never from the deduplicated count. A full page of records the
/// tracker has all seen before therefore still reports `has_more == true`,
/// so the caller can immediately ask for the next page instead of stalling
/// on an API that shuffles its server-side ordering between requests.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CamListTracker<R> {
    seen: HashSet<CamId>,
    ordered: Vec<R>,
    next_page: u32,
    has_more: bool,
}

impl<R> Default for CamListTracker<R> {
    fn default() -> Self {
        Self::new()
    }
}

impl<R> CamListTracker<R> {
    pub fn new() -> Self {
        Self {
            seen: HashSet::new(),
            ordered: Vec::new(),
            next_page: 1,
            has_more: true,
        }
    }

    /// The merged, duplicate-free list in render order.
    pub fn records(&self) -> &[R] {
        &self.ordered
    }

    /// Number of records accumulated so far.
    pub fn loaded_count(&self) -> usize {
        self.ordered.len()
    }

    /// O(1) membership test against the ids loaded so far.
    pub fn contains(&self, id: CamId) -> bool {
        self.seen.contains(&id)
    }

    /// The next raw API page to request.
    pub fn next_page(&self) -> u32 {
        self.next_page
    }

    /// Whether the last merged batch suggested further pages exist.
    pub fn has_more(&self) -> bool {
        self.has_more
    }

    /// Empties the tracker to a blank slate: no records, `next_page = 1`,
    /// `has_more = true`. Used on unmount or before a fresh session.
    pub fn clear(&mut self) {
        self.seen.clear();
        self.ordered.clear();
        self.next_page = 1;
        self.has_more = true;
    }
}

impl<R: CamRecord> CamListTracker<R> {
    /// Replaces all state with page 1's batch for a new filter session.
    ///
    /// Equivalent to `clear` followed by a `merge` of `initial`, leaving
    /// `next_page = 2` (page 1 is already in hand).
    pub fn reset(&mut self, initial: Vec<R>, requested_page_size: u32) {
        self.clear();
        self.merge(initial, requested_page_size);
    }

    /// Folds one raw page into the accumulated list.
    ///
    /// Records whose id is already known are dropped; the rest are appended
    /// in their batch order. A batch that duplicates an id within itself is
    /// deduplicated by first occurrence. The page cursor advances by one
    /// per call no matter how many records were new, because it tracks raw
    /// API pages, not deduplicated content.
    ///
    /// A non-positive `requested_page_size` is a caller contract violation;
    /// it is clamped to 1 so the tracker stays well-formed.
    pub fn merge(&mut self, batch: Vec<R>, requested_page_size: u32) -> MergeSummary {
        let page_size = requested_page_size.max(1) as usize;
        let raw_len = batch.len();

        let mut added = 0;
        for record in batch {
            if self.seen.insert(record.cam_id()) {
                self.ordered.push(record);
                added += 1;
            }
        }

        self.next_page += 1;
        self.has_more = raw_len >= page_size;

        MergeSummary {
            added,
            has_more: self.has_more,
        }
    }
}
