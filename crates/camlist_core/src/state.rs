use crate::record::CamRecord;
use crate::tracker::{CamListTracker, MergeSummary};
use crate::view_model::GridViewModel;
use crate::FilterSet;

/// Page size requested per fetch when the embedder does not choose one.
pub const DEFAULT_PAGE_SIZE: u32 = 36;

/// How many consecutive full-but-all-duplicate pages the grid chases
/// before giving up and waiting for the next user action.
pub const DUPLICATE_RETRY_LIMIT: u8 = 3;

/// How newly fetched pages are triggered.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum LoadMode {
    /// Show a "more webcams" button; nothing loads until it is clicked.
    #[default]
    MoreButton,
    /// Scroll proximity triggers loads; entered after the first click.
    InfiniteScroll,
}

/// State of one listing grid session.
///
/// Wraps the [`CamListTracker`] with the caller-side policies the tracker
/// deliberately stays out of: at most one outstanding page request, the
/// bounded chase of duplicate-only pages, and the error/retry bookkeeping.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GridState<R> {
    tracker: CamListTracker<R>,
    filters: FilterSet,
    page_size: u32,
    in_flight: Option<u32>,
    duplicate_retries: u8,
    error: Option<String>,
    mode: LoadMode,
}

impl<R> Default for GridState<R> {
    fn default() -> Self {
        Self::new(DEFAULT_PAGE_SIZE)
    }
}

impl<R> GridState<R> {
    /// An empty grid awaiting its first `FiltersChanged` seed.
    pub fn new(page_size: u32) -> Self {
        Self {
            tracker: CamListTracker::new(),
            filters: FilterSet::default(),
            page_size: page_size.max(1),
            in_flight: None,
            duplicate_retries: 0,
            error: None,
            mode: LoadMode::default(),
        }
    }

    pub fn tracker(&self) -> &CamListTracker<R> {
        &self.tracker
    }

    pub fn filters(&self) -> &FilterSet {
        &self.filters
    }

    pub fn page_size(&self) -> u32 {
        self.page_size
    }

    /// True while a page request is outstanding.
    pub fn is_loading(&self) -> bool {
        self.in_flight.is_some()
    }

    pub fn error(&self) -> Option<&str> {
        self.error.as_deref()
    }

    pub fn mode(&self) -> LoadMode {
        self.mode
    }

    pub fn view(&self) -> GridViewModel<'_, R> {
        GridViewModel {
            cams: self.tracker.records(),
            loaded_count: self.tracker.loaded_count(),
            has_more: self.tracker.has_more(),
            next_page: self.tracker.next_page(),
            loading: self.is_loading(),
            error: self.error(),
            mode: self.mode,
        }
    }

    pub(crate) fn switch_to_infinite_scroll(&mut self) {
        self.mode = LoadMode::InfiniteScroll;
    }

    /// Whether `page` is the request currently outstanding. Responses for
    /// any other page are stale (e.g. a fetch abandoned by a filter
    /// change) and must be discarded.
    pub(crate) fn is_expected(&self, page: u32) -> bool {
        self.in_flight == Some(page)
    }

    pub(crate) fn fail_fetch(&mut self, message: String) {
        self.in_flight = None;
        self.duplicate_retries = 0;
        self.error = Some(message);
    }
}

impl<R: CamRecord> GridState<R> {
    /// Starts over for a new filter session, seeded with page 1's batch.
    pub(crate) fn reset_session(&mut self, filters: FilterSet, initial: Vec<R>) {
        self.tracker.reset(initial, self.page_size);
        self.filters = filters;
        self.in_flight = None;
        self.duplicate_retries = 0;
        self.error = None;
        self.mode = LoadMode::MoreButton;
    }

    /// Marks the next page as in flight and returns its number, or `None`
    /// when a request is already outstanding or no more pages are
    /// expected. This is the single gate keeping fetches serialized.
    pub(crate) fn begin_fetch(&mut self) -> Option<u32> {
        if self.in_flight.is_some() || !self.tracker.has_more() {
            return None;
        }
        let page = self.tracker.next_page();
        self.in_flight = Some(page);
        Some(page)
    }

    /// Folds a delivered page into the tracker and clears the busy flag.
    /// A merge that makes progress resets the duplicate-retry budget.
    pub(crate) fn complete_fetch(&mut self, batch: Vec<R>) -> MergeSummary {
        self.in_flight = None;
        self.error = None;
        let summary = self.tracker.merge(batch, self.page_size);
        if summary.added > 0 {
            self.duplicate_retries = 0;
        }
        summary
    }

    /// Consumes one unit of the duplicate-retry budget. Returns false once
    /// the budget is spent, ending the chase.
    pub(crate) fn consume_duplicate_retry(&mut self) -> bool {
        if self.duplicate_retries >= DUPLICATE_RETRY_LIMIT {
            return false;
        }
        self.duplicate_retries += 1;
        true
    }
}
