use crate::FilterSet;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Msg<R> {
    /// The filter parameters changed (or the grid just mounted); `initial`
    /// is page 1's batch for the new session, possibly empty.
    FiltersChanged { filters: FilterSet, initial: Vec<R> },
    /// User clicked the "more webcams" button.
    LoadMoreClicked,
    /// Infinite scroll passed its proximity threshold.
    ScrollThresholdReached,
    /// The fetch collaborator delivered a raw page.
    PageLoaded { page: u32, batch: Vec<R> },
    /// The fetch collaborator failed to deliver a page.
    PageFailed { page: u32, message: String },
    /// User clicked retry after a failed load.
    RetryClicked,
    /// Fallback for placeholder wiring.
    NoOp,
}
