use crate::state::LoadMode;

/// Everything a render collaborator needs after an update pass.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GridViewModel<'a, R> {
    /// The deduplicated list in render order.
    pub cams: &'a [R],
    pub loaded_count: usize,
    /// Whether to keep offering a "load more" control.
    pub has_more: bool,
    /// The raw API page a load-more action would request.
    pub next_page: u32,
    /// True while a page request is outstanding; render a spinner and
    /// ignore further load-more triggers.
    pub loading: bool,
    /// Message for the "failed to load" banner, if the last fetch failed.
    pub error: Option<&'a str>,
    pub mode: LoadMode,
}
