use crate::record::CamRecord;
use crate::{Effect, GridState, LoadMode, Msg};

/// Pure update function: applies a message to grid state and returns any
/// effects for the fetch collaborator to execute.
pub fn update<R: CamRecord>(mut state: GridState<R>, msg: Msg<R>) -> (GridState<R>, Vec<Effect>) {
    let effects = match msg {
        Msg::FiltersChanged { filters, initial } => {
            state.reset_session(filters, initial);
            Vec::new()
        }
        Msg::LoadMoreClicked => {
            // First click hands control to infinite scroll; further pages
            // come from scroll-threshold messages.
            match fetch_next(&mut state) {
                Some(effect) => {
                    state.switch_to_infinite_scroll();
                    vec![effect]
                }
                None => Vec::new(),
            }
        }
        Msg::ScrollThresholdReached => {
            // Scroll triggers only count once the user opted in via the
            // button; in MoreButton mode the grid waits for a click.
            if state.mode() == LoadMode::InfiniteScroll {
                fetch_next(&mut state).into_iter().collect()
            } else {
                Vec::new()
            }
        }
        Msg::PageLoaded { page, batch } => {
            if !state.is_expected(page) {
                return (state, Vec::new());
            }
            let summary = state.complete_fetch(batch);
            // A full page of already-seen records means the server shuffled
            // its ordering under us; chase the next page, within budget, so
            // the grid does not stall with has_more still set.
            if summary.added == 0 && summary.has_more && state.consume_duplicate_retry() {
                fetch_next(&mut state).into_iter().collect()
            } else {
                Vec::new()
            }
        }
        Msg::PageFailed { page, message } => {
            if state.is_expected(page) {
                state.fail_fetch(message);
            }
            Vec::new()
        }
        Msg::RetryClicked => {
            if state.error().is_some() {
                // The failed page never reached merge, so the cursor still
                // points at it; this re-requests the same page.
                fetch_next(&mut state).into_iter().collect()
            } else {
                Vec::new()
            }
        }
        Msg::NoOp => Vec::new(),
    };

    (state, effects)
}

fn fetch_next<R: CamRecord>(state: &mut GridState<R>) -> Option<Effect> {
    let page = state.begin_fetch()?;
    Some(Effect::FetchPage {
        page,
        filters: state.filters().clone(),
        limit: state.page_size(),
    })
}
