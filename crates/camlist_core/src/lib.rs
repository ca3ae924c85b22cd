//! Camlist core: pure listing-grid state machine and the deduplicating
//! pagination tracker underneath it.
mod effect;
mod filters;
mod msg;
mod record;
mod state;
mod tracker;
mod update;
mod view_model;

pub use effect::Effect;
pub use filters::FilterSet;
pub use msg::Msg;
pub use record::{CamId, CamRecord};
pub use state::{GridState, LoadMode, DEFAULT_PAGE_SIZE, DUPLICATE_RETRY_LIMIT};
pub use tracker::{CamListTracker, MergeSummary};
pub use update::update;
pub use view_model::GridViewModel;
