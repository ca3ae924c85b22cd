//! Camlist engine: the fetch collaborator behind the listing grids.
//!
//! Talks to the remote cam listing API, parses page batches, memoizes
//! responses behind a TTL cache, and hands results back to UI threads as
//! engine events.
mod cache;
mod client;
mod engine;
mod types;

pub use cache::{page_cache_key, ResponseCache, DEFAULT_CACHE_TTL};
pub use client::{ApiSettings, CamFetcher, ReqwestCamFetcher};
pub use engine::EngineHandle;
pub use types::{
    Cam, CamProfile, DetailedCamProfile, EngineEvent, FailureKind, FetchError, ProfilePhoto,
};
