use std::sync::{mpsc, Arc, Mutex};
use std::time::Instant;

use camlist_core::{Effect, FilterSet};
use grid_logging::{grid_debug, grid_error, grid_warn};

use crate::cache::{page_cache_key, ResponseCache};
use crate::client::{ApiSettings, CamFetcher, ReqwestCamFetcher};
use crate::types::{Cam, EngineEvent, FetchError};

enum EngineCommand {
    FetchPage {
        page: u32,
        filters: FilterSet,
        limit: u32,
    },
}

type PageCache = Arc<Mutex<ResponseCache<Vec<Cam>>>>;

/// Bridge between a synchronous UI thread and the async fetch stack.
///
/// Owns a worker thread with a tokio runtime; commands go in over a
/// channel, [`EngineEvent`]s come back out via [`EngineHandle::try_recv`].
/// Responses pass through a shared TTL cache, with expired entries served
/// as a last resort when the API errors.
pub struct EngineHandle {
    cmd_tx: mpsc::Sender<EngineCommand>,
    event_rx: mpsc::Receiver<EngineEvent>,
}

impl EngineHandle {
    pub fn new(settings: ApiSettings) -> Result<Self, FetchError> {
        let fetcher = Arc::new(ReqwestCamFetcher::new(settings)?);
        Ok(Self::with_fetcher(fetcher, ResponseCache::default()))
    }

    /// Wires the handle around a caller-supplied fetcher and cache. Tests
    /// use this to substitute mock transports or short TTLs.
    pub fn with_fetcher(fetcher: Arc<dyn CamFetcher>, cache: ResponseCache<Vec<Cam>>) -> Self {
        let (cmd_tx, cmd_rx) = mpsc::channel();
        let (event_tx, event_rx) = mpsc::channel();
        let cache: PageCache = Arc::new(Mutex::new(cache));

        std::thread::spawn(move || {
            let runtime = tokio::runtime::Runtime::new().expect("tokio runtime");
            while let Ok(command) = cmd_rx.recv() {
                let fetcher = fetcher.clone();
                let cache = cache.clone();
                let event_tx = event_tx.clone();
                runtime.spawn(async move {
                    handle_command(fetcher.as_ref(), &cache, command, event_tx).await;
                });
            }
        });

        Self { cmd_tx, event_rx }
    }

    /// Executes a core [`Effect`] produced by `camlist_core::update`.
    pub fn execute(&self, effect: Effect) {
        match effect {
            Effect::FetchPage {
                page,
                filters,
                limit,
            } => self.fetch_page(page, filters, limit),
        }
    }

    pub fn fetch_page(&self, page: u32, filters: FilterSet, limit: u32) {
        let _ = self.cmd_tx.send(EngineCommand::FetchPage {
            page,
            filters,
            limit,
        });
    }

    pub fn try_recv(&self) -> Option<EngineEvent> {
        self.event_rx.try_recv().ok()
    }

    /// Blocks until the next event arrives or the engine shuts down.
    pub fn recv(&self) -> Option<EngineEvent> {
        self.event_rx.recv().ok()
    }
}

async fn handle_command(
    fetcher: &dyn CamFetcher,
    cache: &PageCache,
    command: EngineCommand,
    event_tx: mpsc::Sender<EngineEvent>,
) {
    match command {
        EngineCommand::FetchPage {
            page,
            filters,
            limit,
        } => {
            let key = page_cache_key("cams/online.json", page, limit, &filters);

            let cached = {
                let cache = cache.lock().expect("page cache mutex");
                cache.get(&key, Instant::now()).cloned()
            };
            if let Some(cams) = cached {
                grid_debug!("cache hit for page {page}");
                let _ = event_tx.send(EngineEvent::PageLoaded {
                    page,
                    result: Ok(cams),
                });
                return;
            }

            let result = match fetcher.fetch_cams(page, &filters, limit).await {
                Ok(cams) => {
                    let mut cache = cache.lock().expect("page cache mutex");
                    cache.insert(key, cams.clone(), Instant::now());
                    Ok(cams)
                }
                Err(err) => {
                    grid_error!("fetching page {page} failed: {err}");
                    let stale = {
                        let cache = cache.lock().expect("page cache mutex");
                        cache.get_stale(&key).cloned()
                    };
                    match stale {
                        Some(cams) => {
                            grid_warn!("serving expired cache for page {page}");
                            Ok(cams)
                        }
                        None => Err(err),
                    }
                }
            };

            let _ = event_tx.send(EngineEvent::PageLoaded { page, result });
        }
    }
}
