use std::collections::HashSet;
use std::time::Duration;

use camlist_core::{CamId, FilterSet};
use futures_util::StreamExt;
use grid_logging::{grid_debug, grid_warn};

use crate::types::{Cam, CamProfile, DetailedCamProfile, FailureKind, FetchError};

/// Connection parameters for the listing API.
#[derive(Debug, Clone)]
pub struct ApiSettings {
    /// API root, overridable so tests can point at a local mock server.
    pub base_url: String,
    /// Affiliate id sent as the `aid` query parameter on every request.
    pub affiliate_id: String,
    pub connect_timeout: Duration,
    pub request_timeout: Duration,
    pub max_bytes: u64,
}

impl Default for ApiSettings {
    fn default() -> Self {
        Self {
            base_url: "https://api.cam4pays.com/api/v1".to_string(),
            affiliate_id: "7654".to_string(),
            connect_timeout: Duration::from_secs(10),
            request_timeout: Duration::from_secs(10),
            max_bytes: 2 * 1024 * 1024,
        }
    }
}

#[async_trait::async_trait]
pub trait CamFetcher: Send + Sync {
    /// One raw page of online cams for the given filters. The returned
    /// batch keeps the API's ordering and may contain ids the caller has
    /// already seen on earlier pages.
    async fn fetch_cams(
        &self,
        page: u32,
        filters: &FilterSet,
        limit: u32,
    ) -> Result<Vec<Cam>, FetchError>;

    /// The listing entry for one nickname, if currently online.
    async fn fetch_profile(&self, nickname: &str) -> Result<Option<CamProfile>, FetchError>;

    /// The detailed profile page payload; `Ok(None)` for unknown users.
    async fn fetch_profile_detail(
        &self,
        username: &str,
    ) -> Result<Option<DetailedCamProfile>, FetchError>;
}

#[derive(Debug, Clone)]
pub struct ReqwestCamFetcher {
    settings: ApiSettings,
    client: reqwest::Client,
}

impl ReqwestCamFetcher {
    pub fn new(settings: ApiSettings) -> Result<Self, FetchError> {
        let client = reqwest::Client::builder()
            .connect_timeout(settings.connect_timeout)
            .timeout(settings.request_timeout)
            .build()
            .map_err(|err| FetchError::new(FailureKind::Network, err.to_string()))?;
        Ok(Self { settings, client })
    }

    fn endpoint_url(
        &self,
        endpoint: &str,
        params: &[(&str, String)],
    ) -> Result<reqwest::Url, FetchError> {
        let raw = format!("{}/{}", self.settings.base_url.trim_end_matches('/'), endpoint);
        let mut url = reqwest::Url::parse(&raw)
            .map_err(|err| FetchError::new(FailureKind::InvalidUrl, err.to_string()))?;
        {
            let mut query = url.query_pairs_mut();
            query.append_pair("aid", &self.settings.affiliate_id);
            for (key, value) in params {
                query.append_pair(key, value);
            }
        }
        Ok(url)
    }

    async fn get_body(&self, url: reqwest::Url) -> Result<Vec<u8>, FetchError> {
        let response = self
            .client
            .get(url)
            .send()
            .await
            .map_err(map_reqwest_error)?;

        let status = response.status();
        if !status.is_success() {
            return Err(FetchError::new(
                FailureKind::HttpStatus(status.as_u16()),
                status.to_string(),
            ));
        }

        self.read_body_capped(response).await
    }

    async fn read_body_capped(&self, response: reqwest::Response) -> Result<Vec<u8>, FetchError> {
        let max_bytes = self.settings.max_bytes;
        if let Some(content_len) = response.content_length() {
            if content_len > max_bytes {
                return Err(FetchError::new(
                    FailureKind::TooLarge {
                        max_bytes,
                        actual: Some(content_len),
                    },
                    "response too large",
                ));
            }
        }

        let mut bytes = Vec::new();
        let mut stream = response.bytes_stream();
        while let Some(chunk) = stream.next().await {
            let chunk = chunk.map_err(map_reqwest_error)?;
            let next_len = bytes.len() as u64 + chunk.len() as u64;
            if next_len > max_bytes {
                return Err(FetchError::new(
                    FailureKind::TooLarge {
                        max_bytes,
                        actual: Some(next_len),
                    },
                    "response too large",
                ));
            }
            bytes.extend_from_slice(&chunk);
        }
        Ok(bytes)
    }
}

#[async_trait::async_trait]
impl CamFetcher for ReqwestCamFetcher {
    async fn fetch_cams(
        &self,
        page: u32,
        filters: &FilterSet,
        limit: u32,
    ) -> Result<Vec<Cam>, FetchError> {
        let mut params = vec![
            ("page", page.to_string()),
            ("limit", limit.to_string()),
        ];
        for (key, value) in filters.query_pairs() {
            params.push((key, value.to_string()));
        }
        let url = self.endpoint_url("cams/online.json", &params)?;
        grid_debug!("fetching cams page {page} (limit {limit})");

        let body = self.get_body(url).await?;
        let cams: Vec<Cam> = serde_json::from_slice(&body)
            .map_err(|err| FetchError::new(FailureKind::InvalidBody, err.to_string()))?;

        warn_on_intra_batch_duplicates(&cams);
        Ok(cams)
    }

    async fn fetch_profile(&self, nickname: &str) -> Result<Option<CamProfile>, FetchError> {
        let params = vec![("nickname", nickname.to_string())];
        let url = self.endpoint_url("cams/online.json", &params)?;

        let body = self.get_body(url).await?;
        let profiles: Vec<CamProfile> = serde_json::from_slice(&body)
            .map_err(|err| FetchError::new(FailureKind::InvalidBody, err.to_string()))?;

        // The endpoint matches nicknames loosely; keep exact matches only.
        Ok(profiles
            .into_iter()
            .find(|profile| profile.cam.nickname == nickname))
    }

    async fn fetch_profile_detail(
        &self,
        username: &str,
    ) -> Result<Option<DetailedCamProfile>, FetchError> {
        let endpoint = format!("cams/profile/{username}.json");
        let url = self.endpoint_url(&endpoint, &[])?;

        let response = self
            .client
            .get(url)
            .send()
            .await
            .map_err(map_reqwest_error)?;

        let status = response.status();
        if status.as_u16() == 404 {
            return Ok(None);
        }
        if !status.is_success() {
            return Err(FetchError::new(
                FailureKind::HttpStatus(status.as_u16()),
                status.to_string(),
            ));
        }

        let body = self.read_body_capped(response).await?;
        serde_json::from_slice::<Option<DetailedCamProfile>>(&body)
            .map_err(|err| FetchError::new(FailureKind::InvalidBody, err.to_string()))
    }
}

/// The API sometimes repeats an id inside a single page when its
/// server-side ordering shifts between shards. The tracker drops them; we
/// log so the upstream report has evidence.
fn warn_on_intra_batch_duplicates(cams: &[Cam]) {
    let mut seen: HashSet<CamId> = HashSet::with_capacity(cams.len());
    let duplicates: Vec<CamId> = cams
        .iter()
        .filter(|cam| !seen.insert(cam.id))
        .map(|cam| cam.id)
        .collect();
    if !duplicates.is_empty() {
        grid_warn!("api returned duplicate cam ids: {duplicates:?}");
    }
}

fn map_reqwest_error(err: reqwest::Error) -> FetchError {
    if err.is_timeout() {
        return FetchError::new(FailureKind::Timeout, err.to_string());
    }
    FetchError::new(FailureKind::Network, err.to_string())
}
