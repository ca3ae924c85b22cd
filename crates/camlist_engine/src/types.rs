use std::fmt;

use camlist_core::{CamId, CamRecord};
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// One performer listing entry as returned by the `cams/online.json`
/// endpoint. Only `id` matters to the list machinery; the rest is payload
/// for the render layer.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Cam {
    pub id: CamId,
    pub nickname: String,
    #[serde(default)]
    pub gender: String,
    #[serde(default)]
    pub country: String,
    #[serde(default)]
    pub age: Option<u8>,
    #[serde(default)]
    pub viewers: u64,
    #[serde(default)]
    pub preview_url: Option<String>,
    #[serde(default)]
    pub thumb: String,
    #[serde(default)]
    pub thumb_big: Option<String>,
    #[serde(default)]
    pub thumb_error: String,
    #[serde(default)]
    pub status: String,
    #[serde(default)]
    pub show_tags: Vec<String>,
    #[serde(default)]
    pub languages: Vec<String>,
    #[serde(default)]
    pub broadcast_type: String,
    #[serde(default)]
    pub show_type: String,
    #[serde(default)]
    pub daily_award: bool,
    #[serde(default)]
    pub monthly_award: bool,
    #[serde(default)]
    pub hd_stream: Option<bool>,
    #[serde(default)]
    pub private_room: bool,
    #[serde(default)]
    pub new_performer: bool,
    #[serde(default)]
    pub mobile: bool,
    #[serde(default)]
    pub goal: u64,
    #[serde(default)]
    pub goal_balance: u64,
    #[serde(default)]
    pub link: Option<String>,
}

impl CamRecord for Cam {
    fn cam_id(&self) -> CamId {
        self.id
    }
}

/// Listing entry enriched with the extra profile fields the listing
/// endpoint returns when queried by nickname.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CamProfile {
    #[serde(flatten)]
    pub cam: Cam,
    #[serde(default)]
    pub about_me: Option<String>,
    #[serde(default)]
    pub country_name: Option<String>,
    #[serde(default)]
    pub join_date: Option<String>,
    #[serde(default)]
    pub rating: Option<String>,
    #[serde(default)]
    pub body_type: Option<String>,
    #[serde(default)]
    pub ethnicity: Option<String>,
    #[serde(default)]
    pub tags: Vec<String>,
}

/// Payload of the per-username `cams/profile/{username}.json` endpoint.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DetailedCamProfile {
    pub username: String,
    #[serde(default)]
    pub bio: Option<String>,
    #[serde(default)]
    pub age: Option<u8>,
    #[serde(default)]
    pub city: Option<String>,
    #[serde(default)]
    pub country: Option<String>,
    #[serde(default)]
    pub ethnicity: Option<String>,
    #[serde(default)]
    pub gender: Option<String>,
    #[serde(default)]
    pub height: Option<String>,
    #[serde(default)]
    pub languages: Vec<String>,
    #[serde(default)]
    pub occupation: Option<String>,
    #[serde(default)]
    pub sexual_preference: Option<String>,
    #[serde(default)]
    pub timezone: Option<String>,
    #[serde(default)]
    pub profile_pic: Option<String>,
    #[serde(default)]
    pub photos: Vec<ProfilePhoto>,
    #[serde(default)]
    pub rank: Option<u32>,
    #[serde(default)]
    pub status: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProfilePhoto {
    pub thumb: String,
    pub full: String,
}

/// Event emitted back to the UI thread by the engine.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum EngineEvent {
    PageLoaded {
        page: u32,
        result: Result<Vec<Cam>, FetchError>,
    },
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("{kind}: {message}")]
pub struct FetchError {
    pub kind: FailureKind,
    pub message: String,
}

impl FetchError {
    pub(crate) fn new(kind: FailureKind, message: impl Into<String>) -> Self {
        Self {
            kind,
            message: message.into(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FailureKind {
    InvalidUrl,
    HttpStatus(u16),
    Timeout,
    TooLarge { max_bytes: u64, actual: Option<u64> },
    InvalidBody,
    Network,
}

impl fmt::Display for FailureKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FailureKind::InvalidUrl => write!(f, "invalid url"),
            FailureKind::HttpStatus(code) => write!(f, "http status {code}"),
            FailureKind::Timeout => write!(f, "timeout"),
            FailureKind::TooLarge { max_bytes, actual } => {
                write!(f, "response too large (max {max_bytes}, actual {actual:?})")
            }
            FailureKind::InvalidBody => write!(f, "invalid response body"),
            FailureKind::Network => write!(f, "network error"),
        }
    }
}
