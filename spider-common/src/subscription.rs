//! Subscription and scanner records.

use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::lenient;

/// A followed user, as stored in the backend's subscription table.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Subscription {
    pub id: i64,
    pub user_id: String,
    #[serde(default, deserialize_with = "lenient::or_default")]
    pub sec_uid: String,
    #[serde(default, deserialize_with = "lenient::or_default")]
    pub nickname: String,
    #[serde(default, deserialize_with = "lenient::or_default")]
    pub avatar: String,
    #[serde(default, deserialize_with = "lenient::or_default")]
    pub signature: String,
    #[serde(default, deserialize_with = "lenient::or_default")]
    pub follower_count: u64,
    #[serde(default, deserialize_with = "lenient::or_default")]
    pub aweme_count: u64,
    #[serde(default, deserialize_with = "lenient::or_default")]
    pub user_url: String,
    #[serde(deserialize_with = "lenient::flag")]
    pub enabled: bool,
    #[serde(deserialize_with = "lenient::flag")]
    pub auto_download: bool,
    /// Explicit allow-list of work ids; `None` means every work.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub selected_videos: Option<Vec<String>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub last_check_time: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub last_video_time: Option<String>,
    #[serde(default, deserialize_with = "lenient::or_default")]
    pub created_at: String,
    #[serde(default, deserialize_with = "lenient::or_default")]
    pub updated_at: String,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct SubscriptionStats {
    pub total_subscriptions: u64,
    pub enabled_subscriptions: u64,
    pub total_videos: u64,
    pub downloaded_videos: u64,
    pub new_videos: u64,
}

/// Payload of `GET /subscriptions`.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct SubscriptionList {
    #[serde(default)]
    pub subscriptions: Vec<Subscription>,
    #[serde(default)]
    pub stats: SubscriptionStats,
}

/// Payload of `POST /subscriptions`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct SubscriptionCreated {
    pub subscription_id: i64,
}

/// Body of `PUT /subscriptions/:userId`; unset fields are left untouched.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct SubscriptionUpdate {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub enabled: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub auto_download: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub selected_videos: Option<Vec<String>>,
}

impl SubscriptionUpdate {
    pub fn is_empty(&self) -> bool {
        self.enabled.is_none() && self.auto_download.is_none() && self.selected_videos.is_none()
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SubscriptionVideo {
    pub id: i64,
    pub aweme_id: String,
    #[serde(default, alias = "desc", deserialize_with = "lenient::or_default")]
    pub title: String,
    #[serde(default, deserialize_with = "lenient::or_default")]
    pub create_time: i64,
    #[serde(default, deserialize_with = "lenient::or_default")]
    pub duration: u64,
    #[serde(default, deserialize_with = "lenient::or_default")]
    pub cover: String,
    #[serde(default, deserialize_with = "lenient::flag")]
    pub is_downloaded: bool,
    #[serde(
        default,
        alias = "downloaded_at",
        skip_serializing_if = "Option::is_none"
    )]
    pub download_time: Option<String>,
}

/// Payload of `GET /subscriptions/:userId/videos`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SubscriptionVideos {
    /// Shape is not fixed by the backend; kept as raw JSON.
    #[serde(default)]
    pub subscription: Value,
    #[serde(default)]
    pub videos: Vec<SubscriptionVideo>,
}

impl SubscriptionVideos {
    pub fn pending(&self) -> impl Iterator<Item = &SubscriptionVideo> {
        self.videos.iter().filter(|v| !v.is_downloaded)
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ScannerConfig {
    /// Seconds between scans.
    pub interval: u64,
    pub auto_download: bool,
    pub enabled: bool,
    #[serde(default)]
    pub is_running: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub batch_size: Option<u32>,
}

/// Body of `PUT /subscriptions/scanner/config`; unset fields are omitted.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ScannerConfigUpdate {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub interval: Option<u64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub auto_download: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub enabled: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub batch_size: Option<u32>,
}
