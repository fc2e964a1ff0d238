//! User search results and per-user work listings.

use serde::{Deserialize, Serialize};

/// Entry of `POST /spider/search-users`; also the payload used to subscribe.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct UserSearchResult {
    pub user_id: String,
    pub sec_uid: String,
    pub nickname: String,
    pub avatar: String,
    pub signature: String,
    pub follower_count: u64,
    pub total_favorited: u64,
    pub aweme_count: u64,
    pub user_url: String,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct UserProfile {
    pub nickname: String,
    pub avatar: String,
    pub signature: String,
    pub follower_count: u64,
    pub aweme_count: u64,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct UserVideoStatistics {
    pub digg_count: u64,
    pub comment_count: u64,
    pub share_count: u64,
    pub play_count: u64,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct UserVideo {
    pub aweme_id: String,
    pub desc: String,
    pub create_time: i64,
    pub duration: u64,
    pub cover: String,
    pub statistics: UserVideoStatistics,
    /// 0 for a video, 68 for an image gallery.
    pub aweme_type: i64,
}

impl UserVideo {
    pub const TYPE_VIDEO: i64 = 0;
    pub const TYPE_IMAGES: i64 = 68;

    pub fn is_image_gallery(&self) -> bool {
        self.aweme_type == Self::TYPE_IMAGES
    }
}

/// Payload of `POST /spider/user-videos`.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct UserVideosResponse {
    #[serde(default)]
    pub user: UserProfile,
    #[serde(default)]
    pub works: Vec<UserVideo>,
}
