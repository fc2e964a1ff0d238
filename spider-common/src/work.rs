//! Downloaded/crawled work records.
//!
//! The backend may answer with partially filled objects (or `{}`), so every
//! field tolerates absence.

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct WorkInfo {
    pub work_id: String,
    pub work_url: String,
    pub work_type: String,
    pub title: String,
    pub desc: String,
    /// Epoch seconds.
    pub create_time: i64,
    pub author: AuthorInfo,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub video: Option<VideoInfo>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub images: Option<Vec<String>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub topics: Option<Vec<String>>,
    pub statistics: Statistics,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub download_time: Option<String>,
    /// Bytes on disk.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub file_size: Option<u64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub is_complete: Option<i64>,
    /// Fields not modelled above, e.g. `download_stats` after a download
    /// or the storage columns of `GET /works` rows.
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl WorkInfo {
    /// Download counters attached by `POST /spider/work` with `download`.
    pub fn download_stats(&self) -> Option<&Value> {
        self.extra.get("download_stats")
    }

    pub fn is_image_set(&self) -> bool {
        self.video.is_none() && self.images.as_ref().is_some_and(|images| !images.is_empty())
    }
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct AuthorInfo {
    pub user_id: String,
    pub user_url: String,
    pub nickname: String,
    pub avatar_thumb: String,
    pub user_desc: String,
    pub follower_count: u64,
    pub following_count: u64,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct VideoInfo {
    pub play_addr: String,
    pub cover: String,
    pub width: u32,
    pub height: u32,
    /// Seconds.
    pub duration: u64,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct Statistics {
    pub comment_count: u64,
    pub digg_count: u64,
    pub collect_count: u64,
    pub share_count: u64,
    pub play_count: u64,
    pub admire_count: u64,
}

/// One page of `GET /works`.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct WorkPage {
    #[serde(default)]
    pub items: Vec<WorkInfo>,
    #[serde(default)]
    pub total: u64,
    pub page: u32,
    pub limit: u32,
}

/// Entry of `GET /works/authors`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct WorkAuthor {
    pub user_id: String,
    pub nickname: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_work_object() {
        let work: WorkInfo = serde_json::from_str("{}").unwrap();
        assert!(work.work_id.is_empty());
        assert!(work.video.is_none());
        assert_eq!(work.statistics.digg_count, 0);
    }

    #[test]
    fn test_image_set_detection() {
        let json = r#"{
            "work_id": "7300",
            "work_type": "image",
            "images": ["https://img/1.webp", "https://img/2.webp"],
            "author": {"user_id": "42", "nickname": "someone"}
        }"#;
        let work: WorkInfo = serde_json::from_str(json).unwrap();
        assert!(work.is_image_set());
        assert_eq!(work.author.nickname, "someone");
    }

    #[test]
    fn test_unmodelled_fields_are_kept() {
        let json = r#"{
            "work_id": "7301",
            "title": "t",
            "download_stats": {"total_works": 1, "works_downloaded": 1, "works_skipped": 0,
                               "files_downloaded": 2, "files_skipped": 0, "files_failed": 0}
        }"#;
        let work: WorkInfo = serde_json::from_str(json).unwrap();
        assert_eq!(work.download_stats().unwrap()["files_downloaded"], 2);

        let back = serde_json::to_value(&work).unwrap();
        assert_eq!(back["download_stats"]["total_works"], 1);
        assert_eq!(back["work_id"], "7301");
    }

    #[test]
    fn test_work_page() {
        let json = r#"{"items": [], "total": 0, "page": 3, "limit": 20}"#;
        let page: WorkPage = serde_json::from_str(json).unwrap();
        assert_eq!(page.page, 3);
        assert_eq!(page.limit, 20);
        assert!(page.items.is_empty());
    }
}
