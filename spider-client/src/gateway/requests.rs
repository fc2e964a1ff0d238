//! Request bodies for the typed gateway methods.

use serde::Serialize;
use spider_common::UserSearchResult;

const DEFAULT_SAVE_CHOICE: &str = "all";
const DEFAULT_REQUIRE_NUM: u32 = 20;

/// Optional knobs for `POST /spider/user`.
#[derive(Debug, Clone, Default)]
pub struct SpiderUserOptions {
    /// What to save; `"all"` when unset. An explicit value, even `""`, is
    /// sent as given.
    pub save_choice: Option<String>,
    pub force_download: bool,
    /// Restrict the crawl to these work ids.
    pub selected_videos: Option<Vec<String>>,
}

/// Optional knobs for `POST /spider/search`.
///
/// Unset, zero or empty values fall back to the backend's defaults.
#[derive(Debug, Clone, Default)]
pub struct SearchOptions {
    pub require_num: Option<u32>,
    pub sort_type: Option<String>,
    pub publish_time: Option<String>,
    pub filter_duration: Option<String>,
    pub search_range: Option<String>,
    pub content_type: Option<String>,
    pub save_choice: Option<String>,
    pub force_download: bool,
}

#[derive(Debug, Serialize)]
pub(super) struct ValidateCookieRequest<'a> {
    pub cookie: &'a str,
}

#[derive(Debug, Serialize)]
pub(super) struct SpiderUserRequest<'a> {
    pub user_url: &'a str,
    pub save_choice: String,
    pub force_download: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub selected_videos: Option<Vec<String>>,
}

impl<'a> SpiderUserRequest<'a> {
    pub fn new(user_url: &'a str, options: SpiderUserOptions) -> Self {
        Self {
            user_url,
            save_choice: options
                .save_choice
                .unwrap_or_else(|| DEFAULT_SAVE_CHOICE.to_string()),
            force_download: options.force_download,
            selected_videos: options.selected_videos,
        }
    }
}

#[derive(Debug, Serialize)]
pub(super) struct SearchUsersRequest<'a> {
    pub query: &'a str,
    pub num: u32,
}

#[derive(Debug, Serialize)]
pub(super) struct UserUrlRequest<'a> {
    pub user_url: &'a str,
}

#[derive(Debug, Serialize)]
pub(super) struct SpiderWorkRequest<'a> {
    pub work_url: &'a str,
    pub download: bool,
}

#[derive(Debug, Serialize)]
pub(super) struct BatchWorksRequest<'a> {
    pub work_urls: &'a [String],
    pub force_download: bool,
}

#[derive(Debug, Serialize)]
pub(super) struct SpiderSearchRequest<'a> {
    pub query: &'a str,
    pub require_num: u32,
    pub sort_type: String,
    pub publish_time: String,
    pub filter_duration: String,
    pub search_range: String,
    pub content_type: String,
    pub save_choice: String,
    pub force_download: bool,
}

impl<'a> SpiderSearchRequest<'a> {
    pub fn new(query: &'a str, options: SearchOptions) -> Self {
        Self {
            query,
            require_num: options
                .require_num
                .filter(|n| *n != 0)
                .unwrap_or(DEFAULT_REQUIRE_NUM),
            sort_type: or_default(options.sort_type, "0"),
            publish_time: or_default(options.publish_time, "0"),
            filter_duration: or_default(options.filter_duration, ""),
            search_range: or_default(options.search_range, "0"),
            content_type: or_default(options.content_type, "0"),
            save_choice: or_default(options.save_choice, DEFAULT_SAVE_CHOICE),
            force_download: options.force_download,
        }
    }
}

#[derive(Debug, Serialize)]
pub(super) struct AddSubscriptionRequest<'a> {
    pub user_info: &'a UserSearchResult,
}

#[derive(Debug, Serialize)]
pub(super) struct UserIdRequest<'a> {
    pub user_id: &'a str,
}

fn or_default(value: Option<String>, default: &str) -> String {
    value
        .filter(|v| !v.is_empty())
        .unwrap_or_else(|| default.to_string())
}
