//! Typed methods, one per backend endpoint.

use reqwest::Method;

use spider_common::{
    AppConfig, AppConfigUpdate, NoData, ScannerConfig, ScannerConfigUpdate, SpiderTask,
    SubscriptionCreated, SubscriptionList, SubscriptionUpdate, SubscriptionVideos,
    SystemStatus, UserSearchResult, UserVideosResponse, WorkAuthor, WorkInfo, WorkPage,
};

use super::requests::{
    AddSubscriptionRequest, BatchWorksRequest, SearchOptions, SearchUsersRequest,
    SpiderSearchRequest, SpiderUserOptions, SpiderUserRequest, SpiderWorkRequest,
    UserIdRequest, UserUrlRequest, ValidateCookieRequest,
};
use super::{segment, ApiResult, Gateway, RequestOptions};

const DEFAULT_SEARCH_USERS_NUM: u32 = 10;
const DEFAULT_PAGE: u32 = 1;
const DEFAULT_PAGE_SIZE: u32 = 20;

impl Gateway {
    // ------------------------------------------------------------------
    // System
    // ------------------------------------------------------------------

    pub async fn system_status(&self) -> ApiResult<SystemStatus> {
        self.get("/system/status").await
    }

    pub async fn validate_cookie(&self, cookie: &str) -> ApiResult<bool> {
        self.post("/system/validate-cookie", &ValidateCookieRequest { cookie })
            .await
    }

    // ------------------------------------------------------------------
    // Crawling
    // ------------------------------------------------------------------

    /// Crawl every work of a user.
    pub async fn spider_user(
        &self,
        user_url: &str,
        options: SpiderUserOptions,
    ) -> ApiResult<SpiderTask> {
        self.post("/spider/user", &SpiderUserRequest::new(user_url, options))
            .await
    }

    /// Search users by keyword; `num` defaults to 10.
    pub async fn search_users(
        &self,
        query: &str,
        num: Option<u32>,
    ) -> ApiResult<Vec<UserSearchResult>> {
        let body = SearchUsersRequest {
            query,
            num: num.unwrap_or(DEFAULT_SEARCH_USERS_NUM),
        };
        self.post("/spider/search-users", &body).await
    }

    pub async fn user_videos(&self, user_url: &str) -> ApiResult<UserVideosResponse> {
        self.post("/spider/user-videos", &UserUrlRequest { user_url })
            .await
    }

    /// Fetch a single work; with `download` the backend also saves it.
    pub async fn spider_work(&self, work_url: &str, download: bool) -> ApiResult<WorkInfo> {
        self.post("/spider/work", &SpiderWorkRequest { work_url, download })
            .await
    }

    pub async fn spider_batch_works(
        &self,
        work_urls: &[String],
        force_download: bool,
    ) -> ApiResult<SpiderTask> {
        let body = BatchWorksRequest {
            work_urls,
            force_download,
        };
        self.post("/spider/batch-works", &body).await
    }

    /// Crawl the results of a search query.
    pub async fn spider_search(
        &self,
        query: &str,
        options: SearchOptions,
    ) -> ApiResult<SpiderTask> {
        self.post("/spider/search", &SpiderSearchRequest::new(query, options))
            .await
    }

    // ------------------------------------------------------------------
    // Works
    // ------------------------------------------------------------------

    /// One page of downloaded works; defaults to page 1 of 20.
    pub async fn works(&self, page: Option<u32>, limit: Option<u32>) -> ApiResult<WorkPage> {
        let endpoint = format!(
            "/works?page={}&limit={}",
            page.unwrap_or(DEFAULT_PAGE),
            limit.unwrap_or(DEFAULT_PAGE_SIZE)
        );
        self.get(&endpoint).await
    }

    pub async fn work_authors(&self) -> ApiResult<Vec<WorkAuthor>> {
        self.get("/works/authors").await
    }

    pub async fn work(&self, work_id: &str) -> ApiResult<WorkInfo> {
        self.get(&format!("/works/{}", segment(work_id))).await
    }

    // ------------------------------------------------------------------
    // Tasks
    // ------------------------------------------------------------------

    pub async fn tasks(&self) -> ApiResult<Vec<SpiderTask>> {
        self.get("/tasks").await
    }

    pub async fn task(&self, task_id: &str) -> ApiResult<SpiderTask> {
        self.get(&format!("/tasks/{}", segment(task_id))).await
    }

    pub async fn cancel_task(&self, task_id: &str) -> ApiResult<NoData> {
        self.request(
            &format!("/tasks/{}/cancel", segment(task_id)),
            RequestOptions::new(Method::POST),
        )
        .await
    }

    // ------------------------------------------------------------------
    // Backend configuration
    // ------------------------------------------------------------------

    pub async fn app_config(&self) -> ApiResult<AppConfig> {
        self.get("/config").await
    }

    pub async fn update_app_config(&self, update: &AppConfigUpdate) -> ApiResult<NoData> {
        self.put("/config", update).await
    }

    // ------------------------------------------------------------------
    // Subscriptions
    // ------------------------------------------------------------------

    pub async fn subscriptions(&self) -> ApiResult<SubscriptionList> {
        self.get("/subscriptions").await
    }

    pub async fn add_subscription(
        &self,
        user_info: &UserSearchResult,
    ) -> ApiResult<SubscriptionCreated> {
        self.post("/subscriptions", &AddSubscriptionRequest { user_info })
            .await
    }

    pub async fn remove_subscription(&self, user_id: &str) -> ApiResult<NoData> {
        self.request(
            &format!("/subscriptions/{}", segment(user_id)),
            RequestOptions::new(Method::DELETE),
        )
        .await
    }

    pub async fn update_subscription(
        &self,
        user_id: &str,
        update: &SubscriptionUpdate,
    ) -> ApiResult<NoData> {
        self.put(&format!("/subscriptions/{}", segment(user_id)), update)
            .await
    }

    /// Ask the backend to check every subscription for new works.
    pub async fn check_subscription_updates(&self) -> ApiResult<SpiderTask> {
        self.request(
            "/subscriptions/check-updates",
            RequestOptions::new(Method::POST),
        )
        .await
    }

    pub async fn subscription_videos(
        &self,
        user_id: &str,
        only_new: bool,
    ) -> ApiResult<SubscriptionVideos> {
        let endpoint = format!(
            "/subscriptions/{}/videos?only_new={}",
            segment(user_id),
            only_new
        );
        self.get(&endpoint).await
    }

    /// Queue a download of the subscription's new works. `data` is `None`
    /// when there is nothing new to download.
    pub async fn download_subscription_new_videos(
        &self,
        user_id: &str,
    ) -> ApiResult<Option<SpiderTask>> {
        self.post("/subscriptions/download-new", &UserIdRequest { user_id })
            .await
    }

    // ------------------------------------------------------------------
    // Subscription scanner
    // ------------------------------------------------------------------

    pub async fn scanner_config(&self) -> ApiResult<ScannerConfig> {
        self.get("/subscriptions/scanner/config").await
    }

    pub async fn update_scanner_config(&self, update: &ScannerConfigUpdate) -> ApiResult<NoData> {
        self.put("/subscriptions/scanner/config", update).await
    }

    pub async fn start_scanner(&self) -> ApiResult<NoData> {
        self.request(
            "/subscriptions/scanner/start",
            RequestOptions::new(Method::POST),
        )
        .await
    }

    pub async fn stop_scanner(&self) -> ApiResult<NoData> {
        self.request(
            "/subscriptions/scanner/stop",
            RequestOptions::new(Method::POST),
        )
        .await
    }
}
