//! Spider Console Common Types
//!
//! Wire types shared by the request gateway and anything that consumes
//! the spider backend's JSON API.

pub mod envelope;
mod lenient;
pub mod subscription;
pub mod system;
pub mod task;
pub mod user;
pub mod work;

pub use envelope::{ApiError, Envelope, NoData, GENERIC_FAILURE_MESSAGE, NETWORK_ERROR_MESSAGE};
pub use subscription::{
    ScannerConfig, ScannerConfigUpdate, Subscription, SubscriptionCreated, SubscriptionList,
    SubscriptionStats, SubscriptionUpdate, SubscriptionVideo, SubscriptionVideos,
};
pub use system::{AppConfig, AppConfigUpdate, DiskUsage, SystemStatus};
pub use task::{ItemOutcome, SpiderTask, TaskItemResult, TaskKind, TaskStatus};
pub use user::{UserProfile, UserSearchResult, UserVideo, UserVideoStatistics, UserVideosResponse};
pub use work::{AuthorInfo, Statistics, VideoInfo, WorkAuthor, WorkInfo, WorkPage};
