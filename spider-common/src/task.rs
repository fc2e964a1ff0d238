//! Crawl task records as reported by the backend.

use serde::{Deserialize, Serialize};
use serde_json::Value;

/// What a task crawls.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum TaskKind {
    /// Every work of a single user.
    User,
    /// A single work.
    Work,
    /// Works found by a search query.
    Search,
    /// An explicit list of work URLs.
    BatchWorks,
    /// Scan of every enabled subscription for new works.
    #[serde(rename = "subscription_check")]
    SubscriptionCheck,
    /// Download of the new works of one subscription.
    #[serde(rename = "subscription_download")]
    SubscriptionDownload,
    /// Scanner pass triggered by hand.
    #[serde(rename = "manual_scan")]
    ManualScan,
    /// Any kind this client does not know yet.
    #[serde(other)]
    Other,
}

impl std::fmt::Display for TaskKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            TaskKind::User => write!(f, "user"),
            TaskKind::Work => write!(f, "work"),
            TaskKind::Search => write!(f, "search"),
            TaskKind::BatchWorks => write!(f, "batch-works"),
            TaskKind::SubscriptionCheck => write!(f, "subscription_check"),
            TaskKind::SubscriptionDownload => write!(f, "subscription_download"),
            TaskKind::ManualScan => write!(f, "manual_scan"),
            TaskKind::Other => write!(f, "other"),
        }
    }
}

/// Task lifecycle: `pending -> running -> completed | failed`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TaskStatus {
    Pending,
    Running,
    Completed,
    Failed,
}

impl TaskStatus {
    pub fn is_terminal(&self) -> bool {
        matches!(self, TaskStatus::Completed | TaskStatus::Failed)
    }
}

impl std::fmt::Display for TaskStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            TaskStatus::Pending => write!(f, "pending"),
            TaskStatus::Running => write!(f, "running"),
            TaskStatus::Completed => write!(f, "completed"),
            TaskStatus::Failed => write!(f, "failed"),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ItemOutcome {
    Success,
    Failed,
}

/// Per-URL outcome inside a batch task.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TaskItemResult {
    pub url: String,
    pub status: ItemOutcome,
    /// Backend-defined detail for the item.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub info: Option<Value>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SpiderTask {
    pub id: String,
    #[serde(rename = "type")]
    pub kind: TaskKind,
    pub status: TaskStatus,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub url: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub urls: Option<Vec<String>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub query: Option<String>,
    #[serde(default)]
    pub progress: u64,
    #[serde(default)]
    pub total: u64,
    /// Backend-defined aggregate result.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub result: Option<Value>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub results: Option<Vec<TaskItemResult>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
    /// Download counters of a finished user crawl.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub download_stats: Option<Value>,
    /// Epoch seconds.
    pub created_at: f64,
    /// Epoch seconds.
    pub updated_at: f64,
}

impl SpiderTask {
    /// Completed fraction in `0.0..=1.0`; 0 while the total is unknown.
    pub fn fraction(&self) -> f64 {
        if self.total == 0 {
            return 0.0;
        }
        (self.progress as f64 / self.total as f64).min(1.0)
    }

    /// Number of batch items that failed.
    pub fn failed_items(&self) -> usize {
        self.results
            .as_ref()
            .map(|results| {
                results
                    .iter()
                    .filter(|r| r.status == ItemOutcome::Failed)
                    .count()
            })
            .unwrap_or(0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_task_kind_wire_names() {
        assert_eq!(serde_json::to_string(&TaskKind::BatchWorks).unwrap(), r#""batch-works""#);
        let kind: TaskKind = serde_json::from_str(r#""user""#).unwrap();
        assert_eq!(kind, TaskKind::User);
        assert_eq!(TaskKind::BatchWorks.to_string(), "batch-works");
    }

    #[test]
    fn test_subscription_task_kinds() {
        for (wire, expected) in [
            ("subscription_check", TaskKind::SubscriptionCheck),
            ("subscription_download", TaskKind::SubscriptionDownload),
            ("manual_scan", TaskKind::ManualScan),
        ] {
            let json = format!(
                r#"{{"id": "t", "type": "{}", "status": "pending", "progress": 0,
                    "total": 3, "created_at": 1718000000, "updated_at": 1718000000}}"#,
                wire
            );
            let task: SpiderTask = serde_json::from_str(&json).unwrap();
            assert_eq!(task.kind, expected);
            assert_eq!(task.kind.to_string(), wire);
        }
    }

    #[test]
    fn test_unknown_task_kind_does_not_break_decoding() {
        let kind: TaskKind = serde_json::from_str(r#""channel_sync""#).unwrap();
        assert_eq!(kind, TaskKind::Other);
    }

    #[test]
    fn test_task_status_is_terminal() {
        assert!(TaskStatus::Completed.is_terminal());
        assert!(TaskStatus::Failed.is_terminal());
        assert!(!TaskStatus::Pending.is_terminal());
        assert!(!TaskStatus::Running.is_terminal());
    }

    #[test]
    fn test_task_from_backend_json() {
        let json = r#"{
            "id": "0b9c",
            "type": "search",
            "status": "pending",
            "query": "cats",
            "progress": 0,
            "total": 0,
            "created_at": 1718000000,
            "updated_at": 1718000000
        }"#;
        let task: SpiderTask = serde_json::from_str(json).unwrap();
        assert_eq!(task.kind, TaskKind::Search);
        assert_eq!(task.query.as_deref(), Some("cats"));
        assert!(task.url.is_none());
        assert_eq!(task.fraction(), 0.0);
        assert_eq!(task.created_at, 1718000000.0);
    }

    #[test]
    fn test_batch_task_results() {
        let json = r#"{
            "id": "t1",
            "type": "batch-works",
            "status": "completed",
            "urls": ["https://x/video/1", "https://x/video/2"],
            "progress": 2,
            "total": 2,
            "results": [
                {"url": "https://x/video/1", "status": "success", "info": {"title": "a"}},
                {"url": "https://x/video/2", "status": "failed", "error": "timeout"}
            ],
            "created_at": 1718000000.5,
            "updated_at": 1718000010.25
        }"#;
        let task: SpiderTask = serde_json::from_str(json).unwrap();
        assert_eq!(task.fraction(), 1.0);
        assert_eq!(task.failed_items(), 1);
        let results = task.results.unwrap();
        assert_eq!(results[1].error.as_deref(), Some("timeout"));
    }
}
