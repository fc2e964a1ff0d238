//! System status and backend configuration.

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct DiskUsage {
    pub used: u64,
    pub total: u64,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SystemStatus {
    pub is_running: bool,
    pub cookie_valid: bool,
    #[serde(default)]
    pub total_works: u64,
    #[serde(default)]
    pub total_users: u64,
    #[serde(default)]
    pub disk_usage: DiskUsage,
}

/// Payload of `GET /config`.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct AppConfig {
    #[serde(default)]
    pub save_path: String,
    #[serde(default)]
    pub cookie: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub proxy: Option<String>,
}

/// Body of `PUT /config`; unset fields are omitted.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct AppConfigUpdate {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub save_path: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub cookie: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub proxy: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_system_status() {
        let json = r#"{
            "is_running": true,
            "cookie_valid": false,
            "total_works": 12,
            "total_users": 3,
            "disk_usage": {"used": 1024, "total": 4096}
        }"#;
        let status: SystemStatus = serde_json::from_str(json).unwrap();
        assert!(status.is_running);
        assert_eq!(status.disk_usage, DiskUsage { used: 1024, total: 4096 });
    }

    #[test]
    fn test_config_update_only_sends_set_fields() {
        let update = AppConfigUpdate {
            proxy: Some("http://127.0.0.1:7890".to_string()),
            ..Default::default()
        };
        assert_eq!(
            serde_json::to_string(&update).unwrap(),
            r#"{"proxy":"http://127.0.0.1:7890"}"#
        );
    }
}
