//! Human-readable formatting for sizes, durations, counts and timestamps.

use chrono::{DateTime, Local, TimeZone};

use spider_common::ApiError;

/// Shown when a failure carries no message of its own.
pub const OPERATION_FAILED: &str = "操作失败";

const SIZE_UNITS: [&str; 5] = ["B", "KB", "MB", "GB", "TB"];

/// `1536` -> `"1.5 KB"`. Base 1024, at most two decimals, trailing zeros
/// dropped. Anything past TB stays in TB.
pub fn format_bytes(bytes: u64) -> String {
    if bytes == 0 {
        return "0 B".to_string();
    }

    let mut unit = 0;
    let mut value = bytes as f64;
    while value >= 1024.0 && unit < SIZE_UNITS.len() - 1 {
        value /= 1024.0;
        unit += 1;
    }

    format!("{} {}", trim_decimals(&format!("{:.2}", value)), SIZE_UNITS[unit])
}

/// `75` -> `"1:15"`, `3675` -> `"1:01:15"`.
pub fn format_duration(seconds: u64) -> String {
    let hours = seconds / 3600;
    let minutes = (seconds % 3600) / 60;
    let secs = seconds % 60;

    if hours > 0 {
        format!("{}:{:02}:{:02}", hours, minutes, secs)
    } else {
        format!("{}:{:02}", minutes, secs)
    }
}

/// Counts of ten thousand or more are shown in 万 with one decimal.
pub fn format_number(num: u64) -> String {
    if num >= 10_000 {
        format!("{:.1}万", num as f64 / 10_000.0)
    } else {
        num.to_string()
    }
}

/// Epoch seconds rendered in local time, e.g. `2024/6/1 10:00:00`.
pub fn format_timestamp(timestamp: i64) -> String {
    format_timestamp_in(timestamp, &Local)
}

pub fn format_timestamp_in<Tz: TimeZone>(timestamp: i64, tz: &Tz) -> String
where
    Tz::Offset: std::fmt::Display,
{
    match DateTime::from_timestamp(timestamp, 0) {
        Some(utc) => utc
            .with_timezone(tz)
            .format("%Y/%-m/%-d %H:%M:%S")
            .to_string(),
        None => "-".to_string(),
    }
}

/// Short user-facing text for a failed call.
pub fn error_message(err: &ApiError) -> &str {
    if err.message.trim().is_empty() {
        OPERATION_FAILED
    } else {
        &err.message
    }
}

fn trim_decimals(s: &str) -> &str {
    if s.contains('.') {
        s.trim_end_matches('0').trim_end_matches('.')
    } else {
        s
    }
}
