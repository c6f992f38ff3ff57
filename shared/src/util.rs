/// Current UTC timestamp (milliseconds)
pub fn now_millis() -> i64 {
    chrono::Utc::now().timestamp_millis()
}

/// Format Unix millis as `YYYY-MM-DD HH:MM:SS UTC`
pub fn format_millis(millis: i64) -> String {
    chrono::DateTime::from_timestamp_millis(millis)
        .map(|dt| dt.format("%Y-%m-%d %H:%M:%S UTC").to_string())
        .unwrap_or_else(|| millis.to_string())
}
