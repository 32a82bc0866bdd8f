/// Pure date/time utility functions (Discord-agnostic)
use chrono::{DateTime, Utc};

/// Format an instant as a Discord timestamp marker in the long date/time style
pub fn discord_full_timestamp(at: DateTime<Utc>) -> String {
    format!("<t:{}:F>", at.timestamp())
}

/// Format an optional join instant, falling back to "Unknown"
pub fn format_joined_at(joined_at: Option<DateTime<Utc>>) -> String {
    joined_at
        .map(discord_full_timestamp)
        .unwrap_or_else(|| "Unknown".to_string())
}

/// Convert a unix timestamp in seconds into a UTC instant
pub fn from_unix_seconds(seconds: i64) -> Option<DateTime<Utc>> {
    DateTime::from_timestamp(seconds, 0)
}
