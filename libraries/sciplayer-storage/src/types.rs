use crate::error::Result;
use chrono::{DateTime, Utc};

/// A named media playlist attached to a device
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Playlist {
    /// Insertion sequence, only meaningful for ordering
    pub sequence: i64,
    pub device_id: String,
    pub name: String,
    pub url: String,
    pub created_at: DateTime<Utc>,
}

/// Current time truncated to the millisecond precision the store keeps
pub(crate) fn now_millis() -> i64 {
    Utc::now().timestamp_millis()
}

pub(crate) fn timestamp_from_millis(millis: i64) -> Result<DateTime<Utc>> {
    DateTime::from_timestamp_millis(millis).ok_or_else(|| {
        sqlx::Error::Decode(format!("Invalid timestamp: {millis}").into()).into()
    })
}
