//! Device registration queries

use crate::StoreError;
use sqlx::{Executor, Sqlite};

type Result<T> = std::result::Result<T, StoreError>;

/// Insert a device unless one with the same identifier exists
///
/// Returns `true` if a row was inserted. A conflicting identifier is
/// absorbed by the insert itself, so this never reports a uniqueness error.
///
/// # Arguments
///
/// * `executor` - Pool, connection or open transaction
/// * `device_id` - Device identifier, already validated by the caller
/// * `created_at` - Creation time in Unix milliseconds
pub async fn register<'e, E>(executor: E, device_id: &str, created_at: i64) -> Result<bool>
where
    E: Executor<'e, Database = Sqlite>,
{
    let result = sqlx::query(
        "INSERT INTO devices (device_identifier, created_at)
         VALUES (?, ?)
         ON CONFLICT(device_identifier) DO NOTHING",
    )
    .bind(device_id)
    .bind(created_at)
    .execute(executor)
    .await?;

    Ok(result.rows_affected() > 0)
}

/// Check whether a device is registered
pub async fn exists<'e, E>(executor: E, device_id: &str) -> Result<bool>
where
    E: Executor<'e, Database = Sqlite>,
{
    let row = sqlx::query("SELECT 1 FROM devices WHERE device_identifier = ?")
        .bind(device_id)
        .fetch_optional(executor)
        .await?;

    Ok(row.is_some())
}
