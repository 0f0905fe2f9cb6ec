use crate::error::Result;
use crate::types::{timestamp_from_millis, Playlist};
use sqlx::{Executor, Row, Sqlite};

/// Insert a playlist row and return its sequence number
///
/// Does not check the device; callers run this inside the transaction that
/// already confirmed the device exists.
pub async fn insert<'e, E>(
    executor: E,
    device_id: &str,
    name: &str,
    url: &str,
    created_at: i64,
) -> Result<i64>
where
    E: Executor<'e, Database = Sqlite>,
{
    let result = sqlx::query(
        r#"
        INSERT INTO playlists (device_identifier, name, url, created_at)
        VALUES (?, ?, ?, ?)
        "#,
    )
    .bind(device_id)
    .bind(name)
    .bind(url)
    .bind(created_at)
    .execute(executor)
    .await?;

    Ok(result.last_insert_rowid())
}

/// Get all playlists of a device in creation order
pub async fn get_by_device<'e, E>(executor: E, device_id: &str) -> Result<Vec<Playlist>>
where
    E: Executor<'e, Database = Sqlite>,
{
    let rows = sqlx::query(
        r#"
        SELECT id, device_identifier, name, url, created_at
        FROM playlists
        WHERE device_identifier = ?
        ORDER BY created_at ASC, id ASC
        "#,
    )
    .bind(device_id)
    .fetch_all(executor)
    .await?;

    rows.iter()
        .map(|row| -> Result<Playlist> {
            Ok(Playlist {
                sequence: row.try_get("id")?,
                device_id: row.try_get("device_identifier")?,
                name: row.try_get("name")?,
                url: row.try_get("url")?,
                created_at: timestamp_from_millis(row.try_get("created_at")?)?,
            })
        })
        .collect()
}
