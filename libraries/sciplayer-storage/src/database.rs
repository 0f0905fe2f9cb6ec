/// SQLite-backed device store
use crate::error::{Result, StoreError};
use crate::store::DeviceStore;
use crate::types::{now_millis, timestamp_from_millis, Playlist};
use crate::{devices, playlists};
use async_trait::async_trait;
use chrono::{DateTime, Utc};
use sqlx::sqlite::{SqliteConnectOptions, SqliteJournalMode, SqlitePool, SqlitePoolOptions};
use std::path::Path;
use std::str::FromStr;
use std::time::Duration;
use tokio::sync::Mutex;

/// Read connections kept for file-backed stores
const MAX_CONNECTIONS: u32 = 5;

/// How long a connection waits on a locked database before giving up
const BUSY_TIMEOUT: Duration = Duration::from_secs(5);

/// Guarded DDL, applied in order on every open
const MIGRATIONS: &[&str] = &[
    include_str!("../migrations/20250105000001_create_devices.sql"),
    include_str!("../migrations/20250105000002_create_playlists.sql"),
    include_str!("../migrations/20250105000003_index_playlists_by_device.sql"),
    include_str!("../migrations/20250105000004_normalize_device_timestamps.sql"),
    include_str!("../migrations/20250105000005_normalize_playlist_timestamps.sql"),
];

/// `SQLite` device store with a single logical writer
///
/// Writes (`register_device`, `attach_playlist`) hold `writer` for the whole
/// of their transaction. Reads go straight to the pool; file-backed stores
/// run in WAL mode so a reader only ever sees committed transactions.
pub struct SqliteStore {
    pool: SqlitePool,
    writer: Mutex<()>,
}

impl SqliteStore {
    /// Open (or create) a store and make sure its schema exists
    ///
    /// `location` is a filesystem path, a `sqlite:` URL, or `:memory:`.
    /// Missing parent directories of a path are created.
    ///
    /// # Errors
    /// `Io` if the database cannot be opened, `SchemaInit` if the schema
    /// cannot be created.
    pub async fn open(location: &str) -> Result<Self> {
        let in_memory = location == ":memory:" || location.starts_with("sqlite::memory:");

        let options = if in_memory {
            SqliteConnectOptions::from_str("sqlite::memory:")?
        } else if location.starts_with("sqlite:") {
            SqliteConnectOptions::from_str(location)?.create_if_missing(true)
        } else {
            let path = Path::new(location);
            if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
                tokio::fs::create_dir_all(parent)
                    .await
                    .map_err(sqlx::Error::Io)?;
            }
            SqliteConnectOptions::new()
                .filename(path)
                .create_if_missing(true)
        };

        let options = options.foreign_keys(true).busy_timeout(BUSY_TIMEOUT);

        // An in-memory database lives and dies with its connection, so keep
        // exactly one and never let it expire.
        let pool = if in_memory {
            SqlitePoolOptions::new()
                .max_connections(1)
                .min_connections(1)
                .idle_timeout(None)
                .max_lifetime(None)
                .connect_with(options)
                .await?
        } else {
            SqlitePoolOptions::new()
                .max_connections(MAX_CONNECTIONS)
                .connect_with(options.journal_mode(SqliteJournalMode::Wal))
                .await?
        };

        if let Err(e) = Self::run_migrations(&pool).await {
            pool.close().await;
            return Err(e);
        }

        tracing::info!(location, "Storage opened");

        Ok(Self {
            pool,
            writer: Mutex::new(()),
        })
    }

    /// Get a reference to the underlying pool (for diagnostics and testing)
    pub fn pool(&self) -> &SqlitePool {
        &self.pool
    }

    async fn run_migrations(pool: &SqlitePool) -> Result<()> {
        for migration in MIGRATIONS {
            sqlx::query(migration)
                .execute(pool)
                .await
                .map_err(StoreError::SchemaInit)?;
        }

        Ok(())
    }
}

#[async_trait]
impl DeviceStore for SqliteStore {
    async fn register_device(&self, device_id: &str) -> Result<bool> {
        let _writer = self.writer.lock().await;

        let created = devices::register(&self.pool, device_id, now_millis()).await?;
        tracing::debug!(device_id, created, "Registered device");

        Ok(created)
    }

    async fn attach_playlist(
        &self,
        device_id: &str,
        name: &str,
        url: &str,
    ) -> Result<DateTime<Utc>> {
        let _writer = self.writer.lock().await;

        // Dropping `tx` without commit rolls it back, which also covers
        // every early return and cancellation below.
        let mut tx = self.pool.begin().await?;

        if !devices::exists(&mut *tx, device_id).await? {
            tx.rollback().await?;
            return Err(StoreError::device_not_found(device_id));
        }

        let created_at = now_millis();
        let sequence = playlists::insert(&mut *tx, device_id, name, url, created_at).await?;

        tx.commit().await?;
        tracing::debug!(device_id, sequence, "Attached playlist");

        timestamp_from_millis(created_at)
    }

    async fn list_playlists(&self, device_id: &str) -> Result<Vec<Playlist>> {
        // Read-only transaction: the existence check and the listing see
        // the same snapshot.
        let mut tx = self.pool.begin().await?;

        if !devices::exists(&mut *tx, device_id).await? {
            return Err(StoreError::device_not_found(device_id));
        }

        let playlists = playlists::get_by_device(&mut *tx, device_id).await?;
        tx.commit().await?;

        Ok(playlists)
    }

    async fn close(&self) -> Result<()> {
        self.pool.close().await;
        tracing::info!("Storage closed");
        Ok(())
    }
}
