/// Persistence contract consumed by the HTTP layer
use crate::error::Result;
use crate::types::Playlist;
use async_trait::async_trait;
use chrono::{DateTime, Utc};

/// Device and playlist persistence
///
/// Implementations serialize all writes through a single writer and never
/// expose a partially applied operation to any reader.
///
/// Dropping a returned future before it resolves cancels the operation; a
/// cancelled operation either completed fully or left the store unchanged.
#[async_trait]
pub trait DeviceStore: Send + Sync {
    /// Register a device unless it already exists
    ///
    /// Returns `true` when the device was created by this call and `false`
    /// when it was already registered. Repeating the call is never an error.
    async fn register_device(&self, device_id: &str) -> Result<bool>;

    /// Attach a playlist to an existing device
    ///
    /// The device check and the insert run in one transaction. Returns the
    /// creation timestamp assigned to the playlist.
    ///
    /// # Errors
    /// `DeviceNotFound` if the device is not registered (nothing is written),
    /// `Io` for any storage failure (the transaction is rolled back).
    async fn attach_playlist(&self, device_id: &str, name: &str, url: &str)
        -> Result<DateTime<Utc>>;

    /// List a device's playlists, oldest first
    ///
    /// Ties on the creation timestamp are broken by insertion order. A
    /// registered device without playlists yields an empty list.
    ///
    /// # Errors
    /// `DeviceNotFound` if the device is not registered, `Io` on read failure.
    async fn list_playlists(&self, device_id: &str) -> Result<Vec<Playlist>>;

    /// Release all resources; no operation is valid afterwards
    async fn close(&self) -> Result<()>;
}
