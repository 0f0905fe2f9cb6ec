//! SciPlayer Storage
//!
//! `SQLite` persistence engine for SciPlayer devices and their playlists.
//!
//! The engine owns the database exclusively and guarantees:
//!
//! - **Idempotent registration**: registering a known device is a no-op, never an error
//! - **Referential integrity**: a playlist is only ever written next to an existing device
//! - **Atomic attach**: the device check and the playlist insert commit or roll back together
//! - **Single writer**: every mutating transaction runs behind one writer lock
//!
//! # Example
//!
//! ```rust,no_run
//! use sciplayer_storage::{DeviceStore, SqliteStore};
//!
//! # async fn example() -> Result<(), Box<dyn std::error::Error>> {
//! let store = SqliteStore::open("data/sciplayer.db").await?;
//!
//! store.register_device("device-123").await?;
//! store
//!     .attach_playlist("device-123", "My playlist", "https://example.com/channel.m3u8")
//!     .await?;
//!
//! for playlist in store.list_playlists("device-123").await? {
//!     println!("{} -> {}", playlist.name, playlist.url);
//! }
//!
//! store.close().await?;
//! # Ok(())
//! # }
//! ```

mod database;
mod error;
mod store;
mod types;

// Vertical slices
pub mod devices;
pub mod playlists;

pub use database::SqliteStore;
pub use error::{Result, StoreError};
pub use store::DeviceStore;
pub use types::Playlist;
