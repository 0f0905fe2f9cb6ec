/// Storage-specific errors
use thiserror::Error;

/// Result type alias using `StoreError`
pub type Result<T> = std::result::Result<T, StoreError>;

/// Storage error types
///
/// Every engine operation fails with exactly one of these kinds; callers
/// match on the variant rather than on the message.
#[derive(Error, Debug)]
pub enum StoreError {
    /// The referenced device has never been registered
    #[error("Device not found: {0}")]
    DeviceNotFound(String),

    /// The durable store could not be read or written
    #[error("Storage I/O failure: {0}")]
    Io(#[from] sqlx::Error),

    /// Schema creation failed while opening the store
    #[error("Schema initialization failed: {0}")]
    SchemaInit(#[source] sqlx::Error),
}

impl StoreError {
    /// Create a device not found error
    pub fn device_not_found(device_id: impl Into<String>) -> Self {
        Self::DeviceNotFound(device_id.into())
    }

    pub fn is_device_not_found(&self) -> bool {
        matches!(self, Self::DeviceNotFound(_))
    }
}
