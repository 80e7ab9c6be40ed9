use thiserror::Error;

use crate::types::DeviceIndex;

/// Error type for device and session operations.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum Error {
    /// The driver reports no device attached at this index.
    #[error("Device {0} is not connected")]
    DeviceNotConnected(DeviceIndex),
    /// The driver returned a status code other than success or not-connected.
    #[error("Unknown driver error {code} for device {index}")]
    UnknownDriverError { index: DeviceIndex, code: u32 },
    /// The index is outside of the range the driver supports.
    #[error("Invalid device index: {0}")]
    InvalidDeviceIndex(DeviceIndex),
    /// Failed to initialize the backend (driver library missing or unusable).
    #[error("Backend init failed: {0}")]
    BackendInit(String),
    /// No backend is available on the current platform.
    #[error("Operation unsupported")]
    Unsupported,
    /// A generic backend error.
    #[error("Backend error: {0}")]
    Backend(String),
}

/// Convenient result alias for gamepad operations.
pub type Result<T> = std::result::Result<T, Error>;
