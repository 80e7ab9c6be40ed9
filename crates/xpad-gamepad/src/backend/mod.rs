mod scripted;
#[cfg(windows)]
mod xinput;

use std::sync::Arc;

use crate::error::{Error, Result};
use crate::snapshot::RawSnapshot;
use crate::types::{BatteryInfo, DeviceIndex, MAX_DEVICES};

pub use scripted::ScriptedBackend;
#[cfg(windows)]
pub use xinput::XInputBackend;

/// Platform input driver a session reads from and writes rumble to.
///
/// One backend is created per process and shared by every session.
pub trait DeviceBackend: Send + Sync {
    /// Read the current state of the device at `index`.
    ///
    /// Fails with [`Error::DeviceNotConnected`] when no device is attached and
    /// [`Error::UnknownDriverError`] for any other driver status.
    fn get_state(&self, index: DeviceIndex) -> Result<RawSnapshot>;

    fn get_battery_info(&self, index: DeviceIndex) -> Result<BatteryInfo>;

    /// Set both motor speeds, `0..=u16::MAX`.
    fn set_vibration(&self, index: DeviceIndex, left: u16, right: u16) -> Result<()>;
}

impl std::fmt::Debug for dyn DeviceBackend {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str("DeviceBackend")
    }
}

/// Probe every slot and return the indices that have a device attached.
pub fn enumerate_devices(backend: &dyn DeviceBackend) -> Result<Vec<DeviceIndex>> {
    let mut found = Vec::new();
    for index in 0..MAX_DEVICES {
        match backend.get_state(index) {
            Ok(_) => found.push(index),
            Err(Error::DeviceNotConnected(_)) => {}
            Err(e) => return Err(e),
        }
    }
    Ok(found)
}

/// Create the backend for the current platform.
#[cfg(windows)]
pub fn default_backend() -> Result<Arc<dyn DeviceBackend>> {
    Ok(Arc::new(XInputBackend::load()?))
}

/// Create the backend for the current platform.
#[cfg(not(windows))]
pub fn default_backend() -> Result<Arc<dyn DeviceBackend>> {
    Err(Error::Unsupported)
}
