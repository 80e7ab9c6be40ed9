use log::debug;
use rusty_xinput::{XInputHandle, XInputUsageError};

use crate::backend::DeviceBackend;
use crate::error::{Error, Result};
use crate::snapshot::{RawGamepad, RawSnapshot};
use crate::types::{BatteryInfo, BatteryLevel, BatteryType, DeviceIndex};

/// Windows backend on top of the XInput driver library.
pub struct XInputBackend {
    handle: XInputHandle,
}

// SAFETY: The handle only wraps the loaded library and its function pointers.
// XInput entry points are documented as callable from any thread, and the
// library stays loaded for as long as the handle lives.
unsafe impl Send for XInputBackend {}
unsafe impl Sync for XInputBackend {}

impl XInputBackend {
    /// Load the newest XInput library available on the system.
    pub fn load() -> Result<Self> {
        let handle = XInputHandle::load_default()
            .map_err(|e| Error::BackendInit(format!("{e:?}")))?;
        debug!("xinput library loaded");
        Ok(Self { handle })
    }
}

fn map_usage_error(index: DeviceIndex, error: XInputUsageError) -> Error {
    match error {
        XInputUsageError::DeviceNotConnected => Error::DeviceNotConnected(index),
        XInputUsageError::InvalidControllerID => Error::InvalidDeviceIndex(index),
        XInputUsageError::UnknownError(code) => Error::UnknownDriverError { index, code },
        XInputUsageError::XInputNotLoaded => {
            Error::BackendInit("xinput is not loaded".to_string())
        }
    }
}

impl DeviceBackend for XInputBackend {
    fn get_state(&self, index: DeviceIndex) -> Result<RawSnapshot> {
        let state = self
            .handle
            .get_state(index)
            .map_err(|e| map_usage_error(index, e))?;
        let raw = &state.raw;
        let pad = &raw.Gamepad;
        Ok(RawSnapshot::new(
            raw.dwPacketNumber,
            RawGamepad {
                buttons: pad.wButtons,
                left_trigger: pad.bLeftTrigger,
                right_trigger: pad.bRightTrigger,
                thumb_lx: pad.sThumbLX,
                thumb_ly: pad.sThumbLY,
                thumb_rx: pad.sThumbRX,
                thumb_ry: pad.sThumbRY,
            },
        ))
    }

    fn get_battery_info(&self, index: DeviceIndex) -> Result<BatteryInfo> {
        let info = self
            .handle
            .get_gamepad_battery_information(index)
            .map_err(|e| Error::Backend(format!("battery query failed: {e:?}")))?;
        Ok(BatteryInfo {
            kind: BatteryType::from_raw(info.battery_type.0),
            level: BatteryLevel::from_raw(info.battery_level.0),
        })
    }

    fn set_vibration(&self, index: DeviceIndex, left: u16, right: u16) -> Result<()> {
        self.handle
            .set_state(index, left, right)
            .map_err(|e| map_usage_error(index, e))
    }
}
