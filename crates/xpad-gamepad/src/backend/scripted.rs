use std::collections::VecDeque;
use std::sync::{Mutex, PoisonError};

use ahash::AHashMap;

use crate::backend::DeviceBackend;
use crate::error::{Error, Result};
use crate::snapshot::RawSnapshot;
use crate::types::{BatteryInfo, BatteryLevel, BatteryType, DeviceIndex, MAX_DEVICES};

#[derive(Debug, Clone, Copy)]
enum Response {
    State(RawSnapshot),
    NotConnected,
    DriverError(u32),
}

#[derive(Debug)]
struct Device {
    queue: VecDeque<Response>,
    current: Response,
    battery: BatteryInfo,
    vibrations: Vec<(u16, u16)>,
}

impl Default for Device {
    fn default() -> Self {
        Self {
            queue: VecDeque::new(),
            current: Response::NotConnected,
            battery: BatteryInfo {
                kind: BatteryType::Wired,
                level: BatteryLevel::Full,
            },
            vibrations: Vec::new(),
        }
    }
}

/// In-memory backend that replays queued driver responses.
///
/// Each `get_state` call takes the next queued response for the device; once
/// the queue is empty the last response repeats, which reads as an unchanged
/// controller. Slots that were never scripted report not connected.
#[derive(Debug, Default)]
pub struct ScriptedBackend {
    devices: Mutex<AHashMap<DeviceIndex, Device>>,
}

impl ScriptedBackend {
    pub fn new() -> Self {
        Self::default()
    }

    fn with_device<R>(&self, index: DeviceIndex, f: impl FnOnce(&mut Device) -> R) -> R {
        let mut devices = self.devices.lock().unwrap_or_else(PoisonError::into_inner);
        f(devices.entry(index).or_default())
    }

    /// Attach a device whose current state is `snapshot`, dropping queued responses.
    pub fn connect(&self, index: DeviceIndex, snapshot: RawSnapshot) {
        self.with_device(index, |device| {
            device.queue.clear();
            device.current = Response::State(snapshot);
        });
    }

    /// Queue a state for the next read.
    pub fn push_state(&self, index: DeviceIndex, snapshot: RawSnapshot) {
        self.with_device(index, |device| {
            device.queue.push_back(Response::State(snapshot));
        });
    }

    /// Queue a read that reports the device as unplugged.
    pub fn push_disconnect(&self, index: DeviceIndex) {
        self.with_device(index, |device| {
            device.queue.push_back(Response::NotConnected);
        });
    }

    /// Queue a read that fails with a driver status code.
    pub fn push_driver_error(&self, index: DeviceIndex, code: u32) {
        self.with_device(index, |device| {
            device.queue.push_back(Response::DriverError(code));
        });
    }

    pub fn set_battery(&self, index: DeviceIndex, battery: BatteryInfo) {
        self.with_device(index, |device| device.battery = battery);
    }

    /// Motor speeds written to the device, oldest first.
    pub fn vibrations(&self, index: DeviceIndex) -> Vec<(u16, u16)> {
        self.with_device(index, |device| device.vibrations.clone())
    }

    fn check_index(index: DeviceIndex) -> Result<()> {
        if index >= MAX_DEVICES {
            return Err(Error::InvalidDeviceIndex(index));
        }
        Ok(())
    }

    fn is_connected(device: &Device) -> bool {
        matches!(device.current, Response::State(_))
    }
}

impl DeviceBackend for ScriptedBackend {
    fn get_state(&self, index: DeviceIndex) -> Result<RawSnapshot> {
        Self::check_index(index)?;
        self.with_device(index, |device| {
            if let Some(next) = device.queue.pop_front() {
                device.current = next;
            }
            match device.current {
                Response::State(snapshot) => Ok(snapshot),
                Response::NotConnected => Err(Error::DeviceNotConnected(index)),
                Response::DriverError(code) => {
                    Err(Error::UnknownDriverError { index, code })
                }
            }
        })
    }

    fn get_battery_info(&self, index: DeviceIndex) -> Result<BatteryInfo> {
        Self::check_index(index)?;
        self.with_device(index, |device| {
            if Self::is_connected(device) {
                Ok(device.battery)
            } else {
                Ok(BatteryInfo {
                    kind: BatteryType::Disconnected,
                    level: BatteryLevel::Empty,
                })
            }
        })
    }

    fn set_vibration(&self, index: DeviceIndex, left: u16, right: u16) -> Result<()> {
        Self::check_index(index)?;
        self.with_device(index, |device| {
            if !Self::is_connected(device) {
                return Err(Error::DeviceNotConnected(index));
            }
            device.vibrations.push((left, right));
            Ok(())
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::snapshot::RawGamepad;

    #[test]
    fn last_response_repeats_once_queue_is_drained() {
        let backend = ScriptedBackend::new();
        backend.connect(0, RawSnapshot::new(1, RawGamepad::default()));
        backend.push_state(0, RawSnapshot::new(2, RawGamepad::default()));

        assert_eq!(backend.get_state(0).unwrap().packet_number, 2);
        assert_eq!(backend.get_state(0).unwrap().packet_number, 2);
    }

    #[test]
    fn unscripted_slots_are_not_connected() {
        let backend = ScriptedBackend::new();
        assert_eq!(backend.get_state(2), Err(Error::DeviceNotConnected(2)));
        assert_eq!(backend.get_state(4), Err(Error::InvalidDeviceIndex(4)));
        assert_eq!(
            backend.get_battery_info(2).unwrap().kind,
            BatteryType::Disconnected
        );
        assert_eq!(
            backend.set_vibration(2, 1, 1),
            Err(Error::DeviceNotConnected(2))
        );
    }

    #[test]
    fn vibrations_are_recorded() {
        let backend = ScriptedBackend::new();
        backend.connect(1, RawSnapshot::default());
        backend.set_vibration(1, 65535, 0).unwrap();
        backend.set_vibration(1, 0, 100).unwrap();
        assert_eq!(backend.vibrations(1), vec![(65535, 0), (0, 100)]);
    }
}
