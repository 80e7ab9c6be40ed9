//! Polling, normalization and change dispatch for XInput-style gamepads.
//!
//! A [`ControllerSession`] reads raw snapshots from a [`DeviceBackend`],
//! diffs each new snapshot against the previous one and dispatches the
//! resulting [`ControllerEvent`]s to registered listeners.

mod backend;
mod config;
mod diff;
mod error;
mod events;
mod normalize;
mod session;
mod snapshot;
mod types;

pub use crate::backend::{default_backend, enumerate_devices, DeviceBackend, ScriptedBackend};
#[cfg(windows)]
pub use crate::backend::XInputBackend;
pub use crate::config::{SessionConfig, DEFAULT_DAMPEN, DEFAULT_DEADZONE};
pub use crate::diff::{diff_axis, diff_snapshots, Events};
pub use crate::error::{Error, Result};
pub use crate::events::{ControllerEvent, Dispatcher, EventKind, EventReceiver, ListenerId};
pub use crate::normalize::{normalize, NormalizeMode};
pub use crate::session::{dpad_angle, Connection, ControllerSession};
pub use crate::snapshot::{RawGamepad, RawSnapshot};
pub use crate::types::{
    Axis, BatteryInfo, BatteryLevel, BatteryType, Button, ButtonState, DeviceIndex, Hand,
    BUTTON_COUNT, MAX_DEVICES,
};
