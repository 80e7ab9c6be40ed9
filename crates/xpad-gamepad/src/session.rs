use std::sync::Arc;

use log::{debug, warn};

use crate::backend::DeviceBackend;
use crate::config::SessionConfig;
use crate::diff::{diff_snapshots, Events};
use crate::error::{Error, Result};
use crate::events::{ControllerEvent, Dispatcher, EventKind, EventReceiver, ListenerId};
use crate::snapshot::{RawGamepad, RawSnapshot};
use crate::types::{
    Axis, BatteryInfo, Button, ButtonState, DeviceIndex, Hand, MAX_DEVICES,
};

/// Whether the last driver read found a device.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Connection {
    Connected,
    Disconnected,
}

/// Stateful binding to one controller slot.
///
/// The session caches the last snapshot passed through the differ and the
/// values derived from it. Nothing happens in the background: call
/// [`ControllerSession::poll`] at your own cadence. A session is meant to be
/// driven from a single thread and does no internal locking.
#[derive(Debug)]
pub struct ControllerSession {
    backend: Arc<dyn DeviceBackend>,
    index: DeviceIndex,
    config: SessionConfig,
    last: Option<RawSnapshot>,
    connected: bool,
    axes: [f64; 6],
    buttons: ButtonState,
    received_packets: u64,
    missed_packets: u64,
    rumble: [f64; 2],
    dispatcher: Dispatcher,
}

impl ControllerSession {
    /// Bind to the device at `index` and read its initial state.
    ///
    /// The initial snapshot fills the cache without dispatching anything. A
    /// missing device is not an error here: the session starts out
    /// [`Connection::Disconnected`] and connects on the first successful poll.
    pub fn new(
        backend: Arc<dyn DeviceBackend>,
        index: DeviceIndex,
        config: SessionConfig,
    ) -> Result<Self> {
        if index >= MAX_DEVICES {
            return Err(Error::InvalidDeviceIndex(index));
        }
        let initial = match backend.get_state(index) {
            Ok(snapshot) => Some(snapshot),
            Err(Error::DeviceNotConnected(_)) => None,
            Err(e) => return Err(e),
        };
        let mut session = Self {
            backend,
            index,
            config,
            last: None,
            connected: false,
            axes: [0.0; 6],
            buttons: ButtonState::empty(),
            received_packets: 0,
            missed_packets: 0,
            rumble: [0.0; 2],
            dispatcher: Dispatcher::new(),
        };
        if let Some(snapshot) = initial {
            let events = diff_snapshots(&neutral_before(&snapshot), &snapshot, &session.config);
            session.apply(&events);
            session.last = Some(snapshot);
            session.connected = true;
        }
        debug!("session for device {index} created, connected={}", session.connected);
        Ok(session)
    }

    pub fn index(&self) -> DeviceIndex {
        self.index
    }

    pub fn config(&self) -> &SessionConfig {
        &self.config
    }

    pub fn set_config(&mut self, config: SessionConfig) {
        self.config = config;
    }

    pub fn connection(&self) -> Connection {
        if self.connected {
            Connection::Connected
        } else {
            Connection::Disconnected
        }
    }

    pub fn is_connected(&self) -> bool {
        self.connected
    }

    /// Last snapshot passed through the differ. Kept while disconnected.
    pub fn last_snapshot(&self) -> Option<&RawSnapshot> {
        self.last.as_ref()
    }

    /// Read the device and dispatch the changes since the last read.
    ///
    /// Returns the number of events dispatched. An unchanged packet number
    /// dispatches nothing. When the device is missing the session becomes
    /// disconnected and the call fails; the cache and the last snapshot are
    /// kept, so the first snapshot after the device comes back is diffed
    /// against what was seen before it left. A session that has never seen
    /// the device diffs its first snapshot against an idle controller.
    pub fn poll(&mut self) -> Result<usize> {
        let snapshot = match self.backend.get_state(self.index) {
            Ok(snapshot) => snapshot,
            Err(e) => {
                if matches!(e, Error::DeviceNotConnected(_)) && self.connected {
                    debug!("device {} disconnected", self.index);
                    self.connected = false;
                }
                return Err(e);
            }
        };
        if !self.connected {
            debug!("device {} connected", self.index);
            self.connected = true;
        }

        let previous = self
            .last
            .replace(snapshot)
            .unwrap_or_else(|| neutral_before(&snapshot));
        if previous.packet_number == snapshot.packet_number {
            return Ok(0);
        }

        let events = self.process(&previous, &snapshot);
        self.dispatcher.dispatch_all(&events);
        Ok(events.len())
    }

    /// Diff, account and apply one changed snapshot. Returns the events to dispatch.
    fn process(&mut self, previous: &RawSnapshot, current: &RawSnapshot) -> Events {
        let diff = diff_snapshots(previous, current, &self.config);
        self.received_packets += 1;
        self.apply(&diff);

        let mut events = Events::with_capacity(diff.len() + 1);
        let mut rest = diff.into_iter().peekable();
        if let Some(ControllerEvent::MissedPacket(missed)) = rest.peek().copied() {
            warn!("device {}: missed {missed} packets", self.index);
            self.missed_packets += u64::from(missed);
            events.push(ControllerEvent::MissedPacket(missed));
            rest.next();
        }
        events.push(ControllerEvent::StateChanged(*current));
        events.extend(rest);
        events
    }

    /// Write axis and button changes into the cache.
    fn apply(&mut self, events: &[ControllerEvent]) {
        for event in events {
            match *event {
                ControllerEvent::AxisChanged { axis, value } => {
                    self.axes[axis.index()] = value;
                }
                ControllerEvent::ButtonChanged { ordinal, pressed } => {
                    self.buttons.set_index(u32::from(ordinal), pressed);
                }
                ControllerEvent::MissedPacket(_) | ControllerEvent::StateChanged(_) => {}
            }
        }
    }

    /// Cached value of `axis`.
    #[inline]
    pub fn axis(&self, axis: Axis) -> f64 {
        self.axes[axis.index()]
    }

    /// Stick X position in `[-1.0, 1.0]`.
    pub fn x(&self, hand: Hand) -> f64 {
        self.axis(Axis::x(hand))
    }

    /// Stick Y position in `[-1.0, 1.0]`.
    pub fn y(&self, hand: Hand) -> f64 {
        self.axis(Axis::y(hand))
    }

    /// Trigger position in `[0.0, 1.0]`.
    pub fn trigger(&self, hand: Hand) -> f64 {
        self.axis(Axis::trigger(hand))
    }

    /// Cached state of the button at `ordinal` (1..=16).
    #[inline]
    pub fn button_ordinal(&self, ordinal: u8) -> bool {
        self.buttons.contains_index(u32::from(ordinal))
    }

    #[inline]
    pub fn button(&self, button: Button) -> bool {
        self.buttons.contains(button)
    }

    pub fn bumper(&self, hand: Hand) -> bool {
        self.button(Button::bumper(hand))
    }

    pub fn buttons(&self) -> ButtonState {
        self.buttons
    }

    /// D-pad direction in degrees clockwise from up, or -1 when no single
    /// direction is held.
    pub fn dpad_angle(&self) -> i32 {
        dpad_angle(
            self.button(Button::DPadLeft),
            self.button(Button::DPadRight),
            self.button(Button::DPadUp),
            self.button(Button::DPadDown),
        )
    }

    pub fn received_packets(&self) -> u64 {
        self.received_packets
    }

    pub fn missed_packets(&self) -> u64 {
        self.missed_packets
    }

    /// Stored motor intensities as `[left, right]`.
    pub fn rumble(&self) -> [f64; 2] {
        self.rumble
    }

    /// Set one motor to `value`, clamped to `[0.0, 1.0]`, and write both
    /// motors to the device. The other side keeps its last value. The pair is
    /// stored only after the device accepted it.
    pub fn set_rumble(&mut self, hand: Hand, value: f64) -> Result<()> {
        let value = if value.is_nan() {
            0.0
        } else {
            value.clamp(0.0, 1.0)
        };
        let mut rumble = self.rumble;
        rumble[hand.index()] = value;
        let [left, right] = rumble.map(|v| (v * f64::from(u16::MAX)) as u16);
        self.backend.set_vibration(self.index, left, right)?;
        self.rumble = rumble;
        Ok(())
    }

    pub fn battery_info(&self) -> Result<BatteryInfo> {
        self.backend.get_battery_info(self.index)
    }

    /// Register `listener` for events of `kind`. See [`Dispatcher::add_listener`].
    pub fn add_listener<F>(&mut self, kind: EventKind, listener: F) -> ListenerId
    where
        F: FnMut(&ControllerEvent) + Send + 'static,
    {
        self.dispatcher.add_listener(kind, listener)
    }

    pub fn remove_listener(&mut self, id: ListenerId) -> bool {
        self.dispatcher.remove_listener(id)
    }

    /// Receive every dispatched event through a channel.
    pub fn subscribe(&mut self) -> EventReceiver {
        self.dispatcher.subscribe()
    }
}

/// An idle controller one packet before `snapshot`.
fn neutral_before(snapshot: &RawSnapshot) -> RawSnapshot {
    RawSnapshot::new(snapshot.packet_number.wrapping_sub(1), RawGamepad::default())
}

/// Collapse the four D-pad buttons into an angle, or -1 for no direction or
/// opposing directions.
pub fn dpad_angle(left: bool, right: bool, up: bool, down: bool) -> i32 {
    match (left, right, up, down) {
        (false, false, true, false) => 0,
        (false, true, true, false) => 45,
        (false, true, false, false) => 90,
        (false, true, false, true) => 135,
        (false, false, false, true) => 180,
        (true, false, false, true) => 225,
        (true, false, false, false) => 270,
        (true, false, true, false) => 315,
        _ => -1,
    }
}
