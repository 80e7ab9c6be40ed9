use std::sync::Arc;
use std::time::Duration;

use colored::Colorize;
use crossbeam_channel::{select, tick, Receiver};
use xpad_gamepad::{
    enumerate_devices, Axis, Button, ControllerEvent, ControllerSession, DeviceBackend,
    DeviceIndex, Error, Hand, SessionConfig,
};

use crate::{print_debug, print_error, print_info, print_warning, CliError};

/// Print every connected controller with its battery state.
pub(crate) fn list_devices(backend: &dyn DeviceBackend) -> Result<(), CliError> {
    let found = enumerate_devices(backend)?;
    print_info!("found {} devices: {:?}", found.len(), found);
    for index in found {
        match backend.get_battery_info(index) {
            Ok(info) => {
                print_info!(
                    "controller {index}: battery {:?}, level {:?}",
                    info.kind,
                    info.level
                );
            }
            Err(e) => {
                print_error!("controller {index}: {e}");
            }
        }
    }
    Ok(())
}

/// Call `step` every `interval_ms` until a stop signal arrives.
///
/// A missing controller is reported once and polled again on the next tick.
fn run_ticker<F>(
    interval_ms: u64,
    stop_rx: &Receiver<()>,
    mut step: F,
) -> Result<(), CliError>
where
    F: FnMut() -> Result<(), Error>,
{
    let ticker = tick(Duration::from_millis(interval_ms.max(1)));
    let mut missing = false;
    loop {
        select! {
            recv(stop_rx) -> _ => {
                print_debug!("stop requested");
                return Ok(());
            }
            recv(ticker) -> _ => {
                match step() {
                    Ok(()) => {
                        if missing {
                            print_info!("controller is back");
                            missing = false;
                        }
                    }
                    Err(Error::DeviceNotConnected(index)) => {
                        if !missing {
                            print_warning!("controller {index} is not connected, waiting");
                            missing = true;
                        }
                    }
                    Err(e) => return Err(e.into()),
                }
            }
        }
    }
}

/// Read the session state on every tick, the way a game loop would.
pub(crate) fn poll_loop(
    backend: Arc<dyn DeviceBackend>,
    index: DeviceIndex,
    config: SessionConfig,
    interval_ms: u64,
    stop_rx: &Receiver<()>,
) -> Result<(), CliError> {
    let mut session = ControllerSession::new(backend, index, config)?;
    print_info!("polling controller {index}, press Ctrl+C to stop");

    run_ticker(interval_ms, stop_rx, || {
        let changed = session.poll()?;
        let (left, right) = (session.trigger(Hand::Left), session.trigger(Hand::Right));
        session.set_rumble(Hand::Left, left.abs())?;
        session.set_rumble(Hand::Right, right.abs())?;
        if changed > 0 {
            let pressed: Vec<String> = session
                .buttons()
                .iter_indices()
                .map(|ordinal| button_label(ordinal as u8))
                .collect();
            print_info!(
                "A: {}\tD-pad: {}\tX: {:.3}\tY: {:.3}\tpressed: [{}]",
                session.button(Button::A),
                session.dpad_angle(),
                session.x(Hand::Left),
                session.y(Hand::Left),
                pressed.join(", ")
            );
        }
        Ok(())
    })?;

    print_debug!(
        "received {} packets, missed {}",
        session.received_packets(),
        session.missed_packets()
    );
    Ok(())
}

fn button_label(ordinal: u8) -> String {
    Button::from_ordinal(ordinal)
        .map(|b| b.name().to_string())
        .unwrap_or_else(|| format!("#{ordinal}"))
}

/// Print events as the session dispatches them.
pub(crate) fn watch_loop(
    backend: Arc<dyn DeviceBackend>,
    index: DeviceIndex,
    config: SessionConfig,
    interval_ms: u64,
    rumble_triggers: bool,
    stop_rx: &Receiver<()>,
) -> Result<(), CliError> {
    let mut session = ControllerSession::new(backend, index, config)?;
    let events = session.subscribe();
    print_info!("watching controller {index}, press Ctrl+C to stop");

    run_ticker(interval_ms, stop_rx, || {
        session.poll()?;
        while let Ok(event) = events.try_recv() {
            match event {
                ControllerEvent::AxisChanged { axis, value } => {
                    print_info!("axis {} {value:.4}", axis.name());
                    if rumble_triggers {
                        match axis {
                            Axis::LeftTrigger => session.set_rumble(Hand::Left, value)?,
                            Axis::RightTrigger => session.set_rumble(Hand::Right, value)?,
                            _ => {}
                        }
                    }
                }
                ControllerEvent::ButtonChanged { ordinal, pressed } => {
                    let name = button_label(ordinal);
                    print_info!("button {name} {}", if pressed { "pressed" } else { "released" });
                }
                ControllerEvent::MissedPacket(count) => {
                    print_warning!("missed {count} packets");
                }
                ControllerEvent::StateChanged(snapshot) => {
                    print_debug!("packet {}", snapshot.packet_number);
                }
            }
        }
        Ok(())
    })
}
