use smallvec::SmallVec;
use xpad_bit_mask::decode_bits;

use crate::config::SessionConfig;
use crate::events::ControllerEvent;
use crate::normalize::normalize;
use crate::snapshot::RawSnapshot;
use crate::types::{Axis, BUTTON_COUNT};

/// Events produced by one diff. Typical diffs fit inline.
pub type Events = SmallVec<[ControllerEvent; 8]>;

/// Compare two snapshots and produce the change events between them.
///
/// Events come out in a fixed order: `MissedPacket` (if any packets were
/// skipped), then `AxisChanged` in [`Axis::ALL`] order, then `ButtonChanged`
/// by ascending ordinal. Snapshots with the same packet number produce no
/// events.
pub fn diff_snapshots(
    previous: &RawSnapshot,
    current: &RawSnapshot,
    config: &SessionConfig,
) -> Events {
    let mut events = Events::new();
    if previous.packet_number == current.packet_number {
        return events;
    }

    let missed = current.missed_since(previous);
    if missed > 0 {
        events.push(ControllerEvent::MissedPacket(missed));
    }

    for axis in Axis::ALL {
        if let Some(value) = diff_axis(
            axis,
            previous.gamepad.axis(axis),
            current.gamepad.axis(axis),
            config,
        ) {
            events.push(ControllerEvent::AxisChanged { axis, value });
        }
    }

    diff_buttons(previous.gamepad.buttons, current.gamepad.buttons, &mut events);
    events
}

/// New reported value of `axis`, or `None` when the change is not reported.
///
/// The change is ignored when it does not exceed `dampen`. Each endpoint is
/// then zeroed independently if its magnitude is below `deadzone`, and equal
/// endpoints are ignored. Stick values are doubled to cover `[-1, 1]` before
/// the final clamp.
pub fn diff_axis(
    axis: Axis,
    previous: i64,
    current: i64,
    config: &SessionConfig,
) -> Option<f64> {
    let width = axis.bit_width();
    let previous = normalize(previous, width, config.normalize);
    let current = normalize(current, width, config.normalize);

    if (previous - current).abs() <= config.dampen {
        return None;
    }

    let previous = apply_deadzone(previous, config.deadzone);
    let mut current = apply_deadzone(current, config.deadzone);
    if previous == current {
        return None;
    }

    if !axis.is_trigger() {
        current *= 2.0;
    }
    Some(current.clamp(-1.0, 1.0))
}

#[inline]
fn apply_deadzone(value: f64, deadzone: f64) -> f64 {
    if value.abs() < deadzone {
        0.0
    } else {
        value
    }
}

/// Push a `ButtonChanged` for every ordinal whose bit differs.
fn diff_buttons(previous: u16, current: u16, events: &mut Events) {
    let width = usize::from(BUTTON_COUNT);
    let changed = decode_bits(u64::from(previous ^ current), width);
    let pressed = decode_bits(u64::from(current), width);

    // Decoded most significant bit first, so ordinal 1 is bit 15.
    for (i, (changed, pressed)) in changed.iter().zip(pressed.iter()).enumerate() {
        if *changed == 1 {
            events.push(ControllerEvent::ButtonChanged {
                ordinal: i as u8 + 1,
                pressed: *pressed == 1,
            });
        }
    }
}
