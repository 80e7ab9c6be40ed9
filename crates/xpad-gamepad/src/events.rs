use ahash::AHashMap;
use crossbeam_channel::{unbounded, Receiver, Sender};

use crate::snapshot::RawSnapshot;
use crate::types::{Axis, Button};

/// Change notifications produced while processing a new snapshot.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum ControllerEvent {
    /// The driver produced this many packets that were never read.
    MissedPacket(u32),
    /// A snapshot with a new packet number was accepted.
    StateChanged(RawSnapshot),
    /// An axis moved; sticks are in `[-1.0, 1.0]`, triggers in `[0.0, 1.0]`.
    AxisChanged { axis: Axis, value: f64 },
    /// The button at `ordinal` (1..=16) was pressed or released.
    ButtonChanged { ordinal: u8, pressed: bool },
}

impl ControllerEvent {
    pub fn kind(&self) -> EventKind {
        match self {
            ControllerEvent::MissedPacket(_) => EventKind::MissedPacket,
            ControllerEvent::StateChanged(_) => EventKind::StateChanged,
            ControllerEvent::AxisChanged { .. } => EventKind::Axis,
            ControllerEvent::ButtonChanged { .. } => EventKind::Button,
        }
    }

    /// Named button of a [`ControllerEvent::ButtonChanged`], if the ordinal has one.
    pub fn button(&self) -> Option<Button> {
        match self {
            ControllerEvent::ButtonChanged { ordinal, .. } => {
                Button::from_ordinal(*ordinal)
            }
            _ => None,
        }
    }
}

/// Channel a listener registers for.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum EventKind {
    StateChanged,
    Axis,
    Button,
    MissedPacket,
}

/// Handle returned on registration, used to remove the listener again.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ListenerId(u64);

/// Receiving end for controller events subscription.
pub type EventReceiver = Receiver<ControllerEvent>;

type Listener = Box<dyn FnMut(&ControllerEvent) + Send>;

/// Delivers events to listeners registered per [`EventKind`] and to channel
/// subscribers.
///
/// Listeners of one kind are called in registration order, synchronously on
/// the thread that dispatches.
#[derive(Default)]
pub struct Dispatcher {
    listeners: AHashMap<EventKind, Vec<(ListenerId, Listener)>>,
    subscribers: Vec<Sender<ControllerEvent>>,
    next_id: u64,
}

impl std::fmt::Debug for Dispatcher {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Dispatcher")
            .field("listeners", &self.listeners.values().map(Vec::len).sum::<usize>())
            .field("subscribers", &self.subscribers.len())
            .finish()
    }
}

impl Dispatcher {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register `listener` for every event of `kind`.
    pub fn add_listener<F>(&mut self, kind: EventKind, listener: F) -> ListenerId
    where
        F: FnMut(&ControllerEvent) + Send + 'static,
    {
        let id = ListenerId(self.next_id);
        self.next_id += 1;
        self.listeners
            .entry(kind)
            .or_default()
            .push((id, Box::new(listener)));
        id
    }

    /// Remove a listener. Returns `false` if it was not registered.
    pub fn remove_listener(&mut self, id: ListenerId) -> bool {
        for listeners in self.listeners.values_mut() {
            if let Some(pos) = listeners.iter().position(|(lid, _)| *lid == id) {
                drop(listeners.remove(pos));
                return true;
            }
        }
        false
    }

    pub fn listener_count(&self, kind: EventKind) -> usize {
        self.listeners.get(&kind).map(Vec::len).unwrap_or(0)
    }

    /// Subscribe to every dispatched event through a channel.
    pub fn subscribe(&mut self) -> EventReceiver {
        let (tx, rx) = unbounded();
        self.subscribers.push(tx);
        rx
    }

    /// Deliver one event to its listeners, then broadcast it to subscribers.
    pub fn dispatch(&mut self, event: &ControllerEvent) {
        if let Some(listeners) = self.listeners.get_mut(&event.kind()) {
            for (_, listener) in listeners.iter_mut() {
                listener(event);
            }
        }
        self.subscribers.retain(|tx| tx.send(*event).is_ok());
    }

    /// Deliver events in order.
    pub fn dispatch_all<'a, I>(&mut self, events: I)
    where
        I: IntoIterator<Item = &'a ControllerEvent>,
    {
        for event in events {
            self.dispatch(event);
        }
    }
}

#[cfg(test)]
mod tests {
    use std::sync::{Arc, Mutex};

    use super::*;

    fn recorder() -> (Arc<Mutex<Vec<String>>>, impl Fn(&str) -> Listener) {
        let log = Arc::new(Mutex::new(Vec::new()));
        let log_c = log.clone();
        let make = move |tag: &str| -> Listener {
            let log = log_c.clone();
            let tag = tag.to_string();
            Box::new(move |event: &ControllerEvent| {
                log.lock().unwrap().push(format!("{tag}:{:?}", event.kind()));
            })
        };
        (log, make)
    }

    #[test]
    fn listeners_run_in_registration_order_per_kind() {
        let (log, make) = recorder();
        let mut dispatcher = Dispatcher::new();
        dispatcher.add_listener(EventKind::Button, make("first"));
        dispatcher.add_listener(EventKind::Axis, make("axis"));
        dispatcher.add_listener(EventKind::Button, make("second"));

        dispatcher.dispatch_all(&[
            ControllerEvent::AxisChanged {
                axis: Axis::LeftX,
                value: 0.5,
            },
            ControllerEvent::ButtonChanged {
                ordinal: 4,
                pressed: true,
            },
        ]);

        assert_eq!(
            *log.lock().unwrap(),
            vec!["axis:Axis", "first:Button", "second:Button"]
        );
    }

    #[test]
    fn removed_listener_is_not_called() {
        let (log, make) = recorder();
        let mut dispatcher = Dispatcher::new();
        let id = dispatcher.add_listener(EventKind::MissedPacket, make("gone"));
        dispatcher.add_listener(EventKind::MissedPacket, make("kept"));

        assert!(dispatcher.remove_listener(id));
        assert!(!dispatcher.remove_listener(id));
        assert_eq!(dispatcher.listener_count(EventKind::MissedPacket), 1);

        dispatcher.dispatch(&ControllerEvent::MissedPacket(3));
        assert_eq!(*log.lock().unwrap(), vec!["kept:MissedPacket"]);
    }

    #[test]
    fn subscribers_receive_every_event_and_are_dropped_when_closed() {
        let mut dispatcher = Dispatcher::new();
        let rx = dispatcher.subscribe();
        let closed = dispatcher.subscribe();
        drop(closed);

        dispatcher.dispatch(&ControllerEvent::MissedPacket(1));
        dispatcher.dispatch(&ControllerEvent::ButtonChanged {
            ordinal: 16,
            pressed: false,
        });

        assert_eq!(rx.try_recv(), Ok(ControllerEvent::MissedPacket(1)));
        let event = rx.try_recv().unwrap();
        assert_eq!(event.button(), Some(Button::DPadUp));
        assert!(rx.try_recv().is_err());
        assert_eq!(dispatcher.subscribers.len(), 1);
    }
}
