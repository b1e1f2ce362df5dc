//! Typed publish/subscribe channel for navigation notifications.

use std::fmt;

use super::core::Pose;
use super::intent::LockState;

/// Notification emitted by the navigation controller.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum NavEvent {
    /// Orientation or position changed; consumers should re-render.
    Change(Pose),
    /// All motion inputs returned to neutral; the pose is worth publishing.
    Settled(Pose),
    /// Pointer capture was gained or lost.
    LockChanged(LockState),
}

/// Discriminant of [`NavEvent`], used to filter subscriptions.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum EventKind {
    /// [`NavEvent::Change`].
    Change,
    /// [`NavEvent::Settled`].
    Settled,
    /// [`NavEvent::LockChanged`].
    LockChanged,
}

impl NavEvent {
    /// Kind of this event.
    #[must_use]
    pub fn kind(&self) -> EventKind {
        match self {
            Self::Change(_) => EventKind::Change,
            Self::Settled(_) => EventKind::Settled,
            Self::LockChanged(_) => EventKind::LockChanged,
        }
    }
}

/// Handle returned by [`EventBus::subscribe`], used to unsubscribe.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct SubscriptionId(u64);

type Callback = Box<dyn FnMut(&NavEvent)>;

struct Listener {
    id: SubscriptionId,
    kind: Option<EventKind>,
    callback: Callback,
}

/// Ordered list of listeners. Listeners run in subscription order on the
/// emitting thread.
#[derive(Default)]
pub struct EventBus {
    next_id: u64,
    listeners: Vec<Listener>,
}

impl fmt::Debug for EventBus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("EventBus")
            .field("listeners", &self.listeners.len())
            .finish_non_exhaustive()
    }
}

impl EventBus {
    /// Empty bus.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Listen for one kind of event.
    pub fn subscribe(
        &mut self,
        kind: EventKind,
        callback: impl FnMut(&NavEvent) + 'static,
    ) -> SubscriptionId {
        self.push(Some(kind), Box::new(callback))
    }

    /// Listen for every event.
    pub fn subscribe_all(
        &mut self,
        callback: impl FnMut(&NavEvent) + 'static,
    ) -> SubscriptionId {
        self.push(None, Box::new(callback))
    }

    fn push(&mut self, kind: Option<EventKind>, callback: Callback) -> SubscriptionId {
        let id = SubscriptionId(self.next_id);
        self.next_id += 1;
        self.listeners.push(Listener { id, kind, callback });
        id
    }

    /// Remove a listener. Returns `false` if it was already gone.
    pub fn unsubscribe(&mut self, id: SubscriptionId) -> bool {
        let before = self.listeners.len();
        self.listeners.retain(|l| l.id != id);
        self.listeners.len() != before
    }

    /// Deliver `event` to every matching listener.
    pub fn emit(&mut self, event: &NavEvent) {
        let kind = event.kind();
        for listener in &mut self.listeners {
            if listener.kind.is_none() || listener.kind == Some(kind) {
                (listener.callback)(event);
            }
        }
    }
}
