//! Event subscription and delivery.
//!
//! The engine owns one `EventBus`. Listeners subscribe once and receive
//! every published event in publication order. Delivery is synchronous:
//! `publish` returns after every listener has seen the event.

use std::cell::RefCell;
use std::rc::Rc;

use serde::{Deserialize, Serialize};

use super::event::CardEvent;

/// Handle returned by [`EventBus::subscribe`].
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct SubscriptionId(pub u32);

impl std::fmt::Display for SubscriptionId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "Subscription({})", self.0)
    }
}

/// Receives card events.
pub trait CardEventListener {
    fn on_event(&mut self, event: &CardEvent);
}

impl<F> CardEventListener for F
where
    F: FnMut(&CardEvent),
{
    fn on_event(&mut self, event: &CardEvent) {
        self(event)
    }
}

/// Ordered set of listeners.
#[derive(Default)]
pub struct EventBus {
    listeners: Vec<(SubscriptionId, Box<dyn CardEventListener>)>,
    next_id: u32,
}

impl EventBus {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a listener. Listeners are called in subscription order.
    pub fn subscribe(&mut self, listener: impl CardEventListener + 'static) -> SubscriptionId {
        let id = SubscriptionId(self.next_id);
        self.next_id += 1;
        self.listeners.push((id, Box::new(listener)));
        id
    }

    /// Remove a listener. Returns `false` if it was not subscribed.
    pub fn unsubscribe(&mut self, id: SubscriptionId) -> bool {
        let before = self.listeners.len();
        self.listeners.retain(|(sub, _)| *sub != id);
        self.listeners.len() != before
    }

    /// Deliver one event to every listener.
    pub fn publish(&mut self, event: &CardEvent) {
        for (_, listener) in &mut self.listeners {
            listener.on_event(event);
        }
    }

    /// Deliver a batch of events in order.
    pub fn publish_all(&mut self, events: impl IntoIterator<Item = CardEvent>) {
        for event in events {
            self.publish(&event);
        }
    }

    #[must_use]
    pub fn listener_count(&self) -> usize {
        self.listeners.len()
    }
}

impl std::fmt::Debug for EventBus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("EventBus")
            .field("listeners", &self.listeners.len())
            .finish()
    }
}

/// Recording listener.
///
/// Clones share one buffer: subscribe a clone and read from the original.
///
/// ```
/// use card_hand::core::InstanceId;
/// use card_hand::events::{CardEvent, EventBus, EventLog};
///
/// let log = EventLog::new();
/// let mut bus = EventBus::new();
/// bus.subscribe(log.clone());
///
/// bus.publish(&CardEvent::PointerDown { instance: InstanceId(0) });
/// assert_eq!(log.take().len(), 1);
/// assert!(log.is_empty());
/// ```
#[derive(Clone, Debug, Default)]
pub struct EventLog {
    events: Rc<RefCell<Vec<CardEvent>>>,
}

impl EventLog {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Drain everything recorded so far.
    pub fn take(&self) -> Vec<CardEvent> {
        std::mem::take(&mut *self.events.borrow_mut())
    }

    /// Copy of everything recorded so far.
    #[must_use]
    pub fn snapshot(&self) -> Vec<CardEvent> {
        self.events.borrow().clone()
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.events.borrow().len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.events.borrow().is_empty()
    }
}

impl CardEventListener for EventLog {
    fn on_event(&mut self, event: &CardEvent) {
        self.events.borrow_mut().push(event.clone());
    }
}
