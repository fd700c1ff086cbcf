//! Card events and their delivery.
//!
//! ## Key Components
//!
//! - [`CardEvent`]: pointer, drag, selection and lifecycle notifications
//! - [`CardEventListener`]: implemented by anything that wants events
//!   (closures included)
//! - [`EventBus`]: ordered listener set owned by the hand engine
//! - [`EventLog`]: recording listener
//!
//! Cards never hold listener handles themselves. Each card queues the
//! events of its own transitions and the engine forwards them to the bus
//! after the triggering call returns.

mod bus;
mod event;

pub use bus::{CardEventListener, EventBus, EventLog, SubscriptionId};
pub use event::CardEvent;
