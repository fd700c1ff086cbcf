//! Card events.
//!
//! Events are fire-and-forget notifications for the presentation layer.
//! Interaction events come from a card's own state machine; `Spawned` and
//! `Despawned` come from the hand engine when it creates or tears down an
//! instance.

use serde::{Deserialize, Serialize};

use crate::cards::{CardId, Finish};
use crate::core::InstanceId;
use crate::hand::SlotId;

/// Something that happened to a card instance.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum CardEvent {
    /// The pointer entered the card.
    PointerEnter { instance: InstanceId, hovering: bool },
    /// The pointer left the card.
    PointerExit { instance: InstanceId },
    /// A pointer button went down over the card.
    PointerDown { instance: InstanceId },
    /// A pointer button was released over the card.
    PointerUp { instance: InstanceId },
    /// A drag started.
    BeginDrag { instance: InstanceId },
    /// A drag ended; the card is heading home.
    EndDrag { instance: InstanceId },
    /// Selection flag changed.
    Select { instance: InstanceId, selected: bool },
    /// A card was dealt into a slot.
    Spawned {
        instance: InstanceId,
        slot: SlotId,
        card: CardId,
        finish: Finish,
    },
    /// A card was removed from its slot.
    Despawned { instance: InstanceId, slot: SlotId },
}

impl CardEvent {
    /// The instance the event is about.
    #[must_use]
    pub fn instance(&self) -> InstanceId {
        match *self {
            CardEvent::PointerEnter { instance, .. }
            | CardEvent::PointerExit { instance }
            | CardEvent::PointerDown { instance }
            | CardEvent::PointerUp { instance }
            | CardEvent::BeginDrag { instance }
            | CardEvent::EndDrag { instance }
            | CardEvent::Select { instance, .. }
            | CardEvent::Spawned { instance, .. }
            | CardEvent::Despawned { instance, .. } => instance,
        }
    }

    /// Short name, handy for logs and assertions.
    #[must_use]
    pub fn kind(&self) -> &'static str {
        match self {
            CardEvent::PointerEnter { .. } => "pointer_enter",
            CardEvent::PointerExit { .. } => "pointer_exit",
            CardEvent::PointerDown { .. } => "pointer_down",
            CardEvent::PointerUp { .. } => "pointer_up",
            CardEvent::BeginDrag { .. } => "begin_drag",
            CardEvent::EndDrag { .. } => "end_drag",
            CardEvent::Select { .. } => "select",
            CardEvent::Spawned { .. } => "spawned",
            CardEvent::Despawned { .. } => "despawned",
        }
    }
}
