//! Hand slots and occupancy.
//!
//! A `HandSlotSet` is a fixed, ordered table of anchors. Each slot holds at
//! most one instance handle. The set only tracks which handle sits where;
//! the instances themselves live in the engine's instance table, keyed by
//! `InstanceId`, and point back at their slot by `SlotId`.

use serde::{Deserialize, Serialize};

use crate::core::{HandError, HandResult, InstanceId, Vec2};

/// Most slots a hand can hold; every index must fit a `SlotId`.
pub const MAX_SLOTS: usize = u16::MAX as usize + 1;

/// Position of a slot in the hand, left to right.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct SlotId(pub u16);

impl SlotId {
    #[must_use]
    pub const fn new(id: u16) -> Self {
        Self(id)
    }

    #[must_use]
    pub const fn index(self) -> usize {
        self.0 as usize
    }
}

impl std::fmt::Display for SlotId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "Slot({})", self.0)
    }
}

/// One hand slot.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct HandSlot {
    pub id: SlotId,
    pub anchor: Vec2,
    occupant: Option<InstanceId>,
}

impl HandSlot {
    /// The instance sitting here, if any.
    #[must_use]
    pub fn occupant(&self) -> Option<InstanceId> {
        self.occupant
    }

    #[must_use]
    pub fn is_occupied(&self) -> bool {
        self.occupant.is_some()
    }
}

/// Fixed, ordered collection of hand slots.
///
/// ```
/// use card_hand::core::{InstanceId, Vec2};
/// use card_hand::hand::{HandSlotSet, SlotId};
///
/// let mut slots = HandSlotSet::new(&[Vec2::new(0.0, 0.0), Vec2::new(2.0, 0.0)]).unwrap();
/// slots.bind(SlotId::new(1), InstanceId(7)).unwrap();
///
/// let empty: Vec<_> = slots.empty_slots().collect();
/// assert_eq!(empty, vec![SlotId::new(0)]);
/// assert!(slots.bind(SlotId::new(1), InstanceId(8)).is_err());
/// ```
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct HandSlotSet {
    slots: Vec<HandSlot>,
}

impl HandSlotSet {
    /// One empty slot per anchor, in order.
    ///
    /// Fails with `InvalidConfig` for more than [`MAX_SLOTS`] anchors.
    pub fn new(anchors: &[Vec2]) -> HandResult<Self> {
        let slots = anchors
            .iter()
            .enumerate()
            .map(|(i, &anchor)| {
                let id = u16::try_from(i).map_err(|_| {
                    HandError::InvalidConfig(format!(
                        "{} slot anchors exceed the limit of {MAX_SLOTS}",
                        anchors.len()
                    ))
                })?;
                Ok(HandSlot {
                    id: SlotId(id),
                    anchor,
                    occupant: None,
                })
            })
            .collect::<HandResult<Vec<_>>>()?;
        Ok(Self { slots })
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.slots.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.slots.is_empty()
    }

    /// Look up a slot.
    pub fn get(&self, slot: SlotId) -> HandResult<&HandSlot> {
        self.slots.get(slot.index()).ok_or(HandError::UnknownSlot(slot))
    }

    /// Anchor position of a slot.
    pub fn anchor(&self, slot: SlotId) -> HandResult<Vec2> {
        self.get(slot).map(|s| s.anchor)
    }

    /// Occupant of a slot.
    pub fn occupant(&self, slot: SlotId) -> HandResult<Option<InstanceId>> {
        self.get(slot).map(HandSlot::occupant)
    }

    /// Place an instance in an empty slot.
    ///
    /// Binding into an occupied slot is a contract violation and fails with
    /// `InvalidSlotState`; the slot keeps its current occupant.
    pub fn bind(&mut self, slot: SlotId, instance: InstanceId) -> HandResult<()> {
        let entry = self
            .slots
            .get_mut(slot.index())
            .ok_or(HandError::UnknownSlot(slot))?;
        if let Some(current) = entry.occupant {
            return Err(HandError::InvalidSlotState(format!(
                "{slot} already holds {current}, cannot bind {instance}"
            )));
        }
        entry.occupant = Some(instance);
        Ok(())
    }

    /// Empty a slot, returning its former occupant.
    ///
    /// Unbinding an empty slot fails with `InvalidSlotState`.
    pub fn unbind(&mut self, slot: SlotId) -> HandResult<InstanceId> {
        let entry = self
            .slots
            .get_mut(slot.index())
            .ok_or(HandError::UnknownSlot(slot))?;
        entry
            .occupant
            .take()
            .ok_or_else(|| HandError::InvalidSlotState(format!("{slot} has no instance to unbind")))
    }

    /// Slot currently holding `instance`, if any.
    #[must_use]
    pub fn slot_of(&self, instance: InstanceId) -> Option<SlotId> {
        self.slots
            .iter()
            .find(|s| s.occupant == Some(instance))
            .map(|s| s.id)
    }

    /// All slots, in order.
    pub fn iter(&self) -> impl Iterator<Item = &HandSlot> {
        self.slots.iter()
    }

    /// Unoccupied slots, in order.
    pub fn empty_slots(&self) -> impl Iterator<Item = SlotId> + '_ {
        self.slots.iter().filter(|s| !s.is_occupied()).map(|s| s.id)
    }

    /// Occupied slots with their occupants, in order.
    pub fn occupied(&self) -> impl Iterator<Item = (SlotId, InstanceId)> + '_ {
        self.slots
            .iter()
            .filter_map(|s| s.occupant.map(|instance| (s.id, instance)))
    }

    #[must_use]
    pub fn occupied_count(&self) -> usize {
        self.slots.iter().filter(|s| s.is_occupied()).count()
    }
}
