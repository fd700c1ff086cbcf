//! Hand assembly engine.
//!
//! `HandAssemblyEngine` owns the slot table, the instance table and the
//! event bus. It is the only thing that creates or destroys card instances
//! and the only thing that changes slot occupancy. Cards change their own
//! interaction and motion state in response to the pointer and per-frame
//! calls the engine routes to them.
//!
//! ## Rolling a hand
//!
//! For every empty slot, left to right:
//! 1. draw a rarity from the rarity table
//! 2. pick a definition of that rarity, falling back along the configured
//!    order when its bucket is empty
//! 3. draw a finish from the finish table
//! 4. apply finish override rules
//! 5. spawn an instance resting at the slot anchor
//!
//! A slot whose draw fails is left empty and the roll carries on.
//!
//! ```
//! use card_hand::cards::{CardDefinition, CardId, Rarity};
//! use card_hand::core::{HandConfig, HandRng, Vec2};
//! use card_hand::hand::HandAssemblyEngine;
//!
//! let cards = (0..10)
//!     .map(|i| CardDefinition::new(CardId::new(i), format!("C{i}"), Rarity::Common))
//!     .collect();
//! let anchors = (0..5).map(|i| Vec2::new(i as f32 * 2.0, 0.0)).collect();
//!
//! let mut engine = HandAssemblyEngine::new(HandConfig::new(cards, anchors), HandRng::new(42)).unwrap();
//! let summary = engine.initialize().unwrap();
//!
//! assert_eq!(summary.filled.len(), 5);
//! assert_eq!(engine.hand().count(), 5);
//! ```

use rustc_hash::FxHashMap;
use serde::{Deserialize, Serialize};
use tracing::{debug, trace, warn};

use super::overrides::resolve_finish;
use super::slots::{HandSlotSet, SlotId};
use crate::cards::{CardDefinition, CardId, CardInstance, CardRegistry, Finish, Rarity};
use crate::core::{
    HandConfig, HandError, HandResult, HandRng, HandRngState, InstanceAllocator, InstanceId, Vec2,
};
use crate::events::{CardEvent, CardEventListener, EventBus, SubscriptionId};
use crate::pools::RarityPoolIndex;
use crate::sampling::WeightTable;

/// Where the hand is in its lifecycle.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum HandPhase {
    /// No instances.
    Empty,
    /// Every slot was filled or attempted.
    Populated,
    /// Tearing down before a fresh roll.
    Rerolling,
}

/// Result of one assembly pass.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct RollSummary {
    /// Slots that received a card, in slot order.
    pub filled: Vec<(SlotId, InstanceId)>,
    /// Slots left empty because nothing could be drawn.
    pub skipped: Vec<SlotId>,
}

/// Builds hands and routes input to the cards in them.
#[derive(Debug)]
pub struct HandAssemblyEngine {
    config: HandConfig,
    registry: CardRegistry,
    pools: Option<RarityPoolIndex>,
    rarity_table: WeightTable<Rarity>,
    finish_table: WeightTable<Finish>,

    slots: HandSlotSet,
    instances: FxHashMap<InstanceId, CardInstance>,
    ids: InstanceAllocator,
    phase: HandPhase,

    /// Card, rarity and finish draws.
    rng: HandRng,
    /// Idle wobble phases; kept apart so cosmetics never shift the deal.
    motion_rng: HandRng,

    bus: EventBus,
}

impl HandAssemblyEngine {
    /// Validate the configuration and set up an empty hand.
    ///
    /// Fails on malformed weight tables, an empty or duplicate-id card
    /// collection, missing slots or bad motion tuning.
    pub fn new(config: HandConfig, rng: HandRng) -> HandResult<Self> {
        config.validate()?;

        let registry = CardRegistry::from_definitions(config.cards.iter().cloned())?;
        let rarity_table = WeightTable::new(config.rarity_weights.clone())?;
        let finish_table = WeightTable::new(config.finish_weights.clone())?;
        let slots = HandSlotSet::new(&config.slot_anchors)?;
        let motion_rng = rng.for_context("idle-motion");

        Ok(Self {
            config,
            registry,
            pools: None,
            rarity_table,
            finish_table,
            slots,
            instances: FxHashMap::default(),
            ids: InstanceAllocator::new(),
            phase: HandPhase::Empty,
            rng,
            motion_rng,
            bus: EventBus::new(),
        })
    }

    /// Populate pools and deal the first hand.
    pub fn initialize(&mut self) -> HandResult<RollSummary> {
        self.populate_pools()?;
        self.roll_hand()
    }

    /// Partition the card collection by rarity.
    ///
    /// The collection never changes after construction, so only the first
    /// call does any work.
    pub fn populate_pools(&mut self) -> HandResult<()> {
        if self.pools.is_some() {
            trace!("pools already populated");
            return Ok(());
        }

        let index = RarityPoolIndex::build(&self.registry);
        if index.is_empty() {
            return Err(HandError::EmptyCollection);
        }

        debug!(
            common = index.bucket(Rarity::Common).len(),
            uncommon = index.bucket(Rarity::Uncommon).len(),
            rare = index.bucket(Rarity::Rare).len(),
            ultra = index.bucket(Rarity::Ultra).len(),
            "populated rarity pools"
        );
        self.pools = Some(index);
        Ok(())
    }

    /// Fill every empty slot, left to right.
    ///
    /// Occupied slots are left alone. Slots whose draw fails are reported
    /// in `skipped`; only slot-contract violations abort the roll.
    pub fn roll_hand(&mut self) -> HandResult<RollSummary> {
        self.populate_pools()?;

        let empty: Vec<SlotId> = self.slots.empty_slots().collect();
        let mut summary = RollSummary::default();

        for slot in empty {
            match self.draw_for_slot(slot) {
                Ok((card, finish)) => {
                    let instance = self.spawn(slot, card, finish)?;
                    summary.filled.push((slot, instance));
                }
                Err(err) => {
                    warn!(%slot, error = %err, "leaving slot empty");
                    summary.skipped.push(slot);
                }
            }
        }

        self.phase = if self.instances.is_empty() {
            HandPhase::Empty
        } else {
            HandPhase::Populated
        };
        debug!(
            filled = summary.filled.len(),
            skipped = summary.skipped.len(),
            "rolled hand"
        );
        Ok(summary)
    }

    /// Tear down every instance, then roll a fresh hand.
    ///
    /// Drags and idle motion in progress are cancelled before the instance
    /// is dropped. No instance from the previous hand survives.
    pub fn reroll(&mut self) -> HandResult<RollSummary> {
        self.phase = HandPhase::Rerolling;

        let occupied: Vec<SlotId> = self.slots.occupied().map(|(slot, _)| slot).collect();
        for slot in occupied {
            self.despawn(slot)?;
        }

        if !self.instances.is_empty() {
            warn!(count = self.instances.len(), "tearing down unbound instances");
            for (_, mut instance) in self.instances.drain() {
                instance.teardown();
            }
        }

        self.roll_hand()
    }

    /// Tear down the instance in one slot.
    ///
    /// Clearing an empty slot fails with `InvalidSlotState`.
    pub fn clear_slot(&mut self, slot: SlotId) -> HandResult<InstanceId> {
        let instance = self.despawn(slot)?;
        if self.instances.is_empty() {
            self.phase = HandPhase::Empty;
        }
        debug!(%slot, %instance, "cleared slot");
        Ok(instance)
    }

    /// Advance every card by `dt` seconds, in slot order.
    ///
    /// Safe with `dt == 0`; negative or non-finite steps count as zero.
    pub fn advance(&mut self, dt: f32) {
        let motion = &self.config.motion;
        for (_, id) in self.slots.occupied() {
            if let Some(card) = self.instances.get_mut(&id) {
                card.advance(dt, motion);
            }
        }
    }

    // === Pointer input ===

    pub fn on_pointer_enter(&mut self, instance: InstanceId) -> HandResult<bool> {
        self.dispatch(instance, "pointer_enter", CardInstance::pointer_enter)
    }

    pub fn on_pointer_exit(&mut self, instance: InstanceId) -> HandResult<bool> {
        self.dispatch(instance, "pointer_exit", CardInstance::pointer_exit)
    }

    pub fn on_pointer_down(&mut self, instance: InstanceId) -> HandResult<bool> {
        self.dispatch(instance, "pointer_down", CardInstance::pointer_down)
    }

    pub fn on_pointer_up(&mut self, instance: InstanceId) -> HandResult<bool> {
        self.dispatch(instance, "pointer_up", CardInstance::pointer_up)
    }

    /// Start dragging at an already-resolved world position.
    pub fn on_begin_drag(&mut self, instance: InstanceId, world: Vec2) -> HandResult<bool> {
        self.dispatch(instance, "begin_drag", |card| card.begin_drag(world))
    }

    /// Pointer sample while dragging. Ignored when not dragging.
    pub fn on_pointer_move(&mut self, instance: InstanceId, world: Vec2) -> HandResult<bool> {
        self.dispatch(instance, "pointer_move", |card| card.drag_to(world))
    }

    pub fn on_end_drag(&mut self, instance: InstanceId) -> HandResult<bool> {
        self.dispatch(instance, "end_drag", CardInstance::end_drag)
    }

    // === Selection ===

    /// Set a card's selection flag. Returns whether it changed.
    pub fn set_selected(&mut self, instance: InstanceId, selected: bool) -> HandResult<bool> {
        self.dispatch(instance, "select", |card| card.set_selected(selected))
    }

    /// Flip a card's selection flag. Returns the new value.
    pub fn toggle_selected(&mut self, instance: InstanceId) -> HandResult<bool> {
        let selected = !self
            .instances
            .get(&instance)
            .ok_or(HandError::UnknownInstance(instance))?
            .is_selected();
        self.set_selected(instance, selected)?;
        Ok(selected)
    }

    // === Events ===

    pub fn subscribe(&mut self, listener: impl CardEventListener + 'static) -> SubscriptionId {
        self.bus.subscribe(listener)
    }

    pub fn unsubscribe(&mut self, id: SubscriptionId) -> bool {
        self.bus.unsubscribe(id)
    }

    // === Queries ===

    #[must_use]
    pub fn phase(&self) -> HandPhase {
        self.phase
    }

    #[must_use]
    pub fn config(&self) -> &HandConfig {
        &self.config
    }

    #[must_use]
    pub fn registry(&self) -> &CardRegistry {
        &self.registry
    }

    /// `None` until pools are populated.
    #[must_use]
    pub fn pools(&self) -> Option<&RarityPoolIndex> {
        self.pools.as_ref()
    }

    #[must_use]
    pub fn slots(&self) -> &HandSlotSet {
        &self.slots
    }

    #[must_use]
    pub fn instance(&self, id: InstanceId) -> Option<&CardInstance> {
        self.instances.get(&id)
    }

    #[must_use]
    pub fn instance_in_slot(&self, slot: SlotId) -> Option<&CardInstance> {
        let id = self.slots.occupant(slot).ok()??;
        self.instances.get(&id)
    }

    /// Definition behind a live instance.
    #[must_use]
    pub fn definition_of(&self, id: InstanceId) -> Option<&CardDefinition> {
        self.instances
            .get(&id)
            .and_then(|card| self.registry.get(card.card()))
    }

    /// Live instances in slot order.
    pub fn hand(&self) -> impl Iterator<Item = &CardInstance> + '_ {
        self.slots
            .occupied()
            .filter_map(move |(_, id)| self.instances.get(&id))
    }

    #[must_use]
    pub fn instance_count(&self) -> usize {
        self.instances.len()
    }

    /// Checkpoint of the draw stream, e.g. to replay a roll.
    #[must_use]
    pub fn rng_state(&self) -> HandRngState {
        self.rng.state()
    }

    // === Internals ===

    fn draw_for_slot(&mut self, slot: SlotId) -> HandResult<(CardId, Finish)> {
        let rarity = *self.rarity_table.sample(&mut self.rng);
        let pools = self.pools.as_ref().ok_or(HandError::EmptyCollection)?;
        let pick = pools.pick_random(rarity, &self.config.fallback_order, &mut self.rng)?;
        if pick.used_fallback() {
            warn!(%slot, requested = %pick.requested, used = %pick.drawn_from, "rarity fell back");
        }

        let drawn = *self.finish_table.sample(&mut self.rng);
        let definition = self
            .registry
            .get(pick.card)
            .ok_or(HandError::NoCardsAvailable { requested: rarity })?;
        let finish = resolve_finish(&self.config.finish_overrides, definition, drawn);

        trace!(
            %slot,
            card = %definition.name,
            rarity = %pick.drawn_from,
            drawn_finish = %drawn,
            %finish,
            "drew card"
        );
        Ok((pick.card, finish))
    }

    fn spawn(&mut self, slot: SlotId, card: CardId, finish: Finish) -> HandResult<InstanceId> {
        let anchor = self.slots.anchor(slot)?;
        let id = self.ids.alloc()?;
        self.slots.bind(slot, id)?;

        let phase = self.motion_rng.gen_phase();
        self.instances
            .insert(id, CardInstance::new(id, card, finish, slot, anchor, phase));
        self.bus.publish(&CardEvent::Spawned {
            instance: id,
            slot,
            card,
            finish,
        });
        Ok(id)
    }

    fn despawn(&mut self, slot: SlotId) -> HandResult<InstanceId> {
        let id = self.slots.unbind(slot)?;
        let mut instance = self.instances.remove(&id).ok_or_else(|| {
            HandError::InvalidSlotState(format!("{slot} held {id} but it is not in the instance table"))
        })?;
        instance.teardown();
        self.bus.publish(&CardEvent::Despawned { instance: id, slot });
        Ok(id)
    }

    fn dispatch(
        &mut self,
        id: InstanceId,
        input: &'static str,
        apply: impl FnOnce(&mut CardInstance) -> bool,
    ) -> HandResult<bool> {
        let card = self
            .instances
            .get_mut(&id)
            .ok_or(HandError::UnknownInstance(id))?;
        let applied = apply(card);
        let events = card.take_events();
        if applied {
            trace!(instance = %id, input, state = ?card.state(), "card input");
        } else {
            trace!(instance = %id, input, "input ignored");
        }
        self.bus.publish_all(events);
        Ok(applied)
    }
}
