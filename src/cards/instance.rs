//! Card instances - spawned, interactive cards.
//!
//! `CardInstance` is one card sitting in the hand. It references its
//! definition by `CardId` and its slot by `SlotId`; it owns its interaction
//! state, position smoothing and cosmetic motion.
//!
//! ## Interaction state machine
//!
//! ```text
//!   Idle --pointer_enter--> Hovering --pointer_exit--> Idle
//!   Idle | Hovering --begin_drag--> Dragging --end_drag--> Idle
//! ```
//!
//! `pointer_down`/`pointer_up` are pass-through notifications in every
//! state. Any other input is ignored: the method returns `false` and no
//! event is queued. Selection is a separate flag and never gates these
//! transitions.
//!
//! Transitions queue `CardEvent`s in the card's outbox; the owner drains
//! them with `take_events`.

use serde::{Deserialize, Serialize};
use smallvec::SmallVec;

use super::definition::CardId;
use super::finish::Finish;
use super::motion::{drag_tilt, IdleMotion};
use crate::core::{lerp, lerp_scalar, smoothing_factor, InstanceId, MotionConfig, Rotation, Vec2};
use crate::events::CardEvent;
use crate::hand::SlotId;

/// Interaction state. Exactly one at any time.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub enum InteractionState {
    Idle,
    Hovering,
    /// `offset` is the card position minus the pointer position at drag start.
    Dragging { offset: Vec2 },
}

/// Events queued by a single call; rarely more than one.
pub type EventOutbox = SmallVec<[CardEvent; 4]>;

/// A card in the hand.
#[derive(Clone, Debug, PartialEq)]
pub struct CardInstance {
    id: InstanceId,
    card: CardId,
    finish: Finish,
    slot: SlotId,
    home: Vec2,

    position: Vec2,
    target: Vec2,
    rotation: Rotation,
    scale: f32,

    state: InteractionState,
    selected: bool,
    idle: IdleMotion,
    alive: bool,

    outbox: EventOutbox,
}

impl CardInstance {
    /// Spawn a card resting at its slot anchor.
    #[must_use]
    pub fn new(
        id: InstanceId,
        card: CardId,
        finish: Finish,
        slot: SlotId,
        anchor: Vec2,
        idle_phase: f32,
    ) -> Self {
        Self {
            id,
            card,
            finish,
            slot,
            home: anchor,
            position: anchor,
            target: anchor,
            rotation: Rotation::IDENTITY,
            scale: 1.0,
            state: InteractionState::Idle,
            selected: false,
            idle: IdleMotion::new(idle_phase),
            alive: true,
            outbox: EventOutbox::new(),
        }
    }

    #[must_use]
    pub fn id(&self) -> InstanceId {
        self.id
    }

    #[must_use]
    pub fn card(&self) -> CardId {
        self.card
    }

    #[must_use]
    pub fn finish(&self) -> Finish {
        self.finish
    }

    #[must_use]
    pub fn slot(&self) -> SlotId {
        self.slot
    }

    /// Anchor of the owning slot; where the card returns after a drag.
    #[must_use]
    pub fn home(&self) -> Vec2 {
        self.home
    }

    #[must_use]
    pub fn position(&self) -> Vec2 {
        self.position
    }

    #[must_use]
    pub fn target(&self) -> Vec2 {
        self.target
    }

    #[must_use]
    pub fn rotation(&self) -> Rotation {
        self.rotation
    }

    #[must_use]
    pub fn scale(&self) -> f32 {
        self.scale
    }

    #[must_use]
    pub fn state(&self) -> InteractionState {
        self.state
    }

    #[must_use]
    pub fn is_hovering(&self) -> bool {
        self.state == InteractionState::Hovering
    }

    #[must_use]
    pub fn is_dragging(&self) -> bool {
        matches!(self.state, InteractionState::Dragging { .. })
    }

    #[must_use]
    pub fn is_selected(&self) -> bool {
        self.selected
    }

    #[must_use]
    pub fn is_alive(&self) -> bool {
        self.alive
    }

    #[must_use]
    pub fn idle_motion(&self) -> &IdleMotion {
        &self.idle
    }

    /// Render layer: dragged cards sit in front of the hand.
    #[must_use]
    pub fn depth(&self, config: &MotionConfig) -> f32 {
        if self.is_dragging() {
            config.drag_depth
        } else {
            config.rest_depth
        }
    }

    // === Pointer input ===

    /// `Idle -> Hovering`.
    pub fn pointer_enter(&mut self) -> bool {
        if !self.alive || self.state != InteractionState::Idle {
            return false;
        }
        self.state = InteractionState::Hovering;
        self.emit(CardEvent::PointerEnter {
            instance: self.id,
            hovering: true,
        });
        true
    }

    /// `Hovering -> Idle`.
    pub fn pointer_exit(&mut self) -> bool {
        if !self.alive || self.state != InteractionState::Hovering {
            return false;
        }
        self.state = InteractionState::Idle;
        self.emit(CardEvent::PointerExit { instance: self.id });
        true
    }

    /// Pass-through notification; no transition.
    pub fn pointer_down(&mut self) -> bool {
        if !self.alive {
            return false;
        }
        self.emit(CardEvent::PointerDown { instance: self.id });
        true
    }

    /// Pass-through notification; no transition.
    pub fn pointer_up(&mut self) -> bool {
        if !self.alive {
            return false;
        }
        self.emit(CardEvent::PointerUp { instance: self.id });
        true
    }

    /// `Idle | Hovering -> Dragging`.
    ///
    /// Records the offset from the pointer to the card so the card keeps
    /// its grip point instead of snapping its centre to the pointer. Idle
    /// wobble is suspended for the duration of the drag.
    pub fn begin_drag(&mut self, pointer: Vec2) -> bool {
        if !self.alive || self.is_dragging() {
            return false;
        }
        self.state = InteractionState::Dragging {
            offset: self.position - pointer,
        };
        self.idle.stop();
        self.emit(CardEvent::BeginDrag { instance: self.id });
        true
    }

    /// Follow the pointer while dragging: `target = pointer + offset`.
    pub fn drag_to(&mut self, pointer: Vec2) -> bool {
        match self.state {
            InteractionState::Dragging { offset } if self.alive => {
                self.target = pointer + offset;
                true
            }
            _ => false,
        }
    }

    /// `Dragging -> Idle`. The card always heads back to its own slot.
    pub fn end_drag(&mut self) -> bool {
        if !self.alive || !self.is_dragging() {
            return false;
        }
        self.state = InteractionState::Idle;
        self.target = self.home;
        self.idle.resume();
        self.emit(CardEvent::EndDrag { instance: self.id });
        true
    }

    // === Selection ===

    /// Set the selection flag and report it. Returns whether it changed.
    pub fn set_selected(&mut self, selected: bool) -> bool {
        if !self.alive {
            return false;
        }
        let changed = self.selected != selected;
        self.selected = selected;
        self.emit(CardEvent::Select {
            instance: self.id,
            selected,
        });
        changed
    }

    // === Per-frame ===

    /// Advance smoothing and cosmetic motion by `dt` seconds.
    ///
    /// Position and scale move a `1 - e^(-speed * dt)` fraction of the way
    /// to their targets, so they never overshoot. `dt == 0` changes
    /// nothing but the derived rotation.
    pub fn advance(&mut self, dt: f32, config: &MotionConfig) {
        if !self.alive {
            return;
        }
        let dt = if dt.is_finite() && dt > 0.0 { dt } else { 0.0 };
        let lag = self.target - self.position;

        self.position = lerp(self.position, self.target, smoothing_factor(config.move_speed, dt));

        let scale_target = if self.is_hovering() { config.hover_scale } else { 1.0 };
        self.scale = lerp_scalar(self.scale, scale_target, smoothing_factor(config.scale_speed, dt));

        self.idle.tick(dt, config);
        self.rotation = if self.is_dragging() {
            Rotation::new(0.0, 0.0, drag_tilt(lag.x, config))
        } else {
            let (x, y) = self.idle.angles(config);
            Rotation::new(x, y, 0.0)
        };
    }

    // === Lifecycle ===

    /// Cancel drag and idle motion and stop accepting input.
    ///
    /// Queued events are discarded so nothing is reported for a card that
    /// no longer exists.
    pub fn teardown(&mut self) {
        self.state = InteractionState::Idle;
        self.idle.stop();
        self.target = self.position;
        self.outbox.clear();
        self.alive = false;
    }

    /// Drain queued events.
    pub fn take_events(&mut self) -> EventOutbox {
        std::mem::take(&mut self.outbox)
    }

    fn emit(&mut self, event: CardEvent) {
        self.outbox.push(event);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn card_at(anchor: Vec2) -> CardInstance {
        CardInstance::new(InstanceId(1), CardId::new(7), Finish::Foil, SlotId::new(0), anchor, 0.0)
    }

    fn kinds(card: &mut CardInstance) -> Vec<&'static str> {
        card.take_events().iter().map(CardEvent::kind).collect()
    }

    #[test]
    fn test_new_rests_at_anchor() {
        let card = card_at(Vec2::new(3.0, 1.0));

        assert_eq!(card.position(), Vec2::new(3.0, 1.0));
        assert_eq!(card.target(), Vec2::new(3.0, 1.0));
        assert_eq!(card.state(), InteractionState::Idle);
        assert!(!card.is_selected());
        assert!(card.idle_motion().is_running());
    }

    #[test]
    fn test_hover_cycle() {
        let mut card = card_at(Vec2::ZERO);

        assert!(card.pointer_enter());
        assert!(card.is_hovering());
        assert!(!card.pointer_enter());
        assert!(card.pointer_exit());
        assert_eq!(card.state(), InteractionState::Idle);
        assert!(!card.pointer_exit());

        assert_eq!(kinds(&mut card), vec!["pointer_enter", "pointer_exit"]);
    }

    #[test]
    fn test_pointer_enter_reports_hover_flag() {
        let mut card = card_at(Vec2::ZERO);
        card.pointer_enter();

        assert_eq!(
            card.take_events().to_vec(),
            vec![CardEvent::PointerEnter {
                instance: InstanceId(1),
                hovering: true
            }]
        );
    }

    #[test]
    fn test_pointer_down_up_pass_through() {
        let mut card = card_at(Vec2::ZERO);
        card.pointer_enter();
        card.take_events();

        assert!(card.pointer_down());
        assert!(card.pointer_up());
        assert!(card.is_hovering());
        assert_eq!(kinds(&mut card), vec!["pointer_down", "pointer_up"]);
    }

    #[test]
    fn test_drag_keeps_grip_offset() {
        let mut card = card_at(Vec2::new(1.0, 1.0));

        assert!(card.begin_drag(Vec2::new(1.5, 0.5)));
        assert!(card.is_dragging());
        assert_eq!(
            card.state(),
            InteractionState::Dragging {
                offset: Vec2::new(-0.5, 0.5)
            }
        );

        assert!(card.drag_to(Vec2::new(4.0, 4.0)));
        assert_eq!(card.target(), Vec2::new(3.5, 4.5));
    }

    #[test]
    fn test_end_drag_returns_home() {
        let mut card = card_at(Vec2::new(2.0, 0.0));
        card.begin_drag(Vec2::new(2.0, 0.0));
        card.drag_to(Vec2::new(9.0, 9.0));

        assert!(card.end_drag());
        assert_eq!(card.state(), InteractionState::Idle);
        assert_eq!(card.target(), Vec2::new(2.0, 0.0));
        assert!(card.idle_motion().is_running());
        assert_eq!(kinds(&mut card), vec!["begin_drag", "end_drag"]);
    }

    #[test]
    fn test_begin_drag_from_hover() {
        let mut card = card_at(Vec2::ZERO);
        card.pointer_enter();

        assert!(card.begin_drag(Vec2::ZERO));
        assert!(card.is_dragging());
        // Hover edges do not apply while dragging.
        assert!(!card.pointer_enter());
        assert!(!card.pointer_exit());
        assert!(!card.begin_drag(Vec2::ZERO));
    }

    #[test]
    fn test_invalid_transitions_are_ignored() {
        let mut card = card_at(Vec2::ZERO);

        assert!(!card.end_drag());
        assert!(!card.drag_to(Vec2::new(5.0, 5.0)));
        assert_eq!(card.target(), Vec2::ZERO);
        assert_eq!(card.state(), InteractionState::Idle);
        assert!(card.take_events().is_empty());
    }

    #[test]
    fn test_selection_is_orthogonal() {
        let mut card = card_at(Vec2::ZERO);

        assert!(card.set_selected(true));
        assert!(!card.set_selected(true));
        assert!(card.begin_drag(Vec2::ZERO));
        assert!(card.is_selected());

        let events = card.take_events();
        assert_eq!(
            events[0],
            CardEvent::Select {
                instance: InstanceId(1),
                selected: true
            }
        );
        assert_eq!(events.len(), 3);
    }

    #[test]
    fn test_advance_moves_partway_without_overshoot() {
        let config = MotionConfig::default().with_move_speed(10.0);
        let mut card = card_at(Vec2::ZERO);
        card.begin_drag(Vec2::ZERO);
        card.drag_to(Vec2::new(10.0, 0.0));

        card.advance(0.1, &config);
        let x = card.position().x;
        assert!(x > 6.0 && x < 7.0, "x = {x}");

        for _ in 0..5 {
            let before = card.position().x;
            card.advance(0.1, &config);
            assert!(card.position().x > before);
            assert!(card.position().x < 10.0);
        }
    }

    #[test]
    fn test_advance_zero_dt_is_safe() {
        let config = MotionConfig::default();
        let mut card = card_at(Vec2::ZERO);
        card.begin_drag(Vec2::ZERO);
        card.drag_to(Vec2::new(10.0, 0.0));

        card.advance(0.0, &config);
        assert_eq!(card.position(), Vec2::ZERO);
        // Tilt comes from the full lag and is clamped.
        assert_eq!(card.rotation(), Rotation::new(0.0, 0.0, 15.0));

        card.advance(-1.0, &config);
        assert_eq!(card.position(), Vec2::ZERO);
    }

    #[test]
    fn test_idle_wobble_suspended_while_dragging() {
        let config = MotionConfig::default();
        let mut card = card_at(Vec2::ZERO);

        card.advance(0.5, &config);
        assert_eq!(card.idle_motion().elapsed(), 0.5);
        assert_eq!(card.rotation().z, 0.0);

        card.begin_drag(Vec2::ZERO);
        card.advance(0.5, &config);
        assert_eq!(card.idle_motion().elapsed(), 0.5);
        assert_eq!(card.rotation().x, 0.0);
        assert_eq!(card.rotation().y, 0.0);

        card.end_drag();
        card.advance(0.5, &config);
        assert_eq!(card.idle_motion().elapsed(), 1.0);
        assert_eq!(card.rotation().z, 0.0);
    }

    #[test]
    fn test_hover_scales_up_and_back() {
        let config = MotionConfig::default();
        let mut card = card_at(Vec2::ZERO);

        card.pointer_enter();
        for _ in 0..60 {
            card.advance(1.0 / 60.0, &config);
        }
        assert!(card.scale() > 1.05 && card.scale() <= config.hover_scale);

        card.pointer_exit();
        for _ in 0..60 {
            card.advance(1.0 / 60.0, &config);
        }
        assert!(card.scale() < 1.01);
    }

    #[test]
    fn test_depth_follows_drag() {
        let config = MotionConfig::default();
        let mut card = card_at(Vec2::ZERO);

        assert_eq!(card.depth(&config), config.rest_depth);
        card.begin_drag(Vec2::ZERO);
        assert_eq!(card.depth(&config), config.drag_depth);
    }

    #[test]
    fn test_teardown_cancels_everything() {
        let mut card = card_at(Vec2::ZERO);
        card.begin_drag(Vec2::ZERO);
        card.drag_to(Vec2::new(5.0, 0.0));

        card.teardown();

        assert!(!card.is_alive());
        assert_eq!(card.state(), InteractionState::Idle);
        assert!(!card.idle_motion().is_running());
        assert!(card.take_events().is_empty());

        assert!(!card.pointer_enter());
        assert!(!card.pointer_down());
        assert!(!card.begin_drag(Vec2::ZERO));
        assert!(!card.set_selected(true));
        card.advance(1.0, &MotionConfig::default());
        assert_eq!(card.position(), Vec2::ZERO);
        assert!(card.take_events().is_empty());
    }
}
