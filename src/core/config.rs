//! Hand configuration.
//!
//! Hosts configure the engine at startup by providing a `HandConfig`:
//! - the card collection (already loaded, immutable)
//! - rarity and finish weight tables
//! - ordered slot anchor positions
//! - the rarity fallback order
//! - finish override rules
//! - motion tuning (`MotionConfig`)
//!
//! Only the cards and slots are required; everything else has a default
//! taken from the shipped tuning, so a JSON payload can be as small as
//! `{"cards": [...], "slot_anchors": [...]}`.

use serde::{Deserialize, Serialize};

use super::error::{HandError, HandResult};
use super::geometry::Vec2;
use crate::cards::{CardDefinition, Finish, Rarity};
use crate::hand::MAX_SLOTS;
use crate::sampling::{validate_weights, WeightRecord};

/// Remap a finish for one named card.
///
/// When a card called `card_name` draws `forbidden`, it gets `substitute`.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct FinishOverride {
    pub card_name: String,
    pub forbidden: Finish,
    pub substitute: Finish,
}

impl FinishOverride {
    pub fn new(card_name: impl Into<String>, forbidden: Finish, substitute: Finish) -> Self {
        Self {
            card_name: card_name.into(),
            forbidden,
            substitute,
        }
    }
}

/// Tuning for card movement and cosmetic motion.
///
/// Angles are degrees, speeds are per second.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct MotionConfig {
    /// Position smoothing rate toward the target.
    pub move_speed: f32,
    /// Whether idle wobble runs at all.
    pub idle_motion: bool,
    /// Peak idle wobble angle.
    pub idle_amplitude: f32,
    /// Idle wobble angular speed, radians of phase per second.
    pub idle_speed: f32,
    /// Drag tilt per world unit of horizontal lag.
    pub tilt_factor: f32,
    /// Drag tilt clamp, applied symmetrically.
    pub max_tilt: f32,
    /// Scale while hovered.
    pub hover_scale: f32,
    /// Scale smoothing rate.
    pub scale_speed: f32,
    /// Depth layer at rest.
    pub rest_depth: f32,
    /// Depth layer while dragged.
    pub drag_depth: f32,
}

impl Default for MotionConfig {
    fn default() -> Self {
        Self {
            move_speed: 10.0,
            idle_motion: true,
            idle_amplitude: 5.0,
            idle_speed: 1.0,
            tilt_factor: 5.0,
            max_tilt: 15.0,
            hover_scale: 1.1,
            scale_speed: 15.0,
            rest_depth: -1.0,
            drag_depth: -10.0,
        }
    }
}

impl MotionConfig {
    /// Set the move speed (builder pattern).
    #[must_use]
    pub fn with_move_speed(mut self, speed: f32) -> Self {
        self.move_speed = speed;
        self
    }

    /// Turn idle wobble off.
    #[must_use]
    pub fn without_idle_motion(mut self) -> Self {
        self.idle_motion = false;
        self
    }

    pub fn validate(&self) -> HandResult<()> {
        let non_negative = [
            ("move_speed", self.move_speed),
            ("idle_amplitude", self.idle_amplitude),
            ("idle_speed", self.idle_speed),
            ("tilt_factor", self.tilt_factor),
            ("max_tilt", self.max_tilt),
            ("hover_scale", self.hover_scale),
            ("scale_speed", self.scale_speed),
        ];
        for (name, value) in non_negative {
            if !value.is_finite() || value < 0.0 {
                return Err(HandError::InvalidConfig(format!(
                    "{name} must be finite and non-negative, got {value}"
                )));
            }
        }
        for (name, value) in [("rest_depth", self.rest_depth), ("drag_depth", self.drag_depth)] {
            if !value.is_finite() {
                return Err(HandError::InvalidConfig(format!("{name} must be finite")));
            }
        }
        Ok(())
    }
}

/// Complete hand configuration.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct HandConfig {
    /// The card collection.
    pub cards: Vec<CardDefinition>,

    /// Ordered hand slot anchors; slot `i` sits at `slot_anchors[i]`.
    pub slot_anchors: Vec<Vec2>,

    /// Rarity draw table, sampled in record order.
    #[serde(default = "default_rarity_weights")]
    pub rarity_weights: Vec<WeightRecord<Rarity>>,

    /// Finish draw table, sampled in record order.
    #[serde(default = "default_finish_weights")]
    pub finish_weights: Vec<WeightRecord<Finish>>,

    /// Buckets consulted when the drawn rarity's bucket is empty.
    #[serde(default = "default_fallback_order")]
    pub fallback_order: Vec<Rarity>,

    /// Per-card finish remaps.
    #[serde(default = "default_finish_overrides")]
    pub finish_overrides: Vec<FinishOverride>,

    #[serde(default)]
    pub motion: MotionConfig,
}

/// Ultra 5, Rare 15, Uncommon 30, Common 50.
#[must_use]
pub fn default_rarity_weights() -> Vec<WeightRecord<Rarity>> {
    vec![
        WeightRecord::new(Rarity::Ultra, 5.0),
        WeightRecord::new(Rarity::Rare, 15.0),
        WeightRecord::new(Rarity::Uncommon, 30.0),
        WeightRecord::new(Rarity::Common, 50.0),
    ]
}

/// Chroma 3, Void 5, Inverse 12, Foil 30, Matte 50.
#[must_use]
pub fn default_finish_weights() -> Vec<WeightRecord<Finish>> {
    vec![
        WeightRecord::new(Finish::Chroma, 3.0),
        WeightRecord::new(Finish::Void, 5.0),
        WeightRecord::new(Finish::Inverse, 12.0),
        WeightRecord::new(Finish::Foil, 30.0),
        WeightRecord::new(Finish::Matte, 50.0),
    ]
}

#[must_use]
pub fn default_fallback_order() -> Vec<Rarity> {
    Rarity::ALL.to_vec()
}

/// REDD never shows as Chroma.
#[must_use]
pub fn default_finish_overrides() -> Vec<FinishOverride> {
    vec![FinishOverride::new("REDD", Finish::Chroma, Finish::Void)]
}

impl HandConfig {
    /// Create a configuration with default tables, rules and motion.
    pub fn new(cards: Vec<CardDefinition>, slot_anchors: Vec<Vec2>) -> Self {
        Self {
            cards,
            slot_anchors,
            rarity_weights: default_rarity_weights(),
            finish_weights: default_finish_weights(),
            fallback_order: default_fallback_order(),
            finish_overrides: default_finish_overrides(),
            motion: MotionConfig::default(),
        }
    }

    /// Add a card definition.
    #[must_use]
    pub fn with_card(mut self, card: CardDefinition) -> Self {
        self.cards.push(card);
        self
    }

    /// Append a slot anchor.
    #[must_use]
    pub fn with_slot(mut self, anchor: Vec2) -> Self {
        self.slot_anchors.push(anchor);
        self
    }

    /// Replace the rarity table.
    #[must_use]
    pub fn with_rarity_weights(mut self, weights: Vec<WeightRecord<Rarity>>) -> Self {
        self.rarity_weights = weights;
        self
    }

    /// Replace the finish table.
    #[must_use]
    pub fn with_finish_weights(mut self, weights: Vec<WeightRecord<Finish>>) -> Self {
        self.finish_weights = weights;
        self
    }

    /// Replace the fallback order.
    #[must_use]
    pub fn with_fallback_order(mut self, order: Vec<Rarity>) -> Self {
        self.fallback_order = order;
        self
    }

    /// Add a finish override rule.
    #[must_use]
    pub fn with_finish_override(mut self, rule: FinishOverride) -> Self {
        self.finish_overrides.push(rule);
        self
    }

    /// Drop every finish override rule, including the default one.
    #[must_use]
    pub fn without_finish_overrides(mut self) -> Self {
        self.finish_overrides.clear();
        self
    }

    /// Replace motion tuning.
    #[must_use]
    pub fn with_motion(mut self, motion: MotionConfig) -> Self {
        self.motion = motion;
        self
    }

    /// Check everything that would otherwise only fail mid-roll.
    ///
    /// Duplicate card ids are caught when the registry is built.
    pub fn validate(&self) -> HandResult<()> {
        if self.cards.is_empty() {
            return Err(HandError::EmptyCollection);
        }
        if self.slot_anchors.is_empty() {
            return Err(HandError::InvalidConfig("no slot anchors".to_string()));
        }
        if self.slot_anchors.len() > MAX_SLOTS {
            return Err(HandError::InvalidConfig(format!(
                "{} slot anchors exceed the limit of {MAX_SLOTS}",
                self.slot_anchors.len()
            )));
        }
        if let Some(anchor) = self.slot_anchors.iter().find(|a| !a.is_finite()) {
            return Err(HandError::InvalidConfig(format!(
                "slot anchor {anchor:?} is not finite"
            )));
        }
        validate_weights(&self.rarity_weights)?;
        validate_weights(&self.finish_weights)?;
        self.motion.validate()
    }
}
