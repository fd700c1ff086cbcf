//! # card-hand
//!
//! Hand assembly and card interaction for a collectible card game.
//!
//! A hand is a fixed row of slots. The engine fills each empty slot with a
//! card drawn by weighted rarity, gives it a weighted cosmetic finish, and
//! then routes pointer input to the card's own small state machine.
//!
//! ## Design Principles
//!
//! 1. **Deterministic**: every draw comes from a seeded `ChaCha8Rng`, so the
//!    same seed and configuration deal the same hand.
//!
//! 2. **Engine owns lifecycle**: cards never create, destroy or rebind
//!    themselves. Slots hold instance handles; instances hold their slot.
//!
//! 3. **Host drives time**: nothing moves unless `advance(dt)` is called.
//!    Pointer positions arrive already in world space.
//!
//! ## Modules
//!
//! - `core`: Instance handles, geometry, RNG, configuration, errors
//! - `cards`: Card definitions, finishes, registry and live instances
//! - `sampling`: Weighted record tables
//! - `pools`: Cards partitioned by rarity
//! - `hand`: Slots and the assembly engine
//! - `events`: Card events and listeners

pub mod cards;
pub mod core;
pub mod events;
pub mod hand;
pub mod pools;
pub mod sampling;

// Re-export commonly used types
pub use crate::core::{
    FinishOverride, HandConfig, HandError, HandResult, HandRng, HandRngState, InstanceId,
    MotionConfig, Rotation, Vec2,
};

pub use crate::cards::{
    CardDefinition, CardId, CardInstance, CardRegistry, Finish, InteractionState, Rarity,
};

pub use crate::sampling::{sample_weighted, WeightRecord, WeightTable};

pub use crate::pools::{PoolPick, RarityPoolIndex};

pub use crate::hand::{HandAssemblyEngine, HandPhase, HandSlotSet, RollSummary, SlotId};

pub use crate::events::{CardEvent, CardEventListener, EventBus, EventLog, SubscriptionId};
