//! The hand: slots, assembly and finish overrides.
//!
//! ## Key Types
//!
//! - `SlotId`: position of a slot in the hand, left to right
//! - `HandSlotSet`: anchors and their occupants
//! - `HandAssemblyEngine`: deals, rerolls and routes input to cards
//! - `RollSummary`: which slots a roll filled and which it skipped

pub mod engine;
pub mod overrides;
pub mod slots;

pub use engine::{HandAssemblyEngine, HandPhase, RollSummary};
pub use overrides::resolve_finish;
pub use slots::{HandSlot, HandSlotSet, SlotId, MAX_SLOTS};
