//! Card system: definitions, finishes, registry, and spawned instances.
//!
//! ## Key Types
//!
//! - `CardId`: Identifier for card definitions
//! - `Rarity`: Rarity tier driving draw probability
//! - `CardDefinition`: Immutable card data
//! - `Finish`: Cosmetic variant chosen at spawn time
//! - `CardRegistry`: Definition lookup in load order
//! - `CardInstance`: A card in the hand with its own interaction state

pub mod definition;
pub mod finish;
pub mod instance;
pub mod motion;
pub mod registry;

pub use definition::{CardDefinition, CardId, Rarity};
pub use finish::Finish;
pub use instance::{CardInstance, EventOutbox, InteractionState};
pub use motion::{drag_tilt, IdleMotion};
pub use registry::CardRegistry;
