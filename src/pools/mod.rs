//! Card pools: the collection partitioned for rarity-weighted draws.

pub mod rarity;

pub use rarity::{PoolPick, RarityPoolIndex};
