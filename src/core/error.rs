//! Error taxonomy for hand assembly and card interaction.

use thiserror::Error;

use super::entity::InstanceId;
use crate::cards::{CardId, Rarity};
use crate::hand::SlotId;

/// Errors raised by sampling, pool lookup, slot binding and configuration.
#[derive(Clone, Debug, PartialEq, Error)]
pub enum HandError {
    /// A weight table is empty or its weights sum to zero.
    #[error("weight table is empty or sums to zero")]
    EmptyDistribution,

    /// The requested rarity bucket and every fallback bucket are empty.
    #[error("no cards available for {requested} or any fallback rarity")]
    NoCardsAvailable { requested: Rarity },

    /// Slot occupancy contract violated (double bind, unbinding an empty slot).
    #[error("invalid slot state: {0}")]
    InvalidSlotState(String),

    /// A weight record is negative or not finite.
    #[error("invalid weight {weight} for {label}")]
    InvalidWeight { label: String, weight: f64 },

    /// The card definition collection is empty.
    #[error("card collection is empty")]
    EmptyCollection,

    /// Two definitions share an id.
    #[error("{0} is registered more than once")]
    DuplicateCard(CardId),

    /// The handle does not refer to a live instance.
    #[error("unknown or despawned {0}")]
    UnknownInstance(InstanceId),

    /// The slot id is out of range.
    #[error("unknown {0}")]
    UnknownSlot(SlotId),

    /// The instance id space is used up.
    #[error("instance ids exhausted")]
    InstancesExhausted,

    /// Any other malformed configuration value.
    #[error("invalid config: {0}")]
    InvalidConfig(String),
}

pub type HandResult<T> = Result<T, HandError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_messages() {
        assert_eq!(
            HandError::EmptyDistribution.to_string(),
            "weight table is empty or sums to zero"
        );
        assert_eq!(
            HandError::NoCardsAvailable { requested: Rarity::Rare }.to_string(),
            "no cards available for Rare or any fallback rarity"
        );
        assert_eq!(
            HandError::UnknownInstance(InstanceId(3)).to_string(),
            "unknown or despawned Instance(3)"
        );
    }
}
