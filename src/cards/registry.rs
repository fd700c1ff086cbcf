//! Card registry for definition lookup.
//!
//! The `CardRegistry` stores the loaded card collection. It keeps load
//! order (rarity pools are built from it and must be order-preserving) and
//! an id index for O(1) lookup.

use rustc_hash::FxHashMap;

use super::definition::{CardDefinition, CardId};
use crate::core::{HandError, HandResult};

/// Registry of card definitions.
///
/// ## Example
///
/// ```
/// use card_hand::cards::{CardDefinition, CardId, CardRegistry, Rarity};
///
/// let mut registry = CardRegistry::new();
/// registry.register(CardDefinition::new(CardId::new(1), "REDD", Rarity::Rare)).unwrap();
///
/// let found = registry.get(CardId::new(1)).unwrap();
/// assert_eq!(found.name, "REDD");
/// ```
#[derive(Clone, Debug, Default)]
pub struct CardRegistry {
    cards: Vec<CardDefinition>,
    index: FxHashMap<CardId, usize>,
}

impl CardRegistry {
    /// Create a new empty registry.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Build a registry from a collection, rejecting duplicate ids.
    pub fn from_definitions(
        definitions: impl IntoIterator<Item = CardDefinition>,
    ) -> HandResult<Self> {
        let mut registry = Self::new();
        for card in definitions {
            registry.register(card)?;
        }
        Ok(registry)
    }

    /// Register a card definition.
    ///
    /// Fails with `DuplicateCard` if the id is already taken.
    pub fn register(&mut self, card: CardDefinition) -> HandResult<()> {
        if self.index.contains_key(&card.id) {
            return Err(HandError::DuplicateCard(card.id));
        }
        self.index.insert(card.id, self.cards.len());
        self.cards.push(card);
        Ok(())
    }

    /// Get a card definition by ID.
    #[must_use]
    pub fn get(&self, id: CardId) -> Option<&CardDefinition> {
        self.index.get(&id).map(|&i| &self.cards[i])
    }

    /// Check if a card ID is registered.
    #[must_use]
    pub fn contains(&self, id: CardId) -> bool {
        self.index.contains_key(&id)
    }

    /// Get the number of registered cards.
    #[must_use]
    pub fn len(&self) -> usize {
        self.cards.len()
    }

    /// Check if the registry is empty.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.cards.is_empty()
    }

    /// Iterate over all card definitions in load order.
    pub fn iter(&self) -> impl Iterator<Item = &CardDefinition> {
        self.cards.iter()
    }
}
