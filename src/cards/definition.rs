//! Card definitions - static card data.
//!
//! `CardDefinition` holds the immutable properties of a card type: its
//! rarity tier, display name, value and artwork reference. Definitions are
//! loaded once and never mutated; spawned cards refer to them by `CardId`
//! and a definition never knows which instances exist.

use serde::{Deserialize, Serialize};

/// Unique identifier for a card definition.
///
/// This identifies the "type" of card (e.g., "REDD"), not a specific card
/// sitting in the hand.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct CardId(pub u32);

impl CardId {
    /// Create a new card ID.
    #[must_use]
    pub const fn new(id: u32) -> Self {
        Self(id)
    }

    /// Get the raw ID value.
    #[must_use]
    pub const fn raw(self) -> u32 {
        self.0
    }
}

impl std::fmt::Display for CardId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "Card({})", self.0)
    }
}

/// Ordinal rarity tier of a card definition.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum Rarity {
    Common,
    Uncommon,
    Rare,
    Ultra,
}

impl Rarity {
    /// All tiers, lowest first.
    pub const ALL: [Rarity; 4] = [Rarity::Common, Rarity::Uncommon, Rarity::Rare, Rarity::Ultra];

    /// Dense index, usable for per-rarity arrays.
    #[must_use]
    pub const fn index(self) -> usize {
        match self {
            Rarity::Common => 0,
            Rarity::Uncommon => 1,
            Rarity::Rare => 2,
            Rarity::Ultra => 3,
        }
    }

    #[must_use]
    pub const fn name(self) -> &'static str {
        match self {
            Rarity::Common => "Common",
            Rarity::Uncommon => "Uncommon",
            Rarity::Rare => "Rare",
            Rarity::Ultra => "Ultra",
        }
    }
}

impl std::fmt::Display for Rarity {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.name())
    }
}

/// Static card definition.
///
/// ## Example
///
/// ```
/// use card_hand::cards::{CardDefinition, CardId, Rarity};
///
/// let redd = CardDefinition::new(CardId::new(1), "REDD", Rarity::Rare)
///     .with_value(12)
///     .with_artwork("art/redd.png");
///
/// assert_eq!(redd.value, 12);
/// assert_eq!(redd.artwork, "art/redd.png");
/// ```
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct CardDefinition {
    /// Unique identifier for this card definition.
    pub id: CardId,

    /// Display name. Finish override rules match on it.
    pub name: String,

    /// Rarity tier used for pool partitioning.
    pub rarity: Rarity,

    /// Opaque artwork identifier resolved by the presentation layer.
    #[serde(default)]
    pub artwork: String,

    /// Flavor text.
    #[serde(default)]
    pub description: String,

    /// Game value of the card.
    #[serde(default)]
    pub value: i64,
}

impl CardDefinition {
    /// Create a new card definition with empty artwork and zero value.
    #[must_use]
    pub fn new(id: CardId, name: impl Into<String>, rarity: Rarity) -> Self {
        Self {
            id,
            name: name.into(),
            rarity,
            artwork: String::new(),
            description: String::new(),
            value: 0,
        }
    }

    /// Set the artwork reference (builder pattern).
    #[must_use]
    pub fn with_artwork(mut self, artwork: impl Into<String>) -> Self {
        self.artwork = artwork.into();
        self
    }

    /// Set the description (builder pattern).
    #[must_use]
    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = description.into();
        self
    }

    /// Set the value (builder pattern).
    #[must_use]
    pub fn with_value(mut self, value: i64) -> Self {
        self.value = value;
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_card_id() {
        let id = CardId::new(42);
        assert_eq!(id.raw(), 42);
        assert_eq!(format!("{}", id), "Card(42)");
    }

    #[test]
    fn test_rarity_index_matches_all() {
        for (i, rarity) in Rarity::ALL.iter().enumerate() {
            assert_eq!(rarity.index(), i);
        }
        assert!(Rarity::Common < Rarity::Ultra);
        assert_eq!(Rarity::Uncommon.to_string(), "Uncommon");
    }

    #[test]
    fn test_card_definition_builder() {
        let card = CardDefinition::new(CardId::new(1), "Test Card", Rarity::Uncommon)
            .with_value(3)
            .with_artwork("art/test")
            .with_description("A test card");

        assert_eq!(card.name, "Test Card");
        assert_eq!(card.rarity, Rarity::Uncommon);
        assert_eq!(card.value, 3);
        assert_eq!(card.artwork, "art/test");
        assert_eq!(card.description, "A test card");
    }

    #[test]
    fn test_card_definition_serialization() {
        let card = CardDefinition::new(CardId::new(1), "Test", Rarity::Ultra).with_value(2);

        let json = serde_json::to_string(&card).unwrap();
        let deserialized: CardDefinition = serde_json::from_str(&json).unwrap();

        assert_eq!(card, deserialized);
    }

    #[test]
    fn test_card_definition_optional_fields_default() {
        let json = r#"{"id":7,"name":"Bare","rarity":"Common"}"#;
        let card: CardDefinition = serde_json::from_str(json).unwrap();

        assert_eq!(card.id, CardId::new(7));
        assert_eq!(card.value, 0);
        assert!(card.artwork.is_empty());
    }
}
