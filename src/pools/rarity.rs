//! Rarity-partitioned card pools.
//!
//! `RarityPoolIndex` splits the card collection into one bucket per rarity
//! once, when the pools are populated. Draws never rescan the collection.
//!
//! Buckets are `im::Vector`s, so cloning an index (for a what-if roll or a
//! second engine over the same deck) is O(1).
//!
//! ## Fallback
//!
//! A rarity-weighted draw can land on an empty bucket when the deck is
//! thin. `pick_random` then walks a fixed fallback order and picks from the
//! first non-empty bucket, so a slot is only left empty when every bucket
//! it may draw from is empty.

use im::Vector;

use crate::cards::{CardDefinition, CardId, CardRegistry, Rarity};
use crate::core::{HandError, HandResult, HandRng};

/// Outcome of a pool draw.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct PoolPick {
    /// The definition chosen.
    pub card: CardId,
    /// The rarity that was asked for.
    pub requested: Rarity,
    /// The bucket the card actually came from.
    pub drawn_from: Rarity,
}

impl PoolPick {
    /// Did the draw have to fall back to another bucket?
    #[must_use]
    pub fn used_fallback(&self) -> bool {
        self.requested != self.drawn_from
    }
}

/// Card ids partitioned by rarity, in load order.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct RarityPoolIndex {
    buckets: [Vector<CardId>; 4],
}

impl RarityPoolIndex {
    /// Partition every definition in the registry.
    #[must_use]
    pub fn build(registry: &CardRegistry) -> Self {
        let mut buckets: [Vector<CardId>; 4] = Default::default();
        for card in registry.iter() {
            buckets[card.rarity.index()].push_back(card.id);
        }
        Self { buckets }
    }

    /// Ids of all cards of one rarity, in load order. May be empty.
    ///
    /// Buckets hold ids rather than definitions; resolve them through the
    /// registry the index was built from, or use [`Self::definitions`].
    #[must_use]
    pub fn bucket(&self, rarity: Rarity) -> &Vector<CardId> {
        &self.buckets[rarity.index()]
    }

    /// Definitions of all cards of one rarity, in load order.
    ///
    /// Ids missing from `registry` are skipped, so pass the registry the
    /// index was built from.
    pub fn definitions<'a>(
        &'a self,
        rarity: Rarity,
        registry: &'a CardRegistry,
    ) -> impl Iterator<Item = &'a CardDefinition> + 'a {
        self.bucket(rarity).iter().filter_map(move |id| registry.get(*id))
    }

    /// Total number of pooled cards.
    #[must_use]
    pub fn len(&self) -> usize {
        self.buckets.iter().map(Vector::len).sum()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.buckets.iter().all(Vector::is_empty)
    }

    /// Pick uniformly from `rarity`'s bucket, or from the first non-empty
    /// bucket in `fallback_order` when that bucket is empty.
    ///
    /// Fails with `NoCardsAvailable` only when the requested bucket and
    /// every bucket in the fallback order are empty.
    pub fn pick_random(
        &self,
        rarity: Rarity,
        fallback_order: &[Rarity],
        rng: &mut HandRng,
    ) -> HandResult<PoolPick> {
        let source = std::iter::once(rarity)
            .chain(fallback_order.iter().copied())
            .find(|r| !self.bucket(*r).is_empty())
            .ok_or(HandError::NoCardsAvailable { requested: rarity })?;

        let bucket = self.bucket(source);
        let card = bucket[rng.gen_range_usize(0..bucket.len())];

        Ok(PoolPick {
            card,
            requested: rarity,
            drawn_from: source,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const FALLBACK: [Rarity; 4] = [Rarity::Common, Rarity::Uncommon, Rarity::Rare, Rarity::Ultra];

    fn registry(cards: &[(u32, Rarity)]) -> CardRegistry {
        CardRegistry::from_definitions(
            cards
                .iter()
                .map(|&(id, rarity)| CardDefinition::new(CardId::new(id), format!("card-{id}"), rarity)),
        )
        .unwrap()
    }

    #[test]
    fn test_build_partitions_in_order() {
        let index = RarityPoolIndex::build(&registry(&[
            (1, Rarity::Common),
            (2, Rarity::Rare),
            (3, Rarity::Common),
            (4, Rarity::Ultra),
        ]));

        let commons: Vec<_> = index.bucket(Rarity::Common).iter().copied().collect();
        assert_eq!(commons, vec![CardId::new(1), CardId::new(3)]);
        assert!(index.bucket(Rarity::Uncommon).is_empty());
        assert_eq!(index.bucket(Rarity::Rare).len(), 1);
        assert_eq!(index.len(), 4);
    }

    #[test]
    fn test_definitions_resolve_bucket() {
        let cards = registry(&[(7, Rarity::Rare), (2, Rarity::Common), (4, Rarity::Rare)]);
        let index = RarityPoolIndex::build(&cards);

        let rares: Vec<_> = index
            .definitions(Rarity::Rare, &cards)
            .map(|c| (c.id, c.rarity))
            .collect();
        assert_eq!(rares, vec![(CardId::new(7), Rarity::Rare), (CardId::new(4), Rarity::Rare)]);
        assert_eq!(index.definitions(Rarity::Ultra, &cards).count(), 0);
    }

    #[test]
    fn test_pick_from_requested_bucket() {
        let index = RarityPoolIndex::build(&registry(&[(1, Rarity::Common), (2, Rarity::Rare)]));
        let mut rng = HandRng::new(1);

        for _ in 0..20 {
            let pick = index.pick_random(Rarity::Rare, &FALLBACK, &mut rng).unwrap();
            assert_eq!(pick.card, CardId::new(2));
            assert!(!pick.used_fallback());
        }
    }

    #[test]
    fn test_fallback_walks_order() {
        let index = RarityPoolIndex::build(&registry(&[(1, Rarity::Uncommon), (2, Rarity::Ultra)]));
        let mut rng = HandRng::new(1);

        let pick = index.pick_random(Rarity::Rare, &FALLBACK, &mut rng).unwrap();
        assert_eq!(pick.drawn_from, Rarity::Uncommon);
        assert_eq!(pick.card, CardId::new(1));
        assert!(pick.used_fallback());

        let reversed = [Rarity::Ultra, Rarity::Rare, Rarity::Uncommon, Rarity::Common];
        let pick = index.pick_random(Rarity::Rare, &reversed, &mut rng).unwrap();
        assert_eq!(pick.drawn_from, Rarity::Ultra);
    }

    #[test]
    fn test_no_cards_available() {
        let index = RarityPoolIndex::build(&registry(&[(1, Rarity::Ultra)]));
        let mut rng = HandRng::new(1);

        // Ultra is outside the partial fallback order.
        let err = index
            .pick_random(Rarity::Common, &[Rarity::Uncommon, Rarity::Rare], &mut rng)
            .unwrap_err();
        assert_eq!(err, HandError::NoCardsAvailable { requested: Rarity::Common });

        let empty = RarityPoolIndex::default();
        assert!(empty.is_empty());
        assert!(empty.pick_random(Rarity::Ultra, &FALLBACK, &mut rng).is_err());
    }

    #[test]
    fn test_uniform_within_bucket() {
        let index = RarityPoolIndex::build(&registry(&[
            (1, Rarity::Common),
            (2, Rarity::Common),
            (3, Rarity::Common),
        ]));
        let mut rng = HandRng::new(5);
        let mut counts = [0usize; 3];

        for _ in 0..3000 {
            let pick = index.pick_random(Rarity::Common, &FALLBACK, &mut rng).unwrap();
            counts[(pick.card.raw() - 1) as usize] += 1;
        }

        for count in counts {
            assert!((800..1200).contains(&count), "counts: {:?}", counts);
        }
    }
}
