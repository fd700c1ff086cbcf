//! Weighted random selection.
//!
//! Inverse-transform sampling over an ordered list of `(label, weight)`
//! records: draw `r` uniformly in `[0, total)`, walk the records in
//! insertion order accumulating weights, and return the first record
//! whose running sum reaches `r`. Records with zero weight are never
//! returned. Ties at a boundary go to the earlier record, so a seeded
//! `HandRng` always reproduces the same labels.
//!
//! ```
//! use card_hand::core::HandRng;
//! use card_hand::sampling::{WeightRecord, WeightTable};
//!
//! let table = WeightTable::new(vec![
//!     WeightRecord::new("heads", 1.0),
//!     WeightRecord::new("tails", 1.0),
//! ]).unwrap();
//!
//! assert_eq!(*table.pick_at(0.5), "heads");
//! assert_eq!(*table.pick_at(1.5), "tails");
//!
//! let mut rng = HandRng::new(42);
//! let label = table.sample(&mut rng);
//! assert!(*label == "heads" || *label == "tails");
//! ```

use serde::{Deserialize, Serialize};
use std::fmt::Debug;

use crate::core::{HandError, HandResult, HandRng};

/// One entry of a weight table.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct WeightRecord<T> {
    pub label: T,
    pub weight: f64,
}

impl<T> WeightRecord<T> {
    #[must_use]
    pub fn new(label: T, weight: f64) -> Self {
        Self { label, weight }
    }
}

/// Check every weight is finite and non-negative and return the total.
///
/// Fails with `EmptyDistribution` when the records are empty or sum to zero,
/// and with `InvalidConfig` when finite weights sum past `f64::MAX`.
pub fn validate_weights<T: Debug>(records: &[WeightRecord<T>]) -> HandResult<f64> {
    let mut total = 0.0;
    for record in records {
        if !record.weight.is_finite() || record.weight < 0.0 {
            return Err(HandError::InvalidWeight {
                label: format!("{:?}", record.label),
                weight: record.weight,
            });
        }
        total += record.weight;
    }
    if total <= 0.0 {
        return Err(HandError::EmptyDistribution);
    }
    if !total.is_finite() {
        return Err(HandError::InvalidConfig(format!(
            "weights of {} records overflow their total",
            records.len()
        )));
    }
    Ok(total)
}

/// Draw one label straight from a record slice.
///
/// Validates on every call; build a [`WeightTable`] once when the same
/// records are sampled repeatedly.
pub fn sample_weighted<'a, T: Debug>(
    records: &'a [WeightRecord<T>],
    rng: &mut HandRng,
) -> HandResult<&'a T> {
    let total = validate_weights(records)?;
    let roll = rng.gen_unit() * total;
    pick_cumulative(records, roll).ok_or(HandError::EmptyDistribution)
}

fn pick_cumulative<T>(records: &[WeightRecord<T>], roll: f64) -> Option<&T> {
    let mut cumulative = 0.0;
    let mut last_positive = None;

    for record in records {
        if record.weight <= 0.0 {
            continue;
        }
        cumulative += record.weight;
        last_positive = Some(&record.label);
        if cumulative >= roll {
            return last_positive;
        }
    }

    // Rounding can leave the final running sum a hair below the roll.
    last_positive
}

/// A validated weight table with its total precomputed.
///
/// Construction fails the same way sampling an invalid table would, so
/// configuration mistakes surface before the first draw.
#[derive(Clone, Debug, PartialEq)]
pub struct WeightTable<T> {
    records: Vec<WeightRecord<T>>,
    total: f64,
}

impl<T: Debug> WeightTable<T> {
    /// Build a table, rejecting negative, non-finite or all-zero weights.
    pub fn new(records: Vec<WeightRecord<T>>) -> HandResult<Self> {
        let total = validate_weights(&records)?;
        Ok(Self { records, total })
    }

    /// Sum of all weights.
    #[must_use]
    pub fn total(&self) -> f64 {
        self.total
    }

    /// Records in insertion order.
    #[must_use]
    pub fn records(&self) -> &[WeightRecord<T>] {
        &self.records
    }

    /// Probability of drawing `label`, summed over every record carrying it.
    #[must_use]
    pub fn probability(&self, label: &T) -> f64
    where
        T: PartialEq,
    {
        let weight: f64 = self
            .records
            .iter()
            .filter(|r| &r.label == label)
            .map(|r| r.weight)
            .sum();
        weight / self.total
    }

    /// Resolve a roll in `[0, total)` to a label.
    ///
    /// Out-of-range rolls are clamped to the nearest end of the table.
    #[must_use]
    pub fn pick_at(&self, roll: f64) -> &T {
        let roll = if roll.is_nan() { 0.0 } else { roll.clamp(0.0, self.total) };
        match pick_cumulative(&self.records, roll) {
            Some(label) => label,
            // A validated table always holds a positive record.
            None => &self.records[0].label,
        }
    }

    /// Draw one label.
    pub fn sample(&self, rng: &mut HandRng) -> &T {
        let roll = rng.gen_unit() * self.total;
        self.pick_at(roll)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn abc() -> WeightTable<char> {
        WeightTable::new(vec![
            WeightRecord::new('a', 1.0),
            WeightRecord::new('b', 2.0),
            WeightRecord::new('c', 1.0),
        ])
        .unwrap()
    }

    #[test]
    fn test_pick_at_walks_cumulative_sums() {
        let table = abc();

        assert_eq!(*table.pick_at(0.0), 'a');
        assert_eq!(*table.pick_at(0.5), 'a');
        assert_eq!(*table.pick_at(1.5), 'b');
        assert_eq!(*table.pick_at(3.5), 'c');
    }

    #[test]
    fn test_boundary_goes_to_earlier_record() {
        let table = abc();

        assert_eq!(*table.pick_at(1.0), 'a');
        assert_eq!(*table.pick_at(3.0), 'b');
    }

    #[test]
    fn test_zero_weight_never_picked() {
        let table = WeightTable::new(vec![
            WeightRecord::new('z', 0.0),
            WeightRecord::new('a', 1.0),
            WeightRecord::new('y', 0.0),
        ])
        .unwrap();

        assert_eq!(*table.pick_at(0.0), 'a');
        assert_eq!(*table.pick_at(0.999), 'a');
        assert_eq!(*table.pick_at(1.0), 'a');
    }

    #[test]
    fn test_out_of_range_rolls_clamp() {
        let table = abc();

        assert_eq!(*table.pick_at(-5.0), 'a');
        assert_eq!(*table.pick_at(100.0), 'c');
        assert_eq!(*table.pick_at(f64::NAN), 'a');
    }

    #[test]
    fn test_empty_and_zero_tables_fail() {
        let empty: Vec<WeightRecord<char>> = vec![];
        assert_eq!(WeightTable::new(empty).unwrap_err(), HandError::EmptyDistribution);

        let zeros = vec![WeightRecord::new('a', 0.0), WeightRecord::new('b', 0.0)];
        assert_eq!(WeightTable::new(zeros).unwrap_err(), HandError::EmptyDistribution);
    }

    #[test]
    fn test_overflowing_total_rejected() {
        let huge = vec![
            WeightRecord::new('a', f64::MAX),
            WeightRecord::new('b', f64::MAX),
            WeightRecord::new('c', 1.0),
        ];

        assert!(matches!(validate_weights(&huge), Err(HandError::InvalidConfig(_))));
        assert!(matches!(WeightTable::new(huge.clone()), Err(HandError::InvalidConfig(_))));
        let mut rng = HandRng::new(3);
        assert!(sample_weighted(&huge, &mut rng).is_err());

        // A single maximal weight still has a finite total.
        let table = WeightTable::new(vec![WeightRecord::new('a', f64::MAX), WeightRecord::new('b', 0.0)])
            .unwrap();
        assert_eq!(*table.sample(&mut rng), 'a');
    }

    #[test]
    fn test_negative_weight_rejected() {
        let err = WeightTable::new(vec![WeightRecord::new('a', 2.0), WeightRecord::new('b', -1.0)])
            .unwrap_err();

        assert_eq!(
            err,
            HandError::InvalidWeight {
                label: "'b'".to_string(),
                weight: -1.0
            }
        );
    }

    #[test]
    fn test_probability() {
        let table = abc();

        assert_eq!(table.total(), 4.0);
        assert_eq!(table.probability(&'b'), 0.5);
        assert_eq!(table.probability(&'x'), 0.0);
    }

    #[test]
    fn test_sample_weighted_does_not_mutate_records() {
        let records = vec![WeightRecord::new(1u8, 3.0), WeightRecord::new(2u8, 1.0)];
        let before = records.clone();
        let mut rng = HandRng::new(9);

        for _ in 0..50 {
            sample_weighted(&records, &mut rng).unwrap();
        }

        assert_eq!(records, before);
    }

    #[test]
    fn test_sample_weighted_empty_fails() {
        let mut rng = HandRng::new(9);
        let records: Vec<WeightRecord<u8>> = vec![];

        assert_eq!(
            sample_weighted(&records, &mut rng).unwrap_err(),
            HandError::EmptyDistribution
        );
    }
}
