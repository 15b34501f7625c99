//! Attribute Index - ordered multi-map from attribute value to property ids
//!
//! Keys are composite `(value, id)` pairs kept in a `BTreeSet`, so:
//! - many properties may share one value (duplicate keys)
//! - a half-open range scan is a single ordered walk, O(log N + K)

use crate::types::{AttrRange, Attribute, IdSet, PropertyId};
use std::cmp::Ordering;
use std::collections::BTreeSet;

/// Composite key: (attribute value, property id)
#[derive(Debug, Clone, Copy)]
struct IndexKey {
    value: f64,
    id: PropertyId,
}

impl IndexKey {
    fn new(value: f64, id: PropertyId) -> Self {
        Self {
            value: normalize(value),
            id,
        }
    }

    /// Smallest key carrying `value`
    fn lower(value: f64) -> Self {
        Self::new(value, PropertyId::MIN)
    }
}

/// `total_cmp` orders -0.0 before 0.0; fold both into 0.0
fn normalize(value: f64) -> f64 {
    if value == 0.0 {
        0.0
    } else {
        value
    }
}

impl PartialEq for IndexKey {
    fn eq(&self, other: &Self) -> bool {
        self.cmp(other) == Ordering::Equal
    }
}

impl Eq for IndexKey {}

impl PartialOrd for IndexKey {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for IndexKey {
    fn cmp(&self, other: &Self) -> Ordering {
        self.value
            .total_cmp(&other.value)
            .then(self.id.cmp(&other.id))
    }
}

/// Ordered index over one attribute
///
/// Only finite values may be inserted; the owning index validates records
/// before they get here.
#[derive(Debug, Clone)]
pub struct AttributeIndex {
    attribute: Attribute,
    entries: BTreeSet<IndexKey>,
}

impl AttributeIndex {
    pub fn new(attribute: Attribute) -> Self {
        Self {
            attribute,
            entries: BTreeSet::new(),
        }
    }

    pub fn attribute(&self) -> Attribute {
        self.attribute
    }

    /// Insert a value → id mapping. Returns false if it was already present.
    pub(crate) fn insert(&mut self, value: f64, id: PropertyId) -> bool {
        debug_assert!(value.is_finite(), "non-finite {} value", self.attribute);
        self.entries.insert(IndexKey::new(value, id))
    }

    /// Remove a value → id mapping. Returns false if it was not present.
    pub(crate) fn remove(&mut self, value: f64, id: PropertyId) -> bool {
        self.entries.remove(&IndexKey::new(value, id))
    }

    pub fn contains(&self, value: f64, id: PropertyId) -> bool {
        self.entries.contains(&IndexKey::new(value, id))
    }

    /// Ordered scan of `[lo, hi)`, yielding (value, id) in ascending value order
    ///
    /// Empty and malformed ranges yield nothing; the underlying tree is never
    /// asked for a backward range.
    pub fn scan(&self, range: AttrRange) -> impl Iterator<Item = (f64, PropertyId)> + '_ {
        let bounds = if range.is_empty() {
            None
        } else {
            Some(IndexKey::lower(range.lo)..IndexKey::lower(range.hi))
        };

        bounds
            .into_iter()
            .flat_map(move |b| self.entries.range(b))
            .map(|key| (key.value, key.id))
    }

    /// Unique ids whose value lies in `[lo, hi)`
    pub fn ids_in_range(&self, range: AttrRange) -> IdSet {
        self.scan(range).map(|(_, id)| id).collect()
    }

    /// All entries in ascending value order
    pub fn iter(&self) -> impl Iterator<Item = (f64, PropertyId)> + '_ {
        self.entries.iter().map(|key| (key.value, key.id))
    }

    pub fn min_value(&self) -> Option<f64> {
        self.entries.first().map(|key| key.value)
    }

    pub fn max_value(&self) -> Option<f64> {
        self.entries.last().map(|key| key.value)
    }

    /// Number of (value, id) entries
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sorted(ids: IdSet) -> Vec<PropertyId> {
        let mut v: Vec<_> = ids.into_iter().collect();
        v.sort_unstable();
        v
    }

    #[test]
    fn test_duplicate_keys() {
        let mut index = AttributeIndex::new(Attribute::Year);
        index.insert(1990.0, 1);
        index.insert(1990.0, 3);
        index.insert(2001.0, 2);

        assert_eq!(index.len(), 3);
        assert_eq!(sorted(index.ids_in_range((1990, 1991).into())), vec![1, 3]);
        assert_eq!(sorted(index.ids_in_range((1990, 2002).into())), vec![1, 2, 3]);
    }

    #[test]
    fn test_half_open_bounds() {
        let mut index = AttributeIndex::new(Attribute::X);
        index.insert(5.0, 1);

        assert_eq!(sorted(index.ids_in_range((5, 10).into())), vec![1]);
        assert!(index.ids_in_range((0, 5).into()).is_empty());
        assert!(index.ids_in_range((0.0, 4.9999).into()).is_empty());
    }

    #[test]
    fn test_fractional_values_with_integer_bounds() {
        let mut index = AttributeIndex::new(Attribute::X);
        index.insert(4.5, 1);
        index.insert(5.5, 2);

        // bounds are real-valued, stored values are never truncated
        assert_eq!(sorted(index.ids_in_range((4, 5).into())), vec![1]);
        assert_eq!(sorted(index.ids_in_range((5, 6).into())), vec![2]);
    }

    #[test]
    fn test_empty_and_backward_ranges() {
        let mut index = AttributeIndex::new(Attribute::Y);
        for (i, v) in [1.0, 2.0, 3.0].into_iter().enumerate() {
            index.insert(v, i as PropertyId);
        }

        assert!(index.ids_in_range((2, 2).into()).is_empty());
        assert!(index.ids_in_range((3, 1).into()).is_empty());
        assert!(index.ids_in_range((f64::NAN, 3.0).into()).is_empty());
        assert!(index.ids_in_range((0.0, f64::INFINITY).into()).is_empty());
    }

    #[test]
    fn test_negative_zero() {
        let mut index = AttributeIndex::new(Attribute::X);
        index.insert(-0.0, 1);

        assert_eq!(sorted(index.ids_in_range((0.0, 1.0).into())), vec![1]);
        assert!(index.ids_in_range((-1.0, -0.0).into()).is_empty());
    }

    #[test]
    fn test_scan_is_ordered() {
        let mut index = AttributeIndex::new(Attribute::X);
        index.insert(3.0, 10);
        index.insert(-1.0, 20);
        index.insert(3.0, 5);
        index.insert(2.0, 30);

        let scanned: Vec<_> = index.scan((-10, 10).into()).collect();
        assert_eq!(scanned, vec![(-1.0, 20), (2.0, 30), (3.0, 5), (3.0, 10)]);
        assert_eq!(index.min_value(), Some(-1.0));
        assert_eq!(index.max_value(), Some(3.0));
    }

    #[test]
    fn test_remove() {
        let mut index = AttributeIndex::new(Attribute::Y);
        assert!(index.insert(1.0, 1));
        assert!(!index.insert(1.0, 1));
        assert!(index.remove(1.0, 1));
        assert!(!index.remove(1.0, 1));
        assert!(index.is_empty());
    }
}
