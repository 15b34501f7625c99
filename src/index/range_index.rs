//! Range Index - multi-attribute range queries over property records
//!
//! ## Layout
//! - Primary store: `id → Property`, the only owner of records
//! - One `AttributeIndex` per indexed attribute (x, y, year), holding ids
//!
//! Attribute entries never point into the store; a query collects ids from
//! the attribute scans, intersects them and resolves the survivors by id.
//!
//! ## Concurrency
//! Build first, then read. `insert` needs `&mut self` while every query takes
//! `&self`, and the index is `Send + Sync`, so a finished index can be shared
//! as `Arc<RangeIndex>` between reader threads without locking.

use super::attribute::AttributeIndex;
use crate::config::{IndexOptions, UnfilteredQuery};
use crate::types::{AttrRange, Attribute, IdSet, Property, PropertyId, Search};
use crate::{IndexError, Result};
use ahash::AHashMap;
use std::time::Instant;

/// Query performance profile
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct QueryProfile {
    pub scan_time_us: u64,
    pub intersect_time_us: u64,
    pub resolve_time_us: u64,
    pub total_time_us: u64,
    /// Candidate ids per specified range, in x, y, year order
    pub candidates: Vec<(Attribute, usize)>,
    /// Ids left after intersection
    pub matched_ids: usize,
    /// Matched ids with no stored record (skipped)
    pub dangling_ids: usize,
    pub total_results: usize,
}

/// Per-attribute index statistics
#[derive(Debug, Clone, PartialEq)]
pub struct AttributeStats {
    pub attribute: Attribute,
    pub entries: usize,
    pub min_value: Option<f64>,
    pub max_value: Option<f64>,
}

/// Index statistics
#[derive(Debug, Clone, PartialEq)]
pub struct IndexStats {
    pub records: usize,
    pub attributes: Vec<AttributeStats>,
}

/// In-memory range index over property records
#[derive(Debug, Clone)]
pub struct RangeIndex {
    options: IndexOptions,
    records: AHashMap<PropertyId, Property>,
    x_index: AttributeIndex,
    y_index: AttributeIndex,
    year_index: AttributeIndex,
}

impl Default for RangeIndex {
    fn default() -> Self {
        Self::new(IndexOptions::default())
    }
}

impl RangeIndex {
    pub fn new(options: IndexOptions) -> Self {
        Self {
            options,
            records: AHashMap::new(),
            x_index: AttributeIndex::new(Attribute::X),
            y_index: AttributeIndex::new(Attribute::Y),
            year_index: AttributeIndex::new(Attribute::Year),
        }
    }

    pub fn options(&self) -> &IndexOptions {
        &self.options
    }

    /// Attribute index backing `attribute`
    pub fn attribute_index(&self, attribute: Attribute) -> &AttributeIndex {
        match attribute {
            Attribute::X => &self.x_index,
            Attribute::Y => &self.y_index,
            Attribute::Year => &self.year_index,
        }
    }

    fn attribute_index_mut(&mut self, attribute: Attribute) -> &mut AttributeIndex {
        match attribute {
            Attribute::X => &mut self.x_index,
            Attribute::Y => &mut self.y_index,
            Attribute::Year => &mut self.year_index,
        }
    }

    /// Insert a record
    ///
    /// All validation happens before the first structure is touched, so a
    /// failed insert leaves the index unchanged.
    ///
    /// # Errors
    /// - `InvalidRecord` if a coordinate is NaN or infinite
    /// - `DuplicateId` if the id is stored and duplicates are not allowed
    pub fn insert(&mut self, property: Property) -> Result<()> {
        let id = property.id;

        if !property.coordinates.is_finite() {
            return Err(IndexError::InvalidRecord {
                id,
                reason: format!(
                    "non-finite coordinates ({}, {})",
                    property.coordinates.x, property.coordinates.y
                ),
            });
        }

        if self.records.contains_key(&id) {
            if !self.options.allow_duplicates {
                return Err(IndexError::DuplicateId(id));
            }
            if let Some(old) = self.records.remove(&id) {
                for attr in Attribute::ALL {
                    self.attribute_index_mut(attr).remove(attr.value_of(&old), id);
                }
            }
        }

        for attr in Attribute::ALL {
            let value = attr.value_of(&property);
            self.attribute_index_mut(attr).insert(value, id);
        }
        self.records.insert(id, property);

        Ok(())
    }

    /// Ids whose `attribute` value lies in `[lo, hi)`
    ///
    /// `lo >= hi` or a non-finite bound yields an empty set.
    pub fn record_ids_in_range(&self, attribute: Attribute, lo: f64, hi: f64) -> IdSet {
        self.attribute_index(attribute)
            .ids_in_range(AttrRange::new(lo, hi))
    }

    /// Records matching every range in `search`, in ascending id order
    pub fn query(&self, search: &Search) -> Vec<&Property> {
        self.query_with_profile(search).0
    }

    /// Ids matching every range in `search`, in ascending order
    ///
    /// Only ids that resolve to a stored record are returned.
    pub fn query_ids(&self, search: &Search) -> Vec<PropertyId> {
        self.query(search).into_iter().map(|p| p.id).collect()
    }

    /// Query with performance profiling
    pub fn query_with_profile(&self, search: &Search) -> (Vec<&Property>, QueryProfile) {
        let total_start = Instant::now();
        let mut profile = QueryProfile::default();

        // 1. Per-attribute candidate sets
        let scan_start = Instant::now();
        let candidates: Vec<IdSet> = search
            .ranges()
            .map(|(attr, range)| {
                let ids = self.attribute_index(attr).ids_in_range(range);
                profile.candidates.push((attr, ids.len()));
                ids
            })
            .collect();
        profile.scan_time_us = scan_start.elapsed().as_micros() as u64;

        // 2. Intersection (absent ranges do not restrict)
        let intersect_start = Instant::now();
        let mut ids: Vec<PropertyId> = match intersect_all(candidates) {
            Some(ids) => ids.into_iter().collect(),
            None => match self.options.unfiltered {
                UnfilteredQuery::All => self.records.keys().copied().collect(),
                UnfilteredQuery::Nothing => Vec::new(),
            },
        };
        ids.sort_unstable();
        profile.matched_ids = ids.len();
        profile.intersect_time_us = intersect_start.elapsed().as_micros() as u64;

        // 3. Resolve ids against the primary store
        let resolve_start = Instant::now();
        let mut results = Vec::with_capacity(ids.len());
        for id in ids {
            match self.records.get(&id) {
                Some(property) => results.push(property),
                None => {
                    profile.dangling_ids += 1;
                    tracing::warn!(id, "property not found, skipping dangling id");
                }
            }
        }
        profile.resolve_time_us = resolve_start.elapsed().as_micros() as u64;

        profile.total_results = results.len();
        profile.total_time_us = total_start.elapsed().as_micros() as u64;

        (results, profile)
    }

    pub fn get(&self, id: PropertyId) -> Option<&Property> {
        self.records.get(&id)
    }

    pub fn contains(&self, id: PropertyId) -> bool {
        self.records.contains_key(&id)
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    /// All records in ascending id order
    pub fn iter(&self) -> impl Iterator<Item = &Property> {
        let mut records: Vec<&Property> = self.records.values().collect();
        records.sort_unstable_by_key(|p| p.id);
        records.into_iter()
    }

    pub fn stats(&self) -> IndexStats {
        IndexStats {
            records: self.records.len(),
            attributes: Attribute::ALL
                .into_iter()
                .map(|attr| {
                    let index = self.attribute_index(attr);
                    AttributeStats {
                        attribute: attr,
                        entries: index.len(),
                        min_value: index.min_value(),
                        max_value: index.max_value(),
                    }
                })
                .collect(),
        }
    }

    /// Verify that the store and the attribute indexes agree
    ///
    /// Every attribute entry must name a stored record with that exact value,
    /// and every stored record must have one entry per attribute.
    pub fn check_consistency(&self) -> Result<()> {
        for attr in Attribute::ALL {
            let index = self.attribute_index(attr);

            for (value, id) in index.iter() {
                let property = self.records.get(&id).ok_or_else(|| {
                    IndexError::Inconsistent(format!("{} entry for unknown id {}", attr, id))
                })?;
                if attr.value_of(property) != value {
                    return Err(IndexError::Inconsistent(format!(
                        "{} entry {} for id {} does not match stored value {}",
                        attr,
                        value,
                        id,
                        attr.value_of(property)
                    )));
                }
            }

            for property in self.records.values() {
                if !index.contains(attr.value_of(property), property.id) {
                    return Err(IndexError::Inconsistent(format!(
                        "id {} missing from {} index",
                        property.id, attr
                    )));
                }
            }

            if index.len() != self.records.len() {
                return Err(IndexError::Inconsistent(format!(
                    "{} index has {} entries for {} records",
                    attr,
                    index.len(),
                    self.records.len()
                )));
            }
        }

        Ok(())
    }

    /// Drop a record from the primary store only, leaving its attribute
    /// entries behind
    #[cfg(test)]
    pub(crate) fn detach_record(&mut self, id: PropertyId) -> Option<Property> {
        self.records.remove(&id)
    }
}

/// Intersect candidate sets, smallest first
///
/// Returns `None` when there is nothing to intersect.
fn intersect_all(mut sets: Vec<IdSet>) -> Option<IdSet> {
    sets.sort_by_key(|s| s.len());
    let mut sets = sets.into_iter();
    let mut acc = sets.next()?;

    for set in sets {
        if acc.is_empty() {
            break;
        }
        acc = intersect(acc, &set);
    }

    Some(acc)
}

/// Two-way intersection, iterating the smaller set and probing the larger
fn intersect(left: IdSet, right: &IdSet) -> IdSet {
    if left.len() <= right.len() {
        left.into_iter().filter(|id| right.contains(id)).collect()
    } else {
        right.iter().copied().filter(|id| left.contains(id)).collect()
    }
}
