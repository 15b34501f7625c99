//! Bulk loading
//!
//! Records arrive from an external source (a flat file, an embedded table)
//! and are inserted one by one. The load policy in `IndexOptions` decides
//! whether a rejected record aborts the load or is skipped and reported.

use super::RangeIndex;
use crate::config::{IndexOptions, LoadPolicy};
use crate::types::{Property, PropertyId};
use crate::Result;
use std::time::Instant;

/// Bulk load statistics
#[derive(Debug, Default, Clone)]
pub struct LoadReport {
    /// Records that reached the index
    pub inserted: usize,

    /// Rejected records and the reason, in input order
    pub skipped: Vec<(PropertyId, String)>,

    /// Load time (milliseconds)
    pub load_time_ms: u64,
}

impl LoadReport {
    pub fn is_clean(&self) -> bool {
        self.skipped.is_empty()
    }
}

impl RangeIndex {
    /// Build an index from a sequence of records
    ///
    /// # Errors
    /// With `LoadPolicy::Abort`, the first insert error is returned and the
    /// partially built index is dropped.
    pub fn bulk_load<I>(records: I, options: &IndexOptions) -> Result<(RangeIndex, LoadReport)>
    where
        I: IntoIterator<Item = Property>,
    {
        let mut index = RangeIndex::new(options.clone());
        let report = index.extend_records(records)?;
        Ok((index, report))
    }

    /// Insert a sequence of records into this index
    pub fn extend_records<I>(&mut self, records: I) -> Result<LoadReport>
    where
        I: IntoIterator<Item = Property>,
    {
        let start = Instant::now();
        let mut report = LoadReport::default();

        for property in records {
            let id = property.id;
            match self.insert(property) {
                Ok(()) => report.inserted += 1,
                Err(e) => match self.options().load_policy {
                    LoadPolicy::Abort => return Err(e),
                    LoadPolicy::Skip => {
                        tracing::warn!(id, error = %e, "skipping rejected property");
                        report.skipped.push((id, e.to_string()));
                    }
                },
            }
        }

        report.load_time_ms = start.elapsed().as_millis() as u64;
        tracing::debug!(
            inserted = report.inserted,
            skipped = report.skipped.len(),
            records = self.len(),
            "bulk load finished"
        );

        Ok(report)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{IndexError, Search};

    fn records() -> Vec<Property> {
        vec![
            Property::at(1, 2.0, 2.0, 1990),
            Property::at(2, 4.0, 6.0, 2001),
            Property::at(1, 9.0, 9.0, 1950),
            Property::at(3, 8.0, 2.0, 1990),
        ]
    }

    #[test]
    fn test_bulk_load_abort() {
        let err = RangeIndex::bulk_load(records(), &IndexOptions::strict()).unwrap_err();
        assert!(matches!(err, IndexError::DuplicateId(1)));
    }

    #[test]
    fn test_bulk_load_skip() {
        let options = IndexOptions::strict().with_load_policy(LoadPolicy::Skip);
        let (index, report) = RangeIndex::bulk_load(records(), &options).unwrap();

        assert_eq!(report.inserted, 3);
        assert_eq!(report.skipped.len(), 1);
        assert_eq!(report.skipped[0].0, 1);
        assert!(!report.is_clean());

        // first record with the id wins
        assert_eq!(index.get(1), Some(&Property::at(1, 2.0, 2.0, 1990)));
        assert_eq!(index.query_ids(&Search::new().year((1990, 1991))), vec![1, 3]);
        index.check_consistency().unwrap();
    }

    #[test]
    fn test_bulk_load_lenient_replaces() {
        let (index, report) = RangeIndex::bulk_load(records(), &IndexOptions::lenient()).unwrap();

        assert!(report.is_clean());
        assert_eq!(report.inserted, 4);
        assert_eq!(index.len(), 3);
        assert_eq!(index.get(1), Some(&Property::at(1, 9.0, 9.0, 1950)));
        index.check_consistency().unwrap();
    }

    #[test]
    fn test_extend_records() {
        let (mut index, _) =
            RangeIndex::bulk_load(vec![Property::at(1, 0.0, 0.0, 2000)], &IndexOptions::strict())
                .unwrap();
        let report = index
            .extend_records(vec![Property::at(2, 1.0, 1.0, 2001)])
            .unwrap();

        assert_eq!(report.inserted, 1);
        assert_eq!(index.len(), 2);
    }
}
