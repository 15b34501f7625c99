//! Property Index
//!
//! In-memory multi-attribute range index over property records.
//!
//! ## Core features
//! - Three ordered indexes (x, y, year built) with duplicate keys
//! - Half-open `[lo, hi)` range scans in O(log N + K)
//! - Multi-range queries answered by id-set intersection
//! - Build once, then share read-only between threads
//!
//! ## Quick start
//!
//! ```
//! use property_index::{IndexOptions, Property, RangeIndex, Search};
//!
//! let records = vec![
//!     Property::at(1, 2.0, 2.0, 1990),
//!     Property::at(2, 4.0, 6.0, 2001),
//!     Property::at(3, 8.0, 2.0, 1990),
//! ];
//! let (index, _report) = RangeIndex::bulk_load(records, &IndexOptions::default())?;
//!
//! let ids = index.query_ids(&Search::new().x((0, 5)).y((0, 4)));
//! assert_eq!(ids, vec![1]);
//! # Ok::<(), property_index::IndexError>(())
//! ```

pub mod config;
pub mod index;
pub mod loader;
pub mod types;

mod error;

pub use config::{IndexOptions, LoadPolicy, UnfilteredQuery};
pub use error::{IndexError, Result};
pub use index::{AttributeIndex, IndexStats, LoadReport, QueryProfile, RangeIndex};
pub use types::{AttrRange, Attribute, Coordinates, IdSet, Property, PropertyId, Search};
