//! Record and query types for the property index

mod property;
mod range;
mod spatial;

pub use property::Property;
pub use range::{AttrRange, Attribute, Search};
pub use spatial::Coordinates;

/// Property identifier (unique within an index)
pub type PropertyId = i64;

/// Set of property ids produced by a range scan or an intersection
pub type IdSet = ahash::AHashSet<PropertyId>;
