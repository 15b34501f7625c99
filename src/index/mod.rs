//! Index layer implementation
//!
//! Ordered per-attribute indexes and the range index that combines them

pub mod attribute;
pub mod builder;
mod range_index;

pub use attribute::AttributeIndex;
pub use builder::LoadReport;
pub use range_index::{AttributeStats, IndexStats, QueryProfile, RangeIndex};
