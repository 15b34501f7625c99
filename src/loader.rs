//! Raw record definitions from JSON
//!
//! Accepts a JSON array of property objects:
//!
//! ```json
//! [
//!   {"id": 1, "address": "123 Main St", "class_type": "residential",
//!    "year_built": 2020, "coordinates": {"x": 43.073052, "y": -89.40123}}
//! ]
//! ```
//!
//! `address` and `class_type` may be omitted.

use crate::config::IndexOptions;
use crate::index::{LoadReport, RangeIndex};
use crate::types::Property;
use crate::Result;
use std::fs::File;
use std::io::{BufReader, Read};
use std::path::Path;

/// Parse records from a JSON string
pub fn parse_json(json: &str) -> Result<Vec<Property>> {
    Ok(serde_json::from_str(json)?)
}

/// Parse records from a reader
pub fn read_json<R: Read>(reader: R) -> Result<Vec<Property>> {
    Ok(serde_json::from_reader(reader)?)
}

/// Parse records from a JSON file
pub fn load_path<P: AsRef<Path>>(path: P) -> Result<Vec<Property>> {
    let file = File::open(path.as_ref())?;
    read_json(BufReader::new(file))
}

/// Parse a JSON file and bulk-load it into a new index
pub fn index_from_path<P: AsRef<Path>>(
    path: P,
    options: &IndexOptions,
) -> Result<(RangeIndex, LoadReport)> {
    let records = load_path(path.as_ref())?;
    tracing::debug!(path = %path.as_ref().display(), records = records.len(), "parsed property file");
    RangeIndex::bulk_load(records, options)
}
