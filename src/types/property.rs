//! Property record

use super::{Coordinates, PropertyId};
use serde::{Deserialize, Serialize};

/// A property record. Immutable once handed to the index.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Property {
    pub id: PropertyId,

    /// Street address (not indexed)
    #[serde(default)]
    pub address: String,

    /// Property class, e.g. "residential" (not indexed)
    #[serde(default)]
    pub class_type: String,

    pub year_built: i32,

    pub coordinates: Coordinates,
}

impl Property {
    pub fn new(
        id: PropertyId,
        address: impl Into<String>,
        class_type: impl Into<String>,
        year_built: i32,
        coordinates: Coordinates,
    ) -> Self {
        Self {
            id,
            address: address.into(),
            class_type: class_type.into(),
            year_built,
            coordinates,
        }
    }

    /// Bare record carrying only the indexed attributes
    pub fn at(id: PropertyId, x: f64, y: f64, year_built: i32) -> Self {
        Self::new(id, "", "", year_built, Coordinates::new(x, y))
    }
}
