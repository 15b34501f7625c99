//! Indexed attributes, half-open ranges and search requests

use super::Property;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Attribute of a property that has its own ordered index
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Attribute {
    X,
    Y,
    Year,
}

impl Attribute {
    pub const ALL: [Attribute; 3] = [Attribute::X, Attribute::Y, Attribute::Year];

    /// Indexed value of `property` for this attribute
    pub fn value_of(&self, property: &Property) -> f64 {
        match self {
            Attribute::X => property.coordinates.x,
            Attribute::Y => property.coordinates.y,
            Attribute::Year => f64::from(property.year_built),
        }
    }

    pub fn name(&self) -> &'static str {
        match self {
            Attribute::X => "x",
            Attribute::Y => "y",
            Attribute::Year => "year",
        }
    }
}

impl fmt::Display for Attribute {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Half-open range `[lo, hi)` over the real line
///
/// Integer bounds convert to `f64` exactly, so `(5, 10)` matches a stored
/// value of `5.0` and `9.999` but not `10.0`. A range with `lo >= hi` or a
/// non-finite bound is empty.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct AttrRange {
    pub lo: f64,
    pub hi: f64,
}

impl AttrRange {
    pub fn new(lo: f64, hi: f64) -> Self {
        Self { lo, hi }
    }

    pub fn is_empty(&self) -> bool {
        !(self.lo.is_finite() && self.hi.is_finite() && self.lo < self.hi)
    }

    pub fn contains(&self, value: f64) -> bool {
        self.lo <= value && value < self.hi
    }
}

impl From<(f64, f64)> for AttrRange {
    fn from((lo, hi): (f64, f64)) -> Self {
        Self::new(lo, hi)
    }
}

impl From<(i32, i32)> for AttrRange {
    fn from((lo, hi): (i32, i32)) -> Self {
        Self::new(f64::from(lo), f64::from(hi))
    }
}

/// Search request: up to one range per indexed attribute
///
/// # Example
/// ```
/// use property_index::Search;
///
/// let search = Search::new().x((0, 5)).y((0, 4));
/// assert_eq!(search.ranges().count(), 2);
/// ```
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct Search {
    #[serde(default)]
    pub x_range: Option<AttrRange>,
    #[serde(default)]
    pub y_range: Option<AttrRange>,
    #[serde(default)]
    pub year_range: Option<AttrRange>,
}

impl Search {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn x(mut self, range: impl Into<AttrRange>) -> Self {
        self.x_range = Some(range.into());
        self
    }

    pub fn y(mut self, range: impl Into<AttrRange>) -> Self {
        self.y_range = Some(range.into());
        self
    }

    pub fn year(mut self, range: impl Into<AttrRange>) -> Self {
        self.year_range = Some(range.into());
        self
    }

    pub fn range(&self, attribute: Attribute) -> Option<AttrRange> {
        match attribute {
            Attribute::X => self.x_range,
            Attribute::Y => self.y_range,
            Attribute::Year => self.year_range,
        }
    }

    /// Specified ranges in x, y, year order
    pub fn ranges(&self) -> impl Iterator<Item = (Attribute, AttrRange)> + '_ {
        Attribute::ALL
            .into_iter()
            .filter_map(move |attr| self.range(attr).map(|r| (attr, r)))
    }

    pub fn is_unfiltered(&self) -> bool {
        self.ranges().next().is_none()
    }

    /// Whether `property` satisfies every specified range
    pub fn matches(&self, property: &Property) -> bool {
        self.ranges()
            .all(|(attr, range)| !range.is_empty() && range.contains(attr.value_of(property)))
    }
}
