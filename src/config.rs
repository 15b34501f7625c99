//! Index configuration
//!
//! Options are plain values: build them once at startup (in code or from
//! JSON) and pass them by reference to the index.

use crate::Result;
use serde::{Deserialize, Serialize};

/// What a search with no ranges returns
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum UnfilteredQuery {
    /// No restriction: every stored record matches
    #[default]
    All,

    /// No ranges means nothing was asked for: empty result
    Nothing,
}

/// How bulk load reacts to a rejected record
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum LoadPolicy {
    /// Stop at the first rejected record and return its error
    #[default]
    Abort,

    /// Log the rejected record, note it in the report and keep going
    Skip,
}

/// Range index options
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct IndexOptions {
    /// Accept an insert whose id is already stored. The new record replaces
    /// the old one and the old attribute entries are dropped.
    pub allow_duplicates: bool,

    /// Result of a search without any range
    pub unfiltered: UnfilteredQuery,

    /// Bulk-load behaviour on rejected records
    pub load_policy: LoadPolicy,
}

impl Default for IndexOptions {
    fn default() -> Self {
        Self {
            allow_duplicates: false,
            unfiltered: UnfilteredQuery::All,
            load_policy: LoadPolicy::Abort,
        }
    }
}

impl IndexOptions {
    /// Reject duplicates and abort bulk load on the first bad record
    pub fn strict() -> Self {
        Self::default()
    }

    /// Let later records replace earlier ones and skip invalid records
    pub fn lenient() -> Self {
        Self {
            allow_duplicates: true,
            load_policy: LoadPolicy::Skip,
            ..Default::default()
        }
    }

    pub fn with_allow_duplicates(mut self, allow: bool) -> Self {
        self.allow_duplicates = allow;
        self
    }

    pub fn with_unfiltered(mut self, unfiltered: UnfilteredQuery) -> Self {
        self.unfiltered = unfiltered;
        self
    }

    pub fn with_load_policy(mut self, policy: LoadPolicy) -> Self {
        self.load_policy = policy;
        self
    }

    /// Parse options from JSON; missing fields take their defaults
    pub fn from_json(json: &str) -> Result<Self> {
        Ok(serde_json::from_str(json)?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_is_strict() {
        let opts = IndexOptions::default();
        assert!(!opts.allow_duplicates);
        assert_eq!(opts.unfiltered, UnfilteredQuery::All);
        assert_eq!(opts.load_policy, LoadPolicy::Abort);
        assert_eq!(opts, IndexOptions::strict());
    }

    #[test]
    fn test_lenient() {
        let opts = IndexOptions::lenient();
        assert!(opts.allow_duplicates);
        assert_eq!(opts.load_policy, LoadPolicy::Skip);
    }

    #[test]
    fn test_from_json_partial() {
        let opts = IndexOptions::from_json(r#"{"unfiltered": "nothing"}"#).unwrap();
        assert_eq!(opts.unfiltered, UnfilteredQuery::Nothing);
        assert!(!opts.allow_duplicates);

        assert!(IndexOptions::from_json("{not json").is_err());
    }
}
