//! Value types derived from the statistics and criteria sections of a response.

use serde::{Deserialize, Serialize};

/// Facet id that selects every available facet
pub const ALL_FACETS: &str = "all";

/// A facet available for refining the current search
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Facet {
    /// Facet identifier (e.g. "SourceType")
    pub id: String,

    /// Display label
    pub label: String,

    /// Values in provider order
    pub values: Vec<FacetValue>,
}

impl Facet {
    /// Total hits across all values of this facet
    pub fn total_hits(&self) -> u64 {
        self.values.iter().map(|v| v.hit_count).sum()
    }
}

/// One selectable value of a [`Facet`]
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FacetValue {
    pub value: String,
    pub hit_count: u64,

    /// Action token that applies this value as a filter
    pub action: String,
}

/// Hit statistics for one searched database
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DatabaseStat {
    /// Database code as reported by the provider
    pub code: String,

    pub hit_count: u64,

    /// Label from the label table, or the provider's own label
    pub label: String,
}

/// Publication date range available for the search
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DateRange {
    /// Earliest date (e.g. "1501-01")
    pub min_date: String,

    /// Latest date (e.g. "2018-04")
    pub max_date: String,

    pub min_year: String,
    pub max_year: String,
}

impl DateRange {
    /// Build a range, taking the year from the first four characters of each date
    pub fn new(min_date: impl Into<String>, max_date: impl Into<String>) -> Self {
        let min_date = min_date.into();
        let max_date = max_date.into();
        Self {
            min_year: year_of(&min_date),
            max_year: year_of(&max_date),
            min_date,
            max_date,
        }
    }
}

fn year_of(date: &str) -> String {
    date.chars().take(4).collect()
}
