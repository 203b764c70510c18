//! Serializable snapshot of a result set.

use serde::{Deserialize, Serialize};

use super::{DatabaseStat, DateRange, Facet, Record};

/// Condensed view of a single record
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RecordSummary {
    pub id: Option<String>,
    pub title: Option<String>,
    pub database: Option<String>,
    pub publication_type: Option<String>,
    pub full_text: bool,
}

impl From<&Record> for RecordSummary {
    fn from(record: &Record) -> Self {
        Self {
            id: record.id(),
            title: record.title.clone(),
            database: record
                .database_label
                .clone()
                .or_else(|| record.database_id.clone()),
            publication_type: record.publication_type.clone(),
            full_text: record.full_text_available,
        }
    }
}

/// Every derived view of a result set in one value.
///
/// Views that require sections a partial document may lack are `None`
/// instead of failing the whole summary.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ResultSummary {
    pub total_hits: u64,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub search_time_ms: Option<u64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub page_number: Option<u64>,
    pub records: Vec<RecordSummary>,
    pub research_starters: Vec<RecordSummary>,
    pub publication_matches: Vec<RecordSummary>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub databases: Option<Vec<DatabaseStat>>,
    pub facets: Vec<Facet>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub date_range: Option<DateRange>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub did_you_mean: Option<String>,
    pub search_terms: Vec<String>,
}
