//! Result set adapter over a raw search response document.
//!
//! [`ResultSet`] wraps the provider's response once and exposes read-only views
//! of it: statistics, facets, applied criteria, related content and spelling
//! suggestions.
//!
//! # Missing sections
//!
//! Accessors follow one of two policies:
//!
//! - **Defaulting** accessors ([`total_hits`](ResultSet::total_hits),
//!   [`facets`](ResultSet::facets), the `applied_*` lists,
//!   [`did_you_mean`](ResultSet::did_you_mean), [`search_terms`](ResultSet::search_terms))
//!   return an empty value when their section is absent.
//! - **Strict** accessors (the criteria echoes, [`total_search_time`](ResultSet::total_search_time),
//!   [`database_stats`](ResultSet::database_stats), [`date_range`](ResultSet::date_range))
//!   return [`ResultsError::MissingField`] because every executed search carries them.
//!
//! # Example
//!
//! ```rust
//! use eds_results::ResultSet;
//! use serde_json::json;
//!
//! let results: ResultSet = ResultSet::new(json!({
//!     "SearchResult": {
//!         "Statistics": {"TotalHits": 0, "TotalSearchTime": 12},
//!         "AutoSuggestedTerms": ["earthquake"]
//!     }
//! }))
//! .unwrap();
//!
//! assert_eq!(results.total_hits(), 0);
//! assert!(results.records().is_empty());
//! assert_eq!(results.did_you_mean(), Some("earthquake"));
//! ```

mod labels;
mod path;

pub use labels::{DatabaseLabels, DatabaseTable};
pub(crate) use path::as_count;

use serde_json::Value;
use std::io::Read;
use std::sync::Arc;

use crate::models::{
    DatabaseStat, DateRange, Facet, FacetValue, Record, RecordSummary, ResultSummary, ALL_FACETS,
};
use path::{array_or_empty, lookup, require, require_array, require_str, require_u64, str_field};

/// Related-content type of research starter entries
pub const RESEARCH_STARTER_TYPE: &str = "rs";

/// Related-content type of exact publication match entries
pub const PUBLICATION_MATCH_TYPE: &str = "emp";

const TOTAL_HITS: &[&str] = &["SearchResult", "Statistics", "TotalHits"];
const TOTAL_SEARCH_TIME: &[&str] = &["SearchResult", "Statistics", "TotalSearchTime"];
const DATABASES: &[&str] = &["SearchResult", "Statistics", "Databases"];
const RECORDS: &[&str] = &["SearchResult", "Data", "Records"];
const RELATED_RECORDS: &[&str] = &["SearchResult", "RelatedContent", "RelatedRecords"];
const RELATED_PUBLICATIONS: &[&str] = &["SearchResult", "RelatedContent", "RelatedPublications"];
const AVAILABLE_FACETS: &[&str] = &["SearchResult", "AvailableFacets"];
const MIN_DATE: &[&str] = &["SearchResult", "AvailableCriteria", "DateRange", "MinDate"];
const MAX_DATE: &[&str] = &["SearchResult", "AvailableCriteria", "DateRange", "MaxDate"];
const AUTO_SUGGESTED_TERMS: &[&str] = &["SearchResult", "AutoSuggestedTerms"];
const SEARCH_CRITERIA: &[&str] = &["SearchRequest", "SearchCriteria"];
const SEARCH_QUERIES: &[&str] = &["SearchRequest", "SearchCriteria", "Queries"];
const CRITERIA_WITH_ACTIONS: &[&str] = &["SearchRequest", "SearchCriteriaWithActions"];
const RETRIEVAL_CRITERIA: &[&str] = &["SearchRequest", "RetrievalCriteria"];

/// Errors raised while building or reading a result set
#[derive(Debug, thiserror::Error)]
pub enum ResultsError {
    /// The document is not shaped like a search response at all
    #[error("Malformed response: {0}")]
    MalformedResponse(String),

    /// A field every executed search carries is absent
    #[error("Missing field: {path}")]
    MissingField { path: String },

    /// A field is present but holds the wrong kind of value
    #[error("Invalid field {path}: expected {expected}")]
    InvalidField {
        path: String,
        expected: &'static str,
    },

    /// The document could not be parsed as JSON
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// The document could not be read
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

/// Result type for result set operations
pub type Result<T> = std::result::Result<T, ResultsError>;

/// Builds an item value from one raw record map of the response.
///
/// Implemented by [`Record`] and, for callers that want the untouched maps,
/// by [`serde_json::Value`].
pub trait FromRawItem: Sized {
    fn from_raw_item(raw: &Value) -> Self;
}

impl FromRawItem for Value {
    fn from_raw_item(raw: &Value) -> Self {
        raw.clone()
    }
}

/// A search response with precomputed item lists and read-only derived views.
#[derive(Debug, Clone)]
pub struct ResultSet<R = Record> {
    raw: Value,
    records: Vec<R>,
    research_starters: Vec<R>,
    publication_matches: Vec<R>,
    labels: Arc<dyn DatabaseLabels>,
}

impl<R: FromRawItem> ResultSet<R> {
    /// Wrap a response document using the built-in database label table
    pub fn new(raw: Value) -> Result<Self> {
        Self::with_labels(raw, DatabaseTable::builtin())
    }

    /// Wrap a response document using a custom database label table
    pub fn with_labels(raw: Value, labels: Arc<dyn DatabaseLabels>) -> Result<Self> {
        if !raw.is_object() {
            return Err(ResultsError::MalformedResponse(format!(
                "expected a JSON object at the top level, found {}",
                json_kind(&raw)
            )));
        }

        let records = if hits_of(&raw) > 0 {
            array_or_empty(&raw, RECORDS)
                .iter()
                .map(R::from_raw_item)
                .collect()
        } else {
            Vec::new()
        };
        let research_starters =
            related_items(&raw, RELATED_RECORDS, RESEARCH_STARTER_TYPE, "Records");
        let publication_matches = related_items(
            &raw,
            RELATED_PUBLICATIONS,
            PUBLICATION_MATCH_TYPE,
            "PublicationRecords",
        );

        tracing::debug!(
            records = records.len(),
            research_starters = research_starters.len(),
            publication_matches = publication_matches.len(),
            "Built result set"
        );

        Ok(Self {
            raw,
            records,
            research_starters,
            publication_matches,
            labels,
        })
    }

    /// Parse a response document from a JSON string
    pub fn from_json_str(json: &str) -> Result<Self> {
        Self::new(serde_json::from_str(json)?)
    }

    /// Parse a response document from a reader
    pub fn from_reader(reader: impl Read) -> Result<Self> {
        Self::new(serde_json::from_reader(reader)?)
    }
}

impl<R> ResultSet<R> {
    /// The unmodified response document
    pub fn raw(&self) -> &Value {
        &self.raw
    }

    /// Primary result records; empty when the search reported no hits
    pub fn records(&self) -> &[R] {
        &self.records
    }

    /// Records from research starter related content
    pub fn research_starters(&self) -> &[R] {
        &self.research_starters
    }

    /// Records from exact publication match related content
    pub fn publication_matches(&self) -> &[R] {
        &self.publication_matches
    }

    // ========== STATISTICS ==========

    /// Total number of hits reported by the provider, `0` when absent
    pub fn total_hits(&self) -> u64 {
        hits_of(&self.raw)
    }

    /// Time the search took, in milliseconds
    pub fn total_search_time(&self) -> Result<u64> {
        require_u64(&self.raw, TOTAL_SEARCH_TIME)
    }

    /// Hits per searched database, in document order.
    ///
    /// Labels come from the label table when it knows the code, otherwise from
    /// the document itself.
    pub fn database_stats(&self) -> Result<Vec<DatabaseStat>> {
        let databases = require_array(&self.raw, DATABASES)?;
        Ok(databases
            .iter()
            .map(|db| {
                let code = str_field(db, "Id");
                let label = self
                    .labels
                    .label(code)
                    .unwrap_or_else(|| str_field(db, "Label"));
                DatabaseStat {
                    code: code.to_string(),
                    hit_count: db.get("Hits").and_then(as_count).unwrap_or(0),
                    label: label.to_string(),
                }
            })
            .collect())
    }

    // ========== CRITERIA ECHOES ==========

    /// Search criteria used in the search
    pub fn search_criteria(&self) -> Result<&Value> {
        require(&self.raw, SEARCH_CRITERIA)
    }

    /// Search criteria together with the actions that remove them
    pub fn search_criteria_with_actions(&self) -> Result<&Value> {
        require(&self.raw, CRITERIA_WITH_ACTIONS)
    }

    /// Retrieval criteria (view, page size, page number, highlighting)
    pub fn retrieval_criteria(&self) -> Result<&Value> {
        require(&self.raw, RETRIEVAL_CRITERIA)
    }

    /// Queries that produced the results
    pub fn search_queries(&self) -> Result<&Value> {
        require(&self.raw, SEARCH_QUERIES)
    }

    /// Current page number, `1` when the retrieval criteria omit it
    pub fn page_number(&self) -> Result<u64> {
        let criteria = self.retrieval_criteria()?;
        Ok(criteria.get("PageNumber").and_then(as_count).unwrap_or(1))
    }

    // ========== APPLIED REFINEMENTS ==========

    /// Facet values applied to the search, flattened across facet filters
    pub fn applied_facets(&self) -> Vec<&Value> {
        self.applied_section("FacetFiltersWithAction")
            .iter()
            .flat_map(|filter| {
                filter
                    .get("FacetValuesWithAction")
                    .and_then(Value::as_array)
                    .map(Vec::as_slice)
                    .unwrap_or(&[])
            })
            .collect()
    }

    /// Limiters applied to the search
    pub fn applied_limiters(&self) -> &[Value] {
        self.applied_section("LimitersWithAction")
    }

    /// Expanders applied to the search
    pub fn applied_expanders(&self) -> &[Value] {
        self.applied_section("ExpandersWithAction")
    }

    /// Publications the search was limited to
    pub fn applied_publications(&self) -> &[Value] {
        self.applied_section("PublicationWithAction")
    }

    fn applied_section(&self, name: &str) -> &[Value] {
        lookup(&self.raw, CRITERIA_WITH_ACTIONS)
            .and_then(|section| section.get(name))
            .and_then(Value::as_array)
            .map(Vec::as_slice)
            .unwrap_or(&[])
    }

    // ========== FACETS ==========

    /// Available facets matching `facet_id`, or every facet for [`ALL_FACETS`]
    pub fn facets(&self, facet_id: &str) -> Vec<Facet> {
        array_or_empty(&self.raw, AVAILABLE_FACETS)
            .iter()
            .filter(|facet| facet_id == ALL_FACETS || str_field(facet, "Id") == facet_id)
            .map(|facet| Facet {
                id: str_field(facet, "Id").to_string(),
                label: str_field(facet, "Label").to_string(),
                values: array_or_empty(facet, &["AvailableFacetValues"])
                    .iter()
                    .map(|value| FacetValue {
                        value: str_field(value, "Value").to_string(),
                        hit_count: value.get("Count").and_then(as_count).unwrap_or(0),
                        action: str_field(value, "AddAction").to_string(),
                    })
                    .collect(),
            })
            .collect()
    }

    /// Every available facet
    pub fn all_facets(&self) -> Vec<Facet> {
        self.facets(ALL_FACETS)
    }

    // ========== DATES, SUGGESTIONS, TERMS ==========

    /// Publication date range available for the search
    pub fn date_range(&self) -> Result<DateRange> {
        let min_date = require_str(&self.raw, MIN_DATE)?;
        let max_date = require_str(&self.raw, MAX_DATE)?;
        Ok(DateRange::new(min_date, max_date))
    }

    /// First spelling suggestion offered by the provider.
    ///
    /// Only the first entry counts: when it is not a string the result is
    /// `None`, even if later entries are strings.
    pub fn did_you_mean(&self) -> Option<&str> {
        array_or_empty(&self.raw, AUTO_SUGGESTED_TERMS)
            .first()
            .and_then(Value::as_str)
    }

    /// Whitespace-separated words of every applied query, in order.
    ///
    /// Boolean operators inside a term are kept as ordinary words.
    pub fn search_terms(&self) -> Vec<&str> {
        self.applied_section("QueriesWithAction")
            .iter()
            .filter_map(|query| lookup(query, &["Query", "Term"]).and_then(Value::as_str))
            .flat_map(str::split_whitespace)
            .collect()
    }
}

impl ResultSet<Record> {
    /// Snapshot every view, leaving out strict views the document lacks
    pub fn summary(&self) -> ResultSummary {
        let summarize = |records: &[Record]| -> Vec<RecordSummary> {
            records.iter().map(RecordSummary::from).collect()
        };
        ResultSummary {
            total_hits: self.total_hits(),
            search_time_ms: self.total_search_time().ok(),
            page_number: self.page_number().ok(),
            records: summarize(&self.records),
            research_starters: summarize(&self.research_starters),
            publication_matches: summarize(&self.publication_matches),
            databases: self.database_stats().ok(),
            facets: self.all_facets(),
            date_range: self.date_range().ok(),
            did_you_mean: self.did_you_mean().map(str::to_string),
            search_terms: self.search_terms().into_iter().map(str::to_string).collect(),
        }
    }
}

fn hits_of(raw: &Value) -> u64 {
    lookup(raw, TOTAL_HITS).and_then(as_count).unwrap_or(0)
}

/// Flatten the records of every related-content entry tagged `kind`
fn related_items<R: FromRawItem>(
    raw: &Value,
    section: &[&str],
    kind: &str,
    records_key: &str,
) -> Vec<R> {
    array_or_empty(raw, section)
        .iter()
        .filter(|entry| entry.get("Type").and_then(Value::as_str) == Some(kind))
        .flat_map(|entry| array_or_empty(entry, &[records_key]))
        .map(R::from_raw_item)
        .collect()
}

fn json_kind(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "a boolean",
        Value::Number(_) => "a number",
        Value::String(_) => "a string",
        Value::Array(_) => "an array",
        Value::Object(_) => "an object",
    }
}
