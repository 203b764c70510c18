//! # EDS Results
//!
//! Normalizes a discovery-service search response into a structured,
//! queryable result set.
//!
//! ## Architecture
//!
//! The library is organized into several modules:
//!
//! - [`results`]: The [`ResultSet`] adapter, its error type and the database label table
//! - [`models`]: Core data structures (Record, Facet, DatabaseStat, etc.)
//! - [`utils`]: Terminal rendering helpers
//! - [`config`]: Configuration management
//!
//! ## Example
//!
//! ```rust
//! use eds_results::ResultSet;
//!
//! let json = r#"{
//!     "SearchRequest": {
//!         "SearchCriteriaWithActions": {
//!             "QueriesWithAction": [{"Query": {"Term": "earthquakes california"}}]
//!         }
//!     },
//!     "SearchResult": {"Statistics": {"TotalHits": 0}}
//! }"#;
//!
//! let results: ResultSet = ResultSet::from_json_str(json).unwrap();
//! assert_eq!(results.search_terms(), vec!["earthquakes", "california"]);
//! ```

pub mod config;
pub mod models;
pub mod results;
pub mod utils;

// Re-export commonly used types
pub use models::{Facet, Record};
pub use results::{ResultSet, ResultsError};

/// Library version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
