//! Data models produced from search responses.

mod facet;
mod record;
mod summary;

pub use facet::{DatabaseStat, DateRange, Facet, FacetValue, ALL_FACETS};
pub use record::{Record, RecordItem};
pub use summary::{RecordSummary, ResultSummary};
