//! Integration tests for EDS Results
//!
//! These tests build result sets from saved response documents and verify
//! every derived view.

use eds_results::config::OutputConfig;
use eds_results::models::{DatabaseStat, Facet, FacetValue, ResultSummary, ALL_FACETS};
use eds_results::results::{DatabaseTable, ResultsError};
use eds_results::utils::Renderer;
use eds_results::{Record, ResultSet};
use serde_json::{json, Value};
use std::fs::File;
use std::path::PathBuf;
use std::sync::Arc;

fn fixture_path(name: &str) -> PathBuf {
    PathBuf::from(env!("CARGO_MANIFEST_DIR"))
        .join("tests")
        .join("fixtures")
        .join(name)
}

fn load(name: &str) -> ResultSet {
    let file = File::open(fixture_path(name)).expect("fixture should exist");
    ResultSet::from_reader(file).expect("fixture should be a valid response")
}

#[test]
fn test_full_response_records() {
    let results = load("search_response.json");

    assert_eq!(results.total_hits(), 2);
    assert_eq!(results.records().len(), 2);

    let titles: Vec<_> = results
        .records()
        .iter()
        .map(|r| r.title.as_deref().unwrap_or_default())
        .collect();
    assert_eq!(
        titles,
        vec![
            "Seismic hazard in <highlight>California</highlight>",
            "Fault lines of the west"
        ]
    );
    assert_eq!(results.records()[0].id(), Some("asn__1001".to_string()));
    assert!(results.records()[0].full_text_available);
    assert!(!results.records()[1].full_text_available);
}

#[test]
fn test_full_response_related_content() {
    let results = load("search_response.json");

    let starters: Vec<_> = results
        .research_starters()
        .iter()
        .filter_map(|r| r.title.as_deref())
        .collect();
    assert_eq!(starters, vec!["Earthquakes", "San Andreas Fault"]);

    assert_eq!(results.publication_matches().len(), 1);
    assert_eq!(
        results.publication_matches()[0].title.as_deref(),
        Some("Bulletin of the Seismological Society")
    );
}

#[test]
fn test_full_response_statistics() {
    let results = load("search_response.json");

    assert_eq!(results.total_search_time().unwrap(), 187);
    assert_eq!(
        results.database_stats().unwrap(),
        vec![
            DatabaseStat {
                code: "nlebk".to_string(),
                hit_count: 0,
                label: "eBook Collection (EBSCOhost)".to_string(),
            },
            DatabaseStat {
                code: "zz999".to_string(),
                hit_count: 12,
                label: "Regional Archive".to_string(),
            },
            DatabaseStat {
                code: "asn".to_string(),
                hit_count: 136406,
                label: "Academic Search Ultimate".to_string(),
            },
        ]
    );
}

#[test]
fn test_full_response_criteria_echoes() {
    let results = load("search_response.json");

    assert_eq!(results.search_criteria().unwrap()["SearchMode"], "all");
    assert_eq!(results.retrieval_criteria().unwrap()["View"], "brief");
    assert_eq!(results.page_number().unwrap(), 2);
    assert_eq!(
        results.search_queries().unwrap(),
        &json!([{"BooleanOperator": "AND", "Term": "earthquakes california"}])
    );
    assert_eq!(
        results.search_criteria_with_actions().unwrap(),
        &results.raw()["SearchRequest"]["SearchCriteriaWithActions"]
    );
}

#[test]
fn test_full_response_applied_refinements() {
    let results = load("search_response.json");

    let applied: Vec<&str> = results
        .applied_facets()
        .iter()
        .filter_map(|v| v["FacetValue"]["Value"].as_str())
        .collect();
    assert_eq!(applied, vec!["massachusetts", "News", "Magazines"]);

    assert_eq!(results.applied_limiters().len(), 1);
    assert_eq!(results.applied_limiters()[0]["Id"], "LA99");

    let expanders: Vec<&str> = results
        .applied_expanders()
        .iter()
        .filter_map(|e| e["Id"].as_str())
        .collect();
    assert_eq!(expanders, vec!["fulltext", "thesaurus"]);

    assert_eq!(
        results.applied_publications(),
        &[json!({"Id": "eric", "RemoveAction": "removepublication(eric)"})]
    );
}

#[test]
fn test_full_response_facets() {
    let results = load("search_response.json");

    let all = results.facets(ALL_FACETS);
    assert_eq!(all.len(), 2);
    assert_eq!(all[0].id, "SourceType");
    assert_eq!(all[1].id, "Language");

    let language = results.facets("Language");
    assert_eq!(
        language,
        vec![Facet {
            id: "Language".to_string(),
            label: "Language".to_string(),
            values: vec![FacetValue {
                value: "english".to_string(),
                hit_count: 240,
                action: "addfacetfilter(Language:english)".to_string(),
            }],
        }]
    );

    assert!(results.facets("Publisher").is_empty());
}

#[test]
fn test_full_response_dates_terms_suggestion() {
    let results = load("search_response.json");

    let range = results.date_range().unwrap();
    assert_eq!(range.min_date, "1501-01");
    assert_eq!(range.max_date, "2018-04");
    assert_eq!(range.min_year, "1501");
    assert_eq!(range.max_year, "2018");

    assert_eq!(
        results.search_terms(),
        vec!["earthquakes", "california", "faults", "OR", "plates"]
    );
    assert_eq!(results.did_you_mean(), Some("earthquake"));
}

#[test]
fn test_zero_hits_response() {
    let results = load("zero_hits_response.json");

    assert_eq!(results.total_hits(), 0);
    assert!(results.records().is_empty());
    assert!(results.database_stats().unwrap().is_empty());
    assert_eq!(results.page_number().unwrap(), 1);
    assert!(results.all_facets().is_empty());
    assert!(results.applied_facets().is_empty());
    assert!(results.search_terms().is_empty());
    assert_eq!(results.did_you_mean(), Some("earthquake"));
    assert!(matches!(
        results.date_range(),
        Err(ResultsError::MissingField { ref path }) if path == "SearchResult.AvailableCriteria.DateRange.MinDate"
    ));
    assert!(results.search_criteria_with_actions().is_err());
}

#[test]
fn test_zero_hits_without_records_key() {
    let results: ResultSet =
        ResultSet::new(json!({"SearchResult": {"Statistics": {"TotalHits": 0}}})).unwrap();
    assert!(results.records().is_empty());
}

#[test]
fn test_research_starter_example() {
    let item_a = json!({"Header": {"DbId": "ers", "An": "a"}});
    let item_b = json!({"Header": {"DbId": "ers", "An": "b"}});
    let doc = json!({
        "SearchResult": {
            "RelatedContent": {
                "RelatedRecords": [{"Type": "rs", "Records": [item_a.clone(), item_b.clone()]}]
            }
        }
    });

    let results = ResultSet::<Value>::new(doc).unwrap();
    assert_eq!(results.research_starters(), &[item_a, item_b]);
    assert!(results.publication_matches().is_empty());
}

#[test]
fn test_facet_example() {
    let doc = json!({
        "SearchResult": {
            "AvailableFacets": [{
                "Id": "SourceType",
                "Label": "Source Type",
                "AvailableFacetValues": [{"Value": "News", "Count": 5, "AddAction": "add(...)"}]
            }]
        }
    });

    let results: ResultSet = ResultSet::new(doc).unwrap();
    assert_eq!(
        results.facets("SourceType"),
        vec![Facet {
            id: "SourceType".to_string(),
            label: "Source Type".to_string(),
            values: vec![FacetValue {
                value: "News".to_string(),
                hit_count: 5,
                action: "add(...)".to_string(),
            }],
        }]
    );
}

#[test]
fn test_did_you_mean_without_suggestions() {
    let doc = json!({
        "SearchResult": {
            "Statistics": {"TotalHits": 3, "TotalSearchTime": 9},
            "AvailableFacets": []
        }
    });

    let results: ResultSet = ResultSet::new(doc).unwrap();
    assert_eq!(results.did_you_mean(), None);
}

#[test]
fn test_facets_with_missing_fields() {
    let doc = json!({
        "SearchResult": {
            "AvailableFacets": [
                {"Id": "Publisher", "Label": "Publisher"},
                {
                    "Id": "SubjectEDS",
                    "AvailableFacetValues": [
                        {"Value": "seismology", "AddAction": "addfacetfilter(SubjectEDS:seismology)"},
                        {"Count": "7"}
                    ]
                }
            ]
        }
    });

    let results: ResultSet = ResultSet::new(doc).unwrap();

    let publisher = results.facets("Publisher");
    assert_eq!(publisher.len(), 1);
    assert!(publisher[0].values.is_empty());
    assert_eq!(publisher[0].total_hits(), 0);

    assert_eq!(
        results.facets("SubjectEDS"),
        vec![Facet {
            id: "SubjectEDS".to_string(),
            label: String::new(),
            values: vec![
                FacetValue {
                    value: "seismology".to_string(),
                    hit_count: 0,
                    action: "addfacetfilter(SubjectEDS:seismology)".to_string(),
                },
                FacetValue {
                    value: String::new(),
                    hit_count: 7,
                    action: String::new(),
                },
            ],
        }]
    );
    assert_eq!(results.all_facets().len(), 2);
}

#[test]
fn test_search_terms_example() {
    let doc = json!({
        "SearchRequest": {
            "SearchCriteriaWithActions": {
                "QueriesWithAction": [{"Query": {"Term": "earthquakes california"}}]
            }
        }
    });

    let results: ResultSet = ResultSet::new(doc).unwrap();
    assert_eq!(results.search_terms(), vec!["earthquakes", "california"]);
}

#[test]
fn test_custom_label_table() {
    let table: DatabaseTable = [("ZZ999", "Our Regional Archive")].into_iter().collect();
    let raw: Value =
        serde_json::from_reader(File::open(fixture_path("search_response.json")).unwrap())
            .unwrap();

    let results = ResultSet::<Record>::with_labels(raw, Arc::new(table)).unwrap();
    let labels: Vec<String> = results
        .database_stats()
        .unwrap()
        .into_iter()
        .map(|s| s.label)
        .collect();
    // without the built-in table, the provider labels are used as-is
    assert_eq!(labels, vec!["", "Our Regional Archive", "Academic Search"]);
}

#[test]
fn test_malformed_documents() {
    assert!(matches!(
        ResultSet::<Record>::from_json_str("\"just a string\""),
        Err(ResultsError::MalformedResponse(_))
    ));
    assert!(matches!(
        ResultSet::<Record>::from_json_str("{not json"),
        Err(ResultsError::Json(_))
    ));
}

#[test]
fn test_raw_document_is_untouched() {
    let raw: Value =
        serde_json::from_reader(File::open(fixture_path("search_response.json")).unwrap())
            .unwrap();
    let results = ResultSet::<Record>::new(raw.clone()).unwrap();

    let _ = results.all_facets();
    let _ = results.search_terms();
    let _ = results.database_stats();

    assert_eq!(results.raw(), &raw);
}

#[test]
fn test_summary_and_serialization() {
    let results = load("search_response.json");
    let summary = results.summary();

    assert_eq!(summary.total_hits, 2);
    assert_eq!(summary.search_time_ms, Some(187));
    assert_eq!(summary.page_number, Some(2));
    assert_eq!(summary.records.len(), 2);
    assert_eq!(summary.records[0].database.as_deref(), Some("Academic Search Ultimate"));
    assert_eq!(summary.research_starters.len(), 2);
    assert_eq!(summary.publication_matches.len(), 1);
    assert_eq!(summary.facets.len(), 2);
    assert_eq!(summary.did_you_mean.as_deref(), Some("earthquake"));

    let json = serde_json::to_string(&summary).unwrap();
    let back: ResultSummary = serde_json::from_str(&json).unwrap();
    assert_eq!(back, summary);

    assert_eq!(results.summary(), summary);
}

#[test]
fn test_summary_of_partial_document() {
    let results: ResultSet =
        ResultSet::new(json!({"SearchResult": {"Statistics": {"TotalHits": 0}}})).unwrap();
    let summary = results.summary();

    assert_eq!(summary.search_time_ms, None);
    assert_eq!(summary.page_number, None);
    assert_eq!(summary.databases, None);
    assert_eq!(summary.date_range, None);

    let json = serde_json::to_value(&summary).unwrap();
    assert!(json.get("date_range").is_none());
}

#[test]
fn test_render_summary() {
    let results = load("search_response.json");
    let renderer = Renderer::new(OutputConfig::default(), false);
    let out = renderer.render_summary(&results);

    assert!(out.contains("Hits:          2"));
    assert!(out.contains("Seismic hazard in California"));
    assert!(out.contains("Research Starters"));
    assert!(out.contains("Did you mean:  earthquake"));
    assert!(out.contains("1501 - 2018"));
}

#[test]
fn test_shared_across_threads() {
    let results = Arc::new(load("search_response.json"));

    let handles: Vec<_> = (0..4)
        .map(|_| {
            let results = Arc::clone(&results);
            std::thread::spawn(move || (results.total_hits(), results.all_facets().len()))
        })
        .collect();

    for handle in handles {
        assert_eq!(handle.join().unwrap(), (2, 2));
    }
}
