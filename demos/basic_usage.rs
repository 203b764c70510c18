//! Basic usage example for the EDS Results library.
//!
//! This example builds a result set from a saved search response and prints
//! the main views. Pass a path to a response JSON file, or run without
//! arguments to use the bundled test fixture.

use eds_results::models::ALL_FACETS;
use eds_results::ResultSet;
use std::fs::File;
use std::path::PathBuf;

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let path = std::env::args_os()
        .nth(1)
        .map(PathBuf::from)
        .unwrap_or_else(|| {
            PathBuf::from(env!("CARGO_MANIFEST_DIR")).join("tests/fixtures/search_response.json")
        });

    let results: ResultSet = ResultSet::from_reader(File::open(&path)?)?;

    println!("Total hits: {}", results.total_hits());
    match results.total_search_time() {
        Ok(ms) => println!("Search time: {} ms", ms),
        Err(e) => println!("Search time unavailable: {}", e),
    }
    println!("Search terms: {}", results.search_terms().join(", "));
    if let Some(suggestion) = results.did_you_mean() {
        println!("Did you mean: {}", suggestion);
    }

    // Print the first few records
    for (i, record) in results.records().iter().take(3).enumerate() {
        println!("\n{}. {}", i + 1, record.title.as_deref().unwrap_or("(untitled)"));
        if let Some(id) = record.id() {
            println!("   Id: {}", id);
        }
        if let Some(pub_type) = &record.publication_type {
            println!("   Type: {}", pub_type);
        }
    }

    for starter in results.research_starters() {
        println!("\nResearch starter: {}", starter.title.as_deref().unwrap_or_default());
    }

    for facet in results.facets(ALL_FACETS) {
        println!("\n{} ({} hits)", facet.label, facet.total_hits());
        for value in facet.values.iter().take(3) {
            println!("  {:<30} {:>8}", value.value, value.hit_count);
        }
    }

    Ok(())
}
