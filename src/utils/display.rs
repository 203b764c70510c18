//! Terminal rendering of result sets.
//!
//! Everything here returns a `String`; printing is left to the caller.

use comfy_table::{presets, Attribute, Cell, CellAlignment, Table};
use owo_colors::OwoColorize;
use regex::Regex;
use std::sync::OnceLock;
use unicode_width::UnicodeWidthChar;

use crate::config::OutputConfig;
use crate::models::{DatabaseStat, Facet, Record};
use crate::results::ResultSet;

/// Renders result sets as human-readable text.
#[derive(Debug, Clone)]
pub struct Renderer {
    options: OutputConfig,
    color: bool,
}

impl Renderer {
    /// Create a renderer; `color` enables ANSI styling of headers
    pub fn new(options: OutputConfig, color: bool) -> Self {
        Self { options, color }
    }

    /// Overview of the whole result set: statistics, records and facets
    pub fn render_summary(&self, results: &ResultSet<Record>) -> String {
        let mut out = String::new();

        out.push_str(&self.section_header("Search"));
        out.push_str(&format!("Hits:          {}\n", results.total_hits()));
        if let Ok(ms) = results.total_search_time() {
            out.push_str(&format!("Search time:   {} ms\n", ms));
        }
        if let Ok(page) = results.page_number() {
            out.push_str(&format!("Page:          {}\n", page));
        }
        let terms = results.search_terms();
        if !terms.is_empty() {
            out.push_str(&format!("Terms:         {}\n", terms.join(" ")));
        }
        if let Ok(range) = results.date_range() {
            out.push_str(&format!(
                "Date range:    {} - {}\n",
                range.min_year, range.max_year
            ));
        }
        if let Some(suggestion) = results.did_you_mean() {
            let suggestion = if self.color {
                suggestion.yellow().bold().to_string()
            } else {
                suggestion.to_string()
            };
            out.push_str(&format!("Did you mean:  {}\n", suggestion));
        }

        for (title, records) in [
            ("Records", results.records()),
            ("Research Starters", results.research_starters()),
            ("Exact Publication Matches", results.publication_matches()),
        ] {
            if records.is_empty() {
                continue;
            }
            out.push_str(&self.section_header(title));
            out.push_str(&self.render_records(records));
            out.push('\n');
        }

        let facets = results.all_facets();
        if !facets.is_empty() {
            out.push_str(&self.section_header("Facets"));
            out.push_str(&self.render_facets(&facets));
            out.push('\n');
        }

        out
    }

    /// Table of records with position, title, database and full-text flag
    pub fn render_records(&self, records: &[Record]) -> String {
        let mut table = new_table(vec!["#", "Title", "Database", "Full Text"]);
        for (i, record) in records.iter().enumerate() {
            let position = record.result_id.unwrap_or(i as u64 + 1);
            let title = record.title.as_deref().unwrap_or("(untitled)");
            let database = record
                .database_label
                .as_deref()
                .or(record.database_id.as_deref())
                .unwrap_or_default();
            table.add_row(vec![
                Cell::new(position).set_alignment(CellAlignment::Right),
                Cell::new(truncate_with_ellipsis(
                    &strip_markup(title),
                    self.options.title_width,
                ))
                .add_attribute(Attribute::Bold),
                Cell::new(database),
                Cell::new(if record.full_text_available { "yes" } else { "no" }),
            ]);
        }
        table.to_string()
    }

    /// Table of facets, limited to the configured number of values per facet
    pub fn render_facets(&self, facets: &[Facet]) -> String {
        let mut table = new_table(vec!["Facet", "Value", "Hits"]);
        for facet in facets {
            let shown = facet.values.iter().take(self.options.max_facet_values);
            for (i, value) in shown.enumerate() {
                let label = if i == 0 { facet.label.as_str() } else { "" };
                table.add_row(vec![
                    Cell::new(label).add_attribute(Attribute::Bold),
                    Cell::new(truncate_with_ellipsis(
                        &value.value,
                        self.options.title_width,
                    )),
                    Cell::new(value.hit_count).set_alignment(CellAlignment::Right),
                ]);
            }
            let hidden = facet.values.len().saturating_sub(self.options.max_facet_values);
            if hidden > 0 {
                table.add_row(vec![
                    Cell::new(""),
                    Cell::new(format!("... {} more", hidden)),
                    Cell::new(""),
                ]);
            }
        }
        table.to_string()
    }

    /// Table of per-database hit counts
    pub fn render_databases(&self, stats: &[DatabaseStat]) -> String {
        let mut table = new_table(vec!["Code", "Database", "Hits"]);
        for stat in stats {
            table.add_row(vec![
                Cell::new(&stat.code),
                Cell::new(&stat.label),
                Cell::new(stat.hit_count).set_alignment(CellAlignment::Right),
            ]);
        }
        table.to_string()
    }

    fn section_header(&self, title: &str) -> String {
        let header = format!("━━━ {} ━━━", title);
        if self.color {
            format!("\n{}\n", header.bold().cyan())
        } else {
            format!("\n{}\n", header)
        }
    }
}

fn new_table(header: Vec<&str>) -> Table {
    let mut table = Table::new();
    table.load_preset(presets::UTF8_FULL);
    table.set_header(header);
    table
}

/// Remove provider highlight markup such as `<highlight>` from display text.
///
/// A `<` that never closes into a tag is kept as text.
pub fn strip_markup(text: &str) -> String {
    match markup_tag() {
        Some(re) => re.replace_all(text, "").into_owned(),
        None => text.to_string(),
    }
}

static MARKUP_TAG: OnceLock<Option<Regex>> = OnceLock::new();

fn markup_tag() -> Option<&'static Regex> {
    MARKUP_TAG
        .get_or_init(|| Regex::new(r"<[^<>]+>").ok())
        .as_ref()
}

/// Truncate text to fit within `max_width` terminal columns.
///
/// Wide characters count for their display width; an ellipsis is appended
/// when anything was cut.
///
/// ```
/// use eds_results::utils::truncate_with_ellipsis;
///
/// assert_eq!(truncate_with_ellipsis("Hello World", 8), "Hello...");
/// assert_eq!(truncate_with_ellipsis("Hi", 8), "Hi");
/// ```
pub fn truncate_with_ellipsis(text: &str, max_width: usize) -> String {
    let width = |c: char| c.width().unwrap_or(1);
    if text.chars().map(width).sum::<usize>() <= max_width {
        return text.to_string();
    }

    let budget = max_width.saturating_sub(3);
    let mut used = 0;
    let mut out = String::new();
    for c in text.chars() {
        used += width(c);
        if used > budget {
            break;
        }
        out.push(c);
    }
    out.push_str("...");
    out
}
