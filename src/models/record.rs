//! Record model representing one bibliographic entry from a search response.

use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::results::FromRawItem;

/// One display item attached to a record (title, author, subject, ...)
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RecordItem {
    /// Machine name of the item (e.g. "Title", "Author")
    pub name: String,

    /// Display label
    pub label: String,

    /// Item group (e.g. "Ti", "Au")
    pub group: String,

    /// Item data, possibly containing provider markup
    pub data: String,
}

/// A normalized record built from one raw item of the response document.
///
/// Only the commonly used header fields are lifted out; everything else is
/// still reachable through [`Record::raw`].
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Record {
    /// Position of the record in the result list
    pub result_id: Option<u64>,

    /// Database code the record comes from
    pub database_id: Option<String>,

    /// Database label as reported by the provider
    pub database_label: Option<String>,

    /// Accession number within the database
    pub accession_number: Option<String>,

    /// Provider relevancy score
    pub relevancy_score: Option<String>,

    /// Publication type (e.g. "Academic Journal")
    pub publication_type: Option<String>,

    /// Persistent link to the record
    pub plink: Option<String>,

    /// Record title
    pub title: Option<String>,

    /// Whether full text is available
    pub full_text_available: bool,

    /// Display items in document order
    pub items: Vec<RecordItem>,

    /// The raw item this record was built from
    pub raw: Value,
}

impl Record {
    /// Build a record from a raw item map.
    ///
    /// Unknown or malformed fields are ignored; a non-object item yields an
    /// empty record that still carries the raw value.
    pub fn from_raw(raw: &Value) -> Self {
        let parsed = match RawRecord::deserialize(raw) {
            Ok(parsed) => parsed,
            Err(e) => {
                tracing::warn!("Failed to shape raw record: {}", e);
                RawRecord::default()
            }
        };

        let header = parsed.header.unwrap_or_default();
        let items: Vec<RecordItem> = parsed
            .items
            .into_iter()
            .map(|item| RecordItem {
                name: item.name.unwrap_or_default(),
                label: item.label.unwrap_or_default(),
                group: item.group.unwrap_or_default(),
                data: item.data.unwrap_or_default(),
            })
            .collect();

        let title = items
            .iter()
            .find(|item| item.name == "Title")
            .map(|item| item.data.clone())
            .or_else(|| {
                parsed
                    .record_info
                    .and_then(|info| info.bib_record)
                    .and_then(|bib| bib.bib_entity)
                    .and_then(|entity| entity.titles.into_iter().next())
                    .and_then(|t| t.title_full)
            });

        let full_text_available = parsed
            .full_text
            .and_then(|ft| ft.text)
            .and_then(|text| text.availability)
            .map(|a| is_truthy(&a))
            .unwrap_or(false);

        Self {
            result_id: parsed.result_id.as_ref().and_then(crate::results::as_count),
            database_id: header.db_id,
            database_label: header.db_label,
            accession_number: header.an,
            relevancy_score: header.relevancy_score.as_ref().map(scalar_to_string),
            publication_type: header.pub_type,
            plink: parsed.plink,
            title,
            full_text_available,
            items,
            raw: raw.clone(),
        }
    }

    /// Returns a stable identifier `"{database}__{accession}"` when both parts are known
    pub fn id(&self) -> Option<String> {
        match (&self.database_id, &self.accession_number) {
            (Some(db), Some(an)) => Some(format!("{}__{}", db, an)),
            _ => None,
        }
    }

    /// Returns the data of every item in the given group
    pub fn items_in_group<'a>(&'a self, group: &'a str) -> impl Iterator<Item = &'a str> + 'a {
        self.items
            .iter()
            .filter(move |item| item.group == group)
            .map(|item| item.data.as_str())
    }
}

impl FromRawItem for Record {
    fn from_raw_item(raw: &Value) -> Self {
        Record::from_raw(raw)
    }
}

fn is_truthy(value: &Value) -> bool {
    match value {
        Value::Bool(b) => *b,
        Value::Number(n) => n.as_u64().is_some_and(|n| n > 0),
        Value::String(s) => matches!(s.as_str(), "1" | "true" | "y" | "Y"),
        _ => false,
    }
}

fn scalar_to_string(value: &Value) -> String {
    match value {
        Value::String(s) => s.clone(),
        other => other.to_string(),
    }
}

// ===== Raw Record Types =====

#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "PascalCase")]
struct RawRecord {
    #[serde(default)]
    result_id: Option<Value>,
    #[serde(default)]
    header: Option<RawHeader>,
    #[serde(default, rename = "PLink")]
    plink: Option<String>,
    #[serde(default)]
    full_text: Option<RawFullText>,
    #[serde(default)]
    items: Vec<RawItem>,
    #[serde(default)]
    record_info: Option<RawRecordInfo>,
}

#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "PascalCase")]
struct RawHeader {
    #[serde(default)]
    db_id: Option<String>,
    #[serde(default)]
    db_label: Option<String>,
    #[serde(default)]
    an: Option<String>,
    #[serde(default)]
    relevancy_score: Option<Value>,
    #[serde(default)]
    pub_type: Option<String>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "PascalCase")]
struct RawFullText {
    #[serde(default)]
    text: Option<RawFullTextText>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "PascalCase")]
struct RawFullTextText {
    #[serde(default)]
    availability: Option<Value>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "PascalCase")]
struct RawItem {
    #[serde(default)]
    name: Option<String>,
    #[serde(default)]
    label: Option<String>,
    #[serde(default)]
    group: Option<String>,
    #[serde(default)]
    data: Option<String>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "PascalCase")]
struct RawRecordInfo {
    #[serde(default)]
    bib_record: Option<RawBibRecord>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "PascalCase")]
struct RawBibRecord {
    #[serde(default)]
    bib_entity: Option<RawBibEntity>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "PascalCase")]
struct RawBibEntity {
    #[serde(default)]
    titles: Vec<RawTitle>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "PascalCase")]
struct RawTitle {
    #[serde(default)]
    title_full: Option<String>,
}
