//! Database code to display label lookup.

use std::collections::HashMap;
use std::sync::{Arc, OnceLock};

use crate::config::DatabaseConfig;

/// A case-insensitive lookup from database code to a human-readable label.
pub trait DatabaseLabels: Send + Sync + std::fmt::Debug {
    /// Return the label for `code`, if the table knows it.
    fn label(&self, code: &str) -> Option<&str>;
}

/// Labels shipped with the crate, keyed by upper-case database code.
const BUILTIN_LABELS: &[(&str, &str)] = &[
    ("A9H", "Academic Search Complete"),
    ("ASN", "Academic Search Ultimate"),
    ("APH", "Academic Search Premier"),
    ("BTH", "Business Source Premier"),
    ("BUH", "Business Source Complete"),
    ("CAT02060A", "Library Catalog"),
    ("CMEDM", "MEDLINE"),
    ("E000XNA", "eBook Academic Collection (EBSCOhost)"),
    ("E700XNA", "eBook Public Library Collection (EBSCOhost)"),
    ("EDB", "Complementary Index"),
    ("EDSART", "ARTstor Digital Library"),
    ("EDSBAS", "BASE"),
    ("EDSDOJ", "Directory of Open Access Journals"),
    ("EDSGAO", "Gale Academic OneFile"),
    ("EDSJSR", "JSTOR Journals"),
    ("EDSSCH", "Supplemental Index"),
    ("EDSWSC", "Web of Science"),
    ("EDO", "Supplemental Index"),
    ("ERIC", "ERIC"),
    ("ERS", "Research Starters"),
    ("HLH", "Humanities International Complete"),
    ("LXH", "Library, Information Science & Technology Abstracts"),
    ("MDC", "MEDLINE"),
    ("NLEBK", "eBook Collection (EBSCOhost)"),
    ("PSYH", "APA PsycInfo"),
    ("RLH", "Religion and Philosophy Collection"),
    ("SIH", "Sociology Source Ultimate"),
];

static BUILTIN: OnceLock<Arc<DatabaseTable>> = OnceLock::new();

/// In-memory label table.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct DatabaseTable {
    labels: HashMap<String, String>,
}

impl DatabaseTable {
    /// Create an empty table
    pub fn new() -> Self {
        Self::default()
    }

    /// The shared table of labels shipped with the crate
    pub fn builtin() -> Arc<DatabaseTable> {
        BUILTIN
            .get_or_init(|| {
                Arc::new(
                    BUILTIN_LABELS
                        .iter()
                        .map(|(code, label)| (*code, *label))
                        .collect(),
                )
            })
            .clone()
    }

    /// Build a table from configuration.
    ///
    /// Configured labels override built-in ones with the same code.
    pub fn from_config(config: &DatabaseConfig) -> Self {
        let mut table = if config.include_builtin {
            Self::builtin().as_ref().clone()
        } else {
            Self::new()
        };
        for (code, label) in &config.labels {
            table.insert(code, label);
        }
        tracing::debug!(entries = table.len(), "Built database label table");
        table
    }

    /// Add or replace a label
    pub fn insert(&mut self, code: impl AsRef<str>, label: impl Into<String>) {
        self.labels.insert(normalize(code.as_ref()), label.into());
    }

    /// Number of known codes
    pub fn len(&self) -> usize {
        self.labels.len()
    }

    /// Whether the table is empty
    pub fn is_empty(&self) -> bool {
        self.labels.is_empty()
    }
}

impl DatabaseLabels for DatabaseTable {
    fn label(&self, code: &str) -> Option<&str> {
        self.labels.get(&normalize(code)).map(String::as_str)
    }
}

impl<C: AsRef<str>, L: Into<String>> FromIterator<(C, L)> for DatabaseTable {
    fn from_iter<I: IntoIterator<Item = (C, L)>>(iter: I) -> Self {
        let mut table = Self::new();
        for (code, label) in iter {
            table.insert(code, label);
        }
        table
    }
}

fn normalize(code: &str) -> String {
    code.trim().to_uppercase()
}
