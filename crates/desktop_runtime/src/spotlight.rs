//! Spotlight search: ranks apps, collaborator-indexed files and an inline calculator for a query.

pub mod calc;

use serde::{Deserialize, Serialize};

use crate::model::AppId;

/// Results past this count are dropped.
pub const MAX_RESULTS: usize = 10;
const WEB_SEARCH_BASE: &str = "https://www.google.com/search?q=";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum IndexedItemKind {
    File,
    Folder,
}

/// A file or folder the file-browser collaborator exposes to search.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct IndexedItem {
    pub id: String,
    pub name: String,
    pub kind: IndexedItemKind,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "kebab-case")]
pub enum SearchResult {
    Calculator { expression: String, value: f64 },
    App { app_id: AppId },
    Item(IndexedItem),
    Web { query: String },
}

impl SearchResult {
    pub fn label(&self) -> String {
        match self {
            Self::Calculator { expression, value } => {
                format!("{expression} = {}", calc::format_number(*value))
            }
            Self::App { app_id } => app_id.title().to_string(),
            Self::Item(item) => item.name.clone(),
            Self::Web { query } => format!("Search Google for \"{query}\""),
        }
    }
}

/// Builds the result list for `query`: calculator, apps, indexed items, then a web fallback.
pub fn search(query: &str, items: &[IndexedItem]) -> Vec<SearchResult> {
    if query.trim().is_empty() {
        return Vec::new();
    }
    let needle = query.to_lowercase();
    let mut results = Vec::new();

    if calc::looks_like_arithmetic(query) {
        match calc::evaluate(query) {
            Ok(value) => results.push(SearchResult::Calculator {
                expression: query.to_string(),
                value,
            }),
            Err(err) => tracing::trace!(%err, "query is not evaluable"),
        }
    }

    results.extend(
        AppId::ALL
            .into_iter()
            .filter(|app_id| app_id.title().to_lowercase().contains(&needle))
            .map(|app_id| SearchResult::App { app_id }),
    );
    results.extend(
        items
            .iter()
            .filter(|item| item.name.to_lowercase().contains(&needle))
            .cloned()
            .map(SearchResult::Item),
    );
    results.push(SearchResult::Web {
        query: query.to_string(),
    });

    results.truncate(MAX_RESULTS);
    results
}

pub fn web_search_url(query: &str) -> String {
    format!("{WEB_SEARCH_BASE}{}", encode_uri_component(query))
}

/// Percent-encodes everything except `A-Z a-z 0-9 - _ . ! ~ * ' ( )`.
fn encode_uri_component(raw: &str) -> String {
    let mut encoded = String::with_capacity(raw.len());
    for byte in raw.bytes() {
        match byte {
            b'A'..=b'Z'
            | b'a'..=b'z'
            | b'0'..=b'9'
            | b'-'
            | b'_'
            | b'.'
            | b'!'
            | b'~'
            | b'*'
            | b'\''
            | b'('
            | b')' => encoded.push(char::from(byte)),
            other => encoded.push_str(&format!("%{other:02X}")),
        }
    }
    encoded
}

/// Keyboard selection over a result list; wraps at both ends.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct SearchCursor {
    selected: usize,
}

impl SearchCursor {
    pub fn selected(&self) -> usize {
        self.selected
    }

    pub fn next(&mut self, len: usize) {
        if len > 0 {
            self.selected = (self.selected + 1) % len;
        }
    }

    pub fn previous(&mut self, len: usize) {
        if len > 0 {
            self.selected = (self.selected + len - 1) % len;
        }
    }

    pub fn reset(&mut self) {
        self.selected = 0;
    }

    pub fn pick<'a>(&self, results: &'a [SearchResult]) -> Option<&'a SearchResult> {
        results.get(self.selected)
    }
}
