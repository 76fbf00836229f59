use crate::model::{ResultItem, SourceType};
use crate::stores::{Persisted, load_entries};
use crate::util::{
    detect_source_type, generate_uuid, looks_like_application, now_millis, repair_app_path,
};
use log::debug;
use serde::{Deserialize, Serialize};

const DEFAULT_DECORATION: &str = "application-x-executable";
const DEFAULT_CATEGORY: &str = "Diğer";

/// A previously selected result, most-recently-used first in [`History`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", from = "StoredHistoryEntry")]
pub struct HistoryEntry {
    pub uuid: String,
    pub display: String,
    pub decoration: String,
    pub category: String,
    pub is_application: bool,
    pub match_id: String,
    pub file_path: String,
    pub source_type: SourceType,
    pub query_text: String,
    pub timestamp: u64, // ms since epoch of the last selection
}

// Shape accepted from storage; older entries lack uuid, sourceType and queryText.
#[derive(Deserialize, Default)]
#[serde(rename_all = "camelCase", default)]
struct StoredHistoryEntry {
    uuid: Option<String>,
    display: Option<String>,
    decoration: Option<String>,
    category: Option<String>,
    is_application: Option<bool>,
    match_id: Option<String>,
    file_path: Option<String>,
    source_type: Option<String>,
    query_text: Option<String>,
    timestamp: Option<f64>,
}

impl From<StoredHistoryEntry> for HistoryEntry {
    fn from(stored: StoredHistoryEntry) -> Self {
        let display = stored.display.unwrap_or_default();
        let is_application = stored.is_application.unwrap_or(false);
        let source_type = stored
            .source_type
            .as_deref()
            .and_then(SourceType::parse)
            .unwrap_or(if is_application { SourceType::App } else { SourceType::Krunner });

        Self {
            uuid: non_empty(stored.uuid).unwrap_or_else(generate_uuid),
            query_text: non_empty(stored.query_text).unwrap_or_else(|| display.clone()),
            display,
            decoration: stored.decoration.unwrap_or_default(),
            category: stored.category.unwrap_or_default(),
            is_application,
            match_id: stored.match_id.unwrap_or_default(),
            file_path: stored.file_path.unwrap_or_default(),
            source_type,
            timestamp: stored.timestamp.map(|t| t.max(0.0) as u64).unwrap_or(0),
        }
    }
}

fn non_empty(value: Option<String>) -> Option<String> {
    value.filter(|s| !s.is_empty())
}

/// What the caller knows about a selection about to be recorded.
#[derive(Debug, Clone, Default)]
pub struct HistoryCandidate {
    pub display: String,
    pub decoration: Option<String>,
    pub category: Option<String>,
    pub match_id: Option<String>,
    pub file_path: Option<String>,
    pub source_type: Option<SourceType>,
    pub query_text: Option<String>,
}

impl HistoryCandidate {
    pub fn new(display: impl Into<String>) -> Self {
        Self {
            display: display.into(),
            ..Self::default()
        }
    }

    pub fn from_result(item: &ResultItem, query: &str) -> Self {
        Self {
            display: item.display.clone(),
            decoration: non_empty(Some(item.decoration.clone())),
            category: non_empty(Some(item.category.clone())),
            match_id: non_empty(Some(item.match_id.clone())),
            file_path: non_empty(item.file_path.clone().or_else(|| item.url.clone())),
            source_type: None,
            query_text: non_empty(Some(query.to_string())),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct HistoryGroup {
    pub label: String,
    pub items: Vec<HistoryEntry>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct History {
    entries: Vec<HistoryEntry>,
}

impl Persisted for History {
    const KIND: &'static str = "history";

    fn load(raw: &str) -> Self {
        Self {
            entries: load_entries(raw, Self::KIND),
        }
    }
}

impl History {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn entries(&self) -> &[HistoryEntry] {
        &self.entries
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn get(&self, uuid: &str) -> Option<&HistoryEntry> {
        self.entries.iter().find(|e| e.uuid == uuid)
    }

    /// Records a selection at the front, replacing any earlier entry with the
    /// same match id or display text, then caps the list at `max_items`.
    pub fn add(&mut self, candidate: HistoryCandidate, max_items: usize) {
        let HistoryCandidate {
            display,
            decoration,
            category,
            match_id,
            file_path,
            source_type,
            query_text,
        } = candidate;

        let category_name = category.as_deref().unwrap_or_default();
        let match_id = match_id.unwrap_or_default();
        let mut file_path = file_path.unwrap_or_default();

        let is_app = looks_like_application(category_name, &file_path, &match_id);
        if let Some(repaired) = repair_app_path(is_app, &file_path, &match_id) {
            debug!("History: using match id {} as launch path", repaired);
            file_path = repaired;
        }
        let now = now_millis();

        let existing = self
            .entries
            .iter()
            .position(|e| (!match_id.is_empty() && e.match_id == match_id) || e.display == display);

        let entry = match existing {
            Some(idx) => {
                let mut entry = self.entries.remove(idx);
                entry.query_text = query_text
                    .or_else(|| non_empty(Some(entry.query_text.clone())))
                    .unwrap_or_else(|| display.clone());
                entry.display = display;
                entry.timestamp = now;
                if !file_path.is_empty() {
                    entry.file_path = file_path;
                }
                entry.source_type = source_type.unwrap_or_else(|| {
                    detect_source_type(category_name, is_app, &entry.file_path)
                });
                entry.is_application = is_app;
                if let Some(category) = category {
                    entry.category = category;
                }
                debug!("History: refreshed {} ({})", entry.display, entry.uuid);
                entry
            }
            None => {
                let source_type = source_type
                    .unwrap_or_else(|| detect_source_type(category_name, is_app, &file_path));
                let entry = HistoryEntry {
                    uuid: generate_uuid(),
                    query_text: query_text.unwrap_or_else(|| display.clone()),
                    display,
                    decoration: decoration.unwrap_or_else(|| DEFAULT_DECORATION.to_string()),
                    category: category.unwrap_or_else(|| DEFAULT_CATEGORY.to_string()),
                    is_application: is_app,
                    match_id,
                    file_path,
                    source_type,
                    timestamp: now,
                };
                debug!("History: added {} ({})", entry.display, entry.uuid);
                entry
            }
        };

        self.entries.insert(0, entry);
        self.entries.truncate(max_items);
    }

    /// Splits into an applications group and an everything-else group,
    /// skipping empty groups.
    pub fn categorize(&self, app_label: &str, other_label: &str) -> Vec<HistoryGroup> {
        let (apps, others): (Vec<HistoryEntry>, Vec<HistoryEntry>) =
            self.entries.iter().cloned().partition(|e| e.is_application);

        [(app_label, apps), (other_label, others)]
            .into_iter()
            .filter(|(_, items)| !items.is_empty())
            .map(|(label, items)| HistoryGroup {
                label: label.to_string(),
                items,
            })
            .collect()
    }

    pub fn remove(&mut self, uuid: &str) -> bool {
        let before = self.entries.len();
        self.entries.retain(|e| e.uuid != uuid);
        self.entries.len() != before
    }

    pub fn clear(&mut self) {
        self.entries.clear();
    }

    pub fn update_icon(&mut self, uuid: &str, icon: &str) -> bool {
        match self.entries.iter_mut().find(|e| e.uuid == uuid) {
            Some(entry) => {
                entry.decoration = icon.to_string();
                true
            }
            None => false,
        }
    }
}
