use log::warn;
use serde::Serialize;
use serde::de::DeserializeOwned;

/// A collection persisted as a single JSON string owned by the caller.
///
/// Loading never fails: blank input yields the empty collection and malformed
/// input is logged and replaced by it.
pub trait Persisted: Serialize + DeserializeOwned + Default {
    const KIND: &'static str;

    fn load(raw: &str) -> Self {
        if raw.trim().is_empty() {
            return Self::default();
        }
        match serde_json::from_str(raw) {
            Ok(value) => value,
            Err(e) => {
                warn!("Failed to parse stored {}: {}", Self::KIND, e);
                Self::default()
            }
        }
    }

    fn save(&self) -> String {
        serde_json::to_string(self).unwrap_or_else(|e| {
            warn!("Failed to encode {}: {}", Self::KIND, e);
            String::new()
        })
    }
}

/// Decodes a stored JSON array one entry at a time. Entries that fail to
/// decode are logged and skipped; the rest are kept.
pub(crate) fn load_entries<T: DeserializeOwned>(raw: &str, kind: &str) -> Vec<T> {
    if raw.trim().is_empty() {
        return Vec::new();
    }
    let values: Vec<serde_json::Value> = match serde_json::from_str(raw) {
        Ok(values) => values,
        Err(e) => {
            warn!("Failed to parse stored {}: {}", kind, e);
            return Vec::new();
        }
    };
    values
        .into_iter()
        .enumerate()
        .filter_map(|(i, value)| match serde_json::from_value(value) {
            Ok(entry) => Some(entry),
            Err(e) => {
                warn!("Skipping stored {} entry {}: {}", kind, i, e);
                None
            }
        })
        .collect()
}

pub mod history;
pub mod pinned;
