use crate::model::ResultItem;
use crate::stores::{Persisted, load_entries};
use crate::util::{generate_uuid, now_millis};
use log::debug;
use serde::{Deserialize, Serialize};

/// Activity id of pins that are visible from every activity.
pub const GLOBAL_ACTIVITY: &str = "global";

const DEFAULT_DECORATION: &str = "application-x-executable";
const DEFAULT_CATEGORY: &str = "Diğer";

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PinnedEntry {
    #[serde(default = "generate_uuid")]
    pub uuid: String,
    #[serde(default)]
    pub display: String,
    #[serde(default)]
    pub decoration: String,
    #[serde(default)]
    pub category: String,
    #[serde(default)]
    pub match_id: String,
    #[serde(default)]
    pub file_path: String,
    #[serde(default = "global_activity")]
    pub activity_id: String,
    #[serde(default)]
    pub pinned_at: u64,
}

fn global_activity() -> String { GLOBAL_ACTIVITY.to_string() }

impl PinnedEntry {
    pub fn is_global(&self) -> bool {
        self.activity_id == GLOBAL_ACTIVITY
    }

    /// Whether this pin shows up when looking from `activity`. `None` matches any.
    fn visible_from(&self, activity: Option<&str>) -> bool {
        match activity {
            None => true,
            Some(activity) => self.is_global() || self.activity_id == activity,
        }
    }
}

// An empty activity id means no activity.
fn scope(activity: Option<&str>) -> Option<&str> {
    activity.filter(|a| !a.is_empty())
}

fn normalize_activity(activity: Option<&str>) -> &str {
    scope(activity).unwrap_or(GLOBAL_ACTIVITY)
}

/// Ordered pins, newest first unless the user reordered them.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Pinned {
    entries: Vec<PinnedEntry>,
}

impl Persisted for Pinned {
    const KIND: &'static str = "pinned items";

    fn load(raw: &str) -> Self {
        Self {
            entries: load_entries(raw, Self::KIND),
        }
    }
}

impl Pinned {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn entries(&self) -> &[PinnedEntry] {
        &self.entries
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Pins `item` for `activity` (global when `None`). Pinning the same
    /// match id twice for one activity is a no-op.
    pub fn pin(&mut self, item: &ResultItem, activity: Option<&str>) {
        let activity = normalize_activity(activity);
        let match_id = if item.match_id.is_empty() {
            item.display.as_str()
        } else {
            item.match_id.as_str()
        };

        if self
            .entries
            .iter()
            .any(|e| e.match_id == match_id && e.activity_id == activity)
        {
            return;
        }

        let entry = PinnedEntry {
            uuid: generate_uuid(),
            display: item.display.clone(),
            decoration: if item.decoration.is_empty() {
                DEFAULT_DECORATION.to_string()
            } else {
                item.decoration.clone()
            },
            category: if item.category.is_empty() {
                DEFAULT_CATEGORY.to_string()
            } else {
                item.category.clone()
            },
            match_id: match_id.to_string(),
            file_path: item
                .file_path
                .clone()
                .or_else(|| item.url.clone())
                .unwrap_or_default(),
            activity_id: activity.to_string(),
            pinned_at: now_millis(),
        };
        debug!("Pinned: {} for {}", entry.match_id, entry.activity_id);
        self.entries.insert(0, entry);
    }

    /// Removes the pin for one activity, or every pin of `match_id` when
    /// `activity` is `None`.
    pub fn unpin(&mut self, match_id: &str, activity: Option<&str>) {
        self.entries.retain(|e| match scope(activity) {
            Some(activity) => !(e.match_id == match_id && e.activity_id == activity),
            None => e.match_id != match_id,
        });
    }

    pub fn is_pinned(&self, match_id: &str, activity: Option<&str>) -> bool {
        self.pin_info(match_id, activity).is_some()
    }

    pub fn pin_info(&self, match_id: &str, activity: Option<&str>) -> Option<&PinnedEntry> {
        self.entries
            .iter()
            .find(|e| e.match_id == match_id && e.visible_from(scope(activity)))
    }

    pub fn toggle(&mut self, item: &ResultItem, activity: Option<&str>) {
        let match_id = if item.match_id.is_empty() { &item.display } else { &item.match_id };
        if self.is_pinned(match_id, activity) {
            self.unpin(match_id, activity);
        } else {
            self.pin(item, activity);
        }
    }

    pub fn list_for_activity(&self, activity: &str) -> Vec<&PinnedEntry> {
        self.entries
            .iter()
            .filter(|e| e.visible_from(Some(activity)))
            .collect()
    }

    /// Moves one pin; out-of-range or equal indices leave the order untouched.
    pub fn reorder(&mut self, from: usize, to: usize) {
        let len = self.entries.len();
        if from >= len || to >= len || from == to {
            return;
        }
        let entry = self.entries.remove(from);
        self.entries.insert(to, entry);
    }

    pub fn move_by_match_id(&mut self, match_id: &str, new_index: usize) {
        if let Some(current) = self.entries.iter().position(|e| e.match_id == match_id) {
            self.reorder(current, new_index);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn item(match_id: &str) -> ResultItem {
        ResultItem::new(match_id.to_uppercase(), "Applications").with_match_id(match_id)
    }

    fn ids(pinned: &Pinned) -> Vec<&str> {
        pinned.entries().iter().map(|e| e.match_id.as_str()).collect()
    }

    #[test]
    fn test_pin_defaults_to_global() {
        let mut pinned = Pinned::new();
        pinned.pin(&ResultItem::new("notes", ""), None);

        let entry = &pinned.entries()[0];
        assert!(entry.is_global());
        assert_eq!(entry.match_id, "notes");
        assert_eq!(entry.category, "Diğer");
        assert_eq!(entry.decoration, "application-x-executable");
        assert!(entry.pinned_at > 0);
    }

    #[test]
    fn test_pin_is_unique_per_activity() {
        let mut pinned = Pinned::new();
        pinned.pin(&item("kate"), Some("work"));
        pinned.pin(&item("kate"), Some("work"));
        assert_eq!(pinned.len(), 1);

        pinned.pin(&item("kate"), None);
        pinned.pin(&item("kate"), Some(GLOBAL_ACTIVITY));
        assert_eq!(pinned.len(), 2);
    }

    #[test]
    fn test_global_pin_is_visible_everywhere() {
        let mut pinned = Pinned::new();
        pinned.pin(&item("kate"), None);
        pinned.pin(&item("dolphin"), Some("home"));

        assert!(pinned.is_pinned("kate", Some("work")));
        assert!(pinned.is_pinned("dolphin", None));
        assert!(!pinned.is_pinned("dolphin", Some("work")));
        assert_eq!(pinned.pin_info("dolphin", Some("home")).unwrap().activity_id, "home");
    }

    #[test]
    fn test_unpin_scoped_and_unscoped() {
        let mut pinned = Pinned::new();
        pinned.pin(&item("kate"), None);
        pinned.pin(&item("kate"), Some("work"));
        pinned.pin(&item("dolphin"), Some("work"));

        pinned.unpin("kate", Some("work"));
        assert_eq!(pinned.len(), 2);
        assert!(pinned.is_pinned("kate", Some("work")));

        pinned.pin(&item("kate"), Some("home"));
        pinned.unpin("kate", None);
        assert_eq!(ids(&pinned), vec!["dolphin"]);
    }

    #[test]
    fn test_toggle() {
        let mut pinned = Pinned::new();
        pinned.toggle(&item("kate"), Some("work"));
        assert!(pinned.is_pinned("kate", Some("work")));
        pinned.toggle(&item("kate"), Some("work"));
        assert!(pinned.is_empty());
    }

    #[test]
    fn test_empty_activity_behaves_like_none() {
        let mut pinned = Pinned::new();
        pinned.toggle(&item("kate"), Some(""));
        assert!(pinned.entries()[0].is_global());
        assert!(pinned.is_pinned("kate", Some("")));

        pinned.toggle(&item("kate"), Some(""));
        assert!(pinned.is_empty());

        pinned.pin(&item("kate"), Some("work"));
        assert!(pinned.is_pinned("kate", Some("")));
        pinned.unpin("kate", Some(""));
        assert!(pinned.is_empty());
    }

    #[test]
    fn test_list_for_activity_keeps_order() {
        let mut pinned = Pinned::new();
        pinned.pin(&item("a"), Some("work"));
        pinned.pin(&item("b"), None);
        pinned.pin(&item("c"), Some("home"));

        let work: Vec<&str> = pinned
            .list_for_activity("work")
            .iter()
            .map(|e| e.match_id.as_str())
            .collect();
        assert_eq!(work, vec!["b", "a"]);
    }

    #[test]
    fn test_reorder() {
        let mut pinned = Pinned::new();
        for id in ["c", "b", "a"] {
            pinned.pin(&item(id), None);
        }
        assert_eq!(ids(&pinned), vec!["a", "b", "c"]);

        pinned.reorder(0, 2);
        assert_eq!(ids(&pinned), vec!["b", "c", "a"]);

        pinned.reorder(1, 1);
        pinned.reorder(5, 0);
        pinned.reorder(0, 3);
        assert_eq!(ids(&pinned), vec!["b", "c", "a"]);
    }

    #[test]
    fn test_move_by_match_id() {
        let mut pinned = Pinned::new();
        for id in ["c", "b", "a"] {
            pinned.pin(&item(id), None);
        }
        pinned.move_by_match_id("c", 0);
        assert_eq!(ids(&pinned), vec!["c", "a", "b"]);

        pinned.move_by_match_id("missing", 0);
        assert_eq!(ids(&pinned), vec!["c", "a", "b"]);
    }

    #[test]
    fn test_load_and_save() {
        let mut pinned = Pinned::new();
        pinned.pin(&item("kate").with_file_path("/usr/bin/kate"), Some("work"));
        let restored = Pinned::load(&pinned.save());
        assert_eq!(restored, pinned);

        let partial = Pinned::load(r#"[{"matchId":"x"}]"#);
        assert!(partial.entries()[0].is_global());
        assert!(Pinned::load("[{").is_empty());
    }

    #[test]
    fn test_load_skips_undecodable_entries() {
        let pinned = Pinned::load(
            r#"[{"matchId":"a"},{"matchId":7},{"matchId":"b","pinnedAt":"now"},{"matchId":"c"}]"#,
        );
        assert_eq!(ids(&pinned), vec!["a", "c"]);
    }
}
