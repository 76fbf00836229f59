//! Per-category visibility, priority and icon settings.
//!
//! Lower priority values sort earlier. Categories without stored settings fall
//! back to a built-in table of well-known names (English and Turkish pairs),
//! then to [`DEFAULT_PRIORITY`]. Every operation is total: unknown names are
//! defaulted, never rejected.

use crate::stores::Persisted;
use serde::{Deserialize, Deserializer, Serialize};
use std::collections::HashMap;

pub const DEFAULT_PRIORITY: i64 = 50;

const BUILTIN_PRIORITIES: &[(&str, i64)] = &[
    ("Applications", 1),
    ("Uygulamalar", 1),
    ("Files", 2),
    ("Dosyalar", 2),
    ("Documents", 3),
    ("Belgeler", 3),
    ("Folders", 4),
    ("Klasörler", 4),
    ("Calculator", 5),
    ("Hesap Makinesi", 5),
    ("Web", 6),
    ("Other", 100),
    ("Diğer", 100),
];

pub fn builtin_priority(category: &str) -> Option<i64> {
    BUILTIN_PRIORITIES
        .iter()
        .find(|(name, _)| *name == category)
        .map(|(_, priority)| *priority)
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CategorySetting {
    #[serde(default = "default_visible", deserialize_with = "lenient_visible")]
    pub visible: bool,
    #[serde(default, deserialize_with = "lenient_priority")]
    pub priority: Option<i64>,
    #[serde(default)]
    pub icon: Option<String>,
}

fn default_visible() -> bool { true }

// Only an explicit `false` hides a category.
fn lenient_visible<'de, D>(deserializer: D) -> Result<bool, D::Error>
where
    D: Deserializer<'de>,
{
    let value = serde_json::Value::deserialize(deserializer)?;
    Ok(!matches!(value, serde_json::Value::Bool(false)))
}

// Anything but an integer (strings, fractions, out-of-range numbers) is
// treated as unset, so a stored value is never silently rewritten.
fn lenient_priority<'de, D>(deserializer: D) -> Result<Option<i64>, D::Error>
where
    D: Deserializer<'de>,
{
    let value = serde_json::Value::deserialize(deserializer)?;
    Ok(value.as_i64().or_else(|| {
        value
            .as_f64()
            .filter(|f| f.fract() == 0.0 && f.abs() < i64::MAX as f64)
            .map(|f| f as i64)
    }))
}

impl CategorySetting {
    fn for_category(category: &str) -> Self {
        Self {
            visible: true,
            priority: Some(builtin_priority(category).unwrap_or(DEFAULT_PRIORITY)),
            icon: None,
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct CategorySettings {
    entries: HashMap<String, CategorySetting>,
}

impl Persisted for CategorySettings {
    const KIND: &'static str = "category settings";
}

impl CategorySettings {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn get(&self, category: &str) -> Option<&CategorySetting> {
        self.entries.get(category)
    }

    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.entries.keys().map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    fn ensure(&mut self, category: &str) -> &mut CategorySetting {
        self.entries
            .entry(category.to_string())
            .or_insert_with(|| CategorySetting::for_category(category))
    }

    pub fn resolve_priority(&self, category: &str) -> i64 {
        self.entries
            .get(category)
            .and_then(|s| s.priority)
            .or_else(|| builtin_priority(category))
            .unwrap_or(DEFAULT_PRIORITY)
    }

    pub fn is_visible(&self, category: &str) -> bool {
        self.entries.get(category).is_none_or(|s| s.visible)
    }

    pub fn set_visibility(&mut self, category: &str, visible: bool) {
        self.ensure(category).visible = visible;
    }

    pub fn set_priority(&mut self, category: &str, priority: i64) {
        self.ensure(category).priority = Some(priority);
    }

    pub fn set_icon(&mut self, category: &str, icon: Option<String>) {
        self.ensure(category).icon = icon;
    }

    /// Custom icon if one is set, otherwise `default_icon`.
    pub fn effective_icon<'a>(&'a self, category: &str, default_icon: &'a str) -> &'a str {
        self.entries
            .get(category)
            .and_then(|s| s.icon.as_deref())
            .filter(|icon| !icon.is_empty())
            .unwrap_or(default_icon)
    }

    pub fn sort_by_priority<S: AsRef<str>>(&self, categories: &mut [S]) {
        categories.sort_by_key(|c| self.resolve_priority(c.as_ref()));
    }

    pub fn sorted_names<S: AsRef<str>>(&self, categories: &[S]) -> Vec<String> {
        let mut names: Vec<String> = categories.iter().map(|c| c.as_ref().to_string()).collect();
        self.sort_by_priority(&mut names);
        names
    }

    pub fn filter_hidden<S: AsRef<str>>(&self, categories: &[S]) -> Vec<String> {
        categories
            .iter()
            .map(|c| c.as_ref())
            .filter(|c| self.is_visible(c))
            .map(str::to_string)
            .collect()
    }

    /// Hidden categories removed, remaining ones in display order.
    pub fn process<S: AsRef<str>>(&self, categories: &[S]) -> Vec<String> {
        let mut visible = self.filter_hidden(categories);
        self.sort_by_priority(&mut visible);
        visible
    }

    /// Categories offered for manual ordering, in display order.
    ///
    /// Each built-in group (a name and its translation) contributes the
    /// members that are stored or in `present`, or its first name when
    /// neither is. Other stored and present names follow alphabetically.
    pub fn ordering_names(&self, present: &[&str]) -> Vec<String> {
        let in_use = |name: &str| self.entries.contains_key(name) || present.contains(&name);
        let mut names: Vec<String> = Vec::new();
        let mut seen_priorities: Vec<i64> = Vec::new();

        for &(first, priority) in BUILTIN_PRIORITIES {
            if seen_priorities.contains(&priority) {
                continue;
            }
            seen_priorities.push(priority);

            let used: Vec<&str> = BUILTIN_PRIORITIES
                .iter()
                .filter(|(name, p)| *p == priority && in_use(*name))
                .map(|(name, _)| *name)
                .collect();
            if used.is_empty() {
                names.push(first.to_string());
            } else {
                names.extend(used.into_iter().map(str::to_string));
            }
        }

        let mut custom: Vec<&str> = self
            .names()
            .chain(present.iter().copied())
            .filter(|name| builtin_priority(name).is_none())
            .collect();
        custom.sort_unstable();
        custom.dedup();
        names.extend(custom.into_iter().map(str::to_string));

        self.sorted_names(&names)
    }

    pub fn move_up<S: AsRef<str>>(&mut self, category: &str, all_categories: &[S]) {
        let sorted = self.sorted_names(all_categories);
        let Some(idx) = sorted.iter().position(|c| c == category) else {
            return;
        };
        if idx > 0 {
            self.swap_priorities(category, &sorted[idx - 1]);
        }
    }

    pub fn move_down<S: AsRef<str>>(&mut self, category: &str, all_categories: &[S]) {
        let sorted = self.sorted_names(all_categories);
        let Some(idx) = sorted.iter().position(|c| c == category) else {
            return;
        };
        if idx + 1 < sorted.len() {
            self.swap_priorities(category, &sorted[idx + 1]);
        }
    }

    fn swap_priorities(&mut self, a: &str, b: &str) {
        let prio_a = self.resolve_priority(a);
        let prio_b = self.resolve_priority(b);
        self.set_priority(a, prio_b);
        self.set_priority(b, prio_a);
    }

    /// Persists a full user ordering as priorities 1..=N.
    pub fn reorder_all<S: AsRef<str>>(&mut self, ordered: &[S]) {
        for (i, category) in ordered.iter().enumerate() {
            self.set_priority(category.as_ref(), i as i64 + 1);
        }
    }
}
