use crate::category::CategorySettings;
use crate::config::{Config, Feature};
use crate::matcher::rank_by_priority_then_similarity;
use crate::model::ResultItem;
use crate::stores::history::{History, HistoryCandidate, HistoryGroup};
use crate::stores::pinned::{Pinned, PinnedEntry};
use crate::telemetry::SearchStats;

/// Hidden categories out, then priority and similarity ordering.
pub struct RankingEngine<'a> {
    settings: &'a CategorySettings,
}

impl<'a> RankingEngine<'a> {
    pub fn new(settings: &'a CategorySettings) -> Self {
        Self { settings }
    }

    pub fn rank(&self, results: Vec<ResultItem>, query: &str) -> Vec<ResultItem> {
        let total = results.len();
        let mut visible: Vec<ResultItem> = results
            .into_iter()
            .filter(|item| self.settings.is_visible(item.category_or_other()))
            .collect();
        rank_by_priority_then_similarity(&mut visible, query, self.settings);
        log::info!("RankingEngine: query='{}', kept {}/{}", query, visible.len(), total);
        visible
    }
}

/// Everything one search widget instance owns. Callers load the stores from
/// their persisted strings, drive the session and save after each mutation.
pub struct SearchSession {
    pub config: Config,

    pub categories: CategorySettings,

    pub history: History,

    pub pinned: Pinned,

    pub stats: SearchStats,

    pub query: String,

    pub results: Vec<ResultItem>,

    pub ranked: Vec<ResultItem>,

    pub selected_index: usize,

    pub activity: String,
}

impl SearchSession {
    pub fn new(config: Config) -> Self {
        let activity = config.general.activity.clone();
        Self {
            config,
            categories: CategorySettings::new(),
            history: History::new(),
            pinned: Pinned::new(),
            stats: SearchStats::default(),
            query: String::new(),
            results: Vec::new(),
            ranked: Vec::new(),
            selected_index: 0,
            activity,
        }
    }

    pub fn with_stores(mut self, categories: CategorySettings, history: History, pinned: Pinned) -> Self {
        self.categories = categories;
        self.history = history;
        self.pinned = pinned;
        self.update_filter();
        self
    }

    pub fn set_results(&mut self, results: Vec<ResultItem>) {
        self.results = results;
        self.update_filter();
    }

    pub fn update_query(&mut self, query: &str) {
        self.query = query.to_string();
        self.update_filter();
    }

    pub fn update_filter(&mut self) {
        let engine = RankingEngine::new(&self.categories);
        self.ranked = engine.rank(self.results.clone(), &self.query);
        self.selected_index = 0;
    }

    pub fn move_selection(&mut self, delta: i32) {
        if self.ranked.is_empty() {
            self.selected_index = 0;
            return;
        }

        let len = self.ranked.len() as i32;
        let new_index = (self.selected_index as i32 + delta).rem_euclid(len);
        self.selected_index = new_index as usize;
    }

    pub fn selected(&self) -> Option<&ResultItem> {
        self.ranked.get(self.selected_index)
    }

    /// Adds the selected result to history. Returns false with nothing selected.
    pub fn record_selection(&mut self) -> bool {
        let Some(item) = self.ranked.get(self.selected_index) else {
            return false;
        };
        let candidate = HistoryCandidate::from_result(item, &self.query);
        let max_items = self.config.general.max_history_items();
        self.history.add(candidate, max_items);
        true
    }

    pub fn toggle_pin_selected(&mut self) -> bool {
        let Some(item) = self.ranked.get(self.selected_index) else {
            return false;
        };
        self.pinned.toggle(item, Some(&self.activity));
        true
    }

    pub fn pinned_view(&self) -> Vec<&PinnedEntry> {
        self.pinned.list_for_activity(&self.activity)
    }

    pub fn history_view(&self, app_label: &str, other_label: &str) -> Vec<HistoryGroup> {
        self.history.categorize(app_label, other_label)
    }

    /// Counts a finished search when the profile has telemetry enabled.
    pub fn record_search(&mut self, latency_ms: u64) -> bool {
        if !self.config.general.profile.allows(Feature::Telemetry) {
            return false;
        }
        self.stats.record_search(latency_ms);
        true
    }
}
