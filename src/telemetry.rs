//! Local search latency statistics. Never leaves the machine.

use crate::stores::Persisted;
use crate::util::now_millis;
use serde::{Deserialize, Serialize};

const BACKEND: &str = "Milou/KRunner";

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SearchStats {
    pub total_searches: u64,
    #[serde(default)]
    pub average_latency: u64,
    #[serde(default)]
    pub total_latency_sum: u64,
    #[serde(default)]
    pub last_reset: u64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub last_updated: Option<u64>,
    #[serde(default = "default_backend")]
    pub backend: String,
}

fn default_backend() -> String { BACKEND.to_string() }

impl Default for SearchStats {
    fn default() -> Self {
        Self {
            total_searches: 0,
            average_latency: 0,
            total_latency_sum: 0,
            last_reset: now_millis(),
            last_updated: None,
            backend: default_backend(),
        }
    }
}

// `totalSearches` is required, so stats written by something else load as fresh.
impl Persisted for SearchStats {
    const KIND: &'static str = "search stats";
}

impl SearchStats {
    pub fn record_search(&mut self, latency_ms: u64) {
        self.total_searches += 1;
        self.total_latency_sum += latency_ms;
        self.average_latency =
            (self.total_latency_sum as f64 / self.total_searches as f64).round() as u64;
        self.last_updated = Some(now_millis());
    }

    pub fn reset(&mut self) {
        *self = Self::default();
    }
}
