//! Ranking, dedup, history and pinning core of a desktop file-search launcher.
//!
//! Everything here is synchronous value-semantics data: callers own each store,
//! mutate it through its methods and persist the JSON string it saves.

pub mod category;
pub mod config;
pub mod error;
pub mod icons;
pub mod matcher;
pub mod model;
pub mod state;
pub mod storage;
pub mod stores;
pub mod telemetry;
pub mod util;

pub use category::CategorySettings;
pub use model::{ResultItem, SourceType};
pub use state::{RankingEngine, SearchSession};
pub use stores::Persisted;
pub use stores::history::{History, HistoryCandidate, HistoryEntry};
pub use stores::pinned::{Pinned, PinnedEntry, GLOBAL_ACTIVITY};
