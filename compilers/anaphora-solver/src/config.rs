use std::time::Duration;

use serde::{Deserialize, Serialize};

pub const DEFAULT_HISTORY_DEPTH: usize = 20;
pub const DEFAULT_HISTORY_WINDOW_SECS: u64 = 20 * 60;
pub const DEFAULT_MAX_PROPOSALS: usize = 10;

/// Which retention policy the sentence history uses.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum HistoryKind {
    /// Keep the last `history_depth` sentences.
    #[default]
    Count,
    /// Keep sentences younger than `history_window_secs`.
    Time,
}

/// Process-wide resolver settings. Every field has a default, so a config
/// file only needs the keys it changes.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ResolverConfig {
    pub history: HistoryKind,
    pub history_depth: usize,
    pub history_window_secs: u64,
    /// Cap on structural proposals per anaphor, across the current
    /// sentence and history.
    pub max_proposals: usize,
    /// Let PP count as a stopping node when climbing from the pronoun, so
    /// "The window had a crack in it" can reach "window".
    pub modified_step_two: bool,
    /// Same switch for the contra-index check's own climb. Kept separate:
    /// the two climbs need not agree on PP.
    pub contra_index_stops_at_pp: bool,
}

impl ResolverConfig {
    pub fn history_window(&self) -> Duration {
        Duration::from_secs(self.history_window_secs)
    }
}

impl Default for ResolverConfig {
    fn default() -> Self {
        Self {
            history: HistoryKind::Count,
            history_depth: DEFAULT_HISTORY_DEPTH,
            history_window_secs: DEFAULT_HISTORY_WINDOW_SECS,
            max_proposals: DEFAULT_MAX_PROPOSALS,
            modified_step_two: true,
            contra_index_stops_at_pp: false,
        }
    }
}
