use std::collections::VecDeque;
use std::sync::{Arc, Mutex};
use std::time::{Duration, Instant};

use anaphora_parser::PhraseTree;
use anaphora_protocol::SentenceId;
use log::trace;

use crate::config::{HistoryKind, ResolverConfig};

/// A finished sentence kept for cross-sentence search. Only the primary
/// parse is kept; sentences the parser could not render have no tree but
/// still take a slot.
#[derive(Debug, Clone)]
pub struct SentenceRecord {
    id: SentenceId,
    tree: Option<Arc<PhraseTree>>,
}

impl SentenceRecord {
    pub fn new(id: SentenceId, tree: Option<Arc<PhraseTree>>) -> Self {
        Self { id, tree }
    }

    pub fn from_tree(tree: Arc<PhraseTree>) -> Self {
        Self { id: tree.sentence(), tree: Some(tree) }
    }

    pub fn id(&self) -> SentenceId {
        self.id
    }

    pub fn tree(&self) -> Option<&Arc<PhraseTree>> {
        self.tree.as_ref()
    }
}

/// Buffer of previously processed sentences, most recent first.
pub trait SentenceHistory: Send {
    fn add_sentence(&mut self, record: SentenceRecord);

    /// The live window, most recent first. Time-based policies drop
    /// expired entries here, hence `&mut self`.
    fn sentence_list(&mut self) -> Vec<SentenceRecord>;

    fn clear(&mut self);
}

/// Keeps at most `max_sentences` records, evicting the oldest on insert.
#[derive(Debug, Clone)]
pub struct CountBoundHistory {
    records: VecDeque<SentenceRecord>,
    max_sentences: usize,
}

impl CountBoundHistory {
    pub fn new(max_sentences: usize) -> Self {
        Self { records: VecDeque::new(), max_sentences }
    }
}

impl Default for CountBoundHistory {
    fn default() -> Self {
        Self::new(crate::config::DEFAULT_HISTORY_DEPTH)
    }
}

impl SentenceHistory for CountBoundHistory {
    fn add_sentence(&mut self, record: SentenceRecord) {
        self.records.push_front(record);
        self.records.truncate(self.max_sentences);
    }

    fn sentence_list(&mut self) -> Vec<SentenceRecord> {
        self.records.iter().cloned().collect()
    }

    fn clear(&mut self) {
        self.records.clear();
    }
}

/// Time source for [`TimeWindowHistory`].
pub trait Clock: Send {
    fn now(&self) -> Instant;
}

#[derive(Debug, Clone, Copy, Default)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn now(&self) -> Instant {
        Instant::now()
    }
}

/// A clock that only moves when told to. Clones share the same time.
#[derive(Debug, Clone)]
pub struct ManualClock {
    now: Arc<Mutex<Instant>>,
}

impl ManualClock {
    pub fn new() -> Self {
        Self { now: Arc::new(Mutex::new(Instant::now())) }
    }

    pub fn advance(&self, by: Duration) {
        let mut now = self.now.lock().unwrap_or_else(|poisoned| poisoned.into_inner());
        *now += by;
    }
}

impl Default for ManualClock {
    fn default() -> Self {
        Self::new()
    }
}

impl Clock for ManualClock {
    fn now(&self) -> Instant {
        *self.now.lock().unwrap_or_else(|poisoned| poisoned.into_inner())
    }
}

/// Keeps sentences no older than `max_age`. Expiry happens when the list
/// is read, not on insert.
#[derive(Debug)]
pub struct TimeWindowHistory<C: Clock = SystemClock> {
    entries: VecDeque<(Instant, SentenceRecord)>,
    max_age: Duration,
    clock: C,
}

impl TimeWindowHistory<SystemClock> {
    pub fn new(max_age: Duration) -> Self {
        Self::with_clock(max_age, SystemClock)
    }
}

impl<C: Clock> TimeWindowHistory<C> {
    pub fn with_clock(max_age: Duration, clock: C) -> Self {
        Self { entries: VecDeque::new(), max_age, clock }
    }
}

impl<C: Clock> SentenceHistory for TimeWindowHistory<C> {
    fn add_sentence(&mut self, record: SentenceRecord) {
        self.entries.push_front((self.clock.now(), record));
    }

    fn sentence_list(&mut self) -> Vec<SentenceRecord> {
        let now = self.clock.now();
        let max_age = self.max_age;
        let before = self.entries.len();

        self.entries
            .retain(|(stamp, _)| now.saturating_duration_since(*stamp) <= max_age);

        let expired = before - self.entries.len();
        if expired > 0 {
            trace!("dropped {} sentence(s) older than {:?}", expired, max_age);
        }

        self.entries.iter().map(|(_, record)| record.clone()).collect()
    }

    fn clear(&mut self) {
        self.entries.clear();
    }
}

/// Build the history policy a config asks for.
pub fn history_for(config: &ResolverConfig) -> Box<dyn SentenceHistory> {
    match config.history {
        HistoryKind::Count => Box::new(CountBoundHistory::new(config.history_depth)),
        HistoryKind::Time => Box::new(TimeWindowHistory::new(config.history_window())),
    }
}
