use std::collections::HashMap;
use std::fmt;

use anaphora_protocol::{Gender, Number, Word};
use log::{debug, warn};
use serde::Serialize;

use crate::phrase::{PhraseKey, PhraseRef};

/// Cap on candidates kept per anaphor for a store built with
/// [`AntecedentStore::new`]. The resolver caps at its proposal budget.
pub const DEFAULT_MAX_CANDIDATES: usize = 20;

/// Agreement checks run on every proposed candidate, in the store's order.
/// The first filter that rejects wins.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Filter {
    /// A pronoun never antecedes another pronoun.
    AntiAnaphora,
    Number,
    Gender,
    /// Candidates without a leader cannot be checked, so they go.
    NullLeader,
}

impl Filter {
    pub const DEFAULT_ORDER: [Filter; 4] =
        [Filter::AntiAnaphora, Filter::Number, Filter::Gender, Filter::NullLeader];

    /// True if `candidate` (the leader of the proposed phrase) cannot
    /// refer back to `anaphor`.
    ///
    /// Only `NullLeader` cares about a missing candidate leader; the others
    /// pass it through.
    pub fn rejects(self, anaphor: &Word, candidate: Option<&Word>) -> bool {
        match self {
            Filter::AntiAnaphora => candidate.map_or(false, Word::is_pronoun),
            Filter::Number => {
                candidate.map_or(false, |c| number_disagrees(anaphor.number, c.number))
            }
            Filter::Gender => {
                candidate.map_or(false, |c| gender_disagrees(anaphor.gender, c.gender))
            }
            Filter::NullLeader => candidate.is_none(),
        }
    }
}

impl fmt::Display for Filter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Filter::AntiAnaphora => "anti-anaphora",
            Filter::Number => "number",
            Filter::Gender => "gender",
            Filter::NullLeader => "null-leader",
        };
        f.write_str(name)
    }
}

fn number_disagrees(anaphor: Option<Number>, candidate: Option<Number>) -> bool {
    match (anaphor, candidate) {
        (_, None) => false,
        // An unmarked anaphor still reads as singular
        (None, Some(c)) => c == Number::Plural,
        (Some(a), Some(c)) => a != c,
    }
}

fn gender_disagrees(anaphor: Option<Gender>, candidate: Option<Gender>) -> bool {
    let anaphor = anaphor.unwrap_or(Gender::Neuter);
    let candidate = candidate.unwrap_or(Gender::Neuter);

    match (anaphor, candidate) {
        (a, c) if a == c => false,
        (Gender::Masculine | Gender::Feminine, Gender::Person) => false,
        _ => true,
    }
}

struct AnaphorEntry {
    anaphor: PhraseRef,
    label: String,
    candidates: Vec<PhraseRef>,
}

/// One anaphor's candidates in plain strings, ready to print or serialise.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ExportedAnaphor {
    /// The anaphor's leader word.
    pub anaphor: String,
    /// Leader word plus a store-wide ordinal, unique per anaphor.
    pub label: String,
    /// Candidate leader words, best first.
    pub candidates: Vec<String>,
}

/// Ranked candidate lists, one per anaphor, in the order anaphors were
/// first seen.
pub struct AntecedentStore {
    filters: Vec<Filter>,
    max_candidates: usize,
    entries: Vec<AnaphorEntry>,
    index: HashMap<PhraseKey, usize>,
}

impl AntecedentStore {
    pub fn new() -> Self {
        Self::with_filters(Filter::DEFAULT_ORDER.to_vec(), DEFAULT_MAX_CANDIDATES)
    }

    /// A store running only `filters`, in that order. An empty list accepts
    /// everything the structural walk proposes.
    pub fn with_filters(filters: Vec<Filter>, max_candidates: usize) -> Self {
        Self { filters, max_candidates, entries: Vec::new(), index: HashMap::new() }
    }

    pub fn filters(&self) -> &[Filter] {
        &self.filters
    }

    pub fn max_candidates(&self) -> usize {
        self.max_candidates
    }

    /// Register `anaphor` so it shows up in exports even if nothing is
    /// ever accepted for it. Idempotent.
    pub fn track(&mut self, anaphor: &PhraseRef) {
        self.entry_index(anaphor);
    }

    fn entry_index(&mut self, anaphor: &PhraseRef) -> usize {
        let key = anaphor.key();
        if let Some(&i) = self.index.get(&key) {
            return i;
        }

        let i = self.entries.len();
        let word = anaphor.leader_text().unwrap_or("_");
        self.entries.push(AnaphorEntry {
            anaphor: anaphor.clone(),
            label: format!("{}_{}", word, i + 1),
            candidates: Vec::new(),
        });
        self.index.insert(key, i);
        i
    }

    /// Offer `candidate` for `anaphor`. Returns true if it was appended.
    ///
    /// Rejects the anaphor itself, repeats, anything past the cap, and
    /// whatever a filter vetoes.
    pub fn add(&mut self, anaphor: &PhraseRef, candidate: PhraseRef) -> bool {
        let Some(anaphor_word) = anaphor.leader() else {
            warn!("anaphor {:?} has no leader; dropping candidate", anaphor.key());
            return false;
        };

        if candidate == *anaphor {
            return false;
        }

        let candidate_word = candidate.leader();
        if let Some(filter) = self
            .filters
            .iter()
            .copied()
            .find(|f| f.rejects(anaphor_word, candidate_word))
        {
            debug!(
                "{} filter rejected {:?} for '{}'",
                filter,
                candidate_word.map(|w| w.text.as_str()),
                anaphor_word.text
            );
            return false;
        }

        let i = self.entry_index(anaphor);
        let entry = &mut self.entries[i];
        if entry.candidates.len() >= self.max_candidates || entry.candidates.contains(&candidate) {
            return false;
        }

        debug!(
            "accepted '{}' for '{}' at rank {}",
            candidate_word.map_or("_", |w| w.text.as_str()),
            anaphor_word.text,
            entry.candidates.len()
        );
        entry.candidates.push(candidate);
        true
    }

    /// Candidates for `anaphor`, best first. Empty if it was never seen.
    pub fn candidates(&self, anaphor: &PhraseRef) -> &[PhraseRef] {
        self.index
            .get(&anaphor.key())
            .map(|&i| self.entries[i].candidates.as_slice())
            .unwrap_or(&[])
    }

    /// Every tracked anaphor with its candidates, in first-seen order.
    pub fn iter(&self) -> impl Iterator<Item = (&PhraseRef, &[PhraseRef])> {
        self.entries.iter().map(|e| (&e.anaphor, e.candidates.as_slice()))
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Forget every anaphor and restart label numbering.
    pub fn clear(&mut self) {
        self.entries.clear();
        self.index.clear();
    }

    /// Plain-string view. Anaphors without a leader are left out;
    /// candidates without one are skipped.
    pub fn export(&self) -> Vec<ExportedAnaphor> {
        self.entries
            .iter()
            .filter_map(|entry| {
                let anaphor = entry.anaphor.leader_text()?;
                Some(ExportedAnaphor {
                    anaphor: anaphor.to_string(),
                    label: entry.label.clone(),
                    candidates: entry
                        .candidates
                        .iter()
                        .filter_map(|c| c.leader_text().map(str::to_string))
                        .collect(),
                })
            })
            .collect()
    }
}

impl Default for AntecedentStore {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Debug for AntecedentStore {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("AntecedentStore")
            .field("filters", &self.filters)
            .field("max_candidates", &self.max_candidates)
            .field("anaphors", &self.entries.len())
            .finish()
    }
}

/// One `_ante_candidate(label, word) {rank}` line per candidate.
impl fmt::Display for AntecedentStore {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for exported in self.export() {
            for (rank, candidate) in exported.candidates.iter().enumerate() {
                writeln!(f, "_ante_candidate({}, {}) {{{}}}", exported.label, candidate, rank)?;
            }
        }
        Ok(())
    }
}
