use std::collections::HashSet;

use crate::phrase::PhraseKey;

/// Visited set for the Hobbs climb, keyed by (anaphor, node).
///
/// Each anaphor gets its own namespace, so one anaphor's walk never hides
/// nodes from another's.
#[derive(Debug, Default, Clone)]
pub struct MarkSet {
    marks: HashSet<(PhraseKey, PhraseKey)>,
}

impl MarkSet {
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns false if the pair was already marked.
    pub fn mark(&mut self, anaphor: PhraseKey, node: PhraseKey) -> bool {
        self.marks.insert((anaphor, node))
    }

    pub fn is_marked(&self, anaphor: PhraseKey, node: PhraseKey) -> bool {
        self.marks.contains(&(anaphor, node))
    }

    pub fn len(&self) -> usize {
        self.marks.len()
    }

    pub fn is_empty(&self) -> bool {
        self.marks.is_empty()
    }

    pub fn clear(&mut self) {
        self.marks.clear();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use anaphora_protocol::{NodeId, SentenceId};

    fn key(sentence: u32, node: u32) -> PhraseKey {
        PhraseKey { sentence: SentenceId(sentence), node: NodeId(node) }
    }

    #[test]
    fn test_marks_are_per_anaphor() {
        let mut marks = MarkSet::new();
        let she = key(1, 4);
        let it = key(1, 7);

        assert!(marks.mark(she, key(1, 2)));
        assert!(!marks.mark(she, key(1, 2)));
        assert!(marks.is_marked(she, key(1, 2)));
        assert!(!marks.is_marked(it, key(1, 2)));
        // Same node id in another sentence is another node
        assert!(!marks.is_marked(she, key(0, 2)));
        assert_eq!(marks.len(), 1);
    }
}
