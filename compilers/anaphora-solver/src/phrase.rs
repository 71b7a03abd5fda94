use std::hash::{Hash, Hasher};
use std::sync::Arc;

use anaphora_parser::{PhraseTree, PhraseType};
use anaphora_protocol::{NodeId, SentenceId, Word};

/// Identity of a phrase node across all sentences seen so far.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct PhraseKey {
    pub sentence: SentenceId,
    pub node: NodeId,
}

/// Handle to one node of a shared sentence tree.
///
/// Equality and hashing go by identity (sentence + node), never by the
/// phrase's content: two "(NP it)" nodes are different phrases.
#[derive(Debug, Clone)]
pub struct PhraseRef {
    tree: Arc<PhraseTree>,
    node: NodeId,
}

impl PhraseRef {
    pub fn new(tree: Arc<PhraseTree>, node: NodeId) -> Self {
        Self { tree, node }
    }

    pub fn tree(&self) -> &Arc<PhraseTree> {
        &self.tree
    }

    pub fn node(&self) -> NodeId {
        self.node
    }

    pub fn key(&self) -> PhraseKey {
        PhraseKey { sentence: self.tree.sentence(), node: self.node }
    }

    pub fn kind(&self) -> &PhraseType {
        self.tree.kind(self.node)
    }

    pub fn leader(&self) -> Option<&Word> {
        self.tree.leader_word(self.node)
    }

    /// Surface form of the leader, if the phrase has one.
    pub fn leader_text(&self) -> Option<&str> {
        self.leader().map(|w| w.text.as_str())
    }
}

impl PartialEq for PhraseRef {
    fn eq(&self, other: &Self) -> bool {
        self.key() == other.key()
    }
}

impl Eq for PhraseRef {}

impl Hash for PhraseRef {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.key().hash(state);
    }
}
