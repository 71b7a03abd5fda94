use core::fmt;

use anaphora_protocol::{NodeId, SentenceId, TokenId, Word};

use crate::error::TreeError;
use crate::parser::lex_brackets;
use crate::token::BracketToken;

/// Constituent label of a phrase node. The labels the resolver reasons
/// about get their own variants; every other tag is kept verbatim.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum PhraseType {
    S,
    NP,
    VP,
    PP,
    SBAR,
    SINV,
    Other(String),
}

impl PhraseType {
    pub fn from_tag(tag: &str) -> Self {
        match tag {
            "S" => PhraseType::S,
            "NP" => PhraseType::NP,
            "VP" => PhraseType::VP,
            "PP" => PhraseType::PP,
            "SBAR" => PhraseType::SBAR,
            "SINV" => PhraseType::SINV,
            other => PhraseType::Other(other.to_string()),
        }
    }

    pub fn as_str(&self) -> &str {
        match self {
            PhraseType::S => "S",
            PhraseType::NP => "NP",
            PhraseType::VP => "VP",
            PhraseType::PP => "PP",
            PhraseType::SBAR => "SBAR",
            PhraseType::SINV => "SINV",
            PhraseType::Other(tag) => tag,
        }
    }

    pub fn is_noun_phrase(&self) -> bool {
        *self == PhraseType::NP
    }

    /// S, NP, SBAR or SINV: the nodes that bound a clause for Hobbs.
    pub fn is_clause_boundary(&self) -> bool {
        matches!(
            self,
            PhraseType::S | PhraseType::NP | PhraseType::SBAR | PhraseType::SINV
        )
    }
}

impl fmt::Display for PhraseType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// An entry in a phrase's child list.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Child {
    Phrase(NodeId),
    Word(TokenId),
}

#[derive(Debug, Clone)]
pub struct PhraseNode {
    kind: PhraseType,
    parent: Option<NodeId>,
    children: Vec<Child>,
    /// One past the last node of this subtree, in pre-order.
    end: NodeId,
}

impl PhraseNode {
    pub fn kind(&self) -> &PhraseType {
        &self.kind
    }

    pub fn parent(&self) -> Option<NodeId> {
        self.parent
    }

    pub fn children(&self) -> &[Child] {
        &self.children
    }
}

/// Arena-backed constituent tree for one sentence.
///
/// Nodes are stored in pre-order, so the root is always `NodeId(0)`.
/// Parent links and word back-links are fixed at construction; the only
/// thing written afterwards is the leader table, and only by the leader
/// locator before the tree is shared.
#[derive(Debug, Clone)]
pub struct PhraseTree {
    sentence: SentenceId,
    nodes: Vec<PhraseNode>,
    words: Vec<Word>,
    /// Immediate enclosing phrase of every word, indexed by `TokenId`.
    word_nodes: Vec<NodeId>,
    /// Leader word of every phrase, indexed by `NodeId`.
    leaders: Vec<Option<TokenId>>,
}

impl PhraseTree {
    /// Build a tree from a bracket string and the sentence's words.
    ///
    /// Bare tokens in the string are matched to `words` purely by position.
    /// Returns `Ok(None)` for an empty string: no markup, no tree.
    pub fn build(
        sentence: SentenceId,
        brackets: &str,
        words: Vec<Word>,
    ) -> Result<Option<Self>, TreeError> {
        let tokens = lex_brackets(brackets);
        if tokens.is_empty() {
            return Ok(None);
        }

        let mut nodes: Vec<PhraseNode> = Vec::new();
        let mut word_nodes: Vec<NodeId> = Vec::with_capacity(words.len());
        // Open phrases, innermost last, with the byte offset of their '('
        let mut open: Vec<(NodeId, usize)> = Vec::new();
        let mut root_closed = false;

        let mut iter = tokens.iter().peekable();
        while let Some(&(span, token)) = iter.next() {
            if root_closed {
                return Err(TreeError::TrailingInput { offset: span.start });
            }

            match token {
                BracketToken::Open => {
                    let kind = match iter.peek() {
                        Some(&&(_, BracketToken::Atom(tag))) => {
                            iter.next();
                            PhraseType::from_tag(tag)
                        }
                        _ => return Err(TreeError::MissingPhraseType { offset: span.start }),
                    };

                    let id = NodeId(nodes.len() as u32);
                    let parent = open.last().map(|&(node, _)| node);
                    if let Some(parent) = parent {
                        nodes[parent.index()].children.push(Child::Phrase(id));
                    }
                    nodes.push(PhraseNode { kind, parent, children: Vec::new(), end: id });
                    open.push((id, span.start));
                }
                BracketToken::Close => {
                    let Some((closed, _)) = open.pop() else {
                        return Err(TreeError::UnexpectedClose { offset: span.start });
                    };
                    nodes[closed.index()].end = NodeId(nodes.len() as u32);
                    root_closed = open.is_empty();
                }
                BracketToken::Atom(_) => {
                    let Some(&(parent, _)) = open.last() else {
                        return Err(TreeError::ExpectedOpen { offset: span.start });
                    };
                    let token = TokenId(word_nodes.len() as u32);
                    nodes[parent.index()].children.push(Child::Word(token));
                    word_nodes.push(parent);
                }
            }
        }

        if let Some(&(_, offset)) = open.last() {
            return Err(TreeError::UnclosedPhrase { offset });
        }

        if word_nodes.len() != words.len() {
            return Err(TreeError::TokenCountMismatch {
                expected: words.len(),
                found: word_nodes.len(),
            });
        }

        let leaders = vec![None; nodes.len()];
        Ok(Some(Self { sentence, nodes, words, word_nodes, leaders }))
    }

    pub fn sentence(&self) -> SentenceId {
        self.sentence
    }

    pub fn root(&self) -> NodeId {
        NodeId(0)
    }

    /// Number of phrase nodes.
    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    pub fn node(&self, node: NodeId) -> &PhraseNode {
        &self.nodes[node.index()]
    }

    /// All node ids in pre-order.
    pub fn node_ids(&self) -> impl Iterator<Item = NodeId> {
        (0..self.nodes.len() as u32).map(NodeId)
    }

    pub fn kind(&self, node: NodeId) -> &PhraseType {
        &self.nodes[node.index()].kind
    }

    pub fn parent(&self, node: NodeId) -> Option<NodeId> {
        self.nodes[node.index()].parent
    }

    pub fn children(&self, node: NodeId) -> &[Child] {
        &self.nodes[node.index()].children
    }

    /// Sub-phrases of `node`, left to right, skipping its words.
    pub fn phrase_children(&self, node: NodeId) -> impl Iterator<Item = NodeId> + '_ {
        self.children(node).iter().filter_map(|child| match child {
            Child::Phrase(id) => Some(*id),
            Child::Word(_) => None,
        })
    }

    /// Strict ancestors of `node`, nearest first.
    pub fn ancestors(&self, node: NodeId) -> impl Iterator<Item = NodeId> + '_ {
        core::iter::successors(self.parent(node), move |&n| self.parent(n))
    }

    /// True when `node` is `ancestor` or lies somewhere below it.
    pub fn contains(&self, ancestor: NodeId, node: NodeId) -> bool {
        ancestor <= node && node < self.nodes[ancestor.index()].end
    }

    pub fn words(&self) -> &[Word] {
        &self.words
    }

    pub fn word(&self, token: TokenId) -> Option<&Word> {
        self.words.get(token.index())
    }

    /// The phrase immediately enclosing a word.
    pub fn word_node(&self, token: TokenId) -> Option<NodeId> {
        self.word_nodes.get(token.index()).copied()
    }

    pub fn leader(&self, node: NodeId) -> Option<TokenId> {
        self.leaders[node.index()]
    }

    pub fn leader_word(&self, node: NodeId) -> Option<&Word> {
        self.leader(node).and_then(|token| self.word(token))
    }

    pub(crate) fn set_leader(&mut self, node: NodeId, token: TokenId) {
        self.leaders[node.index()] = Some(token);
    }

    /// Words dominated by `node`, in surface order.
    pub fn words_under(&self, node: NodeId) -> Vec<TokenId> {
        let mut out = Vec::new();
        let mut stack: Vec<Child> = self.children(node).iter().rev().copied().collect();
        while let Some(child) = stack.pop() {
            match child {
                Child::Word(token) => out.push(token),
                Child::Phrase(id) => stack.extend(self.children(id).iter().rev().copied()),
            }
        }
        out
    }

    pub fn first_word(&self, node: NodeId) -> Option<TokenId> {
        self.words_under(node).first().copied()
    }

    /// The only word below `node`, if there is exactly one.
    pub fn single_word(&self, node: NodeId) -> Option<TokenId> {
        let mut found = None;
        let mut stack = vec![node];
        while let Some(current) = stack.pop() {
            for child in self.children(current) {
                match *child {
                    Child::Word(token) => {
                        if found.replace(token).is_some() {
                            return None;
                        }
                    }
                    Child::Phrase(id) => stack.push(id),
                }
            }
        }
        found
    }

    /// Number of children, words included.
    pub fn degree(&self, node: NodeId) -> usize {
        self.children(node).len()
    }

    /// Number of words below `node`.
    pub fn breadth(&self, node: NodeId) -> usize {
        let mut count = 0;
        let mut stack = vec![node];
        while let Some(current) = stack.pop() {
            for child in self.children(current) {
                match *child {
                    Child::Word(_) => count += 1,
                    Child::Phrase(id) => stack.push(id),
                }
            }
        }
        count
    }

    /// Nesting depth of phrases; a phrase holding only words has depth 1.
    pub fn depth(&self, node: NodeId) -> usize {
        let mut deepest = 0;
        let mut stack = vec![(node, 1)];
        while let Some((current, level)) = stack.pop() {
            deepest = deepest.max(level);
            stack.extend(self.phrase_children(current).map(|id| (id, level + 1)));
        }
        deepest
    }

    fn write_node(&self, f: &mut fmt::Formatter<'_>, node: NodeId) -> fmt::Result {
        enum Step {
            Enter(NodeId),
            Word(TokenId),
            Close,
        }

        let mut steps = vec![Step::Enter(node)];
        while let Some(step) = steps.pop() {
            match step {
                Step::Enter(id) => {
                    write!(f, "({}", self.kind(id))?;
                    steps.push(Step::Close);
                    for child in self.children(id).iter().rev() {
                        steps.push(match *child {
                            Child::Phrase(sub) => Step::Enter(sub),
                            Child::Word(token) => Step::Word(token),
                        });
                    }
                }
                Step::Word(token) => {
                    let text = self.word(token).map(|w| w.text.as_str()).unwrap_or("");
                    // Entity-merged words have no surface form
                    if !text.is_empty() {
                        write!(f, " {}", text.replace('(', "{").replace(')', "}"))?;
                    }
                }
                Step::Close => f.write_str(")")?,
            }
            if let Some(Step::Enter(_)) = steps.last() {
                f.write_str(" ")?;
            }
        }
        Ok(())
    }
}

impl fmt::Display for PhraseTree {
    /// Regenerates the bracket string.
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.write_node(f, self.root())
    }
}
