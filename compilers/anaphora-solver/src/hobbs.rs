use std::ops::ControlFlow;
use std::sync::Arc;

use anaphora_parser::{build_tree, find_pronouns, PhraseTree, PhraseType, PronounSite};
use anaphora_protocol::{AnnotatedSentence, NodeId, SentenceId};
use log::{debug, trace, warn};

use crate::antecedents::{AntecedentStore, ExportedAnaphor, Filter};
use crate::config::ResolverConfig;
use crate::error::{ResolveError, WalkError};
use crate::history::{history_for, SentenceHistory, SentenceRecord};
use crate::marks::MarkSet;
use crate::phrase::{PhraseKey, PhraseRef};

/// Nearest ancestor of `node` that bounds a clause or noun phrase, and
/// optionally a PP.
fn clause_above(tree: &PhraseTree, node: NodeId, stop_at_pp: bool) -> Option<NodeId> {
    tree.ancestors(node).find(|&n| {
        let kind = tree.kind(n);
        kind.is_clause_boundary() || (stop_at_pp && *kind == PhraseType::PP)
    })
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Scan {
    /// Reject candidates in the anaphor's own clause unless it is reflexive.
    ContraIndexed,
    All,
}

/// An open phrase in the descent: its sub-phrases and the one up next.
struct Frame {
    children: Vec<NodeId>,
    next: usize,
}

/// State of one anaphor's search.
struct Walk<'a> {
    config: &'a ResolverConfig,
    store: &'a mut AntecedentStore,
    marks: &'a mut MarkSet,
    anaphor: PhraseRef,
    reflexive: bool,
    proposals: usize,
}

impl Walk<'_> {
    /// Steps 3 through 8: scan below `x`, then keep climbing to the root.
    fn climb(&mut self, tree: &Arc<PhraseTree>, x: NodeId) -> ControlFlow<()> {
        let p = self.anaphor.node();

        // 3. Left of the path below X, same-clause candidates barred
        self.walk(tree, x, Some(p), Scan::ContraIndexed, false)?;

        let mut x = x;
        // 4. Root reached: the caller moves on to history
        while let Some(next) = clause_above(tree, x, self.config.modified_step_two) {
            x = next;
            trace!("climbed to {} {}", tree.kind(x), x);

            // 7. Left of the path below X
            self.walk(tree, x, Some(p), Scan::All, false)?;

            // 8. Right of the path, without entering accepted NPs
            if *tree.kind(x) == PhraseType::S {
                self.walk(tree, x, None, Scan::All, true)?;
            }
        }
        ControlFlow::Continue(())
    }

    /// Propose the NP children of `head`, then descend into each child.
    /// Both passes run left to right and stop at the child that is, or
    /// holds, `stopper`.
    ///
    /// The descent keeps its own stack of frames, one per open phrase, so
    /// tree depth is not bounded by the thread's stack.
    fn walk(
        &mut self,
        tree: &Arc<PhraseTree>,
        head: NodeId,
        stopper: Option<NodeId>,
        scan: Scan,
        stop_at_np: bool,
    ) -> ControlFlow<()> {
        let holds_stopper = |child: NodeId| stopper.map_or(false, |s| tree.contains(child, s));

        let mut stack = vec![self.propose_children(tree, head, stopper, scan, stop_at_np)?];
        while let Some(frame) = stack.last_mut() {
            let Some(&child) = frame.children.get(frame.next) else {
                stack.pop();
                // The parent's current child has been walked in full
                if let Some(parent) = stack.last_mut() {
                    let done = parent.children[parent.next];
                    parent.next += 1;
                    self.mark(tree, done);
                    if holds_stopper(done) {
                        parent.next = parent.children.len();
                    }
                }
                continue;
            };

            if Some(child) == stopper {
                frame.next = frame.children.len();
            } else if self.is_marked(tree, child) {
                frame.next += 1;
                if holds_stopper(child) {
                    frame.next = frame.children.len();
                }
            } else {
                let entered = self.propose_children(tree, child, stopper, scan, stop_at_np)?;
                stack.push(entered);
            }
        }

        ControlFlow::Continue(())
    }

    /// First pass over `head`: propose its unmarked NP children. Yields the
    /// frame the descent continues from.
    fn propose_children(
        &mut self,
        tree: &Arc<PhraseTree>,
        head: NodeId,
        stopper: Option<NodeId>,
        scan: Scan,
        stop_at_np: bool,
    ) -> ControlFlow<(), Frame> {
        let children: Vec<NodeId> = tree.phrase_children(head).collect();

        for &child in &children {
            if Some(child) == stopper {
                break;
            }
            if !self.is_marked(tree, child)
                && tree.kind(child).is_noun_phrase()
                && self.admits(tree, child, scan)
            {
                if self.proposals >= self.config.max_proposals {
                    debug!("proposal budget spent for {:?}", self.anaphor.leader_text());
                    return ControlFlow::Break(());
                }
                self.proposals += 1;
                self.store.add(&self.anaphor, PhraseRef::new(tree.clone(), child));
                if stop_at_np {
                    self.mark(tree, child);
                }
            }
            if stopper.map_or(false, |s| tree.contains(child, s)) {
                break;
            }
        }

        ControlFlow::Continue(Frame { children, next: 0 })
    }

    fn admits(&self, tree: &PhraseTree, candidate: NodeId, scan: Scan) -> bool {
        match scan {
            Scan::All => true,
            Scan::ContraIndexed if self.reflexive => true,
            Scan::ContraIndexed => {
                // Two missing ancestors compare equal and block the candidate
                let stop_at_pp = self.config.contra_index_stops_at_pp;
                clause_above(tree, self.anaphor.node(), stop_at_pp)
                    != clause_above(tree, candidate, stop_at_pp)
            }
        }
    }

    fn is_marked(&self, tree: &PhraseTree, node: NodeId) -> bool {
        self.marks.is_marked(self.anaphor.key(), key(tree, node))
    }

    fn mark(&mut self, tree: &PhraseTree, node: NodeId) {
        self.marks.mark(self.anaphor.key(), key(tree, node));
    }
}

fn key(tree: &PhraseTree, node: NodeId) -> PhraseKey {
    PhraseKey { sentence: tree.sentence(), node }
}

/// Hobbs pronoun resolver.
///
/// Owns the sentence history and the antecedent store. Sentences are
/// handled one at a time: every anaphor of a sentence is resolved before
/// the sentence itself joins the history.
pub struct Hobbs {
    config: ResolverConfig,
    history: Box<dyn SentenceHistory>,
    antecedents: AntecedentStore,
    marks: MarkSet,
    next_sentence: u32,
}

impl Hobbs {
    /// Resolver with every filter on and candidate lists capped at the
    /// proposal budget.
    pub fn new(config: ResolverConfig) -> Self {
        let history = history_for(&config);
        let store =
            AntecedentStore::with_filters(Filter::DEFAULT_ORDER.to_vec(), config.max_proposals);
        Self::with_parts(config, history, store)
    }

    /// Resolver over a caller-supplied history policy and store, e.g. a
    /// [`TimeWindowHistory`](crate::history::TimeWindowHistory) on a manual
    /// clock or a store with filters switched off.
    pub fn with_parts(
        config: ResolverConfig,
        history: Box<dyn SentenceHistory>,
        antecedents: AntecedentStore,
    ) -> Self {
        Self { config, history, antecedents, marks: MarkSet::new(), next_sentence: 0 }
    }

    pub fn config(&self) -> &ResolverConfig {
        &self.config
    }

    pub fn antecedents(&self) -> &AntecedentStore {
        &self.antecedents
    }

    pub fn history_mut(&mut self) -> &mut dyn SentenceHistory {
        self.history.as_mut()
    }

    /// Build the sentence's tree, resolve its pronouns and append it to
    /// history. Sentences without constituent markup are still recorded.
    ///
    /// Malformed markup fails the sentence before anything is touched.
    pub fn process(&mut self, sentence: &AnnotatedSentence) -> Result<SentenceId, ResolveError> {
        let id = SentenceId(self.next_sentence);
        let tree = build_tree(id, sentence)?;

        match tree {
            Some(tree) => self.resolve_sentence(Arc::new(tree))?,
            None => {
                debug!("sentence {} has no parse", id);
                self.next_sentence += 1;
                self.history.add_sentence(SentenceRecord::new(id, None));
            }
        }
        Ok(id)
    }

    /// Resolve every pronoun of an already built tree, then append the tree
    /// to history.
    ///
    /// Phrases are identified by sentence id, so the tree must carry an id
    /// this resolver has not handed out yet. A reused id is refused before
    /// anything is touched.
    pub fn resolve_sentence(&mut self, tree: Arc<PhraseTree>) -> Result<(), ResolveError> {
        let id = tree.sentence();
        if id.0 < self.next_sentence {
            return Err(ResolveError::StaleSentence { id, next: SentenceId(self.next_sentence) });
        }
        self.next_sentence = id.0.saturating_add(1);

        for site in find_pronouns(&tree) {
            match self.resolve_anaphor(&tree, site) {
                Ok(()) => {}
                Err(err @ WalkError::NotNounPhrase { .. }) => debug!("skipping anaphor: {}", err),
                Err(err) => warn!("skipping anaphor in sentence {}: {}", id, err),
            }
        }

        self.marks.clear();
        self.history.add_sentence(SentenceRecord::from_tree(tree));
        Ok(())
    }

    fn resolve_anaphor(&mut self, tree: &Arc<PhraseTree>, site: PronounSite) -> Result<(), WalkError> {
        let word = tree.word(site.token).map_or_else(String::new, |w| w.text.clone());

        // 1. The NP immediately dominating the pronoun
        let p = site.node;
        if !tree.kind(p).is_noun_phrase() {
            return Err(WalkError::NotNounPhrase { word });
        }
        let Some(leader) = tree.leader_word(p) else {
            return Err(WalkError::MissingLeader { word });
        };
        let reflexive = leader.is_reflexive();

        // 2. Up to the first NP or clause, or PP when the modified step is on
        let Some(x) = clause_above(tree, p, self.config.modified_step_two) else {
            return Err(WalkError::NoClauseAbove { word });
        };

        let anaphor = PhraseRef::new(tree.clone(), p);
        self.antecedents.track(&anaphor);
        debug!("resolving '{}' from {} {}", word, tree.kind(x), x);

        let mut walk = Walk {
            config: &self.config,
            store: &mut self.antecedents,
            marks: &mut self.marks,
            anaphor,
            reflexive,
            proposals: 0,
        };

        if walk.climb(tree, x).is_break() {
            return Ok(());
        }

        // Earlier sentences, most recent first
        for record in self.history.sentence_list() {
            let Some(prior) = record.tree() else { continue };
            if walk.walk(prior, prior.root(), None, Scan::All, false).is_break() {
                break;
            }
        }

        debug!("'{}': {} proposal(s)", word, walk.proposals);
        Ok(())
    }

    /// Current candidates as plain strings.
    pub fn export(&self) -> Vec<ExportedAnaphor> {
        self.antecedents.export()
    }

    /// Forget all anaphors and all history. Sentence numbering continues.
    pub fn clear(&mut self) {
        self.antecedents.clear();
        self.history.clear();
        self.marks.clear();
    }
}

impl Default for Hobbs {
    fn default() -> Self {
        Self::new(ResolverConfig::default())
    }
}
