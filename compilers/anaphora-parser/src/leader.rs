use anaphora_protocol::{NodeId, Relation, TokenId};
use log::debug;

use crate::tree::{Child, PhraseTree};

/// Unary relations that sit on a noun's head word. Other unary markers can
/// land on any word of a phrase and name no leader.
const LEADER_MARKERS: [&str; 2] = ["definite-FLAG", "noun_number"];

/// Annotate every phrase with its leader word.
///
/// Pass 1 trusts the upstream relations: a word heading a binary relation,
/// or marked by `definite-FLAG` or `noun_number`, leads the phrase that
/// immediately encloses it. Binary relations go first and the first
/// assignment sticks, since `definite-FLAG` can land on the wrong word of
/// a phrase.
///
/// Pass 2 fills the remaining phrases that dominate exactly one word.
/// Coordinations like `(NP (NP a) and (NP b))` end up without a leader.
pub fn locate_leaders(tree: &mut PhraseTree, relations: &[Relation]) {
    let binary = relations.iter().filter(|r| r.is_binary());
    let unary = relations
        .iter()
        .filter(|r| !r.is_binary() && LEADER_MARKERS.contains(&r.name.as_str()));

    for relation in binary.chain(unary) {
        let head = relation.head;

        // Words folded into an entity name lose their surface form.
        let Some(word) = tree.word(head) else { continue };
        if word.text.is_empty() {
            continue;
        }
        let Some(node) = tree.word_node(head) else { continue };

        if tree.leader(node).is_none() {
            debug!(
                "leader of {} is '{}' (from {})",
                tree.kind(node),
                word.text,
                relation.name
            );
            tree.set_leader(node, head);
        }
    }

    for (node, lone) in lone_words(tree).into_iter().enumerate() {
        let node = NodeId(node as u32);
        if let (None, Lone::One(token)) = (tree.leader(node), lone) {
            tree.set_leader(node, token);
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Lone {
    Zero,
    One(TokenId),
    Many,
}

impl Lone {
    fn with(self, other: Lone) -> Lone {
        match (self, other) {
            (Lone::Zero, x) | (x, Lone::Zero) => x,
            _ => Lone::Many,
        }
    }
}

/// How many words sit below each node, up to "more than one". Children
/// always follow their parent in pre-order, so one reverse sweep settles
/// every node.
fn lone_words(tree: &PhraseTree) -> Vec<Lone> {
    let mut lone = vec![Lone::Zero; tree.len()];
    for node in (0..tree.len() as u32).rev().map(NodeId) {
        let below = tree.children(node).iter().fold(Lone::Zero, |acc, child| match *child {
            Child::Word(token) => acc.with(Lone::One(token)),
            Child::Phrase(id) => acc.with(lone[id.index()]),
        });
        lone[node.index()] = below;
    }
    lone
}

#[cfg(test)]
mod tests {
    use super::*;
    use anaphora_protocol::{SentenceId, Word};

    fn build(brackets: &str, words: Vec<Word>) -> PhraseTree {
        PhraseTree::build(SentenceId(0), brackets, words).unwrap().unwrap()
    }

    fn plain(text: &str) -> Vec<Word> {
        text.split_whitespace().map(Word::new).collect()
    }

    #[test]
    fn test_single_leaf_leaders() {
        let mut t = build("(S (NP Alice) (VP talked (PP to (NP her))))", plain("Alice talked to her"));
        locate_leaders(&mut t, &[]);

        assert_eq!(t.leader(NodeId(1)), Some(TokenId(0))); // (NP Alice)
        assert_eq!(t.leader(NodeId(4)), Some(TokenId(3))); // (NP her)
        assert_eq!(t.leader(NodeId(3)), None); // (PP to her): two words
        assert_eq!(t.leader(NodeId(0)), None);
    }

    #[test]
    fn test_single_leaf_at_depth() {
        // ADVP reaches its only word through a nested NP
        let mut t = build("(S (ADVP (NP fun)) (VP ran))", plain("fun ran"));
        locate_leaders(&mut t, &[]);

        assert_eq!(t.leader(NodeId(1)), Some(TokenId(0)));
        assert_eq!(t.leader(NodeId(2)), Some(TokenId(0)));
        assert_eq!(t.leader(NodeId(3)), Some(TokenId(1)));
    }

    #[test]
    fn test_relation_heads_win_over_leaf_rule() {
        let mut t = build("(S (NP the red chair) (VP broke))", plain("the red chair broke"));
        let relations = vec![
            Relation::unary("definite-FLAG", TokenId(0)),
            Relation::binary("_amod", TokenId(2), TokenId(1)),
        ];
        locate_leaders(&mut t, &relations);

        // Binary "_amod(chair, red)" beats unary "definite-FLAG(the)"
        assert_eq!(t.leader(NodeId(1)), Some(TokenId(2)));
        assert_eq!(t.leader(NodeId(2)), Some(TokenId(3)));
    }

    #[test]
    fn test_unary_relation_alone() {
        let mut t = build("(S (NP the chair) (VP broke))", plain("the chair broke"));
        locate_leaders(&mut t, &[Relation::unary("noun_number", TokenId(1))]);
        assert_eq!(t.leader(NodeId(1)), Some(TokenId(1)));
    }

    #[test]
    fn test_other_unary_markers_name_no_leader() {
        let mut t = build("(S (NP the old chair) (VP broke))", plain("the old chair broke"));
        locate_leaders(&mut t, &[Relation::unary("degree", TokenId(1))]);
        assert_eq!(t.leader(NodeId(1)), None);

        locate_leaders(&mut t, &[Relation::unary("definite-FLAG", TokenId(0))]);
        assert_eq!(t.leader(NodeId(1)), Some(TokenId(0)));
    }

    #[test]
    fn test_long_unary_chain_gets_leaders() {
        let depth = 50_000;
        let brackets = format!("{}(NP box){}", "(VP ".repeat(depth), ")".repeat(depth));
        let mut t = build(&brackets, plain("box"));
        locate_leaders(&mut t, &[]);

        assert_eq!(t.leader(NodeId(0)), Some(TokenId(0)));
        assert_eq!(t.leader(NodeId(depth as u32)), Some(TokenId(0)));
    }

    #[test]
    fn test_coordination_has_no_leader() {
        let mut t = build("(NP (NP the boxes) and (NP the cup))", plain("the boxes and the cup"));
        let relations = vec![
            Relation::unary("noun_number", TokenId(1)),
            Relation::unary("noun_number", TokenId(4)),
        ];
        locate_leaders(&mut t, &relations);

        assert_eq!(t.leader(NodeId(0)), None);
        assert_eq!(t.leader(NodeId(1)), Some(TokenId(1)));
        assert_eq!(t.leader(NodeId(2)), Some(TokenId(4)));
    }

    #[test]
    fn test_entity_merged_word_never_leads() {
        let words = vec![Word::new(""), Word::new("New_York"), Word::new("sleeps")];
        let mut t = build("(S (NP New York) (VP sleeps))", words);
        locate_leaders(&mut t, &[Relation::unary("definite-FLAG", TokenId(0))]);

        assert_eq!(t.leader(NodeId(1)), None);
    }

    #[test]
    fn test_out_of_range_relation_is_ignored() {
        let mut t = build("(NP it)", plain("it"));
        locate_leaders(&mut t, &[Relation::unary("noun_number", TokenId(9))]);
        assert_eq!(t.leader(NodeId(0)), Some(TokenId(0)));
    }
}
