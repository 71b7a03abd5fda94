use anaphora_protocol::{NodeId, TokenId};

use crate::tree::PhraseTree;

/// A pronoun-flagged word and the phrase that immediately encloses it.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PronounSite {
    pub token: TokenId,
    pub node: NodeId,
}

/// Every pronoun in the tree, in surface order.
pub fn find_pronouns(tree: &PhraseTree) -> Vec<PronounSite> {
    tree.words()
        .iter()
        .enumerate()
        .filter(|(_, word)| word.is_pronoun())
        .filter_map(|(i, _)| {
            let token = TokenId(i as u32);
            tree.word_node(token).map(|node| PronounSite { token, node })
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use anaphora_protocol::{SentenceId, Word, WordFlags};

    #[test]
    fn test_finds_pronouns_in_order() {
        let words = vec![
            Word::new("She"),
            Word::new("gave"),
            Word::new("it"),
            Word::new("to"),
            Word::new("Bob"),
        ];
        let words = words
            .into_iter()
            .enumerate()
            .map(|(i, w)| if i == 0 || i == 2 { w.with_flags(WordFlags::PRONOUN) } else { w })
            .collect();
        let tree = PhraseTree::build(SentenceId(0), "(S (NP She) (VP gave (NP it) (PP to (NP Bob))))", words)
            .unwrap()
            .unwrap();

        let sites = find_pronouns(&tree);
        assert_eq!(
            sites,
            vec![
                PronounSite { token: TokenId(0), node: NodeId(1) },
                PronounSite { token: TokenId(2), node: NodeId(3) },
            ]
        );
    }

    #[test]
    fn test_no_pronouns() {
        let tree = PhraseTree::build(SentenceId(0), "(NP Bob)", vec![Word::new("Bob")])
            .unwrap()
            .unwrap();
        assert!(find_pronouns(&tree).is_empty());
    }
}
